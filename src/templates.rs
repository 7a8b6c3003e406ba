use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use tera::Tera;

use crate::config::{PodInfo, INFO_TEMPLATE_NAME, PAGE_TITLE};
use crate::error::AppError;

/// Info page template, compiled into the binary
const INFO_TEMPLATE: &str = include_str!("../templates/info.html");

/// Initialize the Tera template engine
pub fn init_templates() -> Result<Tera, AppError> {
    let mut tera = Tera::default();
    tera.add_raw_template(INFO_TEMPLATE_NAME, INFO_TEMPLATE)?;
    Ok(tera)
}

/// Values substituted into the info page, built fresh for every request
#[derive(Debug, Clone, Serialize)]
pub struct RenderContext<'a> {
    pub timestamp: String,
    pub ip: &'a str,
    pub pod: &'a str,
    pub node: &'a str,
    pub namespace: &'a str,
    pub page_header: &'static str,
}

impl<'a> RenderContext<'a> {
    pub fn new(pod: &'a PodInfo, now: DateTime<Utc>) -> Self {
        Self {
            timestamp: format_timestamp(now),
            ip: &pod.ip,
            pod: &pod.pod,
            node: &pod.node,
            namespace: &pod.namespace,
            page_header: PAGE_TITLE,
        }
    }
}

/// RFC 3339 in UTC with whole seconds and a `Z` suffix
pub fn format_timestamp(now: DateTime<Utc>) -> String {
    now.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Render the info page for the given placement at the given instant
pub fn render_info(tera: &Tera, pod: &PodInfo, now: DateTime<Utc>) -> Result<String, AppError> {
    let context = tera::Context::from_serialize(RenderContext::new(pod, now))?;
    Ok(tera.render(INFO_TEMPLATE_NAME, &context)?)
}
