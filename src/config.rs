//! Configuration loading and constants.
//!
//! The service has no config file and no command line. Everything it knows
//! about its placement comes from four environment variables that the
//! orchestrator injects (typically through the downward API), read once at
//! startup into `PodInfo`.

use std::net::{IpAddr, Ipv4Addr};
use std::time::Duration;

use serde::Serialize;

// =============================================================================
// HTTP
// =============================================================================

/// Address the listener binds to
pub const HTTP_HOST: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);

/// Port the listener binds to
pub const HTTP_PORT: u16 = 8080;

/// Info pages embed a per-request timestamp and must never be cached
pub const CACHE_CONTROL_INFO: &str = "no-store";

// =============================================================================
// Info Page
// =============================================================================

/// Title and heading of the info page
pub const PAGE_TITLE: &str = "Container Information V1";

/// Name under which the info template is registered with Tera
pub const INFO_TEMPLATE_NAME: &str = "info.html";

// =============================================================================
// Stress / Kill
// =============================================================================

/// Size of the buffer allocated by the memory stress endpoint (1 GiB)
pub const STRESS_BUFFER_SIZE: usize = 1024 * 1024 * 1024;

/// Delay between answering a kill request and exiting the process
pub const KILL_DELAY: Duration = Duration::from_secs(1);

// =============================================================================
// Environment Variables
// =============================================================================

/// Network address of the container
pub const ENV_IP: &str = "IP";
/// Name of the pod the container runs in
pub const ENV_POD: &str = "POD";
/// Name of the node the pod is scheduled on
pub const ENV_NODE: &str = "NODE";
/// Namespace the pod is deployed in
pub const ENV_NAMESPACE: &str = "NAMESPACE";
/// Log output format ("text" or "json")
pub const ENV_LOG_FORMAT: &str = "LOG_FORMAT";

// =============================================================================
// Logging
// =============================================================================

/// Default log filter when RUST_LOG is not set
pub const DEFAULT_LOG_FILTER: &str = "container_info=info,tower_http=info";

/// Default log format (text or json)
pub const DEFAULT_LOG_FORMAT: &str = "text";

/// Placement metadata of the running container.
///
/// Unset variables resolve to the empty string; there is no validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PodInfo {
    pub ip: String,
    pub pod: String,
    pub node: String,
    pub namespace: String,
}

impl PodInfo {
    /// Read placement metadata from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build placement metadata from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| lookup(name).unwrap_or_default();
        Self {
            ip: read(ENV_IP),
            pod: read(ENV_POD),
            node: read(ENV_NODE),
            namespace: read(ENV_NAMESPACE),
        }
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log format: "text" (human-readable, default) or "json" (structured)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: DEFAULT_LOG_FORMAT.to_string(),
        }
    }
}

impl LoggingConfig {
    pub fn from_env() -> Self {
        std::env::var(ENV_LOG_FORMAT)
            .map(|format| Self { format })
            .unwrap_or_default()
    }

    /// Parsed format, or `None` if the configured value is not recognized
    pub fn log_format(&self) -> Option<LogFormat> {
        match self.format.trim().to_ascii_lowercase().as_str() {
            "text" => Some(LogFormat::Text),
            "json" => Some(LogFormat::Json),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn test_pod_info_reads_all_variables() {
        let info = PodInfo::from_lookup(lookup_from(&[
            ("IP", "10.1.2.3"),
            ("POD", "web-7d9f"),
            ("NODE", "worker-2"),
            ("NAMESPACE", "staging"),
        ]));
        assert_eq!(info.ip, "10.1.2.3");
        assert_eq!(info.pod, "web-7d9f");
        assert_eq!(info.node, "worker-2");
        assert_eq!(info.namespace, "staging");
    }

    #[test]
    fn test_pod_info_unset_variables_are_empty() {
        let info = PodInfo::from_lookup(|_| None);
        assert_eq!(info, PodInfo::default());
    }

    #[test]
    fn test_pod_info_partial_environment() {
        let info = PodInfo::from_lookup(lookup_from(&[("POD", "only-pod")]));
        assert_eq!(info.pod, "only-pod");
        assert!(info.ip.is_empty());
        assert!(info.node.is_empty());
        assert!(info.namespace.is_empty());
    }

    #[test]
    fn test_log_format_parsing() {
        let logging = |f: &str| LoggingConfig {
            format: f.to_string(),
        };
        assert_eq!(logging("text").log_format(), Some(LogFormat::Text));
        assert_eq!(logging(" JSON ").log_format(), Some(LogFormat::Json));
        assert_eq!(logging("yaml").log_format(), None);
        assert_eq!(LoggingConfig::default().log_format(), Some(LogFormat::Text));
    }
}
