//! Process-wide memory stress buffer.
//!
//! The buffer goes from absent to present at most once for the life of the
//! process. Concurrent first calls race on an atomic claim: exactly one caller
//! wins and performs the allocation, everyone else is told the test is already
//! running. A failed allocation or fill releases the claim so a later call can
//! try again.
//!
//! Callers arriving while the claim holder is still filling are told the test
//! is already running even though nothing has been published yet. If that fill
//! then fails, those answers were premature: no buffer exists and the next call
//! starts over.

use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::OnceLock;

use rand::rngs::OsRng;
use rand::RngCore;

use crate::error::AppError;

const ABSENT: u8 = 0;
const CLAIMING: u8 = 1;
const PRESENT: u8 = 2;

/// Outcome of a stress trigger call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StressOutcome {
    /// This call allocated and filled the buffer
    Started,
    /// Another call already claimed the buffer
    AlreadyRunning,
}

#[derive(Debug)]
pub struct StressBuffer {
    size: usize,
    state: AtomicU8,
    buffer: OnceLock<Box<[u8]>>,
}

impl StressBuffer {
    pub fn new(size: usize) -> Self {
        Self {
            size,
            state: AtomicU8::new(ABSENT),
            buffer: OnceLock::new(),
        }
    }

    /// Target size of the buffer in bytes
    pub fn size(&self) -> usize {
        self.size
    }

    /// Whether a filled buffer has been published
    pub fn is_allocated(&self) -> bool {
        self.buffer.get().is_some()
    }

    /// Number of bytes currently held, zero until the buffer is published
    pub fn allocated_bytes(&self) -> usize {
        self.buffer.get().map_or(0, |buf| buf.len())
    }

    /// Allocate and randomize the buffer unless another call already has.
    ///
    /// Blocks for as long as the fill takes; async callers should run this
    /// on a blocking thread.
    pub fn trigger(&self) -> Result<StressOutcome, AppError> {
        if self
            .state
            .compare_exchange(ABSENT, CLAIMING, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Ok(StressOutcome::AlreadyRunning);
        }

        match fill_random(self.size) {
            Ok(buf) => {
                // Only the claim holder reaches this point, so the cell is empty.
                let _ = self.buffer.set(buf);
                self.state.store(PRESENT, Ordering::Release);
                Ok(StressOutcome::Started)
            }
            Err(err) => {
                self.state.store(ABSENT, Ordering::Release);
                Err(err)
            }
        }
    }
}

fn fill_random(size: usize) -> Result<Box<[u8]>, AppError> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(size)?;
    buf.resize(size, 0u8);
    OsRng.try_fill_bytes(&mut buf)?;
    Ok(buf.into_boxed_slice())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Barrier};

    #[test]
    fn test_first_trigger_allocates() {
        let stress = StressBuffer::new(4096);
        assert!(!stress.is_allocated());
        assert_eq!(stress.trigger().unwrap(), StressOutcome::Started);
        assert!(stress.is_allocated());
        assert_eq!(stress.allocated_bytes(), 4096);
    }

    #[test]
    fn test_subsequent_triggers_do_not_reallocate() {
        let stress = StressBuffer::new(1024);
        stress.trigger().unwrap();
        let first_ptr = stress.buffer.get().unwrap().as_ptr();

        for _ in 0..5 {
            assert_eq!(stress.trigger().unwrap(), StressOutcome::AlreadyRunning);
        }
        assert_eq!(stress.allocated_bytes(), 1024);
        assert_eq!(stress.buffer.get().unwrap().as_ptr(), first_ptr);
    }

    #[test]
    fn test_buffer_is_randomized() {
        let stress = StressBuffer::new(64 * 1024);
        stress.trigger().unwrap();
        let buf = stress.buffer.get().unwrap();
        // 64 KiB of zeroes from a working entropy source is not a realistic outcome
        assert!(buf.iter().any(|&b| b != 0));
    }

    #[test]
    fn test_concurrent_first_calls_allocate_once() {
        let stress = Arc::new(StressBuffer::new(256 * 1024));
        let threads = 8;
        let barrier = Arc::new(Barrier::new(threads));

        let handles: Vec<_> = (0..threads)
            .map(|_| {
                let stress = Arc::clone(&stress);
                let barrier = Arc::clone(&barrier);
                std::thread::spawn(move || {
                    barrier.wait();
                    stress.trigger().unwrap()
                })
            })
            .collect();

        let outcomes: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        let started = outcomes
            .iter()
            .filter(|o| **o == StressOutcome::Started)
            .count();
        assert_eq!(started, 1);
        assert_eq!(stress.allocated_bytes(), 256 * 1024);
    }

    #[test]
    fn test_failed_allocation_releases_claim() {
        let stress = StressBuffer::new(usize::MAX);
        assert!(matches!(stress.trigger(), Err(AppError::Allocation(_))));
        assert!(!stress.is_allocated());
        assert_eq!(stress.state.load(Ordering::Acquire), ABSENT);
    }

    #[test]
    fn test_caller_during_fill_sees_already_running_until_claim_released() {
        let stress = StressBuffer::new(1024);
        stress.state.store(CLAIMING, Ordering::Release);

        assert_eq!(stress.trigger().unwrap(), StressOutcome::AlreadyRunning);
        assert!(!stress.is_allocated());

        // Claim holder's fill failed and released the claim
        stress.state.store(ABSENT, Ordering::Release);
        assert_eq!(stress.trigger().unwrap(), StressOutcome::Started);
        assert_eq!(stress.allocated_bytes(), 1024);
    }

    #[test]
    fn test_zero_size_buffer() {
        let stress = StressBuffer::new(0);
        assert_eq!(stress.trigger().unwrap(), StressOutcome::Started);
        assert!(stress.is_allocated());
        assert_eq!(stress.trigger().unwrap(), StressOutcome::AlreadyRunning);
    }
}
