//! Cosmetic progress meters and the timer tasks that advance them.

use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;

/// A 0–100 progress figure shared between a ticker task and readers.
#[derive(Debug, Clone, Default)]
pub struct ProgressMeter(Arc<AtomicU8>);

impl ProgressMeter {
    pub fn get(&self) -> u8 {
        self.0.load(Ordering::Acquire)
    }

    pub fn set(&self, value: u8) {
        self.0.store(value.min(100), Ordering::Release);
    }

    /// Adds `step` without passing `cap`; returns the new value.
    pub fn advance(&self, step: u8, cap: u8) -> u8 {
        let previous = self
            .0
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |v| {
                Some(v.saturating_add(step).min(cap).max(v))
            })
            .unwrap_or_else(|v| v);
        previous.saturating_add(step).min(cap).max(previous)
    }
}

/// Background task advancing a meter by `step` every `period` until `cap`.
/// The task is aborted when the ticker is dropped.
pub struct ProgressTicker(JoinHandle<()>);

impl ProgressTicker {
    pub fn start(meter: ProgressMeter, step: u8, cap: u8, period: Duration) -> Self {
        let handle = tokio::spawn(async move {
            loop {
                tokio::time::sleep(period).await;
                if meter.advance(step, cap) >= cap {
                    break;
                }
            }
        });
        ProgressTicker(handle)
    }
}

impl Drop for ProgressTicker {
    fn drop(&mut self) {
        self.0.abort();
    }
}
