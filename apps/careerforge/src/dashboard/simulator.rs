//! Recruiter simulator: a timed sweep that ends in a fixed attention heatmap.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde::Serialize;
use thiserror::Error;
use tokio::task::JoinHandle;

use crate::session::gate::{InFlightGate, InFlightTicket};
use crate::session::progress::ProgressMeter;

pub const SIMULATION_STEP: u8 = 2;
pub const SIMULATION_TICK: Duration = Duration::from_millis(100);

#[derive(Debug, Error)]
pub enum SimulatorError {
    #[error("A recruiter simulation is already running")]
    Busy,
}

/// One region of the resume and how much recruiter attention it draws.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeatmapCell {
    pub section: String,
    /// 0 – 100
    pub attention: u8,
    pub x: u8,
    pub y: u8,
}

/// The six-cell heatmap published at the end of every run.
pub fn recruiter_heatmap() -> Vec<HeatmapCell> {
    [
        ("Name", 95, 20, 10),
        ("Contact", 85, 20, 15),
        ("Summary", 70, 20, 25),
        ("Experience", 90, 20, 40),
        ("Skills", 80, 20, 70),
        ("Education", 60, 20, 85),
    ]
    .into_iter()
    .map(|(section, attention, x, y)| HeatmapCell {
        section: section.to_string(),
        attention,
        x,
        y,
    })
    .collect()
}

/// Progress, gate and task handle for the simulator. Clones share state.
#[derive(Debug, Clone, Default)]
pub struct RecruiterSimulator {
    progress: ProgressMeter,
    gate: InFlightGate,
    task: Arc<Mutex<Option<JoinHandle<()>>>>,
}

impl RecruiterSimulator {
    pub fn progress(&self) -> u8 {
        self.progress.get()
    }

    pub fn is_running(&self) -> bool {
        self.gate.is_busy()
    }

    /// Claims the simulator, rewinds progress to 0 and stores the task built
    /// by `spawn`. The task slot stays locked throughout, so a concurrent
    /// [`reset`](Self::reset) always sees the new run. The ticket must live as
    /// long as the run.
    pub fn launch<F>(&self, spawn: F) -> Result<(), SimulatorError>
    where
        F: FnOnce(ProgressMeter, InFlightTicket) -> JoinHandle<()>,
    {
        let mut slot = self.task.lock().unwrap_or_else(|e| e.into_inner());
        let ticket = self.gate.try_acquire().ok_or(SimulatorError::Busy)?;
        self.progress.set(0);
        *slot = Some(spawn(self.progress.clone(), ticket));
        Ok(())
    }

    /// Aborts a running sweep and rewinds progress. Returns once the aborted
    /// task has been dropped, so the gate is free again.
    pub async fn reset(&self) {
        let running = self.task.lock().unwrap_or_else(|e| e.into_inner()).take();
        if let Some(handle) = running {
            handle.abort();
            let _ = handle.await;
        }
        self.progress.set(0);
    }
}

/// Advances `progress` by [`SIMULATION_STEP`] every [`SIMULATION_TICK`] until it reaches 100.
pub async fn sweep(progress: &ProgressMeter) {
    while progress.get() < 100 {
        tokio::time::sleep(SIMULATION_TICK).await;
        progress.advance(SIMULATION_STEP, 100);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heatmap_cells() {
        let cells = recruiter_heatmap();
        let summary: Vec<(&str, u8)> = cells
            .iter()
            .map(|c| (c.section.as_str(), c.attention))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("Name", 95),
                ("Contact", 85),
                ("Summary", 70),
                ("Experience", 90),
                ("Skills", 80),
                ("Education", 60)
            ]
        );
        assert_eq!((cells[3].x, cells[3].y), (20, 40));
    }

    #[tokio::test(start_paused = true)]
    async fn test_sweep_takes_fifty_ticks() {
        let progress = ProgressMeter::default();
        let start = tokio::time::Instant::now();
        sweep(&progress).await;
        assert_eq!(progress.get(), 100);
        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_secs(5) && elapsed < Duration::from_millis(5100));
    }

    #[tokio::test(start_paused = true)]
    async fn test_launch_is_exclusive() {
        let sim = RecruiterSimulator::default();
        let run = |meter: ProgressMeter, ticket: InFlightTicket| {
            tokio::spawn(async move {
                let _ticket = ticket;
                sweep(&meter).await;
            })
        };
        sim.launch(run).unwrap();
        assert!(sim.is_running());
        assert!(matches!(sim.launch(run), Err(SimulatorError::Busy)));

        sim.reset().await;
        assert!(!sim.is_running());
        assert_eq!(sim.progress(), 0);
        assert!(sim.launch(run).is_ok());
    }
}
