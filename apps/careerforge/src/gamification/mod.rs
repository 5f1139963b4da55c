//! Gamification: cumulative experience points and the level derived from them.

use serde::Serialize;
use tracing::info;

pub const XP_PER_LEVEL: u32 = 500;

/// Events that earn experience points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Reward {
    ResumeUpload,
    JobAnalysis,
    LearningTask,
    RecruiterSimulation,
}

impl Reward {
    pub fn points(self) -> u32 {
        match self {
            Reward::ResumeUpload => 100,
            Reward::JobAnalysis => 200,
            Reward::LearningTask => 50,
            Reward::RecruiterSimulation => 150,
        }
    }
}

/// Outcome of a single award.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelChange {
    pub xp: u32,
    pub level: u32,
    pub leveled_up: bool,
}

pub fn level_for(xp: u32) -> u32 {
    xp / XP_PER_LEVEL + 1
}

#[derive(Debug, Clone, Default)]
pub struct XpTracker {
    xp: u32,
}

impl XpTracker {
    pub fn xp(&self) -> u32 {
        self.xp
    }

    pub fn level(&self) -> u32 {
        level_for(self.xp)
    }

    /// Share of the current level already earned, 0–99.
    pub fn progress_percent(&self) -> u32 {
        (self.xp % XP_PER_LEVEL) / 5
    }

    pub fn xp_to_next_level(&self) -> u32 {
        XP_PER_LEVEL - self.xp % XP_PER_LEVEL
    }

    pub fn award(&mut self, reward: Reward) -> LevelChange {
        let before = self.level();
        self.xp = self.xp.saturating_add(reward.points());
        let level = self.level();

        if level > before {
            info!(xp = self.xp, level, "Level up");
        }

        LevelChange {
            xp: self.xp(),
            level,
            leveled_up: level > before,
        }
    }

    pub fn snapshot(&self) -> ProgressView {
        ProgressView {
            xp: self.xp(),
            level: self.level(),
            progress_percent: self.progress_percent(),
            xp_to_next_level: self.xp_to_next_level(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressView {
    pub xp: u32,
    pub level: u32,
    pub progress_percent: u32,
    pub xp_to_next_level: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_boundaries() {
        assert_eq!(level_for(0), 1);
        assert_eq!(level_for(499), 1);
        assert_eq!(level_for(500), 2);
        assert_eq!(level_for(999), 2);
        assert_eq!(level_for(1000), 3);
    }

    #[test]
    fn test_award_reports_level_up() {
        let mut tracker = XpTracker::default();
        assert_eq!(tracker.award(Reward::JobAnalysis).leveled_up, false);
        assert_eq!(tracker.award(Reward::JobAnalysis).xp, 400);
        let change = tracker.award(Reward::ResumeUpload);
        assert_eq!(change, LevelChange { xp: 500, level: 2, leveled_up: true });
    }

    #[test]
    fn test_progress_figures() {
        let mut tracker = XpTracker::default();
        assert_eq!(tracker.progress_percent(), 0);
        assert_eq!(tracker.xp_to_next_level(), 500);

        tracker.award(Reward::RecruiterSimulation);
        tracker.award(Reward::LearningTask);
        assert_eq!(tracker.xp(), 200);
        assert_eq!(tracker.progress_percent(), 40);
        assert_eq!(tracker.xp_to_next_level(), 300);
    }

    #[test]
    fn test_reward_points() {
        let points: Vec<u32> = [
            Reward::ResumeUpload,
            Reward::JobAnalysis,
            Reward::LearningTask,
            Reward::RecruiterSimulation,
        ]
        .iter()
        .map(|r| r.points())
        .collect();
        assert_eq!(points, vec![100, 200, 50, 150]);
    }
}
