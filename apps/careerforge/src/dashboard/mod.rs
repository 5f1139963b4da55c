// Dashboard: view models, salary figures and the recruiter simulator.

pub mod salary;
pub mod simulator;
pub mod views;

pub use salary::{salary_insights, SalaryInsights};
pub use simulator::{recruiter_heatmap, HeatmapCell, RecruiterSimulator, SimulatorError};
pub use views::{DashboardView, Tab};
