pub mod app;
pub mod clock;
pub mod config;
pub mod elapsed;
pub mod errors;
pub mod handlers;
pub mod legacy;
pub mod milestones;
pub mod models;
pub mod scheduler;
pub mod state;
pub mod storage;
pub mod tracker;
pub mod ui;

pub use app::router;
pub use config::Config;
pub use scheduler::RefreshDriver;
pub use state::AppState;
pub use storage::{JsonFileStore, TrackerStore};
