pub mod app;
pub mod client;
pub mod config;
pub mod errors;
pub mod geo;
pub mod handlers;
pub mod models;
pub mod range;
pub mod report;
pub mod state;
pub mod summary;

pub use app::router;
pub use client::{AnalyticsSource, HttpAnalyticsSource};
pub use config::Config;
pub use state::AppState;
