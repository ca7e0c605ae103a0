mod client;
mod demo;
mod metrics;
mod provider;

pub use demo::DEMO_DATA_NOTICE;
pub use provider::{demo_report, GitHubProvider};
