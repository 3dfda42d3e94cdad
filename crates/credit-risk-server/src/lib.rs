pub mod config;
pub mod logging;
pub mod metrics;
pub mod protocol;
pub mod server;

pub use config::{ConfigError, ServerConfig, Transport};
pub use logging::init_tracing;
pub use metrics::MetricsRegistry;
pub use protocol::{parse_profile, AssessmentResponse, ProfileError};
pub use server::RiskServer;
