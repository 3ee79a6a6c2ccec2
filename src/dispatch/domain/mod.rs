//! Domain types for interaction dispatch.

mod context;
mod error;
mod metrics;
mod outcome;

pub use context::RequestContext;
pub use error::{DispatchError, EngineBuildError, SharedError};
pub use metrics::{DispatchMetrics, MetricsSnapshot};
pub use outcome::DispatchOutcome;
