//! Access control: the page gate and the session context that re-runs it.

mod context;
mod gate;

pub use context::{GateWatch, SessionContext};
pub use gate::{evaluate, AccessDecision, RouteRequirement};
