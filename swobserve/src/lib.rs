//! Observability hooks for provider attempts and generation turns.
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use swobserve::{MetricsObservabilityHooks, SafeProviderHooks, SafeTurnHooks, TracingObservabilityHooks};
//!
//! let _provider_hooks = Arc::new(SafeProviderHooks::new(TracingObservabilityHooks));
//! let _turn_hooks = Arc::new(SafeTurnHooks::new(MetricsObservabilityHooks));
//! ```

mod metrics_hooks;
mod safe_hooks;
mod tracing_hooks;

pub use metrics_hooks::MetricsObservabilityHooks;
pub use safe_hooks::{SafeProviderHooks, SafeTurnHooks};
pub use tracing_hooks::TracingObservabilityHooks;

pub mod prelude {
    pub use crate::{
        MetricsObservabilityHooks, SafeProviderHooks, SafeTurnHooks, TracingObservabilityHooks,
    };
}

#[cfg(test)]
mod tests;
