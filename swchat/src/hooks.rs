//! Turn-level hook contracts for observing generation calls.
//!
//! ```rust
//! use swchat::{NoopTurnHooks, TurnHooks};
//!
//! fn accepts_hooks(_hooks: &dyn TurnHooks) {}
//!
//! let hooks = NoopTurnHooks;
//! accepts_hooks(&hooks);
//! ```

use std::time::Duration;

use swcommon::SessionId;
use swprovider::ProviderId;

use crate::{ChatError, ResponseType};

pub trait TurnHooks: Send + Sync {
    fn on_turn_start(&self, _session_id: &SessionId, _provider: ProviderId, _model: &str) {}

    fn on_turn_success(
        &self,
        _session_id: &SessionId,
        _provider: ProviderId,
        _model: &str,
        _response_type: ResponseType,
        _elapsed: Duration,
    ) {
    }

    fn on_turn_failure(
        &self,
        _session_id: &SessionId,
        _provider: ProviderId,
        _model: &str,
        _error: &ChatError,
        _elapsed: Duration,
    ) {
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopTurnHooks;

impl TurnHooks for NoopTurnHooks {}
