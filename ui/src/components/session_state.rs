use dioxus::prelude::*;

use atm_common::SessionView;

/// Session snapshot shared across all components.
///
/// Written only by the session coroutine; components read it to decide what
/// to render.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SessionState {
    pub view: SessionView,
    /// Label of the action currently waiting on the wallet, if any.
    pub busy: Option<&'static str>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_busy(&self) -> bool {
        self.busy.is_some()
    }
}

pub fn use_session_state() -> Signal<SessionState> {
    use_context::<Signal<SessionState>>()
}
