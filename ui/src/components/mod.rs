pub mod about;
pub mod account_panel;
pub mod app;
pub mod config;
#[cfg(target_family = "wasm")]
pub mod injected_provider;
pub mod prompts;
pub mod session_api;
pub mod session_state;
