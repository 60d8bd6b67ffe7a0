//! Command handlers.
//!
//! Each handler is a thin wrapper: call the resolver, format the result for
//! the terminal. Resolution logic lives in `launchpath-resolver`.

pub mod bundled;
pub mod candidates;
pub mod instructions;
pub mod resolve;
