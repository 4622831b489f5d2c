//! codeb-guard: a pre-execution hook that blocks destructive shell commands.
//!
//! The command text is searched, case-insensitively and anywhere in the
//! string, against an ordered denylist of regexes. The first pattern that
//! matches is reported in the [`gate::Decision`]; no match means the command
//! is allowed.
//!
//! # Architecture
//!
//! - **[`gate`]**: the compiled pattern table and the allow/block decision.
//! - **[`config`]**: embedded default table plus user overlay merge.
//! - **[`logging`]**: diagnostic log and the `decisions.log` trail.
//! - **[`hook`]**: PreToolUse JSON payloads on stdin.
//! - **[`runtime`]**: startup shared by both binaries.
//! - **[`error`]**: failures building the gate or reading input.

/// Configuration types, loading, and overlay merge logic.
pub mod config;
/// Error type shared across the crate.
pub mod error;
/// Pattern gate and decision type.
pub mod gate;
/// PreToolUse JSON input/output.
pub mod hook;
/// File-based logging, opt-in.
pub mod logging;
/// Config + logging + gate startup for the binaries.
pub mod runtime;

pub use error::GuardError;
pub use gate::{Decision, Gate};

/// Evaluate a command string against the built-in pattern table.
///
/// This is the main entry point for tests and simple usage.
/// The binaries build their [`Gate`] from the merged user config instead.
pub fn evaluate(command: &str) -> Result<Decision, GuardError> {
    Ok(Gate::builtin()?.evaluate(command))
}
