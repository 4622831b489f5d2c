//! Process startup shared by the `codeb-guard` and `codeb-guard-hook` binaries.

use crate::config::{Config, Settings};
use crate::error::GuardError;
use crate::gate::{Decision, Gate};
use crate::logging;

/// Merged settings plus the compiled gate for one hook invocation.
pub struct Runtime {
    pub settings: Settings,
    pub gate: Gate,
}

impl Runtime {
    /// Load config, start logging, and compile the gate.
    ///
    /// A broken overlay or an overlay pattern that won't compile is reported
    /// on stderr and the built-in table is used. Only a failure of the
    /// built-in table itself is returned as an error.
    pub fn start() -> Result<Self, GuardError> {
        let (config, overlay_err) = Config::load()?;
        logging::init(&config.settings);
        if let Some(e) = overlay_err {
            log::warn!("ignoring user config: {e}");
            eprintln!("codeb-guard: ignoring user config: {e}");
        }

        let gate = match Gate::from_config(&config) {
            Ok(gate) => gate,
            Err(e) => {
                log::warn!("falling back to built-in patterns: {e}");
                eprintln!("codeb-guard: {e}; using built-in patterns");
                Gate::builtin()?
            }
        };

        Ok(Self {
            settings: config.settings,
            gate,
        })
    }

    /// Evaluate a command and record it in the decision log when enabled.
    pub fn check(&self, command: &str) -> Decision {
        let decision = self.gate.evaluate(command);
        log::debug!("{} -> {}", command, decision.as_str());
        if self.settings.log_decisions {
            logging::log_decision(command, &decision);
        }
        decision
    }
}
