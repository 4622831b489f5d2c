//! codeb-guard-hook: PreToolUse JSON front end for the command gate.
//!
//! Reads the host's payload from stdin. A blocked Bash command gets a deny
//! response on stdout; anything else produces no output.

use std::process::ExitCode;

use codeb_guard::hook::{self, HookInput};
use codeb_guard::runtime::Runtime;

fn main() -> ExitCode {
    let input = match HookInput::from_stdin() {
        Ok(input) => input,
        Err(e) => {
            eprintln!("codeb-guard: {e}");
            return ExitCode::FAILURE;
        }
    };

    let Some(command) = input.bash_command() else {
        return ExitCode::SUCCESS;
    };

    let runtime = match Runtime::start() {
        Ok(runtime) => runtime,
        Err(e) => {
            log::error!("{e}");
            eprintln!("codeb-guard: {e}");
            return ExitCode::FAILURE;
        }
    };

    let decision = runtime.check(command);
    if decision.is_blocked() {
        println!(
            "{}",
            hook::deny_output(&decision, &runtime.settings.guidance)
        );
    }
    ExitCode::SUCCESS
}
