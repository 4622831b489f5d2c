//! codeb-guard: pre-execution hook for shell commands.
//!
//! The candidate command's tokens are passed as arguments. Allowed commands
//! exit 0 silently; blocked commands print two lines to stderr and exit 1.
//! Hosts that send PreToolUse JSON on stdin use `codeb-guard-hook` instead.

use std::process::ExitCode;

use codeb_guard::hook;
use codeb_guard::runtime::Runtime;

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args_os()
        .skip(1)
        .map(|a| a.to_string_lossy().into_owned())
        .collect();

    // Nothing to check
    if args.is_empty() {
        return ExitCode::SUCCESS;
    }

    let runtime = match Runtime::start() {
        Ok(runtime) => runtime,
        Err(e) => {
            log::error!("{e}");
            eprintln!("codeb-guard: {e}");
            return ExitCode::FAILURE;
        }
    };

    let decision = runtime.check(&args.join(" "));
    if decision.allowed {
        return ExitCode::SUCCESS;
    }
    eprintln!(
        "{}",
        hook::block_message(&decision, &runtime.settings.guidance)
    );
    ExitCode::FAILURE
}
