//! PreToolUse JSON mode: read the host's payload from stdin, answer on stdout.

use std::io::Read;

use serde::Deserialize;

use crate::error::GuardError;
use crate::gate::Decision;

/// Header prefixed to every block message.
pub const BLOCK_HEADER: &str = "Command blocked by CodeB hook";

#[derive(Debug, Deserialize)]
pub struct HookInput {
    pub tool_name: Option<String>,
    pub tool_input: Option<ToolInput>,
}

#[derive(Debug, Deserialize)]
pub struct ToolInput {
    pub command: Option<String>,
}

impl HookInput {
    pub fn from_json(input: &str) -> Result<Self, GuardError> {
        Ok(serde_json::from_str(input)?)
    }

    /// Read and parse the payload from stdin.
    pub fn from_stdin() -> Result<Self, GuardError> {
        let mut input = String::new();
        std::io::stdin()
            .read_to_string(&mut input)
            .map_err(GuardError::Stdin)?;
        Self::from_json(&input)
    }

    /// The Bash command to check, if this payload carries one.
    pub fn bash_command(&self) -> Option<&str> {
        if self.tool_name.as_deref() != Some("Bash") {
            return None;
        }
        self.tool_input
            .as_ref()
            .and_then(|t| t.command.as_deref())
            .filter(|c| !c.is_empty())
    }
}

/// The two-line message shown to the caller when a command is blocked.
pub fn block_message(decision: &Decision, guidance: &str) -> String {
    let reason = decision.reason.as_deref().unwrap_or_default();
    format!("{BLOCK_HEADER}: {reason}\n{guidance}")
}

/// PreToolUse response that denies the tool call.
pub fn deny_output(decision: &Decision, guidance: &str) -> serde_json::Value {
    serde_json::json!({
        "hookSpecificOutput": {
            "hookEventName": "PreToolUse",
            "permissionDecision": "deny",
            "permissionDecisionReason": block_message(decision, guidance),
        }
    })
}
