/// Outcome of evaluating one command string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decision {
    pub allowed: bool,
    /// Human-readable reason, present only when blocked.
    pub reason: Option<String>,
    /// Source text of the pattern that fired.
    pub pattern: Option<String>,
}

impl Decision {
    pub fn allow() -> Self {
        Self {
            allowed: true,
            reason: None,
            pattern: None,
        }
    }

    pub fn block(pattern: &str) -> Self {
        Self {
            allowed: false,
            reason: Some(format!("Blocked: matches pattern '{pattern}'")),
            pattern: Some(pattern.to_string()),
        }
    }

    pub fn is_blocked(&self) -> bool {
        !self.allowed
    }

    pub fn as_str(&self) -> &'static str {
        if self.allowed { "allow" } else { "block" }
    }
}
