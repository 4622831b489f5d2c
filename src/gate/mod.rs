pub mod decision;

pub use decision::Decision;

use regex::RegexSetBuilder;

use crate::config::Config;
use crate::error::GuardError;

/// The command gate: an ordered, case-insensitive denylist of regexes.
///
/// Patterns search anywhere in the command text. When several match, the one
/// declared first is reported.
pub struct Gate {
    set: regex::RegexSet,
    patterns: Vec<String>,
}

impl Gate {
    /// Compile a gate from an ordered pattern table.
    ///
    /// Patterns are validated one at a time so the error names the bad entry.
    pub fn from_patterns(patterns: &[String]) -> Result<Self, GuardError> {
        let compiled: Vec<String> = patterns.iter().map(|p| widen_whitespace(p)).collect();
        for (pattern, widened) in patterns.iter().zip(&compiled) {
            if let Err(source) = regex::RegexBuilder::new(widened)
                .case_insensitive(true)
                .build()
            {
                return Err(GuardError::InvalidPattern {
                    pattern: pattern.clone(),
                    source,
                });
            }
        }

        let set = RegexSetBuilder::new(&compiled)
            .case_insensitive(true)
            .build()
            .map_err(|source| GuardError::InvalidPattern {
                pattern: patterns.join(" | "),
                source,
            })?;

        Ok(Self {
            set,
            patterns: patterns.to_vec(),
        })
    }

    /// Build the gate from a merged configuration.
    pub fn from_config(config: &Config) -> Result<Self, GuardError> {
        Self::from_patterns(&config.patterns.blocked)
    }

    /// Build the gate from the embedded default table only.
    pub fn builtin() -> Result<Self, GuardError> {
        Self::from_config(&Config::default_config()?)
    }

    /// The pattern table in declared order.
    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    /// Classify a command string.
    pub fn evaluate(&self, command: &str) -> Decision {
        // SetMatches iterates in ascending index order.
        match self.set.matches(command).iter().next() {
            Some(idx) => Decision::block(&self.patterns[idx]),
            None => Decision::allow(),
        }
    }
}

/// Widen `\s` and `\S` to also treat the ASCII separators U+001C..=U+001F as
/// whitespace, the way Python's `re` does for str patterns. The source text is
/// still what gets reported.
fn widen_whitespace(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len() + 16);
    let mut chars = pattern.chars().peekable();
    let mut class_depth = 0usize;
    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some('s') if class_depth == 0 => out.push_str(r"[\s\x1C-\x1F]"),
                Some('s') => out.push_str(r"\s\x1C-\x1F"),
                Some('S') if class_depth == 0 => out.push_str(r"[^\s\x1C-\x1F]"),
                Some(next) => {
                    out.push('\\');
                    out.push(next);
                }
                None => out.push('\\'),
            },
            '[' => {
                class_depth += 1;
                out.push('[');
                // Leading `^` and `]` belong to the class
                if chars.peek() == Some(&'^') {
                    out.push('^');
                    chars.next();
                }
                if chars.peek() == Some(&']') {
                    out.push(']');
                    chars.next();
                }
            }
            ']' if class_depth > 0 => {
                class_depth -= 1;
                out.push(']');
            }
            _ => out.push(c),
        }
    }
    out
}
