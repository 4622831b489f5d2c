use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, SecondsFormat, Utc};
use log::LevelFilter;
use simplelog::WriteLogger;

use crate::config::Settings;
use crate::gate::Decision;

/// Directory holding guard.log and decisions.log.
pub fn data_dir() -> Option<PathBuf> {
    let home = std::env::var_os("HOME")?;
    Some(Path::new(&home).join(".local/share/codeb-guard"))
}

/// Install the diagnostic file logger at the configured level.
/// Best-effort: the hook runs without a logger if anything here fails.
pub fn init(settings: &Settings) {
    let level = parse_level(&settings.log_level);
    if level == LevelFilter::Off {
        return;
    }
    let Some(dir) = data_dir() else {
        return;
    };
    if std::fs::create_dir_all(&dir).is_err() {
        return;
    }
    let Ok(file) = OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join("guard.log"))
    else {
        return;
    };
    let _ = WriteLogger::init(level, simplelog::Config::default(), file);
}

/// Unknown level names fall back to `warn`.
fn parse_level(name: &str) -> LevelFilter {
    name.trim().parse().unwrap_or(LevelFilter::Warn)
}

/// Append a decision record to ~/.local/share/codeb-guard/decisions.log.
/// Best-effort: failures are silently ignored (logging must never block the hook).
pub fn log_decision(command: &str, decision: &Decision) {
    let Some(dir) = data_dir() else {
        return;
    };
    let _ = std::fs::create_dir_all(&dir);
    append_decision(&dir.join("decisions.log"), command, decision);
}

fn append_decision(path: &Path, command: &str, decision: &Decision) {
    let Ok(mut file) = OpenOptions::new().create(true).append(true).open(path) else {
        return;
    };
    let _ = writeln!(file, "{}", format_record(&timestamp_now(), command, decision));
}

fn format_record(ts: &str, command: &str, decision: &Decision) -> String {
    // Keep one record per line
    let cmd: String = command
        .chars()
        .take(200)
        .map(|c| if c == '\n' || c == '\t' { ' ' } else { c })
        .collect();
    let reason = decision.reason.as_deref().unwrap_or("-");
    format!("{ts}\t{}\t{cmd}\t{reason}", decision.as_str())
}

fn timestamp_now() -> String {
    format_timestamp(Utc::now())
}

fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Secs, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(secs: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(secs, 0).unwrap()
    }

    #[test]
    fn epoch_is_1970() {
        assert_eq!(format_timestamp(at(0)), "1970-01-01T00:00:00Z");
    }

    #[test]
    fn leap_day() {
        assert_eq!(format_timestamp(at(1_709_210_096)), "2024-02-29T12:34:56Z");
    }

    #[test]
    fn level_names() {
        assert_eq!(parse_level("debug"), LevelFilter::Debug);
        assert_eq!(parse_level("OFF"), LevelFilter::Off);
        assert_eq!(parse_level("loud"), LevelFilter::Warn);
    }

    #[test]
    fn blocked_record_columns() {
        let d = Decision::block(r"DROP\s+TABLE");
        let line = format_record("T", "psql -c 'DROP TABLE x'", &d);
        assert_eq!(
            line,
            "T\tblock\tpsql -c 'DROP TABLE x'\tBlocked: matches pattern 'DROP\\s+TABLE'"
        );
    }

    #[test]
    fn allowed_record_has_placeholder_reason() {
        let line = format_record("T", "ls", &Decision::allow());
        assert_eq!(line, "T\tallow\tls\t-");
    }

    #[test]
    fn long_command_truncated_and_flattened() {
        let cmd = format!("echo\t{}\n", "a".repeat(300));
        let line = format_record("T", &cmd, &Decision::allow());
        let col = line.split('\t').nth(2).unwrap();
        assert_eq!(col.chars().count(), 200);
        assert!(col.starts_with("echo a"));
    }

    #[test]
    fn append_writes_lines() {
        let dir = std::env::temp_dir().join(format!("codeb-guard-log-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("decisions.log");
        append_decision(&path, "ls", &Decision::allow());
        append_decision(&path, "docker rm -f x", &Decision::block(r"docker\s+rm\s+-f"));
        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[1].contains("\tblock\tdocker rm -f x\t"));
        let _ = std::fs::remove_dir_all(&dir);
    }
}
