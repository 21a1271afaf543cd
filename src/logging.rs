use log::LevelFilter;
use simplelog::{ConfigBuilder, WriteLogger};

use crate::eval::{Decision, Verdict};

/// Environment variable that turns on DEBUG diagnostics.
pub const DEBUG_ENV_VAR: &str = "DEBUG";

/// Route `log` records to stderr as `<timestamp> [LEVEL] message` lines.
/// Stdout is reserved for the decision payload.
///
/// DEBUG records pass only when `$DEBUG` is set; [`enable_debug`] can open
/// them later (after config is loaded). Best-effort: a logger that is already
/// installed is left alone.
pub fn init() {
    let config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Off)
        .set_thread_level(LevelFilter::Off)
        .set_location_level(LevelFilter::Off)
        .build();
    if WriteLogger::init(LevelFilter::Debug, config, std::io::stderr()).is_err() {
        return;
    }
    if std::env::var_os(DEBUG_ENV_VAR).is_some() {
        log::set_max_level(LevelFilter::Debug);
    } else {
        log::set_max_level(LevelFilter::Info);
    }
}

/// Open DEBUG records regardless of `$DEBUG`.
pub fn enable_debug() {
    log::set_max_level(LevelFilter::Debug);
}

/// Record a guard decision. The level follows the verdict.
pub fn log_decision(tool: &str, result: &Decision) {
    // Compact single-line message for the log
    let message = result
        .message
        .as_deref()
        .map(|m| m.replace('\n', "; "))
        .unwrap_or_default();
    let rewritten = if result.modified_params.is_some() {
        " (params rewritten)"
    } else {
        ""
    };
    match result.verdict {
        Verdict::Allow if message.is_empty() => {
            log::debug!("{tool}: {}{rewritten}", result.verdict.label())
        }
        Verdict::Allow => log::info!("{tool}: {} {message}{rewritten}", result.verdict.label()),
        Verdict::Deny | Verdict::Block => {
            log::warn!("{tool}: {} {message}", result.verdict.label())
        }
    }
}

/// First `max` characters of `text` on one line, with an ellipsis when cut.
pub fn preview(text: &str, max: usize) -> String {
    let flat = text.replace('\n', " ");
    if flat.chars().count() <= max {
        return flat;
    }
    let mut cut: String = flat.chars().take(max).collect();
    cut.push_str("...");
    cut
}

/// Simple UTC timestamp without external deps.
pub fn timestamp_now() -> String {
    let dur = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default();
    format_timestamp(dur.as_secs())
}

fn format_timestamp(secs: u64) -> String {
    let days = secs / 86400;
    let rem = secs % 86400;
    let h = rem / 3600;
    let m = (rem % 3600) / 60;
    let s = rem % 60;
    let (year, month, day) = epoch_days_to_date(days);
    format!("{year:04}-{month:02}-{day:02}T{h:02}:{m:02}:{s:02}Z")
}

/// Convert days since Unix epoch to (year, month, day).
fn epoch_days_to_date(days: u64) -> (u64, u64, u64) {
    // Civil calendar from days algorithm (Howard Hinnant)
    let z = days + 719468;
    let era = z / 146097;
    let doe = z - era * 146097;
    let yoe = (doe - doe / 1460 + doe / 36524 - doe / 146096) / 365;
    let y = yoe + era * 400;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let d = doy - (153 * mp + 2) / 5 + 1;
    let m = if mp < 10 { mp + 3 } else { mp - 9 };
    let y = if m <= 2 { y + 1 } else { y };
    (y, m, d)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn epoch_is_1970() {
        assert_eq!(format_timestamp(0), "1970-01-01T00:00:00Z");
    }

    #[test]
    fn leap_day() {
        // 2024-02-29T12:34:56Z
        assert_eq!(format_timestamp(1_709_210_096), "2024-02-29T12:34:56Z");
    }

    #[test]
    fn preview_truncates_on_char_boundary() {
        assert_eq!(preview("short", 50), "short");
        assert_eq!(preview("提交提交提交", 2), "提交...");
        assert_eq!(preview("a\nb", 10), "a b");
    }
}
