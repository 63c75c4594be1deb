use crate::{LogEntry, LogLevel, format_log_entry};

fn entry(level: LogLevel, ts: usize, msg: &str) -> LogEntry {
    LogEntry::from_args(level, 2, 7, ts, format_args!("{}", msg))
}

#[test]
fn timestamp_is_rendered_as_seconds_and_micros() {
    let line = format_log_entry(&entry(LogLevel::Info, 12_000_345, "mymem: Device opened"));
    assert!(line.contains("[   12.000345]"), "{}", line);
    assert!(line.contains("cpu2/7: mymem: Device opened"), "{}", line);
}

#[test]
fn line_is_wrapped_in_level_colour() {
    let level = LogLevel::Alert;
    let line = format_log_entry(&entry(level, 0, "boom"));
    assert!(line.starts_with(level.color_code()));
    assert!(line.ends_with(level.reset_color_code()));
    assert!(line.contains(level.as_str()));
    assert!(line.contains("[    0.000000]"));
}
