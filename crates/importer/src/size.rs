const UNITS: [&str; 7] = ["Bytes", "KB", "MB", "GB", "TB", "PB", "EB"];
const STEP: u64 = 1024;

/// Formats a byte count with binary units, e.g. `1536` → `"1.5 KB"`.
///
/// The unit is `floor(log_1024(bytes))`, the value is rounded to two decimal
/// places and trailing zeros are dropped.
pub fn format_byte_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut unit = 0;
    let mut divisor = 1u64;
    while unit + 1 < UNITS.len() && bytes / divisor >= STEP {
        divisor *= STEP;
        unit += 1;
    }

    let value = (bytes as f64 / divisor as f64 * 100.0).round() / 100.0;
    format!("{} {}", trim_decimals(value), UNITS[unit])
}

fn trim_decimals(value: f64) -> String {
    let formatted = format!("{value:.2}");
    formatted
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}
