const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];
const K: u64 = 1024;

/// Formats a byte count as `"<value> <unit>"` with at most two decimals.
///
/// The unit is the largest power of 1024 not exceeding `bytes`, capped at GB.
/// The quotient is rounded half-up to two decimals and trailing zeros are
/// dropped, so 2048 is `"2 KB"` and 1152 is `"1.13 KB"`.
pub fn format_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let index = (bytes.ilog(K) as usize).min(UNITS.len() - 1);
    let divisor = K.pow(index as u32) as u128;

    // Hundredths of a unit, rounded half-up on the exact quotient.
    let hundredths = (bytes as u128 * 200 + divisor) / (divisor * 2);
    let whole = hundredths / 100;
    let frac = hundredths % 100;

    let value = if frac == 0 {
        whole.to_string()
    } else if frac % 10 == 0 {
        format!("{}.{}", whole, frac / 10)
    } else {
        format!("{}.{:02}", whole, frac)
    };

    format!("{} {}", value, UNITS[index])
}
