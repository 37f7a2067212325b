use std::time::Duration;

/// Rounding offset for nearest-rank percentile selection.
const PERCENTILE_ROUNDING: u64 = 50;

pub(super) fn latency_micros(latency: Duration) -> u64 {
    u64::try_from(latency.as_micros()).unwrap_or(u64::MAX)
}

pub(super) fn average_us(sample: &[u64]) -> u64 {
    if sample.is_empty() {
        return 0;
    }
    let sum = sample
        .iter()
        .fold(0u128, |acc, value| acc.saturating_add(u128::from(*value)));
    let count = u128::try_from(sample.len()).unwrap_or(1).max(1);
    u64::try_from(sum.checked_div(count).unwrap_or(0)).unwrap_or(u64::MAX)
}

/// Median over a sorted sample; an even-sized sample takes the midpoint of
/// the two middle values.
pub(super) fn median_us(sorted: &[u64]) -> u64 {
    let len = sorted.len();
    if len == 0 {
        return 0;
    }
    let mid = len / 2;
    let upper = sorted.get(mid).copied().unwrap_or(0);
    if len % 2 == 1 {
        return upper;
    }
    let lower = sorted.get(mid.saturating_sub(1)).copied().unwrap_or(0);
    u64::midpoint(lower, upper)
}

/// Nearest-rank percentile over a sorted sample.
pub(super) fn percentile_us(sorted: &[u64], pct: u64) -> u64 {
    if sorted.is_empty() {
        return 0;
    }
    let count = u64::try_from(sorted.len().saturating_sub(1)).unwrap_or(u64::MAX);
    let index = pct
        .saturating_mul(count)
        .saturating_add(PERCENTILE_ROUNDING)
        .checked_div(100)
        .unwrap_or(0);
    let idx = usize::try_from(index).unwrap_or_else(|_| sorted.len().saturating_sub(1));
    sorted.get(idx).copied().unwrap_or(0)
}

/// Scaled-integer ratio: hundredths of a percent of `part` in `whole`.
pub(super) fn rate_x100(part: u64, whole: u64) -> u64 {
    if whole == 0 {
        return 0;
    }
    let scaled = u128::from(part)
        .saturating_mul(10_000)
        .checked_div(u128::from(whole))
        .unwrap_or(0);
    u64::try_from(scaled).unwrap_or(u64::MAX)
}

/// Per-second rate scaled by 100, over a wall clock in milliseconds.
pub(super) fn per_second_x100(count: u64, duration_ms: u128) -> u64 {
    let scaled = u128::from(count)
        .saturating_mul(100_000)
        .checked_div(duration_ms.max(1))
        .unwrap_or(0);
    u64::try_from(scaled).unwrap_or(u64::MAX)
}
