use chrono::{Local, TimeZone};

/// Compact local-time formatter with last-value memoization.
///
/// Produces the fixed-width `MMDD.HHMMSS` stamp used at the front of every
/// captured line. Bursts of messages logged within the same wall-clock
/// second share one conversion (and therefore one visibly identical stamp);
/// the formatter remembers the previous epoch/output pair and serves repeats
/// from that cache.
///
/// Not internally synchronized. Each request's interceptor owns its own
/// formatter behind the interceptor's lock, so the memoized state is
/// per-request and never shared across in-flight requests.
#[derive(Debug, Default)]
pub struct TimeFormatter {
    last: Option<(i64, String)>,
    conversions: u64,
}

impl TimeFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Format `epoch_secs` as zero-padded local time, `MMDD.HHMMSS`.
    ///
    /// Calling again with the identical epoch returns the cached string
    /// without recomputing.
    pub fn format(&mut self, epoch_secs: i64) -> String {
        if let Some((last_epoch, ref out)) = self.last {
            if last_epoch == epoch_secs {
                return out.clone();
            }
        }

        self.conversions += 1;
        let out = match Local.timestamp_opt(epoch_secs, 0).single() {
            Some(dt) => dt.format("%m%d.%H%M%S").to_string(),
            // Out-of-range epoch; fall back to the raw value rather than
            // losing the message.
            None => epoch_secs.to_string(),
        };
        self.last = Some((epoch_secs, out.clone()));
        out
    }

    /// Number of actual localtime conversions performed so far.
    ///
    /// Instrumentation hook: lets tests observe that repeated epochs are
    /// served from the cache.
    pub fn conversions(&self) -> u64 {
        self.conversions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_epoch_is_served_from_cache() {
        let mut fmt = TimeFormatter::new();
        let a = fmt.format(1_700_000_000);
        let b = fmt.format(1_700_000_000);
        assert_eq!(a, b);
        assert_eq!(fmt.conversions(), 1);
    }

    #[test]
    fn distinct_epochs_recompute() {
        let mut fmt = TimeFormatter::new();
        let a = fmt.format(1_700_000_000);
        let b = fmt.format(1_700_000_001);
        assert_ne!(a, b);
        assert_eq!(fmt.conversions(), 2);
    }

    #[test]
    fn stamp_is_fixed_width_with_period_separator() {
        let mut fmt = TimeFormatter::new();
        let out = fmt.format(1_700_000_000);
        assert_eq!(out.len(), 11);
        assert_eq!(out.as_bytes()[4], b'.');
        assert!(out[..4].chars().all(|c| c.is_ascii_digit()));
        assert!(out[5..].chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn cache_survives_an_interleaved_epoch() {
        let mut fmt = TimeFormatter::new();
        fmt.format(10);
        fmt.format(20);
        fmt.format(20);
        assert_eq!(fmt.conversions(), 2);
        // Going back to an older epoch is a miss; only the previous pair
        // is retained.
        fmt.format(10);
        assert_eq!(fmt.conversions(), 3);
    }
}
