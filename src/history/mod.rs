//! Synthetic history for stations whose real history is unavailable.
//!
//! - [`hourly`]: 25-point hourly walk ending at an anchor time
//! - [`daily`]: seeded per-day averages over a date range

pub mod daily;
pub mod hourly;

pub use daily::DailyPoint;
pub use hourly::HourlyPoint;

/// Sum of the byte values of an ASCII label such as `"2024-01-31"`.
pub(crate) fn label_char_sum(label: &str) -> u32 {
    label.bytes().map(u32::from).sum()
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;

    #[test]
    fn test_label_char_sum() {
        // ---
        assert_eq!(label_char_sum(""), 0);
        assert_eq!(label_char_sum("A"), 65);
        assert_eq!(label_char_sum("2024-01-01"), 484);
    }
}
