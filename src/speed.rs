//! Score-driven tick interval.

use std::time::Duration;

use crate::config::BASE_TICK_INTERVAL_MS;

/// `(minimum score, interval in ms)`, highest threshold first.
const SPEED_TIERS: [(u32, u64); 5] = [
    (150, 200),
    (100, 250),
    (50, 300),
    (20, 350),
    (0, BASE_TICK_INTERVAL_MS),
];

/// Returns the tick interval for `score`. Tier lower bounds are inclusive.
#[must_use]
pub fn tick_interval_for_score(score: u32) -> Duration {
    let ms = SPEED_TIERS
        .iter()
        .find(|(threshold, _)| score >= *threshold)
        .map_or(BASE_TICK_INTERVAL_MS, |(_, ms)| *ms);
    Duration::from_millis(ms)
}

/// Returns the base tick interval used at score zero.
#[must_use]
pub fn base_tick_interval() -> Duration {
    Duration::from_millis(BASE_TICK_INTERVAL_MS)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use rstest::rstest;

    use super::{base_tick_interval, tick_interval_for_score};

    #[rstest]
    #[case(0, 400)]
    #[case(10, 400)]
    #[case(19, 400)]
    #[case(20, 350)]
    #[case(49, 350)]
    #[case(50, 300)]
    #[case(99, 300)]
    #[case(100, 250)]
    #[case(149, 250)]
    #[case(150, 200)]
    #[case(u32::MAX, 200)]
    fn tiers_match_table(#[case] score: u32, #[case] ms: u64) {
        assert_eq!(tick_interval_for_score(score), Duration::from_millis(ms));
    }

    #[test]
    fn interval_never_increases_with_score() {
        let mut previous = base_tick_interval();
        for score in (0..400).step_by(10) {
            let interval = tick_interval_for_score(score);
            assert!(interval <= previous, "interval rose at score {score}");
            previous = interval;
        }
    }
}
