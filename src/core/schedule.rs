//! Ebbinghaus-curve review scheduling.
//!
//! The forgetting-curve model is a fixed sequence of wait times, in hours,
//! indexed by the number of reviews already completed: after learning a card
//! you review it 1 day later, then 2 days, 7 days, 14 days, and 30 days
//! after each successive review. Once every interval has been consumed the
//! card is considered fully learned.
//!
//! All functions here are pure given their inputs; `now` is passed
//! explicitly so tests stay deterministic.

use chrono::{DateTime, Duration, Utc};

use crate::core::record::{is_due, CardLearningRecord, ReviewStatus};
use crate::error::{ReviseError, Result};

/// Default review intervals in hours: 1, 2, 7, 14, and 30 days.
pub const EBBINGHAUS_INTERVALS: [i64; 5] = [24, 48, 168, 336, 720];

/// Sentinel offset for records with no further scheduled review.
const FAR_FUTURE_DAYS: i64 = 365;

/// An ordered, runtime-immutable table of review intervals.
///
/// The table length defines how many reviews a card goes through before it
/// reaches [`ReviewStatus::Completed`]. The default is the Ebbinghaus table;
/// a custom table can be supplied through config, validated here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewSchedule {
    intervals_hours: Vec<i64>,
}

impl Default for ReviewSchedule {
    fn default() -> Self {
        Self {
            intervals_hours: EBBINGHAUS_INTERVALS.to_vec(),
        }
    }
}

impl ReviewSchedule {
    /// Create a schedule from a custom interval table.
    ///
    /// The table must be non-empty and every interval must be a positive
    /// number of hours.
    pub fn new(intervals_hours: Vec<i64>) -> Result<Self> {
        if intervals_hours.is_empty() {
            return Err(ReviseError::config("interval table must not be empty"));
        }
        if let Some(bad) = intervals_hours.iter().find(|h| **h <= 0) {
            return Err(ReviseError::config(format!(
                "interval table entries must be positive hours, got {}",
                bad
            )));
        }
        Ok(Self { intervals_hours })
    }

    /// Number of scheduled reviews before a card is completed.
    pub fn total_reviews(&self) -> u32 {
        self.intervals_hours.len() as u32
    }

    /// The interval table in hours.
    pub fn intervals_hours(&self) -> &[i64] {
        &self.intervals_hours
    }

    /// Compute when the next review becomes due.
    ///
    /// `review_count` is the number of reviews already completed. Past the
    /// end of the table there is nothing left to schedule, so a far-future
    /// sentinel (`now` + 1 year) is returned. Defined for any count.
    pub fn next_review_time(&self, review_count: u32, now: DateTime<Utc>) -> DateTime<Utc> {
        match self.intervals_hours.get(review_count as usize) {
            Some(hours) => now + Duration::hours(*hours),
            None => now + Duration::days(FAR_FUTURE_DAYS),
        }
    }

    /// Derive the status of a record at a point in time.
    ///
    /// This is the authoritative classification; the `status` field stored
    /// on the record is only a cache of the value at its last mutation.
    pub fn classify(&self, record: &CardLearningRecord, now: DateTime<Utc>) -> ReviewStatus {
        if record.review_count >= self.total_reviews() {
            ReviewStatus::Completed
        } else if is_due(record, now) {
            ReviewStatus::Due
        } else {
            ReviewStatus::Pending
        }
    }

    /// Review progress as an integer percentage, saturating at 100.
    pub fn progress_percent(&self, record: &CardLearningRecord) -> u8 {
        let total = u64::from(self.total_reviews());
        let count = u64::from(record.review_count);
        if count >= total {
            return 100;
        }
        // round-half-up on 100 * count / total
        ((200 * count + total) / (2 * total)) as u8
    }

    /// Human-readable description of when the next review is due.
    ///
    /// Completed records get a fixed label; overdue records get "now"; the
    /// rest are bucketed into minutes, hours, or days, rounded half-up on
    /// the millisecond quotient (so 90 minutes reads "2 hours from now").
    pub fn next_review_label(&self, record: &CardLearningRecord, now: DateTime<Utc>) -> String {
        if self.classify(record, now) == ReviewStatus::Completed {
            return "all reviews completed".to_string();
        }

        let diff_ms = (record.next_review_due - now).num_milliseconds();
        if diff_ms <= 0 {
            return "now".to_string();
        }

        let mins = round_half_up(diff_ms, 60 * 1000);
        let hours = round_half_up(diff_ms, 60 * 60 * 1000);
        let days = round_half_up(diff_ms, 24 * 60 * 60 * 1000);

        if mins < 60 {
            format_from_now(mins, "minute")
        } else if hours < 24 {
            format_from_now(hours, "hour")
        } else {
            format_from_now(days, "day")
        }
    }
}

/// Round-half-up integer division for positive values.
fn round_half_up(value_ms: i64, unit_ms: i64) -> i64 {
    (2 * value_ms + unit_ms) / (2 * unit_ms)
}

fn format_from_now(n: i64, unit: &str) -> String {
    if n == 1 {
        format!("1 {} from now", unit)
    } else {
        format!("{} {}s from now", n, unit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::record::CardId;
    use chrono::TimeZone;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap()
    }

    fn record(review_count: u32, due: DateTime<Utc>) -> CardLearningRecord {
        CardLearningRecord {
            card_id: CardId::from(1),
            deck_id: "d1".to_string(),
            deck_title: "Deck".to_string(),
            first_learned_at: t0(),
            last_reviewed_at: t0(),
            review_count,
            next_review_due: due,
            status: ReviewStatus::Pending,
        }
    }

    #[test]
    fn test_default_table() {
        let schedule = ReviewSchedule::default();
        assert_eq!(schedule.total_reviews(), 5);
        assert_eq!(schedule.intervals_hours(), &[24, 48, 168, 336, 720]);
    }

    #[test]
    fn test_new_rejects_empty_table() {
        assert!(ReviewSchedule::new(vec![]).is_err());
    }

    #[test]
    fn test_new_rejects_non_positive_intervals() {
        assert!(ReviewSchedule::new(vec![24, 0]).is_err());
        assert!(ReviewSchedule::new(vec![24, -48]).is_err());
        assert!(ReviewSchedule::new(vec![24, 48]).is_ok());
    }

    #[test]
    fn test_next_review_time_exact_intervals() {
        let schedule = ReviewSchedule::default();
        let now = t0();

        for (count, hours) in EBBINGHAUS_INTERVALS.iter().enumerate() {
            assert_eq!(
                schedule.next_review_time(count as u32, now),
                now + Duration::hours(*hours)
            );
        }
    }

    #[test]
    fn test_next_review_time_far_future_past_table() {
        let schedule = ReviewSchedule::default();
        let now = t0();

        for count in [5, 6, 100, u32::MAX] {
            let due = schedule.next_review_time(count, now);
            assert!(due > now + Duration::days(300));
        }
    }

    #[test]
    fn test_classify_completed_regardless_of_now() {
        let schedule = ReviewSchedule::default();
        let rec = record(5, t0() - Duration::days(10));

        assert_eq!(schedule.classify(&rec, t0()), ReviewStatus::Completed);
        assert_eq!(
            schedule.classify(&rec, t0() + Duration::days(1000)),
            ReviewStatus::Completed
        );
        assert_eq!(
            schedule.classify(&rec, t0() - Duration::days(1000)),
            ReviewStatus::Completed
        );
    }

    #[test]
    fn test_classify_due_vs_pending() {
        let schedule = ReviewSchedule::default();
        let due_at = t0() + Duration::hours(24);
        let rec = record(0, due_at);

        assert_eq!(schedule.classify(&rec, t0()), ReviewStatus::Pending);
        assert_eq!(schedule.classify(&rec, due_at), ReviewStatus::Due);
        assert_eq!(
            schedule.classify(&rec, due_at + Duration::hours(1)),
            ReviewStatus::Due
        );
    }

    #[test]
    fn test_classify_idempotent() {
        let schedule = ReviewSchedule::default();
        let rec = record(2, t0() + Duration::hours(1));
        let now = t0();

        assert_eq!(schedule.classify(&rec, now), schedule.classify(&rec, now));
    }

    #[test]
    fn test_progress_percent_values() {
        let schedule = ReviewSchedule::default();

        let expected = [(0, 0), (1, 20), (2, 40), (3, 60), (4, 80), (5, 100), (6, 100)];
        for (count, pct) in expected {
            let rec = record(count, t0());
            assert_eq!(schedule.progress_percent(&rec), pct, "count {}", count);
        }
    }

    #[test]
    fn test_progress_percent_rounds_half_up() {
        // 1/3 = 33.3 -> 33, 2/3 = 66.7 -> 67
        let schedule = ReviewSchedule::new(vec![24, 48, 168]).unwrap();
        assert_eq!(schedule.progress_percent(&record(1, t0())), 33);
        assert_eq!(schedule.progress_percent(&record(2, t0())), 67);
    }

    #[test]
    fn test_label_completed() {
        let schedule = ReviewSchedule::default();
        let rec = record(5, t0());
        assert_eq!(
            schedule.next_review_label(&rec, t0()),
            "all reviews completed"
        );
    }

    #[test]
    fn test_label_overdue_is_now() {
        let schedule = ReviewSchedule::default();
        let rec = record(1, t0());

        assert_eq!(schedule.next_review_label(&rec, t0()), "now");
        assert_eq!(
            schedule.next_review_label(&rec, t0() + Duration::hours(5)),
            "now"
        );
    }

    #[test]
    fn test_label_minutes() {
        let schedule = ReviewSchedule::default();
        let rec = record(1, t0() + Duration::minutes(45));
        assert_eq!(
            schedule.next_review_label(&rec, t0()),
            "45 minutes from now"
        );

        let rec = record(1, t0() + Duration::minutes(1));
        assert_eq!(schedule.next_review_label(&rec, t0()), "1 minute from now");
    }

    #[test]
    fn test_label_90_minutes_rounds_to_2_hours() {
        // round-half-up: 90 min = 1.5 h -> 2 hours
        let schedule = ReviewSchedule::default();
        let rec = record(1, t0() + Duration::minutes(90));
        assert_eq!(schedule.next_review_label(&rec, t0()), "2 hours from now");
    }

    #[test]
    fn test_label_hour_bucket_lower_edge() {
        // 59.6 minutes rounds to 60, which pushes into the hour bucket
        let schedule = ReviewSchedule::default();
        let rec = record(1, t0() + Duration::seconds(3576));
        assert_eq!(schedule.next_review_label(&rec, t0()), "1 hour from now");
    }

    #[test]
    fn test_label_days() {
        let schedule = ReviewSchedule::default();
        let rec = record(1, t0() + Duration::days(7));
        assert_eq!(schedule.next_review_label(&rec, t0()), "7 days from now");

        // 36 hours = 1.5 days -> 2 days
        let rec = record(1, t0() + Duration::hours(36));
        assert_eq!(schedule.next_review_label(&rec, t0()), "2 days from now");
    }

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_half_up(90, 60), 2);
        assert_eq!(round_half_up(89, 60), 1);
        assert_eq!(round_half_up(30, 60), 1);
        assert_eq!(round_half_up(29, 60), 0);
    }

    // =========================================================================
    // Property-based tests
    // =========================================================================

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            // Property: in-range counts follow the table exactly
            #[test]
            fn prop_next_review_time_matches_table(count in 0u32..5) {
                let schedule = ReviewSchedule::default();
                let now = t0();
                let expected =
                    now + Duration::hours(EBBINGHAUS_INTERVALS[count as usize]);
                prop_assert_eq!(schedule.next_review_time(count, now), expected);
            }

            // Property: out-of-range counts land strictly past now + 300 days
            #[test]
            fn prop_next_review_time_sentinel(count in 5u32..) {
                let schedule = ReviewSchedule::default();
                let now = t0();
                prop_assert!(
                    schedule.next_review_time(count, now) > now + Duration::days(300)
                );
            }

            // Property: progress is monotone in review_count and capped at 100
            #[test]
            fn prop_progress_monotone(a in 0u32..10, b in 0u32..10) {
                let schedule = ReviewSchedule::default();
                let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
                let p_lo = schedule.progress_percent(&record(lo, t0()));
                let p_hi = schedule.progress_percent(&record(hi, t0()));
                prop_assert!(p_lo <= p_hi);
                prop_assert!(p_hi <= 100);
            }

            // Property: classification is a pure function of (record, now)
            #[test]
            fn prop_classify_pure(count in 0u32..8, offset_mins in -100_000i64..100_000) {
                let schedule = ReviewSchedule::default();
                let rec = record(count, t0() + Duration::minutes(offset_mins));
                let now = t0();
                prop_assert_eq!(
                    schedule.classify(&rec, now),
                    schedule.classify(&rec, now)
                );
            }
        }
    }
}
