//! Date-range filtering of the entry history
//!
//! The user picks a `[from, to]` range (either end may be left open). Unset
//! ends default to the last history window ending now. Before testing
//! membership the range is padded by one day on each side, so the effective
//! test is `from - 1 day <= date <= to + 1 day`, inclusive at both ends. The
//! pad absorbs the picker handing back midnight for a selected day as well
//! as timezone rounding.

use chrono::{DateTime, Duration, NaiveDate, Utc};

use crate::models::BudgetEntry;

/// Padding applied to both ends of a range before testing membership
pub fn range_padding() -> Duration {
    Duration::days(1)
}

/// A user-selected history range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DateRange {
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

impl DateRange {
    pub fn new(from: Option<DateTime<Utc>>, to: Option<DateTime<Utc>>) -> Self {
        Self { from, to }
    }

    /// Build a range from calendar days, each taken at midnight UTC
    pub fn from_days(from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        let midnight = |day: NaiveDate| day.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
        Self::new(from.and_then(midnight), to.and_then(midnight))
    }

    /// Fill in unset ends: `to` defaults to `now`, `from` to `now - window`
    ///
    /// An inverted range is swapped into order.
    pub fn resolve(&self, now: DateTime<Utc>, window: Duration) -> (DateTime<Utc>, DateTime<Utc>) {
        let from = self.from.unwrap_or(now - window);
        let to = self.to.unwrap_or(now);
        if from > to {
            (to, from)
        } else {
            (from, to)
        }
    }

    /// The padded interval entries are tested against
    pub fn interval(&self, now: DateTime<Utc>, window: Duration) -> Interval {
        let (from, to) = self.resolve(now, window);
        Interval {
            start: from - range_padding(),
            end: to + range_padding(),
        }
    }

    /// Move both ends by `days` (negative moves back in time)
    ///
    /// Open ends are resolved against `now` first so the whole window moves.
    pub fn shifted(&self, days: i64, now: DateTime<Utc>, window: Duration) -> Self {
        let (from, to) = self.resolve(now, window);
        let by = Duration::days(days);
        Self::new(Some(from + by), Some(to + by))
    }
}

/// A closed time interval
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interval {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl Interval {
    /// Inclusive containment
    pub fn contains(&self, date: DateTime<Utc>) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Entries inside the interval, in their stored (creation) order
pub fn filter_entries<'a>(
    entries: &'a [BudgetEntry],
    interval: Interval,
) -> impl DoubleEndedIterator<Item = &'a BudgetEntry> + 'a {
    entries.iter().filter(move |e| interval.contains(e.date))
}

/// Entries inside the interval, newest first
pub fn history(entries: &[BudgetEntry], interval: Interval) -> Vec<&BudgetEntry> {
    filter_entries(entries, interval).rev().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BudgetKey, Money};
    use chrono::TimeZone;

    fn t() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 15, 12, 0, 0).unwrap()
    }

    fn entry_at(date: DateTime<Utc>) -> BudgetEntry {
        BudgetEntry::new(
            BudgetKey::parse("dining").unwrap(),
            Money::from_cents(100),
            date,
        )
    }

    fn week() -> Duration {
        Duration::days(7)
    }

    #[test]
    fn test_padded_range_membership() {
        let t = t();
        let range = DateRange::new(Some(t - Duration::days(7)), Some(t));
        let interval = range.interval(t, week());

        assert!(!interval.contains(t - Duration::days(10)));
        assert!(!interval.contains(t - Duration::days(8) - Duration::milliseconds(1)));
        assert!(interval.contains(t - Duration::days(8)));
        assert!(interval.contains(t - Duration::days(5)));
        assert!(interval.contains(t - Duration::hours(1)));
        // Inside the upper pad
        assert!(interval.contains(t + Duration::hours(1)));
        assert!(interval.contains(t + Duration::days(1)));
        assert!(!interval.contains(t + Duration::days(1) + Duration::milliseconds(1)));
    }

    #[test]
    fn test_filter_keeps_store_order() {
        let t = t();
        let entries: Vec<BudgetEntry> = [
            t - Duration::days(10),
            t - Duration::days(8) - Duration::milliseconds(1),
            t - Duration::days(8),
            t - Duration::days(5),
            t - Duration::hours(1),
            t + Duration::hours(1),
        ]
        .into_iter()
        .map(entry_at)
        .collect();

        let range = DateRange::new(Some(t - Duration::days(7)), Some(t));
        let kept: Vec<&BudgetEntry> = filter_entries(&entries, range.interval(t, week())).collect();

        let expected: Vec<&BudgetEntry> = entries[2..].iter().collect();
        assert_eq!(kept, expected);
        assert_eq!(entries.len(), 6);
    }

    #[test]
    fn test_history_is_newest_first() {
        let t = t();
        let entries = vec![
            entry_at(t - Duration::days(2)),
            entry_at(t - Duration::days(1)),
            entry_at(t),
        ];

        let listed = history(&entries, DateRange::default().interval(t, week()));
        let dates: Vec<DateTime<Utc>> = listed.iter().map(|e| e.date).collect();
        assert_eq!(dates, vec![t, t - Duration::days(1), t - Duration::days(2)]);
    }

    #[test]
    fn test_unset_range_defaults_to_window() {
        let t = t();
        let (from, to) = DateRange::default().resolve(t, week());
        assert_eq!(from, t - week());
        assert_eq!(to, t);

        let interval = DateRange::default().interval(t, week());
        assert_eq!(interval.start, t - Duration::days(8));
        assert_eq!(interval.end, t + Duration::days(1));
    }

    #[test]
    fn test_half_open_range() {
        let t = t();
        let from = t - Duration::days(30);
        let interval = DateRange::new(Some(from), None).interval(t, week());
        assert_eq!(interval.start, from - Duration::days(1));
        assert_eq!(interval.end, t + Duration::days(1));
    }

    #[test]
    fn test_inverted_range_is_swapped() {
        let t = t();
        let range = DateRange::new(Some(t), Some(t - Duration::days(3)));
        assert_eq!(range.resolve(t, week()), (t - Duration::days(3), t));
    }

    #[test]
    fn test_from_days_uses_midnight() {
        let day = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        let range = DateRange::from_days(Some(day), Some(day));
        let midnight = Utc.with_ymd_and_hms(2024, 3, 15, 0, 0, 0).unwrap();
        assert_eq!(range.from, Some(midnight));
        assert_eq!(range.to, Some(midnight));

        // An entry late on the selected day is still inside thanks to the pad
        let interval = range.interval(t(), week());
        assert!(interval.contains(t() + Duration::hours(11)));
    }

    #[test]
    fn test_shifted_moves_whole_window() {
        let t = t();
        let back = DateRange::default().shifted(-7, t, week());
        assert_eq!(back.from, Some(t - Duration::days(14)));
        assert_eq!(back.to, Some(t - Duration::days(7)));
    }

    #[test]
    fn test_orphaned_entries_filter_fine() {
        let t = t();
        let mut orphan = entry_at(t);
        orphan.category = BudgetKey::parse("deleted-budget").unwrap();
        let entries = vec![orphan];

        assert_eq!(history(&entries, DateRange::default().interval(t, week())).len(), 1);
    }
}
