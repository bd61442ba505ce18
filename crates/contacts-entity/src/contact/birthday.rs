//! Upcoming-birthday window.

use chrono::{Datelike, Duration, NaiveDate};

/// Days ahead covered by the birthdays endpoint.
pub const DEFAULT_WINDOW_DAYS: u32 = 7;

/// Half-open calendar interval `[start, start + days)` compared on month
/// and day only.
///
/// Birthdays are keyed as `(month, day)`, so Feb 29 sorts between Feb 28
/// and Mar 1 and is picked up in non-leap years by any window spanning
/// that gap. Windows that cross Dec 31 wrap to January.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BirthdayWindow {
    start: NaiveDate,
    days: u32,
}

impl BirthdayWindow {
    pub fn new(start: NaiveDate, days: u32) -> Self {
        Self { start, days }
    }

    /// The default seven-day window starting at `today`.
    pub fn upcoming(today: NaiveDate) -> Self {
        Self::new(today, DEFAULT_WINDOW_DAYS)
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// First date no longer in the window.
    pub fn end(&self) -> NaiveDate {
        self.start + Duration::days(i64::from(self.days))
    }

    /// The window covers every day of the year.
    pub fn is_full_year(&self) -> bool {
        self.days >= 366
    }

    /// The window crosses the year boundary.
    pub fn wraps(&self) -> bool {
        !self.is_full_year() && self.days > 0 && self.end().year() != self.start.year()
    }

    /// `MM-DD` of the first day, for SQL comparisons against `to_char(birthday, 'MM-DD')`.
    pub fn start_key(&self) -> String {
        self.start.format("%m-%d").to_string()
    }

    /// `MM-DD` of the exclusive end.
    pub fn end_key(&self) -> String {
        self.end().format("%m-%d").to_string()
    }

    /// Whether a birthday falls in the window, ignoring its year.
    pub fn contains(&self, birthday: NaiveDate) -> bool {
        if self.days == 0 {
            return false;
        }
        if self.is_full_year() {
            return true;
        }
        let key = month_day(birthday);
        let start = month_day(self.start);
        let end = month_day(self.end());
        if self.wraps() {
            key >= start || key < end
        } else {
            key >= start && key < end
        }
    }

    /// Sort key placing birthdays in the order they occur from `start`.
    pub fn order_key(&self, birthday: NaiveDate) -> (bool, (u32, u32)) {
        let key = month_day(birthday);
        (key < month_day(self.start), key)
    }
}

fn month_day(date: NaiveDate) -> (u32, u32) {
    (date.month(), date.day())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_inside_same_month() {
        let w = BirthdayWindow::upcoming(d(2024, 5, 10));
        assert!(w.contains(d(1990, 5, 10)));
        assert!(w.contains(d(1985, 5, 16)));
        assert!(!w.contains(d(1985, 5, 17)));
        assert!(!w.contains(d(1985, 5, 9)));
    }

    #[test]
    fn test_crosses_month_boundary() {
        let w = BirthdayWindow::upcoming(d(2023, 6, 28));
        assert!(w.contains(d(2000, 7, 2)));
        assert!(w.contains(d(2000, 6, 30)));
        assert!(!w.contains(d(2000, 7, 5)));
        assert!(!w.wraps());
    }

    #[test]
    fn test_wraps_year_end() {
        let w = BirthdayWindow::upcoming(d(2023, 12, 28));
        assert!(w.wraps());
        assert_eq!((w.start_key().as_str(), w.end_key().as_str()), ("12-28", "01-04"));
        assert!(w.contains(d(1970, 12, 31)));
        assert!(w.contains(d(1970, 1, 1)));
        assert!(w.contains(d(1970, 1, 3)));
        assert!(!w.contains(d(1970, 1, 4)));
        assert!(!w.contains(d(1970, 12, 27)));
    }

    #[test]
    fn test_leap_day_in_non_leap_year() {
        let w = BirthdayWindow::new(d(2023, 2, 28), 1);
        assert!(w.contains(d(2000, 2, 28)));
        assert!(w.contains(d(2000, 2, 29)));
        assert!(!w.contains(d(2000, 3, 1)));
    }

    #[test]
    fn test_empty_and_full_windows() {
        assert!(!BirthdayWindow::new(d(2024, 1, 1), 0).contains(d(2000, 1, 1)));
        assert!(BirthdayWindow::new(d(2024, 1, 1), 400).contains(d(2000, 8, 15)));
    }

    #[test]
    fn test_order_key_follows_window() {
        let w = BirthdayWindow::upcoming(d(2023, 12, 30));
        let mut days = vec![d(1990, 1, 2), d(1980, 12, 31), d(1970, 12, 30)];
        days.sort_by_key(|b| w.order_key(*b));
        assert_eq!(days, vec![d(1970, 12, 30), d(1980, 12, 31), d(1990, 1, 2)]);
    }
}
