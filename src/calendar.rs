// Due-date formatting and month grids for date picking

use chrono::{Datelike, Days, NaiveDate};
use eyre::{Result, eyre};

const DUE_DATE_FORMAT: &str = "%b %-d, %Y";

/// en-US short form used for due dates, e.g. `Dec 1, 2025`
pub fn format_due_date(date: NaiveDate) -> String {
    date.format(DUE_DATE_FORMAT).to_string()
}

/// Parse a due date written by [`format_due_date`], or an ISO `YYYY-MM-DD`
///
/// Due dates are opaque to the store; this is only for views that want to
/// reason about them.
pub fn parse_due_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    NaiveDate::parse_from_str(s, "%b %d, %Y")
        .or_else(|_| NaiveDate::parse_from_str(s, "%Y-%m-%d"))
        .ok()
}

/// One month of the date picker
///
/// Always holds a representable 1st of the month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthView {
    first: NaiveDate,
}

impl MonthView {
    pub fn new(year: i32, month: u32) -> Result<Self> {
        if !(1..=12).contains(&month) {
            return Err(eyre!("Invalid month: {} (must be 1-12)", month));
        }
        let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| eyre!("Year out of range: {}", year))?;
        Ok(Self { first })
    }

    /// The month containing `date`
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            first: date - Days::new(u64::from(date.day0())),
        }
    }

    pub fn year(&self) -> i32 {
        self.first.year()
    }

    pub fn month(&self) -> u32 {
        self.first.month()
    }

    pub fn days_in_month(&self) -> u32 {
        (28..=31).rev().find(|&day| self.date(day).is_some()).unwrap_or(28)
    }

    /// Weekday of the 1st, Sunday = 0
    pub fn first_weekday(&self) -> u32 {
        self.first.weekday().num_days_from_sunday()
    }

    /// Grid cells starting on Sunday: blanks before the 1st, then each day
    pub fn cells(&self) -> Vec<Option<u32>> {
        let blanks = self.first_weekday() as usize;
        std::iter::repeat_n(None, blanks)
            .chain((1..=self.days_in_month()).map(Some))
            .collect()
    }

    /// Header text, e.g. `December 2025`
    pub fn title(&self) -> String {
        self.first.format("%B %Y").to_string()
    }

    /// The previous month, or `None` before the earliest representable one
    pub fn prev(&self) -> Option<Self> {
        match self.month() {
            1 => Self::new(self.year().checked_sub(1)?, 12).ok(),
            month => Self::new(self.year(), month - 1).ok(),
        }
    }

    /// The next month, or `None` past the latest representable one
    pub fn next(&self) -> Option<Self> {
        match self.month() {
            12 => Self::new(self.year().checked_add(1)?, 1).ok(),
            month => Self::new(self.year(), month + 1).ok(),
        }
    }

    /// The date picked by tapping `day`, if the month has it
    pub fn date(&self, day: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year(), self.month(), day)
    }

    pub fn is_today(&self, day: u32, today: NaiveDate) -> bool {
        self.date(day) == Some(today)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_format_due_date() {
        assert_eq!(format_due_date(ymd(2025, 12, 1)), "Dec 1, 2025");
        assert_eq!(format_due_date(ymd(2026, 3, 15)), "Mar 15, 2026");
    }

    #[test]
    fn test_parse_due_date() {
        assert_eq!(parse_due_date("Dec 1, 2025"), Some(ymd(2025, 12, 1)));
        assert_eq!(parse_due_date(" Mar 15, 2026 "), Some(ymd(2026, 3, 15)));
        assert_eq!(parse_due_date("2025-12-01"), Some(ymd(2025, 12, 1)));
        assert_eq!(parse_due_date("someday"), None);
        assert_eq!(parse_due_date(""), None);
    }

    #[test]
    fn test_month_validation() {
        assert!(MonthView::new(2025, 0).is_err());
        assert!(MonthView::new(2025, 13).is_err());
        assert!(MonthView::new(2025, 12).is_ok());
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(MonthView::new(2025, 12).unwrap().days_in_month(), 31);
        assert_eq!(MonthView::new(2025, 4).unwrap().days_in_month(), 30);
        assert_eq!(MonthView::new(2025, 2).unwrap().days_in_month(), 28);
        assert_eq!(MonthView::new(2024, 2).unwrap().days_in_month(), 29);
    }

    #[test]
    fn test_cells_start_on_first_weekday() {
        // 1 Dec 2025 is a Monday
        let month = MonthView::new(2025, 12).unwrap();
        assert_eq!(month.first_weekday(), 1);

        let cells = month.cells();
        assert_eq!(cells.len(), 32);
        assert_eq!(cells[0], None);
        assert_eq!(cells[1], Some(1));
        assert_eq!(cells.last(), Some(&Some(31)));
    }

    #[test]
    fn test_navigation_wraps_years() {
        let jan = MonthView::new(2026, 1).unwrap();
        assert_eq!(jan.prev(), Some(MonthView::new(2025, 12).unwrap()));
        assert_eq!(jan.prev().and_then(|m| m.next()), Some(jan));
        assert_eq!(MonthView::new(2025, 6).unwrap().next().map(|m| m.month()), Some(7));
    }

    #[test]
    fn test_latest_representable_month() {
        let month = MonthView::new(NaiveDate::MAX.year(), 12).unwrap();
        assert_eq!(month.days_in_month(), 31);
        assert_eq!(month.cells().len(), month.first_weekday() as usize + 31);
        assert_eq!(month.next(), None);
        assert_eq!(month.prev().map(|m| m.month()), Some(11));
        assert!(MonthView::new(NaiveDate::MAX.year() + 1, 1).is_err());
    }

    #[test]
    fn test_earliest_representable_month() {
        let month = MonthView::new(NaiveDate::MIN.year(), 1).unwrap();
        assert_eq!(month.days_in_month(), 31);
        assert_eq!(month.prev(), None);
        assert_eq!(month.next().map(|m| m.month()), Some(2));
    }

    #[test]
    fn test_containing_mid_month() {
        let month = MonthView::containing(ymd(2024, 2, 29));
        assert_eq!(month, MonthView::new(2024, 2).unwrap());
        assert_eq!(month.days_in_month(), 29);
    }

    #[test]
    fn test_title_and_today() {
        let month = MonthView::containing(ymd(2025, 12, 17));
        assert_eq!(month.title(), "December 2025");
        assert!(month.is_today(17, ymd(2025, 12, 17)));
        assert!(!month.is_today(17, ymd(2026, 12, 17)));
        assert_eq!(month.date(32), None);
    }
}
