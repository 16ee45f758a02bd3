//! Presentation-facing state derived from a calendar

use serde::Serialize;

use super::Calendar;

/// A freshly rebuilt calendar plus the year it should open with.
///
/// Replaces the previous value wholesale on every refresh.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Aggregation<L> {
    pub calendar: Calendar<L>,
    pub expanded_year: Option<String>,
}

impl<L> Aggregation<L> {
    pub fn new(calendar: Calendar<L>, current_year: i32) -> Self {
        let expanded_year = calendar
            .default_expanded_year(current_year)
            .map(str::to_string);
        Self {
            calendar,
            expanded_year,
        }
    }

    /// The reset state: nothing to show, nothing expanded
    pub fn empty() -> Self {
        Self {
            calendar: Calendar::default(),
            expanded_year: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.calendar.is_empty()
    }
}

/// Which year (and month, for the day-level view) is currently open
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpansionState {
    pub year: Option<String>,
    pub month: Option<String>,
}

impl ExpansionState {
    pub fn new(year: Option<String>) -> Self {
        Self { year, month: None }
    }

    /// Open `year`, or close it if already open. Always collapses the month.
    pub fn toggle_year(&mut self, year: &str) {
        if self.year.as_deref() == Some(year) {
            self.year = None;
        } else {
            self.year = Some(year.to_string());
        }
        self.month = None;
    }

    pub fn toggle_month(&mut self, month: &str) {
        if self.month.as_deref() == Some(month) {
            self.month = None;
        } else {
            self.month = Some(month.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MonthlyTotals;

    #[test]
    fn test_empty_aggregation() {
        let agg: Aggregation<crate::types::Bucket> = Aggregation::empty();
        assert!(agg.is_empty());
        assert!(agg.expanded_year.is_none());
    }

    #[test]
    fn test_new_picks_default_year() {
        let mut cal = MonthlyTotals::default();
        cal.month_mut("2021".into(), "June".into());
        cal.month_mut("2022".into(), "June".into());

        let agg = Aggregation::new(cal, 2040);
        assert_eq!(agg.expanded_year.as_deref(), Some("2022"));
    }

    #[test]
    fn test_toggle_year_collapses_month() {
        let mut state = ExpansionState::new(Some("2024".into()));
        state.toggle_month("March");
        assert_eq!(state.month.as_deref(), Some("March"));

        state.toggle_year("2023");
        assert_eq!(state.year.as_deref(), Some("2023"));
        assert!(state.month.is_none());

        state.toggle_year("2023");
        assert!(state.year.is_none());
    }

    #[test]
    fn test_toggle_month_twice_closes() {
        let mut state = ExpansionState::default();
        state.toggle_month("May");
        state.toggle_month("May");
        assert!(state.month.is_none());
    }
}
