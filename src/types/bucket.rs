//! Year/month/day groupings built by the aggregator

use std::collections::BTreeMap;
use std::str::FromStr;

use chrono::Month;
use serde::Serialize;

use super::Record;

/// Leaf grouping: running total plus the records assigned to it, in input order
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct Bucket {
    pub total: f64,
    pub records: Vec<Record>,
}

impl Bucket {
    pub fn add(&mut self, record: &Record) {
        self.total += record.amount_or_zero();
        self.records.push(record.clone());
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Day-of-month buckets for one month, keyed by day without leading zero
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
#[serde(transparent)]
pub struct DayBuckets {
    pub days: BTreeMap<String, Bucket>,
}

impl DayBuckets {
    pub fn day_mut(&mut self, day: String) -> &mut Bucket {
        self.days.entry(day).or_default()
    }

    pub fn get(&self, day: &str) -> Option<&Bucket> {
        self.days.get(day)
    }

    /// Days ordered by descending numeric day-of-month
    pub fn days_desc(&self) -> Vec<(&str, &Bucket)> {
        let mut days: Vec<(&str, &Bucket)> =
            self.days.iter().map(|(k, v)| (k.as_str(), v)).collect();
        days.sort_by_key(|(day, _)| std::cmp::Reverse(day.parse::<u32>().unwrap_or(0)));
        days
    }

    pub fn total(&self) -> f64 {
        self.days.values().map(|b| b.total).sum()
    }

    pub fn record_count(&self) -> usize {
        self.days.values().map(Bucket::len).sum()
    }
}

/// Anything that sits under a month key
pub trait MonthLeaf {
    fn total(&self) -> f64;
    fn record_count(&self) -> usize;
}

impl MonthLeaf for Bucket {
    fn total(&self) -> f64 {
        self.total
    }

    fn record_count(&self) -> usize {
        self.len()
    }
}

impl MonthLeaf for DayBuckets {
    fn total(&self) -> f64 {
        DayBuckets::total(self)
    }

    fn record_count(&self) -> usize {
        DayBuckets::record_count(self)
    }
}

/// Calendar index (1-12) of a long month name, 0 if unknown
pub fn month_index(name: &str) -> u32 {
    Month::from_str(name)
        .map(|m| m.number_from_month())
        .unwrap_or(0)
}

/// Nested year -> month -> leaf structure.
///
/// Years are 4-digit strings, months long-form English names. Entries are
/// created lazily and the whole value is rebuilt on every refresh.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Calendar<L> {
    years: BTreeMap<String, BTreeMap<String, L>>,
}

impl<L> Default for Calendar<L> {
    fn default() -> Self {
        Self {
            years: BTreeMap::new(),
        }
    }
}

impl<L> Calendar<L> {
    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }

    pub fn contains_year(&self, year: &str) -> bool {
        self.years.contains_key(year)
    }

    /// Year keys, most recent first
    pub fn years_desc(&self) -> Vec<&str> {
        self.years.keys().rev().map(String::as_str).collect()
    }

    /// Months of a year, December first
    pub fn months_desc(&self, year: &str) -> Vec<(&str, &L)> {
        let Some(months) = self.years.get(year) else {
            return Vec::new();
        };
        let mut months: Vec<(&str, &L)> = months.iter().map(|(k, v)| (k.as_str(), v)).collect();
        months.sort_by_key(|(name, _)| std::cmp::Reverse(month_index(name)));
        months
    }

    pub fn get(&self, year: &str, month: &str) -> Option<&L> {
        self.years.get(year).and_then(|months| months.get(month))
    }

    /// Year to expand by default: the current year when present, else the greatest key
    pub fn default_expanded_year(&self, current_year: i32) -> Option<&str> {
        let current = current_year.to_string();
        if let Some((key, _)) = self.years.get_key_value(&current) {
            return Some(key.as_str());
        }
        self.years.keys().next_back().map(String::as_str)
    }
}

impl<L: Default> Calendar<L> {
    pub fn month_mut(&mut self, year: String, month: String) -> &mut L {
        self.years.entry(year).or_default().entry(month).or_default()
    }
}

impl<L: MonthLeaf> Calendar<L> {
    pub fn year_total(&self, year: &str) -> f64 {
        self.years
            .get(year)
            .map(|months| months.values().map(MonthLeaf::total).sum())
            .unwrap_or(0.0)
    }

    pub fn record_count(&self) -> usize {
        self.years
            .values()
            .flat_map(BTreeMap::values)
            .map(MonthLeaf::record_count)
            .sum()
    }
}

/// year -> month -> bucket
pub type MonthlyTotals = Calendar<Bucket>;

/// year -> month -> day -> bucket
pub type OrganizedEntries = Calendar<DayBuckets>;

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, amount: Option<f64>) -> Record {
        let mut r = Record::new(id);
        r.amount = amount;
        r
    }

    #[test]
    fn test_bucket_add_treats_missing_amount_as_zero() {
        let mut bucket = Bucket::default();
        bucket.add(&record("a", Some(10.0)));
        bucket.add(&record("b", None));

        assert_eq!(bucket.len(), 2);
        assert!((bucket.total - 10.0).abs() < f64::EPSILON);
        assert_eq!(bucket.records[1].id, "b");
    }

    #[test]
    fn test_month_index() {
        assert_eq!(month_index("January"), 1);
        assert_eq!(month_index("December"), 12);
        assert_eq!(month_index("Smarch"), 0);
    }

    #[test]
    fn test_months_desc_is_december_first() {
        let mut cal = MonthlyTotals::default();
        for month in ["March", "December", "January", "August"] {
            cal.month_mut("2024".into(), month.into())
                .add(&record(month, Some(1.0)));
        }

        let order: Vec<&str> = cal.months_desc("2024").into_iter().map(|(m, _)| m).collect();
        assert_eq!(order, vec!["December", "August", "March", "January"]);
        assert!(cal.months_desc("1999").is_empty());
    }

    #[test]
    fn test_days_desc_numeric_order() {
        let mut days = DayBuckets::default();
        for day in ["2", "10", "31", "9"] {
            days.day_mut(day.into()).add(&record(day, Some(1.0)));
        }

        let order: Vec<&str> = days.days_desc().into_iter().map(|(d, _)| d).collect();
        assert_eq!(order, vec!["31", "10", "9", "2"]);
        assert!((days.total() - 4.0).abs() < f64::EPSILON);
        assert_eq!(days.record_count(), 4);
    }

    #[test]
    fn test_default_expanded_year_prefers_current() {
        let mut cal = MonthlyTotals::default();
        cal.month_mut("2022".into(), "May".into());
        cal.month_mut("2023".into(), "May".into());
        cal.month_mut("2025".into(), "May".into());

        assert_eq!(cal.default_expanded_year(2023), Some("2023"));
        assert_eq!(cal.default_expanded_year(2030), Some("2025"));
    }

    #[test]
    fn test_default_expanded_year_empty() {
        let cal = MonthlyTotals::default();
        assert_eq!(cal.default_expanded_year(2024), None);
        assert!(cal.years_desc().is_empty());
    }

    #[test]
    fn test_year_total_and_record_count() {
        let mut cal = MonthlyTotals::default();
        cal.month_mut("2024".into(), "March".into())
            .add(&record("a", Some(100.0)));
        cal.month_mut("2024".into(), "April".into())
            .add(&record("b", Some(50.0)));
        cal.month_mut("2023".into(), "April".into())
            .add(&record("c", Some(5.0)));

        assert!((cal.year_total("2024") - 150.0).abs() < f64::EPSILON);
        assert_eq!(cal.year_total("1990"), 0.0);
        assert_eq!(cal.record_count(), 3);
        assert_eq!(cal.years_desc(), vec!["2024", "2023"]);
    }
}
