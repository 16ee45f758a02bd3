//! Aggregator service for grouping entries by year, month and day

use chrono::{Datelike, Local, NaiveDate, TimeZone, Utc};
use tracing::{debug, warn};

use crate::services::normalizer::normalize_in;
use crate::types::{MonthlyTotals, OrganizedEntries, Record};

/// Aggregator for building calendar views
pub struct Aggregator;

impl Aggregator {
    /// Group entries by year and month in local time
    pub fn monthly(records: &[Record]) -> MonthlyTotals {
        Self::monthly_in(records, &Local)
    }

    /// Group entries by year and month, dating them on the calendar of `tz`
    pub fn monthly_in<Tz: TimeZone>(records: &[Record], tz: &Tz) -> MonthlyTotals {
        let mut totals = MonthlyTotals::default();

        for (date, record) in placements(records, tz) {
            totals
                .month_mut(year_key(date), month_key(date))
                .add(record);
        }

        debug!(
            entries = records.len(),
            years = ?totals.years_desc(),
            "monthly totals built"
        );
        totals
    }

    /// Group entries by year, month and day in local time
    pub fn organized(records: &[Record]) -> OrganizedEntries {
        Self::organized_in(records, &Local)
    }

    /// Group entries by year, month and day, dating them on the calendar of `tz`
    pub fn organized_in<Tz: TimeZone>(records: &[Record], tz: &Tz) -> OrganizedEntries {
        let mut organized = OrganizedEntries::default();

        for (date, record) in placements(records, tz) {
            organized
                .month_mut(year_key(date), month_key(date))
                .day_mut(day_key(date))
                .add(record);
        }

        debug!(
            entries = records.len(),
            years = ?organized.years_desc(),
            "organized entries built"
        );
        organized
    }
}

/// Calendar year of "now" in `tz`
pub fn current_year_in<Tz: TimeZone>(tz: &Tz) -> i32 {
    Utc::now().with_timezone(tz).year()
}

/// Pair every datable record with its calendar date; log and drop the rest
fn placements<'a, Tz: TimeZone>(
    records: &'a [Record],
    tz: &'a Tz,
) -> impl Iterator<Item = (NaiveDate, &'a Record)> + 'a {
    records.iter().filter_map(move |record| {
        let Some(raw) = record.created_at.as_ref() else {
            warn!(entry_id = %record.id, "entry missing created_at date");
            return None;
        };

        match normalize_in(raw, tz) {
            Ok(resolved) => Some((resolved.date, record)),
            Err(err) => {
                warn!(
                    entry_id = %record.id,
                    value = %err.value,
                    kind = err.kind,
                    "invalid date format for entry"
                );
                None
            }
        }
    })
}

fn year_key(date: NaiveDate) -> String {
    date.year().to_string()
}

fn month_key(date: NaiveDate) -> String {
    date.format("%B").to_string()
}

fn day_key(date: NaiveDate) -> String {
    date.day().to_string()
}
