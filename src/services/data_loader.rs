//! Data loading service shared by every view
//!
//! Each refresh fetches from the record source and rebuilds the requested
//! view from scratch. A failed fetch or a payload with the wrong shape resets
//! the view to empty instead of showing partial data.

use chrono::{Local, TimeZone};
use tracing::{error, info};

use crate::parsers::{EntryQuery, JsonFileSource, RecordSource};
use crate::services::aggregator::{current_year_in, Aggregator};
use crate::services::config::Config;
use crate::types::{Aggregation, Bucket, DayBuckets, Record, Result};

pub struct DataLoaderService {
    source: Box<dyn RecordSource>,
    query: EntryQuery,
}

impl DataLoaderService {
    pub fn new(source: Box<dyn RecordSource>, query: EntryQuery) -> Self {
        Self { source, query }
    }

    /// JSON export named by the config, filtered the way the config says
    pub fn from_config(config: &Config) -> Result<Self> {
        let source = JsonFileSource::new(config.data_file()?);
        Ok(Self::new(Box::new(source), config.query()))
    }

    pub fn load_records(&self) -> Result<Vec<Record>> {
        self.source.load(&self.query)
    }

    pub fn monthly_totals(&self) -> Aggregation<Bucket> {
        self.monthly_totals_in(&Local)
    }

    pub fn monthly_totals_in<Tz: TimeZone>(&self, tz: &Tz) -> Aggregation<Bucket> {
        match self.load_records() {
            Ok(records) => {
                let agg = Aggregation::new(
                    Aggregator::monthly_in(&records, tz),
                    current_year_in(tz),
                );
                log_expansion(agg.expanded_year.as_deref());
                agg
            }
            Err(e) => {
                error!(
                    source = self.source.name(),
                    error = %e,
                    "error loading entries for monthly totals"
                );
                Aggregation::empty()
            }
        }
    }

    pub fn organized(&self) -> Aggregation<DayBuckets> {
        self.organized_in(&Local)
    }

    pub fn organized_in<Tz: TimeZone>(&self, tz: &Tz) -> Aggregation<DayBuckets> {
        match self.load_records() {
            Ok(records) => {
                let agg = Aggregation::new(
                    Aggregator::organized_in(&records, tz),
                    current_year_in(tz),
                );
                log_expansion(agg.expanded_year.as_deref());
                agg
            }
            Err(e) => {
                error!(
                    source = self.source.name(),
                    error = %e,
                    "error loading entries for organized data"
                );
                Aggregation::empty()
            }
        }
    }
}

fn log_expansion(year: Option<&str>) {
    match year {
        Some(year) => info!(year = %year, "auto-expanded year"),
        None => info!("no years available to expand"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsers::InlineSource;
    use chrono::Utc;
    use serde_json::json;

    fn loader(payload: serde_json::Value) -> DataLoaderService {
        DataLoaderService::new(Box::new(InlineSource::new(payload)), EntryQuery::default())
    }

    #[test]
    fn test_monthly_totals_expands_latest_year() {
        let service = loader(json!([
            { "id": "a", "created_at": "2019-03-05", "total_amount": 100 },
            { "id": "b", "created_at": "2018-03-20", "total_amount": 250 }
        ]));

        let agg = service.monthly_totals_in(&Utc);
        assert_eq!(agg.expanded_year.as_deref(), Some("2019"));
        assert_eq!(agg.calendar.record_count(), 2);
    }

    #[test]
    fn test_structural_failure_resets_to_empty() {
        let service = loader(json!([
            { "id": "a", "created_at": "2024-03-05", "total_amount": 100 },
            { "id": "b", "created_at": "2024-03-06", "total_amount": "lots" }
        ]));

        let agg = service.monthly_totals_in(&Utc);
        assert!(agg.is_empty());
        assert!(agg.expanded_year.is_none());
    }

    #[test]
    fn test_fetch_failure_resets_to_empty() {
        let service = DataLoaderService::new(
            Box::new(JsonFileSource::new("tests/fixtures/nonexistent.json")),
            EntryQuery::default(),
        );
        assert!(service.organized_in(&Utc).is_empty());
    }

    #[test]
    fn test_organized_uses_query() {
        let service = DataLoaderService::new(
            Box::new(InlineSource::new(json!([
                { "id": "a", "created_at": "2024-03-05", "owner_id": "u1" },
                { "id": "b", "created_at": "2024-03-05", "owner_id": "u2" }
            ]))),
            EntryQuery {
                owner_id: Some("u2".into()),
                include_deleted: false,
            },
        );

        let agg = service.organized_in(&Utc);
        let day = agg.calendar.get("2024", "March").and_then(|m| m.get("5"));
        assert_eq!(day.map(|b| b.records[0].id.as_str()), Some("b"));
    }

    #[test]
    fn test_day_bucket_lists_latest_first() {
        let service = loader(json!([
            { "id": "morning", "created_at": "2024-03-05 08:00:00" },
            { "id": "evening", "created_at": "2024-03-05 18:00:00" }
        ]));

        let agg = service.organized_in(&Utc);
        let day = agg.calendar.get("2024", "March").and_then(|m| m.get("5"));
        let ids: Vec<&str> = day
            .map(|b| b.records.iter().map(|r| r.id.as_str()).collect())
            .unwrap_or_default();
        assert_eq!(ids, vec!["evening", "morning"]);
    }

    #[test]
    fn test_empty_payload() {
        let agg = loader(json!([])).monthly_totals_in(&Utc);
        assert!(agg.is_empty());
        assert!(agg.expanded_year.is_none());
    }
}
