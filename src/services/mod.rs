//! Services for date normalization, aggregation and display

pub mod aggregator;
pub mod config;
pub mod currency;
pub mod data_loader;
pub mod normalizer;
pub mod table_view;
pub mod validation;

pub use aggregator::Aggregator;
pub use config::Config;
pub use data_loader::DataLoaderService;
pub use normalizer::{normalize, normalize_in, DateStrategy, ResolvedDate};
