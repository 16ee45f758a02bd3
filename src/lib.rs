//! entrytally: monthly totals and date-organized views over data entries

pub mod cli;
pub mod parsers;
pub mod services;
pub mod types;
