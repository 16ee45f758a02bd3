//! Type definitions for entrytally

mod bucket;
mod error;
mod record;
mod table;
mod view;

pub use bucket::*;
pub use error::*;
pub use record::*;
pub use table::*;
pub use view::*;
