//! Repository layer: writing records and listing them through filters

pub mod columns;
pub mod insert;
pub mod search;
pub mod source;

pub use insert::{insert_dataset, insert_record};
pub use search::{search, search_in, Page, PageRequest, SortOrder};
pub use source::SqliteEntitySource;
