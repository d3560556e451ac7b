//! Filter criteria: the typed property bag and the stable property names

pub mod data_filter;
pub mod properties;

pub use data_filter::DataFilter;
