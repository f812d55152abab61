pub mod compression;
pub mod constants;
pub mod cursor;
pub mod error;
pub mod format;
pub mod names;
pub mod query;
pub mod reader;
pub mod units;
