pub mod builder;
pub mod keywords;
pub mod sink;
