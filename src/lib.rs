// Nexus PLT reader and ECL summary conversion
// Main library entry point

pub mod core;
pub mod summary;
pub mod utils;

// Re-export main types
pub use crate::core::error::{NexusError, Result};
pub use crate::core::format::{DataPoint, Header, Plot, TimestepAxis, VariableCatalog};
pub use crate::core::names::{ClassName, InstanceName, VarName};
pub use crate::core::reader::{load, load_from};
pub use crate::core::units::{Measure, UnitSystem};
pub use crate::summary::builder::{build_summary, ecl_summary, BuildReport, Diagnostic};
pub use crate::summary::keywords::KeywordMapper;
pub use crate::summary::sink::{SummaryDataset, SummarySink, WriterSpec};
pub use crate::utils::conf_helper::ConversionOptions;
