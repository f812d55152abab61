use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::info;

use crate::core::error::{NexusError, Result};
use crate::core::names::{ClassName, InstanceName};

/// Options controlling how a plot is turned into a summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversionOptions {
    pub formatted: bool,
    pub unified: bool,
    pub key_join: String,
    pub time_in_days: bool,
    /// Class and instance of the aggregate records to translate.
    pub class: String,
    pub instance: String,
}

impl Default for ConversionOptions {
    fn default() -> Self {
        Self {
            formatted: true,
            unified: true,
            key_join: ":".to_string(),
            time_in_days: true,
            class: "FIELD".to_string(),
            instance: "NETWORK".to_string(),
        }
    }
}

impl ConversionOptions {
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let data = fs::read_to_string(path)
            .map_err(|e| NexusError::Config(format!("File read Error: {e} {}", path.display())))?;

        let options: ConversionOptions = serde_json::from_str(&data)
            .map_err(|e| NexusError::Config(format!("JSON Parse Error: {e}")))?;
        options.validate()?;

        info!("Conversion options loaded from {}", path.display());
        Ok(options)
    }

    pub fn validate(&self) -> Result<()> {
        self.selector()?;
        if self.key_join.is_empty() {
            return Err(NexusError::Config("key_join must not be empty".to_string()));
        }
        Ok(())
    }

    /// Class and instance names padded to their on-disk width.
    pub fn selector(&self) -> Result<(ClassName, InstanceName)> {
        let class = match self.class.as_str() {
            "" => None,
            s => ClassName::padded(s),
        }
        .ok_or_else(|| NexusError::Config(format!("Invalid class selector {:?}", self.class)))?;

        let instance = match self.instance.as_str() {
            "" => None,
            s => InstanceName::padded(s),
        }
        .ok_or_else(|| NexusError::Config(format!("Invalid instance selector {:?}", self.instance)))?;

        Ok((class, instance))
    }
}
