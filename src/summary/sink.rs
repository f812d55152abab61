// Summary writer contract and an in-memory dataset implementing it

use crate::core::error::{NexusError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::warn;

/// Arguments used to allocate a summary writer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WriterSpec {
    pub case: String,
    pub formatted: bool,
    pub unified: bool,
    pub key_join: String,
    pub start_date: NaiveDate,
    pub time_in_days: bool,
    pub nx: i32,
    pub ny: i32,
    pub nz: i32,
}

/// Anything that can receive a translated summary: allocate, declare
/// variables, add timesteps, then set values.
pub trait SummarySink: Sized {
    type Node: Copy;
    type Step: Copy;

    fn allocate(spec: WriterSpec) -> Result<Self>;

    fn add_variable(&mut self, keyword: &str, well: Option<&str>, unit: &str, default: f32) -> Result<Self::Node>;

    /// `sim_seconds` is time since start in seconds.
    fn add_timestep(&mut self, report_step: usize, sim_seconds: f64) -> Result<Self::Step>;

    fn set_value(&mut self, step: Self::Step, node: Self::Node, value: f32) -> Result<()>;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryVariable {
    pub keyword: String,
    pub well: Option<String>,
    pub unit: String,
    pub default: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryTimestep {
    pub report_step: usize,
    pub sim_seconds: f64,
    /// One value per variable, in variable order.
    pub values: Vec<f32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryDataset {
    pub spec: WriterSpec,
    pub variables: Vec<SummaryVariable>,
    pub timesteps: Vec<SummaryTimestep>,
}

impl SummaryDataset {
    pub fn has_key(&self, keyword: &str) -> bool {
        self.node(keyword).is_some()
    }

    pub fn data_length(&self) -> usize {
        self.timesteps.len()
    }

    /// Value of `keyword` at timestep position `index`.
    pub fn get(&self, keyword: &str, index: usize) -> Option<f32> {
        let node = self.node(keyword)?;
        self.timesteps.get(index).and_then(|ts| ts.values.get(node).copied())
    }

    /// All values of `keyword` in timestep order.
    pub fn values(&self, keyword: &str) -> Option<Vec<f32>> {
        let node = self.node(keyword)?;
        self.timesteps.iter().map(|ts| ts.values.get(node).copied()).collect()
    }

    pub fn unit(&self, keyword: &str) -> Option<&str> {
        self.node(keyword).map(|n| self.variables[n].unit.as_str())
    }

    pub fn keywords(&self) -> impl Iterator<Item = &str> + '_ {
        self.variables.iter().map(|v| v.keyword.as_str())
    }

    pub fn write_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| NexusError::Sink(format!("JSON serialize error: {}", e)))?;
        fs::write(path, json)?;
        Ok(())
    }

    pub fn read_json<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data = fs::read_to_string(path)?;
        let dataset: SummaryDataset = serde_json::from_str(&data)
            .map_err(|e| NexusError::Sink(format!("JSON parse error: {}", e)))?;
        dataset.check_shape()?;
        Ok(dataset)
    }

    /// Every timestep must carry exactly one value per variable.
    fn check_shape(&self) -> Result<()> {
        for ts in &self.timesteps {
            if ts.values.len() != self.variables.len() {
                return Err(NexusError::Sink(format!(
                    "Timestep {} has {} values for {} variables",
                    ts.report_step,
                    ts.values.len(),
                    self.variables.len()
                )));
            }
        }
        Ok(())
    }

    fn node(&self, keyword: &str) -> Option<usize> {
        self.variables.iter().position(|v| v.keyword == keyword)
    }
}

impl SummarySink for SummaryDataset {
    type Node = usize;
    type Step = usize;

    fn allocate(spec: WriterSpec) -> Result<Self> {
        Ok(Self {
            spec,
            variables: Vec::new(),
            timesteps: Vec::new(),
        })
    }

    fn add_variable(&mut self, keyword: &str, well: Option<&str>, unit: &str, default: f32) -> Result<usize> {
        self.variables.push(SummaryVariable {
            keyword: keyword.to_string(),
            well: well.map(str::to_string),
            unit: unit.to_string(),
            default,
        });
        for ts in &mut self.timesteps {
            ts.values.push(default);
        }
        Ok(self.variables.len() - 1)
    }

    fn add_timestep(&mut self, report_step: usize, sim_seconds: f64) -> Result<usize> {
        if let Some(last) = self.timesteps.last() {
            if sim_seconds < last.sim_seconds {
                warn!(
                    "Timestep {} goes back in time ({} < {})",
                    report_step, sim_seconds, last.sim_seconds
                );
            }
        }
        self.timesteps.push(SummaryTimestep {
            report_step,
            sim_seconds,
            values: self.variables.iter().map(|v| v.default).collect(),
        });
        Ok(self.timesteps.len() - 1)
    }

    fn set_value(&mut self, step: usize, node: usize, value: f32) -> Result<()> {
        let slot = self
            .timesteps
            .get_mut(step)
            .and_then(|ts| ts.values.get_mut(node))
            .ok_or_else(|| NexusError::Sink(format!("No slot for timestep {} node {}", step, node)))?;
        *slot = value;
        Ok(())
    }
}
