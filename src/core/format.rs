// Data structures for the Nexus PLT format

use crate::core::error::{NexusError, Result};
use crate::core::names::{ClassName, InstanceName, VarName};
use crate::core::units::UnitSystem;
use chrono::NaiveDate;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub unit_system: UnitSystem,
    pub num_classes: i32,
    pub day: i32,
    pub month: i32,
    pub year: i32,
    pub nx: i32,
    pub ny: i32,
    pub nz: i32,
    pub ncomp: i32,
}

impl Header {
    /// Builds a header from the eight integer fields in file order.
    /// Every field must be non-negative.
    pub fn from_fields(unit_system: UnitSystem, fields: [i32; 8]) -> Result<Self> {
        if fields.iter().any(|x| *x < 0) {
            return Err(NexusError::bad_header("Negative value, corrupted file"));
        }
        let [num_classes, day, month, year, nx, ny, nz, ncomp] = fields;
        Ok(Self {
            unit_system,
            num_classes,
            day,
            month,
            year,
            nx,
            ny,
            nz,
            ncomp,
        })
    }

    pub fn start_date(&self) -> Result<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month as u32, self.day as u32).ok_or_else(|| {
            NexusError::BadHeader(format!(
                "Invalid start date {}-{}-{}",
                self.year, self.month, self.day
            ))
        })
    }

    pub fn dimensions(&self) -> (i32, i32, i32) {
        (self.nx, self.ny, self.nz)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DataPoint {
    pub timestep: i32,
    /// Days since simulation start.
    pub time: f32,
    pub max_perfs: i32,
    pub class: ClassName,
    pub instance: InstanceName,
    pub varname: VarName,
    pub value: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Plot {
    pub header: Header,
    /// Records in the order they were found in the file.
    pub data: Vec<DataPoint>,
}

/// Ordered variable names declared for each class.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VariableCatalog {
    classes: Vec<ClassName>,
    vars: BTreeMap<ClassName, Vec<VarName>>,
}

impl VariableCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `class` with its variables. A repeated class replaces the
    /// earlier entry.
    pub fn insert(&mut self, class: ClassName, names: Vec<VarName>) {
        if self.vars.insert(class, names).is_none() {
            self.classes.push(class);
        }
    }

    pub fn get(&self, class: &ClassName) -> Option<&[VarName]> {
        self.vars.get(class).map(Vec::as_slice)
    }

    /// Class names in declaration order.
    pub fn classes(&self) -> &[ClassName] {
        &self.classes
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

/// Unique timesteps of a plot in ascending order, each with its
/// simulation time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimestepAxis {
    steps: Vec<(i32, f32)>,
}

impl TimestepAxis {
    pub fn from_points<'a, I>(points: I) -> Self
    where
        I: IntoIterator<Item = &'a DataPoint>,
    {
        // First time seen for a timestep wins
        let mut unique: BTreeMap<i32, f32> = BTreeMap::new();
        for p in points {
            unique.entry(p.timestep).or_insert(p.time);
        }
        Self {
            steps: unique.into_iter().collect(),
        }
    }

    /// Zero-based position of `timestep` on the axis.
    pub fn position(&self, timestep: i32) -> Option<usize> {
        self.steps.binary_search_by_key(&timestep, |(t, _)| *t).ok()
    }

    pub fn iter(&self) -> impl Iterator<Item = (i32, f32)> + '_ {
        self.steps.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}
