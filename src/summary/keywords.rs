// Nexus keyword to ECL summary keyword mapping

use crate::core::names::{ClassName, VarName};
use std::collections::HashMap;
use std::sync::OnceLock;

// Field level aggregates
const FIELD_KEYWORDS: &[(&str, &str)] = &[
    ("QOP", "FOPR"),
    ("QWP", "FWPR"),
    ("QGP", "FGPR"),
    ("GOR", "FGOR"),
    ("WCUT", "FWCT"),
    ("COP", "FOPT"),
    ("CWP", "FWPT"),
    ("CGP", "FGPT"),
    ("QWI", "FWIR"),
    ("QGI", "FGIR"),
    ("CWI", "FWIT"),
    ("CGI", "FGIT"),
    ("QPP", "FCPR"),
    ("CPP", "FCPC"),
];

/// Lookup table keyed by (class, source keyword). Names are compared
/// byte-exact after padding.
#[derive(Debug, Clone, Default)]
pub struct KeywordMapper {
    table: HashMap<(ClassName, VarName), String>,
}

impl KeywordMapper {
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in field level table.
    pub fn field_defaults() -> &'static KeywordMapper {
        static DEFAULTS: OnceLock<KeywordMapper> = OnceLock::new();
        DEFAULTS.get_or_init(|| {
            let mut mapper = KeywordMapper::new();
            for (nexus, ecl) in FIELD_KEYWORDS {
                mapper.insert("FIELD", nexus, ecl);
            }
            mapper
        })
    }

    /// Adds or replaces an entry. Returns `false` when either name is too
    /// wide for its slot.
    pub fn insert(&mut self, class: &str, nexus_kw: &str, ecl_kw: &str) -> bool {
        match (ClassName::padded(class), VarName::padded(nexus_kw)) {
            (Some(class), Some(var)) => {
                self.table.insert((class, var), ecl_kw.to_string());
                true
            }
            _ => false,
        }
    }

    pub fn with_entry(mut self, class: &str, nexus_kw: &str, ecl_kw: &str) -> Self {
        self.insert(class, nexus_kw, ecl_kw);
        self
    }

    pub fn lookup(&self, class: &ClassName, var: &VarName) -> Option<&str> {
        self.table.get(&(*class, *var)).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}
