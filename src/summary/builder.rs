// Translation of a loaded plot into summary nodes and timesteps

use crate::core::constants::SECONDS_PER_DAY;
use crate::core::error::{NexusError, Result};
use crate::core::format::{Plot, TimestepAxis};
use crate::core::names::{ClassName, VarName};
use crate::core::query::select;
use crate::summary::keywords::KeywordMapper;
use crate::summary::sink::{SummaryDataset, SummarySink, WriterSpec};
use crate::utils::conf_helper::ConversionOptions;
use std::collections::HashMap;
use std::fmt;
use tracing::{debug, info, warn};

/// A source keyword that had no target keyword. Not an error: the
/// keyword is left out and the conversion goes on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub class: ClassName,
    pub keyword: VarName,
    /// Number of data points dropped with it.
    pub occurrences: usize,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "could not convert nexus variable {} ({}) to ecl keyword, {} values dropped",
            self.keyword, self.class, self.occurrences
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BuildReport {
    pub nodes: usize,
    pub timesteps: usize,
    pub diagnostics: Vec<Diagnostic>,
}

struct NodePlan<'a> {
    keyword: &'a str,
    unit: &'static str,
    // (axis position, value) in timestep order
    values: Vec<(usize, f32)>,
}

/// Builds an in-memory summary with the default field keyword table.
pub fn ecl_summary(case: &str, formatted: bool, plot: &Plot) -> Result<SummaryDataset> {
    let options = ConversionOptions {
        formatted,
        ..ConversionOptions::default()
    };
    let (dataset, _) = build_summary(case, plot, KeywordMapper::field_defaults(), &options)?;
    Ok(dataset)
}

/// Translates the aggregate records selected by `options` into a summary
/// sink of type `S`.
pub fn build_summary<S: SummarySink>(
    case: &str,
    plot: &Plot,
    mapper: &KeywordMapper,
    options: &ConversionOptions,
) -> Result<(S, BuildReport)> {
    if case.is_empty() {
        return Err(NexusError::Config("Case name must not be empty".to_string()));
    }
    options.validate()?;
    let (class, instance) = options.selector()?;

    let selected = select(plot, |p| p.class == class && p.instance == instance);

    let axis = TimestepAxis::from_points(&plot.data);
    debug!(
        "Selected {} of {} data points over {} timesteps",
        selected.len(),
        plot.data.len(),
        axis.len()
    );

    let mut order: Vec<VarName> = Vec::new();
    let mut groups: HashMap<VarName, Vec<(usize, f32)>> = HashMap::new();
    for p in &selected {
        // Every timestep in the plot is on the axis
        if let Some(pos) = axis.position(p.timestep) {
            groups
                .entry(p.varname)
                .or_insert_with(|| {
                    order.push(p.varname);
                    Vec::new()
                })
                .push((pos, p.value));
        }
    }

    let mut report = BuildReport::default();
    let mut plans = Vec::new();
    for var in order {
        let values = groups.remove(&var).unwrap_or_default();
        match mapper.lookup(&class, &var) {
            Some(keyword) => plans.push(NodePlan {
                keyword,
                unit: plot.header.unit_system.unit_for_keyword(&var.trimmed()),
                values,
            }),
            None => {
                let diagnostic = Diagnostic {
                    class,
                    keyword: var,
                    occurrences: values.len(),
                };
                warn!("{}", diagnostic);
                report.diagnostics.push(diagnostic);
            }
        }
    }

    let header = &plot.header;
    let spec = WriterSpec {
        case: case.to_string(),
        formatted: options.formatted,
        unified: options.unified,
        key_join: options.key_join.clone(),
        start_date: header.start_date()?,
        time_in_days: options.time_in_days,
        nx: header.nx,
        ny: header.ny,
        nz: header.nz,
    };
    let mut sink = S::allocate(spec)?;

    let mut nodes = Vec::with_capacity(plans.len());
    for plan in &plans {
        nodes.push(sink.add_variable(plan.keyword, None, plan.unit, 0.0)?);
    }

    let mut steps = Vec::with_capacity(axis.len());
    for (i, (_, time)) in axis.iter().enumerate() {
        steps.push(sink.add_timestep(i + 1, f64::from(time) * SECONDS_PER_DAY)?);
    }

    for (plan, node) in plans.iter().zip(&nodes) {
        for (pos, value) in &plan.values {
            sink.set_value(steps[*pos], *node, *value)?;
        }
    }

    report.nodes = nodes.len();
    report.timesteps = steps.len();
    info!(
        "Built summary {}: {} keywords, {} timesteps, {} unmapped",
        case,
        report.nodes,
        report.timesteps,
        report.diagnostics.len()
    );
    Ok((sink, report))
}
