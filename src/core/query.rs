// Selection helpers over loaded plot data

use crate::core::format::{DataPoint, Plot};
use crate::core::names::VarName;

pub fn is_class(name: &str) -> impl Fn(&DataPoint) -> bool + '_ {
    move |p| p.class.is(name)
}

pub fn is_instance(name: &str) -> impl Fn(&DataPoint) -> bool + '_ {
    move |p| p.instance.is(name)
}

pub fn is_varname(name: &str) -> impl Fn(&DataPoint) -> bool + '_ {
    move |p| p.varname.is(name)
}

/// Points matching `pred`, stably sorted by timestep.
pub fn select<F>(plot: &Plot, pred: F) -> Vec<DataPoint>
where
    F: Fn(&DataPoint) -> bool,
{
    let mut points: Vec<DataPoint> = plot.data.iter().filter(|p| pred(*p)).copied().collect();
    points.sort_by_key(|p| p.timestep);
    points
}

/// Distinct timesteps, ascending.
pub fn unique_timesteps(plot: &Plot) -> Vec<i32> {
    let mut steps: Vec<i32> = plot.data.iter().map(|p| p.timestep).collect();
    steps.sort_unstable();
    steps.dedup();
    steps
}

/// Distinct simulation times, ascending.
pub fn unique_times(plot: &Plot) -> Vec<f32> {
    let mut times: Vec<f32> = plot.data.iter().map(|p| p.time).collect();
    times.sort_by(f32::total_cmp);
    times.dedup();
    times
}

/// Variable names seen for `class`, in first-encounter order.
pub fn varnames(plot: &Plot, class: &str) -> Vec<VarName> {
    let mut names = Vec::new();
    for p in plot.data.iter().filter(|p| p.class.is(class)) {
        if !names.contains(&p.varname) {
            names.push(p.varname);
        }
    }
    names
}
