// Example usage: convert a Nexus plot file into a summary dataset

use anyhow::{bail, Context};
use nexus_plt::core::query::{unique_times, unique_timesteps};
use nexus_plt::{build_summary, load, ConversionOptions, KeywordMapper, SummaryDataset};
use tracing::{info, warn, Level};
use tracing_subscriber;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(Level::DEBUG)
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 3 {
        bail!("usage: {} <plot file> <case> [options.json]", args[0]);
    }
    let (input, case) = (&args[1], &args[2]);

    let options = match args.get(3) {
        Some(path) => ConversionOptions::from_json_file(path)?,
        None => ConversionOptions::default(),
    };

    let plot = load(input).with_context(|| format!("loading {}", input))?;
    info!(
        "Header: units={:?} grid={:?} start={}",
        plot.header.unit_system,
        plot.header.dimensions(),
        plot.header.start_date()?
    );
    let times = unique_times(&plot);
    if let (Some(first), Some(last)) = (times.first(), times.last()) {
        info!(
            "{} timesteps, {} distinct times from day {} to {}",
            unique_timesteps(&plot).len(),
            times.len(),
            first,
            last
        );
    }

    let (summary, report): (SummaryDataset, _) =
        build_summary(case, &plot, KeywordMapper::field_defaults(), &options)?;

    for diagnostic in &report.diagnostics {
        warn!("{}", diagnostic);
    }
    for keyword in summary.keywords() {
        info!("  {} [{}]", keyword, summary.unit(keyword).unwrap_or(""));
    }

    let output = format!("{}.json", case);
    summary.write_json(&output)?;
    info!(
        "Wrote {} keywords over {} timesteps to {}",
        report.nodes, report.timesteps, output
    );

    Ok(())
}
