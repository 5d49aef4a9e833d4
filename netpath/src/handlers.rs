use anyhow::{Context, Result, anyhow};
use clap::ArgMatches;
use colored::Colorize;
use netpath_core::health::{DeviceHealth, group_health, health_device_filter};
use netpath_core::report::{ReportFormat, gather_report_data, generate_report, save_report};
use netpath_core::{PathGraph, ReconstructOptions, ReconstructProgressCallback, execute_reconstruction};
use netpath_search::{
    Direction, SearchCriteria, health_query, load_health_records, load_path_records,
};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;
use tracing::{Level, info};

// Helper functions for the handlers

/// Expand a leading `~` in a user supplied path
pub fn expand_path(path: &Path) -> PathBuf {
    let raw = path.to_string_lossy();
    PathBuf::from(shellexpand::tilde(raw.as_ref()).as_ref())
}

/// Log level for the number of `-v` flags
pub fn log_level(verbosity: u8) -> Level {
    match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Build search criteria from optional endpoint arguments. No endpoints means
/// no criteria; a half-given pair is an error.
pub fn criteria_from_args(
    src: Option<&str>,
    dest: Option<&str>,
    direction: &str,
    earliest: Option<&str>,
    latest: Option<&str>,
) -> Result<Option<SearchCriteria>> {
    let (src, dest) = match (src, dest) {
        (None, None) => return Ok(None),
        (Some(src), Some(dest)) => (src, dest),
        _ => return Err(anyhow!("--src and --dest must be given together")),
    };

    let direction = Direction::from_str(direction)?;
    let mut criteria = SearchCriteria::new(src, dest, direction)?;
    if let (Some(earliest), Some(latest)) = (earliest, latest) {
        criteria = criteria.with_time_range(earliest, latest);
    }
    Ok(Some(criteria))
}

pub fn load_health(path: &Path) -> Result<BTreeMap<String, DeviceHealth>> {
    let rows = load_health_records(&expand_path(path))
        .with_context(|| format!("Failed to load health results from {}", path.display()))?;
    Ok(group_health(rows))
}

/// Load a result file and rebuild the graph from it
pub fn reconstruct_file(
    input: &Path,
    options: ReconstructOptions,
    progress_callback: Option<ReconstructProgressCallback>,
) -> Result<PathGraph> {
    let records = load_path_records(&expand_path(input))
        .with_context(|| format!("Failed to load search results from {}", input.display()))?;
    info!("Loaded {} rows from {}", records.len(), input.display());

    Ok(execute_reconstruction(&records, options, progress_callback))
}

/// Render the health grouping as text or JSON
pub fn render_health_summary(
    devices: &BTreeMap<String, DeviceHealth>,
    format: &str,
) -> Result<String> {
    if format == "json" {
        let summary: BTreeMap<&str, serde_json::Value> = devices
            .iter()
            .map(|(device, health)| {
                (
                    device.as_str(),
                    serde_json::json!({
                        "grade": health.grade(),
                        "info": health.info,
                        "interfaces": health.interfaces,
                    }),
                )
            })
            .collect();
        return Ok(serde_json::to_string_pretty(&summary)?);
    }

    let mut out = String::new();
    for (device, health) in devices {
        out.push_str(&format!(
            "{:<24} {:<9} {} interface(s)\n",
            device,
            health.grade().as_str(),
            health.interfaces.len()
        ));
    }
    if out.is_empty() {
        out.push_str("No devices found.\n");
    }
    Ok(out)
}

fn print_divider() {
    eprintln!("{}", "═".repeat(60).bright_blue().bold());
}

pub fn handle_reconstruct(sub_matches: &ArgMatches, quiet: bool) -> Result<()> {
    let input = sub_matches
        .get_one::<PathBuf>("input")
        .context("--input is required")?;
    let output = sub_matches.get_one::<PathBuf>("output");
    let format_str = sub_matches
        .get_one::<String>("format")
        .map(String::as_str)
        .unwrap_or("text");
    let format = ReportFormat::from_str(format_str)
        .ok_or_else(|| anyhow!("Unknown report format '{}'", format_str))?;
    let direction = sub_matches
        .get_one::<String>("direction")
        .map(String::as_str)
        .unwrap_or("forward");

    let criteria = criteria_from_args(
        sub_matches.get_one::<String>("src").map(String::as_str),
        sub_matches.get_one::<String>("dest").map(String::as_str),
        direction,
        None,
        None,
    )?;

    if !quiet {
        eprintln!("\n{} Reconstructing paths from {}", "→".bright_blue(), input.display());
        if let Some(ref criteria) = criteria {
            eprintln!("Search: {}", criteria.path_query());
        }
        eprintln!();
    }

    let show_progress_bars = sub_matches.get_flag("progress");
    let options = ReconstructOptions {
        criteria,
        show_progress_bars,
    };

    let progress_callback: Option<ReconstructProgressCallback> = if show_progress_bars {
        Some(Arc::new(|msg: String| {
            eprintln!("{} {}", "→".bright_blue(), msg);
        }))
    } else {
        None
    };

    let graph = reconstruct_file(input, options, progress_callback)?;

    if !graph.is_empty() {
        info!(
            "Health search for this graph: {}",
            health_query(&health_device_filter(&graph))
        );
    }

    let health = match sub_matches.get_one::<PathBuf>("health") {
        Some(path) => Some(load_health(path)?),
        None => None,
    };

    let data = gather_report_data(&graph, health.as_ref());
    let report = generate_report(&data, format).context("Failed to generate report")?;

    if !quiet {
        print_divider();
        eprintln!(
            "{} {} nodes, {} links, {} paths",
            "✓".green().bold(),
            data.nodes.len(),
            data.links.len(),
            data.paths.len()
        );
        print_divider();
    }

    match output {
        Some(path) => {
            let path = expand_path(path);
            save_report(&report, &path)
                .with_context(|| format!("Failed to save report to {}", path.display()))?;
            if !quiet {
                eprintln!("{} Report saved to {}", "✓".green().bold(), path.display());
            }
        }
        None => print!("{}", report),
    }

    Ok(())
}

pub fn handle_query(sub_matches: &ArgMatches) -> Result<()> {
    let criteria = criteria_from_args(
        sub_matches.get_one::<String>("src").map(String::as_str),
        sub_matches.get_one::<String>("dest").map(String::as_str),
        sub_matches
            .get_one::<String>("direction")
            .map(String::as_str)
            .unwrap_or("forward"),
        sub_matches.get_one::<String>("earliest").map(String::as_str),
        sub_matches.get_one::<String>("latest").map(String::as_str),
    )?
    .context("--src and --dest are required")?;

    println!("{}", criteria.path_query());
    info!("Time range: {} to {}", criteria.earliest, criteria.latest);
    Ok(())
}

pub fn handle_health(sub_matches: &ArgMatches, quiet: bool) -> Result<()> {
    let input = sub_matches
        .get_one::<PathBuf>("input")
        .context("--input is required")?;
    let format = sub_matches
        .get_one::<String>("format")
        .map(String::as_str)
        .unwrap_or("text");

    let devices = load_health(input)?;
    if !quiet {
        eprintln!("{} {} device(s) in {}", "✓".green().bold(), devices.len(), input.display());
    }

    print!("{}", render_health_summary(&devices, format)?);
    Ok(())
}
