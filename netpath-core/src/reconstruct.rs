use crate::context::{PathGraph, ReconstructionContext};
use crate::dedup::PathRegistration;
use indicatif::{ProgressBar, ProgressStyle};
use netpath_search::{PathRecord, SearchCriteria};
use std::sync::Arc;
use tracing::info;

/// How often the progress callback hears about ingested rows
const PROGRESS_EVERY: usize = 500;

/// Options for configuring a reconstruction pass
#[derive(Debug, Clone, Default)]
pub struct ReconstructOptions {
    /// The search the rows came from, carried through to reports
    pub criteria: Option<SearchCriteria>,
    pub show_progress_bars: bool,
}

/// Callback for reporting reconstruction progress
pub type ReconstructProgressCallback = Arc<dyn Fn(String) + Send + Sync>;

/// Row outcome counts for one pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestSummary {
    pub appended: usize,
    pub replaced: usize,
    pub discarded: usize,
}

impl IngestSummary {
    fn record(&mut self, outcome: PathRegistration) {
        match outcome {
            PathRegistration::Appended(_) => self.appended += 1,
            PathRegistration::Replaced(_) => self.replaced += 1,
            PathRegistration::Discarded => self.discarded += 1,
        }
    }
}

/// Rebuild the path graph for one complete result set.
///
/// Every call starts from an empty context. An empty result set yields an
/// empty graph.
pub fn execute_reconstruction(
    records: &[PathRecord],
    options: ReconstructOptions,
    progress_callback: Option<ReconstructProgressCallback>,
) -> PathGraph {
    let ReconstructOptions {
        criteria,
        show_progress_bars,
    } = options;

    if records.is_empty() {
        info!("Empty result set, nothing to reconstruct");
        let mut graph = PathGraph::empty();
        graph.criteria = criteria;
        return graph;
    }

    let progress_bar = if show_progress_bars {
        let pb = ProgressBar::new(records.len() as u64);
        if let Ok(style) = ProgressStyle::default_bar().template("{spinner:.cyan} [{bar:40.cyan/blue}] {pos}/{len} rows {msg}") {
            pb.set_style(style);
        }
        Some(pb)
    } else {
        None
    };

    let mut context = ReconstructionContext::new();
    let mut summary = IngestSummary::default();

    for (idx, record) in records.iter().enumerate() {
        summary.record(context.ingest(record));

        if let Some(ref pb) = progress_bar {
            pb.inc(1);
        }

        if let Some(ref callback) = progress_callback
            && (idx + 1) % PROGRESS_EVERY == 0
        {
            callback(format!("Processed {}/{} rows", idx + 1, records.len()));
        }
    }

    if let Some(ref pb) = progress_bar {
        pb.finish_with_message(format!("{} paths", context.paths().len()));
    }

    info!(
        "Ingested {} rows: {} new paths, {} expanded, {} discarded",
        records.len(),
        summary.appended,
        summary.replaced,
        summary.discarded
    );

    let mut graph = context.finish();
    graph.criteria = criteria;

    if let Some(ref callback) = progress_callback {
        callback(format!(
            "Reconstructed {} nodes, {} links, {} paths",
            graph.registry().len(),
            graph.links.len(),
            graph.paths.len()
        ));
    }

    graph
}

/// Reconstruct without progress reporting or criteria.
pub fn reconstruct(records: &[PathRecord]) -> PathGraph {
    execute_reconstruction(records, ReconstructOptions::default(), None)
}
