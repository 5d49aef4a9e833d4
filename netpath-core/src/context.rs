use crate::dedup::{PathRegistration, register_path};
use crate::links::register_links;
use crate::model::{Link, Node, NodeRef, NodeType};
use crate::path::{Path, build_path, parse_traffic_bytes};
use crate::registry::NodeRegistry;
use crate::vds::{VdsPruneReport, remove_vds_from_paths};
use netpath_search::{PathRecord, SearchCriteria};
use serde::Serialize;
use tracing::debug;

/// Bytes seen in each direction across a batch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TrafficTotals {
    /// A -> B
    pub forward_bytes: u64,
    /// B -> A
    pub backward_bytes: u64,
}

impl TrafficTotals {
    pub fn add(&mut self, backward: bool, bytes: u64) {
        if backward {
            self.backward_bytes = self.backward_bytes.saturating_add(bytes);
        } else {
            self.forward_bytes = self.forward_bytes.saturating_add(bytes);
        }
    }
}

/// Per-batch reconstruction state. Create one per result set; nothing carries
/// over between batches.
#[derive(Debug, Default)]
pub struct ReconstructionContext {
    registry: NodeRegistry,
    paths: Vec<Path>,
    traffic: TrafficTotals,
    rows: usize,
}

impl ReconstructionContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the path for one row and merge it into the path set.
    pub fn ingest(&mut self, record: &PathRecord) -> PathRegistration {
        self.rows += 1;

        let path = build_path(record, &mut self.registry);
        self.traffic
            .add(path.backward, parse_traffic_bytes(&record.traffic));

        let outcome = register_path(&mut self.paths, path);
        debug!("Row {}: {:?}", self.rows, outcome);
        outcome
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn registry(&self) -> &NodeRegistry {
        &self.registry
    }

    pub fn paths(&self) -> &[Path] {
        &self.paths
    }

    pub fn traffic(&self) -> TrafficTotals {
        self.traffic
    }

    /// Prune VDS placeholders, derive links and hand back the graph.
    pub fn finish(mut self) -> PathGraph {
        let vds = remove_vds_from_paths(&mut self.paths, &mut self.registry);
        let links = register_links(&self.paths);

        debug!(
            "Reconstructed {} nodes, {} links, {} paths from {} rows",
            self.registry.len(),
            links.len(),
            self.paths.len(),
            self.rows
        );

        PathGraph {
            registry: self.registry,
            paths: self.paths,
            links,
            traffic: self.traffic,
            vds,
            rows: self.rows,
            criteria: None,
        }
    }
}

/// The reconstructed graph handed to the presentation layer
#[derive(Debug)]
pub struct PathGraph {
    registry: NodeRegistry,
    pub paths: Vec<Path>,
    pub links: Vec<Link>,
    pub traffic: TrafficTotals,
    pub vds: VdsPruneReport,
    pub rows: usize,
    pub criteria: Option<SearchCriteria>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkView {
    pub source: String,
    pub target: String,
    pub source_type: NodeType,
    pub target_type: NodeType,
    /// Resolution observed on the paths
    pub resolved: bool,
    /// Resolution after the type-pair overrides
    pub effective_resolved: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathView {
    pub resolved: bool,
    pub backward: bool,
    pub src: Option<String>,
    pub src_host: Option<String>,
    pub dst: Option<String>,
    pub dst_host: Option<String>,
    pub hops: Vec<String>,
    pub nodes: Vec<String>,
}

impl PathGraph {
    pub fn empty() -> Self {
        ReconstructionContext::new().finish()
    }

    pub fn registry(&self) -> &NodeRegistry {
        &self.registry
    }

    pub fn node(&self, node_ref: NodeRef) -> &Node {
        self.registry.node(node_ref)
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Node> + '_ {
        self.registry.nodes().map(|(_, node)| node)
    }

    pub fn node_by_name(&self, name: &str) -> Option<&Node> {
        self.registry.get(name).map(|r| self.registry.node(r))
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn link_view(&self, link: &Link) -> LinkView {
        let source = self.registry.node(link.source);
        let target = self.registry.node(link.target);
        LinkView {
            source: source.name.clone(),
            target: target.name.clone(),
            source_type: source.node_type,
            target_type: target.node_type,
            resolved: link.resolved,
            effective_resolved: link.effective_resolution(&self.registry),
        }
    }

    pub fn link_views(&self) -> Vec<LinkView> {
        self.links.iter().map(|link| self.link_view(link)).collect()
    }

    pub fn path_view(&self, path: &Path) -> PathView {
        let name = |node_ref: NodeRef| self.registry.node(node_ref).name.clone();
        PathView {
            resolved: path.resolved,
            backward: path.backward,
            src: path.src.map(name),
            src_host: path.src_host.map(name),
            dst: path.dst.map(name),
            dst_host: path.dst_host.map(name),
            hops: path.hops.iter().copied().map(name).collect(),
            nodes: path.nodes.iter().copied().map(name).collect(),
        }
    }

    pub fn path_views(&self) -> Vec<PathView> {
        self.paths.iter().map(|path| self.path_view(path)).collect()
    }

    /// Find a link by endpoint names.
    pub fn find_link(&self, source: &str, target: &str) -> Option<&Link> {
        let source = self.registry.get(source)?;
        let target = self.registry.get(target)?;
        self.links
            .iter()
            .find(|link| link.source == source && link.target == target)
    }
}
