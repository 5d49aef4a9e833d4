// Report generation from a reconstructed path graph

use crate::context::{LinkView, PathGraph, PathView, TrafficTotals};
use crate::health::{DeviceHealth, HealthGrade};
use crate::model::Node;
use crate::vds::VdsPruneReport;
use netpath_search::SearchCriteria;
use petgraph::dot::{Config, Dot};
use petgraph::graph::{DiGraph, NodeIndex};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::fs::File;
use std::io::Write;
use std::path::Path;

const HEAVY_RULE: &str = "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n";
const LIGHT_RULE: &str = "────────────────────────────────────────────────────────────────────────────────\n";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ReportFormat {
    Text,
    Json,
    Csv,
    Markdown,
    Dot,
}

impl ReportFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "text" => Some(ReportFormat::Text),
            "json" => Some(ReportFormat::Json),
            "csv" => Some(ReportFormat::Csv),
            "markdown" | "md" => Some(ReportFormat::Markdown),
            "dot" | "graphviz" => Some(ReportFormat::Dot),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct NodeEntry {
    #[serde(flatten)]
    pub node: Node,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub health: Option<HealthGrade>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub criteria: Option<SearchCriteria>,
    pub rows: usize,
    pub traffic: TrafficTotals,
    pub nodes: Vec<NodeEntry>,
    pub links: Vec<LinkView>,
    pub paths: Vec<PathView>,
    pub vds: VdsPruneReport,
}

pub fn gather_report_data(
    graph: &PathGraph,
    health: Option<&BTreeMap<String, DeviceHealth>>,
) -> ReportData {
    let nodes = graph
        .nodes()
        .map(|node| NodeEntry {
            node: node.clone(),
            health: health.map(|devices| {
                devices
                    .get(&node.name)
                    .map(DeviceHealth::grade)
                    .unwrap_or(HealthGrade::Unknown)
            }),
        })
        .collect();

    ReportData {
        criteria: graph.criteria.clone(),
        rows: graph.rows,
        traffic: graph.traffic,
        nodes,
        links: graph.link_views(),
        paths: graph.path_views(),
        vds: graph.vds.clone(),
    }
}

pub fn generate_report(data: &ReportData, format: ReportFormat) -> Result<String, serde_json::Error> {
    match format {
        ReportFormat::Text => Ok(generate_text_report(data)),
        ReportFormat::Json => generate_json_report(data),
        ReportFormat::Csv => Ok(generate_csv_report(data)),
        ReportFormat::Markdown => Ok(generate_markdown_report(data)),
        ReportFormat::Dot => Ok(generate_dot_report(data)),
    }
}

pub fn generate_text_report(data: &ReportData) -> String {
    let mut report = String::new();

    report.push_str(HEAVY_RULE);
    report.push_str("                          NETPATH PATH REPORT\n");
    report.push_str(HEAVY_RULE);
    report.push('\n');

    if let Some(ref criteria) = data.criteria {
        report.push_str(&format!("Source:       {}\n", criteria.src_ip));
        report.push_str(&format!("Destination:  {}\n", criteria.dest_ip));
        report.push_str(&format!("Direction:    {}\n", criteria.direction));
        report.push_str(&format!("Time Range:   {} to {}\n", criteria.earliest, criteria.latest));
    }
    report.push_str(&format!("Rows:         {}\n", data.rows));
    report.push_str(&format!("Nodes:        {}\n", data.nodes.len()));
    report.push_str(&format!("Links:        {}\n", data.links.len()));
    report.push_str(&format!("Paths:        {}\n", data.paths.len()));
    report.push_str(&format!("Traffic A→B:  {}\n", data.traffic_label(true)));
    report.push_str(&format!("Traffic B→A:  {}\n", data.traffic_label(false)));
    report.push('\n');

    if data.paths.is_empty() {
        report.push_str("No paths found.\n\n");
    } else {
        report.push_str(HEAVY_RULE);
        report.push_str("PATHS\n");
        report.push_str(HEAVY_RULE);
        report.push('\n');

        for (idx, path) in data.paths.iter().enumerate() {
            report.push_str(&format!(
                "[{}] {} {}\n",
                idx + 1,
                if path.backward { "B→A" } else { "A→B" },
                if path.resolved { "resolved" } else { "unresolved" }
            ));
            report.push_str(&format!("    {}\n\n", path.nodes.join(" → ")));
        }

        report.push_str(HEAVY_RULE);
        report.push_str("NODES\n");
        report.push_str(HEAVY_RULE);
        report.push('\n');

        for entry in &data.nodes {
            let node = &entry.node;
            let mut line = format!("  {:<24} {:<9}", node.name, node.node_type.as_str());
            if !node.title.is_empty() {
                line.push_str(&format!(" {}", node.title));
            }
            if !node.if_in.is_empty() || !node.if_out.is_empty() {
                line.push_str(&format!(
                    "  in[{}] out[{}]",
                    node.if_in.join(","),
                    node.if_out.join(",")
                ));
            }
            if let Some(grade) = entry.health {
                line.push_str(&format!("  ({})", grade));
            }
            report.push_str(line.trim_end());
            report.push('\n');
        }
        report.push('\n');

        report.push_str(HEAVY_RULE);
        report.push_str("LINKS\n");
        report.push_str(HEAVY_RULE);
        report.push('\n');

        for link in &data.links {
            let status = if link.effective_resolved { "✓" } else { "?" };
            report.push_str(&format!("  {} {} → {}\n", status, link.source, link.target));
        }
        report.push('\n');
    }

    if !data.vds.removed.is_empty() {
        report.push_str(LIGHT_RULE);
        report.push_str(&format!(
            "VDS placeholders pruned: {}\n",
            data.vds.removed.join(", ")
        ));
    }

    report.push_str(HEAVY_RULE);
    report.push_str("                             End of Report\n");
    report.push_str(HEAVY_RULE);

    report
}

pub fn generate_json_report(data: &ReportData) -> Result<String, serde_json::Error> {
    let json_report = serde_json::json!({
        "report": {
            "metadata": {
                "generator": "netpath",
                "version": env!("CARGO_PKG_VERSION"),
                "generated_at": chrono::Utc::now().to_rfc3339(),
                "format": "json"
            },
            "criteria": data.criteria,
            "summary": {
                "rows": data.rows,
                "total_nodes": data.nodes.len(),
                "total_links": data.links.len(),
                "total_paths": data.paths.len(),
                "traffic": {
                    "forward_bytes": data.traffic.forward_bytes,
                    "backward_bytes": data.traffic.backward_bytes,
                    "forward": format_bytes(data.traffic.forward_bytes),
                    "backward": format_bytes(data.traffic.backward_bytes)
                }
            },
            "nodes": data.nodes,
            "links": data.links,
            "paths": data.paths,
            "vds": data.vds
        }
    });

    serde_json::to_string_pretty(&json_report)
}

/// One row per link.
pub fn generate_csv_report(data: &ReportData) -> String {
    let mut csv = String::from("source,source_type,target,target_type,resolved,effective_resolved\n");
    for link in &data.links {
        csv.push_str(&format!(
            "{},{},{},{},{},{}\n",
            csv_field(&link.source),
            link.source_type,
            csv_field(&link.target),
            link.target_type,
            link.resolved,
            link.effective_resolved
        ));
    }
    csv
}

pub fn generate_markdown_report(data: &ReportData) -> String {
    let mut md = String::from("# Path Report\n\n");

    if let Some(ref criteria) = data.criteria {
        md.push_str(&format!(
            "**{}** → **{}** ({}, {} to {})\n\n",
            criteria.src_ip, criteria.dest_ip, criteria.direction, criteria.earliest, criteria.latest
        ));
    }

    md.push_str("| Metric | Value |\n|---|---|\n");
    md.push_str(&format!("| Rows | {} |\n", data.rows));
    md.push_str(&format!("| Nodes | {} |\n", data.nodes.len()));
    md.push_str(&format!("| Links | {} |\n", data.links.len()));
    md.push_str(&format!("| Paths | {} |\n", data.paths.len()));
    md.push_str(&format!("| Traffic A→B | {} |\n", data.traffic_label(true)));
    md.push_str(&format!("| Traffic B→A | {} |\n\n", data.traffic_label(false)));

    if !data.paths.is_empty() {
        md.push_str("## Paths\n\n");
        for (idx, path) in data.paths.iter().enumerate() {
            md.push_str(&format!(
                "{}. `{}`{}\n",
                idx + 1,
                path.nodes.join(" → "),
                if path.resolved { "" } else { " *(unresolved)*" }
            ));
        }
        md.push('\n');

        md.push_str("## Nodes\n\n| Name | Type | Title | Health |\n|---|---|---|---|\n");
        for entry in &data.nodes {
            md.push_str(&format!(
                "| {} | {} | {} | {} |\n",
                entry.node.name,
                entry.node.node_type,
                entry.node.title,
                entry.health.map(|g| g.as_str()).unwrap_or("")
            ));
        }
        md.push('\n');
    }

    md
}

/// Graphviz rendering of the node/link graph.
pub fn generate_dot_report(data: &ReportData) -> String {
    let mut graph: DiGraph<String, bool> = DiGraph::new();
    let mut indices: HashMap<&str, NodeIndex> = HashMap::new();

    for entry in &data.nodes {
        let idx = graph.add_node(format!("{} ({})", entry.node.name, entry.node.node_type));
        indices.insert(entry.node.name.as_str(), idx);
    }

    for link in &data.links {
        if let (Some(&source), Some(&target)) = (
            indices.get(link.source.as_str()),
            indices.get(link.target.as_str()),
        ) {
            graph.add_edge(source, target, link.effective_resolved);
        }
    }

    let dot = Dot::with_attr_getters(
        &graph,
        &[Config::EdgeNoLabel],
        &|_, edge| {
            if *edge.weight() {
                "color=green".to_string()
            } else {
                "color=gray, style=dashed".to_string()
            }
        },
        &|_, _| String::new(),
    );

    format!("{}", dot)
}

pub fn save_report(content: &str, path: &Path) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(content.as_bytes())?;
    Ok(())
}

/// Human-readable byte count using binary units, at most two decimals.
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: [&str; 9] = ["bytes", "KB", "MB", "GB", "TB", "PB", "EB", "ZB", "YB"];

    let exponent = if bytes < 2 {
        0
    } else {
        63 - bytes.leading_zeros() as usize
    };
    let unit = (exponent / 10).min(UNITS.len() - 1);
    let value = bytes as f64 / 2f64.powi(10 * unit as i32);

    let plain = format!("{}", value);
    let fixed = format!("{:.2}", value);
    let shown = if plain.len() > fixed.len() { fixed } else { plain };

    format!("{} {}", shown, UNITS[unit])
}

impl ReportData {
    fn traffic_label(&self, forward: bool) -> String {
        let shown = self.criteria.as_ref().is_none_or(|criteria| {
            if forward {
                criteria.direction.shows_forward_traffic()
            } else {
                criteria.direction.shows_backward_traffic()
            }
        });

        let bytes = if forward {
            self.traffic.forward_bytes
        } else {
            self.traffic.backward_bytes
        };

        if shown {
            format_bytes(bytes)
        } else {
            format!("{} (not searched)", format_bytes(bytes))
        }
    }
}

fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
