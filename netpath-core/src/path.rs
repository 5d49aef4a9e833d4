use crate::hops::parse_hops;
use crate::model::{NodeRef, NodeType, PathRole};
use crate::registry::{NodeInput, NodeRegistry};
use netpath_search::PathRecord;

/// A source-to-destination walk through canonical nodes
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Path {
    pub nodes: Vec<NodeRef>,
    /// Intermediate devices only, excluding endpoints and their hosts
    pub hops: Vec<NodeRef>,
    pub resolved: bool,
    pub backward: bool,
    pub src: Option<NodeRef>,
    pub src_host: Option<NodeRef>,
    pub dst: Option<NodeRef>,
    pub dst_host: Option<NodeRef>,
}

impl Path {
    pub fn new(resolved: bool, backward: bool) -> Self {
        Self {
            resolved,
            backward,
            ..Default::default()
        }
    }

    /// Append a node in the given role. A node already on the path is not
    /// added twice, though an endpoint role still points at it.
    pub fn append_node(&mut self, node: NodeRef, role: PathRole) {
        match role {
            PathRole::Src => self.src = Some(node),
            PathRole::SrcHost => self.src_host = Some(node),
            PathRole::Dst => self.dst = Some(node),
            PathRole::DstHost => self.dst_host = Some(node),
            PathRole::Hop => {}
        }

        // Handles are canonical per name, so this is the name check.
        if self.nodes.contains(&node) {
            return;
        }

        if role == PathRole::Hop {
            self.hops.push(node);
        }
        self.nodes.push(node);
    }

    /// True when any node on the path is a physical device.
    pub fn is_physical(&self, registry: &NodeRegistry) -> bool {
        self.nodes
            .iter()
            .any(|node| registry.node(*node).is_physical())
    }

    pub fn contains_type(&self, registry: &NodeRegistry, node_type: NodeType) -> bool {
        self.nodes
            .iter()
            .any(|node| registry.node(*node).node_type == node_type)
    }
}

/// Build the path for one search row: src, src host, hops, dst host, dst.
pub fn build_path(record: &PathRecord, registry: &mut NodeRegistry) -> Path {
    let mut path = Path::new(record.is_resolved(), record.is_backward());

    let src_type = NodeType::parse(&record.src_type);
    let src_title = endpoint_title(src_type, &record.src_vm_name, &record.src_name);
    let src = registry.create_or_get(NodeInput::endpoint(src_type, &record.src_ip, src_title));
    path.append_node(src, PathRole::Src);

    if let Some(host_ip) = record.src_vhost() {
        let host = registry.create_or_get(NodeInput::endpoint(
            NodeType::VmHost,
            host_ip,
            &record.src_vhost_name,
        ));
        path.append_node(host, PathRole::SrcHost);
    }

    for hop in parse_hops(&record.nodes, registry) {
        path.append_node(hop, PathRole::Hop);
    }

    if let Some(host_ip) = record.dest_vhost() {
        let host = registry.create_or_get(NodeInput::endpoint(
            NodeType::VmHost,
            host_ip,
            &record.dest_vhost_name,
        ));
        path.append_node(host, PathRole::DstHost);
    }

    let dest_type = NodeType::parse(&record.dest_type);
    let dest_title = endpoint_title(dest_type, &record.dest_vm_name, &record.dest_name);
    let dst = registry.create_or_get(NodeInput::endpoint(dest_type, &record.dest_ip, dest_title));
    path.append_node(dst, PathRole::Dst);

    path
}

fn endpoint_title<'a>(node_type: NodeType, vm_name: &'a str, name: &'a str) -> &'a str {
    if node_type.is_vm() { vm_name } else { name }
}

/// Parse a byte count the way the search front end does: leading base-10
/// digits, anything unparseable counting as zero. Counts too large for a
/// `u64` saturate.
pub fn parse_traffic_bytes(raw: &str) -> u64 {
    let raw = raw.trim_start();
    let raw = raw.strip_prefix('+').unwrap_or(raw);
    let digits = raw.bytes().take_while(|b| b.is_ascii_digit()).count();
    if digits == 0 {
        return 0;
    }
    raw[..digits].parse::<u64>().unwrap_or(u64::MAX)
}
