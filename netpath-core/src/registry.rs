use crate::address::classify_ipv4;
use crate::model::{Node, NodeRef, NodeType};
use std::collections::HashMap;
use tracing::{debug, trace};

const UNKNOWN_TITLE: &str = "unknown";
const VDS_SUFFIX: &str = " (VDS)";

/// Interface identifiers as a record carries them: absent, one, or several.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Interfaces {
    #[default]
    None,
    One(String),
    Many(Vec<String>),
}

impl Interfaces {
    pub fn into_vec(self) -> Vec<String> {
        let values = match self {
            Interfaces::None => Vec::new(),
            Interfaces::One(value) => vec![value],
            Interfaces::Many(values) => values,
        };
        values.into_iter().filter(|v| !v.is_empty()).collect()
    }
}

impl From<&str> for Interfaces {
    fn from(value: &str) -> Self {
        Interfaces::One(value.to_string())
    }
}

impl From<Vec<String>> for Interfaces {
    fn from(values: Vec<String>) -> Self {
        Interfaces::Many(values)
    }
}

/// The two shapes a node observation arrives in.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeInput {
    /// Flat endpoint record from the row's own fields.
    ByFields {
        node_type: NodeType,
        name: String,
        title: Option<String>,
        if_in: Interfaces,
        if_out: Interfaces,
    },
    /// Positional `{node_id,type,ip,in,out}` tuple from the hop list.
    ByTuple {
        node_id: String,
        node_type: NodeType,
        name: String,
        if_in: Interfaces,
        if_out: Interfaces,
    },
}

impl NodeInput {
    pub fn endpoint(node_type: NodeType, name: &str, title: &str) -> Self {
        NodeInput::ByFields {
            node_type,
            name: name.to_string(),
            title: Some(title.to_string()),
            if_in: Interfaces::None,
            if_out: Interfaces::None,
        }
    }
}

/// Owns the one canonical [`Node`] per name for a reconstruction run.
///
/// Nodes live in an arena and are addressed by [`NodeRef`]; a removed node
/// keeps its slot so refs held by paths stay valid, but it no longer counts
/// as registered.
#[derive(Debug, Default)]
pub struct NodeRegistry {
    nodes: Vec<Node>,
    index: HashMap<String, NodeRef>,
    next_seq: u64,
}

impl NodeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an observation and return the canonical node for its name.
    pub fn create_or_get(&mut self, input: NodeInput) -> NodeRef {
        let (node_id, node_type, name, title, if_in, if_out) = match input {
            NodeInput::ByFields {
                node_type,
                name,
                title,
                if_in,
                if_out,
            } => (None, node_type, name, title.unwrap_or_default(), if_in, if_out),
            NodeInput::ByTuple {
                node_id,
                node_type,
                name,
                if_in,
                if_out,
            } => (Some(node_id), node_type, name, String::new(), if_in, if_out),
        };

        let node_type = effective_type(&name, node_type);
        let name = if node_type == NodeType::Vds {
            format!("{}{}", name, VDS_SUFFIX)
        } else {
            name
        };
        let title = if title == UNKNOWN_TITLE {
            String::new()
        } else {
            title
        };
        let if_in = if_in.into_vec();
        let if_out = if_out.into_vec();

        if let Some(&existing) = self.index.get(&name) {
            let node = &mut self.nodes[existing.0];

            if node.node_type != node_type && node_type.is_upgrade_target() {
                debug!(
                    "Node {} reclassified from {} to {}",
                    node.name, node.node_type, node_type
                );
                node.node_type = node_type;
            }

            merge_unique(&mut node.if_in, if_in);
            merge_unique(&mut node.if_out, if_out);
            return existing;
        }

        let node_id = match node_id {
            Some(id) => format!("n_{}", id),
            None => {
                self.next_seq += 1;
                format!("n_{}", self.next_seq)
            }
        };

        trace!("Registering node {} ({})", name, node_type);
        let node_ref = NodeRef(self.nodes.len());
        self.index.insert(name.clone(), node_ref);
        self.nodes.push(Node {
            node_id,
            node_type,
            name,
            title,
            if_in,
            if_out,
        });
        node_ref
    }

    pub fn get(&self, name: &str) -> Option<NodeRef> {
        self.index.get(name).copied()
    }

    /// Look up a node by handle. Handles stay valid after removal.
    pub fn node(&self, node_ref: NodeRef) -> &Node {
        &self.nodes[node_ref.0]
    }

    pub fn contains(&self, node_ref: NodeRef) -> bool {
        self.index.get(&self.nodes[node_ref.0].name) == Some(&node_ref)
    }

    /// Drop a name from the registry. Returns the handle it pointed to.
    pub fn remove(&mut self, name: &str) -> Option<NodeRef> {
        self.index.remove(name)
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Registered nodes in first-seen order.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeRef, &Node)> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .map(|(idx, node)| (NodeRef(idx), node))
            .filter(|(node_ref, _)| self.contains(*node_ref))
    }
}

/// A routable IPv4 name makes the node external whatever the record says.
fn effective_type(name: &str, declared: NodeType) -> NodeType {
    match classify_ipv4(name) {
        Ok(class) if class.is_external() => NodeType::External,
        Ok(_) => declared,
        Err(e) => {
            debug!("Keeping declared type {} for {}: {}", declared, name, e);
            declared
        }
    }
}

fn merge_unique(target: &mut Vec<String>, values: Vec<String>) {
    for value in values {
        if !target.contains(&value) {
            target.push(value);
        }
    }
}
