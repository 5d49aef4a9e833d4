// Directed links between consecutive path nodes

use crate::model::{Link, NodeRef, NodeType};
use crate::path::Path;
use crate::registry::NodeRegistry;
use std::collections::HashMap;

impl Link {
    /// Resolution as it should be displayed. Some type pairs have a fixed
    /// answer whatever the paths reported.
    pub fn effective_resolution(&self, registry: &NodeRegistry) -> bool {
        let source = registry.node(self.source).node_type;
        let target = registry.node(self.target).node_type;

        if source == NodeType::VmHost && target == NodeType::VmHost {
            return false;
        }

        if (source.is_vm() && target == NodeType::VmHost)
            || (target.is_vm() && source == NodeType::VmHost)
        {
            return true;
        }

        if source == NodeType::External || target == NodeType::External {
            return false;
        }

        self.resolved
    }
}

/// Derive deduplicated links from every path. A link is resolved if any path
/// through it was.
pub fn register_links(paths: &[Path]) -> Vec<Link> {
    let mut links: Vec<Link> = Vec::new();
    let mut index: HashMap<(NodeRef, NodeRef), usize> = HashMap::new();

    for path in paths {
        for pair in path.nodes.windows(2) {
            let (source, target) = (pair[0], pair[1]);
            if source == target {
                continue;
            }

            match index.get(&(source, target)) {
                Some(&idx) => {
                    if path.resolved {
                        links[idx].resolved = true;
                    }
                }
                None => {
                    index.insert((source, target), links.len());
                    links.push(Link {
                        source,
                        target,
                        resolved: path.resolved,
                    });
                }
            }
        }
    }

    links
}
