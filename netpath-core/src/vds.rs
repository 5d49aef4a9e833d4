// Removing virtual distributed switch placeholders from physical paths

use crate::model::NodeType;
use crate::path::Path;
use crate::registry::NodeRegistry;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct VdsPruneReport {
    /// VDS names dropped from the registry
    pub removed: Vec<String>,
    /// VDS names some purely virtual path still needs
    pub kept: Vec<String>,
}

/// Strip VDS nodes from every path that also crosses a physical device.
///
/// A VDS name leaves the registry only if no virtual path kept it. A keep
/// mark is final; a later remove mark for the same name is ignored.
pub fn remove_vds_from_paths(paths: &mut [Path], registry: &mut NodeRegistry) -> VdsPruneReport {
    // name -> remove?
    let mut marks: BTreeMap<String, bool> = BTreeMap::new();

    for path in paths.iter_mut() {
        let is_physical = path.is_physical(registry);

        let vds_nodes: Vec<_> = path
            .nodes
            .iter()
            .copied()
            .filter(|node| registry.node(*node).node_type == NodeType::Vds)
            .collect();

        for vds in vds_nodes {
            let name = registry.node(vds).name.clone();
            if is_physical {
                path.nodes.retain(|node| *node != vds);
                path.hops.retain(|node| *node != vds);
                marks.entry(name).or_insert(true);
            } else {
                marks.insert(name, false);
            }
        }
    }

    let mut report = VdsPruneReport::default();
    for (name, remove) in marks {
        if remove {
            debug!("Removing VDS node {}", name);
            registry.remove(&name);
            report.removed.push(name);
        } else {
            report.kept.push(name);
        }
    }
    report
}
