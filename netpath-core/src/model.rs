use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeType {
    Host,
    Phost,
    Vm,
    VmVxlan,
    VmHost,
    Vtep,
    Vds,
    Tor,
    Device,
    Pdevice,
    As,
    External,
    Unknown,
}

impl NodeType {
    /// Parse a type as the search emits it. Unrecognised types become `Unknown`.
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "host" => NodeType::Host,
            "phost" => NodeType::Phost,
            "vm" => NodeType::Vm,
            "vm_vxlan" | "vm-vxlan" => NodeType::VmVxlan,
            "vm_host" => NodeType::VmHost,
            "vtep" => NodeType::Vtep,
            "vds" => NodeType::Vds,
            "tor" => NodeType::Tor,
            "device" => NodeType::Device,
            "pdevice" => NodeType::Pdevice,
            "as" => NodeType::As,
            "external" => NodeType::External,
            _ => NodeType::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            NodeType::Host => "host",
            NodeType::Phost => "phost",
            NodeType::Vm => "vm",
            NodeType::VmVxlan => "vm_vxlan",
            NodeType::VmHost => "vm_host",
            NodeType::Vtep => "vtep",
            NodeType::Vds => "vds",
            NodeType::Tor => "tor",
            NodeType::Device => "device",
            NodeType::Pdevice => "pdevice",
            NodeType::As => "as",
            NodeType::External => "external",
            NodeType::Unknown => "unknown",
        }
    }

    pub fn is_vm(&self) -> bool {
        matches!(self, NodeType::Vm | NodeType::VmVxlan)
    }

    /// VMs and virtual switches; everything else is a physical device.
    pub fn is_virtual(&self) -> bool {
        matches!(self, NodeType::Vm | NodeType::VmVxlan | NodeType::Vds)
    }

    /// Types that may replace a previously recorded type for the same node.
    /// A VM first seen as a physical host, or a ToR first seen as a generic
    /// device, is corrected once the specific hop shows up.
    pub fn is_upgrade_target(&self) -> bool {
        matches!(self, NodeType::Vm | NodeType::VmVxlan | NodeType::Tor)
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Handle to a canonical node owned by a [`crate::registry::NodeRegistry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeRef(pub(crate) usize);

impl NodeRef {
    pub fn index(&self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub node_id: String,
    #[serde(rename = "type")]
    pub node_type: NodeType,
    pub name: String,
    pub title: String,
    pub if_in: Vec<String>,
    pub if_out: Vec<String>,
}

impl Node {
    pub fn is_physical(&self) -> bool {
        !self.node_type.is_virtual()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub source: NodeRef,
    pub target: NodeRef,
    /// Resolution observed on the paths; see `Link::effective_resolution`.
    pub resolved: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathRole {
    Src,
    SrcHost,
    Hop,
    DstHost,
    Dst,
}
