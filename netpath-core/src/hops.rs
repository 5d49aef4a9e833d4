// Decoding of the serialized per-row hop list

use crate::error::{GraphError, Result};
use crate::model::{NodeRef, NodeType};
use crate::registry::{NodeInput, NodeRegistry};
use regex::Regex;
use tracing::warn;

lazy_static::lazy_static! {
    static ref HOP_TUPLE: Regex = Regex::new(
        r"\{?(\d+),(.+),([\.\d]+),(\d+),(\d+)\}?"
    ).unwrap();
}

/// One `{node_id,node_type,ip_address,in_snmp,out_snmp}` tuple
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HopTuple {
    pub node_id: String,
    pub node_type: String,
    pub address: String,
    pub in_snmp: String,
    pub out_snmp: String,
}

impl HopTuple {
    pub fn into_input(self) -> NodeInput {
        NodeInput::ByTuple {
            node_id: self.node_id,
            node_type: NodeType::parse(&self.node_type),
            name: self.address,
            if_in: self.in_snmp.as_str().into(),
            if_out: self.out_snmp.as_str().into(),
        }
    }
}

pub fn parse_hop(segment: &str) -> Result<HopTuple> {
    let caps = HOP_TUPLE
        .captures(segment)
        .ok_or_else(|| GraphError::MalformedHopRecord(segment.to_string()))?;

    Ok(HopTuple {
        node_id: caps[1].to_string(),
        node_type: caps[2].to_string(),
        address: caps[3].to_string(),
        in_snmp: caps[4].to_string(),
        out_snmp: caps[5].to_string(),
    })
}

/// Split a raw hop list into tuples in source-to-destination order.
///
/// The search writes hops tail first, so the split list is reversed. Segments
/// that do not match are logged and skipped.
pub fn parse_hop_tuples(raw: &str) -> Vec<HopTuple> {
    if raw.trim().is_empty() {
        return Vec::new();
    }

    raw.rsplit("}{")
        .filter_map(|segment| match parse_hop(segment) {
            Ok(tuple) => Some(tuple),
            Err(e) => {
                warn!("Skipping hop: {}", e);
                None
            }
        })
        .collect()
}

/// Parse a raw hop list and register every hop node.
pub fn parse_hops(raw: &str, registry: &mut NodeRegistry) -> Vec<NodeRef> {
    parse_hop_tuples(raw)
        .into_iter()
        .map(|tuple| registry.create_or_get(tuple.into_input()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hop_single_wrapped() {
        let tuple = parse_hop("[{3232251700,device,192.168.63.52,14,13}]").unwrap();
        assert_eq!(
            tuple,
            HopTuple {
                node_id: "3232251700".to_string(),
                node_type: "device".to_string(),
                address: "192.168.63.52".to_string(),
                in_snmp: "14".to_string(),
                out_snmp: "13".to_string(),
            }
        );
    }

    #[test]
    fn test_parse_hop_rejects_short_tuple() {
        assert_eq!(
            parse_hop("{1,device,bad}"),
            Err(GraphError::MalformedHopRecord("{1,device,bad}".to_string()))
        );
    }

    #[test]
    fn test_tuples_are_reversed() {
        let tuples = parse_hop_tuples("{1,device,10.1.1.1,3,4}{2,tor,10.1.1.2,5,6}");
        let addresses: Vec<&str> = tuples.iter().map(|t| t.address.as_str()).collect();
        assert_eq!(addresses, vec!["10.1.1.2", "10.1.1.1"]);
        assert_eq!(tuples[0].node_type, "tor");
    }

    #[test]
    fn test_bad_segment_does_not_abort() {
        let tuples = parse_hop_tuples("{1,device,10.1.1.1,3,4}{2,device,bad}{3,tor,10.1.1.3,5,6}");
        let addresses: Vec<&str> = tuples.iter().map(|t| t.address.as_str()).collect();
        assert_eq!(addresses, vec!["10.1.1.3", "10.1.1.1"]);
    }

    #[test]
    fn test_blank_hop_list() {
        assert!(parse_hop_tuples("").is_empty());
        assert!(parse_hop_tuples("  ").is_empty());
    }

    #[test]
    fn test_parse_hops_registers_nodes() {
        let mut registry = NodeRegistry::new();
        let hops = parse_hops("{1,device,10.1.1.1,3,4}{2,tor,10.1.1.2,5,6}", &mut registry);

        assert_eq!(hops.len(), 2);
        assert_eq!(registry.node(hops[0]).name, "10.1.1.2");
        assert_eq!(registry.node(hops[0]).node_type, NodeType::Tor);
        assert_eq!(registry.node(hops[0]).node_id, "n_2");
        assert_eq!(registry.node(hops[0]).if_in, vec!["5"]);
        assert_eq!(registry.node(hops[1]).name, "10.1.1.1");
        assert_eq!(registry.node(hops[1]).node_type, NodeType::Device);
    }
}
