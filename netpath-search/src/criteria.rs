use crate::error::{Result, SearchError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;

pub const DEFAULT_EARLIEST: &str = "-60m@m";
pub const DEFAULT_LATEST: &str = "now";

const PATH_MONO_DIRECTED_MACRO: &str = "netops_path_mono_directed";
const PATH_BI_DIRECTED_MACRO: &str = "netops_path_bi_directed";
const HEALTH_MACRO: &str = "netops_path_get_health";

/// Which way the path search should follow traffic between two endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Direction {
    Forward,
    Backward,
    BiDirected,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Forward => "forward",
            Direction::Backward => "backward",
            Direction::BiDirected => "bi-directed",
        }
    }

    /// Whether the A->B traffic total is meaningful for this direction.
    pub fn shows_forward_traffic(&self) -> bool {
        !matches!(self, Direction::Backward)
    }

    /// Whether the B->A traffic total is meaningful for this direction.
    pub fn shows_backward_traffic(&self) -> bool {
        !matches!(self, Direction::Forward)
    }
}

impl FromStr for Direction {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "forward" => Ok(Direction::Forward),
            "backward" => Ok(Direction::Backward),
            "bi-directed" | "bidirected" | "both" => Ok(Direction::BiDirected),
            other => Err(SearchError::InvalidDirection(other.to_string())),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The endpoints and time range a path search was run for
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchCriteria {
    pub src_ip: String,
    pub dest_ip: String,
    pub direction: Direction,
    pub earliest: String,
    pub latest: String,
}

impl SearchCriteria {
    pub fn new(src_ip: &str, dest_ip: &str, direction: Direction) -> Result<Self> {
        for ip in [src_ip, dest_ip] {
            if ip.trim().parse::<Ipv4Addr>().is_err() {
                return Err(SearchError::InvalidCriteria(format!(
                    "'{}' is not an IPv4 address",
                    ip
                )));
            }
        }

        Ok(Self {
            src_ip: src_ip.trim().to_string(),
            dest_ip: dest_ip.trim().to_string(),
            direction,
            earliest: DEFAULT_EARLIEST.to_string(),
            latest: DEFAULT_LATEST.to_string(),
        })
    }

    pub fn with_time_range(mut self, earliest: &str, latest: &str) -> Self {
        self.earliest = earliest.to_string();
        self.latest = latest.to_string();
        self
    }

    /// The endpoints as the search macro expects them. A backward search
    /// follows traffic from the destination, so the tokens are swapped.
    pub fn search_endpoints(&self) -> (&str, &str) {
        match self.direction {
            Direction::Backward => (&self.dest_ip, &self.src_ip),
            _ => (&self.src_ip, &self.dest_ip),
        }
    }

    pub fn path_query(&self) -> String {
        let (src, dest) = self.search_endpoints();
        match self.direction {
            Direction::BiDirected => {
                format!("`{}(\"{}\", \"{}\")`", PATH_BI_DIRECTED_MACRO, src, dest)
            }
            direction => format!(
                "`{}(\"{}\", \"{}\", \"{}\")`",
                PATH_MONO_DIRECTED_MACRO, src, dest, direction
            ),
        }
    }
}

/// Build the health search for a `device="a" OR device="b"` filter.
pub fn health_query(device_filter: &str) -> String {
    format!("`{}(\"{}\")`", HEALTH_MACRO, device_filter.replace('"', "\\\""))
}
