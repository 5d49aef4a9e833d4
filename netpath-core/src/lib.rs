pub mod address;
pub mod context;
pub mod dedup;
pub mod error;
pub mod health;
pub mod hops;
pub mod links;
pub mod model;
pub mod path;
pub mod reconstruct;
pub mod registry;
pub mod report;
pub mod vds;

use colored::Colorize;

pub use context::{LinkView, PathGraph, PathView, ReconstructionContext, TrafficTotals};
pub use error::GraphError;
pub use health::{DeviceHealth, HealthGrade, group_health, health_device_filter};
pub use model::{Link, Node, NodeRef, NodeType};
pub use path::Path;
pub use reconstruct::{
    ReconstructOptions, ReconstructProgressCallback, execute_reconstruction, reconstruct,
};
pub use registry::{NodeInput, NodeRegistry};
pub use report::{ReportData, ReportFormat, format_bytes, gather_report_data};

pub fn print_banner() {
    let banner = r#"
    ███╗   ██╗███████╗████████╗██████╗  █████╗ ████████╗██╗  ██╗
    ████╗  ██║██╔════╝╚══██╔══╝██╔══██╗██╔══██╗╚══██╔══╝██║  ██║
    ██╔██╗ ██║█████╗     ██║   ██████╔╝███████║   ██║   ███████║
    ██║╚██╗██║██╔══╝     ██║   ██╔═══╝ ██╔══██║   ██║   ██╔══██║
    ██║ ╚████║███████╗   ██║   ██║     ██║  ██║   ██║   ██║  ██║
    ╚═╝  ╚═══╝╚══════╝   ╚═╝   ╚═╝     ╚═╝  ╚═╝   ╚═╝   ╚═╝  ╚═╝
"#;
    eprintln!("{}", banner.bright_cyan());
    eprintln!(
        "    {} {}\n",
        "path reconstruction for flow searches".dimmed(),
        format!("v{}", env!("CARGO_PKG_VERSION")).dimmed()
    );
}
