// Include handlers module directly from handlers.rs
#[path = "handlers.rs"]
pub mod handlers;

// Re-export commonly used handler functions for convenience
pub use handlers::{criteria_from_args, expand_path, load_health, log_level, reconstruct_file};

// Re-export reconstruction from netpath-core
pub use netpath_core::{
    PathGraph, ReconstructOptions, ReconstructProgressCallback, execute_reconstruction,
};
