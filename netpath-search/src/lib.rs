pub mod criteria;
pub mod error;
pub mod loader;
pub mod result;

pub use criteria::{Direction, SearchCriteria, health_query};
pub use error::SearchError;
pub use loader::{load_health_records, load_path_records};
pub use result::{HealthRecord, NO_HOST_IP, PathRecord};
