//! scc-bootstrap: Spring Cloud Config client bootstrap
//!
//! Fetches an application's environment from a Spring Cloud Config Server and
//! merges its properties into a host-owned [`store::ConfigStore`] without
//! replacing values the host already set from higher-priority sources.
//!
//! ```no_run
//! use scc_bootstrap::bootstrap::{bootstrap_blocking, BootstrapRequest};
//! use scc_bootstrap::store::MemoryStore;
//!
//! let store = MemoryStore::with_entries([("server.port", 9090i64)]);
//! let request = BootstrapRequest::new("https://config.local/orders/prod", "Bearer token");
//! bootstrap_blocking(&request, &store).unwrap();
//! ```

pub mod bootstrap;
pub mod cli;
pub mod error;
pub mod fetcher;
pub mod logging;
pub mod merge;
pub mod model;
pub mod settings;
pub mod source;
pub mod store;

pub use bootstrap::{bootstrap, bootstrap_blocking, BootstrapRequest, Outcome};
pub use error::BootstrapError;
pub use merge::MergeReport;
pub use model::{ConfigResponse, PropertySourceGroup, PropertyValue};
pub use store::{ConfigStore, MemoryStore};
