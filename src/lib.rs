//! Allegiance Graph
//!
//! Builds a typed character/house graph from cleaned tabular records, derives
//! ally relations between members of the same house, and answers two
//! structural questions: which is the biggest group of related characters,
//! and which character(s) relate to the most others.
//!
//! # Modules
//!
//! - `types`: Core data structures (Node, Relation, GraphSnapshot, reports)
//! - `store`: The `GraphStore` contract, in-memory store, snapshot files
//! - `ingest`: Two-phase record ingestion
//! - `inference`: Rule engine and the same-house ally rule
//! - `analytics`: Union-find components and degree centrality
//! - `labels`: Node id to name resolution
//! - `session`: Phase-ordered driver owning the store handle
//! - `config`: TOML configuration of run policies
//!
//! # Example
//!
//! ```no_run
//! use allegiance_graph::{CharacterRecord, Config, GraphSession};
//!
//! fn main() -> allegiance_graph::Result<()> {
//!     let records = vec![
//!         CharacterRecord::named("Eddard Stark").with_house("House Stark"),
//!         CharacterRecord::named("Robb Stark")
//!             .with_house("House Stark")
//!             .with_father("Eddard Stark"),
//!     ];
//!
//!     let mut session = GraphSession::in_memory(Config::load()?);
//!     let report = session.run(&records)?;
//!     println!("{:?}", report.largest_group.members);
//!     Ok(())
//! }
//! ```

pub mod analytics;
pub mod config;
pub mod error;
pub mod inference;
pub mod ingest;
pub mod labels;
pub mod session;
pub mod store;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use analytics::{DegreeCounting, Subgraph};
pub use config::Config;
pub use error::{GraphError, NodeRef, Result};
pub use inference::{AllyPolicy, RuleEngine};
pub use ingest::{IngestReport, Ingestor, UnresolvedPolicy};
pub use labels::LabelResolver;
pub use session::GraphSession;
pub use store::{GraphStore, InMemoryStore};
pub use types::{
    CentralitySummary, CharacterRecord, ComponentSummary, GraphReport, GraphSnapshot, Node,
    NodeId, NodeKind, Relation, RelationKind, Role,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
