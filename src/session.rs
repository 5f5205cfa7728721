//! Graph session - one run over one store
//!
//! The session owns the store handle for the duration of a run and enforces
//! the phase order: ingest, then infer, then analyze.

use std::sync::Arc;

use crate::analytics;
use crate::config::Config;
use crate::error::{GraphError, Result};
use crate::inference::RuleEngine;
use crate::ingest::{IngestReport, Ingestor};
use crate::store::{GraphStore, InMemoryStore};
use crate::types::{CharacterRecord, GraphReport, GraphSnapshot, InferResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Phase {
    Empty,
    Ingested,
    Inferred,
    /// Ingestion aborted part way; the store holds a partial graph
    Failed,
}

pub struct GraphSession {
    store: Arc<dyn GraphStore>,
    config: Config,
    phase: Phase,
}

impl GraphSession {
    pub fn new(store: Arc<dyn GraphStore>, config: Config) -> Self {
        Self {
            store,
            config,
            phase: Phase::Empty,
        }
    }

    /// Session over a fresh in-memory store
    pub fn in_memory(config: Config) -> Self {
        Self::new(Arc::new(InMemoryStore::new()), config)
    }

    /// Session over a store rebuilt from a snapshot
    ///
    /// The snapshot is assumed to have gone through inference already.
    pub fn from_snapshot(snapshot: GraphSnapshot, config: Config) -> Result<Self> {
        let store = InMemoryStore::from_snapshot(snapshot)?;
        Ok(Self {
            store: Arc::new(store),
            config,
            phase: Phase::Inferred,
        })
    }

    pub fn store(&self) -> &Arc<dyn GraphStore> {
        &self.store
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Load records; allowed once, before inference
    ///
    /// A failed call leaves the session in `Phase::Failed`, since the
    /// append-only store keeps whatever was written before the error.
    pub fn ingest(&mut self, records: &[CharacterRecord]) -> Result<IngestReport> {
        match self.phase {
            Phase::Empty => {}
            Phase::Failed => {
                return Err(GraphError::PhaseOrder(
                    "a previous ingestion failed; start a new session".to_string(),
                ))
            }
            _ => {
                return Err(GraphError::PhaseOrder(
                    "records can only be ingested into an empty session".to_string(),
                ))
            }
        }

        match Ingestor::new(self.store.as_ref(), &self.config.ingest).ingest(records) {
            Ok(report) => {
                self.phase = Phase::Ingested;
                Ok(report)
            }
            Err(e) => {
                log::warn!("Ingestion failed, session is no longer usable: {}", e);
                self.phase = Phase::Failed;
                Err(e)
            }
        }
    }

    /// Materialize derived relations
    pub fn infer(&mut self) -> Result<InferResult> {
        if !matches!(self.phase, Phase::Ingested | Phase::Inferred) {
            return Err(GraphError::PhaseOrder(
                "inference requires successfully ingested records".to_string(),
            ));
        }
        let engine = RuleEngine::with_policy(self.config.inference.ally_policy);
        let result = engine.run(self.store.as_ref())?;
        self.phase = Phase::Inferred;
        Ok(result)
    }

    /// Answer the biggest-group and main-character questions
    pub fn analyze(&self) -> Result<GraphReport> {
        if self.phase != Phase::Inferred {
            return Err(GraphError::PhaseOrder(
                "analytics require inference to have run".to_string(),
            ));
        }
        analytics::analyze(&self.store.snapshot(), &self.config.analytics)
    }

    /// Ingest, infer and analyze in one go
    pub fn run(&mut self, records: &[CharacterRecord]) -> Result<GraphReport> {
        self.ingest(records)?;
        self.infer()?;
        self.analyze()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records() -> Vec<CharacterRecord> {
        vec![
            CharacterRecord::named("Ned").with_house("Stark"),
            CharacterRecord::named("Robb").with_house("Stark").with_father("Ned"),
        ]
    }

    #[test]
    fn test_phase_progression() {
        let mut session = GraphSession::in_memory(Config::default());
        assert_eq!(session.phase(), Phase::Empty);

        session.ingest(&records()).unwrap();
        assert_eq!(session.phase(), Phase::Ingested);

        session.infer().unwrap();
        assert_eq!(session.phase(), Phase::Inferred);

        let report = session.analyze().unwrap();
        assert_eq!(report.largest_group.max_component_size, 2);
    }

    #[test]
    fn test_infer_before_ingest_rejected() {
        let mut session = GraphSession::in_memory(Config::default());
        assert!(matches!(session.infer(), Err(GraphError::PhaseOrder(_))));
    }

    #[test]
    fn test_analyze_before_infer_rejected() {
        let mut session = GraphSession::in_memory(Config::default());
        session.ingest(&records()).unwrap();
        assert!(matches!(session.analyze(), Err(GraphError::PhaseOrder(_))));
    }

    #[test]
    fn test_second_ingest_rejected() {
        let mut session = GraphSession::in_memory(Config::default());
        session.ingest(&records()).unwrap();
        assert!(matches!(
            session.ingest(&records()),
            Err(GraphError::PhaseOrder(_))
        ));
    }

    #[test]
    fn test_failed_ingest_blocks_retry() {
        let mut session = GraphSession::in_memory(Config::default());
        let bad = vec![CharacterRecord::named("Ned").with_spouse("Nobody")];
        assert!(matches!(
            session.ingest(&bad),
            Err(GraphError::UnresolvedReference(_))
        ));
        assert_eq!(session.phase(), Phase::Failed);

        // Ned is already stored; the retry must not surface as DuplicateKey
        let err = session.ingest(&records()).unwrap_err();
        assert!(matches!(err, GraphError::PhaseOrder(_)));
        assert!(err.to_string().contains("start a new session"));
        assert!(matches!(session.infer(), Err(GraphError::PhaseOrder(_))));
    }

    #[test]
    fn test_from_snapshot_can_analyze() {
        let mut session = GraphSession::in_memory(Config::default());
        let expected = session.run(&records()).unwrap();

        let restored =
            GraphSession::from_snapshot(session.store().snapshot(), Config::default()).unwrap();
        assert_eq!(restored.analyze().unwrap(), expected);
    }
}
