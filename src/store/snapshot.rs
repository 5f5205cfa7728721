//! Snapshot export and import
//!
//! A snapshot file is JSON lines: one metadata header, then every node,
//! then every relation. Files are written atomically so a reader never
//! sees a partial snapshot.

use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{GraphError, Result};
use crate::types::{GraphSnapshot, Node, Relation};
use crate::utils::atomic_write_with;

/// Current snapshot format version
pub const SNAPSHOT_VERSION: u32 = 1;

/// Header line of a snapshot file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotMeta {
    pub version: u32,
    #[serde(rename = "createdAt")]
    pub created_at: i64,
    #[serde(rename = "nodeCount")]
    pub node_count: usize,
    #[serde(rename = "relationCount")]
    pub relation_count: usize,
}

impl SnapshotMeta {
    pub fn new(node_count: usize, relation_count: usize) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            created_at: chrono::Utc::now().timestamp(),
            node_count,
            relation_count,
        }
    }
}

/// Write a snapshot to `path`
pub fn save_snapshot(path: impl AsRef<Path>, snapshot: &GraphSnapshot) -> Result<SnapshotMeta> {
    let path = path.as_ref();
    let meta = SnapshotMeta::new(snapshot.node_count(), snapshot.relation_count());

    atomic_write_with(path, |file| {
        writeln!(file, "{}", serde_json::to_string(&meta)?)?;
        for node in &snapshot.nodes {
            writeln!(file, "{}", serde_json::to_string(node)?)?;
        }
        for relation in &snapshot.relations {
            writeln!(file, "{}", serde_json::to_string(relation)?)?;
        }
        Ok(())
    })?;

    log::info!(
        "Saved snapshot to {}: {} nodes, {} relations",
        path.display(),
        meta.node_count,
        meta.relation_count
    );
    Ok(meta)
}

/// Read a snapshot written by [`save_snapshot`]
pub fn load_snapshot(path: impl AsRef<Path>) -> Result<GraphSnapshot> {
    let path = path.as_ref();
    let reader = BufReader::new(File::open(path)?);
    let mut lines = reader.lines().enumerate();

    let meta: SnapshotMeta = match lines.next() {
        Some((_, line)) => serde_json::from_str(&line?)
            .map_err(|e| GraphError::Snapshot(format!("invalid header: {}", e)))?,
        None => return Err(GraphError::Snapshot("empty snapshot file".to_string())),
    };
    if meta.version != SNAPSHOT_VERSION {
        return Err(GraphError::Snapshot(format!(
            "unsupported snapshot version {}",
            meta.version
        )));
    }

    let mut snapshot = GraphSnapshot::new();
    for (number, line) in lines {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if let Ok(node) = serde_json::from_str::<Node>(line) {
            if !snapshot.relations.is_empty() {
                return Err(GraphError::Snapshot(format!(
                    "line {}: node after relations",
                    number + 1
                )));
            }
            snapshot.nodes.push(node);
            continue;
        }

        let relation = serde_json::from_str::<Relation>(line).map_err(|e| {
            GraphError::Snapshot(format!("line {}: unrecognized record: {}", number + 1, e))
        })?;
        snapshot.relations.push(relation);
    }

    if snapshot.node_count() != meta.node_count || snapshot.relation_count() != meta.relation_count
    {
        return Err(GraphError::Snapshot(format!(
            "header announces {} nodes and {} relations, file holds {} and {}",
            meta.node_count,
            meta.relation_count,
            snapshot.node_count(),
            snapshot.relation_count()
        )));
    }

    log::debug!(
        "Loaded snapshot from {}: {} nodes, {} relations",
        path.display(),
        snapshot.node_count(),
        snapshot.relation_count()
    );
    Ok(snapshot)
}
