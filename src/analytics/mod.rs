//! Graph Analytics Engine
//!
//! Connected components and degree centrality over a chosen subgraph of a
//! frozen snapshot. Nothing here mutates the store.

mod centrality;
mod components;
mod subgraph;
mod union_find;

pub use centrality::{degree_centrality, DegreeCentrality, DegreeCounting};
pub use components::{connected_components, ComponentPartition};
pub use subgraph::{Subgraph, SubgraphView};
pub use union_find::UnionFind;

use crate::config::AnalyticsConfig;
use crate::error::Result;
use crate::labels::LabelResolver;
use crate::types::{CentralitySummary, ComponentSummary, GraphReport, GraphSnapshot};

/// Biggest group of connected nodes, by name
///
/// An empty subgraph yields size 0 and no members.
pub fn largest_component(graph: &GraphSnapshot, subgraph: &Subgraph) -> Result<ComponentSummary> {
    let view = SubgraphView::build(graph, subgraph);
    let partition = connected_components(&view);
    summarize_components(graph, &partition)
}

/// Node(s) of maximum degree, by name
pub fn most_central(
    graph: &GraphSnapshot,
    subgraph: &Subgraph,
    counting: DegreeCounting,
) -> Result<CentralitySummary> {
    let view = SubgraphView::build(graph, subgraph);
    let centrality = degree_centrality(&view, counting);
    summarize_centrality(graph, &centrality)
}

/// Run both queries concurrently and assemble the report
pub fn analyze(graph: &GraphSnapshot, config: &AnalyticsConfig) -> Result<GraphReport> {
    let view = SubgraphView::build(graph, &config.subgraph());
    if view.is_empty() {
        log::warn!("No {} nodes to analyze", config.node_kind);
    }

    let (partition, centrality) = rayon::join(
        || connected_components(&view),
        || degree_centrality(&view, config.degree_counting),
    );

    let largest_group = summarize_components(graph, &partition)?;
    let main_characters = summarize_centrality(graph, &centrality)?;
    log::info!(
        "Largest group has {} members across {} components; max degree {} held by {}",
        largest_group.max_component_size,
        partition.len(),
        main_characters.max_degree,
        main_characters.members.len()
    );

    Ok(GraphReport::new(largest_group, main_characters))
}

fn summarize_components(
    graph: &GraphSnapshot,
    partition: &ComponentPartition,
) -> Result<ComponentSummary> {
    match partition.largest() {
        Some(component) => Ok(ComponentSummary {
            max_component_size: component.len(),
            members: LabelResolver::new(graph).resolve(component.iter().copied())?,
        }),
        None => Ok(ComponentSummary::default()),
    }
}

fn summarize_centrality(
    graph: &GraphSnapshot,
    centrality: &DegreeCentrality,
) -> Result<CentralitySummary> {
    let (max_degree, ids) = centrality.max();
    Ok(CentralitySummary {
        max_degree,
        members: LabelResolver::new(graph).resolve(ids)?,
    })
}
