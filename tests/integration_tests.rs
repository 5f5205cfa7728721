//! Integration tests for the allegiance graph

use std::collections::BTreeSet;
use std::sync::Arc;

use allegiance_graph::analytics::{connected_components, degree_centrality, SubgraphView};
use allegiance_graph::types::{Attributes, House};
use allegiance_graph::{
    AllyPolicy, CharacterRecord, Config, DegreeCounting, GraphError, GraphSession, GraphStore,
    InMemoryStore, NodeId, NodeKind, NodeRef, Relation, RelationKind, Role, Subgraph,
    UnresolvedPolicy,
};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn names(items: &[&str]) -> BTreeSet<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Ned, Cat and Robb in house Stark; Robb's father is Ned
fn stark_records() -> Vec<CharacterRecord> {
    vec![
        CharacterRecord {
            male: true,
            ..CharacterRecord::named("Ned").with_house("Stark")
        },
        CharacterRecord::named("Cat").with_house("Stark"),
        CharacterRecord {
            male: true,
            ..CharacterRecord::named("Robb")
                .with_house("Stark")
                .with_father("Ned")
        },
    ]
}

#[test]
fn test_end_to_end_stark_scenario() {
    init_logging();
    let mut session = GraphSession::in_memory(Config::default());

    let ingest = session.ingest(&stark_records()).unwrap();
    assert_eq!(ingest.characters, 3);
    assert_eq!(ingest.houses, 1);
    assert_eq!(ingest.memberships, 3);
    assert_eq!(ingest.parentals, 1);
    assert_eq!(ingest.marriages, 0);

    let inferred = session.infer().unwrap();
    assert_eq!(inferred.count(), 6);

    let report = session.analyze().unwrap();
    assert_eq!(report.largest_group.max_component_size, 3);
    assert_eq!(report.largest_group.members, names(&["Cat", "Ned", "Robb"]));

    // Ned: 4 ally instances + parental; Robb likewise; Cat: 4 ally instances
    assert_eq!(report.main_characters.max_degree, 5);
    assert_eq!(report.main_characters.members, names(&["Ned", "Robb"]));
    assert_eq!(report.central_in_largest, None);

    let snapshot = session.store().snapshot();
    let view = SubgraphView::build(&snapshot, &Subgraph::characters());
    let degrees = degree_centrality(&view, DegreeCounting::RelationInstances);
    let ned = session.store().find_node_by_key(NodeKind::Character, "Ned").unwrap();
    let cat = session.store().find_node_by_key(NodeKind::Character, "Cat").unwrap();
    let robb = session.store().find_node_by_key(NodeKind::Character, "Robb").unwrap();
    assert_eq!(degrees.degree(ned), Some(5));
    assert_eq!(degrees.degree(robb), Some(5));
    assert_eq!(degrees.degree(cat), Some(4));
}

#[test]
fn test_end_to_end_distinct_neighbour_counting() {
    let mut config = Config::default();
    config.analytics.degree_counting = DegreeCounting::DistinctNeighbours;
    let mut session = GraphSession::in_memory(config);

    let report = session.run(&stark_records()).unwrap();
    assert_eq!(report.main_characters.max_degree, 2);
    assert_eq!(report.main_characters.members, names(&["Cat", "Ned", "Robb"]));
}

#[test]
fn test_rule_produces_exactly_house_pairs() {
    let records = vec![
        CharacterRecord::named("A").with_house("H"),
        CharacterRecord::named("B").with_house("H"),
        CharacterRecord::named("C").with_house("H"),
        CharacterRecord::named("D").with_house("Other"),
        CharacterRecord::named("E"),
    ];
    let mut session = GraphSession::in_memory(Config::default());
    session.ingest(&records).unwrap();
    session.infer().unwrap();

    let store = session.store();
    let name_of = |id: NodeId| store.node(id).unwrap().natural_key;
    let mut pairs: Vec<(String, String)> = store
        .relations_of_type(RelationKind::Ally)
        .into_iter()
        .map(|r| {
            (
                name_of(r.get(Role::Ally1).unwrap()),
                name_of(r.get(Role::Ally2).unwrap()),
            )
        })
        .collect();
    pairs.sort();

    let expected: Vec<(String, String)> = [
        ("A", "B"),
        ("A", "C"),
        ("B", "A"),
        ("B", "C"),
        ("C", "A"),
        ("C", "B"),
    ]
    .iter()
    .map(|(a, b)| (a.to_string(), b.to_string()))
    .collect();
    assert_eq!(pairs, expected);
}

#[test]
fn test_duplicate_house_leaves_one_node() {
    let store = InMemoryStore::new();
    store
        .add_node(NodeKind::House, "Stark", House::new("Stark").attributes())
        .unwrap();
    let err = store
        .add_node(NodeKind::House, "Stark", House::new("Stark").attributes())
        .unwrap_err();

    assert!(matches!(err, GraphError::DuplicateKey { .. }));
    assert_eq!(store.nodes_of_type(NodeKind::House).len(), 1);
}

#[test]
fn test_membership_before_house_exists() {
    let store = InMemoryStore::new();
    let ned = store
        .add_node(NodeKind::Character, "Ned", Attributes::new())
        .unwrap();

    assert_eq!(store.find_node_by_key(NodeKind::House, "Stark"), None);
    let missing_house = NodeId(ned.0 + 1);
    let err = store
        .insert_relation(Relation::membership(ned, missing_house))
        .unwrap_err();
    assert!(matches!(
        err,
        GraphError::UnresolvedReference(NodeRef::Id(id)) if id == missing_house
    ));
}

#[test]
fn test_singleton_component_for_unrelated_character() {
    let mut records = stark_records();
    records.push(CharacterRecord::named("Hodor"));

    let mut session = GraphSession::in_memory(Config::default());
    session.run(&records).unwrap();

    let snapshot = session.store().snapshot();
    let partition = connected_components(&SubgraphView::build(&snapshot, &Subgraph::characters()));
    let hodor = session
        .store()
        .find_node_by_key(NodeKind::Character, "Hodor")
        .unwrap();
    assert_eq!(partition.component_of(hodor), Some(&[hodor][..]));

    let covered: usize = partition.components.iter().map(Vec::len).sum();
    assert_eq!(covered, 4);
}

#[test]
fn test_marriage_links_houses() {
    let records = vec![
        CharacterRecord::named("Ned").with_house("Stark"),
        CharacterRecord::named("Cat").with_house("Tully").with_spouse("Ned"),
        CharacterRecord::named("Edmure").with_house("Tully"),
        CharacterRecord::named("Jaime").with_house("Lannister"),
    ];
    let mut session = GraphSession::in_memory(Config::default());
    let report = session.run(&records).unwrap();

    assert_eq!(report.largest_group.max_component_size, 3);
    assert_eq!(report.largest_group.members, names(&["Cat", "Edmure", "Ned"]));
    // Cat: ally pair with Edmure (2) + marriage (1)
    assert_eq!(report.main_characters.max_degree, 3);
    assert_eq!(report.main_characters.sole_member(), Some("Cat"));
    assert_eq!(report.central_in_largest, Some(true));
}

#[test]
fn test_skip_policy_reports_missing_spouse() {
    let mut config = Config::default();
    config.ingest.unresolved = UnresolvedPolicy::Skip;
    let mut session = GraphSession::in_memory(config);

    let records = vec![CharacterRecord::named("Lysa").with_spouse("Jon Arryn")];
    let report = session.ingest(&records).unwrap();
    assert_eq!(report.marriages, 0);
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].missing_key, "Jon Arryn");
}

#[test]
fn test_additive_policy_duplicates_allies_on_rerun() {
    let mut config = Config::default();
    config.inference.ally_policy = AllyPolicy::Additive;
    let mut session = GraphSession::in_memory(config);

    session.ingest(&stark_records()).unwrap();
    session.infer().unwrap();
    session.infer().unwrap();

    assert_eq!(session.store().relations_of_type(RelationKind::Ally).len(), 12);
    let report = session.analyze().unwrap();
    // 8 ally instances + parental
    assert_eq!(report.main_characters.max_degree, 9);
}

#[test]
fn test_shared_store_handle() {
    let store: Arc<dyn GraphStore> = Arc::new(InMemoryStore::new());
    let mut session = GraphSession::new(Arc::clone(&store), Config::default());
    session.run(&stark_records()).unwrap();

    // the caller's handle sees everything the session wrote
    assert_eq!(store.node_count(), 4);
    assert_eq!(store.relations_of_type(RelationKind::Ally).len(), 6);
}

#[test]
fn test_parallel_ingestion_end_to_end() {
    let mut records = Vec::new();
    for h in 0..20 {
        for m in 0..10 {
            let mut record = CharacterRecord::named(format!("c{}-{}", h, m)).with_house(format!("h{}", h));
            if m > 0 {
                record = record.with_father(format!("c{}-{}", h, m - 1));
            }
            records.push(record);
        }
    }

    let mut config = Config::default();
    config.ingest.parallel_threshold = 10;
    let mut session = GraphSession::in_memory(config);
    let report = session.run(&records).unwrap();

    // 20 separate houses of 10 -> ties broken toward the first house
    assert_eq!(report.largest_group.max_component_size, 10);
    assert!(report.largest_group.members.contains("c0-0"));
    // inner members: 18 ally instances + 2 parental
    assert_eq!(report.main_characters.max_degree, 20);
    assert_eq!(report.main_characters.members.len(), 20 * 8);
}
