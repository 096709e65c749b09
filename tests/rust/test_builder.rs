use super::*;
use crate::family::{Dataset, Person, Union};
use crate::window::focus::toggle;
use crate::window::rules::PedigreeRule;

fn person(id: &str, dob: &str) -> Person {
    Person::new(id).with_name("zh", id).with_dob(dob)
}

/// Small family: two sons and no recorded grandparents.
fn nuclear() -> DataIndex {
    let ds = Dataset::new(
        vec![
            person("p_dad", "1960"),
            person("p_mum", "1962"),
            person("p_me", "1990-01-01"),
            person("p_bro", "1988-05-05"),
        ],
        vec![Union::new("u_root", "p_dad", "p_mum").with_children(["p_me", "p_bro"])],
    );
    DataIndex::new(&ds, "zh")
}

/// Three paternal generations above the root, plus the maternal side with an aunt.
fn extended() -> DataIndex {
    let people = vec![
        person("p_me", "1990-01-01"),
        person("p_bro", "1988-05-05"),
        person("p_dad", "1958"),
        person("p_mum", "1965"),
        person("p_uncle", "1955"),
        person("p_gpa", "1928"),
        person("p_gma", "1930"),
        person("p_granduncle", "1925"),
        person("p_gu_wife", "1926"),
        person("p_gu_kid", "1950"),
        person("p_gu_kid_wife", "1951"),
        person("p_gu_grandkid", "1975"),
        person("p_gu_kid2", "1952"),
        person("p_ggpa", "1900"),
        person("p_ggma", "1902"),
        person("p_gggpa", "1870"),
        person("p_gggma", "1872"),
        person("p_mgpa", "1935"),
        person("p_mgma", "1936"),
        person("p_aunt", "1962"),
        person("p_aunt_husband", "1960"),
        person("p_cousin", "1986"),
    ];
    let unions = vec![
        Union::new("u_root", "p_dad", "p_mum").with_children(["p_me", "p_bro"]),
        Union::new("u_paternal", "p_gpa", "p_gma").with_children(["p_dad", "p_uncle"]),
        Union::new("u_great", "p_ggpa", "p_ggma").with_children(["p_gpa", "p_granduncle"]),
        Union::new("u_great_great", "p_gggpa", "p_gggma").with_children(["p_ggpa"]),
        Union::new("u_granduncle", "p_granduncle", "p_gu_wife")
            .with_children(["p_gu_kid2", "p_gu_kid"]),
        Union::new("u_gu_kid", "p_gu_kid", "p_gu_kid_wife").with_children(["p_gu_grandkid"]),
        Union::new("u_maternal", "p_mgpa", "p_mgma").with_children(["p_mum", "p_aunt"]),
        Union::new("u_aunt", "p_aunt", "p_aunt_husband").with_children(["p_cousin"]),
    ];
    DataIndex::new(&Dataset::new(people, unions), "zh")
}

fn edge_pairs(graph: &WindowedGraph) -> Vec<(String, String)> {
    graph
        .edges
        .iter()
        .map(|e| (e.source.clone(), e.target.clone()))
        .collect()
}

fn has_edge(graph: &WindowedGraph, source: &str, target: &str) -> bool {
    graph
        .edges
        .iter()
        .any(|e| e.source == source && e.target == target)
}

fn assert_unique_ids(graph: &WindowedGraph) {
    let nodes: HashSet<&str> = graph.nodes.iter().map(|n| n.id.as_str()).collect();
    assert_eq!(nodes.len(), graph.nodes.len(), "duplicate node id");
    let edges: HashSet<&str> = graph.edges.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(edges.len(), graph.edges.len(), "duplicate edge id");
}

// ── Root and children ────────────────────────────────────────────────────

#[test]
fn test_two_children_fan_out_through_junction_in_birth_order() {
    let idx = nuclear();
    let graph = build_visible_graph("u_root", &FocusState::new(), &idx, &PedigreeRules::new());

    assert!(has_edge(&graph, "u_root", "j_u_root"));
    assert!(!has_edge(&graph, "u_root", "p_me"));
    assert_eq!(graph.children_of("u_root"), vec!["p_bro", "p_me"]);

    let fan: Vec<(&str, Option<&str>)> = graph
        .edges
        .iter()
        .filter(|e| e.source == "j_u_root")
        .map(|e| (e.target.as_str(), e.source_handle.as_deref()))
        .collect();
    assert_eq!(fan, vec![("p_bro", Some("out0")), ("p_me", Some("out1"))]);

    let junction = graph.node("j_u_root").unwrap();
    assert!(junction.is_junction());
    assert_eq!(junction.ports.len(), 2);
    assert!(junction.ports.iter().all(|p| p.side == PortSide::South));
}

#[test]
fn test_no_ascendant_gives_root_and_children_only() {
    let idx = nuclear();
    let graph = build_visible_graph("u_root", &FocusState::new(), &idx, &PedigreeRules::new());
    assert_eq!(graph.node_ids(), vec!["u_root", "j_u_root", "p_bro", "p_me"]);
    assert_eq!(graph.edges.len(), 3);
}

#[test]
fn test_single_child_edge_is_direct() {
    let ds = Dataset::new(
        vec![person("a", "1960"), person("b", "1961"), person("c", "1990")],
        vec![Union::new("u", "a", "b").with_children(["c"])],
    );
    let idx = DataIndex::new(&ds, "zh");
    let graph = build_visible_graph("u", &FocusState::new(), &idx, &PedigreeRules::new());
    assert_eq!(graph.node_ids(), vec!["u", "c"]);
    assert_eq!(graph.edges[0].id, "e_u_c_0");
    assert!(graph.edges[0].source_handle.is_none());
}

#[test]
fn test_unknown_root_gives_empty_graph() {
    let idx = nuclear();
    let graph = build_visible_graph("u_nope", &FocusState::new(), &idx, &PedigreeRules::new());
    assert!(graph.is_empty());
    assert!(graph.edges.is_empty());
}

#[test]
fn test_default_children_when_none_recorded() {
    let ds = Dataset::new(
        vec![
            person("p_dad", "1960"),
            person("p_mum", "1962"),
            person("p_me", "1990"),
            person("p_bro", "1988"),
        ],
        vec![Union::new("u_root", "p_dad", "p_mum")],
    );
    let idx = DataIndex::new(&ds, "zh");
    let rules = PedigreeRules::new().with_rule(
        "u_root",
        PedigreeRule {
            default_children: vec!["p_me".to_string(), "p_bro".to_string(), "p_ghost".to_string()],
            ..PedigreeRule::default()
        },
    );
    let graph = build_visible_graph("u_root", &FocusState::new(), &idx, &rules);
    assert_eq!(graph.children_of("u_root"), vec!["p_bro", "p_me"]);
    assert!(!graph.contains("p_ghost"));
}

#[test]
fn test_union_data_carries_partner_names_and_focus() {
    let idx = nuclear();
    let focus = FocusState::new().with_side("u_root", Side::Right);
    let graph = build_visible_graph("u_root", &focus, &idx, &PedigreeRules::new());
    let NodeKind::Union(data) = &graph.node("u_root").unwrap().kind else {
        panic!("root is not a union node");
    };
    assert_eq!(data.left_name, "p_dad");
    assert_eq!(data.right_id, "p_mum");
    assert_eq!(data.focus_side, Side::Right);
    assert_eq!(data.toggle, "u_root");
}

// ── Left focus ───────────────────────────────────────────────────────────

#[test]
fn test_left_focus_climbs_two_generations() {
    let idx = extended();
    let graph = build_visible_graph("u_root", &FocusState::from_index(&idx), &idx, &PedigreeRules::new());

    for id in ["u_paternal", "u_great", "u_great_great", "u_granduncle", "u_gu_kid"] {
        assert!(graph.contains(id), "missing {id}");
    }
    assert!(has_edge(&graph, "u_paternal", "u_root"));
    assert!(has_edge(&graph, "u_great_great", "u_great"));
    // Maternal side stays hidden.
    assert!(!graph.contains("u_maternal"));
    // Father's siblings are not part of the left branch.
    assert!(!graph.contains("p_uncle"));
    assert_unique_ids(&graph);
}

#[test]
fn test_left_focus_orders_grandparent_siblings_by_birth() {
    let idx = extended();
    let graph = build_visible_graph("u_root", &FocusState::from_index(&idx), &idx, &PedigreeRules::new());
    assert_eq!(graph.children_of("u_great"), vec!["u_granduncle", "u_paternal"]);

    let tag = graph.node("u_granduncle").and_then(|n| n.sibling_tag()).unwrap();
    assert_eq!(tag.sibling_order, 0);
    assert_eq!(tag.sibling_parent_id, "u_great");
    assert!(graph.node("u_paternal").unwrap().sibling_tag().is_none());
}

#[test]
fn test_left_focus_collateral_descendants() {
    let idx = extended();
    let graph = build_visible_graph("u_root", &FocusState::from_index(&idx), &idx, &PedigreeRules::new());
    assert_eq!(graph.children_of("u_granduncle"), vec!["u_gu_kid", "p_gu_kid2"]);
    assert!(has_edge(&graph, "u_gu_kid", "p_gu_grandkid"));
}

// ── Right focus ──────────────────────────────────────────────────────────

#[test]
fn test_right_focus_lists_parent_siblings_as_people() {
    let idx = extended();
    let focus = toggle(&FocusState::from_index(&idx), "u_root");
    let graph = build_visible_graph("u_root", &focus, &idx, &PedigreeRules::new());
    assert!(graph.contains("u_maternal"));
    assert!(!graph.contains("u_paternal"));
    assert_eq!(graph.children_of("u_maternal"), vec!["p_aunt", "p_mum", "u_root"]);
    assert!(!graph.contains("u_aunt"));
}

#[test]
fn test_right_focus_collateral_expansion() {
    let idx = extended();
    let rules = PedigreeRules::new().with_rule(
        "u_maternal",
        PedigreeRule {
            expand_collaterals: true,
            ..PedigreeRule::default()
        },
    );
    let focus = toggle(&FocusState::from_index(&idx), "u_root");
    let graph = build_visible_graph("u_root", &focus, &idx, &rules);

    // Aunt (1962) is older than mum (1965): her union comes first.
    assert_eq!(graph.children_of("u_maternal"), vec!["u_aunt", "u_root"]);
    assert!(has_edge(&graph, "u_aunt", "p_cousin"));
    assert!(!graph.contains("p_mum"));
    assert_unique_ids(&graph);
}

#[test]
fn test_collateral_rule_without_sibling_unions_falls_back_to_direct_edge() {
    let ds = Dataset::new(
        vec![
            person("p_dad", "1960"),
            person("p_mum", "1962"),
            person("p_me", "1990"),
            person("p_gpa", "1930"),
            person("p_gma", "1931"),
        ],
        vec![
            Union::new("u_root", "p_dad", "p_mum")
                .with_children(["p_me"])
                .with_focus(Side::Right),
            Union::new("u_maternal", "p_gpa", "p_gma").with_children(["p_mum"]),
        ],
    );
    let idx = DataIndex::new(&ds, "zh");
    let rules = PedigreeRules::new().with_rule(
        "u_maternal",
        PedigreeRule {
            expand_collaterals: true,
            ..PedigreeRule::default()
        },
    );
    let graph = build_visible_graph("u_root", &FocusState::from_index(&idx), &idx, &rules);
    assert!(has_edge(&graph, "u_maternal", "u_root"));
    assert_eq!(graph.children_of("u_maternal"), vec!["u_root"]);
}

// ── Properties ───────────────────────────────────────────────────────────

#[test]
fn test_build_is_deterministic() {
    let idx = extended();
    let focus = FocusState::from_index(&idx);
    let rules = PedigreeRules::new();
    let a = build_visible_graph("u_root", &focus, &idx, &rules);
    let b = build_visible_graph("u_root", &focus, &idx, &rules);
    assert_eq!(a, b);
}

#[test]
fn test_double_toggle_restores_graph() {
    let idx = extended();
    let focus = FocusState::from_index(&idx);
    let rules = PedigreeRules::new();
    let before = build_visible_graph("u_root", &focus, &idx, &rules);
    let twice = toggle(&toggle(&focus, "u_root"), "u_root");
    let after = build_visible_graph("u_root", &twice, &idx, &rules);
    assert_eq!(edge_pairs(&before), edge_pairs(&after));
    assert_eq!(before.node_ids(), after.node_ids());
}

#[test]
fn test_no_dangling_edges() {
    let idx = extended();
    for side in [Side::Left, Side::Right] {
        let focus = FocusState::from_index(&idx).with_side("u_root", side);
        let graph = build_visible_graph("u_root", &focus, &idx, &PedigreeRules::new());
        for edge in &graph.edges {
            assert!(graph.contains(&edge.source), "dangling source {}", edge.source);
            assert!(graph.contains(&edge.target), "dangling target {}", edge.target);
        }
        assert_unique_ids(&graph);
    }
}

#[test]
fn test_junction_follows_its_parent() {
    let idx = extended();
    let graph = build_visible_graph("u_root", &FocusState::from_index(&idx), &idx, &PedigreeRules::new());
    let ids = graph.node_ids();
    for (i, id) in ids.iter().enumerate() {
        if let Some(parent) = id.strip_prefix("j_") {
            assert_eq!(ids[i - 1], parent);
        }
    }
}

#[test]
fn test_junction_id_never_shadows_a_dataset_id() {
    let ds = Dataset::new(
        vec![
            person("p_dad", "1960"),
            person("p_mum", "1962"),
            person("p_me", "1990"),
            person("j_u_root", "1988"),
        ],
        vec![Union::new("u_root", "p_dad", "p_mum").with_children(["p_me", "j_u_root"])],
    );
    let idx = DataIndex::new(&ds, "zh");
    let graph = build_visible_graph("u_root", &FocusState::from_index(&idx), &idx, &PedigreeRules::new());
    assert_unique_ids(&graph);
    assert!(graph.node("j_u_root").is_some_and(|n| matches!(n.kind, NodeKind::Person(_))));
    let junction = graph.node("j_u_root~1").unwrap();
    assert_eq!(junction.kind, NodeKind::Junction);
    assert!(has_edge(&graph, "u_root", "j_u_root~1"));
    assert!(has_edge(&graph, "j_u_root~1", "j_u_root"));
    assert!(has_edge(&graph, "j_u_root~1", "p_me"));
}

#[test]
fn test_with_sizes_applies_to_nodes() {
    let idx = nuclear();
    let sizes = NodeSizes {
        person: crate::window::types::Size::new(80.0, 30.0),
        ..NodeSizes::default()
    };
    let graph = GraphBuilder::new(&idx, &FocusState::new(), &PedigreeRules::new())
        .with_sizes(sizes)
        .build("u_root");
    assert_eq!(graph.node("p_me").unwrap().size.width, 80.0);
    assert_eq!(graph.node("u_root").unwrap().size.width, 260.0);
}
