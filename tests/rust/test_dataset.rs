use super::*;

fn family() -> Dataset {
    let people = vec![
        Person::new("p_dad").with_name("zh", "父"),
        Person::new("p_mum").with_name("zh", "母"),
        Person::new("p_me").with_name("zh", "我"),
    ];
    let unions = vec![Union::new("u_root", "p_dad", "p_mum").with_children(["p_me"])];
    Dataset::new(people, unions)
}

// ── Loading ──────────────────────────────────────────────────────────────

#[test]
fn test_from_json_str_tolerates_dangling_references() {
    let json = r#"{
        "people": [{"id": "p1"}],
        "unions": [{"id": "u1", "partnerLeftId": "p1", "partnerRightId": "ghost"}],
        "childOf": {"p1": "u_missing"}
    }"#;
    let ds = Dataset::from_json_str(json).unwrap();
    assert_eq!(ds.people.len(), 1);
    assert_eq!(ds.unions.len(), 1);
}

#[test]
fn test_from_json_str_reports_bad_json() {
    let err = Dataset::from_json_str("{ not json").unwrap_err();
    assert!(matches!(err, ChartError::Json(_)));
}

#[test]
fn test_from_path_missing_file_is_io_error() {
    let err = Dataset::from_path("/definitely/not/here.json").unwrap_err();
    match err {
        ChartError::Io { path, .. } => assert!(path.ends_with("here.json")),
        other => panic!("expected Io, got {other:?}"),
    }
}

#[test]
fn test_from_reader() {
    let json = br#"{"people": [], "unions": []}"#;
    let ds = Dataset::from_reader(&json[..]).unwrap();
    assert!(ds.people.is_empty());
}

// ── add_relative ─────────────────────────────────────────────────────────

#[test]
fn test_add_child_links_to_union() {
    let mut ds = family();
    let union = ds
        .add_relative(Person::new("p_sis"), Relation::Child, "u_root")
        .unwrap();
    assert_eq!(union, "u_root");
    assert!(ds.person("p_sis").is_some());
    assert!(ds.links().contains(&("p_sis".to_string(), "u_root".to_string())));
}

#[test]
fn test_add_child_to_unknown_union_fails() {
    let mut ds = family();
    let err = ds
        .add_relative(Person::new("p_sis"), Relation::Child, "u_nope")
        .unwrap_err();
    assert!(matches!(err, ChartError::UnknownUnion(id) if id == "u_nope"));
    assert!(ds.person("p_sis").is_none());
}

#[test]
fn test_add_partner_creates_union_with_existing_on_left() {
    let mut ds = family();
    let union = ds
        .add_relative(Person::new("p_wife"), Relation::Partner, "p_me")
        .unwrap();
    assert_eq!(union, "u_me_wife");
    let u = ds.union(&union).unwrap();
    assert_eq!(u.partner_left_id, "p_me");
    assert_eq!(u.partner_right_id, "p_wife");
}

#[test]
fn test_add_partner_twice_gets_fresh_id() {
    let mut ds = family();
    ds.add_relative(Person::new("p_wife"), Relation::Partner, "p_me")
        .unwrap();
    ds.unions.push(Union::new("u_me_other", "x", "y"));
    let union = ds
        .add_relative(Person::new("p_other"), Relation::Partner, "p_me")
        .unwrap();
    assert_eq!(union, "u_me_other_2");
}

#[test]
fn test_add_parent_without_parent_union_creates_one() {
    let mut ds = family();
    let union = ds
        .add_relative(Person::new("p_grandpa"), Relation::Parent, "p_dad")
        .unwrap();
    let u = ds.union(&union).unwrap();
    assert_eq!(u.partner_left_id, "p_grandpa");
    assert_eq!(u.partner_right_id, "p_grandpa_partner");
    assert!(ds.links().contains(&("p_dad".to_string(), union.clone())));
}

#[test]
fn test_add_parent_fills_placeholder_slot() {
    let mut ds = family();
    let union = ds
        .add_relative(Person::new("p_grandpa"), Relation::Parent, "p_dad")
        .unwrap();
    let again = ds
        .add_relative(Person::new("p_grandma"), Relation::Parent, "p_dad")
        .unwrap();
    assert_eq!(union, again);
    let u = ds.union(&union).unwrap();
    assert_eq!(u.partner_left_id, "p_grandpa");
    assert_eq!(u.partner_right_id, "p_grandma");
}

#[test]
fn test_add_parent_to_full_union_fails() {
    let mut ds = family();
    let err = ds
        .add_relative(Person::new("p_third"), Relation::Parent, "p_me")
        .unwrap_err();
    assert!(matches!(err, ChartError::UnionFull(id) if id == "u_root"));
}

#[test]
fn test_add_duplicate_person_fails() {
    let mut ds = family();
    let err = ds
        .add_relative(Person::new("p_me"), Relation::Child, "u_root")
        .unwrap_err();
    assert!(matches!(err, ChartError::DuplicatePerson(_)));
}

#[test]
fn test_relation_serde_lowercase() {
    let r: Relation = serde_json::from_str("\"partner\"").unwrap();
    assert_eq!(r, Relation::Partner);
}
