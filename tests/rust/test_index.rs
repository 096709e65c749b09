use super::*;

fn dataset() -> Dataset {
    let people = vec![
        Person::new("p_dad").with_name("zh", "父"),
        Person::new("p_mum").with_name("zh", "母"),
        Person::new("p_me").with_name("zh", "我"),
        Person::new("p_bro").with_name("zh", "兄"),
    ];
    let mut ds = Dataset::new(
        people,
        vec![
            Union::new("u_root", "p_dad", "p_mum").with_children(["p_me", "p_ghost"]),
            Union::new("u_second", "p_dad", "p_other"),
        ],
    );
    ds.child_of.insert("p_bro".to_string(), "u_root".to_string());
    ds
}

#[test]
fn test_lookup_by_id() {
    let idx = DataIndex::new(&dataset(), "zh");
    assert!(idx.person("p_me").is_some());
    assert!(idx.union("u_root").is_some());
    assert!(idx.union("u_nope").is_none());
}

#[test]
fn test_children_skip_unknown_people() {
    let idx = DataIndex::new(&dataset(), "zh");
    assert_eq!(idx.child_ids("u_root"), ["p_me", "p_ghost", "p_bro"]);
    let ids: Vec<&str> = idx.children("u_root").iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["p_me", "p_bro"]);
    assert!(idx.children("u_nope").is_empty());
}

#[test]
fn test_parent_union() {
    let idx = DataIndex::new(&dataset(), "zh");
    assert_eq!(idx.parent_union("p_me"), Some("u_root"));
    assert_eq!(idx.parent_union("p_bro"), Some("u_root"));
    assert_eq!(idx.parent_union("p_dad"), None);
}

#[test]
fn test_union_of_first_union_wins() {
    let idx = DataIndex::new(&dataset(), "zh");
    assert_eq!(idx.union_of("p_dad"), Some("u_root"));
    assert_eq!(idx.union_of("p_other"), Some("u_second"));
    assert_eq!(idx.union_of("p_me"), None);
}

#[test]
fn test_unions_in_dataset_order() {
    let idx = DataIndex::new(&dataset(), "zh");
    let ids: Vec<&str> = idx.unions().map(|u| u.id.as_str()).collect();
    assert_eq!(ids, vec!["u_root", "u_second"]);
}

#[test]
fn test_display_name_raw_id_fallback() {
    let idx = DataIndex::new(&dataset(), "zh");
    assert_eq!(idx.display_name("p_me"), "我");
    assert_eq!(idx.display_name("p_other"), "p_other");
    assert_eq!(idx.locale(), "zh");
    assert_eq!(idx.collator().locale(), "zh");
}

#[test]
fn test_duplicate_union_ids_collapse() {
    let ds = Dataset::new(
        Vec::new(),
        vec![Union::new("u1", "a", "b"), Union::new("u1", "c", "d")],
    );
    let idx = DataIndex::new(&ds, "zh");
    assert_eq!(idx.union("u1").map(|u| u.partner_left_id.as_str()), Some("c"));
    assert_eq!(idx.unions().count(), 1);
}
