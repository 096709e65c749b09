use super::*;

#[test]
fn test_empty_rules() {
    let rules = PedigreeRules::new();
    assert!(rules.is_empty());
    assert!(rules.default_children("u1").is_empty());
    assert!(!rules.expands_collaterals("u1"));
    assert!(rules.mirror_pairs().is_empty());
}

#[test]
fn test_rules_from_json() {
    let json = r#"{
        "u_root": { "defaultChildren": ["p_me", "p_brother"], "mirrorWith": "u_aunt" },
        "u_maternal": { "expandCollaterals": true }
    }"#;
    let rules: PedigreeRules = serde_json::from_str(json).unwrap();
    assert_eq!(rules.default_children("u_root"), ["p_me", "p_brother"]);
    assert!(rules.expands_collaterals("u_maternal"));
    assert!(!rules.expands_collaterals("u_root"));
    assert_eq!(
        rules.mirror_pairs(),
        vec![("u_root".to_string(), "u_aunt".to_string())]
    );
}

#[test]
fn test_mirror_pairs_sorted() {
    let rules = PedigreeRules::new()
        .with_rule(
            "u_b",
            PedigreeRule {
                mirror_with: Some("u_y".to_string()),
                ..PedigreeRule::default()
            },
        )
        .with_rule(
            "u_a",
            PedigreeRule {
                mirror_with: Some("u_x".to_string()),
                ..PedigreeRule::default()
            },
        );
    let pairs = rules.mirror_pairs();
    assert_eq!(pairs[0].0, "u_a");
    assert_eq!(pairs[1].0, "u_b");
}
