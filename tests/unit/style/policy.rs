use super::*;

#[test]
fn catalog_has_three_layouts() {
    for name in LAYOUT_NAMES {
        assert!(builtin_layout(name).is_some(), "{name}");
    }
    assert_eq!(builtin_layout("standard").unwrap().1, LayoutPolicy::STANDARD);
    assert_eq!(builtin_layout(" Centered ").unwrap().0, "centered");
}

#[test]
fn policies_match_their_names() {
    assert_eq!(LayoutPolicy::STANDARD.vertical_anchor, Anchor::End);
    assert_eq!(LayoutPolicy::STANDARD.horizontal_anchor, Anchor::Start);
    assert_eq!(LayoutPolicy::CENTERED.vertical_anchor, Anchor::Center);
    assert_eq!(LayoutPolicy::CENTERED.horizontal_anchor, Anchor::Center);
    assert_eq!(LayoutPolicy::BOLD.vertical_anchor, Anchor::Start);
    assert!(LayoutPolicy::BOLD.vertical_offset < 0.0);
}

#[test]
fn unknown_layout_falls_back_or_fails() {
    let (name, policy) = lookup_layout("diagonal", CatalogPolicy::FallbackToDefault).unwrap();
    assert_eq!(name, "standard");
    assert_eq!(policy, LayoutPolicy::STANDARD);

    let err = lookup_layout("diagonal", CatalogPolicy::Strict).unwrap_err();
    assert!(err.is_validation());
}

#[test]
fn policy_deserializes_snake_case() {
    let p: LayoutPolicy = serde_json::from_str(
        r#"{"vertical_anchor":"end","horizontal_anchor":"center"}"#,
    )
    .unwrap();
    assert_eq!(p.vertical_anchor, Anchor::End);
    assert_eq!(p.horizontal_anchor, Anchor::Center);
    assert_eq!(p.vertical_offset, 0.0);

    let c: CatalogPolicy = serde_json::from_str(r#""strict""#).unwrap();
    assert_eq!(c, CatalogPolicy::Strict);
}
