use super::*;

fn temp_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "headliner_{name}_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn normalize_rel_path_rules() {
    assert_eq!(normalize_rel_path("fonts/a.ttf").unwrap(), "fonts/a.ttf");
    assert_eq!(normalize_rel_path("fonts\\a.ttf").unwrap(), "fonts/a.ttf");
    assert_eq!(normalize_rel_path("./fonts//a.ttf").unwrap(), "fonts/a.ttf");
    assert!(normalize_rel_path("../a.ttf").is_err());
    assert!(normalize_rel_path("/abs.ttf").is_err());
    assert!(normalize_rel_path("").is_err());
    assert!(normalize_rel_path("./").is_err());
}

#[test]
fn builtin_font_parses() {
    let font = LoadedFont::builtin().unwrap();
    assert_eq!(font.source(), &FontSource::Builtin);
    assert_eq!(font.family(), "DejaVu Sans");
    assert_eq!(font.bytes().len(), BUILTIN_FONT_BYTES.len());
}

#[test]
fn builtin_ref_resolves_without_fallback() {
    let resolver = FontResolver::new(temp_dir("fonts_builtin"), false);
    let res = resolver.resolve(&FontRef::builtin()).unwrap();
    assert!(matches!(res, FontResolution::Resolved(_)));
    assert_eq!(res.font().source(), &FontSource::Builtin);
}

#[test]
fn existing_file_is_loaded() {
    let root = temp_dir("fonts_file");
    std::fs::create_dir_all(root.join("fonts")).unwrap();
    std::fs::write(root.join("fonts/Card.ttf"), BUILTIN_FONT_BYTES).unwrap();

    let resolver = FontResolver::new(&root, false);
    let res = resolver
        .resolve(&FontRef::file_or_family("fonts/Card.ttf", "Nope", 700))
        .unwrap();
    assert!(res.fallback_reason().is_none());
    assert_eq!(
        res.font().source(),
        &FontSource::File(root.join("fonts/Card.ttf"))
    );
}

#[test]
fn missing_file_falls_back_to_builtin() {
    let root = temp_dir("fonts_missing");
    let resolver = FontResolver::new(&root, false);
    let res = resolver
        .resolve(&FontRef {
            path: Some("Inter-Bold.ttf".to_owned()),
            family: None,
            weight: 700,
        })
        .unwrap();
    assert_eq!(res.font().source(), &FontSource::Builtin);
    assert_eq!(
        res.fallback_reason(),
        Some(&FallbackReason::FileMissing(root.join("Inter-Bold.ttf")))
    );
}

#[test]
fn family_without_system_fonts_falls_back() {
    let resolver = FontResolver::new(temp_dir("fonts_family"), false);
    let res = resolver
        .resolve(&FontRef {
            path: None,
            family: Some("Inter".to_owned()),
            weight: 700,
        })
        .unwrap();
    assert_eq!(
        res.fallback_reason(),
        Some(&FallbackReason::FamilyNotFound("Inter".to_owned()))
    );
}

#[test]
fn missing_file_reason_wins_over_family_reason() {
    let root = temp_dir("fonts_reason_order");
    let resolver = FontResolver::new(&root, false);
    let res = resolver
        .resolve(&FontRef::file_or_family("x.ttf", "Inter", 700))
        .unwrap();
    assert!(matches!(
        res.fallback_reason(),
        Some(FallbackReason::FileMissing(_))
    ));
}

#[test]
fn corrupt_font_file_is_fatal() {
    let root = temp_dir("fonts_corrupt");
    std::fs::write(root.join("broken.ttf"), b"this is not a font").unwrap();
    let resolver = FontResolver::new(&root, false);
    let err = resolver
        .resolve(&FontRef {
            path: Some("broken.ttf".to_owned()),
            family: None,
            weight: 700,
        })
        .unwrap_err();
    assert!(matches!(err, HeadlinerError::Font(_)));
}

#[test]
fn escaping_path_is_a_validation_error() {
    let resolver = FontResolver::new(temp_dir("fonts_escape"), false);
    let err = resolver
        .resolve(&FontRef {
            path: Some("../etc/passwd".to_owned()),
            family: None,
            weight: 700,
        })
        .unwrap_err();
    assert!(err.is_validation());
}

#[test]
fn font_ref_deserializes_with_default_weight() {
    let r: FontRef = serde_json::from_str(r#"{"path":"Inter-Bold.ttf"}"#).unwrap();
    assert_eq!(r.weight, 700);
    assert_eq!(r.family, None);
}
