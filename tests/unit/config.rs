use super::*;

#[test]
fn defaults_match_card_constants() {
    let cfg = EngineConfig::default();
    cfg.validate().unwrap();
    assert_eq!(cfg.canvas, Canvas::new(1080, 1350).unwrap());
    assert_eq!(cfg.max_text_width(), 940.0);
    assert!((cfg.title_max_height() - 1210.0 * 0.4).abs() < 1e-3);
    assert!((cfg.subtitle_max_height() - 1210.0 * 0.3).abs() < 1e-3);
    assert_eq!(cfg.layout_metrics(), LayoutMetrics::default());
    assert!(!cfg.system_fonts);
}

#[test]
fn partial_json_keeps_other_defaults() {
    let cfg: EngineConfig =
        serde_json::from_str(r#"{"padding": 50, "catalog_policy": "strict"}"#).unwrap();
    assert_eq!(cfg.padding, 50.0);
    assert_eq!(cfg.catalog_policy, CatalogPolicy::Strict);
    assert_eq!(cfg.gap, DEFAULT_GAP);
    assert_eq!(cfg.title_sizes, SizeCandidates::title_default());
}

#[test]
fn unknown_keys_are_rejected() {
    assert!(serde_json::from_str::<EngineConfig>(r#"{"paddign": 50}"#).is_err());
}

#[test]
fn validation_catches_bad_ranges() {
    let bad = [
        EngineConfig {
            padding: 600.0,
            ..EngineConfig::default()
        },
        EngineConfig {
            gap: -1.0,
            ..EngineConfig::default()
        },
        EngineConfig {
            tag_size: 0.0,
            ..EngineConfig::default()
        },
        EngineConfig {
            title_height_ratio: 1.5,
            ..EngineConfig::default()
        },
        EngineConfig {
            canvas: Canvas {
                width: 0,
                height: 10,
            },
            ..EngineConfig::default()
        },
    ];
    for cfg in bad {
        assert!(cfg.validate().unwrap_err().is_validation(), "{cfg:?}");
    }
}

#[test]
fn from_path_reads_and_validates() {
    let dir = std::env::temp_dir().join(format!("headliner_config_{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let good = dir.join("good.json");
    std::fs::write(&good, r#"{"canvas": {"width": 540, "height": 675}, "padding": 35}"#).unwrap();
    let cfg = EngineConfig::from_path(&good).unwrap();
    assert_eq!(cfg.canvas.width, 540);

    let bad = dir.join("bad.json");
    std::fs::write(&bad, r#"{"padding": 400, "canvas": {"width": 540, "height": 675}}"#).unwrap();
    assert!(EngineConfig::from_path(&bad).is_err());
    assert!(EngineConfig::from_path(dir.join("missing.json")).is_err());
}
