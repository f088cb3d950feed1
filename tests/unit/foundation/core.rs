use super::*;

#[test]
fn canvas_rejects_zero_dimensions() {
    assert!(Canvas::new(0, 10).is_err());
    assert!(Canvas::new(10, 0).is_err());
    let err = Canvas::new(0, 0).unwrap_err();
    assert!(err.is_validation());
}

#[test]
fn canvas_rejects_dimensions_beyond_raster_limit() {
    assert!(Canvas::new(70_000, 10).is_err());
    assert!(Canvas::new(65_535, 1).is_ok());
}

#[test]
fn default_canvas_is_portrait_card() {
    let c = Canvas::default();
    assert_eq!((c.width, c.height), (1080, 1350));
    assert_eq!(c.pixel_count(), 1080 * 1350);
    assert_eq!(c.rect(), Rect::new(0.0, 0.0, 1080.0, 1350.0));
}

#[test]
fn premul_rounds_to_nearest() {
    let p = Rgba8Premul::from_straight_rgba(255, 128, 0, 128);
    assert_eq!(p.to_array(), [128, 64, 0, 128]);
    assert_eq!(Rgba8Premul::transparent().to_array(), [0, 0, 0, 0]);
}
