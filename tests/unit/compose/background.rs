use std::io::Cursor;

use super::*;

fn png(w: u32, h: u32, px: [u8; 4]) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(w, h, image::Rgba(px));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

fn canvas() -> Canvas {
    Canvas::new(8, 10).unwrap()
}

fn all_pixels(s: &Surface, expected: [u8; 4]) {
    for px in s.data.chunks_exact(4) {
        assert_eq!(px, &expected);
    }
}

#[test]
fn absent_image_uses_flat_color() {
    let out = compose_background(
        canvas(),
        &ImageSource::None,
        OverlayMode::None,
        Color::rgb(9, 9, 11),
    ).unwrap();
    assert_eq!(out.fallback, Some(BackgroundFallback::Absent));
    all_pixels(&out.surface, [9, 9, 11, 255]);
}

#[test]
fn dark_scrim_halves_the_background() {
    let out = compose_background(
        canvas(),
        &ImageSource::None,
        OverlayMode::Dark,
        Color::rgb(200, 100, 50),
    ).unwrap();
    all_pixels(&out.surface, [100, 50, 25, 255]);
}

#[test]
fn light_scrim_lifts_black() {
    let out =
        compose_background(canvas(), &ImageSource::None, OverlayMode::Light, Color::BLACK).unwrap();
    all_pixels(&out.surface, [128, 128, 128, 255]);
}

#[test]
fn decodable_image_covers_canvas() {
    let out = compose_background(
        canvas(),
        &ImageSource::Bytes(png(20, 10, [255, 0, 0, 255])),
        OverlayMode::None,
        Color::rgb(9, 9, 11),
    ).unwrap();
    assert_eq!(out.fallback, None);
    assert_eq!((out.surface.width, out.surface.height), (8, 10));
    all_pixels(&out.surface, [255, 0, 0, 255]);
}

#[test]
fn transparent_image_shows_theme_color() {
    let out = compose_background(
        canvas(),
        &ImageSource::Bytes(png(8, 10, [255, 255, 255, 0])),
        OverlayMode::None,
        Color::rgb(1, 2, 3),
    ).unwrap();
    assert_eq!(out.fallback, None);
    all_pixels(&out.surface, [1, 2, 3, 255]);
}

#[test]
fn undecodable_bytes_fall_back() {
    let out = compose_background(
        canvas(),
        &ImageSource::Bytes(b"not an image".to_vec()),
        OverlayMode::None,
        Color::rgb(9, 9, 11),
    ).unwrap();
    assert!(matches!(
        out.fallback,
        Some(BackgroundFallback::Undecodable(_))
    ));
    all_pixels(&out.surface, [9, 9, 11, 255]);
}

#[test]
fn unreadable_path_falls_back() {
    let out = compose_background(
        canvas(),
        &ImageSource::Path("definitely/missing/bg.jpg".into()),
        OverlayMode::Dark,
        Color::rgb(200, 100, 50),
    ).unwrap();
    assert!(matches!(out.fallback, Some(BackgroundFallback::Unreadable(_))));
    all_pixels(&out.surface, [100, 50, 25, 255]);
}

#[test]
fn overlay_mode_parses_snake_case() {
    let m: OverlayMode = serde_json::from_str(r#""light""#).unwrap();
    assert_eq!(m, OverlayMode::Light);
    assert_eq!(OverlayMode::default(), OverlayMode::Dark);
    assert_eq!(OverlayMode::None.scrim_color(), None);
}

#[test]
fn zero_sized_canvas_is_rejected() {
    let err = compose_background(
        Canvas {
            width: 0,
            height: 0,
        },
        &ImageSource::None,
        OverlayMode::Dark,
        Color::BLACK,
    )
    .unwrap_err();
    assert!(err.is_validation());
}
