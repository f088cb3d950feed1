use std::io::Cursor;

use super::*;

fn png_bytes(img: image::RgbaImage) -> Vec<u8> {
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[test]
fn decode_png_dimensions() {
    let bytes = png_bytes(image::RgbaImage::from_raw(2, 1, vec![1, 2, 3, 255, 4, 5, 6, 255]).unwrap());
    let img = decode_image(&bytes).unwrap();
    assert_eq!((img.width(), img.height()), (2, 1));
}

#[test]
fn decode_garbage_is_an_error() {
    assert!(decode_image(b"definitely not an image").is_err());
}

#[test]
fn read_missing_file_is_an_error() {
    assert!(read_image_bytes(Path::new("does/not/exist.png")).is_err());
}

#[test]
fn cover_crop_trims_wide_sources_horizontally() {
    // 2000x1000 into 4:5 keeps full height and a centered 800px wide window.
    let crop = cover_crop_rect(2000, 1000, 1080, 1350);
    assert_eq!(crop.height, 1000);
    assert_eq!(crop.width, 800);
    assert_eq!(crop.x, 600);
    assert_eq!(crop.y, 0);
}

#[test]
fn cover_crop_trims_tall_sources_vertically() {
    let crop = cover_crop_rect(1000, 3000, 1080, 1350);
    assert_eq!(crop.width, 1000);
    assert_eq!(crop.height, 1250);
    assert_eq!(crop.x, 0);
    assert_eq!(crop.y, 875);
}

#[test]
fn cover_crop_with_matching_ratio_is_identity() {
    let crop = cover_crop_rect(540, 675, 1080, 1350);
    assert_eq!(
        crop,
        CropRect {
            x: 0,
            y: 0,
            width: 540,
            height: 675
        }
    );
}

#[test]
fn cover_fit_produces_exact_canvas_size() {
    let img = image::DynamicImage::ImageRgba8(image::RgbaImage::from_pixel(
        40,
        10,
        image::Rgba([10, 20, 30, 255]),
    ));
    let canvas = Canvas::new(8, 10).unwrap();
    let prepared = cover_fit(&img, canvas);
    assert_eq!((prepared.width, prepared.height), (8, 10));
    assert_eq!(prepared.rgba8_premul.len(), 8 * 10 * 4);
    // Uniform source stays uniform through crop and resample.
    for px in prepared.rgba8_premul.chunks_exact(4) {
        assert_eq!(px, &[10, 20, 30, 255]);
    }
}

#[test]
fn cover_fit_premultiplies_translucent_pixels() {
    let img = image::DynamicImage::ImageRgba8(image::RgbaImage::from_pixel(
        4,
        4,
        image::Rgba([200, 100, 50, 128]),
    ));
    let prepared = cover_fit(&img, Canvas::new(4, 4).unwrap());
    assert_eq!(&prepared.rgba8_premul[..4], &[100, 50, 25, 128]);
}
