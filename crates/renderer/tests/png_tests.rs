//! Tests for PNG encoding.

use image::{Rgba, RgbaImage};
use renderer::encode_png;

/// Color type byte of the IHDR chunk.
fn color_type(png: &[u8]) -> u8 {
    assert_eq!(&png[12..16], b"IHDR");
    png[25]
}

#[test]
fn test_few_colors_encode_indexed() {
    let mut img = RgbaImage::from_pixel(40, 30, Rgba([0, 0, 0, 255]));
    for x in 0..20 {
        for y in 0..30 {
            img.put_pixel(x, y, Rgba([228, 225, 253, 255]));
        }
    }

    let png = encode_png(&img).unwrap();
    assert_eq!(&png[..8], &[137, 80, 78, 71, 13, 10, 26, 10]);
    assert_eq!(color_type(&png), 3);

    let decoded = image::load_from_memory(&png).unwrap().to_rgba8();
    assert_eq!(decoded, img);
}

#[test]
fn test_many_colors_encode_rgba() {
    let img = RgbaImage::from_fn(32, 32, |x, y| Rgba([(x * 8) as u8, (y * 8) as u8, 128, 255]));

    let png = encode_png(&img).unwrap();
    assert_eq!(color_type(&png), 6);

    let decoded = image::load_from_memory(&png).unwrap().to_rgba8();
    assert_eq!(decoded, img);
}

#[test]
fn test_transparency_survives_indexed() {
    let mut img = RgbaImage::from_pixel(4, 4, Rgba([255, 0, 0, 255]));
    img.put_pixel(0, 0, Rgba([0, 0, 0, 0]));

    let png = encode_png(&img).unwrap();
    assert_eq!(color_type(&png), 3);

    let decoded = image::load_from_memory(&png).unwrap().to_rgba8();
    assert_eq!(decoded.get_pixel(0, 0)[3], 0);
    assert_eq!(decoded.get_pixel(1, 1), &Rgba([255, 0, 0, 255]));
}
