//! Tests for PNG encoding of rendered figures.
//!
//! Checks that banded contour-like images take the indexed path, that the
//! RGBA fallback is used for smooth images, and that both decode back to the
//! original pixels.

use renderer::png::{encode_indexed, encode_png, encode_rgba};

// ============================================================================
// Helper functions
// ============================================================================

/// Eight vertical jet-like bands, like a filled-contour figure.
fn banded_pixels(width: usize, height: usize) -> Vec<u8> {
    let colors = [
        [0, 0, 128],
        [0, 0, 255],
        [0, 128, 255],
        [0, 255, 255],
        [128, 255, 128],
        [255, 255, 0],
        [255, 128, 0],
        [128, 0, 0],
    ];
    let mut pixels = Vec::with_capacity(width * height * 4);
    for _ in 0..height {
        for x in 0..width {
            let [r, g, b] = colors[x * colors.len() / width];
            pixels.extend_from_slice(&[r, g, b, 255]);
        }
    }
    pixels
}

fn smooth_pixels(width: usize, height: usize) -> Vec<u8> {
    let mut pixels = Vec::with_capacity(width * height * 4);
    for y in 0..height {
        for x in 0..width {
            pixels.extend_from_slice(&[x as u8, y as u8, ((x + y) % 256) as u8, 255]);
        }
    }
    pixels
}

fn color_type(png: &[u8]) -> u8 {
    png[25]
}

// ============================================================================
// Format selection
// ============================================================================

#[test]
fn test_banded_image_is_indexed() {
    let png = encode_png(&banded_pixels(256, 64), 256, 64, 100).unwrap();
    assert_eq!(color_type(&png), 3);
}

#[test]
fn test_smooth_image_is_rgba() {
    let png = encode_png(&smooth_pixels(256, 64), 256, 64, 100).unwrap();
    assert_eq!(color_type(&png), 6);
}

#[test]
fn test_indexed_smaller_than_rgba() {
    let pixels = banded_pixels(512, 256);
    let indexed = encode_png(&pixels, 512, 256, 100).unwrap();
    let rgba = encode_rgba(&pixels, 512, 256, 100).unwrap();
    assert!(indexed.len() < rgba.len());
}

// ============================================================================
// Decoding
// ============================================================================

#[test]
fn test_indexed_decodes_to_original() {
    let (w, h) = (200, 100);
    let pixels = banded_pixels(w, h);
    let png = encode_png(&pixels, w, h, 100).unwrap();

    let img = image::load_from_memory(&png).unwrap().to_rgba8();
    assert_eq!((img.width(), img.height()), (w as u32, h as u32));
    assert_eq!(img.into_raw(), pixels);
}

#[test]
fn test_rgba_decodes_to_original() {
    let (w, h) = (64, 64);
    let pixels = smooth_pixels(w, h);
    let png = encode_png(&pixels, w, h, 100).unwrap();

    let img = image::load_from_memory(&png).unwrap().to_rgba8();
    assert_eq!(img.into_raw(), pixels);
}

#[test]
fn test_invalid_palette() {
    assert!(encode_indexed(&[], &[0], 1, 1, 100).is_err());
    assert!(encode_indexed(&[(0, 0, 0, 255)], &[0, 0], 1, 1, 100).is_err());
}
