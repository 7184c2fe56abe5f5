//! Fixtures shared by the unit tests.

use image::codecs::jpeg::JpegEncoder;
use image::{ExtendedColorType, ImageEncoder};

use crate::decode::DecodedImage;

pub const RED: [u8; 3] = [255, 0, 0];
pub const GREEN: [u8; 3] = [0, 255, 0];
pub const BLUE: [u8; 3] = [0, 0, 255];
pub const WHITE: [u8; 3] = [255, 255, 255];

/// Four flat quadrants: red, green / blue, white.
pub fn quadrant_image(width: u32, height: u32) -> DecodedImage {
    let mut pixels = Vec::with_capacity((width * height * 3) as usize);
    for y in 0..height {
        for x in 0..width {
            let colour = match (x < width / 2, y < height / 2) {
                (true, true) => RED,
                (false, true) => GREEN,
                (true, false) => BLUE,
                (false, false) => WHITE,
            };
            pixels.extend_from_slice(&colour);
        }
    }
    DecodedImage::new(width, height, pixels)
}

pub fn encode_test_jpeg(image: &DecodedImage) -> Vec<u8> {
    let mut out = Vec::new();
    JpegEncoder::new_with_quality(&mut out, 95)
        .write_image(&image.pixels, image.width, image.height, ExtendedColorType::Rgb8)
        .expect("test image encodes");
    out
}

/// Splice an APP1 EXIF segment carrying only an Orientation tag in after SOI.
pub fn with_exif_orientation(jpeg: &[u8], orientation: u16) -> Vec<u8> {
    // Big-endian TIFF header, IFD0 at offset 8 with one SHORT entry
    let mut tiff = vec![b'M', b'M', 0x00, 0x2A, 0x00, 0x00, 0x00, 0x08];
    tiff.extend_from_slice(&[0x00, 0x01]);
    tiff.extend_from_slice(&[0x01, 0x12, 0x00, 0x03, 0x00, 0x00, 0x00, 0x01]);
    tiff.extend_from_slice(&orientation.to_be_bytes());
    tiff.extend_from_slice(&[0x00, 0x00]);
    tiff.extend_from_slice(&[0x00, 0x00, 0x00, 0x00]);

    with_exif_payload(jpeg, &tiff)
}

/// Splice an APP1 segment holding `Exif\0\0` followed by `tiff` in after SOI.
pub fn with_exif_payload(jpeg: &[u8], tiff: &[u8]) -> Vec<u8> {
    assert_eq!(&jpeg[..2], &[0xFF, 0xD8], "not a JPEG");

    let mut payload = b"Exif\0\0".to_vec();
    payload.extend_from_slice(tiff);
    let segment_len = (payload.len() + 2) as u16;

    let mut out = Vec::with_capacity(jpeg.len() + payload.len() + 4);
    out.extend_from_slice(&jpeg[..2]);
    out.extend_from_slice(&[0xFF, 0xE1]);
    out.extend_from_slice(&segment_len.to_be_bytes());
    out.extend_from_slice(&payload);
    out.extend_from_slice(&jpeg[2..]);
    out
}

/// Lossy-compression tolerant colour match.
pub fn assert_close(actual: Option<[u8; 3]>, expected: [u8; 3]) {
    let actual = actual.expect("pixel inside image");
    let close = actual
        .iter()
        .zip(expected.iter())
        .all(|(a, e)| (*a as i16 - *e as i16).abs() <= 48);
    assert!(close, "expected ~{:?}, got {:?}", expected, actual);
}
