//! EXIF orientation lookup.

use std::io::Cursor;

use exif::{In, Reader, Tag};

use super::MetadataError;

/// Reads the raw EXIF orientation value from an encoded buffer.
pub trait MetadataReader: Send + Sync {
    fn read_orientation_tag(&self, bytes: &[u8]) -> Result<u32, MetadataError>;
}

/// Default reader backed by `kamadak-exif`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExifReader;

impl MetadataReader for ExifReader {
    fn read_orientation_tag(&self, bytes: &[u8]) -> Result<u32, MetadataError> {
        read_orientation_tag(bytes)
    }
}

/// Extract the raw EXIF orientation value from JPEG (or other container) bytes.
///
/// The value is returned unvalidated; mapping it to a transform is the
/// caller's concern.
pub fn read_orientation_tag(bytes: &[u8]) -> Result<u32, MetadataError> {
    let mut cursor = Cursor::new(bytes);

    let exif = match Reader::new().read_from_container(&mut cursor) {
        Ok(exif) => exif,
        Err(exif::Error::NotFound(_)) => return Err(MetadataError::NotFound),
        Err(e) => return Err(MetadataError::Unparsable(e.to_string())),
    };

    let field = exif
        .get_field(Tag::Orientation, In::PRIMARY)
        .ok_or(MetadataError::NotFound)?;

    field.value.get_uint(0).ok_or_else(|| {
        MetadataError::Unparsable(format!("orientation is not an integer: {:?}", field.value))
    })
}
