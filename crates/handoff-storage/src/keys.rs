//! Key generation for uploaded images.
//!
//! Key format: `uploads/{image_id}/{filename}`.

use crate::traits::{StorageError, StorageResult};
use handoff_core::models;
use uuid::Uuid;

const UPLOAD_PREFIX: &str = "uploads";

/// Generate the storage key for an image.
///
/// The filename must be a single path segment: no separators, no NUL byte and
/// not `.` or `..`.
pub fn upload_key(image_id: Uuid, filename: &str) -> StorageResult<String> {
    validate_filename(filename)?;
    Ok(format!("{}/{}/{}", UPLOAD_PREFIX, image_id, filename))
}

fn validate_filename(filename: &str) -> StorageResult<()> {
    models::validate_filename(filename).map_err(|e| {
        StorageError::InvalidKey(
            e.message
                .map(|m| m.into_owned())
                .unwrap_or_else(|| format!("Invalid filename '{}'", filename)),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_layout() {
        let id = Uuid::parse_str("6f1c1f9e-5d3a-4c1b-9a8e-2f7d0c4b1a23").unwrap();
        assert_eq!(
            upload_key(id, "shoe.webp").unwrap(),
            "uploads/6f1c1f9e-5d3a-4c1b-9a8e-2f7d0c4b1a23/shoe.webp"
        );
    }

    #[test]
    fn test_filenames_with_dots_are_fine() {
        assert!(upload_key(Uuid::new_v4(), "archive.tar.gz").is_ok());
        assert!(upload_key(Uuid::new_v4(), "..hidden").is_ok());
    }

    #[test]
    fn test_traversal_and_separators_are_rejected() {
        let id = Uuid::new_v4();
        for bad in ["", ".", "..", "../etc/passwd", "a/b.png", "a\\b.png", "a\0b"] {
            assert!(
                matches!(upload_key(id, bad), Err(StorageError::InvalidKey(_))),
                "{bad:?} should be rejected"
            );
        }
    }
}
