use crate::error::ValidationError;
use crate::workflow::types::MediaType;
use std::path::Path;

/// Largest image the app will accept: 5 MiB.
pub const MAX_IMAGE_BYTES: u64 = 5 * 1024 * 1024;

/// Checks a candidate before anything is read into memory. The size rule
/// runs first so an oversized file always reports the size message, even
/// when its format is also wrong.
pub fn validate_candidate(path: &Path, size: u64) -> Result<MediaType, ValidationError> {
    if size > MAX_IMAGE_BYTES {
        return Err(ValidationError::TooLarge);
    }
    MediaType::from_path(path).ok_or(ValidationError::UnsupportedFormat)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_jpeg_and_png() {
        assert_eq!(
            validate_candidate(Path::new("photo.png"), 1024),
            Ok(MediaType::Png)
        );
        assert_eq!(
            validate_candidate(Path::new("photo.jpg"), 1024),
            Ok(MediaType::Jpeg)
        );
        assert_eq!(
            validate_candidate(Path::new("photo.jpeg"), 1024),
            Ok(MediaType::Jpeg)
        );
        assert_eq!(
            validate_candidate(Path::new("PHOTO.PNG"), 1024),
            Ok(MediaType::Png)
        );
    }

    #[test]
    fn test_rejects_other_formats() {
        assert_eq!(
            validate_candidate(Path::new("anim.gif"), 1024),
            Err(ValidationError::UnsupportedFormat)
        );
        assert_eq!(
            validate_candidate(Path::new("doc.pdf"), 1024),
            Err(ValidationError::UnsupportedFormat)
        );
        assert_eq!(
            validate_candidate(Path::new("noextension"), 1024),
            Err(ValidationError::UnsupportedFormat)
        );
    }

    #[test]
    fn test_rejects_oversized_regardless_of_format() {
        assert_eq!(
            validate_candidate(Path::new("big.png"), MAX_IMAGE_BYTES + 1),
            Err(ValidationError::TooLarge)
        );
        assert_eq!(
            validate_candidate(Path::new("big.gif"), MAX_IMAGE_BYTES + 1),
            Err(ValidationError::TooLarge)
        );
    }

    #[test]
    fn test_size_limit_is_inclusive() {
        assert_eq!(
            validate_candidate(Path::new("edge.png"), MAX_IMAGE_BYTES),
            Ok(MediaType::Png)
        );
    }
}
