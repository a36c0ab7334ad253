//! Uploaded pictures: decoding, storage under the media root, and the
//! post-save shrink step for profile pictures.

use std::path::{Path, PathBuf};

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use image::ImageFormat;
use uuid::Uuid;

use crate::error::AppError;

/// Profile pictures are kept within this bounding box.
pub const PROFILE_PICTURE_BOUNDS: (u32, u32) = (150, 150);

const PROFILE_PICTURE_DIR: &str = "profile_pics";

/// A picture that has been decoded and checked but not yet written to disk.
#[derive(Debug, Clone)]
pub struct DecodedPicture {
    bytes: Vec<u8>,
    format: ImageFormat,
}

impl DecodedPicture {
    /// Decode a base64 payload and make sure it is a PNG or JPEG image.
    pub fn from_base64(encoded: &str) -> Result<Self, AppError> {
        let bytes = STANDARD
            .decode(encoded.trim())
            .map_err(|_| AppError::Validation("Picture: Upload a valid image.".to_string()))?;

        let format = image::guess_format(&bytes)
            .ok()
            .filter(|f| matches!(f, ImageFormat::Png | ImageFormat::Jpeg))
            .ok_or_else(|| {
                AppError::Validation(
                    "Picture: Upload a valid image. Only PNG and JPEG are accepted.".to_string(),
                )
            })?;

        image::load_from_memory_with_format(&bytes, format).map_err(|_| {
            AppError::Validation(
                "Picture: The file you uploaded was either not an image or a corrupted image."
                    .to_string(),
            )
        })?;

        Ok(Self { bytes, format })
    }

    /// Write the picture under `media_root/profile_pics/` with a fresh name.
    /// Returns the path relative to the media root, as stored on the profile.
    pub fn store_profile_picture(&self, media_root: &Path) -> Result<String, AppError> {
        let dir = media_root.join(PROFILE_PICTURE_DIR);
        std::fs::create_dir_all(&dir)?;

        let extension = self.format.extensions_str().first().copied().unwrap_or("img");
        let file_name = format!("{}.{extension}", Uuid::new_v4());
        std::fs::write(dir.join(&file_name), &self.bytes)?;

        Ok(format!("{PROFILE_PICTURE_DIR}/{file_name}"))
    }
}

/// Resolve a stored picture path against the media root.
pub fn media_path(media_root: &Path, stored: &str) -> PathBuf {
    media_root.join(stored)
}

/// Remove a stored picture that never made it onto a saved profile.
/// A file that is already gone is not an error.
pub fn discard(media_root: &Path, stored: &str) {
    let path = media_path(media_root, stored);
    match std::fs::remove_file(&path) {
        Ok(()) => tracing::debug!("Removed unused picture {}", path.display()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => tracing::warn!("Could not remove unused picture {}: {e}", path.display()),
    }
}

/// Shrink the image at `path` in place so it fits within `max_width`×`max_height`,
/// keeping its aspect ratio. Images already inside the box are left untouched.
///
/// Returns whether the file was rewritten.
pub fn shrink_to_fit(path: &Path, max_width: u32, max_height: u32) -> Result<bool, AppError> {
    let img = image::open(path)?;
    if img.width() <= max_width && img.height() <= max_height {
        return Ok(false);
    }

    let thumb = img.thumbnail(max_width, max_height);
    thumb.save(path)?;
    tracing::debug!(
        "Shrunk {} from {}x{} to {}x{}",
        path.display(),
        img.width(),
        img.height(),
        thumb.width(),
        thumb.height()
    );
    Ok(true)
}
