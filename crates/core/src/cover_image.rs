//! Cover image upload rules and stored-file naming.
//!
//! Uploaded bytes are sniffed rather than trusting the client's file name or
//! content type. Accepted files are stored under a generated name and exposed
//! under [`PUBLIC_PREFIX`].

use image::ImageFormat;

use crate::error::CoreError;

/// Multipart field carrying the cover image.
pub const FIELD_NAME: &str = "coverImage";

/// Default upper bound on an uploaded cover image (5 MiB).
pub const MAX_COVER_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// URL prefix under which stored uploads are served.
pub const PUBLIC_PREFIX: &str = "/uploads";

pub const FILE_TOO_LARGE_MESSAGE: &str = "File too large";
pub const NOT_AN_IMAGE_MESSAGE: &str = "Only image files are allowed";

/// Identify the image format from magic bytes and return the extension the
/// file is stored with.
pub fn detect_extension(bytes: &[u8]) -> Result<&'static str, CoreError> {
    let format = image::guess_format(bytes)
        .map_err(|_| CoreError::Validation(NOT_AN_IMAGE_MESSAGE.into()))?;
    match format {
        ImageFormat::Png => Ok("png"),
        ImageFormat::Jpeg => Ok("jpg"),
        ImageFormat::Gif => Ok("gif"),
        ImageFormat::WebP => Ok("webp"),
        _ => Err(CoreError::Validation(NOT_AN_IMAGE_MESSAGE.into())),
    }
}

/// Check size and format of an upload, returning the stored extension.
pub fn validate_upload(bytes: &[u8], max_bytes: usize) -> Result<&'static str, CoreError> {
    if bytes.len() > max_bytes {
        return Err(CoreError::Validation(FILE_TOO_LARGE_MESSAGE.into()));
    }
    detect_extension(bytes)
}

/// Generate a unique file name for a stored cover image.
pub fn stored_file_name(extension: &str) -> String {
    format!("{FIELD_NAME}-{}.{extension}", uuid::Uuid::new_v4())
}

/// Public path recorded on the project for a stored file.
pub fn public_path(file_name: &str) -> String {
    format!("{PUBLIC_PREFIX}/{file_name}")
}

/// Recover the stored file name from a public path.
///
/// Returns `None` for anything that is not a single plain file name under
/// [`PUBLIC_PREFIX`], so callers can never be steered outside the upload
/// directory.
pub fn file_name_from_public_path(path: &str) -> Option<&str> {
    let name = path.strip_prefix(PUBLIC_PREFIX)?.strip_prefix('/')?;
    let plain = !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\'])
        && !name.contains("..");
    plain.then_some(name)
}
