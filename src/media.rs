//! Validation of the `image` field: either a remote http(s) URL or an inline
//! `data:image/...;base64,` URL.

use base64::Engine;
use image::ImageFormat;
use url::Url;

use crate::error::AppError;

const INVALID_IMAGE: &str = "Invalid image data";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSource {
    Remote,
    Inline { format: ImageFormat, bytes: usize },
}

/// Checks that `raw` is something the vision service can fetch or decode.
pub fn inspect_image(raw: &str, max_bytes: usize) -> Result<ImageSource, AppError> {
    let raw = raw.trim();
    if let Some(rest) = raw.strip_prefix("data:") {
        return inspect_data_url(rest, max_bytes);
    }

    match Url::parse(raw) {
        Ok(url) if matches!(url.scheme(), "http" | "https") && url.host().is_some() => Ok(ImageSource::Remote),
        _ => Err(AppError::Validation(INVALID_IMAGE.to_string())),
    }
}

fn inspect_data_url(rest: &str, max_bytes: usize) -> Result<ImageSource, AppError> {
    let invalid = || AppError::Validation(INVALID_IMAGE.to_string());

    let (header, payload) = rest.split_once(',').ok_or_else(invalid)?;
    let mime = header.strip_suffix(";base64").ok_or_else(invalid)?;
    let subtype = mime.strip_prefix("image/").ok_or_else(invalid)?;
    if !is_mime_token(subtype) {
        return Err(invalid());
    }

    // base64 inflates by 4/3, so reject oversized payloads before decoding them
    if payload.len() / 4 * 3 > max_bytes + 3 {
        return Err(too_large(max_bytes));
    }
    let bytes = base64::engine::general_purpose::STANDARD
        .decode(payload.trim())
        .map_err(|_| invalid())?;
    if bytes.len() > max_bytes {
        return Err(too_large(max_bytes));
    }

    let format = image::guess_format(&bytes).map_err(|_| invalid())?;
    Ok(ImageSource::Inline { format, bytes: bytes.len() })
}

// RFC 2045 token characters, e.g. `png`, `svg+xml`, `vnd.microsoft.icon`
fn is_mime_token(value: &str) -> bool {
    !value.is_empty()
        && value
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b"!#$&-^_.+".contains(&b))
}

fn too_large(max_bytes: usize) -> AppError {
    AppError::Validation(format!("Image exceeds the {max_bytes} byte upload limit"))
}
