//! MIME type classification.

/// Image types accepted by the strict check.
pub const IMAGE_MIME_TYPES: [&str; 6] = [
  "image/gif",
  "image/jpeg",
  "image/pjpeg",
  "image/png",
  "image/svg+xml",
  "image/bmp",
];

/// Is `mime` an image type?
///
/// Strict mode only accepts the exact entries of [`IMAGE_MIME_TYPES`].
/// Non-strict mode is a plain substring test for `image`, so it will also
/// accept things like `application/x-image-meta`. Known approximation.
pub fn is_image_type(mime: &str, strict: bool) -> bool {
  if strict {
    IMAGE_MIME_TYPES.contains(&mime)
  } else {
    mime.contains("image")
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn strict_uses_allow_list() {
    assert!(is_image_type("image/png", true));
    assert!(is_image_type("image/svg+xml", true));
    assert!(!is_image_type("image/webp", true));
    assert!(!is_image_type("IMAGE/PNG", true));
    assert!(!is_image_type("text/html", true));
  }

  #[test]
  fn loose_mode_is_substring_match() {
    assert!(is_image_type("image/webp", false));
    assert!(is_image_type("application/x-image-meta", false));
    assert!(!is_image_type("video/mp4", false));
    assert!(!is_image_type("", false));
  }
}
