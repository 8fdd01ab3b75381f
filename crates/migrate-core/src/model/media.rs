//! Product image type.

use crate::ids::ImageId;
use serde::{Deserialize, Serialize};

/// A product or variant image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    pub id: Option<ImageId>,
    /// URL or path of the image file. Never empty.
    pub path: String,
    /// Alt text or file name.
    pub name: Option<String>,
    /// Source sort position, carried through as-is.
    pub position: Option<i32>,
    /// Inline image payload, when the target wants uploads instead of URLs.
    pub base64_attachment: Option<String>,
    #[serde(default)]
    pub is_cover: bool,
}

impl Image {
    /// Create an image pointing at `path`.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            id: None,
            path: path.into(),
            name: None,
            position: None,
            base64_attachment: None,
            is_cover: false,
        }
    }

    /// Last path segment without query string, e.g. `img.jpg`.
    pub fn file_name(&self) -> Option<&str> {
        let without_query = self.path.split(['?', '#']).next().unwrap_or_default();
        without_query
            .rsplit('/')
            .next()
            .filter(|segment| !segment.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_defaults() {
        let image = Image::new("http://x/img.jpg");
        assert!(!image.is_cover);
        assert!(image.base64_attachment.is_none());
    }

    #[test]
    fn test_file_name() {
        let image = Image::new("https://cdn.example.com/files/shirt.jpg?v=1712");
        assert_eq!(image.file_name(), Some("shirt.jpg"));

        let bare = Image::new("https://cdn.example.com/files/");
        assert_eq!(bare.file_name(), None);
    }
}
