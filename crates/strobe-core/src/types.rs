//! Wire and presentation data types.
//!
//! [`Photo`] mirrors the remote JSON record; the engine treats it as opaque
//! apart from [`Photo::id`]. [`PhotoSummary`] is the projection handed to
//! consumers, with the title fallback and derived aspect ratio applied.

use serde::{Deserialize, Serialize};

/// One photo record as returned by the remote source.
///
/// The identifier is the only field the paging engine ever inspects; the
/// rest is carried through untouched for the presentation projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Photo {
    /// Unique, stable identifier.
    pub id: String,
    /// Free-form description; may be absent or blank.
    #[serde(default)]
    pub description: Option<String>,
    /// Like count at fetch time.
    #[serde(default)]
    pub likes: u32,
    /// Pixel width.
    pub width: u32,
    /// Pixel height.
    pub height: u32,
    /// Dominant color as a hex string, when the source provides one.
    #[serde(default)]
    pub color: Option<String>,
    /// Blurhash placeholder string, when the source provides one.
    #[serde(default)]
    pub blur_hash: Option<String>,
    /// Creation timestamp, kept as an opaque string.
    #[serde(default)]
    pub created_at: Option<String>,
    /// Image URLs at the source's standard sizes.
    pub urls: PhotoUrls,
}

/// Image URLs at the standard remote sizes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhotoUrls {
    /// Original upload.
    pub raw: String,
    /// Full resolution.
    pub full: String,
    /// Display resolution.
    pub regular: String,
    /// Small preview.
    pub small: String,
    /// Thumbnail.
    pub thumb: String,
}

impl Photo {
    /// Project this record into its presentation summary.
    #[must_use]
    pub fn to_summary(&self) -> PhotoSummary {
        let description = self
            .description
            .as_deref()
            .filter(|d| !d.trim().is_empty());
        PhotoSummary {
            id: self.id.clone(),
            title: description
                .map_or_else(|| format!("Photo #{}", self.id), ToString::to_string),
            description: description.map(ToString::to_string),
            likes: self.likes,
            width: self.width,
            height: self.height,
            aspect_ratio: if self.height == 0 {
                1.0
            } else {
                self.width as f32 / self.height as f32
            },
            thumbnail_url: self.urls.small.clone(),
            full_image_url: self.urls.full.clone(),
            accent_color: self
                .color
                .as_deref()
                .filter(|c| !c.trim().is_empty())
                .map(ToString::to_string),
        }
    }
}

/// Presentation-facing view of a photo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhotoSummary {
    /// Identifier, unchanged from the wire record.
    pub id: String,
    /// Description, or `"Photo #<id>"` when absent or blank.
    pub title: String,
    /// Original description when present and non-blank.
    pub description: Option<String>,
    /// Like count.
    pub likes: u32,
    /// Pixel width.
    pub width: u32,
    /// Pixel height.
    pub height: u32,
    /// Width over height; `1.0` when height is zero.
    pub aspect_ratio: f32,
    /// Small preview URL.
    pub thumbnail_url: String,
    /// Full resolution URL.
    pub full_image_url: String,
    /// Dominant color hex when non-blank.
    pub accent_color: Option<String>,
}

#[cfg(test)]
pub(crate) fn test_photo(id: &str) -> Photo {
    Photo {
        id: id.to_string(),
        description: Some(format!("photo {id}")),
        likes: 7,
        width: 1200,
        height: 800,
        color: Some("#60544D".to_string()),
        blur_hash: Some("LFC$yHwc8^$yIAS$%M%00KxukYIp".to_string()),
        created_at: Some("2016-05-03T11:00:28-04:00".to_string()),
        urls: PhotoUrls {
            raw: format!("https://images.example.com/{id}?raw"),
            full: format!("https://images.example.com/{id}?full"),
            regular: format!("https://images.example.com/{id}?regular"),
            small: format!("https://images.example.com/{id}?small"),
            thumb: format!("https://images.example.com/{id}?thumb"),
        },
    }
}
