//! Gallery works shown in the carousel and on the gallery pages.

use serde::Serialize;
use utoipa::ToSchema;

use super::locale::Locale;
use super::slug::is_valid_slug;

/// Validation errors returned by [`GalleryItem::new`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GalleryItemValidationError {
    /// The slug is empty or contains characters outside `[a-z0-9-]`.
    #[error("gallery slug '{slug}' must contain only lowercase letters, digits, and hyphens")]
    InvalidSlug { slug: String },
    /// The title is blank.
    #[error("gallery title must not be empty")]
    EmptyTitle,
    /// The image reference is blank.
    #[error("gallery image source must not be empty")]
    EmptySource,
}

/// One artwork entry.
///
/// ## Invariants
/// - `slug` satisfies the URL slug rules.
/// - `title` and `src` are non-blank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GalleryItem {
    /// Image path relative to the site root.
    #[schema(example = "/images/1.jpg")]
    src: String,
    /// Display title.
    #[schema(example = "Moneda Fracturistă")]
    title: String,
    /// Short caption.
    caption: String,
    /// URL identifier.
    #[schema(example = "moneda-fracturista")]
    slug: String,
}

impl GalleryItem {
    /// Validate and build a gallery entry.
    ///
    /// # Examples
    /// ```
    /// use fracturism::domain::{GalleryItem, Locale};
    ///
    /// let item = GalleryItem::new("/images/3.jpg", "Separator", "Pauză.", "separator")
    ///     .expect("valid item");
    /// assert_eq!(item.href(Locale::En), "/en/galerie/separator");
    /// ```
    pub fn new(
        src: impl Into<String>,
        title: impl Into<String>,
        caption: impl Into<String>,
        slug: impl Into<String>,
    ) -> Result<Self, GalleryItemValidationError> {
        let src = src.into();
        let title = title.into();
        let slug = slug.into();
        if src.trim().is_empty() {
            return Err(GalleryItemValidationError::EmptySource);
        }
        if title.trim().is_empty() {
            return Err(GalleryItemValidationError::EmptyTitle);
        }
        if !is_valid_slug(&slug) {
            return Err(GalleryItemValidationError::InvalidSlug { slug });
        }
        Ok(Self {
            src,
            title,
            caption: caption.into(),
            slug,
        })
    }

    /// Image path relative to the site root.
    pub fn src(&self) -> &str {
        &self.src
    }

    /// Display title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Short description shown under the image.
    pub fn caption(&self) -> &str {
        &self.caption
    }

    /// URL segment of the detail page.
    pub fn slug(&self) -> &str {
        &self.slug
    }

    /// Link target of the work's detail page in `locale`.
    #[must_use]
    pub fn href(&self, locale: Locale) -> String {
        format!("/{locale}/galerie/{}", self.slug)
    }
}
