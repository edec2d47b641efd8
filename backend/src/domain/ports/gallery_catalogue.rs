//! Read-side port for the gallery of works.
//!
//! The catalogue is locale-aware so a translated source can replace the
//! fixture without touching the HTTP adapter. Lookups by slug return `None`
//! for unknown works rather than an error.

use async_trait::async_trait;

use crate::domain::{GalleryItem, GalleryItemValidationError, Locale};

use super::define_port_error;

define_port_error! {
    /// Errors raised when reading the gallery.
    pub enum GalleryCatalogueError {
        /// The backing source could not be read.
        Unavailable { message: String } =>
            "gallery source unavailable: {message}",
        /// A stored entry failed validation.
        InvalidEntry { message: String } =>
            "gallery entry is invalid: {message}",
    }
}

impl From<GalleryItemValidationError> for GalleryCatalogueError {
    fn from(err: GalleryItemValidationError) -> Self {
        Self::invalid_entry(err.to_string())
    }
}

/// Port for listing gallery works.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GalleryCatalogue: Send + Sync {
    /// All works in display order for `locale`.
    async fn items(&self, locale: Locale) -> Result<Vec<GalleryItem>, GalleryCatalogueError>;

    /// The work identified by `slug`, if present.
    async fn by_slug(
        &self,
        locale: Locale,
        slug: &str,
    ) -> Result<Option<GalleryItem>, GalleryCatalogueError> {
        Ok(self
            .items(locale)
            .await?
            .into_iter()
            .find(|item| item.slug() == slug))
    }
}

const FIXTURE_WORKS: [(&str, &str, &str, &str); 4] = [
    (
        "/images/profil.webp",
        "Portret și Materie",
        "Chipul din apropiere devine textură. Fractura nu ascunde, dezvăluie, o poartă spre sens.",
        "portret-si-materie",
    ),
    (
        "/images/1.jpg",
        "Moneda Fracturistă",
        "O emblemă care adună fisuri și le alchimizează în simbol. Valoarea nu e netedă.",
        "moneda-fracturista",
    ),
    (
        "/images/2.jpg",
        "Ornament, Ordine, Ruptură",
        "Ordinea se naște din tensiune. Un limbaj decorativ din fărâme coerente.",
        "ornament-ordine-ruptura",
    ),
    (
        "/images/3.jpg",
        "Separator",
        "O pauză vizuală care taie și unește. Respirația dintre două intenții.",
        "separator",
    ),
];

/// Built-in catalogue of the four published works.
///
/// Titles and captions are Romanian for every locale until translations
/// exist.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureGalleryCatalogue;

#[async_trait]
impl GalleryCatalogue for FixtureGalleryCatalogue {
    async fn items(&self, _locale: Locale) -> Result<Vec<GalleryItem>, GalleryCatalogueError> {
        FIXTURE_WORKS
            .into_iter()
            .map(|(src, title, caption, slug)| {
                GalleryItem::new(src, title, caption, slug).map_err(GalleryCatalogueError::from)
            })
            .collect()
    }
}
