//! Domain ports for the driven side of the service.
//!
//! Adapters implement these traits and map their failures into the typed
//! errors declared here.

mod macros;
pub(crate) use macros::define_port_error;

mod gallery_catalogue;

#[cfg(test)]
pub use gallery_catalogue::MockGalleryCatalogue;
pub use gallery_catalogue::{
    FixtureGalleryCatalogue, GalleryCatalogue, GalleryCatalogueError,
};
