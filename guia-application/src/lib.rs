#[macro_use]
extern crate log;

mod create_listing;
mod delete_listing;
mod delete_user;
mod moderate_listing;
mod register_user;
mod update_listing;

pub mod prelude {
    pub use super::{
        create_listing::*, delete_listing::*, delete_user::*, moderate_listing::*,
        register_user::*, update_listing::*,
    };
}

pub mod error;

pub type Result<T> = std::result::Result<T, error::AppError>;

pub(crate) use guia_core::{
    entities::*, gateways::image_storage::ImageStorageGateway, repositories::*, usecases,
};

#[cfg(test)]
pub(crate) mod tests;

pub(crate) mod sqlite {
    pub use guia_db_sqlite::Connections;
}

/// Byte limit per uploaded image file.
pub const MAX_IMAGE_BYTES: usize = 2 * 1024 * 1024;

/// Gallery size limit per listing.
pub const MAX_GALLERY_IMAGES: usize = 6;

/// Uploaded image files accompanying a listing write request.
#[derive(Debug, Clone, Default)]
pub struct ListingImages {
    pub cover: Option<Vec<u8>>,
    pub gallery: Vec<Vec<u8>>,
}

impl ListingImages {
    fn check_limits(&self, gallery_slots_taken: usize) -> std::result::Result<(), usecases::Error> {
        if gallery_slots_taken + self.gallery.len() > MAX_GALLERY_IMAGES {
            return Err(usecases::Error::GalleryLimit);
        }
        if self
            .cover
            .iter()
            .chain(self.gallery.iter())
            .any(|bytes| bytes.len() > MAX_IMAGE_BYTES)
        {
            return Err(usecases::Error::ImageSize);
        }
        Ok(())
    }
}
