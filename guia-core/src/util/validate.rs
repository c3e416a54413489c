use guia_entities::{geo::MapBbox, listing::Listing};
use thiserror::Error;

pub use fast_chemail::is_valid_email;

pub trait Validate {
    type Error;
    fn validate(&self) -> Result<(), Self::Error>;
}

pub fn is_valid_bbox(bbox: &MapBbox) -> bool {
    bbox.is_valid() && !bbox.is_empty()
}

#[derive(Debug, Error)]
pub enum ListingInvalidation {
    #[error("Invalid title")]
    Title,
    #[error("Invalid position")]
    Position,
    #[error("Invalid contact email")]
    ContactEmail,
}

impl Validate for Listing {
    type Error = ListingInvalidation;
    fn validate(&self) -> Result<(), Self::Error> {
        if self.title.trim().is_empty() {
            return Err(Self::Error::Title);
        }
        if !self.position.is_valid() {
            return Err(Self::Error::Position);
        }
        if !is_valid_email(&self.email) {
            return Err(Self::Error::ContactEmail);
        }
        Ok(())
    }
}
