use crate::{repositories, util::validate::ListingInvalidation};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("The title is invalid")]
    Title,
    #[error("Bounding box is invalid")]
    Bbox,
    #[error("Invalid email address")]
    EmailAddress,
    #[error("Invalid password")]
    Password,
    #[error("Invalid credentials")]
    Credentials,
    #[error("The user already exists")]
    UserExists,
    #[error("This is not allowed")]
    Forbidden,
    #[error("This is not allowed without auth")]
    Unauthorized,
    #[error("Invalid position")]
    InvalidPosition,
    #[error("Invalid listing status")]
    InvalidStatus,
    #[error("Invalid slug")]
    InvalidSlug,
    #[error("Too many gallery images")]
    GalleryLimit,
    #[error("Image file too large")]
    ImageSize,
    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<String>),
    #[error("The dynamic details are no valid JSON object")]
    InvalidDynamicDetails,
    #[error("Missing required dynamic fields: {}", .0.join(", "))]
    MissingDynamicFields(Vec<String>),
    #[error(transparent)]
    Repo(#[from] repositories::Error),
}

impl From<guia_entities::password::ParseError> for Error {
    fn from(_: guia_entities::password::ParseError) -> Self {
        Self::Password
    }
}

impl From<ListingInvalidation> for Error {
    fn from(err: ListingInvalidation) -> Self {
        match err {
            ListingInvalidation::Title => Self::Title,
            ListingInvalidation::Position => Self::InvalidPosition,
            ListingInvalidation::ContactEmail => Self::EmailAddress,
        }
    }
}
