// Low-level database access traits.
// Each repository is responsible for a single entity and
// its relationships. Related entities are only referenced
// by their id and never modified or loaded by another
// repository.

use crate::entities::*;
use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("The requested object could not be found")]
    NotFound,
    #[error("The object already exists")]
    AlreadyExists,
    #[error("The object is still referenced by other objects")]
    Conflict,
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

type Result<T> = std::result::Result<T, Error>;

#[derive(Clone, Debug, Copy, Default, PartialEq, Eq, Hash)]
pub struct Pagination {
    pub offset: Option<u64>,
    pub limit: Option<u64>,
}

/// Filter parameters for listing queries.
///
/// `status = None` returns listings independent of their current
/// moderation status. The text filter matches case-insensitive
/// title substrings.
#[derive(Clone, Debug, Default)]
pub struct ListingQuery {
    pub bbox: Option<MapBbox>,
    pub categories: Vec<Id>,
    pub listing_types: Vec<Id>,
    pub status: Option<ListingStatus>,
    pub owner_email: Option<EmailAddress>,
    pub text: Option<String>,
}

pub trait ListingRepo {
    fn create_listing(&self, listing: Listing) -> Result<()>;
    fn update_listing(&self, listing: &Listing) -> Result<()>;
    fn delete_listing(&self, id: &Id) -> Result<()>;

    fn get_listing(&self, id: &Id) -> Result<Listing>;
    fn get_listing_by_slug(&self, slug: &str) -> Result<Listing>;

    fn query_listings(&self, query: &ListingQuery, pagination: &Pagination)
        -> Result<Vec<Listing>>;
    fn count_listings(&self) -> Result<usize>;
    fn count_listings_of_category(&self, category_id: &Id) -> Result<usize>;
    fn count_listings_of_listing_type(&self, listing_type_id: &Id) -> Result<usize>;
    fn count_listings_of_owner(&self, owner_email: &EmailAddress) -> Result<usize>;
}

pub trait CategoryRepo {
    fn create_category(&self, category: &Category) -> Result<()>;
    fn update_category(&self, category: &Category) -> Result<()>;

    // Fails with Error::Conflict if the category still has
    // subcategories or listings.
    fn delete_category(&self, id: &Id) -> Result<()>;

    fn get_category(&self, id: &Id) -> Result<Category>;
    fn all_categories(&self) -> Result<Vec<Category>>;
}

pub trait ListingTypeRepo {
    fn create_listing_type(&self, listing_type: &ListingType) -> Result<()>;
    fn update_listing_type(&self, listing_type: &ListingType) -> Result<()>;

    // Fails with Error::Conflict if listings of this type exist.
    fn delete_listing_type(&self, id: &Id) -> Result<()>;

    fn get_listing_type(&self, id: &Id) -> Result<ListingType>;
    fn get_listing_type_by_slug(&self, slug: &str) -> Result<ListingType>;
    fn all_listing_types(&self) -> Result<Vec<ListingType>>;
}

pub trait UserRepo {
    fn create_user(&self, user: &User) -> Result<()>;
    fn update_user(&self, user: &User) -> Result<()>;
    fn delete_user_by_email(&self, email: &EmailAddress) -> Result<()>;

    fn all_users(&self) -> Result<Vec<User>>;
    fn count_users(&self) -> Result<usize>;

    fn get_user_by_email(&self, email: &EmailAddress) -> Result<User>;
    fn try_get_user_by_email(&self, email: &EmailAddress) -> Result<Option<User>>;
}
