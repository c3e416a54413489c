mod authorize;
mod create_new_user;
mod delete_listing;
mod delete_user;
mod error;
mod login;
mod moderate_listing;
mod new_listing;
mod search_listings;
mod store_category;
mod store_listing_type;
mod update_listing;
mod validate_details;


type Result<T> = std::result::Result<T, Error>;

pub use self::{
    authorize::*, create_new_user::*, delete_listing::*, delete_user::*, error::Error, login::*,
    moderate_listing::*, new_listing::*, search_listings::*, store_category::*,
    store_listing_type::*, update_listing::*, validate_details::*,
};

mod prelude {
    pub use super::error::Error;
    pub type Result<T> = std::result::Result<T, Error>;
    pub use crate::{db::*, entities::*, repositories::*, RepoError};
}
use self::prelude::*;

pub fn get_listing<R: ListingRepo>(repo: &R, id: &Id) -> Result<Listing> {
    Ok(repo.get_listing(id)?)
}

pub fn get_published_listing_by_slug<R: ListingRepo>(repo: &R, slug: &str) -> Result<Listing> {
    let listing = repo.get_listing_by_slug(slug)?;
    if !listing.is_public() {
        return Err(Error::Repo(RepoError::NotFound));
    }
    Ok(listing)
}

pub fn get_owned_listing<R: ListingRepo>(
    repo: &R,
    id: &Id,
    owner_email: &EmailAddress,
) -> Result<Listing> {
    let listing = repo.get_listing(id)?;
    if !listing.is_owned_by(owner_email) {
        return Err(Error::Forbidden);
    }
    Ok(listing)
}

/// All listings of the given owner, newest first.
pub fn listings_of_owner<R: ListingRepo>(
    repo: &R,
    owner_email: &EmailAddress,
) -> Result<Vec<Listing>> {
    let query = ListingQuery {
        owner_email: Some(owner_email.clone()),
        ..Default::default()
    };
    let mut listings = repo.query_listings(&query, &Pagination::default())?;
    listings.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    Ok(listings)
}

pub fn all_categories<R: CategoryRepo>(repo: &R) -> Result<Vec<Category>> {
    Ok(repo.all_categories()?)
}

pub fn top_level_categories<R: CategoryRepo>(repo: &R) -> Result<Vec<Category>> {
    Ok(repo
        .all_categories()?
        .into_iter()
        .filter(Category::is_top_level)
        .collect())
}

pub fn subcategories_of<R: CategoryRepo>(repo: &R, parent_id: &Id) -> Result<Vec<Category>> {
    Ok(repo
        .all_categories()?
        .into_iter()
        .filter(|c| c.parent_id.as_ref() == Some(parent_id))
        .collect())
}

pub fn all_listing_types<R: ListingTypeRepo>(repo: &R) -> Result<Vec<ListingType>> {
    Ok(repo.all_listing_types()?)
}

/// The ordered field schema of a listing type.
///
/// Unknown ids yield an empty schema, never an error.
pub fn get_listing_type_schema<R: ListingTypeRepo>(
    repo: &R,
    id: &Id,
) -> Result<Vec<FieldDescriptor>> {
    match repo.get_listing_type(id) {
        Ok(listing_type) => Ok(listing_type.fields),
        Err(RepoError::NotFound) => Ok(vec![]),
        Err(err) => Err(Error::Repo(err)),
    }
}

pub fn get_user<R>(repo: &R, logged_in_email: &EmailAddress, requested_email: &EmailAddress) -> Result<User>
where
    R: UserRepo,
{
    if logged_in_email != requested_email {
        return Err(Error::Forbidden);
    }
    Ok(repo.get_user_by_email(requested_email)?)
}
