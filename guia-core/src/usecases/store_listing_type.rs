use super::prelude::*;
use crate::text::slugify;

#[derive(Debug, Clone, Default)]
pub struct NewListingType {
    pub name: String,
    pub slug: Option<String>,
    pub fields: Vec<FieldDescriptor>,
}

pub fn create_new_listing_type<R: ListingTypeRepo>(
    repo: &R,
    t: NewListingType,
) -> Result<ListingType> {
    if t.name.trim().is_empty() {
        return Err(Error::Title);
    }
    let slug = t
        .slug
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| slugify(&t.name));
    if slug.is_empty() {
        return Err(Error::InvalidSlug);
    }
    let listing_type = ListingType {
        id: Id::new(),
        name: t.name,
        slug,
        fields: t.fields,
    };
    repo.create_listing_type(&listing_type)?;
    Ok(listing_type)
}

pub fn update_listing_type<R: ListingTypeRepo>(repo: &R, listing_type: &ListingType) -> Result<()> {
    if listing_type.name.trim().is_empty() {
        return Err(Error::Title);
    }
    if listing_type.slug.trim().is_empty() {
        return Err(Error::InvalidSlug);
    }
    Ok(repo.update_listing_type(listing_type)?)
}

/// Refused while listings of this type exist (repo yields a
/// conflict in that case).
pub fn delete_listing_type<R: ListingTypeRepo>(repo: &R, id: &Id) -> Result<()> {
    Ok(repo.delete_listing_type(id)?)
}
