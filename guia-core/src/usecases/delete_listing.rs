use super::prelude::*;

/// Deletes a listing row on behalf of its owner.
///
/// Returns the deleted listing so that the caller can clean up
/// the stored images afterwards.
pub fn delete_listing<R: ListingRepo>(
    repo: &R,
    id: &Id,
    owner_email: &EmailAddress,
) -> Result<Listing> {
    let listing = super::get_owned_listing(repo, id, owner_email)?;
    log::info!("Deleting listing {} of {}", id, owner_email);
    repo.delete_listing(id)?;
    Ok(listing)
}

#[cfg(test)]
mod tests {
    use super::{super::tests::MockDb, *};
    use guia_entities::builders::*;

    #[test]
    fn owners_can_delete_their_listings() {
        let db = MockDb::default();
        let listing = Listing::build()
            .title("foo")
            .owner("owner@example.com")
            .finish();
        let id = listing.id.clone();
        db.listings.borrow_mut().push(listing);
        let owner = EmailAddress::new_unchecked("owner@example.com".into());
        assert!(delete_listing(&db, &id, &owner).is_ok());
        assert!(db.listings.borrow().is_empty());
    }

    #[test]
    fn others_cannot_delete_foreign_listings() {
        let db = MockDb::default();
        let listing = Listing::build()
            .title("foo")
            .owner("owner@example.com")
            .finish();
        let id = listing.id.clone();
        db.listings.borrow_mut().push(listing);
        let other = EmailAddress::new_unchecked("other@example.com".into());
        assert!(matches!(
            delete_listing(&db, &id, &other),
            Err(Error::Forbidden)
        ));
        assert_eq!(1, db.listings.borrow().len());
    }
}
