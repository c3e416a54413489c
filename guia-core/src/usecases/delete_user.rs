use super::prelude::*;

// Accounts that still own listings cannot be deleted. The
// listings have to be removed first so that no orphaned rows
// and stored images remain.
pub fn delete_user<R>(repo: &R, login_email: &EmailAddress, email: &EmailAddress) -> Result<()>
where
    R: UserRepo + ListingRepo,
{
    if login_email != email {
        return Err(Error::Forbidden);
    }
    if repo.count_listings_of_owner(email)? > 0 {
        return Err(Error::Repo(RepoError::Conflict));
    }
    Ok(repo.delete_user_by_email(email)?)
}

#[cfg(test)]
mod tests {
    use super::{super::tests::MockDb, *};
    use guia_entities::builders::*;

    fn user(email: &str) -> User {
        User {
            email: EmailAddress::new_unchecked(email.into()),
            password: "secret".parse::<Password>().unwrap(),
            role: Role::User,
        }
    }

    #[test]
    fn owners_with_listings_cannot_be_deleted() {
        let db = MockDb::default();
        db.users.borrow_mut().push(user("owner@example.com"));
        db.listings
            .borrow_mut()
            .push(Listing::build().title("foo").owner("owner@example.com").finish());
        let email = EmailAddress::new_unchecked("owner@example.com".into());
        assert!(matches!(
            delete_user(&db, &email, &email),
            Err(Error::Repo(RepoError::Conflict))
        ));
        assert_eq!(1, db.users.borrow().len());
    }

    #[test]
    fn delete_own_account() {
        let db = MockDb::default();
        db.users.borrow_mut().push(user("user@example.com"));
        let email = EmailAddress::new_unchecked("user@example.com".into());
        assert!(delete_user(&db, &email, &email).is_ok());
        assert!(db.users.borrow().is_empty());
    }

    #[test]
    fn cannot_delete_other_accounts() {
        let db = MockDb::default();
        db.users.borrow_mut().push(user("other@example.com"));
        let login = EmailAddress::new_unchecked("user@example.com".into());
        let other = EmailAddress::new_unchecked("other@example.com".into());
        assert!(matches!(
            delete_user(&db, &login, &other),
            Err(Error::Forbidden)
        ));
    }
}
