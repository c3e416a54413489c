use super::prelude::*;

pub fn authorize_user_by_email<R: UserRepo>(
    repo: &R,
    email: &EmailAddress,
    min_required_role: Role,
) -> Result<User> {
    if let Some(user) = repo.try_get_user_by_email(email)? {
        return crate::authorization::user::authorize_role(&user, min_required_role)
            .map(|()| user)
            .map_err(|_| Error::Unauthorized);
    }
    Err(Error::Unauthorized)
}

#[cfg(test)]
mod tests {
    use super::{super::tests::MockDb, *};

    #[test]
    fn require_admin_role() {
        let db = MockDb::default();
        db.users.borrow_mut().push(User {
            email: EmailAddress::new_unchecked("member@example.com".into()),
            password: "secret".parse::<Password>().unwrap(),
            role: Role::User,
        });
        db.users.borrow_mut().push(User {
            email: EmailAddress::new_unchecked("admin@example.com".into()),
            password: "secret".parse::<Password>().unwrap(),
            role: Role::Admin,
        });
        let member = EmailAddress::new_unchecked("member@example.com".into());
        let admin = EmailAddress::new_unchecked("admin@example.com".into());
        assert!(matches!(
            authorize_user_by_email(&db, &member, Role::Admin),
            Err(Error::Unauthorized)
        ));
        assert!(authorize_user_by_email(&db, &admin, Role::Admin).is_ok());
        let unknown = EmailAddress::new_unchecked("nobody@example.com".into());
        assert!(matches!(
            authorize_user_by_email(&db, &unknown, Role::User),
            Err(Error::Unauthorized)
        ));
    }
}
