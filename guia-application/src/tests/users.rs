use super::prelude::*;

#[test]
fn register_and_login() {
    let fixture = BackendFixture::new();
    flows::create_user(
        &fixture.db_connections,
        usecases::NewUser {
            email: "ana@example.com".parse().unwrap(),
            password: "secret123".into(),
        },
    )
    .unwrap();
    let db = fixture.db_connections.shared().unwrap();
    let role = usecases::login_with_email(
        &db,
        &usecases::Credentials {
            email: &"ana@example.com".parse().unwrap(),
            password: "secret123",
        },
    )
    .unwrap();
    assert_eq!(Role::User, role);
}

#[test]
fn reject_duplicate_registration() {
    let fixture = BackendFixture::new();
    fixture.create_user("ana@example.com", "secret123", None);
    let err = flows::create_user(
        &fixture.db_connections,
        usecases::NewUser {
            email: "ana@example.com".parse().unwrap(),
            password: "secret123".into(),
        },
    )
    .err()
    .unwrap();
    assert!(matches!(
        err,
        AppError::Business(BError::Parameter(usecases::Error::UserExists))
    ));
}

#[test]
fn users_may_only_delete_their_own_account() {
    let fixture = BackendFixture::new();
    fixture.create_user("ana@example.com", "secret123", None);
    let ana = "ana@example.com".parse().unwrap();
    let other = "other@example.com".parse().unwrap();

    let err = flows::delete_user(&fixture.db_connections, &other, &ana)
        .err()
        .unwrap();
    assert!(matches!(
        err,
        AppError::Business(BError::Parameter(usecases::Error::Forbidden))
    ));

    flows::delete_user(&fixture.db_connections, &ana, &ana).unwrap();
    assert!(fixture
        .db_connections
        .shared()
        .unwrap()
        .try_get_user_by_email(&ana)
        .unwrap()
        .is_none());
}

#[test]
fn deleting_an_account_with_listings_is_a_conflict() {
    let fixture = BackendFixture::new();
    fixture.create_user("ana@example.com", "secret123", None);
    fixture.create_listing("ana@example.com", Default::default());
    let ana = "ana@example.com".parse().unwrap();
    let err = flows::delete_user(&fixture.db_connections, &ana, &ana)
        .err()
        .unwrap();
    assert!(matches!(
        err,
        AppError::Business(BError::Parameter(usecases::Error::Repo(
            RepoError::Conflict
        )))
    ));
}
