use super::*;

pub fn delete_user(
    connections: &sqlite::Connections,
    login_email: &EmailAddress,
    email: &EmailAddress,
) -> Result<()> {
    Ok(connections
        .exclusive()?
        .transaction(|conn| usecases::delete_user(conn, login_email, email))?)
}
