use super::*;

pub fn create_user(connections: &sqlite::Connections, new_user: usecases::NewUser) -> Result<()> {
    Ok(connections
        .exclusive()?
        .transaction(|conn| usecases::create_new_user(conn, new_user))?)
}
