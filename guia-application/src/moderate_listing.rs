use super::*;

pub fn change_listing_status(
    connections: &sqlite::Connections,
    id: &Id,
    status: &str,
) -> Result<ListingStatus> {
    Ok(connections.exclusive()?.transaction(|conn| {
        usecases::change_listing_status(conn, id, status).map_err(|err| {
            log::warn!("Failed to change status of listing {id}: {err}");
            err
        })
    })?)
}
