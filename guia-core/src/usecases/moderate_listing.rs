use std::str::FromStr;

use super::prelude::*;

/// Changes the moderation status of a listing.
///
/// The status string must parse as `pending`, `published` or
/// `rejected`; nothing is written otherwise. Updates the
/// `updated_at` timestamp of the affected row.
pub fn change_listing_status<R: ListingRepo>(
    repo: &R,
    id: &Id,
    status: &str,
) -> Result<ListingStatus> {
    let status = ListingStatus::from_str(status).map_err(|_| Error::InvalidStatus)?;
    let mut listing = repo.get_listing(id)?;
    log::info!(
        "Changing status of listing {} from {} to {}",
        id,
        listing.status.as_str(),
        status.as_str()
    );
    listing.status = status;
    listing.updated_at = Timestamp::now();
    repo.update_listing(&listing)?;
    Ok(status)
}
