use super::*;

/// Deletes a listing and cleans up its stored images.
///
/// Every storage deletion is best-effort: failures end up in the
/// returned warning list while the database row is removed
/// regardless.
pub fn delete_listing(
    connections: &sqlite::Connections,
    image_store: &dyn ImageStorageGateway,
    id: &Id,
    owner_email: &EmailAddress,
) -> Result<Vec<String>> {
    let listing = {
        let conn = connections.shared()?;
        usecases::get_owned_listing(&conn, id, owner_email)?
    };

    let mut warnings = Vec::new();
    let mut warn_on_err = |what: &str, result: anyhow::Result<()>| {
        if let Err(err) = result {
            warn!("Failed to delete {what} of listing {id}: {err}");
            warnings.push(format!("{what} could not be deleted: {err}"));
        }
    };
    if let Some(ref cover) = listing.details.cover_image {
        warn_on_err(
            &format!("cover image {}", cover.public_id),
            image_store.delete_image(&cover.public_id),
        );
    }
    for image in &listing.details.gallery {
        warn_on_err(
            &format!("gallery image {}", image.public_id),
            image_store.delete_image(&image.public_id),
        );
    }
    warn_on_err(
        "image folder",
        image_store.delete_image_folder(&format!("listings/{id}")),
    );

    connections
        .exclusive()?
        .transaction(|conn| usecases::delete_listing(conn, id, owner_email).map(|_| ()))?;

    Ok(warnings)
}
