use super::*;

/// Result of a successful listing creation.
///
/// Image sync problems after the row has been inserted do not
/// fail the request; they are reported as warnings instead.
#[derive(Debug)]
pub struct CreatedListing {
    pub listing: Listing,
    pub warnings: Vec<String>,
}

pub fn create_listing(
    connections: &sqlite::Connections,
    image_store: &dyn ImageStorageGateway,
    owner_email: EmailAddress,
    new_listing: usecases::NewListing,
    images: ListingImages,
) -> Result<CreatedListing> {
    images.check_limits(0).map_err(error::AppError::from)?;

    // Validation comes first, before anything is uploaded.
    let mut listing = {
        let conn = connections.shared()?;
        usecases::prepare_new_listing(&conn, owner_email, new_listing)?
    };

    // Upload into a temporary namespace, sequentially and in
    // order. A failed upload aborts the request; previously
    // uploaded objects are left behind as an accepted leak.
    let temp_namespace = format!("listings/{}", Id::new());
    if let Some(ref bytes) = images.cover {
        let cover = image_store.upload_image(&format!("{temp_namespace}/cover"), bytes)?;
        listing.details.cover_image = Some(cover);
    }
    for (n, bytes) in images.gallery.iter().enumerate() {
        let image = image_store.upload_image(&format!("{temp_namespace}/gallery-{n}"), bytes)?;
        listing.details.gallery.push(image);
    }

    connections.exclusive()?.transaction(|conn| {
        conn.create_listing(listing.clone()).map_err(|err| {
            warn!("Failed to store newly created listing: {err}");
            usecases::Error::Repo(err)
        })
    })?;

    // Best-effort move of the uploaded objects into the final
    // namespace. The stored references are not rewritten; failures
    // only produce warnings.
    let mut warnings = Vec::new();
    let final_namespace = format!("listings/{}", listing.id);
    let public_ids = listing
        .details
        .cover_image
        .iter()
        .chain(listing.details.gallery.iter())
        .map(|image| image.public_id.clone());
    for public_id in public_ids {
        let target = match public_id.rsplit_once('/') {
            Some((_, name)) => format!("{final_namespace}/{name}"),
            None => continue,
        };
        if let Err(err) = image_store.rename_image(&public_id, &target) {
            warn!("Failed to move image {public_id} of listing {}: {err}", listing.id);
            warnings.push(format!("image {public_id} could not be moved: {err}"));
        }
    }

    Ok(CreatedListing { listing, warnings })
}
