use std::collections::HashSet;

use super::*;

/// Everything an owner may change about a listing in one request.
#[derive(Debug, Clone, Default)]
pub struct ListingChanges {
    pub update: usecases::UpdateListing,
    pub images: ListingImages,
    pub delete_cover_image: bool,
    /// URLs of gallery images to remove.
    pub gallery_images_to_delete: Vec<String>,
}

#[derive(Debug)]
pub struct UpdatedListing {
    pub listing: Listing,
    pub warnings: Vec<String>,
}

pub fn update_listing(
    connections: &sqlite::Connections,
    image_store: &dyn ImageStorageGateway,
    id: &Id,
    owner_email: &EmailAddress,
    changes: ListingChanges,
) -> Result<UpdatedListing> {
    let ListingChanges {
        update,
        images,
        delete_cover_image,
        gallery_images_to_delete,
    } = changes;

    // Validation comes first, before anything is uploaded or
    // deleted from the image store.
    let mut listing = {
        let conn = connections.shared()?;
        let stored = usecases::get_owned_listing(&conn, id, owner_email)?;
        usecases::prepare_listing_update(&conn, stored, update)?
    };
    let delete_urls: HashSet<&str> = gallery_images_to_delete.iter().map(String::as_str).collect();
    let gallery_slots_taken = listing
        .details
        .gallery
        .iter()
        .filter(|image| !delete_urls.contains(image.url.as_str()))
        .count();
    images
        .check_limits(gallery_slots_taken)
        .map_err(error::AppError::from)?;

    // Image store failures past this point never abort the
    // request; they are collected as warnings instead.
    let mut warnings = Vec::new();
    let delete_best_effort = |warnings: &mut Vec<String>, public_id: &str| {
        if let Err(err) = image_store.delete_image(public_id) {
            warn!("Failed to delete image {public_id} of listing {id}: {err}");
            warnings.push(format!("image {public_id} could not be deleted: {err}"));
        }
    };
    let upload_best_effort = |warnings: &mut Vec<String>, public_id: &str, bytes: &[u8]| {
        match image_store.upload_image(public_id, bytes) {
            Ok(image) => Some(image),
            Err(err) => {
                warn!("Failed to upload image {public_id} of listing {id}: {err}");
                warnings.push(format!("image {public_id} could not be uploaded: {err}"));
                None
            }
        }
    };

    let namespace = format!("listings/{}", listing.id);
    if let Some(ref bytes) = images.cover {
        if let Some(old_cover) = listing.details.cover_image.take() {
            delete_best_effort(&mut warnings, &old_cover.public_id);
        }
        listing.details.cover_image =
            upload_best_effort(&mut warnings, &format!("{namespace}/cover"), bytes);
    } else if delete_cover_image {
        if let Some(old_cover) = listing.details.cover_image.take() {
            delete_best_effort(&mut warnings, &old_cover.public_id);
        }
    }

    let (kept, dropped): (Vec<_>, Vec<_>) = listing
        .details
        .gallery
        .drain(..)
        .partition(|image| !delete_urls.contains(image.url.as_str()));
    for image in &dropped {
        delete_best_effort(&mut warnings, &image.public_id);
    }
    listing.details.gallery = kept;
    for bytes in &images.gallery {
        let image_id = Id::new();
        let public_id = format!("{namespace}/gallery-{}", &image_id.as_str()[..8]);
        if let Some(image) = upload_best_effort(&mut warnings, &public_id, bytes) {
            listing.details.gallery.push(image);
        }
    }

    connections.exclusive()?.transaction(|conn| {
        conn.update_listing(&listing).map_err(|err| {
            warn!("Failed to store updated listing {id}: {err}");
            usecases::Error::Repo(err)
        })
    })?;

    Ok(UpdatedListing { listing, warnings })
}
