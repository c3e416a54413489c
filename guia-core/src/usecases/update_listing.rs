use super::{
    prelude::*,
    validate_details::{parse_dynamic_details, validate_dynamic_fields},
};
use crate::util::validate;
use serde_json::Value;

/// Raw form data of a listing update request.
///
/// Fields that are absent or blank keep their stored value. The
/// slug, owner and moderation status are never touched by an
/// update.
#[derive(Debug, Clone, Default)]
pub struct UpdateListing {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category_id: Option<String>,
    pub listing_type_id: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub address: Option<String>,
    pub province: Option<String>,
    pub city: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub whatsapp: Option<String>,
    pub website: Option<String>,
    pub provincia_id: Option<i32>,
    pub localidad_id: Option<i32>,
    pub opening_hours: Option<String>,
    pub amenities: Option<Vec<String>>,
    pub dynamic_details: Option<Value>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

/// Merges the update into the stored listing and re-validates the
/// dynamic fields against the effective listing type.
///
/// The effective type is the submitted one if present, otherwise
/// the stored one. Cover and gallery references are carried over
/// unchanged; reconciling them against uploaded and deleted
/// images is up to the caller.
pub fn prepare_listing_update<R>(
    repo: &R,
    stored: Listing,
    u: UpdateListing,
) -> Result<Listing>
where
    R: ListingTypeRepo,
{
    let email = non_blank(u.email).unwrap_or_else(|| stored.email.clone());
    if !validate::is_valid_email(&email) {
        return Err(Error::EmailAddress);
    }
    let position = match (u.lat, u.lng) {
        (Some(lat), Some(lng)) => {
            MapPoint::try_from_lat_lng_deg(lat, lng).ok_or(Error::InvalidPosition)?
        }
        _ => stored.position,
    };

    let listing_type_id = non_blank(u.listing_type_id)
        .map(Id::from)
        .unwrap_or_else(|| stored.listing_type_id.clone());
    let dynamic_fields = match u.dynamic_details {
        Some(value) => parse_dynamic_details(Some(value))?,
        None => stored.details.dynamic_fields.clone(),
    };
    let schema = super::get_listing_type_schema(repo, &listing_type_id)?;
    validate_dynamic_fields(&schema, &dynamic_fields)?;

    let details = ListingDetails {
        provincia_id: u.provincia_id.or(stored.details.provincia_id),
        localidad_id: u.localidad_id.or(stored.details.localidad_id),
        opening_hours: non_blank(u.opening_hours).or_else(|| stored.details.opening_hours.clone()),
        amenities: u.amenities.unwrap_or_else(|| stored.details.amenities.clone()),
        cover_image: stored.details.cover_image.clone(),
        gallery: stored.details.gallery.clone(),
        dynamic_fields,
    };
    Ok(Listing {
        title: non_blank(u.title).unwrap_or(stored.title),
        description: non_blank(u.description).or(stored.description),
        category_id: non_blank(u.category_id)
            .map(Id::from)
            .unwrap_or(stored.category_id),
        listing_type_id,
        email,
        phone: non_blank(u.phone).or(stored.phone),
        whatsapp: non_blank(u.whatsapp).or(stored.whatsapp),
        website: non_blank(u.website).or(stored.website),
        address: non_blank(u.address).unwrap_or(stored.address),
        city: non_blank(u.city).unwrap_or(stored.city),
        province: non_blank(u.province).unwrap_or(stored.province),
        position,
        updated_at: Timestamp::now(),
        details,
        ..stored
    })
}
