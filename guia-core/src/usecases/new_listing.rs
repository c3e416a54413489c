use super::{
    prelude::*,
    validate_details::{parse_dynamic_details, validate_dynamic_fields},
};
use crate::{text::slugify, util::validate};
use serde_json::Value;

/// Raw form data of a listing create request.
///
/// All fixed fields are optional here so that the missing ones
/// can be itemized in a single validation error.
#[derive(Debug, Clone, Default)]
pub struct NewListing {
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
    pub amenities: Vec<String>,
    pub dynamic_details: Option<Value>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

/// Validates the form data and builds the new [`Listing`].
///
/// Validation is strictly ordered: fixed required fields, email
/// format, dynamic details JSON, required dynamic fields. No side
/// effects happen here; uploading images and inserting the row is
/// up to the caller.
pub fn prepare_new_listing<R>(
    repo: &R,
    owner_email: EmailAddress,
    l: NewListing,
) -> Result<Listing>
where
    R: ListingTypeRepo,
{
    let title = non_blank(l.title);
    let category_id = non_blank(l.category_id);
    let listing_type_id = non_blank(l.listing_type_id);
    let address = non_blank(l.address);
    let province = non_blank(l.province);
    let city = non_blank(l.city);
    let email = non_blank(l.email);

    let mut missing = Vec::new();
    for (name, present) in [
        ("title", title.is_some()),
        ("category_id", category_id.is_some()),
        ("listing_type_id", listing_type_id.is_some()),
        ("lat", l.lat.is_some()),
        ("lng", l.lng.is_some()),
        ("address", address.is_some()),
        ("province", province.is_some()),
        ("city", city.is_some()),
        ("email", email.is_some()),
    ] {
        if !present {
            missing.push(name.to_string());
        }
    }
    if !missing.is_empty() {
        return Err(Error::MissingFields(missing));
    }
    // All required fields are present beyond this point.
    let (title, category_id, listing_type_id, address, province, city, email) = (
        title.unwrap(),
        category_id.unwrap(),
        listing_type_id.unwrap(),
        address.unwrap(),
        province.unwrap(),
        city.unwrap(),
        email.unwrap(),
    );

    if !validate::is_valid_email(&email) {
        return Err(Error::EmailAddress);
    }
    let position = MapPoint::try_from_lat_lng_deg(l.lat.unwrap(), l.lng.unwrap())
        .ok_or(Error::InvalidPosition)?;

    let dynamic_fields = parse_dynamic_details(l.dynamic_details)?;
    let listing_type_id = Id::from(listing_type_id);
    let schema = super::get_listing_type_schema(repo, &listing_type_id)?;
    validate_dynamic_fields(&schema, &dynamic_fields)?;

    let id = Id::new();
    let slug_base = slugify(&title);
    let slug = if slug_base.is_empty() {
        id.as_str()[..8].to_string()
    } else {
        format!("{}-{}", slug_base, &id.as_str()[..8])
    };
    let now = Timestamp::now();
    Ok(Listing {
        id,
        slug,
        title,
        description: non_blank(l.description),
        category_id: Id::from(category_id),
        listing_type_id,
        owner_email,
        email,
        phone: non_blank(l.phone),
        whatsapp: non_blank(l.whatsapp),
        website: non_blank(l.website),
        address,
        city,
        province,
        position,
        // New listings always await moderation.
        status: ListingStatus::default(),
        created_at: now,
        updated_at: now,
        details: ListingDetails {
            provincia_id: l.provincia_id,
            localidad_id: l.localidad_id,
            opening_hours: non_blank(l.opening_hours),
            amenities: l.amenities,
            cover_image: None,
            gallery: vec![],
            dynamic_fields,
        },
    })
}
