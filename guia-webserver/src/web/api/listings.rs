use std::collections::HashMap;

use rocket::{form::Form, fs::TempFile, FromForm};

use super::{util::read_uploaded_image, *};
use guia_application::ListingImages;

#[derive(FromForm)]
pub struct SearchQuery {
    search: Option<String>,
    bbox: Option<String>,
    #[field(name = "categoryIds")]
    category_ids: Option<String>,
    #[field(name = "listingTypeIds")]
    listing_type_ids: Option<String>,
}

#[get("/listings?<query..>")]
pub fn get_search(
    db: sqlite::Connections,
    query: SearchQuery,
) -> Result<Vec<json::ListingSummary>> {
    let bbox = query
        .bbox
        .as_deref()
        .map(|bbox| bbox.parse::<MapBbox>().map_err(|_| ParameterError::Bbox))
        .transpose()?;
    let req = usecases::SearchListings {
        text: query.search,
        bbox,
        categories: util::parse_id_list(query.category_ids.as_deref()),
        listing_types: util::parse_id_list(query.listing_type_ids.as_deref()),
    };

    let db = db.shared()?;
    let listings = usecases::search_listings(&db, req)?;
    let categories = usecases::all_categories(&db)?;
    let listing_types = usecases::all_listing_types(&db)?;

    let category_by_id: HashMap<_, _> = categories.iter().map(|c| (&c.id, c)).collect();
    let listing_type_by_id: HashMap<_, _> = listing_types.iter().map(|t| (&t.id, t)).collect();
    let results = listings
        .into_iter()
        .map(|listing| {
            let category = category_by_id.get(&listing.category_id).copied();
            let listing_type = listing_type_by_id.get(&listing.listing_type_id).copied();
            to_json::listing_summary(listing, category, listing_type)
        })
        .collect();
    Ok(Json(results))
}

#[get("/listings/<slug>/public")]
pub fn get_public_listing(db: sqlite::Connections, slug: String) -> Result<json::Listing> {
    let listing = usecases::get_published_listing_by_slug(&db.shared()?, &slug)?;
    Ok(Json(to_json::listing(listing)))
}

#[get("/my-listings")]
pub fn get_my_listings(db: sqlite::Connections, account: Account) -> Result<Vec<json::Listing>> {
    let owner_email = account.email_address()?;
    let listings = usecases::listings_of_owner(&db.shared()?, &owner_email)?;
    Ok(Json(listings.into_iter().map(to_json::listing).collect()))
}

#[get("/listings/<id>")]
pub fn get_listing(db: sqlite::Connections, account: Account, id: String) -> Result<json::Listing> {
    let owner_email = account.email_address()?;
    let listing = usecases::get_owned_listing(&db.shared()?, &Id::from(id), &owner_email)?;
    Ok(Json(to_json::listing(listing)))
}

/// Multipart form for creating or updating a listing.
///
/// All text fields are optional here. Which of them are actually
/// required is decided during validation, so that missing fields
/// can be reported together.
#[derive(FromForm)]
pub struct ListingForm<'v> {
    title: Option<String>,
    description: Option<String>,
    category_id: Option<String>,
    listing_type_id: Option<String>,
    lat: Option<f64>,
    lng: Option<f64>,
    address: Option<String>,
    province: Option<String>,
    city: Option<String>,
    email: Option<String>,
    phone: Option<String>,
    whatsapp: Option<String>,
    website: Option<String>,
    provincia_id: Option<i32>,
    localidad_id: Option<i32>,
    opening_hours: Option<String>,
    amenities: Vec<String>,
    /// JSON object with the dynamic field values.
    dynamic_details: Option<String>,
    #[field(name = "coverImage")]
    cover_image: Option<TempFile<'v>>,
    #[field(name = "galleryImages")]
    gallery_images: Vec<TempFile<'v>>,
    /// Only used on updates.
    delete_cover_image: bool,
    /// URLs of stored gallery images to remove, only used on updates.
    gallery_images_to_delete: Vec<String>,
}

fn parse_dynamic_details(
    dynamic_details: Option<String>,
) -> result::Result<Option<serde_json::Value>, ApiError> {
    dynamic_details
        .filter(|s| !s.trim().is_empty())
        .map(|s| serde_json::from_str(&s))
        .transpose()
        .map_err(|err| {
            ApiError::OtherWithStatus(
                anyhow::anyhow!("Invalid dynamic details: {err}"),
                Status::BadRequest,
            )
        })
}

async fn read_listing_images(
    cover_image: Option<TempFile<'_>>,
    gallery_images: Vec<TempFile<'_>>,
) -> result::Result<ListingImages, ApiError> {
    let mut images = ListingImages::default();
    if let Some(mut file) = cover_image {
        images.cover = Some(read_uploaded_image(&mut file).await?);
    }
    for mut file in gallery_images {
        images.gallery.push(read_uploaded_image(&mut file).await?);
    }
    Ok(images)
}

#[post("/listings", data = "<form>")]
pub async fn post_listing(
    db: sqlite::Connections,
    image_store: &State<ImageStore>,
    account: Account,
    form: Form<ListingForm<'_>>,
) -> Result<json::StoredListing> {
    let owner_email = account.email_address()?;
    let ListingForm {
        title,
        description,
        category_id,
        listing_type_id,
        lat,
        lng,
        address,
        province,
        city,
        email,
        phone,
        whatsapp,
        website,
        provincia_id,
        localidad_id,
        opening_hours,
        amenities,
        dynamic_details,
        cover_image,
        gallery_images,
        delete_cover_image: _,
        gallery_images_to_delete: _,
    } = form.into_inner();
    let new_listing = usecases::NewListing {
        title,
        description,
        category_id,
        listing_type_id,
        lat,
        lng,
        address,
        province,
        city,
        email,
        phone,
        whatsapp,
        website,
        provincia_id,
        localidad_id,
        opening_hours,
        amenities,
        dynamic_details: parse_dynamic_details(dynamic_details)?,
    };
    let images = read_listing_images(cover_image, gallery_images).await?;

    let created = flows::create_listing(&db, &***image_store, owner_email, new_listing, images)?;
    Ok(Json(to_json::stored_listing(
        created.listing,
        created.warnings,
    )))
}

#[post("/listings/<id>", data = "<form>")]
pub async fn post_update_listing(
    db: sqlite::Connections,
    image_store: &State<ImageStore>,
    account: Account,
    id: String,
    form: Form<ListingForm<'_>>,
) -> Result<json::StoredListing> {
    let owner_email = account.email_address()?;
    let ListingForm {
        title,
        description,
        category_id,
        listing_type_id,
        lat,
        lng,
        address,
        province,
        city,
        email,
        phone,
        whatsapp,
        website,
        provincia_id,
        localidad_id,
        opening_hours,
        amenities,
        dynamic_details,
        cover_image,
        gallery_images,
        delete_cover_image,
        gallery_images_to_delete,
    } = form.into_inner();
    let update = usecases::UpdateListing {
        title,
        description,
        category_id,
        listing_type_id,
        lat,
        lng,
        address,
        province,
        city,
        email,
        phone,
        whatsapp,
        website,
        provincia_id,
        localidad_id,
        opening_hours,
        // An empty amenity list cannot be distinguished from an
        // omitted one in form data, so empty means "keep".
        amenities: Some(amenities).filter(|a| !a.is_empty()),
        dynamic_details: parse_dynamic_details(dynamic_details)?,
    };
    let images = read_listing_images(cover_image, gallery_images).await?;
    let changes = flows::ListingChanges {
        update,
        images,
        delete_cover_image,
        gallery_images_to_delete,
    };

    let updated = flows::update_listing(&db, &***image_store, &Id::from(id), &owner_email, changes)?;
    Ok(Json(to_json::stored_listing(
        updated.listing,
        updated.warnings,
    )))
}

#[patch("/listings/<id>/status", format = "application/json", data = "<change>")]
pub fn patch_listing_status(
    db: sqlite::Connections,
    auth: Auth,
    id: String,
    change: JsonResult<json::StatusChange>,
) -> Result<json::StatusChange> {
    let change = change?.into_inner();
    auth.user_with_min_role(&db.shared()?, Role::Admin)?;
    let status = flows::change_listing_status(&db, &Id::from(id), &change.status)?;
    Ok(Json(json::StatusChange {
        status: status.as_str().into(),
    }))
}

#[delete("/listings/<id>")]
pub fn delete_listing(
    db: sqlite::Connections,
    image_store: &State<ImageStore>,
    account: Account,
    id: String,
) -> Result<Vec<String>> {
    let owner_email = account.email_address()?;
    let warnings = flows::delete_listing(&db, &***image_store, &Id::from(id), &owner_email)?;
    Ok(Json(warnings))
}
