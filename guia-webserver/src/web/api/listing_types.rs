use super::*;

#[get("/listing-types")]
pub fn get_listing_types(db: sqlite::Connections) -> Result<Vec<json::ListingType>> {
    let listing_types = usecases::all_listing_types(&db.shared()?)?;
    Ok(Json(
        listing_types.into_iter().map(to_json::listing_type).collect(),
    ))
}

#[get("/listing-types/<id>/schema")]
pub fn get_listing_type_schema(
    db: sqlite::Connections,
    id: String,
) -> Result<Vec<json::SchemaField>> {
    let fields = usecases::get_listing_type_schema(&db.shared()?, &Id::from(id))?;
    Ok(Json(fields.into_iter().map(to_json::schema_field).collect()))
}

#[post("/listing-types", format = "application/json", data = "<new_listing_type>")]
pub fn post_listing_type(
    db: sqlite::Connections,
    auth: Auth,
    new_listing_type: JsonResult<json::NewListingType>,
) -> Result<json::ListingType> {
    let new_listing_type = from_json::try_new_listing_type(new_listing_type?.into_inner())
        .map_err(|err| ApiError::OtherWithStatus(err, Status::BadRequest))?;
    auth.user_with_min_role(&db.shared()?, Role::Admin)?;
    let mut db = db.exclusive()?;
    let listing_type =
        db.transaction(|conn| usecases::create_new_listing_type(conn, new_listing_type))?;
    Ok(Json(to_json::listing_type(listing_type)))
}

#[patch("/listing-types/<id>", format = "application/json", data = "<update>")]
pub fn patch_listing_type(
    db: sqlite::Connections,
    auth: Auth,
    id: String,
    update: JsonResult<json::UpdateListingType>,
) -> Result<json::ListingType> {
    let json::UpdateListingType { name, slug, fields } = update?.into_inner();
    let fields = fields
        .map(|fields| {
            fields
                .into_iter()
                .map(from_json::try_schema_field)
                .collect::<anyhow::Result<Vec<_>>>()
        })
        .transpose()
        .map_err(|err| ApiError::OtherWithStatus(err, Status::BadRequest))?;
    auth.user_with_min_role(&db.shared()?, Role::Admin)?;
    let id = Id::from(id);
    let mut db = db.exclusive()?;
    let listing_type = db.transaction(|conn| {
        let mut listing_type = conn.get_listing_type(&id)?;
        if let Some(name) = name {
            listing_type.name = name;
        }
        if let Some(slug) = slug {
            listing_type.slug = slug;
        }
        if let Some(fields) = fields {
            listing_type.fields = fields;
        }
        usecases::update_listing_type(conn, &listing_type)?;
        Ok::<_, ParameterError>(listing_type)
    })?;
    Ok(Json(to_json::listing_type(listing_type)))
}

#[delete("/listing-types/<id>")]
pub fn delete_listing_type(db: sqlite::Connections, auth: Auth, id: String) -> StatusResult {
    auth.user_with_min_role(&db.shared()?, Role::Admin)?;
    let mut db = db.exclusive()?;
    db.transaction(|conn| usecases::delete_listing_type(conn, &Id::from(id)))?;
    Ok(Status::NoContent)
}
