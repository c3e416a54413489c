use super::*;

#[get("/categories")]
pub fn get_top_level_categories(db: sqlite::Connections) -> Result<Vec<json::Category>> {
    let categories = usecases::top_level_categories(&db.shared()?)?;
    Ok(Json(
        categories.into_iter().map(to_json::category).collect(),
    ))
}

#[get("/categories/all")]
pub fn get_all_categories(db: sqlite::Connections) -> Result<Vec<json::Category>> {
    let categories = usecases::all_categories(&db.shared()?)?;
    Ok(Json(
        categories.into_iter().map(to_json::category).collect(),
    ))
}

#[get("/categories/<parent_id>/subcategories")]
pub fn get_subcategories(
    db: sqlite::Connections,
    parent_id: String,
) -> Result<Vec<json::Category>> {
    let categories = usecases::subcategories_of(&db.shared()?, &Id::from(parent_id))?;
    Ok(Json(
        categories.into_iter().map(to_json::category).collect(),
    ))
}

#[post("/categories", format = "application/json", data = "<new_category>")]
pub fn post_category(
    db: sqlite::Connections,
    auth: Auth,
    new_category: JsonResult<json::NewCategory>,
) -> Result<json::Category> {
    let new_category = from_json::new_category(new_category?.into_inner());
    auth.user_with_min_role(&db.shared()?, Role::Admin)?;
    let mut db = db.exclusive()?;
    let category = db.transaction(|conn| usecases::create_new_category(conn, new_category))?;
    Ok(Json(to_json::category(category)))
}

#[patch("/categories/<id>", format = "application/json", data = "<update>")]
pub fn patch_category(
    db: sqlite::Connections,
    auth: Auth,
    id: String,
    update: JsonResult<json::UpdateCategory>,
) -> Result<json::Category> {
    let update = update?.into_inner();
    auth.user_with_min_role(&db.shared()?, Role::Admin)?;
    let id = Id::from(id);
    let mut db = db.exclusive()?;
    let category = db.transaction(|conn| {
        let mut category = conn.get_category(&id)?;
        let json::UpdateCategory {
            name,
            slug,
            marker_icon_slug,
            marker_icon_width,
            marker_icon_height,
        } = update;
        if let Some(name) = name {
            category.name = name;
        }
        if let Some(slug) = slug {
            category.slug = slug;
        }
        if let Some(slug) = marker_icon_slug {
            category.marker_icon.slug = slug;
        }
        if let Some(width) = marker_icon_width {
            category.marker_icon.original_width = width;
        }
        if let Some(height) = marker_icon_height {
            category.marker_icon.original_height = height;
        }
        usecases::update_category(conn, &category)?;
        Ok::<_, ParameterError>(category)
    })?;
    Ok(Json(to_json::category(category)))
}

#[delete("/categories/<id>")]
pub fn delete_category(db: sqlite::Connections, auth: Auth, id: String) -> StatusResult {
    auth.user_with_min_role(&db.shared()?, Role::Admin)?;
    let mut db = db.exclusive()?;
    db.transaction(|conn| usecases::delete_category(conn, &Id::from(id)))?;
    Ok(Status::NoContent)
}
