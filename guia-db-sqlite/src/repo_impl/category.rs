use super::*;

impl<'a> CategoryRepo for DbReadOnly<'a> {
    fn create_category(&self, _category: &Category) -> Result<()> {
        unreachable!();
    }
    fn update_category(&self, _category: &Category) -> Result<()> {
        unreachable!();
    }
    fn delete_category(&self, _id: &Id) -> Result<()> {
        unreachable!();
    }

    fn get_category(&self, id: &Id) -> Result<Category> {
        get_category(&mut self.conn.borrow_mut(), id)
    }
    fn all_categories(&self) -> Result<Vec<Category>> {
        all_categories(&mut self.conn.borrow_mut())
    }
}

impl<'a> CategoryRepo for DbReadWrite<'a> {
    fn create_category(&self, category: &Category) -> Result<()> {
        create_category(&mut self.conn.borrow_mut(), category)
    }
    fn update_category(&self, category: &Category) -> Result<()> {
        update_category(&mut self.conn.borrow_mut(), category)
    }
    fn delete_category(&self, id: &Id) -> Result<()> {
        delete_category(&mut self.conn.borrow_mut(), id)
    }

    fn get_category(&self, id: &Id) -> Result<Category> {
        get_category(&mut self.conn.borrow_mut(), id)
    }
    fn all_categories(&self) -> Result<Vec<Category>> {
        all_categories(&mut self.conn.borrow_mut())
    }
}

impl<'a> CategoryRepo for DbConnection<'a> {
    fn create_category(&self, category: &Category) -> Result<()> {
        create_category(&mut self.conn.borrow_mut(), category)
    }
    fn update_category(&self, category: &Category) -> Result<()> {
        update_category(&mut self.conn.borrow_mut(), category)
    }
    fn delete_category(&self, id: &Id) -> Result<()> {
        delete_category(&mut self.conn.borrow_mut(), id)
    }

    fn get_category(&self, id: &Id) -> Result<Category> {
        get_category(&mut self.conn.borrow_mut(), id)
    }
    fn all_categories(&self) -> Result<Vec<Category>> {
        all_categories(&mut self.conn.borrow_mut())
    }
}

fn new_category_model(c: &Category) -> models::NewCategory {
    models::NewCategory {
        id: c.id.as_str(),
        name: &c.name,
        slug: &c.slug,
        parent_id: c.parent_id.as_ref().map(Id::as_str),
        marker_icon_slug: &c.marker_icon.slug,
        marker_icon_width: c.marker_icon.original_width as i32,
        marker_icon_height: c.marker_icon.original_height as i32,
    }
}

fn load_category(entity: models::CategoryEntity) -> Category {
    let models::CategoryEntity {
        rowid: _,
        id,
        name,
        slug,
        parent_id,
        marker_icon_slug,
        marker_icon_width,
        marker_icon_height,
    } = entity;
    Category {
        id: id.into(),
        name,
        slug,
        parent_id: parent_id.map(Into::into),
        marker_icon: MarkerIcon {
            slug: marker_icon_slug,
            original_width: marker_icon_width.max(0) as u32,
            original_height: marker_icon_height.max(0) as u32,
        },
    }
}

fn create_category(conn: &mut SqliteConnection, c: &Category) -> Result<()> {
    let new_category = new_category_model(c);
    diesel::insert_into(schema::categories::table)
        .values(&new_category)
        .execute(conn)
        .map_err(from_diesel_err)?;
    Ok(())
}

fn update_category(conn: &mut SqliteConnection, c: &Category) -> Result<()> {
    use schema::categories::dsl;
    let new_category = new_category_model(c);
    let count = diesel::update(dsl::categories.filter(dsl::id.eq(new_category.id)))
        .set(&new_category)
        .execute(conn)
        .map_err(from_diesel_err)?;
    if count == 0 {
        return Err(repo::Error::NotFound);
    }
    Ok(())
}

fn delete_category(conn: &mut SqliteConnection, id: &Id) -> Result<()> {
    use schema::categories::dsl;
    let subcategories = dsl::categories
        .select(diesel::dsl::count(dsl::rowid))
        .filter(dsl::parent_id.eq(id.as_str()))
        .first::<i64>(conn)
        .map_err(from_diesel_err)?;
    if subcategories > 0 {
        return Err(repo::Error::Conflict);
    }
    let listings = super::listing::count_listings_of_category(conn, id)?;
    if listings > 0 {
        return Err(repo::Error::Conflict);
    }
    let count = diesel::delete(dsl::categories.filter(dsl::id.eq(id.as_str())))
        .execute(conn)
        .map_err(from_diesel_err)?;
    if count == 0 {
        return Err(repo::Error::NotFound);
    }
    Ok(())
}

fn get_category(conn: &mut SqliteConnection, id: &Id) -> Result<Category> {
    use schema::categories::dsl;
    Ok(load_category(
        dsl::categories
            .filter(dsl::id.eq(id.as_str()))
            .first::<models::CategoryEntity>(conn)
            .map_err(from_diesel_err)?,
    ))
}

fn all_categories(conn: &mut SqliteConnection) -> Result<Vec<Category>> {
    use schema::categories::dsl;
    Ok(dsl::categories
        .order(dsl::name.asc())
        .load::<models::CategoryEntity>(conn)
        .map_err(from_diesel_err)?
        .into_iter()
        .map(load_category)
        .collect())
}
