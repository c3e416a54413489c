use super::*;

impl<'a> ListingTypeRepo for DbReadOnly<'a> {
    fn create_listing_type(&self, _listing_type: &ListingType) -> Result<()> {
        unreachable!();
    }
    fn update_listing_type(&self, _listing_type: &ListingType) -> Result<()> {
        unreachable!();
    }
    fn delete_listing_type(&self, _id: &Id) -> Result<()> {
        unreachable!();
    }

    fn get_listing_type(&self, id: &Id) -> Result<ListingType> {
        get_listing_type(&mut self.conn.borrow_mut(), id)
    }
    fn get_listing_type_by_slug(&self, slug: &str) -> Result<ListingType> {
        get_listing_type_by_slug(&mut self.conn.borrow_mut(), slug)
    }
    fn all_listing_types(&self) -> Result<Vec<ListingType>> {
        all_listing_types(&mut self.conn.borrow_mut())
    }
}

impl<'a> ListingTypeRepo for DbReadWrite<'a> {
    fn create_listing_type(&self, listing_type: &ListingType) -> Result<()> {
        create_listing_type(&mut self.conn.borrow_mut(), listing_type)
    }
    fn update_listing_type(&self, listing_type: &ListingType) -> Result<()> {
        update_listing_type(&mut self.conn.borrow_mut(), listing_type)
    }
    fn delete_listing_type(&self, id: &Id) -> Result<()> {
        delete_listing_type(&mut self.conn.borrow_mut(), id)
    }

    fn get_listing_type(&self, id: &Id) -> Result<ListingType> {
        get_listing_type(&mut self.conn.borrow_mut(), id)
    }
    fn get_listing_type_by_slug(&self, slug: &str) -> Result<ListingType> {
        get_listing_type_by_slug(&mut self.conn.borrow_mut(), slug)
    }
    fn all_listing_types(&self) -> Result<Vec<ListingType>> {
        all_listing_types(&mut self.conn.borrow_mut())
    }
}

impl<'a> ListingTypeRepo for DbConnection<'a> {
    fn create_listing_type(&self, listing_type: &ListingType) -> Result<()> {
        create_listing_type(&mut self.conn.borrow_mut(), listing_type)
    }
    fn update_listing_type(&self, listing_type: &ListingType) -> Result<()> {
        update_listing_type(&mut self.conn.borrow_mut(), listing_type)
    }
    fn delete_listing_type(&self, id: &Id) -> Result<()> {
        delete_listing_type(&mut self.conn.borrow_mut(), id)
    }

    fn get_listing_type(&self, id: &Id) -> Result<ListingType> {
        get_listing_type(&mut self.conn.borrow_mut(), id)
    }
    fn get_listing_type_by_slug(&self, slug: &str) -> Result<ListingType> {
        get_listing_type_by_slug(&mut self.conn.borrow_mut(), slug)
    }
    fn all_listing_types(&self) -> Result<Vec<ListingType>> {
        all_listing_types(&mut self.conn.borrow_mut())
    }
}

fn insert_schema_fields(
    conn: &mut SqliteConnection,
    listing_type_rowid: i64,
    fields: &[FieldDescriptor],
) -> Result<()> {
    for (position, field) in fields.iter().enumerate() {
        let options = if field.options.is_empty() {
            None
        } else {
            Some(serde_json::to_string(&field.options).map_err(|err| anyhow!(err))?)
        };
        let new_field = models::NewListingTypeField {
            listing_type_rowid,
            position: position as i32,
            name: &field.name,
            label: &field.label,
            field_type: field.field_type.as_str(),
            required: field.required,
            options,
        };
        diesel::insert_into(schema::listing_type_fields::table)
            .values(&new_field)
            .execute(conn)
            .map_err(from_diesel_err)?;
    }
    Ok(())
}

fn load_schema_fields(
    conn: &mut SqliteConnection,
    listing_type_rowid: i64,
) -> Result<Vec<FieldDescriptor>> {
    use schema::listing_type_fields::dsl;
    schema::listing_type_fields::table
        .filter(dsl::listing_type_rowid.eq(listing_type_rowid))
        .order(dsl::position.asc())
        .load::<models::ListingTypeFieldEntity>(conn)
        .map_err(from_diesel_err)?
        .into_iter()
        .map(load_field_descriptor)
        .collect()
}

fn load_field_descriptor(entity: models::ListingTypeFieldEntity) -> Result<FieldDescriptor> {
    let models::ListingTypeFieldEntity {
        rowid: _,
        listing_type_rowid: _,
        position: _,
        name,
        label,
        field_type,
        required,
        options,
    } = entity;
    let field_type = FieldType::parse(&field_type)
        .map_err(|_| anyhow!("Invalid field type: {field_type}"))?;
    let options = options
        .map(|json| serde_json::from_str(&json))
        .transpose()
        .map_err(|err| anyhow!("Invalid field options: {err}"))?
        .unwrap_or_default();
    Ok(FieldDescriptor {
        name,
        label,
        field_type,
        required,
        options,
    })
}

fn rowid_of_listing_type(conn: &mut SqliteConnection, id: &Id) -> Result<i64> {
    use schema::listing_types::dsl;
    dsl::listing_types
        .select(dsl::rowid)
        .filter(dsl::id.eq(id.as_str()))
        .first::<i64>(conn)
        .map_err(from_diesel_err)
}

fn create_listing_type(conn: &mut SqliteConnection, lt: &ListingType) -> Result<()> {
    let new_listing_type = models::NewListingType {
        id: lt.id.as_str(),
        name: &lt.name,
        slug: &lt.slug,
    };
    diesel::insert_into(schema::listing_types::table)
        .values(&new_listing_type)
        .execute(conn)
        .map_err(from_diesel_err)?;
    let rowid = rowid_of_listing_type(conn, &lt.id)?;
    insert_schema_fields(conn, rowid, &lt.fields)
}

fn update_listing_type(conn: &mut SqliteConnection, lt: &ListingType) -> Result<()> {
    use schema::{listing_type_fields, listing_types::dsl};
    let rowid = rowid_of_listing_type(conn, &lt.id)?;
    let new_listing_type = models::NewListingType {
        id: lt.id.as_str(),
        name: &lt.name,
        slug: &lt.slug,
    };
    diesel::update(dsl::listing_types.filter(dsl::rowid.eq(rowid)))
        .set(&new_listing_type)
        .execute(conn)
        .map_err(from_diesel_err)?;
    // Replace the whole schema, positions are reassigned
    diesel::delete(
        listing_type_fields::table.filter(listing_type_fields::listing_type_rowid.eq(rowid)),
    )
    .execute(conn)
    .map_err(from_diesel_err)?;
    insert_schema_fields(conn, rowid, &lt.fields)
}

fn delete_listing_type(conn: &mut SqliteConnection, id: &Id) -> Result<()> {
    use schema::{listing_type_fields, listing_types::dsl};
    let listings = super::listing::count_listings_of_listing_type(conn, id)?;
    if listings > 0 {
        return Err(repo::Error::Conflict);
    }
    let rowid = rowid_of_listing_type(conn, id)?;
    diesel::delete(
        listing_type_fields::table.filter(listing_type_fields::listing_type_rowid.eq(rowid)),
    )
    .execute(conn)
    .map_err(from_diesel_err)?;
    diesel::delete(dsl::listing_types.filter(dsl::rowid.eq(rowid)))
        .execute(conn)
        .map_err(from_diesel_err)?;
    Ok(())
}

fn load_listing_type(
    conn: &mut SqliteConnection,
    entity: models::ListingTypeEntity,
) -> Result<ListingType> {
    let models::ListingTypeEntity {
        rowid,
        id,
        name,
        slug,
    } = entity;
    let fields = load_schema_fields(conn, rowid)?;
    Ok(ListingType {
        id: id.into(),
        name,
        slug,
        fields,
    })
}

fn get_listing_type(conn: &mut SqliteConnection, id: &Id) -> Result<ListingType> {
    use schema::listing_types::dsl;
    let entity = dsl::listing_types
        .filter(dsl::id.eq(id.as_str()))
        .first::<models::ListingTypeEntity>(conn)
        .map_err(from_diesel_err)?;
    load_listing_type(conn, entity)
}

fn get_listing_type_by_slug(conn: &mut SqliteConnection, slug: &str) -> Result<ListingType> {
    use schema::listing_types::dsl;
    let entity = dsl::listing_types
        .filter(dsl::slug.eq(slug))
        .first::<models::ListingTypeEntity>(conn)
        .map_err(from_diesel_err)?;
    load_listing_type(conn, entity)
}

fn all_listing_types(conn: &mut SqliteConnection) -> Result<Vec<ListingType>> {
    use schema::listing_types::dsl;
    let entities = dsl::listing_types
        .order(dsl::rowid.asc())
        .load::<models::ListingTypeEntity>(conn)
        .map_err(from_diesel_err)?;
    entities
        .into_iter()
        .map(|entity| load_listing_type(conn, entity))
        .collect()
}
