use super::*;

impl<'a> ListingRepo for DbReadOnly<'a> {
    fn create_listing(&self, _listing: Listing) -> Result<()> {
        unreachable!();
    }
    fn update_listing(&self, _listing: &Listing) -> Result<()> {
        unreachable!();
    }
    fn delete_listing(&self, _id: &Id) -> Result<()> {
        unreachable!();
    }

    fn get_listing(&self, id: &Id) -> Result<Listing> {
        get_listing(&mut self.conn.borrow_mut(), id)
    }
    fn get_listing_by_slug(&self, slug: &str) -> Result<Listing> {
        get_listing_by_slug(&mut self.conn.borrow_mut(), slug)
    }

    fn query_listings(
        &self,
        query: &ListingQuery,
        pagination: &Pagination,
    ) -> Result<Vec<Listing>> {
        query_listings(&mut self.conn.borrow_mut(), query, pagination)
    }
    fn count_listings(&self) -> Result<usize> {
        count_listings(&mut self.conn.borrow_mut())
    }
    fn count_listings_of_category(&self, category_id: &Id) -> Result<usize> {
        count_listings_of_category(&mut self.conn.borrow_mut(), category_id)
    }
    fn count_listings_of_listing_type(&self, listing_type_id: &Id) -> Result<usize> {
        count_listings_of_listing_type(&mut self.conn.borrow_mut(), listing_type_id)
    }
    fn count_listings_of_owner(&self, owner_email: &EmailAddress) -> Result<usize> {
        count_listings_of_owner(&mut self.conn.borrow_mut(), owner_email)
    }
}

impl<'a> ListingRepo for DbReadWrite<'a> {
    fn create_listing(&self, listing: Listing) -> Result<()> {
        create_listing(&mut self.conn.borrow_mut(), &listing)
    }
    fn update_listing(&self, listing: &Listing) -> Result<()> {
        update_listing(&mut self.conn.borrow_mut(), listing)
    }
    fn delete_listing(&self, id: &Id) -> Result<()> {
        delete_listing(&mut self.conn.borrow_mut(), id)
    }

    fn get_listing(&self, id: &Id) -> Result<Listing> {
        get_listing(&mut self.conn.borrow_mut(), id)
    }
    fn get_listing_by_slug(&self, slug: &str) -> Result<Listing> {
        get_listing_by_slug(&mut self.conn.borrow_mut(), slug)
    }

    fn query_listings(
        &self,
        query: &ListingQuery,
        pagination: &Pagination,
    ) -> Result<Vec<Listing>> {
        query_listings(&mut self.conn.borrow_mut(), query, pagination)
    }
    fn count_listings(&self) -> Result<usize> {
        count_listings(&mut self.conn.borrow_mut())
    }
    fn count_listings_of_category(&self, category_id: &Id) -> Result<usize> {
        count_listings_of_category(&mut self.conn.borrow_mut(), category_id)
    }
    fn count_listings_of_listing_type(&self, listing_type_id: &Id) -> Result<usize> {
        count_listings_of_listing_type(&mut self.conn.borrow_mut(), listing_type_id)
    }
    fn count_listings_of_owner(&self, owner_email: &EmailAddress) -> Result<usize> {
        count_listings_of_owner(&mut self.conn.borrow_mut(), owner_email)
    }
}

impl<'a> ListingRepo for DbConnection<'a> {
    fn create_listing(&self, listing: Listing) -> Result<()> {
        create_listing(&mut self.conn.borrow_mut(), &listing)
    }
    fn update_listing(&self, listing: &Listing) -> Result<()> {
        update_listing(&mut self.conn.borrow_mut(), listing)
    }
    fn delete_listing(&self, id: &Id) -> Result<()> {
        delete_listing(&mut self.conn.borrow_mut(), id)
    }

    fn get_listing(&self, id: &Id) -> Result<Listing> {
        get_listing(&mut self.conn.borrow_mut(), id)
    }
    fn get_listing_by_slug(&self, slug: &str) -> Result<Listing> {
        get_listing_by_slug(&mut self.conn.borrow_mut(), slug)
    }

    fn query_listings(
        &self,
        query: &ListingQuery,
        pagination: &Pagination,
    ) -> Result<Vec<Listing>> {
        query_listings(&mut self.conn.borrow_mut(), query, pagination)
    }
    fn count_listings(&self) -> Result<usize> {
        count_listings(&mut self.conn.borrow_mut())
    }
    fn count_listings_of_category(&self, category_id: &Id) -> Result<usize> {
        count_listings_of_category(&mut self.conn.borrow_mut(), category_id)
    }
    fn count_listings_of_listing_type(&self, listing_type_id: &Id) -> Result<usize> {
        count_listings_of_listing_type(&mut self.conn.borrow_mut(), listing_type_id)
    }
    fn count_listings_of_owner(&self, owner_email: &EmailAddress) -> Result<usize> {
        count_listings_of_owner(&mut self.conn.borrow_mut(), owner_email)
    }
}

fn new_listing_model<'a>(l: &'a Listing, details: String) -> models::NewListing<'a> {
    models::NewListing {
        id: l.id.as_str(),
        slug: &l.slug,
        title: &l.title,
        description: l.description.as_deref(),
        category_id: l.category_id.as_str(),
        listing_type_id: l.listing_type_id.as_str(),
        owner_email: l.owner_email.as_str(),
        email: &l.email,
        phone: l.phone.as_deref(),
        whatsapp: l.whatsapp.as_deref(),
        website: l.website.as_deref(),
        address: &l.address,
        city: &l.city,
        province: &l.province,
        lat: l.position.lat_deg(),
        lng: l.position.lng_deg(),
        status: ListingStatusPrimitive::from(l.status),
        created_at: l.created_at.as_secs(),
        updated_at: l.updated_at.as_secs(),
        details,
    }
}

fn load_listing(entity: models::ListingEntity) -> Result<Listing> {
    let models::ListingEntity {
        rowid: _,
        id,
        slug,
        title,
        description,
        category_id,
        listing_type_id,
        owner_email,
        email,
        phone,
        whatsapp,
        website,
        address,
        city,
        province,
        lat,
        lng,
        status,
        created_at,
        updated_at,
        details,
    } = entity;
    let status = load_listing_status(status)?;
    let position = MapPoint::try_from_lat_lng_deg(lat, lng)
        .ok_or_else(|| anyhow!("Invalid position: lat = {lat}, lng = {lng}"))?;
    let details = serde_json::from_str(&details)
        .map_err(|err| anyhow!("Invalid listing details: {err}"))?;
    Ok(Listing {
        id: id.into(),
        slug,
        title,
        description,
        category_id: category_id.into(),
        listing_type_id: listing_type_id.into(),
        owner_email: EmailAddress::new_unchecked(owner_email),
        email,
        phone,
        whatsapp,
        website,
        address,
        city,
        province,
        position,
        status,
        created_at: Timestamp::from_secs(created_at),
        updated_at: Timestamp::from_secs(updated_at),
        details,
    })
}

fn create_listing(conn: &mut SqliteConnection, l: &Listing) -> Result<()> {
    let details = serde_json::to_string(&l.details).map_err(|err| anyhow!(err))?;
    let new_listing = new_listing_model(l, details);
    diesel::insert_into(schema::listings::table)
        .values(&new_listing)
        .execute(conn)
        .map_err(from_diesel_err)?;
    Ok(())
}

fn update_listing(conn: &mut SqliteConnection, l: &Listing) -> Result<()> {
    use schema::listings::dsl;
    let details = serde_json::to_string(&l.details).map_err(|err| anyhow!(err))?;
    let new_listing = new_listing_model(l, details);
    let count = diesel::update(dsl::listings.filter(dsl::id.eq(new_listing.id)))
        .set(&new_listing)
        .execute(conn)
        .map_err(from_diesel_err)?;
    if count == 0 {
        return Err(repo::Error::NotFound);
    }
    Ok(())
}

fn delete_listing(conn: &mut SqliteConnection, id: &Id) -> Result<()> {
    use schema::listings::dsl;
    let count = diesel::delete(dsl::listings.filter(dsl::id.eq(id.as_str())))
        .execute(conn)
        .map_err(from_diesel_err)?;
    if count == 0 {
        return Err(repo::Error::NotFound);
    }
    Ok(())
}

fn get_listing(conn: &mut SqliteConnection, id: &Id) -> Result<Listing> {
    use schema::listings::dsl;
    load_listing(
        dsl::listings
            .filter(dsl::id.eq(id.as_str()))
            .first::<models::ListingEntity>(conn)
            .map_err(from_diesel_err)?,
    )
}

fn get_listing_by_slug(conn: &mut SqliteConnection, slug: &str) -> Result<Listing> {
    use schema::listings::dsl;
    load_listing(
        dsl::listings
            .filter(dsl::slug.eq(slug))
            .first::<models::ListingEntity>(conn)
            .map_err(from_diesel_err)?,
    )
}

fn query_listings(
    conn: &mut SqliteConnection,
    query: &ListingQuery,
    pagination: &Pagination,
) -> Result<Vec<Listing>> {
    use schema::listings::dsl;
    let mut sql = schema::listings::table.into_boxed();
    if let Some(status) = query.status {
        sql = sql.filter(dsl::status.eq(ListingStatusPrimitive::from(status)));
    }
    if let Some(bbox) = &query.bbox {
        let southwest = bbox.southwest();
        let northeast = bbox.northeast();
        sql = sql
            .filter(dsl::lat.ge(southwest.lat_deg()))
            .filter(dsl::lat.le(northeast.lat_deg()))
            .filter(dsl::lng.ge(southwest.lng_deg()))
            .filter(dsl::lng.le(northeast.lng_deg()));
    }
    if !query.categories.is_empty() {
        sql = sql.filter(dsl::category_id.eq_any(query.categories.iter().map(Id::as_str)));
    }
    if !query.listing_types.is_empty() {
        sql = sql.filter(dsl::listing_type_id.eq_any(query.listing_types.iter().map(Id::as_str)));
    }
    if let Some(owner_email) = &query.owner_email {
        sql = sql.filter(dsl::owner_email.eq(owner_email.as_str()));
    }
    if let Some(text) = &query.text {
        // LIKE is case-insensitive in SQLite for ASCII characters
        sql = sql.filter(dsl::title.like(format!("%{text}%")));
    }
    sql = sql.order(dsl::created_at.desc());

    // Pagination
    let offset = pagination.offset.unwrap_or(0) as i64;
    // SQLite does not support an OFFSET without a LIMIT
    // <https://www.sqlite.org/lang_select.html>
    if let Some(limit) = pagination.limit {
        sql = sql.limit(limit as i64);
        // Optional OFFSET
        if offset > 0 {
            sql = sql.offset(offset);
        }
    } else if offset > 0 {
        // Mandatory LIMIT
        sql = sql.limit(i64::MAX);
        sql = sql.offset(offset);
    }

    sql.load::<models::ListingEntity>(conn)
        .map_err(from_diesel_err)?
        .into_iter()
        .map(load_listing)
        .collect()
}

fn count_listings(conn: &mut SqliteConnection) -> Result<usize> {
    use schema::listings::dsl;
    Ok(dsl::listings
        .select(diesel::dsl::count(dsl::rowid))
        .first::<i64>(conn)
        .map_err(from_diesel_err)? as usize)
}

pub(super) fn count_listings_of_category(
    conn: &mut SqliteConnection,
    category_id: &Id,
) -> Result<usize> {
    use schema::listings::dsl;
    Ok(dsl::listings
        .select(diesel::dsl::count(dsl::rowid))
        .filter(dsl::category_id.eq(category_id.as_str()))
        .first::<i64>(conn)
        .map_err(from_diesel_err)? as usize)
}

pub(super) fn count_listings_of_listing_type(
    conn: &mut SqliteConnection,
    listing_type_id: &Id,
) -> Result<usize> {
    use schema::listings::dsl;
    Ok(dsl::listings
        .select(diesel::dsl::count(dsl::rowid))
        .filter(dsl::listing_type_id.eq(listing_type_id.as_str()))
        .first::<i64>(conn)
        .map_err(from_diesel_err)? as usize)
}

fn count_listings_of_owner(
    conn: &mut SqliteConnection,
    owner_email: &EmailAddress,
) -> Result<usize> {
    use schema::listings::dsl;
    Ok(dsl::listings
        .select(diesel::dsl::count(dsl::rowid))
        .filter(dsl::owner_email.eq(owner_email.as_str()))
        .first::<i64>(conn)
        .map_err(from_diesel_err)? as usize)
}
