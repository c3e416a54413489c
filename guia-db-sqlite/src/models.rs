#![allow(clippy::extra_unused_lifetimes)]

// NOTE:
// All timestamps with the `_at` postfix are stored
// as unix timestamps in seconds.

use super::schema::*;

#[derive(Insertable, AsChangeset)]
#[diesel(table_name = categories)]
pub struct NewCategory<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub slug: &'a str,
    pub parent_id: Option<&'a str>,
    pub marker_icon_slug: &'a str,
    pub marker_icon_width: i32,
    pub marker_icon_height: i32,
}

#[derive(Queryable)]
pub struct CategoryEntity {
    pub rowid: i64,
    pub id: String,
    pub name: String,
    pub slug: String,
    pub parent_id: Option<String>,
    pub marker_icon_slug: String,
    pub marker_icon_width: i32,
    pub marker_icon_height: i32,
}

#[derive(Insertable, AsChangeset)]
#[diesel(table_name = listing_types)]
pub struct NewListingType<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub slug: &'a str,
}

#[derive(Queryable)]
pub struct ListingTypeEntity {
    pub rowid: i64,
    pub id: String,
    pub name: String,
    pub slug: String,
}

#[derive(Insertable)]
#[diesel(table_name = listing_type_fields)]
pub struct NewListingTypeField<'a> {
    pub listing_type_rowid: i64,
    pub position: i32,
    pub name: &'a str,
    pub label: &'a str,
    pub field_type: &'a str,
    pub required: bool,
    pub options: Option<String>,
}

#[derive(Queryable)]
pub struct ListingTypeFieldEntity {
    pub rowid: i64,
    pub listing_type_rowid: i64,
    pub position: i32,
    pub name: String,
    pub label: String,
    pub field_type: String,
    pub required: bool,
    pub options: Option<String>,
}

#[derive(Insertable, AsChangeset)]
#[diesel(table_name = listings)]
pub struct NewListing<'a> {
    pub id: &'a str,
    pub slug: &'a str,
    pub title: &'a str,
    pub description: Option<&'a str>,
    pub category_id: &'a str,
    pub listing_type_id: &'a str,
    pub owner_email: &'a str,
    pub email: &'a str,
    pub phone: Option<&'a str>,
    pub whatsapp: Option<&'a str>,
    pub website: Option<&'a str>,
    pub address: &'a str,
    pub city: &'a str,
    pub province: &'a str,
    pub lat: f64,
    pub lng: f64,
    pub status: i16,
    pub created_at: i64,
    pub updated_at: i64,
    pub details: String,
}

#[derive(Queryable)]
pub struct ListingEntity {
    pub rowid: i64,
    pub id: String,
    pub slug: String,
    pub title: String,
    pub description: Option<String>,
    pub category_id: String,
    pub listing_type_id: String,
    pub owner_email: String,
    pub email: String,
    pub phone: Option<String>,
    pub whatsapp: Option<String>,
    pub website: Option<String>,
    pub address: String,
    pub city: String,
    pub province: String,
    pub lat: f64,
    pub lng: f64,
    pub status: i16,
    pub created_at: i64,
    pub updated_at: i64,
    pub details: String,
}

#[derive(Insertable, AsChangeset)]
#[diesel(table_name = users)]
pub struct NewUser<'a> {
    pub email: &'a str,
    pub password: &'a str,
    pub role: i16,
}

#[derive(Queryable)]
pub struct UserEntity {
    pub id: i64,
    pub email: String,
    pub password: String,
    pub role: i16,
}
