//! JSON types exchanged with clients and their conversions.

use crate::core::{entities as e, usecases};

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub http_status: u16,
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct JwtToken {
    pub token: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct NewUser {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Guest,
    User,
    Admin,
}

impl From<e::Role> for UserRole {
    fn from(from: e::Role) -> Self {
        match from {
            e::Role::Guest => Self::Guest,
            e::Role::User => Self::User,
            e::Role::Admin => Self::Admin,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct User {
    pub email: String,
    pub role: UserRole,
}

/// Marker icon of a category, scaled for map display.
#[derive(Debug, Serialize, Deserialize)]
pub struct MarkerIcon {
    pub slug: String,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub slug: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    pub marker_icon: MarkerIcon,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SchemaField {
    pub name: String,
    pub label: String,
    pub field_type: String,
    pub required: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ListingType {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub fields: Vec<SchemaField>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct NewCategory {
    pub name: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub parent_id: Option<String>,
    #[serde(default)]
    pub marker_icon_slug: Option<String>,
    #[serde(default)]
    pub marker_icon_width: Option<u32>,
    #[serde(default)]
    pub marker_icon_height: Option<u32>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct UpdateCategory {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub marker_icon_slug: Option<String>,
    #[serde(default)]
    pub marker_icon_width: Option<u32>,
    #[serde(default)]
    pub marker_icon_height: Option<u32>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct NewListingType {
    pub name: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub fields: Vec<SchemaField>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct UpdateListingType {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub fields: Option<Vec<SchemaField>>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StatusChange {
    pub status: String,
}

/// Compact listing representation for map search results.
#[derive(Debug, Serialize, Deserialize)]
pub struct ListingSummary {
    pub id: String,
    pub slug: String,
    pub title: String,
    pub lat: f64,
    pub lng: f64,
    pub category_id: String,
    pub listing_type_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub listing_type_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_image_url: Option<String>,
    pub marker_icon: MarkerIcon,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Listing {
    pub id: String,
    pub slug: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub category_id: String,
    pub listing_type_id: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub whatsapp: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    pub address: String,
    pub city: String,
    pub province: String,
    pub lat: f64,
    pub lng: f64,
    pub status: String,
    pub created_at: i64,
    pub updated_at: i64,
    pub details: e::ListingDetails,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StoredListing {
    pub listing: Listing,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

pub mod to_json {
    //! Entity -> JSON

    use super::*;

    pub fn user(from: e::User) -> User {
        User {
            email: from.email.into_string(),
            role: from.role.into(),
        }
    }

    pub fn category(from: e::Category) -> Category {
        let e::Category {
            id,
            name,
            slug,
            parent_id,
            marker_icon,
        } = from;
        Category {
            id: id.into(),
            name,
            slug,
            parent_id: parent_id.map(Into::into),
            marker_icon: scaled_marker_icon(&marker_icon),
        }
    }

    /// Scales the icon to the fixed map pin height.
    pub fn scaled_marker_icon(from: &e::MarkerIcon) -> MarkerIcon {
        MarkerIcon {
            slug: from.slug.clone(),
            width: from.scaled_width(),
            height: e::MarkerIcon::FIXED_HEIGHT,
        }
    }

    pub fn schema_field(from: e::FieldDescriptor) -> SchemaField {
        let e::FieldDescriptor {
            name,
            label,
            field_type,
            required,
            options,
        } = from;
        SchemaField {
            name,
            label,
            field_type: field_type.as_str().into(),
            required,
            options,
        }
    }

    pub fn listing_type(from: e::ListingType) -> ListingType {
        let e::ListingType {
            id,
            name,
            slug,
            fields,
        } = from;
        ListingType {
            id: id.into(),
            name,
            slug,
            fields: fields.into_iter().map(schema_field).collect(),
        }
    }

    pub fn listing(from: e::Listing) -> Listing {
        let e::Listing {
            id,
            slug,
            title,
            description,
            category_id,
            listing_type_id,
            owner_email: _,
            email,
            phone,
            whatsapp,
            website,
            address,
            city,
            province,
            position,
            status,
            created_at,
            updated_at,
            details,
        } = from;
        Listing {
            id: id.into(),
            slug,
            title,
            description,
            category_id: category_id.into(),
            listing_type_id: listing_type_id.into(),
            email,
            phone,
            whatsapp,
            website,
            address,
            city,
            province,
            lat: position.lat_deg(),
            lng: position.lng_deg(),
            status: status.as_str().into(),
            created_at: created_at.as_secs(),
            updated_at: updated_at.as_secs(),
            details,
        }
    }

    pub fn listing_summary(
        from: e::Listing,
        category: Option<&e::Category>,
        listing_type: Option<&e::ListingType>,
    ) -> ListingSummary {
        let marker_icon = category
            .map(|c| scaled_marker_icon(&c.marker_icon))
            .unwrap_or_else(|| scaled_marker_icon(&e::MarkerIcon::default()));
        ListingSummary {
            id: from.id.into(),
            slug: from.slug,
            title: from.title,
            lat: from.position.lat_deg(),
            lng: from.position.lng_deg(),
            category_id: from.category_id.into(),
            listing_type_id: from.listing_type_id.into(),
            category_name: category.map(|c| c.name.clone()),
            listing_type_name: listing_type.map(|t| t.name.clone()),
            cover_image_url: from.details.cover_image.map(|image| image.url),
            marker_icon,
        }
    }

    pub fn stored_listing(listing: e::Listing, warnings: Vec<String>) -> StoredListing {
        StoredListing {
            listing: self::listing(listing),
            warnings,
        }
    }
}

pub mod from_json {
    //! JSON -> Entity

    use super::*;
    use anyhow::anyhow;

    pub fn new_category(from: NewCategory) -> usecases::NewCategory {
        let NewCategory {
            name,
            slug,
            parent_id,
            marker_icon_slug,
            marker_icon_width,
            marker_icon_height,
        } = from;
        usecases::NewCategory {
            name,
            slug,
            parent_id,
            marker_icon_slug,
            marker_icon_width,
            marker_icon_height,
        }
    }

    pub fn try_schema_field(from: SchemaField) -> anyhow::Result<e::FieldDescriptor> {
        let SchemaField {
            name,
            label,
            field_type,
            required,
            options,
        } = from;
        let field_type = e::FieldType::parse(&field_type)
            .map_err(|_| anyhow!("Invalid field type: {field_type}"))?;
        Ok(e::FieldDescriptor {
            name,
            label,
            field_type,
            required,
            options,
        })
    }

    pub fn try_new_listing_type(from: NewListingType) -> anyhow::Result<usecases::NewListingType> {
        let NewListingType { name, slug, fields } = from;
        let fields = fields
            .into_iter()
            .map(try_schema_field)
            .collect::<anyhow::Result<_>>()?;
        Ok(usecases::NewListingType { name, slug, fields })
    }
}
