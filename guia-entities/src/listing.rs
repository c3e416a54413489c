use crate::{
    email::EmailAddress, geo::MapPoint, id::Id, status::ListingStatus, time::Timestamp,
};

/// Reference to an externally stored image.
///
/// The `public_id` is the handle understood by the image store,
/// the `url` is what clients render.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ImageRef {
    pub url: String,
    pub public_id: String,
}

/// The flexible detail document of a listing.
///
/// Stored as a single JSON blob next to the fixed columns. The
/// `dynamic_fields` map is validated against the schema of the
/// listing type on write, never on read.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ListingDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provincia_id: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub localidad_id: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opening_hours: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub amenities: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<ImageRef>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub gallery: Vec<ImageRef>,
    #[serde(default, skip_serializing_if = "serde_json::Map::is_empty")]
    pub dynamic_fields: serde_json::Map<String, serde_json::Value>,
}

/// A geolocated directory listing.
#[derive(Debug, Clone, PartialEq)]
pub struct Listing {
    pub id: Id,
    pub slug: String,
    pub title: String,
    pub description: Option<String>,
    pub category_id: Id,
    pub listing_type_id: Id,
    pub owner_email: EmailAddress,
    /// Public contact email, unrelated to the owner account.
    pub email: String,
    pub phone: Option<String>,
    pub whatsapp: Option<String>,
    pub website: Option<String>,
    pub address: String,
    pub city: String,
    pub province: String,
    pub position: MapPoint,
    pub status: ListingStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub details: ListingDetails,
}

impl Listing {
    pub fn is_public(&self) -> bool {
        self.status.is_public()
    }

    pub fn is_owned_by(&self, email: &EmailAddress) -> bool {
        &self.owner_email == email
    }
}
