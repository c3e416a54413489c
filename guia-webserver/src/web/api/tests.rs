use super::*;
use crate::adapters::json;

pub mod prelude {

    use crate::web::{self, api, sqlite};

    pub use crate::web::tests::prelude::*;
    pub use rocket::http::Header;

    pub fn setup() -> (Client, sqlite::Connections) {
        let (client, conn) = web::tests::setup(vec![("/", api::routes())]);
        (client, conn)
    }

    pub fn test_json(r: &LocalResponse) {
        assert_eq!(
            r.headers().get("Content-Type").collect::<Vec<_>>()[0],
            "application/json"
        );
    }

    /// Builds a `multipart/form-data` request body by hand.
    pub struct Multipart {
        boundary: &'static str,
        body: Vec<u8>,
    }

    impl Default for Multipart {
        fn default() -> Self {
            Self {
                boundary: "GUIA-TEST-BOUNDARY",
                body: Vec::new(),
            }
        }
    }

    impl Multipart {
        pub fn text(mut self, name: &str, value: &str) -> Self {
            self.body.extend_from_slice(
                format!(
                    "--{}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n",
                    self.boundary
                )
                .as_bytes(),
            );
            self
        }

        pub fn file(
            mut self,
            name: &str,
            filename: &str,
            content_type: &str,
            bytes: &[u8],
        ) -> Self {
            self.body.extend_from_slice(
                format!(
                    "--{}\r\nContent-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\nContent-Type: {content_type}\r\n\r\n",
                    self.boundary
                )
                .as_bytes(),
            );
            self.body.extend_from_slice(bytes);
            self.body.extend_from_slice(b"\r\n");
            self
        }

        pub fn finish(mut self) -> (ContentType, Vec<u8>) {
            self.body
                .extend_from_slice(format!("--{}--\r\n", self.boundary).as_bytes());
            let content_type = ContentType::parse_flexible(&format!(
                "multipart/form-data; boundary={}",
                self.boundary
            ))
            .unwrap();
            (content_type, self.body)
        }
    }
}

use self::prelude::*;
use crate::{core::usecases, web::sqlite};

fn login(client: &Client, email: &str, pw: &str) -> String {
    let response = client
        .post("/login")
        .header(ContentType::JSON)
        .body(format!(r#"{{"email":"{email}","password":"{pw}"}}"#))
        .dispatch();
    assert_eq!(response.status(), Status::Ok);
    let body = response.into_string().unwrap();
    serde_json::from_str::<json::JwtToken>(&body).unwrap().token
}

fn create_category(pool: &sqlite::Connections, name: &str) -> Id {
    let mut db = pool.exclusive().unwrap();
    db.transaction(|conn| {
        usecases::create_new_category(
            conn,
            usecases::NewCategory {
                name: name.into(),
                ..Default::default()
            },
        )
    })
    .unwrap()
    .id
}

fn listing_type_id(pool: &sqlite::Connections, slug: &str) -> Id {
    pool.shared()
        .unwrap()
        .get_listing_type_by_slug(slug)
        .unwrap()
        .id
}

fn create_published_listing(client: &Client, pool: &sqlite::Connections) -> json::StoredListing {
    let stored = create_pending_listing(client, pool);
    let mut db = pool.exclusive().unwrap();
    db.transaction(|conn| {
        usecases::change_listing_status(conn, &Id::from(stored.listing.id.clone()), "published")
    })
    .unwrap();
    stored
}

fn create_pending_listing(client: &Client, pool: &sqlite::Connections) -> json::StoredListing {
    let category_id = create_category(pool, "Gastronomía");
    let listing_type_id = listing_type_id(pool, "negocio-local");
    register_user(pool, "dueno@example.com", "secreto123");
    login(client, "dueno@example.com", "secreto123");

    let (content_type, body) = Multipart::default()
        .text("title", "Panadería El Sol")
        .text("description", "Pan casero todas las mañanas")
        .text("category_id", category_id.as_str())
        .text("listing_type_id", listing_type_id.as_str())
        .text("lat", "-27.45")
        .text("lng", "-58.98")
        .text("address", "Av. 25 de Mayo 1234")
        .text("city", "Resistencia")
        .text("province", "Chaco")
        .text("email", "contacto@elsol.example")
        .text("dynamic_details", r#"{"a":"x"}"#)
        .file("coverImage", "cover.jpg", "image/jpeg", b"JPEGDATA")
        .file("galleryImages[]", "g0.jpg", "image/jpeg", b"GALLERY-0")
        .finish();
    let response = client
        .post("/listings")
        .header(content_type)
        .body(body)
        .dispatch();
    assert_eq!(response.status(), Status::Ok);
    test_json(&response);
    let body = response.into_string().unwrap();
    serde_json::from_str::<json::StoredListing>(&body).unwrap()
}

#[test]
fn register_and_get_current_user() {
    let (client, _db) = setup();
    let response = client
        .post("/users")
        .header(ContentType::JSON)
        .body(r#"{"email":"ana@example.com","password":"secreto123"}"#)
        .dispatch();
    assert_eq!(response.status(), Status::Ok);

    login(&client, "ana@example.com", "secreto123");
    let response = client.get("/users/current").dispatch();
    assert_eq!(response.status(), Status::Ok);
    let body = response.into_string().unwrap();
    let user: json::User = serde_json::from_str(&body).unwrap();
    assert_eq!(user.email, "ana@example.com");
    assert_eq!(user.role, json::UserRole::User);
}

#[test]
fn login_with_invalid_credentials() {
    let (client, db) = setup();
    register_user(&db, "ana@example.com", "secreto123");
    let response = client
        .post("/login")
        .header(ContentType::JSON)
        .body(r#"{"email":"ana@example.com","password":"wrong-password"}"#)
        .dispatch();
    assert_eq!(response.status(), Status::Unauthorized);
    test_json(&response);
    let body = response.into_string().unwrap();
    let err: json::ErrorResponse = serde_json::from_str(&body).unwrap();
    assert_eq!(err.http_status, 401);
}

#[test]
fn current_user_requires_login() {
    let (client, _db) = setup();
    let response = client.get("/users/current").dispatch();
    assert_eq!(response.status(), Status::Unauthorized);
}

#[test]
fn logout_blacklists_bearer_token() {
    let (client, db) = setup();
    register_user(&db, "ana@example.com", "secreto123");
    let token = login(&client, "ana@example.com", "secreto123");

    let response = client
        .post("/logout")
        .header(ContentType::JSON)
        .header(Header::new("Authorization", format!("Bearer {token}")))
        .dispatch();
    assert_eq!(response.status(), Status::Ok);

    // The cookie is gone and the token is revoked.
    let response = client
        .get("/users/current")
        .header(Header::new("Authorization", format!("Bearer {token}")))
        .dispatch();
    assert_eq!(response.status(), Status::Unauthorized);
}

#[test]
fn create_listing_with_images() {
    let (client, db) = setup();
    let stored = create_pending_listing(&client, &db);
    assert_eq!(stored.listing.status, "pending");
    assert!(stored.listing.slug.starts_with("panaderia-el-sol-"));
    assert!(stored.warnings.is_empty());
    let cover = stored.listing.details.cover_image.unwrap();
    assert!(cover.public_id.starts_with("listings/"));
    assert!(cover.public_id.ends_with("/cover"));
    assert_eq!(stored.listing.details.gallery.len(), 1);
}

#[test]
fn uploads_must_be_images() {
    let (client, db) = setup();
    let category_id = create_category(&db, "Gastronomía");
    let listing_type_id = listing_type_id(&db, "negocio-local");
    register_user(&db, "dueno@example.com", "secreto123");
    login(&client, "dueno@example.com", "secreto123");

    let (content_type, body) = Multipart::default()
        .text("title", "Panadería El Sol")
        .text("category_id", category_id.as_str())
        .text("listing_type_id", listing_type_id.as_str())
        .text("lat", "-27.45")
        .text("lng", "-58.98")
        .text("address", "Av. 25 de Mayo 1234")
        .text("city", "Resistencia")
        .text("province", "Chaco")
        .text("email", "contacto@elsol.example")
        .file("coverImage", "cover.pdf", "application/pdf", b"%PDF-")
        .finish();
    let response = client
        .post("/listings")
        .header(content_type)
        .body(body)
        .dispatch();
    assert_eq!(response.status(), Status::UnsupportedMediaType);
}

#[test]
fn creating_a_listing_requires_login() {
    let (client, _db) = setup();
    let (content_type, body) = Multipart::default()
        .text("title", "Panadería El Sol")
        .finish();
    let response = client
        .post("/listings")
        .header(content_type)
        .body(body)
        .dispatch();
    assert_eq!(response.status(), Status::Unauthorized);
}

#[test]
fn pending_listings_stay_out_of_the_public_search() {
    let (client, db) = setup();
    let stored = create_pending_listing(&client, &db);

    let response = client.get("/listings").dispatch();
    assert_eq!(response.status(), Status::Ok);
    let body = response.into_string().unwrap();
    let results: Vec<json::ListingSummary> = serde_json::from_str(&body).unwrap();
    assert!(results.is_empty());

    let response = client
        .get(format!("/listings/{}/public", stored.listing.slug))
        .dispatch();
    assert_eq!(response.status(), Status::NotFound);
}

#[test]
fn search_published_listings_within_bbox() {
    let (client, db) = setup();
    let stored = create_published_listing(&client, &db);

    let response = client
        .get("/listings?bbox=-59.5,-28.0,-58.5,-27.0&search=panader")
        .dispatch();
    assert_eq!(response.status(), Status::Ok);
    test_json(&response);
    let body = response.into_string().unwrap();
    let results: Vec<json::ListingSummary> = serde_json::from_str(&body).unwrap();
    assert_eq!(results.len(), 1);
    let hit = &results[0];
    assert_eq!(hit.id, stored.listing.id);
    assert_eq!(hit.category_name.as_deref(), Some("Gastronomía"));
    assert_eq!(hit.listing_type_name.as_deref(), Some("Negocio Local"));
    assert!(hit.cover_image_url.is_some());
    assert_eq!(hit.marker_icon.height, 38);

    // Filtering by the matching category keeps the hit, any other
    // category id drops it.
    let response = client
        .get(format!("/listings?categoryIds={}", hit.category_id))
        .dispatch();
    let body = response.into_string().unwrap();
    let results: Vec<json::ListingSummary> = serde_json::from_str(&body).unwrap();
    assert_eq!(results.len(), 1);
    let response = client.get("/listings?listingTypeIds=no-such-type").dispatch();
    let body = response.into_string().unwrap();
    let results: Vec<json::ListingSummary> = serde_json::from_str(&body).unwrap();
    assert!(results.is_empty());

    // A bounding box somewhere else does not match.
    let response = client.get("/listings?bbox=10.0,40.0,11.0,41.0").dispatch();
    let body = response.into_string().unwrap();
    let results: Vec<json::ListingSummary> = serde_json::from_str(&body).unwrap();
    assert!(results.is_empty());
}

#[test]
fn search_with_malformed_bbox() {
    let (client, _db) = setup();
    let response = client.get("/listings?bbox=not-a-bbox").dispatch();
    assert_eq!(response.status(), Status::BadRequest);
}

#[test]
fn owners_see_their_own_listings() {
    let (client, db) = setup();
    let stored = create_pending_listing(&client, &db);

    let response = client.get("/my-listings").dispatch();
    assert_eq!(response.status(), Status::Ok);
    let body = response.into_string().unwrap();
    let listings: Vec<json::Listing> = serde_json::from_str(&body).unwrap();
    assert_eq!(listings.len(), 1);
    assert_eq!(listings[0].status, "pending");

    let response = client
        .get(format!("/listings/{}", stored.listing.id))
        .dispatch();
    assert_eq!(response.status(), Status::Ok);

    // Another account must not see it.
    register_user(&db, "otra@example.com", "secreto123");
    login(&client, "otra@example.com", "secreto123");
    let response = client
        .get(format!("/listings/{}", stored.listing.id))
        .dispatch();
    assert_eq!(response.status(), Status::Forbidden);
}

#[test]
fn dynamic_fields_survive_the_round_trip() {
    let (client, db) = setup();
    let stored = create_pending_listing(&client, &db);

    let response = client
        .get(format!("/listings/{}", stored.listing.id))
        .dispatch();
    assert_eq!(response.status(), Status::Ok);
    let body = response.into_string().unwrap();
    let listing: json::Listing = serde_json::from_str(&body).unwrap();
    assert_eq!(
        listing.details.dynamic_fields.get("a"),
        Some(&serde_json::json!("x"))
    );
}

#[test]
fn moderation_requires_admin_role() {
    let (client, db) = setup();
    let stored = create_pending_listing(&client, &db);

    // The owner is still logged in and is not an admin.
    let response = client
        .patch(format!("/listings/{}/status", stored.listing.id))
        .header(ContentType::JSON)
        .body(r#"{"status":"published"}"#)
        .dispatch();
    assert_eq!(response.status(), Status::Unauthorized);

    register_user_with_role(&db, "admin@example.com", "secreto123", Role::Admin);
    login(&client, "admin@example.com", "secreto123");
    let response = client
        .patch(format!("/listings/{}/status", stored.listing.id))
        .header(ContentType::JSON)
        .body(r#"{"status":"published"}"#)
        .dispatch();
    assert_eq!(response.status(), Status::Ok);
    let body = response.into_string().unwrap();
    let change: json::StatusChange = serde_json::from_str(&body).unwrap();
    assert_eq!(change.status, "published");

    let response = client
        .get(format!("/listings/{}/public", stored.listing.slug))
        .dispatch();
    assert_eq!(response.status(), Status::Ok);
}

#[test]
fn rejecting_an_unknown_status_value() {
    let (client, db) = setup();
    let stored = create_pending_listing(&client, &db);
    register_user_with_role(&db, "admin@example.com", "secreto123", Role::Admin);
    login(&client, "admin@example.com", "secreto123");
    let response = client
        .patch(format!("/listings/{}/status", stored.listing.id))
        .header(ContentType::JSON)
        .body(r#"{"status":"archived"}"#)
        .dispatch();
    assert_eq!(response.status(), Status::BadRequest);
}

#[test]
fn seeded_listing_types_and_their_schemas() {
    let (client, db) = setup();
    let response = client.get("/listing-types").dispatch();
    assert_eq!(response.status(), Status::Ok);
    let body = response.into_string().unwrap();
    let listing_types: Vec<json::ListingType> = serde_json::from_str(&body).unwrap();
    let slugs: Vec<_> = listing_types.iter().map(|t| t.slug.as_str()).collect();
    assert_eq!(
        slugs,
        vec![
            "negocio-local",
            "servicio-profesional",
            "evento",
            "punto-de-interes",
            "vehiculos"
        ]
    );

    let vehiculos = listing_type_id(&db, "vehiculos");
    let response = client
        .get(format!("/listing-types/{}/schema", vehiculos.as_str()))
        .dispatch();
    assert_eq!(response.status(), Status::Ok);
    let body = response.into_string().unwrap();
    let fields: Vec<json::SchemaField> = serde_json::from_str(&body).unwrap();
    assert_eq!(fields.len(), 6);
    assert_eq!(fields[0].name, "type");
    assert_eq!(fields[0].field_type, "select");
    assert!(fields[0].options.contains(&"Auto".to_string()));

    // Unknown types answer with an empty schema.
    let response = client.get("/listing-types/unknown/schema").dispatch();
    assert_eq!(response.status(), Status::Ok);
    let body = response.into_string().unwrap();
    let fields: Vec<json::SchemaField> = serde_json::from_str(&body).unwrap();
    assert!(fields.is_empty());
}

#[test]
fn manage_listing_types_as_admin() {
    let (client, db) = setup();
    register_user_with_role(&db, "admin@example.com", "secreto123", Role::Admin);
    login(&client, "admin@example.com", "secreto123");

    let response = client
        .post("/listing-types")
        .header(ContentType::JSON)
        .body(
            r#"{"name":"Inmuebles","fields":[{"name":"ambientes","label":"Ambientes","field_type":"integer","required":true}]}"#,
        )
        .dispatch();
    assert_eq!(response.status(), Status::Ok);
    let body = response.into_string().unwrap();
    let created: json::ListingType = serde_json::from_str(&body).unwrap();
    assert_eq!(created.slug, "inmuebles");
    assert_eq!(created.fields.len(), 1);

    let response = client
        .patch(format!("/listing-types/{}", created.id))
        .header(ContentType::JSON)
        .body(r#"{"name":"Propiedades"}"#)
        .dispatch();
    assert_eq!(response.status(), Status::Ok);
    let body = response.into_string().unwrap();
    let updated: json::ListingType = serde_json::from_str(&body).unwrap();
    assert_eq!(updated.name, "Propiedades");

    let response = client
        .delete(format!("/listing-types/{}", created.id))
        .dispatch();
    assert_eq!(response.status(), Status::NoContent);
}

#[test]
fn rejecting_an_invalid_field_type() {
    let (client, db) = setup();
    register_user_with_role(&db, "admin@example.com", "secreto123", Role::Admin);
    login(&client, "admin@example.com", "secreto123");
    let response = client
        .post("/listing-types")
        .header(ContentType::JSON)
        .body(
            r#"{"name":"Inmuebles","fields":[{"name":"x","label":"X","field_type":"matrix","required":false}]}"#,
        )
        .dispatch();
    assert_eq!(response.status(), Status::BadRequest);
}

#[test]
fn category_tree() {
    let (client, db) = setup();
    register_user_with_role(&db, "admin@example.com", "secreto123", Role::Admin);
    login(&client, "admin@example.com", "secreto123");

    let response = client
        .post("/categories")
        .header(ContentType::JSON)
        .body(r#"{"name":"Gastronomía","marker_icon_slug":"food-pin"}"#)
        .dispatch();
    assert_eq!(response.status(), Status::Ok);
    let body = response.into_string().unwrap();
    let parent: json::Category = serde_json::from_str(&body).unwrap();
    assert_eq!(parent.slug, "gastronomia");
    assert_eq!(parent.marker_icon.slug, "food-pin");

    let response = client
        .post("/categories")
        .header(ContentType::JSON)
        .body(format!(
            r#"{{"name":"Panaderías","parent_id":"{}"}}"#,
            parent.id
        ))
        .dispatch();
    assert_eq!(response.status(), Status::Ok);
    let body = response.into_string().unwrap();
    let child: json::Category = serde_json::from_str(&body).unwrap();

    // Only top level categories on the main endpoint.
    let response = client.get("/categories").dispatch();
    let body = response.into_string().unwrap();
    let top: Vec<json::Category> = serde_json::from_str(&body).unwrap();
    assert_eq!(top.len(), 1);
    assert_eq!(top[0].id, parent.id);

    let response = client
        .get(format!("/categories/{}/subcategories", parent.id))
        .dispatch();
    let body = response.into_string().unwrap();
    let subs: Vec<json::Category> = serde_json::from_str(&body).unwrap();
    assert_eq!(subs.len(), 1);
    assert_eq!(subs[0].id, child.id);

    let response = client.get("/categories/all").dispatch();
    let body = response.into_string().unwrap();
    let all: Vec<json::Category> = serde_json::from_str(&body).unwrap();
    assert_eq!(all.len(), 2);

    // A parent with children cannot be deleted.
    let response = client.delete(format!("/categories/{}", parent.id)).dispatch();
    assert_eq!(response.status(), Status::Conflict);
    let response = client.delete(format!("/categories/{}", child.id)).dispatch();
    assert_eq!(response.status(), Status::NoContent);
}

#[test]
fn managing_categories_requires_admin_role() {
    let (client, db) = setup();
    let response = client
        .post("/categories")
        .header(ContentType::JSON)
        .body(r#"{"name":"Gastronomía"}"#)
        .dispatch();
    assert_eq!(response.status(), Status::Unauthorized);

    register_user(&db, "ana@example.com", "secreto123");
    login(&client, "ana@example.com", "secreto123");
    let response = client
        .post("/categories")
        .header(ContentType::JSON)
        .body(r#"{"name":"Gastronomía"}"#)
        .dispatch();
    assert_eq!(response.status(), Status::Unauthorized);
}

#[test]
fn missing_listings_answer_with_a_json_error() {
    let (client, _db) = setup();
    let response = client.get("/listings/no-such-slug/public").dispatch();
    assert_eq!(response.status(), Status::NotFound);
    test_json(&response);
    let body = response.into_string().unwrap();
    let err: json::ErrorResponse = serde_json::from_str(&body).unwrap();
    assert_eq!(err.http_status, 404);
    assert!(!err.message.is_empty());
}
