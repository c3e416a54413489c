mod users;

pub mod prelude {

    pub fn default_new_listing(category_id: &Id, listing_type_id: &Id) -> usecases::NewListing {
        usecases::NewListing {
            title: Some("Panadería El Sol".into()),
            description: Some("Pan fresco todos los días".into()),
            category_id: Some(category_id.to_string()),
            listing_type_id: Some(listing_type_id.to_string()),
            lat: Some(-27.45),
            lng: Some(-58.98),
            address: Some("Av. Sarmiento 123".into()),
            province: Some("Chaco".into()),
            city: Some("Resistencia".into()),
            email: Some("contacto@elsol.example".into()),
            phone: None,
            whatsapp: None,
            website: None,
            provincia_id: None,
            localidad_id: None,
            opening_hours: None,
            amenities: vec![],
            dynamic_details: None,
        }
    }

    use std::{
        cell::{Cell, RefCell},
        collections::BTreeSet,
    };

    use anyhow::bail;

    pub use guia_core::{
        entities::*,
        gateways::image_storage::ImageStorageGateway,
        repositories::{Error as RepoError, *},
        usecases,
    };

    pub mod sqlite {
        pub use super::super::super::sqlite::*;
    }

    pub use crate::{
        error::{AppError, BError},
        prelude as flows, ListingImages, MAX_GALLERY_IMAGES, MAX_IMAGE_BYTES,
    };

    /// Image store fake that records every call and optionally
    /// fails on demand.
    #[derive(Default)]
    pub struct RecordingImageStore {
        pub calls: RefCell<Vec<String>>,
        pub stored: RefCell<BTreeSet<String>>,
        pub fail_uploads: Cell<bool>,
        pub fail_renames: Cell<bool>,
        pub fail_deletions: Cell<bool>,
    }

    impl RecordingImageStore {
        pub fn contains(&self, public_id: &str) -> bool {
            self.stored.borrow().contains(public_id)
        }

        fn image_ref(public_id: &str) -> ImageRef {
            ImageRef {
                url: format!("https://images.test/{public_id}.webp"),
                public_id: public_id.into(),
            }
        }
    }

    impl ImageStorageGateway for RecordingImageStore {
        fn upload_image(&self, public_id: &str, _bytes: &[u8]) -> anyhow::Result<ImageRef> {
            self.calls.borrow_mut().push(format!("upload {public_id}"));
            if self.fail_uploads.get() {
                bail!("upload failed");
            }
            self.stored.borrow_mut().insert(public_id.into());
            Ok(Self::image_ref(public_id))
        }

        fn rename_image(
            &self,
            from_public_id: &str,
            to_public_id: &str,
        ) -> anyhow::Result<ImageRef> {
            self.calls
                .borrow_mut()
                .push(format!("rename {from_public_id} -> {to_public_id}"));
            if self.fail_renames.get() {
                bail!("rename failed");
            }
            let mut stored = self.stored.borrow_mut();
            stored.remove(from_public_id);
            stored.insert(to_public_id.into());
            Ok(Self::image_ref(to_public_id))
        }

        fn delete_image(&self, public_id: &str) -> anyhow::Result<()> {
            self.calls.borrow_mut().push(format!("delete {public_id}"));
            if self.fail_deletions.get() {
                bail!("delete failed");
            }
            self.stored.borrow_mut().remove(public_id);
            Ok(())
        }

        fn delete_image_folder(&self, prefix: &str) -> anyhow::Result<()> {
            self.calls
                .borrow_mut()
                .push(format!("delete-folder {prefix}"));
            if self.fail_deletions.get() {
                bail!("delete failed");
            }
            self.stored
                .borrow_mut()
                .retain(|id| !id.starts_with(prefix));
            Ok(())
        }
    }

    pub struct BackendFixture {
        pub db_connections: sqlite::Connections,
        pub image_store: RecordingImageStore,
    }

    impl BackendFixture {
        pub fn new() -> Self {
            let db_connections = sqlite::Connections::init(":memory:", 1).unwrap();
            guia_db_sqlite::run_embedded_database_migrations(db_connections.exclusive().unwrap());
            Self {
                db_connections,
                image_store: RecordingImageStore::default(),
            }
        }

        pub fn create_user(&self, email: &str, password: &str, role: Option<Role>) {
            let new_user = usecases::NewUser {
                email: email.parse().unwrap(),
                password: password.into(),
            };
            let db = self.db_connections.exclusive().unwrap();
            usecases::create_new_user(&db, new_user).unwrap();
            if let Some(role) = role {
                let mut user = db.get_user_by_email(&email.parse().unwrap()).unwrap();
                user.role = role;
                db.update_user(&user).unwrap();
            }
        }

        pub fn create_category(&self, name: &str) -> Id {
            let mut db = self.db_connections.exclusive().unwrap();
            db.transaction(|conn| {
                usecases::create_new_category(
                    conn,
                    usecases::NewCategory {
                        name: name.into(),
                        ..Default::default()
                    },
                )
            })
            .map(|category| category.id)
            .unwrap()
        }

        pub fn listing_type_id(&self, slug: &str) -> Id {
            self.db_connections
                .shared()
                .unwrap()
                .get_listing_type_by_slug(slug)
                .unwrap()
                .id
        }

        pub fn create_listing(&self, owner_email: &str, images: ListingImages) -> Listing {
            let category_id = self.create_category("Gastronomía");
            let listing_type_id = self.listing_type_id("negocio-local");
            flows::create_listing(
                &self.db_connections,
                &self.image_store,
                owner_email.parse().unwrap(),
                default_new_listing(&category_id, &listing_type_id),
                images,
            )
            .unwrap()
            .listing
        }

        pub fn try_get_listing(&self, id: &Id) -> Option<Listing> {
            match self.db_connections.shared().unwrap().get_listing(id) {
                Ok(listing) => Some(listing),
                Err(RepoError::NotFound) => None,
                Err(err) => panic!("failed to load listing: {err}"),
            }
        }
    }
}
