pub trait Builder {
    type Build;
    fn build() -> Self::Build;
}

pub use self::{listing_builder::*, listing_type_builder::*};

pub mod listing_builder {

    use super::*;
    use crate::{
        email::EmailAddress, geo::MapPoint, id::Id, listing::*, status::ListingStatus,
        time::Timestamp,
    };

    #[derive(Debug)]
    pub struct ListingBuild {
        listing: Listing,
    }

    impl ListingBuild {
        pub fn id(mut self, id: &str) -> Self {
            self.listing.id = id.into();
            self
        }
        pub fn slug(mut self, slug: &str) -> Self {
            self.listing.slug = slug.into();
            self
        }
        pub fn title(mut self, title: &str) -> Self {
            self.listing.title = title.into();
            self
        }
        pub fn description(mut self, desc: &str) -> Self {
            self.listing.description = Some(desc.into());
            self
        }
        pub fn category_id(mut self, id: &str) -> Self {
            self.listing.category_id = id.into();
            self
        }
        pub fn listing_type_id(mut self, id: &str) -> Self {
            self.listing.listing_type_id = id.into();
            self
        }
        pub fn owner(mut self, email: &str) -> Self {
            self.listing.owner_email = email.parse().unwrap();
            self
        }
        pub fn email(mut self, email: &str) -> Self {
            self.listing.email = email.into();
            self
        }
        pub fn pos(mut self, pos: MapPoint) -> Self {
            self.listing.position = pos;
            self
        }
        pub fn status(mut self, status: ListingStatus) -> Self {
            self.listing.status = status;
            self
        }
        pub fn details(mut self, details: ListingDetails) -> Self {
            self.listing.details = details;
            self
        }
        pub fn cover_image(mut self, url: &str, public_id: &str) -> Self {
            self.listing.details.cover_image = Some(ImageRef {
                url: url.into(),
                public_id: public_id.into(),
            });
            self
        }
        pub fn finish(self) -> Listing {
            self.listing
        }
    }

    impl Builder for Listing {
        type Build = ListingBuild;
        fn build() -> ListingBuild {
            let now = Timestamp::now();
            ListingBuild {
                listing: Listing {
                    id: Id::new(),
                    slug: "".into(),
                    title: "".into(),
                    description: None,
                    category_id: Id::new(),
                    listing_type_id: Id::new(),
                    owner_email: EmailAddress::new_unchecked("owner@example.com".into()),
                    email: "contact@example.com".into(),
                    phone: None,
                    whatsapp: None,
                    website: None,
                    address: "Av. Siempreviva 742".into(),
                    city: "Resistencia".into(),
                    province: "Chaco".into(),
                    position: MapPoint::from_lat_lng_deg(0.0, 0.0),
                    status: ListingStatus::default(),
                    created_at: now,
                    updated_at: now,
                    details: ListingDetails::default(),
                },
            }
        }
    }
}

pub mod listing_type_builder {

    use super::*;
    use crate::{id::Id, listing_type::*};

    #[derive(Debug)]
    pub struct ListingTypeBuild {
        listing_type: ListingType,
    }

    impl ListingTypeBuild {
        pub fn id(mut self, id: &str) -> Self {
            self.listing_type.id = id.into();
            self
        }
        pub fn name(mut self, name: &str) -> Self {
            self.listing_type.name = name.into();
            self
        }
        pub fn slug(mut self, slug: &str) -> Self {
            self.listing_type.slug = slug.into();
            self
        }
        pub fn field(
            mut self,
            name: &str,
            field_type: FieldType,
            required: bool,
        ) -> Self {
            self.listing_type.fields.push(FieldDescriptor {
                name: name.into(),
                label: name.into(),
                field_type,
                required,
                options: vec![],
            });
            self
        }
        pub fn select_field(
            mut self,
            name: &str,
            required: bool,
            options: Vec<impl Into<String>>,
        ) -> Self {
            self.listing_type.fields.push(FieldDescriptor {
                name: name.into(),
                label: name.into(),
                field_type: FieldType::Select,
                required,
                options: options.into_iter().map(|x| x.into()).collect(),
            });
            self
        }
        pub fn finish(self) -> ListingType {
            self.listing_type
        }
    }

    impl Builder for ListingType {
        type Build = ListingTypeBuild;
        fn build() -> ListingTypeBuild {
            ListingTypeBuild {
                listing_type: ListingType {
                    id: Id::new(),
                    name: "".into(),
                    slug: "".into(),
                    fields: vec![],
                },
            }
        }
    }
}
