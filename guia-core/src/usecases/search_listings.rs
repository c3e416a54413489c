use super::prelude::*;
use crate::util::validate;

/// Public map search parameters.
#[derive(Debug, Clone, Default)]
pub struct SearchListings {
    pub text: Option<String>,
    pub bbox: Option<MapBbox>,
    pub categories: Vec<Id>,
    pub listing_types: Vec<Id>,
}

// Shorter terms match almost everything and are ignored.
const MIN_SEARCH_TEXT_LEN: usize = 3;

/// Searches the published listings.
pub fn search_listings<R: ListingRepo>(repo: &R, req: SearchListings) -> Result<Vec<Listing>> {
    if let Some(ref bbox) = req.bbox {
        if !validate::is_valid_bbox(bbox) {
            return Err(Error::Bbox);
        }
    }
    let text = req
        .text
        .map(|t| t.trim().to_lowercase())
        .filter(|t| t.len() >= MIN_SEARCH_TEXT_LEN);
    let query = ListingQuery {
        bbox: req.bbox,
        categories: req.categories,
        listing_types: req.listing_types,
        status: Some(ListingStatus::Published),
        owner_email: None,
        text,
    };
    Ok(repo.query_listings(&query, &Pagination::default())?)
}

#[cfg(test)]
mod tests {
    use super::{super::tests::MockDb, *};
    use guia_entities::builders::*;

    #[test]
    fn only_published_listings_are_found() {
        let db = MockDb::default();
        db.listings.borrow_mut().push(
            Listing::build()
                .title("Panadería")
                .status(ListingStatus::Published)
                .finish(),
        );
        db.listings
            .borrow_mut()
            .push(Listing::build().title("Carnicería").finish());
        db.listings.borrow_mut().push(
            Listing::build()
                .title("Verdulería")
                .status(ListingStatus::Rejected)
                .finish(),
        );
        let found = search_listings(&db, SearchListings::default()).unwrap();
        assert_eq!(1, found.len());
        assert_eq!("Panadería", found[0].title);
    }

    #[test]
    fn short_search_terms_are_ignored() {
        let db = MockDb::default();
        db.listings.borrow_mut().push(
            Listing::build()
                .title("Panadería")
                .status(ListingStatus::Published)
                .finish(),
        );
        db.listings.borrow_mut().push(
            Listing::build()
                .title("Carnicería")
                .status(ListingStatus::Published)
                .finish(),
        );
        // two chars: no text filter at all
        let found = search_listings(
            &db,
            SearchListings {
                text: Some("pa".into()),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(2, found.len());
        // three chars: filter applies
        let found = search_listings(
            &db,
            SearchListings {
                text: Some("pan".into()),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(1, found.len());
    }

    #[test]
    fn filter_by_bbox() {
        let db = MockDb::default();
        db.listings.borrow_mut().push(
            Listing::build()
                .title("inside")
                .pos(MapPoint::from_lat_lng_deg(10.0, 10.0))
                .status(ListingStatus::Published)
                .finish(),
        );
        db.listings.borrow_mut().push(
            Listing::build()
                .title("outside")
                .pos(MapPoint::from_lat_lng_deg(30.0, 30.0))
                .status(ListingStatus::Published)
                .finish(),
        );
        let bbox = MapBbox::new(
            MapPoint::from_lat_lng_deg(0.0, 0.0),
            MapPoint::from_lat_lng_deg(20.0, 20.0),
        );
        let found = search_listings(
            &db,
            SearchListings {
                bbox: Some(bbox),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(1, found.len());
        assert_eq!("inside", found[0].title);
    }

    #[test]
    fn reject_empty_bbox() {
        let db = MockDb::default();
        let point = MapPoint::from_lat_lng_deg(10.0, 10.0);
        let empty = MapBbox::new(point, point);
        assert!(matches!(
            search_listings(
                &db,
                SearchListings {
                    bbox: Some(empty),
                    ..Default::default()
                }
            ),
            Err(Error::Bbox)
        ));
    }
}
