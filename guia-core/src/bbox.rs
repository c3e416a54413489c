use guia_entities::{geo::MapBbox, listing::Listing};

pub trait InBBox {
    fn in_bbox(&self, bbox: &MapBbox) -> bool;
}

impl InBBox for Listing {
    fn in_bbox(&self, bbox: &MapBbox) -> bool {
        bbox.contains_point(&self.position)
    }
}
