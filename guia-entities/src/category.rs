use crate::id::Id;

/// Marker icon metadata of a category.
///
/// The original pixel dimensions are kept to compute a
/// proportionally scaled map pin at a fixed height.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerIcon {
    pub slug: String,
    pub original_width: u32,
    pub original_height: u32,
}

impl MarkerIcon {
    pub const DEFAULT_SLUG: &'static str = "default-pin";
    pub const DEFAULT_SIZE: u32 = 38;

    /// Fixed display height of map pins in pixels.
    pub const FIXED_HEIGHT: u32 = 38;

    /// Width scaled proportionally to [`Self::FIXED_HEIGHT`].
    pub fn scaled_width(&self) -> u32 {
        if self.original_height == 0 {
            return Self::FIXED_HEIGHT;
        }
        let ratio = f64::from(self.original_width) / f64::from(self.original_height);
        (ratio * f64::from(Self::FIXED_HEIGHT)).round() as u32
    }
}

impl Default for MarkerIcon {
    fn default() -> Self {
        Self {
            slug: Self::DEFAULT_SLUG.to_string(),
            original_width: Self::DEFAULT_SIZE,
            original_height: Self::DEFAULT_SIZE,
        }
    }
}

/// A listing category.
///
/// Categories form a two-level hierarchy: top-level categories
/// (`parent_id == None`) and subcategories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub id: Id,
    pub name: String,
    pub slug: String,
    pub parent_id: Option<Id>,
    pub marker_icon: MarkerIcon,
}

impl Category {
    pub fn is_top_level(&self) -> bool {
        self.parent_id.is_none()
    }
}
