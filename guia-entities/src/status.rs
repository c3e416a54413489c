use num_derive::{FromPrimitive, ToPrimitive};
use num_traits::*;
use strum::{EnumCount, EnumIter, EnumString, IntoStaticStr};
use thiserror::Error;

pub type ListingStatusPrimitive = i16;

/// Moderation status of a listing.
///
/// Listings are always created as `Pending` and only leave that
/// state through the admin moderation endpoint.
#[rustfmt::skip]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, FromPrimitive, ToPrimitive, EnumIter, EnumCount, EnumString, IntoStaticStr)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ListingStatus {
    Rejected  = -1,
    Pending   =  0,
    Published =  1,
}

impl ListingStatus {
    pub fn is_public(self) -> bool {
        self == Self::Published
    }

    pub const fn default() -> Self {
        Self::Pending
    }

    pub fn as_str(self) -> &'static str {
        self.into()
    }
}

#[derive(Debug, Error)]
#[error("Invalid listing status primitive: {0}")]
pub struct InvalidListingStatusPrimitive(ListingStatusPrimitive);

impl TryFrom<i16> for ListingStatus {
    type Error = InvalidListingStatusPrimitive;
    fn try_from(from: ListingStatusPrimitive) -> Result<Self, Self::Error> {
        Self::from_i16(from).ok_or(InvalidListingStatusPrimitive(from))
    }
}

impl From<ListingStatus> for ListingStatusPrimitive {
    fn from(from: ListingStatus) -> Self {
        from.to_i16().expect("listing status primitive")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_status_from_str() {
        assert_eq!(Ok(ListingStatus::Pending), "pending".parse());
        assert_eq!(Ok(ListingStatus::Published), "published".parse());
        assert_eq!(Ok(ListingStatus::Rejected), "REJECTED".parse());
        assert!("archived".parse::<ListingStatus>().is_err());
    }

    #[test]
    fn status_primitive_round_trip() {
        for status in [
            ListingStatus::Rejected,
            ListingStatus::Pending,
            ListingStatus::Published,
        ] {
            let primitive: ListingStatusPrimitive = status.into();
            assert_eq!(status, ListingStatus::try_from(primitive).unwrap());
        }
    }
}
