use std::{fmt, str::FromStr};

/// A point on the map with WGS84 coordinates in degrees.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct MapPoint {
    lat: f64,
    lng: f64,
}

impl MapPoint {
    pub const MIN_LAT_DEG: f64 = -90.0;
    pub const MAX_LAT_DEG: f64 = 90.0;
    pub const MIN_LNG_DEG: f64 = -180.0;
    pub const MAX_LNG_DEG: f64 = 180.0;

    pub fn try_from_lat_lng_deg(lat: f64, lng: f64) -> Option<Self> {
        let pos = Self { lat, lng };
        pos.is_valid().then_some(pos)
    }

    /// Panics if the coordinates are out of range.
    pub fn from_lat_lng_deg(lat: f64, lng: f64) -> Self {
        Self::try_from_lat_lng_deg(lat, lng).unwrap_or_else(|| {
            panic!("invalid coordinates: lat = {lat}, lng = {lng}");
        })
    }

    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (Self::MIN_LAT_DEG..=Self::MAX_LAT_DEG).contains(&self.lat)
            && (Self::MIN_LNG_DEG..=Self::MAX_LNG_DEG).contains(&self.lng)
    }

    pub fn lat_deg(&self) -> f64 {
        self.lat
    }

    pub fn lng_deg(&self) -> f64 {
        self.lng
    }
}

impl fmt::Display for MapPoint {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        write!(f, "({}, {})", self.lat, self.lng)
    }
}

/// A rectangular bounding box on the map.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapBbox {
    southwest: MapPoint,
    northeast: MapPoint,
}

impl MapBbox {
    pub const fn new(southwest: MapPoint, northeast: MapPoint) -> Self {
        Self {
            southwest,
            northeast,
        }
    }

    pub const fn southwest(&self) -> &MapPoint {
        &self.southwest
    }

    pub const fn northeast(&self) -> &MapPoint {
        &self.northeast
    }

    pub fn is_valid(&self) -> bool {
        self.southwest.is_valid()
            && self.northeast.is_valid()
            && self.southwest.lat <= self.northeast.lat
            && self.southwest.lng <= self.northeast.lng
    }

    pub fn is_empty(&self) -> bool {
        self.southwest.lat == self.northeast.lat || self.southwest.lng == self.northeast.lng
    }

    pub fn contains_point(&self, pt: &MapPoint) -> bool {
        pt.lat >= self.southwest.lat
            && pt.lat <= self.northeast.lat
            && pt.lng >= self.southwest.lng
            && pt.lng <= self.northeast.lng
    }
}

#[derive(Debug, thiserror::Error)]
#[error("invalid bounding box")]
pub struct MapBboxParseError;

/// Parses `"minLng,minLat,maxLng,maxLat"`.
impl FromStr for MapBbox {
    type Err = MapBboxParseError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut coords = s.split(',').map(|c| c.trim().parse::<f64>());
        let mut next = || coords.next().transpose().map_err(|_| MapBboxParseError);
        let (min_lng, min_lat, max_lng, max_lat) = (
            next()?.ok_or(MapBboxParseError)?,
            next()?.ok_or(MapBboxParseError)?,
            next()?.ok_or(MapBboxParseError)?,
            next()?.ok_or(MapBboxParseError)?,
        );
        if coords.next().is_some() {
            return Err(MapBboxParseError);
        }
        let southwest =
            MapPoint::try_from_lat_lng_deg(min_lat, min_lng).ok_or(MapBboxParseError)?;
        let northeast =
            MapPoint::try_from_lat_lng_deg(max_lat, max_lng).ok_or(MapBboxParseError)?;
        let bbox = MapBbox::new(southwest, northeast);
        if !bbox.is_valid() {
            return Err(MapBboxParseError);
        }
        Ok(bbox)
    }
}
