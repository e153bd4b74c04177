//! Geographic region module
//!
//! Provides the axis-aligned bounding box that scopes every catalog
//! query, clip, and rendered layer in the pipeline.

mod types;

pub use types::{GeoError, Region, MAX_LAT, MAX_LON, MAX_ZOOM, MIN_LAT, MIN_LON, MIN_ZOOM};

impl Region {
    /// Creates a region from corner coordinates, validating bounds.
    ///
    /// # Arguments
    ///
    /// * `min_lon`, `min_lat` - Southwest corner in degrees
    /// * `max_lon`, `max_lat` - Northeast corner in degrees
    ///
    /// # Errors
    ///
    /// Returns an error if any coordinate is outside the valid world
    /// range or if the box is empty (min not strictly below max).
    pub fn new(min_lon: f64, min_lat: f64, max_lon: f64, max_lat: f64) -> Result<Self, GeoError> {
        for lat in [min_lat, max_lat] {
            if !(MIN_LAT..=MAX_LAT).contains(&lat) {
                return Err(GeoError::InvalidLatitude(lat));
            }
        }
        for lon in [min_lon, max_lon] {
            if !(MIN_LON..=MAX_LON).contains(&lon) {
                return Err(GeoError::InvalidLongitude(lon));
            }
        }
        if min_lon >= max_lon || min_lat >= max_lat {
            return Err(GeoError::EmptyRegion {
                min_lon,
                min_lat,
                max_lon,
                max_lat,
            });
        }
        Ok(Region {
            min_lon,
            min_lat,
            max_lon,
            max_lat,
        })
    }

    /// Width of the region in degrees of longitude.
    #[inline]
    pub fn width(&self) -> f64 {
        self.max_lon - self.min_lon
    }

    /// Height of the region in degrees of latitude.
    #[inline]
    pub fn height(&self) -> f64 {
        self.max_lat - self.min_lat
    }

    /// Center point as (longitude, latitude).
    #[inline]
    pub fn center(&self) -> (f64, f64) {
        (
            (self.min_lon + self.max_lon) / 2.0,
            (self.min_lat + self.max_lat) / 2.0,
        )
    }

    /// Checks whether a point lies inside the region.
    ///
    /// The western and southern edges are inclusive, the eastern and
    /// northern edges exclusive, so adjacent regions never share points.
    #[inline]
    pub fn contains(&self, lon: f64, lat: f64) -> bool {
        lon >= self.min_lon && lon < self.max_lon && lat >= self.min_lat && lat < self.max_lat
    }

    /// Checks whether two regions overlap.
    pub fn intersects(&self, other: &Region) -> bool {
        self.min_lon < other.max_lon
            && other.min_lon < self.max_lon
            && self.min_lat < other.max_lat
            && other.min_lat < self.max_lat
    }

    /// Computes the overlapping box of two regions, if any.
    pub fn intersection(&self, other: &Region) -> Option<Region> {
        if !self.intersects(other) {
            return None;
        }
        Some(Region {
            min_lon: self.min_lon.max(other.min_lon),
            min_lat: self.min_lat.max(other.min_lat),
            max_lon: self.max_lon.min(other.max_lon),
            max_lat: self.max_lat.min(other.max_lat),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_valid_region() {
        let region = Region::new(-75.0, 40.0, -74.0, 41.0).unwrap();
        assert_eq!(region.width(), 1.0);
        assert_eq!(region.height(), 1.0);
        assert_eq!(region.center(), (-74.5, 40.5));
    }

    #[test]
    fn test_new_rejects_invalid_latitude() {
        let result = Region::new(-75.0, 40.0, -74.0, 91.0);
        assert!(matches!(result, Err(GeoError::InvalidLatitude(_))));
    }

    #[test]
    fn test_new_rejects_invalid_longitude() {
        let result = Region::new(-181.0, 40.0, -74.0, 41.0);
        assert!(matches!(result, Err(GeoError::InvalidLongitude(_))));
    }

    #[test]
    fn test_new_rejects_empty_region() {
        let result = Region::new(-74.0, 40.0, -75.0, 41.0);
        assert!(matches!(result, Err(GeoError::EmptyRegion { .. })));
    }

    #[test]
    fn test_contains_edges() {
        let region = Region::new(0.0, 0.0, 1.0, 1.0).unwrap();
        assert!(region.contains(0.0, 0.0), "southwest corner is inclusive");
        assert!(!region.contains(1.0, 1.0), "northeast corner is exclusive");
        assert!(region.contains(0.5, 0.5));
        assert!(!region.contains(-0.1, 0.5));
    }

    #[test]
    fn test_intersection_overlapping() {
        let a = Region::new(0.0, 0.0, 2.0, 2.0).unwrap();
        let b = Region::new(1.0, 1.0, 3.0, 3.0).unwrap();
        let overlap = a.intersection(&b).unwrap();
        assert_eq!(overlap.min_lon, 1.0);
        assert_eq!(overlap.min_lat, 1.0);
        assert_eq!(overlap.max_lon, 2.0);
        assert_eq!(overlap.max_lat, 2.0);
    }

    #[test]
    fn test_intersection_disjoint() {
        let a = Region::new(0.0, 0.0, 1.0, 1.0).unwrap();
        let b = Region::new(2.0, 2.0, 3.0, 3.0).unwrap();
        assert!(!a.intersects(&b));
        assert!(a.intersection(&b).is_none());
    }

    #[test]
    fn test_touching_regions_do_not_intersect() {
        let a = Region::new(0.0, 0.0, 1.0, 1.0).unwrap();
        let b = Region::new(1.0, 0.0, 2.0, 1.0).unwrap();
        assert!(!a.intersects(&b));
    }
}
