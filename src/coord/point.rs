use std::fmt;

use cordify_types::CoordinateError;
use serde::{Deserialize, Serialize};

use super::{lat::Latitude, lon::Longitude};

#[derive(Debug, Copy, Clone, PartialEq, Default, Serialize, Deserialize)]
/// The point on the surface, represented as the pair (latitude, longitude)
pub struct Point {
    lat: Latitude,
    lon: Longitude,
}

impl Point {
    /// Construct a point from the given latitude and longitude
    pub const fn new(lat: Latitude, lon: Longitude) -> Self {
        Self { lat, lon }
    }

    /// Construct a point from the pair of decimal degrees.
    ///
    /// # Errors
    /// Any of the values is not finite or out of the range for its axis.
    pub fn from_degrees(lat: f64, lon: f64) -> Result<Self, CoordinateError> {
        let lat = Latitude::try_from(lat)?;
        let lon = Longitude::try_from(lon)?;
        Ok(Self { lat, lon })
    }

    /// Construct a point from the pair of DMS (or decimal) strings.
    ///
    /// # Errors
    /// Any of the strings cannot be parsed or the value is out of the range for its axis.
    pub fn parse(lat: &str, lon: &str) -> Result<Self, CoordinateError> {
        let lat = lat.parse()?;
        let lon = lon.parse()?;
        Ok(Self { lat, lon })
    }

    /// The latitude of the point
    pub const fn lat(self) -> Latitude {
        self.lat
    }

    /// The longitude of the point
    pub const fn lon(self) -> Longitude {
        self.lon
    }

    /// The `[longitude, latitude]` pair as used by GeoJSON
    pub fn lon_lat(self) -> [f64; 2] {
        [self.lon.degrees(), self.lat.degrees()]
    }
}

impl fmt::Display for Point {
    /// Both coordinates in the DMS notation separated by a comma
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(precision) = f.precision() {
            write!(f, "{:.*}, {:.*}", precision, self.lat, precision, self.lon)
        } else {
            write!(f, "{}, {}", self.lat, self.lon)
        }
    }
}

#[cfg(test)]
mod tests {
    use cordify_types::Axis;

    use super::*;

    #[test]
    fn from_degrees() {
        let p = Point::from_degrees(51.5074, -0.1278).unwrap();
        assert!((p.lat().degrees() - 51.5074).abs() < f64::EPSILON);
        assert!((p.lon().degrees() + 0.1278).abs() < f64::EPSILON);
    }

    #[test]
    fn longitude_in_place_of_latitude() {
        assert_eq!(
            Point::from_degrees(120.0, 45.0),
            Err(CoordinateError::OutOfDomainRange {
                axis: Axis::Latitude,
                value: 120.0
            })
        );
    }

    #[test]
    fn parse_pair() {
        let p = Point::parse("40°26'46\"N", "79°58'56\"W").unwrap();
        assert!((p.lat().degrees() - 40.446_111).abs() < 1e-6);
        assert!((p.lon().degrees() + 79.982_222).abs() < 1e-6);
    }

    #[test]
    fn geojson_order() {
        let p = Point::from_degrees(10.0, 20.0).unwrap();
        assert_eq!(p.lon_lat(), [20.0, 10.0]);
    }

    #[test]
    fn print() {
        let p = Point::from_degrees(-33.75, 151.5).unwrap();
        assert_eq!(p.to_string(), "33° 45' 0\" S, 151° 30' 0\" E");
        assert_eq!(
            format!("{:.0}", Point::from_degrees(0.5, 0.25).unwrap()),
            "0° 30' 0\" N, 0° 15' 0\" E"
        );
    }

    #[test]
    fn serde_round_trip_validates() {
        let p = Point::from_degrees(1.5, -2.5).unwrap();
        let json = serde_json::to_string(&p).unwrap();
        assert_eq!(json, r#"{"lat":1.5,"lon":-2.5}"#);

        let back: Point = serde_json::from_str(&json).unwrap();
        assert_eq!(back, p);

        assert!(serde_json::from_str::<Point>(r#"{"lat":91.0,"lon":0.0}"#).is_err());
    }
}
