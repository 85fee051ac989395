use std::{fmt, str::FromStr};

use cordify_types::{Axis, CoordinateError, Hemisphere};
use serde::{Deserialize, Serialize};

use crate::angle::{
    dd::format_dd,
    dms::{parse_dms_string, DmsComponents},
    DEFAULT_SECONDS_PRECISION,
};

/// The angle measured from the Prime meridian to the point along the parallel.
/// [Read more](https://en.wikipedia.org/wiki/Longitude).
///
/// Stored as the signed decimal degrees in `[-180..=180]`.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Longitude(f64);

impl_coordinate!(Longitude, Axis::Longitude);

impl Longitude {
    /// The Prime (Greenwich) meridian
    pub const fn prime() -> Self {
        Self(0.0)
    }

    /// The 180th meridian, both `+180` and `-180` are the same line
    pub fn is_antimeridian(self) -> bool {
        self.0.abs() == Self::AXIS.limit()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_valid_float() {
        let lon = Longitude::try_from(-0.1278).unwrap();
        assert!((lon.degrees() + 0.1278).abs() < f64::EPSILON);
        assert_eq!(lon.hemisphere(), Hemisphere::West);
    }

    #[test]
    fn prime_is_eastern() {
        assert_eq!(Longitude::prime().hemisphere(), Hemisphere::East);
    }

    #[test]
    fn antimeridian() {
        assert!(Longitude::try_from(-180.0).unwrap().is_antimeridian());
        assert!(Longitude::try_from(180.0).unwrap().is_antimeridian());
        assert!(!Longitude::prime().is_antimeridian());
    }

    #[test]
    fn bigger_than_straight_angle() {
        assert_eq!(
            Longitude::try_from(180.0001),
            Err(CoordinateError::OutOfDomainRange {
                axis: Axis::Longitude,
                value: 180.0001
            })
        );
    }

    #[test]
    fn latitude_range_is_not_applied() {
        assert!(Longitude::try_from(135.0).is_ok());
    }

    #[test]
    fn parse_western() {
        let lon: Longitude = "79°58'56\" W".parse().unwrap();
        assert!((lon.degrees() + 79.982_222).abs() < 1e-6);
    }

    #[test]
    fn parse_infinite() {
        let s = format!("1{}", "0".repeat(400));
        assert!(matches!(
            s.parse::<Longitude>(),
            Err(CoordinateError::Parse(_))
        ));
    }

    #[test]
    fn print_dms() {
        let lon = Longitude::try_from(-10.5).unwrap();
        assert_eq!(lon.to_string(), "10° 30' 0\" W");
    }

    #[test]
    fn to_dms_parts() {
        let dms = Longitude::try_from(120.25).unwrap().to_dms();
        assert_eq!(dms.hemisphere, Some(Hemisphere::East));
        assert!((dms.degrees - 120.0).abs() < f64::EPSILON);
        assert!((dms.minutes - 15.0).abs() < f64::EPSILON);
        assert!(dms.seconds.abs() < 1e-9);
    }
}
