//! Latitude and longitude as decimal degrees validated against the axis range

use cordify_types::{Axis, CoordinateError};

pub use self::{lat::Latitude, lon::Longitude, point::Point};

/// Implement the validation, parsing and formatting traits
/// for the newtype over the decimal degrees
macro_rules! impl_coordinate {
    ($t:ident, $axis:expr) => {
        impl $t {
            /// The axis the coordinate belongs to
            pub const AXIS: Axis = $axis;

            /// The signed decimal degrees
            pub const fn degrees(self) -> f64 {
                self.0
            }

            /// The hemisphere letter (zero belongs to the positive one)
            pub fn hemisphere(self) -> Hemisphere {
                Hemisphere::for_sign(Self::AXIS, self.0 < 0.0)
            }

            /// The Degree-Minute-Second parts
            pub fn to_dms(self) -> DmsComponents {
                DmsComponents::split_finite(self.0, Self::AXIS)
            }

            /// The decimal degrees with the fixed number of fraction digits
            pub fn format_dd(self, precision: usize) -> String {
                format_dd(self.0, precision)
            }
        }

        impl TryFrom<f64> for $t {
            type Error = CoordinateError;

            fn try_from(value: f64) -> Result<Self, Self::Error> {
                super::validate(Self::AXIS, value).map(Self)
            }
        }

        impl From<$t> for f64 {
            fn from(coord: $t) -> Self {
                coord.0
            }
        }

        impl FromStr for $t {
            type Err = CoordinateError;

            /// Parse the DMS (or plain decimal) notation and check the range
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let dd = parse_dms_string(s)?;
                Self::try_from(dd)
            }
        }

        impl fmt::Display for $t {
            /// The DMS notation; the precision sets the seconds fraction digits
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                let precision = f.precision().unwrap_or(DEFAULT_SECONDS_PRECISION);
                write!(f, "{:.*}", precision, self.to_dms())
            }
        }
    };
}

mod lat;
mod lon;
mod point;

/// Is the value a valid latitude: `-90 <= value <= 90`?
///
/// ```
/// # use cordify::is_valid_latitude;
/// assert!(is_valid_latitude(-90.0));
/// assert!(!is_valid_latitude(91.0));
/// ```
pub fn is_valid_latitude(value: f64) -> bool {
    in_range(Axis::Latitude, value)
}

/// Is the value a valid longitude: `-180 <= value <= 180`?
///
/// ```
/// # use cordify::is_valid_longitude;
/// assert!(is_valid_longitude(-180.0));
/// assert!(!is_valid_longitude(180.0001));
/// ```
pub fn is_valid_longitude(value: f64) -> bool {
    in_range(Axis::Longitude, value)
}

fn in_range(axis: Axis, value: f64) -> bool {
    let limit = axis.limit();
    (-limit..=limit).contains(&value)
}

fn validate(axis: Axis, value: f64) -> Result<f64, CoordinateError> {
    if !value.is_finite() {
        return Err(CoordinateError::NonFiniteValue);
    }

    if !in_range(axis, value) {
        return Err(CoordinateError::OutOfDomainRange { axis, value });
    }

    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latitude_bounds() {
        assert!(is_valid_latitude(90.0));
        assert!(is_valid_latitude(-90.0));
        assert!(is_valid_latitude(0.0));
        assert!(!is_valid_latitude(91.0));
        assert!(!is_valid_latitude(-90.000_001));
    }

    #[test]
    fn longitude_bounds() {
        assert!(is_valid_longitude(-180.0));
        assert!(is_valid_longitude(180.0));
        assert!(!is_valid_longitude(180.0001));
        assert!(!is_valid_longitude(-181.0));
    }

    #[test]
    fn not_a_number_is_never_valid() {
        assert!(!is_valid_latitude(f64::NAN));
        assert!(!is_valid_longitude(f64::NAN));
        assert!(!is_valid_longitude(f64::INFINITY));
    }

    #[test]
    fn validate_reports_the_axis() {
        assert_eq!(
            validate(Axis::Latitude, 95.5),
            Err(CoordinateError::OutOfDomainRange {
                axis: Axis::Latitude,
                value: 95.5
            })
        );
        assert_eq!(
            validate(Axis::Longitude, f64::NAN),
            Err(CoordinateError::NonFiniteValue)
        );
        assert_eq!(validate(Axis::Longitude, 95.5), Ok(95.5));
    }
}
