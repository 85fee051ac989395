use std::{error::Error, fmt, str::FromStr};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{angle::errors::ParseDmsError, enum_trivial_from_impl};

use self::{
    Axis::{Latitude, Longitude},
    Hemisphere::{East, North, South, West},
};

/// Which of the two geographic coordinates an angle measures
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Axis {
    /// North-south position, valid in `[-90..=90]`
    Latitude,
    /// East-west position, valid in `[-180..=180]`
    Longitude,
}

impl Axis {
    /// The largest absolute value (in degrees) allowed on the axis
    pub const fn limit(self) -> f64 {
        match self {
            Latitude => 90.0,
            Longitude => 180.0,
        }
    }

    /// The hemisphere letters used on the axis: (positive, negative)
    pub const fn hemispheres(self) -> (Hemisphere, Hemisphere) {
        match self {
            Latitude => (North, South),
            Longitude => (East, West),
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Latitude => "latitude",
            Longitude => "longitude",
        };
        write!(f, "{name}")
    }
}

/// The string cannot be recognized as an [`Axis`]
#[derive(Debug)]
pub struct ParseAxisError {
    failed: String,
}

impl fmt::Display for ParseAxisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Cannot parse Axis from {:?} (expected latitude or longitude)",
            self.failed
        )
    }
}

impl Error for ParseAxisError {}

impl FromStr for Axis {
    type Err = ParseAxisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "latitude" | "lat" => Ok(Latitude),
            "longitude" | "lon" | "lng" => Ok(Longitude),
            _ => Err(ParseAxisError {
                failed: s.to_string(),
            }),
        }
    }
}

/// The direction letter carrying the sign of a DMS coordinate
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Hemisphere {
    /// `N`, positive latitude
    North,
    /// `S`, negative latitude
    South,
    /// `E`, positive longitude
    East,
    /// `W`, negative longitude
    West,
}

impl Hemisphere {
    /// Choose the letter for a value on the given axis.
    /// Zero belongs to the positive hemisphere.
    pub const fn for_sign(axis: Axis, is_negative: bool) -> Self {
        let (positive, negative) = axis.hemispheres();
        if is_negative {
            negative
        } else {
            positive
        }
    }

    /// South and West make the decimal degrees negative
    pub const fn is_negative(self) -> bool {
        matches!(self, South | West)
    }

    /// The axis the hemisphere letter belongs to
    pub const fn axis(self) -> Axis {
        match self {
            North | South => Latitude,
            East | West => Longitude,
        }
    }

    /// The upper-case letter
    pub const fn letter(self) -> char {
        match self {
            North => 'N',
            South => 'S',
            East => 'E',
            West => 'W',
        }
    }
}

/// The character or string is not one of `N`, `S`, `E`, `W`
#[derive(Debug)]
pub struct ParseHemisphereError {
    failed: String,
}

impl fmt::Display for ParseHemisphereError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Cannot parse Hemisphere from {:?}", self.failed)
    }
}

impl Error for ParseHemisphereError {}

impl TryFrom<char> for Hemisphere {
    type Error = ParseHemisphereError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c.to_ascii_uppercase() {
            'N' => Ok(North),
            'S' => Ok(South),
            'E' => Ok(East),
            'W' => Ok(West),
            _ => Err(ParseHemisphereError {
                failed: c.to_string(),
            }),
        }
    }
}

impl FromStr for Hemisphere {
    type Err = ParseHemisphereError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let mut chars = trimmed.chars();
        if let (Some(letter), None) = (chars.next(), chars.next()) {
            return Self::try_from(letter);
        }

        match trimmed.to_ascii_lowercase().as_str() {
            "north" => Ok(North),
            "south" => Ok(South),
            "east" => Ok(East),
            "west" => Ok(West),
            _ => Err(ParseHemisphereError {
                failed: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for Hemisphere {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// Decimal degrees cannot form a valid latitude or longitude
#[derive(Debug, Copy, Clone, PartialEq)]
#[allow(variant_size_differences)]
pub enum CoordinateError {
    /// The text was not a valid DMS notation
    Parse(ParseDmsError),
    /// NaN or infinity
    NonFiniteValue,
    /// The value is outside `[-90..=90]` for latitude or `[-180..=180]` for longitude
    OutOfDomainRange {
        /// the axis the value was checked against
        axis: Axis,
        /// the rejected value
        value: f64,
    },
}

enum_trivial_from_impl!(ParseDmsError => CoordinateError:Parse);

impl fmt::Display for CoordinateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(inner) => write!(f, "{inner}"),
            Self::NonFiniteValue => write!(f, "Coordinate is not a finite number"),
            Self::OutOfDomainRange { axis, value } => {
                let limit = axis.limit();
                write!(
                    f,
                    "The {axis} {value} is outside of the range [-{limit}, {limit}]"
                )
            }
        }
    }
}

impl Error for CoordinateError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Parse(inner) => Some(inner),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hemisphere_from_lowercase_letter() {
        assert_eq!(Hemisphere::try_from('w').unwrap(), West);
        assert_eq!("s".parse::<Hemisphere>().unwrap(), South);
    }

    #[test]
    fn hemisphere_from_name() {
        assert_eq!(" East ".parse::<Hemisphere>().unwrap(), East);
    }

    #[test]
    #[should_panic(expected = "ParseHemisphereError")]
    fn hemisphere_from_unknown_letter() {
        let _h = Hemisphere::try_from('X').unwrap();
    }

    #[test]
    fn negative_hemispheres() {
        assert!(!North.is_negative());
        assert!(South.is_negative());
        assert!(!East.is_negative());
        assert!(West.is_negative());
    }

    #[test]
    fn hemisphere_for_sign() {
        assert_eq!(Hemisphere::for_sign(Latitude, false), North);
        assert_eq!(Hemisphere::for_sign(Latitude, true), South);
        assert_eq!(Hemisphere::for_sign(Longitude, false), East);
        assert_eq!(Hemisphere::for_sign(Longitude, true), West);
    }

    #[test]
    fn hemisphere_belongs_to_axis() {
        assert_eq!(North.axis(), Latitude);
        assert_eq!(West.axis(), Longitude);
    }

    #[test]
    fn axis_aliases() {
        assert_eq!("lat".parse::<Axis>().unwrap(), Latitude);
        assert_eq!("Longitude".parse::<Axis>().unwrap(), Longitude);
        assert_eq!("lng".parse::<Axis>().unwrap(), Longitude);
        assert!("altitude".parse::<Axis>().is_err());
    }

    #[test]
    fn print_out_of_domain() {
        let err = CoordinateError::OutOfDomainRange {
            axis: Latitude,
            value: 91.0,
        };
        assert_eq!(
            err.to_string(),
            "The latitude 91 is outside of the range [-90, 90]"
        );
    }
}
