use std::{error::Error, fmt};

use crate::{coord::Hemisphere, enum_trivial_from_impl};

/// The sexagesimal component which broke the `[0..60)` range
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum OutOfRange {
    /// min >= 60 or min < 0
    ArcMinutes,
    /// sec >= 60 or sec < 0
    ArcSeconds,
}

impl fmt::Display for OutOfRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Self::ArcMinutes => "Angle's arc minute value not in range [0..60)",
            Self::ArcSeconds => "Angle's arc second value not in range [0..60)",
        };

        write!(f, "{msg}")
    }
}

impl Error for OutOfRange {}

/// The reasons a Degree-Minute-Second notation
/// cannot be turned into decimal degrees.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ParseDmsError {
    /// The text does not follow the `degrees [minutes [seconds]]` grammar
    MalformedInput,
    /// Both leading and trailing hemisphere letters are present and they disagree
    ConflictingHemisphere {
        /// the letter found at the start of the text
        leading: Hemisphere,
        /// the letter found at the end of the text
        trailing: Hemisphere,
    },
    /// Minutes or seconds outside of `[0..60)`
    ComponentOutOfRange(OutOfRange),
    /// NaN or infinity appeared somewhere in the numbers
    NonFiniteValue,
    /// Negative degrees together with an explicit hemisphere
    /// (only reported by the strict composition)
    SignConflict,
}

enum_trivial_from_impl!(OutOfRange => ParseDmsError:ComponentOutOfRange);

impl fmt::Display for ParseDmsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Cannot parse DMS: ")?;
        match self {
            Self::MalformedInput => write!(f, "not a Degree-Minute-Second notation"),
            Self::ConflictingHemisphere { leading, trailing } => write!(
                f,
                "leading hemisphere {leading} contradicts trailing hemisphere {trailing}"
            ),
            Self::ComponentOutOfRange(inner) => write!(f, "{inner}"),
            Self::NonFiniteValue => write!(f, "the value is not a finite number"),
            Self::SignConflict => write!(
                f,
                "negative degrees are ambiguous when the hemisphere is given"
            ),
        }
    }
}

impl Error for ParseDmsError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::ComponentOutOfRange(inner) => Some(inner),
            _ => None,
        }
    }
}

/// Decimal degrees cannot be represented in the DMS notation
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum FormatDmsError {
    /// NaN or infinity cannot be split into degrees, minutes and seconds
    NonFiniteValue,
    /// More arc seconds fraction digits were requested than `f64` can hold
    PrecisionTooLarge(usize),
}

impl fmt::Display for FormatDmsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Cannot format DMS: ")?;
        match self {
            Self::NonFiniteValue => write!(f, "the value is not a finite number"),
            Self::PrecisionTooLarge(digits) => {
                write!(f, "{digits} fraction digits of the seconds is too many")
            }
        }
    }
}

impl Error for FormatDmsError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_range_converts_into_parse_error() {
        let err: ParseDmsError = OutOfRange::ArcSeconds.into();
        assert_eq!(err, ParseDmsError::ComponentOutOfRange(OutOfRange::ArcSeconds));
        assert!(err.source().is_some());
    }

    #[test]
    fn conflicting_hemisphere_message_names_both_letters() {
        let err = ParseDmsError::ConflictingHemisphere {
            leading: Hemisphere::North,
            trailing: Hemisphere::South,
        };
        assert_eq!(
            err.to_string(),
            "Cannot parse DMS: leading hemisphere N contradicts trailing hemisphere S"
        );
    }

    #[test]
    fn precision_message_names_the_digits() {
        assert_eq!(
            FormatDmsError::PrecisionTooLarge(70_000).to_string(),
            "Cannot format DMS: 70000 fraction digits of the seconds is too many"
        );
    }

    #[test]
    fn malformed_has_no_source() {
        assert!(ParseDmsError::MalformedInput.source().is_none());
    }
}
