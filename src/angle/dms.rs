//! Parsing the free-form Degree-Minute-Second notation into decimal degrees.
//!
//! The text goes through the normalization first (unicode primes, comma decimals,
//! letter case, whitespace), then the hemisphere letter is split away from either end
//! and the rest should match the `degrees [minutes [seconds]]` grammar.

use std::fmt;

use cordify_types::{Hemisphere, OutOfRange, ParseDmsError};
use lazy_static::lazy_static;
use regex::Regex;

use crate::utils::{collapse_whitespace, trim_fraction_zeros, SplitChar};

use super::consts::{
    ARC_MINUTE_LOOKALIKES, ARC_MINUTE_SIGN, ARC_SECOND_LOOKALIKES, ARC_SECOND_SIGN,
    DEFAULT_SECONDS_PRECISION, DEGREE_LOOKALIKES, DEGREE_SIGN, MAX_PRECISION, MINUTES_IN_DEGREE,
    SECONDS_IN_DEGREE, SECONDS_IN_MINUTE,
};

/// The parts of an angle in the sexagesimal notation.
///
/// The sign is carried by the `hemisphere`,
/// but the `degrees` can also be negative when the source provided so.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct DmsComponents {
    /// Whole (or fractional, when nothing else is given) degrees
    pub degrees: f64,
    /// Arc minutes in `[0..60)`
    pub minutes: f64,
    /// Arc seconds in `[0..60)`
    pub seconds: f64,
    /// The direction letter, if any
    pub hemisphere: Option<Hemisphere>,
}

impl DmsComponents {
    /// The unsigned decimal degrees: `|degrees| + minutes/60 + seconds/3600`.
    ///
    /// # Errors
    /// - any of the parts is NaN or infinite;
    /// - minutes or seconds are not in `[0..60)`.
    pub fn magnitude(&self) -> Result<f64, ParseDmsError> {
        let Self {
            degrees,
            minutes,
            seconds,
            ..
        } = *self;

        if [degrees, minutes, seconds].iter().any(|v| !v.is_finite()) {
            return Err(ParseDmsError::NonFiniteValue);
        }

        if !(0.0..MINUTES_IN_DEGREE).contains(&minutes) {
            return Err(OutOfRange::ArcMinutes.into());
        }

        if !(0.0..SECONDS_IN_MINUTE).contains(&seconds) {
            return Err(OutOfRange::ArcSeconds.into());
        }

        let magnitude = degrees.abs() + minutes / MINUTES_IN_DEGREE + seconds / SECONDS_IN_DEGREE;
        if magnitude.is_finite() {
            Ok(magnitude)
        } else {
            Err(ParseDmsError::NonFiniteValue)
        }
    }

    /// Round the seconds to the given number of fraction digits.
    /// The seconds rounded up to the full minute are carried into the minutes
    /// (and the full degree into the degrees, away from zero) to keep every part in range.
    fn rounded_seconds(&self, precision: usize) -> (f64, f64, String) {
        let seconds = format!("{:.precision$}", self.seconds);
        let overflow = seconds
            .parse::<f64>()
            .map_or(false, |rounded| rounded >= SECONDS_IN_MINUTE);
        if !overflow {
            return (self.degrees, self.minutes, seconds);
        }

        let seconds = format!("{:.precision$}", 0.0);
        let minutes = self.minutes + 1.0;
        if minutes >= MINUTES_IN_DEGREE {
            let degrees = if self.degrees < 0.0 {
                self.degrees - 1.0
            } else {
                self.degrees + 1.0
            };
            (degrees, 0.0, seconds)
        } else {
            (self.degrees, minutes, seconds)
        }
    }
}

/// Prints `{deg}° {min}' {sec}" {hemisphere}`.
///
/// The formatter's precision is the number of the seconds fraction digits
/// (3 by default, at most [`MAX_PRECISION`]); the trailing zeros are dropped.
///
/// ```
/// # use cordify::{DmsComponents, Hemisphere};
/// let dms = DmsComponents {
///     degrees: 40.0,
///     minutes: 26.0,
///     seconds: 46.27,
///     hemisphere: Some(Hemisphere::North),
/// };
/// assert_eq!(dms.to_string(), "40° 26' 46.27\" N");
/// assert_eq!(format!("{:.1}", dms), "40° 26' 46.3\" N");
/// ```
impl fmt::Display for DmsComponents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let precision = f
            .precision()
            .unwrap_or(DEFAULT_SECONDS_PRECISION)
            .min(MAX_PRECISION);
        let (degrees, minutes, seconds) = self.rounded_seconds(precision);

        write!(
            f,
            "{degrees}{DEGREE_SIGN} {minutes}{ARC_MINUTE_SIGN} {}{ARC_SECOND_SIGN}",
            trim_fraction_zeros(&seconds)
        )?;

        if let Some(hemisphere) = self.hemisphere {
            write!(f, " {hemisphere}")?;
        }
        Ok(())
    }
}

/// Construct regular expression to parse the normalized Degree-Minute-Second text
/// (the hemisphere letter is already stripped)
fn parse_dms_re() -> String {
    format!(
        r#"(?x)                                 # enables verbose mode (to allow these comments)
        ^                                           # match the whole line from the start
        (?P<deg>[+-]?\d+(?:\.\d+)?)                 # mandatory signed degree VALUE
        (?:
            [{deg}\x20]+                                # degree sign and/or space
            (?P<min>\d+(?:\.\d+)?)                      # minutes VALUE
            (?:
                [{min}\x20]+                                # arcminute sign and/or space
                (?P<sec>\d+(?:\.\d+)?)                      # seconds VALUE
                \x20?{sec}?                                 # optional arcsecond sign
            |
                \x20?{min}?                                 # optional arcminute sign when no seconds
            )
        |
            \x20?{deg}?                                 # optional degree sign when no minutes
        )
        $                                           # match the whole line till the end
        "#,
        deg = DEGREE_SIGN,
        min = ARC_MINUTE_SIGN,
        sec = ARC_SECOND_SIGN,
    )
}

lazy_static! {
    static ref RE_DMS: Regex = Regex::new(&parse_dms_re()).expect("DMS regex is valid");
}

/// Bring the free-form text to the canonical form:
/// unicode primes to ASCII, comma decimals to dots, upper case, single spaces.
fn normalize(raw: &str) -> String {
    let canonical: String = raw
        .trim()
        .chars()
        .map(|c| match c {
            c if ARC_MINUTE_LOOKALIKES.contains(&c) => ARC_MINUTE_SIGN,
            c if ARC_SECOND_LOOKALIKES.contains(&c) => ARC_SECOND_SIGN,
            c if DEGREE_LOOKALIKES.contains(&c) => DEGREE_SIGN,
            ',' => '.',
            c => c,
        })
        .collect();

    collapse_whitespace(&canonical.to_uppercase())
}

/// Detect the hemisphere letter on either end of the (normalized) text
/// and return it along with the rest of the text.
fn split_hemisphere(s: &str) -> Result<(Option<Hemisphere>, &str), ParseDmsError> {
    let leading = s
        .split_first_char()
        .and_then(|(head, _)| Hemisphere::try_from(head).ok());
    let trailing = s
        .split_last_char()
        .and_then(|(_, tail)| Hemisphere::try_from(tail).ok());

    if let (Some(leading), Some(trailing)) = (leading, trailing) {
        if leading != trailing {
            return Err(ParseDmsError::ConflictingHemisphere { leading, trailing });
        }
    }

    let mut rest = s;
    if leading.is_some() {
        if let Some((_, stripped)) = rest.split_first_char() {
            rest = stripped.trim();
        }
    }

    if let Some(trailing) = trailing {
        // the single letter could already be stripped as the leading one
        if let Some((stripped, tail)) = rest.split_last_char() {
            if tail == trailing.letter() {
                rest = stripped.trim();
            }
        }
    }

    Ok((trailing.or(leading), rest))
}

fn parse_number(s: &str) -> Result<f64, ParseDmsError> {
    s.parse().map_err(|_| ParseDmsError::MalformedInput)
}

/// Split the free-form DMS text into its parts without combining them.
///
/// # Errors
/// See [`parse_dms_string`].
pub fn parse_dms_components(raw: &str) -> Result<DmsComponents, ParseDmsError> {
    let normalized = normalize(raw);
    let (hemisphere, numeric) = split_hemisphere(&normalized)?;

    let captures = RE_DMS
        .captures(numeric)
        .ok_or(ParseDmsError::MalformedInput)?;

    let degrees = captures
        .name("deg")
        .ok_or(ParseDmsError::MalformedInput)
        .and_then(|m| parse_number(m.as_str()))?;
    let minutes = captures
        .name("min")
        .map_or(Ok(0.0), |m| parse_number(m.as_str()))?;
    let seconds = captures
        .name("sec")
        .map_or(Ok(0.0), |m| parse_number(m.as_str()))?;

    Ok(DmsComponents {
        degrees,
        minutes,
        seconds,
        hemisphere,
    })
}

/// Convert the free-form Degree-Minute-Second text into decimal degrees.
///
/// Accepted forms include `40°26'46"N`, `N 40 26 46`, `40° 26′ 46,5″ s`,
/// `-40 26`, `40.5`. The hemisphere letter may be placed on either end.
///
/// The sign is resolved as follows: a degree token below zero negates the result
/// (`-0` is not below zero), and the `S` or `W` hemisphere always makes it negative.
///
/// No range check is done here: the same parser serves both latitude and longitude,
/// see [`is_valid_latitude`](crate::is_valid_latitude)
/// and [`is_valid_longitude`](crate::is_valid_longitude).
///
/// ```
/// # use cordify::parse_dms_string;
/// let dd = parse_dms_string("40°26'46\"N").unwrap();
/// assert!((dd - 40.446_111).abs() < 1e-6);
///
/// let dd = parse_dms_string("40 26 46 S").unwrap();
/// assert!((dd + 40.446_111).abs() < 1e-6);
/// ```
///
/// # Errors
/// - `MalformedInput` when the text does not follow the grammar;
/// - `ConflictingHemisphere` when the leading and trailing letters disagree;
/// - `ComponentOutOfRange` when minutes or seconds are not in `[0..60)`;
/// - `NonFiniteValue` when some number overflows.
pub fn parse_dms_string(raw: &str) -> Result<f64, ParseDmsError> {
    let components = parse_dms_components(raw)?;

    let mut dd = components.magnitude()?;
    if components.degrees < 0.0 {
        dd = -dd;
    }

    if matches!(components.hemisphere, Some(h) if h.is_negative()) {
        dd = -dd.abs();
    }

    Ok(dd)
}

/// Convert separately provided degrees, minutes and seconds into decimal degrees.
///
/// The `S` and `W` hemispheres negate the result.
/// Negative `degrees` negate it _once more_, so `-10° 30' S` gives `+10.5`.
/// Use [`compose_dms_to_dd_strict`] to reject such an ambiguous input.
///
/// ```
/// # use cordify::{compose_dms_to_dd, Hemisphere};
/// let dd = compose_dms_to_dd(10.0, 30.0, 0.0, Hemisphere::South).unwrap();
/// assert!((dd + 10.5).abs() < f64::EPSILON);
/// ```
///
/// # Errors
/// - `NonFiniteValue` when some of the numbers is NaN or infinite;
/// - `ComponentOutOfRange` when minutes or seconds are not in `[0..60)`.
pub fn compose_dms_to_dd(
    degrees: f64,
    minutes: f64,
    seconds: f64,
    hemisphere: Hemisphere,
) -> Result<f64, ParseDmsError> {
    let components = DmsComponents {
        degrees,
        minutes,
        seconds,
        hemisphere: Some(hemisphere),
    };

    let mut dd = components.magnitude()?;
    if hemisphere.is_negative() {
        dd = -dd;
    }
    if degrees < 0.0 {
        dd = -dd;
    }

    Ok(dd)
}

/// Same as [`compose_dms_to_dd`], but the sign may come from the hemisphere only.
///
/// # Errors
/// In addition to the [`compose_dms_to_dd`] errors,
/// `SignConflict` is returned for the `degrees` below zero.
pub fn compose_dms_to_dd_strict(
    degrees: f64,
    minutes: f64,
    seconds: f64,
    hemisphere: Hemisphere,
) -> Result<f64, ParseDmsError> {
    let dd = compose_dms_to_dd(degrees, minutes, seconds, hemisphere)?;
    if degrees < 0.0 {
        return Err(ParseDmsError::SignConflict);
    }

    Ok(dd)
}
