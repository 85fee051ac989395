//! Representing decimal degrees in the Degree-Minute-Second notation

use cordify_types::{Axis, FormatDmsError, Hemisphere};

use super::{
    consts::{MAX_PRECISION, MINUTES_IN_DEGREE, SECONDS_IN_MINUTE},
    dms::DmsComponents,
};

impl DmsComponents {
    /// Split the decimal degrees into the whole degrees, whole minutes and fractional seconds.
    ///
    /// The sign goes into the hemisphere letter chosen by the `axis`
    /// (zero is considered northern or eastern).
    ///
    /// # Errors
    /// NaN and infinities cannot be split.
    pub fn from_dd(dd: f64, axis: Axis) -> Result<Self, FormatDmsError> {
        if !dd.is_finite() {
            return Err(FormatDmsError::NonFiniteValue);
        }

        Ok(Self::split_finite(dd, axis))
    }

    /// Same as [`from_dd`](#method.from_dd) for the value known to be finite
    pub(crate) fn split_finite(dd: f64, axis: Axis) -> Self {
        let hemisphere = Hemisphere::for_sign(axis, dd < 0.0);
        let value = dd.abs();

        let degrees = value.floor();
        let minutes_float = (value - degrees) * MINUTES_IN_DEGREE;
        let minutes = minutes_float.floor();
        let seconds = (minutes_float - minutes) * SECONDS_IN_MINUTE;

        Self {
            degrees,
            minutes,
            seconds,
            hemisphere: Some(hemisphere),
        }
    }
}

/// Format the decimal degrees as `{deg}° {min}' {sec}" {hemisphere}`.
///
/// The seconds are rounded to `seconds_precision` fraction digits
/// and the trailing zeros are dropped along with the dangling decimal dot.
///
/// ```
/// # use cordify::{dd_to_dms, Axis};
/// assert_eq!(dd_to_dms(0.0, Axis::Latitude, 3).unwrap(), "0° 0' 0\" N");
/// assert_eq!(dd_to_dms(-10.5, Axis::Longitude, 3).unwrap(), "10° 30' 0\" W");
/// ```
///
/// # Errors
/// - `NonFiniteValue` when the `dd` is NaN or infinite;
/// - `PrecisionTooLarge` when the `seconds_precision` is above [`MAX_PRECISION`].
pub fn dd_to_dms(dd: f64, axis: Axis, seconds_precision: usize) -> Result<String, FormatDmsError> {
    if seconds_precision > MAX_PRECISION {
        return Err(FormatDmsError::PrecisionTooLarge(seconds_precision));
    }

    let components = DmsComponents::from_dd(dd, axis)?;
    Ok(format!("{components:.seconds_precision$}"))
}

/// Format the decimal degrees with the fixed number of fraction digits
/// (at most [`MAX_PRECISION`]).
/// The negative zero is printed without the sign.
pub fn format_dd(dd: f64, precision: usize) -> String {
    let precision = precision.min(MAX_PRECISION);
    let dd = if dd == 0.0 { 0.0 } else { dd };
    format!("{dd:.precision$}")
}
