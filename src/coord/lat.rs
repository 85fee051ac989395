use std::{fmt, str::FromStr};

use cordify_types::{Axis, CoordinateError, Hemisphere};
use serde::{Deserialize, Serialize};

use crate::angle::{
    dd::format_dd,
    dms::{parse_dms_string, DmsComponents},
    DEFAULT_SECONDS_PRECISION,
};

/// The angle measured between the equatorial plane and the point along the meridian.
/// [Read more](https://en.wikipedia.org/wiki/Latitude).
///
/// Stored as the signed decimal degrees in `[-90..=90]`.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Latitude(f64);

impl_coordinate!(Latitude, Axis::Latitude);

impl Latitude {
    /// The central latitude of the sphere equidistant from the poles
    pub const fn equator() -> Self {
        Self(0.0)
    }

    /// Is the given latitude belongs to a pole
    pub fn is_pole(self) -> bool {
        self.0.abs() == Self::AXIS.limit()
    }
}
