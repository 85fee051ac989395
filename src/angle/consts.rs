pub(crate) const MINUTES_IN_DEGREE: f64 = 60.0;
pub(crate) const SECONDS_IN_MINUTE: f64 = 60.0;
pub(crate) const SECONDS_IN_DEGREE: f64 = MINUTES_IN_DEGREE * SECONDS_IN_MINUTE;

pub(crate) const DEGREE_SIGN: char = '°';
pub(crate) const ARC_MINUTE_SIGN: char = '\'';
pub(crate) const ARC_SECOND_SIGN: char = '"';

/// Characters typed instead of the degree sign
pub(crate) const DEGREE_LOOKALIKES: [char; 2] = ['º', '˚'];
/// Variants of the prime typed by keyboards and word processors
pub(crate) const ARC_MINUTE_LOOKALIKES: [char; 5] = ['′', '’', '‘', '`', '´'];
/// Variants of the double prime typed by keyboards and word processors
pub(crate) const ARC_SECOND_LOOKALIKES: [char; 3] = ['″', '“', '”'];

/// Fraction digits of the arc seconds when formatting DMS
pub const DEFAULT_SECONDS_PRECISION: usize = 3;
/// Fraction digits when formatting decimal degrees
pub const DEFAULT_DD_PRECISION: usize = 6;
/// The largest number of fraction digits meaningful for `f64`
pub const MAX_PRECISION: usize = 15;
