//! Conversion between the decimal degrees and the Degree-Minute-Second notation

// The list was generated with the command
//   $ rustc -W help | grep ' allow ' | awk '{print $1}' | tr - _ | sort | xargs -I{} echo '#![warn({})]'
#![allow(unknown_lints)]
#![warn(absolute_paths_not_starting_with_crate)]
#![warn(deprecated_in_future)]
#![warn(elided_lifetimes_in_paths)]
#![warn(explicit_outlives_requirements)]
#![warn(keyword_idents)]
#![warn(macro_use_extern_crate)]
#![warn(meta_variable_misuse)]
#![warn(missing_copy_implementations)]
#![warn(missing_debug_implementations)]
#![warn(missing_docs)]
#![warn(non_ascii_idents)]
#![warn(single_use_lifetimes)]
#![warn(trivial_casts)]
#![warn(trivial_numeric_casts)]
#![warn(unstable_features)]
#![warn(unused_extern_crates)]
#![warn(unused_import_braces)]
#![warn(unused_labels)]
#![warn(unused_lifetimes)]
#![warn(unused_qualifications)]
#![warn(unused_results)]
#![warn(variant_size_differences)]
// recommendations
#![forbid(unsafe_code)]
#![deny(clippy::mem_forget)]
// suppress some pedantic warnings
#![allow(clippy::non_ascii_literal)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::module_name_repetitions)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub use angle::{
    dd::{dd_to_dms, format_dd},
    dms::{
        compose_dms_to_dd, compose_dms_to_dd_strict, parse_dms_components, parse_dms_string,
        DmsComponents,
    },
    DEFAULT_DD_PRECISION, DEFAULT_SECONDS_PRECISION, MAX_PRECISION,
};
pub use coord::{is_valid_latitude, is_valid_longitude, Latitude, Longitude, Point};
pub use cordify_types::{
    Axis, CoordinateError, FormatDmsError, Hemisphere, OutOfRange, ParseAxisError,
    ParseDmsError, ParseHemisphereError,
};

pub mod batch;
pub mod cli;
pub mod config;
pub mod history;

mod angle;
mod coord;
mod utils;
