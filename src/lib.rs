//! *Batch conversion between the coordinate systems of Chinese web
//! mapping, and planar distances between the converted points*.
//!
//! Four coordinate systems are supported:
//!
//! - `bd09`: the vendor offset system layered on top of `gcj02`
//! - `gcj02`: the nationally mandated obfuscation of `wgs84`
//! - `wgs84`: longitude/latitude in degrees, satellite navigation style
//! - `mercator`: the spherical Web Mercator projection, in metres
//!
//! Conversions are carried out by *operators*, instantiated from textual
//! definitions like `"gcj02 inv"` or `"bd09 inv | gcj02 inv"`, and wired into
//! a small conversion graph by a [`Context`] provider.
//!
//! ```rust
//! use geoshift::prelude::*;
//! let tiananmen = [Coor2D::lnglat(116.403963, 39.915119)];
//! let wgs = geoshift::convert(&tiananmen, Gcj02, Wgs84, Some(6))?;
//! assert_eq!(wgs[0], [Some(116.397718), Some(39.913715)]);
//! # Ok::<(), geoshift::Error>(())
//! ```

mod context;
mod coordinate;
mod crs;
mod distance;
mod ellipsoid;
mod graph;
mod inner_op;
mod math;
mod op;
mod token;
pub mod trip;
pub mod units;

use once_cell::sync::Lazy;
use std::io;
use thiserror::Error;

/// The bread-and-butter, shrink-wrapped for external use
pub mod prelude {
    pub use crate::context::Context;
    pub use crate::context::Minimal;
    pub use crate::coordinate::coor2d::Coor2D;
    pub use crate::coordinate::from_rows;
    pub use crate::coordinate::set::CoordinateSet;
    pub use crate::coordinate::Masked;
    pub use crate::crs::CoordinateSystem;
    pub use crate::crs::CoordinateSystem::*;
    pub use crate::distance::geo_distance;
    pub use crate::distance::Metric;
    pub use crate::ellipsoid::Ellipsoid;
    pub use crate::op::OpHandle;
    pub use crate::units::AngleUnit;
    pub use crate::units::LengthUnit;
    pub use crate::units::TimeUnit;
    pub use crate::Direction;
    pub use crate::Direction::Fwd;
    pub use crate::Direction::Inv;
    pub use crate::Error;
}

/// Preamble for crate-internal modules, and for user defined operators
pub mod authoring {
    pub use crate::prelude::*;

    pub use crate::graph::ConversionGraph;
    pub use crate::inner_op::InnerOp;
    pub use crate::inner_op::OpConstructor;
    pub use crate::op::Op;
    pub use crate::op::OpDescriptor;
    pub use crate::op::OpParameter;
    pub use crate::op::ParsedParameters;
    pub use crate::op::RawParameters;
    pub use crate::token::Tokenize;

    pub use crate::math::finite;
    pub use crate::math::round_to;

    pub use log::debug;
    pub use log::error;
    pub use log::info;
    pub use log::trace;
    pub use log::warn;

    pub use std::collections::BTreeMap;
    pub use std::collections::BTreeSet;
}

pub use crate::context::Context;
pub use crate::context::Minimal;
pub use crate::coordinate::coor2d::Coor2D;
pub use crate::coordinate::set::CoordinateSet;
pub use crate::crs::CoordinateSystem;
pub use crate::distance::geo_distance;
pub use crate::distance::Metric;
pub use crate::ellipsoid::Ellipsoid;

/// The error type shared by all parts of the crate.
///
/// Only caller errors (malformed input, unknown enumerations, unknown
/// operators) and unrecoverable service errors end up here. Numerically
/// degenerate results are not errors: they are masked element-wise.
#[derive(Error, Debug)]
pub enum Error {
    #[error("i/o error")]
    Io(#[from] io::Error),

    #[error("error: {0}")]
    General(&'static str),

    #[error("syntax error: {0}")]
    Syntax(String),

    #[error("operator {0} not found{1}")]
    NotFound(String, String),

    #[error("recursion too deep for {0}, at {1}")]
    Recursion(String, String),

    #[error("missing required parameter {0}")]
    MissingParam(String),

    #[error("malformed value for parameter {0}: {1}")]
    BadParam(String, String),

    #[error("operator {0} is not invertible")]
    NonInvertible(String),

    #[error("malformed point batch: {0}")]
    Shape(String),

    #[error("unknown coordinate system: {0}")]
    UnknownSystem(String),

    #[error("unsupported conversion from {0} to {1}")]
    UnsupportedConversion(CoordinateSystem, CoordinateSystem),

    #[error("invalid {what}: {value} (expected one of {expected})")]
    Invalid {
        what: &'static str,
        value: String,
        expected: &'static str,
    },

    #[error("http error: {0}")]
    Http(String),

    #[error("service responded with status {status}: {message}")]
    Service { status: String, message: String },

    #[error("all credentials exhausted for {0}")]
    Exhausted(String),
}

/// `Fwd`: Indicate that a two-way operator, function, or method,
/// should run in the *forward* direction.
/// `Inv`: Indicate that a two-way operator, function, or method,
/// should run in the *inverse* direction.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Direction {
    Fwd,
    Inv,
}

// The conversion graph is pure and immutable once built, so a single lazily
// constructed instance can back the free functions below
static DEFAULT_CONTEXT: Lazy<Minimal> = Lazy::new(Minimal::new);

/// Convert a batch of points between two coordinate systems, using the
/// built-in conversion graph.
///
/// Optionally round the output to `precision` decimal digits. Any element
/// which ends up as NaN or infinity is returned as `None`.
pub fn convert(
    points: &dyn CoordinateSet,
    source: CoordinateSystem,
    target: CoordinateSystem,
    precision: Option<i32>,
) -> Result<Vec<prelude::Masked>, Error> {
    DEFAULT_CONTEXT.convert(points, source, target, precision)
}

/// The built-in conversion graph, as used by [`convert`] and [`geo_distance`]
pub fn default_context() -> &'static Minimal {
    &DEFAULT_CONTEXT
}

// ----- T E S T S ---------------------------------------------------------------------
