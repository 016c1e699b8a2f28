//! GCJ-02, the obfuscated variant of WGS84 mandated for public maps of China.
//!
//! The forward operator adds an empirical correction, given in metres by a
//! trigonometric polynomial in the offsets from a central point, and converted
//! to degrees using the radii of curvature of the Krassovsky ellipsoid.
//!
//! No closed form inverse exists. The inverse subtracts the correction
//! evaluated at the obfuscated point itself, leaving a residual of up to a
//! few times 1e-5 degrees.
use crate::authoring::*;
use std::f64::consts::PI;

// ----- C O M M O N -------------------------------------------------------------------

// The correction, in metres, at the offset (x, y) degrees from the central point
#[rustfmt::skip]
fn correction(x: f64, y: f64) -> (f64, f64) {
    let common = (20.0 * (6.0 * x * PI).sin() + 20.0 * (2.0 * x * PI).sin()) * 2.0 / 3.0;

    let mut dx = 300.0 + x + 2.0 * y + 0.1 * x * x + 0.1 * x * y + 0.1 * x.abs().sqrt();
    dx += common;
    dx += (20.0 * (x * PI).sin() + 40.0 * (x / 3.0 * PI).sin()) * 2.0 / 3.0;
    dx += (150.0 * (x / 12.0 * PI).sin() + 300.0 * (x / 30.0 * PI).sin()) * 2.0 / 3.0;

    let mut dy = -100.0 + 2.0 * x + 3.0 * y + 0.2 * y * y + 0.1 * x * y + 0.2 * x.abs().sqrt();
    dy += common;
    dy += (20.0 * (y * PI).sin() + 40.0 * (y / 3.0 * PI).sin()) * 2.0 / 3.0;
    dy += (160.0 * (y / 12.0 * PI).sin() + 320.0 * (y * PI / 30.0).sin()) * 2.0 / 3.0;

    (dx, dy)
}

// The central point of the correction polynomial
fn origin(op: &Op) -> (f64, f64) {
    let lon_0 = op.params.real("lon_0").unwrap_or(105.);
    let lat_0 = op.params.real("lat_0").unwrap_or(35.);
    (lon_0, lat_0)
}

// The correction, in degrees, at the point (lng, lat)
fn delta(ellps: &Ellipsoid, origin: (f64, f64), lng: f64, lat: f64) -> (f64, f64) {
    let (dx, dy) = correction(lng - origin.0, lat - origin.1);
    let phi = lat.to_radians();
    let n = ellps.prime_vertical_radius_of_curvature(phi);
    let m = ellps.meridian_radius_of_curvature(phi);
    ((dx / (n * phi.cos())).to_degrees(), (dy / m).to_degrees())
}

// ----- F O R W A R D -----------------------------------------------------------------

// wgs84 -> gcj02
fn fwd(op: &Op, _ctx: &dyn Context, operands: &mut dyn CoordinateSet) -> usize {
    let ellps = op.params.ellps();
    let origin = origin(op);
    let mut successes = 0_usize;
    for i in 0..operands.len() {
        let (lng, lat) = operands.xy(i);
        let (dlng, dlat) = delta(ellps, origin, lng, lat);
        let (lng, lat) = (lng + dlng, lat + dlat);
        operands.set_xy(i, lng, lat);
        if lng.is_finite() && lat.is_finite() {
            successes += 1;
        }
    }
    successes
}

// ----- I N V E R S E -----------------------------------------------------------------

// gcj02 -> wgs84
fn inv(op: &Op, _ctx: &dyn Context, operands: &mut dyn CoordinateSet) -> usize {
    let ellps = op.params.ellps();
    let origin = origin(op);
    let mut successes = 0_usize;
    for i in 0..operands.len() {
        let (lng, lat) = operands.xy(i);
        let (dlng, dlat) = delta(ellps, origin, lng, lat);
        let (lng, lat) = (lng - dlng, lat - dlat);
        operands.set_xy(i, lng, lat);
        if lng.is_finite() && lat.is_finite() {
            successes += 1;
        }
    }
    successes
}

// ----- C O N S T R U C T O R ---------------------------------------------------------

#[rustfmt::skip]
pub const GAMUT: [OpParameter; 4] = [
    OpParameter::Flag { key: "inv" },
    OpParameter::Text { key: "ellps", default: Some("krass") },
    OpParameter::Real { key: "lon_0", default: Some(105.) },
    OpParameter::Real { key: "lat_0", default: Some(35.) },
];

pub fn new(parameters: &RawParameters, ctx: &dyn Context) -> Result<Op, Error> {
    Op::plain(parameters, InnerOp(fwd), Some(InnerOp(inv)), &GAMUT, ctx)
}

// ----- T E S T S ---------------------------------------------------------------------
