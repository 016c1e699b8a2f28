//! Web Mercator, the spherical Mercator projection of web tile maps (EPSG:3857).
//! Input and output in degrees (longitude first) and metres (easting first).
use crate::authoring::*;
use std::f64::consts::FRAC_PI_2;
use std::f64::consts::PI;

// ----- F O R W A R D -----------------------------------------------------------------

fn fwd(op: &Op, _ctx: &dyn Context, operands: &mut dyn CoordinateSet) -> usize {
    let a = op.params.ellps().semimajor_axis();
    let half_circumference = PI * a;

    let mut successes = 0_usize;
    for i in 0..operands.len() {
        let (lng, lat) = operands.xy(i);

        // The poles are projected to infinity
        if lat.abs() >= 90.0 {
            operands.set_coord(i, &Coor2D::nan());
            continue;
        }

        let easting = lng * half_circumference / 180.0;
        let northing = ((90.0 + lat) * PI / 360.0).tan().ln() * a;

        operands.set_xy(i, easting, northing);
        if easting.is_finite() && northing.is_finite() {
            successes += 1;
        }
    }

    successes
}

// ----- I N V E R S E -----------------------------------------------------------------

fn inv(op: &Op, _ctx: &dyn Context, operands: &mut dyn CoordinateSet) -> usize {
    let a = op.params.ellps().semimajor_axis();
    let half_circumference = PI * a;

    let mut successes = 0_usize;
    for i in 0..operands.len() {
        let (easting, northing) = operands.xy(i);

        // Easting -> Longitude
        let longitude = easting / half_circumference * 180.0;

        // Northing -> Latitude
        let latitude = (2.0 * (northing / a).exp().atan() - FRAC_PI_2).to_degrees();

        operands.set_xy(i, longitude, latitude);
        if longitude.is_finite() && latitude.is_finite() {
            successes += 1;
        }
    }

    successes
}

// ----- C O N S T R U C T O R ---------------------------------------------------------

#[rustfmt::skip]
pub const GAMUT: [OpParameter; 2] = [
    OpParameter::Flag { key: "inv" },
    OpParameter::Text { key: "ellps",  default: Some("WGS84") },
];

pub fn new(parameters: &RawParameters, ctx: &dyn Context) -> Result<Op, Error> {
    Op::plain(parameters, InnerOp(fwd), Some(InnerOp(inv)), &GAMUT, ctx)
}

// ----- T E S T S ---------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use float_eq::assert_float_eq;

    #[test]
    fn webmerc() -> Result<(), Error> {
        let mut ctx = Minimal::default();
        let op = ctx.op("webmerc")?;

        // Validation value from PROJ: echo 12 55 0 0 | cct -d18 +proj=webmerc
        let geo = [
            Coor2D::lnglat(12., 55.),
            Coor2D::lnglat(116.403963, 39.915119),
            Coor2D::lnglat(-180., -85.),
        ];

        let projected = [
            Coor2D::raw(1_335_833.889_519_282_8, 7_361_866.113_051_188),
            Coor2D::raw(12_958_029.887_479_06, 4_853_615.259_589_759),
            Coor2D::raw(-20_037_508.342_789_244, -19_971_868.880_408_563),
        ];

        // Forward
        let mut operands = geo;
        assert_eq!(ctx.apply(op, Fwd, &mut operands)?, 3);
        for i in 0..operands.len() {
            assert_float_eq!(operands[i].0, projected[i].0, abs_all <= 1e-6);
        }

        // Roundtrip
        ctx.apply(op, Inv, &mut operands)?;
        for i in 0..operands.len() {
            assert_float_eq!(operands[i].0, geo[i].0, abs_all <= 1e-9);
        }

        Ok(())
    }

    #[test]
    fn poles() -> Result<(), Error> {
        let mut ctx = Minimal::default();
        let op = ctx.op("webmerc")?;

        let mut operands = [
            Coor2D::lnglat(0., 90.),
            Coor2D::lnglat(116.403963, 39.915119),
            Coor2D::lnglat(0., -90.),
        ];
        assert_eq!(ctx.apply(op, Fwd, &mut operands)?, 1);
        assert!(operands[0][0].is_nan() && operands[0][1].is_nan());
        assert!(operands[1].is_finite());
        assert!(operands[2][1].is_nan());
        Ok(())
    }
}
