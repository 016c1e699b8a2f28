//! The Baidu offset, BD-09, layered on top of GCJ-02.
//!
//! The offset shifts the GCJ-02 coordinate by (0.0065, 0.006) degrees, after
//! perturbing it slightly in polar form. The shift is undone exactly by the
//! inverse, the polar perturbation only approximately, leaving a residual
//! at the 1e-6 degree level.
use crate::authoring::*;
use std::f64::consts::PI;

// Angular frequency of the polar perturbation
const K: f64 = PI * 3000.0 / 180.0;

#[rustfmt::skip]
const OFFSET: [f64; 2] = [0.0065, 0.006];

// ----- F O R W A R D -----------------------------------------------------------------

// gcj02 -> bd09
fn fwd(_op: &Op, _ctx: &dyn Context, operands: &mut dyn CoordinateSet) -> usize {
    let mut successes = 0_usize;
    for i in 0..operands.len() {
        let (x, y) = operands.xy(i);
        let z = x.hypot(y) + 0.00002 * (y * K).sin();
        let theta = y.atan2(x) + 0.000003 * (x * K).cos();
        let lng = z * theta.cos() + OFFSET[0];
        let lat = z * theta.sin() + OFFSET[1];
        operands.set_xy(i, lng, lat);
        if lng.is_finite() && lat.is_finite() {
            successes += 1;
        }
    }
    successes
}

// ----- I N V E R S E -----------------------------------------------------------------

// bd09 -> gcj02
fn inv(_op: &Op, _ctx: &dyn Context, operands: &mut dyn CoordinateSet) -> usize {
    let mut successes = 0_usize;
    for i in 0..operands.len() {
        let (lng, lat) = operands.xy(i);
        let x = lng - OFFSET[0];
        let y = lat - OFFSET[1];
        let z = x.hypot(y) - 0.00002 * (y * K).sin();
        let theta = y.atan2(x) - 0.000003 * (x * K).cos();
        let x = z * theta.cos();
        let y = z * theta.sin();
        operands.set_xy(i, x, y);
        if x.is_finite() && y.is_finite() {
            successes += 1;
        }
    }
    successes
}

// ----- C O N S T R U C T O R ---------------------------------------------------------

#[rustfmt::skip]
pub const GAMUT: [OpParameter; 1] = [
    OpParameter::Flag { key: "inv" },
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
    fn bd09() -> Result<(), Error> {
        let mut ctx = Minimal::default();
        let op = ctx.op("bd09")?;

        let gcj = [
            Coor2D::lnglat(116.403963, 39.915119),
            Coor2D::lnglat(116.191704, 39.942046),
        ];

        // Forward
        let mut operands = gcj;
        assert_eq!(ctx.apply(op, Fwd, &mut operands)?, 2);
        assert_float_eq!(operands[0].0, [116.41033236226023, 39.9214561049132], abs_all <= 1e-12);

        // Roundtrip: the polar perturbation is not exactly invertible
        ctx.apply(op, Inv, &mut operands)?;
        for i in 0..operands.len() {
            assert_float_eq!(operands[i].0, gcj[i].0, abs_all <= 1e-6);
        }

        // Inverse first
        let mut operands = [gcj[0]];
        ctx.apply(op, Inv, &mut operands)?;
        assert_float_eq!(operands[0].0, [116.39759036591073, 39.9087758645997], abs_all <= 1e-12);

        // Garbage in, NaN out, and no success reported
        let mut operands = [Coor2D::nan()];
        assert_eq!(ctx.apply(op, Fwd, &mut operands)?, 0);
        assert!(operands[0][0].is_nan());
        Ok(())
    }
}
