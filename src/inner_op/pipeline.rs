use crate::authoring::*;

// ----- F O R W A R D -----------------------------------------------------------------

fn pipeline_fwd(op: &Op, ctx: &dyn Context, operands: &mut dyn CoordinateSet) -> usize {
    let mut n = usize::MAX;
    for step in &op.steps[..] {
        n = n.min(step.apply(ctx, operands, Fwd));
    }
    n.min(operands.len())
}

// ----- I N V E R S E -----------------------------------------------------------------

fn pipeline_inv(op: &Op, ctx: &dyn Context, operands: &mut dyn CoordinateSet) -> usize {
    let mut n = usize::MAX;
    for step in op.steps[..].iter().rev() {
        n = n.min(step.apply(ctx, operands, Inv));
    }
    n.min(operands.len())
}

// ----- C O N S T R U C T O R ---------------------------------------------------------

#[rustfmt::skip]
pub const GAMUT: [OpParameter; 1] = [
    OpParameter::Flag { key: "inv" },
];

pub fn new(parameters: &RawParameters, ctx: &dyn Context) -> Result<Op, Error> {
    let definition = &parameters.definition;
    let mut steps = Vec::new();

    for step in definition.split_into_steps() {
        let step_parameters = parameters.next(&step);
        steps.push(Op::op(step_parameters, ctx)?);
    }

    // The pipeline itself has no parameters: an `inv` flag on its first
    // step belongs to that step
    let params = ParsedParameters::new(&parameters.next(""), &GAMUT)?;
    let descriptor = OpDescriptor::new(definition, InnerOp(pipeline_fwd), Some(InnerOp(pipeline_inv)));
    let id = OpHandle::new();

    Ok(Op {
        descriptor,
        params,
        steps,
        id,
    })
}

// ----- T E S T S ---------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use float_eq::assert_float_eq;

    #[test]
    fn pipeline() -> Result<(), Error> {
        let mut ctx = Minimal::default();
        let tiananmen = Coor2D::lnglat(116.403963, 39.915119);

        // wgs84 -> gcj02 -> bd09, and back
        let op = ctx.op("gcj02 | bd09")?;
        let mut data = [tiananmen];
        assert_eq!(ctx.apply(op, Fwd, &mut data)?, 1);
        assert_float_eq!(data[0].0, [116.41659006952747, 39.9228188781486], abs_all <= 1e-12);
        ctx.apply(op, Inv, &mut data)?;
        assert_float_eq!(data[0].0, tiananmen.0, abs_all <= 1e-4);

        // An inverted step in the middle of a pipeline
        let op = ctx.op("noop | bd09 inv | noop")?;
        let mut data = [tiananmen];
        ctx.apply(op, Fwd, &mut data)?;
        assert_float_eq!(data[0].0, [116.39759036591073, 39.9087758645997], abs_all <= 1e-12);

        // The definition is kept, step by step
        let op = Op::new("gcj02 inv |  webmerc", &ctx)?;
        assert_eq!(op.descriptor.steps, ["gcj02 inv", "webmerc"]);
        assert_eq!(op.steps.len(), 2);
        assert!(!op.descriptor.inverted);
        assert!(op.steps[0].descriptor.inverted);

        // Try to invoke garbage as a pipeline step
        assert!(matches!(
            ctx.op("bd09 | bd09 | _garbage"),
            Err(Error::NotFound(_, _))
        ));

        Ok(())
    }
}
