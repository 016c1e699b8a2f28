use crate::authoring::*;

mod op_descriptor;
mod parameter;
mod parsed_parameters;
mod raw_parameters;

pub use op_descriptor::OpDescriptor;
pub use parameter::OpParameter;
pub use parsed_parameters::ParsedParameters;
pub use raw_parameters::RawParameters;

/// The key used to identify an instantiated operator inside a `Context`
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Copy, Clone)]
pub struct OpHandle(uuid::Uuid);
impl OpHandle {
    pub fn new() -> Self {
        OpHandle(uuid::Uuid::new_v4())
    }
}
impl Default for OpHandle {
    fn default() -> Self {
        OpHandle(uuid::Uuid::new_v4())
    }
}

/// The defining parameters and functions for an operator
#[derive(Debug)]
pub struct Op {
    pub descriptor: OpDescriptor,
    pub params: ParsedParameters,
    pub steps: Vec<Op>,
    pub id: OpHandle,
}

impl Op {
    // operate fwd/inv, taking operator inversion into account.
    pub fn apply(
        &self,
        ctx: &dyn Context,
        operands: &mut dyn CoordinateSet,
        direction: Direction,
    ) -> usize {
        trace!("{} {:?} on {} points", self.descriptor.definition, direction, operands.len());
        let forward = direction == Direction::Fwd;
        // Short form of (inverted && !forward) || (forward && !inverted)
        if self.descriptor.inverted != forward {
            return self.descriptor.fwd.0(self, ctx, operands);
        }
        self.descriptor.inv.0(self, ctx, operands)
    }

    pub fn new(definition: &str, ctx: &dyn Context) -> Result<Op, Error> {
        let globals = ctx.globals();
        let parameters = RawParameters::new(definition, &globals);
        Self::op(parameters, ctx)
    }

    // Helper for implementation of `InnerOp`s: Instantiate an `Op` for the simple
    // (and common) case, where the `InnerOp` constructor does not need to set any
    // other parameters than the ones defined by the instantiation parameter
    // arguments.
    pub fn plain(
        parameters: &RawParameters,
        fwd: InnerOp,
        inv: Option<InnerOp>,
        gamut: &[OpParameter],
        _ctx: &dyn Context,
    ) -> Result<Op, Error> {
        let def = parameters.definition.as_str();
        let params = ParsedParameters::new(parameters, gamut)?;
        let descriptor = OpDescriptor::new(def, fwd, inv);
        let steps = Vec::<Op>::new();
        let id = OpHandle::new();

        Ok(Op {
            descriptor,
            params,
            steps,
            id,
        })
    }

    // Instantiate the actual operator, taking into account the relative order
    // of precedence between pipelines, macros, user defined operators, and
    // built-in operators
    #[allow(clippy::self_named_constructors)]
    pub fn op(parameters: RawParameters, ctx: &dyn Context) -> Result<Op, Error> {
        if parameters.nesting_too_deep() {
            return Err(Error::Recursion(
                parameters.invocation,
                parameters.definition,
            ));
        }

        // A pipeline?
        if parameters.definition.is_pipeline() {
            return crate::inner_op::pipeline::new(&parameters, ctx);
        }

        let name = parameters.definition.operator_name("");

        // A user defined macro?
        if name.is_resource_name() {
            if let Ok(macro_definition) = ctx.get_resource(&name) {
                let inverted = parameters.definition.split_into_parameters().contains_key("inv");
                let next_param = parameters.next(&macro_definition);
                return Op::op(next_param, ctx)?.handle_inversion(inverted);
            }
        }
        // A user defined operator?
        else if let Ok(constructor) = ctx.get_op(&name) {
            return constructor.0(&parameters, ctx)?.handle_op_inversion();
        }

        // A built in operator?
        if let Ok(constructor) = crate::inner_op::builtin(&name) {
            return constructor.0(&parameters, ctx)?.handle_op_inversion();
        }

        Err(Error::NotFound(
            name,
            ": ".to_string() + &parameters.definition,
        ))
    }

    fn handle_op_inversion(self) -> Result<Op, Error> {
        let inverted = self.params.boolean("inv");
        self.handle_inversion(inverted)
    }

    fn handle_inversion(mut self, inverted: bool) -> Result<Op, Error> {
        if self.descriptor.invertible {
            if inverted {
                self.descriptor.inverted = !self.descriptor.inverted;
            }
            return Ok(self);
        }
        if inverted {
            return Err(Error::NonInvertible(self.descriptor.definition));
        }

        Ok(self)
    }
}

// ----- T E S T S ------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use float_eq::assert_float_eq;

    fn some_basic_coordinates() -> [Coor2D; 2] {
        let tiananmen = Coor2D::lnglat(116.403963, 39.915119);
        let xiangshan = Coor2D::lnglat(116.191704, 39.942046);
        [tiananmen, xiangshan]
    }

    // A forward-only operator: moves everything one degree east
    fn east(_op: &Op, _ctx: &dyn Context, operands: &mut dyn CoordinateSet) -> usize {
        for i in 0..operands.len() {
            let (x, y) = operands.xy(i);
            operands.set_xy(i, x + 1., y);
        }
        operands.len()
    }

    fn one_way(parameters: &RawParameters, ctx: &dyn Context) -> Result<Op, Error> {
        const GAMUT: [OpParameter; 1] = [OpParameter::Flag { key: "inv" }];
        Op::plain(parameters, InnerOp(east), None, &GAMUT, ctx)
    }

    // Test the fundamental Op-functionality: That we can actually instantiate
    // an Op, and invoke its forward and backward operational modes
    #[test]
    fn basic() -> Result<(), Error> {
        let mut ctx = Minimal::default();

        // Try to invoke garbage as an Op
        assert!(matches!(
            Op::new("_foo", &ctx),
            Err(Error::NotFound(_, _))
        ));

        // Check forward and inverse operation
        let op = ctx.op("bd09")?;
        let mut data = some_basic_coordinates();
        ctx.apply(op, Fwd, &mut data)?;
        assert_float_eq!(data[0].0, [116.41033236226023, 39.9214561049132], abs_all <= 1e-12);
        ctx.apply(op, Inv, &mut data)?;
        assert_float_eq!(data[0].0, some_basic_coordinates()[0].0, abs_all <= 1e-5);

        // Also for an inverted operator: check forward and inverse operation
        let op = ctx.op("bd09 inv")?;
        let mut data = some_basic_coordinates();
        ctx.apply(op, Fwd, &mut data)?;
        assert_float_eq!(data[0].0, [116.39759036591073, 39.9087758645997], abs_all <= 1e-12);
        ctx.apply(op, Inv, &mut data)?;
        assert_float_eq!(data[0].0, some_basic_coordinates()[0].0, abs_all <= 1e-5);

        Ok(())
    }

    #[test]
    fn user_defined() -> Result<(), Error> {
        let mut ctx = Minimal::default();
        ctx.register_op("east", OpConstructor(one_way));

        let op = ctx.op("east")?;
        let mut data = some_basic_coordinates();
        assert_eq!(ctx.apply(op, Fwd, &mut data)?, 2);
        assert_eq!(data[0][0], 117.403963);

        // The inverse is a no-op, returning zero successes
        assert_eq!(ctx.apply(op, Inv, &mut data)?, 0);
        assert_eq!(data[0][0], 117.403963);

        // ...and the operator cannot be inverted
        assert!(matches!(ctx.op("east inv"), Err(Error::NonInvertible(_))));
        Ok(())
    }

    // Test that the recursion-breaker works properly, by defining two mutually
    // dependent macros: `foo:bar=foo:baz` and `foo:baz=foo:bar`, and checking
    // that the instantiation fails with an `Error::Recursion(...)`
    #[test]
    fn nesting() -> Result<(), Error> {
        let mut ctx = Minimal::default();
        ctx.register_resource("foo:baz", "foo:bar");
        ctx.register_resource("foo:bar", "foo:baz");

        assert_eq!("foo:baz", ctx.get_resource("foo:bar")?);
        assert_eq!("foo:bar", ctx.get_resource("foo:baz")?);

        assert!(matches!(ctx.op("foo:baz"), Err(Error::Recursion(_, _))));
        Ok(())
    }

    #[test]
    fn pipeline() -> Result<(), Error> {
        let mut data = some_basic_coordinates();
        let mut ctx = Minimal::default();
        let op = ctx.op("bd09 inv | gcj02 inv")?;

        ctx.apply(op, Fwd, &mut data)?;
        assert_float_eq!(data[0].0, [116.3913467660716, 39.90737234231261], abs_all <= 1e-12);

        ctx.apply(op, Inv, &mut data)?;
        assert_float_eq!(data[0].0, some_basic_coordinates()[0].0, abs_all <= 1e-4);

        Ok(())
    }

    #[test]
    fn macro_expansion() -> Result<(), Error> {
        let mut data = some_basic_coordinates();
        let mut ctx = Minimal::default();
        ctx.register_resource("baidu:wgs84", "bd09 inv | gcj02 inv");
        let op = ctx.op("baidu:wgs84 inv")?;

        // The inverted macro runs wgs84 -> gcj02 -> bd09
        ctx.apply(op, Fwd, &mut data)?;
        assert_float_eq!(data[0].0, [116.41659006952747, 39.9228188781486], abs_all <= 1e-12);

        ctx.apply(op, Inv, &mut data)?;
        assert_float_eq!(data[0].0, some_basic_coordinates()[0].0, abs_all <= 1e-4);

        // Unknown macros are not found
        assert!(matches!(ctx.op("baidu:mars"), Err(Error::NotFound(_, _))));
        Ok(())
    }
}
