use geoshift::authoring::*;

// ----- U S E R   P R O V I D E D   C O N T E X T ----------------------------------

/// A user provided context provider, here used as a test and demo of how to
/// write one, and how to use it with user defined operators and edges.
///
/// Since the integration tests in the "tests" directory of a crate are handled
/// as independent crates, this provider could just as well have been built
/// entirely outside of the geoshift source tree.
///
/// In contrast to `Minimal`, the conversion table is built once, by `with_edges`,
/// from a graph handed in by the user, and the graph cannot be modified later.
#[derive(Debug, Default)]
pub struct Maximal {
    constructors: BTreeMap<String, OpConstructor>,
    resources: BTreeMap<String, String>,
    operators: BTreeMap<OpHandle, Op>,
    conversions: BTreeMap<(CoordinateSystem, CoordinateSystem), OpHandle>,
}

const BAD_ID_MESSAGE: Error = Error::General("Maximal: Unknown operator id");

impl Maximal {
    pub fn with_edges(
        graph: &ConversionGraph,
        constructors: &[(&str, OpConstructor)],
    ) -> Result<Maximal, Error> {
        let mut ctx = Maximal::default();
        for (name, constructor) in constructors {
            ctx.register_op(name, *constructor);
        }
        for (pair, definition) in graph.conversions() {
            let op = ctx.op(&definition)?;
            ctx.conversions.insert(pair, op);
        }
        Ok(ctx)
    }
}

impl Context for Maximal {
    fn new() -> Maximal {
        Maximal::default()
    }

    fn op(&mut self, definition: &str) -> Result<OpHandle, Error> {
        let op = Op::new(definition, self)?;
        let id = op.id;
        self.operators.insert(id, op);
        Ok(id)
    }

    fn apply(
        &self,
        op: OpHandle,
        direction: Direction,
        operands: &mut dyn CoordinateSet,
    ) -> Result<usize, Error> {
        let op = self.operators.get(&op).ok_or(BAD_ID_MESSAGE)?;
        Ok(op.apply(self, operands, direction))
    }

    fn globals(&self) -> BTreeMap<String, String> {
        BTreeMap::new()
    }

    fn register_op(&mut self, name: &str, constructor: OpConstructor) {
        self.constructors.insert(String::from(name), constructor);
    }

    fn get_op(&self, name: &str) -> Result<OpConstructor, Error> {
        self.constructors.get(name).copied().ok_or_else(|| {
            Error::NotFound(name.to_string(), ": User defined constructor".to_string())
        })
    }

    fn register_resource(&mut self, name: &str, definition: &str) {
        self.resources
            .insert(String::from(name), String::from(definition));
    }

    fn get_resource(&self, name: &str) -> Result<String, Error> {
        self.resources.get(name).cloned().ok_or_else(|| {
            Error::NotFound(name.to_string(), ": User defined resource".to_string())
        })
    }

    fn register_edge(
        &mut self,
        _source: CoordinateSystem,
        _target: CoordinateSystem,
        _definition: &str,
    ) -> Result<(), Error> {
        Err(Error::General("Maximal: The graph is fixed at construction"))
    }

    fn conversion(
        &self,
        source: CoordinateSystem,
        target: CoordinateSystem,
    ) -> Result<OpHandle, Error> {
        self.conversions
            .get(&(source, target))
            .copied()
            .ok_or(Error::UnsupportedConversion(source, target))
    }

    fn definition(
        &self,
        source: CoordinateSystem,
        target: CoordinateSystem,
    ) -> Result<String, Error> {
        let op = self.conversion(source, target)?;
        let op = self.operators.get(&op).ok_or(BAD_ID_MESSAGE)?;
        Ok(op.descriptor.definition.clone())
    }
}

// ----- A   U S E R   D E F I N E D   O P E R A T O R -------------------------------

// Shift the longitude by `dx` degrees
fn shift_fwd(op: &Op, _ctx: &dyn Context, operands: &mut dyn CoordinateSet) -> usize {
    let dx = op.params.real("dx").unwrap_or_default();
    for i in 0..operands.len() {
        let (x, y) = operands.xy(i);
        operands.set_xy(i, x + dx, y);
    }
    operands.len()
}

fn shift_inv(op: &Op, _ctx: &dyn Context, operands: &mut dyn CoordinateSet) -> usize {
    let dx = op.params.real("dx").unwrap_or_default();
    for i in 0..operands.len() {
        let (x, y) = operands.xy(i);
        operands.set_xy(i, x - dx, y);
    }
    operands.len()
}

fn shift(parameters: &RawParameters, ctx: &dyn Context) -> Result<Op, Error> {
    const GAMUT: [OpParameter; 2] = [
        OpParameter::Flag { key: "inv" },
        OpParameter::Real { key: "dx", default: Some(0.) },
    ];
    Op::plain(parameters, InnerOp(shift_fwd), Some(InnerOp(shift_inv)), &GAMUT, ctx)
}

// ----- T E S T S ------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use float_eq::assert_float_eq;

    // Test that the fundamental tokenization functionality also works
    // outside of the library
    #[test]
    fn token() {
        assert_eq!("bd09   inv |  gcj02 ellps = krass".normalize(), "bd09 inv|gcj02 ellps=krass");
        assert_eq!("bd09 inv | gcj02 inv".split_into_steps()[1], "gcj02 inv");
        assert_eq!("shift dx=1.5 inv".split_into_parameters()["dx"], "1.5");
        assert_eq!("shift dx=1.5 inv".split_into_parameters()["inv"], "true");
        assert!("bd09 | gcj02".is_pipeline());
        assert!("edge:mars".is_resource_name());
    }

    #[test]
    fn maximal() -> Result<(), Error> {
        // The built-in graph, with a user defined operator between gcj02 and wgs84
        let mut graph = ConversionGraph::new();
        graph.add_edge(Wgs84, Gcj02, "shift dx=0.01")?;
        graph.add_edge(Gcj02, Wgs84, "shift inv dx=0.01")?;

        let ctx = Maximal::with_edges(&graph, &[("shift", OpConstructor(shift))])?;
        assert_eq!(ctx.definition(Bd09, WebMercator)?, "bd09 inv|shift inv dx=0.01|webmerc");

        let data = [Coor2D::lnglat(116.403963, 39.915119)];
        let gcj = ctx.convert(&data, Wgs84, Gcj02, Some(6))?;
        assert_eq!(gcj[0], [Some(116.413963), Some(39.915119)]);

        // The bd09 leg is untouched, so going through gcj02 and the user
        // operator must equal the built-in bd09 of the shifted point
        let via_user = ctx.convert(&data, Wgs84, Bd09, None)?;
        let shifted = [Coor2D::lnglat(116.413963, 39.915119)];
        let builtin = geoshift::convert(&shifted, Gcj02, Bd09, None)?;
        assert_float_eq!(via_user[0][0].unwrap_or_default(), builtin[0][0].unwrap_or_default(), abs <= 1e-12);
        assert_float_eq!(via_user[0][1].unwrap_or_default(), builtin[0][1].unwrap_or_default(), abs <= 1e-12);

        // The user context also computes distances
        let a = [Coor2D::lnglat(116.403963, 39.915119)];
        let b = [Coor2D::lnglat(116.191704, 39.942046)];
        let d = ctx.geo_distance(&a, &b, Wgs84, Metric::Euclidean, LengthUnit::Meters, Some(1))?;
        assert_eq!(d, [Some(18365.7)]);

        // A fixed graph
        let mut ctx = ctx;
        assert!(ctx.register_edge(Wgs84, Gcj02, "noop").is_err());

        // Unknown user operators are refused at construction
        assert!(matches!(
            Maximal::with_edges(&graph, &[]),
            Err(Error::NotFound(_, _))
        ));
        Ok(())
    }
}
