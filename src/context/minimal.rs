use crate::authoring::*;

// ----- T H E   M I N I M A L   P R O V I D E R ---------------------------------------

/// A minimalistic context provider, supporting only built in and run-time
/// defined operators, and a conversion graph held in memory.
///
/// `Minimal::new()` comes with the built-in graph, while `Minimal::default()`
/// is empty, i.e. it can instantiate operators, but not convert between
/// coordinate systems until edges are registered.
#[derive(Debug, Default)]
pub struct Minimal {
    /// Constructors for user defined operators
    constructors: BTreeMap<String, OpConstructor>,
    /// User defined resources (macros)
    resources: BTreeMap<String, String>,
    /// Instantiations of operators
    operators: BTreeMap<OpHandle, Op>,
    /// The direct edges
    graph: ConversionGraph,
    /// Instantiations of the conversions between all pairs of systems
    conversions: BTreeMap<(CoordinateSystem, CoordinateSystem), OpHandle>,
}

const BAD_ID_MESSAGE: Error = Error::General("Minimal: Unknown operator id");

impl Context for Minimal {
    fn new() -> Minimal {
        let mut ctx = Minimal {
            graph: ConversionGraph::new(),
            ..Default::default()
        };
        // The built-in edges are all known to instantiate
        if let Err(e) = ctx.rebuild(ctx.graph.clone()) {
            error!("Minimal: cannot build conversion table: {e}");
        }
        ctx
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
        // Each operator provides its own ellipsoid default
        BTreeMap::new()
    }

    fn register_op(&mut self, name: &str, constructor: OpConstructor) {
        self.constructors.insert(String::from(name), constructor);
    }

    fn get_op(&self, name: &str) -> Result<OpConstructor, Error> {
        if let Some(result) = self.constructors.get(name) {
            return Ok(*result);
        }

        Err(Error::NotFound(
            name.to_string(),
            ": User defined constructor".to_string(),
        ))
    }

    fn register_resource(&mut self, name: &str, definition: &str) {
        self.resources
            .insert(String::from(name), String::from(definition));
    }

    fn get_resource(&self, name: &str) -> Result<String, Error> {
        if let Some(result) = self.resources.get(name) {
            return Ok(result.to_string());
        }

        Err(Error::NotFound(
            name.to_string(),
            ": User defined resource".to_string(),
        ))
    }

    fn register_edge(
        &mut self,
        source: CoordinateSystem,
        target: CoordinateSystem,
        definition: &str,
    ) -> Result<(), Error> {
        let mut graph = self.graph.clone();
        graph.add_edge(source, target, definition)?;
        self.rebuild(graph)
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

impl Minimal {
    // Instantiate the full conversion table of `graph`. Nothing is changed
    // unless all conversions instantiate successfully
    fn rebuild(&mut self, graph: ConversionGraph) -> Result<(), Error> {
        let mut conversions = BTreeMap::new();
        let mut operators = Vec::new();
        for (pair, definition) in graph.conversions() {
            let op = Op::new(&definition, self)?;
            conversions.insert(pair, op.id);
            operators.push(op);
        }

        for id in std::mem::take(&mut self.conversions).into_values() {
            self.operators.remove(&id);
        }
        for op in operators {
            self.operators.insert(op.id, op);
        }
        debug!("Minimal: {} conversions", conversions.len());
        self.conversions = conversions;
        self.graph = graph;
        Ok(())
    }
}

// ----- T E S T S ------------------------------------------------------------------
