use crate::authoring::*;
use crate::coordinate::mask;
mod minimal;
pub use minimal::Minimal;

// ----- T H E   C O N T E X T   T R A I T ---------------------------------------------

/// The `Context` trait defines the mode of communication between the operators
/// and their surroundings: The registry of user defined operators and macros,
/// and the conversion graph tying the coordinate systems together.
pub trait Context {
    /// In general, implementations should make sure that `new` differs from `default`
    /// only by adding the built-in conversion graph
    fn new() -> Self
    where
        Self: Sized;

    /// Instantiate the operation given by `definition`
    fn op(&mut self, definition: &str) -> Result<OpHandle, Error>;

    /// Apply operation `op` to `operands`
    fn apply(
        &self,
        op: OpHandle,
        direction: Direction,
        operands: &mut dyn CoordinateSet,
    ) -> Result<usize, Error>;

    /// Globally defined default values for operator parameters
    fn globals(&self) -> BTreeMap<String, String>;

    /// Register a new user-defined operator
    fn register_op(&mut self, name: &str, constructor: OpConstructor);
    /// Register a new user-defined resource (i.e. a macro)
    fn register_resource(&mut self, name: &str, definition: &str);

    /// Helper for the `Op` instantiation logic in `Op::op(...)`
    fn get_op(&self, name: &str) -> Result<OpConstructor, Error>;
    /// Helper for the `Op` instantiation logic in `Op::op(...)`
    fn get_resource(&self, name: &str) -> Result<String, Error>;

    /// Add, or replace, a direct edge of the conversion graph, and rebuild
    /// the conversion table
    fn register_edge(
        &mut self,
        source: CoordinateSystem,
        target: CoordinateSystem,
        definition: &str,
    ) -> Result<(), Error>;

    /// The operator converting from `source` to `target`
    fn conversion(
        &self,
        source: CoordinateSystem,
        target: CoordinateSystem,
    ) -> Result<OpHandle, Error>;

    /// The textual definition of the operator converting from `source` to `target`
    fn definition(
        &self,
        source: CoordinateSystem,
        target: CoordinateSystem,
    ) -> Result<String, Error>;

    /// Convert `operands` in place, from `source` to `target`. Returns the
    /// number of points converted successfully. The remaining points are NaN.
    fn transform(
        &self,
        operands: &mut dyn CoordinateSet,
        source: CoordinateSystem,
        target: CoordinateSystem,
    ) -> Result<usize, Error> {
        let op = self.conversion(source, target)?;
        self.apply(op, Fwd, operands)
    }

    /// Convert a copy of `points`, from `source` to `target`, optionally
    /// rounding to `precision` decimal digits. Non-finite elements of the
    /// result are masked as `None`.
    fn convert(
        &self,
        points: &dyn CoordinateSet,
        source: CoordinateSystem,
        target: CoordinateSystem,
        precision: Option<i32>,
    ) -> Result<Vec<Masked>, Error> {
        let mut operands = points.to_coords();
        let n = self.transform(&mut operands, source, target)?;
        if n < operands.len() {
            debug!("{source} -> {target}: {} of {} points degenerate", operands.len() - n, operands.len());
        }
        Ok(mask(&operands, precision))
    }

    /// Distances between corresponding points of `origins` and
    /// `destinations`, cf. [`geo_distance`](crate::geo_distance)
    fn geo_distance(
        &self,
        origins: &dyn CoordinateSet,
        destinations: &dyn CoordinateSet,
        system: CoordinateSystem,
        metric: Metric,
        unit: LengthUnit,
        precision: Option<i32>,
    ) -> Result<Vec<Option<f64>>, Error> {
        crate::distance::distances(self, origins, destinations, system, metric, unit, precision)
    }
}
