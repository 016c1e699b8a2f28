use super::*;

/// Interface between the high level [Op::op()](crate::op::Op) and the low level
/// functionality in the [InnerOp](crate::inner_op::InnerOp)s
///
/// `RawParameters` is the vehicle used by the `Op`erator factory in `Op::op(...)`,
/// to ferry args around from the invocator into the constructor of the individual
/// `InnerOp`s.
///
/// The `InnerOp`constructor typically interprets the contents of
/// `RawParameters`, and converts it into a more runtime friendly instance of
/// `ParsedParameters`.
#[derive(Debug, Default, Clone)]
pub struct RawParameters {
    pub invocation: String,
    pub definition: String,
    pub globals: BTreeMap<String, String>,
    recursion_level: usize,
}

impl RawParameters {
    pub fn new(invocation: &str, globals: &BTreeMap<String, String>) -> RawParameters {
        let invocation = invocation.normalize();
        let definition = invocation.clone();
        let globals = globals.clone();
        RawParameters {
            invocation,
            definition,
            globals,
            recursion_level: 0,
        }
    }

    /// The parameters of a step, or of a macro expansion, one level down
    pub fn next(&self, definition: &str) -> RawParameters {
        let invocation = self.invocation.clone();
        let definition = definition.normalize();
        let globals = self.globals.clone();
        let recursion_level = self.recursion_level + 1;
        RawParameters {
            invocation,
            definition,
            globals,
            recursion_level,
        }
    }

    pub fn nesting_too_deep(&self) -> bool {
        self.recursion_level > 100
    }
}

// ----- T E S T S ---------------------------------------------------------------------

// RawParameters gets most of its test coverage from the tests in `op/mod.rs`

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn descent() {
        let globals = BTreeMap::from([("ellps".to_string(), "GRS80".to_string())]);
        let raw = RawParameters::new("bd09   inv |  gcj02 inv", &globals);
        assert_eq!(raw.definition, "bd09 inv|gcj02 inv");

        let mut step = raw.next("gcj02  inv");
        assert_eq!(step.definition, "gcj02 inv");
        assert_eq!(step.invocation, raw.invocation);
        assert_eq!(step.globals["ellps"], "GRS80");

        for _ in 0..100 {
            step = step.next(&step.definition);
        }
        assert!(step.nesting_too_deep());
    }
}
