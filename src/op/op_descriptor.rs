use super::*;

/// The fundamental elements of an operator (i.e. everything but steps and args)
#[derive(Debug, Default)]
pub struct OpDescriptor {
    pub definition: String, // e.g. bd09 inv|gcj02 inv
    pub steps: Vec<String>, // e.g. ["bd09 inv", "gcj02 inv"]
    pub invertible: bool,
    pub inverted: bool,
    pub fwd: InnerOp,
    pub inv: InnerOp,
}

impl OpDescriptor {
    pub fn new(definition: &str, fwd: InnerOp, inv: Option<InnerOp>) -> OpDescriptor {
        let definition = definition.to_string();
        let steps = definition.split_into_steps();
        let invertible = inv.is_some();
        let inverted = false; // Handled higher up in the call hierarchy
        let inv = inv.unwrap_or_default();
        OpDescriptor {
            definition,
            steps,
            invertible,
            inverted,
            fwd,
            inv,
        }
    }
}
