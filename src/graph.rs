use crate::authoring::*;
use std::collections::VecDeque;

/// Definitions of the direct edges of the built-in conversion graph.
///
/// The graph is a chain: bd09 - gcj02 - wgs84 - mercator.
#[rustfmt::skip]
pub const DIRECT_EDGES: [(CoordinateSystem, CoordinateSystem, &str); 6] = [
    (Gcj02,       Bd09,        "bd09"),
    (Bd09,        Gcj02,       "bd09 inv"),
    (Wgs84,       Gcj02,       "gcj02"),
    (Gcj02,       Wgs84,       "gcj02 inv"),
    (Wgs84,       WebMercator, "webmerc"),
    (WebMercator, Wgs84,       "webmerc inv"),
];

/// A small directed graph over the coordinate systems. The edges are
/// operator definitions.
///
/// Only the direct edges are given. Conversions between systems without a
/// direct edge are resolved by path search, once, when the conversion table
/// is built: The path with the fewest hops wins, and ties are broken by the
/// order of `CoordinateSystem::ALL`, so the composition order is always the
/// same.
#[derive(Debug, Default, Clone)]
pub struct ConversionGraph {
    edges: BTreeMap<(CoordinateSystem, CoordinateSystem), String>,
}

impl ConversionGraph {
    /// The built-in graph
    pub fn new() -> ConversionGraph {
        let mut graph = ConversionGraph::default();
        for (source, target, definition) in DIRECT_EDGES {
            graph.edges.insert((source, target), definition.to_string());
        }
        graph
    }

    /// Add a direct edge, or replace an existing one
    pub fn add_edge(
        &mut self,
        source: CoordinateSystem,
        target: CoordinateSystem,
        definition: &str,
    ) -> Result<(), Error> {
        if source == target {
            return Err(Error::UnsupportedConversion(source, target));
        }
        let definition = definition.normalize();
        if definition.split_into_steps().is_empty() {
            return Err(Error::Syntax(format!("empty definition for {source} -> {target}")));
        }
        debug!("edge {source} -> {target}: {definition}");
        self.edges.insert((source, target), definition);
        Ok(())
    }

    /// The definition of the direct edge from `source` to `target`, if any
    pub fn edge(&self, source: CoordinateSystem, target: CoordinateSystem) -> Option<&str> {
        self.edges.get(&(source, target)).map(|e| e.as_str())
    }

    /// The sequence of systems visited on the way from `source` to `target`,
    /// both included
    pub fn path(
        &self,
        source: CoordinateSystem,
        target: CoordinateSystem,
    ) -> Option<Vec<CoordinateSystem>> {
        if source == target {
            return None;
        }

        // Breadth first, keeping track of where we came from
        let mut previous = BTreeMap::<CoordinateSystem, CoordinateSystem>::new();
        let mut queue = VecDeque::from([source]);
        while let Some(node) = queue.pop_front() {
            if node == target {
                break;
            }
            for next in CoordinateSystem::ALL {
                if next == source || previous.contains_key(&next) {
                    continue;
                }
                if self.edges.contains_key(&(node, next)) {
                    previous.insert(next, node);
                    queue.push_back(next);
                }
            }
        }

        // Walk back from the target
        let mut path = vec![target];
        let mut node = target;
        while node != source {
            node = *previous.get(&node)?;
            path.push(node);
        }
        path.reverse();
        Some(path)
    }

    /// The definition of the conversion from `source` to `target`: Either a
    /// direct edge, or a pipeline of the edges along the path between them
    pub fn resolve(
        &self,
        source: CoordinateSystem,
        target: CoordinateSystem,
    ) -> Result<String, Error> {
        let path = self
            .path(source, target)
            .ok_or(Error::UnsupportedConversion(source, target))?;
        let steps: Vec<&str> = path
            .windows(2)
            .filter_map(|hop| self.edge(hop[0], hop[1]))
            .collect();
        Ok(steps.join(" | "))
    }

    /// The full conversion table: The definitions for all ordered pairs of
    /// distinct systems which are connected in the graph
    pub fn conversions(&self) -> BTreeMap<(CoordinateSystem, CoordinateSystem), String> {
        let mut table = BTreeMap::new();
        for source in CoordinateSystem::ALL {
            for target in CoordinateSystem::ALL {
                if let Ok(definition) = self.resolve(source, target) {
                    if self.edge(source, target).is_none() {
                        debug!("derived {source} -> {target}: {definition}");
                    }
                    table.insert((source, target), definition);
                }
            }
        }
        table
    }
}

// ----- T E S T S ---------------------------------------------------------------------
