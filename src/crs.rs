use crate::Error;
use std::fmt;
use std::str::FromStr;

/// The coordinate systems handled by the conversion graph.
///
/// A `CoordinateSystem` identifies the frame of a point batch. It is never
/// stored with the coordinates: callers always supply it explicitly.
///
/// The default is `Bd09`, the system of the routing service endpoints.
#[derive(Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Copy, Clone)]
pub enum CoordinateSystem {
    /// The vendor offset system (Baidu), layered on top of `Gcj02`
    #[default]
    Bd09,
    /// The national obfuscation system (GCJ-02, "Mars coordinates")
    Gcj02,
    /// Longitude/latitude on WGS84, in degrees
    Wgs84,
    /// Spherical Web Mercator (EPSG:3857), in metres
    WebMercator,
}

impl CoordinateSystem {
    /// All systems, in graph node order
    pub const ALL: [CoordinateSystem; 4] = [
        CoordinateSystem::Bd09,
        CoordinateSystem::Gcj02,
        CoordinateSystem::Wgs84,
        CoordinateSystem::WebMercator,
    ];

    /// The canonical short name, as accepted by `from_str`
    pub fn name(&self) -> &'static str {
        match self {
            CoordinateSystem::Bd09 => "bd09",
            CoordinateSystem::Gcj02 => "gcj02",
            CoordinateSystem::Wgs84 => "wgs84",
            CoordinateSystem::WebMercator => "mercator",
        }
    }

    /// True for the systems given as longitude/latitude in degrees
    pub fn is_geographic(&self) -> bool {
        !matches!(self, CoordinateSystem::WebMercator)
    }
}

impl fmt::Display for CoordinateSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CoordinateSystem {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "bd09" | "bd-09" | "baidu" => Ok(CoordinateSystem::Bd09),
            "gcj02" | "gcj-02" | "mars" => Ok(CoordinateSystem::Gcj02),
            "wgs84" | "wgs-84" | "epsg:4326" => Ok(CoordinateSystem::Wgs84),
            "mercator" | "webmerc" | "web-mercator" | "epsg:3857" => {
                Ok(CoordinateSystem::WebMercator)
            }
            _ => Err(Error::UnknownSystem(s.to_string())),
        }
    }
}

// ----- T E S T S ---------------------------------------------------------------------
