use crate::Error;

/// Name, semimajor axis, reciprocal flattening, and description of the
/// built in ellipsoids
#[rustfmt::skip]
pub const ELLIPSOID_LIST: [(&str, f64, f64, &str); 4] = [
    ("GRS80",  6_378_137.0, 298.257_222_100_882_7, "GRS 1980(IUGG, 1980)"),
    ("WGS84",  6_378_137.0, 298.257_223_563,       "WGS 84"),
    ("krass",  6_378_245.0, 298.3,                 "Krassovsky, 1942"),
    ("sphere", 6_378_137.0, 0.0,                   "Web Mercator sphere"),
];

/// An ellipsoid of revolution.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ellipsoid {
    a: f64,
    f: f64,
}

/// GRS80 is the default ellipsoid.
impl Default for Ellipsoid {
    fn default() -> Ellipsoid {
        Ellipsoid::new(6_378_137.0, 1. / 298.257_222_100_882_7)
    }
}

/// Constructors for `Ellipsoid`
impl Ellipsoid {
    /// User defined ellipsoid
    #[must_use]
    pub fn new(semimajor_axis: f64, flattening: f64) -> Ellipsoid {
        Ellipsoid {
            a: semimajor_axis,
            f: flattening,
        }
    }

    /// Predefined ellipsoid; built-in, or given as a string formatted
    /// (a, rf) tuple, e.g. "6378245, 298.3"
    pub fn named(name: &str) -> Result<Ellipsoid, Error> {
        // Is it one of the few builtins?
        if let Some(e) = ELLIPSOID_LIST.iter().find(|ellps| ellps.0 == name) {
            // EPSG convention: zero reciproque flattening indicates zero flattening
            let f = if e.2 != 0.0 { 1.0 / e.2 } else { 0.0 };
            return Ok(Ellipsoid::new(e.1, f));
        }

        // Remove optional parenthesis
        let name = name
            .strip_prefix('(')
            .and_then(|n| n.strip_suffix(')'))
            .unwrap_or(name);

        // The "semimajor, reciproque-flattening" form, e.g. "6378137, 298.3"
        let a_and_rf = name.split(',').collect::<Vec<_>>();
        if a_and_rf.len() == 2_usize {
            if let Ok(a) = a_and_rf[0].trim().parse::<f64>() {
                if let Ok(rf) = a_and_rf[1].trim().parse::<f64>() {
                    let f = if rf != 0.0 { 1.0 / rf } else { 0.0 };
                    return Ok(Ellipsoid::new(a, f));
                }
            }
        }

        Err(Error::NotFound(
            String::from(name),
            String::from(": Ellipsoid::named()"),
        ))
    }
}

impl Ellipsoid {
    /// The semimajor axis, *a*
    #[must_use]
    pub fn semimajor_axis(&self) -> f64 {
        self.a
    }

    /// The semiminor axis, *b*
    #[must_use]
    pub fn semiminor_axis(&self) -> f64 {
        self.a * (1.0 - self.f)
    }

    /// The flattening, *f = (a - b)/a*
    #[must_use]
    pub fn flattening(&self) -> f64 {
        self.f
    }

    /// The squared eccentricity *e² = (a² - b²) / a²*.
    #[must_use]
    pub fn eccentricity_squared(&self) -> f64 {
        self.f * (2_f64 - self.f)
    }

    // ----- Curvatures ------------------------------------------------------------

    /// The radius of curvature in the prime vertical, *N*
    #[must_use]
    pub fn prime_vertical_radius_of_curvature(&self, latitude: f64) -> f64 {
        if self.f == 0.0 {
            return self.a;
        }
        self.a / (1.0 - latitude.sin().powi(2) * self.eccentricity_squared()).sqrt()
    }

    /// The meridian radius of curvature, *M*
    #[must_use]
    pub fn meridian_radius_of_curvature(&self, latitude: f64) -> f64 {
        if self.f == 0.0 {
            return self.a;
        }
        let num = self.a * (1.0 - self.eccentricity_squared());
        let denom = (1.0 - latitude.sin().powi(2) * self.eccentricity_squared()).powf(1.5);
        num / denom
    }
}

// ----- Tests ---------------------------------------------------------------------
