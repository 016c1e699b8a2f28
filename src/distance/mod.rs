//! Distances between corresponding points of two batches.
//!
//! Both batches are converted to Web Mercator, where the metric is computed.
//! The length metrics are then scaled to ground distance by the point scale
//! factor of the projection at the mid latitude of each pair, and converted
//! to the requested unit.
use crate::authoring::*;
use crate::units::Length;
use std::fmt;
use std::str::FromStr;

/// The metrics supported by [`geo_distance`]
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Copy, Clone, Default)]
pub enum Metric {
    /// The L2 norm of the difference
    #[default]
    Euclidean,
    /// The L1 norm of the difference
    Manhattan,
    /// The L∞ norm of the difference
    Chebyshev,
    /// The cosine of the angle between the two position vectors. Dimensionless,
    /// in [-1, 1], and not subject to unit conversion
    Cosine,
}

impl Metric {
    pub const ALL: [Metric; 4] = [
        Metric::Euclidean,
        Metric::Manhattan,
        Metric::Chebyshev,
        Metric::Cosine,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Metric::Euclidean => "euclidean",
            Metric::Manhattan => "manhattan",
            Metric::Chebyshev => "chebyshev",
            Metric::Cosine => "cosine",
        }
    }

    /// True for the metrics measuring a length
    pub fn is_length(&self) -> bool {
        !matches!(self, Metric::Cosine)
    }

    /// The metric applied to the planar points `a` and `b`
    pub fn eval(&self, a: Coor2D, b: Coor2D) -> f64 {
        let d = a.sub(b);
        match self {
            Metric::Euclidean => d.norm(),
            Metric::Manhattan => d.x().abs() + d.y().abs(),
            Metric::Chebyshev => d.x().abs().max(d.y().abs()),
            Metric::Cosine => (a.dot(b) / (a.norm() * b.norm())).clamp(-1., 1.),
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Metric {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_lowercase();
        Metric::ALL
            .into_iter()
            .find(|m| m.name() == name)
            .ok_or_else(|| Error::Invalid {
                what: "metric",
                value: s.to_string(),
                expected: "euclidean/manhattan/chebyshev/cosine",
            })
    }
}

/// Distances between corresponding points of `origins` and `destinations`,
/// both given in `system`, using the built-in conversion graph.
///
/// The length metrics are returned in `unit`, the cosine metric as is. All
/// results are optionally rounded to `precision` decimal digits, and any
/// non-finite result is returned as `None`.
///
/// ```rust
/// use geoshift::prelude::*;
/// let tiananmen = [Coor2D::lnglat(116.403963, 39.915119)];
/// let xiangshan = [Coor2D::lnglat(116.191704, 39.942046)];
/// let d = geo_distance(&tiananmen, &xiangshan, Wgs84, Metric::Euclidean, LengthUnit::Kilometers, Some(1))?;
/// assert_eq!(d, [Some(18.4)]);
/// # Ok::<(), geoshift::Error>(())
/// ```
pub fn geo_distance(
    origins: &dyn CoordinateSet,
    destinations: &dyn CoordinateSet,
    system: CoordinateSystem,
    metric: Metric,
    unit: LengthUnit,
    precision: Option<i32>,
) -> Result<Vec<Option<f64>>, Error> {
    crate::default_context().geo_distance(origins, destinations, system, metric, unit, precision)
}

// The work horse behind `Context::geo_distance()`
pub(crate) fn distances<C: Context + ?Sized>(
    ctx: &C,
    origins: &dyn CoordinateSet,
    destinations: &dyn CoordinateSet,
    system: CoordinateSystem,
    metric: Metric,
    unit: LengthUnit,
    precision: Option<i32>,
) -> Result<Vec<Option<f64>>, Error> {
    if origins.len() != destinations.len() {
        return Err(Error::Shape(format!(
            "{} origins, but {} destinations",
            origins.len(),
            destinations.len()
        )));
    }

    let planar = |points: &dyn CoordinateSet| -> Result<Vec<Coor2D>, Error> {
        let mut operands = points.to_coords();
        if system != WebMercator {
            ctx.transform(&mut operands, system, WebMercator)?;
        }
        Ok(operands)
    };
    let a = planar(origins)?;
    let b = planar(destinations)?;

    // The latitudes, for the scale factor
    let mut a_geo = a.clone();
    let mut b_geo = b.clone();
    if metric.is_length() {
        ctx.transform(&mut a_geo, WebMercator, Wgs84)?;
        ctx.transform(&mut b_geo, WebMercator, Wgs84)?;
    }

    let mut result = Vec::with_capacity(a.len());
    for i in 0..a.len() {
        let mut d = metric.eval(a[i], b[i]);
        if metric.is_length() {
            let mid_latitude = (a_geo[i].y() + b_geo[i].y()) / 2.;
            d = Length::Meters(d * mid_latitude.to_radians().cos()).to(unit);
        }
        if let Some(digits) = precision {
            d = round_to(d, digits);
        }
        result.push(finite(d));
    }
    trace!("{metric} distances for {} pairs in {system}", result.len());
    Ok(result)
}

// ----- T E S T S ---------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use float_eq::assert_float_eq;

    fn tiananmen() -> [Coor2D; 1] {
        [Coor2D::lnglat(116.403963, 39.915119)]
    }

    fn xiangshan() -> [Coor2D; 1] {
        [Coor2D::lnglat(116.191704, 39.942046)]
    }

    #[test]
    fn metrics() -> Result<(), Error> {
        let (a, b) = (tiananmen(), xiangshan());
        let m = LengthUnit::Meters;
        let expected = [
            (Metric::Euclidean, 18365.71218874291),
            (Metric::Manhattan, 21116.94750242795),
            (Metric::Chebyshev, 18119.44750760246),
            (Metric::Cosine, 0.9999996260516492),
        ];
        for (metric, value) in expected {
            let d = geo_distance(&a, &b, Wgs84, metric, m, None)?;
            assert_eq!(d.len(), 1);
            assert_float_eq!(d[0].unwrap_or_default(), value, rmax <= 1e-9);
        }

        // Symmetric
        let d = geo_distance(&b, &a, Wgs84, Metric::Euclidean, m, None)?;
        assert_float_eq!(d[0].unwrap_or_default(), 18365.71218874291, rmax <= 1e-9);
        Ok(())
    }

    #[test]
    fn units_and_rounding() -> Result<(), Error> {
        let (a, b) = (tiananmen(), xiangshan());
        let km = geo_distance(&a, &b, Wgs84, Metric::Euclidean, LengthUnit::Kilometers, None)?;
        assert_float_eq!(km[0].unwrap_or_default(), 18.36571218874291, rmax <= 1e-9);

        let mi = geo_distance(&a, &b, Wgs84, Metric::Euclidean, LengthUnit::Miles, Some(2))?;
        assert_eq!(mi, [Some(11.41)]);

        let m = geo_distance(&a, &b, Wgs84, Metric::Euclidean, LengthUnit::Meters, Some(-2))?;
        assert_eq!(m, [Some(18400.)]);

        // The cosine is not a length
        let cos = geo_distance(&a, &b, Wgs84, Metric::Cosine, LengthUnit::Feet, Some(6))?;
        assert_eq!(cos, [Some(1.)]);
        Ok(())
    }

    #[test]
    fn degenerate() -> Result<(), Error> {
        let a = [Coor2D::lnglat(0., 90.), tiananmen()[0], Coor2D::origin()];
        let b = [xiangshan()[0], xiangshan()[0], Coor2D::origin()];
        let d = geo_distance(&a, &b, Wgs84, Metric::Euclidean, LengthUnit::Meters, None)?;
        assert_eq!(d[0], None);
        assert_float_eq!(d[1].unwrap_or_default(), 18365.71218874291, rmax <= 1e-9);
        assert_eq!(d[2], Some(0.));

        // The cosine between null vectors is undefined
        let null = [Coor2D::origin()];
        let d = geo_distance(&null, &null, WebMercator, Metric::Cosine, LengthUnit::Meters, None)?;
        assert_eq!(d, [None]);

        // Batches of different lengths are refused
        assert!(matches!(
            geo_distance(&a, &xiangshan(), Wgs84, Metric::Euclidean, LengthUnit::Meters, None),
            Err(Error::Shape(_))
        ));

        // Empty batches are fine
        let empty: [Coor2D; 0] = [];
        let d = geo_distance(&empty, &empty, Bd09, Metric::Manhattan, LengthUnit::Meters, None)?;
        assert!(d.is_empty());
        Ok(())
    }

    #[test]
    fn systems() -> Result<(), Error> {
        // The same pair of points, given in all four systems, gives
        // (almost) the same distance
        let ctx = Minimal::new();
        let (a, b) = (tiananmen(), xiangshan());
        let reference = ctx.geo_distance(&a, &b, Wgs84, Metric::Euclidean, LengthUnit::Meters, None)?[0];
        for system in [Bd09, Gcj02, WebMercator] {
            let mut a = a;
            let mut b = b;
            ctx.transform(&mut a, Wgs84, system)?;
            ctx.transform(&mut b, Wgs84, system)?;
            let d = ctx.geo_distance(&a, &b, system, Metric::Euclidean, LengthUnit::Meters, None)?[0];
            assert_float_eq!(d.unwrap_or_default(), reference.unwrap_or_default(), abs <= 5.);
        }

        for metric in Metric::ALL {
            assert_eq!(metric, metric.name().parse()?);
        }
        assert!(matches!("hamming".parse::<Metric>(), Err(Error::Invalid { .. })));
        Ok(())
    }
}
