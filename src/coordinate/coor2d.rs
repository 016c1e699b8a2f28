use std::ops::{Index, IndexMut};

/// Generic 2D Coordinate tuple, with no fixed interpretation of the elements.
///
/// Throughout the crate, geographical coordinates are stored in degrees,
/// *longitude first*, and projected coordinates in metres, *easting first*.
/// The constructors make the axis order of the input explicit.
#[derive(Debug, Default, PartialEq, Copy, Clone)]
pub struct Coor2D(pub [f64; 2]);

impl Index<usize> for Coor2D {
    type Output = f64;
    fn index(&self, i: usize) -> &Self::Output {
        &self.0[i]
    }
}

impl IndexMut<usize> for Coor2D {
    fn index_mut(&mut self, i: usize) -> &mut Self::Output {
        &mut self.0[i]
    }
}

impl From<[f64; 2]> for Coor2D {
    fn from(value: [f64; 2]) -> Self {
        Coor2D(value)
    }
}

// ----- C O N S T R U C T O R S ---------------------------------------------

/// Constructors
impl Coor2D {
    /// A `Coor2D` from longitude/latitude, in degrees
    #[must_use]
    pub fn lnglat(longitude: f64, latitude: f64) -> Coor2D {
        Coor2D([longitude, latitude])
    }

    /// A `Coor2D` from latitude/longitude, in degrees. The elements are
    /// swapped into the longitude-first internal order.
    #[must_use]
    pub fn latlng(latitude: f64, longitude: f64) -> Coor2D {
        Coor2D([longitude, latitude])
    }

    /// A `Coor2D` from easting/northing (or any other pair), taken as is
    #[must_use]
    pub fn raw(first: f64, second: f64) -> Coor2D {
        Coor2D([first, second])
    }

    /// A `Coor2D` consisting of 2 `NaN`s
    #[must_use]
    pub fn nan() -> Coor2D {
        Coor2D([f64::NAN, f64::NAN])
    }

    /// A `Coor2D` consisting of 2 `0`s
    #[must_use]
    pub fn origin() -> Coor2D {
        Coor2D([0., 0.])
    }
}

// ----- A C C E S S O R S ---------------------------------------------------

impl Coor2D {
    #[must_use]
    pub fn x(&self) -> f64 {
        self.0[0]
    }

    #[must_use]
    pub fn y(&self) -> f64 {
        self.0[1]
    }

    #[must_use]
    pub fn xy(&self) -> (f64, f64) {
        (self.0[0], self.0[1])
    }

    pub fn set_xy(&mut self, x: f64, y: f64) {
        self.0 = [x, y];
    }

    /// True if both elements are finite
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.0[0].is_finite() && self.0[1].is_finite()
    }
}

// ----- A R I T H M E T I C -------------------------------------------------

impl Coor2D {
    /// Multiply by a scalar
    #[must_use]
    pub fn scale(&self, factor: f64) -> Coor2D {
        Coor2D([self.x() * factor, self.y() * factor])
    }

    /// Scalar product
    #[must_use]
    pub fn dot(&self, other: Coor2D) -> f64 {
        self.x() * other.x() + self.y() * other.y()
    }

    /// The Euclidean norm
    #[must_use]
    pub fn norm(&self) -> f64 {
        self.x().hypot(self.y())
    }

    /// Element-wise difference
    #[must_use]
    pub fn sub(&self, other: Coor2D) -> Coor2D {
        Coor2D([self.x() - other.x(), self.y() - other.y()])
    }
}

// ----- T E S T S ---------------------------------------------------
