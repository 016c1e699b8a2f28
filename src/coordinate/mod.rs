use crate::authoring::*;
pub mod coor2d;
pub mod set;

/// A converted point, with any NaN or infinite element replaced by `None`
pub type Masked = [Option<f64>; 2];

/// Build a point batch from rows of dynamic length, as delivered by parsers
/// of foreign data. Every row must hold exactly two elements: the batch is a
/// N×2 matrix, never anything else.
pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<Vec<Coor2D>, Error> {
    let mut points = Vec::with_capacity(rows.len());
    for (i, row) in rows.iter().enumerate() {
        let row = row.as_ref();
        if row.len() != 2 {
            return Err(Error::Shape(format!(
                "row {i} has {} elements, expected 2",
                row.len()
            )));
        }
        points.push(Coor2D([row[0], row[1]]));
    }
    Ok(points)
}

/// Round (if `precision` is given) and mask every element of `operands`
pub fn mask(operands: &dyn CoordinateSet, precision: Option<i32>) -> Vec<Masked> {
    let round = |v: f64| match precision {
        Some(digits) => round_to(v, digits),
        None => v,
    };
    (0..operands.len())
        .map(|i| {
            let (x, y) = operands.xy(i);
            [finite(round(x)), finite(round(y))]
        })
        .collect()
}

// ----- T E S T S ---------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows() -> Result<(), Error> {
        let rows = vec![vec![116.4, 39.9], vec![121.4, 31.2]];
        let points = from_rows(&rows)?;
        assert_eq!(points.len(), 2);
        assert_eq!(points[1], Coor2D::lnglat(121.4, 31.2));

        let ragged = vec![vec![116.4, 39.9], vec![121.4]];
        assert!(matches!(from_rows(&ragged), Err(Error::Shape(_))));

        let wide = [[1., 2., 3.]];
        assert!(matches!(from_rows(&wide), Err(Error::Shape(_))));

        let empty: [[f64; 2]; 0] = [];
        assert!(from_rows(&empty)?.is_empty());
        Ok(())
    }

    #[test]
    fn masking() {
        let data = [
            Coor2D::raw(1.23456, f64::NAN),
            Coor2D::raw(f64::INFINITY, -2.5),
        ];
        let masked = mask(&data, None);
        assert_eq!(masked[0], [Some(1.23456), None]);
        assert_eq!(masked[1], [None, Some(-2.5)]);

        let masked = mask(&data, Some(2));
        assert_eq!(masked[0], [Some(1.23), None]);
        assert_eq!(masked[1], [None, Some(-2.5)]);
    }
}
