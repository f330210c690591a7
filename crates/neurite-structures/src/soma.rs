use ndarray::Array2;

/// The soma point set of a morphology.
///
/// Holds the `[x, y, z, radius]` rows of every soma-tagged point, in table
/// order. Soma points never belong to neurite sections; building a geometric
/// soma model out of them is a consumer's concern.
#[derive(Clone, Debug)]
pub struct Soma {
    points: Array2<f64>,
}

impl Default for Soma {
    fn default() -> Self {
        Soma {
            points: Array2::zeros((0, 4)),
        }
    }
}

impl Soma {
    /// Wraps an n x 4 `[x, y, z, radius]` block.
    pub fn new(points: Array2<f64>) -> Self {
        Soma { points }
    }

    /// Number of soma points.
    pub fn len(&self) -> usize {
        self.points.nrows()
    }

    /// True for morphologies without any soma point.
    pub fn is_empty(&self) -> bool {
        self.points.nrows() == 0
    }

    /// The raw `[x, y, z, radius]` rows.
    pub fn points(&self) -> &Array2<f64> {
        &self.points
    }

    /// Arithmetic mean of the soma point positions.
    pub fn center(&self) -> Option<[f64; 3]> {
        if self.is_empty() {
            return None;
        }
        let n = self.points.nrows() as f64;
        let mut center = [0.0; 3];
        for row in self.points.rows() {
            center[0] += row[0];
            center[1] += row[1];
            center[2] += row[2];
        }
        Some([center[0] / n, center[1] / n, center[2] / n])
    }

    /// Arithmetic mean of the soma point radii.
    pub fn mean_radius(&self) -> Option<f64> {
        if self.is_empty() {
            return None;
        }
        let n = self.points.nrows() as f64;
        Some(self.points.column(3).sum() / n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_center_and_radius() {
        let soma = Soma::new(array![
            [0.0, 0.0, 0.0, 1.0],
            [2.0, 0.0, 0.0, 3.0],
        ]);
        assert_eq!(soma.len(), 2);
        assert_eq!(soma.center(), Some([1.0, 0.0, 0.0]));
        assert_eq!(soma.mean_radius(), Some(2.0));
    }

    #[test]
    fn test_empty_soma() {
        let soma = Soma::default();
        assert!(soma.is_empty());
        assert_eq!(soma.center(), None);
        assert_eq!(soma.mean_radius(), None);
    }
}
