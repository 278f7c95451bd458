use crate::topology::ConvexHull;

/// Computes the enclosed volume of a hull.
///
/// Sums the signed volumes of the tetrahedra spanned by each face and the
/// hull's first vertex. Faces are outward oriented, so every term is
/// non-negative.
pub struct Volume<'a> {
    hull: &'a ConvexHull,
}

impl<'a> Volume<'a> {
    /// Creates a new `Volume` query.
    #[must_use]
    pub fn new(hull: &'a ConvexHull) -> Self {
        Self { hull }
    }

    /// Executes the query, returning the volume.
    #[must_use]
    pub fn execute(&self) -> f64 {
        let points = self.hull.points();
        let Some(apex) = self.hull.faces().first().map(|f| points[f.vertices()[0]]) else {
            return 0.0;
        };

        let mut six_volume = 0.0;
        for face in self.hull.faces() {
            let [a, b, c] = face.vertices();
            let cross = (points[b] - points[a]).cross(&(points[c] - points[a]));
            six_volume += cross.dot(&(points[a] - apex));
        }
        six_volume / 6.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::HullConfig;
    use crate::math::Point3;
    use crate::operations::{convex_hull, Algorithm};
    use approx::assert_relative_eq;

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    #[test]
    fn box_volume() {
        let mut points = Vec::new();
        for x in [1.0, 3.0] {
            for y in [2.0, 5.0] {
                for z in [3.0, 7.0] {
                    points.push(p(x, y, z));
                }
            }
        }
        points.push(p(2.0, 3.0, 4.0));
        for alg in Algorithm::ALL {
            let hull = convex_hull(&points, alg, &HullConfig::new().with_seed(1)).unwrap();
            assert_relative_eq!(Volume::new(&hull).execute(), 24.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn unit_corner_volume() {
        let points = vec![
            p(0.0, 0.0, 0.0),
            p(1.0, 0.0, 0.0),
            p(0.0, 1.0, 0.0),
            p(0.0, 0.0, 1.0),
        ];
        let hull = convex_hull(&points, Algorithm::Incremental, &HullConfig::new()).unwrap();
        assert_relative_eq!(Volume::new(&hull).execute(), 1.0 / 6.0, epsilon = 1e-12);
    }

    #[test]
    fn empty_hull_has_no_volume() {
        let hull = ConvexHull::new(Vec::new(), Vec::new());
        assert_relative_eq!(Volume::new(&hull).execute(), 0.0);
    }
}
