use crate::math::{cmp_zxy, is_zero, signed_distance, triangle_normal, Point3, Vector3};

/// Picks the point that closes the open edge `a → b` of a face whose
/// outward normal is `normal`.
///
/// The half-plane bounded by the edge is rotated outward around it; the
/// winning plane is the first one to touch a candidate. Candidates flush
/// with the face and across the edge keep the face's own plane. Points on
/// the near side of that plane and points on the line through `a` and `b`
/// never win.
///
/// When the winning plane holds more points they form a flat facet of the
/// hull. Every such facet is triangulated as a fan from its lowest point in
/// `(z, x, y)` order, and the point returned closes the fan triangle across
/// `a → b`. The answer depends only on the facet, so faces on either side
/// of a shared edge agree however the facet is entered.
pub(crate) fn select_wrap_point(
    points: &[Point3],
    candidates: &[usize],
    a: usize,
    b: usize,
    normal: &Vector3,
    eps: f64,
) -> Option<usize> {
    let pa = &points[a];
    let pb = &points[b];
    let ab = pb - pa;

    let mut flush = None;
    let mut best: Option<(usize, Vector3)> = None;
    for &i in candidates {
        let n_i = triangle_normal(pa, pb, &points[i]);
        if is_zero(&n_i, eps) {
            continue;
        }
        if signed_distance(&points[i], pa, normal).abs() <= eps {
            if n_i.dot(normal) < -eps {
                flush = Some(i);
                break;
            }
            continue;
        }
        let hinge = ab.cross(&n_i);
        let turns_further = match &best {
            None => true,
            Some((_, h)) => ab.dot(&hinge.cross(h)) > eps,
        };
        if turns_further {
            best = Some((i, hinge));
        }
    }

    let anchor = match flush {
        Some(i) => i,
        None => best?.0,
    };
    let facet = Facet {
        points,
        candidates,
        a,
        b,
        plane: triangle_normal(pb, pa, &points[anchor]),
        side: triangle_normal(pa, pb, &points[anchor]),
        eps,
    };

    let apex = candidates
        .iter()
        .copied()
        .chain([a, b])
        .filter(|&i| facet.contains(i))
        .min_by(|&i, &j| cmp_zxy(&points[i], &points[j]).then(i.cmp(&j)))?;
    let c = if apex == a {
        facet.corner(b, anchor)
    } else if apex != b && facet.is_across(apex) {
        apex
    } else {
        facet.corner(a, anchor)
    };
    Some(c)
}

/// The points sharing the plane of a new face `(b, a, anchor)`.
struct Facet<'a> {
    points: &'a [Point3],
    candidates: &'a [usize],
    a: usize,
    b: usize,
    /// Outward normal of the new face.
    plane: Vector3,
    /// Normal of `(a, b, anchor)`.
    side: Vector3,
    eps: f64,
}

impl Facet<'_> {
    fn contains(&self, i: usize) -> bool {
        let origin = &self.points[self.a];
        signed_distance(&self.points[i], origin, &self.plane).abs() <= self.eps
    }

    /// Whether `i` lies strictly on the new face's side of the line `a b`.
    fn is_across(&self, i: usize) -> bool {
        let n_i = triangle_normal(&self.points[self.a], &self.points[self.b], &self.points[i]);
        !is_zero(&n_i, self.eps) && n_i.dot(&self.side) > 0.0
    }

    /// The facet corner next to `pivot` (one of `a`, `b`) on the new face's
    /// side: every point across the edge lies between the ray towards the
    /// other endpoint and the ray towards the corner. On a collinear tie
    /// the farthest point is the corner.
    fn corner(&self, pivot: usize, anchor: usize) -> usize {
        let sense = if pivot == self.a { 1.0 } else { -1.0 };
        let origin = &self.points[pivot];
        let mut c = anchor;
        for &i in self.candidates {
            if i == c || !self.contains(i) || !self.is_across(i) {
                continue;
            }
            let oc = self.points[c] - origin;
            let oi = self.points[i] - origin;
            let turn = sense * oc.cross(&oi).dot(&self.plane);
            let farther = turn.abs() <= self.eps
                && oi.dot(&oc) > 0.0
                && oi.norm_squared() > oc.norm_squared();
            if turn < -self.eps || farther {
                c = i;
            }
        }
        c
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    #[test]
    fn closes_tetrahedron_edge() {
        // Face (0, 1, 2) looks up +z; the only other point is below it.
        let points = vec![
            p(0.0, 0.0, 0.0),
            p(1.0, 0.0, 0.0),
            p(0.0, 1.0, 0.0),
            p(0.0, 0.0, -1.0),
        ];
        let normal = Vector3::new(0.0, 0.0, 1.0);
        let all = [0, 1, 2, 3];
        assert_eq!(
            select_wrap_point(&points, &all, 0, 1, &normal, EPS),
            Some(3)
        );
        // Scan order does not matter.
        assert_eq!(
            select_wrap_point(&points, &[3, 2, 1, 0], 0, 1, &normal, EPS),
            Some(3)
        );
    }

    #[test]
    fn picks_widest_turn() {
        // Both 3 and 4 lie below face (0, 1, 2); the hull face across edge
        // 0→1 must keep the other one inside.
        let points = vec![
            p(0.0, 0.0, 0.0),
            p(1.0, 0.0, 0.0),
            p(0.0, 1.0, 0.0),
            p(0.0, 0.5, -1.0),
            p(0.0, -1.0, -1.0),
        ];
        let normal = Vector3::new(0.0, 0.0, 1.0);
        let chosen =
            select_wrap_point(&points, &[0, 1, 2, 3, 4], 0, 1, &normal, EPS);
        assert_eq!(chosen, Some(4));
        let chosen =
            select_wrap_point(&points, &[4, 3, 2, 1, 0], 0, 1, &normal, EPS);
        assert_eq!(chosen, Some(4));
    }

    #[test]
    fn flush_point_across_edge_wins() {
        // Square in the z = 0 plane: across edge 0→1 of face (0, 1, 2) lies 3.
        let points = vec![
            p(0.0, 0.0, 0.0),
            p(1.0, 1.0, 0.0),
            p(0.0, 1.0, 0.0),
            p(1.0, 0.0, 0.0),
            p(0.5, 0.5, -1.0),
        ];
        let normal = triangle_normal(&points[0], &points[1], &points[2]);
        let chosen =
            select_wrap_point(&points, &[0, 1, 2, 4, 3], 0, 1, &normal, EPS);
        assert_eq!(chosen, Some(3));
    }

    #[test]
    fn flush_facet_resolves_to_a_corner() {
        // Across edge 0→1 the z = 0 plane holds a 2x2 square with points on
        // its sides and in its middle. Its lowest point, 8, is the fan apex.
        let points = vec![
            p(0.0, 0.0, 0.0),
            p(2.0, 0.0, 0.0),
            p(1.0, 1.0, 0.0),
            p(1.0, -1.0, 0.0),
            p(2.0, -1.0, 0.0),
            p(1.0, -2.0, 0.0),
            p(0.0, -1.0, 0.0),
            p(2.0, -2.0, 0.0),
            p(0.0, -2.0, 0.0),
            p(1.0, -1.0, -1.0),
        ];
        let normal = Vector3::new(0.0, 0.0, 1.0);
        let forward: Vec<usize> = (0..points.len()).collect();
        let backward: Vec<usize> = forward.iter().rev().copied().collect();
        assert_eq!(select_wrap_point(&points, &forward, 0, 1, &normal, EPS), Some(8));
        assert_eq!(select_wrap_point(&points, &backward, 0, 1, &normal, EPS), Some(8));
    }

    fn square_with_extras() -> Vec<Point3> {
        vec![
            p(0.0, 0.0, 0.0),
            p(0.0, 2.0, 0.0),
            p(1.0, 1.0, 0.0),
            p(2.0, 1.0, 0.0),
            p(1.0, 2.0, 0.0),
            p(2.0, 2.0, 0.0),
            p(2.0, 0.0, 0.0),
        ]
    }

    #[test]
    fn fan_apex_on_the_edge_walks_to_the_far_corner() {
        // 0 is the facet's lowest point; across 0→1 the fan triangle is
        // (1, 0, 5), skipping 4 on the side from 1 to 5.
        let mut points = square_with_extras();
        points.push(p(1.0, 1.0, -1.0));
        let normal = Vector3::new(0.0, 0.0, 1.0);
        for candidates in [[0, 1, 2, 3, 4, 5, 6, 7], [7, 6, 5, 4, 3, 2, 1, 0], [4, 2, 7, 3, 6, 5, 1, 0]] {
            assert_eq!(
                select_wrap_point(&points, &candidates, 0, 1, &normal, EPS),
                Some(5)
            );
        }

        // The same facet entered through the reversed edge closes the same
        // triangle.
        let mut points = square_with_extras();
        points.push(p(1.0, 1.0, 1.0));
        let normal = Vector3::new(0.0, 0.0, -1.0);
        for candidates in [[0, 1, 2, 3, 4, 5, 6, 7], [7, 6, 5, 4, 3, 2, 1, 0]] {
            assert_eq!(
                select_wrap_point(&points, &candidates, 1, 0, &normal, EPS),
                Some(5)
            );
        }
    }

    #[test]
    fn tied_plane_closes_its_fan_triangle() {
        // Nothing lies at y > 0, so the plane y = 0 wins. Its lowest point is
        // 0; 3 lies on the side from 0 to 4 and 6 inside the facet.
        let points = vec![
            p(0.0, 0.0, 0.0),
            p(1.0, 0.0, 0.0),
            p(0.0, -1.0, 0.0),
            p(0.0, 0.0, 1.0),
            p(0.0, 0.0, 2.0),
            p(1.0, 0.0, 1.0),
            p(0.5, 0.0, 0.5),
            p(0.5, -0.5, 1.0),
        ];
        let normal = Vector3::new(0.0, 0.0, -1.0);
        for candidates in [[0, 1, 2, 3, 4, 5, 6, 7], [7, 6, 5, 4, 3, 2, 1, 0], [5, 6, 3, 7, 4, 0, 1, 2]] {
            assert_eq!(
                select_wrap_point(&points, &candidates, 0, 1, &normal, EPS),
                Some(5)
            );
        }
    }

    #[test]
    fn collinear_candidates_are_skipped() {
        let points = vec![p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0), p(2.0, 0.0, 0.0)];
        let normal = Vector3::new(0.0, 0.0, 1.0);
        assert_eq!(
            select_wrap_point(&points, &[0, 1, 2], 0, 1, &normal, EPS),
            None
        );
    }
}
