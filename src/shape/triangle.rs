//! Definition of the triangle shape.

use crate::math::{Isometry, Point, Real, UnitVector, Vector, DEFAULT_EPSILON};
use crate::shape::Segment;

/// A triangle shape.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(PartialEq, Debug, Copy, Clone)]
pub struct Triangle {
    /// The triangle first point.
    pub a: Point<Real>,
    /// The triangle second point.
    pub b: Point<Real>,
    /// The triangle third point.
    pub c: Point<Real>,
}

impl From<[Point<Real>; 3]> for Triangle {
    fn from(arr: [Point<Real>; 3]) -> Self {
        Triangle::new(arr[0], arr[1], arr[2])
    }
}

impl Triangle {
    /// Creates a triangle from three points.
    #[inline]
    pub fn new(a: Point<Real>, b: Point<Real>, c: Point<Real>) -> Triangle {
        Triangle { a, b, c }
    }

    /// Returns a new triangle with vertices transformed by `m`.
    #[inline]
    pub fn transformed(&self, m: &Isometry<Real>) -> Self {
        Triangle::new(m * self.a, m * self.b, m * self.c)
    }

    /// An array containing the three vertices of this triangle.
    #[inline]
    pub fn vertices(&self) -> [Point<Real>; 3] {
        [self.a, self.b, self.c]
    }

    /// The three edges of this triangle: [AB, BC, CA].
    #[inline]
    pub fn edges(&self) -> [Segment; 3] {
        [
            Segment::new(self.a, self.b),
            Segment::new(self.b, self.c),
            Segment::new(self.c, self.a),
        ]
    }

    /// The normal of this triangle assuming it is oriented ccw.
    ///
    /// The normal points such that it is collinear to `AB × AC` (where `×` denotes the cross
    /// product). Returns `None` for degenerate triangles.
    #[inline]
    pub fn normal(&self) -> Option<UnitVector<Real>> {
        UnitVector::try_new(self.scaled_normal(), DEFAULT_EPSILON)
    }

    /// A vector normal of this triangle.
    ///
    /// The vector points such that it is collinear to `AB × AC` (where `×` denotes the cross
    /// product).
    #[inline]
    pub fn scaled_normal(&self) -> Vector<Real> {
        let ab = self.b - self.a;
        let ac = self.c - self.a;
        ab.cross(&ac)
    }

    /// The center of this triangle.
    #[inline]
    pub fn center(&self) -> Point<Real> {
        Point::from((self.a.coords + self.b.coords + self.c.coords) / 3.0)
    }

    /// Computes the point of this triangle closest to `pt`.
    ///
    /// The triangle is handled as a solid surface: the projection is searched among its
    /// vertices, its edges, and its interior.
    pub fn project_local_point(&self, pt: &Point<Real>) -> Point<Real> {
        // Voronoi regions, as in Real-time collision detection by Christer Ericson.
        let ab = self.b - self.a;
        let ac = self.c - self.a;
        let ap = pt - self.a;

        let d1 = ab.dot(&ap);
        let d2 = ac.dot(&ap);
        if d1 <= 0.0 && d2 <= 0.0 {
            return self.a;
        }

        let bp = pt - self.b;
        let d3 = ab.dot(&bp);
        let d4 = ac.dot(&bp);
        if d3 >= 0.0 && d4 <= d3 {
            return self.b;
        }

        let vc = d1 * d4 - d3 * d2;
        if vc <= 0.0 && d1 >= 0.0 && d3 <= 0.0 {
            let v = d1 / (d1 - d3);
            return self.a + ab * v;
        }

        let cp = pt - self.c;
        let d5 = ab.dot(&cp);
        let d6 = ac.dot(&cp);
        if d6 >= 0.0 && d5 <= d6 {
            return self.c;
        }

        let vb = d5 * d2 - d1 * d6;
        if vb <= 0.0 && d2 >= 0.0 && d6 <= 0.0 {
            let w = d2 / (d2 - d6);
            return self.a + ac * w;
        }

        let va = d3 * d6 - d5 * d4;
        if va <= 0.0 && (d4 - d3) >= 0.0 && (d5 - d6) >= 0.0 {
            let w = (d4 - d3) / ((d4 - d3) + (d5 - d6));
            return self.b + (self.c - self.b) * w;
        }

        let denom = va + vb + vc;
        if denom.abs() <= DEFAULT_EPSILON {
            // Degenerate triangle: fall back to the closest edge.
            return self
                .edges()
                .iter()
                .map(|e| e.project_local_point(pt))
                .min_by(|p1, p2| {
                    na::distance_squared(p1, pt).total_cmp(&na::distance_squared(p2, pt))
                })
                .unwrap_or(self.a);
        }

        let v = vb / denom;
        let w = vc / denom;
        self.a + ab * v + ac * w
    }

    /// Computes the closest points between this triangle and a segment expressed in the same
    /// frame.
    ///
    /// Returns the point on the triangle first and the point on the segment second. Both are
    /// equal if the segment crosses the triangle.
    pub fn closest_points_with_segment(&self, seg: &Segment) -> (Point<Real>, Point<Real>) {
        if let Some(normal) = self.normal() {
            let da = (seg.a - self.a).dot(&normal);
            let db = (seg.b - self.a).dot(&normal);

            if da * db <= 0.0 && da != db {
                let t = da / (da - db);
                let hit = seg.a + (seg.b - seg.a) * t;
                let inside = self
                    .edges()
                    .iter()
                    .all(|e| e.scaled_direction().cross(&(hit - e.a)).dot(&normal) >= 0.0);

                if inside {
                    return (hit, hit);
                }
            }
        }

        let mut best = (Real::MAX, self.a, seg.a);

        for edge in self.edges() {
            let (p_edge, p_seg) = edge.closest_points(seg);
            let dist = na::distance_squared(&p_edge, &p_seg);
            if dist < best.0 {
                best = (dist, p_edge, p_seg);
            }
        }

        for pt in [seg.a, seg.b] {
            let proj = self.project_local_point(&pt);
            let dist = na::distance_squared(&proj, &pt);
            if dist < best.0 {
                best = (dist, proj, pt);
            }
        }

        (best.1, best.2)
    }
}
