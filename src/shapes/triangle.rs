// Distributed under the GNU Affero General Public License v3.0 or later.
// See accompanying file LICENSE or https://www.gnu.org/licenses/agpl-3.0.html for details.

use glam::{DMat4, DVec3};
use rand::Rng;

use crate::error::GeometryError;
use crate::intersection;
use crate::math::DEGENERATE_EPSILON;
use crate::physics::SupportMap;
use crate::shapes::{LineSegment, Plane};

/// Three points in space. Nothing is cached and zero-area triangles are
/// allowed; every query has a defined answer for them.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub v0: DVec3,
    pub v1: DVec3,
    pub v2: DVec3,
}

impl Triangle {
    pub fn new(v0: DVec3, v1: DVec3, v2: DVec3) -> Self {
        Self { v0, v1, v2 }
    }

    pub fn vertices(&self) -> [DVec3; 3] {
        [self.v0, self.v1, self.v2]
    }

    pub fn vertex(&self, index: usize) -> Result<DVec3, GeometryError> {
        self.vertices()
            .get(index)
            .copied()
            .ok_or(GeometryError::VertexIndex(index))
    }

    /// Edge `index` runs v0→v1, v1→v2 and v2→v0 for 0, 1 and 2.
    pub fn edge(&self, index: usize) -> Result<LineSegment, GeometryError> {
        match index {
            0 => Ok(LineSegment::new(self.v0, self.v1)),
            1 => Ok(LineSegment::new(self.v1, self.v2)),
            2 => Ok(LineSegment::new(self.v2, self.v0)),
            _ => Err(GeometryError::EdgeIndex(index)),
        }
    }

    /// `(v1 - v0) x (v2 - v0)`; its length is twice the area.
    pub fn unnormalized_normal(&self) -> DVec3 {
        (self.v1 - self.v0).cross(self.v2 - self.v0)
    }

    /// Unit normal, or zero for a degenerate triangle.
    pub fn normal(&self) -> DVec3 {
        if self.is_degenerate() {
            return DVec3::ZERO;
        }
        self.unnormalized_normal().normalize()
    }

    pub fn area(&self) -> f64 {
        self.unnormalized_normal().length() * 0.5
    }

    pub fn centroid(&self) -> DVec3 {
        (self.v0 + self.v1 + self.v2) / 3.0
    }

    pub fn perimeter(&self) -> f64 {
        self.v0.distance(self.v1) + self.v1.distance(self.v2) + self.v2.distance(self.v0)
    }

    pub fn is_degenerate(&self) -> bool {
        self.unnormalized_normal().length_squared() < DEGENERATE_EPSILON * DEGENERATE_EPSILON
    }

    /// Weights `(w0, w1, w2)` with `point = w0*v0 + w1*v1 + w2*v2` for the
    /// projection of `point` onto the triangle's plane. Degenerate triangles
    /// report the centroid weights.
    pub fn barycentric(&self, point: DVec3) -> DVec3 {
        if self.is_degenerate() {
            return DVec3::splat(1.0 / 3.0);
        }

        let e0 = self.v1 - self.v0;
        let e1 = self.v2 - self.v0;
        let ep = point - self.v0;
        let d00 = e0.dot(e0);
        let d01 = e0.dot(e1);
        let d11 = e1.dot(e1);
        let d20 = ep.dot(e0);
        let d21 = ep.dot(e1);
        let denom = d00 * d11 - d01 * d01;

        let w1 = (d11 * d20 - d01 * d21) / denom;
        let w2 = (d00 * d21 - d01 * d20) / denom;
        DVec3::new(1.0 - w1 - w2, w1, w2)
    }

    /// True when `point` lies on the triangle within `epsilon`, both off the
    /// plane and outside the edges.
    pub fn contains_point(&self, point: DVec3, epsilon: f64) -> bool {
        if self.is_degenerate() {
            return self.closest_point(point).distance_squared(point) <= epsilon * epsilon;
        }
        if self.plane().signed_distance(point).abs() > epsilon {
            return false;
        }
        self.barycentric(point).cmpge(DVec3::splat(-epsilon)).all()
    }

    /// Closest point on the (filled) triangle to `point`.
    pub fn closest_point(&self, point: DVec3) -> DVec3 {
        if self.is_degenerate() {
            return self.closest_point_on_edges(point);
        }

        let (a, b, c) = (self.v0, self.v1, self.v2);
        let ab = b - a;
        let ac = c - a;

        let ap = point - a;
        let d1 = ab.dot(ap);
        let d2 = ac.dot(ap);
        if d1 <= 0.0 && d2 <= 0.0 {
            return a;
        }

        let bp = point - b;
        let d3 = ab.dot(bp);
        let d4 = ac.dot(bp);
        if d3 >= 0.0 && d4 <= d3 {
            return b;
        }

        let vc = d1 * d4 - d3 * d2;
        if vc <= 0.0 && d1 >= 0.0 && d3 <= 0.0 {
            return a + ab * (d1 / (d1 - d3));
        }

        let cp = point - c;
        let d5 = ab.dot(cp);
        let d6 = ac.dot(cp);
        if d6 >= 0.0 && d5 <= d6 {
            return c;
        }

        let vb = d5 * d2 - d1 * d6;
        if vb <= 0.0 && d2 >= 0.0 && d6 <= 0.0 {
            return a + ac * (d2 / (d2 - d6));
        }

        let va = d3 * d6 - d5 * d4;
        if va <= 0.0 && (d4 - d3) >= 0.0 && (d5 - d6) >= 0.0 {
            let w = (d4 - d3) / ((d4 - d3) + (d5 - d6));
            return b + (c - b) * w;
        }

        let denom = 1.0 / (va + vb + vc);
        a + ab * (vb * denom) + ac * (vc * denom)
    }

    fn closest_point_on_edges(&self, point: DVec3) -> DVec3 {
        [(self.v0, self.v1), (self.v1, self.v2), (self.v2, self.v0)]
            .into_iter()
            .map(|(start, end)| intersection::closest_point_on_segment(point, start, end).1)
            .min_by(|p, q| {
                p.distance_squared(point)
                    .total_cmp(&q.distance_squared(point))
            })
            .unwrap_or(self.v0)
    }

    /// Supporting plane, front side on the counter-clockwise face. A
    /// degenerate triangle yields a plane with a zero normal.
    pub fn plane(&self) -> Plane {
        Plane::from_point_normal(self.v0, self.unnormalized_normal())
    }

    pub fn circumcenter(&self) -> DVec3 {
        if self.is_degenerate() {
            return self.centroid();
        }
        let ab = self.v1 - self.v0;
        let ac = self.v2 - self.v0;
        let n = ab.cross(ac);
        let numerator = n.cross(ab) * ac.length_squared() + ac.cross(n) * ab.length_squared();
        self.v0 + numerator / (2.0 * n.length_squared())
    }

    pub fn circumradius(&self) -> f64 {
        if self.is_degenerate() {
            return 0.0;
        }
        self.circumcenter().distance(self.v0)
    }

    pub fn incenter(&self) -> DVec3 {
        if self.is_degenerate() {
            return self.centroid();
        }
        let a = self.v1.distance(self.v2);
        let b = self.v2.distance(self.v0);
        let c = self.v0.distance(self.v1);
        (self.v0 * a + self.v1 * b + self.v2 * c) / (a + b + c)
    }

    pub fn inradius(&self) -> f64 {
        if self.is_degenerate() {
            return 0.0;
        }
        2.0 * self.area() / self.perimeter()
    }

    pub fn intersects_triangle(&self, other: &Triangle) -> bool {
        intersection::triangles_overlap(&self.vertices(), &other.vertices())
    }

    /// Maps two uniform variates in `[0, 1)` to a point distributed uniformly
    /// over the triangle's area.
    pub fn sample_uniform(&self, u: f64, v: f64) -> DVec3 {
        let root = u.sqrt();
        let b1 = 1.0 - root;
        let b2 = v * root;
        self.v0 * (1.0 - b1 - b2) + self.v1 * b1 + self.v2 * b2
    }

    pub fn sample_random<R: Rng + ?Sized>(&self, rng: &mut R) -> DVec3 {
        let u: f64 = rng.random();
        let v: f64 = rng.random();
        self.sample_uniform(u, v)
    }

    pub fn sample_points<R: Rng + ?Sized>(&self, count: usize, rng: &mut R) -> Vec<DVec3> {
        (0..count).map(|_| self.sample_random(rng)).collect()
    }

    /// Same triangle with the opposite winding.
    pub fn flipped(&self) -> Self {
        Self {
            v0: self.v0,
            v1: self.v2,
            v2: self.v1,
        }
    }

    pub fn transformed(&self, matrix: &DMat4) -> Self {
        Self {
            v0: matrix.transform_point3(self.v0),
            v1: matrix.transform_point3(self.v1),
            v2: matrix.transform_point3(self.v2),
        }
    }
}

impl SupportMap for Triangle {
    fn support(&self, direction: DVec3) -> DVec3 {
        let dot0 = self.v0.dot(direction);
        let dot1 = self.v1.dot(direction);
        let dot2 = self.v2.dot(direction);

        if dot0 >= dot1 && dot0 >= dot2 {
            self.v0
        } else if dot1 >= dot2 {
            self.v1
        } else {
            self.v2
        }
    }
}
