// Distributed under the GNU Affero General Public License v3.0 or later.
// See accompanying file LICENSE or https://www.gnu.org/licenses/agpl-3.0.html for details.

use approx::AbsDiffEq;
use glam::{DMat4, DVec3, DVec4};

/// A half-space `dot(normal, p) >= offset`. The positive side is "in front".
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    normal: DVec3,
    offset: f64,
}

impl Plane {
    /// Builds a plane and rescales it so `normal` has unit length.
    /// A normal of (near) zero length is stored as given.
    pub fn new(normal: DVec3, offset: f64) -> Self {
        Self::from_raw(normal, offset).normalized()
    }

    /// Stores the coefficients without normalizing them. Signed distances
    /// from such a plane are only meaningful by sign until `normalized` is
    /// called.
    pub const fn from_raw(normal: DVec3, offset: f64) -> Self {
        Self { normal, offset }
    }

    pub fn from_point_normal(point: DVec3, normal: DVec3) -> Self {
        let normal = normal.normalize_or_zero();
        Self {
            normal,
            offset: normal.dot(point),
        }
    }

    /// Plane through three points, front side given by counter-clockwise winding.
    pub fn from_points(a: DVec3, b: DVec3, c: DVec3) -> Self {
        Self::from_point_normal(a, (b - a).cross(c - a))
    }

    pub fn normal(&self) -> DVec3 {
        self.normal
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    pub fn signed_distance(&self, point: DVec3) -> f64 {
        self.normal.dot(point) - self.offset
    }

    pub fn normalized(&self) -> Self {
        let length = self.normal.length();
        if length <= f64::EPSILON {
            return *self;
        }
        Self {
            normal: self.normal / length,
            offset: self.offset / length,
        }
    }

    pub fn flipped(&self) -> Self {
        Self {
            normal: -self.normal,
            offset: -self.offset,
        }
    }

    /// Transforms the plane by a precomputed inverse-transpose matrix.
    ///
    /// The plane is treated as the homogeneous row `(n, -offset)`. The result
    /// is left unnormalized so that applying a matrix and then its inverse
    /// reproduces the original coefficients.
    pub fn transformed_by_inverse_transpose(&self, inverse_transpose: &DMat4) -> Self {
        let coefficients = *inverse_transpose * self.normal.extend(-self.offset);
        Self::from_homogeneous(coefficients)
    }

    /// Builds a plane from `Ax + By + Cz + D = 0` coefficients.
    pub(crate) fn from_homogeneous(coefficients: DVec4) -> Self {
        Self::from_raw(coefficients.truncate(), -coefficients.w)
    }
}

impl AbsDiffEq for Plane {
    type Epsilon = f64;

    fn default_epsilon() -> Self::Epsilon {
        f64::EPSILON
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.normal.abs_diff_eq(other.normal, epsilon)
            && (self.offset - other.offset).abs() <= epsilon
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    #[test]
    fn new_normalizes_normal_and_offset() {
        let plane = Plane::new(DVec3::new(0.0, 2.0, 0.0), 4.0);
        assert_abs_diff_eq!(plane.normal(), DVec3::Y);
        assert_relative_eq!(plane.offset(), 2.0);
    }

    #[test]
    fn raw_plane_keeps_coefficients() {
        let plane = Plane::from_raw(DVec3::new(0.0, 0.0, 3.0), 6.0);
        assert_eq!(plane.normal(), DVec3::new(0.0, 0.0, 3.0));
        assert_eq!(plane.offset(), 6.0);
        // Sign is preserved, metric is not.
        assert_relative_eq!(plane.signed_distance(DVec3::new(0.0, 0.0, 3.0)), 3.0);
        assert_relative_eq!(
            plane.normalized().signed_distance(DVec3::new(0.0, 0.0, 3.0)),
            1.0
        );
    }

    #[test]
    fn zero_normal_is_left_unchanged() {
        let plane = Plane::new(DVec3::ZERO, 1.5);
        assert_eq!(plane.normal(), DVec3::ZERO);
        assert_eq!(plane.offset(), 1.5);
        assert!(plane.normalized().offset().is_finite());
    }

    #[test]
    fn from_points_uses_counter_clockwise_front() {
        let plane = Plane::from_points(
            DVec3::new(0.0, 0.0, 1.0),
            DVec3::new(1.0, 0.0, 1.0),
            DVec3::new(0.0, 1.0, 1.0),
        );
        assert_abs_diff_eq!(plane.normal(), DVec3::Z);
        assert_relative_eq!(plane.offset(), 1.0);
        assert!(plane.signed_distance(DVec3::new(0.0, 0.0, 5.0)) > 0.0);
    }

    #[test]
    fn translation_moves_plane() {
        let plane = Plane::from_point_normal(DVec3::ZERO, DVec3::X);
        let m = DMat4::from_translation(DVec3::new(3.0, 0.0, 0.0));
        let moved = plane.transformed_by_inverse_transpose(&m.inverse().transpose());
        assert_abs_diff_eq!(moved.normal(), DVec3::X, epsilon = 1e-12);
        assert_relative_eq!(moved.offset(), 3.0, epsilon = 1e-12);
    }
}
