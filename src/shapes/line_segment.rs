// Distributed under the GNU Affero General Public License v3.0 or later.
// See accompanying file LICENSE or https://www.gnu.org/licenses/agpl-3.0.html for details.

use glam::{DMat4, DVec3};

use crate::error::GeometryError;
use crate::intersection::{self, SegmentClosestPoints};
use crate::math::DEGENERATE_EPSILON;
use crate::shapes::Plane;

#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct LineSegment {
    pub start: DVec3,
    pub end: DVec3,
}

impl LineSegment {
    pub fn new(start: DVec3, end: DVec3) -> Self {
        Self { start, end }
    }

    /// Unnormalized `end - start`.
    pub fn direction(&self) -> DVec3 {
        self.end - self.start
    }

    pub fn length(&self) -> f64 {
        self.direction().length()
    }

    pub fn length_squared(&self) -> f64 {
        self.direction().length_squared()
    }

    pub fn midpoint(&self) -> DVec3 {
        self.point_at(0.5)
    }

    pub fn point_at(&self, t: f64) -> DVec3 {
        self.start + self.direction() * t
    }

    pub fn is_degenerate(&self) -> bool {
        self.length_squared() < DEGENERATE_EPSILON * DEGENERATE_EPSILON
    }

    /// Parameter in `[0, 1]` of the point closest to `point`. Zero-length
    /// segments always report 0.
    pub fn closest_parameter(&self, point: DVec3) -> f64 {
        intersection::closest_point_on_segment(point, self.start, self.end).0
    }

    pub fn closest_point(&self, point: DVec3) -> DVec3 {
        intersection::closest_point_on_segment(point, self.start, self.end).1
    }

    pub fn distance_squared_to_point(&self, point: DVec3) -> f64 {
        intersection::point_segment_distance_squared(point, self.start, self.end)
    }

    pub fn distance_to_point(&self, point: DVec3) -> f64 {
        self.distance_squared_to_point(point).sqrt()
    }

    pub fn intersect_plane(&self, plane: &Plane) -> Option<DVec3> {
        intersection::segment_plane(self.start, self.end, plane).map(|(_, point)| point)
    }

    pub fn closest_points(&self, other: &LineSegment) -> SegmentClosestPoints {
        intersection::closest_points_between_segments(self.start, self.end, other.start, other.end)
    }

    pub fn distance_to_segment(&self, other: &LineSegment) -> f64 {
        self.closest_points(other).distance_squared.sqrt()
    }

    /// Grows the segment by `amount` at both ends. Zero-length segments have
    /// no direction to grow along and are returned unchanged.
    pub fn extended(&self, amount: f64) -> Self {
        if self.is_degenerate() {
            return *self;
        }
        let offset = self.direction().normalize() * amount;
        Self {
            start: self.start - offset,
            end: self.end + offset,
        }
    }

    pub fn reversed(&self) -> Self {
        Self {
            start: self.end,
            end: self.start,
        }
    }

    pub fn transformed(&self, matrix: &DMat4) -> Self {
        Self {
            start: matrix.transform_point3(self.start),
            end: matrix.transform_point3(self.end),
        }
    }

    /// Splits the segment into `segments` equal pieces, returning the
    /// `segments + 1` sample points from `start` to `end` inclusive.
    pub fn subdivide(&self, segments: usize) -> Result<Vec<DVec3>, GeometryError> {
        if segments == 0 {
            return Err(GeometryError::SubdivisionCount(segments));
        }
        let step = 1.0 / segments as f64;
        Ok((0..=segments)
            .map(|i| {
                if i == segments {
                    self.end
                } else {
                    self.point_at(i as f64 * step)
                }
            })
            .collect())
    }
}
