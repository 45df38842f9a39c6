// Distributed under the GNU Affero General Public License v3.0 or later.
// See accompanying file LICENSE or https://www.gnu.org/licenses/agpl-3.0.html for details.

//! Closed-form predicates and distance queries shared by the shapes.
//!
//! Everything here is pure and allocation-free. Frustum tests take the plane
//! set as a slice so callers can pass any array of inward-facing planes.

use glam::DVec3;

use crate::math::DEGENERATE_EPSILON;
use crate::shapes::{Aabb, Plane};

/// Where a volume lies relative to a plane's front side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaneSide {
    Front,
    Back,
    Straddling,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentClosestPoints {
    /// Parameter along the first segment.
    pub s: f64,
    /// Parameter along the second segment.
    pub t: f64,
    pub on_first: DVec3,
    pub on_second: DVec3,
    pub distance_squared: f64,
}

pub fn point_in_frustum(planes: &[Plane], point: DVec3) -> bool {
    planes.iter().all(|plane| plane.signed_distance(point) >= 0.0)
}

pub fn sphere_intersects_frustum(planes: &[Plane], center: DVec3, radius: f64) -> bool {
    planes
        .iter()
        .all(|plane| plane.signed_distance(center) >= -radius)
}

/// Conservative test: only rejects the box when a single plane has it
/// entirely behind.
pub fn aabb_intersects_frustum(planes: &[Plane], aabb: &Aabb) -> bool {
    planes
        .iter()
        .all(|plane| classify_aabb_plane(aabb, plane) != PlaneSide::Back)
}

pub fn classify_aabb_plane(aabb: &Aabb, plane: &Plane) -> PlaneSide {
    let center = aabb.center();
    let extents = aabb.half_extents();
    let radius = extents.dot(plane.normal().abs());
    let distance = plane.signed_distance(center);

    if distance > radius {
        PlaneSide::Front
    } else if distance < -radius {
        PlaneSide::Back
    } else {
        PlaneSide::Straddling
    }
}

/// Intersection of the segment `start..end` with a plane, as `(t, point)`.
/// Segments parallel to the plane or not reaching it yield `None`.
pub fn segment_plane(start: DVec3, end: DVec3, plane: &Plane) -> Option<(f64, DVec3)> {
    let direction = end - start;
    let denom = plane.normal().dot(direction);
    if denom.abs() < DEGENERATE_EPSILON {
        return None;
    }

    let t = (plane.offset() - plane.normal().dot(start)) / denom;
    if !(0.0..=1.0).contains(&t) {
        return None;
    }
    Some((t, start + direction * t))
}

/// Closest point on `a..b` to `point`, as `(t, point)`. A zero-length segment
/// reports `t = 0`.
pub fn closest_point_on_segment(point: DVec3, a: DVec3, b: DVec3) -> (f64, DVec3) {
    let ab = b - a;
    let length_squared = ab.length_squared();
    if length_squared < DEGENERATE_EPSILON * DEGENERATE_EPSILON {
        return (0.0, a);
    }

    let t = ((point - a).dot(ab) / length_squared).clamp(0.0, 1.0);
    (t, a + ab * t)
}

pub fn point_segment_distance_squared(point: DVec3, a: DVec3, b: DVec3) -> f64 {
    let (_, closest) = closest_point_on_segment(point, a, b);
    point.distance_squared(closest)
}

pub fn closest_points_between_segments(
    p1: DVec3,
    q1: DVec3,
    p2: DVec3,
    q2: DVec3,
) -> SegmentClosestPoints {
    const EPSILON_SQUARED: f64 = DEGENERATE_EPSILON * DEGENERATE_EPSILON;

    let d1 = q1 - p1;
    let d2 = q2 - p2;
    let r = p1 - p2;
    let a = d1.length_squared();
    let e = d2.length_squared();
    let f = d2.dot(r);

    let (s, t) = if a <= EPSILON_SQUARED && e <= EPSILON_SQUARED {
        (0.0, 0.0)
    } else if a <= EPSILON_SQUARED {
        (0.0, (f / e).clamp(0.0, 1.0))
    } else {
        let c = d1.dot(r);
        if e <= EPSILON_SQUARED {
            ((-c / a).clamp(0.0, 1.0), 0.0)
        } else {
            let b = d1.dot(d2);
            let denom = a * e - b * b;
            // Parallel segments: any s works, start from the first endpoint.
            let s = if denom > EPSILON_SQUARED {
                ((b * f - c * e) / denom).clamp(0.0, 1.0)
            } else {
                0.0
            };
            let t = (b * s + f) / e;
            if t < 0.0 {
                ((-c / a).clamp(0.0, 1.0), 0.0)
            } else if t > 1.0 {
                (((b - c) / a).clamp(0.0, 1.0), 1.0)
            } else {
                (s, t)
            }
        }
    };

    let on_first = p1 + d1 * s;
    let on_second = p2 + d2 * t;
    SegmentClosestPoints {
        s,
        t,
        on_first,
        on_second,
        distance_squared: on_first.distance_squared(on_second),
    }
}

/// Separating-axis overlap test for two triangles. Touching counts as overlap.
///
/// Candidate axes are both face normals, the nine edge-edge cross products and
/// the in-plane normal of every edge, which also covers coplanar pairs.
pub fn triangles_overlap(a: &[DVec3; 3], b: &[DVec3; 3]) -> bool {
    let edges_a = [a[1] - a[0], a[2] - a[1], a[0] - a[2]];
    let edges_b = [b[1] - b[0], b[2] - b[1], b[0] - b[2]];
    let normal_a = edges_a[0].cross(a[2] - a[0]);
    let normal_b = edges_b[0].cross(b[2] - b[0]);

    let face_axes = [normal_a, normal_b];
    let cross_axes = edges_a
        .iter()
        .flat_map(|ea| edges_b.iter().map(move |eb| ea.cross(*eb)));
    let in_plane_axes = edges_a
        .iter()
        .map(|e| normal_a.cross(*e))
        .chain(edges_b.iter().map(|e| normal_b.cross(*e)));

    let mut axes = face_axes.into_iter().chain(cross_axes).chain(in_plane_axes);
    !axes.any(|axis| separates(axis, a, b))
}

fn separates(axis: DVec3, a: &[DVec3; 3], b: &[DVec3; 3]) -> bool {
    if axis.length_squared() < DEGENERATE_EPSILON * DEGENERATE_EPSILON {
        return false;
    }
    let (min_a, max_a) = project(axis, a);
    let (min_b, max_b) = project(axis, b);
    max_a < min_b || max_b < min_a
}

fn project(axis: DVec3, vertices: &[DVec3; 3]) -> (f64, f64) {
    vertices
        .iter()
        .map(|v| axis.dot(*v))
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), d| {
            (min.min(d), max.max(d))
        })
}
