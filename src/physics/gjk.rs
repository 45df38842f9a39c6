// Distributed under the GNU Affero General Public License v3.0 or later.
// See accompanying file LICENSE or https://www.gnu.org/licenses/agpl-3.0.html for details.

use glam::DVec3;

use crate::math::{DEGENERATE_EPSILON, any_perpendicular};
use crate::physics::simplex::Simplex;
use crate::physics::support::{SupportMap, support_minkowski};
use crate::settings::GjkSettings;

pub const DEFAULT_MAX_ITERATIONS: usize = 64;

// Squared sine of the smallest angle (or normalized volume) still treated as
// non-degenerate. Relative, so it holds at any shape scale.
const EPSILON: f64 = DEGENERATE_EPSILON;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GjkHit {
    /// Simplex enclosing (or touching) the origin in Minkowski space.
    pub simplex: Simplex,
    pub iterations: usize,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GjkResult {
    Intersection(GjkHit),
    /// A support point failed to pass the origin: the shapes are disjoint.
    Separated,
    /// The iteration budget ran out before the origin was enclosed or
    /// excluded. Treated as no intersection.
    IterationLimit,
}

impl GjkResult {
    pub fn is_intersection(&self) -> bool {
        matches!(self, GjkResult::Intersection(_))
    }
}

/// Boolean overlap test between two convex shapes.
pub fn intersects<A, B>(a: &A, b: &B) -> bool
where
    A: SupportMap + ?Sized,
    B: SupportMap + ?Sized,
{
    gjk_intersect(a, b).is_intersection()
}

pub fn gjk_intersect<A, B>(a: &A, b: &B) -> GjkResult
where
    A: SupportMap + ?Sized,
    B: SupportMap + ?Sized,
{
    gjk_intersect_with_params(a, b, DEFAULT_MAX_ITERATIONS)
}

/// Runs GJK with the iteration budget from `settings`.
pub fn gjk_intersect_with_settings<A, B>(a: &A, b: &B, settings: &GjkSettings) -> GjkResult
where
    A: SupportMap + ?Sized,
    B: SupportMap + ?Sized,
{
    gjk_intersect_with_params(a, b, settings.max_iterations)
}

pub fn gjk_intersect_with_params<A, B>(a: &A, b: &B, max_iterations: usize) -> GjkResult
where
    A: SupportMap + ?Sized,
    B: SupportMap + ?Sized,
{
    let mut simplex = Simplex::new();
    let support = support_minkowski(a, b, DVec3::X);
    simplex.push(support);
    let mut direction = -support;

    for iteration in 1..=max_iterations {
        // Only a vertex reduction can zero the direction, which means the
        // origin is itself a Minkowski-difference point.
        if direction == DVec3::ZERO {
            return GjkResult::Intersection(GjkHit {
                simplex,
                iterations: iteration,
            });
        }

        let support = support_minkowski(a, b, direction);
        if support.dot(direction) < 0.0 {
            return GjkResult::Separated;
        }

        simplex.push(support);
        if support == DVec3::ZERO || handle_simplex(&mut simplex, &mut direction) {
            return GjkResult::Intersection(GjkHit {
                simplex,
                iterations: iteration,
            });
        }
    }

    log::debug!("GJK gave up after {max_iterations} iterations");
    GjkResult::IterationLimit
}

fn handle_simplex(simplex: &mut Simplex, direction: &mut DVec3) -> bool {
    match simplex.len() {
        2 => handle_line(simplex, direction),
        3 => handle_triangle(simplex, direction),
        4 => handle_tetrahedron(simplex, direction),
        _ => false,
    }
}

fn handle_line(simplex: &mut Simplex, direction: &mut DVec3) -> bool {
    let a = simplex[0];
    let b = simplex[1];
    let ab = b - a;
    let ao = -a;

    if ab.dot(ao) > 0.0 {
        *direction = perpendicular_toward(ab, ao);
    } else {
        simplex.set_point(a);
        *direction = ao;
    }
    false
}

fn handle_triangle(simplex: &mut Simplex, direction: &mut DVec3) -> bool {
    let a = simplex[0];
    let b = simplex[1];
    let c = simplex[2];
    let ab = b - a;
    let ac = c - a;
    let ao = -a;
    let abc = ab.cross(ac);

    // Collinear points have no face; keep the longer edge from `a`.
    if abc.length_squared() <= EPSILON * ab.length_squared() * ac.length_squared() {
        let far = if ab.length_squared() >= ac.length_squared() { b } else { c };
        simplex.set_line(a, far);
        return handle_line(simplex, direction);
    }

    if abc.cross(ac).dot(ao) > 0.0 {
        if ac.dot(ao) > 0.0 {
            simplex.set_line(a, c);
            *direction = perpendicular_toward(ac, ao);
        } else {
            simplex.set_line(a, b);
            return handle_line(simplex, direction);
        }
    } else if ab.cross(abc).dot(ao) > 0.0 {
        simplex.set_line(a, b);
        return handle_line(simplex, direction);
    } else if abc.dot(ao) > 0.0 {
        *direction = abc;
    } else {
        simplex.set_triangle(a, c, b);
        *direction = -abc;
    }
    false
}

fn handle_tetrahedron(simplex: &mut Simplex, direction: &mut DVec3) -> bool {
    let a = simplex[0];
    let b = simplex[1];
    let c = simplex[2];
    let d = simplex[3];

    // A flat tetrahedron has no inside; fall back to its newest face.
    let (ab, ac, ad) = (b - a, c - a, d - a);
    let volume = ab.dot(ac.cross(ad));
    if volume.abs() <= EPSILON * ab.length() * ac.length() * ad.length() {
        simplex.set_triangle(a, b, c);
        return handle_triangle(simplex, direction);
    }

    for (p, q, opposite) in [(b, c, d), (c, d, b), (d, b, c)] {
        if origin_outside_face(a, p, q, opposite) {
            simplex.set_triangle(a, p, q);
            return handle_triangle(simplex, direction);
        }
    }

    true
}

/// True when the origin is on the far side of face `a p q` from `opposite`.
fn origin_outside_face(a: DVec3, p: DVec3, q: DVec3, opposite: DVec3) -> bool {
    let mut normal = (p - a).cross(q - a);
    if normal.dot(opposite - a) > 0.0 {
        normal = -normal;
    }
    normal.dot(-a) > 0.0
}

/// `(edge x ao) x edge`: perpendicular to `edge`, pointing at the origin.
fn perpendicular_toward(edge: DVec3, ao: DVec3) -> DVec3 {
    let perpendicular = edge.cross(ao).cross(edge);
    let scale = edge.length_squared();
    if perpendicular.length_squared() <= EPSILON * scale * scale * ao.length_squared() {
        // Origin is on the edge's line; any perpendicular will do.
        any_perpendicular(edge)
    } else {
        perpendicular
    }
}
