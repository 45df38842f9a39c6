// Distributed under the GNU Affero General Public License v3.0 or later.
// See accompanying file LICENSE or https://www.gnu.org/licenses/agpl-3.0.html for details.

use approx::AbsDiffEq;
use glam::{DMat4, DVec3};

use crate::error::GeometryError;
use crate::intersection::{self, PlaneSide};
use crate::math::{DEFAULT_EPSILON, DEGENERATE_EPSILON};
use crate::physics::SupportMap;
use crate::shapes::{Aabb, Plane, Sphere};

/// Slot of each plane inside a [`Frustum`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrustumPlane {
    Near = 0,
    Far = 1,
    Left = 2,
    Right = 3,
    Top = 4,
    Bottom = 5,
}

impl FrustumPlane {
    pub const ALL: [FrustumPlane; 6] = [
        FrustumPlane::Near,
        FrustumPlane::Far,
        FrustumPlane::Left,
        FrustumPlane::Right,
        FrustumPlane::Top,
        FrustumPlane::Bottom,
    ];

    pub fn index(self) -> usize {
        self as usize
    }
}

/// Plane triples whose intersections give the eight corners, in corner order.
const CORNER_PLANES: [[FrustumPlane; 3]; 8] = {
    use FrustumPlane::*;
    [
        [Near, Left, Bottom],
        [Near, Right, Bottom],
        [Near, Left, Top],
        [Near, Right, Top],
        [Far, Left, Bottom],
        [Far, Right, Bottom],
        [Far, Left, Top],
        [Far, Right, Top],
    ]
};

/// Corner index pairs for the twelve frustum edges.
const EDGES: [(usize, usize); 12] = [
    // near
    (0, 1),
    (1, 3),
    (3, 2),
    (2, 0),
    // far
    (4, 5),
    (5, 7),
    (7, 6),
    (6, 4),
    // sides
    (0, 4),
    (1, 5),
    (2, 6),
    (3, 7),
];

/// Six inward-facing planes bounding a view volume.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frustum {
    planes: [Plane; 6],
}

impl Frustum {
    /// Planes in [`FrustumPlane`] order.
    pub fn new(planes: [Plane; 6]) -> Self {
        Self { planes }
    }

    pub fn from_planes(planes: &[Plane]) -> Result<Self, GeometryError> {
        let planes: [Plane; 6] = planes
            .try_into()
            .map_err(|_| GeometryError::PlaneCount {
                found: planes.len(),
            })?;
        Ok(Self { planes })
    }

    /// Gribb/Hartmann extraction from a view-projection matrix with a
    /// zero-to-one depth range.
    ///
    /// The planes are returned as extracted, without normalization; call
    /// [`Frustum::normalize`] before using metric distances.
    pub fn from_matrix(view_projection: &DMat4) -> Self {
        let row0 = view_projection.row(0);
        let row1 = view_projection.row(1);
        let row2 = view_projection.row(2);
        let row3 = view_projection.row(3);

        Self {
            planes: [
                Plane::from_homogeneous(row2),
                Plane::from_homogeneous(row3 - row2),
                Plane::from_homogeneous(row3 + row0),
                Plane::from_homogeneous(row3 - row0),
                Plane::from_homogeneous(row3 - row1),
                Plane::from_homogeneous(row3 + row1),
            ],
        }
    }

    pub fn from_matrices(view: &DMat4, projection: &DMat4) -> Self {
        Self::from_matrix(&(*projection * *view))
    }

    /// Builds a perspective frustum from camera parameters. `vertical_fov` is
    /// the full vertical angle in radians. All normals come out unit length.
    pub fn from_camera(
        position: DVec3,
        forward: DVec3,
        up: DVec3,
        vertical_fov: f64,
        aspect_ratio: f64,
        near: f64,
        far: f64,
    ) -> Self {
        let forward = forward.normalize_or_zero();
        let right = forward.cross(up).normalize_or_zero();
        let up = right.cross(forward);

        let tan_vertical = (vertical_fov * 0.5).tan();
        let tan_horizontal = tan_vertical * aspect_ratio;

        // Edge directions of the view pyramid, each crossed with the axis
        // lying in its side plane.
        let left_edge = forward - right * tan_horizontal;
        let right_edge = forward + right * tan_horizontal;
        let top_edge = forward + up * tan_vertical;
        let bottom_edge = forward - up * tan_vertical;

        Self {
            planes: [
                Plane::from_point_normal(position + forward * near, forward),
                Plane::from_point_normal(position + forward * far, -forward),
                Plane::from_point_normal(position, left_edge.cross(up)),
                Plane::from_point_normal(position, up.cross(right_edge)),
                Plane::from_point_normal(position, top_edge.cross(right)),
                Plane::from_point_normal(position, right.cross(bottom_edge)),
            ],
        }
    }

    /// Axis-aligned box looking down +Z, from `near` to `far`.
    pub fn create_orthographic(
        left: f64,
        right: f64,
        bottom: f64,
        top: f64,
        near: f64,
        far: f64,
    ) -> Self {
        Self {
            planes: [
                Plane::new(DVec3::Z, near),
                Plane::new(DVec3::NEG_Z, -far),
                Plane::new(DVec3::X, left),
                Plane::new(DVec3::NEG_X, -right),
                Plane::new(DVec3::NEG_Y, -top),
                Plane::new(DVec3::Y, bottom),
            ],
        }
    }

    pub fn planes(&self) -> &[Plane; 6] {
        &self.planes
    }

    pub fn plane(&self, which: FrustumPlane) -> Plane {
        self.planes[which.index()]
    }

    pub fn contains(&self, point: DVec3) -> bool {
        intersection::point_in_frustum(&self.planes, point)
    }

    pub fn intersects_sphere(&self, sphere: &Sphere) -> bool {
        intersection::sphere_intersects_frustum(&self.planes, sphere.center, sphere.radius)
    }

    pub fn intersects_aabb(&self, aabb: &Aabb) -> bool {
        intersection::aabb_intersects_frustum(&self.planes, aabb)
    }

    /// Number of planes the point lies behind. Zero means inside.
    pub fn classify_point(&self, point: DVec3) -> usize {
        self.classify_point_with_epsilon(point, DEFAULT_EPSILON)
    }

    pub fn classify_point_with_epsilon(&self, point: DVec3, epsilon: f64) -> usize {
        self.planes
            .iter()
            .filter(|plane| plane.signed_distance(point) < -epsilon)
            .count()
    }

    /// Number of planes the sphere lies entirely behind.
    pub fn classify_sphere(&self, sphere: &Sphere) -> usize {
        self.classify_sphere_with_epsilon(sphere, DEFAULT_EPSILON)
    }

    pub fn classify_sphere_with_epsilon(&self, sphere: &Sphere, epsilon: f64) -> usize {
        self.planes
            .iter()
            .filter(|plane| plane.signed_distance(sphere.center) < -sphere.radius - epsilon)
            .count()
    }

    /// Number of planes the box lies entirely behind.
    pub fn classify_aabb(&self, aabb: &Aabb) -> usize {
        self.planes
            .iter()
            .filter(|plane| intersection::classify_aabb_plane(aabb, plane) == PlaneSide::Back)
            .count()
    }

    /// Moves the frustum by `matrix`, applying its inverse-transpose to every
    /// plane. A singular matrix leaves the planes untouched.
    pub fn transform(&mut self, matrix: &DMat4) {
        if matrix.determinant().abs() < DEGENERATE_EPSILON {
            log::debug!("Skipping frustum transform by singular matrix {matrix:?}");
            return;
        }
        let inverse_transpose = matrix.inverse().transpose();
        for plane in &mut self.planes {
            *plane = plane.transformed_by_inverse_transpose(&inverse_transpose);
        }
    }

    pub fn transformed(&self, matrix: &DMat4) -> Self {
        let mut frustum = *self;
        frustum.transform(matrix);
        frustum
    }

    /// Rescales every plane to a unit normal. Planes with a (near) zero
    /// normal are left as they are.
    pub fn normalize(&mut self) {
        for plane in &mut self.planes {
            *plane = plane.normalized();
        }
    }

    pub fn normalized(&self) -> Self {
        let mut frustum = *self;
        frustum.normalize();
        frustum
    }

    pub fn is_valid(&self) -> bool {
        self.planes
            .iter()
            .all(|plane| plane.normal().length_squared() >= f64::EPSILON * f64::EPSILON)
    }

    /// Pushes every plane outward by `amount`. Only a distance in world units
    /// once the planes are normalized.
    pub fn expand(&mut self, amount: f64) {
        for plane in &mut self.planes {
            *plane = Plane::from_raw(plane.normal(), plane.offset() - amount);
        }
    }

    pub fn expanded(&self, amount: f64) -> Self {
        let mut frustum = *self;
        frustum.expand(amount);
        frustum
    }

    /// Corners in the order near/far × left/right × bottom/top:
    /// NLB, NRB, NLT, NRT, FLB, FRB, FLT, FRT.
    pub fn corners(&self) -> [DVec3; 8] {
        CORNER_PLANES.map(|[a, b, c]| {
            intersect_three_planes(&self.plane(a), &self.plane(b), &self.plane(c))
        })
    }

    /// The twelve edges as a line list of 24 points, for wireframe display.
    pub fn edge_points(&self) -> Vec<DVec3> {
        let corners = self.corners();
        EDGES
            .iter()
            .flat_map(|&(from, to)| [corners[from], corners[to]])
            .collect()
    }
}

impl SupportMap for Frustum {
    fn support(&self, direction: DVec3) -> DVec3 {
        let corners = self.corners();
        let mut best = corners[0];
        let mut best_dot = best.dot(direction);
        for corner in &corners[1..] {
            let dot = corner.dot(direction);
            if dot > best_dot {
                best = *corner;
                best_dot = dot;
            }
        }
        best
    }
}

impl AbsDiffEq for Frustum {
    type Epsilon = f64;

    fn default_epsilon() -> Self::Epsilon {
        f64::EPSILON
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.planes
            .iter()
            .zip(&other.planes)
            .all(|(a, b)| a.abs_diff_eq(b, epsilon))
    }
}

/// Point shared by three planes, solved with Cramer's rule. Near-parallel
/// planes have no stable solution and yield the origin.
pub fn intersect_three_planes(p1: &Plane, p2: &Plane, p3: &Plane) -> DVec3 {
    let (n1, n2, n3) = (p1.normal(), p2.normal(), p3.normal());
    let cross = n2.cross(n3);
    let det = n1.dot(cross);
    if det.abs() < DEGENERATE_EPSILON {
        log::trace!("Three-plane solve is singular (det = {det:e})");
        return DVec3::ZERO;
    }

    (cross * p1.offset() + n1.cross(n2 * p3.offset() - n3 * p2.offset())) / det
}
