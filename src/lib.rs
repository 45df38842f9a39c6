// Distributed under the GNU Affero General Public License v3.0 or later.
// See accompanying file LICENSE or https://www.gnu.org/licenses/agpl-3.0.html for details.

//! Convex geometry for view-frustum culling and GJK overlap tests.
//!
//! Every shape that can report a support point implements
//! [`SupportMap`](physics::SupportMap), so frusta, boxes, spheres and
//! triangles can all be handed to [`gjk_intersect`](physics::gjk_intersect).

pub mod error;
pub mod intersection;
pub mod math;
pub mod physics;
pub mod render;
pub mod settings;
pub mod shapes;

pub use error::GeometryError;
pub use physics::{
    GjkHit, GjkResult, Simplex, SupportMap, gjk_intersect, gjk_intersect_with_settings, intersects,
};
pub use render::{Frustum, FrustumCuller, FrustumPlane};
pub use settings::{CullingSettings, GeometrySettings, GjkSettings, SettingsError};
pub use shapes::{Aabb, LineSegment, Plane, Sphere, Triangle};
