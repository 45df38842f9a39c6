// Distributed under the GNU Affero General Public License v3.0 or later.
// See accompanying file LICENSE or https://www.gnu.org/licenses/agpl-3.0.html for details.

pub mod aabb;
pub mod line_segment;
pub mod plane;
pub mod sphere;
pub mod triangle;

pub use aabb::Aabb;
pub use line_segment::LineSegment;
pub use plane::Plane;
pub use sphere::Sphere;
pub use triangle::Triangle;
