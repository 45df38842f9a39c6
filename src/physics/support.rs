// Distributed under the GNU Affero General Public License v3.0 or later.
// See accompanying file LICENSE or https://www.gnu.org/licenses/agpl-3.0.html for details.

use glam::DVec3;

/// Any convex shape that can report its farthest point along a direction.
///
/// This is the only thing GJK needs from a shape. Implementations must return
/// a point `p` of the shape maximizing `p.dot(direction)`; the direction is
/// not required to be normalized and may be zero.
pub trait SupportMap {
    fn support(&self, direction: DVec3) -> DVec3;
}

impl<T: SupportMap + ?Sized> SupportMap for &T {
    fn support(&self, direction: DVec3) -> DVec3 {
        (**self).support(direction)
    }
}

/// Support point of the Minkowski difference `a - b`.
pub(crate) fn support_minkowski<A, B>(a: &A, b: &B, direction: DVec3) -> DVec3
where
    A: SupportMap + ?Sized,
    B: SupportMap + ?Sized,
{
    a.support(direction) - b.support(-direction)
}
