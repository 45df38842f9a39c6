// Distributed under the GNU Affero General Public License v3.0 or later.
// See accompanying file LICENSE or https://www.gnu.org/licenses/agpl-3.0.html for details.

use glam::DVec3;

/// Threshold for near-zero determinants, lengths and search directions.
pub const DEGENERATE_EPSILON: f64 = 1e-10;

/// Default tolerance for plane classification queries.
pub const DEFAULT_EPSILON: f64 = 1e-6;

/// Returns a vector perpendicular to `v`, crossing it with whichever of the
/// X or Y axes it is least aligned with.
pub(crate) fn any_perpendicular(v: DVec3) -> DVec3 {
    let unit = v.normalize_or_zero();
    let axis = if unit.x.abs() < 0.9 { DVec3::X } else { DVec3::Y };
    v.cross(axis)
}
