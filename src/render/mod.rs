// Distributed under the GNU Affero General Public License v3.0 or later.
// See accompanying file LICENSE or https://www.gnu.org/licenses/agpl-3.0.html for details.

pub mod culling;
pub mod frustum;

pub use culling::FrustumCuller;
pub use frustum::{Frustum, FrustumPlane, intersect_three_planes};
