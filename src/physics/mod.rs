// Distributed under the GNU Affero General Public License v3.0 or later.
// See accompanying file LICENSE or https://www.gnu.org/licenses/agpl-3.0.html for details.

pub mod gjk;
pub mod simplex;
pub mod support;

pub use gjk::{
    DEFAULT_MAX_ITERATIONS, GjkHit, GjkResult, gjk_intersect, gjk_intersect_with_params,
    gjk_intersect_with_settings, intersects,
};
pub use simplex::Simplex;
pub use support::SupportMap;
