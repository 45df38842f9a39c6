// Distributed under the GNU Affero General Public License v3.0 or later.
// See accompanying file LICENSE or https://www.gnu.org/licenses/agpl-3.0.html for details.

use thiserror::Error;

/// Contract violations raised by constructors and indexed accessors.
///
/// Degenerate geometry never ends up here; those cases resolve to fallback
/// values instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GeometryError {
    #[error("A frustum requires exactly 6 planes, got {found}")]
    PlaneCount { found: usize },

    #[error("Triangle vertex index {0} is out of range (expected 0..=2)")]
    VertexIndex(usize),

    #[error("Triangle edge index {0} is out of range (expected 0..=2)")]
    EdgeIndex(usize),

    #[error("Line segment subdivision count must be at least 1, got {0}")]
    SubdivisionCount(usize),
}
