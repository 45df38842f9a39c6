// Distributed under the GNU Affero General Public License v3.0 or later.
// See accompanying file LICENSE or https://www.gnu.org/licenses/agpl-3.0.html for details.

use std::ops::Index;

use glam::DVec3;

/// Fixed-capacity GJK simplex. Index 0 is always the most recently added
/// point; pushing onto a full simplex drops the oldest one.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Simplex {
    points: [DVec3; 4],
    len: usize,
}

impl Simplex {
    pub const CAPACITY: usize = 4;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn push(&mut self, point: DVec3) {
        self.points.copy_within(0..Self::CAPACITY - 1, 1);
        self.points[0] = point;
        self.len = (self.len + 1).min(Self::CAPACITY);
    }

    pub fn get(&self, index: usize) -> Option<DVec3> {
        self.points().get(index).copied()
    }

    /// Live points, newest first.
    pub fn points(&self) -> &[DVec3] {
        &self.points[..self.len]
    }

    pub(crate) fn set_point(&mut self, a: DVec3) {
        self.points[0] = a;
        self.len = 1;
    }

    pub(crate) fn set_line(&mut self, a: DVec3, b: DVec3) {
        self.points[0] = a;
        self.points[1] = b;
        self.len = 2;
    }

    pub(crate) fn set_triangle(&mut self, a: DVec3, b: DVec3, c: DVec3) {
        self.points[0] = a;
        self.points[1] = b;
        self.points[2] = c;
        self.len = 3;
    }
}

impl Index<usize> for Simplex {
    type Output = DVec3;

    fn index(&self, index: usize) -> &Self::Output {
        &self.points()[index]
    }
}
