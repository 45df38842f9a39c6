// Distributed under the GNU Affero General Public License v3.0 or later.
// See accompanying file LICENSE or https://www.gnu.org/licenses/agpl-3.0.html for details.

use glam::DVec3;

use crate::physics::SupportMap;

#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: DVec3,
    pub max: DVec3,
}

impl Aabb {
    pub fn new(min: DVec3, max: DVec3) -> Self {
        Self {
            min: min.min(max),
            max: min.max(max),
        }
    }

    pub fn from_center_half_extents(center: DVec3, half_extents: DVec3) -> Self {
        let half_extents = half_extents.abs();
        Self {
            min: center - half_extents,
            max: center + half_extents,
        }
    }

    /// Smallest box enclosing `points`, or `None` for an empty slice.
    pub fn from_points(points: &[DVec3]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let (min, max) = rest
            .iter()
            .fold((*first, *first), |(min, max), p| (min.min(*p), max.max(*p)));
        Some(Self { min, max })
    }

    pub fn center(&self) -> DVec3 {
        (self.min + self.max) * 0.5
    }

    pub fn half_extents(&self) -> DVec3 {
        (self.max - self.min) * 0.5
    }

    pub fn contains_point(&self, point: DVec3) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }

    pub fn translated(&self, offset: DVec3) -> Self {
        Self {
            min: self.min + offset,
            max: self.max + offset,
        }
    }
}

impl SupportMap for Aabb {
    fn support(&self, direction: DVec3) -> DVec3 {
        DVec3::new(
            if direction.x >= 0.0 { self.max.x } else { self.min.x },
            if direction.y >= 0.0 { self.max.y } else { self.min.y },
            if direction.z >= 0.0 { self.max.z } else { self.min.z },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_orders_corners() {
        let aabb = Aabb::new(DVec3::new(1.0, -1.0, 2.0), DVec3::new(-1.0, 1.0, 0.0));
        assert_eq!(aabb.min, DVec3::new(-1.0, -1.0, 0.0));
        assert_eq!(aabb.max, DVec3::new(1.0, 1.0, 2.0));
    }

    #[test]
    fn from_points_encloses_all() {
        let points = [
            DVec3::new(0.0, 0.0, 0.0),
            DVec3::new(2.0, -1.0, 0.5),
            DVec3::new(-3.0, 4.0, 1.0),
        ];
        let aabb = Aabb::from_points(&points).unwrap();
        assert_eq!(aabb.min, DVec3::new(-3.0, -1.0, 0.0));
        assert_eq!(aabb.max, DVec3::new(2.0, 4.0, 1.0));
        assert!(points.iter().all(|p| aabb.contains_point(*p)));
        assert!(Aabb::from_points(&[]).is_none());
    }

    #[test]
    fn support_picks_corner_along_direction() {
        let aabb = Aabb::from_center_half_extents(DVec3::ZERO, DVec3::ONE);
        assert_eq!(
            aabb.support(DVec3::new(1.0, -2.0, 0.5)),
            DVec3::new(1.0, -1.0, 1.0)
        );
        assert_eq!(aabb.support(DVec3::NEG_ONE), DVec3::NEG_ONE);
    }
}
