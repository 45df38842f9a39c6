// Distributed under the GNU Affero General Public License v3.0 or later.
// See accompanying file LICENSE or https://www.gnu.org/licenses/agpl-3.0.html for details.

use std::time::Instant;

use rayon::prelude::*;

use crate::render::frustum::Frustum;
use crate::settings::CullingSettings;
use crate::shapes::{Aabb, Sphere};

/// Tests batches of bounding volumes against one frustum, spreading large
/// batches over the rayon thread pool.
#[derive(Debug, Clone)]
pub struct FrustumCuller {
    frustum: Frustum,
    parallel_threshold: usize,
}

impl FrustumCuller {
    /// Normalizes `frustum` and pushes it out by the configured margin so
    /// that plane distances are metric.
    pub fn new(frustum: &Frustum, settings: &CullingSettings) -> Self {
        Self {
            frustum: frustum
                .normalized()
                .expanded(settings.margin + settings.epsilon),
            parallel_threshold: settings.parallel_threshold,
        }
    }

    pub fn frustum(&self) -> &Frustum {
        &self.frustum
    }

    pub fn visible_spheres(&self, spheres: &[Sphere]) -> Vec<bool> {
        self.visibility("spheres", spheres, Frustum::intersects_sphere)
    }

    pub fn visible_aabbs(&self, aabbs: &[Aabb]) -> Vec<bool> {
        self.visibility("aabbs", aabbs, Frustum::intersects_aabb)
    }

    pub fn count_visible_spheres(&self, spheres: &[Sphere]) -> usize {
        self.count("spheres", spheres, Frustum::intersects_sphere)
    }

    pub fn count_visible_aabbs(&self, aabbs: &[Aabb]) -> usize {
        self.count("aabbs", aabbs, Frustum::intersects_aabb)
    }

    fn visibility<T, F>(&self, label: &str, items: &[T], test: F) -> Vec<bool>
    where
        T: Sync,
        F: Fn(&Frustum, &T) -> bool + Sync,
    {
        let start = Instant::now();
        let frustum = &self.frustum;
        let visible: Vec<bool> = if items.len() >= self.parallel_threshold {
            items.par_iter().map(|item| test(frustum, item)).collect()
        } else {
            items.iter().map(|item| test(frustum, item)).collect()
        };
        log::trace!("culled {} {} took {:.2?}", items.len(), label, start.elapsed());
        visible
    }

    fn count<T, F>(&self, label: &str, items: &[T], test: F) -> usize
    where
        T: Sync,
        F: Fn(&Frustum, &T) -> bool + Sync,
    {
        let start = Instant::now();
        let frustum = &self.frustum;
        let count = if items.len() >= self.parallel_threshold {
            items.par_iter().filter(|item| test(frustum, item)).count()
        } else {
            items.iter().filter(|item| test(frustum, item)).count()
        };
        log::trace!("counted {} {} took {:.2?}", items.len(), label, start.elapsed());
        count
    }
}
