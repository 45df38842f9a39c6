// Distributed under the GNU Affero General Public License v3.0 or later.
// See accompanying file LICENSE or https://www.gnu.org/licenses/agpl-3.0.html for details.

use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use convex_cull::{
    Aabb, CullingSettings, Frustum, FrustumCuller, Sphere, Triangle, gjk_intersect,
};
use glam::{DMat4, DVec3};

fn sphere_grid(count: usize, spacing: f64, radius: f64) -> Vec<Sphere> {
    let side = (count as f64).cbrt().ceil() as usize;
    let mut spheres = Vec::with_capacity(count);

    for z in 0..side {
        for y in 0..side {
            for x in 0..side {
                if spheres.len() >= count {
                    return spheres;
                }

                let center = DVec3::new(
                    x as f64 * spacing - side as f64 * spacing * 0.5,
                    y as f64 * spacing - side as f64 * spacing * 0.5,
                    -(z as f64) * spacing,
                );
                spheres.push(Sphere::new(center, radius));
            }
        }
    }
    spheres
}

fn camera_frustum() -> Frustum {
    let projection = DMat4::perspective_rh(60.0_f64.to_radians(), 16.0 / 9.0, 0.1, 100.0);
    Frustum::from_matrix(&projection)
}

fn bench_frustum_extraction(c: &mut Criterion) {
    let projection = DMat4::perspective_rh(60.0_f64.to_radians(), 16.0 / 9.0, 0.1, 100.0);
    c.bench_function("frustum/from_matrix_normalized", |b| {
        b.iter(|| black_box(Frustum::from_matrix(black_box(&projection)).normalized()))
    });

    let frustum = camera_frustum().normalized();
    c.bench_function("frustum/corners", |b| {
        b.iter(|| black_box(black_box(&frustum).corners()))
    });
}

fn bench_culling(c: &mut Criterion) {
    let frustum = camera_frustum();
    let spheres = sphere_grid(32_768, 2.0, 0.75);
    let aabbs: Vec<Aabb> = spheres
        .iter()
        .map(|s| Aabb::from_center_half_extents(s.center, DVec3::splat(s.radius)))
        .collect();

    let sequential = FrustumCuller::new(
        &frustum,
        &CullingSettings {
            parallel_threshold: usize::MAX,
            ..CullingSettings::default()
        },
    );
    let parallel = FrustumCuller::new(&frustum, &CullingSettings::default());

    c.bench_function("culling/spheres_32768_sequential", |b| {
        b.iter(|| black_box(sequential.count_visible_spheres(black_box(&spheres))))
    });
    c.bench_function("culling/spheres_32768_parallel", |b| {
        b.iter(|| black_box(parallel.count_visible_spheres(black_box(&spheres))))
    });
    c.bench_function("culling/aabbs_32768_parallel", |b| {
        b.iter(|| black_box(parallel.visible_aabbs(black_box(&aabbs)).len()))
    });
}

fn bench_gjk(c: &mut Criterion) {
    let frustum = camera_frustum().normalized();
    let inside = Aabb::from_center_half_extents(DVec3::new(0.0, 0.0, -10.0), DVec3::ONE);
    let outside = Aabb::from_center_half_extents(DVec3::new(0.0, 80.0, -10.0), DVec3::ONE);
    let triangle = Triangle::new(
        DVec3::new(-1.0, 0.0, -5.0),
        DVec3::new(1.0, 0.0, -5.0),
        DVec3::new(0.0, 1.0, -5.0),
    );
    let sphere = Sphere::new(DVec3::new(0.0, 0.5, -5.2), 0.5);

    c.bench_function("gjk/frustum_aabb_overlap", |b| {
        b.iter(|| black_box(gjk_intersect(black_box(&frustum), black_box(&inside))))
    });
    c.bench_function("gjk/frustum_aabb_separated", |b| {
        b.iter(|| black_box(gjk_intersect(black_box(&frustum), black_box(&outside))))
    });
    c.bench_function("gjk/triangle_sphere", |b| {
        b.iter(|| black_box(gjk_intersect(black_box(&triangle), black_box(&sphere))))
    });
}

criterion_group!(benches, bench_frustum_extraction, bench_culling, bench_gjk);
criterion_main!(benches);
