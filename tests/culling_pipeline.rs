// Distributed under the GNU Affero General Public License v3.0 or later.
// See accompanying file LICENSE or https://www.gnu.org/licenses/agpl-3.0.html for details.

use approx::assert_abs_diff_eq;
use convex_cull::intersection::triangles_overlap;
use convex_cull::{
    Aabb, Frustum, FrustumCuller, FrustumPlane, GeometrySettings, GjkResult, LineSegment, Sphere,
    Triangle, gjk_intersect, gjk_intersect_with_settings, intersects,
};
use glam::{DMat4, DVec3};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn camera() -> Frustum {
    let eye = DVec3::new(0.0, 2.0, 10.0);
    let view = DMat4::look_at_rh(eye, DVec3::new(0.0, 2.0, 0.0), DVec3::Y);
    let projection = DMat4::perspective_rh(70.0_f64.to_radians(), 1.0, 0.5, 50.0);
    Frustum::from_matrices(&view, &projection).normalized()
}

#[test]
fn closed_form_and_gjk_agree_on_boxes() {
    init_logger();
    let frustum = camera();

    for x in -20..=20 {
        for z in -12..=8 {
            let center = DVec3::new(x as f64 * 2.0, 2.0, z as f64 * 4.0);
            let aabb = Aabb::from_center_half_extents(center, DVec3::splat(0.5));

            // The closed-form test is conservative: it may keep boxes GJK rejects,
            // never the other way round.
            if intersects(&frustum, &aabb) {
                assert!(frustum.intersects_aabb(&aabb), "box at {center:?}");
            }
            if frustum.classify_aabb(&aabb) > 0 {
                assert!(!intersects(&frustum, &aabb), "box at {center:?}");
            }
        }
    }
}

#[test]
fn closed_form_and_gjk_agree_on_spheres() {
    init_logger();
    let frustum = camera();

    for x in -15..=15 {
        for z in -10..=6 {
            let sphere = Sphere::new(DVec3::new(x as f64 * 1.5, 2.0, z as f64 * 5.0), 0.75);
            let outside = frustum.classify_sphere(&sphere) > 0;
            if outside {
                assert!(!intersects(&frustum, &sphere), "sphere at {:?}", sphere.center);
            }
            if frustum.contains(sphere.center) {
                assert!(intersects(&frustum, &sphere), "sphere at {:?}", sphere.center);
            }
        }
    }
}

#[test]
fn culler_follows_a_moving_camera() {
    init_logger();
    let settings = GeometrySettings::default();
    let frustum = camera();
    let target = [Sphere::new(DVec3::new(0.0, 2.0, 0.0), 1.0)];

    let culler = FrustumCuller::new(&frustum, &settings.culling);
    assert_eq!(culler.visible_spheres(&target), vec![true]);

    let moved = frustum.transformed(&DMat4::from_translation(DVec3::new(30.0, 0.0, 0.0)));
    let culler = FrustumCuller::new(&moved, &settings.culling);
    assert_eq!(culler.visible_spheres(&target), vec![false]);
}

#[test]
fn frustum_corners_lie_on_their_planes() {
    let frustum = camera();
    let corners = frustum.corners();
    let near = frustum.plane(FrustumPlane::Near);
    let far = frustum.plane(FrustumPlane::Far);

    for corner in &corners[..4] {
        assert_abs_diff_eq!(near.signed_distance(*corner), 0.0, epsilon = 1e-9);
    }
    for corner in &corners[4..] {
        assert_abs_diff_eq!(far.signed_distance(*corner), 0.0, epsilon = 1e-7);
    }
    for corner in corners {
        assert_eq!(frustum.classify_point(corner), 0);
    }
}

#[test]
fn segment_crossing_the_near_plane() {
    let frustum = camera();
    let near = frustum.plane(FrustumPlane::Near);
    let segment = LineSegment::new(DVec3::new(0.0, 2.0, 12.0), DVec3::new(0.0, 2.0, 0.0));

    let hit = segment
        .intersect_plane(&near)
        .expect("segment should cross the near plane");
    assert_abs_diff_eq!(hit, DVec3::new(0.0, 2.0, 9.5), epsilon = 1e-9);
}

#[test]
fn triangle_tests_agree() {
    let a = Triangle::new(
        DVec3::new(0.0, 0.0, 0.0),
        DVec3::new(2.0, 0.0, 0.0),
        DVec3::new(0.0, 2.0, 0.0),
    );
    let crossing = Triangle::new(
        DVec3::new(0.5, 0.5, -1.0),
        DVec3::new(0.5, 0.5, 1.0),
        DVec3::new(1.5, -0.5, 0.0),
    );
    let above = Triangle::new(
        DVec3::new(0.0, 0.0, 1.0),
        DVec3::new(2.0, 0.0, 1.0),
        DVec3::new(0.0, 2.0, 1.0),
    );

    assert!(triangles_overlap(&a.vertices(), &crossing.vertices()));
    assert!(intersects(&a, &crossing));
    assert!(!triangles_overlap(&a.vertices(), &above.vertices()));
    assert!(!intersects(&a, &above));
}

#[test]
fn iteration_budget_comes_from_settings() {
    init_logger();
    let settings = GeometrySettings::from_toml_str("[gjk]\nmax_iterations = 1\n")
        .expect("valid settings");
    let frustum = camera();
    let aabb = Aabb::from_center_half_extents(DVec3::new(0.0, 2.0, 0.0), DVec3::ONE);

    assert!(matches!(
        gjk_intersect_with_settings(&frustum, &aabb, &settings.gjk),
        GjkResult::IterationLimit
    ));
    assert!(gjk_intersect(&frustum, &aabb).is_intersection());
}
