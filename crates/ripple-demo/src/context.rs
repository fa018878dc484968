use glam::Vec3;
use rand::Rng;
use ripple_engine::coords::Sizes;
use ripple_engine::scene::{Mesh, OrbitControls, PerspectiveCamera, PlaneGeometry, ShaderMaterial};
use ripple_engine::shading::PlaneUniforms;
use ripple_engine::time::{Ease, Tween};

use crate::config::DemoConfig;

/// Radians added to the plane's y rotation by one spin.
pub const SPIN_ANGLE: f32 = 10.0;
/// Seconds a spin takes.
pub const SPIN_DURATION: f32 = 1.0;

/// Everything the demo mutates: camera, controls, the plane and the sizes.
///
/// Owned by the app; the resize handler, the panel bindings and the
/// per-frame update all borrow it.
#[derive(Debug)]
pub struct SceneContext {
    pub camera: PerspectiveCamera,
    pub controls: OrbitControls,
    pub plane: Mesh,
    sizes: Sizes,
    spin: Option<Tween>,
    elapsed: f32,
}

impl SceneContext {
    pub fn new<R: Rng + ?Sized>(config: &DemoConfig, sizes: Sizes, rng: &mut R) -> Self {
        let (w, h) = config.plane_size;
        let (sx, sy) = config.plane_segments;
        let geometry = PlaneGeometry::new(w, h, sx, sy).with_random_attribute(rng);

        let material = ShaderMaterial {
            uniforms: PlaneUniforms {
                time: 0.0,
                frequency: config.frequency,
                color: config.color,
            },
            wireframe: false,
        };

        let mut camera = PerspectiveCamera::new(
            config.camera_fov,
            sizes.aspect(),
            config.camera_near,
            config.camera_far,
        );
        camera.position = config.camera_position;
        camera.target = Vec3::ZERO;

        let mut controls = OrbitControls::new(Vec3::ZERO);
        controls.enable_damping = config.damping;

        Self {
            camera,
            controls,
            plane: Mesh::new(geometry, material),
            sizes,
            spin: None,
            elapsed: 0.0,
        }
    }

    #[inline]
    pub fn sizes(&self) -> Sizes {
        self.sizes
    }

    /// Viewport changed: new camera aspect, new pixel ratio.
    pub fn handle_resize(&mut self, sizes: Sizes) {
        self.sizes = sizes;
        self.camera.set_aspect(sizes.aspect());
        log::debug!(
            "aspect {:.3}, pixel ratio {}",
            self.camera.aspect,
            sizes.pixel_ratio
        );
    }

    /// Starts a spin from the current rotation; a running spin is retargeted.
    pub fn start_spin(&mut self) {
        let from = self.plane.transform.rotation.y;
        self.spin = Some(Tween::by(
            from,
            SPIN_ANGLE,
            self.elapsed,
            SPIN_DURATION,
            Ease::Power1Out,
        ));
    }

    #[inline]
    pub fn is_spinning(&self) -> bool {
        self.spin.is_some()
    }

    /// One frame of animation at `elapsed` seconds since start.
    pub fn update(&mut self, elapsed: f32) {
        self.elapsed = elapsed;
        self.plane.material.uniforms.time = elapsed;

        if let Some(spin) = self.spin {
            let (angle, finished) = spin.sample(elapsed);
            self.plane.transform.rotation.y = angle;
            if finished {
                self.spin = None;
            }
        }

        self.controls.update(&mut self.camera);
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    fn scene() -> SceneContext {
        let mut rng = StdRng::seed_from_u64(7);
        SceneContext::new(&DemoConfig::default(), Sizes::new(800.0, 600.0, 1.0), &mut rng)
    }

    #[test]
    fn plane_carries_one_random_per_vertex() {
        let s = scene();
        let g = &s.plane.geometry;
        assert_eq!(g.vertex_count(), 33 * 33);
        assert_eq!(g.a_random().len(), g.vertex_count());
        assert!(g.a_random().iter().all(|r| (0.0..1.0).contains(r)));
    }

    #[test]
    fn resize_sets_aspect_and_capped_pixel_ratio() {
        let mut s = scene();
        s.handle_resize(Sizes::new(1920.0, 1080.0, 3.0));
        assert!((s.camera.aspect - 1920.0 / 1080.0).abs() < 1e-6);
        assert_eq!(s.sizes().pixel_ratio, 2.0);

        s.handle_resize(Sizes::new(500.0, 1000.0, 1.5));
        assert!((s.camera.aspect - 0.5).abs() < 1e-6);
        assert_eq!(s.sizes().pixel_ratio, 1.5);
    }

    #[test]
    fn update_writes_elapsed_time_uniform() {
        let mut s = scene();
        s.update(0.5);
        assert_eq!(s.plane.material.uniforms.time, 0.5);
        s.update(1.75);
        assert_eq!(s.plane.material.uniforms.time, 1.75);
    }

    #[test]
    fn spin_adds_ten_radians_over_one_second() {
        let mut s = scene();
        s.update(2.0);
        s.start_spin();

        s.update(2.5);
        let mid = s.plane.transform.rotation.y;
        assert!(mid > 5.0 && mid < 10.0, "power1.out is past halfway at t=0.5: {mid}");

        s.update(3.0);
        assert!((s.plane.transform.rotation.y - SPIN_ANGLE).abs() < 1e-5);
        assert!(!s.is_spinning());
    }

    #[test]
    fn spin_during_spin_retargets_from_current_angle() {
        let mut s = scene();
        s.start_spin();
        s.update(0.5);
        let current = s.plane.transform.rotation.y;

        s.start_spin();
        s.update(1.5);
        assert!((s.plane.transform.rotation.y - (current + SPIN_ANGLE)).abs() < 1e-4);
    }

    #[test]
    fn damped_controls_keep_the_camera_on_its_orbit() {
        let mut s = scene();
        s.controls.rotate_left(0.3);
        for frame in 0..120 {
            s.update(frame as f32 / 60.0);
        }
        assert!((s.camera.position.length() - 3.0).abs() < 1e-3);
        assert!(s.camera.position.x < 0.0);
    }
}
