use ripple_engine::panel::ParamTable;
use ripple_engine::shading::PlaneUniforms;

use crate::context::SceneContext;

/// Range of the plane's vertical offset.
pub const ELEVATION_RANGE: (f32, f32) = (-3.0, 3.0);
pub const STEP: f32 = 0.01;

/// Debug panel bindings for the demo scene, in display order.
pub fn scene_params() -> ParamTable<SceneContext> {
    let (fmin, fmax) = PlaneUniforms::FREQUENCY_RANGE;
    let (emin, emax) = ELEVATION_RANGE;

    let mut table: ParamTable<SceneContext> = ParamTable::new();
    table
        .slider(
            "elevation",
            emin,
            emax,
            STEP,
            |s| s.plane.transform.position.y,
            |s, v| s.plane.transform.position.y = v,
        )
        .toggle("visibility", |s| s.plane.visible, |s, v| s.plane.visible = v)
        .toggle(
            "wireframe",
            |s| s.plane.material.wireframe,
            |s, v| s.plane.material.wireframe = v,
        )
        .slider(
            "x frequency",
            fmin,
            fmax,
            STEP,
            |s| s.plane.material.uniforms.frequency.x,
            |s, v| s.plane.material.uniforms.frequency.x = v,
        )
        .slider(
            "y frequency",
            fmin,
            fmax,
            STEP,
            |s| s.plane.material.uniforms.frequency.y,
            |s, v| s.plane.material.uniforms.frequency.y = v,
        )
        .action("spin", SceneContext::start_spin);
    table
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use ripple_engine::coords::Sizes;
    use ripple_engine::panel::{ParamError, ParamKind};

    use super::*;
    use crate::config::DemoConfig;

    fn scene() -> SceneContext {
        let mut rng = StdRng::seed_from_u64(1);
        SceneContext::new(&DemoConfig::default(), Sizes::new(800.0, 600.0, 1.0), &mut rng)
    }

    #[test]
    fn bindings_are_listed_in_panel_order() {
        let t = scene_params();
        assert_eq!(
            t.names().collect::<Vec<_>>(),
            ["elevation", "visibility", "wireframe", "x frequency", "y frequency", "spin"]
        );
        assert_eq!(
            t.kind("x frequency"),
            Some(ParamKind::Slider { min: 0.0, max: 20.0, step: 0.01 })
        );
    }

    #[test]
    fn frequency_sliders_drive_the_uniform_independently() {
        let t = scene_params();
        let mut s = scene();

        t.set(&mut s, "x frequency", 3.0).unwrap();
        assert!((s.plane.material.uniforms.frequency.x - 3.0).abs() < 1e-5);
        assert_eq!(s.plane.material.uniforms.frequency.y, 5.0);

        t.set(&mut s, "y frequency", 20.0).unwrap();
        assert_eq!(s.plane.material.uniforms.frequency.y, 20.0);

        assert!(matches!(
            t.set(&mut s, "x frequency", 20.5),
            Err(ParamError::OutOfRange { .. })
        ));
        assert!((s.plane.material.uniforms.frequency.x - 3.0).abs() < 1e-5);
    }

    #[test]
    fn elevation_moves_the_plane() {
        let t = scene_params();
        let mut s = scene();
        t.set(&mut s, "elevation", -3.0).unwrap();
        assert_eq!(s.plane.transform.position.y, -3.0);
        assert!(t.set(&mut s, "elevation", -3.5).is_err());
    }

    #[test]
    fn toggles_flip_visibility_and_wireframe() {
        let t = scene_params();
        let mut s = scene();
        assert!(!t.toggle_flag(&mut s, "visibility").unwrap());
        assert!(!s.plane.visible);
        assert!(t.toggle_flag(&mut s, "wireframe").unwrap());
        assert!(s.plane.material.wireframe);
    }

    #[test]
    fn spin_action_starts_a_tween() {
        let t = scene_params();
        let mut s = scene();
        t.trigger(&mut s, "spin").unwrap();
        assert!(s.is_spinning());
    }
}
