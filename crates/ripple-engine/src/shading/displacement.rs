use glam::{Mat4, Vec2, Vec3, Vec4};

use crate::paint::Color;

/// Peak height of each of the two sine waves.
pub const WAVE_AMPLITUDE: f32 = 0.1;

/// Scale applied to the per-vertex `aRandom` jitter.
pub const RANDOM_AMPLITUDE: f32 = 0.1;

/// Host-side values of the plane's uniforms.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PlaneUniforms {
    /// `uTime`: elapsed seconds, written once per frame.
    pub time: f32,
    /// `uFrequency`: spatial frequency along local x and y, each in [0, 20].
    pub frequency: Vec2,
    /// `uColor`: flat surface color (linear).
    pub color: Color,
}

impl PlaneUniforms {
    pub const FREQUENCY_RANGE: (f32, f32) = (0.0, 20.0);
}

impl Default for PlaneUniforms {
    fn default() -> Self {
        Self {
            time: 0.0,
            frequency: Vec2::new(10.0, 5.0),
            color: Color::from_hex(0xffb700),
        }
    }
}

/// Elevation added to the vertex's local z.
///
/// `A·sin(x·fx − t) + A·sin(y·fy − t) + R·aRandom`; time is a pure phase
/// offset, so at `t = 0` only position and `aRandom` contribute.
pub fn elevation(position: Vec3, a_random: f32, uniforms: &PlaneUniforms) -> f32 {
    let t = uniforms.time;
    let f = uniforms.frequency;

    let mut e = (position.x * f.x - t).sin() * WAVE_AMPLITUDE;
    e += (position.y * f.y - t).sin() * WAVE_AMPLITUDE;
    e += a_random * RANDOM_AMPLITUDE;
    e
}

/// Local-space position after displacement.
pub fn displace(position: Vec3, a_random: f32, uniforms: &PlaneUniforms) -> Vec3 {
    position + Vec3::Z * elevation(position, a_random, uniforms)
}

/// Clip-space output of the vertex program.
pub fn vertex_stage(
    position: Vec3,
    a_random: f32,
    uniforms: &PlaneUniforms,
    model: Mat4,
    view: Mat4,
    projection: Mat4,
) -> Vec4 {
    let local = displace(position, a_random, uniforms);
    projection * view * model * local.extend(1.0)
}

/// Output of the pixel program: `uColor`, opaque.
pub fn pixel_stage(uniforms: &PlaneUniforms) -> [f32; 4] {
    let [r, g, b] = uniforms.color.rgb();
    [r, g, b, 1.0]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn uniforms(time: f32, fx: f32, fy: f32) -> PlaneUniforms {
        PlaneUniforms {
            time,
            frequency: Vec2::new(fx, fy),
            ..PlaneUniforms::default()
        }
    }

    #[test]
    fn elevation_is_deterministic() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            let p = Vec3::new(rng.gen_range(-0.5..0.5), rng.gen_range(-0.5..0.5), 0.0);
            let r: f32 = rng.r#gen();
            let u = uniforms(rng.gen_range(0.0..100.0), 10.0, 5.0);
            assert_eq!(elevation(p, r, &u).to_bits(), elevation(p, r, &u).to_bits());
        }
    }

    #[test]
    fn time_zero_leaves_only_position_and_random() {
        let u = uniforms(0.0, 10.0, 5.0);
        let p = Vec3::new(0.3, -0.2, 0.0);
        let r = 0.42;

        let expected = (0.3f32 * 10.0).sin() * WAVE_AMPLITUDE
            + (-0.2f32 * 5.0).sin() * WAVE_AMPLITUDE
            + r * RANDOM_AMPLITUDE;
        assert!((elevation(p, r, &u) - expected).abs() < 1e-6);
    }

    #[test]
    fn origin_at_time_zero_is_pure_jitter() {
        let u = uniforms(0.0, 13.0, 7.0);
        assert!((elevation(Vec3::ZERO, 0.5, &u) - 0.5 * RANDOM_AMPLITUDE).abs() < 1e-7);
    }

    #[test]
    fn displacement_only_moves_z() {
        let u = uniforms(1.7, 10.0, 5.0);
        let p = Vec3::new(0.25, 0.1, 0.0);
        let d = displace(p, 0.3, &u);
        assert_eq!(d.x, p.x);
        assert_eq!(d.y, p.y);
        assert!((d.z - elevation(p, 0.3, &u)).abs() < 1e-7);
    }

    /// Sign changes of the x wave across the plane's width.
    fn x_wave_sign_changes(fx: f32, time: f32) -> usize {
        let u = uniforms(time, fx, 0.0);
        // With fy = 0 and no jitter the y term is this constant.
        let y_term = (-time).sin() * WAVE_AMPLITUDE;

        let samples = 2000;
        let mut changes = 0;
        let mut prev: Option<bool> = None;
        for i in 0..=samples {
            let x = -0.5 + i as f32 / samples as f32;
            let positive = elevation(Vec3::new(x, 0.0, 0.0), 0.0, &u) - y_term > 0.0;
            if prev.is_some_and(|p| p != positive) {
                changes += 1;
            }
            prev = Some(positive);
        }
        changes
    }

    #[test]
    fn higher_x_frequency_oscillates_faster() {
        for time in [0.0, 0.7, 12.3] {
            let slow = x_wave_sign_changes(5.0, time);
            let mid = x_wave_sign_changes(10.0, time);
            let fast = x_wave_sign_changes(20.0, time);
            assert!(slow < mid, "t={time}: {slow} !< {mid}");
            assert!(mid < fast, "t={time}: {mid} !< {fast}");
        }
    }

    #[test]
    fn pixel_stage_is_flat_color() {
        let base = PlaneUniforms::default();
        let expected = pixel_stage(&base);
        assert_eq!(expected[3], 1.0);
        assert_eq!(&expected[..3], &base.color.rgb());

        for time in [0.0, 1.0, 500.0] {
            for freq in [Vec2::ZERO, Vec2::new(20.0, 20.0)] {
                let u = PlaneUniforms { time, frequency: freq, ..base };
                assert_eq!(pixel_stage(&u), expected);
            }
        }
    }

    #[test]
    fn identity_transforms_pass_displaced_position_through() {
        let u = uniforms(0.0, 10.0, 5.0);
        let p = Vec3::new(0.1, 0.2, 0.0);
        let clip = vertex_stage(p, 0.0, &u, Mat4::IDENTITY, Mat4::IDENTITY, Mat4::IDENTITY);
        assert_eq!(clip.truncate(), displace(p, 0.0, &u));
        assert_eq!(clip.w, 1.0);
    }
}
