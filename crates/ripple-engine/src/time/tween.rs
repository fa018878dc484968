/// Easing curve applied to tween progress.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum Ease {
    Linear,
    /// Quadratic ease-out, `1 - (1 - t)^2`.
    #[default]
    Power1Out,
}

impl Ease {
    pub fn sample(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Ease::Linear => t,
            Ease::Power1Out => 1.0 - (1.0 - t) * (1.0 - t),
        }
    }
}

/// Scalar interpolation from `from` to `to` over `duration` seconds.
///
/// Times are elapsed-clock seconds (`FrameTime::elapsed`).
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Tween {
    from: f32,
    to: f32,
    start: f32,
    duration: f32,
    ease: Ease,
}

impl Tween {
    pub fn new(from: f32, to: f32, start: f32, duration: f32, ease: Ease) -> Self {
        Self {
            from,
            to,
            start,
            duration: duration.max(0.0),
            ease,
        }
    }

    /// Tween from `from` by `delta` over `duration`.
    pub fn by(from: f32, delta: f32, start: f32, duration: f32, ease: Ease) -> Self {
        Self::new(from, from + delta, start, duration, ease)
    }

    #[inline]
    pub fn target(&self) -> f32 {
        self.to
    }

    /// Returns the value at `now` and whether the tween has finished.
    pub fn sample(&self, now: f32) -> (f32, bool) {
        if self.duration <= f32::EPSILON {
            return (self.to, true);
        }
        let progress = (now - self.start) / self.duration;
        let mix = self.ease.sample(progress);
        (self.from + (self.to - self.from) * mix, progress >= 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn power1_out_hits_endpoints() {
        assert_eq!(Ease::Power1Out.sample(0.0), 0.0);
        assert_eq!(Ease::Power1Out.sample(1.0), 1.0);
        assert!((Ease::Power1Out.sample(0.5) - 0.75).abs() < 1e-6);
    }

    #[test]
    fn eases_increase_monotonically() {
        for ease in [Ease::Linear, Ease::Power1Out] {
            let mut last = 0.0;
            for step in 0..=20 {
                let v = ease.sample(step as f32 / 20.0);
                assert!(v >= last - f32::EPSILON, "{ease:?} dipped at step {step}");
                last = v;
            }
        }
    }

    #[test]
    fn tween_reports_progress_and_completion() {
        let t = Tween::by(2.0, 10.0, 5.0, 1.0, Ease::Linear);
        assert_eq!(t.sample(5.0), (2.0, false));

        let (mid, done) = t.sample(5.5);
        assert!((mid - 7.0).abs() < 1e-6);
        assert!(!done);

        assert_eq!(t.sample(6.0), (12.0, true));
        assert_eq!(t.sample(60.0), (12.0, true));
    }

    #[test]
    fn sampling_before_start_holds_origin() {
        let t = Tween::new(1.0, 3.0, 10.0, 2.0, Ease::Power1Out);
        assert_eq!(t.sample(0.0), (1.0, false));
    }

    #[test]
    fn zero_duration_jumps_to_target() {
        let t = Tween::new(0.0, 4.0, 0.0, 0.0, Ease::Linear);
        assert_eq!(t.sample(0.0), (4.0, true));
    }
}
