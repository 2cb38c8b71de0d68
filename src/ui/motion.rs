//! Frame-rate independent smoothing.

use std::time::Duration;

/// Reference frame rate the smoothing strength is tuned for.
const REFERENCE_FPS: f32 = 60.0;

/// Moves `current` toward `target` by `strength` per reference frame.
///
/// The step is scaled by `elapsed`, so a zero duration returns `current`
/// untouched and a long frame catches up in one call.
#[must_use]
pub fn approach(current: f32, target: f32, strength: f32, elapsed: Duration) -> f32 {
    let strength = strength.clamp(0.0, 1.0);
    let frames = elapsed.as_secs_f32() * REFERENCE_FPS;
    if frames <= 0.0 {
        return current;
    }
    let factor = 1.0 - (1.0 - strength).powf(frames);
    let next = current + (target - current) * factor;
    if (target - next).abs() < 0.001 {
        target
    } else {
        next
    }
}

/// Duration of one reference frame.
#[must_use]
pub fn frame() -> Duration {
    Duration::from_secs_f32(1.0 / REFERENCE_FPS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_elapsed_is_a_no_op() {
        assert!((approach(1.0, 5.0, 0.3, Duration::ZERO) - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn one_frame_moves_by_strength() {
        let next = approach(0.0, 10.0, 0.25, frame());
        assert!((next - 2.5).abs() < 0.01);
    }

    #[test]
    fn settles_on_target() {
        let mut value = 0.0;
        for _ in 0..200 {
            value = approach(value, 3.0, 0.22, frame());
        }
        assert!((value - 3.0).abs() < f32::EPSILON);
    }
}
