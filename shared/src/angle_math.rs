use std::f64::consts::{FRAC_PI_2, TAU};

/// Bearing of the fixed pointer in the wheel's unrotated frame (top of the canvas).
pub const POINTER_BEARING: f64 = -FRAC_PI_2;

/// Maps any angle into [0, 2π).
pub fn normalize(angle: f64) -> f64 {
    if !angle.is_finite() {
        return 0.0;
    }
    let a = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if a >= TAU { 0.0 } else { a }
}

/// Angular width of one segment on a wheel with `n` segments.
pub fn segment_angle(n: usize) -> f64 {
    TAU / n.max(1) as f64
}

/// Index of the segment sitting under the pointer when the wheel rests at `rest_angle`.
pub fn segment_index_under_pointer(rest_angle: f64, n: usize) -> usize {
    if n == 0 {
        return 0;
    }
    let at_pointer = normalize(-rest_angle + POINTER_BEARING);
    let idx = (at_pointer / segment_angle(n)).floor();
    if idx < 0.0 {
        0
    } else {
        (idx as usize).min(n - 1)
    }
}

pub fn ease_out_cubic(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(3)
}

/// Rest angle that centers segment `index` under the pointer.
pub fn target_rest_angle(index: usize, n: usize) -> f64 {
    let seg = segment_angle(n);
    POINTER_BEARING - (index as f64 * seg + seg / 2.0)
}

/// Strictly forward rotation from `current` that ends on `target` after `turns` full revolutions.
pub fn forward_delta(current: f64, target: f64, turns: u32) -> f64 {
    turns as f64 * TAU + normalize(target - normalize(current))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_is_idempotent_and_in_range() {
        for &x in &[-100.0, -TAU, -1e-18, -0.5, 0.0, 0.5, TAU, 3.0 * TAU + 0.25, 1e9] {
            let once = normalize(x);
            assert!((0.0..TAU).contains(&once), "{} -> {}", x, once);
            assert_eq!(normalize(once), once);
        }
        assert_eq!(normalize(f64::NAN), 0.0);
    }

    #[test]
    fn pointer_index_always_in_range() {
        for n in 1..=16 {
            let mut angle = -50.0;
            while angle < 50.0 {
                assert!(segment_index_under_pointer(angle, n) < n);
                angle += 0.173;
            }
        }
        assert_eq!(segment_index_under_pointer(1.0, 0), 0);
    }

    #[test]
    fn easing_endpoints_and_monotonic() {
        assert_eq!(ease_out_cubic(0.0), 0.0);
        assert_eq!(ease_out_cubic(1.0), 1.0);
        let mut prev = 0.0;
        for i in 0..=1000 {
            let v = ease_out_cubic(i as f64 / 1000.0);
            assert!(v >= prev);
            prev = v;
        }
    }

    #[test]
    fn target_angle_puts_segment_under_pointer() {
        for n in 1..=12 {
            for index in 0..n {
                assert_eq!(segment_index_under_pointer(target_rest_angle(index, n), n), index);
            }
        }
    }

    #[test]
    fn forward_delta_spins_forward_and_lands_on_target() {
        let target = target_rest_angle(3, 7);
        for &current in &[0.0, 1.0, 5.9, 123.4, -2.0] {
            let delta = forward_delta(current, target, 12);
            assert!(delta >= 12.0 * TAU);
            assert!(delta < 13.0 * TAU);
            assert_eq!(segment_index_under_pointer(normalize(current + delta), 7), 3);
        }
    }
}
