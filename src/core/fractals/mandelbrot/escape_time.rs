use crate::core::data::complex::Complex;

pub const ESCAPE_RADIUS_SQUARED: f64 = 4.0;

/// Lower bound on `log2(|z|²)` before the outer logarithm.
const SMOOTHING_LOG_FLOOR: f64 = 1e-10;

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum EscapeTime {
    /// `|z|² > 4` after `iterations` steps; `smooth` is the fractional count.
    Escaped { iterations: u32, smooth: f64 },
    /// Still bounded after the full iteration budget.
    Bounded,
}

/// Iterates `z ← z² + c` from `z = 0` for at most `max_iterations` steps.
#[must_use]
pub fn escape_time(c: Complex, max_iterations: u32) -> EscapeTime {
    let mut z = Complex::new(0.0, 0.0);
    let mut iteration = 0;

    while iteration < max_iterations && z.magnitude_squared() <= ESCAPE_RADIUS_SQUARED {
        z = z * z + c;
        iteration += 1;
    }

    if iteration < max_iterations {
        EscapeTime::Escaped {
            iterations: iteration,
            smooth: smooth_iteration_count(iteration, z.magnitude_squared()),
        }
    } else {
        EscapeTime::Bounded
    }
}

/// `μ = n + 1 − log2(log2(|z|²))`
#[must_use]
pub fn smooth_iteration_count(iterations: u32, magnitude_squared: f64) -> f64 {
    f64::from(iterations) + 1.0 - magnitude_squared.log2().max(SMOOTHING_LOG_FLOOR).log2()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_origin_is_bounded() {
        assert_eq!(escape_time(Complex::new(0.0, 0.0), 100), EscapeTime::Bounded);
    }

    #[test]
    fn test_main_cardioid_point_is_bounded() {
        assert_eq!(escape_time(Complex::new(-0.5, 0.0), 500), EscapeTime::Bounded);
    }

    #[test]
    fn test_far_point_escapes_after_one_step() {
        match escape_time(Complex::new(3.0, 0.0), 20) {
            EscapeTime::Escaped { iterations, smooth } => {
                assert_eq!(iterations, 1);
                // |z|² = 9
                let expected = 2.0 - 9.0_f64.log2().log2();
                assert!((smooth - expected).abs() < 1e-12);
            }
            EscapeTime::Bounded => panic!("point outside radius 2 must escape"),
        }
    }

    #[test]
    fn test_escape_on_last_allowed_step_counts_as_escaped() {
        // c = 1: z goes 0, 1, 2, 5; |z|² first exceeds 4 after 3 steps
        assert!(matches!(
            escape_time(Complex::new(1.0, 0.0), 4),
            EscapeTime::Escaped { iterations: 3, .. }
        ));
        assert_eq!(escape_time(Complex::new(1.0, 0.0), 3), EscapeTime::Bounded);
    }

    #[test]
    fn test_is_deterministic() {
        let c = Complex::new(-0.7436, 0.1318);
        assert_eq!(escape_time(c, 300), escape_time(c, 300));
    }

    #[test]
    fn test_smoothing_floor_avoids_nan() {
        assert!(smooth_iteration_count(1, 1.0).is_finite());
    }
}
