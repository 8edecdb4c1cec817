//! Closed-form root finding used by the intersection routines.

/// Solve `a*t^2 + b*t + c = 0` for real roots.
///
/// Returns the roots sorted ascending, or `None` when the discriminant is
/// negative or the equation is not quadratic (`a == 0`). A zero
/// discriminant yields the doubled root in both slots.
pub fn solve_quadratic(a: f32, b: f32, c: f32) -> Option<(f32, f32)> {
    if a == 0.0 {
        return None;
    }

    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        return None;
    }
    if discriminant == 0.0 {
        let root = -0.5 * b / a;
        return Some((root, root));
    }

    // numerically stable form: q keeps the sign of b
    let q = if b > 0.0 {
        -0.5 * (b + discriminant.sqrt())
    } else {
        -0.5 * (b - discriminant.sqrt())
    };
    let t0 = q / a;
    let t1 = c / q;

    Some(if t0 <= t1 { (t0, t1) } else { (t1, t0) })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_roots_sorted() {
        // t^2 - 3t + 2 = 0 -> t = 1, 2
        let (t0, t1) = solve_quadratic(1.0, -3.0, 2.0).unwrap();
        assert!((t0 - 1.0).abs() < 1e-6);
        assert!((t1 - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_roots_sorted_for_positive_b() {
        // t^2 + 3t + 2 = 0 -> t = -2, -1
        let (t0, t1) = solve_quadratic(1.0, 3.0, 2.0).unwrap();
        assert!((t0 + 2.0).abs() < 1e-6);
        assert!((t1 + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_negative_discriminant() {
        // t^2 + 1 = 0 has no real roots
        assert!(solve_quadratic(1.0, 0.0, 1.0).is_none());
    }

    #[test]
    fn test_double_root() {
        // (t - 1)^2 = 0
        let (t0, t1) = solve_quadratic(1.0, -2.0, 1.0).unwrap();
        assert_eq!(t0, t1);
        assert!((t0 - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_degenerate_not_quadratic() {
        assert!(solve_quadratic(0.0, 2.0, 1.0).is_none());
    }
}
