//! Small numerically-stable math utilities used across probability code.

/// Stable `log(1 + exp(x))`.
///
/// Branchless: `log(1+exp(x)) = max(x,0) + log(1+exp(-|x|))`.
/// `f64::max` compiles to `maxsd` (no branch), single unconditional `exp(-|x|)`.
#[inline]
pub fn log1pexp(x: f64) -> f64 {
    let abs_x = x.abs();
    let e = (-abs_x).exp(); // always in (0, 1], no overflow
    x.max(0.0) + e.ln_1p()
}

/// Stable sigmoid: `1 / (1 + exp(-x))`.
///
/// Branchless core: single `exp(-|x|)`, then `cmov` for the sign flip.
#[inline]
pub fn sigmoid(x: f64) -> f64 {
    let abs_x = x.abs();
    let e = (-abs_x).exp();
    let recip = 1.0 / (1.0 + e);
    // x >= 0: sigmoid = 1/(1+exp(-x)) = recip
    // x <  0: sigmoid = exp(x)/(1+exp(x)) = e/(1+e) = e*recip
    if x >= 0.0 { recip } else { e * recip }
}

/// Fused `(log(1+exp(x)), sigmoid(x))` — single `exp()` call.
///
/// Equivalent to `(log1pexp(x), sigmoid(x))` but avoids computing the
/// exponential twice. In Bernoulli-logit inner loops where the density and
/// its gradient are evaluated together, this halves the transcendental-math
/// cost.
///
/// Branchless core: single unconditional `exp(-|x|)`.
/// `log1pexp(x) = max(x,0) + ln(1+exp(-|x|))` is algebraically exact.
/// The sigmoid branch compiles to `cmov` on x86.
#[inline(always)]
pub fn log1pexp_and_sigmoid(x: f64) -> (f64, f64) {
    let abs_x = x.abs();
    let e = (-abs_x).exp(); // always in (0, 1], no overflow
    let log_term = x.max(0.0) + e.ln_1p();
    let recip = 1.0 / (1.0 + e);
    let sigma = if x >= 0.0 { recip } else { e * recip };
    (log_term, sigma)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log1pexp_matches_naive_moderate_values() {
        let xs: [f64; 7] = [-10.0, -2.0, -0.1, 0.0, 0.1, 2.0, 10.0];
        for x in xs {
            let naive = (1.0 + x.exp()).ln();
            let stable = log1pexp(x);
            assert!((naive - stable).abs() < 1e-12, "x={}: {} vs {}", x, naive, stable);
        }
    }

    #[test]
    fn test_log1pexp_is_finite_extremes() {
        let xs: [f64; 4] = [-1e6, -100.0, 100.0, 1e6];
        for x in xs {
            let y = log1pexp(x);
            assert!(y.is_finite(), "x={} produced {}", x, y);
        }
        assert!((log1pexp(1e6) - 1e6).abs() < 1e-6);
    }

    #[test]
    fn test_sigmoid_bounds_and_symmetry() {
        let xs: [f64; 7] = [-50.0, -10.0, -1.0, 0.0, 1.0, 10.0, 50.0];
        for x in xs {
            let s = sigmoid(x);
            assert!((0.0..=1.0).contains(&s), "x={} produced {}", x, s);
            let sum = sigmoid(x) + sigmoid(-x);
            assert!((sum - 1.0).abs() < 1e-12, "x={}: s(x)+s(-x)={}", x, sum);
        }
        assert!((sigmoid(0.0) - 0.5).abs() < 1e-15);
    }

    #[test]
    fn test_fused_matches_separate() {
        let xs: [f64; 9] = [-1e4, -50.0, -2.0, -0.1, 0.0, 0.1, 2.0, 50.0, 1e4];
        for x in xs {
            let (lp, s) = log1pexp_and_sigmoid(x);
            assert_eq!(lp, log1pexp(x), "x={}", x);
            assert_eq!(s, sigmoid(x), "x={}", x);
        }
    }
}
