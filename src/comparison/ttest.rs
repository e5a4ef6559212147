// Student's independent two-sample t-test
//
// Pooled-variance form (equal variances assumed), df = n1 + n2 - 2.
// The two-tailed p-value comes from the regularized incomplete beta
// function: p = I_{df/(df+t^2)}(df/2, 1/2).
//
// References:
// - Press et al. (2007), Numerical Recipes, 3rd ed., §6.4 (incomplete beta,
//   Lentz continued fraction)
// - Lanczos (1964), SIAM J. Numer. Anal. 1(1) (log-gamma)
// - ln_gamma, ln_beta and the incomplete beta continued fraction are adapted
//   from u-optim's special.rs (special functions module)

use super::descriptive::{mean, sample_variance, StatsError};

/// Result of a two-sample t-test
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TTestResult {
    /// t-statistic, `(mean(a) - mean(b)) / se`
    pub statistic: f64,

    /// Two-tailed p-value
    /// - near 0: the means almost certainly differ
    /// - near 1: the difference is indistinguishable from noise
    pub pvalue: f64,

    /// Degrees of freedom (n1 + n2 - 2)
    pub df: f64,
}

/// Compare two independent samples with Student's t-test
///
/// Both samples need at least two measurements. When the pooled variance is
/// zero the statistic is infinite (p = 0) if the means differ, and zero
/// (p = 1) if they are equal.
///
/// # Example
/// ```
/// use perfcmp::comparison::ttest_ind;
///
/// let baseline = [10.0, 12.0, 11.0, 13.0, 10.0];
/// let current = [25.0, 27.0, 26.0, 28.0, 25.0];
///
/// let result = ttest_ind(&baseline, &current).unwrap();
/// assert!(result.statistic < 0.0);
/// assert!(result.pvalue < 0.001);
/// ```
pub fn ttest_ind(a: &[f64], b: &[f64]) -> Result<TTestResult, StatsError> {
    let n1 = a.len();
    let n2 = b.len();
    if n1 < 2 {
        return Err(StatsError::TooFewSamples { len: n1 });
    }
    if n2 < 2 {
        return Err(StatsError::TooFewSamples { len: n2 });
    }

    let mean_a = mean(a).ok_or(StatsError::Empty)?;
    let mean_b = mean(b).ok_or(StatsError::Empty)?;
    let var_a = sample_variance(a).ok_or(StatsError::TooFewSamples { len: n1 })?;
    let var_b = sample_variance(b).ok_or(StatsError::TooFewSamples { len: n2 })?;

    let (n1, n2) = (n1 as f64, n2 as f64);
    let df = n1 + n2 - 2.0;
    let pooled = ((n1 - 1.0) * var_a + (n2 - 1.0) * var_b) / df;
    let se = (pooled * (1.0 / n1 + 1.0 / n2)).sqrt();
    let diff = mean_a - mean_b;

    if se == 0.0 {
        let (statistic, pvalue) = if diff == 0.0 {
            (0.0, 1.0)
        } else {
            (diff.signum() * f64::INFINITY, 0.0)
        };
        return Ok(TTestResult {
            statistic,
            pvalue,
            df,
        });
    }

    let statistic = diff / se;
    Ok(TTestResult {
        statistic,
        pvalue: student_t_two_tailed_p(statistic, df),
        df,
    })
}

/// Two-tailed p-value of Student's t-distribution with `df` degrees of freedom
///
/// Returns 1.0 for non-positive or non-finite `df`, 0.0 for an infinite `t`.
pub fn student_t_two_tailed_p(t: f64, df: f64) -> f64 {
    if !df.is_finite() || df <= 0.0 || t.is_nan() {
        return 1.0;
    }
    if t.is_infinite() {
        return 0.0;
    }
    let x = df / (df + t * t);
    regularized_incomplete_beta(x, df / 2.0, 0.5).clamp(0.0, 1.0)
}

/// Regularized incomplete beta function I_x(a, b)
fn regularized_incomplete_beta(x: f64, a: f64, b: f64) -> f64 {
    if x <= 0.0 {
        return 0.0;
    }
    if x >= 1.0 {
        return 1.0;
    }

    // I_x(a,b) = 1 - I_{1-x}(b,a) converges faster on this side
    if x > (a + 1.0) / (a + b + 2.0) {
        return 1.0 - regularized_incomplete_beta(1.0 - x, b, a);
    }

    let ln_front = a * x.ln() + b * (1.0 - x).ln() - ln_beta(a, b);
    ln_front.exp() / a * beta_continued_fraction(x, a, b)
}

/// Continued fraction for the incomplete beta function (modified Lentz)
fn beta_continued_fraction(x: f64, a: f64, b: f64) -> f64 {
    const MAX_ITER: usize = 300;
    const EPS: f64 = 1e-15;
    const TINY: f64 = 1e-300;

    let clamp_tiny = |v: f64| if v.abs() < TINY { TINY } else { v };

    let mut c = 1.0;
    let mut d = 1.0 / clamp_tiny(1.0 - (a + b) * x / (a + 1.0));
    let mut h = d;

    for m in 1..=MAX_ITER {
        let m = m as f64;

        let even = m * (b - m) * x / ((a + 2.0 * m - 1.0) * (a + 2.0 * m));
        d = 1.0 / clamp_tiny(1.0 + even * d);
        c = clamp_tiny(1.0 + even / c);
        h *= d * c;

        let odd = -(a + m) * (a + b + m) * x / ((a + 2.0 * m) * (a + 2.0 * m + 1.0));
        d = 1.0 / clamp_tiny(1.0 + odd * d);
        c = clamp_tiny(1.0 + odd / c);
        let delta = d * c;
        h *= delta;

        if (delta - 1.0).abs() < EPS {
            break;
        }
    }
    h
}

fn ln_beta(a: f64, b: f64) -> f64 {
    ln_gamma(a) + ln_gamma(b) - ln_gamma(a + b)
}

/// Lanczos approximation of ln Γ(x), relative error below 2e-10 for x > 0
fn ln_gamma(x: f64) -> f64 {
    #[allow(clippy::excessive_precision)]
    const COEFFICIENTS: [f64; 9] = [
        0.99999999999980993,
        676.5203681218851,
        -1259.1392167224028,
        771.32342877765313,
        -176.61502916214059,
        12.507343278686905,
        -0.13857109526572012,
        9.9843695780195716e-6,
        1.5056327351493116e-7,
    ];
    const G: f64 = 7.0;

    if x < 0.5 {
        let pi = std::f64::consts::PI;
        return (pi / (pi * x).sin()).ln() - ln_gamma(1.0 - x);
    }

    let x = x - 1.0;
    let mut sum = COEFFICIENTS[0];
    for (i, &c) in COEFFICIENTS[1..].iter().enumerate() {
        sum += c / (x + i as f64 + 1.0);
    }

    let t = x + G + 0.5;
    0.5 * (2.0 * std::f64::consts::PI).ln() + (x + 0.5) * t.ln() - t + sum.ln()
}
