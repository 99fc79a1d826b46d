//! Discounting, net present value, and internal rate of return.

/// Absolute NPV tolerance at which a rate counts as a root.
const IRR_TOLERANCE: f64 = 1e-9;
/// Iteration cap for both root finders.
const MAX_ITERATIONS: usize = 200;
/// Lowest rate tried while bracketing; rates at or below -1 are undefined.
const BRACKET_LOW: f64 = -0.99;
/// Highest rate tried while bracketing.
const BRACKET_HIGH: f64 = 10.0;
/// Grid spacing used while bracketing.
const BRACKET_STEP: f64 = 0.01;

/// Discounts each entry by its position: `c[i] / (1 + rate)^i`.
///
/// Entry 0 (the investment) is left as is.
///
/// # Examples
///
/// ```
/// use solar_savings::finance::npv::discount;
///
/// let d = discount(&[-100.0, 110.0, 121.0], 0.10);
/// assert!((d[1] - 100.0).abs() < 1e-9);
/// assert!((d[2] - 100.0).abs() < 1e-9);
/// ```
pub fn discount(cash_flows: &[f64], rate: f64) -> Vec<f64> {
    cash_flows
        .iter()
        .zip(0i32..)
        .map(|(c, i)| c / (1.0 + rate).powi(i))
        .collect()
}

/// Net present value: the sum of the discounted series.
pub fn npv(cash_flows: &[f64], rate: f64) -> f64 {
    discount(cash_flows, rate).iter().sum()
}

/// First derivative of [`npv`] with respect to the rate.
fn npv_derivative(cash_flows: &[f64], rate: f64) -> f64 {
    cash_flows
        .iter()
        .zip(0i32..)
        .skip(1)
        .map(|(c, i)| -f64::from(i) * c / (1.0 + rate).powi(i + 1))
        .sum()
}

/// Whether the series contains both a strictly positive and a strictly
/// negative entry. Without one, no rate can zero the NPV.
pub fn has_sign_change(cash_flows: &[f64]) -> bool {
    cash_flows.iter().any(|&c| c > 0.0) && cash_flows.iter().any(|&c| c < 0.0)
}

/// Internal rate of return: the rate at which the undiscounted series has
/// zero NPV.
///
/// Tries Newton-Raphson from 10% first and falls back to bisection over the
/// first sign change found on a rate grid in `[-0.99, 10]`. Returns `None`
/// when the series has no sign change or no root could be bracketed.
///
/// # Examples
///
/// ```
/// use solar_savings::finance::npv::irr;
///
/// let rate = irr(&[-100.0, 110.0]).unwrap();
/// assert!((rate - 0.10).abs() < 1e-9);
/// assert_eq!(irr(&[100.0, 50.0]), None);
/// ```
pub fn irr(cash_flows: &[f64]) -> Option<f64> {
    if !has_sign_change(cash_flows) {
        return None;
    }
    newton(cash_flows, 0.1).or_else(|| bisect(cash_flows))
}

fn newton(cash_flows: &[f64], guess: f64) -> Option<f64> {
    let mut rate = guess;
    for _ in 0..MAX_ITERATIONS {
        let value = npv(cash_flows, rate);
        if value.abs() < IRR_TOLERANCE {
            return Some(rate);
        }

        let slope = npv_derivative(cash_flows, rate);
        if slope.abs() < 1e-12 {
            return None;
        }

        let next = rate - value / slope;
        if !next.is_finite() || next <= -1.0 {
            return None;
        }
        if (next - rate).abs() < 1e-14 {
            return Some(next);
        }
        rate = next;
    }
    None
}

fn bisect(cash_flows: &[f64]) -> Option<f64> {
    let (mut lo, mut hi) = bracket(cash_flows)?;
    let mut f_lo = npv(cash_flows, lo);

    for _ in 0..MAX_ITERATIONS {
        let mid = 0.5 * (lo + hi);
        let f_mid = npv(cash_flows, mid);
        if f_mid.abs() < IRR_TOLERANCE || (hi - lo) < 1e-14 {
            return Some(mid);
        }
        if f_lo.signum() == f_mid.signum() {
            lo = mid;
            f_lo = f_mid;
        } else {
            hi = mid;
        }
    }
    Some(0.5 * (lo + hi))
}

fn bracket(cash_flows: &[f64]) -> Option<(f64, f64)> {
    let steps = ((BRACKET_HIGH - BRACKET_LOW) / BRACKET_STEP).round() as usize;
    let rates = (0..=steps).map(|k| BRACKET_LOW + k as f64 * BRACKET_STEP);
    let mut prev: Option<(f64, f64)> = None;
    for rate in rates {
        let value = npv(cash_flows, rate);
        if let Some((prev_rate, prev_value)) = prev {
            if prev_value.signum() != value.signum() {
                return Some((prev_rate, rate));
            }
        }
        prev = Some((rate, value));
    }
    None
}

/// Rounds to two decimal places, the precision rates are reported at.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
