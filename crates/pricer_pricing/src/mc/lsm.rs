//! Longstaff-Schwartz least-squares Monte Carlo for early exercise.
//!
//! Backward induction over stored paths. At each exercise date the
//! discounted realised cash flows of in-the-money paths are regressed on
//! `{1, x, x²}` with `x = S / K`; a path exercises when its intrinsic value
//! beats the fitted continuation value.

use pricer_core::types::{OptionType, PriceEstimate};

/// Number of regression basis functions.
const BASIS_SIZE: usize = 3;

/// Pivots below this magnitude mark the normal equations as singular.
const PIVOT_TOLERANCE: f64 = 1e-12;

#[inline]
fn basis(x: f64) -> [f64; BASIS_SIZE] {
    [1.0, x, x * x]
}

#[inline]
fn continuation(beta: &[f64; BASIS_SIZE], x: f64) -> f64 {
    let b = basis(x);
    beta[0] * b[0] + beta[1] * b[1] + beta[2] * b[2]
}

/// Ordinary least squares of `y` on the quadratic basis in `x`.
///
/// Returns `None` if the normal equations are singular.
pub(crate) fn regress<I>(samples: I) -> Option<[f64; BASIS_SIZE]>
where
    I: IntoIterator<Item = (f64, f64)>,
{
    let mut a = [[0.0; BASIS_SIZE]; BASIS_SIZE];
    let mut rhs = [0.0; BASIS_SIZE];
    for (x, y) in samples {
        let b = basis(x);
        for i in 0..BASIS_SIZE {
            rhs[i] += b[i] * y;
            for j in 0..BASIS_SIZE {
                a[i][j] += b[i] * b[j];
            }
        }
    }
    solve(a, rhs)
}

/// Gaussian elimination with partial pivoting.
fn solve(
    mut a: [[f64; BASIS_SIZE]; BASIS_SIZE],
    mut rhs: [f64; BASIS_SIZE],
) -> Option<[f64; BASIS_SIZE]> {
    let scale = a[0][0].abs().max(1.0);
    for col in 0..BASIS_SIZE {
        let pivot_row = (col..BASIS_SIZE)
            .max_by(|&i, &j| a[i][col].abs().total_cmp(&a[j][col].abs()))?;
        if a[pivot_row][col].abs() < PIVOT_TOLERANCE * scale {
            return None;
        }
        a.swap(col, pivot_row);
        rhs.swap(col, pivot_row);

        for row in (col + 1)..BASIS_SIZE {
            let factor = a[row][col] / a[col][col];
            for k in col..BASIS_SIZE {
                a[row][k] -= factor * a[col][k];
            }
            rhs[row] -= factor * rhs[col];
        }
    }

    let mut beta = [0.0; BASIS_SIZE];
    for row in (0..BASIS_SIZE).rev() {
        let tail: f64 = ((row + 1)..BASIS_SIZE).map(|k| a[row][k] * beta[k]).sum();
        beta[row] = (rhs[row] - tail) / a[row][row];
    }
    beta.iter().all(|b| b.is_finite()).then_some(beta)
}

/// Values an American option on row-major paths `S_0..S_N`.
///
/// `step_discount` is `exp(-r dt)`. The returned estimate is the present
/// value at `t = 0`, floored at immediate exercise.
pub(crate) fn longstaff_schwartz(
    paths: &[f64],
    n_steps: usize,
    strike: f64,
    option_type: OptionType,
    step_discount: f64,
) -> PriceEstimate {
    let row = n_steps + 1;
    let n_paths = paths.len() / row;
    if n_paths == 0 {
        return PriceEstimate::default();
    }
    let spot = paths[0];
    let scale = if strike > 0.0 { strike } else { spot };

    // Cash flow of each path, discounted to the current step
    let mut values: Vec<f64> = paths
        .chunks_exact(row)
        .map(|path| option_type.intrinsic(path[n_steps], strike))
        .collect();
    let mut in_the_money: Vec<usize> = Vec::with_capacity(n_paths);

    for step in (1..n_steps).rev() {
        for value in values.iter_mut() {
            *value *= step_discount;
        }

        in_the_money.clear();
        in_the_money.extend(
            (0..n_paths).filter(|&i| option_type.intrinsic(paths[i * row + step], strike) > 0.0),
        );
        if in_the_money.len() < BASIS_SIZE {
            continue;
        }

        let Some(beta) = regress(
            in_the_money
                .iter()
                .map(|&i| (paths[i * row + step] / scale, values[i])),
        ) else {
            continue;
        };

        for &i in &in_the_money {
            let s = paths[i * row + step];
            let exercise = option_type.intrinsic(s, strike);
            if exercise > continuation(&beta, s / scale) {
                values[i] = exercise;
            }
        }
    }

    for value in values.iter_mut() {
        *value *= step_discount;
    }

    let held = PriceEstimate::from_samples(&values);
    let immediate = option_type.intrinsic(spot, strike);
    if immediate > held.price {
        PriceEstimate::exact(immediate)
    } else {
        held
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mc::{generate_gbm_paths, GbmParams, GbmStepper};
    use crate::rng::PricerRng;
    use approx::assert_relative_eq;

    #[test]
    fn test_regress_recovers_quadratic() {
        let samples: Vec<(f64, f64)> = (0..50)
            .map(|i| {
                let x = 0.5 + i as f64 * 0.02;
                (x, 2.0 - 3.0 * x + 0.5 * x * x)
            })
            .collect();
        let beta = regress(samples).unwrap();
        assert_relative_eq!(beta[0], 2.0, epsilon = 1e-8);
        assert_relative_eq!(beta[1], -3.0, epsilon = 1e-8);
        assert_relative_eq!(beta[2], 0.5, epsilon = 1e-8);
    }

    #[test]
    fn test_regress_singular() {
        // Every sample at the same x: the basis columns are collinear
        let samples = vec![(1.0, 1.0); 10];
        assert!(regress(samples).is_none());
    }

    #[test]
    fn test_deep_itm_put_exercised_immediately() {
        let params = GbmParams::new(50.0, 0.1, 0.2, 1.0);
        let stepper = GbmStepper::new(params, 50);
        let paths = generate_gbm_paths(&stepper, &mut PricerRng::from_seed(3), 5_000);
        let estimate = longstaff_schwartz(&paths, 50, 100.0, OptionType::Put, (-0.1_f64 * 0.02).exp());
        assert_eq!(estimate, PriceEstimate::exact(50.0));
    }

    #[test]
    fn test_single_step_is_european() {
        let params = GbmParams::new(100.0, 0.04, 0.2, 1.0);
        let stepper = GbmStepper::new(params, 1);
        let paths = generate_gbm_paths(&stepper, &mut PricerRng::from_seed(9), 4_000);
        let df = params.discount_factor();
        let estimate = longstaff_schwartz(&paths, 1, 100.0, OptionType::Put, df);

        let european = paths
            .chunks_exact(2)
            .map(|p| (100.0 - p[1]).max(0.0) * df)
            .sum::<f64>()
            / 4_000.0;
        assert_relative_eq!(estimate.price, european, epsilon = 1e-9);
    }
}
