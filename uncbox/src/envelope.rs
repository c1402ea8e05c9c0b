//! Uncertainty envelopes built from theory nuisance parameters.
//!
//! The envelope models a theory systematic as a deformation of the central value spanned by a
//! polynomial basis of a given degree. For each bin the half-width of the envelope is
//!
//! ```text
//! scale * |val| * sqrt(sum_{j = 0}^{degree} b_j(xmid)^2)
//! ```
//!
//! where `b_j` is the `j`-th basis function. For the Bernstein basis the degree of the basis
//! itself is the degree of the envelope.

use super::basis::{BasisConfig, BasisKind};
use super::error::{Error, Result};
use super::ratio;
use super::series::BinnedSeries;
use ndarray::{Array1, ArrayView1, Zip};

/// Upper and lower bound of an envelope. Both share the bin layout and the uncertainties of the
/// series they were computed from.
#[derive(Clone, Debug, PartialEq)]
pub struct EnvelopeResult {
    /// Series shifted up by the envelope half-width.
    pub upper: BinnedSeries,
    /// Series shifted down by the envelope half-width.
    pub lower: BinnedSeries,
}

impl EnvelopeResult {
    /// Divides both bounds by `reference`, see [`ratio::ratio`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::MismatchedSeriesShape`] if the layout of `reference` differs.
    pub fn ratio_to(&self, reference: &BinnedSeries) -> Result<Self> {
        Ok(Self {
            upper: ratio::ratio(&self.upper, reference)?,
            lower: ratio::ratio(&self.lower, reference)?,
        })
    }
}

/// Returns `sqrt(sum_{j = 0}^{degree} b_j(x)^2)` for every element of `x`.
///
/// # Errors
///
/// Never fails for the bases defined in [`BasisKind`]; an error signals a violated basis-index
/// precondition.
pub fn magnitude(config: &BasisConfig, x: ArrayView1<f64>) -> Result<Array1<f64>> {
    let degree = config.degree();
    let mut sum = Array1::<f64>::zeros(x.len());

    for j in 0..=degree {
        let values = config.kind().evaluate_array(degree, j, x)?;
        sum += &values.mapv(|v| v * v);
    }

    Ok(sum.mapv_into(f64::sqrt))
}

/// Computes the envelope of `series` for the basis `kind` and the given `degree`, where `scale` is
/// the overall normalization, typically `1 / N_c^2`.
///
/// # Errors
///
/// Returns [`Error::InvalidEnvelopeConfig`] if `degree` is negative.
pub fn compute_envelope(
    series: &BinnedSeries,
    scale: f64,
    degree: i64,
    kind: BasisKind,
) -> Result<EnvelopeResult> {
    compute_envelope_with(series, scale, &BasisConfig::new(kind, degree)?)
}

/// Same as [`compute_envelope`] with an already validated [`BasisConfig`].
///
/// # Errors
///
/// Never fails for a valid configuration; an error signals a violated basis-index precondition.
pub fn compute_envelope_with(
    series: &BinnedSeries,
    scale: f64,
    config: &BasisConfig,
) -> Result<EnvelopeResult> {
    let magnitude = magnitude(config, series.xmid())?;
    let uncertainty = Zip::from(series.val())
        .and(&magnitude)
        .map_collect(|val, mag| scale * val.abs() * mag);

    Ok(EnvelopeResult {
        upper: series.with_val(&series.val() + &uncertainty),
        lower: series.with_val(&series.val() - &uncertainty),
    })
}

/// Evaluates the deformation `sum_{nu = 0}^{k} b_nu(x) params[nu]`, where for the Bernstein basis
/// `b_nu` has degree `k`.
///
/// # Errors
///
/// Returns [`Error::InvalidEnvelopeConfig`] if `params` has `k` or fewer entries.
pub fn tnp(kind: BasisKind, k: u32, params: &[f64], x: f64) -> Result<f64> {
    check_tnp_params(k, params)?;

    params
        .iter()
        .zip(0..=k)
        .map(|(param, nu)| kind.evaluate(k, nu, x).map(|value| value * param))
        .sum()
}

/// Same as [`tnp`], but for every element of `x`.
///
/// # Errors
///
/// Returns [`Error::InvalidEnvelopeConfig`] if `params` has `k` or fewer entries.
pub fn tnp_array(
    kind: BasisKind,
    k: u32,
    params: &[f64],
    x: ArrayView1<f64>,
) -> Result<Array1<f64>> {
    check_tnp_params(k, params)?;

    let mut result = Array1::<f64>::zeros(x.len());

    for (&param, nu) in params.iter().zip(0..=k) {
        result.scaled_add(param, &kind.evaluate_array(k, nu, x)?);
    }

    Ok(result)
}

fn check_tnp_params(k: u32, params: &[f64]) -> Result<()> {
    if usize::try_from(k).map_or(true, |k| k >= params.len()) {
        return Err(Error::InvalidEnvelopeConfig(format!(
            "a deformation of degree {k} needs {} parameters, but {} were given",
            u64::from(k) + 1,
            params.len()
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::BinLayout;
    use float_cmp::assert_approx_eq;
    use ndarray::array;
    use std::sync::Arc;

    fn series(xmid: &[f64], val: &[f64], err: &[f64]) -> BinnedSeries {
        let xlow = xmid.iter().map(|x| x - 0.05).collect();
        let xhigh = xmid.iter().map(|x| x + 0.05).collect();
        let layout = Arc::new(BinLayout::new(xlow, xmid.to_vec(), xhigh).unwrap());

        BinnedSeries::new(layout, val.to_vec(), err.to_vec()).unwrap()
    }

    #[test]
    fn single_bin_bernstein() {
        let input = series(&[0.5], &[10.0], &[0.5]);
        let result = compute_envelope(&input, 1.0 / 9.0, 2, BasisKind::Bernstein).unwrap();
        let uncertainty = 10.0 / 9.0 * 0.375_f64.sqrt();

        assert_approx_eq!(f64, result.upper.val()[0], 10.0 + uncertainty, ulps = 4);
        assert_approx_eq!(f64, result.lower.val()[0], 10.0 - uncertainty, ulps = 4);
        assert_approx_eq!(f64, result.upper.val()[0], 10.6805, epsilon = 1e-4);
        assert_approx_eq!(f64, result.lower.val()[0], 9.3195, epsilon = 1e-4);

        // the statistical uncertainty is not touched
        assert_eq!(result.upper.err()[0], 0.5);
        assert_eq!(result.lower.err()[0], 0.5);
    }

    #[test]
    fn high_bernstein_degrees() {
        let input = series(&[0.5], &[10.0], &[0.5]);

        let result = compute_envelope(&input, 1.0 / 9.0, 70, BasisKind::Bernstein).unwrap();
        assert_approx_eq!(f64, result.upper.val()[0], 10.288275512396899, epsilon = 1e-12);

        let result = compute_envelope(&input, 1.0 / 9.0, 140, BasisKind::Bernstein).unwrap();
        assert_approx_eq!(f64, result.upper.val()[0], 10.2425, epsilon = 1e-4);
        assert_approx_eq!(f64, result.upper.val()[0] + result.lower.val()[0], 20.0, ulps = 4);
    }

    #[test]
    fn degree_zero() {
        let input = series(&[0.05, 0.35, 0.9], &[2.0, -4.0, 8.0], &[0.1, 0.2, 0.3]);
        let scale = 1.0 / 9.0;

        for kind in [BasisKind::Bernstein, BasisKind::Chebyshev] {
            let result = compute_envelope(&input, scale, 0, kind).unwrap();

            for (bin, &val) in input.val().iter().enumerate() {
                assert_eq!(result.upper.val()[bin], val + scale * val.abs());
                assert_eq!(result.lower.val()[bin], val - scale * val.abs());
            }
        }
    }

    #[test]
    fn zero_value_gives_zero_width() {
        let input = series(&[0.2, 0.4], &[0.0, 3.0], &[0.1, 0.1]);
        let result = compute_envelope(&input, 0.5, 3, BasisKind::Chebyshev).unwrap();

        assert_eq!(result.upper.val()[0], 0.0);
        assert_eq!(result.lower.val()[0], 0.0);
        assert!(result.upper.val()[1] > result.lower.val()[1]);
    }

    #[test]
    fn negative_values() {
        let input = series(&[0.5], &[-10.0], &[0.5]);
        let result = compute_envelope(&input, 1.0 / 9.0, 2, BasisKind::Bernstein).unwrap();

        assert!(result.upper.val()[0] > -10.0);
        assert!(result.lower.val()[0] < -10.0);
        assert_approx_eq!(f64, result.upper.val()[0], -9.3195, epsilon = 1e-4);
    }

    #[test]
    fn chebyshev_magnitude() {
        let config = BasisConfig::new(BasisKind::Chebyshev, 2).unwrap();
        let x = array![0.0, 0.5, 1.0];
        let result = magnitude(&config, x.view()).unwrap();

        // T0 = 1, T1 = x, T2 = 2x^2 - 1
        assert_approx_eq!(f64, result[0], 2.0_f64.sqrt(), ulps = 2);
        assert_approx_eq!(f64, result[1], 1.5_f64.sqrt(), ulps = 2);
        assert_approx_eq!(f64, result[2], 3.0_f64.sqrt(), ulps = 2);
    }

    #[test]
    fn negative_degree() {
        let input = series(&[0.5], &[10.0], &[0.5]);

        assert!(matches!(
            compute_envelope(&input, 1.0, -1, BasisKind::Bernstein),
            Err(Error::InvalidEnvelopeConfig(_))
        ));
    }

    #[test]
    fn ratio_of_envelope() {
        let input = series(&[0.5, 0.7], &[10.0, 5.0], &[0.5, 0.25]);
        let result = compute_envelope(&input, 1.0 / 9.0, 0, BasisKind::Bernstein)
            .unwrap()
            .ratio_to(&input)
            .unwrap();

        for bin in 0..2 {
            assert_approx_eq!(f64, result.upper.val()[bin], 1.0 + 1.0 / 9.0, epsilon = 1e-14);
            assert_approx_eq!(f64, result.lower.val()[bin], 1.0 - 1.0 / 9.0, epsilon = 1e-14);
        }
    }

    #[test]
    fn tnp_deformation() {
        // with all parameters equal to one the Bernstein deformation is a partition of unity
        for x in [0.0, 0.3, 0.5, 1.0] {
            assert_approx_eq!(
                f64,
                tnp(BasisKind::Bernstein, 2, &[1.0, 1.0, 1.0], x).unwrap(),
                1.0,
                ulps = 4
            );
        }

        // 0.5 T0 - T1 + 0.25 T2 at x = 0.5
        assert_approx_eq!(
            f64,
            tnp(BasisKind::Chebyshev, 2, &[0.5, -1.0, 0.25], 0.5).unwrap(),
            0.5 - 0.5 - 0.125,
            ulps = 4
        );

        // additional parameters are not used
        assert_eq!(
            tnp(BasisKind::Chebyshev, 1, &[2.0, 3.0, 100.0], 0.5).unwrap(),
            3.5
        );

        assert!(matches!(
            tnp(BasisKind::Bernstein, 2, &[1.0, 1.0], 0.5),
            Err(Error::InvalidEnvelopeConfig(_))
        ));
    }

    #[test]
    fn tnp_array_matches_scalar() {
        let x = array![0.1, 0.5, 0.9];
        let params = [0.3, -0.7, 1.1, 0.2];

        for kind in [BasisKind::Bernstein, BasisKind::Chebyshev] {
            let values = tnp_array(kind, 3, &params, x.view()).unwrap();

            for (&x, &value) in x.iter().zip(values.iter()) {
                assert_approx_eq!(f64, value, tnp(kind, 3, &params, x).unwrap(), epsilon = 1e-14);
            }
        }
    }
}
