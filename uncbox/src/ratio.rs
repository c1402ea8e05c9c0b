//! Error-propagated division of binned series.

use super::error::Result;
use super::series::BinnedSeries;
use ndarray::Zip;

/// Divides `numerator` by `denominator` bin by bin. The uncertainty of the quotient is obtained by
/// adding the relative uncertainties of both series in quadrature, which assumes that both series
/// are uncorrelated.
///
/// Bins where either series vanishes are not treated specially: the result follows IEEE 754 and
/// contains infinities or NaNs.
///
/// # Errors
///
/// Returns [`Error::MismatchedSeriesShape`](super::error::Error::MismatchedSeriesShape) if both
/// series do not share the same bin layout.
pub fn ratio(numerator: &BinnedSeries, denominator: &BinnedSeries) -> Result<BinnedSeries> {
    numerator.check_compatible(denominator)?;

    let val = &numerator.val() / &denominator.val();
    let err = Zip::from(&val)
        .and(numerator.val())
        .and(numerator.err())
        .and(denominator.val())
        .and(denominator.err())
        .map_collect(|ratio, num_val, num_err, den_val, den_err| {
            ratio * ((num_err / num_val).powi(2) + (den_err / den_val).powi(2)).sqrt()
        });

    Ok(numerator.with_val_err(val, err))
}
