//! Aggregation of colour-decomposition channels into full-colour and leading-colour series.

use super::error::{Error, Result};
use super::series::BinnedSeries;
use itertools::Itertools;
use rustc_hash::FxHashSet;

/// Sums all series of `iter`: central values are added, uncertainties are added in quadrature.
/// Returns `None` if `iter` is empty.
///
/// # Errors
///
/// Returns [`Error::MismatchedSeriesShape`] if not all series share the same bin layout.
pub fn aggregate<'a>(
    iter: impl IntoIterator<Item = &'a BinnedSeries>,
) -> Result<Option<BinnedSeries>> {
    let mut iter = iter.into_iter();

    iter.next().map_or(Ok(None), |first| {
        iter.try_fold(first.clone(), |sum, series| sum.quadrature_sum(series))
            .map(Some)
    })
}

/// Full-colour and leading-colour sums of a set of channels.
#[derive(Clone, Debug, PartialEq)]
pub struct Aggregate {
    /// Sum of all channels.
    pub fc: BinnedSeries,
    /// Sum of the leading-colour channels.
    pub lc: BinnedSeries,
}

impl Aggregate {
    /// Sums `channels`, a list of channel names together with their series, into the full-colour
    /// series and the channels named in `lc_channels` into the leading-colour series.
    ///
    /// # Errors
    ///
    /// Returns [`Error::General`] if `channels` is empty or if a channel of `lc_channels` is not
    /// part of `channels`, and [`Error::MismatchedSeriesShape`] if the series do not share the same
    /// bin layout.
    pub fn new(channels: &[(String, BinnedSeries)], lc_channels: &[String]) -> Result<Self> {
        let names: FxHashSet<_> = channels.iter().map(|(name, _)| name.as_str()).collect();
        let missing: Vec<_> = lc_channels
            .iter()
            .filter(|name| !names.contains(name.as_str()))
            .collect();

        if !missing.is_empty() {
            return Err(Error::General(format!(
                "leading-colour channel(s) {} not found among the channels {}",
                missing.iter().join(", "),
                channels.iter().map(|(name, _)| name).join(", ")
            )));
        }

        let lc_channels: FxHashSet<_> = lc_channels.iter().map(String::as_str).collect();

        let fc = aggregate(channels.iter().map(|(_, series)| series))?
            .ok_or_else(|| Error::General("no channels to aggregate".to_owned()))?;
        let lc = aggregate(
            channels
                .iter()
                .filter(|(name, _)| lc_channels.contains(name.as_str()))
                .map(|(_, series)| series),
        )?
        .ok_or_else(|| Error::General("no leading-colour channels to aggregate".to_owned()))?;

        Ok(Self { fc, lc })
    }
}
