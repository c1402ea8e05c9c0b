//! Module containing the binned series that every computation of this crate operates on.

use super::error::{Error, Result};
use float_cmp::approx_eq;
use ndarray::{Array1, ArrayView1, Zip};
use std::sync::Arc;

/// Left edges, midpoints and right edges of an ordered sequence of bins.
#[derive(Clone, Debug, PartialEq)]
pub struct BinLayout {
    xlow: Array1<f64>,
    xmid: Array1<f64>,
    xhigh: Array1<f64>,
}

impl BinLayout {
    /// Constructor.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MismatchedSeriesShape`] if the three vectors do not have the same length.
    pub fn new(xlow: Vec<f64>, xmid: Vec<f64>, xhigh: Vec<f64>) -> Result<Self> {
        for len in [xmid.len(), xhigh.len()] {
            if len != xlow.len() {
                return Err(Error::MismatchedSeriesShape {
                    lhs: xlow.len(),
                    rhs: len,
                });
            }
        }

        Ok(Self {
            xlow: Array1::from_vec(xlow),
            xmid: Array1::from_vec(xmid),
            xhigh: Array1::from_vec(xhigh),
        })
    }

    /// Returns the number of bins.
    #[must_use]
    pub fn bins(&self) -> usize {
        self.xmid.len()
    }

    /// Left bin edges.
    #[must_use]
    pub fn xlow(&self) -> ArrayView1<'_, f64> {
        self.xlow.view()
    }

    /// Bin midpoints.
    #[must_use]
    pub fn xmid(&self) -> ArrayView1<'_, f64> {
        self.xmid.view()
    }

    /// Right bin edges.
    #[must_use]
    pub fn xhigh(&self) -> ArrayView1<'_, f64> {
        self.xhigh.view()
    }

    /// Returns `true` if `self` and `other` describe the same bins, up to a few ULPs.
    #[must_use]
    pub fn is_compatible(&self, other: &Self) -> bool {
        let close = |lhs: ArrayView1<f64>, rhs: ArrayView1<f64>| {
            lhs.iter()
                .zip(rhs.iter())
                .all(|(&lhs, &rhs)| approx_eq!(f64, lhs, rhs, ulps = 8))
        };

        (self.bins() == other.bins())
            && close(self.xlow(), other.xlow())
            && close(self.xmid(), other.xmid())
            && close(self.xhigh(), other.xhigh())
    }
}

/// Binned central values with absolute uncertainties. Series are never modified in place; every
/// transformation returns a new series that shares the [`BinLayout`] of its input.
#[derive(Clone, Debug, PartialEq)]
pub struct BinnedSeries {
    layout: Arc<BinLayout>,
    val: Array1<f64>,
    err: Array1<f64>,
}

impl BinnedSeries {
    /// Constructor.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MismatchedSeriesShape`] if `val` or `err` do not have as many entries as
    /// `layout` has bins.
    pub fn new(layout: Arc<BinLayout>, val: Vec<f64>, err: Vec<f64>) -> Result<Self> {
        for len in [val.len(), err.len()] {
            if len != layout.bins() {
                return Err(Error::MismatchedSeriesShape {
                    lhs: layout.bins(),
                    rhs: len,
                });
            }
        }

        Ok(Self {
            layout,
            val: Array1::from_vec(val),
            err: Array1::from_vec(err),
        })
    }

    /// Returns a series with all values and uncertainties set to zero.
    #[must_use]
    pub fn zeros(layout: Arc<BinLayout>) -> Self {
        let bins = layout.bins();

        Self {
            layout,
            val: Array1::zeros(bins),
            err: Array1::zeros(bins),
        }
    }

    /// Returns a new series with the same layout and uncertainties but with different central
    /// values.
    pub(crate) fn with_val(&self, val: Array1<f64>) -> Self {
        debug_assert_eq!(val.len(), self.bins());

        Self {
            layout: Arc::clone(&self.layout),
            val,
            err: self.err.clone(),
        }
    }

    pub(crate) fn with_val_err(&self, val: Array1<f64>, err: Array1<f64>) -> Self {
        debug_assert_eq!(val.len(), self.bins());
        debug_assert_eq!(err.len(), self.bins());

        Self {
            layout: Arc::clone(&self.layout),
            val,
            err,
        }
    }

    /// Returns the bin layout.
    #[must_use]
    pub fn layout(&self) -> &Arc<BinLayout> {
        &self.layout
    }

    /// Returns the number of bins.
    #[must_use]
    pub fn bins(&self) -> usize {
        self.val.len()
    }

    /// Returns `true` if the series has no bins.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.val.is_empty()
    }

    /// Central values.
    #[must_use]
    pub fn val(&self) -> ArrayView1<'_, f64> {
        self.val.view()
    }

    /// Absolute uncertainties.
    #[must_use]
    pub fn err(&self) -> ArrayView1<'_, f64> {
        self.err.view()
    }

    /// Bin midpoints, a shortcut for `self.layout().xmid()`.
    #[must_use]
    pub fn xmid(&self) -> ArrayView1<'_, f64> {
        self.layout.xmid()
    }

    /// Checks that `self` and `other` share the same bin layout.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MismatchedSeriesShape`] if the layouts differ.
    pub fn check_compatible(&self, other: &Self) -> Result<()> {
        if Arc::ptr_eq(&self.layout, &other.layout) || self.layout.is_compatible(&other.layout) {
            Ok(())
        } else {
            Err(Error::MismatchedSeriesShape {
                lhs: self.bins(),
                rhs: other.bins(),
            })
        }
    }

    /// Adds the central values of `self` and `other` and combines their uncertainties in
    /// quadrature.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MismatchedSeriesShape`] if the layouts differ.
    pub fn quadrature_sum(&self, other: &Self) -> Result<Self> {
        self.check_compatible(other)?;

        let val = &self.val + &other.val;
        let err = Zip::from(&self.err)
            .and(&other.err)
            .map_collect(|lhs, rhs| (lhs.powi(2) + rhs.powi(2)).sqrt());

        Ok(self.with_val_err(val, err))
    }
}
