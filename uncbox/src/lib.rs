//! `uncbox` computes theory-nuisance-parameter uncertainty envelopes for binned predictions.
//!
//! The crate is organised around [`series::BinnedSeries`], a flat table of bins with central
//! values and absolute uncertainties. Series are read with [`table`], combined into colour groups
//! with [`channels`], normalised with [`ratio`] and bracketed with a polynomial-basis envelope
//! computed in [`envelope`] from the functions in [`basis`].

mod convert;

pub mod basis;
pub mod channels;
pub mod envelope;
pub mod error;
pub mod ratio;
pub mod series;
pub mod table;

pub use error::{Error, Result};
