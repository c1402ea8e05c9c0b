//! Polynomial bases used to model theory-nuisance-parameter deformations.

use super::convert::{f64_from_u128, i32_from_u32};
use super::error::{Error, Result};
use ndarray::{Array1, ArrayView1};
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Polynomial basis selector.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum BasisKind {
    /// Bernstein polynomials `C(n, nu) x^nu (1 - x)^(n - nu)`, a partition of unity on `[0, 1]`.
    Bernstein,
    /// Chebyshev polynomials of the first kind.
    Chebyshev,
}

impl Display for BasisKind {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Self::Bernstein => write!(f, "Bernstein"),
            Self::Chebyshev => write!(f, "Chebyshev"),
        }
    }
}

impl FromStr for BasisKind {
    type Err = Error;

    /// Parses the name of the basis, ignoring the case, or the numeric codes `0` (Bernstein) and
    /// `1` (Chebyshev).
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bernstein" | "0" => Ok(Self::Bernstein),
            "chebyshev" | "1" => Ok(Self::Chebyshev),
            other => Err(Error::InvalidEnvelopeConfig(format!(
                "unknown basis '{other}', expected 'bernstein' or 'chebyshev'"
            ))),
        }
    }
}

impl TryFrom<i64> for BasisKind {
    type Error = Error;

    fn try_from(code: i64) -> Result<Self> {
        match code {
            0 => Ok(Self::Bernstein),
            1 => Ok(Self::Chebyshev),
            _ => Err(Error::InvalidEnvelopeConfig(format!(
                "unknown basis code {code}, expected 0 (Bernstein) or 1 (Chebyshev)"
            ))),
        }
    }
}

impl BasisKind {
    /// Evaluates the basis function with index `nu` at `x`. For Bernstein polynomials `n` is the
    /// degree of the basis, for Chebyshev polynomials it is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidBasisIndex`] for Bernstein polynomials with `nu > n`.
    pub fn evaluate(self, n: u32, nu: u32, x: f64) -> Result<f64> {
        match self {
            Self::Bernstein => bernstein(n, nu, x),
            Self::Chebyshev => Ok(chebyshev(nu, x)),
        }
    }

    /// Same as [`BasisKind::evaluate`], but for every element of `x`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidBasisIndex`] for Bernstein polynomials with `nu > n`.
    pub fn evaluate_array(self, n: u32, nu: u32, x: ArrayView1<f64>) -> Result<Array1<f64>> {
        match self {
            Self::Bernstein => {
                let coefficient = binomial(n, nu)?;
                let (p, q) = (i32_from_u32(nu), i32_from_u32(n - nu));

                Ok(x.mapv(|x| coefficient * x.powi(p) * (1.0 - x).powi(q)))
            }
            Self::Chebyshev => Ok(x.mapv(|x| chebyshev(nu, x))),
        }
    }
}

/// Configuration of a polynomial basis: its kind and its (maximum) degree.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct BasisConfig {
    kind: BasisKind,
    degree: u32,
}

impl BasisConfig {
    /// Constructor.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidEnvelopeConfig`] if `degree` is negative or too large.
    pub fn new(kind: BasisKind, degree: i64) -> Result<Self> {
        let degree = u32::try_from(degree).map_err(|_| {
            Error::InvalidEnvelopeConfig(format!(
                "the degree must be a non-negative integer, found {degree}"
            ))
        })?;

        Ok(Self { kind, degree })
    }

    /// Returns the kind of the basis.
    #[must_use]
    pub const fn kind(&self) -> BasisKind {
        self.kind
    }

    /// Returns the degree of the basis.
    #[must_use]
    pub const fn degree(&self) -> u32 {
        self.degree
    }

    /// Returns a label of the form `Bernstein (k=2)`.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{} (k={})", self.kind, self.degree)
    }
}

/// Binomial coefficient `C(n, k)`. The result is exact as long as every intermediate product fits
/// into 128 bits, beyond that the remaining factors are multiplied in floating-point arithmetic.
///
/// # Errors
///
/// Returns [`Error::InvalidBasisIndex`] if `k > n` and [`Error::General`] if the coefficient is
/// larger than the largest finite `f64`.
pub fn binomial(n: u32, k: u32) -> Result<f64> {
    if k > n {
        return Err(Error::InvalidBasisIndex { n, nu: k });
    }

    let steps = k.min(n - k);
    let mut exact: u128 = 1;
    let mut result = None;

    for i in 0..steps {
        // `exact * (n - i)` is always divisible by `i + 1`, since `exact` is `C(n, i)`
        if let Some(product) = exact.checked_mul(u128::from(n - i)) {
            exact = product / u128::from(i + 1);
        } else {
            result = Some((i..steps).fold(f64_from_u128(exact), |acc, j| {
                acc * f64::from(n - j) / f64::from(j + 1)
            }));
            break;
        }
    }

    let result = result.unwrap_or_else(|| f64_from_u128(exact));

    if result.is_finite() {
        Ok(result)
    } else {
        Err(Error::General(format!(
            "binomial coefficient C({n}, {k}) exceeds the range of floating-point numbers"
        )))
    }
}

/// Bernstein basis polynomial of degree `n` and index `nu` evaluated at `x`. Values of `x` outside
/// of `[0, 1]` are evaluated by polynomial extension.
///
/// # Errors
///
/// Returns [`Error::InvalidBasisIndex`] if `nu > n`.
pub fn bernstein(n: u32, nu: u32, x: f64) -> Result<f64> {
    let coefficient = binomial(n, nu)?;

    Ok(coefficient * x.powi(i32_from_u32(nu)) * (1.0 - x).powi(i32_from_u32(n - nu)))
}

/// Chebyshev polynomial of the first kind `T_nu(x)`, computed with the three-term recurrence
/// `T_k = 2x T_{k-1} - T_{k-2}`.
#[must_use]
pub fn chebyshev(nu: u32, x: f64) -> f64 {
    match nu {
        0 => 1.0,
        1 => x,
        _ => {
            let mut t0 = 1.0;
            let mut t1 = x;

            for _ in 2..=nu {
                let t2 = 2.0 * x * t1 - t0;
                t0 = t1;
                t1 = t2;
            }

            t1
        }
    }
}
