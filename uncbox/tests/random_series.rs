#![allow(missing_docs)]

use anyhow::Result;
use float_cmp::assert_approx_eq;
use rand::Rng;
use rand_pcg::Pcg64;
use std::sync::Arc;
use uncbox::basis::{BasisConfig, BasisKind};
use uncbox::channels::{self, Aggregate};
use uncbox::envelope;
use uncbox::ratio;
use uncbox::series::{BinLayout, BinnedSeries};

fn random_layout(rng: &mut impl Rng, bins: usize) -> Arc<BinLayout> {
    let mut edges: Vec<f64> = (0..=bins).map(|_| rng.r#gen::<f64>()).collect();
    edges.sort_by(f64::total_cmp);

    let xlow = edges[..bins].to_vec();
    let xhigh = edges[1..].to_vec();
    let xmid = xlow.iter().zip(&xhigh).map(|(l, h)| 0.5 * (l + h)).collect();

    // UNWRAP: all vectors have `bins` entries
    Arc::new(BinLayout::new(xlow, xmid, xhigh).unwrap())
}

fn random_series(rng: &mut impl Rng, layout: &Arc<BinLayout>) -> Result<BinnedSeries> {
    let bins = layout.bins();
    let val = (0..bins).map(|_| 200.0 * rng.r#gen::<f64>() - 100.0).collect();
    let err = (0..bins).map(|_| rng.r#gen::<f64>()).collect();

    Ok(BinnedSeries::new(Arc::clone(layout), val, err)?)
}

fn rng() -> Pcg64 {
    Pcg64::new(0xcafef00dd15ea5e5, 0xa02bdbf7bb3c0a7ac28fa16a64abf96)
}

#[test]
fn envelopes_are_symmetric() -> Result<()> {
    let mut rng = rng();

    for _ in 0..100 {
        let bins = rng.gen_range(1..20);
        let layout = random_layout(&mut rng, bins);
        let series = random_series(&mut rng, &layout)?;
        let kind = if rng.r#gen::<bool>() {
            BasisKind::Bernstein
        } else {
            BasisKind::Chebyshev
        };
        let config = BasisConfig::new(kind, rng.gen_range(0..8))?;
        let scale = rng.r#gen::<f64>();

        let result = envelope::compute_envelope_with(&series, scale, &config)?;

        for ((&val, &upper), &lower) in series
            .val()
            .iter()
            .zip(result.upper.val())
            .zip(result.lower.val())
        {
            assert!(upper >= lower);
            assert_approx_eq!(f64, upper - val, val - lower, epsilon = 1e-10);
        }

        assert_eq!(result.upper.err(), series.err());
        assert_eq!(result.lower.err(), series.err());
    }

    Ok(())
}

#[test]
fn bernstein_partition_of_unity() -> Result<()> {
    let mut rng = rng();

    for _ in 0..100 {
        let layout = random_layout(&mut rng, 10);
        let degree: u32 = rng.gen_range(0..12);
        let sum = (0..=degree)
            .map(|nu| BasisKind::Bernstein.evaluate_array(degree, nu, layout.xmid()))
            .try_fold(ndarray::Array1::<f64>::zeros(10), |sum, b| {
                b.map(|b| sum + b)
            })?;

        for value in sum {
            assert_approx_eq!(f64, value, 1.0, epsilon = 1e-12);
        }
    }

    Ok(())
}

#[test]
fn ratio_to_itself_is_one() -> Result<()> {
    let mut rng = rng();
    let layout = random_layout(&mut rng, 50);
    let series = random_series(&mut rng, &layout)?;
    let result = ratio::ratio(&series, &series)?;

    for ((&val, &err), (&v, &e)) in result
        .val()
        .iter()
        .zip(result.err())
        .zip(series.val().iter().zip(series.err()))
    {
        assert_eq!(val, 1.0);
        assert_approx_eq!(f64, err, 2.0_f64.sqrt() * e / v.abs(), ulps = 8);
    }

    Ok(())
}

#[test]
fn aggregation_does_not_depend_on_the_order() -> Result<()> {
    let mut rng = rng();
    let layout = random_layout(&mut rng, 12);
    let names = ["N2", "N0", "Nm2", "NFN", "NFNm1", "NF2"];
    let channels = names
        .iter()
        .map(|&name| Ok((name.to_owned(), random_series(&mut rng, &layout)?)))
        .collect::<Result<Vec<_>>>()?;
    let lc_channels = ["N2".to_owned(), "NFN".to_owned(), "NF2".to_owned()];

    let forward = Aggregate::new(&channels, &lc_channels)?;
    let reversed: Vec<_> = channels.iter().rev().cloned().collect();
    let backward = Aggregate::new(&reversed, &lc_channels)?;

    for (lhs, rhs) in [(&forward.fc, &backward.fc), (&forward.lc, &backward.lc)] {
        for (&l, &r) in lhs.val().iter().zip(rhs.val()) {
            assert_approx_eq!(f64, l, r, epsilon = 1e-12);
        }
        for (&l, &r) in lhs.err().iter().zip(rhs.err()) {
            assert_approx_eq!(f64, l, r, epsilon = 1e-12);
        }
    }

    // the full-colour sum is the sum of all channels
    let all = channels::aggregate(channels.iter().map(|(_, series)| series))?;
    assert_eq!(all.as_ref(), Some(&forward.fc));

    Ok(())
}
