use anyhow::{Context, Error, Result, bail};
use rustc_hash::FxHashSet;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use uncbox::basis::{BasisConfig, BasisKind};
use uncbox::table;

/// Channel group that ratios are normalized to.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq)]
pub enum Group {
    /// Full colour, the sum of all channels.
    #[serde(rename = "FC")]
    FullColour,
    /// Leading colour, the sum of the leading-colour channels.
    #[serde(rename = "LC")]
    LeadingColour,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum KindSpec {
    Name(String),
    Code(i64),
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct BasisSpec {
    kind: KindSpec,
    degree: i64,
}

impl TryFrom<BasisSpec> for BasisConfig {
    type Error = uncbox::Error;

    fn try_from(spec: BasisSpec) -> Result<Self, Self::Error> {
        let kind = match spec.kind {
            KindSpec::Name(name) => name.parse()?,
            KindSpec::Code(code) => BasisKind::try_from(code)?,
        };

        Self::new(kind, spec.degree)
    }
}

fn default_pattern() -> String {
    table::DEFAULT_PATTERN.to_owned()
}

fn default_output() -> PathBuf {
    PathBuf::from("plots/epem3jet.pdf")
}

fn default_title() -> String {
    r"$e^+e^- \rightarrow 3\,\mathrm{jets}$".to_owned()
}

fn default_orders() -> Vec<String> {
    strings(&["LO", "NLO", "NLO_only", "NNLO", "NNLO_only"])
}

fn default_observables() -> Vec<String> {
    strings(&["1mT", "C", "y23", "TJB"])
}

fn default_channels() -> Vec<String> {
    strings(&["N2", "N0", "Nm2", "NFN", "NFNm1", "NF2", "stupid"])
}

fn default_lc_channels() -> Vec<String> {
    strings(&["N2", "NFN", "NF2"])
}

fn default_plot_order() -> String {
    "NNLO".to_owned()
}

const fn default_reference() -> Group {
    Group::LeadingColour
}

const fn default_nc() -> f64 {
    3.0
}

fn default_bases() -> Vec<BasisSpec> {
    vec![
        BasisSpec {
            kind: KindSpec::Name("bernstein".to_owned()),
            degree: 2,
        },
        BasisSpec {
            kind: KindSpec::Name("chebyshev".to_owned()),
            degree: 2,
        },
    ]
}

const fn default_ylim() -> (f64, f64) {
    (0.7, 1.3)
}

fn strings(list: &[&str]) -> Vec<String> {
    list.iter().map(|&s| s.to_owned()).collect()
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    datadir: PathBuf,
    #[serde(default = "default_pattern")]
    pattern: String,
    #[serde(default = "default_output")]
    output: PathBuf,
    #[serde(default = "default_title")]
    title: String,
    #[serde(default = "default_orders")]
    orders: Vec<String>,
    #[serde(default = "default_observables")]
    observables: Vec<String>,
    #[serde(default = "default_channels")]
    channels: Vec<String>,
    #[serde(default = "default_lc_channels")]
    lc_channels: Vec<String>,
    #[serde(default = "default_plot_order")]
    plot_order: String,
    #[serde(default = "default_reference")]
    reference: Group,
    #[serde(default = "default_nc")]
    nc: f64,
    #[serde(default = "default_bases")]
    bases: Vec<BasisSpec>,
    #[serde(default = "default_ylim")]
    ylim: (f64, f64),
}

/// Validated configuration of an analysis.
#[derive(Debug, Deserialize)]
#[serde(try_from = "RawConfig")]
pub struct Config {
    pub datadir: PathBuf,
    pub pattern: String,
    pub output: PathBuf,
    pub title: String,
    pub orders: Vec<String>,
    pub observables: Vec<String>,
    pub channels: Vec<String>,
    pub lc_channels: Vec<String>,
    pub plot_order: String,
    pub reference: Group,
    pub nc: f64,
    pub bases: Vec<BasisConfig>,
    pub ylim: (f64, f64),
}

impl TryFrom<RawConfig> for Config {
    type Error = Error;

    fn try_from(raw: RawConfig) -> Result<Self> {
        for (name, list) in [
            ("orders", &raw.orders),
            ("observables", &raw.observables),
            ("channels", &raw.channels),
            ("lc_channels", &raw.lc_channels),
        ] {
            if list.is_empty() {
                bail!("'{name}' must not be empty");
            }
        }

        if raw.bases.is_empty() {
            bail!("'bases' must not be empty");
        }

        let channels: FxHashSet<_> = raw.channels.iter().collect();

        if let Some(channel) = raw.lc_channels.iter().find(|c| !channels.contains(c)) {
            bail!("leading-colour channel '{channel}' is not one of the 'channels'");
        }

        if !raw.orders.contains(&raw.plot_order) {
            bail!("'plot_order' '{}' is not one of the 'orders'", raw.plot_order);
        }

        if !(raw.nc.is_finite() && raw.nc > 0.0) {
            bail!("'nc' must be positive, found {}", raw.nc);
        }

        for placeholder in ["{order}", "{channel}", "{observable}"] {
            if !raw.pattern.contains(placeholder) {
                bail!("'pattern' must contain the placeholder '{placeholder}'");
            }
        }

        let bases = raw
            .bases
            .into_iter()
            .map(BasisConfig::try_from)
            .collect::<Result<_, _>>()?;

        Ok(Self {
            datadir: raw.datadir,
            pattern: raw.pattern,
            output: raw.output,
            title: raw.title,
            orders: raw.orders,
            observables: raw.observables,
            channels: raw.channels,
            lc_channels: raw.lc_channels,
            plot_order: raw.plot_order,
            reference: raw.reference,
            nc: raw.nc,
            bases,
            ylim: raw.ylim,
        })
    }
}

impl Config {
    /// Reads and validates the configuration stored in `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("unable to read configuration '{}'", path.display()))?;

        serde_yaml::from_str(&contents)
            .with_context(|| format!("invalid configuration '{}'", path.display()))
    }

    /// Overall normalization of the envelopes, `1 / nc^2`.
    pub fn scale(&self) -> f64 {
        1.0 / self.nc.powi(2)
    }

    /// Path of the table for the given order, channel and observable.
    pub fn table_path(&self, order: &str, channel: &str, observable: &str) -> PathBuf {
        table::path(&self.datadir, &self.pattern, order, channel, observable)
    }
}
