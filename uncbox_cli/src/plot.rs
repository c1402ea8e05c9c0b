use super::config::{Config, Group};
use super::helpers;
use super::{GlobalConfiguration, Subcommand};
use anyhow::{Context, Result, bail};
use clap::{Parser, ValueHint};
use itertools::Itertools;
use rayon::{ThreadPoolBuilder, prelude::*};
use rustc_hash::FxHashMap;
use std::fmt::Write;
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::process::ExitCode;
use std::thread;
use uncbox::channels::Aggregate;
use uncbox::envelope;
use uncbox::ratio;
use uncbox::series::BinnedSeries;

/// Creates a matplotlib script plotting the envelopes of all observables.
#[derive(Parser)]
pub struct Opts {
    /// Path to the configuration of the analysis.
    #[arg(value_hint = ValueHint::FilePath)]
    config: PathBuf,
    /// Plot the given perturbative order instead of the one of the configuration.
    #[arg(long)]
    order: Option<String>,
    /// Number of threads to utilize.
    #[arg(default_value_t = thread::available_parallelism().map_or(1, NonZeroUsize::get), long)]
    threads: usize,
}

/// Everything shown on the page of a single observable.
struct Page {
    observable: String,
    x: Vec<f64>,
    fc: BinnedSeries,
    lc: BinnedSeries,
    envelopes: Vec<(String, BinnedSeries, BinnedSeries)>,
}

fn format_number(x: f64) -> String {
    if x.is_nan() {
        "np.nan".to_owned()
    } else if x.is_infinite() {
        if x > 0.0 { "np.inf" } else { "-np.inf" }.to_owned()
    } else {
        format!("{x:e}")
    }
}

/// Quotes `s` as a single-quoted Python string literal.
fn python_str(s: &str) -> String {
    let mut result = String::with_capacity(s.len() + 2);
    result.push('\'');

    for c in s.chars() {
        match c {
            '\\' => result.push_str("\\\\"),
            '\'' => result.push_str("\\'"),
            '\n' => result.push_str("\\n"),
            '\r' => result.push_str("\\r"),
            '\t' => result.push_str("\\t"),
            c => result.push(c),
        }
    }

    result.push('\'');
    result
}

fn format_array<'a>(values: impl IntoIterator<Item = &'a f64>) -> String {
    format!(
        "np.array([{}])",
        values.into_iter().map(|&x| format_number(x)).join(", ")
    )
}

fn format_pages(pages: &[Page]) -> String {
    let mut result = String::new();

    for page in pages {
        let mut envelopes = String::new();

        for (label, lower, upper) in &page.envelopes {
            // UNWRAP: writing into a `String` can not fail
            writeln!(
                envelopes,
                "                ({}, {}, {}),",
                python_str(label),
                format_array(lower.val()),
                format_array(upper.val())
            )
            .unwrap();
        }

        // UNWRAP: writing into a `String` can not fail
        write!(
            result,
            "        {{
            'observable': {},
            'x': {},
            'FC': ({}, {}),
            'LC': ({}, {}),
            'envelopes': [
{envelopes}            ],
        }},
",
            python_str(&page.observable),
            format_array(&page.x),
            format_array(page.fc.val()),
            format_array(page.fc.err()),
            format_array(page.lc.val()),
            format_array(page.lc.err()),
        )
        .unwrap();
    }

    result
}

fn format_script(config: &Config, pages: &[Page]) -> String {
    format!(
        "#!/usr/bin/env python3

import matplotlib.pyplot as plt
import numpy as np
import os
from matplotlib.backends.backend_pdf import PdfPages

# colors of the channel groups
colors = {{'FC': 'red', 'LC': 'blue'}}
# colors of the envelopes, one for each panel
band_colors = ['green', 'purple', 'darkorange', 'brown', 'teal', 'olive']

def plot_panel(axis, page, index):
    label, lower, upper = page['envelopes'][index]
    x = page['x']
    color = band_colors[index % len(band_colors)]

    axis.grid(alpha=0.2, linestyle=':', color='black')
    axis.set_ylim(metadata()['ylim'])
    axis.set_ylabel('Ratio to ' + metadata()['reference'])

    for group in ['LC', 'FC']:
        y, yerr = page[group]
        axis.plot(x, y, label=group, color=colors[group], linestyle='None', marker='x')
        axis.errorbar(x, y, yerr, ls='none', capsize=3, color=colors[group], linewidth=1)

    axis.plot(x, upper, color=color, linestyle='solid', marker='None', alpha=0.3)
    axis.plot(x, lower, color=color, linestyle='solid', marker='None', alpha=0.3)
    axis.fill_between(x, lower, upper, color=color, alpha=0.1)
    axis.text(0.02, 0.05, label, transform=axis.transAxes, fontsize=12)

def main():
    output = metadata()['output']

    if os.path.dirname(output) != '':
        os.makedirs(os.path.dirname(output), exist_ok=True)

    with PdfPages(output) as pdf:
        for page in data():
            panels = len(page['envelopes'])
            figure, axes = plt.subplots(nrows=panels, ncols=1, sharex=True, squeeze=False, figsize=(10, 4 * panels))

            for index, axis in enumerate(axes[:, 0]):
                plot_panel(axis, page, index)

            axes[0, 0].set_title(metadata()['title'])
            axes[0, 0].legend(ncol=2)
            axes[0, 0].minorticks_on()
            axes[-1, 0].set_xlabel(page['observable'])

            pdf.savefig(figure, bbox_inches='tight')
            plt.close(figure)

def data():
    return [
{pages}    ]

def metadata():
    return {{
        'output': {output},
        'reference': {reference},
        'title': {title},
        'ylim': [{ylim_min}, {ylim_max}],
    }}

if __name__ == '__main__':
    main()
",
        pages = format_pages(pages),
        output = python_str(&config.output.display().to_string()),
        reference = python_str(match config.reference {
            Group::FullColour => "FC",
            Group::LeadingColour => "LC",
        }),
        title = python_str(&config.title),
        ylim_min = format_number(config.ylim.0),
        ylim_max = format_number(config.ylim.1),
    )
}

fn aggregate_all(config: &Config) -> Result<FxHashMap<(String, String), Aggregate>> {
    config
        .orders
        .iter()
        .cartesian_product(&config.observables)
        .collect::<Vec<_>>()
        .into_par_iter()
        .map(|(order, observable)| -> Result<_> {
            let channels = config
                .channels
                .iter()
                .map(|channel| -> Result<_> {
                    let path = config.table_path(order, channel, observable);
                    Ok((channel.clone(), helpers::read_table(&path)?))
                })
                .collect::<Result<Vec<_>>>()?;
            let aggregate = Aggregate::new(&channels, &config.lc_channels).with_context(|| {
                format!("unable to aggregate the channels of '{observable}' at '{order}'")
            })?;

            Ok(((order.clone(), observable.clone()), aggregate))
        })
        .collect()
}

fn create_page(config: &Config, observable: &str, aggregate: &Aggregate) -> Result<Page> {
    let reference = match config.reference {
        Group::FullColour => &aggregate.fc,
        Group::LeadingColour => &aggregate.lc,
    };

    let envelopes = config
        .bases
        .iter()
        .map(|basis| -> Result<_> {
            let result = envelope::compute_envelope_with(&aggregate.lc, config.scale(), basis)?
                .ratio_to(reference)?;

            Ok((basis.label(), result.lower, result.upper))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Page {
        observable: observable.to_owned(),
        x: aggregate.lc.xmid().to_vec(),
        fc: ratio::ratio(&aggregate.fc, reference)?,
        lc: ratio::ratio(&aggregate.lc, reference)?,
        envelopes,
    })
}

impl Subcommand for Opts {
    fn run(&self, _: &GlobalConfiguration) -> Result<ExitCode> {
        let config = Config::load(&self.config)?;
        let order = self.order.as_ref().unwrap_or(&config.plot_order);

        if !config.orders.contains(order) {
            bail!("order '{order}' is not one of the configured orders");
        }

        ThreadPoolBuilder::new()
            .num_threads(self.threads)
            .build_global()?;

        let aggregates = aggregate_all(&config)?;

        let pages = config
            .observables
            .iter()
            .map(|observable| {
                // every combination of order and observable has been aggregated
                let aggregate = &aggregates[&(order.clone(), observable.clone())];

                create_page(&config, observable, aggregate)
                    .with_context(|| format!("unable to compute the envelopes of '{observable}'"))
            })
            .collect::<Result<Vec<_>>>()?;

        print!("{}", format_script(&config, &pages));

        Ok(ExitCode::SUCCESS)
    }
}
