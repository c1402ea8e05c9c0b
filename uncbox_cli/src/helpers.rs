use anyhow::{Context, Result};
use prettytable::format::{FormatBuilder, LinePosition, LineSeparator};
use prettytable::{Row, Table, cell};
use std::path::Path;
use uncbox::series::BinnedSeries;
use uncbox::table;

pub fn create_table() -> Table {
    let mut table = Table::new();
    table.set_format(
        FormatBuilder::new()
            .column_separator(' ')
            .separator(LinePosition::Title, LineSeparator::new('-', '+', ' ', ' '))
            .build(),
    );
    table
}

pub fn read_table(path: &Path) -> Result<BinnedSeries> {
    table::read(path).with_context(|| format!("unable to read table '{}'", path.display()))
}

/// Title row starting with the bin index and the bin limits, followed by `titles`.
pub fn title_row(titles: &[&str]) -> Row {
    let mut row = Row::empty();
    row.add_cell(cell!(c->"b"));
    row.add_cell(cell!(c->"xlow"));
    row.add_cell(cell!(c->"xhigh"));

    for title in titles {
        row.add_cell(cell!(c->title));
    }

    row
}

/// Adds a row to `table` that starts with the bin index and the bin limits of `series`.
pub fn add_bin_row<'a>(table: &'a mut Table, series: &BinnedSeries, bin: usize) -> &'a mut Row {
    let layout = series.layout();
    let row = table.add_empty_row();
    row.add_cell(cell!(r->format!("{bin}")));
    row.add_cell(cell!(r->format!("{}", layout.xlow()[bin])));
    row.add_cell(cell!(r->format!("{}", layout.xhigh()[bin])));
    row
}

/// Table with midpoints, values and uncertainties of each bin of `series`.
pub fn series_table(series: &BinnedSeries, digits_abs: usize) -> Table {
    let mut table = create_table();
    table.set_titles(title_row(&["xmid", "val", "err"]));

    for bin in 0..series.bins() {
        let row = add_bin_row(&mut table, series, bin);
        row.add_cell(cell!(r->format!("{}", series.xmid()[bin])));
        row.add_cell(cell!(r->format!("{:.*e}", digits_abs, series.val()[bin])));
        row.add_cell(cell!(r->format!("{:.*e}", digits_abs, series.err()[bin])));
    }

    table
}
