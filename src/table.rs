use crate::errors::{CheckError, Result};
use crate::percent::{parse_percent, Percent};
use regex::Regex;
use scraper::{ElementRef, Html, Selector};

/// Pull the percentage for a labelled row out of a table identified by its
/// caption, e.g. the "Состав сухого воздуха" table on the Earth atmosphere
/// article.
pub fn percent_from_captioned_table(html: &str, caption: &str, row_label: &str) -> Result<Percent> {
    let document = Html::parse_document(html);
    let table_sel = Selector::parse("table").unwrap();
    let caption_sel = Selector::parse("caption").unwrap();

    let table = document
        .select(&table_sel)
        .find(|table| {
            table
                .select(&caption_sel)
                .any(|c| element_text(c).contains(caption))
        })
        .ok_or_else(|| CheckError::TableNotFound {
            caption: caption.to_string(),
        })?;

    let row = find_row(table, row_label).ok_or_else(|| CheckError::RowNotFound {
        label: row_label.to_string(),
    })?;

    percent_from_row(row, row_label)
}

/// Same extraction, but scanning every table on the page for the labelled
/// row. The Mars atmosphere article lists its composition in an uncaptioned
/// infobox, so there is no caption to anchor on.
pub fn percent_from_any_table(html: &str, row_label: &str) -> Result<Percent> {
    let document = Html::parse_document(html);
    let table_sel = Selector::parse("table").unwrap();

    let row = document
        .select(&table_sel)
        .find_map(|table| find_row(table, row_label))
        .ok_or_else(|| CheckError::RowNotFound {
            label: row_label.to_string(),
        })?;

    percent_from_row(row, row_label)
}

fn element_text(element: ElementRef) -> String {
    element.text().collect::<Vec<_>>().join(" ")
}

fn find_row<'a>(table: ElementRef<'a>, row_label: &str) -> Option<ElementRef<'a>> {
    let tr_sel = Selector::parse("tr").unwrap();
    let cell_sel = Selector::parse("th, td").unwrap();
    let label_lower = row_label.to_lowercase();

    table.select(&tr_sel).find(|row| {
        row.select(&cell_sel)
            .any(|cell| element_text(cell).to_lowercase().contains(&label_lower))
    })
}

/// Pick the value cell out of a composition row.
///
/// `td` cells are tried first so a `th` row header never shadows the value;
/// if nothing matches, all cells are tried. A cell holding the row label
/// without any digit is the label itself and is skipped. The first cell with
/// a percent sign or a decimal digit group wins.
fn percent_from_row(row: ElementRef, row_label: &str) -> Result<Percent> {
    let td_sel = Selector::parse("td").unwrap();
    let cell_sel = Selector::parse("th, td").unwrap();
    let label_lower = row_label.to_lowercase();

    let cell_text = pick_value_cell(row.select(&td_sel), &label_lower)
        .or_else(|| pick_value_cell(row.select(&cell_sel), &label_lower))
        .ok_or_else(|| CheckError::PercentCellNotFound {
            label: row_label.to_string(),
            row_text: element_text(row).trim().to_string(),
        })?;

    parse_percent(&cell_text)
}

fn pick_value_cell<'a>(
    cells: impl Iterator<Item = ElementRef<'a>>,
    label_lower: &str,
) -> Option<String> {
    let has_digit = Regex::new(r"\d").unwrap();
    let decimal_group = Regex::new(r"\d+[,.]\d+").unwrap();

    for cell in cells {
        let text = element_text(cell).trim().to_string();
        if text.to_lowercase().contains(label_lower) && !has_digit.is_match(&text) {
            continue;
        }
        if text.contains('%') || decimal_group.is_match(&text) {
            return Some(text);
        }
    }
    None
}
