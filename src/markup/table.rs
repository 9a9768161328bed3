use std::collections::HashSet;

use anyhow::{bail, Result};
use scraper::ElementRef;

use super::text;

/// Spans above this are treated as malformed markup.
const MAX_SPAN: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
    pub text: String,
    pub header: bool,
}

/// Cells of `table` as (row, column, text) with `rowspan`/`colspan` expanded,
/// so a spanning cell appears at every grid position it covers.
pub fn table_cells(table: ElementRef<'_>) -> Result<Vec<Cell>> {
    let rows = table_rows(table);
    let mut occupied: HashSet<(usize, usize)> = HashSet::new();
    let mut cells = Vec::new();

    for (r, tr) in rows.iter().enumerate() {
        let mut c = 0;
        for cell in tr.children().filter_map(ElementRef::wrap) {
            let name = cell.value().name();
            if name != "td" && name != "th" {
                continue;
            }
            while occupied.contains(&(r, c)) {
                c += 1;
            }
            let rowspan = span(cell, "rowspan")?;
            let colspan = span(cell, "colspan")?;
            let value = text::lines(cell).join(", ");
            for dr in 0..rowspan {
                if r + dr >= rows.len() {
                    break;
                }
                for dc in 0..colspan {
                    occupied.insert((r + dr, c + dc));
                    cells.push(Cell {
                        row: r + dr,
                        col: c + dc,
                        text: value.clone(),
                        header: name == "th",
                    });
                }
            }
            c += colspan;
        }
    }

    cells.sort_by_key(|cell| (cell.row, cell.col));
    Ok(cells)
}

fn table_rows(table: ElementRef<'_>) -> Vec<ElementRef<'_>> {
    let mut rows = Vec::new();
    for child in table.children().filter_map(ElementRef::wrap) {
        match child.value().name() {
            "tr" => rows.push(child),
            "thead" | "tbody" | "tfoot" => rows.extend(
                child
                    .children()
                    .filter_map(ElementRef::wrap)
                    .filter(|c| c.value().name() == "tr"),
            ),
            _ => {}
        }
    }
    rows
}

fn span(cell: ElementRef<'_>, attr: &str) -> Result<usize> {
    let value = cell
        .value()
        .attr(attr)
        .and_then(|v| v.trim().parse::<usize>().ok())
        .unwrap_or(1)
        .max(1);
    if value > MAX_SPAN {
        bail!("{} of {} exceeds {}", attr, value, MAX_SPAN);
    }
    Ok(value)
}

// ── Tests ──
