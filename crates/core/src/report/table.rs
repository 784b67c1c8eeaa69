//! Column-aligned plain-text tables.
//!
//! Rendering is split in passes: rows are collected first, column widths are
//! computed over the complete set of rows, and only then is text produced.

use crate::format::width;

/// Spaces between adjacent columns.
pub const COLUMN_GAP: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Right,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub header: String,
    pub align: Align,
}

impl Column {
    pub fn left(header: impl Into<String>) -> Self {
        Self { header: header.into(), align: Align::Left }
    }

    pub fn right(header: impl Into<String>) -> Self {
        Self { header: header.into(), align: Align::Right }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Table {
    columns: Vec<Column>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(columns: Vec<Column>) -> Self {
        Self { columns, rows: Vec::new() }
    }

    /// Append a row. Missing trailing cells render empty; extra cells are
    /// dropped.
    pub fn push_row(&mut self, mut cells: Vec<String>) {
        cells.resize(self.columns.len(), String::new());
        self.rows.push(cells);
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Width of each column in characters: the widest of its header and
    /// every cell.
    pub fn widths(&self) -> Vec<usize> {
        self.columns
            .iter()
            .enumerate()
            .map(|(i, column)| {
                self.rows
                    .iter()
                    .map(|row| width(&row[i]))
                    .chain(std::iter::once(width(&column.header)))
                    .max()
                    .unwrap_or(0)
            })
            .collect()
    }

    /// Header, dashed separator, then one line per row, each prefixed with
    /// `indent`.
    pub fn render(&self, indent: &str) -> String {
        let widths = self.widths();
        let total = widths.iter().sum::<usize>() + COLUMN_GAP * widths.len().saturating_sub(1);

        let headers: Vec<&str> = self.columns.iter().map(|c| c.header.as_str()).collect();
        let mut out = String::new();
        out.push_str(&self.render_line(indent, &headers, &widths));
        out.push_str(indent);
        out.push_str(&"-".repeat(total));
        out.push('\n');
        for row in &self.rows {
            let cells: Vec<&str> = row.iter().map(String::as_str).collect();
            out.push_str(&self.render_line(indent, &cells, &widths));
        }
        out
    }

    fn render_line(&self, indent: &str, cells: &[&str], widths: &[usize]) -> String {
        let gap = " ".repeat(COLUMN_GAP);
        let line = self
            .columns
            .iter()
            .zip(cells)
            .zip(widths)
            .map(|((column, cell), &w)| match column.align {
                Align::Left => format!("{cell:<w$}"),
                Align::Right => format!("{cell:>w$}"),
            })
            .collect::<Vec<_>>()
            .join(&gap);
        format!("{indent}{}\n", line.trim_end())
    }
}
