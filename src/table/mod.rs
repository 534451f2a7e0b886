//! Column definitions and a plain-text rendering of the employee table.

use crate::models::employee::{Employee, EmployeeId};

pub type Accessor = fn(&Employee) -> String;
pub type CellRenderer = fn(&str) -> String;

pub const LOADING_TEXT: &str = "Loading...";
pub const EMPTY_TEXT: &str = "No records to display";

#[derive(Debug, Clone)]
pub struct Column {
    pub header: &'static str,
    pub accessor: Accessor,
    pub cell: Option<CellRenderer>,
    pub visible: bool,
    pub read_only: bool,
}

impl Column {
    fn new(header: &'static str, accessor: Accessor) -> Self {
        Column {
            header,
            accessor,
            cell: None,
            visible: true,
            read_only: false,
        }
    }

    pub fn value(&self, row: &Employee) -> String {
        (self.accessor)(row)
    }

    pub fn render_cell(&self, row: &Employee) -> String {
        let value = self.value(row);
        match self.cell {
            Some(render) => render(&value),
            None => value,
        }
    }
}

/// Actions a row emits back to its owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowAction {
    EditRequested(EmployeeId),
    DeleteRequested(EmployeeId),
}

pub fn avatar_cell(image_url: &str) -> String {
    if image_url.is_empty() {
        String::new()
    } else {
        format!("[img 30x30 {}]", image_url)
    }
}

/// The directory's columns: a hidden read-only Id, then the visible fields, with an avatar cell for the image.
pub fn employee_columns() -> Vec<Column> {
    vec![
        Column {
            visible: false,
            read_only: true,
            ..Column::new("Id", |row| row.id.to_string())
        },
        Column::new("First name", |row| row.first_name.clone()),
        Column::new("Last name", |row| row.last_name.clone()),
        Column::new("Email", |row| row.email.clone()),
        Column::new("Gender", |row| row.gender.to_string()),
        Column {
            cell: Some(avatar_cell),
            ..Column::new("Image", |row| row.image_url.clone())
        },
    ]
}

#[derive(Debug, Clone)]
pub struct TableView {
    columns: Vec<Column>,
}

impl Default for TableView {
    fn default() -> Self {
        TableView::new(employee_columns())
    }
}

impl TableView {
    pub fn new(columns: Vec<Column>) -> Self {
        TableView { columns }
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn visible_columns(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter().filter(|column| column.visible)
    }

    /// Returns false when no column has that header.
    pub fn set_column_visibility(&mut self, header: &str, visible: bool) -> bool {
        match self.columns.iter_mut().find(|column| column.header == header) {
            Some(column) => {
                column.visible = visible;
                true
            }
            None => false,
        }
    }

    /// Actions available on the row at `index`, or `None` past the end.
    pub fn row_actions(&self, rows: &[Employee], index: usize) -> Option<[RowAction; 2]> {
        rows.get(index).map(|row| {
            [
                RowAction::EditRequested(row.id.clone()),
                RowAction::DeleteRequested(row.id.clone()),
            ]
        })
    }

    pub fn render(&self, rows: &[Employee], loading: bool, error: Option<&str>) -> String {
        let columns: Vec<&Column> = self.visible_columns().collect();
        let cells: Vec<Vec<String>> = rows
            .iter()
            .map(|row| columns.iter().map(|column| column.render_cell(row)).collect())
            .collect();

        let widths: Vec<usize> = columns
            .iter()
            .enumerate()
            .map(|(i, column)| {
                cells
                    .iter()
                    .map(|row| row[i].chars().count())
                    .chain(std::iter::once(column.header.chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let format_row = |values: Vec<&str>| {
            values
                .iter()
                .zip(&widths)
                .map(|(value, width)| format!("{:<width$}", value, width = *width))
                .collect::<Vec<_>>()
                .join(" | ")
                .trim_end()
                .to_string()
        };

        let mut lines = Vec::new();
        if let Some(error) = error {
            lines.push(format!("Error: {}", error));
        }
        lines.push(format_row(columns.iter().map(|column| column.header).collect()));
        lines.push(
            widths
                .iter()
                .map(|width| "-".repeat(*width))
                .collect::<Vec<_>>()
                .join("-+-"),
        );

        if loading {
            lines.push(LOADING_TEXT.to_string());
        } else if cells.is_empty() {
            lines.push(EMPTY_TEXT.to_string());
        } else {
            for row in &cells {
                lines.push(format_row(row.iter().map(String::as_str).collect()));
            }
        }

        lines.join("\n")
    }
}
