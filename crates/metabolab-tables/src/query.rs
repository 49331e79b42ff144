//! Filter, search and sort over in-memory table rows.
//!
//! Order of operations: group filter, then free-text search, then a stable
//! sort on one column. Clicking the active column flips the direction;
//! clicking another column sorts it ascending.

use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn toggle(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    fn apply(self, ord: Ordering) -> Ordering {
        match self {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        }
    }
}

/// A single column value as seen by the sorter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Cell<'a> {
    Text(&'a str),
    Number(f64),
}

impl Cell<'_> {
    /// Text compares case-insensitively, numbers numerically.
    /// A text cell and a number cell compare equal.
    pub fn compare(&self, other: &Cell<'_>) -> Ordering {
        match (self, other) {
            (Cell::Text(a), Cell::Text(b)) => a
                .to_lowercase()
                .cmp(&b.to_lowercase())
                .then_with(|| a.cmp(b)),
            (Cell::Number(a), Cell::Number(b)) => a.total_cmp(b),
            _ => Ordering::Equal,
        }
    }
}

pub trait TableRow {
    type Field: Copy + PartialEq;

    fn cell(&self, field: Self::Field) -> Cell<'_>;

    /// Columns the search term is matched against.
    fn searchable(&self) -> Vec<&str>;

    /// Group used by the group filter. Rows without one never pass a filter.
    fn group(&self) -> Option<&str> {
        None
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableQuery<F> {
    group: Option<String>,
    search: String,
    sort_field: F,
    direction: SortDirection,
}

impl<F: Copy + PartialEq> TableQuery<F> {
    pub fn new(sort_field: F) -> Self {
        Self {
            group: None,
            search: String::new(),
            sort_field,
            direction: SortDirection::Asc,
        }
    }

    /// Restrict rows to one group; `None` clears the filter.
    pub fn set_group(&mut self, group: Option<String>) {
        self.group = group;
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search = term.into();
    }

    pub fn sort_by(&mut self, field: F) {
        if self.sort_field == field {
            self.direction = self.direction.toggle();
        } else {
            self.sort_field = field;
            self.direction = SortDirection::Asc;
        }
    }

    pub fn group(&self) -> Option<&str> {
        self.group.as_deref()
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn sort_field(&self) -> F {
        self.sort_field
    }

    pub fn direction(&self) -> SortDirection {
        self.direction
    }

    pub fn matches<R: TableRow<Field = F>>(&self, row: &R) -> bool {
        if let Some(group) = self.group.as_deref() {
            if row.group() != Some(group) {
                return false;
            }
        }
        if self.search.is_empty() {
            return true;
        }
        let needle = self.search.to_lowercase();
        row.searchable()
            .iter()
            .any(|text| text.to_lowercase().contains(&needle))
    }

    pub fn apply<'a, R: TableRow<Field = F>>(&self, rows: &'a [R]) -> Vec<&'a R> {
        let mut out: Vec<&R> = rows.iter().filter(|row| self.matches(*row)).collect();
        let field = self.sort_field;
        out.sort_by(|a, b| self.direction.apply(a.cell(field).compare(&b.cell(field))));
        out
    }
}
