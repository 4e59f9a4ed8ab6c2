// web_app/columns.rs - Table columns and client-side sorting
//
// Pagination is server-driven, so sorting only reorders the rows of the page
// currently on screen.

use std::cmp::Ordering;

use crate::web_app::model::Product;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Column {
    Name,
    Category,
    Price,
}

impl Column {
    pub const ALL: [Column; 3] = [Column::Name, Column::Category, Column::Price];

    pub fn header(self) -> &'static str {
        match self {
            Column::Name => "Name",
            Column::Category => "Category",
            Column::Price => "Price",
        }
    }

    pub fn cell(self, product: &Product) -> String {
        match self {
            Column::Name => product.name.clone(),
            Column::Category => product.category.clone(),
            Column::Price => product.price_display(),
        }
    }

    fn compare(self, a: &Product, b: &Product) -> Ordering {
        match self {
            Column::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
            Column::Category => a.category.to_lowercase().cmp(&b.category.to_lowercase()),
            Column::Price => a.price.cmp(&b.price),
        }
    }
}

impl std::fmt::Display for Column {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.header())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn indicator(self) -> &'static str {
        match self {
            SortDirection::Ascending => "▲",
            SortDirection::Descending => "▼",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SortState {
    pub column: Column,
    pub direction: SortDirection,
}

/// Header click: none → ascending → descending → none, per column
pub fn next_sort(current: Option<SortState>, column: Column) -> Option<SortState> {
    match current {
        Some(SortState {
            column: sorted,
            direction: SortDirection::Ascending,
        }) if sorted == column => Some(SortState {
            column,
            direction: SortDirection::Descending,
        }),
        Some(SortState {
            column: sorted,
            direction: SortDirection::Descending,
        }) if sorted == column => None,
        _ => Some(SortState {
            column,
            direction: SortDirection::Ascending,
        }),
    }
}

/// Stable sort, so equal keys keep the server's order
pub fn sort_products(products: &mut [Product], sort: Option<SortState>) {
    let Some(SortState { column, direction }) = sort else {
        return;
    };
    products.sort_by(|a, b| {
        let ordering = column.compare(a, b);
        match direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    });
}
