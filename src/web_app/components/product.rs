// web_app/components/product.rs - Product display components
//
// - ProductCard: grid card used by the infinite-scroll view
// - ProductTable: sortable table used by the paginated view

use leptos::prelude::*;

use crate::web_app::columns::{Column, SortState};
use crate::web_app::model::Product;

/// Product card for the scroll grid
#[component]
pub fn ProductCard(product: Product) -> impl IntoView {
    let price = product.price_display();

    view! {
        <div class="bg-white rounded-xl shadow-md hover:shadow-xl transition-shadow overflow-hidden">
            <div class="p-4">
                <h3 class="font-semibold text-lg line-clamp-1">{product.name}</h3>
                <p class="text-sm text-indigo-600 font-medium">{product.category}</p>
                <p class="text-2xl font-bold mt-2">{price}</p>
            </div>
        </div>
    }
}

/// Header cell text, with the sort indicator for the sorted column
pub fn header_label(column: Column, sort: Option<SortState>) -> String {
    match sort {
        Some(state) if state.column == column => {
            format!("{} {}", column.header(), state.direction.indicator())
        }
        _ => column.header().to_string(),
    }
}

/// Table of the current page's rows
///
/// Clicking a header cycles the sort of that column.
#[component]
pub fn ProductTable(
    rows: Signal<Vec<Product>>,
    sort: Signal<Option<SortState>>,
    on_sort: Callback<Column>,
) -> impl IntoView {
    view! {
        <div class="bg-white rounded-xl shadow-md overflow-hidden">
            <table class="w-full">
                <thead class="bg-gray-50 border-b">
                    <tr>
                        {Column::ALL
                            .into_iter()
                            .map(|column| {
                                view! {
                                    <th
                                        class="px-6 py-3 text-left text-xs font-medium text-gray-500 uppercase tracking-wider cursor-pointer select-none"
                                        on:click=move |_| on_sort.run(column)
                                    >
                                        {move || header_label(column, sort.get())}
                                    </th>
                                }
                            })
                            .collect_view()}
                    </tr>
                </thead>
                <tbody class="divide-y divide-gray-200">
                    <For
                        each=move || rows.get()
                        key=|product| product.id
                        children=move |product| {
                            view! {
                                <tr class="hover:bg-gray-50">
                                    <td class="px-6 py-4 text-sm">
                                        <div class="font-medium">{Column::Name.cell(&product)}</div>
                                    </td>
                                    <td class="px-6 py-4 text-sm">{Column::Category.cell(&product)}</td>
                                    <td class="px-6 py-4 text-sm">{Column::Price.cell(&product)}</td>
                                </tr>
                            }
                        }
                    />
                </tbody>
            </table>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::web_app::columns::SortDirection;

    #[test]
    fn test_header_label() {
        let sort = Some(SortState {
            column: Column::Price,
            direction: SortDirection::Descending,
        });
        assert_eq!(header_label(Column::Price, sort), "Price ▼");
        assert_eq!(header_label(Column::Name, sort), "Name");
        assert_eq!(header_label(Column::Name, None), "Name");
    }
}
