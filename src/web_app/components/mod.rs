// web_app/components/mod.rs - UI components module
//
// Structure:
// - common.rs: Loading, errors, buttons and the search box
// - pagination.rs: Numbered page window with Previous/Next
// - product.rs: Product display components (ProductCard, ProductTable)

pub mod common;
pub mod pagination;
pub mod product;

// Re-export commonly used components for convenience
pub use common::*;
pub use pagination::*;
pub use product::*;
