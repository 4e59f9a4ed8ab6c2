// fixtures/catalog.rs - In-memory product catalog
//
// Stands in for the listing endpoint in tests: a deterministic product set
// generated from a seed, paged and searched the way the backend does it
// (offset = (page - 1) * limit, search over name and description).

use futures::future::{self, LocalBoxFuture};
use futures::FutureExt;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;

use crate::web_app::api::{FetchError, PageRequest, ProductSource};
use crate::web_app::model::{PageResponse, Product};

/// Category names of the reference seed data
pub const CATEGORIES: [&str; 9] = [
    "Smartphones",
    "Laptops",
    "Sneakers",
    "Headphones",
    "Books",
    "Cookware",
    "Cameras",
    "Gaming Consoles",
    "Watches",
];

const WORDS: [&str; 16] = [
    "Amber", "Breeze", "Cobalt", "Drift", "Ember", "Falcon", "Glacier", "Harbor", "Ivory", "Jasper",
    "Lumen", "Meadow", "Nimbus", "Orbit", "Pioneer", "Quartz",
];

/// Build a product by hand; `cents` is the price in hundredths
pub fn product(id: i32, name: &str, category: &str, cents: i64) -> Product {
    Product {
        id,
        name: name.to_string(),
        description: format!("{} from the {} aisle", name, category),
        category: category.to_string(),
        price: Decimal::new(cents, 2),
    }
}

#[derive(Clone, Debug, Default)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// `count` products with ids `1..=count`, identical for the same seed
    pub fn seeded(count: usize, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let products = (1..=count)
            .map(|id| {
                let first = WORDS.choose(&mut rng).copied().unwrap_or("Plain");
                let second = WORDS.choose(&mut rng).copied().unwrap_or("Item");
                let category = CATEGORIES.choose(&mut rng).copied().unwrap_or("Books");
                let mut item = product(
                    i32::try_from(id).unwrap_or(i32::MAX),
                    &format!("{} {}", first, second),
                    category,
                    rng.gen_range(999..=99_999),
                );
                item.description = format!("{} {} number {}", first.to_lowercase(), category.to_lowercase(), id);
                item
            })
            .collect();
        Self { products }
    }

    pub fn from_products(products: Vec<Product>) -> Self {
        Self { products }
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Answer `request` like the listing endpoint would
    pub fn page(&self, request: &PageRequest) -> PageResponse {
        let needle = request.search.as_deref().map(str::to_lowercase);
        let matching: Vec<&Product> = self
            .products
            .iter()
            .filter(|p| match &needle {
                Some(needle) => {
                    p.name.to_lowercase().contains(needle) || p.description.to_lowercase().contains(needle)
                }
                None => true,
            })
            .collect();

        let offset = (request.page as usize - 1) * request.limit as usize;
        PageResponse {
            data: matching
                .iter()
                .skip(offset)
                .take(request.limit as usize)
                .map(|p| (*p).clone())
                .collect(),
            total: matching.len() as u64,
            page: request.page,
            limit: Some(request.limit),
        }
    }
}

impl ProductSource for Catalog {
    fn fetch_page(&self, request: &PageRequest) -> LocalBoxFuture<'static, Result<PageResponse, FetchError>> {
        future::ready(Ok(self.page(request))).boxed_local()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_catalog_is_deterministic() {
        let a = Catalog::seeded(30, 42);
        let b = Catalog::seeded(30, 42);
        assert_eq!(a.products(), b.products());
        assert_eq!(a.len(), 30);
        assert!(a.products().iter().all(|p| CATEGORIES.contains(&p.category.as_str())));
        assert!(a
            .products()
            .iter()
            .all(|p| p.price >= Decimal::new(999, 2) && p.price <= Decimal::new(99_999, 2)));
    }

    #[test]
    fn test_paging() {
        let catalog = Catalog::seeded(45, 1);
        let last = catalog.page(&PageRequest::new(3, 20, None).unwrap());
        assert_eq!(last.data.len(), 5);
        assert_eq!(last.total, 45);
        assert_eq!(last.data[0].id, 41);

        let beyond = catalog.page(&PageRequest::new(4, 20, None).unwrap());
        assert!(beyond.data.is_empty());
        assert_eq!(beyond.total, 45);
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let catalog = Catalog::from_products(vec![
            product(1, "Desk Lamp", "Home", 2999),
            product(2, "Frying Pan", "Cookware", 3500),
            product(3, "LAMP shade", "Home", 1200),
        ]);
        let page = catalog.page(&PageRequest::new(1, 10, Some("lamp")).unwrap());
        assert_eq!(page.total, 2);
        assert_eq!(page.data.iter().map(|p| p.id).collect::<Vec<_>>(), vec![1, 3]);
    }
}
