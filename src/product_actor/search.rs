//! Catalog search: predicate and ordering applied to product documents.
//!
//! The predicate runs inside the product actor (through a `Find` request); the
//! ordering and pagination run in the client on the returned clones.

use crate::model::{Product, SearchCriteria, SortField, SortOrder};
use std::cmp::Ordering;

/// Lowercased, whitespace-separated query terms. Empty when there is no query.
fn terms(query: Option<&str>) -> Vec<String> {
    query
        .map(|q| q.split_whitespace().map(str::to_lowercase).collect())
        .unwrap_or_default()
}

/// Compiled form of [`SearchCriteria`] that can be moved into a `Find` filter.
#[derive(Debug, Clone)]
pub struct CatalogFilter {
    terms: Vec<String>,
    criteria: SearchCriteria,
}

impl CatalogFilter {
    pub fn new(criteria: &SearchCriteria) -> Self {
        Self {
            terms: terms(criteria.query.as_deref()),
            criteria: criteria.clone(),
        }
    }

    /// A product matches when any query term appears in its name or description
    /// (case-insensitive) and every other criterion holds.
    pub fn matches(&self, product: &Product) -> bool {
        if !self.terms.is_empty() {
            let name = product.name.to_lowercase();
            let description = product
                .description
                .as_deref()
                .map(str::to_lowercase)
                .unwrap_or_default();
            let hit = self
                .terms
                .iter()
                .any(|term| name.contains(term.as_str()) || description.contains(term.as_str()));
            if !hit {
                return false;
            }
        }
        if let Some(category) = self.criteria.category {
            if product.category != category {
                return false;
            }
        }
        if let Some(filters) = &self.criteria.filters {
            if filters.min_price.is_some_and(|min| product.price < min) {
                return false;
            }
            if filters.max_price.is_some_and(|max| product.price > max) {
                return false;
            }
            if filters.in_stock.is_some_and(|in_stock| product.in_stock != in_stock) {
                return false;
            }
        }
        true
    }
}

fn compare_field(a: &Product, b: &Product, field: SortField) -> Ordering {
    match field {
        SortField::CreatedAt => a.created_at.cmp(&b.created_at),
        SortField::UpdatedAt => a.updated_at.cmp(&b.updated_at),
        SortField::Price => a.price.total_cmp(&b.price),
        SortField::Name => a.name.cmp(&b.name),
        SortField::Quantity => a.quantity.cmp(&b.quantity),
    }
}

/// Sorts by `field` in `order`; ties always fall back to ascending id so that
/// pages are stable.
pub fn sort_products(products: &mut [Product], field: SortField, order: SortOrder) {
    products.sort_by(|a, b| {
        let primary = compare_field(a, b, field);
        let primary = match order {
            SortOrder::Asc => primary,
            SortOrder::Desc => primary.reverse(),
        };
        primary.then_with(|| a.id.cmp(&b.id))
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Category, ProductId, SearchFilters};
    use chrono::{Duration, Utc};

    fn product(id: u32, name: &str, price: f64, quantity: u32, category: Category) -> Product {
        let at = Utc::now() + Duration::seconds(i64::from(id));
        Product {
            id: ProductId(id),
            name: name.into(),
            description: Some(format!("All about {name}")),
            price,
            category,
            quantity,
            in_stock: quantity > 0,
            image_url: None,
            created_at: at,
            updated_at: at,
        }
    }

    #[test]
    fn any_term_matches_name_or_description() {
        let filter = CatalogFilter::new(&SearchCriteria {
            query: Some("LAMP  gadget".into()),
            ..Default::default()
        });
        assert!(filter.matches(&product(1, "Desk Lamp", 20.0, 1, Category::Home)));
        assert!(filter.matches(&product(2, "Gadget", 5.0, 1, Category::Electronics)));
        assert!(!filter.matches(&product(3, "Novel", 9.0, 1, Category::Books)));

        let blank = CatalogFilter::new(&SearchCriteria {
            query: Some("   ".into()),
            ..Default::default()
        });
        assert!(blank.matches(&product(3, "Novel", 9.0, 1, Category::Books)));
    }

    #[test]
    fn category_price_and_stock_filters() {
        let filter = CatalogFilter::new(&SearchCriteria {
            category: Some(Category::Sports),
            filters: Some(SearchFilters {
                min_price: Some(10.0),
                max_price: Some(50.0),
                in_stock: Some(true),
            }),
            ..Default::default()
        });
        assert!(filter.matches(&product(1, "Ball", 10.0, 3, Category::Sports)));
        assert!(!filter.matches(&product(2, "Ball", 10.0, 0, Category::Sports)));
        assert!(!filter.matches(&product(3, "Bat", 60.0, 3, Category::Sports)));
        assert!(!filter.matches(&product(4, "Shirt", 20.0, 3, Category::Clothing)));
    }

    #[test]
    fn sort_breaks_ties_by_ascending_id() {
        let mut products = vec![
            product(3, "c", 5.0, 1, Category::Other),
            product(1, "a", 5.0, 1, Category::Other),
            product(2, "b", 9.0, 1, Category::Other),
        ];
        sort_products(&mut products, SortField::Price, SortOrder::Desc);
        let ids: Vec<u32> = products.iter().map(|p| p.id.0).collect();
        assert_eq!(ids, vec![2, 1, 3]);

        sort_products(&mut products, SortField::CreatedAt, SortOrder::Desc);
        let ids: Vec<u32> = products.iter().map(|p| p.id.0).collect();
        assert_eq!(ids, vec![3, 2, 1]);
    }
}
