use itertools::Itertools;
use std::collections::HashMap;

use crate::model::{Company, Product};
use crate::view::table::{compare_amount, compare_text, contains_folded, Order};

pub const UNIT_OPTIONS: [&str; 4] = ["pcs", "ml", "kg", "m"];
pub const DEFAULT_UNIT: &str = "pcs";

/// Shown in place of a company name the product no longer resolves to
pub const MISSING_COMPANY: &str = "—";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductSort {
    Name,
    Amount,
}

#[derive(Debug, Clone, Default)]
pub struct ProductQuery {
    pub search: Option<String>,
    pub category: Option<String>,
    pub sort: Option<(ProductSort, Order)>,
}

impl ProductQuery {
    pub fn matches(&self, product: &Product) -> bool {
        let text = self.search.as_deref().map_or(true, |s| {
            contains_folded(&product.name, s) || contains_folded(&product.category, s)
        });
        let category = self.category.as_deref().map_or(true, |c| product.category == c);
        text && category
    }

    pub fn apply(&self, products: Vec<Product>) -> Vec<Product> {
        let mut matched: Vec<Product> = products.into_iter()
            .filter(|p| self.matches(p))
            .collect();
        if let Some((sort, order)) = self.sort {
            matched.sort_by(|a, b| order.apply(match sort {
                ProductSort::Name => compare_text(&a.name, &b.name),
                ProductSort::Amount => compare_amount(a.amount, b.amount),
            }));
        }
        matched
    }
}

/// Distinct categories in the order they first appear
pub fn categories(products: &[Product]) -> Vec<String> {
    products.iter()
        .map(|p| p.category.clone())
        .unique()
        .collect()
}

pub struct CompanyNames(HashMap<String, String>);

impl CompanyNames {
    pub fn new(companies: &[Company]) -> Self {
        CompanyNames(companies.iter().map(|c| (c.id.clone(), c.name.clone())).collect())
    }

    pub fn name_of(&self, company_id: &str) -> &str {
        self.0.get(company_id).map(String::as_str).unwrap_or(MISSING_COMPANY)
    }
}
