use itertools::Itertools;

use crate::backend::Backend;
use crate::error::Result;
use crate::model::{Company, Product};
use crate::store::Store;

/// How many recent records each dashboard list shows
pub const LATEST: usize = 3;

#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub company_count: usize,
    pub product_count: usize,
    pub latest_companies: Vec<Company>,
    pub latest_products: Vec<Product>,
}

impl Summary {
    pub fn build(companies: &[Company], products: &[Product]) -> Summary {
        Summary {
            company_count: companies.len(),
            product_count: products.len(),
            latest_companies: companies.iter()
                .sorted_by(|a, b| b.created_at.cmp(&a.created_at))
                .take(LATEST)
                .cloned()
                .collect(),
            latest_products: products.iter()
                .sorted_by(|a, b| b.created_at.cmp(&a.created_at))
                .take(LATEST)
                .cloned()
                .collect(),
        }
    }

    pub fn load<B: Backend>(store: &Store<B>) -> Result<Summary> {
        let companies = store.list_companies()?;
        let products = store.list_products()?;
        Ok(Summary::build(&companies, &products))
    }
}

pub fn describe_company(company: &Company) -> String {
    format!("{} • {}", company.country, company.website)
}

pub fn describe_product(product: &Product) -> String {
    format!("{} • {} {}", product.category, product.amount, product.unit)
}
