//! Input shapes for creating and editing records.
//!
//! Edits are typed patches: each field is optional and only `Some` fields
//! overwrite the stored record. Ids are never patchable.

use serde::{Deserialize, Serialize};

use super::storage::{Company, Product};

/// Company fields supplied by the caller; id and timestamp are generated
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCompany {
    pub name: String,
    pub legal_number: String,
    pub country: String,
    pub website: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub name: String,
    pub category: String,
    pub amount: f64,
    pub unit: String,
    pub company_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CompanyPatch {
    pub name: Option<String>,
    pub legal_number: Option<String>,
    pub country: Option<String>,
    pub website: Option<String>,
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub category: Option<String>,
    pub amount: Option<f64>,
    pub unit: Option<String>,
    pub company_id: Option<String>,
    pub created_at: Option<String>,
}

fn overwrite<T>(slot: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *slot = value;
    }
}

impl NewCompany {
    pub fn into_company(self, id: String, created_at: String) -> Company {
        Company {
            id,
            name: self.name,
            legal_number: self.legal_number,
            country: self.country,
            website: self.website,
            created_at,
        }
    }
}

impl NewProduct {
    pub fn into_product(self, id: String, created_at: String) -> Product {
        Product {
            id,
            name: self.name,
            category: self.category,
            amount: self.amount,
            unit: self.unit,
            company_id: self.company_id,
            created_at,
        }
    }
}

impl CompanyPatch {
    pub fn is_empty(&self) -> bool {
        *self == CompanyPatch::default()
    }

    pub fn apply(self, company: &mut Company) {
        overwrite(&mut company.name, self.name);
        overwrite(&mut company.legal_number, self.legal_number);
        overwrite(&mut company.country, self.country);
        overwrite(&mut company.website, self.website);
        overwrite(&mut company.created_at, self.created_at);
    }
}

impl ProductPatch {
    pub fn is_empty(&self) -> bool {
        *self == ProductPatch::default()
    }

    pub fn apply(self, product: &mut Product) {
        overwrite(&mut product.name, self.name);
        overwrite(&mut product.category, self.category);
        overwrite(&mut product.amount, self.amount);
        overwrite(&mut product.unit, self.unit);
        overwrite(&mut product.company_id, self.company_id);
        overwrite(&mut product.created_at, self.created_at);
    }
}
