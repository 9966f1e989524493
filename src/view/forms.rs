//! Validation for the login, company and product forms.
//!
//! Add forms carry every field; edit forms arrive as `field=value`
//! assignments and become typed patches. Either way the same per-field
//! rules apply before anything is handed to the store.

use url::Url;

use crate::error::FormError;
use crate::model::{Company, CompanyPatch, NewCompany, NewProduct, ProductPatch};
use crate::view::companies::{COUNTRY_OPTIONS, DEFAULT_COUNTRY};
use crate::view::products::{DEFAULT_UNIT, UNIT_OPTIONS};

pub const MIN_PASSWORD_LEN: usize = 4;

type Result<T> = std::result::Result<T, FormError>;

fn required(field: &'static str, value: &str) -> Result<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(FormError::Required(field));
    }
    Ok(value.to_owned())
}

fn one_of(field: &'static str, value: &str, options: &[&str]) -> Result<String> {
    let value = required(field, value)?;
    if !options.contains(&value.as_str()) {
        return Err(FormError::NotAnOption { field, value });
    }
    Ok(value)
}

fn website(value: &str) -> Result<String> {
    let value = required("website", value)?;
    match Url::parse(&value) {
        Ok(url) if matches!(url.scheme(), "http" | "https") && url.host().is_some() => Ok(value),
        _ => Err(FormError::InvalidUrl(value)),
    }
}

fn amount(value: &str) -> Result<f64> {
    let value = required("amount", value)?;
    let parsed: f64 = value.parse()
        .map_err(|_| FormError::InvalidAmount(value.clone()))?;
    if !parsed.is_finite() {
        return Err(FormError::InvalidAmount(value));
    }
    if parsed < 0.0 {
        return Err(FormError::NegativeAmount);
    }
    Ok(parsed)
}

fn company_id(value: &str, companies: &[Company]) -> Result<String> {
    let value = required("company", value)?;
    if !companies.iter().any(|c| c.id == value) {
        return Err(FormError::UnknownCompany(value));
    }
    Ok(value)
}

#[derive(Debug, Clone)]
pub struct CredentialsForm {
    pub username: String,
    pub password: String,
}

impl CredentialsForm {
    pub fn for_login(&self) -> Result<(String, String)> {
        let username = required("username", &self.username)?;
        if self.password.is_empty() {
            return Err(FormError::Required("password"));
        }
        Ok((username, self.password.clone()))
    }

    /// Registration also enforces a minimum password length
    pub fn for_register(&self) -> Result<(String, String)> {
        let (username, password) = self.for_login()?;
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(FormError::TooShort { field: "password", min: MIN_PASSWORD_LEN });
        }
        Ok((username, password))
    }
}

#[derive(Debug, Clone, Default)]
pub struct CompanyForm {
    pub name: String,
    pub legal_number: String,
    pub country: Option<String>,
    pub website: String,
}

impl CompanyForm {
    pub fn validate(&self) -> Result<NewCompany> {
        Ok(NewCompany {
            name: required("name", &self.name)?,
            legal_number: required("legal number", &self.legal_number)?,
            country: one_of("country", self.country.as_deref().unwrap_or(DEFAULT_COUNTRY), &COUNTRY_OPTIONS)?,
            website: website(&self.website)?,
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct ProductForm {
    pub name: String,
    pub category: String,
    pub amount: String,
    pub unit: Option<String>,
    pub company_id: String,
}

impl ProductForm {
    /// `companies` are the ones the company picker would offer
    pub fn validate(&self, companies: &[Company]) -> Result<NewProduct> {
        Ok(NewProduct {
            name: required("name", &self.name)?,
            category: required("category", &self.category)?,
            amount: amount(&self.amount)?,
            unit: one_of("unit", self.unit.as_deref().unwrap_or(DEFAULT_UNIT), &UNIT_OPTIONS)?,
            company_id: company_id(&self.company_id, companies)?,
        })
    }
}

/// Split `legal-number=ACM-2` into a normalised field name and value.
/// `legalNumber`, `legal_number` and `legal-number` all name the same field.
fn split_assignment(assignment: &str) -> Result<(String, &str)> {
    let mut parts = assignment.splitn(2, '=');
    match (parts.next(), parts.next()) {
        (Some(field), Some(value)) if !field.trim().is_empty() => {
            let field = field.trim()
                .chars()
                .filter(|c| *c != '-' && *c != '_')
                .collect::<String>()
                .to_lowercase();
            Ok((field, value))
        }
        _ => Err(FormError::MalformedAssignment(assignment.to_owned())),
    }
}

pub fn company_patch<S: AsRef<str>>(assignments: &[S]) -> Result<CompanyPatch> {
    let mut patch = CompanyPatch::default();
    for assignment in assignments {
        let (field, value) = split_assignment(assignment.as_ref())?;
        match field.as_str() {
            "name" => patch.name = Some(required("name", value)?),
            "legalnumber" => patch.legal_number = Some(required("legal number", value)?),
            "country" => patch.country = Some(one_of("country", value, &COUNTRY_OPTIONS)?),
            "website" => patch.website = Some(website(value)?),
            _ => return Err(FormError::UnknownField(field)),
        }
    }
    Ok(patch)
}

/// A `company` assignment must name a company that exists right now
pub fn product_patch<S: AsRef<str>>(assignments: &[S], companies: &[Company]) -> Result<ProductPatch> {
    let mut patch = ProductPatch::default();
    for assignment in assignments {
        let (field, value) = split_assignment(assignment.as_ref())?;
        match field.as_str() {
            "name" => patch.name = Some(required("name", value)?),
            "category" => patch.category = Some(required("category", value)?),
            "amount" => patch.amount = Some(amount(value)?),
            "unit" => patch.unit = Some(one_of("unit", value, &UNIT_OPTIONS)?),
            "company" | "companyid" => patch.company_id = Some(company_id(value, companies)?),
            _ => return Err(FormError::UnknownField(field)),
        }
    }
    Ok(patch)
}
