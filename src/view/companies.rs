use crate::backend::Backend;
use crate::error::Result;
use crate::model::Company;
use crate::store::Store;
use crate::view::table::{compare_text, contains_folded, Order};

pub const COUNTRY_OPTIONS: [&str; 9] = [
    "USA", "Germany", "UK", "Türkiye", "France", "Italy", "Japan", "Canada", "Netherlands",
];

/// Preselected country on the add form
pub const DEFAULT_COUNTRY: &str = "Türkiye";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompanySort {
    Name,
    LegalNumber,
}

#[derive(Debug, Clone, Default)]
pub struct CompanyQuery {
    pub search: Option<String>,
    pub country: Option<String>,
    pub sort: Option<(CompanySort, Order)>,
}

impl CompanyQuery {
    pub fn matches(&self, company: &Company) -> bool {
        let text = self.search.as_deref().map_or(true, |s| {
            [&company.name, &company.legal_number, &company.country, &company.website]
                .iter()
                .any(|v| contains_folded(v, s))
        });
        let country = self.country.as_deref().map_or(true, |c| company.country == c);
        text && country
    }

    /// Filter, then sort if asked; otherwise stored order is kept
    pub fn apply(&self, companies: Vec<Company>) -> Vec<Company> {
        let mut matched: Vec<Company> = companies.into_iter()
            .filter(|c| self.matches(c))
            .collect();
        if let Some((sort, order)) = self.sort {
            matched.sort_by(|a, b| order.apply(match sort {
                CompanySort::Name => compare_text(&a.name, &b.name),
                CompanySort::LegalNumber => compare_text(&a.legal_number, &b.legal_number),
            }));
        }
        matched
    }
}

pub fn delete_message(name: &str, related: usize) -> String {
    if related > 0 {
        format!("Deleted {} and {} related product(s).", name, related)
    } else {
        format!("Deleted {}.", name)
    }
}

/// Delete a company with its products and describe what happened
pub fn delete_company<B: Backend>(store: &mut Store<B>, id: &str) -> Result<String> {
    let name = store.find_company(id)?
        .map(|c| c.name)
        .unwrap_or_else(|| id.to_owned());
    let related = store.delete_company(id)?;
    Ok(delete_message(&name, related))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MemoryBackend;
    use crate::model::{NewCompany, NewProduct};

    fn seeded() -> Store<MemoryBackend> {
        Store::open(MemoryBackend::new()).unwrap()
    }

    #[test]
    fn search_covers_all_text_columns() {
        let companies = seeded().list_companies().unwrap();
        let by = |s: &str| CompanyQuery { search: Some(s.into()), ..Default::default() }
            .apply(companies.clone())
            .into_iter()
            .map(|c| c.name)
            .collect::<Vec<_>>();
        assert_eq!(by("acme"), vec!["Acme Corp"]);
        assert_eq!(by("glx-"), vec!["Globex"]);
        assert_eq!(by("GERMANY"), vec!["Globex"]);
        assert_eq!(by(".example"), vec!["Acme Corp", "Globex"]);
        assert!(by("initech").is_empty());
    }

    #[test]
    fn country_filter_is_exact() {
        let companies = seeded().list_companies().unwrap();
        let query = CompanyQuery { country: Some("USA".into()), ..Default::default() };
        let names: Vec<_> = query.apply(companies.clone()).into_iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["Acme Corp"]);
        let query = CompanyQuery { country: Some("usa".into()), ..Default::default() };
        assert!(query.apply(companies).is_empty());
    }

    #[test]
    fn sorts_by_legal_number_descending() {
        let companies = seeded().list_companies().unwrap();
        let query = CompanyQuery {
            sort: Some((CompanySort::LegalNumber, Order::Desc)),
            ..Default::default()
        };
        let numbers: Vec<_> = query.apply(companies).into_iter().map(|c| c.legal_number).collect();
        assert_eq!(numbers, vec!["GLX-777", "ACM-001"]);
    }

    #[test]
    fn delete_reports_related_products() {
        let mut store = seeded();
        let company = store.create_company(NewCompany {
            name: "Initech".into(),
            legal_number: "INI-1".into(),
            country: "USA".into(),
            website: "https://initech.example".into(),
        }).unwrap();
        for name in &["Stapler", "TPS Cover"] {
            store.create_product(NewProduct {
                name: (*name).into(),
                category: "Office".into(),
                amount: 1.0,
                unit: "pcs".into(),
                company_id: company.id.clone(),
            }).unwrap();
        }
        let message = delete_company(&mut store, &company.id).unwrap();
        assert_eq!(message, "Deleted Initech and 2 related product(s).");
        assert_eq!(delete_message("Globex", 0), "Deleted Globex.");
    }
}
