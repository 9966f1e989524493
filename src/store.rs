//! Record store over a [`Backend`].
//!
//! Each collection lives under one key as a JSON array. Every operation
//! reads the whole collection, changes it in memory and writes it back,
//! and writes only happen once validation has passed.

use anyhow::Context;
use log::{debug, info};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::backend::Backend;
use crate::error::{RecordKind, Result, StoreError};
use crate::model::{Company, CompanyPatch, NewCompany, NewProduct, Product, ProductPatch, Session, User};
use crate::util::{now_iso, uid};

/// Logical keys in the backend
pub mod keys {
    pub const USERS: &str = "users";
    pub const COMPANIES: &str = "companies";
    pub const PRODUCTS: &str = "products";
    pub const AUTH: &str = "auth";
}

pub const DEMO_USERNAME: &str = "admin";
pub const DEMO_PASSWORD: &str = "admin";

pub struct Store<B> {
    backend: B,
}

impl<B: Backend> Store<B> {
    /// Wrap a backend, populating any empty collection with demo data
    pub fn open(backend: B) -> Result<Self> {
        let mut store = Store { backend };
        store.seed()?;
        Ok(store)
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn into_backend(self) -> B {
        self.backend
    }

    fn read<T: DeserializeOwned>(&self, key: &'static str) -> Result<Option<T>> {
        match self.backend.get(key)? {
            Some(raw) if !raw.is_empty() => serde_json::from_str(&raw)
                .map(Some)
                .map_err(|source| StoreError::Corrupt { key, source }),
            _ => Ok(None),
        }
    }

    fn read_list<T: DeserializeOwned>(&self, key: &'static str) -> Result<Vec<T>> {
        Ok(self.read(key)?.unwrap_or_default())
    }

    fn write<T: Serialize + ?Sized>(&mut self, key: &'static str, value: &T) -> Result<()> {
        let raw = serde_json::to_string(value)
            .with_context(|| format!("Error serialising {}", key))?;
        self.backend.set(key, &raw)?;
        Ok(())
    }

    // Only fills collections that are empty, never overwrites
    fn seed(&mut self) -> Result<()> {
        let users: Vec<User> = self.read_list(keys::USERS)?;
        if users.is_empty() {
            info!("Seeding demo account {}", DEMO_USERNAME);
            let demo = User {
                id: uid(),
                username: DEMO_USERNAME.to_owned(),
                password_hash: DEMO_PASSWORD.to_owned(),
            };
            self.write(keys::USERS, &[demo])?;
        }

        let companies: Vec<Company> = self.read_list(keys::COMPANIES)?;
        if companies.is_empty() {
            info!("Seeding demo companies");
            let demo = [
                NewCompany {
                    name: "Acme Corp".into(),
                    legal_number: "ACM-001".into(),
                    country: "USA".into(),
                    website: "https://acme.example".into(),
                },
                NewCompany {
                    name: "Globex".into(),
                    legal_number: "GLX-777".into(),
                    country: "Germany".into(),
                    website: "https://globex.example".into(),
                },
            ];
            let demo: Vec<Company> = demo.iter().cloned()
                .map(|c| c.into_company(uid(), now_iso()))
                .collect();
            self.write(keys::COMPANIES, &demo)?;
        }

        let products: Vec<Product> = self.read_list(keys::PRODUCTS)?;
        if products.is_empty() {
            let companies: Vec<Company> = self.read_list(keys::COMPANIES)?;
            if let [first, second, ..] = companies.as_slice() {
                info!("Seeding demo products");
                let demo = vec![
                    NewProduct {
                        name: "Widget".into(),
                        category: "Gadget".into(),
                        amount: 120.0,
                        unit: "pcs".into(),
                        company_id: first.id.clone(),
                    }.into_product(uid(), now_iso()),
                    NewProduct {
                        name: "Super Glue".into(),
                        category: "Adhesive".into(),
                        amount: 50.0,
                        unit: "ml".into(),
                        company_id: second.id.clone(),
                    }.into_product(uid(), now_iso()),
                ];
                self.write(keys::PRODUCTS, &demo)?;
            } else {
                debug!("Fewer than two companies, skipping demo products");
            }
        }
        Ok(())
    }

    fn start_session(&mut self, user: &User) -> Result<Session> {
        let session = Session {
            token: uid(),
            user_id: user.id.clone(),
            username: user.username.clone(),
        };
        self.write(keys::AUTH, &session)?;
        Ok(session)
    }

    pub fn register(&mut self, username: &str, password: &str) -> Result<Session> {
        let mut users: Vec<User> = self.read_list(keys::USERS)?;
        if users.iter().any(|u| u.username == username) {
            return Err(StoreError::DuplicateUsername);
        }
        let user = User {
            id: uid(),
            username: username.to_owned(),
            password_hash: password.to_owned(),
        };
        users.push(user.clone());
        self.write(keys::USERS, &users)?;
        info!("Registered user {}", username);
        self.start_session(&user)
    }

    /// Replaces whatever session was stored before
    pub fn login(&mut self, username: &str, password: &str) -> Result<Session> {
        let users: Vec<User> = self.read_list(keys::USERS)?;
        let user = users.into_iter()
            .find(|u| u.username == username && u.password_hash == password)
            .ok_or(StoreError::InvalidCredentials)?;
        info!("User {} logged in", username);
        self.start_session(&user)
    }

    pub fn logout(&mut self) -> Result<()> {
        self.backend.remove(keys::AUTH)?;
        debug!("Session cleared");
        Ok(())
    }

    /// Stored session as-is; the referenced user is not checked
    pub fn current_session(&self) -> Result<Option<Session>> {
        self.read(keys::AUTH)
    }

    pub fn list_companies(&self) -> Result<Vec<Company>> {
        self.read_list(keys::COMPANIES)
    }

    pub fn find_company(&self, id: &str) -> Result<Option<Company>> {
        Ok(self.list_companies()?.into_iter().find(|c| c.id == id))
    }

    /// New records go to the front of the collection
    pub fn create_company(&mut self, fields: NewCompany) -> Result<Company> {
        let mut companies = self.list_companies()?;
        let created = fields.into_company(uid(), now_iso());
        companies.insert(0, created.clone());
        self.write(keys::COMPANIES, &companies)?;
        debug!("Created company {} ({})", created.name, created.id);
        Ok(created)
    }

    pub fn update_company(&mut self, id: &str, patch: CompanyPatch) -> Result<Company> {
        let mut companies = self.list_companies()?;
        let company = companies.iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| StoreError::NotFound { kind: RecordKind::Company, id: id.to_owned() })?;
        patch.apply(company);
        let updated = company.clone();
        self.write(keys::COMPANIES, &companies)?;
        debug!("Updated company {}", id);
        Ok(updated)
    }

    /// Removes the company and every product pointing at it.
    /// Returns how many products went with it.
    pub fn delete_company(&mut self, id: &str) -> Result<usize> {
        let mut companies = self.list_companies()?;
        companies.retain(|c| c.id != id);
        self.write(keys::COMPANIES, &companies)?;

        let mut products = self.list_products()?;
        let before = products.len();
        products.retain(|p| p.company_id != id);
        let removed = before - products.len();
        self.write(keys::PRODUCTS, &products)?;

        info!("Deleted company {} and {} related product(s)", id, removed);
        Ok(removed)
    }

    pub fn list_products(&self) -> Result<Vec<Product>> {
        self.read_list(keys::PRODUCTS)
    }

    pub fn find_product(&self, id: &str) -> Result<Option<Product>> {
        Ok(self.list_products()?.into_iter().find(|p| p.id == id))
    }

    /// `company_id` is stored as given, see `view::forms` for the check
    pub fn create_product(&mut self, fields: NewProduct) -> Result<Product> {
        let mut products = self.list_products()?;
        let created = fields.into_product(uid(), now_iso());
        products.insert(0, created.clone());
        self.write(keys::PRODUCTS, &products)?;
        debug!("Created product {} ({})", created.name, created.id);
        Ok(created)
    }

    pub fn update_product(&mut self, id: &str, patch: ProductPatch) -> Result<Product> {
        let mut products = self.list_products()?;
        let product = products.iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| StoreError::NotFound { kind: RecordKind::Product, id: id.to_owned() })?;
        patch.apply(product);
        let updated = product.clone();
        self.write(keys::PRODUCTS, &products)?;
        debug!("Updated product {}", id);
        Ok(updated)
    }

    /// Returns whether a product was actually removed; a missing id still succeeds
    pub fn delete_product(&mut self, id: &str) -> Result<bool> {
        let mut products = self.list_products()?;
        let before = products.len();
        products.retain(|p| p.id != id);
        self.write(keys::PRODUCTS, &products)?;
        Ok(products.len() != before)
    }
}
