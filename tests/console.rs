use catalog_admin::store::keys;
use catalog_admin::view::companies::{self, CompanyQuery};
use catalog_admin::view::dashboard::Summary;
use catalog_admin::view::forms::{self, CompanyForm, ProductForm};
use catalog_admin::{guard, Access, AuthContext, Backend, FileBackend, Route, Store, StoreError};

fn open(dir: &std::path::Path) -> AuthContext<FileBackend> {
    let store = Store::open(FileBackend::new(dir)).unwrap();
    AuthContext::new(store).unwrap()
}

#[test]
fn session_survives_restart_until_logout() {
    let dir = tempfile::tempdir().unwrap();

    let mut auth = open(dir.path());
    assert_eq!(guard(Route::Companies, auth.session()), Access::Redirect(Route::Auth));
    auth.login("admin", "admin").unwrap();
    drop(auth);

    let mut auth = open(dir.path());
    assert_eq!(auth.session().unwrap().username, "admin");
    assert_eq!(guard(Route::Companies, auth.session()), Access::Allow(Route::Companies));

    auth.logout().unwrap();
    auth.logout().unwrap();
    drop(auth);

    let auth = open(dir.path());
    assert!(!auth.is_authenticated());
    assert!(!dir.path().join("auth.json").exists());
}

#[test]
fn registered_user_persists() {
    let dir = tempfile::tempdir().unwrap();
    let mut auth = open(dir.path());
    auth.register("erin", "hunter2").unwrap();
    auth.logout().unwrap();
    drop(auth);

    let mut auth = open(dir.path());
    assert!(matches!(auth.register("erin", "again"), Err(StoreError::DuplicateUsername)));
    assert!(matches!(auth.login("erin", "wrong"), Err(StoreError::InvalidCredentials)));
    assert_eq!(auth.login("erin", "hunter2").unwrap().username, "erin");
}

#[test]
fn company_delete_takes_its_products_along() {
    let dir = tempfile::tempdir().unwrap();
    let mut auth = open(dir.path());
    auth.login("admin", "admin").unwrap();
    let store = auth.store_mut();

    let company = CompanyForm {
        name: "Umbrella".into(),
        legal_number: "UMB-9".into(),
        country: Some("UK".into()),
        website: "https://umbrella.example".into(),
    }.validate().unwrap();
    let company = store.create_company(company).unwrap();

    let existing = store.list_companies().unwrap();
    let product = ProductForm {
        name: "Vaccine".into(),
        category: "Pharma".into(),
        amount: "12".into(),
        unit: Some("ml".into()),
        company_id: company.id.clone(),
    }.validate(&existing).unwrap();
    let product = store.create_product(product).unwrap();
    assert_eq!(Summary::load(&*store).unwrap().product_count, 3);

    let message = companies::delete_company(store, &company.id).unwrap();
    assert_eq!(message, "Deleted Umbrella and 1 related product(s).");

    let reopened = Store::open(FileBackend::new(dir.path())).unwrap();
    assert!(reopened.list_products().unwrap().iter().all(|p| p.id != product.id));
    assert!(reopened.find_company(&company.id).unwrap().is_none());
    let summary = Summary::load(&reopened).unwrap();
    assert_eq!((summary.company_count, summary.product_count), (2, 2));
}

#[test]
fn failed_update_leaves_file_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = Store::open(FileBackend::new(dir.path())).unwrap();
    let before = std::fs::read(dir.path().join("companies.json")).unwrap();

    let patch = forms::company_patch(&["name=Renamed"]).unwrap();
    let err = store.update_company("missing", patch).unwrap_err();
    assert_eq!(err.to_string(), "Company not found");
    assert_eq!(std::fs::read(dir.path().join("companies.json")).unwrap(), before);
}

#[test]
fn edits_show_up_in_search() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = Store::open(FileBackend::new(dir.path())).unwrap();
    let globex = store.list_companies().unwrap().into_iter()
        .find(|c| c.name == "Globex")
        .unwrap();

    let patch = forms::company_patch(&["country=Japan"]).unwrap();
    store.update_company(&globex.id, patch).unwrap();

    let query = CompanyQuery { country: Some("Japan".into()), ..Default::default() };
    let hits = query.apply(store.list_companies().unwrap());
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, globex.id);
}

#[test]
fn files_keep_browser_layout() {
    let dir = tempfile::tempdir().unwrap();
    let store = Store::open(FileBackend::new(dir.path())).unwrap();
    let raw = store.backend().get(keys::COMPANIES).unwrap().unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(json[0]["legalNumber"], "ACM-001");
    assert!(json[0]["createdAt"].is_string());

    let raw = store.backend().get(keys::USERS).unwrap().unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(json[0]["passwordHash"], "admin");
}
