pub mod auth;
pub mod backend;
pub mod config;
pub mod error;
pub mod guard;
pub mod model;
pub mod store;
pub mod util;
pub mod view;

pub use auth::AuthContext;
pub use backend::{Backend, FileBackend, MemoryBackend};
pub use config::Config;
pub use error::{FormError, RecordKind, StoreError};
pub use guard::{guard, Access, Route};
pub use model::{Company, CompanyPatch, NewCompany, NewProduct, Product, ProductPatch, Session, User};
pub use store::Store;
