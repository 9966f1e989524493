pub mod storage;
pub mod patch;

pub use storage::{Company, Product, Session, User};
pub use patch::{CompanyPatch, NewCompany, NewProduct, ProductPatch};
