//! What the console pages compute from store data: summaries, searches,
//! filters, pagination and form validation. Rendering lives in the binary.

pub mod table;
pub mod dashboard;
pub mod companies;
pub mod products;
pub mod forms;

pub use table::{Order, Page, PAGE_SIZE};
