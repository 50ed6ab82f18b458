pub mod handlers;

pub use handlers::{method_not_allowed, not_found};
