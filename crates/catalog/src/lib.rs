//! Catalog value shapes accepted and echoed by the API.
//!
//! Every shape is an immutable value built only through [`Validate`], so a
//! constructed value is always fully valid.
//!
//! [`Validate`]: fieldcheck_core::Validate

pub mod item;
pub mod listing;
pub mod model_name;
pub mod offer;
pub mod product;
pub mod user;

pub use item::Item;
pub use listing::{ListedItem, LISTING};
pub use model_name::ModelName;
pub use offer::Offer;
pub use product::{Image, Product};
pub use user::User;
