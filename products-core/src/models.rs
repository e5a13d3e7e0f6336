mod input;
mod product;

pub use input::{ProductDraft, ProductUpdate};
pub use product::{Product, ProductId};
