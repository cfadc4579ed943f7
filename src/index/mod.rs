pub mod builder;
mod format;
pub mod inventory;
pub mod locate;
pub mod reader;
pub mod stats;
pub mod types;
pub mod validate;

pub use builder::IndexBuilder;
pub use inventory::{Inventory, ObjectLocation};
pub use locate::find_search_index;
pub use types::*;
pub use validate::Violation;
