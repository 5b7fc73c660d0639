mod types;

pub use types::{Item, ItemId, NewItem};
