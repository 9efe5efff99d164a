// ============ Model implementations ============

pub(crate) mod bert;

// Public model structs and size enums (for type annotations)
pub use bert::BertSize;
