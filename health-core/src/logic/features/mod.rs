//! Features Module - Ordered model inputs
//!
//! `layout` is the authority on feature order per domain; `vector` is the
//! validated, ordered input handed to a classifier.

pub mod layout;
pub mod vector;

// Re-export common types
pub use layout::{feature_count, layout, layout_hash, LayoutInfo, LayoutMismatchError, FEATURE_VERSION};
pub use vector::FeatureVector;
