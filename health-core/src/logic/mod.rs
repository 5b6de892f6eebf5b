//! Logic Module - Screening pipeline
//!
//! - `domain` / `features` - domain ids and the authoritative feature layouts
//! - `schema` - per-domain field declarations
//! - `validate` - raw input -> `FeatureVector`
//! - `model` - classifier artifacts and the registry that owns them
//! - `dispatch` - `FeatureVector` -> `Outcome`
//! - `assistant` - the `submit` entry point tying it all together

pub mod assistant;
pub mod config;
pub mod dispatch;
pub mod domain;
pub mod features;
pub mod model;
pub mod schema;
pub mod validate;
