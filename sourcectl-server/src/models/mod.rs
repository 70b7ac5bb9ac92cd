//! Domain models with validation at the request boundary
//!
//! Request payloads are validated before they reach storage.
//! Invalid input returns ValidationError, not panic.

pub mod validation;
pub mod selectors;
pub mod source;
pub mod city;
pub mod global_selectors;

pub use validation::ValidationError;
pub use selectors::{ArticleSelectors, ListSelectors, PageSelectors, SelectorConfig};
pub use source::{Source, SourceInput};
pub use city::City;
pub use global_selectors::{GlobalSelectors, GLOBAL_SELECTORS_ID};
