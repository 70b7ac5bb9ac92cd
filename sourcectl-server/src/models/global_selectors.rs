//! The shared fallback selector configuration

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::SelectorConfig;

/// Key of the only global selectors row.
pub const GLOBAL_SELECTORS_ID: i16 = 1;

/// Singleton selector configuration used as a default across sources
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobalSelectors {
    pub id: i16,
    pub selectors: SelectorConfig,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
