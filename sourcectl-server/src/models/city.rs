//! Cities projection consumed by the downstream publisher

use serde::{Deserialize, Serialize};

/// An enabled source that carries a city name.
///
/// Derived on every query; has no identity of its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct City {
    pub name: String,
    /// The source's `article_index`
    pub index: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn group_id_omitted_when_absent() {
        let city = City {
            name: "Sudbury".into(),
            index: "sudbury_com_articles".into(),
            group_id: None,
        };
        assert_eq!(
            serde_json::to_value(&city).unwrap(),
            json!({ "name": "Sudbury", "index": "sudbury_com_articles" })
        );
    }
}
