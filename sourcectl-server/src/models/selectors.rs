//! Nested CSS selector configuration
//!
//! Stored as a single JSON column for both sources and the global
//! selectors row. Every string field is optional on the wire: empty
//! values are omitted when serializing and missing ones default to empty,
//! so a stored document decodes back to the exact value that was written.
//! Exclusion lists keep their order.

use serde::{Deserialize, Serialize};

/// Selector groups for article pages, listing pages, and generic pages
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    pub article: ArticleSelectors,
    pub list: ListSelectors,
    pub page: PageSelectors,
}

impl SelectorConfig {
    /// True when no selector in any group is set.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Selectors applied to a single article page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArticleSelectors {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub container: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub title: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub body: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub intro: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub link: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub image: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub byline: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub published_time: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub time_ago: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub section: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub category: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub article_id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub json_ld: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub keywords: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub og_title: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub og_description: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub og_image: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub og_url: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub og_type: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub og_site_name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub canonical: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub author: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub exclude: Vec<String>,
}

/// Selectors applied to an index/listing page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListSelectors {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub container: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub article_cards: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub article_list: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub exclude_from_list: Vec<String>,
}

/// Selectors applied to non-article pages
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageSelectors {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub container: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub title: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub content: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub keywords: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub og_title: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub og_description: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub og_image: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub og_url: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub canonical: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub exclude: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    #[test]
    fn empty_fields_are_omitted() {
        let config = SelectorConfig {
            article: ArticleSelectors {
                title: "h1.headline".into(),
                ..Default::default()
            },
            ..Default::default()
        };

        let value = serde_json::to_value(&config).unwrap();
        assert_eq!(
            value,
            json!({
                "article": { "title": "h1.headline" },
                "list": {},
                "page": {}
            })
        );
    }

    #[test]
    fn missing_groups_default_to_empty() {
        let config: SelectorConfig =
            serde_json::from_value(json!({ "list": { "article_cards": ".card" } })).unwrap();

        assert_eq!(config.list.article_cards, ".card");
        assert_eq!(config.article, ArticleSelectors::default());
        assert_eq!(config.page, PageSelectors::default());
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let config: SelectorConfig = serde_json::from_value(json!({
            "article": { "body": ".story", "legacy_field": "x" },
            "extra": true
        }))
        .unwrap();

        assert_eq!(config.article.body, ".story");
    }

    #[test]
    fn is_empty_detects_default() {
        assert!(SelectorConfig::default().is_empty());

        let mut config = SelectorConfig::default();
        config.page.exclude.push(".ad".into());
        assert!(!config.is_empty());
    }

    fn selector() -> impl Strategy<Value = String> {
        prop_oneof![Just(String::new()), "[a-z.#\\[\\]=\" -]{1,24}"]
    }

    fn selector_list() -> impl Strategy<Value = Vec<String>> {
        prop::collection::vec("[a-z.#-]{1,16}", 0..6)
    }

    prop_compose! {
        fn arb_config()(
            title in selector(),
            body in selector(),
            published_time in selector(),
            article_exclude in selector_list(),
            cards in selector(),
            list_exclude in selector_list(),
            content in selector(),
            page_exclude in selector_list(),
        ) -> SelectorConfig {
            SelectorConfig {
                article: ArticleSelectors {
                    title,
                    body,
                    published_time,
                    exclude: article_exclude,
                    ..Default::default()
                },
                list: ListSelectors {
                    article_cards: cards,
                    exclude_from_list: list_exclude,
                    ..Default::default()
                },
                page: PageSelectors {
                    content,
                    exclude: page_exclude,
                    ..Default::default()
                },
            }
        }
    }

    proptest! {
        #[test]
        fn json_round_trip_is_lossless(config in arb_config()) {
            let text = serde_json::to_string(&config).unwrap();
            let decoded: SelectorConfig = serde_json::from_str(&text).unwrap();
            prop_assert_eq!(decoded, config);
        }
    }
}
