//! Source records and the request payload used to create/update them

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use url::Url;
use uuid::Uuid;

use super::{SelectorConfig, ValidationError};

/// Duration strings the crawler's duration parser accepts: "1s", "500ms",
/// "1m30s", ".5s", "1.s", "+1s", or a bare "0".
static RATE_LIMIT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[-+]?(0|(([0-9]+(\.[0-9]*)?|\.[0-9]+)(ns|us|µs|μs|ms|s|m|h))+)$")
        .expect("invalid rate limit regex")
});

/// A stored scraping configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Source {
    pub id: Uuid,
    pub name: String,
    pub url: String,
    pub article_index: String,
    pub page_index: String,
    pub rate_limit: String,
    pub max_depth: i32,
    pub time: Vec<String>,
    pub selectors: SelectorConfig,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,
    pub enabled: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Source {
    /// Build a new record from validated input with fresh id and timestamps.
    pub fn from_input(input: SourceInput, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: input.name,
            url: input.url,
            article_index: input.article_index,
            page_index: input.page_index,
            rate_limit: input.rate_limit,
            max_depth: input.max_depth,
            time: input.time,
            selectors: input.selectors,
            city_name: input.city_name,
            group_id: input.group_id,
            enabled: input.enabled,
            created_at: now,
            updated_at: now,
        }
    }

    /// Overwrite every mutable field from `input`. Identity and
    /// `created_at` are kept; `updated_at` is left to the caller.
    pub fn apply(&mut self, input: SourceInput) {
        self.name = input.name;
        self.url = input.url;
        self.article_index = input.article_index;
        self.page_index = input.page_index;
        self.rate_limit = input.rate_limit;
        self.max_depth = input.max_depth;
        self.time = input.time;
        self.selectors = input.selectors;
        self.city_name = input.city_name;
        self.group_id = input.group_id;
        self.enabled = input.enabled;
    }
}

/// Create/update request body: every `Source` field except the
/// server-assigned ones.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SourceInput {
    pub name: String,
    pub url: String,
    pub article_index: String,
    #[serde(default)]
    pub page_index: String,
    #[serde(default)]
    pub rate_limit: String,
    #[serde(default)]
    pub max_depth: i32,
    #[serde(default)]
    pub time: Vec<String>,
    #[serde(default)]
    pub selectors: SelectorConfig,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,
    #[serde(default)]
    pub enabled: bool,
}

impl SourceInput {
    /// Reject payloads that cannot describe a crawlable source.
    ///
    /// The payload is never rewritten: what passes is stored as sent.
    ///
    /// # Rules
    /// - `name`: not blank
    /// - `url`: absolute http(s) URL with a host
    /// - `article_index`: not blank
    /// - `rate_limit`: empty or a duration such as `1s` / `500ms`
    /// - `max_depth`: not negative
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::Empty { field: "name" });
        }

        if self.url.trim().is_empty() {
            return Err(ValidationError::Empty { field: "url" });
        }
        let parsed = Url::parse(&self.url).map_err(|_| ValidationError::InvalidFormat {
            field: "url",
            reason: "must be an absolute URL",
        })?;
        if !matches!(parsed.scheme(), "http" | "https") || parsed.host_str().is_none() {
            return Err(ValidationError::InvalidFormat {
                field: "url",
                reason: "must use http or https and include a host",
            });
        }

        if self.article_index.trim().is_empty() {
            return Err(ValidationError::Empty {
                field: "article_index",
            });
        }

        if !self.rate_limit.is_empty() && !RATE_LIMIT_RE.is_match(&self.rate_limit) {
            return Err(ValidationError::InvalidFormat {
                field: "rate_limit",
                reason: "must be a duration such as 1s or 500ms",
            });
        }

        if self.max_depth < 0 {
            return Err(ValidationError::OutOfRange {
                field: "max_depth",
                min: 0,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> SourceInput {
        SourceInput {
            name: "sudbury.com".into(),
            url: "https://www.sudbury.com/".into(),
            article_index: "sudbury_com_articles".into(),
            page_index: "sudbury_com_pages".into(),
            rate_limit: "1s".into(),
            max_depth: 2,
            ..Default::default()
        }
    }

    #[test]
    fn accepts_complete_input() {
        assert_eq!(input().validate(), Ok(()));
    }

    #[test]
    fn rejects_blank_name() {
        let err = SourceInput {
            name: "   ".into(),
            ..input()
        }
        .validate()
        .unwrap_err();
        assert_eq!(err, ValidationError::Empty { field: "name" });
    }

    #[test]
    fn long_names_are_accepted() {
        let long = SourceInput {
            name: "a".repeat(1000),
            ..input()
        };
        assert!(long.validate().is_ok());
    }

    #[test]
    fn rejects_non_http_url() {
        for url in ["ftp://example.com", "not a url", "https://"] {
            let err = SourceInput {
                url: url.into(),
                ..input()
            }
            .validate()
            .unwrap_err();
            assert!(
                matches!(err, ValidationError::InvalidFormat { field: "url", .. }),
                "{url} should be rejected"
            );
        }
    }

    #[test]
    fn rejects_missing_article_index() {
        let err = SourceInput {
            article_index: String::new(),
            ..input()
        }
        .validate()
        .unwrap_err();
        assert_eq!(
            err,
            ValidationError::Empty {
                field: "article_index"
            }
        );
    }

    #[test]
    fn rate_limit_accepts_duration_grammar() {
        let accepted = [
            "", "0", "+0", "1s", "500ms", "1m30s", "1.5s", ".5s", "1.s", "+1s", "-1s", "2h",
            "10us", "10µs", "1h2m3.5s",
        ];
        for ok in accepted {
            let result = SourceInput {
                rate_limit: ok.into(),
                ..input()
            }
            .validate();
            assert!(result.is_ok(), "{ok} should be accepted");
        }

        for bad in ["fast", "1", "s1", "1 s", ".s", "00", "1d", "+"] {
            let result = SourceInput {
                rate_limit: bad.into(),
                ..input()
            }
            .validate();
            assert!(result.is_err(), "{bad} should be rejected");
        }
    }

    #[test]
    fn rejects_negative_depth() {
        let err = SourceInput {
            max_depth: -1,
            ..input()
        }
        .validate()
        .unwrap_err();
        assert!(matches!(err, ValidationError::OutOfRange { field: "max_depth", .. }));
    }

    #[test]
    fn validation_leaves_payload_untouched() {
        let given = SourceInput {
            name: " sudbury.com ".into(),
            city_name: Some(String::new()),
            group_id: Some("  ".into()),
            ..input()
        };
        let before = given.clone();

        given.validate().unwrap();
        assert_eq!(given, before);
    }

    #[test]
    fn apply_keeps_identity() {
        let now = Utc::now();
        let mut source = Source::from_input(input(), now);
        let id = source.id;

        source.apply(SourceInput {
            name: "renamed".into(),
            enabled: true,
            ..input()
        });

        assert_eq!(source.id, id);
        assert_eq!(source.created_at, now);
        assert_eq!(source.name, "renamed");
        assert!(source.enabled);
    }

    #[test]
    fn input_defaults_optional_fields() {
        let parsed: SourceInput = serde_json::from_str(
            r#"{"name":"a","url":"https://a.example","article_index":"a_articles"}"#,
        )
        .unwrap();
        assert!(parsed.time.is_empty());
        assert!(parsed.selectors.is_empty());
        assert!(!parsed.enabled);
        assert_eq!(parsed.max_depth, 0);
        assert_eq!(parsed.city_name, None);
    }
}
