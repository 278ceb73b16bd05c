//! Model of the conversion proxy's JSON response.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// One syndicated article as returned by the conversion proxy.
///
/// Every field is optional. The proxy sends `enclosure: {}` (or `[]`) and
/// `thumbnail: ""` for items without them, so empty values are treated as
/// missing by the accessors below; read fields through them.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct Item {
    #[serde(default)]
    pub(crate) title: Option<String>,
    #[serde(default)]
    pub(crate) link: Option<String>,
    #[serde(default)]
    pub(crate) description: Option<String>,
    #[serde(default, rename = "pubDate")]
    pub(crate) pub_date: Option<String>,
    #[serde(default)]
    pub(crate) thumbnail: Option<String>,
    #[serde(default, rename = "enclosure", deserialize_with = "enclosure_link")]
    pub(crate) enclosure_link: Option<String>,
    #[serde(default, rename = "media:content", deserialize_with = "media_content_url")]
    pub(crate) media_content_url: Option<String>,
}

impl Item {
    pub fn title(&self) -> Option<&str> {
        non_empty(&self.title)
    }

    pub fn link(&self) -> Option<&str> {
        non_empty(&self.link)
    }

    pub fn description(&self) -> Option<&str> {
        non_empty(&self.description)
    }

    pub fn pub_date(&self) -> Option<&str> {
        non_empty(&self.pub_date)
    }

    pub fn thumbnail(&self) -> Option<&str> {
        non_empty(&self.thumbnail)
    }

    pub fn enclosure_link(&self) -> Option<&str> {
        non_empty(&self.enclosure_link)
    }

    pub fn media_content_url(&self) -> Option<&str> {
        non_empty(&self.media_content_url)
    }
}

fn non_empty(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.trim().is_empty())
}

/// Top-level body of a conversion proxy response.
#[derive(Debug, Default, Deserialize)]
pub struct FeedResponse {
    /// `"ok"` or `"error"`
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub items: Option<Vec<Item>>,
}

impl FeedResponse {
    pub fn is_error(&self) -> bool {
        self.status
            .as_deref()
            .is_some_and(|s| s.eq_ignore_ascii_case("error"))
    }

    pub fn into_items(self) -> Vec<Item> {
        self.items.unwrap_or_default()
    }
}

fn string_at(value: &Value, key: &str) -> Option<String> {
    value.get(key).and_then(Value::as_str).map(str::to_string)
}

fn enclosure_link<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(string_at(&value, "link"))
}

fn media_content_url<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(string_at(&value, "url"))
}
