//! YAML front matter at the top of a documentation page.

use serde_yaml::Value;

const DELIMITER: &str = "---\n";
const CLOSING: &str = "\n---\n";

/// The front-matter fields used for ordering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrontMatter {
    /// Integer ordering weight
    pub weight: Option<i64>,
    /// Page title
    pub title: Option<String>,
}

impl FrontMatter {
    /// Extract known fields from parsed YAML. Anything but a mapping is empty.
    pub fn from_yaml(value: &Value) -> Self {
        Self {
            weight: value.get("weight").and_then(Value::as_i64),
            title: value.get("title").and_then(Value::as_str).map(str::to_string),
        }
    }
}

/// Split a page into its front matter and body.
///
/// Front matter is a `---` line at the very start, up to the next `---`
/// line. Pages without it, or with invalid YAML, get empty front matter;
/// the delimited block is still removed in the latter case.
pub fn split_front_matter(text: &str) -> (FrontMatter, &str) {
    let Some(rest) = text.strip_prefix(DELIMITER) else {
        return (FrontMatter::default(), text);
    };
    let Some(end) = rest.find(CLOSING) else {
        return (FrontMatter::default(), text);
    };

    let yaml = rest[..end].trim();
    let body = &rest[end + CLOSING.len()..];

    let meta = match serde_yaml::from_str::<Value>(yaml) {
        Ok(value) => FrontMatter::from_yaml(&value),
        Err(e) => {
            log::debug!("Ignoring invalid front matter: {}", e);
            FrontMatter::default()
        }
    };
    (meta, body)
}
