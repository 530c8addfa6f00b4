use serde::{Deserialize, Deserializer};

use crate::domain::PostDraft;

/// Metadata block at the top of a Markdown post file.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct FrontMatter {
    #[serde(default, deserialize_with = "scalar")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "scalar")]
    pub date: Option<String>,
    #[serde(default, deserialize_with = "scalar")]
    pub version: Option<String>,
    #[serde(default, deserialize_with = "scalar")]
    pub slug: Option<String>,
    #[serde(default, deserialize_with = "scalar")]
    pub featured_image: Option<String>,
}

/// Accept any YAML scalar (`version: 1.2`, `date: 2022-09-22`) as text.
fn scalar<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_yaml::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_yaml::Value::String(s)) => Some(s),
        Some(serde_yaml::Value::Number(n)) => Some(n.to_string()),
        Some(serde_yaml::Value::Bool(b)) => Some(b.to_string()),
        _ => None,
    })
}

#[derive(Debug, thiserror::Error)]
pub enum FrontMatterError {
    #[error("front matter is not closed by a `---` line")]
    Unterminated,

    #[error("invalid front matter: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// A post file split into its front matter and Markdown body.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkdownDocument {
    pub front_matter: FrontMatter,
    pub body: String,
}

impl MarkdownDocument {
    /// Split `text` into front matter and body. A file without a leading
    /// `---` line has empty front matter. The body is trimmed.
    pub fn parse(text: &str) -> Result<Self, FrontMatterError> {
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);
        let Some(rest) = strip_delimiter_line(text) else {
            return Ok(Self {
                front_matter: FrontMatter::default(),
                body: text.trim().to_string(),
            });
        };

        let mut offset = 0;
        for line in rest.split_inclusive('\n') {
            if line.trim_end() == "---" {
                let yaml = &rest[..offset];
                let body = &rest[offset + line.len()..];
                let front_matter = if yaml.trim().is_empty() {
                    FrontMatter::default()
                } else {
                    serde_yaml::from_str(yaml)?
                };
                return Ok(Self {
                    front_matter,
                    body: body.trim().to_string(),
                });
            }
            offset += line.len();
        }

        Err(FrontMatterError::Unterminated)
    }

    /// Build the editable post fields, taking the slug from the front matter
    /// or else from `default_slug` (usually the file stem).
    pub fn to_draft(&self, default_slug: &str) -> PostDraft {
        let fm = &self.front_matter;
        PostDraft {
            title: fm.title.clone().unwrap_or_default(),
            date: fm.date.clone().unwrap_or_default(),
            version: fm.version.clone().unwrap_or_default(),
            content: self.body.clone(),
            slug: fm.slug.clone().unwrap_or_else(|| default_slug.to_string()),
            featured_image: fm.featured_image.clone(),
        }
    }
}

fn strip_delimiter_line(text: &str) -> Option<&str> {
    let rest = text.strip_prefix("---")?;
    rest.strip_prefix("\r\n").or_else(|| rest.strip_prefix('\n'))
}
