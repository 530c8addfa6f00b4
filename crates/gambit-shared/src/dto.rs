//! Data Transfer Objects - request/response types for the API.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Body of `POST /api/posts` and `PUT /api/posts/{id}`.
///
/// Every field is optional on the wire so that missing fields can be
/// reported by name instead of as a generic JSON error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostRequest {
    pub title: Option<String>,
    pub date: Option<String>,
    pub version: Option<String>,
    pub content: Option<String>,
    pub slug: Option<String>,
    pub featured_image: Option<String>,
}

/// A stored post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostResponse {
    pub id: String,
    pub title: String,
    pub date: String,
    pub version: String,
    pub content: String,
    pub slug: String,
    pub featured_image: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// A post together with its rendered body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderedPostResponse {
    #[serde(flatten)]
    pub post: PostResponse,
    /// `None` when rendering failed; the raw `content` is still present.
    pub html: Option<String>,
}

/// Body of `POST /api/tournaments` and `PUT /api/tournaments/{id}`.
///
/// Numeric fields accept numbers or numeric strings, since the club's
/// admin form posts raw input values.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TournamentRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub max_players: Option<f64>,
    pub system: Option<String>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub time_per_player: Option<f64>,
    pub start_date: Option<String>,
    pub start_time: Option<String>,
    pub location: Option<String>,
    pub prizes: Option<String>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub cost: Option<f64>,
    pub status: Option<String>,
}

/// A stored tournament.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TournamentResponse {
    pub id: String,
    pub name: String,
    pub description: String,
    pub max_players: i32,
    pub system: String,
    pub time_per_player: i32,
    pub start_date: String,
    pub start_time: String,
    pub location: String,
    pub prizes: String,
    pub cost: f64,
    pub status: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Result of `POST /api/upload-image`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    pub message: String,
    #[serde(rename = "fileName")]
    pub file_name: String,
    pub url: String,
}

/// Result of a delete.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub success: bool,
}

/// Accept `12`, `12.5`, `"12"` or `" 12.5 "`. Blank strings and `null` count
/// as absent; anything else is an error.
fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        Value::Number(n) => Ok(n.as_f64()),
        Value::String(s) if s.trim().is_empty() => Ok(None),
        Value::String(s) => s
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| serde::de::Error::custom(format!("not a number: {s}"))),
        other => Err(serde::de::Error::custom(format!(
            "expected a number, got {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tournament_request_accepts_numeric_strings() {
        let req: TournamentRequest = serde_json::from_str(
            r#"{"name":"Blitz","max_players":"32","time_per_player":5,"cost":" 1500.50 "}"#,
        )
        .unwrap();
        assert_eq!(req.max_players, Some(32.0));
        assert_eq!(req.time_per_player, Some(5.0));
        assert_eq!(req.cost, Some(1500.5));
        assert_eq!(req.status, None);
    }

    #[test]
    fn test_tournament_request_blank_number_is_absent() {
        let req: TournamentRequest = serde_json::from_str(r#"{"cost":""}"#).unwrap();
        assert_eq!(req.cost, None);
        assert_eq!(req.max_players, None);
    }

    #[test]
    fn test_tournament_request_rejects_garbage_number() {
        let result = serde_json::from_str::<TournamentRequest>(r#"{"max_players":"muchos"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_rendered_post_flattens_fields() {
        let body = RenderedPostResponse {
            post: PostResponse {
                id: "1".into(),
                title: "Blitz".into(),
                date: "2022-09-22".into(),
                version: "NOTICIA".into(),
                content: "texto".into(),
                slug: "blitz".into(),
                featured_image: None,
                created_at: "2022-09-22T00:00:00Z".into(),
                updated_at: "2022-09-22T00:00:00Z".into(),
            },
            html: None,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["slug"], "blitz");
        assert!(json["html"].is_null());
    }

    #[test]
    fn test_upload_response_uses_camel_case_file_name() {
        let json = serde_json::to_value(UploadResponse {
            message: "ok".into(),
            file_name: "1-abc.png".into(),
            url: "https://x/1-abc.png".into(),
        })
        .unwrap();
        assert_eq!(json["fileName"], "1-abc.png");
    }
}
