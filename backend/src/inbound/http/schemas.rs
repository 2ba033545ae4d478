//! Response bodies and OpenAPI schemas.
//!
//! Domain types stay framework-agnostic and do not derive `ToSchema`; the
//! DTOs here are what handlers serialise. `ErrorSchema` and `ErrorCodeSchema`
//! only describe the domain error for the generated document.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Comment, Gram, GramAccessPolicy, PictureFormat, UserId};

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    #[schema(rename = "unauthorized")]
    Unauthorized,
    #[schema(rename = "forbidden")]
    Forbidden,
    #[schema(rename = "not_found")]
    NotFound,
    /// Input was well formed but rejected; `details.fields` names the fields.
    #[schema(rename = "validation_failed")]
    ValidationFailed,
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Error)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    #[schema(example = "validation_failed")]
    code: ErrorCodeSchema,
    #[schema(example = "message can't be blank")]
    message: String,
    #[schema(example = "4f1c7a86-07a4-4f3f-9d0e-0b7f7b0f5e8a")]
    trace_id: Option<String>,
    details: Option<serde_json::Value>,
}

/// URL a stored picture is served from.
pub fn picture_url(key: &str) -> String {
    format!("/pictures/{key}")
}

/// A comment as shown under its gram.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CommentResponse {
    pub id: String,
    pub gram_id: String,
    pub author_id: String,
    #[schema(example = "awesome gram")]
    pub message: String,
    pub created_at: DateTime<Utc>,
}

impl From<&Comment> for CommentResponse {
    fn from(comment: &Comment) -> Self {
        Self {
            id: comment.id().to_string(),
            gram_id: comment.gram_id().to_string(),
            author_id: comment.author().to_string(),
            message: comment.message().to_owned(),
            created_at: comment.created_at(),
        }
    }
}

/// A gram with its comments, oldest first.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GramResponse {
    pub id: String,
    #[schema(example = "hello")]
    pub message: String,
    #[schema(example = "/pictures/0123456789abcdef0123456789abcdef.png")]
    pub picture_url: String,
    pub owner_id: String,
    /// Whether the signed-in viewer may edit or delete this gram.
    pub editable: bool,
    pub comments: Vec<CommentResponse>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl GramResponse {
    pub fn for_viewer(gram: &Gram, viewer: Option<&UserId>) -> Self {
        Self {
            id: gram.id().to_string(),
            message: gram.message().to_string(),
            picture_url: picture_url(gram.picture().as_str()),
            owner_id: gram.owner().to_string(),
            editable: GramAccessPolicy::can_modify(viewer, gram),
            comments: gram.comments().iter().map(CommentResponse::from).collect(),
            created_at: gram.created_at(),
            updated_at: gram.updated_at(),
        }
    }
}

/// One input of a form descriptor.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FormField {
    pub name: String,
    /// `text` or `file`.
    pub kind: String,
    pub required: bool,
    /// Accepted MIME types for file inputs.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub accept: Vec<String>,
    /// Size ceiling for file inputs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_bytes: Option<usize>,
    /// Prefilled value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

/// Where and how a form is submitted, and which inputs it has.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FormDescriptor {
    #[schema(example = "/grams")]
    pub action: String,
    #[schema(example = "POST")]
    pub method: String,
    /// Body encoding the action expects.
    #[schema(example = "multipart/form-data")]
    pub enctype: String,
    pub fields: Vec<FormField>,
}

impl FormDescriptor {
    /// Blank form for posting a gram.
    pub fn new_gram(max_picture_bytes: usize) -> Self {
        let accept = [PictureFormat::Jpeg, PictureFormat::Png, PictureFormat::Gif]
            .into_iter()
            .map(|format| format.content_type().to_owned())
            .collect();
        Self {
            action: "/grams".to_owned(),
            method: "POST".to_owned(),
            enctype: "multipart/form-data".to_owned(),
            fields: vec![
                FormField {
                    name: "message".to_owned(),
                    kind: "text".to_owned(),
                    required: true,
                    accept: Vec::new(),
                    max_bytes: None,
                    value: None,
                },
                FormField {
                    name: "picture".to_owned(),
                    kind: "file".to_owned(),
                    required: true,
                    accept,
                    max_bytes: Some(max_picture_bytes),
                    value: None,
                },
            ],
        }
    }

    /// Sign-in form; the target of every `unauthorized` redirect.
    pub fn sign_in() -> Self {
        let field = |name: &str, kind: &str| FormField {
            name: name.to_owned(),
            kind: kind.to_owned(),
            required: true,
            accept: Vec::new(),
            max_bytes: None,
            value: None,
        };
        Self {
            action: "/users/sign_in".to_owned(),
            method: "POST".to_owned(),
            enctype: "application/json".to_owned(),
            fields: vec![field("username", "text"), field("password", "password")],
        }
    }

    /// Edit form prefilled with the gram's current message.
    pub fn edit_gram(gram: &Gram) -> Self {
        Self {
            action: format!("/grams/{}", gram.id()),
            method: "PATCH".to_owned(),
            enctype: "application/json".to_owned(),
            fields: vec![FormField {
                name: "message".to_owned(),
                kind: "text".to_owned(),
                required: true,
                accept: Vec::new(),
                max_bytes: None,
                value: Some(gram.message().to_string()),
            }],
        }
    }
}

/// Edit form payload: the gram being edited and its form.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EditGramResponse {
    pub gram: GramResponse,
    pub form: FormDescriptor,
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::test_support::sample_gram;
    use rstest::rstest;
    use serde_json::Value;

    #[rstest]
    fn only_the_owner_sees_editable() {
        let owner = UserId::random();
        let gram = sample_gram("hello", &owner);

        assert!(GramResponse::for_viewer(&gram, Some(&owner)).editable);
        assert!(!GramResponse::for_viewer(&gram, Some(&UserId::random())).editable);
        assert!(!GramResponse::for_viewer(&gram, None).editable);
    }

    #[rstest]
    fn gram_response_uses_camel_case_and_picture_url() {
        let gram = sample_gram("hello", &UserId::random());
        let value = serde_json::to_value(GramResponse::for_viewer(&gram, None)).expect("json");

        assert_eq!(
            value["pictureUrl"].as_str(),
            Some(picture_url(gram.picture().as_str()).as_str())
        );
        assert_eq!(value["comments"], Value::Array(Vec::new()));
        assert!(value.get("ownerId").is_some());
    }

    #[rstest]
    fn edit_form_is_prefilled() {
        let gram = sample_gram("Initial Value", &UserId::random());
        let form = FormDescriptor::edit_gram(&gram);

        assert_eq!(form.method, "PATCH");
        assert_eq!(form.fields[0].value.as_deref(), Some("Initial Value"));
    }

    #[rstest]
    fn new_form_accepts_images_only() {
        let form = FormDescriptor::new_gram(1024);
        let picture = form
            .fields
            .iter()
            .find(|field| field.name == "picture")
            .expect("picture field");
        assert_eq!(picture.kind, "file");
        assert!(picture.accept.iter().all(|mime| mime.starts_with("image/")));
        assert_eq!(picture.max_bytes, Some(1024));
    }
}
