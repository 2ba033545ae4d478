//! Comment API handler.
//!
//! ```text
//! POST /grams/{id}/comments {"message":"awesome gram"}
//! ```

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::ports::{CreateCommentInput, CreateCommentRequest};
use crate::inbound::http::ApiResult;
use crate::inbound::http::redirect;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::json_body;

/// Body for `POST /grams/{id}/comments`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(deny_unknown_fields)]
pub struct CreateCommentBody {
    #[schema(example = "awesome gram")]
    pub message: String,
}

/// Comment on a gram.
#[utoipa::path(
    post,
    path = "/grams/{id}/comments",
    params(("id" = String, Path, description = "Gram id")),
    request_body = CreateCommentBody,
    responses(
        (status = 302, description = "Created; redirect to `/`, or to sign-in when anonymous"),
        (status = 400, description = "Malformed body", body = ErrorSchema),
        (status = 404, description = "No such gram", body = ErrorSchema)
    ),
    tags = ["comments"],
    operation_id = "createComment"
)]
#[post("/grams/{id}/comments")]
pub async fn create_comment(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: Result<web::Json<CreateCommentBody>, actix_web::Error>,
) -> ApiResult<HttpResponse> {
    let acting_user = session.require_user()?;
    let CreateCommentBody { message } = json_body(payload)?;
    let comment = state
        .comments
        .create(CreateCommentRequest {
            acting_user: Some(acting_user),
            gram_id: path.into_inner(),
            input: CreateCommentInput { message },
        })
        .await?;
    debug!(comment_id = %comment.id(), "comment accepted");
    Ok(redirect::to_root())
}
