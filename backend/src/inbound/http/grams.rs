//! Gram API handlers.
//!
//! ```text
//! GET    /                  list grams
//! GET    /grams/new         new-gram form
//! POST   /grams             create (multipart: message, picture)
//! GET    /grams/{id}        show
//! GET    /grams/{id}/edit   edit form
//! PATCH  /grams/{id}        update {"message":"changed"}
//! DELETE /grams/{id}        destroy
//! ```
//!
//! Successful mutations redirect to `/`.

use actix_multipart::Multipart;
use actix_web::{HttpResponse, delete, get, patch, post, web};
use serde::{Deserialize, Serialize};

use crate::domain::ports::{
    CreateGramRequest, DestroyGramRequest, EditGramFormRequest, NewGramFormRequest,
    ShowGramRequest, UpdateGramInput, UpdateGramRequest,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::multipart::read_create_gram_form;
use crate::inbound::http::redirect;
use crate::inbound::http::schemas::{
    EditGramResponse, ErrorSchema, FormDescriptor, GramResponse,
};
use crate::inbound::http::session::{SessionContext, sign_in_required};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::json_body;

/// Body for `PATCH /grams/{id}`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(deny_unknown_fields)]
pub struct UpdateGramBody {
    #[schema(example = "changed")]
    pub message: String,
}

/// Multipart body for `POST /grams`, for documentation only.
#[derive(utoipa::ToSchema)]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct CreateGramForm {
    #[schema(example = "hello")]
    message: String,
    #[schema(value_type = String, format = Binary)]
    picture: Vec<u8>,
}

/// List every gram, newest first.
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Grams", body = [GramResponse]),
        (status = 503, description = "Storage unavailable", body = ErrorSchema)
    ),
    tags = ["grams"],
    operation_id = "listGrams",
    security([])
)]
#[get("/")]
pub async fn index(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<GramResponse>>> {
    let viewer = session.acting_user()?;
    let grams = state.grams_query.list().await?;
    Ok(web::Json(
        grams
            .iter()
            .map(|gram| GramResponse::for_viewer(gram, viewer.as_ref()))
            .collect(),
    ))
}

/// Blank form for posting a gram. Requires a signed-in user.
#[utoipa::path(
    get,
    path = "/grams/new",
    responses(
        (status = 200, description = "Form descriptor", body = FormDescriptor),
        (status = 302, description = "Not signed in; redirect to sign-in")
    ),
    tags = ["grams"],
    operation_id = "newGram"
)]
#[get("/grams/new")]
pub async fn new_gram(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<FormDescriptor>> {
    let acting_user = session.acting_user()?;
    state
        .grams_query
        .new_form(NewGramFormRequest { acting_user })
        .await?;
    Ok(web::Json(FormDescriptor::new_gram(state.max_picture_bytes)))
}

/// Post a gram.
#[utoipa::path(
    post,
    path = "/grams",
    request_body(content = CreateGramForm, content_type = "multipart/form-data"),
    responses(
        (status = 302, description = "Created; redirect to `/`, or to sign-in when anonymous"),
        (status = 400, description = "Unreadable form", body = ErrorSchema),
        (status = 422, description = "Blank message or unusable picture", body = ErrorSchema)
    ),
    tags = ["grams"],
    operation_id = "createGram"
)]
#[post("/grams")]
pub async fn create_gram(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: Multipart,
) -> ApiResult<HttpResponse> {
    let acting_user = session.require_user()?;
    let input = read_create_gram_form(payload, state.max_picture_bytes).await?;
    state
        .grams
        .create(CreateGramRequest {
            acting_user: Some(acting_user),
            input,
        })
        .await?;
    Ok(redirect::to_root())
}

/// Show one gram with its comments.
#[utoipa::path(
    get,
    path = "/grams/{id}",
    params(("id" = String, Path, description = "Gram id")),
    responses(
        (status = 200, description = "Gram", body = GramResponse),
        (status = 404, description = "No such gram", body = ErrorSchema)
    ),
    tags = ["grams"],
    operation_id = "showGram",
    security([])
)]
#[get("/grams/{id}")]
pub async fn show_gram(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<GramResponse>> {
    let viewer = session.acting_user()?;
    let gram = state
        .grams_query
        .show(ShowGramRequest {
            gram_id: path.into_inner(),
        })
        .await?;
    Ok(web::Json(GramResponse::for_viewer(&gram, viewer.as_ref())))
}

/// Edit form for a gram the viewer owns.
#[utoipa::path(
    get,
    path = "/grams/{id}/edit",
    params(("id" = String, Path, description = "Gram id")),
    responses(
        (status = 200, description = "Prefilled form", body = EditGramResponse),
        (status = 302, description = "Not signed in; redirect to sign-in"),
        (status = 403, description = "Not the owner", body = ErrorSchema),
        (status = 404, description = "No such gram", body = ErrorSchema)
    ),
    tags = ["grams"],
    operation_id = "editGram"
)]
#[get("/grams/{id}/edit")]
pub async fn edit_gram(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<EditGramResponse>> {
    let acting_user = session.acting_user()?;
    let gram = state
        .grams_query
        .edit_form(EditGramFormRequest {
            acting_user: acting_user.clone(),
            gram_id: path.into_inner(),
        })
        .await?;
    Ok(web::Json(EditGramResponse {
        gram: GramResponse::for_viewer(&gram, acting_user.as_ref()),
        form: FormDescriptor::edit_gram(&gram),
    }))
}

/// Change a gram's message.
#[utoipa::path(
    patch,
    path = "/grams/{id}",
    params(("id" = String, Path, description = "Gram id")),
    request_body = UpdateGramBody,
    responses(
        (status = 302, description = "Updated; redirect to `/`, or to sign-in when anonymous"),
        (status = 403, description = "Not the owner", body = ErrorSchema),
        (status = 404, description = "No such gram", body = ErrorSchema),
        (status = 422, description = "Blank message", body = ErrorSchema)
    ),
    tags = ["grams"],
    operation_id = "updateGram"
)]
#[patch("/grams/{id}")]
pub async fn update_gram(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: Result<web::Json<UpdateGramBody>, actix_web::Error>,
) -> ApiResult<HttpResponse> {
    let acting_user = session.acting_user()?;
    // Existence is checked before the session, so only an unreadable body
    // short-circuits to sign-in.
    let body = json_body(payload);
    if body.is_err() && acting_user.is_none() {
        return Err(sign_in_required());
    }
    let UpdateGramBody { message } = body?;
    state
        .grams
        .update(UpdateGramRequest {
            acting_user,
            gram_id: path.into_inner(),
            input: UpdateGramInput { message },
        })
        .await?;
    Ok(redirect::to_root())
}

/// Delete a gram and its comments.
#[utoipa::path(
    delete,
    path = "/grams/{id}",
    params(("id" = String, Path, description = "Gram id")),
    responses(
        (status = 302, description = "Deleted; redirect to `/`, or to sign-in when anonymous"),
        (status = 403, description = "Not the owner", body = ErrorSchema),
        (status = 404, description = "No such gram", body = ErrorSchema)
    ),
    tags = ["grams"],
    operation_id = "destroyGram"
)]
#[delete("/grams/{id}")]
pub async fn destroy_gram(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let acting_user = session.acting_user()?;
    state
        .grams
        .destroy(DestroyGramRequest {
            acting_user,
            gram_id: path.into_inner(),
        })
        .await?;
    Ok(redirect::to_root())
}

#[cfg(test)]
#[path = "grams_tests.rs"]
mod tests;
