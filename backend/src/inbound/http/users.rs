//! Sign-in and sign-out handlers.
//!
//! ```text
//! GET    /users/sign_in   sign-in form
//! POST   /users/sign_in   {"username":"alice","password":"password"}
//! DELETE /users/sign_out
//! ```

use actix_web::{HttpResponse, delete, get, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;

use crate::domain::{Error, LoginCredentials, LoginValidationError};
use crate::inbound::http::ApiResult;
use crate::inbound::http::redirect;
use crate::inbound::http::schemas::{ErrorSchema, FormDescriptor};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Sign-in request body for `POST /users/sign_in`.
///
/// Example JSON:
/// `{"username":"alice","password":"password"}`
#[derive(Deserialize, Serialize, utoipa::ToSchema)]
#[serde(deny_unknown_fields)]
pub struct SignInRequest {
    #[schema(example = "alice")]
    pub username: String,
    #[schema(example = "password")]
    pub password: String,
}

impl TryFrom<SignInRequest> for LoginCredentials {
    type Error = LoginValidationError;

    fn try_from(value: SignInRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.username, &value.password)
    }
}

fn map_login_validation_error(err: LoginValidationError) -> Error {
    match err {
        LoginValidationError::EmptyUsername => Error::invalid_request("username must not be empty")
            .with_details(json!({ "field": "username", "code": "empty_username" })),
        LoginValidationError::EmptyPassword => Error::invalid_request("password must not be empty")
            .with_details(json!({ "field": "password", "code": "empty_password" })),
    }
}

/// Sign-in form.
#[utoipa::path(
    get,
    path = "/users/sign_in",
    responses((status = 200, description = "Form descriptor", body = FormDescriptor)),
    tags = ["users"],
    operation_id = "signInForm",
    security([])
)]
#[get("/users/sign_in")]
pub async fn sign_in_form() -> web::Json<FormDescriptor> {
    web::Json(FormDescriptor::sign_in())
}

/// Authenticate and establish a session.
///
/// Wrong credentials are `unauthorized`, which redirects back to the form.
#[utoipa::path(
    post,
    path = "/users/sign_in",
    request_body = SignInRequest,
    responses(
        (status = 302, description = "Signed in; redirect to `/`. Bad credentials redirect back to the form",
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "signIn",
    security([])
)]
#[post("/users/sign_in")]
pub async fn sign_in(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<SignInRequest>,
) -> ApiResult<HttpResponse> {
    let credentials =
        LoginCredentials::try_from(payload.into_inner()).map_err(map_login_validation_error)?;
    let user_id = state.login.authenticate(&credentials).await?;
    session.persist_user(&user_id)?;
    info!(user_id = %user_id, "user signed in");
    Ok(redirect::to_root())
}

/// End the session.
#[utoipa::path(
    delete,
    path = "/users/sign_out",
    responses((status = 302, description = "Signed out; redirect to `/`")),
    tags = ["users"],
    operation_id = "signOut"
)]
#[delete("/users/sign_out")]
pub async fn sign_out(session: SessionContext) -> HttpResponse {
    session.clear();
    redirect::to_root()
}
