//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every gram, comment, picture, user and health
//! endpoint, the DTO schemas, and the session cookie security scheme. The
//! document backs Swagger UI in debug builds and is exported with
//! `cargo run --bin openapi-dump`.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::inbound::http::comments::CreateCommentBody;
use crate::inbound::http::grams::{CreateGramForm, UpdateGramBody};
use crate::inbound::http::schemas::{
    CommentResponse, EditGramResponse, ErrorCodeSchema, ErrorSchema, FormDescriptor, FormField,
    GramResponse,
};
use crate::inbound::http::users::SignInRequest;

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Encrypted session cookie issued by POST /users/sign_in.",
            ))),
        );
    }
}

/// OpenAPI document for the gram API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Grammable API",
        description = "Post pictures with a message, comment on them, and manage your own grams."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::grams::index,
        crate::inbound::http::grams::new_gram,
        crate::inbound::http::grams::create_gram,
        crate::inbound::http::grams::show_gram,
        crate::inbound::http::grams::edit_gram,
        crate::inbound::http::grams::update_gram,
        crate::inbound::http::grams::destroy_gram,
        crate::inbound::http::comments::create_comment,
        crate::inbound::http::pictures::show_picture,
        crate::inbound::http::users::sign_in_form,
        crate::inbound::http::users::sign_in,
        crate::inbound::http::users::sign_out,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        GramResponse,
        CommentResponse,
        EditGramResponse,
        FormDescriptor,
        FormField,
        CreateGramForm,
        UpdateGramBody,
        CreateCommentBody,
        SignInRequest,
        ErrorSchema,
        ErrorCodeSchema
    )),
    tags(
        (name = "grams", description = "Posting, editing and deleting grams"),
        (name = "comments", description = "Comments on grams"),
        (name = "pictures", description = "Stored gram pictures"),
        (name = "users", description = "Session sign-in and sign-out"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
