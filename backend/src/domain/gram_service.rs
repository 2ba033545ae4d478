//! Gram domain service.
//!
//! Implements the [`GramQuery`] and [`GramCommand`] driving ports on top of a
//! [`GramRepository`] and a [`PictureStore`]. Owner-gated operations check,
//! in order: the gram exists, a user is acting, that user owns the gram, the
//! input is valid. Nothing is written unless every check passes.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;
use tracing::{info, warn};
use uuid::Uuid;

use super::ports::{
    CreateGramInput, CreateGramRequest, DestroyGramRequest, EditGramFormRequest, GramCommand,
    GramQuery, GramRepository, NewGramFormRequest, PictureStore, ShowGramRequest,
    UpdateGramRequest,
};
use super::service_guards::{
    gram_not_found, map_gram_repository_error, map_picture_store_error, parse_gram_id,
    require_user,
};
use super::{
    DEFAULT_MAX_PICTURE_BYTES, Error, Gram, GramAccessPolicy, GramDraft, GramMessage,
    GramValidationError, PictureKey, UserId,
};

/// Build the `validation_failed` error, echoing the submitted message so the
/// form can be re-rendered.
fn validation_error(violations: &[GramValidationError], submitted_message: &str) -> Error {
    let summary = violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ");
    let fields: Vec<&str> = violations.iter().map(GramValidationError::field).collect();
    let errors: Vec<_> = violations
        .iter()
        .map(|violation| {
            json!({
                "field": violation.field(),
                "code": violation.code(),
                "message": violation.to_string(),
            })
        })
        .collect();
    Error::validation_failed(summary).with_details(json!({
        "fields": fields,
        "errors": errors,
        "input": { "message": submitted_message },
    }))
}

/// Gram service implementing the gram driving ports.
#[derive(Clone)]
pub struct GramService<G, P> {
    grams: Arc<G>,
    pictures: Arc<P>,
    clock: Arc<dyn Clock>,
    max_picture_bytes: usize,
}

impl<G, P> GramService<G, P> {
    /// Create a service with the default picture size ceiling.
    pub fn new(grams: Arc<G>, pictures: Arc<P>, clock: Arc<dyn Clock>) -> Self {
        Self {
            grams,
            pictures,
            clock,
            max_picture_bytes: DEFAULT_MAX_PICTURE_BYTES,
        }
    }

    /// Override the largest accepted picture, in bytes.
    #[must_use]
    pub fn with_max_picture_bytes(mut self, max_picture_bytes: usize) -> Self {
        self.max_picture_bytes = max_picture_bytes;
        self
    }
}

impl<G, P> GramService<G, P>
where
    G: GramRepository,
    P: PictureStore,
{
    async fn find(&self, gram_id: &Uuid) -> Result<Gram, Error> {
        self.grams
            .find_by_id(gram_id)
            .await
            .map_err(map_gram_repository_error)?
            .ok_or_else(gram_not_found)
    }

    /// Resolve a gram the acting user is allowed to change.
    async fn find_modifiable(
        &self,
        acting_user: Option<&UserId>,
        raw_gram_id: &str,
    ) -> Result<Gram, Error> {
        let gram_id = parse_gram_id(raw_gram_id)?;
        let gram = self.find(&gram_id).await?;
        let user = require_user(acting_user)?;
        if !GramAccessPolicy::can_modify(Some(user), &gram) {
            warn!(gram_id = %gram_id, user_id = %user, "gram change refused for non-owner");
            return Err(Error::forbidden("only the owner may change this gram"));
        }
        Ok(gram)
    }

    /// Best-effort removal of a picture no gram refers to any more.
    async fn discard_picture(&self, key: &PictureKey) {
        if let Err(error) = self.pictures.remove(key).await {
            warn!(picture = %key, %error, "failed to remove orphaned picture");
        }
    }
}

#[async_trait]
impl<G, P> GramQuery for GramService<G, P>
where
    G: GramRepository,
    P: PictureStore,
{
    async fn list(&self) -> Result<Vec<Gram>, Error> {
        self.grams.list().await.map_err(map_gram_repository_error)
    }

    async fn show(&self, request: ShowGramRequest) -> Result<Gram, Error> {
        let gram_id = parse_gram_id(&request.gram_id)?;
        self.find(&gram_id).await
    }

    async fn new_form(&self, request: NewGramFormRequest) -> Result<(), Error> {
        require_user(request.acting_user.as_ref())?;
        Ok(())
    }

    async fn edit_form(&self, request: EditGramFormRequest) -> Result<Gram, Error> {
        self.find_modifiable(request.acting_user.as_ref(), &request.gram_id)
            .await
    }
}

#[async_trait]
impl<G, P> GramCommand for GramService<G, P>
where
    G: GramRepository,
    P: PictureStore,
{
    async fn create(&self, request: CreateGramRequest) -> Result<Gram, Error> {
        let owner = require_user(request.acting_user.as_ref())?.clone();
        let CreateGramInput { message, picture } = request.input;

        let message_check = GramMessage::new(message.as_str());
        let picture_check = picture.as_ref().map_or(
            Err(GramValidationError::MissingPicture),
            |upload| upload.validate(self.max_picture_bytes),
        );
        let (valid_message, format, upload) = match (message_check, picture_check, picture) {
            (Ok(valid_message), Ok(format), Some(upload)) => (valid_message, format, upload),
            (message_check, picture_check, _) => {
                let violations: Vec<_> = [message_check.err(), picture_check.err()]
                    .into_iter()
                    .flatten()
                    .collect();
                return Err(validation_error(&violations, &message));
            }
        };

        let key = PictureKey::generate(format);
        self.pictures
            .store(&key, &upload.bytes)
            .await
            .map_err(map_picture_store_error)?;

        let now = self.clock.utc();
        let gram = Gram::new(GramDraft {
            id: Uuid::new_v4(),
            message: valid_message,
            picture: key.clone(),
            owner: owner.clone(),
            created_at: now,
            updated_at: now,
        });
        if let Err(error) = self.grams.insert(&gram).await {
            self.discard_picture(&key).await;
            return Err(map_gram_repository_error(error));
        }

        info!(gram_id = %gram.id(), user_id = %owner, "gram created");
        Ok(gram)
    }

    async fn update(&self, request: UpdateGramRequest) -> Result<Gram, Error> {
        let gram = self
            .find_modifiable(request.acting_user.as_ref(), &request.gram_id)
            .await?;
        let submitted = request.input.message;
        let message = GramMessage::new(submitted.as_str())
            .map_err(|violation| validation_error(&[violation], &submitted))?;

        let now = self.clock.utc();
        let updated = self
            .grams
            .update_message(&gram.id(), &message, now)
            .await
            .map_err(map_gram_repository_error)?;
        if !updated {
            return Err(gram_not_found());
        }

        info!(gram_id = %gram.id(), "gram message updated");
        Ok(gram.with_message(message, now))
    }

    async fn destroy(&self, request: DestroyGramRequest) -> Result<(), Error> {
        let gram = self
            .find_modifiable(request.acting_user.as_ref(), &request.gram_id)
            .await?;
        let deleted = self
            .grams
            .delete(&gram.id())
            .await
            .map_err(map_gram_repository_error)?;
        if !deleted {
            return Err(gram_not_found());
        }

        self.discard_picture(gram.picture()).await;
        info!(
            gram_id = %gram.id(),
            comments = gram.comments().len(),
            "gram deleted"
        );
        Ok(())
    }
}

#[cfg(test)]
#[path = "gram_service_tests.rs"]
mod tests;
