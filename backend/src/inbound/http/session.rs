//! Session helpers to keep HTTP handlers free of framework-specific logic.
//!
//! Handlers only see the signed-in [`UserId`], or its absence. Whether an
//! operation needs a user is decided by the domain services; handlers that
//! read a request body call [`SessionContext::require_user`] first so that
//! anonymous callers are sent to sign in whatever they posted.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;
use tracing::warn;

use crate::domain::{Error, UserId};

pub(crate) const USER_ID_KEY: &str = "user_id";

/// The `unauthorized` error every sign-in redirect is built from.
pub(crate) fn sign_in_required() -> Error {
    Error::unauthorized("you need to sign in before continuing")
}

/// Newtype wrapper that exposes higher-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Record the authenticated user, rotating the session identifier.
    pub fn persist_user(&self, user_id: &UserId) -> Result<(), Error> {
        self.0.renew();
        self.0
            .insert(USER_ID_KEY, user_id.to_string())
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// The acting user, if any.
    ///
    /// A value that does not parse as a user id is treated as signed out.
    pub fn acting_user(&self) -> Result<Option<UserId>, Error> {
        let raw = self
            .0
            .get::<String>(USER_ID_KEY)
            .map_err(|error| Error::internal(format!("failed to read session: {error}")))?;
        Ok(raw.and_then(|value| match UserId::new(value) {
            Ok(id) => Some(id),
            Err(error) => {
                warn!(%error, "invalid user id in session cookie");
                None
            }
        }))
    }

    /// The acting user, or `unauthorized` when nobody is signed in.
    pub fn require_user(&self) -> Result<UserId, Error> {
        self.acting_user()?.ok_or_else(sign_in_required)
    }

    /// Forget the signed-in user.
    pub fn clear(&self) {
        self.0.purge();
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}
