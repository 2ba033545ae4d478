//! Shared HTTP adapter state.
//!
//! Handlers receive this through `actix_web::web::Data`, so they depend only
//! on domain ports and stay testable without I/O.

use std::sync::Arc;

use mockable::Clock;

use crate::domain::ports::{
    CommentCommand, CommentRepository, GramCommand, GramQuery, GramRepository, LoginService,
    PictureStore,
};
use crate::domain::{CommentService, GramService};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub grams_query: Arc<dyn GramQuery>,
    pub grams: Arc<dyn GramCommand>,
    pub comments: Arc<dyn CommentCommand>,
    pub pictures: Arc<dyn PictureStore>,
    /// Largest accepted picture upload, in bytes.
    pub max_picture_bytes: usize,
}

/// Driven adapters the domain services are assembled from.
pub struct HttpAdapters<G, C, P> {
    pub grams: Arc<G>,
    pub comments: Arc<C>,
    pub pictures: Arc<P>,
    pub login: Arc<dyn LoginService>,
    pub clock: Arc<dyn Clock>,
    pub max_picture_bytes: usize,
}

impl HttpState {
    /// Wire [`GramService`] and [`CommentService`] over the given adapters.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use grammable::inbound::http::state::{HttpAdapters, HttpState};
    /// use grammable::outbound::accounts::StaticAccounts;
    /// use grammable::outbound::memory::{InMemoryGramStore, InMemoryPictureStore};
    ///
    /// let store = Arc::new(InMemoryGramStore::new());
    /// let state = HttpState::from_adapters(HttpAdapters {
    ///     grams: store.clone(),
    ///     comments: store,
    ///     pictures: Arc::new(InMemoryPictureStore::new()),
    ///     login: Arc::new(StaticAccounts::development()),
    ///     clock: Arc::new(mockable::DefaultClock),
    ///     max_picture_bytes: 1024,
    /// });
    /// assert_eq!(state.max_picture_bytes, 1024);
    /// ```
    pub fn from_adapters<G, C, P>(adapters: HttpAdapters<G, C, P>) -> Self
    where
        G: GramRepository + 'static,
        C: CommentRepository + 'static,
        P: PictureStore + 'static,
    {
        let HttpAdapters {
            grams,
            comments,
            pictures,
            login,
            clock,
            max_picture_bytes,
        } = adapters;

        let gram_service = Arc::new(
            GramService::new(grams.clone(), pictures.clone(), clock.clone())
                .with_max_picture_bytes(max_picture_bytes),
        );
        let comment_service = Arc::new(CommentService::new(grams, comments, clock));
        let grams_query: Arc<dyn GramQuery> = gram_service.clone();
        let pictures: Arc<dyn PictureStore> = pictures;

        Self {
            login,
            grams_query,
            grams: gram_service,
            comments: comment_service,
            pictures,
            max_picture_bytes,
        }
    }
}
