//! PostgreSQL-backed `GramRepository` implementation using Diesel ORM.
//!
//! Grams are read together with their comments: one query for the grams and
//! one for every comment attached to them. Deleting a gram relies on the
//! `ON DELETE CASCADE` foreign key so the gram and its comments disappear in
//! a single statement.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::warn;
use uuid::Uuid;

use crate::domain::ports::{GramRepository, GramRepositoryError};
use crate::domain::{Comment, Gram, GramDraft, GramMessage, PictureKey, UserId};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::diesel_comment_repository::row_to_comment;
use super::models::{CommentRow, GramMessageUpdate, GramRow, NewGramRow};
use super::pool::{DbPool, PoolError};
use super::schema::{comments, grams};

/// Diesel-backed implementation of the [`GramRepository`] port.
#[derive(Clone)]
pub struct DieselGramRepository {
    pool: DbPool,
}

impl DieselGramRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> GramRepositoryError {
    map_basic_pool_error(error, GramRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> GramRepositoryError {
    map_basic_diesel_error(
        error,
        GramRepositoryError::query,
        GramRepositoryError::connection,
    )
}

/// Convert a row, rejecting values the domain would never have written.
fn row_to_gram(row: GramRow, comments: Vec<Comment>) -> Result<Gram, GramRepositoryError> {
    let message = GramMessage::new(row.message).map_err(|error| {
        warn!(gram_id = %row.id, %error, "stored gram has an invalid message");
        GramRepositoryError::query("stored gram is invalid")
    })?;
    let picture = PictureKey::parse(row.picture).map_err(|error| {
        warn!(gram_id = %row.id, %error, "stored gram has an invalid picture key");
        GramRepositoryError::query("stored gram is invalid")
    })?;

    Ok(Gram::new(GramDraft {
        id: row.id,
        message,
        picture,
        owner: UserId::from_uuid(row.owner_id),
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
    .with_comments(comments))
}

/// Group comment rows by gram id.
fn group_comments(rows: Vec<CommentRow>) -> HashMap<Uuid, Vec<Comment>> {
    let mut grouped: HashMap<Uuid, Vec<Comment>> = HashMap::new();
    for row in rows {
        grouped.entry(row.gram_id).or_default().push(row_to_comment(row));
    }
    grouped
}

#[async_trait]
impl GramRepository for DieselGramRepository {
    async fn list(&self) -> Result<Vec<Gram>, GramRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<GramRow> = grams::table
            .order((grams::created_at.desc(), grams::id.desc()))
            .select(GramRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        let ids: Vec<Uuid> = rows.iter().map(|row| row.id).collect();
        let comment_rows: Vec<CommentRow> = comments::table
            .filter(comments::gram_id.eq_any(&ids))
            .select(CommentRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        let mut grouped = group_comments(comment_rows);
        rows.into_iter()
            .map(|row| {
                let attached = grouped.remove(&row.id).unwrap_or_default();
                row_to_gram(row, attached)
            })
            .collect()
    }

    async fn find_by_id(&self, gram_id: &Uuid) -> Result<Option<Gram>, GramRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<GramRow> = grams::table
            .find(gram_id)
            .select(GramRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        let Some(row) = row else {
            return Ok(None);
        };

        let comment_rows: Vec<CommentRow> = comments::table
            .filter(comments::gram_id.eq(gram_id))
            .select(CommentRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        let attached = comment_rows.into_iter().map(row_to_comment).collect();

        row_to_gram(row, attached).map(Some)
    }

    async fn insert(&self, gram: &Gram) -> Result<(), GramRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewGramRow {
            id: gram.id(),
            message: gram.message().as_ref(),
            picture: gram.picture().as_str(),
            owner_id: *gram.owner().as_uuid(),
            created_at: gram.created_at(),
            updated_at: gram.updated_at(),
        };

        diesel::insert_into(grams::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn update_message(
        &self,
        gram_id: &Uuid,
        message: &GramMessage,
        updated_at: DateTime<Utc>,
    ) -> Result<bool, GramRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let changes = GramMessageUpdate {
            message: message.as_ref(),
            updated_at,
        };

        let updated_rows = diesel::update(grams::table.find(gram_id))
            .set(&changes)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(updated_rows > 0)
    }

    async fn delete(&self, gram_id: &Uuid) -> Result<bool, GramRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let deleted_rows = diesel::delete(grams::table.find(gram_id))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(deleted_rows > 0)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn row() -> GramRow {
        let now = Utc::now();
        GramRow {
            id: Uuid::new_v4(),
            message: "hello".to_owned(),
            picture: "0123456789abcdef0123456789abcdef.png".to_owned(),
            owner_id: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
        }
    }

    fn comment_row(gram_id: Uuid, message: &str, minutes_ago: i64) -> CommentRow {
        CommentRow {
            id: Uuid::new_v4(),
            gram_id,
            author_id: Uuid::new_v4(),
            message: message.to_owned(),
            created_at: Utc::now() - chrono::Duration::minutes(minutes_ago),
        }
    }

    #[rstest]
    fn rows_convert_to_grams(row: GramRow) {
        let owner = row.owner_id;
        let gram = row_to_gram(row, Vec::new()).expect("valid row");
        assert_eq!(gram.message().as_ref(), "hello");
        assert_eq!(gram.owner().as_uuid(), &owner);
    }

    #[rstest]
    fn blank_stored_messages_are_query_errors(mut row: GramRow) {
        row.message = "  ".to_owned();
        let err = row_to_gram(row, Vec::new()).expect_err("invalid row");
        assert!(matches!(err, GramRepositoryError::Query { .. }));
    }

    #[rstest]
    fn unsafe_picture_keys_are_query_errors(mut row: GramRow) {
        row.picture = "../../etc/passwd".to_owned();
        assert!(row_to_gram(row, Vec::new()).is_err());
    }

    #[rstest]
    fn comments_are_grouped_and_ordered_per_gram(row: GramRow) {
        let other = Uuid::new_v4();
        let mut grouped = group_comments(vec![
            comment_row(row.id, "second", 1),
            comment_row(other, "elsewhere", 3),
            comment_row(row.id, "first", 2),
        ]);
        let attached = grouped.remove(&row.id).unwrap_or_default();

        let gram = row_to_gram(row, attached).expect("valid row");
        let messages: Vec<&str> = gram.comments().iter().map(Comment::message).collect();
        assert_eq!(messages, vec!["first", "second"]);
        assert_eq!(grouped.get(&other).map(Vec::len), Some(1));
    }

    #[rstest]
    fn connection_failures_map_to_connection_errors() {
        let err = map_pool_error(PoolError::checkout("refused"));
        assert!(matches!(err, GramRepositoryError::Connection { .. }));
    }
}
