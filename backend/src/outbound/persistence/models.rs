//! Internal Diesel row structs.
//!
//! These never leave the persistence layer.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{comments, grams};

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = grams)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct GramRow {
    pub id: Uuid,
    pub message: String,
    pub picture: String,
    pub owner_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = grams)]
pub(crate) struct NewGramRow<'a> {
    pub id: Uuid,
    pub message: &'a str,
    pub picture: &'a str,
    pub owner_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = grams)]
pub(crate) struct GramMessageUpdate<'a> {
    pub message: &'a str,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = comments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CommentRow {
    pub id: Uuid,
    pub gram_id: Uuid,
    pub author_id: Uuid,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = comments)]
pub(crate) struct NewCommentRow<'a> {
    pub id: Uuid,
    pub gram_id: Uuid,
    pub author_id: Uuid,
    pub message: &'a str,
    pub created_at: DateTime<Utc>,
}
