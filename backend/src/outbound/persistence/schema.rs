//! Diesel table definitions.
//!
//! These must match `backend/migrations` exactly.

diesel::table! {
    /// Posted grams.
    grams (id) {
        id -> Uuid,
        message -> Text,
        /// Stored picture key, for example `<32 hex digits>.png`.
        picture -> Varchar,
        owner_id -> Uuid,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Comments; deleted with their gram via `ON DELETE CASCADE`.
    comments (id) {
        id -> Uuid,
        gram_id -> Uuid,
        author_id -> Uuid,
        message -> Text,
        created_at -> Timestamptz,
    }
}

diesel::joinable!(comments -> grams (gram_id));
diesel::allow_tables_to_appear_in_same_query!(grams, comments);
