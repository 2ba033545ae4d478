//! Ownership rule for gram mutations.

use super::{Gram, UserId};

/// Decides whether an acting user may edit, update or delete a gram.
#[derive(Debug, Default, Clone, Copy)]
pub struct GramAccessPolicy;

impl GramAccessPolicy {
    /// True iff a user is acting and owns the gram.
    ///
    /// # Examples
    /// ```
    /// use chrono::Utc;
    /// use grammable::domain::{
    ///     Gram, GramAccessPolicy, GramDraft, GramMessage, PictureFormat, PictureKey, UserId,
    /// };
    /// use uuid::Uuid;
    ///
    /// let owner = UserId::random();
    /// let gram = Gram::new(GramDraft {
    ///     id: Uuid::new_v4(),
    ///     message: GramMessage::new("hello").unwrap(),
    ///     picture: PictureKey::generate(PictureFormat::Png),
    ///     owner: owner.clone(),
    ///     created_at: Utc::now(),
    ///     updated_at: Utc::now(),
    /// });
    /// assert!(GramAccessPolicy::can_modify(Some(&owner), &gram));
    /// assert!(!GramAccessPolicy::can_modify(None, &gram));
    /// ```
    pub fn can_modify(acting_user: Option<&UserId>, gram: &Gram) -> bool {
        acting_user.is_some_and(|user| user == gram.owner())
    }
}
