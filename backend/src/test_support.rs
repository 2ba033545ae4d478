//! Builders shared by unit tests across modules.

use std::sync::Arc;

use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;
use uuid::Uuid;

use crate::domain::{
    Gram, GramDraft, GramMessage, PictureFormat, PictureKey, PictureUpload, UserId,
};

pub(crate) fn fixture_timestamp() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 14, 9, 30, 0)
        .single()
        .expect("valid fixture timestamp")
}

/// Clock frozen at a fixed instant.
pub(crate) struct FixtureClock {
    utc_now: DateTime<Utc>,
}

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.utc_now.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.utc_now
    }
}

pub(crate) fn fixture_clock() -> Arc<dyn Clock> {
    Arc::new(FixtureClock {
        utc_now: fixture_timestamp(),
    })
}

/// A stored gram with the given message and owner, created an hour before
/// the fixture clock.
pub(crate) fn sample_gram(message: &str, owner: &UserId) -> Gram {
    let created_at = fixture_timestamp() - chrono::Duration::hours(1);
    Gram::new(GramDraft {
        id: Uuid::new_v4(),
        message: GramMessage::new(message).expect("fixture message"),
        picture: PictureKey::generate(PictureFormat::Png),
        owner: owner.clone(),
        created_at,
        updated_at: created_at,
    })
}

/// A small PNG-typed upload.
pub(crate) fn png_upload() -> PictureUpload {
    PictureUpload {
        file_name: Some("picture.png".to_owned()),
        content_type: "image/png".to_owned(),
        bytes: b"\x89PNG\r\n\x1a\nfixture".to_vec(),
    }
}
