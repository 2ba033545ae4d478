//! Redirect responses used after successful form submissions.

use actix_web::HttpResponse;
use actix_web::http::header::LOCATION;

/// Path of the gram listing.
pub const ROOT_PATH: &str = "/";

/// `302 Found` pointing at `location`.
pub fn found(location: &str) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((LOCATION, location))
        .finish()
}

/// `302 Found` back to the gram listing.
pub fn to_root() -> HttpResponse {
    found(ROOT_PATH)
}
