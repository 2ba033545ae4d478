//! Serves stored gram pictures.
//!
//! ```text
//! GET /pictures/{key}
//! ```

use actix_web::{HttpResponse, get, web};

use crate::domain::{Error, PictureKey, map_picture_store_error};
use crate::inbound::http::ApiResult;
use crate::inbound::http::cache_control::immutable_header;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

/// Fetch the bytes of a gram's picture.
#[utoipa::path(
    get,
    path = "/pictures/{key}",
    params(("key" = String, Path, description = "Picture key, e.g. `0123456789abcdef0123456789abcdef.png`")),
    responses(
        (status = 200, description = "Picture bytes; JPEG, PNG or GIF per the key extension"),
        (status = 404, description = "No such picture", body = ErrorSchema)
    ),
    tags = ["pictures"],
    operation_id = "showPicture",
    security([])
)]
#[get("/pictures/{key}")]
pub async fn show_picture(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let key = PictureKey::parse(path.into_inner())
        .map_err(|_| Error::not_found("picture not found"))?;
    let format = key
        .format()
        .ok_or_else(|| Error::not_found("picture not found"))?;
    let bytes = state
        .pictures
        .load(&key)
        .await
        .map_err(map_picture_store_error)?;
    Ok(HttpResponse::Ok()
        .content_type(format.content_type())
        .insert_header(immutable_header())
        .body(bytes))
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::http::header::{CACHE_CONTROL, CONTENT_TYPE};
    use actix_web::test;
    use rstest::rstest;

    use crate::domain::PictureFormat;
    use crate::domain::ports::PictureStoreError;
    use crate::inbound::http::test_utils::{MockPorts, mock_app};

    #[rstest]
    #[actix_web::test]
    async fn serves_bytes_with_the_key_content_type() {
        let key = PictureKey::generate(PictureFormat::Gif);
        let uri = format!("/pictures/{key}");
        let expected = key.clone();
        let mut ports = MockPorts::default();
        ports
            .pictures
            .expect_load()
            .withf(move |candidate| candidate == &expected)
            .return_once(|_| Ok(b"GIF89a".to_vec()));
        let app = mock_app!(ports, show_picture).await;

        let res = test::call_service(&app, test::TestRequest::get().uri(&uri).to_request()).await;
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(
            res.headers().get(CONTENT_TYPE).and_then(|v| v.to_str().ok()),
            Some("image/gif")
        );
        assert_eq!(
            res.headers().get(CACHE_CONTROL).and_then(|v| v.to_str().ok()),
            Some(crate::inbound::http::cache_control::PUBLIC_IMMUTABLE)
        );
        let body = test::read_body(res).await;
        assert_eq!(body.as_ref(), b"GIF89a");
    }

    #[rstest]
    #[case("../../etc/passwd")]
    #[case("not-a-key")]
    #[case("picture.exe")]
    #[actix_web::test]
    async fn invalid_keys_are_not_found(#[case] raw: &str) {
        let mut ports = MockPorts::default();
        ports.pictures.expect_load().times(0);
        let app = mock_app!(ports, show_picture).await;

        let uri = format!("/pictures/{}", escape_slashes(raw));
        let res = test::call_service(&app, test::TestRequest::get().uri(&uri).to_request()).await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    fn escape_slashes(raw: &str) -> String {
        raw.replace('/', "%2F")
    }

    #[rstest]
    #[actix_web::test]
    async fn missing_pictures_are_not_found() {
        let key = PictureKey::generate(PictureFormat::Png);
        let uri = format!("/pictures/{key}");
        let mut ports = MockPorts::default();
        ports
            .pictures
            .expect_load()
            .return_once(|key| Err(PictureStoreError::not_found(key.to_string())));
        let app = mock_app!(ports, show_picture).await;

        let res = test::call_service(&app, test::TestRequest::get().uri(&uri).to_request()).await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }
}
