//! Behaviour tests for posting, editing, deleting and commenting on grams.
//!
//! Each step drives the full route table on an actix system runner; the
//! in-memory adapters and session key live in the world, so cookies stay
//! valid across steps.
//
// rstest-bdd generates guard variables with double underscores, which trips
// the non_snake_case lint under -D warnings.
#![allow(non_snake_case)]

// Shared harness has helpers used only by other integration suites.
#[allow(dead_code)]
#[path = "support/gram_app.rs"]
mod gram_app;

use std::cell::RefCell;
use std::collections::HashMap;

use actix_web::cookie::Cookie;
use actix_web::test as actix_test;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use serde_json::{Value, json};

use gram_app::{
    GramApp, PNG_BYTES, create_gram_request, find_gram, location, session_cookie,
    sign_in_request,
};

const ANONYMOUS: &str = "an anonymous visitor";

#[derive(Debug, Default)]
struct LastResponse {
    status: u16,
    location: Option<String>,
    body: Value,
}

struct GramWorld {
    system: actix_rt::SystemRunner,
    app: GramApp,
    cookies: RefCell<HashMap<String, Cookie<'static>>>,
    last: RefCell<LastResponse>,
}

impl GramWorld {
    fn new() -> Self {
        Self {
            system: actix_rt::System::new(),
            app: GramApp::new(),
            cookies: RefCell::new(HashMap::new()),
            last: RefCell::new(LastResponse::default()),
        }
    }

    fn cookie_for(&self, user: &str) -> Option<Cookie<'static>> {
        if user == ANONYMOUS {
            return None;
        }
        let cookie = self.cookies.borrow().get(user).cloned();
        assert!(cookie.is_some(), "{user} has not signed in");
        cookie
    }

    /// Send a request as `user` and record the response.
    fn send(&self, user: &str, request: actix_test::TestRequest) -> Option<Cookie<'static>> {
        let request = match self.cookie_for(user) {
            Some(cookie) => request.cookie(cookie),
            None => request,
        };
        self.system.block_on(async {
            let service = actix_test::init_service(self.app.app()).await;
            let res = actix_test::call_service(&service, request.to_request()).await;
            let cookie = session_cookie(&res);
            let status = res.status().as_u16();
            let location = location(&res);
            let bytes = actix_test::read_body(res).await;
            let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
            *self.last.borrow_mut() = LastResponse {
                status,
                location,
                body,
            };
            cookie
        })
    }

    fn post_gram(&self, user: &str, message: &str) {
        self.send(
            user,
            create_gram_request(Some(message), Some(("image/png", PNG_BYTES))),
        );
    }

    fn listing(&self) -> Value {
        self.system.block_on(async {
            let service = actix_test::init_service(self.app.app()).await;
            let req = actix_test::TestRequest::get().uri("/").to_request();
            actix_test::call_and_read_body_json(&service, req).await
        })
    }

    fn gram_id(&self, message: &str) -> String {
        let listing = self.listing();
        find_gram(&listing, message)
            .and_then(|gram| gram["id"].as_str())
            .map(str::to_owned)
            .unwrap_or_else(|| panic!("no gram saying {message:?}"))
    }

    fn show(&self, message: &str) -> Value {
        let id = self.gram_id(message);
        self.system.block_on(async {
            let service = actix_test::init_service(self.app.app()).await;
            let req = actix_test::TestRequest::get()
                .uri(&format!("/grams/{id}"))
                .to_request();
            actix_test::call_and_read_body_json(&service, req).await
        })
    }
}

#[fixture]
fn world() -> GramWorld {
    GramWorld::new()
}

#[given("{user} is signed in")]
fn user_is_signed_in(world: &GramWorld, user: String) {
    let cookie = world
        .send(ANONYMOUS, sign_in_request(&user))
        .expect("session cookie after sign in");
    world.cookies.borrow_mut().insert(user, cookie);
}

#[given("{user} has posted a gram saying {message}")]
fn user_has_posted_a_gram(world: &GramWorld, user: String, message: String) {
    world.post_gram(&user, &message);
    assert_eq!(world.last.borrow().status, 302);
}

#[when("{user} posts a gram saying {message}")]
fn user_posts_a_gram(world: &GramWorld, user: String, message: String) {
    world.post_gram(&user, &message);
}

#[when("{user} posts a gram with a blank message")]
fn user_posts_a_blank_gram(world: &GramWorld, user: String) {
    world.send(
        &user,
        create_gram_request(Some(""), Some(("image/png", PNG_BYTES))),
    );
}

#[when("{user} changes {message} to {replacement}")]
fn user_changes_a_gram(world: &GramWorld, user: String, message: String, replacement: String) {
    let id = world.gram_id(&message);
    world.send(
        &user,
        actix_test::TestRequest::patch()
            .uri(&format!("/grams/{id}"))
            .set_json(json!({ "message": replacement })),
    );
}

#[when("{user} deletes {message}")]
fn user_deletes_a_gram(world: &GramWorld, user: String, message: String) {
    let id = world.gram_id(&message);
    world.send(
        &user,
        actix_test::TestRequest::delete().uri(&format!("/grams/{id}")),
    );
}

#[when("{user} comments {comment} on {message}")]
fn user_comments_on_a_gram(world: &GramWorld, user: String, comment: String, message: String) {
    let id = world.gram_id(&message);
    world.send(
        &user,
        actix_test::TestRequest::post()
            .uri(&format!("/grams/{id}/comments"))
            .set_json(json!({ "message": comment })),
    );
}

#[when("{user} opens the gram {id}")]
fn user_opens_a_gram(world: &GramWorld, user: String, id: String) {
    world.send(&user, actix_test::TestRequest::get().uri(&format!("/grams/{id}")));
}

#[then("the response redirects to {path}")]
fn the_response_redirects(world: &GramWorld, path: String) {
    let last = world.last.borrow();
    assert_eq!(last.status, 302, "body: {}", last.body);
    assert_eq!(last.location.as_deref(), Some(path.as_str()));
}

#[then("the response status is {status}")]
fn the_response_status_is(world: &GramWorld, status: u16) {
    let last = world.last.borrow();
    assert_eq!(last.status, status, "body: {}", last.body);
}

#[then("the response names the invalid field {field}")]
fn the_response_names_the_field(world: &GramWorld, field: String) {
    let last = world.last.borrow();
    assert_eq!(last.body["code"], "validation_failed");
    assert_eq!(last.body["details"]["fields"], json!([field]));
}

#[then("{user} sees {message} as editable")]
fn user_sees_the_gram_as_editable(world: &GramWorld, user: String, message: String) {
    world.send(&user, actix_test::TestRequest::get().uri("/"));
    let last = world.last.borrow();
    let gram = find_gram(&last.body, &message).expect("listed gram");
    assert_eq!(gram["editable"], true);
}

#[then("the listing is empty")]
fn the_listing_is_empty(world: &GramWorld) {
    assert_eq!(world.listing(), json!([]));
    assert!(world.app.pictures.is_empty());
}

#[then("the gram {message} is shown")]
fn the_gram_is_shown(world: &GramWorld, message: String) {
    let gram = world.show(&message);
    assert_eq!(gram["message"], message.as_str());
}

#[then("{message} has the comment {comment}")]
fn the_gram_has_the_comment(world: &GramWorld, message: String, comment: String) {
    let gram = world.show(&message);
    let comments = gram["comments"].as_array().expect("comments");
    assert_eq!(comments.len(), 1);
    assert_eq!(comments[0]["message"], comment.as_str());
}

#[scenario(
    path = "tests/features/gram_lifecycle.feature",
    name = "An owner posts, edits and deletes a gram"
)]
fn an_owner_posts_edits_and_deletes_a_gram(world: GramWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/gram_lifecycle.feature",
    name = "Another user cannot change someone else's gram"
)]
fn another_user_cannot_change_someone_elses_gram(world: GramWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/gram_lifecycle.feature",
    name = "Anonymous visitors are sent to sign in"
)]
fn anonymous_visitors_are_sent_to_sign_in(world: GramWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/gram_lifecycle.feature",
    name = "Comments appear under the gram"
)]
fn comments_appear_under_the_gram(world: GramWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/gram_lifecycle.feature",
    name = "A gram without a message is rejected"
)]
fn a_gram_without_a_message_is_rejected(world: GramWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/gram_lifecycle.feature",
    name = "Unknown grams are not found"
)]
fn unknown_grams_are_not_found(world: GramWorld) {
    drop(world);
}
