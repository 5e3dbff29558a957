#![allow(dead_code)]

use actix_web::body::MessageBody;
use actix_web::cookie::Cookie;
use actix_web::dev::ServiceResponse;
use actix_web::http::header;
use diesel::prelude::*;
use diesel::r2d2::ConnectionManager;
use diesel::sqlite::SqliteConnection;

use kiroku::auth::{self, SessionKeys};
use kiroku::db::{self, ConnectionOptions};
use kiroku::handlers::Pool;
use kiroku::models::note::{InsertNote, QueryNote};
use kiroku::models::user::{self, QueryUser};
use kiroku::schema::{notes, users};

pub const TEST_SECRET: &str = "kiroku-test-secret";
pub const TEST_PASSWORD: &str = "correct horse battery staple";

pub fn test_keys() -> SessionKeys {
    SessionKeys::from_secret(TEST_SECRET)
}

/// Fresh in-memory database per call. `max_size(1)` pins the pool to the one
/// connection that owns the `:memory:` database, so every request in a test
/// sees the same data.
pub fn test_pool() -> Pool {
    let manager = ConnectionManager::<SqliteConnection>::new(":memory:");
    let pool = r2d2::Pool::builder()
        .max_size(1)
        .connection_customizer(Box::new(ConnectionOptions))
        .build(manager)
        .expect("build in-memory pool");
    let mut connection = pool.get().expect("check out a connection");
    db::run_migrations(&mut connection).expect("run migrations on a fresh database");
    pool
}

/// Builds the service under test with `pool` and the test session keys.
#[macro_export]
macro_rules! init_app {
    ($pool:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data(actix_web::web::Data::new($pool.clone()))
                .app_data(actix_web::web::Data::new($crate::common::test_keys()))
                .configure(kiroku::app_config),
        )
        .await
    };
}

pub fn create_user(pool: &Pool, username: &str) -> QueryUser {
    let mut connection = pool.get().expect("check out a connection");
    user::create(&mut connection, username, TEST_PASSWORD).expect("create user")
}

pub fn create_note(
    pool: &Pool,
    author: &QueryUser,
    title: &str,
    text: &str,
    slug: &str,
) -> QueryNote {
    let mut connection = pool.get().expect("check out a connection");
    diesel::insert_into(notes::table)
        .values(&InsertNote {
            title: title.to_string(),
            text: text.to_string(),
            slug: slug.to_string(),
            author_id: author.id,
        })
        .get_result::<QueryNote>(&mut connection)
        .expect("insert note")
}

/// A valid session cookie for `user`, as the login handler would set it.
pub fn login_cookie(user: &QueryUser) -> Cookie<'static> {
    auth::session_cookie(&test_keys(), user.id).expect("session cookie")
}

pub fn note_count(pool: &Pool) -> i64 {
    let mut connection = pool.get().expect("check out a connection");
    notes::table
        .count()
        .get_result::<i64>(&mut connection)
        .expect("count notes")
}

pub fn user_count(pool: &Pool) -> i64 {
    let mut connection = pool.get().expect("check out a connection");
    users::table
        .count()
        .get_result::<i64>(&mut connection)
        .expect("count users")
}

pub fn find_note_by_slug(pool: &Pool, value: &str) -> Option<QueryNote> {
    let mut connection = pool.get().expect("check out a connection");
    notes::table
        .filter(notes::slug.eq(value))
        .first::<QueryNote>(&mut connection)
        .optional()
        .expect("query note by slug")
}

pub fn find_note_by_id(pool: &Pool, note_id: i32) -> Option<QueryNote> {
    let mut connection = pool.get().expect("check out a connection");
    notes::table
        .find(note_id)
        .first::<QueryNote>(&mut connection)
        .optional()
        .expect("query note by id")
}

pub fn find_user(pool: &Pool, username: &str) -> Option<QueryUser> {
    let mut connection = pool.get().expect("check out a connection");
    user::find_by_username(&mut connection, username).expect("query user")
}

pub fn location(resp: &ServiceResponse<impl MessageBody>) -> String {
    resp.headers()
        .get(header::LOCATION)
        .expect("Location header")
        .to_str()
        .expect("ascii Location header")
        .to_string()
}

pub async fn read_body_string<B: MessageBody>(resp: ServiceResponse<B>) -> String {
    let bytes = actix_web::test::read_body(resp).await;
    String::from_utf8(bytes.to_vec()).expect("utf-8 body")
}

/// The `Set-Cookie` header for the session cookie, when the response has one.
pub fn session_set_cookie(resp: &ServiceResponse<impl MessageBody>) -> Option<String> {
    resp.headers()
        .get_all(header::SET_COOKIE)
        .filter_map(|value| value.to_str().ok())
        .find(|value| value.starts_with(&format!("{}=", auth::SESSION_COOKIE)))
        .map(str::to_string)
}

/// Pulls the raw token out of a `Set-Cookie` line so a later request can
/// present it again.
pub fn cookie_from_set_cookie(set_cookie: &str) -> Cookie<'static> {
    let pair = set_cookie
        .split(';')
        .next()
        .expect("cookie pair before attributes");
    let token = pair
        .strip_prefix(&format!("{}=", auth::SESSION_COOKIE))
        .expect("session cookie pair");
    Cookie::new(auth::SESSION_COOKIE, token.to_string())
}
