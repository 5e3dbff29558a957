use std::future::{ready, Ready};
use std::time::{SystemTime, UNIX_EPOCH};

use actix_web::cookie::{time::Duration, Cookie};
use actix_web::{dev::Payload, web, FromRequest, HttpRequest};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde_derive::{Deserialize, Serialize};

use crate::errors::ServerError;
use crate::handlers::Pool;
use crate::models::user;

pub const SESSION_COOKIE: &str = "session";
const SESSION_TTL_SECS: u64 = 14 * 24 * 60 * 60;

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    exp: usize,
}

/// Signing and verification keys for session tokens, shared through
/// `web::Data` so the secret is read once at startup.
#[derive(Clone)]
pub struct SessionKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl SessionKeys {
    pub fn from_secret(secret: &str) -> Self {
        SessionKeys {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        }
    }
}

pub fn issue_token(keys: &SessionKeys, user_id: i32) -> Result<String, ServerError> {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    let claims = Claims {
        sub: user_id.to_string(),
        exp: (now + SESSION_TTL_SECS) as usize,
    };
    let token = encode(&Header::default(), &claims, &keys.encoding)?;
    Ok(token)
}

pub fn verify_token(keys: &SessionKeys, token: &str) -> Option<i32> {
    let data = decode::<Claims>(token, &keys.decoding, &Validation::default()).ok()?;
    data.claims.sub.parse().ok()
}

pub fn session_cookie(keys: &SessionKeys, user_id: i32) -> Result<Cookie<'static>, ServerError> {
    let token = issue_token(keys, user_id)?;
    Ok(Cookie::build(SESSION_COOKIE, token)
        .path("/")
        .http_only(true)
        .max_age(Duration::seconds(SESSION_TTL_SECS as i64))
        .finish())
}

pub fn removal_cookie() -> Cookie<'static> {
    let mut cookie = Cookie::new(SESSION_COOKIE, "");
    cookie.set_path("/");
    cookie.make_removal();
    cookie
}

/// The logged-in visitor, extracted from the session cookie.
///
/// Extraction failure is not a hard error: any problem with the session,
/// from a missing cookie to a forged token to a deleted account, turns into
/// `LoginRequired` and sends the visitor through the login page with the
/// requested path, query string included, as `?next=`.
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub id: i32,
    pub username: String,
}

impl FromRequest for AuthUser {
    type Error = ServerError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticate(req))
    }
}

fn authenticate(req: &HttpRequest) -> Result<AuthUser, ServerError> {
    let keys = req
        .app_data::<web::Data<SessionKeys>>()
        .ok_or(ServerError::EnvironmentError)?;
    let pool = req
        .app_data::<web::Data<Pool>>()
        .ok_or(ServerError::EnvironmentError)?;
    let denied = || {
        let next = match req.uri().path_and_query() {
            Some(full) => full.as_str().to_string(),
            None => req.path().to_string(),
        };
        ServerError::LoginRequired { next }
    };

    let cookie = req.cookie(SESSION_COOKIE).ok_or_else(denied)?;
    let user_id = verify_token(keys, cookie.value()).ok_or_else(denied)?;

    let mut conn = pool.get()?;
    match user::find_by_id(&mut conn, user_id)? {
        Some(user) => Ok(AuthUser {
            id: user.id,
            username: user.username,
        }),
        None => Err(denied()),
    }
}
