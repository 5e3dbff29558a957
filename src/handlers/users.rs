use actix_web::{http::header, web, HttpResponse};
use log::{info, warn};
use serde_derive::Deserialize;

use super::Pool;
use crate::{
    auth::{self, SessionKeys},
    errors::ServerError,
    forms::{self, LoginForm, SignupForm},
    models::user,
    pages, routes,
};

#[derive(Deserialize)]
pub struct NextQuery {
    next: Option<String>,
}

// only site-local targets are honored, so the login page can never be used
// to bounce a visitor to a foreign host
fn sanitize_next(next: Option<&str>) -> Option<&str> {
    next.filter(|path| path.starts_with('/') && !path.starts_with("//"))
}

pub async fn login_page(query: web::Query<NextQuery>) -> HttpResponse {
    pages::html(pages::login_page(sanitize_next(query.next.as_deref()), None))
}

pub async fn login(
    input: web::Form<LoginForm>,
    pool: web::Data<Pool>,
    keys: web::Data<SessionKeys>,
) -> Result<HttpResponse, ServerError> {
    let mut connection = pool.get()?;
    let form = input.into_inner();

    let username = form.username.as_deref().unwrap_or("").trim();
    let password = form.password.as_deref().unwrap_or("");
    let next = sanitize_next(form.next.as_deref());

    let user = match user::find_by_username(&mut connection, username)? {
        Some(user) if user.verify_password(password)? => user,
        _ => {
            warn!("failed login attempt for {}", username);
            return Ok(pages::html(pages::login_page(
                next,
                Some(forms::BAD_CREDENTIALS),
            )));
        }
    };

    let cookie = auth::session_cookie(&keys, user.id)?;
    let target = next.unwrap_or(routes::LIST).to_string();
    info!("user {} logged in", user.username);
    Ok(HttpResponse::Found()
        .insert_header((header::LOCATION, target))
        .cookie(cookie)
        .finish())
}

pub async fn logout() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .cookie(auth::removal_cookie())
        .body(pages::logout_page())
}

pub async fn signup_page() -> HttpResponse {
    pages::html(pages::signup_page("", None))
}

pub async fn signup(
    input: web::Form<SignupForm>,
    pool: web::Data<Pool>,
) -> Result<HttpResponse, ServerError> {
    let mut connection = pool.get()?;
    let form = input.into_inner();

    let username = form.username.as_deref().unwrap_or("").trim().to_string();
    let password = form.password.as_deref().unwrap_or("");

    if username.is_empty() || password.is_empty() {
        return Ok(pages::html(pages::signup_page(
            &username,
            Some(forms::REQUIRED),
        )));
    }
    if user::find_by_username(&mut connection, &username)?.is_some() {
        return Ok(pages::html(pages::signup_page(
            &username,
            Some(forms::USERNAME_TAKEN),
        )));
    }

    let user = user::create(&mut connection, &username, password)?;
    info!("user {} signed up", user.username);
    Ok(HttpResponse::Found()
        .insert_header((header::LOCATION, routes::LOGIN))
        .finish())
}
