use diesel::{r2d2::ConnectionManager, sqlite::SqliteConnection};

use crate::auth::AuthUser;
use crate::pages;

pub mod note;
pub mod users;

pub type Pool = r2d2::Pool<ConnectionManager<SqliteConnection>>;

pub async fn home(user: Option<AuthUser>) -> actix_web::HttpResponse {
    pages::html(pages::home_page(user.as_ref()))
}
