use actix_web::{http::header, web, HttpResponse};
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

use super::Pool;
use crate::{
    auth::AuthUser,
    errors::ServerError,
    models::note::{self, QueryNote},
    pages, routes,
};

use crate::schema::notes::dsl::{author_id, id, notes};

pub mod mutate;
pub mod post;

/// Loads the note with `slug_value` when it belongs to `user`.
///
/// A missing slug and a foreign slug produce the same `NotFound` error, so a
/// response never tells a visitor whether somebody else's note exists.
pub fn find_owned(
    connection: &mut SqliteConnection,
    user: &AuthUser,
    slug_value: &str,
) -> Result<QueryNote, ServerError> {
    match note::find_by_slug(connection, slug_value)? {
        Some(note) if note.author_id == user.id => Ok(note),
        _ => Err(ServerError::NotFound(slug_value.to_string())),
    }
}

/// True when a write was thrown out by the unique index on `notes.slug`.
pub fn is_slug_collision(error: &diesel::result::Error) -> bool {
    matches!(
        error,
        diesel::result::Error::DatabaseError(
            diesel::result::DatabaseErrorKind::UniqueViolation,
            _,
        )
    )
}

pub fn redirect_to_success() -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, routes::SUCCESS))
        .finish()
}

pub async fn list(user: AuthUser, pool: web::Data<Pool>) -> Result<HttpResponse, ServerError> {
    let mut connection = pool.get()?;

    let owned = notes
        .filter(author_id.eq(user.id))
        .order(id.asc())
        .load::<QueryNote>(&mut connection)?;
    Ok(pages::html(pages::note_list_page(&user, &owned)))
}

pub async fn detail(
    user: AuthUser,
    note_slug: web::Path<String>,
    pool: web::Data<Pool>,
) -> Result<HttpResponse, ServerError> {
    let mut connection = pool.get()?;

    let note = find_owned(&mut connection, &user, &note_slug)?;
    Ok(pages::html(pages::note_detail_page(&user, &note)))
}
