use actix_web::{web, HttpResponse};
use diesel::prelude::*;
use log::info;

use super::{find_owned, is_slug_collision, redirect_to_success, Pool};
use crate::{
    auth::AuthUser,
    errors::ServerError,
    forms::{self, NoteForm},
    models::note::UpdateNote,
    pages, routes,
};

use crate::schema::notes::dsl::{id, notes};

pub async fn edit_page(
    user: AuthUser,
    note_slug: web::Path<String>,
    pool: web::Data<Pool>,
) -> Result<HttpResponse, ServerError> {
    let mut connection = pool.get()?;

    let note = find_owned(&mut connection, &user, &note_slug)?;
    let form = NoteForm {
        title: Some(note.title.clone()),
        text: Some(note.text.clone()),
        slug: Some(note.slug.clone()),
    };
    let action = routes::edit(&note.slug);
    Ok(pages::html(pages::note_form_page(
        &user,
        "Edit note",
        &action,
        &form,
        None,
    )))
}

pub async fn edit(
    user: AuthUser,
    note_slug: web::Path<String>,
    input: web::Form<NoteForm>,
    pool: web::Data<Pool>,
) -> Result<HttpResponse, ServerError> {
    let mut connection = pool.get()?;

    let note = find_owned(&mut connection, &user, &note_slug)?;
    let form = input.into_inner();
    let action = routes::edit(&note.slug);

    let clean = match form.normalize() {
        Ok(clean) => clean,
        Err(err) => {
            return Ok(pages::html(pages::note_form_page(
                &user,
                "Edit note",
                &action,
                &form,
                Some(&err),
            )));
        }
    };

    // the note keeping its own slug is not a collision
    if let Some(err) = forms::check_slug_free(&mut connection, &clean.slug, Some(note.id))? {
        return Ok(pages::html(pages::note_form_page(
            &user,
            "Edit note",
            &action,
            &form,
            Some(&err),
        )));
    }

    let changes = UpdateNote {
        title: clean.title,
        text: clean.text,
        slug: clean.slug,
    };
    match diesel::update(notes.filter(id.eq(note.id)))
        .set(&changes)
        .execute(&mut connection)
    {
        Ok(_) => {
            info!("user {} edited note {}", user.username, note.slug);
            Ok(redirect_to_success())
        }
        // same race as on add: the free-slug check passed, then another
        // request claimed the slug before this update landed
        Err(e) if is_slug_collision(&e) => {
            let err = forms::duplicate_slug_error(&changes.slug);
            Ok(pages::html(pages::note_form_page(
                &user,
                "Edit note",
                &action,
                &form,
                Some(&err),
            )))
        }
        Err(_) => Err(ServerError::DieselError),
    }
}

pub async fn delete_page(
    user: AuthUser,
    note_slug: web::Path<String>,
    pool: web::Data<Pool>,
) -> Result<HttpResponse, ServerError> {
    let mut connection = pool.get()?;

    let note = find_owned(&mut connection, &user, &note_slug)?;
    Ok(pages::html(pages::delete_page(&user, &note)))
}

pub async fn delete(
    user: AuthUser,
    note_slug: web::Path<String>,
    pool: web::Data<Pool>,
) -> Result<HttpResponse, ServerError> {
    let mut connection = pool.get()?;

    let note = find_owned(&mut connection, &user, &note_slug)?;
    diesel::delete(notes.filter(id.eq(note.id))).execute(&mut connection)?;
    info!("user {} deleted note {}", user.username, note.slug);
    Ok(redirect_to_success())
}
