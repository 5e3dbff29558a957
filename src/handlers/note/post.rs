use actix_web::{web, HttpResponse};
use diesel::prelude::*;
use log::info;

use super::{is_slug_collision, redirect_to_success, Pool};
use crate::{
    auth::AuthUser,
    errors::ServerError,
    forms::{self, NoteForm},
    models::note::InsertNote,
    pages, routes,
};

use crate::schema::notes::dsl::notes;

pub async fn add_page(user: AuthUser) -> HttpResponse {
    pages::html(pages::note_form_page(
        &user,
        "Add a note",
        routes::ADD,
        &NoteForm::default(),
        None,
    ))
}

pub async fn add(
    user: AuthUser,
    input: web::Form<NoteForm>,
    pool: web::Data<Pool>,
) -> Result<HttpResponse, ServerError> {
    let mut connection = pool.get()?;
    let form = input.into_inner();

    let clean = match form.normalize() {
        Ok(clean) => clean,
        Err(err) => {
            return Ok(pages::html(pages::note_form_page(
                &user,
                "Add a note",
                routes::ADD,
                &form,
                Some(&err),
            )));
        }
    };

    if let Some(err) = forms::check_slug_free(&mut connection, &clean.slug, None)? {
        return Ok(pages::html(pages::note_form_page(
            &user,
            "Add a note",
            routes::ADD,
            &form,
            Some(&err),
        )));
    }

    let record = InsertNote {
        title: clean.title,
        text: clean.text,
        slug: clean.slug,
        author_id: user.id,
    };
    match diesel::insert_into(notes).values(&record).execute(&mut connection) {
        Ok(_) => {
            info!("user {} created note {}", user.username, record.slug);
            Ok(redirect_to_success())
        }
        // the unique index catches a slug raced in between the check above
        // and this insert
        Err(e) if is_slug_collision(&e) => {
            let err = forms::duplicate_slug_error(&record.slug);
            Ok(pages::html(pages::note_form_page(
                &user,
                "Add a note",
                routes::ADD,
                &form,
                Some(&err),
            )))
        }
        Err(_) => Err(ServerError::DieselError),
    }
}

pub async fn success(user: AuthUser) -> HttpResponse {
    pages::html(pages::success_page(&user))
}
