use actix_web::{http::header, HttpResponse};
use derive_more::Display;

use crate::routes;

#[derive(Debug, Display)]
pub enum ServerError {
    DieselError,
    EnvironmentError,
    R2D2Error,
    ArgonError,
    JWTError,
    #[display(fmt = "note {} was not found", _0)]
    NotFound(String),
    #[display(fmt = "login required before visiting {}", next)]
    LoginRequired { next: String },
}

impl From<r2d2::Error> for ServerError {
    fn from(_: r2d2::Error) -> ServerError {
        ServerError::R2D2Error
    }
}

impl From<diesel::result::Error> for ServerError {
    fn from(_: diesel::result::Error) -> ServerError {
        ServerError::DieselError
    }
}

impl From<argon2::password_hash::Error> for ServerError {
    fn from(_: argon2::password_hash::Error) -> ServerError {
        ServerError::ArgonError
    }
}

impl From<jsonwebtoken::errors::Error> for ServerError {
    fn from(_: jsonwebtoken::errors::Error) -> Self {
        ServerError::JWTError
    }
}

impl actix_web::error::ResponseError for ServerError {
    fn error_response(&self) -> HttpResponse {
        match self {
            ServerError::DieselError => {
                HttpResponse::InternalServerError().body("Library Error: Diesel Error.")
            }
            ServerError::EnvironmentError => HttpResponse::InternalServerError()
                .body("Server Error: Use of an uninitialized application state."),
            ServerError::R2D2Error => {
                HttpResponse::InternalServerError().body("Server Error: Pooling Error.")
            }
            ServerError::ArgonError => {
                HttpResponse::InternalServerError().body("Library Error: Argon2 Error.")
            }
            ServerError::JWTError => {
                HttpResponse::InternalServerError().body("Library Error: JWT Library Malfunctioned")
            }
            // missing notes and notes that belong to somebody else both end up
            // here, with the same body, so a response never confirms that a
            // foreign slug exists
            ServerError::NotFound(slug) => {
                HttpResponse::NotFound().body(format!("note {} was not found", slug))
            }
            ServerError::LoginRequired { next } => HttpResponse::Found()
                .insert_header((header::LOCATION, routes::login_with_next(next)))
                .finish(),
        }
    }
}
