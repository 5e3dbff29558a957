#[macro_use]
extern crate diesel;

use actix_web::web;

pub mod auth;
pub mod db;
pub mod errors;
pub mod forms;
pub mod handlers;
pub mod models;
pub mod pages;
pub mod routes;
pub mod schema;

use handlers::{note, users};

/// Registers every page route. The server binary and the test suite both go
/// through here, so they always serve the same routing table.
pub fn app_config(cfg: &mut web::ServiceConfig) {
    cfg.route(routes::HOME, web::get().to(handlers::home))
        .route(routes::LOGIN, web::get().to(users::login_page))
        .route(routes::LOGIN, web::post().to(users::login))
        .route(routes::LOGOUT, web::get().to(users::logout))
        .route(routes::SIGNUP, web::get().to(users::signup_page))
        .route(routes::SIGNUP, web::post().to(users::signup))
        .route(routes::LIST, web::get().to(note::list))
        .route(routes::ADD, web::get().to(note::post::add_page))
        .route(routes::ADD, web::post().to(note::post::add))
        .route(routes::SUCCESS, web::get().to(note::post::success))
        .route(routes::DETAIL_PATTERN, web::get().to(note::detail))
        .route(routes::EDIT_PATTERN, web::get().to(note::mutate::edit_page))
        .route(routes::EDIT_PATTERN, web::post().to(note::mutate::edit))
        .route(
            routes::DELETE_PATTERN,
            web::get().to(note::mutate::delete_page),
        )
        .route(routes::DELETE_PATTERN, web::post().to(note::mutate::delete))
        .route(
            routes::DELETE_PATTERN,
            web::delete().to(note::mutate::delete),
        );
}
