//! Server-rendered pages, assembled as plain strings so the markup stays
//! greppable next to the handlers that serve it.

use actix_web::HttpResponse;

use crate::auth::AuthUser;
use crate::forms::{FieldError, NoteForm};
use crate::models::note::QueryNote;
use crate::routes;

pub fn html(body: String) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(body)
}

pub fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

fn layout(title: &str, user: Option<&AuthUser>, main: &str) -> String {
    let nav = match user {
        Some(user) => format!(
            "<a href=\"{home}\">Home</a> <a href=\"{list}\">My notes</a> \
             <a href=\"{add}\">Add a note</a> <span class=\"nav-user\">{name}</span> \
             <a href=\"{logout}\">Log out</a>",
            home = routes::HOME,
            list = routes::LIST,
            add = routes::ADD,
            name = escape(&user.username),
            logout = routes::LOGOUT,
        ),
        None => format!(
            "<a href=\"{home}\">Home</a> <a href=\"{login}\">Log in</a> \
             <a href=\"{signup}\">Sign up</a>",
            home = routes::HOME,
            login = routes::LOGIN,
            signup = routes::SIGNUP,
        ),
    };
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{title} | Kiroku</title>\n</head>\n<body>\n<nav>{nav}</nav>\n\
         <main>\n{main}\n</main>\n</body>\n</html>\n",
        title = escape(title),
        nav = nav,
        main = main,
    )
}

fn field_error(error: Option<&FieldError>) -> String {
    match error {
        Some(err) => format!(
            "<p class=\"field-error\">{}: {}</p>\n",
            err.field,
            escape(&err.message)
        ),
        None => String::new(),
    }
}

fn flash(message: Option<&str>) -> String {
    match message {
        Some(message) => format!("<p class=\"flash\">{}</p>\n", escape(message)),
        None => String::new(),
    }
}

pub fn home_page(user: Option<&AuthUser>) -> String {
    let main = match user {
        Some(user) => format!(
            "<h1>Kiroku</h1>\n<p>Hello, {}. Your notes are waiting.</p>\n\
             <p><a href=\"{}\">My notes</a></p>\n",
            escape(&user.username),
            routes::LIST
        ),
        None => format!(
            "<h1>Kiroku</h1>\n<p>A quiet place for your notes. \
             <a href=\"{}\">Log in</a> or <a href=\"{}\">sign up</a> to start.</p>\n",
            routes::LOGIN,
            routes::SIGNUP
        ),
    };
    layout("Home", user, &main)
}

pub fn login_page(next: Option<&str>, error: Option<&str>) -> String {
    let next_field = match next {
        Some(next) => format!(
            "<input type=\"hidden\" name=\"next\" value=\"{}\">\n",
            escape(next)
        ),
        None => String::new(),
    };
    let main = format!(
        "<h1>Log in</h1>\n{flash}\
         <form method=\"post\" action=\"{action}\">\n\
         <p><label>Username <input type=\"text\" name=\"username\"></label></p>\n\
         <p><label>Password <input type=\"password\" name=\"password\"></label></p>\n\
         {next_field}\
         <button type=\"submit\">Log in</button>\n\
         </form>\n\
         <p>No account yet? <a href=\"{signup}\">Sign up</a>.</p>\n",
        flash = flash(error),
        action = routes::LOGIN,
        next_field = next_field,
        signup = routes::SIGNUP,
    );
    layout("Log in", None, &main)
}

pub fn logout_page() -> String {
    let main = format!(
        "<h1>Logged out</h1>\n<p>See you next time. \
         <a href=\"{}\">Log in again</a>.</p>\n",
        routes::LOGIN
    );
    layout("Logged out", None, &main)
}

pub fn signup_page(username: &str, error: Option<&str>) -> String {
    let main = format!(
        "<h1>Sign up</h1>\n{flash}\
         <form method=\"post\" action=\"{action}\">\n\
         <p><label>Username <input type=\"text\" name=\"username\" value=\"{username}\"></label></p>\n\
         <p><label>Password <input type=\"password\" name=\"password\"></label></p>\n\
         <button type=\"submit\">Sign up</button>\n\
         </form>\n",
        flash = flash(error),
        action = routes::SIGNUP,
        username = escape(username),
    );
    layout("Sign up", None, &main)
}

pub fn note_form_page(
    user: &AuthUser,
    heading: &str,
    action: &str,
    form: &NoteForm,
    error: Option<&FieldError>,
) -> String {
    let main = format!(
        "<h1>{heading}</h1>\n{error}\
         <form method=\"post\" action=\"{action}\">\n\
         <p><label>Title <input type=\"text\" name=\"title\" value=\"{title}\"></label></p>\n\
         <p><label>Text <textarea name=\"text\" rows=\"10\" cols=\"40\">{text}</textarea></label></p>\n\
         <p><label>Slug <input type=\"text\" name=\"slug\" value=\"{slug}\"></label></p>\n\
         <button type=\"submit\">Save</button>\n\
         </form>\n",
        heading = escape(heading),
        error = field_error(error),
        action = action,
        title = escape(form.title()),
        text = escape(form.text()),
        slug = escape(form.slug()),
    );
    layout(heading, Some(user), &main)
}

pub fn note_list_page(user: &AuthUser, notes: &[QueryNote]) -> String {
    let mut items = String::new();
    for note in notes {
        items.push_str(&format!(
            "<li class=\"note-item\"><a href=\"{}\">{}</a></li>\n",
            routes::detail(&note.slug),
            escape(&note.title)
        ));
    }
    let main = format!(
        "<h1>My notes</h1>\n<ul class=\"notes\">\n{items}</ul>\n\
         <p><a href=\"{add}\">Add a note</a></p>\n",
        items = items,
        add = routes::ADD,
    );
    layout("My notes", Some(user), &main)
}

pub fn note_detail_page(user: &AuthUser, note: &QueryNote) -> String {
    let main = format!(
        "<h1>{title}</h1>\n<article class=\"note-text\">{text}</article>\n\
         <p><a href=\"{edit}\">Edit</a> <a href=\"{delete}\">Delete</a></p>\n\
         <p><a href=\"{list}\">Back to my notes</a></p>\n",
        title = escape(&note.title),
        text = escape(&note.text),
        edit = routes::edit(&note.slug),
        delete = routes::delete(&note.slug),
        list = routes::LIST,
    );
    layout(&note.title, Some(user), &main)
}

pub fn delete_page(user: &AuthUser, note: &QueryNote) -> String {
    let main = format!(
        "<h1>Delete note</h1>\n\
         <p>Are you sure you want to delete \"{title}\"?</p>\n\
         <form method=\"post\" action=\"{action}\">\n\
         <button type=\"submit\">Delete</button>\n\
         </form>\n\
         <p><a href=\"{detail}\">Cancel</a></p>\n",
        title = escape(&note.title),
        action = routes::delete(&note.slug),
        detail = routes::detail(&note.slug),
    );
    layout("Delete note", Some(user), &main)
}

pub fn success_page(user: &AuthUser) -> String {
    let main = format!(
        "<h1>All done!</h1>\n<p>Your note has been saved.</p>\n\
         <p><a href=\"{}\">Back to my notes</a></p>\n",
        routes::LIST
    );
    layout("All done", Some(user), &main)
}
