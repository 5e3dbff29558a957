//! One place for every path the app serves, so handlers, pages and redirects
//! never drift apart on a URL.

pub const HOME: &str = "/";
pub const LIST: &str = "/notes/";
pub const ADD: &str = "/add/";
pub const SUCCESS: &str = "/done/";
pub const LOGIN: &str = "/auth/login/";
pub const LOGOUT: &str = "/auth/logout/";
pub const SIGNUP: &str = "/auth/signup/";

pub const DETAIL_PATTERN: &str = "/note/{slug}/";
pub const EDIT_PATTERN: &str = "/edit/{slug}/";
pub const DELETE_PATTERN: &str = "/delete/{slug}/";

pub fn detail(slug: &str) -> String {
    format!("/note/{}/", slug)
}

pub fn edit(slug: &str) -> String {
    format!("/edit/{}/", slug)
}

pub fn delete(slug: &str) -> String {
    format!("/delete/{}/", slug)
}

pub fn login_with_next(next: &str) -> String {
    format!("{}?next={}", LOGIN, next)
}
