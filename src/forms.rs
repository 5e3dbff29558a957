use diesel::dsl::exists;
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use serde_derive::Deserialize;

use crate::errors::ServerError;
use crate::schema::notes;

pub const WARNING: &str = " - this slug already exists, please come up with a unique value!";
pub const REQUIRED: &str = "This field is required.";
pub const INVALID_SLUG: &str =
    "Enter a valid slug consisting of letters, numbers, underscores or hyphens.";
pub const TITLE_TOO_LONG: &str = "Ensure the title has at most 100 characters.";
pub const SLUG_TOO_LONG: &str = "Ensure the slug has at most 100 characters.";
pub const BAD_CREDENTIALS: &str = "Invalid username or password.";
pub const USERNAME_TAKEN: &str = "A user with that username already exists.";

const TITLE_MAX_CHARS: usize = 100;
const SLUG_MAX_CHARS: usize = 100;

/// Raw note form input. Every field is optional so that a missing key and a
/// blank value land in the same validation path instead of a 400.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct NoteForm {
    pub title: Option<String>,
    pub text: Option<String>,
    pub slug: Option<String>,
}

/// Validated note fields, ready to be written to the database.
#[derive(Debug, PartialEq, Eq)]
pub struct CleanNote {
    pub title: String,
    pub text: String,
    pub slug: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        FieldError {
            field,
            message: message.into(),
        }
    }
}

impl NoteForm {
    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or("")
    }

    pub fn text(&self) -> &str {
        self.text.as_deref().unwrap_or("")
    }

    pub fn slug(&self) -> &str {
        self.slug.as_deref().unwrap_or("")
    }

    /// Field-level validation. A blank slug falls back to one derived from
    /// the title; a supplied slug is kept verbatim.
    pub fn normalize(&self) -> Result<CleanNote, FieldError> {
        let title = self.title().trim();
        if title.is_empty() {
            return Err(FieldError::new("title", REQUIRED));
        }
        if title.chars().count() > TITLE_MAX_CHARS {
            return Err(FieldError::new("title", TITLE_TOO_LONG));
        }

        let text = self.text().trim();
        if text.is_empty() {
            return Err(FieldError::new("text", REQUIRED));
        }

        let slug = match self.slug().trim() {
            "" => {
                let derived = derive_slug(title);
                if derived.is_empty() {
                    return Err(FieldError::new("slug", REQUIRED));
                }
                derived
            }
            supplied => {
                if !is_valid_slug(supplied) {
                    return Err(FieldError::new("slug", INVALID_SLUG));
                }
                if supplied.chars().count() > SLUG_MAX_CHARS {
                    return Err(FieldError::new("slug", SLUG_TOO_LONG));
                }
                supplied.to_string()
            }
        };

        Ok(CleanNote {
            title: title.to_string(),
            text: text.to_string(),
            slug,
        })
    }
}

pub fn derive_slug(title: &str) -> String {
    let mut value = slug::slugify(title);
    value.truncate(SLUG_MAX_CHARS);
    value
}

fn is_valid_slug(value: &str) -> bool {
    value
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

pub fn duplicate_slug_error(candidate: &str) -> FieldError {
    FieldError::new("slug", format!("{}{}", candidate, WARNING))
}

/// Reports a duplicate-slug field error when `candidate` is already taken.
/// `exclude_id` skips the note currently being edited, so keeping your own
/// slug never counts as a collision.
pub fn check_slug_free(
    conn: &mut SqliteConnection,
    candidate: &str,
    exclude_id: Option<i32>,
) -> Result<Option<FieldError>, ServerError> {
    let taken: bool = match exclude_id {
        Some(current) => diesel::select(exists(
            notes::table
                .filter(notes::slug.eq(candidate))
                .filter(notes::id.ne(current)),
        ))
        .get_result(conn)?,
        None => diesel::select(exists(notes::table.filter(notes::slug.eq(candidate))))
            .get_result(conn)?,
    };

    if taken {
        Ok(Some(duplicate_slug_error(candidate)))
    } else {
        Ok(None)
    }
}

/// Login form input, including the `next` target carried through from the
/// redirect that brought the visitor here.
#[derive(Clone, Debug, Deserialize)]
pub struct LoginForm {
    pub username: Option<String>,
    pub password: Option<String>,
    pub next: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct SignupForm {
    pub username: Option<String>,
    pub password: Option<String>,
}
