use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use diesel::{AsChangeset, Insertable, Queryable};

use crate::errors::ServerError;
use crate::schema::notes;

#[derive(Clone, Debug, Queryable)]
pub struct QueryNote {
    pub id: i32,
    pub title: String,
    pub text: String,
    pub slug: String,
    pub author_id: i32,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = notes)]
pub struct InsertNote {
    pub title: String,
    pub text: String,
    pub slug: String,
    pub author_id: i32,
}

#[derive(Debug, AsChangeset)]
#[diesel(table_name = notes)]
pub struct UpdateNote {
    pub title: String,
    pub text: String,
    pub slug: String,
}

pub fn find_by_slug(
    conn: &mut SqliteConnection,
    value: &str,
) -> Result<Option<QueryNote>, ServerError> {
    let note = notes::table
        .filter(notes::slug.eq(value))
        .first::<QueryNote>(conn)
        .optional()?;
    Ok(note)
}
