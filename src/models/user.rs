use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use diesel::{Insertable, Queryable};

use crate::errors::ServerError;
use crate::schema::users;

#[derive(Clone, Debug, Queryable)]
pub struct QueryUser {
    pub id: i32,
    pub username: String,
    pub password_hash: String,
}

#[derive(Insertable)]
#[diesel(table_name = users)]
pub struct InsertUser {
    pub username: String,
    pub password_hash: String,
}

impl QueryUser {
    pub fn verify_password(&self, password: &str) -> Result<bool, ServerError> {
        let parsed_hash = PasswordHash::new(&self.password_hash)?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }
}

pub fn hash_password(password: &str) -> Result<String, ServerError> {
    let hashed = Argon2::default()
        .hash_password(password.as_bytes(), &SaltString::generate(&mut OsRng))?
        .to_string();
    Ok(hashed)
}

pub fn create(
    conn: &mut SqliteConnection,
    username: &str,
    password: &str,
) -> Result<QueryUser, ServerError> {
    let record = InsertUser {
        username: username.to_string(),
        password_hash: hash_password(password)?,
    };
    let user = diesel::insert_into(users::table)
        .values(&record)
        .get_result::<QueryUser>(conn)?;
    Ok(user)
}

pub fn find_by_username(
    conn: &mut SqliteConnection,
    name: &str,
) -> Result<Option<QueryUser>, ServerError> {
    let user = users::table
        .filter(users::username.eq(name))
        .first::<QueryUser>(conn)
        .optional()?;
    Ok(user)
}

pub fn find_by_id(conn: &mut SqliteConnection, uid: i32) -> Result<Option<QueryUser>, ServerError> {
    let user = users::table
        .find(uid)
        .first::<QueryUser>(conn)
        .optional()?;
    Ok(user)
}
