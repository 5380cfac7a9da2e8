/**
 * Responsibility
 * - What the hotel store tells the layers above it
 */
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("db error")]
    Db(#[source] sqlx::Error),
    #[error("record already exists: owner={owner_id} id={id}")]
    Conflict { owner_id: String, id: String },
    #[error("in-memory store lock poisoned")]
    Poisoned,
}

impl RepoError {
    /// Unique violations become `Conflict`; records are insert-only.
    pub fn from_sqlx(e: sqlx::Error, owner_id: &str, id: &str) -> Self {
        if let sqlx::Error::Database(dbe) = &e
            && dbe.code().as_deref() == Some("23505")
        {
            return RepoError::Conflict {
                owner_id: owner_id.to_string(),
                id: id.to_string(),
            };
        }
        RepoError::Db(e)
    }
}

impl From<sqlx::Error> for RepoError {
    fn from(e: sqlx::Error) -> Self {
        RepoError::Db(e)
    }
}
