use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("{0} not found")]
    NotFound(String),
    #[error("database error: {0}")]
    Db(String),
}

impl From<sea_orm::DbErr> for ModelError {
    fn from(e: sea_orm::DbErr) -> Self {
        match e {
            sea_orm::DbErr::RecordNotFound(what) => ModelError::NotFound(what),
            sea_orm::DbErr::RecordNotUpdated => ModelError::NotFound("record".into()),
            other => ModelError::Db(other.to_string()),
        }
    }
}
