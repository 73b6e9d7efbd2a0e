use crate::domain::errors::DomainError;
use sqlx::error::ErrorKind;

const CATEGORY_NAME_COLUMN: &str = "categories.name";

pub fn map_sqlx(err: sqlx::Error) -> DomainError {
    match &err {
        sqlx::Error::Database(db_err) => match db_err.kind() {
            ErrorKind::UniqueViolation if db_err.message().contains(CATEGORY_NAME_COLUMN) => {
                DomainError::Conflict("category name already exists".into())
            }
            ErrorKind::UniqueViolation => {
                DomainError::Conflict("unique constraint violated".into())
            }
            ErrorKind::ForeignKeyViolation => DomainError::Persistence(format!(
                "referenced record is gone: {}",
                db_err.message()
            )),
            ErrorKind::CheckViolation | ErrorKind::NotNullViolation => {
                DomainError::Validation(db_err.message().to_string())
            }
            _ => DomainError::Persistence(db_err.message().to_string()),
        },
        sqlx::Error::RowNotFound => DomainError::NotFound("record not found".into()),
        _ => DomainError::Persistence(err.to_string()),
    }
}
