use sea_orm::{DbErr, SqlErr, TransactionError};

/// Storage-level constraint that rejected a write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConstraintViolation {
    Unique(String),
    ForeignKey(String),
}

/// Classify driver errors so repositories can treat an insert attempt as the
/// uniqueness check instead of querying first.
pub trait DbErrExt {
    fn constraint_violation(&self) -> Option<ConstraintViolation>;

    fn is_unique_violation(&self) -> bool {
        matches!(
            self.constraint_violation(),
            Some(ConstraintViolation::Unique(_))
        )
    }

    fn is_foreign_key_violation(&self) -> bool {
        matches!(
            self.constraint_violation(),
            Some(ConstraintViolation::ForeignKey(_))
        )
    }
}

impl DbErrExt for DbErr {
    fn constraint_violation(&self) -> Option<ConstraintViolation> {
        match self.sql_err()? {
            SqlErr::UniqueConstraintViolation(msg) => Some(ConstraintViolation::Unique(msg)),
            SqlErr::ForeignKeyConstraintViolation(msg) => {
                Some(ConstraintViolation::ForeignKey(msg))
            }
            _ => None,
        }
    }
}

/// Collapse a transaction error into the underlying `DbErr`.
pub fn flatten_transaction_error(err: TransactionError<DbErr>) -> DbErr {
    match err {
        TransactionError::Connection(e) | TransactionError::Transaction(e) => e,
    }
}
