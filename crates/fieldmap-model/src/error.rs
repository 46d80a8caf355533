use thiserror::Error;

use crate::side::Side;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("table '{table}' does not exist on the {side} side")]
    UnknownTable { side: Side, table: String },
}

pub type Result<T> = std::result::Result<T, ModelError>;
