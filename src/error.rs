use thiserror::Error;

use crate::model::BodyHandle;

/// Configuration-time failures. The per-frame update itself cannot fail.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimError {
    #[error("body `{body}` names parent {parent:?}, which has not been added")]
    UnknownParent { body: String, parent: BodyHandle },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type SimResult<T> = Result<T, SimError>;
