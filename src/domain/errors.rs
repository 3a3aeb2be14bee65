use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    #[error("Duplicate slide id: {0}")]
    DuplicateSlideId(u32),
}

pub type DomainResult<T> = Result<T, DomainError>;
