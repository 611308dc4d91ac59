use thiserror::Error;

/// A page size outside [`PAGE_SIZE_SELECTIONS`](crate::PAGE_SIZE_SELECTIONS).
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("unsupported page size: {0}")]
pub struct InvalidPageSize(pub u32);

/// Text that is not one of the selectable page sizes.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParsePageSizeError {
    #[error("page size is not a number: {0:?}")]
    NotANumber(String),
    #[error(transparent)]
    Unsupported(#[from] InvalidPageSize),
}
