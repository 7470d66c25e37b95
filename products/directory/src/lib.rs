//! Employee directory: an in-memory collection of employee records with
//! sorted, paged reads and role-gated writes.

mod ids;
mod model;
mod query;
mod repository;
mod seed;
mod service;

use platform_authz::AuthzError;
use thiserror::Error;

pub use ids::{IdStrategy, ParseIdStrategyError};
pub use model::{Employee, EmployeePatch, NewEmployee};
pub use query::{
    DEFAULT_LIMIT, DEFAULT_PAGE, DEFAULT_SORT_FIELD, Page, PageRequest, SortField, SortOrder,
    SortSpec, paginate, sort_records,
};
pub use repository::{EmployeeRepository, InMemoryEmployeeRepository};
pub use seed::{default_seed, parse_seed};
pub use service::{DELETE_CONFIRMATION, DirectoryService};

#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("permission denied: {0}")]
    PermissionDenied(#[from] AuthzError),
    #[error("employee {0} not found")]
    NotFound(String),
    #[error("{0}")]
    InvalidArgument(String),
    #[error("storage failure: {0}")]
    Storage(#[from] anyhow::Error),
}

pub type DirectoryResult<T> = Result<T, DirectoryError>;

pub(crate) fn invalid(message: impl Into<String>) -> DirectoryError {
    DirectoryError::InvalidArgument(message.into())
}
