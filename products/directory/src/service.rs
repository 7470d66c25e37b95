use std::sync::Arc;

use platform_authz::{Action, Authorizer, Caller, PolicyEngine};
use tracing::{info, instrument, warn};

use crate::{
    DirectoryError, DirectoryResult, Employee, EmployeePatch, EmployeeRepository, IdStrategy,
    InMemoryEmployeeRepository, NewEmployee, Page, PageRequest, paginate, sort_records,
};

pub const DELETE_CONFIRMATION: &str = "Employee deleted successfully";

const RESOURCE: &str = "employee";

/// Read and write operations over the employee collection.
///
/// Writes are checked against the [`Authorizer`] before any state is touched,
/// so a denied request never has a partial effect.
pub struct DirectoryService {
    repository: Arc<dyn EmployeeRepository>,
    authorizer: Arc<dyn Authorizer>,
    strict_validation: bool,
}

impl DirectoryService {
    pub fn new(repository: Arc<dyn EmployeeRepository>, authorizer: Arc<dyn Authorizer>) -> Self {
        Self {
            repository,
            authorizer,
            strict_validation: false,
        }
    }

    /// In-memory directory over `seed` guarded by the default [`PolicyEngine`].
    pub fn in_memory(seed: Vec<Employee>, strategy: IdStrategy) -> DirectoryResult<Self> {
        let repository = InMemoryEmployeeRepository::new(seed, strategy)?;
        Ok(Self::new(Arc::new(repository), Arc::new(PolicyEngine)))
    }

    /// Reject negative ages and attendance outside 0..=100.
    pub fn with_strict_validation(mut self, strict: bool) -> Self {
        self.strict_validation = strict;
        self
    }

    #[instrument(
        name = "directory.list",
        skip_all,
        fields(
            page = request.page,
            limit = request.limit,
            sort_by = request.sort.field.map(|f| f.as_str()).unwrap_or("none"),
            order = request.sort.order.as_str(),
        )
    )]
    pub async fn list(&self, request: &PageRequest) -> DirectoryResult<Page<Employee>> {
        let mut records = self.repository.snapshot().await?;
        sort_records(&mut records, &request.sort);
        Ok(paginate(records, request.page, request.limit))
    }

    #[instrument(name = "directory.get", skip(self))]
    pub async fn get(&self, id: &str) -> DirectoryResult<Option<Employee>> {
        Ok(self.repository.find(id).await?)
    }

    pub async fn count(&self) -> DirectoryResult<usize> {
        Ok(self.repository.count().await?)
    }

    #[instrument(name = "directory.create", skip_all, fields(caller = caller.subject()))]
    pub async fn create(&self, caller: &Caller, input: NewEmployee) -> DirectoryResult<Employee> {
        self.authorize(caller, Action::Create)?;
        let input = input.validated(self.strict_validation)?;
        let employee = self.repository.insert(input).await?;
        info!(id = %employee.id, "employee created");
        Ok(employee)
    }

    #[instrument(name = "directory.update", skip(self, caller, patch), fields(caller = caller.subject()))]
    pub async fn update(
        &self,
        caller: &Caller,
        id: &str,
        patch: EmployeePatch,
    ) -> DirectoryResult<Employee> {
        self.authorize(caller, Action::Update)?;
        let patch = patch.validated(self.strict_validation)?;
        let employee = self
            .repository
            .update(id, &patch)
            .await?
            .ok_or_else(|| DirectoryError::NotFound(id.to_string()))?;
        info!(id, "employee updated");
        Ok(employee)
    }

    /// Remove a record and hand it back.
    #[instrument(name = "directory.delete", skip(self, caller), fields(caller = caller.subject()))]
    pub async fn delete(&self, caller: &Caller, id: &str) -> DirectoryResult<Employee> {
        self.authorize(caller, Action::Delete)?;
        let removed = self
            .repository
            .remove(id)
            .await?
            .ok_or_else(|| DirectoryError::NotFound(id.to_string()))?;
        info!(id, "employee deleted");
        Ok(removed)
    }

    fn authorize(&self, caller: &Caller, action: Action) -> DirectoryResult<()> {
        self.authorizer
            .authorize(caller, action, RESOURCE)
            .inspect_err(|err| {
                warn!(role = %caller.role, action = action.as_str(), %err, "write rejected");
            })
            .map_err(DirectoryError::from)
    }
}
