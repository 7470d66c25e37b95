use std::collections::HashSet;

use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::warn;

use crate::{
    DirectoryResult, Employee, EmployeePatch, IdStrategy, NewEmployee, ids::IdAllocator, invalid,
};

/// Storage capability behind the directory service.
///
/// Implementations own id assignment and must apply each write atomically:
/// readers never observe a half-applied insert, update or removal.
#[async_trait]
pub trait EmployeeRepository: Send + Sync {
    /// All records in insertion order.
    async fn snapshot(&self) -> Result<Vec<Employee>>;

    async fn find(&self, id: &str) -> Result<Option<Employee>>;

    /// Append a new record and return it with its assigned id.
    async fn insert(&self, input: NewEmployee) -> Result<Employee>;

    /// Patch a record in place. `None` when the id is unknown.
    async fn update(&self, id: &str, patch: &EmployeePatch) -> Result<Option<Employee>>;

    /// Remove a record without reordering the rest. `None` when the id is unknown.
    async fn remove(&self, id: &str) -> Result<Option<Employee>>;

    async fn count(&self) -> Result<usize>;
}

#[derive(Debug)]
struct Collection {
    records: Vec<Employee>,
    ids: IdAllocator,
}

#[derive(Debug)]
pub struct InMemoryEmployeeRepository {
    state: RwLock<Collection>,
}

impl InMemoryEmployeeRepository {
    /// Build a repository over `seed`, rejecting duplicate ids and blank names.
    pub fn new(seed: Vec<Employee>, strategy: IdStrategy) -> DirectoryResult<Self> {
        let mut seen = HashSet::with_capacity(seed.len());
        for employee in &seed {
            if !seen.insert(employee.id.as_str()) {
                return Err(invalid(format!("duplicate employee id `{}` in seed", employee.id)));
            }
            if employee.name.trim().is_empty() {
                return Err(invalid(format!("employee `{}` has an empty name", employee.id)));
            }
        }
        let ids = IdAllocator::new(strategy, &seed);
        Ok(Self {
            state: RwLock::new(Collection { records: seed, ids }),
        })
    }

    pub fn empty(strategy: IdStrategy) -> Self {
        Self {
            state: RwLock::new(Collection {
                records: Vec::new(),
                ids: IdAllocator::new(strategy, &[]),
            }),
        }
    }
}

#[async_trait]
impl EmployeeRepository for InMemoryEmployeeRepository {
    async fn snapshot(&self) -> Result<Vec<Employee>> {
        Ok(self.state.read().await.records.clone())
    }

    async fn find(&self, id: &str) -> Result<Option<Employee>> {
        let state = self.state.read().await;
        Ok(state.records.iter().find(|e| e.id == id).cloned())
    }

    async fn insert(&self, input: NewEmployee) -> Result<Employee> {
        let mut state = self.state.write().await;
        let len = state.records.len();
        let id = state.ids.next_id(len);
        if state.ids.strategy() == IdStrategy::Count && state.records.iter().any(|e| e.id == id) {
            warn!(%id, "count-based id collides with an existing record");
        }
        let employee = Employee::from_new(id, input);
        state.records.push(employee.clone());
        Ok(employee)
    }

    async fn update(&self, id: &str, patch: &EmployeePatch) -> Result<Option<Employee>> {
        let mut state = self.state.write().await;
        let Some(employee) = state.records.iter_mut().find(|e| e.id == id) else {
            return Ok(None);
        };
        patch.apply_to(employee);
        Ok(Some(employee.clone()))
    }

    async fn remove(&self, id: &str) -> Result<Option<Employee>> {
        let mut state = self.state.write().await;
        let Some(index) = state.records.iter().position(|e| e.id == id) else {
            return Ok(None);
        };
        Ok(Some(state.records.remove(index)))
    }

    async fn count(&self) -> Result<usize> {
        Ok(self.state.read().await.records.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DirectoryError, default_seed};

    #[tokio::test]
    async fn seed_with_duplicate_ids_is_rejected() {
        let mut seed = default_seed();
        seed[1].id = seed[0].id.clone();
        let err = InMemoryEmployeeRepository::new(seed, IdStrategy::Sequence).unwrap_err();
        assert!(matches!(err, DirectoryError::InvalidArgument(_)));
    }

    #[tokio::test]
    async fn remove_preserves_relative_order() {
        let repo = InMemoryEmployeeRepository::new(default_seed(), IdStrategy::Count).unwrap();
        let removed = repo.remove("3").await.unwrap().unwrap();
        assert_eq!(removed.name, "Bob Johnson");
        let ids: Vec<String> = repo
            .snapshot()
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.id)
            .collect();
        assert_eq!(ids, ["1", "2", "4", "5", "6", "7", "8", "9", "10", "11", "12"]);
        assert!(repo.remove("3").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn update_keeps_position() {
        let repo = InMemoryEmployeeRepository::new(default_seed(), IdStrategy::Sequence).unwrap();
        let patch = EmployeePatch {
            name: Some("Aaron Aardvark".into()),
            ..EmployeePatch::default()
        };
        repo.update("5", &patch).await.unwrap().unwrap();
        let snapshot = repo.snapshot().await.unwrap();
        assert_eq!(snapshot[4].id, "5");
        assert_eq!(snapshot[4].name, "Aaron Aardvark");
        assert!(repo.update("99", &patch).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn empty_repository_starts_sequences_at_one() {
        let repo = InMemoryEmployeeRepository::empty(IdStrategy::Sequence);
        let created = repo.insert(NewEmployee::new("Kim Park", 41)).await.unwrap();
        assert_eq!(created.id, "1");
        assert_eq!(repo.count().await.unwrap(), 1);
    }
}
