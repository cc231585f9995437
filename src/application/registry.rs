use crate::domain::employee::{Employee, EmployeeUpdate, NewEmployee};
use crate::domain::ports::EmployeeRepositoryBox;
use crate::error::{PayrollError, Result};
use chrono::Utc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

struct RegistryState {
    employees: Vec<Employee>,
    /// Lowest identifier the next registration may take.
    next_id: u64,
}

/// Identifiers are millisecond timestamps, bumped past the highest one in use.
/// Removing the newest employee and reopening cannot hand its id out again,
/// since the clock has moved past it.
fn allocate_id(next_id: u64) -> u64 {
    let now = u64::try_from(Utc::now().timestamp_millis()).unwrap_or(0);
    now.max(next_id)
}

/// CRUD over the employee list, keyed by identifier and unique by `ci`.
///
/// The list is held in memory in storage order and rewritten in full on every
/// mutation. A mutation whose persistence fails is rolled back, so memory never
/// runs ahead of what is on disk.
pub struct EmployeeRegistry {
    repository: EmployeeRepositoryBox,
    state: Mutex<RegistryState>,
}

fn not_found() -> PayrollError {
    PayrollError::NotFound("Empleado".to_string())
}

impl EmployeeRegistry {
    pub async fn open(repository: EmployeeRepositoryBox) -> Result<Self> {
        let employees = repository.load().await?;
        let next_id = employees.iter().map(|e| e.id).max().unwrap_or(0) + 1;
        debug!(count = employees.len(), next_id, "employee registry loaded");

        Ok(Self {
            repository,
            state: Mutex::new(RegistryState { employees, next_id }),
        })
    }

    /// Registers a new employee and returns the stored record.
    pub async fn add(&self, input: NewEmployee) -> Result<Employee> {
        input.validate()?;

        let mut state = self.state.lock().await;
        if state.employees.iter().any(|e| e.ci == input.ci) {
            warn!(ci = %input.ci, "rejected duplicate national ID");
            return Err(PayrollError::DuplicateKey(input.ci));
        }

        let employee = input.into_employee(allocate_id(state.next_id));
        state.employees.push(employee.clone());

        if let Err(e) = self.repository.save(&state.employees).await {
            state.employees.pop();
            return Err(e);
        }

        state.next_id = employee.id + 1;
        info!(id = employee.id, ci = %employee.ci, "employee registered");
        Ok(employee)
    }

    /// Replaces a record in place. Fields absent from `update` keep their
    /// current values; the identifier never changes.
    pub async fn update(&self, id: u64, update: EmployeeUpdate) -> Result<Employee> {
        update.validate()?;

        let mut state = self.state.lock().await;
        let index = state
            .employees
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(not_found)?;

        if let Some(ci) = &update.ci
            && state.employees.iter().any(|e| e.id != id && &e.ci == ci)
        {
            warn!(id, ci = %ci, "rejected national ID already used by another employee");
            return Err(PayrollError::DuplicateKey(ci.clone()));
        }

        let updated = state.employees[index].apply(update);
        let previous = std::mem::replace(&mut state.employees[index], updated.clone());

        if let Err(e) = self.repository.save(&state.employees).await {
            state.employees[index] = previous;
            return Err(e);
        }

        info!(id, "employee updated");
        Ok(updated)
    }

    /// Deletes a record permanently and returns it.
    pub async fn remove(&self, id: u64) -> Result<Employee> {
        let mut state = self.state.lock().await;
        let index = state
            .employees
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(not_found)?;

        let removed = state.employees.remove(index);

        if let Err(e) = self.repository.save(&state.employees).await {
            state.employees.insert(index, removed);
            return Err(e);
        }

        info!(id, ci = %removed.ci, "employee removed");
        Ok(removed)
    }

    pub async fn get(&self, id: u64) -> Result<Employee> {
        let state = self.state.lock().await;
        state
            .employees
            .iter()
            .find(|e| e.id == id)
            .cloned()
            .ok_or_else(not_found)
    }

    pub async fn find_by_ci(&self, ci: &str) -> Option<Employee> {
        let state = self.state.lock().await;
        state.employees.iter().find(|e| e.ci == ci).cloned()
    }

    /// All employees in storage order.
    pub async fn list(&self) -> Vec<Employee> {
        self.state.lock().await.employees.clone()
    }

    /// Case-insensitive substring search over name and national ID, in
    /// storage order. An empty term matches everyone.
    pub async fn search(&self, term: &str) -> Vec<Employee> {
        let term = term.to_lowercase();
        let state = self.state.lock().await;
        state
            .employees
            .iter()
            .filter(|e| e.matches(&term))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::money::Money;
    use crate::domain::ports::EmployeeRepository;
    use crate::infrastructure::in_memory::InMemoryEmployeeRepository;
    use async_trait::async_trait;
    use rust_decimal_macros::dec;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};

    fn new_employee(name: &str, ci: &str) -> NewEmployee {
        NewEmployee {
            full_name: name.to_string(),
            ci: ci.to_string(),
            job_title: "Vendedor".to_string(),
            hire_date: "01/02/2023".to_string(),
            salary: Money::new(dec!(3200)),
        }
    }

    async fn registry() -> (EmployeeRegistry, InMemoryEmployeeRepository) {
        let repo = InMemoryEmployeeRepository::new();
        let registry = EmployeeRegistry::open(Box::new(repo.clone())).await.unwrap();
        (registry, repo)
    }

    #[derive(Clone, Default)]
    struct FlakyRepository {
        inner: InMemoryEmployeeRepository,
        failing: Arc<AtomicBool>,
    }

    #[async_trait]
    impl EmployeeRepository for FlakyRepository {
        async fn load(&self) -> Result<Vec<Employee>> {
            self.inner.load().await
        }

        async fn save(&self, employees: &[Employee]) -> Result<()> {
            if self.failing.load(Ordering::SeqCst) {
                return Err(PayrollError::StorageError("read-only".to_string()));
            }
            self.inner.save(employees).await
        }
    }

    #[tokio::test]
    async fn test_add_assigns_increasing_ids_and_persists() {
        let (registry, repo) = registry().await;
        let before = u64::try_from(Utc::now().timestamp_millis()).unwrap();
        let a = registry.add(new_employee("Ana Torrez", "111")).await.unwrap();
        let b = registry.add(new_employee("Beto Vargas", "222")).await.unwrap();

        assert!(a.id >= before);
        assert!(b.id > a.id);
        assert_eq!(repo.load().await.unwrap(), vec![a, b]);
    }

    #[tokio::test]
    async fn test_add_duplicate_ci_does_not_mutate() {
        let (registry, repo) = registry().await;
        registry.add(new_employee("Ana Torrez", "111")).await.unwrap();
        let before = repo.load().await.unwrap();

        let result = registry.add(new_employee("Otra Ana", "111")).await;
        assert!(matches!(result, Err(PayrollError::DuplicateKey(ci)) if ci == "111"));
        assert_eq!(registry.list().await, before);
        assert_eq!(repo.load().await.unwrap(), before);
    }

    #[tokio::test]
    async fn test_removed_newest_id_is_not_reused_after_reopen() {
        let repo = InMemoryEmployeeRepository::new();
        let newest = {
            let registry = EmployeeRegistry::open(Box::new(repo.clone())).await.unwrap();
            registry.add(new_employee("A", "1")).await.unwrap();
            registry.add(new_employee("B", "2")).await.unwrap()
        };

        let registry = EmployeeRegistry::open(Box::new(repo.clone())).await.unwrap();
        registry.remove(newest.id).await.unwrap();
        drop(registry);

        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        let registry = EmployeeRegistry::open(Box::new(repo.clone())).await.unwrap();
        let c = registry.add(new_employee("C", "3")).await.unwrap();
        assert!(c.id > newest.id);
    }

    #[tokio::test]
    async fn test_ids_stay_above_persisted_ids_ahead_of_the_clock() {
        let repo = InMemoryEmployeeRepository::new();
        let ahead = u64::MAX / 2;
        repo.save(&[Employee {
            id: ahead,
            ..new_employee("Legado", "9").into_employee(0)
        }])
        .await
        .unwrap();

        let registry = EmployeeRegistry::open(Box::new(repo)).await.unwrap();
        let next = registry.add(new_employee("Nuevo", "10")).await.unwrap();
        assert_eq!(next.id, ahead + 1);
    }

    #[tokio::test]
    async fn test_update_salary_only_preserves_other_fields() {
        let (registry, _) = registry().await;
        let original = registry.add(new_employee("Ana Torrez", "111")).await.unwrap();

        let updated = registry
            .update(
                original.id,
                EmployeeUpdate {
                    salary: Some(Money::new(dec!(4100))),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(
            updated,
            Employee {
                salary: Money::new(dec!(4100)),
                ..original
            }
        );
        assert_eq!(registry.get(updated.id).await.unwrap(), updated);
    }

    #[tokio::test]
    async fn test_update_ci_collision_with_other_record() {
        let (registry, _) = registry().await;
        let a = registry.add(new_employee("Ana", "111")).await.unwrap();
        registry.add(new_employee("Beto", "222")).await.unwrap();

        let result = registry
            .update(
                a.id,
                EmployeeUpdate {
                    ci: Some("222".to_string()),
                    ..Default::default()
                },
            )
            .await;
        assert!(matches!(result, Err(PayrollError::DuplicateKey(_))));
        assert_eq!(registry.get(a.id).await.unwrap().ci, "111");
    }

    #[tokio::test]
    async fn test_update_keeping_own_ci_is_allowed() {
        let (registry, _) = registry().await;
        let a = registry.add(new_employee("Ana", "111")).await.unwrap();

        let updated = registry
            .update(
                a.id,
                EmployeeUpdate {
                    ci: Some("111".to_string()),
                    full_name: Some("Ana María".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.full_name, "Ana María");
    }

    #[tokio::test]
    async fn test_update_and_remove_unknown_id() {
        let (registry, _) = registry().await;
        assert!(matches!(
            registry.update(99, EmployeeUpdate::default()).await,
            Err(PayrollError::NotFound(_))
        ));
        assert!(matches!(
            registry.remove(99).await,
            Err(PayrollError::NotFound(_))
        ));
        assert!(matches!(registry.get(99).await, Err(PayrollError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_remove_persists() {
        let (registry, repo) = registry().await;
        let a = registry.add(new_employee("Ana", "111")).await.unwrap();
        let b = registry.add(new_employee("Beto", "222")).await.unwrap();

        let removed = registry.remove(a.id).await.unwrap();
        assert_eq!(removed, a);
        assert_eq!(repo.load().await.unwrap(), vec![b]);
    }

    #[tokio::test]
    async fn test_search_is_case_insensitive_and_order_preserving() {
        let (registry, _) = registry().await;
        registry.add(new_employee("Zulema Quispe", "45-AB")).await.unwrap();
        registry.add(new_employee("Andrés Choque", "12-CD")).await.unwrap();
        registry.add(new_employee("Marco Quispe", "45-ab-2")).await.unwrap();

        let by_ci: Vec<_> = registry
            .search("45-Ab")
            .await
            .into_iter()
            .map(|e| e.full_name)
            .collect();
        assert_eq!(by_ci, vec!["Zulema Quispe", "Marco Quispe"]);

        let by_name: Vec<_> = registry
            .search("QUISPE")
            .await
            .into_iter()
            .map(|e| e.ci)
            .collect();
        assert_eq!(by_name, vec!["45-AB", "45-ab-2"]);

        assert_eq!(registry.search("").await.len(), 3);
        assert!(registry.search("mamani").await.is_empty());
    }

    #[tokio::test]
    async fn test_find_by_ci() {
        let (registry, _) = registry().await;
        let a = registry.add(new_employee("Ana", "111")).await.unwrap();
        assert_eq!(registry.find_by_ci("111").await, Some(a));
        assert_eq!(registry.find_by_ci("11").await, None);
    }

    #[tokio::test]
    async fn test_storage_failure_rolls_back() {
        let repo = FlakyRepository::default();
        let registry = EmployeeRegistry::open(Box::new(repo.clone())).await.unwrap();
        let a = registry.add(new_employee("Ana", "111")).await.unwrap();

        repo.failing.store(true, Ordering::SeqCst);
        assert!(matches!(
            registry.add(new_employee("Beto", "222")).await,
            Err(PayrollError::StorageError(_))
        ));
        assert!(matches!(
            registry
                .update(
                    a.id,
                    EmployeeUpdate {
                        full_name: Some("Ana B".to_string()),
                        ..Default::default()
                    }
                )
                .await,
            Err(PayrollError::StorageError(_))
        ));
        assert!(matches!(
            registry.remove(a.id).await,
            Err(PayrollError::StorageError(_))
        ));
        assert_eq!(registry.list().await, vec![a.clone()]);

        repo.failing.store(false, Ordering::SeqCst);
        let b = registry.add(new_employee("Beto", "222")).await.unwrap();
        assert!(b.id > a.id);
    }

    #[tokio::test]
    async fn test_invalid_input_is_rejected() {
        let (registry, _) = registry().await;
        let mut input = new_employee("Ana", "111");
        input.salary = Money::new(dec!(-5));
        assert!(matches!(
            registry.add(input).await,
            Err(PayrollError::ValidationError(_))
        ));
        assert!(registry.list().await.is_empty());
    }
}
