use platform_authz::Role;

use crate::{DirectoryResult, Employee, invalid};

#[allow(clippy::too_many_arguments)]
fn record(
    id: &str,
    name: &str,
    age: i32,
    class: &str,
    subjects: &[&str],
    attendance: f64,
    role: Role,
    email: &str,
    department: &str,
    position: &str,
) -> Employee {
    Employee {
        id: id.into(),
        name: name.into(),
        age,
        class: Some(class.into()),
        subjects: subjects.iter().map(|s| s.to_string()).collect(),
        attendance: Some(attendance),
        role,
        email: Some(email.into()),
        department: Some(department.into()),
        position: Some(position.into()),
    }
}

/// The twelve records the directory starts with when no seed file is configured.
#[rustfmt::skip]
pub fn default_seed() -> Vec<Employee> {
    use Role::{Admin, Employee as Staff};
    vec![
        record("1", "John Doe", 30, "Engineering", &["Math", "Physics", "Computer Science"], 95.5, Admin, "john@example.com", "IT", "Senior Engineer"),
        record("2", "Jane Smith", 28, "Management", &["Business", "Finance", "Marketing"], 92.0, Staff, "jane@example.com", "Sales", "Manager"),
        record("3", "Bob Johnson", 35, "Engineering", &["Chemistry", "Biology", "Math"], 88.5, Staff, "bob@example.com", "Research", "Scientist"),
        record("4", "Alice Williams", 26, "Design", &["Art", "Design", "UX"], 96.0, Staff, "alice@example.com", "Design", "UI Designer"),
        record("5", "Charlie Brown", 32, "Engineering", &["Computer Science", "Math"], 90.5, Staff, "charlie@example.com", "IT", "Software Engineer"),
        record("6", "Diana Prince", 29, "Management", &["HR", "Psychology", "Business"], 94.0, Staff, "diana@example.com", "HR", "HR Manager"),
        record("7", "Eve Martinez", 31, "Engineering", &["Computer Science", "Networks"], 89.0, Staff, "eve@example.com", "IT", "Network Engineer"),
        record("8", "Frank Miller", 33, "Sales", &["Business", "Communication"], 91.5, Staff, "frank@example.com", "Sales", "Sales Executive"),
        record("9", "Grace Lee", 27, "Design", &["Design", "Marketing", "Branding"], 93.5, Staff, "grace@example.com", "Marketing", "Brand Designer"),
        record("10", "Henry Davis", 34, "Engineering", &["Math", "Statistics", "Data Science"], 87.0, Staff, "henry@example.com", "Analytics", "Data Analyst"),
        record("11", "Iris Thompson", 30, "Management", &["Finance", "Accounting"], 95.0, Staff, "iris@example.com", "Finance", "Financial Analyst"),
        record("12", "Jack Wilson", 36, "Engineering", &["Computer Science", "Security"], 92.5, Staff, "jack@example.com", "IT", "Security Engineer"),
    ]
}

/// Parse a JSON array of employee records.
pub fn parse_seed(json: &str) -> DirectoryResult<Vec<Employee>> {
    serde_json::from_str(json).map_err(|err| invalid(format!("invalid seed data: {err}")))
}
