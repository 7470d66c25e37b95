use platform_authz::Role;
use serde::{Deserialize, Serialize};

use crate::{DirectoryResult, invalid};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub id: String,
    pub name: String,
    pub age: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
    #[serde(default)]
    pub subjects: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attendance: Option<f64>,
    #[serde(default)]
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
}

impl Employee {
    /// Materialize a create request. Role is always [`Role::Employee`].
    pub(crate) fn from_new(id: String, input: NewEmployee) -> Self {
        Self {
            id,
            name: input.name,
            age: input.age,
            class: input.class,
            subjects: input.subjects,
            attendance: input.attendance,
            role: Role::Employee,
            email: None,
            department: None,
            position: None,
        }
    }
}

/// Fields accepted by the create operation.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NewEmployee {
    pub name: String,
    pub age: i32,
    pub class: Option<String>,
    pub subjects: Vec<String>,
    pub attendance: Option<f64>,
}

impl NewEmployee {
    pub fn new(name: impl Into<String>, age: i32) -> Self {
        Self {
            name: name.into(),
            age,
            ..Self::default()
        }
    }

    pub(crate) fn validated(mut self, strict: bool) -> DirectoryResult<Self> {
        self.name = normalize_name(&self.name)?;
        if strict {
            check_age(self.age)?;
            check_attendance(self.attendance)?;
        }
        Ok(self)
    }
}

/// Partial update. `None` leaves a field untouched; for nullable fields
/// `Some(None)` clears the stored value.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EmployeePatch {
    pub name: Option<String>,
    pub age: Option<i32>,
    pub class: Option<Option<String>>,
    pub subjects: Option<Vec<String>>,
    pub attendance: Option<Option<f64>>,
}

impl EmployeePatch {
    pub(crate) fn validated(mut self, strict: bool) -> DirectoryResult<Self> {
        if let Some(name) = &self.name {
            self.name = Some(normalize_name(name)?);
        }
        if strict {
            if let Some(age) = self.age {
                check_age(age)?;
            }
            if let Some(attendance) = self.attendance {
                check_attendance(attendance)?;
            }
        }
        Ok(self)
    }

    /// Merge into `employee`. Identity, role and seed-only fields stay as they are.
    pub fn apply_to(&self, employee: &mut Employee) {
        if let Some(name) = &self.name {
            employee.name = name.clone();
        }
        if let Some(age) = self.age {
            employee.age = age;
        }
        if let Some(class) = &self.class {
            employee.class = class.clone();
        }
        if let Some(subjects) = &self.subjects {
            employee.subjects = subjects.clone();
        }
        if let Some(attendance) = self.attendance {
            employee.attendance = attendance;
        }
    }
}

fn normalize_name(value: &str) -> DirectoryResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(invalid("name must not be empty"));
    }
    Ok(trimmed.to_string())
}

fn check_age(age: i32) -> DirectoryResult<()> {
    if age < 0 {
        return Err(invalid("age must not be negative"));
    }
    Ok(())
}

fn check_attendance(attendance: Option<f64>) -> DirectoryResult<()> {
    match attendance {
        Some(value) if !(0.0..=100.0).contains(&value) => {
            Err(invalid("attendance must be between 0 and 100"))
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DirectoryError;

    fn sample() -> Employee {
        Employee {
            id: "7".into(),
            name: "Eve Martinez".into(),
            age: 31,
            class: Some("Engineering".into()),
            subjects: vec!["Networks".into()],
            attendance: Some(89.0),
            role: Role::Employee,
            email: Some("eve@example.com".into()),
            department: Some("IT".into()),
            position: Some("Network Engineer".into()),
        }
    }

    #[test]
    fn patch_only_touches_present_fields() {
        let mut employee = sample();
        let patch = EmployeePatch {
            age: Some(99),
            ..EmployeePatch::default()
        };
        patch.apply_to(&mut employee);
        assert_eq!(employee, Employee { age: 99, ..sample() });
    }

    #[test]
    fn explicit_null_clears_nullable_fields() {
        let mut employee = sample();
        let patch = EmployeePatch {
            class: Some(None),
            attendance: Some(None),
            subjects: Some(Vec::new()),
            ..EmployeePatch::default()
        };
        patch.apply_to(&mut employee);
        assert_eq!(employee.class, None);
        assert_eq!(employee.attendance, None);
        assert!(employee.subjects.is_empty());
        assert_eq!(employee.email.as_deref(), Some("eve@example.com"));
    }

    #[test]
    fn names_are_trimmed_and_required() {
        let input = NewEmployee::new("  Kim Park ", 40).validated(false).unwrap();
        assert_eq!(input.name, "Kim Park");

        let err = NewEmployee::new("   ", 40).validated(false).unwrap_err();
        assert!(matches!(err, DirectoryError::InvalidArgument(_)));

        let patch = EmployeePatch {
            name: Some(String::new()),
            ..EmployeePatch::default()
        };
        assert!(patch.validated(false).is_err());
    }

    #[test]
    fn ranges_are_only_checked_when_strict() {
        let input = NewEmployee {
            attendance: Some(140.0),
            ..NewEmployee::new("Kim Park", -1)
        };
        assert!(input.clone().validated(false).is_ok());
        assert!(input.validated(true).is_err());

        let patch = EmployeePatch {
            attendance: Some(Some(f64::NAN)),
            ..EmployeePatch::default()
        };
        assert!(patch.clone().validated(false).is_ok());
        assert!(patch.validated(true).is_err());
    }
}
