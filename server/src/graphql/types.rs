use async_graphql::{Enum, ID, Object, SimpleObject};
use platform_authz::Role;
use products_directory::{Employee, Page};

#[derive(Enum, Copy, Clone, Debug, Eq, PartialEq)]
#[graphql(name = "Role")]
pub enum RoleValue {
    Admin,
    Employee,
}

impl From<Role> for RoleValue {
    fn from(value: Role) -> Self {
        match value {
            Role::Admin => RoleValue::Admin,
            Role::Employee => RoleValue::Employee,
        }
    }
}

#[derive(Clone, Debug, SimpleObject)]
#[graphql(name = "Employee")]
pub struct EmployeeNode {
    pub id: ID,
    pub name: String,
    pub age: i32,
    pub class: Option<String>,
    pub subjects: Vec<String>,
    pub attendance: Option<f64>,
    pub role: RoleValue,
    pub email: Option<String>,
    pub department: Option<String>,
    pub position: Option<String>,
}

impl From<Employee> for EmployeeNode {
    fn from(model: Employee) -> Self {
        Self {
            id: ID::from(model.id),
            name: model.name,
            age: model.age,
            class: model.class,
            subjects: model.subjects,
            attendance: model.attendance,
            role: model.role.into(),
            email: model.email,
            department: model.department,
            position: model.position,
        }
    }
}

pub struct EmployeePage {
    items: Vec<EmployeeNode>,
    total_pages: i32,
    current_page: i32,
    total_items: i32,
}

#[Object]
impl EmployeePage {
    async fn items(&self) -> &Vec<EmployeeNode> {
        &self.items
    }

    #[graphql(deprecation = "Use `items`.")]
    async fn employees(&self) -> &Vec<EmployeeNode> {
        &self.items
    }

    async fn total_pages(&self) -> i32 {
        self.total_pages
    }

    async fn current_page(&self) -> i32 {
        self.current_page
    }

    async fn total_items(&self) -> i32 {
        self.total_items
    }
}

impl From<Page<Employee>> for EmployeePage {
    fn from(page: Page<Employee>) -> Self {
        Self {
            items: page.items.into_iter().map(EmployeeNode::from).collect(),
            total_pages: page.total_pages,
            current_page: page.current_page,
            total_items: i32::try_from(page.total_items).unwrap_or(i32::MAX),
        }
    }
}
