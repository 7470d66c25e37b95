mod types;

use std::sync::Arc;

use async_graphql::{
    Context, EmptySubscription, ErrorExtensions, ID, MaybeUndefined, Object, Schema,
};
use platform_api::{ApiError, internal_error};
use platform_authz::Caller;
use products_directory::{
    DEFAULT_LIMIT, DEFAULT_PAGE, DELETE_CONFIRMATION, DirectoryError, DirectoryService,
    EmployeePatch, NewEmployee, PageRequest, SortSpec,
};
use tracing::instrument;

pub use types::{EmployeeNode, EmployeePage};

pub type SchemaType = Schema<QueryRoot, MutationRoot, EmptySubscription>;

pub fn build_schema(service: Arc<DirectoryService>) -> SchemaType {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(service)
        .finish()
}

#[derive(Default)]
pub struct QueryRoot;

#[derive(Default)]
pub struct MutationRoot;

#[Object]
impl QueryRoot {
    #[instrument(name = "graphql.listEmployees", skip_all)]
    async fn list_employees(
        &self,
        ctx: &Context<'_>,
        page: Option<i32>,
        limit: Option<i32>,
        sort_by: Option<String>,
        sort_order: Option<String>,
    ) -> async_graphql::Result<EmployeePage> {
        list_page(ctx, page, limit, sort_by, sort_order).await
    }

    #[instrument(name = "graphql.getEmployee", skip_all)]
    async fn get_employee(
        &self,
        ctx: &Context<'_>,
        id: ID,
    ) -> async_graphql::Result<Option<EmployeeNode>> {
        find_employee(ctx, id).await
    }

    #[graphql(deprecation = "Use `listEmployees`.")]
    #[instrument(name = "graphql.employees", skip_all)]
    async fn employees(
        &self,
        ctx: &Context<'_>,
        page: Option<i32>,
        limit: Option<i32>,
        sort_by: Option<String>,
        sort_order: Option<String>,
    ) -> async_graphql::Result<EmployeePage> {
        list_page(ctx, page, limit, sort_by, sort_order).await
    }

    #[graphql(deprecation = "Use `getEmployee`.")]
    #[instrument(name = "graphql.employee", skip_all)]
    async fn employee(
        &self,
        ctx: &Context<'_>,
        id: ID,
    ) -> async_graphql::Result<Option<EmployeeNode>> {
        find_employee(ctx, id).await
    }
}

#[Object]
impl MutationRoot {
    #[instrument(name = "graphql.createEmployee", skip_all)]
    async fn create_employee(
        &self,
        ctx: &Context<'_>,
        name: String,
        age: i32,
        class: Option<String>,
        subjects: Option<Vec<Option<String>>>,
        attendance: Option<f64>,
    ) -> async_graphql::Result<EmployeeNode> {
        let input = NewEmployee {
            name,
            age,
            class,
            subjects: subjects.map(subject_list).unwrap_or_default(),
            attendance,
        };
        create(ctx, input).await
    }

    #[graphql(deprecation = "Use `createEmployee`.")]
    #[instrument(name = "graphql.addEmployee", skip_all)]
    async fn add_employee(
        &self,
        ctx: &Context<'_>,
        name: String,
        age: i32,
        class: Option<String>,
        subjects: Option<Vec<Option<String>>>,
        attendance: Option<f64>,
    ) -> async_graphql::Result<EmployeeNode> {
        let input = NewEmployee {
            name,
            age,
            class,
            subjects: subjects.map(subject_list).unwrap_or_default(),
            attendance,
        };
        create(ctx, input).await
    }

    /// Omitted arguments keep their stored value; `null` clears nullable fields.
    #[instrument(name = "graphql.updateEmployee", skip_all)]
    async fn update_employee(
        &self,
        ctx: &Context<'_>,
        id: ID,
        name: MaybeUndefined<String>,
        age: MaybeUndefined<i32>,
        class: MaybeUndefined<String>,
        subjects: MaybeUndefined<Vec<Option<String>>>,
        attendance: MaybeUndefined<f64>,
    ) -> async_graphql::Result<EmployeeNode> {
        let patch = EmployeePatch {
            name: required("name", name)?,
            age: required("age", age)?,
            class: nullable(class),
            subjects: nullable(subjects).map(|list| list.map(subject_list).unwrap_or_default()),
            attendance: nullable(attendance),
        };
        let service = directory(ctx)?;
        let employee = service
            .update(&caller(ctx), id.as_str(), patch)
            .await
            .map_err(directory_error)?;
        Ok(employee.into())
    }

    #[instrument(name = "graphql.deleteEmployee", skip_all)]
    async fn delete_employee(&self, ctx: &Context<'_>, id: ID) -> async_graphql::Result<String> {
        let service = directory(ctx)?;
        service
            .delete(&caller(ctx), id.as_str())
            .await
            .map_err(directory_error)?;
        Ok(DELETE_CONFIRMATION.to_string())
    }
}

async fn list_page(
    ctx: &Context<'_>,
    page: Option<i32>,
    limit: Option<i32>,
    sort_by: Option<String>,
    sort_order: Option<String>,
) -> async_graphql::Result<EmployeePage> {
    let service = directory(ctx)?;
    let request = PageRequest::new(page.unwrap_or(DEFAULT_PAGE), limit.unwrap_or(DEFAULT_LIMIT))
        .sorted_by(SortSpec::from_params(
            sort_by.as_deref(),
            sort_order.as_deref(),
        ));
    let page = service.list(&request).await.map_err(directory_error)?;
    Ok(page.into())
}

async fn find_employee(ctx: &Context<'_>, id: ID) -> async_graphql::Result<Option<EmployeeNode>> {
    let service = directory(ctx)?;
    let record = service.get(id.as_str()).await.map_err(directory_error)?;
    Ok(record.map(EmployeeNode::from))
}

async fn create(ctx: &Context<'_>, input: NewEmployee) -> async_graphql::Result<EmployeeNode> {
    let service = directory(ctx)?;
    let employee = service
        .create(&caller(ctx), input)
        .await
        .map_err(directory_error)?;
    Ok(employee.into())
}

fn directory(ctx: &Context<'_>) -> async_graphql::Result<Arc<DirectoryService>> {
    ctx.data::<Arc<DirectoryService>>()
        .cloned()
        .map_err(|_| internal_error(anyhow::anyhow!("directory service missing from schema data")))
}

/// Requests without a resolved caller are treated as least privileged.
fn caller(ctx: &Context<'_>) -> Caller {
    ctx.data_opt::<Caller>().cloned().unwrap_or_default()
}

fn directory_error(err: DirectoryError) -> async_graphql::Error {
    let api = match err {
        DirectoryError::PermissionDenied(_) => ApiError::Forbidden,
        DirectoryError::NotFound(_) => ApiError::not_found("Employee"),
        DirectoryError::InvalidArgument(message) => ApiError::InvalidInput(message),
        DirectoryError::Storage(inner) => ApiError::internal(inner),
    };
    api.extend()
}

fn required<T>(field: &str, value: MaybeUndefined<T>) -> async_graphql::Result<Option<T>> {
    match value {
        MaybeUndefined::Undefined => Ok(None),
        MaybeUndefined::Null => {
            Err(ApiError::InvalidInput(format!("{field} cannot be null")).extend())
        }
        MaybeUndefined::Value(value) => Ok(Some(value)),
    }
}

/// Subject lists accept null entries; they are dropped.
fn subject_list(values: Vec<Option<String>>) -> Vec<String> {
    values.into_iter().flatten().collect()
}

fn nullable<T>(value: MaybeUndefined<T>) -> Option<Option<T>> {
    match value {
        MaybeUndefined::Undefined => None,
        MaybeUndefined::Null => Some(None),
        MaybeUndefined::Value(value) => Some(Some(value)),
    }
}
