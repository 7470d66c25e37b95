use std::cmp::Ordering;

use crate::Employee;

pub const DEFAULT_PAGE: i32 = 1;
pub const DEFAULT_LIMIT: i32 = 10;
pub const DEFAULT_SORT_FIELD: &str = "name";

/// Attributes a listing can be ordered by.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortField {
    Id,
    Name,
    Age,
    Class,
    Subjects,
    Attendance,
    Role,
    Email,
    Department,
    Position,
}

impl SortField {
    pub const ALL: [SortField; 10] = [
        SortField::Id,
        SortField::Name,
        SortField::Age,
        SortField::Class,
        SortField::Subjects,
        SortField::Attendance,
        SortField::Role,
        SortField::Email,
        SortField::Department,
        SortField::Position,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SortField::Id => "id",
            SortField::Name => "name",
            SortField::Age => "age",
            SortField::Class => "class",
            SortField::Subjects => "subjects",
            SortField::Attendance => "attendance",
            SortField::Role => "role",
            SortField::Email => "email",
            SortField::Department => "department",
            SortField::Position => "position",
        }
    }

    /// Attribute names are matched exactly, the way clients spell them.
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.as_str() == name)
    }

    /// Compare two present values. `None` means one side lacks the attribute.
    fn compare_present(self, a: &Employee, b: &Employee) -> Option<Ordering> {
        fn both<T>(
            a: Option<T>,
            b: Option<T>,
            cmp: impl FnOnce(T, T) -> Ordering,
        ) -> Option<Ordering> {
            Some(cmp(a?, b?))
        }
        match self {
            SortField::Id => Some(a.id.cmp(&b.id)),
            SortField::Name => Some(a.name.cmp(&b.name)),
            SortField::Age => Some(a.age.cmp(&b.age)),
            SortField::Subjects => Some(a.subjects.join(",").cmp(&b.subjects.join(","))),
            SortField::Role => Some(a.role.as_str().cmp(b.role.as_str())),
            SortField::Attendance => both(a.attendance, b.attendance, |x, y| x.total_cmp(&y)),
            SortField::Class => both(a.class.as_deref(), b.class.as_deref(), str::cmp),
            SortField::Email => both(a.email.as_deref(), b.email.as_deref(), str::cmp),
            SortField::Department => {
                both(a.department.as_deref(), b.department.as_deref(), str::cmp)
            }
            SortField::Position => both(a.position.as_deref(), b.position.as_deref(), str::cmp),
        }
    }

    fn is_present(self, employee: &Employee) -> bool {
        match self {
            SortField::Class => employee.class.is_some(),
            SortField::Attendance => employee.attendance.is_some(),
            SortField::Email => employee.email.is_some(),
            SortField::Department => employee.department.is_some(),
            SortField::Position => employee.position.is_some(),
            _ => true,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    /// Anything other than `asc` sorts descending.
    pub fn parse(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("asc") {
            SortOrder::Asc
        } else {
            SortOrder::Desc
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

/// Resolved ordering for a listing. `field == None` keeps insertion order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SortSpec {
    pub field: Option<SortField>,
    pub order: SortOrder,
}

impl Default for SortSpec {
    fn default() -> Self {
        Self {
            field: Some(SortField::Name),
            order: SortOrder::Asc,
        }
    }
}

impl SortSpec {
    pub fn new(field: SortField, order: SortOrder) -> Self {
        Self {
            field: Some(field),
            order,
        }
    }

    pub fn from_params(sort_by: Option<&str>, sort_order: Option<&str>) -> Self {
        Self {
            field: SortField::parse(sort_by.unwrap_or(DEFAULT_SORT_FIELD)),
            order: sort_order.map(SortOrder::parse).unwrap_or_default(),
        }
    }

    /// Records missing the attribute go last in either direction.
    pub fn compare(&self, a: &Employee, b: &Employee) -> Ordering {
        let Some(field) = self.field else {
            return Ordering::Equal;
        };
        match (field.is_present(a), field.is_present(b)) {
            (true, true) => {
                let ordering = field.compare_present(a, b).unwrap_or(Ordering::Equal);
                match self.order {
                    SortOrder::Asc => ordering,
                    SortOrder::Desc => ordering.reverse(),
                }
            }
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            (false, false) => Ordering::Equal,
        }
    }
}

/// Stable in-place sort; equal keys keep their relative order.
pub fn sort_records(records: &mut [Employee], spec: &SortSpec) {
    if spec.field.is_none() {
        return;
    }
    records.sort_by(|a, b| spec.compare(a, b));
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i32,
    pub limit: i32,
    pub sort: SortSpec,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
            sort: SortSpec::default(),
        }
    }
}

impl PageRequest {
    pub fn new(page: i32, limit: i32) -> Self {
        Self {
            page,
            limit,
            ..Self::default()
        }
    }

    pub fn sorted_by(mut self, sort: SortSpec) -> Self {
        self.sort = sort;
        self
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total_pages: i32,
    pub current_page: i32,
    pub total_items: usize,
}

/// Slice `records` into the requested page.
///
/// Pages are 1-based. A page before the first or past the last is empty, and
/// a non-positive `limit` yields an empty page with zero total pages. The
/// requested page number is echoed back unclamped.
pub fn paginate<T>(records: Vec<T>, page: i32, limit: i32) -> Page<T> {
    let total_items = records.len();
    if limit <= 0 {
        return Page {
            items: Vec::new(),
            total_pages: 0,
            current_page: page,
            total_items,
        };
    }

    let limit = limit as usize;
    let total_pages = i32::try_from(total_items.div_ceil(limit)).unwrap_or(i32::MAX);
    let offset = usize::try_from(page)
        .ok()
        .and_then(|page| page.checked_sub(1))
        .and_then(|index| index.checked_mul(limit));
    let items = match offset {
        Some(offset) if offset < total_items => {
            records.into_iter().skip(offset).take(limit).collect()
        }
        _ => Vec::new(),
    };

    Page {
        items,
        total_pages,
        current_page: page,
        total_items,
    }
}
