//! Paged, sorted listing driven by a DataFilter
//!
//! The registry's predicates are ANDed into
//! `SELECT id FROM <table> <root> WHERE ... ORDER BY ... LIMIT ? OFFSET ?`;
//! a second query counts the full result.

use idmq_core::model::{fields, EntityType};
use idmq_core::{log_op_end, log_op_error, log_op_start};
use idmq_core::{DataFilter, FilterRegistry, QueryScope};
use rusqlite::Connection;
use serde::Serialize;
use uuid::Uuid;

use crate::errors::{corrupt_id, from_filter, from_rusqlite, invalid_page, Result};
use crate::sql::SqlFragment;

/// Largest accepted page size
pub const MAX_PAGE_SIZE: u32 = 1000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortOrder {
    pub field: String,
    pub descending: bool,
}

impl SortOrder {
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            descending: false,
        }
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            descending: true,
        }
    }
}

/// Zero-based page request; rows are always tie-broken by id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub size: u32,
    pub sort: Vec<SortOrder>,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 0,
            size: 20,
            sort: Vec::new(),
        }
    }
}

impl PageRequest {
    pub fn new(page: u32, size: u32) -> Self {
        Self {
            page,
            size,
            sort: Vec::new(),
        }
    }

    pub fn sorted_by(mut self, order: SortOrder) -> Self {
        self.sort.push(order);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page {
    pub ids: Vec<Uuid>,
    pub total: u64,
    pub page: u32,
    pub size: u32,
}

/// List ids of `entity_type` matching `filter`, evaluated as of today
pub fn search(
    conn: &Connection,
    registry: &FilterRegistry,
    entity_type: EntityType,
    filter: Option<&DataFilter>,
    page: &PageRequest,
) -> Result<Page> {
    search_in(conn, registry, QueryScope::new(entity_type), filter, page)
}

/// List ids matching `filter` within an explicit scope (fixed reference date)
pub fn search_in(
    conn: &Connection,
    registry: &FilterRegistry,
    scope: QueryScope,
    filter: Option<&DataFilter>,
    page: &PageRequest,
) -> Result<Page> {
    log_op_start!(
        "search",
        entity_type = %scope.entity_type(),
        page = page.page,
        size = page.size
    );
    let start = std::time::Instant::now();

    let result = search_impl(conn, registry, scope, filter, page).map_err(|e| {
        log_op_error!(
            "search",
            e.clone(),
            duration_ms = start.elapsed().as_millis() as u64
        );
        e
    })?;

    log_op_end!(
        "search",
        duration_ms = start.elapsed().as_millis() as u64,
        total = result.total
    );
    Ok(result)
}

fn search_impl(
    conn: &Connection,
    registry: &FilterRegistry,
    mut scope: QueryScope,
    filter: Option<&DataFilter>,
    page: &PageRequest,
) -> Result<Page> {
    let entity_type = scope.entity_type();
    let order_by = order_by(&scope, page)?;
    let predicates = registry
        .to_predicates(&mut scope, filter)
        .map_err(|e| from_filter("search", e))?;
    let condition = SqlFragment::conjunction(&predicates);
    let root = scope.root();
    let from = format!("FROM {} {} WHERE {}", entity_type.table(), root, condition.sql);

    let total: i64 = conn
        .query_row(
            &format!("SELECT COUNT(*) {}", from),
            rusqlite::params_from_iter(condition.params.iter()),
            |row| row.get(0),
        )
        .map_err(from_rusqlite)?;

    let sql = format!(
        "SELECT {}.{} {} ORDER BY {} LIMIT ? OFFSET ?",
        root,
        fields::ID,
        from,
        order_by
    );
    tracing::debug!(sql = %sql, param_count = condition.params.len(), "listing query rendered");

    let mut params = condition.params;
    params.push(rusqlite::types::Value::Integer(i64::from(page.size)));
    params.push(rusqlite::types::Value::Integer(
        i64::from(page.page) * i64::from(page.size),
    ));

    let mut stmt = conn.prepare(&sql).map_err(from_rusqlite)?;
    let raw = stmt
        .query_map(rusqlite::params_from_iter(params), |row| row.get::<_, String>(0))
        .map_err(from_rusqlite)?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(from_rusqlite)?;
    let ids = raw
        .iter()
        .map(|id| Uuid::parse_str(id).map_err(|_| corrupt_id(entity_type.as_str(), id)))
        .collect::<Result<Vec<_>>>()?;

    Ok(Page {
        ids,
        total: total.max(0) as u64,
        page: page.page,
        size: page.size,
    })
}

fn order_by(scope: &QueryScope, page: &PageRequest) -> Result<String> {
    let entity_type = scope.entity_type();
    if page.size == 0 || page.size > MAX_PAGE_SIZE {
        return Err(invalid_page(
            entity_type.as_str(),
            &format!("page size must be between 1 and {}", MAX_PAGE_SIZE),
        ));
    }

    let root = scope.root();
    let mut terms = Vec::with_capacity(page.sort.len() + 1);
    for order in &page.sort {
        let Some(field) = entity_type
            .sortable_fields()
            .iter()
            .find(|f| **f == order.field)
        else {
            return Err(invalid_page(
                entity_type.as_str(),
                &format!("cannot sort {} by '{}'", entity_type, order.field),
            ));
        };
        let direction = if order.descending { "DESC" } else { "ASC" };
        terms.push(format!("{}.{} {}", root, field, direction));
    }
    if !page.sort.iter().any(|o| o.field == fields::ID) {
        terms.push(format!("{}.{} ASC", root, fields::ID));
    }
    Ok(terms.join(", "))
}
