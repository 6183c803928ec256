//! HTTP request handlers - thin layer that delegates to domain service

pub mod admin;
pub mod cart;
pub mod catalog;
pub mod orders;
pub mod payments;
pub mod wishlist;

use idgm_kit::{FieldError, PageRequest, Problem};
use uuid::Uuid;

/// Upper bound applied to every `limit` query parameter
#[derive(Debug, Clone, Copy)]
pub struct PagingPolicy {
    pub max_page_size: u64,
}

impl PagingPolicy {
    pub fn page(&self, page: Option<u64>, limit: Option<u64>) -> PageRequest {
        PageRequest::new(page, limit, self.max_page_size)
    }
}

fn invalid(field: &str, message: impl Into<String>) -> Problem {
    Problem::validation(vec![FieldError::new(field, message)])
}

/// Required UUID query parameter
fn required_uuid(field: &str, raw: Option<&str>) -> Result<Uuid, Problem> {
    let raw = raw
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| invalid(field, "is required"))?;
    Uuid::parse_str(raw).map_err(|_| invalid(field, "must be a valid UUID"))
}

/// Optional enum-like query parameter; blank counts as absent
fn optional<T>(
    field: &str,
    raw: Option<&str>,
    parse: impl Fn(&str) -> Option<T>,
    accepted: &str,
) -> Result<Option<T>, Problem> {
    match raw.map(str::trim).filter(|v| !v.is_empty()) {
        Some(value) => parse(value)
            .map(Some)
            .ok_or_else(|| invalid(field, format!("must be one of {}", accepted))),
        None => Ok(None),
    }
}
