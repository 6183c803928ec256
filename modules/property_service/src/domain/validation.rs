//! Payload checks for properties, units and leases

use crate::contract::{LeaseDraft, PropertyDraft, PropertyType, UnitDraft};
use idgm_kit::{validation::is_valid_email, FieldError};
use rust_decimal::Decimal;

pub fn validate_property(draft: &PropertyDraft) -> Result<PropertyType, Vec<FieldError>> {
    let mut errors: Vec<FieldError> = [
        ("title", &draft.title),
        ("address", &draft.address),
        ("city", &draft.city),
        ("state", &draft.state),
    ]
    .into_iter()
    .filter(|(_, value)| value.trim().is_empty())
    .map(|(field, _)| FieldError::new(field, "must not be empty"))
    .collect();

    let property_type = PropertyType::parse(&draft.property_type);
    if property_type.is_none() {
        errors.push(FieldError::new(
            "type",
            format!("must be one of {}", PropertyType::VALUES),
        ));
    }

    match property_type {
        Some(property_type) if errors.is_empty() => Ok(property_type),
        _ => Err(errors),
    }
}

pub fn validate_unit(draft: &UnitDraft) -> Vec<FieldError> {
    let mut errors = Vec::new();
    if draft.label.trim().is_empty() {
        errors.push(FieldError::new("label", "must not be empty"));
    }
    if draft.bedrooms < 0 {
        errors.push(FieldError::new("bedrooms", "must not be negative"));
    }
    if draft.bathrooms < 0 {
        errors.push(FieldError::new("bathrooms", "must not be negative"));
    }
    if draft.monthly_rent <= Decimal::ZERO {
        errors.push(FieldError::new("monthlyRent", "must be greater than 0"));
    }
    errors
}

pub fn validate_lease(draft: &LeaseDraft) -> Vec<FieldError> {
    let mut errors = Vec::new();
    if draft.tenant_name.trim().is_empty() {
        errors.push(FieldError::new("tenantName", "must not be empty"));
    }
    if !is_valid_email(draft.tenant_email.trim()) {
        errors.push(FieldError::new("tenantEmail", "must be a valid email address"));
    }
    if draft.start_date >= draft.end_date {
        errors.push(FieldError::new("endDate", "must be after startDate"));
    }
    if draft.monthly_rent.is_some_and(|rent| rent <= Decimal::ZERO) {
        errors.push(FieldError::new("monthlyRent", "must be greater than 0"));
    }
    errors
}
