//! Mapper implementations for converting between DTOs and contract models

use super::dto::*;
use crate::contract::{
    Lease, LeaseDraft, Property, PropertyDetail, PropertyDraft, PropertySummary, UnitDraft,
    UnitOccupancy,
};

impl PropertyDto {
    fn with_counts(p: Property, unit_count: u64, occupied_units: u64) -> Self {
        Self {
            id: p.id,
            title: p.title,
            description: p.description,
            property_type: p.property_type.as_str().to_string(),
            address: p.address,
            city: p.city,
            state: p.state,
            unit_count,
            occupied_units,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

impl From<PropertySummary> for PropertyDto {
    fn from(s: PropertySummary) -> Self {
        Self::with_counts(s.property, s.unit_count, s.occupied_units)
    }
}

/// A freshly written property has no units yet
impl From<Property> for PropertyDto {
    fn from(p: Property) -> Self {
        Self::with_counts(p, 0, 0)
    }
}

impl From<PropertyDetail> for PropertyDetailDto {
    fn from(d: PropertyDetail) -> Self {
        let unit_count = d.units.len() as u64;
        let occupied_units = d.units.iter().filter(|u| u.occupied()).count() as u64;
        Self {
            property: PropertyDto::with_counts(d.property, unit_count, occupied_units),
            units: d.units.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<UnitOccupancy> for UnitDto {
    fn from(o: UnitOccupancy) -> Self {
        Self {
            occupied: o.occupied(),
            active_lease_id: o.active_lease_id,
            id: o.unit.id,
            property_id: o.unit.property_id,
            label: o.unit.label,
            bedrooms: o.unit.bedrooms,
            bathrooms: o.unit.bathrooms,
            monthly_rent: o.unit.monthly_rent,
            created_at: o.unit.created_at,
        }
    }
}

impl From<Lease> for LeaseDto {
    fn from(l: Lease) -> Self {
        Self {
            id: l.id,
            unit_id: l.unit_id,
            tenant_name: l.tenant_name,
            tenant_email: l.tenant_email,
            start_date: l.start_date,
            end_date: l.end_date,
            monthly_rent: l.monthly_rent,
            status: l.status.as_str().to_string(),
            created_at: l.created_at,
            updated_at: l.updated_at,
        }
    }
}

impl From<PropertyRequest> for PropertyDraft {
    fn from(req: PropertyRequest) -> Self {
        Self {
            title: req.title,
            description: req.description,
            property_type: req.property_type,
            address: req.address,
            city: req.city,
            state: req.state,
        }
    }
}

impl From<UnitRequest> for UnitDraft {
    fn from(req: UnitRequest) -> Self {
        Self {
            label: req.label,
            bedrooms: req.bedrooms,
            bathrooms: req.bathrooms,
            monthly_rent: req.monthly_rent,
        }
    }
}

impl From<LeaseRequest> for LeaseDraft {
    fn from(req: LeaseRequest) -> Self {
        Self {
            unit_id: req.unit_id,
            tenant_name: req.tenant_name,
            tenant_email: req.tenant_email,
            start_date: req.start_date,
            end_date: req.end_date,
            monthly_rent: req.monthly_rent,
        }
    }
}
