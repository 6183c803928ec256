//! Entity to model mappers

use super::entity::{lease, property, unit};
use crate::contract::{Lease, LeaseStatus, Property, PropertyType, Unit};
use anyhow::anyhow;
use sea_orm::ActiveValue::Set;

impl TryFrom<property::Model> for Property {
    type Error = anyhow::Error;

    fn try_from(e: property::Model) -> Result<Self, Self::Error> {
        let property_type = PropertyType::parse(&e.property_type).ok_or_else(|| {
            anyhow!("Unknown type '{}' for property {}", e.property_type, e.id)
        })?;

        Ok(Self {
            id: e.id,
            title: e.title,
            description: e.description,
            property_type,
            address: e.address,
            city: e.city,
            state: e.state,
            created_at: e.created_at,
            updated_at: e.updated_at,
        })
    }
}

impl From<&Property> for property::ActiveModel {
    fn from(m: &Property) -> Self {
        Self {
            id: Set(m.id),
            title: Set(m.title.clone()),
            description: Set(m.description.clone()),
            property_type: Set(m.property_type.as_str().to_string()),
            address: Set(m.address.clone()),
            city: Set(m.city.clone()),
            state: Set(m.state.clone()),
            created_at: Set(m.created_at),
            updated_at: Set(m.updated_at),
        }
    }
}

impl From<unit::Model> for Unit {
    fn from(e: unit::Model) -> Self {
        Self {
            id: e.id,
            property_id: e.property_id,
            label: e.label,
            bedrooms: e.bedrooms,
            bathrooms: e.bathrooms,
            monthly_rent: e.monthly_rent,
            created_at: e.created_at,
        }
    }
}

impl From<&Unit> for unit::ActiveModel {
    fn from(m: &Unit) -> Self {
        Self {
            id: Set(m.id),
            property_id: Set(m.property_id),
            label: Set(m.label.clone()),
            bedrooms: Set(m.bedrooms),
            bathrooms: Set(m.bathrooms),
            monthly_rent: Set(m.monthly_rent),
            created_at: Set(m.created_at),
        }
    }
}

impl TryFrom<lease::Model> for Lease {
    type Error = anyhow::Error;

    fn try_from(e: lease::Model) -> Result<Self, Self::Error> {
        let status = LeaseStatus::parse(&e.status)
            .ok_or_else(|| anyhow!("Unknown status '{}' for lease {}", e.status, e.id))?;

        Ok(Self {
            id: e.id,
            unit_id: e.unit_id,
            tenant_name: e.tenant_name,
            tenant_email: e.tenant_email,
            start_date: e.start_date,
            end_date: e.end_date,
            monthly_rent: e.monthly_rent,
            status,
            created_at: e.created_at,
            updated_at: e.updated_at,
        })
    }
}

impl From<&Lease> for lease::ActiveModel {
    fn from(m: &Lease) -> Self {
        Self {
            id: Set(m.id),
            unit_id: Set(m.unit_id),
            tenant_name: Set(m.tenant_name.clone()),
            tenant_email: Set(m.tenant_email.clone()),
            start_date: Set(m.start_date),
            end_date: Set(m.end_date),
            monthly_rent: Set(m.monthly_rent),
            status: Set(m.status.as_str().to_string()),
            created_at: Set(m.created_at),
            updated_at: Set(m.updated_at),
        }
    }
}
