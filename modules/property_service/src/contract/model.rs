use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use std::fmt;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertyType {
    Apartment,
    House,
    Commercial,
    Land,
}

impl PropertyType {
    pub const ALL: [PropertyType; 4] = [
        Self::Apartment,
        Self::House,
        Self::Commercial,
        Self::Land,
    ];

    pub const VALUES: &'static str = "APARTMENT, HOUSE, COMMERCIAL, LAND";

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Apartment => "APARTMENT",
            Self::House => "HOUSE",
            Self::Commercial => "COMMERCIAL",
            Self::Land => "LAND",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim().to_ascii_uppercase();
        Self::ALL.into_iter().find(|t| t.as_str() == raw)
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub property_type: PropertyType,
    pub address: String,
    pub city: String,
    pub state: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Editable property fields, shared by create and full update
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyDraft {
    pub title: String,
    pub description: String,
    /// Raw wire value, checked by validation
    pub property_type: String,
    pub address: String,
    pub city: String,
    pub state: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Unit {
    pub id: Uuid,
    pub property_id: Uuid,
    pub label: String,
    pub bedrooms: i32,
    pub bathrooms: i32,
    pub monthly_rent: Decimal,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnitDraft {
    pub label: String,
    pub bedrooms: i32,
    pub bathrooms: i32,
    pub monthly_rent: Decimal,
}

/// Unit with its derived occupancy
#[derive(Debug, Clone, PartialEq)]
pub struct UnitOccupancy {
    pub unit: Unit,
    pub active_lease_id: Option<Uuid>,
}

impl UnitOccupancy {
    pub fn occupied(&self) -> bool {
        self.active_lease_id.is_some()
    }
}

/// Listing row
#[derive(Debug, Clone, PartialEq)]
pub struct PropertySummary {
    pub property: Property,
    pub unit_count: u64,
    pub occupied_units: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PropertyDetail {
    pub property: Property,
    pub units: Vec<UnitOccupancy>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertyFilter {
    pub city: Option<String>,
    pub property_type: Option<PropertyType>,
    /// Matches title, description or address
    pub search: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LeaseStatus {
    Active,
    Ended,
    Terminated,
}

impl LeaseStatus {
    pub const VALUES: &'static str = "ACTIVE, ENDED, TERMINATED";

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::Ended => "ENDED",
            Self::Terminated => "TERMINATED",
        }
    }

    /// Exact, case-sensitive match against the wire values
    pub fn parse(raw: &str) -> Option<Self> {
        [Self::Active, Self::Ended, Self::Terminated]
            .into_iter()
            .find(|s| s.as_str() == raw)
    }

    /// ACTIVE may close as ENDED or TERMINATED; closed leases never change
    pub fn can_transition_to(&self, next: LeaseStatus) -> bool {
        matches!(
            (self, next),
            (Self::Active, Self::Ended) | (Self::Active, Self::Terminated)
        )
    }
}

impl fmt::Display for LeaseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Lease {
    pub id: Uuid,
    pub unit_id: Uuid,
    pub tenant_name: String,
    pub tenant_email: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub monthly_rent: Decimal,
    pub status: LeaseStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LeaseDraft {
    pub unit_id: Uuid,
    pub tenant_name: String,
    pub tenant_email: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Defaults to the unit's rent
    pub monthly_rent: Option<Decimal>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LeaseFilter {
    pub status: Option<LeaseStatus>,
    pub unit_id: Option<Uuid>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_property_type_tokens() {
        assert_eq!(PropertyType::parse("apartment"), Some(PropertyType::Apartment));
        assert_eq!(PropertyType::parse(" LAND "), Some(PropertyType::Land));
        assert_eq!(PropertyType::parse("villa"), None);
    }

    #[test]
    fn test_lease_transitions_only_leave_active() {
        use LeaseStatus::*;

        assert!(Active.can_transition_to(Ended));
        assert!(Active.can_transition_to(Terminated));
        assert!(!Active.can_transition_to(Active));
        assert!(!Ended.can_transition_to(Terminated));
        assert!(!Terminated.can_transition_to(Active));
    }

    #[test]
    fn test_lease_status_is_case_sensitive() {
        assert_eq!(LeaseStatus::parse("ENDED"), Some(LeaseStatus::Ended));
        assert_eq!(LeaseStatus::parse("ended"), None);
    }
}
