//! Contract layer - transport-agnostic models and errors

pub mod error;
pub mod model;

pub use error::PropertyError;
pub use model::{
    Lease, LeaseDraft, LeaseFilter, LeaseStatus, Property, PropertyDetail, PropertyDraft,
    PropertyFilter, PropertySummary, PropertyType, Unit, UnitDraft, UnitOccupancy,
};
