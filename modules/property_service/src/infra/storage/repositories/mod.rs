//! SeaORM repository implementations

mod lease;
mod property;

pub use lease::SeaOrmLeaseRepository;
pub use property::{SeaOrmPropertyRepository, SeaOrmUnitRepository};
