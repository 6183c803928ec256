//! SeaORM repository implementations

mod cart;
mod catalog;
mod orders;
mod payments;

pub use cart::{SeaOrmCartRepository, SeaOrmWishlistRepository};
pub use catalog::SeaOrmProductRepository;
pub use orders::SeaOrmOrderRepository;
pub use payments::SeaOrmPaymentRepository;

/// `%term%` for a case-insensitive LIKE, or `None` for a blank search
fn like_pattern(search: Option<&str>) -> Option<String> {
    search
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| format!("%{}%", s.to_lowercase()))
}
