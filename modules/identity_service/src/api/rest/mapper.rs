//! Mapper implementations for converting between DTOs and contract models

use super::dto::*;
use crate::contract;

impl From<contract::User> for UserDto {
    fn from(user: contract::User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
            role: user.role.as_str().to_string(),
            created_at: user.created_at,
        }
    }
}
