//! Entity to model mappers

use super::entity;
use crate::contract::{Session, User};
use idgm_kit::Role;

// ===== User Conversions =====

impl TryFrom<entity::Model> for User {
    type Error = anyhow::Error;

    fn try_from(entity: entity::Model) -> Result<Self, Self::Error> {
        let role = Role::parse(&entity.role)
            .ok_or_else(|| anyhow::anyhow!("Unknown role '{}' for user {}", entity.role, entity.id))?;

        Ok(Self {
            id: entity.id,
            email: entity.email,
            name: entity.name,
            role,
            password_hash: entity.password_hash,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        })
    }
}

impl From<&User> for entity::ActiveModel {
    fn from(model: &User) -> Self {
        use sea_orm::ActiveValue::*;

        Self {
            id: Set(model.id),
            email: Set(model.email.clone()),
            name: Set(model.name.clone()),
            role: Set(model.role.as_str().to_string()),
            password_hash: Set(model.password_hash.clone()),
            created_at: Set(model.created_at),
            updated_at: Set(model.updated_at),
        }
    }
}

// ===== Session Conversions =====

impl From<entity::session::Model> for Session {
    fn from(entity: entity::session::Model) -> Self {
        Self {
            token_hash: entity.token_hash,
            user_id: entity.user_id,
            expires_at: entity.expires_at,
            created_at: entity.created_at,
        }
    }
}

impl From<&Session> for entity::session::ActiveModel {
    fn from(model: &Session) -> Self {
        use sea_orm::ActiveValue::*;

        Self {
            token_hash: Set(model.token_hash.clone()),
            user_id: Set(model.user_id),
            expires_at: Set(model.expires_at),
            created_at: Set(model.created_at),
        }
    }
}
