//! SeaORM entities for database tables

use sea_orm::entity::prelude::*;

/// Users table entity
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    /// Lower-cased, unique
    #[sea_orm(unique)]
    pub email: String,

    pub name: String,

    /// CUSTOMER or ADMIN
    pub role: String,

    pub password_hash: Option<String>,

    pub created_at: DateTimeUtc,

    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "session::Entity")]
    Sessions,
}

impl Related<session::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Sessions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Login sessions module
pub mod session {
    use sea_orm::entity::prelude::*;

    /// Sessions table entity
    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
    #[sea_orm(table_name = "sessions")]
    pub struct Model {
        /// SHA-256 of the cookie token (primary key)
        #[sea_orm(primary_key, auto_increment = false)]
        pub token_hash: String,

        pub user_id: Uuid,

        pub expires_at: DateTimeUtc,

        pub created_at: DateTimeUtc,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(
            belongs_to = "super::Entity",
            from = "Column::UserId",
            to = "super::Column::Id",
            on_delete = "Cascade"
        )]
        User,
    }

    impl Related<super::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::User.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}
