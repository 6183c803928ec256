use sea_orm::entity::prelude::*;

/// Orders table entity
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "orders")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    /// Hyphenated textual id, for prefix search on every backend
    pub id_text: String,

    pub user_id: Uuid,

    pub customer_email: String,

    /// PENDING, PAID, FULFILLED, CANCELLED or REFUNDED
    pub status: String,

    #[sea_orm(column_type = "Decimal(Some((16, 4)))")]
    pub total: Decimal,

    /// Shipping address snapshot
    #[sea_orm(column_type = "Json")]
    pub shipping: Json,

    /// Items were returned to stock
    pub restocked: bool,

    pub created_at: DateTimeUtc,

    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::order_item::Entity")]
    Items,
}

impl Related<super::order_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Items.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
