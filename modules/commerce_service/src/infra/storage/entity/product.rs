use sea_orm::entity::prelude::*;

/// Products table entity
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub name: String,

    #[sea_orm(unique)]
    pub slug: String,

    #[sea_orm(column_type = "Text")]
    pub description: String,

    pub category: String,

    #[sea_orm(column_type = "Decimal(Some((16, 4)))")]
    pub price: Decimal,

    #[sea_orm(column_type = "Decimal(Some((16, 4)))", nullable)]
    pub sale_price: Option<Decimal>,

    pub sale_starts_at: Option<DateTimeUtc>,

    pub sale_ends_at: Option<DateTimeUtc>,

    pub image_url: Option<String>,

    /// Cleared by soft delete
    pub is_active: bool,

    pub created_at: DateTimeUtc,

    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_one = "super::inventory::Entity")]
    Inventory,
}

impl Related<super::inventory::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Inventory.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
