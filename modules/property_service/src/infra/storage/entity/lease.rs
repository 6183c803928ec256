use sea_orm::entity::prelude::*;

/// Leases table entity
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "leases")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub unit_id: Uuid,

    pub tenant_name: String,

    pub tenant_email: String,

    pub start_date: Date,

    pub end_date: Date,

    #[sea_orm(column_type = "Decimal(Some((16, 4)))")]
    pub monthly_rent: Decimal,

    /// ACTIVE, ENDED or TERMINATED
    pub status: String,

    pub created_at: DateTimeUtc,

    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::unit::Entity",
        from = "Column::UnitId",
        to = "super::unit::Column::Id",
        on_delete = "Cascade"
    )]
    Unit,
}

impl Related<super::unit::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Unit.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
