use sea_orm::entity::prelude::*;

/// Rentable units of a property
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "units")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub property_id: Uuid,

    pub label: String,

    pub bedrooms: i32,

    pub bathrooms: i32,

    #[sea_orm(column_type = "Decimal(Some((16, 4)))")]
    pub monthly_rent: Decimal,

    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::property::Entity",
        from = "Column::PropertyId",
        to = "super::property::Column::Id",
        on_delete = "Cascade"
    )]
    Property,

    #[sea_orm(has_many = "super::lease::Entity")]
    Leases,
}

impl Related<super::property::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Property.def()
    }
}

impl Related<super::lease::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Leases.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
