use sea_orm::entity::prelude::*;

/// Payments table entity
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "payments")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub order_id: Option<Uuid>,

    pub user_id: Uuid,

    /// paystack or flutterwave
    pub provider: String,

    #[sea_orm(unique)]
    pub reference: String,

    pub provider_reference: Option<String>,

    pub email: String,

    #[sea_orm(column_type = "Decimal(Some((16, 4)))")]
    pub amount: Decimal,

    pub currency: String,

    /// INITIATED, SUCCESS or FAILED
    pub status: String,

    #[sea_orm(column_type = "Json")]
    pub metadata: Json,

    pub created_at: DateTimeUtc,

    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
