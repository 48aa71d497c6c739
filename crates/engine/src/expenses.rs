//! Expense records.
//!
//! Amounts are stored as integer **minor units** (cents) and surfaced as
//! [`Money`]. Every expense belongs to exactly one category.

use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::entity::prelude::*;

use crate::{EngineError, Money, categories};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Expense {
    pub id: i32,
    pub amount: Money,
    pub description: Option<String>,
    pub date: NaiveDate,
    pub category_id: i32,
    pub category_name: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "expenses")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub amount_minor: i64,
    pub description: Option<String>,
    pub date: Date,
    pub category_id: i32,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::categories::Entity",
        from = "Column::CategoryId",
        to = "super::categories::Column::Id",
        on_update = "NoAction",
        on_delete = "Restrict"
    )]
    Category,
}

impl Related<super::categories::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<(Model, Option<categories::Model>)> for Expense {
    type Error = EngineError;

    fn try_from((model, category): (Model, Option<categories::Model>)) -> Result<Self, Self::Error> {
        let category = category.ok_or_else(|| {
            EngineError::KeyNotFound(format!("category {} not exists", model.category_id))
        })?;

        Ok(Self {
            id: model.id,
            amount: Money::new(model.amount_minor),
            description: model.description,
            date: model.date,
            category_id: category.id,
            category_name: category.name,
            created_at: model.created_at,
        })
    }
}
