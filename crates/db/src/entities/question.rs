//! Question entity.
//!
//! A question row is created by the public contact form. `ip` and
//! `created_at` are write-once; `verified` transitions only false -> true,
//! by admin review.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "question")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    pub email: String,

    #[sea_orm(column_type = "Text")]
    pub question_text: String,

    /// Originating network address, captured at intake
    pub ip: String,

    #[sea_orm(default_value = false)]
    pub verified: bool,

    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
