//! Revenue entity - Monthly revenue totals keyed by a short month code.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Revenue database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "revenue")]
pub struct Model {
    /// Month code such as `"Jan"`, at most four characters, unique
    #[sea_orm(
        primary_key,
        auto_increment = false,
        column_type = "String(StringLen::N(4))"
    )]
    pub month: String,
    /// Revenue for that month
    pub revenue: i32,
}

/// `Revenue` has no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
