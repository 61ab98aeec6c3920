//! User entity - Dashboard accounts.
//!
//! The `password` column only ever holds an Argon2 PHC string; see
//! [`crate::core::password`].

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// User database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    /// Caller-supplied identifier (usually a UUID string)
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// Display name
    #[sea_orm(column_type = "String(StringLen::N(255))")]
    pub name: String,
    /// Login email, unique across all users
    #[sea_orm(column_type = "Text", unique)]
    pub email: String,
    /// Salted password hash in PHC format
    #[sea_orm(column_type = "Text")]
    #[serde(skip_serializing)]
    pub password: String,
}

/// Users are not related to any other table
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
