//! Site entity - A connectivity site that tickets are raised against.
//!
//! Monetary and bandwidth columns are plain integers; their units are defined
//! by the billing side of the dashboard, not here.

use sea_orm::Set;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Namespace for deriving deterministic site ids from site codes.
const SITE_ID_NAMESPACE: Uuid = Uuid::from_u128(0x5d1e_a6c2_3b0f_4f7e_9a51_0c7d_2e8b_4f10);

/// Site database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "sites")]
pub struct Model {
    /// Unique identifier for the site
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Operator-assigned site code, unique
    #[sea_orm(column_type = "Text", unique)]
    pub site_code: String,
    /// Human-readable site name
    #[sea_orm(column_type = "Text")]
    pub site_name: String,
    /// Department (first-level administrative division)
    #[sea_orm(column_type = "Text")]
    pub department: String,
    /// Municipality within the department
    #[sea_orm(column_type = "Text")]
    pub municipality: String,
    /// Village or rural locality
    #[sea_orm(column_type = "Text")]
    pub village: String,
    /// Contracted bandwidth
    pub bandwidth: i32,
    /// Monthly service value
    pub service_value: i32,
    /// Deduction applied for SLA penalties
    pub penalty_deduction: i32,
    /// Amount actually paid after deductions
    pub payment_value: i32,
}

/// Tickets reference sites only through a denormalized code, so no relations
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {
    fn new() -> Self {
        Self {
            id: Set(Uuid::new_v4()),
            ..ActiveModelTrait::default()
        }
    }
}

/// Stable id for a site code, so re-seeding collides instead of duplicating.
#[must_use]
pub fn deterministic_id(site_code: &str) -> Uuid {
    Uuid::new_v5(&SITE_ID_NAMESPACE, site_code.as_bytes())
}
