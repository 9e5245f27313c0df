use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

pub const ROLE_USER: &str = "ROLE_USER";
pub const ROLE_ADMIN: &str = "ROLE_ADMIN";

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct Roles(pub Vec<String>);

// No Serialize: the password hash must never leave the storage layer.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "user")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(column_type = "String(Some(180))", unique)]
    pub email: String,
    pub roles: Roles,
    #[sea_orm(column_type = "String(Some(255))")]
    pub password: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Stored roles plus the implicit `ROLE_USER`, without duplicates.
    pub fn roles(&self) -> Vec<String> {
        let mut roles = self.roles.0.clone();
        roles.push(ROLE_USER.to_string());
        roles.sort_unstable();
        roles.dedup();
        roles
    }
}
