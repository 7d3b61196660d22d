use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::Date;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "employees")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub designation: String,
    #[sea_orm(column_name = "date_of_birth")]
    pub date_of_birth: Date,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub salary: Decimal,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_one = "super::contacts::Entity")]
    Contact,
    #[sea_orm(has_one = "super::emergency_contacts::Entity")]
    EmergencyContact,
}

impl Related<super::contacts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Contact.def()
    }
}

impl Related<super::emergency_contacts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::EmergencyContact.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
