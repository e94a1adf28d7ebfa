use sea_orm::{entity::prelude::*, ActiveModelTrait, ActiveValue::NotSet, DatabaseConnection, QueryOrder, Set};
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "customer")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub email: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// All rows in ascending id order.
pub async fn list(db: &DatabaseConnection) -> Result<Vec<Model>, ModelError> {
    Ok(Entity::find().order_by_asc(Column::Id).all(db).await?)
}

pub async fn find(db: &DatabaseConnection, id: i64) -> Result<Option<Model>, ModelError> {
    Ok(Entity::find_by_id(id).one(db).await?)
}

/// Insert a new row; the id comes from the table sequence.
pub async fn insert(db: &DatabaseConnection, name: &str, email: &str) -> Result<Model, ModelError> {
    let am = ActiveModel {
        id: NotSet,
        name: Set(name.to_string()),
        email: Set(email.to_string()),
    };
    Ok(am.insert(db).await?)
}

/// Overwrite `name` and `email` of an existing row.
pub async fn update(db: &DatabaseConnection, id: i64, name: &str, email: &str) -> Result<Model, ModelError> {
    let am = ActiveModel {
        id: Set(id),
        name: Set(name.to_string()),
        email: Set(email.to_string()),
    };
    am.update(db).await.map_err(|e| match ModelError::from(e) {
        ModelError::NotFound(_) => ModelError::NotFound(format!("customer {id}")),
        other => other,
    })
}

/// Returns whether a row was removed.
pub async fn delete(db: &DatabaseConnection, id: i64) -> Result<bool, ModelError> {
    let res = Entity::delete_by_id(id).exec(db).await?;
    Ok(res.rows_affected > 0)
}
