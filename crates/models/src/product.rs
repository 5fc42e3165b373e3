use sea_orm::{entity::prelude::*, Condition, DatabaseConnection, NotSet, QueryFilter, QueryOrder, Set};
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

/// A catalog product with its uploaded image. The id is store-generated.
///
/// `image_data` never appears in JSON responses; the raw bytes are served by
/// the dedicated image endpoint instead.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "product")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key)]
    #[serde(default)]
    pub id: i32,
    pub name: String,
    pub price: f64,
    pub category: String,
    pub image_name: String,
    pub image_type: String,
    #[serde(skip_serializing, default)]
    pub image_data: Vec<u8>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

pub async fn list(db: &DatabaseConnection) -> Result<Vec<Model>, ModelError> {
    Ok(Entity::find().order_by_asc(Column::Id).all(db).await?)
}

pub async fn get(db: &DatabaseConnection, id: i32) -> Result<Option<Model>, ModelError> {
    Ok(Entity::find_by_id(id).one(db).await?)
}

/// Insert, letting the database assign the id.
pub async fn insert(db: &DatabaseConnection, product: &Model) -> Result<Model, ModelError> {
    let am = ActiveModel {
        id: NotSet,
        name: Set(product.name.clone()),
        price: Set(product.price),
        category: Set(product.category.clone()),
        image_name: Set(product.image_name.clone()),
        image_type: Set(product.image_type.clone()),
        image_data: Set(product.image_data.clone()),
    };
    Ok(am.insert(db).await?)
}

/// Replace the row with the given id; `None` when it does not exist.
pub async fn update(db: &DatabaseConnection, id: i32, product: &Model) -> Result<Option<Model>, ModelError> {
    if Entity::find_by_id(id).one(db).await?.is_none() {
        return Ok(None);
    }
    let am = ActiveModel {
        id: Set(id),
        name: Set(product.name.clone()),
        price: Set(product.price),
        category: Set(product.category.clone()),
        image_name: Set(product.image_name.clone()),
        image_type: Set(product.image_type.clone()),
        image_data: Set(product.image_data.clone()),
    };
    Ok(Some(am.update(db).await?))
}

pub async fn delete(db: &DatabaseConnection, id: i32) -> Result<bool, ModelError> {
    let res = Entity::delete_by_id(id).exec(db).await?;
    Ok(res.rows_affected > 0)
}

/// Case-sensitive substring match against name or category.
pub async fn search(db: &DatabaseConnection, keyword: &str) -> Result<Vec<Model>, ModelError> {
    Ok(Entity::find()
        .filter(
            Condition::any()
                .add(Column::Name.contains(keyword))
                .add(Column::Category.contains(keyword)),
        )
        .order_by_asc(Column::Id)
        .all(db)
        .await?)
}
