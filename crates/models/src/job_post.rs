use sea_orm::{entity::prelude::*, DatabaseConnection, QueryFilter, QueryOrder, Set};
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

/// A job advertisement. The id is caller-supplied, never generated.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "job_post")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub post_id: i32,
    pub post_profile: String,
    pub post_desc: String,
    pub req_experience: i32,
    pub post_tech_stack: Vec<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

fn to_active(m: &Model) -> ActiveModel {
    ActiveModel {
        post_id: Set(m.post_id),
        post_profile: Set(m.post_profile.clone()),
        post_desc: Set(m.post_desc.clone()),
        req_experience: Set(m.req_experience),
        post_tech_stack: Set(m.post_tech_stack.clone()),
    }
}

pub async fn list(db: &DatabaseConnection) -> Result<Vec<Model>, ModelError> {
    Ok(Entity::find().order_by_asc(Column::PostId).all(db).await?)
}

pub async fn get(db: &DatabaseConnection, post_id: i32) -> Result<Option<Model>, ModelError> {
    Ok(Entity::find_by_id(post_id).one(db).await?)
}

pub async fn insert(db: &DatabaseConnection, post: &Model) -> Result<Model, ModelError> {
    Ok(to_active(post).insert(db).await?)
}

/// Replace the row matching `post.post_id`, inserting when absent.
pub async fn upsert(db: &DatabaseConnection, post: &Model) -> Result<Model, ModelError> {
    match Entity::find_by_id(post.post_id).one(db).await? {
        Some(_) => Ok(to_active(post).update(db).await?),
        None => Ok(to_active(post).insert(db).await?),
    }
}

pub async fn delete(db: &DatabaseConnection, post_id: i32) -> Result<bool, ModelError> {
    let res = Entity::delete_by_id(post_id).exec(db).await?;
    Ok(res.rows_affected > 0)
}

/// Case-sensitive substring match against the profile field.
pub async fn search(db: &DatabaseConnection, keyword: &str) -> Result<Vec<Model>, ModelError> {
    Ok(Entity::find()
        .filter(Column::PostProfile.contains(keyword))
        .order_by_asc(Column::PostId)
        .all(db)
        .await?)
}

pub async fn with_min_experience(db: &DatabaseConnection, years: i32) -> Result<Vec<Model>, ModelError> {
    Ok(Entity::find()
        .filter(Column::ReqExperience.gte(years))
        .order_by_asc(Column::PostId)
        .all(db)
        .await?)
}
