use sea_orm::{entity::prelude::*, ActiveModelTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set};
use uuid::Uuid;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "customer")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    #[sea_orm(unique)]
    pub email: String,
    #[sea_orm(unique)]
    pub phone: String,
    pub city: Option<String>,
    pub picture: Option<Vec<u8>>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Field values written by insert and full update.
#[derive(Clone, Debug)]
pub struct Fields<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub phone: &'a str,
    pub city: Option<&'a str>,
}

/// All customers, oldest first.
pub async fn list(db: &DatabaseConnection) -> Result<Vec<Model>, ModelError> {
    let rows = Entity::find()
        .order_by_asc(Column::CreatedAt)
        .order_by_asc(Column::Id)
        .all(db)
        .await?;
    Ok(rows)
}

pub async fn find(db: &DatabaseConnection, id: Uuid) -> Result<Option<Model>, ModelError> {
    Ok(Entity::find_by_id(id).one(db).await?)
}

/// Whether any customer other than `exclude` has `column == value`.
pub async fn value_taken(
    db: &DatabaseConnection,
    column: Column,
    value: &str,
    exclude: Option<Uuid>,
) -> Result<bool, ModelError> {
    let mut query = Entity::find().filter(column.eq(value.to_string()));
    if let Some(id) = exclude {
        query = query.filter(Column::Id.ne(id));
    }
    Ok(query.count(db).await? > 0)
}

pub async fn insert(db: &DatabaseConnection, id: Uuid, fields: Fields<'_>) -> Result<Model, ModelError> {
    let now = Utc::now().into();
    let am = ActiveModel {
        id: Set(id),
        name: Set(fields.name.to_string()),
        email: Set(fields.email.to_string()),
        phone: Set(fields.phone.to_string()),
        city: Set(fields.city.map(str::to_string)),
        picture: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
    };
    Ok(am.insert(db).await?)
}

/// Overwrite name, email, phone and city; the picture column is left alone.
pub async fn update_fields(db: &DatabaseConnection, id: Uuid, fields: Fields<'_>) -> Result<Model, ModelError> {
    let mut am: ActiveModel = find(db, id)
        .await?
        .ok_or_else(|| ModelError::NotFound(format!("customer {id}")))?
        .into();
    am.name = Set(fields.name.to_string());
    am.email = Set(fields.email.to_string());
    am.phone = Set(fields.phone.to_string());
    am.city = Set(fields.city.map(str::to_string));
    am.updated_at = Set(Utc::now().into());
    Ok(am.update(db).await?)
}

pub async fn set_picture(db: &DatabaseConnection, id: Uuid, picture: Option<Vec<u8>>) -> Result<(), ModelError> {
    let mut am: ActiveModel = find(db, id)
        .await?
        .ok_or_else(|| ModelError::NotFound(format!("customer {id}")))?
        .into();
    am.picture = Set(picture);
    am.updated_at = Set(Utc::now().into());
    am.update(db).await?;
    Ok(())
}

/// Remove a customer; returns the removed row, if any.
pub async fn delete(db: &DatabaseConnection, id: Uuid) -> Result<Option<Model>, ModelError> {
    let Some(found) = find(db, id).await? else {
        return Ok(None);
    };
    Entity::delete_by_id(id).exec(db).await?;
    Ok(Some(found))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::connect_sqlite_memory;

    fn fields<'a>(email: &'a str, phone: &'a str) -> Fields<'a> {
        Fields { name: "Vinod", email, phone, city: Some("Bangalore") }
    }

    #[tokio::test]
    async fn customer_row_lifecycle() -> anyhow::Result<()> {
        let db = connect_sqlite_memory().await?;
        let id = Uuid::new_v4();
        let created = insert(&db, id, fields("vinod@vinod.co", "9731424784")).await?;
        assert_eq!(created.id, id);
        assert!(created.picture.is_none());

        set_picture(&db, id, Some(vec![1, 2, 3])).await?;
        let updated = update_fields(&db, id, Fields { name: "Vinod K", email: "vinod@vinod.co", phone: "9731424784", city: None }).await?;
        assert_eq!(updated.name, "Vinod K");
        assert_eq!(updated.city, None);
        assert_eq!(updated.picture, Some(vec![1, 2, 3]));

        assert!(value_taken(&db, Column::Email, "vinod@vinod.co", None).await?);
        assert!(!value_taken(&db, Column::Email, "vinod@vinod.co", Some(id)).await?);

        let removed = delete(&db, id).await?;
        assert_eq!(removed.map(|m| m.id), Some(id));
        assert!(find(&db, id).await?.is_none());
        assert!(delete(&db, id).await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn unique_index_reports_violation() -> anyhow::Result<()> {
        let db = connect_sqlite_memory().await?;
        insert(&db, Uuid::new_v4(), fields("shyam@xmpl.com", "9731424000")).await?;
        let err = insert(&db, Uuid::new_v4(), fields("shyam@xmpl.com", "9731424111")).await.unwrap_err();
        match err {
            ModelError::UniqueViolation(msg) => assert!(msg.contains("email")),
            other => panic!("unexpected error: {other}"),
        }
        Ok(())
    }

    #[tokio::test]
    async fn missing_row_is_not_found() -> anyhow::Result<()> {
        let db = connect_sqlite_memory().await?;
        let err = set_picture(&db, Uuid::new_v4(), None).await.unwrap_err();
        assert!(matches!(err, ModelError::NotFound(_)));
        Ok(())
    }
}
