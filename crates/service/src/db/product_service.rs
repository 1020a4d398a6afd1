use chrono::Utc;
use models::product::{self, ProductWithType};
use models::product_type;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, JoinType, QueryFilter,
    QueryOrder, QuerySelect, RelationTrait, Set,
};
use tracing::info;

use crate::errors::ServiceError;
use crate::validate;

fn with_type_name() -> sea_orm::Select<product::Entity> {
    product::Entity::find()
        .column_as(product_type::Column::Name, "type_name")
        .join(JoinType::LeftJoin, product::Relation::ProductType.def())
}

/// All products with their type name, most recently created first.
pub async fn list_products(db: &DatabaseConnection) -> Result<Vec<ProductWithType>, ServiceError> {
    with_type_name()
        .order_by_desc(product::Column::Id)
        .into_model::<ProductWithType>()
        .all(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))
}

pub async fn get_product(db: &DatabaseConnection, id: i32) -> Result<ProductWithType, ServiceError> {
    with_type_name()
        .filter(product::Column::Id.eq(id))
        .into_model::<ProductWithType>()
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .ok_or_else(|| ServiceError::not_found("Product"))
}

/// Create a product. All validation runs before the insert, so malformed
/// input leaves no database side effects.
pub async fn create_product(
    db: &DatabaseConnection,
    name: &str,
    type_id: Option<i32>,
    date: &str,
    quantity: i32,
) -> Result<i32, ServiceError> {
    validate::non_empty(name, "Product name")?;
    validate::non_negative_quantity(quantity)?;
    let date = validate::parse_date(date)?;

    let now = Utc::now().into();
    let am = product::ActiveModel {
        name: Set(name.to_string()),
        type_id: Set(type_id),
        date: Set(date),
        quantity: Set(quantity),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    let created = am.insert(db).await.map_err(|e| ServiceError::Db(e.to_string()))?;
    info!(product_id = created.id, "product created");
    Ok(created.id)
}

/// Update all fields unconditionally after validation and an explicit
/// existence check; returns the store's rows-affected count.
pub async fn update_product(
    db: &DatabaseConnection,
    id: i32,
    name: &str,
    type_id: Option<i32>,
    date: &str,
    quantity: i32,
) -> Result<u64, ServiceError> {
    validate::non_empty(name, "Product name")?;
    validate::non_negative_quantity(quantity)?;
    let date = validate::parse_date(date)?;

    get_product(db, id).await?;

    let res = product::Entity::update_many()
        .col_expr(product::Column::Name, Expr::value(name))
        .col_expr(product::Column::TypeId, Expr::value(type_id))
        .col_expr(product::Column::Date, Expr::value(date))
        .col_expr(product::Column::Quantity, Expr::value(quantity))
        .col_expr(product::Column::UpdatedAt, Expr::value(Utc::now()))
        .filter(product::Column::Id.eq(id))
        .exec(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(res.rows_affected)
}

/// Delete by id. A zero-row delete means the product never existed or was
/// already deleted; the store cannot distinguish the two.
pub async fn delete_product(db: &DatabaseConnection, id: i32) -> Result<u64, ServiceError> {
    let res = product::Entity::delete_by_id(id)
        .exec(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    if res.rows_affected == 0 {
        return Err(ServiceError::NotFound("Product not found or already deleted".into()));
    }
    Ok(res.rows_affected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::product_type_service;
    use crate::test_support::get_db;
    use sea_orm::PaginatorTrait;
    use uuid::Uuid;

    #[tokio::test]
    async fn product_crud_roundtrip() -> Result<(), anyhow::Error> {
        if std::env::var("SKIP_DB_TESTS").is_ok() {
            return Ok(());
        }
        let db = get_db().await?;

        let type_name = format!("svc_prod_type_{}", Uuid::new_v4());
        let type_id = product_type_service::create_product_type(&db, &type_name, None).await?;

        let name = format!("svc_prod_{}", Uuid::new_v4());
        let id = create_product(&db, &name, Some(type_id), "2024-01-01", 10).await?;

        let found = get_product(&db, id).await?;
        assert_eq!(found.name, name);
        assert_eq!(found.type_id, Some(type_id));
        assert_eq!(found.date.to_string(), "2024-01-01");
        assert_eq!(found.quantity, 10);
        assert_eq!(found.type_name.as_deref(), Some(type_name.as_str()));

        // Update is idempotent: applying the same values twice succeeds both times.
        let renamed = format!("{}_v2", name);
        let first = update_product(&db, id, &renamed, None, "2024-02-29", 0).await?;
        assert_eq!(first, 1);
        let second = update_product(&db, id, &renamed, None, "2024-02-29", 0).await?;
        assert_eq!(second, 1);

        let found = get_product(&db, id).await?;
        assert_eq!(found.name, renamed);
        assert_eq!(found.type_id, None);
        assert_eq!(found.type_name, None);
        assert_eq!(found.date.to_string(), "2024-02-29");
        assert_eq!(found.quantity, 0);

        delete_product(&db, id).await?;
        let again = delete_product(&db, id).await;
        assert!(matches!(again, Err(ServiceError::NotFound(_))));

        product_type_service::delete_product_type(&db, type_id).await?;
        Ok(())
    }

    #[tokio::test]
    async fn invalid_input_leaves_no_rows() -> Result<(), anyhow::Error> {
        if std::env::var("SKIP_DB_TESTS").is_ok() {
            return Ok(());
        }
        let db = get_db().await?;

        let before = product::Entity::find().count(&db).await?;

        let overflow = create_product(&db, "x", None, "2024-02-30", 1).await;
        assert!(matches!(overflow, Err(ServiceError::Validation(_))));
        let format = create_product(&db, "x", None, "13/01/2024", 1).await;
        assert!(matches!(format, Err(ServiceError::Validation(_))));
        let blank = create_product(&db, "", None, "2024-01-01", 1).await;
        assert!(matches!(blank, Err(ServiceError::Validation(_))));
        let negative = create_product(&db, "x", None, "2024-01-01", -1).await;
        assert!(matches!(negative, Err(ServiceError::Validation(_))));

        let after = product::Entity::find().count(&db).await?;
        assert_eq!(before, after);
        Ok(())
    }

    #[tokio::test]
    async fn update_missing_product_is_not_found() -> Result<(), anyhow::Error> {
        if std::env::var("SKIP_DB_TESTS").is_ok() {
            return Ok(());
        }
        let db = get_db().await?;
        let err = update_product(&db, -1, "ghost", None, "2024-01-01", 1).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
        Ok(())
    }

    #[tokio::test]
    async fn untyped_product_has_null_type_name() -> Result<(), anyhow::Error> {
        if std::env::var("SKIP_DB_TESTS").is_ok() {
            return Ok(());
        }
        let db = get_db().await?;

        let id = create_product(&db, &format!("untyped_{}", Uuid::new_v4()), None, "2000-01-01", 3)
            .await?;
        let found = get_product(&db, id).await?;
        assert_eq!(found.type_id, None);
        assert_eq!(found.type_name, None);

        let listed = list_products(&db).await?;
        let row = listed.iter().find(|p| p.id == id).expect("listed");
        assert_eq!(row.type_name, None);

        delete_product(&db, id).await?;
        Ok(())
    }
}
