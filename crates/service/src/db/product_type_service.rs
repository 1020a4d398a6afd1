use chrono::Utc;
use models::{product, product_type};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use tracing::{info, instrument};

use crate::errors::ServiceError;
use crate::validate;

/// Outcome of a type deletion: the type row removed plus how many
/// products were detached from it in the same transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeDeletion {
    pub rows_affected: u64,
    pub products_detached: u64,
}

/// All product types ordered by name.
pub async fn list_product_types(
    db: &DatabaseConnection,
) -> Result<Vec<product_type::Model>, ServiceError> {
    product_type::Entity::find()
        .order_by_asc(product_type::Column::Name)
        .all(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))
}

pub async fn get_product_type(
    db: &DatabaseConnection,
    id: i32,
) -> Result<product_type::Model, ServiceError> {
    product_type::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .ok_or_else(|| ServiceError::not_found("Product type"))
}

/// Create a product type. Description defaults to empty.
pub async fn create_product_type(
    db: &DatabaseConnection,
    name: &str,
    description: Option<&str>,
) -> Result<i32, ServiceError> {
    validate::non_empty(name, "Type name")?;
    let now = Utc::now().into();
    let am = product_type::ActiveModel {
        name: Set(name.to_string()),
        description: Set(description.unwrap_or_default().to_string()),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    let created = am.insert(db).await.map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(created.id)
}

/// Update name and description unconditionally. The existence check runs
/// first so a missing id is not conflated with an identical-value no-op.
pub async fn update_product_type(
    db: &DatabaseConnection,
    id: i32,
    name: &str,
    description: Option<&str>,
) -> Result<u64, ServiceError> {
    validate::non_empty(name, "Type name")?;
    get_product_type(db, id).await?;
    let res = product_type::Entity::update_many()
        .col_expr(product_type::Column::Name, Expr::value(name))
        .col_expr(product_type::Column::Description, Expr::value(description.unwrap_or_default()))
        .col_expr(product_type::Column::UpdatedAt, Expr::value(Utc::now()))
        .filter(product_type::Column::Id.eq(id))
        .exec(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(res.rows_affected)
}

/// Delete a product type, detaching any products that still reference it.
///
/// Runs as one transaction: count referencing products, null their type_id,
/// delete the type row. A zero-row delete rolls everything back so no
/// detachment is observable for a missing id.
#[instrument(skip(db))]
pub async fn delete_product_type(
    db: &DatabaseConnection,
    id: i32,
) -> Result<TypeDeletion, ServiceError> {
    let txn = db.begin().await.map_err(|e| ServiceError::Db(e.to_string()))?;

    let referencing = product::Entity::find()
        .filter(product::Column::TypeId.eq(id))
        .count(&txn)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;

    if referencing > 0 {
        product::Entity::update_many()
            .col_expr(product::Column::TypeId, Expr::value(Option::<i32>::None))
            .col_expr(product::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(product::Column::TypeId.eq(id))
            .exec(&txn)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))?;
    }

    let deleted = product_type::Entity::delete_by_id(id)
        .exec(&txn)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;

    if deleted.rows_affected == 0 {
        txn.rollback().await.map_err(|e| ServiceError::Db(e.to_string()))?;
        return Err(ServiceError::NotFound("Product type not found or already deleted".into()));
    }

    txn.commit().await.map_err(|e| ServiceError::Db(e.to_string()))?;
    info!(type_id = id, detached = referencing, "product type deleted");
    Ok(TypeDeletion { rows_affected: deleted.rows_affected, products_detached: referencing })
}

/// All products with the given type_id. An empty result is valid, not an
/// error: a type with zero products is a normal state.
pub async fn list_products_by_type(
    db: &DatabaseConnection,
    type_id: i32,
) -> Result<Vec<product::Model>, ServiceError> {
    product::Entity::find()
        .filter(product::Column::TypeId.eq(type_id))
        .all(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))
}
