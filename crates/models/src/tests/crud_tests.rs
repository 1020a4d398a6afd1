use crate::db::connect;
use crate::{product, product_type};
use anyhow::Result;
use chrono::{NaiveDate, Utc};
use migration::MigratorTrait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
};
use uuid::Uuid;

/// Setup test database with migrations
async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = connect().await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

#[tokio::test]
async fn test_product_type_crud() -> Result<()> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return Ok(());
    }

    let db = setup_test_db().await?;

    // Test Create
    let type_name = format!("test_type_{}", Uuid::new_v4());
    let now = Utc::now().into();
    let am = product_type::ActiveModel {
        name: Set(type_name.clone()),
        description: Set("entity-level test".into()),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    let created = am.insert(&db).await?;
    assert_eq!(created.name, type_name);
    assert!(created.id > 0);

    // Test Read
    let found = product_type::Entity::find_by_id(created.id).one(&db).await?;
    assert!(found.is_some());
    let found = found.unwrap();
    assert_eq!(found.id, created.id);
    assert_eq!(found.description, "entity-level test");

    // Test find by name
    let found_by_name = product_type::Entity::find()
        .filter(product_type::Column::Name.eq(type_name.clone()))
        .one(&db)
        .await?;
    assert!(found_by_name.is_some());
    assert_eq!(found_by_name.unwrap().id, created.id);

    // Test Delete
    product_type::Entity::delete_by_id(created.id).exec(&db).await?;
    let gone = product_type::Entity::find_by_id(created.id).one(&db).await?;
    assert!(gone.is_none());

    Ok(())
}

#[tokio::test]
async fn test_product_crud() -> Result<()> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return Ok(());
    }

    let db = setup_test_db().await?;

    // Create a type first
    let type_name = format!("product_test_type_{}", Uuid::new_v4());
    let now = Utc::now().into();
    let pt = product_type::ActiveModel {
        name: Set(type_name),
        description: Set(String::new()),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(&db)
    .await?;

    // Test Create Product
    let product_name = format!("test_product_{}", Uuid::new_v4());
    let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
    let created = product::ActiveModel {
        name: Set(product_name.clone()),
        type_id: Set(Some(pt.id)),
        date: Set(date),
        quantity: Set(25),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(&db)
    .await?;

    assert_eq!(created.name, product_name);
    assert_eq!(created.type_id, Some(pt.id));
    assert_eq!(created.date, date);
    assert_eq!(created.quantity, 25);

    // Test Read
    let found = product::Entity::find_by_id(created.id).one(&db).await?;
    assert!(found.is_some());
    let found = found.unwrap();
    assert_eq!(found.id, created.id);
    assert_eq!(found.date, date);

    // Test relation: products of this type
    let of_type = product::Entity::find()
        .filter(product::Column::TypeId.eq(pt.id))
        .all(&db)
        .await?;
    assert_eq!(of_type.len(), 1);

    // Cleanup
    product::Entity::delete_by_id(created.id).exec(&db).await?;
    product_type::Entity::delete_by_id(pt.id).exec(&db).await?;

    Ok(())
}

#[tokio::test]
async fn test_untyped_product() -> Result<()> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return Ok(());
    }

    let db = setup_test_db().await?;

    let now = Utc::now().into();
    let created = product::ActiveModel {
        name: Set(format!("untyped_{}", Uuid::new_v4())),
        type_id: Set(None),
        date: Set(NaiveDate::from_ymd_opt(2000, 1, 1).unwrap()),
        quantity: Set(0),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(&db)
    .await?;

    assert!(created.type_id.is_none());

    product::Entity::delete_by_id(created.id).exec(&db).await?;
    Ok(())
}
