use crate::db::connect_with_config;
use crate::product::{self, Product};
use anyhow::Result;
use configs::DatabaseConfig;
use migration::MigratorTrait;
use sea_orm::DatabaseConnection;

/// Fresh in-memory database with migrations applied
async fn setup_test_db() -> Result<DatabaseConnection> {
    let cfg = DatabaseConfig { url: "sqlite::memory:".into(), ..DatabaseConfig::default() };
    let db = connect_with_config(&cfg).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

#[tokio::test]
async fn test_save_assigns_id_and_reads_back() -> Result<()> {
    let db = setup_test_db().await?;

    let input = Product::new("Widget", "a small widget", 9.99);
    let saved = product::save(&db, input.clone()).await?;
    let id = saved.id.expect("id assigned on insert");

    let found = product::find_by_id(&db, id).await?.expect("saved product is readable");
    assert_eq!(found.id, Some(id));
    assert!(found.same_fields(&input));
    Ok(())
}

#[tokio::test]
async fn test_save_with_existing_id_overwrites_all_fields() -> Result<()> {
    let db = setup_test_db().await?;

    let saved = product::save(&db, Product::new("Widget", "old", 1.0)).await?;
    let id = saved.id.unwrap();

    let replacement = Product::new("Gizmo", "", 2.5).with_id(id);
    let updated = product::save(&db, replacement.clone()).await?;
    assert_eq!(updated, replacement);

    let found = product::find_by_id(&db, id).await?.unwrap();
    assert_eq!(found.name, "Gizmo");
    assert_eq!(found.description, "");
    assert_eq!(found.price, 2.5);
    assert_eq!(product::find_all(&db).await?.len(), 1);
    Ok(())
}

#[tokio::test]
async fn test_save_with_unknown_id_inserts_new_row() -> Result<()> {
    let db = setup_test_db().await?;

    let first = product::save(&db, Product::new("A", "", 1.0)).await?;
    let saved = product::save(&db, Product::new("B", "", 2.0).with_id(4242)).await?;

    assert_ne!(saved.id, Some(4242));
    assert_ne!(saved.id, first.id);
    assert!(product::find_by_id(&db, 4242).await?.is_none());
    Ok(())
}

#[tokio::test]
async fn test_delete_is_idempotent() -> Result<()> {
    let db = setup_test_db().await?;

    let saved = product::save(&db, Product::new("Widget", "", 1.0)).await?;
    let id = saved.id.unwrap();

    product::delete_by_id(&db, id).await?;
    product::delete_by_id(&db, id).await?;
    product::delete_by_id(&db, 999).await?;

    let all = product::find_all(&db).await?;
    assert!(all.iter().all(|p| p.id != Some(id)));
    assert!(product::find_by_id(&db, id).await?.is_none());
    Ok(())
}

#[tokio::test]
async fn test_find_all_orders_by_id() -> Result<()> {
    let db = setup_test_db().await?;

    for (name, price) in [("c", 3.0), ("a", 1.0), ("b", 2.0)] {
        product::save(&db, Product::new(name, "", price)).await?;
    }
    let ids: Vec<i64> = product::find_all(&db).await?.into_iter().filter_map(|p| p.id).collect();
    let mut sorted = ids.clone();
    sorted.sort();
    assert_eq!(ids.len(), 3);
    assert_eq!(ids, sorted);
    Ok(())
}

#[tokio::test]
async fn test_ids_beyond_32_bits() -> Result<()> {
    use sea_orm::{ActiveModelTrait, Set};

    let db = setup_test_db().await?;
    let big: i64 = 3_000_000_000;

    assert!(product::find_by_id(&db, big).await?.is_none());
    product::delete_by_id(&db, big).await?;

    product::ActiveModel {
        id: Set(big),
        name: Set("Old".into()),
        description: Set(String::new()),
        price: Set(1.0),
    }
    .insert(&db)
    .await?;

    let saved = product::save(&db, Product::new("New", "wide id", 2.0).with_id(big)).await?;
    assert_eq!(saved, Product::new("New", "wide id", 2.0).with_id(big));
    assert_eq!(product::find_by_id(&db, big).await?, Some(saved));

    product::delete_by_id(&db, big).await?;
    assert!(product::find_all(&db).await?.is_empty());
    Ok(())
}
