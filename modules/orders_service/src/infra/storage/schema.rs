//! Table bootstrap for fresh databases
//!
//! Creates the tables from the entity definitions when they are missing.
//! Existing tables are left untouched; there is no versioned migration here.

use super::entity::{company, order, order_type};
use sea_orm::{ConnectionTrait, DatabaseConnection, EntityTrait, Schema};

/// Create `Company`, `Order_Types` and `Orders` if they do not exist yet
pub async fn ensure_schema(db: &DatabaseConnection) -> anyhow::Result<()> {
    let backend = db.get_database_backend();
    let schema = Schema::new(backend);

    create_if_missing(db, &schema, company::Entity).await?;
    create_if_missing(db, &schema, order_type::Entity).await?;
    // Orders last: it references the two catalog tables
    create_if_missing(db, &schema, order::Entity).await?;

    tracing::info!(?backend, "orders schema ready");
    Ok(())
}

async fn create_if_missing<E: EntityTrait>(
    db: &DatabaseConnection,
    schema: &Schema,
    entity: E,
) -> anyhow::Result<()> {
    let mut stmt = schema.create_table_from_entity(entity);
    stmt.if_not_exists();
    db.execute(db.get_database_backend().build(&stmt)).await?;
    Ok(())
}
