//! Schema setup derived from the entities.
//!
//! The backing store owns durability; this just makes sure the tables exist
//! before the module starts serving.

use sea_orm::{ConnectionTrait, DatabaseConnection, Schema};

use crate::infra::storage::entity::{category, listing, profile, user_account};

pub async fn create_tables(db: &DatabaseConnection) -> anyhow::Result<()> {
    let backend = db.get_database_backend();
    let schema = Schema::new(backend);

    let mut statements = vec![
        schema.create_table_from_entity(listing::Entity),
        schema.create_table_from_entity(category::Entity),
        schema.create_table_from_entity(profile::Entity),
        schema.create_table_from_entity(user_account::Entity),
    ];

    for stmt in &mut statements {
        stmt.if_not_exists();
        db.execute(backend.build(&*stmt)).await?;
    }

    Ok(())
}
