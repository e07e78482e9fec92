use crate::{Connection, Error, Result};

embed_migrations!("../migrations");

/// Brings the database up to date with the embedded migrations.
pub fn run(conn: &Connection) -> Result<()> {
    embedded_migrations::run(conn).map_err(|_| Error::Migration)
}
