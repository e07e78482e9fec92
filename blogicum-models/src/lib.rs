#[macro_use]
extern crate diesel;
#[macro_use]
extern crate diesel_migrations;
#[macro_use]
extern crate lazy_static;

use crate::config::Config;

#[cfg(all(feature = "sqlite", not(feature = "postgres")))]
pub type Connection = diesel::SqliteConnection;

#[cfg(all(not(feature = "sqlite"), feature = "postgres"))]
pub type Connection = diesel::PgConnection;

/// All the possible errors that can be encountered in this crate
#[derive(Debug)]
pub enum Error {
    Db(diesel::result::Error),
    Migration,
    NotFound,
    Unauthorized,
    InvalidValue,
}

impl From<diesel::result::Error> for Error {
    fn from(err: diesel::result::Error) -> Self {
        match err {
            diesel::result::Error::NotFound => Error::NotFound,
            _ => Error::Db(err),
        }
    }
}

impl From<bcrypt::BcryptError> for Error {
    fn from(_: bcrypt::BcryptError) -> Self {
        Error::InvalidValue
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// Adds a function to a model, to retrieve an instance by a given column
///
/// # Usage
///
/// ```ignore
/// impl Model {
///     find_by!(model_table, find_by_name, name as &str);
/// }
///
/// // Get a Model with `name == "jean"`
/// Model::find_by_name(&conn, "jean").expect("Model jean not found");
/// ```
macro_rules! find_by {
    ($table:ident, $fn:ident, $($col:ident as $type:ty),+) => {
        /// Try to find a $table with a given $col
        pub fn $fn(conn: &crate::Connection, $($col: $type),+) -> Result<Self> {
            $table::table
                $(.filter($table::$col.eq($col)))+
                .first(conn)
                .map_err(Error::from)
        }
    };
}

/// List all rows of a model, with an optional filter
macro_rules! list_by {
    ($table:ident, $fn:ident, $($col:ident as $type:ty),+) => {
        /// Try to find several $table with a given $col
        pub fn $fn(conn: &crate::Connection, $($col: $type),+) -> Result<Vec<Self>> {
            $table::table
                $(.filter($table::$col.eq($col)))+
                .load::<Self>(conn)
                .map_err(Error::from)
        }
    };
}

/// Adds a function to a model to retrieve an instance by its id
macro_rules! get {
    ($table:ident) => {
        pub fn get(conn: &crate::Connection, id: i32) -> Result<Self> {
            $table::table
                .filter($table::id.eq(id))
                .first(conn)
                .map_err(Error::from)
        }
    };
}

/// Adds a function to a model to insert a new row
///
/// # Usage
///
/// ```ignore
/// impl Model {
///     insert!(model_table, NewModelType);
/// }
///
/// // Insert a new row
/// Model::insert(&conn, NewModelType::new());
/// ```
macro_rules! insert {
    ($table:ident, $from:ty) => {
        last!($table);
        pub fn insert(conn: &crate::Connection, new: $from) -> Result<Self> {
            diesel::insert_into($table::table)
                .values(new)
                .execute(conn)?;
            Self::last(conn)
        }
    };
}

/// Returns the last row of a table.
///
/// Mostly useful after an insertion, as SQLite doesn't support
/// `RETURNING` clauses.
macro_rules! last {
    ($table:ident) => {
        pub fn last(conn: &crate::Connection) -> Result<Self> {
            $table::table
                .order_by($table::id.desc())
                .first(conn)
                .map_err(Error::from)
        }
    };
}

lazy_static! {
    pub static ref CONFIG: Config = Config::default();
}

pub const ITEMS_PER_PAGE: i32 = 10;

pub mod categories;
pub mod comments;
pub mod config;
pub mod db_conn;
pub mod locations;
pub mod migrations;
pub mod posts;
pub mod schema;
pub mod users;
pub mod visibility;

#[cfg(test)]
pub(crate) mod tests {
    use crate::{migrations, Connection as Conn};
    use diesel::Connection;

    pub(crate) fn db() -> Conn {
        let conn =
            Conn::establish(":memory:").expect("Couldn't connect to the database");
        migrations::run(&conn).expect("Couldn't run migrations");
        conn
    }
}
