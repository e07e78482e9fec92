#![feature(proc_macro_hygiene, decl_macro)]

#[macro_use]
extern crate rocket;

use blogicum_models::{db_conn::DbPool, migrations, Connection, CONFIG};
use diesel::r2d2::ConnectionManager;
use dotenv::dotenv;

mod routes;
mod utils;

/// Initializes a database pool.
fn init_pool() -> DbPool {
    let manager = ConnectionManager::<Connection>::new(CONFIG.database_url.as_str());
    let mut builder = DbPool::builder();
    if let Some(max_size) = CONFIG.db_max_size {
        builder = builder.max_size(max_size);
    }
    if let Some(min_idle) = CONFIG.db_min_idle {
        builder = builder.min_idle(Some(min_idle));
    }
    builder.build(manager).expect("Couldn't create the database pool")
}

fn main() {
    dotenv().ok();
    tracing_subscriber::fmt().init();

    let pool = init_pool();
    let conn = pool.get().expect("Couldn't get a database connection");
    migrations::run(&conn).expect("Couldn't run the database migrations");
    drop(conn);

    tracing::info!("Starting blogicum on {}", CONFIG.base_url.as_str());

    rocket::ignite()
        .mount(
            "/",
            routes![
                routes::posts::index,
                routes::posts::details,
                routes::posts::create,
                routes::posts::create_auth,
                routes::posts::update,
                routes::posts::delete,
                routes::categories::details,
                routes::user::details,
                routes::user::edit,
                routes::user::edit_auth,
                routes::user::update,
                routes::user::update_auth,
                routes::user::create,
                routes::comments::create,
                routes::comments::create_auth,
                routes::comments::update,
                routes::comments::delete,
                routes::session::new,
                routes::session::create,
                routes::session::delete,
            ],
        )
        .register(catchers![
            routes::errors::not_found,
            routes::errors::server_error
        ])
        .manage(pool)
        .launch();
}
