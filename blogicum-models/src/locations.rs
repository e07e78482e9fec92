use crate::{schema::locations, Error, Result};
use chrono::NaiveDateTime;
use diesel::{self, ExpressionMethods, QueryDsl, RunQueryDsl};

#[derive(Queryable, Identifiable, Clone, Debug)]
pub struct Location {
    pub id: i32,
    pub name: String,
    pub is_published: bool,
    pub creation_date: NaiveDateTime,
}

#[derive(Insertable)]
#[table_name = "locations"]
pub struct NewLocation {
    pub name: String,
    pub is_published: bool,
}

impl Location {
    insert!(locations, NewLocation);
    get!(locations);
}
