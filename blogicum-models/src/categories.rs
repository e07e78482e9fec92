use crate::{schema::categories, Error, Result};
use chrono::NaiveDateTime;
use diesel::{self, ExpressionMethods, QueryDsl, RunQueryDsl};

#[derive(Queryable, Identifiable, Clone, Debug)]
#[table_name = "categories"]
pub struct Category {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub slug: String,
    pub is_published: bool,
    pub creation_date: NaiveDateTime,
}

#[derive(Insertable)]
#[table_name = "categories"]
pub struct NewCategory {
    pub title: String,
    pub description: String,
    pub slug: String,
    pub is_published: bool,
}

impl Category {
    insert!(categories, NewCategory);
    get!(categories);
    find_by!(categories, find_by_slug, slug as &str);
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::{tests::db, Connection as Conn};
    use diesel::Connection;

    pub(crate) fn fill_database(conn: &Conn) -> Vec<Category> {
        let nature = Category::insert(
            conn,
            NewCategory {
                title: "Nature".to_owned(),
                description: "Posts about the outdoors".to_owned(),
                slug: "nature".to_owned(),
                is_published: true,
            },
        )
        .unwrap();
        let drafts = Category::insert(
            conn,
            NewCategory {
                title: "Secret drafts".to_owned(),
                description: "Not ready yet".to_owned(),
                slug: "drafts".to_owned(),
                is_published: false,
            },
        )
        .unwrap();
        vec![nature, drafts]
    }

    #[test]
    fn find_by_slug() {
        let conn = db();
        conn.test_transaction::<_, (), _>(|| {
            let categories = fill_database(&conn);
            assert_eq!(
                categories[0].id,
                Category::find_by_slug(&conn, "nature").unwrap().id
            );
            assert!(Category::find_by_slug(&conn, "missing").is_err());
            Ok(())
        });
    }
}
