use crate::{posts::Post, schema::comments, users::User, Connection, Error, Result};
use chrono::NaiveDateTime;
use diesel::{self, ExpressionMethods, QueryDsl, RunQueryDsl};

#[derive(Queryable, Identifiable, Clone, Debug, AsChangeset)]
pub struct Comment {
    pub id: i32,
    pub text: String,
    pub post_id: i32,
    pub author_id: i32,
    pub creation_date: NaiveDateTime,
}

#[derive(Insertable)]
#[table_name = "comments"]
pub struct NewComment {
    pub text: String,
    pub post_id: i32,
    pub author_id: i32,
}

impl Comment {
    insert!(comments, NewComment);
    get!(comments);
    list_by!(comments, list_for_author, author_id as i32);

    pub fn get_author(&self, conn: &Connection) -> Result<User> {
        User::get(conn, self.author_id)
    }

    pub fn get_post(&self, conn: &Connection) -> Result<Post> {
        Post::get(conn, self.post_id)
    }

    /// Comments of a post, oldest first.
    pub fn for_post(conn: &Connection, post_id: i32) -> Result<Vec<Comment>> {
        comments::table
            .filter(comments::post_id.eq(post_id))
            .order((comments::creation_date.asc(), comments::id.asc()))
            .load::<Comment>(conn)
            .map_err(Error::from)
    }

    pub fn update(&self, conn: &Connection) -> Result<Self> {
        diesel::update(self).set(self).execute(conn)?;
        Self::get(conn, self.id)
    }

    pub fn delete(&self, conn: &Connection) -> Result<()> {
        diesel::delete(self).execute(conn)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::db;
    use diesel::Connection;

    #[test]
    fn for_post_is_oldest_first() {
        let conn = db();
        conn.test_transaction::<_, (), _>(|| {
            let (posts, users, _) = crate::posts::tests::fill_database(&conn);
            let post = &posts[0];
            for text in &["first", "second", "third"] {
                Comment::insert(
                    &conn,
                    NewComment {
                        text: (*text).to_owned(),
                        post_id: post.id,
                        author_id: users[1].id,
                    },
                )
                .unwrap();
            }

            let comments = Comment::for_post(&conn, post.id).unwrap();
            let texts = comments.iter().map(|c| c.text.as_str()).collect::<Vec<_>>();
            assert_eq!(texts, vec!["first", "second", "third"]);
            assert_eq!(comments[0].get_post(&conn).unwrap().id, post.id);
            assert_eq!(comments[0].get_author(&conn).unwrap().id, users[1].id);
            Ok(())
        });
    }

    #[test]
    fn update_and_delete() {
        let conn = db();
        conn.test_transaction::<_, (), _>(|| {
            let (posts, users, _) = crate::posts::tests::fill_database(&conn);
            let mut comment = Comment::insert(
                &conn,
                NewComment {
                    text: "typo".to_owned(),
                    post_id: posts[0].id,
                    author_id: users[1].id,
                },
            )
            .unwrap();

            comment.text = "fixed".to_owned();
            let comment = comment.update(&conn).unwrap();
            assert_eq!(comment.text, "fixed");

            comment.delete(&conn).unwrap();
            assert!(Comment::get(&conn, comment.id).is_err());
            Ok(())
        });
    }
}
