use crate::{db_conn::DbConn, schema::users, Connection, Error, Result};
use chrono::NaiveDateTime;
use diesel::{self, ExpressionMethods, QueryDsl, RunQueryDsl};
use rocket::{
    outcome::IntoOutcome,
    request::{self, FromRequest, Request},
};

pub const AUTH_COOKIE: &str = "user_id";

#[derive(Queryable, Identifiable, Clone, Debug, PartialEq)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub display_name: String,
    pub email: Option<String>,
    pub hashed_password: Option<String>,
    pub creation_date: NaiveDateTime,
}

#[derive(Insertable)]
#[table_name = "users"]
pub struct NewUser {
    pub username: String,
    pub display_name: String,
    pub email: Option<String>,
    pub hashed_password: Option<String>,
}

impl User {
    insert!(users, NewUser);
    get!(users);
    find_by!(users, find_by_name, username as &str);
    find_by!(users, find_by_email, email as &str);

    pub fn hash_pass(pass: &str) -> Result<String> {
        bcrypt::hash(pass, 10).map_err(Error::from)
    }

    pub fn auth(&self, pass: &str) -> bool {
        self.hashed_password
            .as_ref()
            .map(|hashed| bcrypt::verify(pass, hashed).unwrap_or(false))
            .unwrap_or(false)
    }

    /// Authenticates with either a username or an email address.
    pub fn login(conn: &Connection, ident: &str, password: &str) -> Result<User> {
        let user = User::find_by_name(conn, ident)
            .or_else(|_| User::find_by_email(conn, ident))?;
        if user.auth(password) {
            Ok(user)
        } else {
            tracing::warn!("failed login for {}", ident);
            Err(Error::Unauthorized)
        }
    }

    pub fn update(
        &self,
        conn: &Connection,
        username: &str,
        display_name: &str,
        email: Option<&str>,
    ) -> Result<User> {
        diesel::update(self)
            .set((
                users::username.eq(username),
                users::display_name.eq(display_name),
                users::email.eq(email),
            ))
            .execute(conn)?;
        User::get(conn, self.id)
    }

    pub fn delete(&self, conn: &Connection) -> Result<()> {
        for post in crate::posts::Post::list_for_author(conn, self.id)? {
            post.delete(conn)?;
        }
        for comment in crate::comments::Comment::list_for_author(conn, self.id)? {
            comment.delete(conn)?;
        }
        diesel::delete(self).execute(conn)?;
        Ok(())
    }
}

impl NewUser {
    pub fn new_local(
        conn: &Connection,
        username: String,
        display_name: String,
        email: String,
        password: String,
    ) -> Result<User> {
        let hashed = User::hash_pass(&password)?;
        User::insert(
            conn,
            NewUser {
                username,
                display_name,
                email: Some(email),
                hashed_password: Some(hashed),
            },
        )
    }
}

impl<'a, 'r> FromRequest<'a, 'r> for User {
    type Error = ();

    fn from_request(request: &'a Request<'r>) -> request::Outcome<User, ()> {
        let conn = request.guard::<DbConn>()?;
        request
            .cookies()
            .get_private(AUTH_COOKIE)
            .and_then(|cookie| cookie.value().parse::<i32>().ok())
            .and_then(|id| User::get(&conn, id).ok())
            .or_forward(())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::{tests::db, Connection as Conn};
    use diesel::Connection;

    pub(crate) fn fill_database(conn: &Conn) -> Vec<User> {
        let alice = NewUser::new_local(
            conn,
            "alice".to_owned(),
            "Alice".to_owned(),
            "alice@example.com".to_owned(),
            "alice_password".to_owned(),
        )
        .unwrap();
        let bob = NewUser::new_local(
            conn,
            "bob".to_owned(),
            "Bob".to_owned(),
            "bob@example.com".to_owned(),
            "bob_password".to_owned(),
        )
        .unwrap();
        vec![alice, bob]
    }

    #[test]
    fn find_by() {
        let conn = db();
        conn.test_transaction::<_, (), _>(|| {
            let users = fill_database(&conn);
            assert_eq!(
                users[0].id,
                User::find_by_name(&conn, "alice").unwrap().id
            );
            assert_eq!(
                users[1].id,
                User::find_by_email(&conn, "bob@example.com").unwrap().id
            );
            assert!(User::find_by_name(&conn, "nobody").is_err());
            Ok(())
        });
    }

    #[test]
    fn login() {
        let conn = db();
        conn.test_transaction::<_, (), _>(|| {
            fill_database(&conn);
            let user = User::login(&conn, "alice", "alice_password").unwrap();
            assert_eq!(user.username, "alice");
            let user = User::login(&conn, "bob@example.com", "bob_password").unwrap();
            assert_eq!(user.username, "bob");
            assert!(matches!(
                User::login(&conn, "alice", "wrong"),
                Err(Error::Unauthorized)
            ));
            assert!(matches!(
                User::login(&conn, "nobody", "alice_password"),
                Err(Error::NotFound)
            ));
            Ok(())
        });
    }

    #[test]
    fn update() {
        let conn = db();
        conn.test_transaction::<_, (), _>(|| {
            let users = fill_database(&conn);
            let updated = users[0]
                .update(&conn, "alice2", "Alice Liddell", Some("alice2@example.com"))
                .unwrap();
            assert_eq!(updated.username, "alice2");
            assert_eq!(updated.display_name, "Alice Liddell");
            assert_eq!(updated.email.as_deref(), Some("alice2@example.com"));
            Ok(())
        });
    }

    #[test]
    fn delete() {
        let conn = db();
        conn.test_transaction::<_, (), _>(|| {
            let users = fill_database(&conn);
            assert!(User::get(&conn, users[0].id).is_ok());
            users[0].delete(&conn).unwrap();
            assert!(User::get(&conn, users[0].id).is_err());
            Ok(())
        });
    }
}
