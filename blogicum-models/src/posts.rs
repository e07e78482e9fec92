use crate::{
    categories::Category,
    comments::Comment,
    locations::Location,
    schema::{categories, comments, posts},
    users::User,
    visibility::{self, Scope, ViewFilter},
    Connection, Error, Result,
};
use chrono::NaiveDateTime;
use diesel::{
    self, BoolExpressionMethods, ExpressionMethods, NullableExpressionMethods, QueryDsl,
    RunQueryDsl,
};

#[derive(Queryable, Identifiable, Clone, Debug, AsChangeset)]
#[changeset_options(treat_none_as_null = "true")]
pub struct Post {
    pub id: i32,
    pub title: String,
    pub text: String,
    pub pub_date: NaiveDateTime,
    pub author_id: i32,
    pub category_id: Option<i32>,
    pub location_id: Option<i32>,
    pub is_published: bool,
    pub creation_date: NaiveDateTime,
}

#[derive(Insertable)]
#[table_name = "posts"]
pub struct NewPost {
    pub title: String,
    pub text: String,
    pub pub_date: NaiveDateTime,
    pub author_id: i32,
    pub category_id: Option<i32>,
    pub location_id: Option<i32>,
    pub is_published: bool,
}

impl Post {
    insert!(posts, NewPost);
    get!(posts);
    list_by!(posts, list_for_author, author_id as i32);

    pub fn update(&self, conn: &Connection) -> Result<Self> {
        diesel::update(self).set(self).execute(conn)?;
        Self::get(conn, self.id)
    }

    pub fn delete(&self, conn: &Connection) -> Result<()> {
        for comment in Comment::for_post(conn, self.id)? {
            comment.delete(conn)?;
        }
        diesel::delete(self).execute(conn)?;
        Ok(())
    }

    pub fn get_author(&self, conn: &Connection) -> Result<User> {
        User::get(conn, self.author_id)
    }

    pub fn get_category(&self, conn: &Connection) -> Result<Option<Category>> {
        self.category_id
            .map(|id| Category::get(conn, id))
            .transpose()
    }

    pub fn get_location(&self, conn: &Connection) -> Result<Option<Location>> {
        self.location_id
            .map(|id| Location::get(conn, id))
            .transpose()
    }

    pub fn count_comments(&self, conn: &Connection) -> Result<i64> {
        comments::table
            .filter(comments::post_id.eq(self.id))
            .count()
            .get_result(conn)
            .map_err(Error::from)
    }

    /// Whether this post may be shown to `viewer`. A `false` answer is
    /// reported upstream as "not found", never as "forbidden".
    pub fn is_visible_to(
        &self,
        conn: &Connection,
        viewer: Option<&User>,
        now: NaiveDateTime,
    ) -> Result<bool> {
        let category = self.get_category(conn)?;
        Ok(visibility::is_visible(viewer, self, category.as_ref(), now))
    }

    /// One page of the posts a request may see, newest first.
    ///
    /// The SQL filter must stay in sync with `visibility::is_public`. Ties
    /// on `pub_date` are broken by id, which is insertion order.
    pub fn list_visible(
        conn: &Connection,
        filter: ViewFilter,
        scope: &Scope<'_>,
        now: NaiveDateTime,
        (min, max): (i32, i32),
    ) -> Result<Vec<Post>> {
        let mut query = posts::table.into_boxed();
        match scope {
            Scope::Index => {}
            Scope::Category(category) => {
                query = query.filter(posts::category_id.eq(category.id))
            }
            Scope::Profile(owner) => query = query.filter(posts::author_id.eq(owner.id)),
        }
        if let ViewFilter::Public = filter {
            let published_categories = categories::table
                .filter(categories::is_published.eq(true))
                .select(categories::id.nullable());
            query = query
                .filter(posts::is_published.eq(true))
                .filter(posts::pub_date.le(now))
                .filter(
                    posts::category_id
                        .is_null()
                        .or(posts::category_id.eq_any(published_categories)),
                );
        }
        query
            .order((posts::pub_date.desc(), posts::id.asc()))
            .offset(min.into())
            .limit((max - min).into())
            .load::<Post>(conn)
            .map_err(Error::from)
    }

    /// How many posts `list_visible` would return in total, for page math.
    pub fn count_visible(
        conn: &Connection,
        filter: ViewFilter,
        scope: &Scope<'_>,
        now: NaiveDateTime,
    ) -> Result<i64> {
        let mut query = posts::table.into_boxed();
        match scope {
            Scope::Index => {}
            Scope::Category(category) => {
                query = query.filter(posts::category_id.eq(category.id))
            }
            Scope::Profile(owner) => query = query.filter(posts::author_id.eq(owner.id)),
        }
        if let ViewFilter::Public = filter {
            let published_categories = categories::table
                .filter(categories::is_published.eq(true))
                .select(categories::id.nullable());
            query = query
                .filter(posts::is_published.eq(true))
                .filter(posts::pub_date.le(now))
                .filter(
                    posts::category_id
                        .is_null()
                        .or(posts::category_id.eq_any(published_categories)),
                );
        }
        query.count().get_result(conn).map_err(Error::from)
    }
}
