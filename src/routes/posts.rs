use crate::{
    routes::{errors::ApiError, Page},
    utils,
};
use blogicum_api::posts::{PostData, PostDetail, PostPage};
use blogicum_models::{
    categories::Category,
    comments::Comment,
    db_conn::DbConn,
    locations::Location,
    posts::{NewPost, Post},
    users::User,
    visibility::{self, Scope, ViewFilter},
    Connection, Error,
};
use chrono::{NaiveDateTime, Utc};
use rocket::{request::Form, response::Redirect};
use rocket_contrib::json::Json;
use validator::Validate;

pub(crate) fn post_data(conn: &Connection, post: &Post) -> Result<PostData, Error> {
    let author = post.get_author(conn)?;
    let category = post.get_category(conn)?;
    let location = post.get_location(conn)?;
    Ok(PostData {
        id: post.id,
        title: post.title.clone(),
        text: post.text.clone(),
        pub_date: post.pub_date.format("%Y-%m-%d %H:%M:%S").to_string(),
        author: author.username,
        category: category.map(|c| c.title),
        location: location.map(|l| l.name),
        is_published: post.is_published,
        comment_count: post.count_comments(conn)?,
    })
}

#[get("/?<page>")]
pub fn index(
    page: Option<i32>,
    conn: DbConn,
    viewer: Option<User>,
) -> Result<Json<PostPage>, ApiError> {
    let page = Page::of(page);
    let now = Utc::now().naive_utc();
    let scope = Scope::Index;
    let filter = ViewFilter::for_scope(viewer.as_ref(), &scope);

    let posts = Post::list_visible(&conn, filter, &scope, now, page.limits())?
        .iter()
        .map(|p| post_data(&conn, p))
        .collect::<Result<Vec<_>, _>>()?;
    let total = Post::count_visible(&conn, filter, &scope, now)?;

    Ok(Json(PostPage {
        posts,
        page: page.number(),
        pages: Page::total(total as i32),
    }))
}

#[get("/posts/<id>")]
pub fn details(
    id: i32,
    conn: DbConn,
    viewer: Option<User>,
) -> Result<Json<PostDetail>, ApiError> {
    let post = Post::get(&conn, id)?;
    let now = Utc::now().naive_utc();
    // Hidden posts look exactly like missing ones.
    if !post.is_visible_to(&conn, viewer.as_ref(), now)? {
        return Err(Error::NotFound.into());
    }

    let comments = Comment::for_post(&conn, post.id)?
        .iter()
        .map(|c| super::comments::comment_data(&conn, c))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Json(PostDetail {
        post: post_data(&conn, &post)?,
        comments,
    }))
}

#[derive(FromForm, Validate)]
pub struct PostForm {
    #[validate(length(min = 1, max = 256, message = "Title can't be empty"))]
    pub title: String,
    #[validate(length(min = 1, message = "Your post can't be empty"))]
    pub text: String,
    pub pub_date: Option<String>,
    pub category_id: Option<i32>,
    pub location_id: Option<i32>,
    pub is_published: Option<bool>,
}

impl PostForm {
    fn pub_date(&self) -> Result<NaiveDateTime, ApiError> {
        match self.pub_date.as_deref().filter(|raw| !raw.is_empty()) {
            None => Ok(Utc::now().naive_utc()),
            Some(raw) => NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M")
                .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S"))
                .map_err(|_| ApiError(Error::InvalidValue)),
        }
    }
}

#[post("/posts/new", data = "<form>")]
pub fn create(form: Form<PostForm>, user: User, conn: DbConn) -> Result<Redirect, ApiError> {
    form.validate()?;
    let pub_date = form.pub_date()?;
    if let Some(category_id) = form.category_id {
        Category::get(&conn, category_id)?;
    }
    if let Some(location_id) = form.location_id {
        Location::get(&conn, location_id)?;
    }

    let post = Post::insert(
        &conn,
        NewPost {
            title: form.title.clone(),
            text: form.text.clone(),
            pub_date,
            author_id: user.id,
            category_id: form.category_id,
            location_id: form.location_id,
            is_published: form.is_published.unwrap_or(true),
        },
    )?;
    tracing::info!("post {} created by {}", post.id, user.username);

    Ok(Redirect::to(format!("/profile/{}", user.username)))
}

#[post("/posts/new", rank = 2)]
pub fn create_auth() -> Redirect {
    utils::requires_login()
}

#[post("/posts/<id>/edit", data = "<form>")]
pub fn update(
    id: i32,
    form: Form<PostForm>,
    user: Option<User>,
    conn: DbConn,
) -> Result<Redirect, ApiError> {
    let mut post = Post::get(&conn, id)?;
    // Non-authors are sent back to the public view of the post.
    if !visibility::can_modify(user.as_ref(), &post) {
        return Ok(Redirect::to(format!("/posts/{}", id)));
    }
    form.validate()?;
    if let Some(category_id) = form.category_id {
        Category::get(&conn, category_id)?;
    }
    if let Some(location_id) = form.location_id {
        Location::get(&conn, location_id)?;
    }

    post.title = form.title.clone();
    post.text = form.text.clone();
    post.pub_date = form.pub_date()?;
    post.category_id = form.category_id;
    post.location_id = form.location_id;
    post.is_published = form.is_published.unwrap_or(post.is_published);
    post.update(&conn)?;

    Ok(Redirect::to(format!("/posts/{}", id)))
}

#[post("/posts/<id>/delete")]
pub fn delete(id: i32, user: Option<User>, conn: DbConn) -> Result<Redirect, ApiError> {
    let post = Post::get(&conn, id)?;
    if !visibility::can_modify(user.as_ref(), &post) {
        return Err(Error::NotFound.into());
    }
    let author = post.get_author(&conn)?;
    post.delete(&conn)?;
    tracing::info!("post {} deleted by {}", id, author.username);

    Ok(Redirect::to(format!("/profile/{}", author.username)))
}
