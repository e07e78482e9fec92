use crate::{routes::errors::ApiError, utils};
use blogicum_api::comments::CommentData;
use blogicum_models::{
    comments::{Comment, NewComment},
    db_conn::DbConn,
    posts::Post,
    users::User,
    visibility, Connection, Error,
};
use rocket::{request::Form, response::Redirect};
use validator::Validate;

pub(crate) fn comment_data(conn: &Connection, comment: &Comment) -> Result<CommentData, Error> {
    let author = comment.get_author(conn)?;
    Ok(CommentData {
        id: comment.id,
        post_id: comment.post_id,
        author: author.username,
        text: comment.text.clone(),
        creation_date: comment
            .creation_date
            .format("%Y-%m-%d %H:%M:%S")
            .to_string(),
    })
}

#[derive(FromForm, Validate)]
pub struct CommentForm {
    #[validate(length(min = 1, message = "Your comment can't be empty"))]
    pub text: String,
}

#[post("/posts/<id>/comment", data = "<form>")]
pub fn create(
    id: i32,
    form: Form<CommentForm>,
    user: User,
    conn: DbConn,
) -> Result<Redirect, ApiError> {
    // Commenting only requires being logged in; the target post is
    // addressed by id and is not run through the visibility check.
    let post = Post::get(&conn, id)?;
    form.validate()?;

    Comment::insert(
        &conn,
        NewComment {
            text: form.text.clone(),
            post_id: post.id,
            author_id: user.id,
        },
    )?;

    Ok(Redirect::to(format!("/posts/{}", id)))
}

#[post("/posts/<_id>/comment", rank = 2)]
pub fn create_auth(_id: i32) -> Redirect {
    utils::requires_login()
}

#[post("/posts/<post_id>/comment/<id>/edit", data = "<form>")]
pub fn update(
    post_id: i32,
    id: i32,
    form: Form<CommentForm>,
    user: Option<User>,
    conn: DbConn,
) -> Result<Redirect, ApiError> {
    let mut comment = Comment::get(&conn, id)?;
    if comment.post_id != post_id {
        return Err(Error::NotFound.into());
    }
    if !visibility::can_modify(user.as_ref(), &comment) {
        return Ok(Redirect::to(format!("/posts/{}", post_id)));
    }
    form.validate()?;

    comment.text = form.text.clone();
    comment.update(&conn)?;

    Ok(Redirect::to(format!("/posts/{}", post_id)))
}

#[post("/posts/<post_id>/comment/<id>/delete")]
pub fn delete(
    post_id: i32,
    id: i32,
    user: Option<User>,
    conn: DbConn,
) -> Result<Redirect, ApiError> {
    let comment = Comment::get(&conn, id)?;
    if comment.post_id != post_id || !visibility::can_modify(user.as_ref(), &comment) {
        return Err(Error::NotFound.into());
    }
    comment.delete(&conn)?;

    Ok(Redirect::to(format!("/posts/{}", post_id)))
}
