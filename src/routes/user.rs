use crate::{
    routes::{errors::ApiError, posts::post_data, Page},
    utils,
};
use blogicum_api::users::{ProfilePage, UserData};
use blogicum_models::{
    db_conn::DbConn,
    posts::Post,
    users::{NewUser, User},
    visibility::{Scope, ViewFilter},
    Error,
};
use chrono::Utc;
use rocket::{request::Form, response::Redirect};
use rocket_contrib::json::Json;
use validator::Validate;

fn user_data(user: &User) -> UserData {
    UserData {
        id: user.id,
        username: user.username.clone(),
        display_name: user.display_name.clone(),
        email: user.email.clone(),
    }
}

// Ranked after the /profile/edit routes, so "edit" is never read as a
// username.
#[get("/profile/<username>?<page>", rank = 3)]
pub fn details(
    username: String,
    page: Option<i32>,
    conn: DbConn,
    viewer: Option<User>,
) -> Result<Json<ProfilePage>, ApiError> {
    let owner = User::find_by_name(&conn, &username)?;
    let page = Page::of(page);
    let now = Utc::now().naive_utc();
    let scope = Scope::Profile(&owner);
    let filter = ViewFilter::for_scope(viewer.as_ref(), &scope);

    let posts = Post::list_visible(&conn, filter, &scope, now, page.limits())?
        .iter()
        .map(|p| post_data(&conn, p))
        .collect::<Result<Vec<_>, _>>()?;
    let total = Post::count_visible(&conn, filter, &scope, now)?;

    Ok(Json(ProfilePage {
        profile: user_data(&owner),
        posts,
        page: page.number(),
        pages: Page::total(total as i32),
    }))
}

#[derive(FromForm, Validate)]
pub struct NewUserForm {
    #[validate(length(min = 1, max = 150, message = "Username can't be empty"))]
    pub username: String,
    pub display_name: Option<String>,
    #[validate(email(message = "Invalid email"))]
    pub email: String,
    #[validate(length(min = 8, message = "Password should be at least 8 characters long"))]
    pub password: String,
}

#[post("/signup", data = "<form>")]
pub fn create(form: Form<NewUserForm>, conn: DbConn) -> Result<Redirect, ApiError> {
    form.validate()?;
    if User::find_by_name(&conn, &form.username).is_ok() {
        return Err(Error::InvalidValue.into());
    }

    let user = NewUser::new_local(
        &conn,
        form.username.clone(),
        form.display_name.clone().unwrap_or_else(|| form.username.clone()),
        form.email.clone(),
        form.password.clone(),
    )?;
    tracing::info!("user {} signed up", user.username);

    Ok(Redirect::to("/login"))
}

#[derive(FromForm, Validate)]
pub struct UpdateProfileForm {
    #[validate(length(min = 1, max = 150, message = "Username can't be empty"))]
    pub username: String,
    pub display_name: Option<String>,
    #[validate(email(message = "Invalid email"))]
    pub email: Option<String>,
}

#[get("/profile/edit")]
pub fn edit(user: User) -> Json<UserData> {
    Json(user_data(&user))
}

#[get("/profile/edit", rank = 2)]
pub fn edit_auth() -> Redirect {
    utils::requires_login()
}

#[post("/profile/edit", data = "<form>")]
pub fn update(
    form: Form<UpdateProfileForm>,
    user: User,
    conn: DbConn,
) -> Result<Redirect, ApiError> {
    form.validate()?;
    if form.username != user.username && User::find_by_name(&conn, &form.username).is_ok() {
        return Err(Error::InvalidValue.into());
    }

    let updated = user.update(
        &conn,
        &form.username,
        form.display_name.as_deref().unwrap_or(&user.display_name),
        form.email.as_deref().or(user.email.as_deref()),
    )?;

    Ok(Redirect::to(format!("/profile/{}", updated.username)))
}

#[post("/profile/edit", rank = 2)]
pub fn update_auth() -> Redirect {
    utils::requires_login()
}
