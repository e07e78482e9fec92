use crate::routes::errors::ApiError;
use blogicum_models::{
    db_conn::DbConn,
    users::{User, AUTH_COOKIE},
};
use rocket::{
    http::{Cookie, Cookies},
    request::Form,
    response::Redirect,
};
use rocket_contrib::json::Json;
use serde_json::json;
use validator::Validate;

#[get("/login")]
pub fn new(user: Option<User>) -> Json<serde_json::Value> {
    Json(json!({
        "authenticated": user.is_some(),
        "username": user.map(|u| u.username),
    }))
}

#[derive(FromForm, Validate)]
pub struct LoginForm {
    #[validate(length(min = 1, message = "We need an email or a username to identify you"))]
    pub email_or_name: String,
    #[validate(length(min = 1, message = "Your password can't be empty"))]
    pub password: String,
}

#[post("/login", data = "<form>")]
pub fn create(
    form: Form<LoginForm>,
    mut cookies: Cookies<'_>,
    conn: DbConn,
) -> Result<Redirect, ApiError> {
    form.validate()?;
    let user = User::login(&conn, &form.email_or_name, &form.password)?;
    cookies.add_private(Cookie::new(AUTH_COOKIE, user.id.to_string()));
    tracing::info!("{} logged in", user.username);

    Ok(Redirect::to("/"))
}

#[get("/logout")]
pub fn delete(mut cookies: Cookies<'_>) -> Redirect {
    if let Some(cookie) = cookies.get_private(AUTH_COOKIE) {
        cookies.remove_private(cookie);
    }
    Redirect::to("/")
}
