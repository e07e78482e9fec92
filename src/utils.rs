use rocket::response::Redirect;

pub fn requires_login() -> Redirect {
    Redirect::to("/login")
}
