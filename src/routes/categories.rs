use crate::routes::{errors::ApiError, posts::post_data, Page};
use blogicum_api::posts::{CategoryData, CategoryPage};
use blogicum_models::{
    categories::Category,
    db_conn::DbConn,
    posts::Post,
    users::User,
    visibility::{Scope, ViewFilter},
    Error,
};
use chrono::Utc;
use rocket_contrib::json::Json;

#[get("/category/<slug>?<page>")]
pub fn details(
    slug: String,
    page: Option<i32>,
    conn: DbConn,
    viewer: Option<User>,
) -> Result<Json<CategoryPage>, ApiError> {
    let category = Category::find_by_slug(&conn, &slug)?;
    // An unpublished category doesn't exist, as far as readers know.
    if !category.is_published {
        return Err(Error::NotFound.into());
    }

    let page = Page::of(page);
    let now = Utc::now().naive_utc();
    let scope = Scope::Category(&category);
    let filter = ViewFilter::for_scope(viewer.as_ref(), &scope);

    let posts = Post::list_visible(&conn, filter, &scope, now, page.limits())?
        .iter()
        .map(|p| post_data(&conn, p))
        .collect::<Result<Vec<_>, _>>()?;
    let total = Post::count_visible(&conn, filter, &scope, now)?;

    Ok(Json(CategoryPage {
        category: CategoryData {
            title: category.title.clone(),
            description: category.description.clone(),
            slug: category.slug.clone(),
        },
        posts,
        page: page.number(),
        pages: Page::total(total as i32),
    }))
}
