use crate::comments::CommentData;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PostData {
    pub id: i32,
    pub title: String,
    pub text: String,
    pub pub_date: String,
    pub author: String,
    pub category: Option<String>,
    pub location: Option<String>,
    pub is_published: bool,
    pub comment_count: i64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PostPage {
    pub posts: Vec<PostData>,
    pub page: i32,
    pub pages: i32,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PostDetail {
    pub post: PostData,
    pub comments: Vec<CommentData>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CategoryData {
    pub title: String,
    pub description: String,
    pub slug: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CategoryPage {
    pub category: CategoryData,
    pub posts: Vec<PostData>,
    pub page: i32,
    pub pages: i32,
}
