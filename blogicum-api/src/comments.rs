#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CommentData {
    pub id: i32,
    pub post_id: i32,
    pub author: String,
    pub text: String,
    pub creation_date: String,
}
