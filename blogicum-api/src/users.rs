use crate::posts::PostData;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UserData {
    pub id: i32,
    pub username: String,
    pub display_name: String,
    pub email: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProfilePage {
    pub profile: UserData,
    pub posts: Vec<PostData>,
    pub page: i32,
    pub pages: i32,
}
