use serde::Deserialize;

/// Account record as listed by `/users`. Creation happens through the
/// registration flow, not here.
#[derive(Debug, Clone, Deserialize)]
pub struct UserAccount {
    #[serde(rename = "Id")]
    pub id: i64,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Email")]
    pub email: String,
    #[serde(rename = "User_role")]
    pub role: String,
    #[serde(rename = "Created_at", default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UserList {
    #[serde(default)]
    pub users: Vec<UserAccount>,
}
