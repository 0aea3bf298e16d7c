use serde::Serialize;

/// `POST /post-reactions`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReaction {
    pub post_id: String,
    pub user_id: String,
    pub reaction_type: String,
    pub created_at: String,
}

/// `POST /post-shares`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewShare {
    pub post_id: String,
    pub user_id: String,
    pub share_type: String,
    pub created_at: String,
}

/// `POST /user-follows`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewFollow {
    pub follower_id: String,
    pub followed_id: String,
}

/// `POST /post-bookmarks`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBookmark {
    pub user_id: String,
    pub post_id: String,
}

/// `POST /post-categories`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPostCategory {
    pub post_id: String,
    pub category_id: String,
}
