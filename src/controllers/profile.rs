// src/controllers/profile.rs

use validator::Validate;

use crate::{
    controllers::feed::{FeedController, FeedLoad, FeedSource},
    error::AppError,
    models::user::{Profile, ProfileUpdate, UploadUrlRequest},
    routes::Navigation,
    state::AppState,
    views::{cards, profile as profile_view},
};

/// A public profile page, ready to show.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfilePage {
    pub profile: Profile,
    pub posts_count: usize,
    pub header_html: String,
    pub about_html: String,
    pub posts_html: String,
}

/// Loads `/pages/profile.html?userId=...`.
///
/// The profile itself is required. The post list is not: a failure there
/// leaves an error notice in place of the cards.
pub async fn load_profile_page(app: &AppState, user_id: &str) -> Result<ProfilePage, AppError> {
    let profile = app.api.get_profile(user_id).await.map_err(|e| {
        tracing::error!("Error fetching profile {}: {}", user_id, e);
        e
    })?;

    let feed = FeedController::new(app.clone(), FeedSource::UserPosts(user_id.to_string()));
    let (posts_count, posts_html) = match feed.load_next().await {
        Ok(FeedLoad::Page(page)) => (page.post_ids.len(), page.html),
        Ok(FeedLoad::Exhausted(message)) => (0, cards::notice(&message)),
        Ok(FeedLoad::Dropped) => (0, String::new()),
        Err(_) => (0, cards::notice("Error loading posts.")),
    };

    Ok(ProfilePage {
        header_html: profile_view::profile_header(&profile, posts_count, &app.config.default_avatar_url),
        about_html: profile_view::about(&profile),
        profile,
        posts_count,
        posts_html,
    })
}

/// New profile picture chosen in the edit form.
#[derive(Debug, Clone)]
pub struct AvatarUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// The logged-in user's dashboard.
pub struct Dashboard {
    app: AppState,
    user_id: String,
}

impl Dashboard {
    /// Fails with `AuthRequired` for anonymous visitors; the shell sends them to
    /// the login page.
    pub fn open(app: AppState) -> Result<Self, AppError> {
        let Some(user_id) = app.session.user_id() else {
            return Err(AppError::AuthRequired(
                "You are not logged in. Redirecting to login page.".to_string(),
            ));
        };
        Ok(Self { app, user_id })
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub async fn profile(&self) -> Result<Profile, AppError> {
        self.app.api.get_profile(&self.user_id).await
    }

    /// Header and about section of the user's own profile.
    pub async fn render_profile(&self) -> Result<String, AppError> {
        let profile = self.profile().await?;
        let posts_count = match self.app.api.user_posts(&self.user_id).await {
            Ok(posts) => posts.len(),
            Err(e) => {
                tracing::warn!("Could not count posts for {}: {}", self.user_id, e);
                0
            }
        };
        Ok(format!(
            "{}{}",
            profile_view::profile_header(&profile, posts_count, &self.app.config.default_avatar_url),
            profile_view::about(&profile)
        ))
    }

    pub async fn my_posts_html(&self) -> Result<String, AppError> {
        let posts = self.app.api.user_posts(&self.user_id).await?;
        if posts.is_empty() {
            return Ok(cards::notice("No posts found yet. Start creating some!"));
        }
        Ok(posts.iter().map(cards::dashboard_post_card).collect())
    }

    pub async fn bookmarks_html(&self) -> Result<String, AppError> {
        let feed = FeedController::new(self.app.clone(), FeedSource::Bookmarks(self.user_id.clone()));
        match feed.load_next().await? {
            FeedLoad::Page(page) => Ok(page.html),
            FeedLoad::Exhausted(message) => Ok(cards::notice(&message)),
            FeedLoad::Dropped => Ok(String::new()),
        }
    }

    /// Current values for the edit form.
    pub async fn edit_form(&self) -> Result<ProfileUpdate, AppError> {
        Ok(ProfileUpdate::from_profile(&self.profile().await?))
    }

    /// Saves the edit form.
    ///
    /// With a new avatar: ask for an upload URL, `PUT` the bytes there, then
    /// save the profile pointing at the returned file URL. Returns the profile
    /// as re-fetched after the save.
    pub async fn update_profile(&self, mut update: ProfileUpdate, avatar: Option<AvatarUpload>) -> Result<Profile, AppError> {
        update.validate()?;

        match avatar {
            Some(file) => {
                if !file.content_type.starts_with("image/") {
                    return Err(AppError::Validation("Only image files are allowed".to_string()));
                }

                // 1. Pre-signed URL
                let target = self
                    .app
                    .api
                    .profile_upload_url(&UploadUrlRequest {
                        user_id: self.user_id.clone(),
                        file_name: file.file_name.clone(),
                        file_type: file.content_type.clone(),
                    })
                    .await?;

                // 2. Raw upload
                self.app
                    .api
                    .upload_raw(&target.upload_url, &file.content_type, file.bytes)
                    .await?;
                tracing::info!("Uploaded profile picture for {}", self.user_id);

                update.profile_picture_url = target.file_url;
            }
            None => {
                if update.profile_picture_url == self.app.config.default_avatar_url {
                    update.profile_picture_url.clear();
                }
            }
        }

        // 3. Save, then show what the server now holds
        self.app.api.update_profile(&self.user_id, &update).await?;
        tracing::info!("Profile {} updated", self.user_id);
        self.profile().await
    }

    pub fn logout(&self) -> Result<Navigation, AppError> {
        self.app.session.clear()?;
        tracing::info!("User {} logged out from dashboard", self.user_id);
        Ok(Navigation::Login)
    }
}
