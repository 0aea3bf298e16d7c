// src/controllers/compose.rs

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use validator::Validate;

use crate::{
    error::AppError,
    models::{
        category::Category,
        interaction::NewPostCategory,
        post::{MediaUploadRequest, NewPost},
    },
    routes::Navigation,
    state::AppState,
    utils::html::escape_attr,
};

/// Media the editor embeds after an upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Embed {
    Image(String),
    Video(String),
}

impl Embed {
    pub fn url(&self) -> &str {
        match self {
            Embed::Image(url) | Embed::Video(url) => url,
        }
    }

    /// Markup inserted at the cursor.
    pub fn html(&self) -> String {
        match self {
            Embed::Image(url) => format!(r#"<img src="{}">"#, escape_attr(url)),
            Embed::Video(url) => format!(r#"<video src="{}" controls></video>"#, escape_attr(url)),
        }
    }
}

/// A file picked in the editor's media dialog.
#[derive(Debug, Clone)]
pub struct MediaFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, Default)]
pub struct PostDraft {
    pub title: String,
    /// Editor HTML.
    pub content: String,
    pub category_id: String,
}

impl PostDraft {
    fn is_complete(&self) -> bool {
        let content = self.content.trim();
        !self.title.trim().is_empty()
            && !content.is_empty()
            && content != "<p><br></p>"
            && !self.category_id.trim().is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Published {
    pub post_id: String,
    /// False when the post exists but the category link could not be saved.
    pub category_linked: bool,
    pub navigation: Navigation,
}

/// The create-post page.
pub struct Composer {
    app: AppState,
    author_id: String,
}

impl Composer {
    pub fn open(app: AppState) -> Result<Self, AppError> {
        let Some(author_id) = app.session.user_id() else {
            return Err(AppError::AuthRequired("Please log in to create a post.".to_string()));
        };
        Ok(Self { app, author_id })
    }

    /// Options of the category picker.
    pub async fn categories(&self) -> Result<Vec<Category>, AppError> {
        self.app.api.list_categories().await.map_err(|e| {
            tracing::error!("Error fetching categories: {}", e);
            AppError::Request("Error loading categories. Please try again later.".to_string())
        })
    }

    /// Uploads an image or video and returns what to embed.
    pub async fn upload_media(&self, file: MediaFile) -> Result<Embed, AppError> {
        let is_image = file.content_type.starts_with("image/");
        let is_video = file.content_type.starts_with("video/");
        if !is_image && !is_video {
            return Err(AppError::Validation("Only image and video files are supported.".to_string()));
        }

        let request = MediaUploadRequest {
            file_data: STANDARD.encode(&file.bytes),
            file_name: file.file_name,
            content_type: file.content_type,
        };
        let url = self.app.api.upload_media(&request).await?;
        let embed = if is_image { Embed::Image(url) } else { Embed::Video(url) };
        tracing::info!("Uploaded {} to {}", request.file_name, embed.url());

        Ok(embed)
    }

    /// Publishes the draft, then links it to the chosen category.
    pub async fn submit(&self, draft: &PostDraft) -> Result<Published, AppError> {
        if !draft.is_complete() {
            return Err(AppError::Validation(
                "Please fill in all required fields (Title, Content, Category).".to_string(),
            ));
        }

        let new_post = NewPost {
            title: draft.title.trim().to_string(),
            content: draft.content.clone(),
            author_id: self.author_id.clone(),
            status: "published".to_string(),
        };
        new_post.validate()?;

        let post_id = self.app.api.create_post(&new_post).await?;
        tracing::info!("Created post {}", post_id);

        let link = NewPostCategory {
            post_id: post_id.clone(),
            category_id: draft.category_id.clone(),
        };
        let category_linked = match self.app.api.create_post_category(&link).await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("Failed to link post {} to category {}: {}", post_id, draft.category_id, e);
                false
            }
        };

        Ok(Published {
            navigation: Navigation::Post(post_id.clone()),
            post_id,
            category_linked,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_editor_counts_as_missing_content() {
        let draft = PostDraft {
            title: "Hello".into(),
            content: "<p><br></p>".into(),
            category_id: "1".into(),
        };
        assert!(!draft.is_complete());
    }

    #[test]
    fn embeds_render_by_kind() {
        assert!(Embed::Image("u".into()).html().starts_with("<img"));
        assert!(Embed::Video("u".into()).html().contains("<video"));
    }

    #[test]
    fn embed_urls_stay_readable() {
        let video = Embed::Video("https://cdn.example.com/media/a b.mp4?v=1&t=2".into());
        assert_eq!(
            video.html(),
            r#"<video src="https://cdn.example.com/media/a b.mp4?v=1&amp;t=2" controls></video>"#
        );
        assert_eq!(video.url(), "https://cdn.example.com/media/a b.mp4?v=1&t=2");
    }
}
