// src/controllers/post_page.rs

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::RwLock;

use crate::{
    api::encode,
    error::AppError,
    models::{
        comment::NewComment,
        interaction::{NewBookmark, NewFollow, NewReaction, NewShare},
        post::Post,
    },
    state::AppState,
    views::post::{self as post_view, PostActions},
};

/// Lifecycle of a post page: `Loading -> Rendered -> (Mutating -> Rendered)*`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Loading,
    Rendered,
    Mutating(Mutation),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    Like,
    Unlike,
    Comment,
    Follow,
    Unfollow,
    Bookmark,
    Unbookmark,
    Share,
}

/// The share controls on a post page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareAction {
    /// Share button in the reaction bar (copies the link).
    ReactionButton,
    CopyLink,
    Twitter,
    Facebook,
}

impl ShareAction {
    pub fn share_type(self) -> &'static str {
        match self {
            ShareAction::ReactionButton => "link_copy_reaction_btn",
            ShareAction::CopyLink => "link_copy_share_btn",
            ShareAction::Twitter => "twitter",
            ShareAction::Facebook => "facebook",
        }
    }
}

/// What the shell should do for a share click.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShareOutcome {
    CopyToClipboard(String),
    OpenWindow(String),
}

pub fn share_outcome(action: ShareAction, post_link: &str, title: &str) -> ShareOutcome {
    match action {
        ShareAction::ReactionButton | ShareAction::CopyLink => ShareOutcome::CopyToClipboard(post_link.to_string()),
        ShareAction::Twitter => ShareOutcome::OpenWindow(format!(
            "https://twitter.com/intent/tweet?url={}&text={}",
            encode(post_link),
            encode(title)
        )),
        ShareAction::Facebook => ShareOutcome::OpenWindow(format!(
            "https://www.facebook.com/sharer/sharer.php?u={}",
            encode(post_link)
        )),
    }
}

/// A freshly rendered post: the server's representation, its markup and the
/// live controls.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedPost {
    pub post: Post,
    pub html: String,
    pub actions: PostActions,
}

/// Monotonic request counter for one mutable resource.
/// Only the response holding the latest ticket may be applied.
#[derive(Debug, Default)]
pub struct RequestEpoch(AtomicU64);

impl RequestEpoch {
    pub fn next(&self) -> u64 {
        self.0.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn is_current(&self, ticket: u64) -> bool {
        self.0.load(Ordering::SeqCst) == ticket
    }
}

struct View {
    phase: Phase,
    rendered: Option<RenderedPost>,
}

/// Drives one post page.
///
/// Every mutation validates, issues the create/delete request, then refetches
/// the whole post and re-renders it. Nothing is updated optimistically: the
/// view is always derived from the last applied server response.
pub struct PostPageController {
    app: AppState,
    post_id: String,
    view: RwLock<View>,
    epoch: RequestEpoch,
}

impl PostPageController {
    pub fn new(app: AppState, post_id: impl Into<String>) -> Self {
        Self {
            app,
            post_id: post_id.into(),
            view: RwLock::new(View {
                phase: Phase::Loading,
                rendered: None,
            }),
            epoch: RequestEpoch::default(),
        }
    }

    pub fn post_id(&self) -> &str {
        &self.post_id
    }

    pub async fn phase(&self) -> Phase {
        self.view.read().await.phase
    }

    pub async fn rendered(&self) -> Option<RenderedPost> {
        self.view.read().await.rendered.clone()
    }

    /// Public URL of this post page, used for sharing.
    pub fn page_link(&self) -> String {
        format!(
            "{}/post/post.html?id={}",
            self.app.config.site_url.trim_end_matches('/'),
            encode(&self.post_id)
        )
    }

    /// Initial fetch and render.
    pub async fn load(&self) -> Result<RenderedPost, AppError> {
        let result = self.refresh().await;
        if let Err(e) = &result {
            tracing::error!("Error loading post {}: {}", self.post_id, e);
        }
        result
    }

    /// Re-fetches the full post and re-renders from scratch.
    /// A response overtaken by a newer refresh is discarded.
    pub async fn refresh(&self) -> Result<RenderedPost, AppError> {
        let ticket = self.epoch.next();
        let viewer = self.app.viewer_id();

        let post = self.app.api.get_post(&self.post_id, viewer.as_deref()).await?;
        let fresh = RenderedPost {
            html: post_view::post(Some(&post), viewer.as_deref()),
            actions: post_view::actions(&post, viewer.as_deref()),
            post,
        };

        let mut view = self.view.write().await;
        if self.epoch.is_current(ticket) || view.rendered.is_none() {
            view.rendered = Some(fresh.clone());
            if view.phase == Phase::Loading {
                view.phase = Phase::Rendered;
            }
            Ok(fresh)
        } else {
            tracing::debug!("Discarding stale refresh #{} of post {}", ticket, self.post_id);
            Ok(view.rendered.clone().unwrap_or(fresh))
        }
    }

    pub async fn toggle_like(&self) -> Result<RenderedPost, AppError> {
        let viewer = self.require_viewer("Please log in to like this post.")?;
        let post = self.current_post().await?;

        if post.user_liked {
            let reaction_id = post
                .user_reaction_id
                .clone()
                .filter(|id| !id.is_empty())
                .ok_or_else(|| reject("Error: Cannot unlike. Reaction ID not found in post data."))?;
            self.mutate(Mutation::Unlike, async {
                self.app.api.delete_reaction(&reaction_id).await.map(|_| ())
            })
            .await
        } else {
            let reaction = NewReaction {
                post_id: self.post_id.clone(),
                user_id: viewer,
                reaction_type: "like".to_string(),
                created_at: now(),
            };
            self.mutate(Mutation::Like, async {
                let reaction_id = self.app.api.create_reaction(&reaction).await?;
                tracing::info!("Like recorded on post {} as reaction {}", self.post_id, reaction_id);
                Ok(())
            })
            .await
        }
    }

    pub async fn post_comment(&self, text: &str) -> Result<RenderedPost, AppError> {
        let content = text.trim();
        if content.is_empty() {
            return Err(reject("Comment cannot be empty."));
        }
        let viewer = self.require_viewer("Please log in to comment.")?;

        let comment = NewComment {
            post_id: self.post_id.clone(),
            user_id: viewer,
            content: content.to_string(),
            created_at: now(),
        };
        self.mutate(Mutation::Comment, async {
            self.app.api.create_comment(&comment).await.map(|_| ())
        })
        .await
    }

    pub async fn toggle_follow(&self) -> Result<RenderedPost, AppError> {
        let viewer = self.require_viewer("Please log in to follow users.")?;
        let post = self.current_post().await?;
        let author_id = post
            .author_id
            .clone()
            .filter(|id| !id.is_empty())
            .ok_or_else(|| reject("This post has no author to follow."))?;
        if author_id == viewer {
            return Err(reject("You cannot follow yourself."));
        }

        if post.is_following_author {
            self.mutate(Mutation::Unfollow, async {
                self.app.api.unfollow(&viewer, &author_id).await.map(|_| ())
            })
            .await
        } else {
            let follow = NewFollow {
                follower_id: viewer.clone(),
                followed_id: author_id.clone(),
            };
            self.mutate(Mutation::Follow, async { self.app.api.follow(&follow).await.map(|_| ()) })
                .await
        }
    }

    pub async fn toggle_bookmark(&self) -> Result<RenderedPost, AppError> {
        let viewer = self.require_viewer("Please log in to bookmark posts.")?;
        let post = self.current_post().await?;
        let post_id = if post.post_id.is_empty() {
            self.post_id.clone()
        } else {
            post.post_id.clone()
        };

        if post.is_bookmarked {
            self.mutate(Mutation::Unbookmark, async {
                self.app.api.unbookmark(&viewer, &post_id).await.map(|_| ())
            })
            .await
        } else {
            let bookmark = NewBookmark {
                user_id: viewer.clone(),
                post_id: post_id.clone(),
            };
            self.mutate(Mutation::Bookmark, async {
                self.app.api.bookmark(&bookmark).await.map(|_| ())
            })
            .await
        }
    }

    /// Logs the share and refreshes the share count. Anonymous viewers may share.
    pub async fn share(&self, action: ShareAction) -> Result<(ShareOutcome, RenderedPost), AppError> {
        let post = self.current_post().await?;
        let outcome = share_outcome(action, &self.page_link(), post.title.as_deref().unwrap_or_default());

        let share = NewShare {
            post_id: self.post_id.clone(),
            user_id: self.app.viewer_id().unwrap_or_else(|| "anonymous".to_string()),
            share_type: action.share_type().to_string(),
            created_at: now(),
        };
        let rendered = self
            .mutate(Mutation::Share, async {
                self.app.api.create_share(&share).await.map(|_| ())
            })
            .await?;
        Ok((outcome, rendered))
    }

    async fn mutate<Fut>(&self, mutation: Mutation, request: Fut) -> Result<RenderedPost, AppError>
    where
        Fut: Future<Output = Result<(), AppError>>,
    {
        self.view.write().await.phase = Phase::Mutating(mutation);

        let result = match request.await {
            Ok(()) => self.refresh().await,
            Err(e) => Err(e),
        };

        {
            let mut view = self.view.write().await;
            view.phase = if view.rendered.is_some() {
                Phase::Rendered
            } else {
                Phase::Loading
            };
        }

        if let Err(e) = &result {
            tracing::error!("{:?} on post {} failed: {}", mutation, self.post_id, e);
        }
        result
    }

    async fn current_post(&self) -> Result<Post, AppError> {
        self.view
            .read()
            .await
            .rendered
            .as_ref()
            .map(|r| r.post.clone())
            .ok_or_else(|| reject("The post is still loading."))
    }

    fn require_viewer(&self, message: &str) -> Result<String, AppError> {
        self.app.viewer_id().ok_or_else(|| {
            tracing::warn!("{}", message);
            AppError::AuthRequired(message.to_string())
        })
    }
}

fn reject(message: &str) -> AppError {
    tracing::warn!("{}", message);
    AppError::Validation(message.to_string())
}

fn now() -> String {
    chrono::Utc::now().to_rfc3339()
}
