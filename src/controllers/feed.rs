// src/controllers/feed.rs

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use crate::{
    authors::Author,
    error::AppError,
    models::{
        category::{Category, PostCategory},
        post::Post,
    },
    state::AppState,
    views::cards,
};

pub const ALL_CAUGHT_UP: &str = "You are all updated!";

/// What a feed lists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedSource {
    /// Paginated newest-first feed of the home page.
    Home,
    Category(String),
    Tag(String),
    Featured,
    /// Posts written by a user.
    UserPosts(String),
    /// Posts a user bookmarked.
    Bookmarks(String),
}

impl FeedSource {
    pub fn empty_message(&self) -> String {
        match self {
            FeedSource::Home => ALL_CAUGHT_UP.to_string(),
            FeedSource::Category(name) => format!(r#"No posts found for "{}" category."#, name),
            FeedSource::Tag(_) => "No posts found for this tag.".to_string(),
            FeedSource::Featured => "No featured posts available.".to_string(),
            FeedSource::UserPosts(_) => "No posts found for this user.".to_string(),
            FeedSource::Bookmarks(_) => "No bookmarked posts found yet.".to_string(),
        }
    }

    fn is_paginated(&self) -> bool {
        matches!(self, FeedSource::Home)
    }
}

/// One entry of the home page's category sidebar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SidebarEntry {
    pub display_name: String,
    pub count: usize,
}

/// A batch of cards appended to the feed.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedPage {
    pub page: usize,
    pub post_ids: Vec<String>,
    pub html: String,
    /// Only built with the home feed's first page.
    pub sidebar: Option<Vec<SidebarEntry>>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FeedLoad {
    Page(FeedPage),
    /// Nothing more to load; the message replaces the spinner.
    Exhausted(String),
    /// A load was already in flight.
    Dropped,
}

/// Snapshot of the controller's pagination state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedState {
    pub current_page: usize,
    pub is_loading: bool,
    pub has_more_posts: bool,
}

/// Pagination state of one feed view.
///
/// `is_loading` is the only re-entrancy guard: a trigger that fires while a
/// load is in flight is dropped. Once `has_more_posts` turns false it never
/// turns back.
pub struct FeedController {
    app: AppState,
    source: FeedSource,
    page_size: usize,
    current_page: AtomicUsize,
    is_loading: AtomicBool,
    has_more_posts: AtomicBool,
}

struct LoadingGuard<'a>(&'a AtomicBool);

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

impl FeedController {
    pub fn new(app: AppState, source: FeedSource) -> Self {
        let page_size = app.config.page_size;
        Self {
            app,
            source,
            page_size,
            current_page: AtomicUsize::new(0),
            is_loading: AtomicBool::new(false),
            has_more_posts: AtomicBool::new(true),
        }
    }

    pub fn source(&self) -> &FeedSource {
        &self.source
    }

    pub fn state(&self) -> FeedState {
        FeedState {
            current_page: self.current_page.load(Ordering::SeqCst),
            is_loading: self.is_loading.load(Ordering::SeqCst),
            has_more_posts: self.has_more_posts.load(Ordering::SeqCst),
        }
    }

    /// Loads the next batch. Errors leave `current_page` untouched so the
    /// next trigger retries the same page.
    pub async fn load_next(&self) -> Result<FeedLoad, AppError> {
        if self.is_loading.swap(true, Ordering::SeqCst) {
            tracing::debug!("Feed load already in flight, dropping trigger");
            return Ok(FeedLoad::Dropped);
        }
        let _guard = LoadingGuard(&self.is_loading);

        if !self.has_more_posts.load(Ordering::SeqCst) {
            return Ok(FeedLoad::Exhausted(self.source.empty_message()));
        }

        let page = self.current_page.load(Ordering::SeqCst);
        let result = self.fetch(page).await;
        if let Err(e) = &result {
            tracing::error!("Error loading {:?} feed page {}: {}", self.source, page, e);
        }
        result
    }

    async fn fetch(&self, page: usize) -> Result<FeedLoad, AppError> {
        let api = &self.app.api;

        // 1. Fetch the candidate posts
        let (posts, sidebar_tables) = match &self.source {
            FeedSource::Home => {
                let posts = api.list_posts(page * self.page_size, self.page_size).await?;
                let tables = if page == 0 && !posts.is_empty() {
                    Some(self.category_tables().await)
                } else {
                    None
                };
                (posts, tables)
            }
            FeedSource::Category(name) | FeedSource::Tag(name) => {
                let posts = api.list_all_posts().await?;
                let categories = api.list_categories().await?;
                let links = api.list_post_categories().await?;
                (filter_by_category(posts, &categories, &links, name), None)
            }
            FeedSource::Featured => (api.list_all_posts().await?, None),
            FeedSource::UserPosts(user_id) => (api.user_posts(user_id).await?, None),
            FeedSource::Bookmarks(user_id) => return self.bookmarks(user_id).await,
        };

        // 2. Nothing left
        if posts.is_empty() {
            self.has_more_posts.store(false, Ordering::SeqCst);
            tracing::info!("{:?} feed exhausted at page {}", self.source, page);
            return Ok(FeedLoad::Exhausted(self.source.empty_message()));
        }
        if !self.source.is_paginated() {
            self.has_more_posts.store(false, Ordering::SeqCst);
        }

        // 3. Authors, then cards
        let authors = self
            .app
            .authors
            .resolve_many(posts.iter().filter_map(|p| p.author_id.as_deref()))
            .await;
        let html = self.render_cards(&posts, &authors);

        let sidebar = sidebar_tables.map(|(categories, links)| sidebar_counts(&posts, &categories, &links));

        self.current_page.fetch_add(1, Ordering::SeqCst);
        Ok(FeedLoad::Page(FeedPage {
            page,
            post_ids: posts.into_iter().map(|p| p.post_id).collect(),
            html,
            sidebar,
        }))
    }

    async fn bookmarks(&self, user_id: &str) -> Result<FeedLoad, AppError> {
        let bookmarks = self.app.api.user_bookmarks(user_id).await?;
        self.has_more_posts.store(false, Ordering::SeqCst);
        if bookmarks.is_empty() {
            return Ok(FeedLoad::Exhausted(self.source.empty_message()));
        }

        self.current_page.fetch_add(1, Ordering::SeqCst);
        Ok(FeedLoad::Page(FeedPage {
            page: 0,
            html: bookmarks.iter().map(cards::bookmark_card).collect(),
            post_ids: bookmarks.into_iter().map(|b| b.post_id).collect(),
            sidebar: None,
        }))
    }

    fn render_cards(&self, posts: &[Post], authors: &HashMap<String, Author>) -> String {
        let fallback = self.app.authors.fallback();
        posts
            .iter()
            .map(|post| {
                let author = post
                    .author_id
                    .as_deref()
                    .and_then(|id| authors.get(id))
                    .unwrap_or(&fallback);
                match self.source {
                    FeedSource::Home => cards::feed_card(post, author, true),
                    FeedSource::UserPosts(_) => cards::profile_post_card(post, author),
                    _ => cards::feed_card(post, author, false),
                }
            })
            .collect()
    }

    /// Sidebar tables are decoration: failures are logged and yield no entries.
    async fn category_tables(&self) -> (Vec<Category>, Vec<PostCategory>) {
        let categories = self.app.api.list_categories().await.unwrap_or_else(|e| {
            tracing::warn!("Error fetching categories for sidebar: {}", e);
            Vec::new()
        });
        let links = self.app.api.list_post_categories().await.unwrap_or_else(|e| {
            tracing::warn!("Error fetching post-categories for sidebar: {}", e);
            Vec::new()
        });
        (categories, links)
    }
}

/// Keeps the posts linked to the category named `name` (case-insensitive).
/// An unknown category keeps nothing.
pub fn filter_by_category(posts: Vec<Post>, categories: &[Category], links: &[PostCategory], name: &str) -> Vec<Post> {
    let wanted = name.to_lowercase();
    let Some(target) = categories.iter().find(|c| c.name.to_lowercase() == wanted) else {
        return Vec::new();
    };

    let post_ids: HashSet<&str> = links
        .iter()
        .filter(|link| link.category_id == target.category_id)
        .map(|link| link.post_id.as_str())
        .collect();

    posts
        .into_iter()
        .filter(|post| post_ids.contains(post.post_id.as_str()))
        .collect()
}

/// Categories used by `posts`, with how many of those posts each holds,
/// sorted by display name.
pub fn sidebar_counts(posts: &[Post], categories: &[Category], links: &[PostCategory]) -> Vec<SidebarEntry> {
    let in_page: HashSet<&str> = posts.iter().map(|p| p.post_id.as_str()).collect();

    let mut per_category: HashMap<&str, usize> = HashMap::new();
    for link in links.iter().filter(|l| in_page.contains(l.post_id.as_str())) {
        *per_category.entry(link.category_id.as_str()).or_default() += 1;
    }

    let mut by_name: BTreeMap<String, usize> = BTreeMap::new();
    for category in categories {
        if let Some(count) = per_category.get(category.category_id.as_str()) {
            *by_name.entry(category.display_name()).or_default() += count;
        }
    }

    by_name
        .into_iter()
        .map(|(display_name, count)| SidebarEntry { display_name, count })
        .collect()
}

pub fn sidebar_html(entries: &[SidebarEntry]) -> String {
    entries
        .iter()
        .map(|e| cards::category_list_item(&e.display_name, e.count))
        .collect()
}

/// Every category with its total post count, for the all-categories page.
pub async fn category_cards(app: &AppState) -> Result<String, AppError> {
    let categories = app.api.list_categories().await?;
    let links = app.api.list_post_categories().await?;

    let mut counts: HashMap<&str, usize> = HashMap::new();
    for link in &links {
        *counts.entry(link.category_id.as_str()).or_default() += 1;
    }

    Ok(categories
        .iter()
        .map(|c| {
            let count = counts.get(c.category_id.as_str()).copied().unwrap_or(0);
            cards::category_card(&c.name, &c.display_name(), count)
        })
        .collect())
}
