// src/routes.rs

use url::Url;

use crate::{
    controllers::{
        auth,
        compose::Composer,
        feed::{self, FeedController, FeedLoad, FeedSource},
        post_page::PostPageController,
        profile::{self, Dashboard},
    },
    error::AppError,
    state::AppState,
    utils::html::escape,
    views::cards,
};

/// Where the browser goes after an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    Root,
    Home,
    Login,
    Dashboard,
    Post(String),
    Profile(String),
}

impl Navigation {
    pub fn path(&self) -> String {
        match self {
            Navigation::Root => "/".to_string(),
            Navigation::Home => "/index.html".to_string(),
            Navigation::Login => "/auth/login.html".to_string(),
            Navigation::Dashboard => "/dashboard/dashboard.html".to_string(),
            Navigation::Post(id) => cards::post_link(id),
            Navigation::Profile(id) => cards::profile_link(id),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthPage {
    Login,
    Register,
    ForgotPassword,
    ResetPassword,
}

/// Every page of the site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Page {
    Home,
    Post(String),
    Category(String),
    Tag(String),
    Categories,
    Featured,
    Profile(String),
    Dashboard,
    CreatePost,
    Auth(AuthPage),
    /// Known page with a missing required parameter.
    Invalid(String),
    NotFound,
}

impl Page {
    /// Maps a site URL (absolute or path + query) to a page.
    pub fn from_url(raw: &str) -> Page {
        let Ok(url) = Url::parse("http://localhost/").and_then(|base| base.join(raw)) else {
            return Page::NotFound;
        };
        let param = |names: &[&str]| {
            url.query_pairs()
                .find(|(key, value)| names.iter().any(|name| *key == *name) && !value.is_empty())
                .map(|(_, value)| value.into_owned())
        };

        match url.path() {
            "/" | "/index.html" => Page::Home,
            "/post/post.html" => param(&["id", "postId"])
                .map(Page::Post)
                .unwrap_or_else(|| Page::Invalid("Post ID not found in URL.".to_string())),
            "/pages/category.html" => param(&["category"])
                .map(Page::Category)
                .unwrap_or_else(|| Page::Invalid("No category specified in the URL.".to_string())),
            "/pages/tag.html" => param(&["tag"])
                .map(Page::Tag)
                .unwrap_or_else(|| Page::Invalid("No tag specified in the URL.".to_string())),
            "/pages/categories.html" => Page::Categories,
            "/pages/featured.html" => Page::Featured,
            "/pages/profile.html" => param(&["userId"])
                .map(Page::Profile)
                .unwrap_or_else(|| Page::Invalid("The requested user profile could not be found.".to_string())),
            "/dashboard/dashboard.html" => Page::Dashboard,
            "/post/create-post.html" => Page::CreatePost,
            "/auth/login.html" => Page::Auth(AuthPage::Login),
            "/auth/register.html" => Page::Auth(AuthPage::Register),
            "/auth/forgot-password.html" => Page::Auth(AuthPage::ForgotPassword),
            "/auth/reset-password.html" => Page::Auth(AuthPage::ResetPassword),
            _ => Page::NotFound,
        }
    }
}

/// Outcome of rendering a page: markup, or a redirect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rendered {
    Html(String),
    Redirect(Navigation),
}

/// Renders the main content of `page` below the site header.
pub async fn render(app: &AppState, page: &Page) -> Result<Rendered, AppError> {
    let header = auth::site_header(app).await;

    let body = match page {
        Page::Home => feed_body(app, FeedSource::Home).await?,
        Page::Category(name) => feed_body(app, FeedSource::Category(name.clone())).await?,
        Page::Tag(name) => feed_body(app, FeedSource::Tag(name.clone())).await?,
        Page::Featured => feed_body(app, FeedSource::Featured).await?,
        Page::Categories => feed::category_cards(app).await?,
        Page::Post(id) => {
            let controller = PostPageController::new(app.clone(), id.as_str());
            match controller.load().await {
                Ok(rendered) => rendered.html,
                Err(e) => cards::notice(&format!("Error loading post: {}", e.user_message())),
            }
        }
        Page::Profile(user_id) => match profile::load_profile_page(app, user_id).await {
            Ok(page) => format!("{}{}{}", page.header_html, page.about_html, page.posts_html),
            Err(_) => cards::notice("Could not load user profile data."),
        },
        Page::Dashboard => {
            let dashboard = match Dashboard::open(app.clone()) {
                Ok(dashboard) => dashboard,
                Err(AppError::AuthRequired(message)) => {
                    tracing::warn!("{}", message);
                    return Ok(Rendered::Redirect(Navigation::Login));
                }
                Err(e) => return Err(e),
            };
            format!(
                "{}{}{}",
                dashboard.render_profile().await?,
                dashboard
                    .my_posts_html()
                    .await
                    .unwrap_or_else(|e| cards::notice(&format!("Error loading posts: {}", e.user_message()))),
                dashboard
                    .bookmarks_html()
                    .await
                    .unwrap_or_else(|e| cards::notice(&format!("Error loading bookmarks: {}", e.user_message()))),
            )
        }
        Page::CreatePost => {
            let composer = match Composer::open(app.clone()) {
                Ok(composer) => composer,
                Err(AppError::AuthRequired(message)) => {
                    tracing::warn!("{}", message);
                    return Ok(Rendered::Redirect(Navigation::Login));
                }
                Err(e) => return Err(e),
            };
            let options: String = composer
                .categories()
                .await?
                .iter()
                .map(|c| format!(r#"<option value="{}">{}</option>"#, escape(&c.category_id), escape(&c.display_name())))
                .collect();
            format!(r#"<select id="categorySelect"><option value="">Select a category</option>{}</select>"#, options)
        }
        Page::Auth(_) => {
            if let Some(navigation) = auth::redirect_if_logged_in(app) {
                return Ok(Rendered::Redirect(navigation));
            }
            String::new()
        }
        Page::Invalid(message) => cards::notice(message),
        Page::NotFound => cards::notice("Page not found."),
    };

    Ok(Rendered::Html(format!("{}{}", header, body)))
}

async fn feed_body(app: &AppState, source: FeedSource) -> Result<String, AppError> {
    let controller = FeedController::new(app.clone(), source);
    Ok(match controller.load_next().await? {
        FeedLoad::Page(page) => {
            let sidebar = page
                .sidebar
                .as_deref()
                .map(|entries| format!(r#"<ul id="categoriesList">{}</ul>"#, feed::sidebar_html(entries)))
                .unwrap_or_default();
            format!("{}{}", page.html, sidebar)
        }
        FeedLoad::Exhausted(message) => cards::notice(&message),
        FeedLoad::Dropped => String::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_post_urls() {
        assert_eq!(Page::from_url("/post/post.html?id=p1"), Page::Post("p1".into()));
        assert_eq!(Page::from_url("/post/post.html?postId=42"), Page::Post("42".into()));
        assert!(matches!(Page::from_url("/post/post.html"), Page::Invalid(_)));
    }

    #[test]
    fn parses_listing_urls() {
        assert_eq!(Page::from_url("/"), Page::Home);
        assert_eq!(
            Page::from_url("http://example.com/pages/category.html?category=Food%20Trips"),
            Page::Category("Food Trips".into())
        );
        assert_eq!(Page::from_url("/pages/profile.html?userId=u1"), Page::Profile("u1".into()));
        assert_eq!(Page::from_url("/auth/login.html"), Page::Auth(AuthPage::Login));
        assert_eq!(Page::from_url("/nope.html"), Page::NotFound);
    }

    #[test]
    fn navigation_paths() {
        assert_eq!(Navigation::Root.path(), "/");
        assert_eq!(Navigation::Login.path(), "/auth/login.html");
        assert_eq!(Navigation::Post("p1".into()).path(), "/post/post.html?id=p1");
    }
}
