use crate::utils::html::escape;

/// Header actions for a logged-in user.
pub fn user_menu(display_name: &str, avatar_url: &str) -> String {
    format!(
        r#"<div class="user-menu"><img src="{}" alt="Avatar" class="user-avatar" /><span class="user-name">Hi, <strong id="userName">{}</strong></span><a href="/dashboard/dashboard.html" class="btn btn-outline">Dashboard</a><button class="btn-logout" aria-label="Logout"><i class="fas fa-sign-out-alt"></i></button></div>"#,
        escape(avatar_url),
        escape(display_name)
    )
}

/// Header actions for an anonymous visitor.
pub fn auth_buttons() -> String {
    r#"<div class="auth-buttons"><a href="/auth/login.html" class="btn btn-outline">Log In</a><a href="/auth/register.html" class="btn btn-primary">Sign Up</a></div>"#.to_string()
}
