// src/controllers/auth.rs

use validator::Validate;

use crate::{
    error::AppError,
    models::user::{ForgotPasswordForm, LoginForm, RegisterForm, RegisterRequest, ResetPasswordForm, ResetPasswordRequest},
    routes::Navigation,
    session::Identity,
    state::AppState,
    utils::password::{PasswordStrength, password_strength},
    views::nav,
};

/// Result of a successful form submission: the message to show and where to go next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthOutcome {
    pub message: String,
    pub navigation: Option<Navigation>,
    /// Strength of the password that was just set (register and reset only).
    pub password_strength: Option<PasswordStrength>,
}

/// Registers a new account.
///
/// Validates the form locally, then stores the identity the server returns and
/// sends the user to the login page.
pub async fn register(app: &AppState, form: &RegisterForm) -> Result<AuthOutcome, AppError> {
    if let Err(validation_errors) = form.validate() {
        tracing::warn!("Registration form rejected: {}", validation_errors);
        return Err(AppError::from(validation_errors));
    }

    let payload = RegisterRequest {
        username: form.username.trim().to_string(),
        email: form.email.trim().to_string(),
        password: form.password.clone(),
        name: form.name.trim().to_string(),
    };
    let response = app.api.register(&payload).await?;

    app.session.save(&Identity {
        user_id: response.user.user_id.clone(),
        username: response.user.username.clone(),
        email: response.user.email.clone(),
        token: None,
    })?;
    tracing::info!("Registered user {}", response.user.user_id);

    Ok(AuthOutcome {
        message: response.message.unwrap_or_else(|| "Success!".to_string()),
        navigation: Some(Navigation::Login),
        password_strength: Some(password_strength(&form.password)),
    })
}

/// Logs in and stores userId, username and email.
///
/// The response also carries a token, which is deliberately left out of the
/// session: authenticated calls keep sending an empty bearer token.
pub async fn login(app: &AppState, form: &LoginForm) -> Result<AuthOutcome, AppError> {
    if let Err(validation_errors) = form.validate() {
        return Err(AppError::from(validation_errors));
    }

    let response = app.api.login(form).await?;
    app.session.save(&Identity {
        user_id: response.user.user_id.clone(),
        username: response.user.username.clone(),
        email: response.user.email.clone(),
        token: None,
    })?;
    tracing::info!("User {} logged in", response.user.user_id);

    Ok(AuthOutcome {
        message: "Login successful! Redirecting...".to_string(),
        navigation: Some(Navigation::Home),
        password_strength: None,
    })
}

pub async fn forgot_password(app: &AppState, form: &ForgotPasswordForm) -> Result<AuthOutcome, AppError> {
    form.validate()?;

    let response = app.api.forgot_password(form).await?;
    Ok(AuthOutcome {
        message: response
            .message
            .unwrap_or_else(|| "Check your email for the reset token.".to_string()),
        navigation: None,
        password_strength: None,
    })
}

pub async fn reset_password(app: &AppState, form: &ResetPasswordForm) -> Result<AuthOutcome, AppError> {
    if form.new_password != form.confirm_new_password {
        return Err(AppError::Validation("Passwords do not match".to_string()));
    }
    form.validate()?;

    let payload = ResetPasswordRequest {
        email: form.email.trim().to_string(),
        token: form.reset_token.trim().to_string(),
        password: form.new_password.clone(),
    };
    let response = app.api.reset_password(&payload).await?;

    Ok(AuthOutcome {
        message: response
            .message
            .unwrap_or_else(|| "Password has been reset successfully.".to_string()),
        navigation: Some(Navigation::Login),
        password_strength: Some(password_strength(&form.new_password)),
    })
}

/// Clears the session and returns to the site root.
pub fn logout(app: &AppState) -> Result<Navigation, AppError> {
    let user_id = app.session.user_id();
    app.session.clear()?;
    tracing::info!("User {:?} logged out", user_id);
    Ok(Navigation::Root)
}

/// Auth pages bounce logged-in users to the home page.
pub fn redirect_if_logged_in(app: &AppState) -> Option<Navigation> {
    app.session.is_authenticated().then_some(Navigation::Home)
}

/// Header actions: the user menu when logged in, log-in/sign-up otherwise.
/// A failed profile lookup still renders the menu with fallbacks.
pub async fn site_header(app: &AppState) -> String {
    let Some(user_id) = app.session.user_id() else {
        return nav::auth_buttons();
    };

    let mut avatar = app.config.default_avatar_url.clone();
    let mut display_name = "User".to_string();

    match app.api.get_profile(&user_id).await {
        Ok(profile) => {
            if let Some(picture) = profile.picture() {
                avatar = picture.to_string();
            }
            if let Some(name) = profile
                .name
                .as_deref()
                .filter(|n| !n.is_empty())
                .or(profile.username.as_deref().filter(|n| !n.is_empty()))
            {
                display_name = name.to_string();
            }
        }
        Err(e) => tracing::error!("Error fetching user profile for header: {}", e),
    }

    nav::user_menu(&display_name, &avatar)
}
