use crate::{models::user::Profile, utils::html::escape};

fn or_na(value: Option<&str>) -> String {
    value
        .filter(|v| !v.is_empty())
        .map(escape)
        .unwrap_or_else(|| "N/A".to_string())
}

/// Avatar, handle, display name, bio and follower stats.
pub fn profile_header(profile: &Profile, posts_count: usize, default_avatar: &str) -> String {
    format!(
        r#"<div class="profile-header"><img id="profilePicture" src="{avatar}" alt="Avatar" class="profile-avatar"><div class="profile-info"><h2 id="profileUsernameDisplay">@{username}</h2><p id="profileNameDisplay">{name}</p><p id="profileBioDisplay">{bio}</p><ul class="profile-stats"><li><strong id="postsCount">{posts_count}</strong> posts</li><li><strong id="followersCount">{followers}</strong> followers</li><li><strong id="followingCount">{following}</strong> following</li></ul></div></div>"#,
        avatar = escape(profile.picture().unwrap_or(default_avatar)),
        username = or_na(profile.username.as_deref()),
        name = escape(profile.name.as_deref().unwrap_or_default()),
        bio = escape(profile.bio.as_deref().filter(|b| !b.is_empty()).unwrap_or("No bio yet.")),
        followers = profile.followers,
        following = profile.following,
    )
}

/// "About me" block.
pub fn about(profile: &Profile) -> String {
    let age = profile.age.map(|a| a.to_string());
    let rows = [
        ("Gender", "profileGenderDisplay", or_na(profile.gender.as_deref())),
        ("Age", "profileAgeDisplay", or_na(age.as_deref())),
        ("Date of Birth", "profileDobDisplay", or_na(profile.dob.as_deref())),
        ("Phone", "profilePhoneNumberDisplay", or_na(profile.phone_number.as_deref())),
        ("Education", "profileEducationDisplay", or_na(profile.education.as_deref())),
        ("Status", "profileStatusDisplay", or_na(profile.status.as_deref())),
        ("Address", "profileAddressDisplay", or_na(profile.address.as_deref())),
    ];

    let items: String = rows
        .iter()
        .map(|(label, id, value)| format!(r#"<li><span class="label">{}</span> <span id="{}">{}</span></li>"#, label, id, value))
        .collect();

    format!(r#"<section class="about-me"><h3>About Me</h3><ul>{}</ul></section>"#, items)
}
