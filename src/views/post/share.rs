/// Fixed share box.
pub fn share() -> String {
    concat!(
        r#"<div class="post-share"><h3>Share this post:</h3>"#,
        r#"<button id="shareTwitterBtn"><i class="fab fa-twitter"></i> Twitter</button>"#,
        r#"<button id="shareFacebookBtn"><i class="fab fa-facebook-f"></i> Facebook</button>"#,
        r#"<button id="shareCopyLinkBtn"><i class="fas fa-link"></i> Copy Link</button>"#,
        "</div>"
    )
    .to_string()
}
