use std::sync::LazyLock;

use regex::Regex;

const EXCERPT_CHARS: usize = 150;

static TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)<[^>]*>").expect("static regex"));
static IMG_SRC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?is)<img\b[^>]*?\bsrc\s*=\s*["']([^"']+)["']"#).expect("static regex"));
static VIDEO_SRC: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<(?:video|source)\b[^>]*?\bsrc\s*=\s*["']([^"']+)["']"#).expect("static regex")
});
static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("static regex"));
static NUMERIC_ENTITY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"&#(?:[xX]([0-9a-fA-F]+)|([0-9]+));").expect("static regex"));

/// Clean HTML content using the ammonia library.
///
/// Whitelist-based: keeps safe tags (like <b>, <p>, <img>) plus the
/// <video>/<source> pair the editor embeds, and strips <script>, <iframe> and
/// event-handler attributes. Post bodies come from a rich-text editor and are
/// rendered as HTML, so they always go through here.
pub fn clean_html(input: &str) -> String {
    let mut builder = ammonia::Builder::default();
    builder
        .add_tags(&["video", "source"])
        .add_tag_attributes("video", &["src", "controls", "poster", "width", "height"])
        .add_tag_attributes("source", &["src", "type"]);
    builder.clean(input).to_string()
}

/// Escapes text for use inside element content or a quoted attribute.
pub fn escape(input: &str) -> String {
    ammonia::clean_text(input)
}

/// Escapes a URL for a double-quoted attribute, leaving the URL itself readable.
pub fn escape_attr(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// First embedded media URL of a post body: an image, else a video.
/// The attribute value is entity-decoded, so callers get the real URL.
pub fn first_media_url(html: &str) -> Option<String> {
    IMG_SRC
        .captures(html)
        .or_else(|| VIDEO_SRC.captures(html))
        .map(|caps| decode_basic_entities(&caps[1]))
}

/// Plain-text excerpt of a post body (first 150 characters of its text).
pub fn excerpt(html: &str) -> String {
    let text = TAG.replace_all(html, " ");
    let text = decode_basic_entities(&text);
    let text = WHITESPACE.replace_all(text.trim(), " ");
    text.chars().take(EXCERPT_CHARS).collect()
}

fn decode_basic_entities(text: &str) -> String {
    let text = NUMERIC_ENTITY.replace_all(text, |caps: &regex::Captures| {
        let code = match (caps.get(1), caps.get(2)) {
            (Some(hex), _) => u32::from_str_radix(hex.as_str(), 16).ok(),
            (None, Some(dec)) => dec.as_str().parse::<u32>().ok(),
            _ => None,
        };
        code.and_then(char::from_u32)
            .map(String::from)
            .unwrap_or_else(|| caps[0].to_string())
    });
    text.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&amp;", "&")
}
