use base64::{engine::general_purpose::STANDARD, Engine as _};
use regex::Regex;
use std::sync::LazyLock;

const WIDTH: usize = 300;
const HEIGHT: usize = 200;
const MAX_COLORS: usize = 5;

const DEFAULT_BACKGROUND: &str = "#f8f9fa";
const CANVAS_BACKGROUND: &str = "#2c3e50";
const FORM_BACKGROUND: &str = "#e3f2fd";
const TABLE_BACKGROUND: &str = "#fff3e0";
const IMAGE_BACKGROUND: &str = "#f3e5f5";

const DATA_URI_PREFIX: &str = "data:image/svg+xml;base64,";

static ELEMENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[a-zA-Z][^>]*>").expect("element pattern"));

static TEXT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r">[^<]+<").expect("text pattern"));

static COLOR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"#[0-9a-fA-F]{3,6}|rgb\([^)]+\)|rgba\([^)]+\)").expect("color pattern")
});

static TITLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<title[^>]*>([^<]+)</title>").expect("title pattern"));

static H1_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<h1[^>]*>([^<]+)</h1>").expect("h1 pattern"));

/// Content signals extracted from a piece of markup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HtmlSummary {
    pub has_images: bool,
    pub has_text: bool,
    pub has_tables: bool,
    pub has_forms: bool,
    pub has_canvas: bool,
    pub element_count: usize,
    pub text_length: usize,
    /// Up to five distinct colour literals, first-seen order.
    pub colors: Vec<String>,
    pub title: Option<String>,
}

pub fn analyze_html(html: &str) -> HtmlSummary {
    let lowered = html.to_lowercase();

    let element_count = ELEMENT_RE.find_iter(&lowered).count();

    let mut has_text = false;
    let mut text_length = 0;
    for m in TEXT_RE.find_iter(&lowered) {
        has_text = true;
        text_length += m
            .as_str()
            .trim_matches(|c| c == '>' || c == '<')
            .trim()
            .len();
    }

    let mut colors: Vec<String> = Vec::new();
    for m in COLOR_RE.find_iter(html) {
        if colors.len() == MAX_COLORS {
            break;
        }
        if !colors.iter().any(|c| c == m.as_str()) {
            colors.push(m.as_str().to_string());
        }
    }

    let title = capture_trimmed(&TITLE_RE, html).or_else(|| capture_trimmed(&H1_RE, html));

    HtmlSummary {
        has_images: lowered.contains("<img") || lowered.contains("background-image"),
        has_text,
        has_tables: lowered.contains("<table"),
        has_forms: lowered.contains("<form") || lowered.contains("<input"),
        has_canvas: lowered.contains("<canvas"),
        element_count,
        text_length,
        colors,
        title,
    }
}

fn capture_trimmed(re: &Regex, html: &str) -> Option<String> {
    re.captures(html)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|t| !t.is_empty())
}

fn background_color(summary: &HtmlSummary) -> &'static str {
    if summary.has_canvas {
        CANVAS_BACKGROUND
    } else if summary.has_forms {
        FORM_BACKGROUND
    } else if summary.has_tables {
        TABLE_BACKGROUND
    } else if summary.has_images {
        IMAGE_BACKGROUND
    } else {
        DEFAULT_BACKGROUND
    }
}

fn darker_variant(color: &str) -> &'static str {
    match color {
        DEFAULT_BACKGROUND => "#e9ecef",
        CANVAS_BACKGROUND => "#1a252f",
        FORM_BACKGROUND => "#bbdefb",
        TABLE_BACKGROUND => "#ffe0b2",
        IMAGE_BACKGROUND => "#e1bee7",
        _ => "#ddd",
    }
}

fn content_icons(summary: &HtmlSummary) -> Vec<&'static str> {
    let mut icons = Vec::new();
    if summary.has_images {
        icons.push("🖼️");
    }
    if summary.has_text {
        icons.push("📝");
    }
    if summary.has_tables {
        icons.push("📊");
    }
    if summary.has_forms {
        icons.push("📋");
    }
    if summary.has_canvas {
        icons.push("🎨");
    }
    if icons.is_empty() {
        icons.push("💻");
    }
    icons
}

fn render_svg(summary: &HtmlSummary) -> String {
    let background = background_color(summary);
    let icons = content_icons(summary);

    let mut svg = format!(
        r#"<svg width="{WIDTH}" height="{HEIGHT}" xmlns="http://www.w3.org/2000/svg">"#
    );
    svg.push_str(&format!(
        r#"<rect width="100%" height="100%" fill="{background}"/>"#
    ));
    svg.push_str(r#"<defs><linearGradient id="grad1" x1="0%" y1="0%" x2="100%" y2="100%">"#);
    svg.push_str(&format!(
        r#"<stop offset="0%" style="stop-color:{background};stop-opacity:1" />"#
    ));
    svg.push_str(&format!(
        r#"<stop offset="100%" style="stop-color:{};stop-opacity:0.8" />"#,
        darker_variant(background)
    ));
    svg.push_str("</linearGradient></defs>");
    svg.push_str(r#"<rect width="100%" height="100%" fill="url(#grad1)"/>"#);

    let icon_y = HEIGHT / 2 - 15;
    let icon_x = WIDTH / 2 - (icons.len() * 20) / 2;
    for (i, icon) in icons.iter().enumerate() {
        svg.push_str(&format!(
            r#"<text x="{}" y="{icon_y}" font-size="20" text-anchor="middle">{icon}</text>"#,
            icon_x + i * 25
        ));
    }

    let mut stats = format!("{} elements", summary.element_count);
    if summary.text_length > 0 {
        stats.push_str(&format!(" · {} chars", summary.text_length));
    }

    svg.push_str(&format!(
        r##"<text x="{}" y="{}" font-family="Arial, sans-serif" font-size="12" fill="#666" text-anchor="middle">{stats}</text>"##,
        WIDTH / 2,
        HEIGHT - 20
    ));
    svg.push_str(&format!(
        r##"<text x="{}" y="{}" font-family="Arial, sans-serif" font-size="10" fill="#999" text-anchor="middle">HTML Content</text>"##,
        WIDTH / 2,
        HEIGHT - 5
    ));
    svg.push_str("</svg>");

    svg
}

/// Deterministic placeholder image for `html`, as a base64 SVG data URI.
pub fn synthesize(html: &str) -> String {
    let svg = render_svg(&analyze_html(html));
    format!("{DATA_URI_PREFIX}{}", STANDARD.encode(svg.as_bytes()))
}

/// Thumbnail stored on a version: empty markup yields an empty thumbnail.
pub fn thumbnail_for(html: &str) -> String {
    if html.trim().is_empty() {
        return String::new();
    }
    synthesize(html)
}
