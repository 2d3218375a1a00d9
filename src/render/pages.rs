//! Page assembly
//!
//! Combines resolved entries and rendered rich text with the layout
//! templates under `templates/pages/`. Every function here is pure: it
//! takes already-fetched data and returns an HTML fragment. Text is escaped
//! before it reaches a template.

use askama::Template;
use chrono::{DateTime, NaiveDate, NaiveDateTime};

use super::html::{escape_attr, escape_text};
use super::rich_text::RichTextRenderer;
use crate::domain::{Entry, ResolvedEntry};

/// Page variants, used to pick error wording
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageKind {
    Landing,
    GuidesList,
    Guide,
    Content,
}

impl PageKind {
    /// Noun used in "Unable to load ..." messages
    pub fn subject(&self) -> &'static str {
        match self {
            PageKind::Landing | PageKind::Content => "content",
            PageKind::GuidesList => "guides",
            PageKind::Guide => "guide",
        }
    }

    /// Hint shown to content designers under an error
    fn designer_hint(&self) -> &'static str {
        match self {
            PageKind::Landing => "Make sure you have created and published a Landing Page entry in Contentful with the content type \"landingPage\".",
            PageKind::GuidesList | PageKind::Guide => "Make sure you have created and published Guide entries in Contentful.",
            PageKind::Content => "Create a Content Page entry in Contentful with the appropriate page type.",
        }
    }
}

impl std::fmt::Display for PageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PageKind::Landing => write!(f, "landing"),
            PageKind::GuidesList => write!(f, "guides"),
            PageKind::Guide => write!(f, "guide"),
            PageKind::Content => write!(f, "content"),
        }
    }
}

/// Link to a guide's detail view
pub fn guide_url(slug: Option<&str>) -> String {
    format!("guides.html?slug={}", slug.unwrap_or_default())
}

/// Formats a date field as `5 March 2024`
///
/// Accepts RFC 3339 timestamps, `YYYY-MM-DDTHH:MM[:SS]` and bare dates.
/// The calendar date is taken as written, without timezone conversion.
pub fn format_date(value: &str) -> Option<String> {
    let value = value.trim();
    let date = DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.date_naive())
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S").map(|dt| dt.date()))
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M").map(|dt| dt.date()))
        .or_else(|_| NaiveDate::parse_from_str(value, "%Y-%m-%d"))
        .ok()?;

    Some(date.format("%-d %B %Y").to_string())
}

/// Resolved content of a landing page
#[derive(Debug, Clone)]
pub struct LandingView<'a> {
    pub page: &'a Entry,
    pub features: Vec<ResolvedEntry<'a>>,
    pub featured_guide: Option<ResolvedEntry<'a>>,
}

// View structs below carry values that are already escaped; templates
// emit them with `|safe`.

struct Image {
    src: String,
    alt: String,
}

impl Image {
    fn of(entry: &ResolvedEntry<'_>, fallback_alt: &str) -> Option<Self> {
        let asset = entry.asset("image")?;
        let url = asset.absolute_url()?;
        Some(Self {
            src: escape_attr(&url),
            alt: escape_attr(asset.title().unwrap_or(fallback_alt)),
        })
    }
}

struct CallToAction {
    url: String,
    text: String,
}

struct FeatureCard {
    alignment: &'static str,
    title: String,
    description: String,
    image: Option<Image>,
}

struct GuideCard {
    heading: String,
    url: String,
    title: String,
    summary: Option<String>,
    image: Option<Image>,
}

#[derive(Template)]
#[template(path = "pages/landing.html")]
struct LandingTemplate {
    heading: String,
    description: Option<String>,
    cta: Option<CallToAction>,
    feature_heading: Option<String>,
    features: Vec<FeatureCard>,
    featured_guide: Option<GuideCard>,
}

struct GuideLink {
    url: String,
    title: String,
    summary: Option<String>,
}

#[derive(Template)]
#[template(path = "pages/guides.html")]
struct GuidesTemplate {
    guides: Vec<GuideLink>,
}

struct Section {
    title: String,
    body: String,
}

#[derive(Template)]
#[template(path = "pages/guide.html")]
struct GuideTemplate {
    title: String,
    summary: Option<String>,
    last_updated: Option<String>,
    sections: Vec<Section>,
}

#[derive(Template)]
#[template(path = "pages/content.html")]
struct ContentTemplate {
    title: String,
    summary: Option<String>,
    body: String,
}

#[derive(Template)]
#[template(path = "pages/error.html")]
struct ErrorTemplate {
    wrapped: bool,
    message: String,
    hint: String,
}

/// Renders a layout block; blocks end with a newline
fn render_block(template: &impl Template) -> askama::Result<String> {
    let mut html = template.render()?;
    html.push('\n');
    Ok(html)
}

fn escaped(value: Option<&str>) -> Option<String> {
    value.map(escape_text)
}

pub fn landing_page(view: &LandingView<'_>) -> askama::Result<String> {
    let page = view.page;
    let heading = page
        .text("heroHeading")
        .or_else(|| page.text("pageTitle"))
        .unwrap_or_default();

    let cta = page.text("primaryCtaText").map(|text| CallToAction {
        url: escape_attr(page.text("primaryCtaUrl").unwrap_or("get-started.html")),
        text: escape_text(text),
    });

    let features = view.features.iter().map(feature_card).collect();

    let featured_guide = view.featured_guide.as_ref().map(|guide| {
        let title = guide.text("title").unwrap_or_default();
        GuideCard {
            heading: escape_text(
                page.text("featuredGuideSectionHeading")
                    .unwrap_or("Featured guide"),
            ),
            url: escape_attr(&guide_url(guide.text("slug"))),
            title: escape_text(title),
            summary: escaped(guide.text("summary")),
            image: Image::of(guide, title),
        }
    });

    render_block(&LandingTemplate {
        heading: escape_text(heading),
        description: escaped(page.text("heroDescription")),
        cta,
        feature_heading: escaped(page.text("featureSectionHeading")),
        features,
        featured_guide,
    })
}

fn feature_card(feature: &ResolvedEntry<'_>) -> FeatureCard {
    let alignment = match feature.text("imageAlignment") {
        Some("left") => "bruv-feature-card--image-left",
        _ => "bruv-feature-card--image-right",
    };
    let title = feature.text("title").unwrap_or_default();

    FeatureCard {
        alignment,
        title: escape_text(title),
        description: escape_text(feature.text("description").unwrap_or_default()),
        image: Image::of(feature, title),
    }
}

pub fn guides_list(guides: &[Entry]) -> askama::Result<String> {
    let guides = guides
        .iter()
        .map(|guide| GuideLink {
            url: escape_attr(&guide_url(guide.text("slug"))),
            title: escape_text(guide.text("title").unwrap_or_default()),
            summary: escaped(guide.text("summary")),
        })
        .collect();

    render_block(&GuidesTemplate { guides })
}

/// Renders one guide with its sections, which must already be in display order
pub fn guide_detail(
    guide: &Entry,
    sections: &[ResolvedEntry<'_>],
    renderer: &RichTextRenderer,
) -> askama::Result<String> {
    let last_updated = guide.text("lastUpdated").and_then(|raw| {
        let date = format_date(raw);
        if date.is_none() {
            tracing::debug!(guide = guide.id(), value = raw, "unparseable lastUpdated");
        }
        date
    });

    let sections = sections
        .iter()
        .map(|section| Section {
            title: escape_text(section.text("sectionTitle").unwrap_or_default()),
            body: renderer.render_value(section.field("content")),
        })
        .collect();

    render_block(&GuideTemplate {
        title: escape_text(guide.text("title").unwrap_or_default()),
        summary: escaped(guide.text("summary")),
        last_updated,
        sections,
    })
}

pub fn content_page(page: &Entry, renderer: &RichTextRenderer) -> askama::Result<String> {
    ContentTemplate {
        title: escape_text(page.text("pageTitle").unwrap_or_default()),
        summary: escaped(page.text("summary")),
        body: renderer.render_value(page.field("bodyContent")),
    }
    .render()
}

/// User-facing error markup
pub fn error_box(kind: PageKind, message: &str) -> askama::Result<String> {
    render_block(&ErrorTemplate {
        wrapped: kind == PageKind::Landing,
        message: escape_text(message),
        hint: escape_text(kind.designer_hint()),
    })
}
