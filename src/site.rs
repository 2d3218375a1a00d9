//! Page driver
//!
//! Runs one page build: query the content source, resolve linked entries,
//! render rich text and assemble the page markup.

use thiserror::Error;

use crate::config::StylesConfig;
use crate::delivery::{ContentSource, DeliveryError, EntriesResponse, EntryQuery};
use crate::domain::{sort_by_order, IncludeTable, ResolveError};
use crate::render::{self, LandingView, PageKind, RichTextRenderer};

/// Include depth for pages that need linked entries
const LINKED_DEPTH: u8 = 2;

#[derive(Debug, Error)]
pub enum PageError {
    #[error("Unable to load {subject}")]
    Fetch {
        subject: &'static str,
        #[source]
        source: DeliveryError,
    },

    #[error("{0}")]
    NoContentFound(String),

    #[error("Unable to load {subject}")]
    InvalidResponse {
        subject: &'static str,
        #[source]
        source: ResolveError,
    },

    #[error("Unable to render {subject}")]
    Render {
        subject: &'static str,
        #[source]
        source: askama::Error,
    },
}

impl PageError {
    /// The error and its causes, joined with `: `
    pub fn message(&self) -> String {
        let mut message = self.to_string();
        let mut cause = std::error::Error::source(self);
        while let Some(error) = cause {
            message.push_str(": ");
            message.push_str(&error.to_string());
            cause = error.source();
        }
        message
    }

    fn render(kind: PageKind) -> impl FnOnce(askama::Error) -> Self {
        move |source| PageError::Render {
            subject: kind.subject(),
            source,
        }
    }
}

/// Builds pages from one content source
pub struct Site<S> {
    source: S,
    guide_renderer: RichTextRenderer,
    content_renderer: RichTextRenderer,
}

impl<S: ContentSource> Site<S> {
    pub fn new(source: S, styles: &StylesConfig) -> Self {
        Self {
            source,
            guide_renderer: RichTextRenderer::new(styles.guide.clone()),
            content_renderer: RichTextRenderer::new(styles.content_page.clone()),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Builds the page, or the error box when it cannot be built
    pub fn build(&self, request: &PageRequest) -> PageOutcome {
        let kind = request.kind();
        match self.build_page(request) {
            Ok(html) => PageOutcome {
                kind,
                html,
                error: None,
            },
            Err(error) => {
                let message = error.message();
                tracing::debug!(page = %kind, error = %message, "page build failed");
                let html = render::error_box(kind, &message).unwrap_or_else(|e| {
                    tracing::error!(page = %kind, error = %e, "error template failed");
                    render::escape_text(&message)
                });
                PageOutcome {
                    kind,
                    html,
                    error: Some(error),
                }
            }
        }
    }

    pub fn build_page(&self, request: &PageRequest) -> Result<String, PageError> {
        match request {
            PageRequest::Landing => self.landing(),
            PageRequest::GuidesList => self.guides_list(),
            PageRequest::Guide { slug } => self.guide(slug),
            PageRequest::Content { page_type } => self.content_page(page_type),
        }
    }

    pub fn landing(&self) -> Result<String, PageError> {
        let kind = PageKind::Landing;
        let response = self.fetch(kind, &EntryQuery::new("landingPage").include(LINKED_DEPTH))?;

        let Some(page) = response.first() else {
            return Err(PageError::NoContentFound(
                "No landing page found. Please create a Landing Page entry in Contentful with content type \"landingPage\".".to_string(),
            ));
        };

        let includes = include_table(kind, &response)?;
        let view = LandingView {
            page,
            features: includes.resolve_list(page, "features"),
            featured_guide: includes.resolve_one(page, "featuredGuide"),
        };
        tracing::debug!(
            features = view.features.len(),
            featured_guide = view.featured_guide.is_some(),
            "resolved landing page links"
        );

        render::landing_page(&view).map_err(PageError::render(kind))
    }

    pub fn guides_list(&self) -> Result<String, PageError> {
        let response = self.fetch(PageKind::GuidesList, &EntryQuery::new("guide"))?;

        if response.is_empty() {
            return Err(PageError::NoContentFound(
                "No guides found. Please create Guide entries in Contentful.".to_string(),
            ));
        }

        render::guides_list(&response.items)
            .map_err(PageError::render(PageKind::GuidesList))
    }

    pub fn guide(&self, slug: &str) -> Result<String, PageError> {
        let kind = PageKind::Guide;
        let query = EntryQuery::new("guide")
            .field_eq("slug", slug)
            .include(LINKED_DEPTH);
        let response = self.fetch(kind, &query)?;

        let Some(guide) = response.first() else {
            return Err(PageError::NoContentFound(format!(
                "Guide not found with slug: {}",
                slug
            )));
        };

        let includes = include_table(kind, &response)?;
        let mut sections = includes.resolve_list(guide, "guideSections");
        sort_by_order(&mut sections);
        tracing::debug!(slug, sections = sections.len(), "resolved guide sections");

        render::guide_detail(guide, &sections, &self.guide_renderer)
            .map_err(PageError::render(kind))
    }

    pub fn content_page(&self, page_type: &str) -> Result<String, PageError> {
        let query = EntryQuery::new("contentPage").field_eq("pageType", page_type);
        let response = self.fetch(PageKind::Content, &query)?;

        let Some(page) = response.first() else {
            return Err(PageError::NoContentFound(format!(
                "No content page found for \"{0}\". Please create a Content Page entry in Contentful with pageType=\"{0}\".",
                page_type
            )));
        };

        render::content_page(page, &self.content_renderer)
            .map_err(PageError::render(PageKind::Content))
    }

    fn fetch(&self, kind: PageKind, query: &EntryQuery) -> Result<EntriesResponse, PageError> {
        tracing::debug!(
            page = %kind,
            source = %self.source.describe(),
            content_type = %query.content_type,
            "querying entries"
        );

        let response = self
            .source
            .fetch_entries(query)
            .map_err(|source| PageError::Fetch {
                subject: kind.subject(),
                source,
            })?;

        tracing::debug!(items = response.items.len(), "entries received");
        Ok(response)
    }
}

fn include_table(kind: PageKind, response: &EntriesResponse) -> Result<IncludeTable, PageError> {
    response
        .include_table()
        .map_err(|source| PageError::InvalidResponse {
            subject: kind.subject(),
            source,
        })
}

/// Which page to build
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageRequest {
    Landing,
    GuidesList,
    Guide { slug: String },
    Content { page_type: String },
}

impl PageRequest {
    pub fn kind(&self) -> PageKind {
        match self {
            PageRequest::Landing => PageKind::Landing,
            PageRequest::GuidesList => PageKind::GuidesList,
            PageRequest::Guide { .. } => PageKind::Guide,
            PageRequest::Content { .. } => PageKind::Content,
        }
    }
}

/// Result of a page build; `html` is the error box when `error` is set
#[derive(Debug)]
pub struct PageOutcome {
    pub kind: PageKind,
    pub html: String,
    pub error: Option<PageError>,
}

impl PageOutcome {
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}
