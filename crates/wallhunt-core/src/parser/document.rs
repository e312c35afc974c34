//! Document query adapter over `scraper`
//!
//! Pipeline code only sees selectors by name through [`Selectors`] and
//! queries markup through the helpers here, so a markup change on the
//! target site is a change to one mapping.

use scraper::{ElementRef, Html, Selector};

use crate::error::{Result, WallhuntError};

/// Markup selectors for the target site
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selectors {
    /// One entry per listing thumbnail
    pub thumbnail: String,
    /// Detail link inside a thumbnail
    pub detail_link: String,
    /// Image inside a thumbnail whose `alt` is the title
    pub title_image: String,
    /// Author name inside a thumbnail
    pub author: String,
    /// Preview image on the detail page
    pub preview_image: String,
    /// Attribute of the preview image holding the descriptor list
    pub descriptor_attr: String,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            thumbnail: r#"figure[data-cy="resource-thumbnail"]"#.to_string(),
            detail_link: "a[href]".to_string(),
            title_image: "img".to_string(),
            author: ".showcase__author".to_string(),
            preview_image: r#"div[data-cy="resource-detail-preview"] img"#.to_string(),
            descriptor_attr: "srcset".to_string(),
        }
    }
}

/// Compiles a CSS selector, reporting bad selectors as parse errors
pub fn compile(selector: &str) -> Result<Selector> {
    Selector::parse(selector)
        .map_err(|e| WallhuntError::Parse(format!("Invalid selector {}: {:?}", selector, e)))
}

/// Parsed HTML page
pub struct Document {
    html: Html,
}

impl Document {
    pub fn parse(html: &str) -> Self {
        Self {
            html: Html::parse_document(html),
        }
    }

    /// All elements matching `selector`, in document order
    pub fn find(&self, selector: &Selector) -> Vec<ElementRef<'_>> {
        self.html.select(selector).collect()
    }

    /// First element matching `selector`
    pub fn first(&self, selector: &Selector) -> Option<ElementRef<'_>> {
        self.html.select(selector).next()
    }
}

/// First descendant of `element` matching `selector`
pub fn first_in<'a>(element: &ElementRef<'a>, selector: &Selector) -> Option<ElementRef<'a>> {
    element.select(selector).next()
}

/// Attribute value, `None` when absent or blank
pub fn attr<'a>(element: &ElementRef<'a>, name: &str) -> Option<&'a str> {
    element
        .value()
        .attr(name)
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

/// Concatenated, trimmed text content
pub fn text(element: &ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}
