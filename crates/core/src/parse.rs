//! HTML parsing and DOM access.
//!
//! This module provides the [`Document`] and [`Element`] types for parsing
//! HTML and navigating the DOM tree using CSS selectors. The fragment
//! extractor walks the underlying tree of a parsed [`Document`] in document
//! order.
//!
//! # Example
//!
//! ```rust
//! use transfero_core::parse::Document;
//!
//! let html = r#"
//!     <html>
//!         <body>
//!             <h1>Title</h1>
//!             <p class="content">Paragraph</p>
//!         </body>
//!     </html>
//! "#;
//!
//! let doc = Document::parse(html).unwrap();
//! let title = doc.title();
//! let paragraphs = doc.select("p.content").unwrap();
//! ```

use scraper::{Html, Selector};

use crate::{Result, TransferoError};

/// Represents a parsed HTML document.
///
/// A Document wraps an HTML page and provides methods for querying elements
/// using CSS selectors and extracting text content. Parsing never fails on
/// malformed markup; the parser recovers the way browsers do, so an
/// unparseable page degrades to an empty or partial tree rather than an
/// error.
///
/// # Example
///
/// ```rust
/// use transfero_core::parse::Document;
///
/// let html = "<html><head><title>Test</title></head><body><p>Hello</p></body></html>";
/// let doc = Document::parse(html).unwrap();
/// assert_eq!(doc.title(), Some("Test".to_string()));
/// ```
pub struct Document {
    html: Html,
}

impl Document {
    /// Parses HTML from a string.
    ///
    /// # Arguments
    ///
    /// * `html` - The HTML content to parse
    pub fn parse(html: &str) -> Result<Self> {
        let html = Html::parse_document(html);
        Ok(Self { html })
    }

    /// Gets the raw HTML representation.
    ///
    /// Returns a reference to the underlying `scraper::Html` instance.
    pub fn html(&self) -> &Html {
        &self.html
    }

    /// Gets the entire HTML as a string.
    pub fn as_string(&self) -> String {
        self.html.html()
    }

    /// Selects elements using a CSS selector.
    ///
    /// # Arguments
    ///
    /// * `selector` - A CSS selector string (e.g., "p.content", "#main")
    ///
    /// # Errors
    ///
    /// Returns [`TransferoError::HtmlParseError`] if the selector is invalid.
    ///
    /// # Example
    ///
    /// ```rust
    /// use transfero_core::parse::Document;
    ///
    /// let html = r#"<p class="content">First</p><p class="content">Second</p>"#;
    /// let doc = Document::parse(html).unwrap();
    /// let elements = doc.select("p.content").unwrap();
    /// assert_eq!(elements.len(), 2);
    /// ```
    pub fn select(&'_ self, selector: &str) -> Result<Vec<Element<'_>>> {
        let sel = Selector::parse(selector)
            .map_err(|e| TransferoError::HtmlParseError(format!("Invalid selector: {}", e)))?;

        Ok(self.html.select(&sel).map(|el| Element { element: el }).collect())
    }

    /// Gets the title of the document.
    ///
    /// Returns the content of the `<title>` element if present.
    pub fn title(&self) -> Option<String> {
        let selector = Selector::parse("title").ok()?;
        self.html
            .select(&selector)
            .next()
            .map(|el| el.text().collect::<String>())
    }

    /// Gets all text content from the document.
    pub fn text_content(&self) -> String {
        self.html.root_element().text().collect()
    }
}

/// A wrapper around scraper's ElementRef for easier DOM access.
///
/// Element represents a single node in the HTML document tree and provides
/// methods for accessing its attributes and text content.
///
/// # Example
///
/// ```rust
/// use transfero_core::parse::Document;
///
/// let html = r#"<a href="https://example.com">Link text</a>"#;
/// let doc = Document::parse(html).unwrap();
/// let link = &doc.select("a").unwrap()[0];
///
/// assert_eq!(link.text(), "Link text");
/// assert_eq!(link.attr("href"), Some("https://example.com"));
/// ```
#[derive(Clone, Debug)]
pub struct Element<'a> {
    element: scraper::ElementRef<'a>,
}

impl<'a> Element<'a> {
    /// Gets the text content of this element.
    ///
    /// Returns the concatenation of all text nodes within this element.
    pub fn text(&self) -> String {
        self.element.text().collect()
    }

    /// Gets the value of an attribute.
    ///
    /// # Arguments
    ///
    /// * `name` - The attribute name (e.g., "href", "class", "id")
    ///
    /// Returns `None` if the attribute is not present.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.element.value().attr(name)
    }

    /// Gets the tag name of this element.
    ///
    /// Returns the lowercase tag name (e.g., "div", "a", "span").
    pub fn tag_name(&self) -> String {
        self.element.value().name().to_lowercase()
    }

    /// Gets the underlying `ElementRef` for tree traversal.
    pub(crate) fn element_ref(&self) -> scraper::ElementRef<'a> {
        self.element
    }
}
