//! The slide model.
//!
//! A [`Slide`] is one addressable unit of presented content. The player
//! only cares about its addressing data (id, index, hierarchical number),
//! its chapter level, and whether it is enabled; the content payload is
//! opaque and owned by the rendering layer.

/// A slide's depth in the table-of-contents hierarchy.
///
/// Chapter levels come from `h0`..`hN` tags on the source markup. `h0`
/// marks front matter, which always carries the literal number "0" and
/// participates in no nesting. Untagged slides (`chapter == None` on the
/// slide) are plain leaves below the innermost active chapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChapterLevel {
    /// Front matter (`h0`).
    FrontMatter,
    /// A chapter heading; the depth is the `N` in `hN`, starting at 1.
    Heading(u8),
}

impl ChapterLevel {
    /// Parse a chapter tag of the form `h0`..`hN`.
    ///
    /// Malformed tags yield `None`; the numbering engine then treats the
    /// slide as a plain leaf rather than failing the presentation.
    pub fn parse(raw: &str) -> Option<Self> {
        let depth: u8 = raw.strip_prefix('h')?.parse().ok()?;
        if depth == 0 {
            Some(Self::FrontMatter)
        } else {
            Some(Self::Heading(depth))
        }
    }
}

impl std::fmt::Display for ChapterLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FrontMatter => write!(f, "h0"),
            Self::Heading(depth) => write!(f, "h{depth}"),
        }
    }
}

/// A single slide.
///
/// Created by whatever parses the presentation source; the deck assigns
/// `index` and `number` during composition, so both start out empty.
#[derive(Debug, Clone)]
pub struct Slide {
    /// Stable identifier for deep links, independent of position.
    pub id: Option<String>,
    /// Position in source order, assigned by the deck.
    pub index: usize,
    /// Hierarchical number, e.g. "2.1.3" or "0" for front matter.
    /// Assigned once by the deck at composition time.
    pub number: String,
    /// Chapter tag, or `None` for a plain leaf slide.
    pub chapter: Option<ChapterLevel>,
    /// Disabled slides keep their number but drop out of navigation.
    pub enabled: bool,
    /// Human-readable title shown in navigation and the table of contents.
    pub title: String,
    /// Optional caption snippet for overview rendering.
    pub caption: Option<String>,
    /// Opaque content payload, owned by the rendering layer.
    pub content_html: String,
}

impl Slide {
    /// Create an enabled, untagged slide with the given title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: None,
            index: 0,
            number: String::new(),
            chapter: None,
            enabled: true,
            title: title.into(),
            caption: None,
            content_html: String::new(),
        }
    }

    /// Set the stable id.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set the chapter level.
    pub fn with_chapter(mut self, level: ChapterLevel) -> Self {
        self.chapter = Some(level);
        self
    }

    /// Set the caption snippet.
    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }

    /// Set the content payload.
    pub fn with_content(mut self, html: impl Into<String>) -> Self {
        self.content_html = html.into();
        self
    }

    /// Start out disabled (the source equivalent of an `invisible` slide
    /// that plugins may enable at runtime).
    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }
}
