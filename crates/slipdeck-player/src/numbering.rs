//! Hierarchical slide numbering and table-of-contents derivation.
//!
//! The engine walks a flat, ordered list of slides and assigns each one a
//! hierarchical chapter number. It keeps a stack of `{level, counter}`
//! frames, outermost first:
//!
//! - A tagged slide (`h1`..`hN`) whose level is already on the stack
//!   truncates everything deeper and increments that frame, so sibling
//!   chapters restart their children's counts.
//! - A tagged slide with a new level drops any frame at the same or
//!   deeper depth, then pushes a fresh frame with counter 1.
//! - An untagged slide is a leaf below the innermost active chapter; it
//!   gets its own running leaf counter, reset by every chapter tag. A
//!   leaf occurring before any chapter is numbered by a flat counter
//!   with no dot.
//! - Front matter (`h0`) is always the literal number "0" and leaves the
//!   stack alone.
//!
//! The engine never fails: malformed input degrades to plain-leaf
//! treatment upstream, and whatever can be derived is derived.

use crate::slide::{ChapterLevel, Slide};

/// One active chapter on the numbering stack.
#[derive(Debug, Clone, Copy)]
struct Frame {
    depth: u8,
    counter: u32,
}

/// Assigns hierarchical numbers to a stream of chapter tags.
#[derive(Debug, Default)]
pub struct NumberingEngine {
    stack: Vec<Frame>,
    flat: u32,
    leaf: u32,
}

impl NumberingEngine {
    /// Create an engine with no active chapters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Produce the number for the next slide in source order.
    pub fn next_number(&mut self, chapter: Option<ChapterLevel>) -> String {
        match chapter {
            Some(ChapterLevel::FrontMatter) => "0".to_string(),
            Some(ChapterLevel::Heading(depth)) => {
                if let Some(position) = self.stack.iter().position(|f| f.depth == depth) {
                    self.stack.truncate(position + 1);
                    self.stack[position].counter += 1;
                } else {
                    self.stack.retain(|f| f.depth < depth);
                    self.stack.push(Frame { depth, counter: 1 });
                }
                self.leaf = 0;
                self.join(None)
            }
            None => {
                if self.stack.is_empty() {
                    self.flat += 1;
                    self.flat.to_string()
                } else {
                    self.leaf += 1;
                    self.join(Some(self.leaf))
                }
            }
        }
    }

    fn join(&self, leaf: Option<u32>) -> String {
        let mut counters: Vec<String> =
            self.stack.iter().map(|f| f.counter.to_string()).collect();
        if let Some(leaf) = leaf {
            counters.push(leaf.to_string());
        }
        counters.join(".")
    }
}

/// Assign numbers to all slides in source order, tagged or not, enabled
/// or not. Numbers are fixed from here on; disabling a slide later
/// leaves a gap instead of renumbering its successors.
pub fn assign_numbers(slides: &mut [Slide]) {
    let mut engine = NumberingEngine::new();
    for (index, slide) in slides.iter_mut().enumerate() {
        slide.index = index;
        slide.number = engine.next_number(slide.chapter);
        tracing::trace!(
            target: slipdeck_core::logging::targets::NUMBERING,
            index,
            number = %slide.number,
            "assigned slide number"
        );
    }
}

/// What a table-of-contents entry stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TocKind {
    /// Front matter, numbered "0".
    FrontMatter,
    /// A chapter heading with its depth.
    Chapter(u8),
    /// A plain leaf slide.
    Slide,
}

/// One entry of the derived table of contents.
///
/// Overview and print plugins render these directly; `slide_index`
/// points back into the deck's source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TocEntry {
    pub number: String,
    pub title: String,
    pub caption: Option<String>,
    pub kind: TocKind,
    pub slide_index: usize,
}

/// Build the table of contents over the given enabled slide indices.
pub fn build_toc(slides: &[Slide], enabled: &[usize]) -> Vec<TocEntry> {
    enabled
        .iter()
        .filter_map(|&index| slides.get(index))
        .map(|slide| TocEntry {
            number: slide.number.clone(),
            title: slide.title.clone(),
            caption: slide.caption.clone(),
            kind: match slide.chapter {
                Some(ChapterLevel::FrontMatter) => TocKind::FrontMatter,
                Some(ChapterLevel::Heading(depth)) => TocKind::Chapter(depth),
                None => TocKind::Slide,
            },
            slide_index: slide.index,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbers(tags: &[Option<ChapterLevel>]) -> Vec<String> {
        let mut engine = NumberingEngine::new();
        tags.iter().map(|tag| engine.next_number(*tag)).collect()
    }

    const H0: Option<ChapterLevel> = Some(ChapterLevel::FrontMatter);
    const H1: Option<ChapterLevel> = Some(ChapterLevel::Heading(1));
    const H2: Option<ChapterLevel> = Some(ChapterLevel::Heading(2));
    const H3: Option<ChapterLevel> = Some(ChapterLevel::Heading(3));
    const LEAF: Option<ChapterLevel> = None;

    #[test]
    fn numbering_round_trip() {
        assert_eq!(
            numbers(&[H0, H1, LEAF, LEAF, H1, H2, LEAF]),
            vec!["0", "1", "1.1", "1.2", "2", "2.1", "2.1.1"]
        );
    }

    #[test]
    fn sibling_chapter_resets_deeper_levels() {
        assert_eq!(numbers(&[H1, H2, H2]), vec!["1", "1.1", "1.2"]);
    }

    #[test]
    fn sibling_chapter_restarts_child_counts() {
        assert_eq!(
            numbers(&[H1, H2, LEAF, H1, H2, LEAF]),
            vec!["1", "1.1", "1.1.1", "2", "2.1", "2.1.1"]
        );
    }

    #[test]
    fn returning_to_outer_level_drops_inner_frames() {
        assert_eq!(
            numbers(&[H1, H2, H3, H1, LEAF]),
            vec!["1", "1.1", "1.1.1", "2", "2.1"]
        );
    }

    #[test]
    fn leaves_before_any_chapter_use_a_flat_counter() {
        assert_eq!(numbers(&[LEAF, LEAF, H1, LEAF]), vec!["1", "2", "1", "1.1"]);
    }

    #[test]
    fn front_matter_is_always_zero_and_never_nests() {
        assert_eq!(
            numbers(&[H1, H0, LEAF, H0]),
            vec!["1", "0", "1.1", "0"]
        );
    }

    #[test]
    fn skipping_a_level_still_nests() {
        // h3 directly below h1: the stack carries both frames.
        assert_eq!(numbers(&[H1, H3, LEAF]), vec!["1", "1.1", "1.1.1"]);
    }

    #[test]
    fn assign_numbers_covers_disabled_slides() {
        let mut slides = vec![
            Slide::new("Intro").with_chapter(ChapterLevel::Heading(1)),
            Slide::new("Extra").disabled(),
            Slide::new("Regular"),
        ];
        assign_numbers(&mut slides);
        assert_eq!(slides[0].number, "1");
        assert_eq!(slides[1].number, "1.1");
        assert_eq!(slides[2].number, "1.2");
        assert_eq!(slides[2].index, 2);
    }

    #[test]
    fn toc_tags_entries_by_kind() {
        let mut slides = vec![
            Slide::new("Welcome").with_chapter(ChapterLevel::FrontMatter),
            Slide::new("Basics").with_chapter(ChapterLevel::Heading(1)),
            Slide::new("Hello").with_caption("first example"),
        ];
        assign_numbers(&mut slides);
        let toc = build_toc(&slides, &[0, 1, 2]);

        assert_eq!(toc.len(), 3);
        assert_eq!(toc[0].kind, TocKind::FrontMatter);
        assert_eq!(toc[1].kind, TocKind::Chapter(1));
        assert_eq!(toc[2].kind, TocKind::Slide);
        assert_eq!(toc[2].number, "1.1");
        assert_eq!(toc[2].caption.as_deref(), Some("first example"));
    }

    #[test]
    fn toc_skips_disabled_slides() {
        let mut slides = vec![
            Slide::new("Basics").with_chapter(ChapterLevel::Heading(1)),
            Slide::new("Hidden"),
            Slide::new("Shown"),
        ];
        assign_numbers(&mut slides);
        let toc = build_toc(&slides, &[0, 2]);

        assert_eq!(toc.len(), 2);
        // The hidden slide keeps its number as a gap.
        assert_eq!(toc[1].number, "1.2");
    }
}
