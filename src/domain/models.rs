use std::collections::HashSet;
use serde::{Deserialize, Serialize};

use crate::domain::{DomainError, DomainResult};

/// Viewport width (in pixels) from which two slides fit side by side.
pub const MEDIUM_BREAKPOINT: u32 = 768;
/// Viewport width (in pixels) from which three slides fit side by side.
pub const LARGE_BREAKPOINT: u32 = 1024;

/// A single carousel card. Never mutated once the deck is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slide {
    pub id: u32,
    pub image: String,
    pub category: String,
    pub title: String,
    pub description: String,
}

impl Slide {
    pub fn new(id: u32, category: &str, title: &str, description: &str, image: &str) -> Self {
        Self {
            id,
            image: image.to_string(),
            category: category.to_string(),
            title: title.to_string(),
            description: description.to_string(),
        }
    }
}

/// Ordered, read-only slide store backing a carousel.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SlideDeck {
    slides: Vec<Slide>,
}

impl SlideDeck {
    /// Builds a deck, rejecting records that share an id.
    pub fn new(slides: Vec<Slide>) -> DomainResult<Self> {
        let mut seen = HashSet::new();
        for slide in &slides {
            if !seen.insert(slide.id) {
                return Err(DomainError::DuplicateSlideId(slide.id));
            }
        }
        Ok(Self { slides })
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    /// Number of pages for the given window size; never less than one.
    pub fn total_pages(&self, items_per_view: usize) -> usize {
        total_pages(self.slides.len(), items_per_view)
    }

    /// Slides shown on `page`. The last page may be short; an out of range
    /// page yields an empty slice.
    pub fn page(&self, page: usize, items_per_view: usize) -> &[Slide] {
        let per_view = items_per_view.max(1);
        let start = page.saturating_mul(per_view).min(self.slides.len());
        let end = start.saturating_add(per_view).min(self.slides.len());
        &self.slides[start..end]
    }

    /// The nine cards the site ships with when no deck is configured.
    pub fn default_slides() -> Vec<Slide> {
        vec![
            Slide::new(1, "INNOVATION", "We lead the change",
                "We experiment, test and ship what our clients actually need.",
                "/img/About/about-bg.jpg"),
            Slide::new(2, "QUALITY", "High standards, concrete results",
                "Clear processes, attention to detail and continuous feedback for reliable delivery.",
                "/images/carousel/success-quote.jpg"),
            Slide::new(3, "TRANSPARENCY", "Simple, direct communication",
                "We share roadmaps, metrics and decisions clearly. No frills.",
                "/images/carousel/quality-quote.jpg"),
            Slide::new(4, "SUPPORT", "Close to the client, always",
                "Proactive, continuous support: present in the critical phases, not only at go-live.",
                "/images/carousel/future-quote.jpg"),
            Slide::new(5, "SCALABILITY", "Solutions that grow with you",
                "Robust architectures, performance under load and end-to-end observability.",
                "/images/carousel/excellence-quote.jpg"),
            Slide::new(6, "SIMPLICITY", "Less, but better",
                "We cut complexity down to the essentials to ease adoption.",
                "/images/carousel/simplicity-quote.jpg"),
            Slide::new(7, "EXPERIENCE", "Focused on the end user",
                "We design from real behaviour and measure the impact with data.",
                "/images/carousel/customer-quote.jpg"),
            Slide::new(8, "COLLABORATION", "One single team",
                "Product, design and engineering work together with shared ownership.",
                "/images/carousel/communication-quote.jpg"),
            Slide::new(9, "GROWTH", "Continuous improvement",
                "Retrospectives, learning and constant experimentation to raise the bar.",
                "/images/carousel/discovery-quote.jpg"),
        ]
    }
}

/// How many slides fit side by side at the given viewport width.
pub fn items_per_view(viewport_width: u32) -> usize {
    if viewport_width >= LARGE_BREAKPOINT {
        3
    } else if viewport_width >= MEDIUM_BREAKPOINT {
        2
    } else {
        1
    }
}

/// `ceil(slide_count / items_per_view)`, floored at one page so that the
/// page index always has a valid value to rest on.
pub fn total_pages(slide_count: usize, items_per_view: usize) -> usize {
    slide_count.div_ceil(items_per_view.max(1)).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_items_per_view_breakpoints() {
        assert_eq!(items_per_view(0), 1);
        assert_eq!(items_per_view(767), 1);
        assert_eq!(items_per_view(768), 2);
        assert_eq!(items_per_view(1023), 2);
        assert_eq!(items_per_view(1024), 3);
        assert_eq!(items_per_view(u32::MAX), 3);
    }

    #[test]
    fn test_total_pages() {
        assert_eq!(total_pages(9, 3), 3);
        assert_eq!(total_pages(9, 2), 5);
        assert_eq!(total_pages(9, 1), 9);
        assert_eq!(total_pages(10, 3), 4);
        assert_eq!(total_pages(0, 3), 1);
        assert_eq!(total_pages(4, 0), 4);
    }

    #[test]
    fn test_deck_rejects_duplicate_ids() {
        let slides = vec![
            Slide::new(1, "A", "a", "", ""),
            Slide::new(2, "B", "b", "", ""),
            Slide::new(1, "C", "c", "", ""),
        ];
        assert_eq!(SlideDeck::new(slides), Err(DomainError::DuplicateSlideId(1)));
    }

    #[test]
    fn test_deck_pages() {
        let deck = SlideDeck::new(SlideDeck::default_slides()).unwrap();
        assert_eq!(deck.len(), 9);

        let second = deck.page(1, 2);
        assert_eq!(second.iter().map(|s| s.id).collect::<Vec<_>>(), vec![3, 4]);

        let last = deck.page(4, 2);
        assert_eq!(last.len(), 1);
        assert_eq!(last[0].id, 9);

        assert!(deck.page(7, 2).is_empty());
    }

    #[test]
    fn test_empty_deck() {
        let deck = SlideDeck::default();
        assert!(deck.is_empty());
        assert_eq!(deck.total_pages(3), 1);
        assert!(deck.page(0, 3).is_empty());
    }
}
