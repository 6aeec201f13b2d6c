use crate::constants::*;
use crate::slide::Slide;

/// Ordered slides plus presentation-wide properties, built by value.
#[derive(Debug, Clone, PartialEq)]
pub struct Deck {
    title: String,
    width: i64,
    height: i64,
    slides: Vec<Slide>,
}

impl Deck {
    pub fn new(title: impl Into<String>) -> Self {
        Self::with_size(title, SLIDE_WIDTH, SLIDE_HEIGHT)
    }

    pub fn with_size(title: impl Into<String>, width: i64, height: i64) -> Self {
        Self { title: title.into(), width, height, slides: Vec::new() }
    }

    #[must_use]
    pub fn with_slide(mut self, slide: Slide) -> Self {
        self.slides.push(slide);
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn width(&self) -> i64 {
        self.width
    }

    pub fn height(&self) -> i64 {
        self.height
    }

    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    pub fn labels(&self) -> Vec<&str> {
        self.slides.iter().map(|s| s.label.text.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgb;
    use crate::config::{LabelPosition, SlideOptions};
    use crate::slide::Label;

    fn label_only(text: &str) -> Slide {
        let options = SlideOptions { position: LabelPosition::Top, border: false };
        Slide {
            picture: None,
            label: Label::new(text.to_string(), Rgb::WHITE, &options, SLIDE_WIDTH, SLIDE_HEIGHT),
        }
    }

    #[test]
    fn test_new_deck_is_empty_with_default_size() {
        let deck = Deck::new("Graduates");
        assert!(deck.is_empty());
        assert_eq!(deck.title(), "Graduates");
        assert_eq!((deck.width(), deck.height()), (9_144_000, 6_858_000));
    }

    #[test]
    fn test_slides_keep_insertion_order() {
        let deck = Deck::new("t")
            .with_slide(label_only("B - Then"))
            .with_slide(label_only("A - Now"));
        assert_eq!(deck.len(), 2);
        assert_eq!(deck.labels(), vec!["B - Then", "A - Now"]);
    }

    #[test]
    fn test_builder_does_not_touch_earlier_values() {
        let base = Deck::new("t").with_slide(label_only("A - Now"));
        let extended = base.clone().with_slide(label_only("A - Then"));
        assert_eq!(base.len(), 1);
        assert_eq!(extended.len(), 2);
    }
}
