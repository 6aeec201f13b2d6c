use crate::color::{Rgb, contrast_color, dominant_color};
use crate::config::{LabelPosition, SlideOptions};
use crate::constants::*;
use crate::photo_loader::Photo;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaFormat {
    Jpeg,
    Png,
}

impl MediaFormat {
    pub fn extension(self) -> &'static str {
        match self {
            MediaFormat::Jpeg => "jpeg",
            MediaFormat::Png => "png",
        }
    }

    pub fn content_type(self) -> &'static str {
        match self {
            MediaFormat::Jpeg => "image/jpeg",
            MediaFormat::Png => "image/png",
        }
    }
}

// Encoded bytes as stored in the package
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Media {
    pub bytes: Vec<u8>,
    pub format: MediaFormat,
}

// EMU; offsets may be negative
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    pub left: i64,
    pub top: i64,
    pub width: i64,
    pub height: i64,
}

impl Frame {
    pub fn centered_in(self, canvas_width: i64, canvas_height: i64) -> Frame {
        Frame {
            left: (canvas_width - self.width).div_euclid(2),
            top: (canvas_height - self.height).div_euclid(2),
            ..self
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Picture {
    pub media: Media,
    pub frame: Frame,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub text: String,
    pub frame: Frame,
    pub fill: Rgb,
    pub text_color: Rgb,
    pub border: Option<i64>, // stroke width in EMU, drawn in text_color
    pub font_size_pt: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Slide {
    pub picture: Option<Picture>,
    pub label: Label,
}

impl Slide {
    pub fn compose(
        entity: &str,
        label: &str,
        photo: &Photo,
        options: &SlideOptions,
        deck_width: i64,
        deck_height: i64,
    ) -> Slide {
        let fill = dominant_color(&photo.image);
        let label = Label::new(format!("{} - {}", entity, label), fill, options, deck_width, deck_height);
        tracing::debug!(text = %label.text, %fill, text_color = %label.text_color, "Label colors");

        let picture = Picture {
            media: photo.media.clone(),
            frame: picture_frame(photo.image.width(), photo.image.height(), deck_width)
                .centered_in(deck_width, deck_height),
        };

        Slide {
            picture: Some(picture),
            label,
        }
    }
}

impl Label {
    pub fn new(
        text: String,
        fill: Rgb,
        options: &SlideOptions,
        deck_width: i64,
        deck_height: i64,
    ) -> Label {
        let width = label_width(&text);
        let (left, top) = match options.position {
            LabelPosition::Top => (LABEL_MARGIN, LABEL_TOP_OFFSET),
            LabelPosition::BottomRight => (
                deck_width - width - LABEL_MARGIN,
                deck_height - LABEL_HEIGHT - LABEL_MARGIN,
            ),
        };

        Label {
            frame: Frame { left, top, width, height: LABEL_HEIGHT },
            text,
            fill,
            text_color: contrast_color(fill),
            border: options.border.then_some(LABEL_BORDER_WIDTH),
            font_size_pt: LABEL_FONT_SIZE_PT,
        }
    }
}

// --- Helper: Full-Width Picture at the Anchor, Height From Aspect Ratio ---
pub fn picture_frame(pixel_width: u32, pixel_height: u32, deck_width: i64) -> Frame {
    let height = if pixel_width == 0 {
        0
    } else {
        deck_width * pixel_height as i64 / pixel_width as i64
    };
    Frame { left: 0, top: PICTURE_ANCHOR_TOP, width: deck_width, height }
}

// Rough auto-fit: base width plus a fixed increment per character
pub fn label_width(text: &str) -> i64 {
    LABEL_BASE_WIDTH + LABEL_CHAR_WIDTH * text.chars().count() as i64
}
