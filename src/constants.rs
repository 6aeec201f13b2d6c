pub const EMU_PER_INCH: i64 = 914_400;        // English Metric Units per inch
pub const EMU_PER_POINT: i64 = 12_700;        // English Metric Units per typographic point

pub const SLIDE_WIDTH: i64 = 10 * EMU_PER_INCH;       // Default 4:3 deck width
pub const SLIDE_HEIGHT: i64 = 7 * EMU_PER_INCH + EMU_PER_INCH / 2; // 7.5 in

pub const PICTURE_ANCHOR_TOP: i64 = EMU_PER_INCH;     // Insertion offset before re-centering

pub const LABEL_BASE_WIDTH: i64 = 2 * EMU_PER_INCH;   // Label width before per-character growth
pub const LABEL_CHAR_WIDTH: i64 = EMU_PER_INCH / 10;  // Added per character of label text
pub const LABEL_HEIGHT: i64 = EMU_PER_INCH;
pub const LABEL_MARGIN: i64 = EMU_PER_INCH / 2;
pub const LABEL_TOP_OFFSET: i64 = EMU_PER_INCH / 10;
pub const LABEL_BORDER_WIDTH: i64 = EMU_PER_INCH / 20;
pub const LABEL_FONT_SIZE_PT: u32 = 24;

pub const SAMPLE_SIZE: u32 = 100;             // Images are resampled to SAMPLE_SIZE x SAMPLE_SIZE
pub const LUMINANCE_THRESHOLD: f64 = 128.0;   // Below this, labels get white text

pub const DEFAULT_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];
pub const DEFAULT_CURRENT_NAME: &str = "recent";
pub const DEFAULT_EARLIER_NAME: &str = "baby";
pub const DEFAULT_OUTPUT: &str = "Graduates_Presentation.pptx";
