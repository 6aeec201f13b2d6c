use std::path::PathBuf;
use clap::{Parser, ValueEnum};
use crate::category::Category;
use crate::constants::*;
use crate::error::DeckError;

/// Where the label box sits on the slide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LabelPosition {
    /// Near the top-left edge
    Top,
    /// Bottom-right corner, inset by a half-inch margin
    BottomRight,
}

/// Layout presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Variant {
    /// Top label, no border, "Younger", current photo first, no stale-file cleanup
    Classic,
    /// Bottom-right bordered label, "Then", earlier photo first, stale output removed
    Refined,
}

impl Variant {
    pub fn position(self) -> LabelPosition {
        match self {
            Variant::Classic => LabelPosition::Top,
            Variant::Refined => LabelPosition::BottomRight,
        }
    }

    pub fn border(self) -> bool {
        matches!(self, Variant::Refined)
    }

    pub fn replaces_existing_output(self) -> bool {
        matches!(self, Variant::Refined)
    }

    pub fn category_order(self) -> [Category; 2] {
        match self {
            Variant::Classic => [Category::Current, Category::Earlier],
            Variant::Refined => [Category::Earlier, Category::Current],
        }
    }

    pub fn label(self, category: Category) -> &'static str {
        match (self, category) {
            (_, Category::Current) => "Now",
            (Variant::Classic, Category::Earlier) => "Younger",
            (Variant::Refined, Category::Earlier) => "Then",
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "photodeck")]
#[command(about = "Build a slide deck from a directory of per-person photo folders")]
pub struct Cli {
    /// Directory whose immediate subfolders are one person each
    pub root: PathBuf,

    /// Output presentation path
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// Layout preset
    #[arg(long, value_enum, default_value_t = Variant::Refined)]
    pub variant: Variant,

    /// Override the preset's label position
    #[arg(long, value_enum)]
    pub position: Option<LabelPosition>,

    /// Override the preset's label border (true/false)
    #[arg(long)]
    pub border: Option<bool>,

    /// Extensions tried in order, comma separated
    #[arg(long, value_delimiter = ',', default_values_t = DEFAULT_EXTENSIONS.map(String::from))]
    pub extensions: Vec<String>,

    /// Base file name of the current photo
    #[arg(long, default_value = DEFAULT_CURRENT_NAME)]
    pub current_name: String,

    /// Base file name of the earlier photo
    #[arg(long, default_value = DEFAULT_EARLIER_NAME)]
    pub earlier_name: String,

    /// Deck title stored in document properties (defaults to the root folder name)
    #[arg(long)]
    pub title: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlideOptions {
    pub position: LabelPosition,
    pub border: bool,
}

impl From<Variant> for SlideOptions {
    fn from(variant: Variant) -> Self {
        Self { position: variant.position(), border: variant.border() }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub root: PathBuf,
    pub output: PathBuf,
    pub variant: Variant,
    pub slide: SlideOptions,
    pub extensions: Vec<String>,
    pub current_name: String,
    pub earlier_name: String,
    pub title: String,
}

impl Config {
    // Defaults for everything but the root; not validated
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            title: default_title(&root),
            root,
            output: PathBuf::from(DEFAULT_OUTPUT),
            variant: Variant::Refined,
            slide: Variant::Refined.into(),
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            current_name: DEFAULT_CURRENT_NAME.to_string(),
            earlier_name: DEFAULT_EARLIER_NAME.to_string(),
        }
    }

    pub fn with_variant(mut self, variant: Variant) -> Self {
        self.variant = variant;
        self.slide = variant.into();
        self
    }

    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = output.into();
        self
    }

    pub fn base_name(&self, category: Category) -> &str {
        match category {
            Category::Earlier => &self.earlier_name,
            Category::Current => &self.current_name,
        }
    }

    /// Checks everything that can be checked before touching any photo.
    pub fn validate(mut self) -> Result<Self, DeckError> {
        if !self.root.is_dir() {
            return Err(DeckError::Config(format!(
                "root {:?} is not an existing directory",
                self.root
            )));
        }

        self.extensions = self
            .extensions
            .iter()
            .map(|e| e.trim().trim_start_matches('.').to_string())
            .filter(|e| !e.is_empty())
            .collect();
        if self.extensions.is_empty() {
            return Err(DeckError::Config("extension list is empty".to_string()));
        }

        if self.current_name.is_empty() || self.earlier_name.is_empty() {
            return Err(DeckError::Config("photo base names must not be empty".to_string()));
        }
        if self.current_name == self.earlier_name {
            return Err(DeckError::Config(format!(
                "current and earlier photos share the base name {:?}",
                self.current_name
            )));
        }

        if self.output.as_os_str().is_empty() {
            return Err(DeckError::Config("output path is empty".to_string()));
        }

        Ok(self)
    }
}

impl TryFrom<Cli> for Config {
    type Error = DeckError;

    fn try_from(cli: Cli) -> Result<Self, Self::Error> {
        let defaults = SlideOptions::from(cli.variant);
        let config = Config {
            title: cli.title.unwrap_or_else(|| default_title(&cli.root)),
            root: cli.root,
            output: cli.output,
            variant: cli.variant,
            slide: SlideOptions {
                position: cli.position.unwrap_or(defaults.position),
                border: cli.border.unwrap_or(defaults.border),
            },
            extensions: cli.extensions,
            current_name: cli.current_name,
            earlier_name: cli.earlier_name,
        };
        config.validate()
    }
}

fn default_title(root: &std::path::Path) -> String {
    root.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "Photos".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("photodeck").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_cli_defaults() {
        let cli = parse(&["/photos"]);
        assert_eq!(cli.root, PathBuf::from("/photos"));
        assert_eq!(cli.output, PathBuf::from(DEFAULT_OUTPUT));
        assert_eq!(cli.variant, Variant::Refined);
        assert_eq!(cli.extensions, vec!["jpg", "jpeg", "png"]);
        assert_eq!(cli.current_name, "recent");
        assert_eq!(cli.earlier_name, "baby");
        assert!(cli.position.is_none());
        assert!(cli.border.is_none());
    }

    #[test]
    fn test_cli_requires_root() {
        assert!(Cli::try_parse_from(["photodeck"]).is_err());
    }

    #[test]
    fn test_overrides_apply_on_top_of_variant() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().to_str().unwrap();
        let cli = parse(&[root, "--variant", "classic", "--position", "bottom-right", "--border", "true"]);
        let config = Config::try_from(cli).unwrap();

        assert_eq!(config.variant, Variant::Classic);
        assert_eq!(config.slide, SlideOptions { position: LabelPosition::BottomRight, border: true });
    }

    #[test]
    fn test_variant_presets() {
        assert_eq!(
            SlideOptions::from(Variant::Classic),
            SlideOptions { position: LabelPosition::Top, border: false }
        );
        assert_eq!(
            SlideOptions::from(Variant::Refined),
            SlideOptions { position: LabelPosition::BottomRight, border: true }
        );
        assert_eq!(Variant::Refined.category_order(), [Category::Earlier, Category::Current]);
        assert_eq!(Variant::Classic.category_order(), [Category::Current, Category::Earlier]);
        assert_eq!(Variant::Classic.label(Category::Earlier), "Younger");
        assert_eq!(Variant::Refined.label(Category::Earlier), "Then");
        assert_eq!(Variant::Refined.label(Category::Current), "Now");
    }

    #[test]
    fn test_extensions_are_normalized() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().to_str().unwrap();
        let config = Config::try_from(parse(&[root, "--extensions", ".png, JPG,webp"])).unwrap();
        assert_eq!(config.extensions, vec!["png", "JPG", "webp"]);
    }

    #[test]
    fn test_missing_root_is_rejected() {
        let err = Config::new("/definitely/not/here").validate().unwrap_err();
        assert!(matches!(err, DeckError::Config(_)));
    }

    #[test]
    fn test_root_must_be_directory() {
        let file = tempfile::NamedTempFile::new().unwrap();
        assert!(Config::new(file.path()).validate().is_err());
    }

    #[test]
    fn test_empty_extension_list_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::new(dir.path());
        config.extensions = vec![".".to_string(), " ".to_string()];
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_base_names_must_differ() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::new(dir.path());
        config.earlier_name = "recent".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_title_defaults_to_root_name() {
        let config = Config::new("/srv/Graduates");
        assert_eq!(config.title, "Graduates");
        assert_eq!(config.base_name(Category::Earlier), "baby");
        assert_eq!(config.base_name(Category::Current), "recent");
    }
}
