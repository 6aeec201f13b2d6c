use std::path::PathBuf;
use crate::category::Category;
use crate::config::Config;
use crate::deck::Deck;
use crate::error::DeckError;
use crate::photo_loader::{Entity, find_photo, load_photo, load_sorted_entities};
use crate::slide::Slide;
use crate::writer::DeckWriter;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BuildReport {
    pub entities: usize,
    pub slides: Vec<String>,
    pub missing: Vec<(String, Category)>,
    pub failed: Vec<PathBuf>,
}

/// Walks the root and builds the deck in memory. Only a failure to list the
/// root itself is fatal; photo problems are logged and skipped.
pub fn build_deck(config: &Config) -> Result<(Deck, BuildReport), DeckError> {
    let entities = load_sorted_entities(&config.root)?;
    if entities.is_empty() {
        tracing::warn!(root = ?config.root, "No entity folders found");
    }

    let mut deck = Deck::new(config.title.clone());
    let mut report = BuildReport { entities: entities.len(), ..Default::default() };

    for entity in &entities {
        deck = add_entity(deck, entity, config, &mut report);
    }

    Ok((deck, report))
}

fn add_entity(mut deck: Deck, entity: &Entity, config: &Config, report: &mut BuildReport) -> Deck {
    for category in config.variant.category_order() {
        let base_name = config.base_name(category);
        let Some(path) = find_photo(&entity.dir, base_name, config.extensions.as_slice()) else {
            tracing::warn!("{}", missing_notice(base_name, &entity.name));
            report.missing.push((entity.name.clone(), category));
            continue;
        };

        let photo = match load_photo(&path) {
            Ok(photo) => photo,
            Err(e) => {
                tracing::warn!(entity = %entity.name, %category, "Skipping photo: {}", e);
                report.failed.push(path);
                continue;
            }
        };

        let slide = Slide::compose(
            &entity.name,
            config.variant.label(category),
            &photo,
            &config.slide,
            deck.width(),
            deck.height(),
        );
        tracing::info!(path = ?path, "Added slide \"{}\"", slide.label.text);
        report.slides.push(slide.label.text.clone());
        deck = deck.with_slide(slide);
    }
    deck
}

// "baby" -> "Baby photo missing for: Avery"
fn missing_notice(base_name: &str, entity: &str) -> String {
    let mut chars = base_name.chars();
    let base: String = match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    };
    format!("{} photo missing for: {}", base, entity)
}

pub fn run(config: &Config, writer: &mut dyn DeckWriter) -> Result<BuildReport, DeckError> {
    tracing::info!(root = ?config.root, variant = ?config.variant, "Building presentation");
    let (deck, report) = build_deck(config)?;
    writer.write(&deck)?;
    Ok(report)
}
