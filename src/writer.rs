use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use crate::deck::Deck;
use crate::error::DeckError;
use crate::pptx;

pub trait DeckWriter {
    fn write(&mut self, deck: &Deck) -> Result<(), DeckError>;
}

pub struct PptxFile {
    pub path: PathBuf,
    pub replace_existing: bool, // delete the old deck instead of overwriting it
}

impl PptxFile {
    pub fn new(path: impl Into<PathBuf>, replace_existing: bool) -> Self {
        Self { path: path.into(), replace_existing }
    }

    // Sibling of the output, so the final rename stays on one filesystem
    fn partial_path(&self) -> PathBuf {
        let mut name = self.path.file_name().map(OsString::from).unwrap_or_default();
        name.push(".partial");
        self.path.with_file_name(name)
    }

    fn encode_to(&self, partial: &Path, deck: &Deck) -> Result<(), DeckError> {
        let file = File::create(partial).map_err(|e| DeckError::io(&self.path, e))?;
        let mut out = pptx::encode(deck, BufWriter::new(file))?;
        out.flush().map_err(|e| DeckError::io(&self.path, e))?;
        Ok(())
    }
}

impl DeckWriter for PptxFile {
    fn write(&mut self, deck: &Deck) -> Result<(), DeckError> {
        let partial = self.partial_path();
        if let Err(e) = self.encode_to(&partial, deck) {
            // the previous deck, if any, is left untouched
            if let Err(cleanup) = fs::remove_file(&partial) {
                tracing::debug!(path = ?partial, %cleanup, "Could not remove partial output");
            }
            return Err(e);
        }

        if self.replace_existing && self.path.exists() {
            fs::remove_file(&self.path).map_err(|e| DeckError::io(&self.path, e))?;
            tracing::info!(path = ?self.path, "Deleted existing presentation");
        }
        fs::rename(&partial, &self.path).map_err(|e| DeckError::io(&self.path, e))?;
        Ok(())
    }
}
