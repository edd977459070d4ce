use include_dir::{include_dir, Dir};
use serde::Deserialize;
use serde_json::from_str;

use crate::error::{Result, TyxtError};

static LANG_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/lang");

/// Name of the word list every session draws from.
pub const DEFAULT_LANGUAGE: &str = "common";

/// A fixed, embedded word list
#[derive(Deserialize, Clone, Debug)]
pub struct Language {
    pub name: String,
    pub size: u32,
    pub words: Vec<String>,
}

impl Language {
    pub fn new(name: &str) -> Result<Self> {
        read_language_from_file(name)
    }

    pub fn common() -> Result<Self> {
        Self::new(DEFAULT_LANGUAGE)
    }
}

fn read_language_from_file(name: &str) -> Result<Language> {
    let language_error = |reason: String| TyxtError::Language {
        name: name.to_string(),
        reason,
    };

    let file = LANG_DIR
        .get_file(format!("{name}.json"))
        .ok_or_else(|| language_error("not embedded".to_string()))?;

    let file_as_str = file
        .contents_utf8()
        .ok_or_else(|| language_error("not valid utf-8".to_string()))?;

    let lang: Language = from_str(file_as_str).map_err(|e| language_error(e.to_string()))?;

    if lang.words.is_empty() {
        return Err(language_error("contains no words".to_string()));
    }

    Ok(lang)
}
