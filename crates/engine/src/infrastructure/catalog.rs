//! Localized message catalog.
//!
//! Each locale maps message keys to templates. Lookups fall back from the
//! requested locale to the default locale; a key missing from both yields a
//! "Message not found" line instead of an error, so callers always have text
//! to send.
//!
//! Templates may contain `{placeholder}` slots filled by [`MessageCatalog::render`].

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use questline_domain::DEFAULT_LOCALE;

/// Message keys used by the engine.
pub mod keys {
    pub const INPUT_QUEST_NAME: &str = "input_quest_name";
    pub const INPUT_QUEST_DESCRIPTION: &str = "input_quest_description";
    pub const INPUT_QUEST_COINS: &str = "input_quest_coins";
    pub const INPUT_QUEST_ITEM: &str = "input_quest_item";
    pub const INVALID_QUEST_NAME: &str = "invalid_quest_name";
    pub const INVALID_QUEST_NAME_LENGTH: &str = "invalid_quest_name_length";
    pub const INVALID_QUEST_COINS: &str = "invalid_quest_coins";
    pub const INVALID_QUEST_ITEM: &str = "invalid_quest_item";
    pub const QUEST_CREATION_SUCCESS: &str = "quest_creation_success";
    pub const QUEST_CREATION_FAILED: &str = "quest_creation_failed";
    pub const QUEST_CREATION_IN_PROGRESS: &str = "quest_creation_in_progress";
    pub const QUEST_CREATION_CANCELLED: &str = "quest_creation_cancelled";
    pub const NO_QUEST_IN_PROGRESS: &str = "no_quest_in_progress";
    pub const SESSION_EXPIRED: &str = "session_expired";
    pub const QUEST_LIST_HEADER: &str = "quest_list_header";
    pub const QUEST_LIST_ENTRY: &str = "quest_list_entry";
    pub const QUEST_LIST_EMPTY: &str = "quest_list_empty";
    pub const HELP_SEPARATOR: &str = "help_separator";
    pub const HELP_ENTRY: &str = "help_entry";
    pub const COMMAND_CREATE_DESCRIPTION: &str = "command_create_description";
    pub const COMMAND_CANCEL_DESCRIPTION: &str = "command_cancel_description";
    pub const COMMAND_LIST_DESCRIPTION: &str = "command_list_description";
}

const BUILTIN_EN_US: &[(&str, &str)] = &[
    (keys::INPUT_QUEST_NAME, "Input the Quest name:"),
    (keys::INPUT_QUEST_DESCRIPTION, "Input the Quest description:"),
    (keys::INPUT_QUEST_COINS, "Input the Quest reward coins (0 if none):"),
    (
        keys::INPUT_QUEST_ITEM,
        "Use the item you're holding as the reward item? (true/false):",
    ),
    (
        keys::INVALID_QUEST_NAME,
        "The quest name must not be empty. Input the Quest name:",
    ),
    (
        keys::INVALID_QUEST_NAME_LENGTH,
        "The quest name is too long (255 characters at most). Input the Quest name:",
    ),
    (
        keys::INVALID_QUEST_COINS,
        "Reward coins must be a whole number, 0 or more. Input the Quest reward coins (0 if none):",
    ),
    (keys::INVALID_QUEST_ITEM, "Please answer true or false:"),
    (keys::QUEST_CREATION_SUCCESS, "Successfully created the quest!"),
    (
        keys::QUEST_CREATION_FAILED,
        "The quest could not be saved. A quest with that name may already exist.",
    ),
    (
        keys::QUEST_CREATION_IN_PROGRESS,
        "You are already creating a quest. Finish it or use /quests cancel.",
    ),
    (keys::QUEST_CREATION_CANCELLED, "Quest creation cancelled."),
    (keys::NO_QUEST_IN_PROGRESS, "You are not creating a quest."),
    (
        keys::SESSION_EXPIRED,
        "Your quest draft expired. Use /quests create to start again.",
    ),
    (keys::QUEST_LIST_HEADER, "Quests:"),
    (
        keys::QUEST_LIST_ENTRY,
        "- {name}: {description} ({coins} coins)",
    ),
    (keys::QUEST_LIST_EMPTY, "There are no quests yet."),
    (keys::HELP_SEPARATOR, "--------------------------------"),
    (keys::HELP_ENTRY, "{syntax} - {description}"),
    (keys::COMMAND_CREATE_DESCRIPTION, "Create a new quest step by step"),
    (
        keys::COMMAND_CANCEL_DESCRIPTION,
        "Abandon the quest you are creating",
    ),
    (keys::COMMAND_LIST_DESCRIPTION, "List every quest"),
];

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Failed to read locale file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid locale file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone)]
pub struct MessageCatalog {
    default_locale: String,
    locales: HashMap<String, HashMap<String, String>>,
}

impl MessageCatalog {
    /// Catalog holding only the built-in `en_US` strings.
    pub fn new(default_locale: impl Into<String>) -> Self {
        let builtin = BUILTIN_EN_US
            .iter()
            .map(|(key, text)| (key.to_string(), text.to_string()))
            .collect();

        Self {
            default_locale: default_locale.into(),
            locales: HashMap::from([(DEFAULT_LOCALE.to_string(), builtin)]),
        }
    }

    pub fn default_locale(&self) -> &str {
        &self.default_locale
    }

    /// Merge templates into a locale, overriding existing keys.
    pub fn merge(&mut self, locale: &str, messages: HashMap<String, String>) {
        self.locales
            .entry(locale.to_string())
            .or_default()
            .extend(messages);
    }

    /// Merge every `<locale>.json` file in `dir`. Returns the number of locales loaded.
    ///
    /// Each file is a flat JSON object of key -> template.
    pub fn load_dir(&mut self, dir: &Path) -> Result<usize, CatalogError> {
        let entries = std::fs::read_dir(dir).map_err(|source| CatalogError::Io {
            path: dir.to_path_buf(),
            source,
        })?;

        let mut loaded = 0;
        for entry in entries {
            let path = entry
                .map_err(|source| CatalogError::Io {
                    path: dir.to_path_buf(),
                    source,
                })?
                .path();

            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }
            let Some(locale) = path.file_stem().and_then(|stem| stem.to_str()) else {
                continue;
            };

            let raw = std::fs::read_to_string(&path).map_err(|source| CatalogError::Io {
                path: path.clone(),
                source,
            })?;
            let messages: HashMap<String, String> =
                serde_json::from_str(&raw).map_err(|source| CatalogError::Parse {
                    path: path.clone(),
                    source,
                })?;

            tracing::info!(locale, messages = messages.len(), "Loaded locale file");
            self.merge(locale, messages);
            loaded += 1;
        }

        Ok(loaded)
    }

    /// Template for `key`, falling back to the default locale.
    pub fn get(&self, locale: &str, key: &str) -> String {
        self.lookup(locale, key)
            .or_else(|| self.lookup(&self.default_locale, key))
            .or_else(|| self.lookup(DEFAULT_LOCALE, key))
            .map(str::to_string)
            .unwrap_or_else(|| format!("Message not found for locale {locale} and key {key}"))
    }

    /// Template for `key` with each `{name}` slot replaced.
    pub fn render(&self, locale: &str, key: &str, args: &[(&str, &str)]) -> String {
        args.iter()
            .fold(self.get(locale, key), |text, (name, value)| {
                text.replace(&format!("{{{name}}}"), value)
            })
    }

    fn lookup(&self, locale: &str, key: &str) -> Option<&str> {
        self.locales
            .get(locale)
            .and_then(|messages| messages.get(key))
            .map(String::as_str)
    }
}

impl Default for MessageCatalog {
    fn default() -> Self {
        Self::new(DEFAULT_LOCALE)
    }
}
