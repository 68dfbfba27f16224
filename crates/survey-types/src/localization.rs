//! Localized-string protocol.
//!
//! Messages are looked up by key (`get_string`) and may carry positional
//! placeholders (`{0}`, `{1}`, ...) that [`format_string`] substitutes.
//! English and Dutch tables are installed for the built-in error kinds; other
//! locales are supplied by the host application. English is the fallback for
//! keys a table does not define.

use std::collections::HashMap;

use tracing::debug;

use crate::env_utils::env_string_or;

/// Source of localized message templates.
pub trait Localization: Send + Sync {
    /// Template for `key`, or `None` if the key is unknown.
    fn get_string(&self, key: &str) -> Option<String>;
}

const ENGLISH: &[(&str, &str)] = &[
    ("requiredError", "Please answer the question."),
    ("requiredErrorInPanel", "Please answer at least one question."),
    ("numericError", "The value should be numeric."),
    ("exceedMaxSize", "The file size should not exceed {0}."),
    ("otherRequiredError", "Please enter the other value."),
    (
        "uploadingFile",
        "Your file is uploading. Please wait several seconds and try again.",
    ),
    ("requiredInAllRowsError", "Please answer questions in all rows."),
    ("minRowCountError", "Please fill in at least {0} rows."),
    ("keyDuplicationError", "Please enter a unique value."),
    ("urlRequestError", "The request returned error '{0}'. {1}"),
    (
        "urlGetChoicesError",
        "The request returned empty data or the 'path' property is incorrect",
    ),
];

const DUTCH: &[(&str, &str)] = &[
    ("requiredError", "Dit is een vereiste vraag"),
    ("numericError", "Het antwoord moet een getal zijn"),
    (
        "exceedMaxSize",
        "De grootte van het bestand mag niet groter zijn dan {0}",
    ),
    ("otherRequiredError", "Vul het andere antwoord in"),
];

/// Installed string tables by locale code.
const INSTALLED: &[(&str, &[(&str, &str)])] = &[("en", ENGLISH), ("nl", DUTCH)];

fn english_default(key: &str) -> Option<&'static str> {
    ENGLISH.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
}

/// A keyed string table for one locale, falling back to the built-in English
/// strings for missing keys.
#[derive(Debug, Clone)]
pub struct StringTable {
    locale: String,
    strings: HashMap<String, String>,
}

impl Default for StringTable {
    fn default() -> Self {
        Self::english()
    }
}

impl StringTable {
    /// The built-in English table.
    pub fn english() -> Self {
        Self::new("en")
    }

    /// An empty table for `locale`; every lookup falls back to English until
    /// strings are added.
    pub fn new(locale: impl Into<String>) -> Self {
        Self {
            locale: locale.into(),
            strings: HashMap::new(),
        }
    }

    /// The installed table for `locale`, or `None` if none ships with the crate.
    pub fn installed(locale: &str) -> Option<Self> {
        let (code, strings) = INSTALLED.iter().find(|(code, _)| *code == locale)?;
        let table = strings
            .iter()
            .fold(Self::new(*code), |table, (key, template)| {
                table.with_string(*key, *template)
            });
        Some(table)
    }

    /// The installed table for `locale`, else English.
    pub fn for_locale(locale: &str) -> Self {
        Self::installed(locale).unwrap_or_else(|| {
            debug!(locale = %locale, "no installed strings for locale, using English");
            Self::english()
        })
    }

    /// Table for the locale named by `SURVEY_LOCALE` (default `en`).
    pub fn from_env() -> Self {
        Self::for_locale(&env_string_or("SURVEY_LOCALE", "en"))
    }

    pub fn with_string(mut self, key: impl Into<String>, template: impl Into<String>) -> Self {
        self.strings.insert(key.into(), template.into());
        self
    }

    pub fn set_string(&mut self, key: impl Into<String>, template: impl Into<String>) {
        self.strings.insert(key.into(), template.into());
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }
}

impl Localization for StringTable {
    fn get_string(&self, key: &str) -> Option<String> {
        self.strings
            .get(key)
            .cloned()
            .or_else(|| english_default(key).map(str::to_string))
    }
}

/// Substitute `{N}` placeholders in `template` with `args[N]`.
///
/// Placeholders without a matching argument are left untouched.
///
/// ```
/// use survey_types::format_string;
///
/// let text = format_string("The request returned error '{0}'. {1}", &["Not Found", "{}"]);
/// assert_eq!(text, "The request returned error 'Not Found'. {}");
/// ```
pub fn format_string<S: AsRef<str>>(template: &str, args: &[S]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let digits = after.chars().take_while(|c| c.is_ascii_digit()).count();
        let closed = digits > 0 && after[digits..].starts_with('}');

        let arg = if closed {
            after[..digits]
                .parse::<usize>()
                .ok()
                .and_then(|index| args.get(index))
        } else {
            None
        };

        match arg {
            Some(arg) => {
                out.push_str(arg.as_ref());
                rest = &after[digits + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}
