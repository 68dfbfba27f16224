//! Validation error taxonomy.
//!
//! A [`SurveyError`] is data, never a propagated fault: validation rules append
//! errors to an element's observable error collection and the remote choices
//! resolver keeps its last failure on its own `error` field. Each error kind
//! resolves a display message from the caller's text, or from a localized
//! default built out of the kind's parameters.

use std::fmt;
use std::sync::OnceLock;

use survey_types::localization::{format_string, Localization, StringTable};

use crate::element::ElementId;

/// The closed set of validation error kinds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// The element has no answer.
    Required,
    /// A composite requires at least one answered child.
    RequireOneAnswer,
    /// The value fails numeric coercion.
    RequireNumeric,
    /// An uploaded file exceeds `max_size` bytes.
    ExceedSize { max_size: u64 },
    /// A remote request failed.
    WebRequest { status: String, response: String },
    /// A remote request returned no usable items.
    WebRequestEmpty,
    /// The "other" choice is selected but its comment is blank.
    OtherEmpty,
    /// A file upload is still in progress or failed.
    UploadingFile,
    /// Matrix-style required-per-row.
    RequiredInAllRows,
    /// A composite has fewer rows than required.
    MinRowCount { min_row_count: usize },
    /// Duplicate key value in a key-bound collection.
    KeyDuplication,
    /// Caller-supplied message only.
    Custom,
}

impl ErrorKind {
    /// Stable kind string.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Required => "required",
            ErrorKind::RequireOneAnswer => "requireoneanswer",
            ErrorKind::RequireNumeric => "requirenumeric",
            ErrorKind::ExceedSize { .. } => "exceedsize",
            ErrorKind::WebRequest { .. } => "webrequest",
            ErrorKind::WebRequestEmpty => "webrequestempty",
            ErrorKind::OtherEmpty => "otherempty",
            ErrorKind::UploadingFile => "uploadingfile",
            ErrorKind::RequiredInAllRows => "requiredinallrowserror",
            ErrorKind::MinRowCount { .. } => "minrowcounterror",
            ErrorKind::KeyDuplication => "keyduplicationerror",
            ErrorKind::Custom => "custom",
        }
    }

    /// Localization key of the default message.
    pub fn message_key(&self) -> Option<&'static str> {
        match self {
            ErrorKind::Required => Some("requiredError"),
            ErrorKind::RequireOneAnswer => Some("requiredErrorInPanel"),
            ErrorKind::RequireNumeric => Some("numericError"),
            ErrorKind::ExceedSize { .. } => Some("exceedMaxSize"),
            ErrorKind::WebRequest { .. } => Some("urlRequestError"),
            ErrorKind::WebRequestEmpty => Some("urlGetChoicesError"),
            ErrorKind::OtherEmpty => Some("otherRequiredError"),
            ErrorKind::UploadingFile => Some("uploadingFile"),
            ErrorKind::RequiredInAllRows => Some("requiredInAllRowsError"),
            ErrorKind::MinRowCount { .. } => Some("minRowCountError"),
            ErrorKind::KeyDuplication => Some("keyDuplicationError"),
            ErrorKind::Custom => None,
        }
    }

    /// Positional arguments for the default message template.
    pub fn message_args(&self) -> Vec<String> {
        match self {
            ErrorKind::ExceedSize { max_size } => vec![format_size(*max_size)],
            ErrorKind::WebRequest { status, response } => vec![status.clone(), response.clone()],
            ErrorKind::MinRowCount { min_row_count } => vec![min_row_count.to_string()],
            _ => Vec::new(),
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

const SIZE_UNITS: [&str; 5] = ["Bytes", "KB", "MB", "GB", "TB"];
const SIZE_DECIMALS: [usize; 5] = [0, 0, 2, 3, 3];

/// Format a byte count with a binary-magnitude unit.
///
/// ```
/// use survey_core::error::format_size;
///
/// assert_eq!(format_size(0), "0 Byte");
/// assert_eq!(format_size(1536), "2 KB");
/// assert_eq!(format_size(5 * 1024 * 1024 + 300 * 1024), "5.29 MB");
/// ```
pub fn format_size(size: u64) -> String {
    if size == 0 {
        return "0 Byte".to_string();
    }
    // floor(log_1024(size)), computed on integers so exact powers land on the right unit
    let mut unit = 0;
    let mut scale: u64 = 1;
    while unit + 1 < SIZE_UNITS.len() && size / scale >= 1024 {
        scale *= 1024;
        unit += 1;
    }
    let value = size as f64 / scale as f64;
    let decimals = SIZE_DECIMALS[unit];
    let factor = 10f64.powi(decimals as i32);
    // half away from zero, like toFixed
    let rounded = (value * factor).round() / factor;
    format!("{:.*} {}", decimals, rounded, SIZE_UNITS[unit])
}

/// A typed validation error.
#[derive(Debug, Clone)]
pub struct SurveyError {
    kind: ErrorKind,
    text: Option<String>,
    visible: bool,
    owner: Option<ElementId>,
    resolved: OnceLock<String>,
}

impl PartialEq for SurveyError {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
            && self.text == other.text
            && self.visible == other.visible
            && self.owner == other.owner
    }
}

impl SurveyError {
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            text: None,
            visible: true,
            owner: None,
            resolved: OnceLock::new(),
        }
    }

    pub fn required() -> Self {
        Self::new(ErrorKind::Required)
    }

    pub fn require_one_answer() -> Self {
        Self::new(ErrorKind::RequireOneAnswer)
    }

    pub fn require_numeric() -> Self {
        Self::new(ErrorKind::RequireNumeric)
    }

    pub fn exceed_size(max_size: u64) -> Self {
        Self::new(ErrorKind::ExceedSize { max_size })
    }

    pub fn web_request(status: impl Into<String>, response: impl Into<String>) -> Self {
        Self::new(ErrorKind::WebRequest {
            status: status.into(),
            response: response.into(),
        })
    }

    pub fn web_request_empty() -> Self {
        Self::new(ErrorKind::WebRequestEmpty)
    }

    pub fn other_empty() -> Self {
        Self::new(ErrorKind::OtherEmpty)
    }

    pub fn uploading_file() -> Self {
        Self::new(ErrorKind::UploadingFile)
    }

    pub fn required_in_all_rows() -> Self {
        Self::new(ErrorKind::RequiredInAllRows)
    }

    pub fn min_row_count(min_row_count: usize) -> Self {
        Self::new(ErrorKind::MinRowCount { min_row_count })
    }

    pub fn key_duplication() -> Self {
        Self::new(ErrorKind::KeyDuplication)
    }

    /// A custom error rendering exactly `text`.
    pub fn custom(text: impl Into<String>) -> Self {
        Self::new(ErrorKind::Custom).with_text(text)
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.set_text(Some(text.into()));
        self
    }

    pub fn with_owner(mut self, owner: ElementId) -> Self {
        self.owner = Some(owner);
        self
    }

    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// Stable kind string, e.g. `"required"`.
    pub fn error_type(&self) -> &'static str {
        self.kind.as_str()
    }

    /// Caller-supplied text, if any.
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Replace the caller text. The display message is re-resolved on next use.
    pub fn set_text(&mut self, text: Option<String>) {
        self.text = text;
        self.resolved = OnceLock::new();
    }

    pub fn visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// Handle of the element this error was raised for.
    pub fn owner(&self) -> Option<ElementId> {
        self.owner
    }

    pub fn set_owner(&mut self, owner: Option<ElementId>) {
        self.owner = owner;
    }

    /// Localized default message for this kind; empty for `custom`.
    ///
    /// Keys missing from `localization` fall back to the built-in English table.
    pub fn default_text(&self, localization: &dyn Localization) -> String {
        let Some(key) = self.kind.message_key() else {
            return String::new();
        };
        let template = localization
            .get_string(key)
            .or_else(|| StringTable::english().get_string(key))
            .unwrap_or_default();
        format_string(&template, &self.kind.message_args())
    }

    /// Display message: the caller text if non-empty, else the localized default.
    ///
    /// Resolved once; later calls return the cached message even with a
    /// different `localization`, until [`set_text`](Self::set_text) is called.
    pub fn message(&self, localization: &dyn Localization) -> &str {
        self.resolved.get_or_init(|| match self.text.as_deref() {
            Some(text) if !text.is_empty() => text.to_string(),
            _ => self.default_text(localization),
        })
    }

    /// Whether the display message has been resolved already.
    pub fn is_resolved(&self) -> bool {
        self.resolved.get().is_some()
    }
}

impl fmt::Display for SurveyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.resolved.get() {
            Some(message) => f.write_str(message),
            None => f.write_str(self.message(&StringTable::english())),
        }
    }
}
