//! Shared types for the survey-runtime workspace.
//!
//! This crate provides the small vocabulary the other crates agree on, so that the
//! core model, the transport and the choices resolver do not depend on each other:
//!
//! - [`choice`]: [`ChoiceItem`], the value/title pair produced by remote choice lists
//! - [`localization`]: the localized-string protocol and the built-in English table
//! - [`text_processor`]: placeholder substitution for templated URLs and paths
//! - [`env_utils`]: environment-variable configuration helpers

pub mod choice;
pub mod env_utils;
pub mod localization;
pub mod text_processor;

pub use choice::ChoiceItem;
pub use env_utils::{env_bool_or, env_string_or, env_var, env_var_or};
pub use localization::{format_string, Localization, StringTable};
pub use text_processor::{TemplateTextProcessor, TextProcessor, TextProcessorResult};
