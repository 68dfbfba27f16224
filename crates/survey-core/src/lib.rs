//! Runtime model for JSON-described surveys.
//!
//! - [`property`]: [`PropertyBag`], reactive keyed storage with change callbacks
//! - [`registry`]: [`ClassRegistry`], type name → factory and serializable properties
//! - [`error`]: [`SurveyError`], the closed set of validation errors and their messages
//! - [`element`]: [`SurveyElement`], questions, panels and pages built on the above
//! - [`value`]: typed keys and values stored in an element's bag

pub mod element;
pub mod error;
pub mod property;
pub mod registry;
pub mod value;

pub use element::{
    register_elements, ElementId, ElementKind, ElementState, LifecycleState, SurveyContext,
    SurveyElement,
};
pub use error::{format_size, ErrorKind, SurveyError};
pub use property::{CallbackId, ChangeKind, PropertyBag, PropertyChange};
pub use registry::{
    ClassDescriptor, ClassRegistry, LoadReport, ObjectFactory, PropertyDescriptor, SurveyObject,
};
pub use value::{PropertyKey, PropertyValue};
