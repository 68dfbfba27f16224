//! Survey elements: questions, panels and pages.
//!
//! An element keeps all of its reactive state in a [`PropertyBag`] keyed by
//! [`PropertyKey`]. The error list is an observable sequence in that bag; any
//! change to it refreshes the derived `hasVisibleErrors` flag. The effective
//! `isReadOnly` flag combines the element's own `readOnly` with the host
//! survey's display mode and is recomputed only outside JSON loading.
//!
//! Lifecycle: an element is `Constructing` only inside [`SurveyElement::new`],
//! then `Ready`. The registry brackets JSON loading with
//! `start_loading_from_json`/`end_loading_from_json`, which moves it through
//! `LoadingFromJson` and back.

use std::any::Any;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, trace};
use uuid::Uuid;

use survey_types::localization::{Localization, StringTable};

use crate::error::SurveyError;
use crate::property::{CallbackId, PropertyBag, PropertyChange};
use crate::registry::{ClassDescriptor, ClassRegistry, PropertyDescriptor, SurveyObject};
use crate::value::{PropertyKey, PropertyValue};

/// Opaque handle identifying an element.
///
/// Errors and children refer to their owner/parent through this handle rather
/// than holding the element itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(Uuid);

impl ElementId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for ElementId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Question,
    Panel,
    Page,
}

impl ElementKind {
    /// Registered type name.
    pub fn type_name(&self) -> &'static str {
        match self {
            ElementKind::Question => "question",
            ElementKind::Panel => "panel",
            ElementKind::Page => "page",
        }
    }
}

/// Collapse state, orthogonal to the lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementState {
    #[default]
    Default,
    Collapsed,
    Expanded,
}

impl ElementState {
    pub fn as_str(&self) -> &'static str {
        match self {
            ElementState::Default => "default",
            ElementState::Collapsed => "collapsed",
            ElementState::Expanded => "expanded",
        }
    }
}

impl fmt::Display for ElementState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseElementStateError(String);

impl fmt::Display for ParseElementStateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown element state '{}' (expected default, collapsed or expanded)",
            self.0
        )
    }
}

impl std::error::Error for ParseElementStateError {}

impl FromStr for ElementState {
    type Err = ParseElementStateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "default" => Ok(ElementState::Default),
            "collapsed" => Ok(ElementState::Collapsed),
            "expanded" => Ok(ElementState::Expanded),
            other => Err(ParseElementStateError(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    Constructing,
    LoadingFromJson,
    Ready,
}

/// The survey hosting an element.
///
/// Every method has a neutral default so hosts only implement what they track.
pub trait SurveyContext: Send + Sync {
    fn is_loading_from_json(&self) -> bool {
        false
    }

    fn is_design_mode(&self) -> bool {
        false
    }

    /// Whole survey is shown read-only.
    fn is_display_mode(&self) -> bool {
        false
    }

    fn localization(&self) -> Option<&dyn Localization> {
        None
    }

    fn element_content_visibility_changed(&self, _element: ElementId) {}

    /// Data bindings keyed by name follow the element to its new name.
    fn element_renamed(&self, _element: ElementId, _old_name: &str, _new_name: &str) {}
}

type Listener<A> = Box<dyn Fn(A) + Send + Sync>;
type RenameListener = Box<dyn Fn(&str, &str) + Send + Sync>;

#[derive(Default)]
struct Listeners {
    read_only_changed: Vec<Listener<bool>>,
    state_changed: Vec<Listener<ElementState>>,
    name_changed: Vec<RenameListener>,
    survey_load: Vec<Listener<ElementId>>,
}

/// A question, panel or page.
pub struct SurveyElement {
    id: ElementId,
    kind: ElementKind,
    lifecycle: LifecycleState,
    properties: PropertyBag<PropertyKey, PropertyValue>,
    survey: Option<Arc<dyn SurveyContext>>,
    listeners: Listeners,
}

impl SurveyElement {
    pub fn new(kind: ElementKind, name: &str) -> Self {
        let mut properties = PropertyBag::new();
        properties.declare(PropertyKey::Name, PropertyValue::Text(String::new()));
        properties.declare(PropertyKey::State, PropertyValue::State(ElementState::Default));
        properties.declare(PropertyKey::ReadOnly, PropertyValue::Bool(false));
        properties.declare(PropertyKey::IsReadOnly, PropertyValue::Bool(false));
        properties.declare(PropertyKey::HasVisibleErrors, PropertyValue::Bool(false));
        properties.declare(PropertyKey::ContainsErrors, PropertyValue::Bool(false));
        properties.declare(PropertyKey::Parent, PropertyValue::Null);

        properties.create_sequence(PropertyKey::Errors, PropertyValue::Errors(Vec::new()));
        properties.register_on_change(PropertyKey::Errors, |bag, _| {
            let visible = visible_errors(bag);
            bag.set(PropertyKey::HasVisibleErrors, PropertyValue::Bool(visible > 0));
        });

        let mut element = Self {
            id: ElementId::new(),
            kind,
            lifecycle: LifecycleState::Constructing,
            properties,
            survey: None,
            listeners: Listeners::default(),
        };
        let name = name.trim();
        if !name.is_empty() {
            element.properties.set(PropertyKey::Name, name.into());
        }
        element.lifecycle = LifecycleState::Ready;
        element
    }

    pub fn question(name: &str) -> Self {
        Self::new(ElementKind::Question, name)
    }

    pub fn panel(name: &str) -> Self {
        Self::new(ElementKind::Panel, name)
    }

    pub fn page(name: &str) -> Self {
        Self::new(ElementKind::Page, name)
    }

    pub fn id(&self) -> ElementId {
        self.id
    }

    pub fn kind(&self) -> ElementKind {
        self.kind
    }

    pub fn is_page(&self) -> bool {
        self.kind == ElementKind::Page
    }

    pub fn is_panel(&self) -> bool {
        self.kind == ElementKind::Panel
    }

    pub fn lifecycle(&self) -> LifecycleState {
        self.lifecycle
    }

    // ----- host survey -----

    pub fn survey(&self) -> Option<&Arc<dyn SurveyContext>> {
        self.survey.as_ref()
    }

    pub fn set_survey(&mut self, survey: Option<Arc<dyn SurveyContext>>) {
        self.survey = survey;
        if !self.is_loading_from_json() {
            self.update_read_only();
        }
    }

    pub fn is_design_mode(&self) -> bool {
        self.survey.as_ref().is_some_and(|s| s.is_design_mode())
    }

    /// Own JSON load in progress, or the host survey is loading.
    pub fn is_loading_from_json(&self) -> bool {
        self.lifecycle == LifecycleState::LoadingFromJson
            || self.survey.as_ref().is_some_and(|s| s.is_loading_from_json())
    }

    pub fn start_loading(&mut self) {
        trace!(element = %self.id, "start loading from JSON");
        self.lifecycle = LifecycleState::LoadingFromJson;
    }

    /// Leave JSON loading, apply deferred recomputation, and run the
    /// survey-load hooks if no survey hosts this element.
    pub fn end_loading(&mut self) {
        self.lifecycle = LifecycleState::Ready;
        self.update_read_only();
        if self.survey.is_none() {
            debug!(element = %self.id, name = %self.name(), "loaded without a host survey");
            self.survey_loaded();
        }
    }

    /// Run the survey-load hooks. Hosts call this once the survey finished loading.
    pub fn survey_loaded(&self) {
        for listener in &self.listeners.survey_load {
            listener(self.id);
        }
    }

    pub fn on_survey_load<F>(&mut self, listener: F)
    where
        F: Fn(ElementId) + Send + Sync + 'static,
    {
        self.listeners.survey_load.push(Box::new(listener));
    }

    // ----- raw property access -----

    pub fn property(&self, key: &PropertyKey) -> Option<&PropertyValue> {
        self.properties.get(key)
    }

    /// Write any property through the bag. Derived keys (`isReadOnly`,
    /// `hasVisibleErrors`) should be left to the element.
    pub fn set_property_value(&mut self, key: PropertyKey, value: PropertyValue) -> bool {
        self.properties.set(key, value)
    }

    /// Subscribe to changes of one property.
    pub fn on_property_changed<F>(&mut self, key: PropertyKey, callback: F) -> CallbackId
    where
        F: Fn(&mut PropertyBag<PropertyKey, PropertyValue>, &PropertyChange<PropertyKey, PropertyValue>)
            + Send
            + Sync
            + 'static,
    {
        self.properties.register_on_change(key, callback)
    }

    pub fn remove_property_callback(&mut self, id: CallbackId) -> bool {
        self.properties.unregister(id)
    }

    // ----- name -----

    pub fn name(&self) -> &str {
        self.properties
            .get(&PropertyKey::Name)
            .and_then(PropertyValue::as_str)
            .unwrap_or("")
    }

    /// Rename the element. Outside JSON loading, renaming a previously named
    /// element notifies the survey and the name listeners.
    pub fn set_name(&mut self, name: &str) {
        let name = name.trim();
        let old_name = self.name().to_string();
        if !self.properties.set(PropertyKey::Name, name.into()) {
            return;
        }
        if self.is_loading_from_json() || old_name.is_empty() {
            return;
        }
        debug!(element = %self.id, old = %old_name, new = %name, "element renamed");
        if let Some(survey) = &self.survey {
            survey.element_renamed(self.id, &old_name, name);
        }
        for listener in &self.listeners.name_changed {
            listener(&old_name, name);
        }
    }

    pub fn on_name_changed<F>(&mut self, listener: F)
    where
        F: Fn(&str, &str) + Send + Sync + 'static,
    {
        self.listeners.name_changed.push(Box::new(listener));
    }

    // ----- parent -----

    pub fn parent(&self) -> Option<ElementId> {
        self.properties
            .get(&PropertyKey::Parent)
            .and_then(PropertyValue::as_element)
    }

    /// Tree shape is the caller's responsibility; cycles are not detected.
    pub fn set_parent(&mut self, parent: Option<ElementId>) {
        let value = parent.map_or(PropertyValue::Null, PropertyValue::Element);
        self.properties.set(PropertyKey::Parent, value);
    }

    // ----- collapse state -----

    pub fn state(&self) -> ElementState {
        self.properties
            .get(&PropertyKey::State)
            .and_then(PropertyValue::as_state)
            .unwrap_or_default()
    }

    pub fn set_state(&mut self, state: ElementState) {
        let changed = self.properties.set(PropertyKey::State, state.into());
        if changed {
            for listener in &self.listeners.state_changed {
                listener(state);
            }
        }
        if let Some(survey) = &self.survey {
            survey.element_content_visibility_changed(self.id);
        }
    }

    pub fn on_state_changed<F>(&mut self, listener: F)
    where
        F: Fn(ElementState) + Send + Sync + 'static,
    {
        self.listeners.state_changed.push(Box::new(listener));
    }

    /// Collapsing is ignored in design mode.
    pub fn collapse(&mut self) {
        if self.is_design_mode() {
            return;
        }
        self.set_state(ElementState::Collapsed);
    }

    pub fn expand(&mut self) {
        self.set_state(ElementState::Expanded);
    }

    /// Flip between collapsed and expanded. Elements in the default state
    /// are left alone. Returns the state afterwards.
    pub fn toggle_state(&mut self) -> ElementState {
        if self.is_collapsed() {
            self.expand();
        } else if self.is_expanded() {
            self.collapse();
        }
        self.state()
    }

    /// Always `false` in design mode, where content stays visible.
    pub fn is_collapsed(&self) -> bool {
        !self.is_design_mode() && self.state() == ElementState::Collapsed
    }

    pub fn is_expanded(&self) -> bool {
        self.state() == ElementState::Expanded
    }

    // ----- read-only -----

    pub fn read_only(&self) -> bool {
        self.bool_property(&PropertyKey::ReadOnly)
    }

    pub fn set_read_only(&mut self, read_only: bool) {
        if self.properties.set(PropertyKey::ReadOnly, read_only.into()) && !self.is_loading_from_json() {
            self.update_read_only();
        }
    }

    /// Effective read-only flag: own `readOnly` or a survey in display mode.
    pub fn is_read_only(&self) -> bool {
        self.bool_property(&PropertyKey::IsReadOnly)
    }

    /// Recompute `isReadOnly`. Call after the host survey's display mode changes.
    pub fn update_read_only(&mut self) {
        let display_mode = self.survey.as_ref().is_some_and(|s| s.is_display_mode());
        let effective = self.read_only() || display_mode;
        if self.properties.set(PropertyKey::IsReadOnly, effective.into()) {
            for listener in &self.listeners.read_only_changed {
                listener(effective);
            }
        }
    }

    pub fn on_read_only_changed<F>(&mut self, listener: F)
    where
        F: Fn(bool) + Send + Sync + 'static,
    {
        self.listeners.read_only_changed.push(Box::new(listener));
    }

    // ----- errors -----

    pub fn errors(&self) -> &[SurveyError] {
        self.properties
            .get(&PropertyKey::Errors)
            .and_then(PropertyValue::as_errors)
            .unwrap_or(&[])
    }

    /// Replace the whole error list. Each error is attached to this element.
    pub fn set_errors(&mut self, errors: Vec<SurveyError>) {
        let errors = errors
            .into_iter()
            .map(|error| error.with_owner(self.id))
            .collect();
        self.properties
            .set(PropertyKey::Errors, PropertyValue::Errors(errors));
    }

    pub fn add_error(&mut self, error: SurveyError) {
        let error = error.with_owner(self.id);
        self.properties
            .modify_sequence(PropertyKey::Errors, move |value| {
                if let PropertyValue::Errors(list) = value {
                    list.push(error);
                }
            });
    }

    pub fn clear_errors(&mut self) {
        self.set_errors(Vec::new());
    }

    /// Show or hide one error. Returns `false` if `index` is out of range or
    /// the flag already had that value.
    pub fn set_error_visible(&mut self, index: usize, visible: bool) -> bool {
        self.properties
            .modify_sequence(PropertyKey::Errors, |value| {
                if let PropertyValue::Errors(list) = value {
                    if let Some(error) = list.get_mut(index) {
                        error.set_visible(visible);
                    }
                }
            })
    }

    pub fn has_visible_errors(&self) -> bool {
        self.bool_property(&PropertyKey::HasVisibleErrors)
    }

    pub fn visible_error_count(&self) -> usize {
        visible_errors(&self.properties)
    }

    /// Last value computed by [`update_contains_errors`](Self::update_contains_errors).
    pub fn contains_errors(&self) -> bool {
        self.bool_property(&PropertyKey::ContainsErrors)
    }

    /// Recompute `containsErrors` from this element's own errors. Not run
    /// automatically, so several error edits can be batched first.
    pub fn update_contains_errors(&mut self) -> bool {
        self.update_contains_errors_with(std::iter::empty())
    }

    /// Recompute `containsErrors` from own errors plus the given children.
    pub fn update_contains_errors_with<'a, I>(&mut self, children: I) -> bool
    where
        I: IntoIterator<Item = &'a SurveyElement>,
    {
        let contains = !self.errors().is_empty() || children.into_iter().any(|c| c.contains_errors());
        self.properties
            .set(PropertyKey::ContainsErrors, contains.into());
        contains
    }

    /// Display messages for all errors, localized through the host survey
    /// when it provides a string table.
    pub fn error_messages(&self) -> Vec<String> {
        let english = StringTable::english();
        let localization: &dyn Localization = self
            .survey
            .as_ref()
            .and_then(|s| s.localization())
            .unwrap_or(&english);
        self.errors()
            .iter()
            .map(|error| error.message(localization).to_string())
            .collect()
    }

    fn bool_property(&self, key: &PropertyKey) -> bool {
        self.properties
            .get(key)
            .and_then(PropertyValue::as_bool)
            .unwrap_or(false)
    }
}

fn visible_errors(bag: &PropertyBag<PropertyKey, PropertyValue>) -> usize {
    bag.get(&PropertyKey::Errors)
        .and_then(PropertyValue::as_errors)
        .map(|errors| errors.iter().filter(|e| e.visible()).count())
        .unwrap_or(0)
}

impl fmt::Debug for SurveyElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SurveyElement")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .field("name", &self.name())
            .field("lifecycle", &self.lifecycle)
            .field("state", &self.state())
            .field("errors", &self.errors().len())
            .finish()
    }
}

impl SurveyObject for SurveyElement {
    fn type_name(&self) -> &str {
        self.kind.type_name()
    }

    fn get_property(&self, name: &str) -> Option<Value> {
        match PropertyKey::from_name(name) {
            PropertyKey::Name if self.name().is_empty() => None,
            key => self.properties.get(&key).map(PropertyValue::to_json),
        }
    }

    fn set_property(&mut self, name: &str, value: &Value) -> bool {
        match (PropertyKey::from_name(name), value) {
            (PropertyKey::Name, Value::String(s)) => self.set_name(s),
            (PropertyKey::State, Value::String(s)) => match s.parse() {
                Ok(state) => self.set_state(state),
                Err(_) => return false,
            },
            (PropertyKey::ReadOnly, Value::Bool(b)) => self.set_read_only(*b),
            (key @ PropertyKey::Custom(_), value) => {
                self.properties.set(key, value.clone().into());
            }
            _ => return false,
        }
        true
    }

    fn start_loading_from_json(&mut self) {
        self.start_loading();
    }

    fn end_loading_from_json(&mut self) {
        self.end_loading();
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Register the element types: abstract `surveyelement` (`name`, `state`,
/// `readOnly`) and its creatable children `question`, `panel` and `page`.
pub fn register_elements(registry: &ClassRegistry) {
    registry.register(ClassDescriptor::new("surveyelement").with_properties([
        PropertyDescriptor::new("name"),
        PropertyDescriptor::new("state").with_default(Value::String("default".into())),
        PropertyDescriptor::new("readOnly").with_default(Value::Bool(false)),
    ]));
    for kind in [ElementKind::Question, ElementKind::Panel, ElementKind::Page] {
        registry.register(
            ClassDescriptor::new(kind.type_name())
                .with_parent("surveyelement")
                .with_factory(move || Box::new(SurveyElement::new(kind, ""))),
        );
    }
}
