//! Metadata-driven class registry.
//!
//! Maps a type name to a factory and the ordered list of properties that make
//! up the type's serializable surface. JSON is turned into typed objects by
//! looking up the factory for a type name and then walking its property
//! descriptors; serialization walks the same list in the other direction.
//!
//! Types may name a parent whose properties they inherit, and plugins may add
//! properties to an already registered type (for example extra `itemvalue`
//! attributes that the choices resolver then copies from remote records).
//!
//! # Example
//!
//! ```
//! use survey_core::registry::ClassRegistry;
//!
//! let registry = ClassRegistry::with_builtins();
//! assert!(registry.create("doesNotExist").is_none());
//! assert_eq!(registry.get_properties("itemvalue").len(), 2);
//! ```

use std::any::Any;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use serde_json::{Map, Value};
use tracing::{debug, warn};

/// An object that can be built and populated by the registry.
pub trait SurveyObject: Any + Send + Sync {
    /// Registered type name.
    fn type_name(&self) -> &str;

    /// Current value of a serializable property, `None` if unset.
    fn get_property(&self, name: &str) -> Option<Value>;

    /// Assign a property from JSON. Returns `false` if the value is rejected.
    fn set_property(&mut self, name: &str, value: &Value) -> bool;

    fn start_loading_from_json(&mut self) {}

    fn end_loading_from_json(&mut self) {}

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl dyn SurveyObject {
    pub fn downcast_ref<T: SurveyObject>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    pub fn downcast_mut<T: SurveyObject>(&mut self) -> Option<&mut T> {
        self.as_any_mut().downcast_mut::<T>()
    }
}

/// Factory producing a fresh instance of a registered type.
pub type ObjectFactory = Arc<dyn Fn() -> Box<dyn SurveyObject> + Send + Sync>;

/// One serializable property of a registered type.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyDescriptor {
    pub name: String,
    /// Values equal to the default are left out of serialized JSON.
    pub default: Option<Value>,
    pub serializable: bool,
}

impl PropertyDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            default: None,
            serializable: true,
        }
    }

    pub fn with_default(mut self, default: Value) -> Self {
        self.default = Some(default);
        self
    }

    /// Loadable from JSON but never written back out.
    pub fn not_serializable(mut self) -> Self {
        self.serializable = false;
        self
    }
}

impl From<&str> for PropertyDescriptor {
    fn from(name: &str) -> Self {
        PropertyDescriptor::new(name)
    }
}

impl From<String> for PropertyDescriptor {
    fn from(name: String) -> Self {
        PropertyDescriptor::new(name)
    }
}

/// Registration record for one type name.
#[derive(Clone)]
pub struct ClassDescriptor {
    pub name: String,
    pub parent: Option<String>,
    /// Own properties only; see [`ClassRegistry::get_properties`] for the full list.
    pub properties: Vec<PropertyDescriptor>,
    factory: Option<ObjectFactory>,
}

impl ClassDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parent: None,
            properties: Vec::new(),
            factory: None,
        }
    }

    pub fn with_properties<I>(mut self, properties: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<PropertyDescriptor>,
    {
        self.properties = properties.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    pub fn with_factory<F>(mut self, factory: F) -> Self
    where
        F: Fn() -> Box<dyn SurveyObject> + Send + Sync + 'static,
    {
        self.factory = Some(Arc::new(factory));
        self
    }

    /// Whether the type can be instantiated (abstract types only contribute properties).
    pub fn is_creatable(&self) -> bool {
        self.factory.is_some()
    }
}

impl fmt::Debug for ClassDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassDescriptor")
            .field("name", &self.name)
            .field("parent", &self.parent)
            .field("properties", &self.properties)
            .field("creatable", &self.is_creatable())
            .finish()
    }
}

/// Outcome of loading an object from JSON.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// JSON keys that are not registered properties of the type.
    pub unknown_properties: Vec<String>,
    /// Registered properties whose value the object refused.
    pub rejected_properties: Vec<String>,
    /// Set when the input was not a JSON object.
    pub not_an_object: bool,
}

impl LoadReport {
    pub fn is_clean(&self) -> bool {
        self.unknown_properties.is_empty()
            && self.rejected_properties.is_empty()
            && !self.not_an_object
    }
}

/// Type name → factory and serializable property surface.
///
/// Thread-safe via an internal `RwLock`; share it behind an `Arc`.
#[derive(Debug, Default)]
pub struct ClassRegistry {
    classes: RwLock<HashMap<String, ClassDescriptor>>,
}

impl ClassRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding the `itemvalue` type (`value`, `text`).
    pub fn with_builtins() -> Self {
        let registry = Self::new();
        registry.register(ClassDescriptor::new("itemvalue").with_properties(["value", "text"]));
        registry
    }

    /// Register a creatable type, replacing any previous registration.
    pub fn add_class<I, F>(&self, name: &str, properties: I, factory: F)
    where
        I: IntoIterator,
        I::Item: Into<PropertyDescriptor>,
        F: Fn() -> Box<dyn SurveyObject> + Send + Sync + 'static,
    {
        self.register(
            ClassDescriptor::new(name)
                .with_properties(properties)
                .with_factory(factory),
        );
    }

    /// Register (or replace) a descriptor.
    pub fn register(&self, descriptor: ClassDescriptor) {
        let mut classes = self.classes.write();
        if classes.contains_key(&descriptor.name) {
            debug!(class = %descriptor.name, "replacing class registration");
        }
        classes.insert(descriptor.name.clone(), descriptor);
    }

    /// Append (or replace by name) a property on a registered type.
    ///
    /// Returns `false` if the type is not registered.
    pub fn add_property(&self, class_name: &str, property: impl Into<PropertyDescriptor>) -> bool {
        let property = property.into();
        let mut classes = self.classes.write();
        let Some(class) = classes.get_mut(class_name) else {
            warn!(class = class_name, property = %property.name, "add_property on unknown class");
            return false;
        };
        match class.properties.iter_mut().find(|p| p.name == property.name) {
            Some(existing) => *existing = property,
            None => class.properties.push(property),
        }
        true
    }

    /// Remove a property from a type's own property list.
    pub fn remove_property(&self, class_name: &str, property_name: &str) -> bool {
        let mut classes = self.classes.write();
        let Some(class) = classes.get_mut(class_name) else {
            return false;
        };
        let before = class.properties.len();
        class.properties.retain(|p| p.name != property_name);
        class.properties.len() != before
    }

    pub fn contains(&self, class_name: &str) -> bool {
        self.classes.read().contains_key(class_name)
    }

    pub fn find_class(&self, class_name: &str) -> Option<ClassDescriptor> {
        self.classes.read().get(class_name).cloned()
    }

    /// Registered type names, sorted.
    pub fn class_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.classes.read().keys().cloned().collect();
        names.sort();
        names
    }

    /// Instantiate a registered type.
    ///
    /// Returns `None` for unknown or abstract types; probing for a type is a
    /// normal operation, not an error.
    pub fn create(&self, class_name: &str) -> Option<Box<dyn SurveyObject>> {
        // Release the lock before calling out: factories may use the registry.
        let factory = self
            .classes
            .read()
            .get(class_name)
            .and_then(|c| c.factory.clone());
        match factory {
            Some(factory) => Some(factory()),
            None => {
                debug!(class = class_name, "no factory registered");
                None
            }
        }
    }

    /// Full ordered property list of a type: inherited properties first, own
    /// properties after, with own properties overriding inherited ones of the
    /// same name in place. Empty for unknown types.
    pub fn get_properties(&self, class_name: &str) -> Vec<PropertyDescriptor> {
        let classes = self.classes.read();
        let mut chain = Vec::new();
        let mut seen = HashSet::new();
        let mut current = classes.get(class_name);
        while let Some(class) = current {
            if !seen.insert(class.name.as_str()) {
                warn!(class = class_name, "cycle in class parent chain");
                break;
            }
            chain.push(class);
            current = class.parent.as_deref().and_then(|p| classes.get(p));
        }

        let mut properties: Vec<PropertyDescriptor> = Vec::new();
        for class in chain.into_iter().rev() {
            for property in &class.properties {
                match properties.iter_mut().find(|p| p.name == property.name) {
                    Some(existing) => *existing = property.clone(),
                    None => properties.push(property.clone()),
                }
            }
        }
        properties
    }

    pub fn find_property(&self, class_name: &str, property_name: &str) -> Option<PropertyDescriptor> {
        self.get_properties(class_name)
            .into_iter()
            .find(|p| p.name == property_name)
    }

    /// Whether `class_name` is `ancestor` or inherits from it.
    pub fn is_descendant_of(&self, class_name: &str, ancestor: &str) -> bool {
        let classes = self.classes.read();
        let mut seen = HashSet::new();
        let mut current = classes.get(class_name);
        while let Some(class) = current {
            if class.name == ancestor {
                return true;
            }
            if !seen.insert(class.name.as_str()) {
                return false;
            }
            current = class.parent.as_deref().and_then(|p| classes.get(p));
        }
        false
    }

    /// Serialize an object by walking its type's property list.
    ///
    /// Unset, `null` and default-valued properties are omitted.
    pub fn to_json(&self, object: &dyn SurveyObject) -> Value {
        let mut map = Map::new();
        for property in self.get_properties(object.type_name()) {
            if !property.serializable {
                continue;
            }
            let Some(value) = object.get_property(&property.name) else {
                continue;
            };
            if value.is_null() || property.default.as_ref() == Some(&value) {
                continue;
            }
            map.insert(property.name, value);
        }
        Value::Object(map)
    }

    /// Populate `object` from a JSON object.
    ///
    /// The object is bracketed by `start_loading_from_json` /
    /// `end_loading_from_json`. Unknown keys (other than `type`) are reported
    /// and skipped.
    pub fn load_json(&self, object: &mut dyn SurveyObject, json: &Value) -> LoadReport {
        let mut report = LoadReport::default();
        let Some(fields) = json.as_object() else {
            warn!(class = object.type_name(), "cannot load from non-object JSON");
            report.not_an_object = true;
            return report;
        };

        let properties = self.get_properties(object.type_name());
        object.start_loading_from_json();
        for (key, value) in fields {
            if key == "type" {
                continue;
            }
            if !properties.iter().any(|p| &p.name == key) {
                warn!(class = object.type_name(), property = %key, "unknown property in JSON");
                report.unknown_properties.push(key.clone());
                continue;
            }
            if !object.set_property(key, value) {
                warn!(class = object.type_name(), property = %key, "property value rejected");
                report.rejected_properties.push(key.clone());
            }
        }
        object.end_loading_from_json();
        report
    }

    /// Create an instance of `class_name` and load it from `json`.
    pub fn create_from_json(
        &self,
        class_name: &str,
        json: &Value,
    ) -> Option<(Box<dyn SurveyObject>, LoadReport)> {
        let mut object = self.create(class_name)?;
        let report = self.load_json(object.as_mut(), json);
        Some((object, report))
    }

    /// Create an instance named by the JSON's own `type` field.
    pub fn object_from_json(&self, json: &Value) -> Option<(Box<dyn SurveyObject>, LoadReport)> {
        let class_name = json.get("type")?.as_str()?;
        self.create_from_json(class_name, json)
    }
}
