use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::error::Result;

/// A version declared by a module.
#[derive(Debug, Clone, PartialEq)]
pub enum VersionValue {
    /// String version, e.g. `"1.2.3"`.
    Str(String),
    /// Integer version, e.g. `3`.
    Int(i64),
    /// Floating-point version, e.g. `0.4`.
    Float(f64),
}

impl VersionValue {
    /// Truthiness in the host-language sense: empty strings, zero
    /// integers, and zero floats are falsy. Used only by `has_version`;
    /// presence checks elsewhere ignore truthiness.
    pub fn is_truthy(&self) -> bool {
        match self {
            VersionValue::Str(s) => !s.is_empty(),
            VersionValue::Int(i) => *i != 0,
            VersionValue::Float(f) => *f != 0.0,
        }
    }
}

impl fmt::Display for VersionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VersionValue::Str(s) => write!(f, "{}", s),
            VersionValue::Int(i) => write!(f, "{}", i),
            VersionValue::Float(v) => write!(f, "{}", v),
        }
    }
}

/// Thunk for an attribute computed on first access. Forcing it may fail,
/// which models lazy or broken attributes on real modules.
pub type DeferredAttr = Arc<dyn Fn() -> Result<Value> + Send + Sync>;

/// A binding value in a namespace or a module attribute table.
#[derive(Clone)]
pub enum Value {
    /// String scalar.
    Str(String),
    /// Integer scalar.
    Int(i64),
    /// Float scalar.
    Float(f64),
    /// Boolean scalar.
    Bool(bool),
    /// A module-like object. Shared so the same module can appear under
    /// several bindings, including cyclically.
    Module(Arc<Module>),
    /// An attribute resolved on demand; see [`DeferredAttr`].
    Deferred(DeferredAttr),
}

impl Value {
    /// Returns the module handle if this value is module-like.
    pub fn as_module(&self) -> Option<&Arc<Module>> {
        match self {
            Value::Module(m) => Some(m),
            _ => None,
        }
    }

    /// Converts a scalar value into a version value. Modules, booleans,
    /// and unforced thunks are not versions.
    pub fn as_version(&self) -> Option<VersionValue> {
        match self {
            Value::Str(s) => Some(VersionValue::Str(s.clone())),
            Value::Int(i) => Some(VersionValue::Int(*i)),
            Value::Float(f) => Some(VersionValue::Float(*f)),
            _ => None,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(s) => f.debug_tuple("Str").field(s).finish(),
            Value::Int(i) => f.debug_tuple("Int").field(i).finish(),
            Value::Float(v) => f.debug_tuple("Float").field(v).finish(),
            Value::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
            Value::Module(m) => f
                .debug_tuple("Module")
                .field(&m.declared_name().unwrap_or("<anonymous>"))
                .finish(),
            Value::Deferred(_) => f.write_str("Deferred(..)"),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<Arc<Module>> for Value {
    fn from(m: Arc<Module>) -> Self {
        Value::Module(m)
    }
}

/// A namespace snapshot: name → value bindings, unordered. Supplied by
/// the caller; the walker never discovers one itself.
pub type Namespace = HashMap<String, Value>;

/// A module-like object: an optional declared name plus an attribute
/// table. The table sits behind a lock so cyclic graphs can be wired up
/// after the `Arc` handles exist.
pub struct Module {
    name: Option<String>,
    attrs: RwLock<BTreeMap<String, Value>>,
}

impl Module {
    /// Create a module with a declared name.
    pub fn new(name: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            name: Some(name.into()),
            attrs: RwLock::new(BTreeMap::new()),
        })
    }

    /// Create a module without a declared name. The walker falls back to
    /// the binding name for such modules.
    pub fn anonymous() -> Arc<Self> {
        Arc::new(Self {
            name: None,
            attrs: RwLock::new(BTreeMap::new()),
        })
    }

    /// The module's own declared name, if any.
    pub fn declared_name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Insert or replace an attribute.
    pub fn set_attr(&self, name: impl Into<String>, value: impl Into<Value>) {
        self.attrs.write().insert(name.into(), value.into());
    }

    /// Raw attribute read; deferred attributes come back unforced.
    pub fn attr(&self, name: &str) -> Option<Value> {
        self.attrs.read().get(name).cloned()
    }

    /// Attribute read that forces deferred thunks. `None` means absent;
    /// `Some(Err(_))` means present but broken.
    pub fn resolve_attr(&self, name: &str) -> Option<Result<Value>> {
        let value = self.attrs.read().get(name).cloned()?;
        Some(match value {
            Value::Deferred(thunk) => thunk(),
            other => Ok(other),
        })
    }

    /// Enumerate all attributes, forcing deferred thunks. Failures
    /// surface per member as `Err` entries so a single broken attribute
    /// never hides its siblings.
    pub fn members(&self) -> Vec<(String, Result<Value>)> {
        let snapshot: Vec<(String, Value)> = self
            .attrs
            .read()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();

        snapshot
            .into_iter()
            .map(|(name, value)| {
                let resolved = match value {
                    Value::Deferred(thunk) => thunk(),
                    other => Ok(other),
                };
                (name, resolved)
            })
            .collect()
    }
}

impl fmt::Debug for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Module")
            .field("name", &self.name)
            .field("attrs", &self.attrs.read().len())
            .finish()
    }
}
