//! Lexical environment: owned bindings over a shared, read-only provider chain.

use core::fmt;
use std::rc::Rc;

use indexmap::IndexMap;
use tracing::trace;

use crate::ast::Node;
use crate::operators::OperatorBinding;
use crate::values::Value;

/// What a name is bound to.
#[derive(Debug, Clone, PartialEq)]
pub enum Binding {
    Value(Value),
    /// Unevaluated definition, reduced each time the name is read.
    Node(Rc<Node>),
    Operator(OperatorBinding),
}

impl From<Value> for Binding {
    fn from(value: Value) -> Self {
        Binding::Value(value)
    }
}

impl From<Node> for Binding {
    fn from(node: Node) -> Self {
        Binding::Node(Rc::new(node))
    }
}

impl From<OperatorBinding> for Binding {
    fn from(op: OperatorBinding) -> Self {
        Binding::Operator(op)
    }
}

impl fmt::Display for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Binding::Value(value) => write!(f, "{}", value),
            Binding::Node(node) => write!(f, "{}", node),
            Binding::Operator(op) => write!(f, "{:?}", op),
        }
    }
}

/// Read-only fallback source of bindings.
///
/// Providers are consulted in order, and only for names the context does
/// not own. Lookups must be free of side effects.
pub trait IdentifierProvider {
    fn provide(&self, name: &str) -> Option<Binding>;

    /// Bindings this provider can enumerate. Providers that resolve names
    /// on demand may return nothing.
    fn items(&self) -> Vec<(String, Binding)> {
        Vec::new()
    }
}

/// Insertion-ordered owned bindings plus a shared provider chain.
///
/// Contexts are not `Clone`; use [`Context::copy`], which duplicates only
/// the owned bindings.
pub struct Context {
    bindings: IndexMap<String, Binding>,
    providers: Rc<[Rc<dyn IdentifierProvider>]>,
}

impl Context {
    pub fn new(providers: Vec<Rc<dyn IdentifierProvider>>) -> Self {
        Self {
            bindings: IndexMap::new(),
            providers: providers.into(),
        }
    }

    /// A context with no providers.
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Owned bindings first, then each provider in order.
    pub fn get(&self, name: &str) -> Option<Binding> {
        if let Some(binding) = self.bindings.get(name) {
            return Some(binding.clone());
        }
        let found = self
            .providers
            .iter()
            .find_map(|provider| provider.provide(name));
        trace!(name, found = found.is_some(), "provider lookup");
        found
    }

    pub fn set(&mut self, name: impl Into<String>, binding: impl Into<Binding>) {
        self.bindings.insert(name.into(), binding.into());
    }

    /// Remove an owned binding. Provider bindings are unaffected.
    pub fn delete(&mut self, name: &str) -> Option<Binding> {
        self.bindings.shift_remove(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
            || self
                .providers
                .iter()
                .any(|provider| provider.provide(name).is_some())
    }

    /// Whether `name` is bound in this context itself, ignoring providers.
    pub fn owns(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }

    /// Independent copy of the owned bindings sharing the same providers.
    pub fn copy(&self) -> Context {
        Context {
            bindings: self.bindings.clone(),
            providers: Rc::clone(&self.providers),
        }
    }

    /// Enumerable provider items overridden by owned bindings.
    ///
    /// An earlier provider shadows a later one, matching [`Context::get`].
    pub fn items(&self) -> IndexMap<String, Binding> {
        let mut items = IndexMap::new();
        for provider in self.providers.iter().rev() {
            items.extend(provider.items());
        }
        for (name, binding) in &self.bindings {
            items.insert(name.clone(), binding.clone());
        }
        items
    }

    /// Owned names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.bindings.keys().map(String::as_str)
    }

    pub fn bindings(&self) -> impl Iterator<Item = (&str, &Binding)> {
        self.bindings.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn shares_providers_with(&self, other: &Context) -> bool {
        Rc::ptr_eq(&self.providers, &other.providers)
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("bindings", &self.bindings)
            .field("providers", &self.providers.len())
            .finish()
    }
}
