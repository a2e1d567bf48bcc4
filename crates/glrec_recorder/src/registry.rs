//! Resource registry
//!
//! Maps opaque handles to stable symbolic names for the replay script. Each
//! handle kind has its own ordered list; a handle's position in that list is
//! its index for the rest of the session, so the script can declare one array
//! per kind and fill it positionally:
//!
//! ```text
//! WebGLBuffers[0] = gl.createBuffer();
//! gl.bindBuffer(34962, WebGLBuffers[0]);
//! ```

use glrec_core::{HandleKind, ResourceHandle, Value};
use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Symbolic reference to a registered handle, rendered `<TypeName>s[<index>]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Symbol {
    pub kind: HandleKind,
    pub index: usize,
}

impl Symbol {
    /// Name of the script array holding handles of `kind`, e.g. `WebGLBuffers`.
    pub fn array_name(kind: HandleKind) -> String {
        format!("{}s", kind.type_name())
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}s[{}]", self.kind.type_name(), self.index)
    }
}

#[derive(Debug, Default)]
struct KindList {
    handles: Vec<ResourceHandle>,
    /// Instance id -> position in `handles`
    positions: FxHashMap<u64, usize>,
}

/// Per-session handle registry.
///
/// Kinds are kept in first-sighting order, which is also the order the
/// compiled script declares them in.
#[derive(Debug, Default)]
pub struct ResourceRegistry {
    lists: IndexMap<HandleKind, KindList>,
}

impl ResourceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Symbol for `value` if it is a resource handle, registering the handle
    /// on first sight. `None` means "not symbolizable", not an error.
    pub fn symbolize(&mut self, value: &Value) -> Option<Symbol> {
        value.as_handle().map(|handle| self.symbolize_handle(handle))
    }

    /// Symbol for `handle`, registering it on first sight.
    pub fn symbolize_handle(&mut self, handle: &ResourceHandle) -> Symbol {
        let kind = handle.kind();
        let list = self.lists.entry(kind).or_default();
        let index = match list.positions.get(&handle.id()) {
            Some(&index) => index,
            None => {
                let index = list.handles.len();
                list.handles.push(handle.clone());
                list.positions.insert(handle.id(), index);
                tracing::trace!(kind = %kind, index, "registered handle");
                index
            }
        };
        Symbol { kind, index }
    }

    /// Symbol for an already registered handle, without registering.
    pub fn lookup(&self, handle: &ResourceHandle) -> Option<Symbol> {
        let kind = handle.kind();
        let index = *self.lists.get(&kind)?.positions.get(&handle.id())?;
        Some(Symbol { kind, index })
    }

    /// The handle a symbol refers to.
    pub fn resolve(&self, symbol: Symbol) -> Option<&ResourceHandle> {
        self.lists.get(&symbol.kind)?.handles.get(symbol.index)
    }

    /// Kinds with at least one registered handle, in first-sighting order.
    pub fn kinds(&self) -> impl Iterator<Item = HandleKind> + '_ {
        self.lists
            .iter()
            .filter(|(_, list)| !list.handles.is_empty())
            .map(|(kind, _)| *kind)
    }

    /// Number of registered handles of `kind`.
    pub fn count(&self, kind: HandleKind) -> usize {
        self.lists.get(&kind).map_or(0, |list| list.handles.len())
    }

    /// Total number of registered handles.
    pub fn len(&self) -> usize {
        self.lists.values().map(|list| list.handles.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_sighting_order() {
        let mut registry = ResourceRegistry::new();
        let a = ResourceHandle::new(HandleKind::Buffer);
        let b = ResourceHandle::new(HandleKind::Buffer);

        let sb = registry.symbolize_handle(&b);
        let sa = registry.symbolize_handle(&a);

        assert_eq!(sb.index, 0);
        assert_eq!(sa.index, 1);
        assert_eq!(sb.to_string(), "WebGLBuffers[0]");
        assert_eq!(sa.to_string(), "WebGLBuffers[1]");
    }

    #[test]
    fn test_repeat_sightings_are_stable() {
        let mut registry = ResourceRegistry::new();
        let a = ResourceHandle::new(HandleKind::Texture);
        let b = ResourceHandle::new(HandleKind::Texture);

        let first = registry.symbolize(&Value::from(a.clone())).unwrap();
        registry.symbolize(&Value::from(b.clone()));
        for _ in 0..3 {
            assert_eq!(registry.symbolize(&Value::from(a.clone())), Some(first));
        }
        assert_eq!(registry.count(HandleKind::Texture), 2);
    }

    #[test]
    fn test_kinds_have_independent_indices() {
        let mut registry = ResourceRegistry::new();
        let program = ResourceHandle::new(HandleKind::Program);
        let shader = ResourceHandle::new(HandleKind::Shader);

        assert_eq!(registry.symbolize_handle(&program).index, 0);
        assert_eq!(registry.symbolize_handle(&shader).index, 0);
        assert_eq!(
            registry.kinds().collect::<Vec<_>>(),
            vec![HandleKind::Program, HandleKind::Shader]
        );
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_non_handles_are_not_symbolized() {
        let mut registry = ResourceRegistry::new();
        assert_eq!(registry.symbolize(&Value::from(1)), None);
        assert_eq!(registry.symbolize(&Value::Null), None);
        assert_eq!(registry.symbolize(&Value::Opaque("ext".into())), None);
        assert!(registry.is_empty());
        assert_eq!(registry.kinds().count(), 0);
    }

    #[test]
    fn test_lookup_and_resolve() {
        let mut registry = ResourceRegistry::new();
        let location = ResourceHandle::new(HandleKind::UniformLocation);

        assert_eq!(registry.lookup(&location), None);
        let symbol = registry.symbolize_handle(&location);
        assert_eq!(registry.lookup(&location), Some(symbol));
        assert_eq!(registry.resolve(symbol), Some(&location));
        assert_eq!(symbol.to_string(), "WebGLUniformLocations[0]");
    }
}
