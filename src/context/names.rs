//! Name allocation and reference rewriting over kubeconfig maps

use std::collections::{BTreeMap, BTreeSet};

use crate::kubeconfig::Context;

/// A set of taken entry names
pub trait NameSet {
    fn contains_name(&self, name: &str) -> bool;
}

impl<V> NameSet for BTreeMap<String, V> {
    fn contains_name(&self, name: &str) -> bool {
        self.contains_key(name)
    }
}

impl NameSet for BTreeSet<String> {
    fn contains_name(&self, name: &str) -> bool {
        self.contains(name)
    }
}

/// Lowest `<prefix>N` (N >= 1) not present in `names`
pub fn allocate_free_name(prefix: &str, names: &impl NameSet) -> String {
    let mut n: u32 = 1;
    loop {
        let candidate = format!("{}{}", prefix, n);
        if !names.contains_name(&candidate) {
            return candidate;
        }
        n += 1;
    }
}

/// Which reference of a context to rewrite
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reference {
    Cluster,
    User,
}

impl Reference {
    fn of(self, context: &mut Context) -> &mut String {
        match self {
            Reference::Cluster => &mut context.cluster,
            Reference::User => &mut context.user,
        }
    }
}

/// Point every context referencing `from` at `to`
pub fn repoint(contexts: &mut BTreeMap<String, Context>, reference: Reference, from: &str, to: &str) {
    for context in contexts.values_mut() {
        let field = reference.of(context);
        if field == from {
            *field = to.to_string();
        }
    }
}

/// Exchange references to `a` and `b` in every context
pub fn swap_references(
    contexts: &mut BTreeMap<String, Context>,
    reference: Reference,
    a: &str,
    b: &str,
) {
    for context in contexts.values_mut() {
        let field = reference.of(context);
        if field == a {
            *field = b.to_string();
        } else if field == b {
            *field = a.to_string();
        }
    }
}

/// Exchange the entries at `a` and `b`; renames when only `b` exists.
/// Returns false when `b` is missing.
pub fn swap_entries<V>(map: &mut BTreeMap<String, V>, a: &str, b: &str) -> bool {
    let Some(b_value) = map.remove(b) else {
        return false;
    };
    if let Some(a_value) = map.remove(a) {
        map.insert(b.to_string(), a_value);
    }
    map.insert(a.to_string(), b_value);
    true
}
