//! String interning for identifier deduplication.
//!
//! Identifiers and literal texts are deduplicated into `Atom` handles so that
//! name comparisons during binding and classification are integer compares.

use rustc_hash::FxHashMap;

/// Interned string handle.
///
/// `Atom` equality is equivalent to string equality within one `Interner`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Atom(pub u32);

impl Atom {
    /// Sentinel for "no atom" (e.g. nodes without name data).
    pub const NONE: Atom = Atom(u32::MAX);

    pub const fn is_none(self) -> bool {
        self.0 == u32::MAX
    }
}

/// Append-only string interner.
///
/// Owned by the scanner while tokenizing, then transferred to the `NodeArena`
/// so identifier text stays resolvable for the lifetime of the tree.
#[derive(Default)]
pub struct Interner {
    map: FxHashMap<Box<str>, Atom>,
    strings: Vec<Box<str>>,
}

impl Interner {
    pub fn new() -> Interner {
        Interner::default()
    }

    /// Intern a string, returning its stable handle.
    pub fn intern(&mut self, text: &str) -> Atom {
        if let Some(&atom) = self.map.get(text) {
            return atom;
        }
        let atom = Atom(self.strings.len() as u32);
        let boxed: Box<str> = text.into();
        self.strings.push(boxed.clone());
        self.map.insert(boxed, atom);
        atom
    }

    /// Resolve a handle back to its text. `Atom::NONE` resolves to `""`.
    pub fn resolve(&self, atom: Atom) -> &str {
        if atom.is_none() {
            return "";
        }
        self.strings
            .get(atom.0 as usize)
            .map(|s| s.as_ref())
            .unwrap_or("")
    }

    pub fn len(&self) -> usize {
        self.strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interning_deduplicates() {
        let mut interner = Interner::new();
        let a = interner.intern("Number");
        let b = interner.intern("Number");
        let c = interner.intern("undefined");
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(interner.resolve(a), "Number");
        assert_eq!(interner.resolve(c), "undefined");
    }

    #[test]
    fn none_atom_resolves_empty() {
        let interner = Interner::new();
        assert_eq!(interner.resolve(Atom::NONE), "");
    }
}
