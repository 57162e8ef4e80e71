//! Two-scope symbol table: class scope (Static/This) and subroutine scope
//! (Argument/Local), reset at the start of every subroutine.

use indexmap::IndexMap;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StorageKind {
  Static,
  This,
  Argument,
  Local,
}

#[derive(Clone, Debug)]
struct Entry {
  ty: String,
  kind: StorageKind,
  index: usize,
}

#[derive(Default)]
struct Scope {
  entries: IndexMap<String, Entry>,
  counters: [usize; 4],
}

impl Scope {
  fn counter(&mut self, kind: StorageKind) -> &mut usize {
    &mut self.counters[kind as usize]
  }

  fn define(&mut self, name: &str, ty: &str, kind: StorageKind) {
    if self.entries.contains_key(name) {
      return;
    }
    let index = *self.counter(kind);
    *self.counter(kind) += 1;
    self.entries.insert(
      name.to_string(),
      Entry {
        ty: ty.to_string(),
        kind,
        index,
      },
    );
  }

  fn var_count(&self, kind: StorageKind) -> usize {
    self.counters[kind as usize]
  }
}

#[derive(Default)]
pub struct SymbolTable {
  class: Scope,
  subroutine: Scope,
}

impl SymbolTable {
  pub fn new() -> Self {
    Self::default()
  }

  /// Clears subroutine scope and resets its Argument/Local counters.
  pub fn start_subroutine(&mut self) {
    self.subroutine = Scope::default();
  }

  /// Defines `name` in the scope implied by `kind` (class scope for
  /// `Static`/`This`, subroutine scope for `Argument`/`Local`). A name
  /// already bound in either scope is left untouched.
  pub fn define(&mut self, name: &str, ty: &str, kind: StorageKind) {
    if self.class.entries.contains_key(name) || self.subroutine.entries.contains_key(name) {
      return;
    }
    match kind {
      StorageKind::Static | StorageKind::This => self.class.define(name, ty, kind),
      StorageKind::Argument | StorageKind::Local => self.subroutine.define(name, ty, kind),
    }
  }

  pub fn var_count(&self, kind: StorageKind) -> usize {
    match kind {
      StorageKind::Static | StorageKind::This => self.class.var_count(kind),
      StorageKind::Argument | StorageKind::Local => self.subroutine.var_count(kind),
    }
  }

  fn resolve(&self, name: &str) -> Option<&Entry> {
    self
      .subroutine
      .entries
      .get(name)
      .or_else(|| self.class.entries.get(name))
  }

  pub fn kind_of(&self, name: &str) -> Option<StorageKind> {
    self.resolve(name).map(|e| e.kind)
  }

  pub fn type_of(&self, name: &str) -> Option<&str> {
    self.resolve(name).map(|e| e.ty.as_str())
  }

  pub fn index_of(&self, name: &str) -> Option<usize> {
    self.resolve(name).map(|e| e.index)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn indices_are_dense_per_kind() {
    let mut t = SymbolTable::new();
    t.define("a", "int", StorageKind::Argument);
    t.define("b", "int", StorageKind::Argument);
    t.define("c", "int", StorageKind::Local);
    assert_eq!(t.index_of("a"), Some(0));
    assert_eq!(t.index_of("b"), Some(1));
    assert_eq!(t.index_of("c"), Some(0));
    assert_eq!(t.var_count(StorageKind::Argument), 2);
    assert_eq!(t.var_count(StorageKind::Local), 1);
  }

  #[test]
  fn redefinition_is_a_no_op() {
    let mut t = SymbolTable::new();
    t.define("this", "Foo", StorageKind::Argument);
    t.define("this", "Foo", StorageKind::Argument);
    assert_eq!(t.var_count(StorageKind::Argument), 1);
    assert_eq!(t.index_of("this"), Some(0));
  }

  #[test]
  fn redefinition_across_scopes_is_also_a_no_op() {
    // A name already bound in class scope blocks a same-named local: the
    // first definition wins even across scopes, per the source behavior.
    let mut t = SymbolTable::new();
    t.define("x", "int", StorageKind::This);
    t.define("x", "int", StorageKind::Local);
    assert_eq!(t.kind_of("x"), Some(StorageKind::This));
    assert_eq!(t.var_count(StorageKind::Local), 0);
  }

  #[test]
  fn subroutine_scope_is_consulted_before_class_scope() {
    let mut t = SymbolTable::new();
    t.define("f", "int", StorageKind::This);
    t.start_subroutine();
    t.define("y", "int", StorageKind::Local);
    assert_eq!(t.kind_of("y"), Some(StorageKind::Local));
    assert_eq!(t.kind_of("f"), Some(StorageKind::This));
  }

  #[test]
  fn start_subroutine_clears_locals_and_args_only() {
    let mut t = SymbolTable::new();
    t.define("f", "int", StorageKind::This);
    t.define("a", "int", StorageKind::Argument);
    t.start_subroutine();
    assert_eq!(t.kind_of("f"), Some(StorageKind::This));
    assert_eq!(t.kind_of("a"), None);
    assert_eq!(t.var_count(StorageKind::Argument), 0);
  }

  #[test]
  fn unknown_name_resolves_to_none() {
    let t = SymbolTable::new();
    assert_eq!(t.kind_of("nope"), None);
    assert_eq!(t.type_of("nope"), None);
    assert_eq!(t.index_of("nope"), None);
  }
}
