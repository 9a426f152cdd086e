//! Lexical scope frames used by the analyzer.
//!
//! Frames live in an arena and point at their parent by index. A frame is
//! popped when the subtree that opened it has been analyzed, so nothing in the
//! bound AST refers to a frame.

use crate::compiler::entity::EntityId;
use crate::compiler::error::SemanticError;
use indexmap::IndexMap;

/// Context flags. A child frame starts from a copy of its parent's flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Flags {
    pub in_loop: bool,
    /// The enclosing function, if any
    pub in_function: Option<EntityId>,
    /// The enclosing class, if any
    pub in_class: Option<EntityId>,
    /// Bare identifiers declare fresh parameters instead of resolving.
    pub binding_parameters: bool,
    /// Bare identifiers are field names and are not resolved.
    pub inside_property_access: bool,
}

#[derive(Debug)]
struct Frame {
    parent: Option<usize>,
    symbols: IndexMap<String, EntityId>,
    flags: Flags,
}

/// The chain of frames from the root to the current one.
#[derive(Debug)]
pub struct Scopes {
    frames: Vec<Frame>,
    current: usize,
}

impl Default for Scopes {
    fn default() -> Self {
        Self::new()
    }
}

impl Scopes {
    pub fn new() -> Self {
        Self {
            frames: vec![Frame {
                parent: None,
                symbols: IndexMap::new(),
                flags: Flags::default(),
            }],
            current: 0,
        }
    }

    pub fn flags(&self) -> &Flags {
        &self.frames[self.current].flags
    }

    pub fn flags_mut(&mut self) -> &mut Flags {
        &mut self.frames[self.current].flags
    }

    /// Opens a child of the current frame with the parent's flags, adjusted by `configure`.
    pub fn enter(&mut self, configure: impl FnOnce(&mut Flags)) {
        let mut flags = *self.flags();
        configure(&mut flags);

        self.frames.push(Frame {
            parent: Some(self.current),
            symbols: IndexMap::new(),
            flags,
        });
        self.current = self.frames.len() - 1;
    }

    /// Closes the current frame and returns to its parent.
    pub fn exit(&mut self) {
        let Some(parent) = self.frames[self.current].parent else {
            return;
        };
        self.frames.truncate(self.current);
        self.current = parent;
    }

    pub fn depth(&self) -> usize {
        let mut depth = 0;
        let mut frame = self.current;
        while let Some(parent) = self.frames[frame].parent {
            depth += 1;
            frame = parent;
        }
        depth
    }

    pub fn declare(&mut self, name: &str, entity: EntityId) -> Result<(), SemanticError> {
        let symbols = &mut self.frames[self.current].symbols;
        if symbols.contains_key(name) {
            return Err(SemanticError::AlreadyDeclared {
                name: name.to_string(),
            });
        }
        symbols.insert(name.to_string(), entity);
        Ok(())
    }

    /// Looks `name` up from the current frame outward.
    pub fn resolve(&self, name: &str) -> Result<EntityId, SemanticError> {
        let mut frame = Some(self.current);
        while let Some(index) = frame {
            if let Some(entity) = self.frames[index].symbols.get(name) {
                return Ok(*entity);
            }
            frame = self.frames[index].parent;
        }
        Err(SemanticError::NotDeclared {
            name: name.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declare_and_resolve() {
        let mut scopes = Scopes::new();
        scopes.declare("x", EntityId(0)).unwrap();
        assert_eq!(scopes.resolve("x"), Ok(EntityId(0)));
        assert_eq!(
            scopes.resolve("y"),
            Err(SemanticError::NotDeclared {
                name: "y".to_string()
            })
        );
    }

    #[test]
    fn test_redeclaration_in_same_frame_fails() {
        let mut scopes = Scopes::new();
        scopes.declare("x", EntityId(0)).unwrap();
        assert_eq!(
            scopes.declare("x", EntityId(1)),
            Err(SemanticError::AlreadyDeclared {
                name: "x".to_string()
            })
        );
    }

    #[test]
    fn test_shadowing_in_child_frame() {
        let mut scopes = Scopes::new();
        scopes.declare("x", EntityId(0)).unwrap();
        scopes.enter(|_| {});
        scopes.declare("x", EntityId(1)).unwrap();
        assert_eq!(scopes.resolve("x"), Ok(EntityId(1)));
        scopes.exit();
        assert_eq!(scopes.resolve("x"), Ok(EntityId(0)));
    }

    #[test]
    fn test_child_inherits_and_overrides_flags() {
        let mut scopes = Scopes::new();
        scopes.enter(|flags| flags.in_loop = true);
        scopes.enter(|flags| flags.in_function = Some(EntityId(3)));
        assert!(scopes.flags().in_loop);
        assert_eq!(scopes.flags().in_function, Some(EntityId(3)));

        scopes.enter(|flags| flags.in_loop = false);
        assert!(!scopes.flags().in_loop);
        assert_eq!(scopes.flags().in_function, Some(EntityId(3)));
        assert_eq!(scopes.depth(), 3);
    }

    #[test]
    fn test_exit_discards_frame() {
        let mut scopes = Scopes::new();
        scopes.enter(|_| {});
        scopes.declare("inner", EntityId(0)).unwrap();
        scopes.exit();
        assert_eq!(scopes.depth(), 0);
        assert!(scopes.resolve("inner").is_err());

        // Exiting the root is a no-op.
        scopes.exit();
        assert_eq!(scopes.depth(), 0);
    }
}
