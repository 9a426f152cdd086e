//! Entities created by the analyzer: variables, functions and classes.

use crate::compiler::types::Type;
use std::fmt;

/// Index of an entity in an [`Entities`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub u32);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A bound name. Classes are variables typed `Class`.
#[derive(Debug, Clone, PartialEq)]
pub enum Entity {
    Variable {
        name: String,
        constant: bool,
        ty: Type,
    },
    Function {
        name: String,
    },
}

impl Entity {
    pub fn variable(name: impl Into<String>, constant: bool, ty: Type) -> Self {
        Entity::Variable {
            name: name.into(),
            constant,
            ty,
        }
    }

    pub fn class(name: impl Into<String>) -> Self {
        Entity::variable(name, false, Type::Class)
    }

    pub fn function(name: impl Into<String>) -> Self {
        Entity::Function { name: name.into() }
    }

    pub fn name(&self) -> &str {
        match self {
            Entity::Variable { name, .. } | Entity::Function { name } => name,
        }
    }

    pub fn ty(&self) -> Type {
        match self {
            Entity::Variable { ty, .. } => *ty,
            Entity::Function { .. } => Type::Function,
        }
    }

    pub fn is_constant(&self) -> bool {
        matches!(self, Entity::Variable { constant: true, .. })
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entity::Variable { name, ty: Type::Class, .. } => write!(f, "Class {}", name),
            Entity::Variable {
                name,
                constant,
                ty,
            } => {
                let kind = if *constant { "Variable(const)" } else { "Variable" };
                write!(f, "{} {}: {}", kind, name, ty)
            }
            Entity::Function { name } => write!(f, "Function {}", name),
        }
    }
}

/// Arena owning every entity of one compilation.
#[derive(Debug, Clone, Default)]
pub struct Entities {
    entries: Vec<Entity>,
}

impl Entities {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alloc(&mut self, entity: Entity) -> EntityId {
        let id = EntityId(self.entries.len() as u32);
        self.entries.push(entity);
        id
    }

    pub fn get(&self, id: EntityId) -> &Entity {
        &self.entries[id.0 as usize]
    }

    /// Retypes a variable. Only assignment is allowed to do this.
    pub(crate) fn retype(&mut self, id: EntityId, new_ty: Type) {
        if let Entity::Variable { ty, .. } = &mut self.entries[id.0 as usize] {
            *ty = new_ty;
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &Entity)> {
        self.entries
            .iter()
            .enumerate()
            .map(|(i, e)| (EntityId(i as u32), e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alloc_and_get() {
        let mut entities = Entities::new();
        let a = entities.alloc(Entity::variable("x", true, Type::Int));
        let b = entities.alloc(Entity::function("f"));
        assert_ne!(a, b);
        assert_eq!(entities.get(a).name(), "x");
        assert!(entities.get(a).is_constant());
        assert_eq!(entities.get(b).ty(), Type::Function);
        assert_eq!(entities.len(), 2);
    }

    #[test]
    fn test_class_is_a_variable() {
        let entity = Entity::class("Dog");
        assert_eq!(entity.ty(), Type::Class);
        assert!(!entity.is_constant());
        assert_eq!(entity.to_string(), "Class Dog");
    }

    #[test]
    fn test_retype_ignores_functions() {
        let mut entities = Entities::new();
        let v = entities.alloc(Entity::variable("x", false, Type::None));
        let f = entities.alloc(Entity::function("f"));
        entities.retype(v, Type::Number);
        entities.retype(f, Type::Number);
        assert_eq!(entities.get(v).ty(), Type::Number);
        assert_eq!(entities.get(f).ty(), Type::Function);
    }
}
