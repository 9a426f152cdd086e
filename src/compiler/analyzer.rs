//! Binding and type inference.
//!
//! A single traversal over the raw AST that resolves every identifier to an
//! entity, attaches a type tag to every expression and enforces the static
//! contracts of the language. The first violation aborts the pass.

use crate::compiler::ast::*;
use crate::compiler::entity::{Entities, Entity, EntityId};
use crate::compiler::error::{AnalysisError, Expectation, SemanticError};
use crate::compiler::lexer::Span;
use crate::compiler::scope::{Flags, Scopes};
use crate::compiler::types::Type;
use std::collections::HashSet;

type Result<T> = std::result::Result<T, AnalysisError>;

/// Binds and type-checks `program`.
pub fn analyze(program: Program) -> Result<BoundProgram> {
    Analyzer::new().analyze(program)
}

pub struct Analyzer {
    scopes: Scopes,
    entities: Entities,
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl Analyzer {
    pub fn new() -> Self {
        Self {
            scopes: Scopes::new(),
            entities: Entities::new(),
        }
    }

    pub fn analyze(mut self, mut program: Program) -> Result<BoundProgram> {
        self.statements(&mut program.statements)?;

        tracing::debug!(entities = self.entities.len(), "analysis finished");
        Ok(BoundProgram {
            program,
            entities: self.entities,
        })
    }

    fn statements(&mut self, statements: &mut [Statement]) -> Result<()> {
        for statement in statements {
            self.statement(statement)?;
        }
        Ok(())
    }

    /// Analyzes `block` in a fresh child frame.
    fn block_in(&mut self, block: &mut Block, configure: impl FnOnce(&mut Flags)) -> Result<()> {
        self.scopes.enter(configure);
        self.statements(&mut block.statements)?;
        self.scopes.exit();
        Ok(())
    }

    fn statement(&mut self, statement: &mut Statement) -> Result<()> {
        match statement {
            Statement::VarDecInit {
                binding,
                constant,
                init,
                ..
            } => {
                self.expr(init)?;
                let ty = type_of(init);
                let entity = Entity::variable(&binding.name, *constant, ty);
                self.declare(binding, entity)?;
            }
            Statement::VarDec {
                binding, constant, ..
            } => {
                let entity = Entity::variable(&binding.name, *constant, Type::None);
                self.declare(binding, entity)?;
            }
            Statement::MultiDec {
                constant,
                declarators,
                ..
            } => {
                for Declarator { binding, init } in declarators {
                    let ty = match init {
                        Some(init) => {
                            self.expr(init)?;
                            type_of(init)
                        }
                        None => Type::None,
                    };
                    let entity = Entity::variable(&binding.name, *constant, ty);
                    self.declare(binding, entity)?;
                }
            }
            Statement::Assign { target, value, .. } => {
                self.expr(target)?;
                self.expr(value)?;
                self.require_not_constant(target)?;

                // The assigned variable now holds a value of the new type.
                let ty = type_of(value);
                if let Expr::Ident {
                    entity: Some(id), ..
                } = target
                {
                    self.entities.retype(*id, ty);
                }
                target.set_ty(ty);
            }
            Statement::TryCatch {
                try_block,
                catch_binding,
                catch_block,
                ..
            } => {
                self.block_in(try_block, |_| {})?;

                self.scopes.enter(|_| {});
                let entity = Entity::variable(&catch_binding.name, false, Type::Any);
                self.declare(catch_binding, entity)?;
                self.statements(&mut catch_block.statements)?;
                self.scopes.exit();
            }
            Statement::Class(class) => self.class_def(class)?,
            Statement::FnDecl(func) => self.fn_decl(func)?,
            Statement::If {
                cases, else_block, ..
            } => {
                for case in cases {
                    self.expr(&mut case.condition)?;
                    self.require(&case.condition, Type::is_boolean, Expectation::Boolean)?;
                    self.block_in(&mut case.body, |_| {})?;
                }
                if let Some(else_block) = else_block {
                    self.block_in(else_block, |_| {})?;
                }
            }
            Statement::While {
                condition, body, ..
            } => {
                self.expr(condition)?;
                self.require(condition, Type::is_boolean, Expectation::Boolean)?;
                self.block_in(body, |flags| flags.in_loop = true)?;
            }
            Statement::For { header, body, .. } => {
                self.scopes.enter(|flags| flags.in_loop = true);

                self.expr(&mut header.init)?;
                let ty = type_of(&header.init);
                let entity = Entity::variable(&header.binding.name, false, ty);
                self.declare(&mut header.binding, entity)?;
                self.expr(&mut header.condition)?;
                self.require(&header.condition, Type::is_boolean, Expectation::Boolean)?;
                self.expr(&mut header.step)?;

                self.block_in(body, |_| {})?;
                self.scopes.exit();
            }
            Statement::ForOf {
                binding,
                iterable,
                body,
                ..
            } => {
                self.expr(iterable)?;
                self.require(iterable, Type::is_iterable, Expectation::Iterable)?;

                self.scopes.enter(|flags| flags.in_loop = true);
                let entity = Entity::variable(&binding.name, false, Type::Any);
                self.declare(binding, entity)?;
                self.statements(&mut body.statements)?;
                self.scopes.exit();
            }
            Statement::Switch {
                selector,
                cases,
                default,
                ..
            } => {
                self.expr(selector)?;
                for case in cases {
                    self.expr(&mut case.test)?;
                    self.block_in(&mut case.body, |flags| flags.in_loop = true)?;
                }
                if let Some(default) = default {
                    self.block_in(default, |flags| flags.in_loop = true)?;
                }
            }
            Statement::Return { value, span } => {
                self.require_in_function(*span)?;
                self.expr(value)?;
            }
            Statement::ShortReturn { span } => self.require_in_function(*span)?,
            Statement::Print { argument, .. } => self.expr(argument)?,
            Statement::Break { span } | Statement::Continue { span } => {
                if !self.scopes.flags().in_loop {
                    return Err(AnalysisError::new(
                        SemanticError::LoopControlOutsideLoop,
                        *span,
                    ));
                }
            }
            Statement::Expr { expr, .. } => self.expr(expr)?,
        }
        Ok(())
    }

    fn fn_decl(&mut self, func: &mut FnDecl) -> Result<()> {
        // Declared before the body so the function can call itself.
        let entity = Entity::function(&func.binding.name);
        let id = self.declare(&mut func.binding, entity)?;

        self.scopes.enter(|flags| {
            flags.in_loop = false;
            flags.in_function = Some(id);
            flags.binding_parameters = true;
        });
        for param in &mut func.params {
            self.expr(param)?;
        }
        self.scopes.flags_mut().binding_parameters = false;
        self.statements(&mut func.body.statements)?;
        self.scopes.exit();

        Ok(())
    }

    fn class_def(&mut self, class: &mut ClassDef) -> Result<()> {
        let entity = Entity::class(&class.binding.name);
        let id = self.declare(&mut class.binding, entity)?;

        self.scopes.enter(|flags| {
            flags.in_class = Some(id);
            flags.in_loop = false;
        });

        if let Some(constructor) = &mut class.constructor {
            self.scopes.enter(|flags| flags.binding_parameters = true);
            for param in &mut constructor.params {
                self.expr(param)?;
            }
            self.scopes.flags_mut().binding_parameters = false;
            self.statements(&mut constructor.body.statements)?;
            self.scopes.exit();
        }
        self.statements(&mut class.body.statements)?;

        self.scopes.exit();
        Ok(())
    }

    fn expr(&mut self, expr: &mut Expr) -> Result<()> {
        let ty = match expr {
            Expr::Bool { .. } => Type::Boolean,
            Expr::Number { .. } => Type::Number,
            Expr::BigInt { .. } => Type::Int,
            Expr::Str { .. } => Type::String,
            Expr::Null { .. } | Expr::Undefined { .. } => Type::None,
            Expr::Ident {
                name, span, entity, ..
            } => self.identifier(name, *span, entity)?,
            Expr::Call { callee, args, .. } => {
                self.expr(callee)?;
                let callee_ty = type_of(callee);
                if !callee_ty.is_callable() {
                    return Err(AnalysisError::new(
                        SemanticError::NotCallable { found: callee_ty },
                        callee.span(),
                    ));
                }
                for arg in args {
                    self.expr(arg)?;
                }
                Type::Any
            }
            Expr::This { field, span, .. } => {
                if self.scopes.flags().in_class.is_none() {
                    return Err(AnalysisError::new(SemanticError::ThisOutsideClass, *span));
                }
                self.field(field)?;
                Type::Any
            }
            Expr::New { class, args, .. } => {
                self.expr(class)?;
                let class_ty = type_of(class);
                if !class_ty.is_class_reference() {
                    return Err(AnalysisError::new(
                        SemanticError::NotAClass { found: class_ty },
                        class.span(),
                    ));
                }
                for arg in args {
                    self.expr(arg)?;
                }
                Type::Object
            }
            Expr::TypeOf { argument, .. } => {
                self.expr(argument)?;
                Type::String
            }
            Expr::Ternary {
                condition,
                then_expr,
                else_expr,
                ..
            } => {
                self.expr(condition)?;
                self.require(condition, Type::is_boolean, Expectation::Boolean)?;
                self.expr(then_expr)?;
                self.expr(else_expr)?;
                Type::widen(&[type_of(then_expr), type_of(else_expr)])
            }
            Expr::Binary {
                op, left, right, ..
            } => {
                self.expr(left)?;
                self.expr(right)?;
                self.binary(*op, left, right)?
            }
            Expr::Unary { op, operand, .. } => {
                self.expr(operand)?;
                match op {
                    UnaryOp::Increment | UnaryOp::Decrement => {
                        self.require_not_constant(operand)?;
                        self.require(operand, Type::is_numeric, Expectation::Number)?;
                        type_of(operand)
                    }
                    UnaryOp::Neg => {
                        self.require(operand, Type::is_numeric, Expectation::Number)?;
                        type_of(operand)
                    }
                    UnaryOp::Not => {
                        self.require(operand, Type::is_boolean, Expectation::Boolean)?;
                        Type::Boolean
                    }
                }
            }
            Expr::Array { elements, .. } => {
                for element in elements {
                    self.expr(element)?;
                }
                Type::Array
            }
            Expr::Object { pairs, keys, .. } => {
                self.object_literal(pairs, keys)?;
                Type::Object
            }
            Expr::Member { object, index, .. } => {
                self.expr(object)?;
                self.require(object, Type::is_array_or_object, Expectation::ArrayOrObject)?;

                self.scopes
                    .enter(|flags| flags.inside_property_access = false);
                self.expr(index)?;
                self.scopes.exit();

                if type_of(object) == Type::Array {
                    self.require(index, Type::is_integer, Expectation::Integer)?;
                }
                Type::Any
            }
            Expr::Property { object, field, .. } => {
                self.expr(object)?;
                self.require(object, Type::is_object, Expectation::Object)?;
                self.field(field)?;
                Type::Any
            }
        };

        expr.set_ty(ty);
        Ok(())
    }

    fn identifier(&mut self, name: &str, span: Span, entity: &mut Option<EntityId>) -> Result<Type> {
        let flags = *self.scopes.flags();

        if flags.binding_parameters {
            let id = self.entities.alloc(Entity::variable(name, false, Type::Any));
            self.scopes
                .declare(name, id)
                .map_err(|kind| AnalysisError::new(kind, span))?;
            *entity = Some(id);
            return Ok(Type::Any);
        }

        if flags.inside_property_access {
            return Ok(Type::Any);
        }

        let id = self
            .scopes
            .resolve(name)
            .map_err(|kind| AnalysisError::new(kind, span))?;
        *entity = Some(id);
        Ok(self.entities.get(id).ty())
    }

    /// Analyzes a field name: it is not looked up in any scope.
    fn field(&mut self, field: &mut Expr) -> Result<()> {
        self.scopes
            .enter(|flags| flags.inside_property_access = true);
        self.expr(field)?;
        self.scopes.exit();
        Ok(())
    }

    fn binary(&self, op: BinaryOp, left: &Expr, right: &Expr) -> Result<Type> {
        let ty = match op {
            BinaryOp::And | BinaryOp::Or => Type::Boolean,
            BinaryOp::Add => Type::widen(&[type_of(left), type_of(right)]),
            BinaryOp::AddAssign => {
                self.require_not_constant(left)?;
                Type::widen(&[type_of(left), type_of(right)])
            }
            BinaryOp::Sub | BinaryOp::Mul | BinaryOp::Div | BinaryOp::Mod | BinaryOp::Pow => {
                self.require(left, Type::is_numeric, Expectation::Number)?;
                self.require(right, Type::is_numeric, Expectation::Number)?;
                Type::Number
            }
            BinaryOp::SubAssign => {
                self.require_not_constant(left)?;
                self.require(left, Type::is_numeric, Expectation::Number)?;
                self.require(right, Type::is_numeric, Expectation::Number)?;
                Type::Number
            }
            BinaryOp::Eq
            | BinaryOp::Ne
            | BinaryOp::Lt
            | BinaryOp::Le
            | BinaryOp::Gt
            | BinaryOp::Ge => Type::Boolean,
        };
        Ok(ty)
    }

    fn object_literal(&mut self, pairs: &mut [ObjPair], keys: &mut Vec<String>) -> Result<()> {
        let mut seen = HashSet::new();
        keys.clear();

        for pair in pairs {
            // A bare identifier key is a property name, not a variable reference.
            if matches!(pair.key, Expr::Ident { .. }) {
                self.field(&mut pair.key)?;
            } else {
                self.expr(&mut pair.key)?;
            }
            self.expr(&mut pair.value)?;

            let key = pair.key.key_text();
            if !seen.insert(key.clone()) {
                return Err(AnalysisError::new(
                    SemanticError::DuplicateKeys { key },
                    pair.span,
                ));
            }
            keys.push(key);
        }
        Ok(())
    }

    fn declare(&mut self, binding: &mut Binding, entity: Entity) -> Result<EntityId> {
        let id = self.entities.alloc(entity);
        self.scopes
            .declare(&binding.name, id)
            .map_err(|kind| AnalysisError::new(kind, binding.span))?;
        binding.entity = Some(id);

        tracing::trace!(name = %binding.name, entity = %id, depth = self.scopes.depth(), "declared");
        Ok(id)
    }

    fn require(&self, expr: &Expr, check: fn(Type) -> bool, expected: Expectation) -> Result<()> {
        let found = type_of(expr);
        if check(found) {
            Ok(())
        } else {
            Err(AnalysisError::new(
                SemanticError::TypeMismatch { expected, found },
                expr.span(),
            ))
        }
    }

    fn require_not_constant(&self, target: &Expr) -> Result<()> {
        if let Expr::Ident {
            entity: Some(id),
            span,
            ..
        } = target
        {
            let entity = self.entities.get(*id);
            if entity.is_constant() {
                return Err(AnalysisError::new(
                    SemanticError::AssignToConstant {
                        name: entity.name().to_string(),
                    },
                    *span,
                ));
            }
        }
        Ok(())
    }

    fn require_in_function(&self, span: Span) -> Result<()> {
        if self.scopes.flags().in_function.is_none() {
            return Err(AnalysisError::new(SemanticError::ReturnOutsideFunction, span));
        }
        Ok(())
    }
}

fn type_of(expr: &Expr) -> Type {
    expr.ty().unwrap_or(Type::Any)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::lexer::Lexer;
    use crate::compiler::parser::Parser;

    fn bind(source: &str) -> Result<BoundProgram> {
        let tokens = Lexer::new(source).scan_tokens().unwrap();
        let program = Parser::new(tokens).parse().unwrap();
        analyze(program)
    }

    fn error_of(source: &str) -> SemanticError {
        match bind(source) {
            Ok(_) => panic!("expected analysis of {:?} to fail", source),
            Err(err) => err.kind,
        }
    }

    fn entity_named<'a>(bound: &'a BoundProgram, name: &str) -> &'a Entity {
        bound
            .entities
            .iter()
            .map(|(_, entity)| entity)
            .find(|entity| entity.name() == name)
            .unwrap()
    }

    #[test]
    fn test_declaration_types() {
        let bound = bind("دع ا = ١؛ دع ب = ١.٥؛ دع ج = \"نص\"؛ دع د؛ ثابت ه = صح؛").unwrap();
        assert_eq!(entity_named(&bound, "ا").ty(), Type::Int);
        assert_eq!(entity_named(&bound, "ب").ty(), Type::Number);
        assert_eq!(entity_named(&bound, "ج").ty(), Type::String);
        assert_eq!(entity_named(&bound, "د").ty(), Type::None);
        assert!(entity_named(&bound, "ه").is_constant());
    }

    #[test]
    fn test_redeclaration_in_same_frame_fails() {
        assert_eq!(
            error_of("دع س = ١؛ دع س = ٢؛"),
            SemanticError::AlreadyDeclared {
                name: "س".to_string()
            }
        );
    }

    #[test]
    fn test_shadowing_in_inner_frame() {
        assert!(bind("دع س = ١؛ لو(صح){ دع س = \"ب\"؛ طبع(س)؛ }").is_ok());
    }

    #[test]
    fn test_undeclared_identifier() {
        assert_eq!(
            error_of("طبع(مفقود)؛"),
            SemanticError::NotDeclared {
                name: "مفقود".to_string()
            }
        );
    }

    #[test]
    fn test_constant_violations() {
        let expected = SemanticError::AssignToConstant {
            name: "س".to_string(),
        };
        for mutation in ["س = ٢؛", "س++؛", "س--؛", "++س؛", "س += ١؛", "س -= ١؛"] {
            let source = format!("ثابت س = ١؛ {}", mutation);
            assert_eq!(error_of(&source), expected, "{}", mutation);
        }
    }

    #[test]
    fn test_assign_to_constant_total() {
        assert_eq!(
            error_of("ثابت total = ٥؛ total = ٦؛"),
            SemanticError::AssignToConstant {
                name: "total".to_string()
            }
        );
    }

    #[test]
    fn test_assignment_retypes_variable() {
        let bound = bind("دع س؛ س = \"نص\"؛").unwrap();
        assert_eq!(entity_named(&bound, "س").ty(), Type::String);
    }

    #[test]
    fn test_for_of_count_becomes_number() {
        let bound = bind("دع count = ٠؛ ل(item [١، ٢، ٣]){ count = count + item؛ }").unwrap();
        assert_eq!(entity_named(&bound, "count").ty(), Type::Number);
        assert_eq!(entity_named(&bound, "item").ty(), Type::Any);
    }

    #[test]
    fn test_loop_control() {
        assert!(bind("بينما(صح){ قف؛ }").is_ok());
        assert!(bind("بينما(صح){ استمر؛ }").is_ok());
        assert_eq!(error_of("قف؛"), SemanticError::LoopControlOutsideLoop);
        assert_eq!(
            error_of("بينما(صح){ دالة ف(){ قف؛ } }"),
            SemanticError::LoopControlOutsideLoop
        );
        assert_eq!(
            error_of("بينما(صح){ دالة ف(){ استمر؛ } }"),
            SemanticError::LoopControlOutsideLoop
        );
    }

    #[test]
    fn test_return_in_function_nested_in_loop() {
        assert!(bind("بينما(صح){ دالة ف(){ عد ١؛ } }").is_ok());
        assert_eq!(error_of("عد؛"), SemanticError::ReturnOutsideFunction);
    }

    #[test]
    fn test_switch_cases_allow_break() {
        assert!(bind("دع ت = ١؛ تبديل(ت){ حالة ١: قف؛ خلاف ذلك: قف؛ }").is_ok());
    }

    #[test]
    fn test_recursion_and_parameters() {
        let bound = bind("دالة ف(ن){ عد ف(ن - ١)؛ }").unwrap();
        assert_eq!(entity_named(&bound, "ف").ty(), Type::Function);
        assert_eq!(entity_named(&bound, "ن").ty(), Type::Any);
    }

    #[test]
    fn test_duplicate_parameter() {
        assert_eq!(
            error_of("دالة ف(ا، ا){}"),
            SemanticError::AlreadyDeclared {
                name: "ا".to_string()
            }
        );
    }

    #[test]
    fn test_call_of_non_function() {
        assert_eq!(
            error_of("دع ا = ١؛ ا()؛"),
            SemanticError::NotCallable { found: Type::Int }
        );
    }

    #[test]
    fn test_lattice() {
        let bound = bind("دع ا = \"س\" + ١.٥؛ دع ب = ١.٥ + صح؛ دع ج = [١] + ١.٥؛").unwrap();
        assert_eq!(entity_named(&bound, "ا").ty(), Type::String);
        assert_eq!(entity_named(&bound, "ب").ty(), Type::Number);
        assert_eq!(entity_named(&bound, "ج").ty(), Type::String);
    }

    #[test]
    fn test_arithmetic_requires_numbers() {
        assert_eq!(
            error_of("دع ا = \"س\" - ١؛"),
            SemanticError::TypeMismatch {
                expected: Expectation::Number,
                found: Type::String
            }
        );
        let bound = bind("دع ا = ٤ / ٢؛").unwrap();
        assert_eq!(entity_named(&bound, "ا").ty(), Type::Number);
    }

    #[test]
    fn test_conditions_must_be_boolean() {
        assert_eq!(
            error_of("لو(١){}"),
            SemanticError::TypeMismatch {
                expected: Expectation::Boolean,
                found: Type::Int
            }
        );
        assert!(matches!(
            error_of("بينما(\"س\"){}"),
            SemanticError::TypeMismatch { .. }
        ));
        assert!(matches!(
            error_of("ل(دع ه = ٠؛ ه؛ ه++){}"),
            SemanticError::TypeMismatch { .. }
        ));
    }

    #[test]
    fn test_ternary_widens_branches() {
        let bound = bind("دع ا = ١ > ٢ ؟ \"خالد\" : مجهول؛").unwrap();
        assert_eq!(entity_named(&bound, "ا").ty(), Type::String);
    }

    #[test]
    fn test_iterable_required() {
        assert_eq!(
            error_of("ل(س ١){}"),
            SemanticError::TypeMismatch {
                expected: Expectation::Iterable,
                found: Type::Int
            }
        );
        assert!(bind("ل(حرف \"نص\"){ طبع(حرف)؛ }").is_ok());
    }

    #[test]
    fn test_member_access() {
        assert!(bind("دع ا = [١، ٢]؛ طبع(ا[٠])؛").is_ok());
        assert_eq!(
            error_of("دع ا = [١، ٢]؛ طبع(ا[١.٥])؛"),
            SemanticError::TypeMismatch {
                expected: Expectation::Integer,
                found: Type::Number
            }
        );
        assert_eq!(
            error_of("دع ا = ١؛ طبع(ا[٠])؛"),
            SemanticError::TypeMismatch {
                expected: Expectation::ArrayOrObject,
                found: Type::Int
            }
        );
    }

    #[test]
    fn test_property_access_does_not_resolve_field() {
        assert!(bind("دع ا = {اسم: ١}؛ طبع(ا.اسم)؛").is_ok());
        assert_eq!(
            error_of("دع ا = [١]؛ طبع(ا.طول)؛"),
            SemanticError::TypeMismatch {
                expected: Expectation::Object,
                found: Type::Array
            }
        );
    }

    #[test]
    fn test_duplicate_object_keys() {
        assert_eq!(
            error_of("دع ا = {١: صح، ١: خطا}؛"),
            SemanticError::DuplicateKeys {
                key: "1".to_string()
            }
        );
        assert!(bind("دع ا = {١: صح، \"1\": خطا}؛").is_ok());
    }

    #[test]
    fn test_object_literal_records_keys() {
        let bound = bind("{ا: ١، ٢: ٣}؛").unwrap();
        match &bound.program.statements[0] {
            Statement::Expr {
                expr: Expr::Object { keys, .. },
                ..
            } => assert_eq!(keys, &vec!["ا".to_string(), "2".to_string()]),
            other => panic!("expected object literal, got {:?}", other),
        }
    }

    #[test]
    fn test_class_this_and_new() {
        let source = "صنف كلب { منشئ(اسم){ اسم هذا = اسم؛ } دالة بارك(){ طبع(اسم هذا)؛ } }
                      دع خ = كلب(\"خالد\") جديد؛ خ.بارك()؛";
        let bound = bind(source).unwrap();
        assert_eq!(entity_named(&bound, "كلب").ty(), Type::Class);
        assert_eq!(entity_named(&bound, "خ").ty(), Type::Object);
    }

    #[test]
    fn test_this_outside_class() {
        assert_eq!(error_of("اسم هذا؛"), SemanticError::ThisOutsideClass);
    }

    #[test]
    fn test_new_requires_class() {
        assert_eq!(
            error_of("دالة ف(){} ف() جديد؛"),
            SemanticError::NotAClass {
                found: Type::Function
            }
        );
    }

    #[test]
    fn test_try_catch_binds_catch_variable() {
        assert!(bind("حاول { طبع(١)؛ } امسك(خطأ) { طبع(خطأ)؛ }").is_ok());
        assert_eq!(
            error_of("حاول {} امسك(خطأ) {} طبع(خطأ)؛"),
            SemanticError::NotDeclared {
                name: "خطأ".to_string()
            }
        );
    }

    #[test]
    fn test_every_expression_is_typed() {
        fn check(expr: &Expr) {
            assert!(expr.ty().is_some(), "untyped: {:?}", expr);
        }
        let bound = bind("دع ا = -(١ + ٢) * ٣ == ٩ && !خطا؛").unwrap();
        match &bound.program.statements[0] {
            Statement::VarDecInit { init, .. } => {
                check(init);
                if let Expr::Binary { left, right, .. } = init {
                    check(left);
                    check(right);
                }
            }
            other => panic!("expected declaration, got {:?}", other),
        }
    }

    #[test]
    fn test_error_span() {
        let tokens = Lexer::new("دع ا = ١؛\nقف؛").scan_tokens().unwrap();
        let program = Parser::new(tokens).parse().unwrap();
        let err = analyze(program).unwrap_err();
        assert_eq!(err.span, Span::new(2, 1));
    }
}
