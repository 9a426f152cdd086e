use crate::compiler::entity::{Entities, EntityId};
use crate::compiler::lexer::Span;
use crate::compiler::types::Type;

/// A complete program: a flat list of statements.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub statements: Vec<Statement>,
}

/// A program after binding: the annotated tree plus the entities it refers to.
#[derive(Debug, Clone)]
pub struct BoundProgram {
    pub program: Program,
    pub entities: Entities,
}

/// A block of statements.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub statements: Vec<Statement>,
    pub span: Span,
}

/// A name introduced by a declaration site.
#[derive(Debug, Clone, PartialEq)]
pub struct Binding {
    pub name: String,
    pub span: Span,
    /// The declared entity (set by the analyzer)
    pub entity: Option<EntityId>,
}

impl Binding {
    pub fn new(name: impl Into<String>, span: Span) -> Self {
        Self {
            name: name.into(),
            span,
            entity: None,
        }
    }
}

/// One `name = init` entry of a multi-declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct Declarator {
    pub binding: Binding,
    /// `None` when the source wrote only the name; it stands for `undefined`.
    pub init: Option<Expr>,
}

/// A function declaration. Inside a class body it is a method.
#[derive(Debug, Clone, PartialEq)]
pub struct FnDecl {
    pub binding: Binding,
    /// Bare identifiers; the analyzer turns each into a fresh variable.
    pub params: Vec<Expr>,
    pub body: Block,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Constructor {
    pub params: Vec<Expr>,
    pub body: Block,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClassDef {
    pub binding: Binding,
    pub constructor: Option<Constructor>,
    pub body: Block,
    pub span: Span,
}

/// One `if` / `else if` arm.
#[derive(Debug, Clone, PartialEq)]
pub struct IfCase {
    pub condition: Expr,
    pub body: Block,
    pub span: Span,
}

/// The `(let i = init; condition; step)` header of a classic for loop.
#[derive(Debug, Clone, PartialEq)]
pub struct ForHeader {
    pub binding: Binding,
    pub init: Expr,
    pub condition: Expr,
    pub step: Expr,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SwitchCase {
    pub test: Expr,
    pub body: Block,
    pub span: Span,
}

/// Statements in the language.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    VarDecInit {
        binding: Binding,
        constant: bool,
        init: Expr,
        span: Span,
    },
    VarDec {
        binding: Binding,
        constant: bool,
        span: Span,
    },
    MultiDec {
        constant: bool,
        declarators: Vec<Declarator>,
        span: Span,
    },
    Assign {
        target: Expr,
        value: Expr,
        span: Span,
    },
    TryCatch {
        try_block: Block,
        catch_binding: Binding,
        catch_block: Block,
        span: Span,
    },
    Class(ClassDef),
    FnDecl(FnDecl),
    If {
        cases: Vec<IfCase>,
        else_block: Option<Block>,
        span: Span,
    },
    While {
        condition: Expr,
        body: Block,
        span: Span,
    },
    For {
        header: ForHeader,
        body: Block,
        span: Span,
    },
    ForOf {
        binding: Binding,
        iterable: Expr,
        body: Block,
        span: Span,
    },
    /// `default` is kept apart from the cases; its source position is irrelevant.
    Switch {
        selector: Expr,
        cases: Vec<SwitchCase>,
        default: Option<Block>,
        span: Span,
    },
    Return {
        value: Expr,
        span: Span,
    },
    ShortReturn {
        span: Span,
    },
    Print {
        argument: Expr,
        span: Span,
    },
    Break {
        span: Span,
    },
    Continue {
        span: Span,
    },
    Expr {
        expr: Expr,
        span: Span,
    },
}

impl Statement {
    pub fn span(&self) -> Span {
        match self {
            Statement::Class(class) => class.span,
            Statement::FnDecl(func) => func.span,
            Statement::VarDecInit { span, .. }
            | Statement::VarDec { span, .. }
            | Statement::MultiDec { span, .. }
            | Statement::Assign { span, .. }
            | Statement::TryCatch { span, .. }
            | Statement::If { span, .. }
            | Statement::While { span, .. }
            | Statement::For { span, .. }
            | Statement::ForOf { span, .. }
            | Statement::Switch { span, .. }
            | Statement::Return { span, .. }
            | Statement::ShortReturn { span }
            | Statement::Print { span, .. }
            | Statement::Break { span }
            | Statement::Continue { span }
            | Statement::Expr { span, .. } => *span,
        }
    }
}

/// A `key: value` entry of an object literal.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjPair {
    pub key: Expr,
    pub value: Expr,
    pub span: Span,
}

/// Expressions in the language.
///
/// Every variant carries `ty`, which the analyzer fills in. Literal leaves
/// receive their tag there too, so no literal type is implied anywhere else.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Bool {
        value: bool,
        span: Span,
        ty: Option<Type>,
    },
    /// A literal with a fractional part.
    Number {
        value: f64,
        span: Span,
        ty: Option<Type>,
    },
    /// An integer literal, kept as its decimal digits so no precision is lost.
    BigInt {
        value: String,
        span: Span,
        ty: Option<Type>,
    },
    Str {
        value: String,
        span: Span,
        ty: Option<Type>,
    },
    Null {
        span: Span,
        ty: Option<Type>,
    },
    Undefined {
        span: Span,
        ty: Option<Type>,
    },
    Ident {
        name: String,
        span: Span,
        /// Resolved entity; stays `None` for field names after `.` and `هذا`
        entity: Option<EntityId>,
        ty: Option<Type>,
    },
    Call {
        callee: Box<Expr>,
        args: Vec<Expr>,
        span: Span,
        ty: Option<Type>,
    },
    /// `field هذا`, i.e. `this.field`
    This {
        field: Box<Expr>,
        span: Span,
        ty: Option<Type>,
    },
    /// `Class(args) جديد`
    New {
        class: Box<Expr>,
        args: Vec<Expr>,
        span: Span,
        ty: Option<Type>,
    },
    TypeOf {
        argument: Box<Expr>,
        span: Span,
        ty: Option<Type>,
    },
    Ternary {
        condition: Box<Expr>,
        then_expr: Box<Expr>,
        else_expr: Box<Expr>,
        span: Span,
        ty: Option<Type>,
    },
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
        span: Span,
        ty: Option<Type>,
    },
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
        prefix: bool,
        span: Span,
        ty: Option<Type>,
    },
    Array {
        elements: Vec<Expr>,
        span: Span,
        ty: Option<Type>,
    },
    Object {
        pairs: Vec<ObjPair>,
        /// Canonical key texts in source order (set by the analyzer)
        keys: Vec<String>,
        span: Span,
        ty: Option<Type>,
    },
    /// `object[index]`
    Member {
        object: Box<Expr>,
        index: Box<Expr>,
        span: Span,
        ty: Option<Type>,
    },
    /// `object.field`
    Property {
        object: Box<Expr>,
        field: Box<Expr>,
        span: Span,
        ty: Option<Type>,
    },
}

impl Expr {
    pub fn ident(name: impl Into<String>, span: Span) -> Self {
        Expr::Ident {
            name: name.into(),
            span,
            entity: None,
            ty: None,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            Expr::Bool { span, .. }
            | Expr::Number { span, .. }
            | Expr::BigInt { span, .. }
            | Expr::Str { span, .. }
            | Expr::Null { span, .. }
            | Expr::Undefined { span, .. }
            | Expr::Ident { span, .. }
            | Expr::Call { span, .. }
            | Expr::This { span, .. }
            | Expr::New { span, .. }
            | Expr::TypeOf { span, .. }
            | Expr::Ternary { span, .. }
            | Expr::Binary { span, .. }
            | Expr::Unary { span, .. }
            | Expr::Array { span, .. }
            | Expr::Object { span, .. }
            | Expr::Member { span, .. }
            | Expr::Property { span, .. } => *span,
        }
    }

    /// The type tag attached by the analyzer.
    pub fn ty(&self) -> Option<Type> {
        match self {
            Expr::Bool { ty, .. }
            | Expr::Number { ty, .. }
            | Expr::BigInt { ty, .. }
            | Expr::Str { ty, .. }
            | Expr::Null { ty, .. }
            | Expr::Undefined { ty, .. }
            | Expr::Ident { ty, .. }
            | Expr::Call { ty, .. }
            | Expr::This { ty, .. }
            | Expr::New { ty, .. }
            | Expr::TypeOf { ty, .. }
            | Expr::Ternary { ty, .. }
            | Expr::Binary { ty, .. }
            | Expr::Unary { ty, .. }
            | Expr::Array { ty, .. }
            | Expr::Object { ty, .. }
            | Expr::Member { ty, .. }
            | Expr::Property { ty, .. } => *ty,
        }
    }

    pub fn set_ty(&mut self, new_ty: Type) {
        match self {
            Expr::Bool { ty, .. }
            | Expr::Number { ty, .. }
            | Expr::BigInt { ty, .. }
            | Expr::Str { ty, .. }
            | Expr::Null { ty, .. }
            | Expr::Undefined { ty, .. }
            | Expr::Ident { ty, .. }
            | Expr::Call { ty, .. }
            | Expr::This { ty, .. }
            | Expr::New { ty, .. }
            | Expr::TypeOf { ty, .. }
            | Expr::Ternary { ty, .. }
            | Expr::Binary { ty, .. }
            | Expr::Unary { ty, .. }
            | Expr::Array { ty, .. }
            | Expr::Object { ty, .. }
            | Expr::Member { ty, .. }
            | Expr::Property { ty, .. } => *ty = Some(new_ty),
        }
    }

    /// Canonical text of an object key, used to detect duplicates.
    ///
    /// Literals compare by value (so `"1"` and `1` differ), identifiers by
    /// name; any other key expression is compared by its span.
    pub fn key_text(&self) -> String {
        match self {
            Expr::BigInt { value, .. } => value.clone(),
            Expr::Number { value, .. } => value.to_string(),
            Expr::Str { value, .. } => format!("{:?}", value),
            Expr::Bool { value, .. } => value.to_string(),
            Expr::Null { .. } => "null".to_string(),
            Expr::Undefined { .. } => "undefined".to_string(),
            Expr::Ident { name, .. } => name.clone(),
            other => {
                let span = other.span();
                format!("<expr@{}:{}>", span.line, span.column)
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Pow,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    And,
    Or,
    AddAssign,
    SubAssign,
}

impl BinaryOp {
    /// Source spelling of the operator.
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Mod => "%",
            BinaryOp::Pow => "**",
            BinaryOp::Eq => "==",
            BinaryOp::Ne => "!=",
            BinaryOp::Lt => "<",
            BinaryOp::Le => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::Ge => ">=",
            BinaryOp::And => "&&",
            BinaryOp::Or => "||",
            BinaryOp::AddAssign => "+=",
            BinaryOp::SubAssign => "-=",
        }
    }

    pub fn is_compound_assignment(self) -> bool {
        matches!(self, BinaryOp::AddAssign | BinaryOp::SubAssign)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Neg,
    Not,
    Increment,
    Decrement,
}

impl UnaryOp {
    pub fn symbol(self) -> &'static str {
        match self {
            UnaryOp::Neg => "-",
            UnaryOp::Not => "!",
            UnaryOp::Increment => "++",
            UnaryOp::Decrement => "--",
        }
    }
}
