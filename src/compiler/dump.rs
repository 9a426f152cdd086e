//! Pretty-printer for the syntax tree and the bound program.
//!
//! Used by `--emit ast` and `--emit analyzed` to inspect the pipeline.

use crate::compiler::ast::{
    Binding, Block, BoundProgram, ClassDef, Expr, FnDecl, Program, Statement,
};
use crate::compiler::entity::Entities;

/// A rendered tree node.
struct Node {
    label: String,
    children: Vec<Node>,
}

impl Node {
    fn leaf(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            children: Vec::new(),
        }
    }

    fn new(label: impl Into<String>, children: Vec<Node>) -> Self {
        Self {
            label: label.into(),
            children,
        }
    }

    /// Prepends `prefix` to the label, e.g. `condition: `.
    fn labeled(mut self, prefix: &str) -> Self {
        self.label = format!("{}{}", prefix, self.label);
        self
    }
}

/// Formats the syntax tree as it came out of the parser.
pub fn format_ast(program: &Program) -> String {
    let printer = TreePrinter { entities: None };
    printer.render(program)
}

/// Formats the bound tree with its type tags and entities, followed by the
/// entity table.
pub fn format_bound(bound: &BoundProgram) -> String {
    let printer = TreePrinter {
        entities: Some(&bound.entities),
    };
    let mut output = printer.render(&bound.program);

    output.push_str("\nEntities\n");
    for (id, entity) in bound.entities.iter() {
        output.push_str(&format!("  {} {}\n", id, entity));
    }
    output
}

struct TreePrinter<'a> {
    entities: Option<&'a Entities>,
}

impl TreePrinter<'_> {
    fn render(&self, program: &Program) -> String {
        let mut output = String::from("Program\n");
        let nodes: Vec<Node> = program.statements.iter().map(|s| self.statement(s)).collect();
        write_children(&mut output, &nodes, "");
        output
    }

    fn block(&self, label: &str, block: &Block) -> Node {
        Node::new(
            label,
            block.statements.iter().map(|s| self.statement(s)).collect(),
        )
    }

    fn binding(&self, binding: &Binding) -> String {
        match (self.entities, binding.entity) {
            (Some(entities), Some(id)) => {
                format!("{} ({} {})", binding.name, id, entities.get(id))
            }
            _ => binding.name.clone(),
        }
    }

    fn statement(&self, stmt: &Statement) -> Node {
        match stmt {
            Statement::VarDecInit {
                binding,
                constant,
                init,
                ..
            } => Node::new(
                format!("{}: {}", declaration_kind(*constant), self.binding(binding)),
                vec![self.expr(init)],
            ),
            Statement::VarDec {
                binding, constant, ..
            } => Node::leaf(format!(
                "{}: {}",
                declaration_kind(*constant),
                self.binding(binding)
            )),
            Statement::MultiDec {
                constant,
                declarators,
                ..
            } => {
                let children = declarators
                    .iter()
                    .map(|d| {
                        let name = self.binding(&d.binding);
                        match &d.init {
                            Some(init) => Node::new(name, vec![self.expr(init)]),
                            None => Node::leaf(name),
                        }
                    })
                    .collect();
                Node::new(format!("Multi{}", declaration_kind(*constant)), children)
            }
            Statement::Assign { target, value, .. } => Node::new(
                "Assign",
                vec![
                    self.expr(target).labeled("target: "),
                    self.expr(value).labeled("value: "),
                ],
            ),
            Statement::TryCatch {
                try_block,
                catch_binding,
                catch_block,
                ..
            } => Node::new(
                "TryCatch",
                vec![
                    self.block("try", try_block),
                    self.block(&format!("catch {}", self.binding(catch_binding)), catch_block),
                ],
            ),
            Statement::Class(class) => self.class_def(class),
            Statement::FnDecl(func) => self.fn_decl("FnDecl", func),
            Statement::If {
                cases, else_block, ..
            } => {
                let mut children: Vec<Node> = cases
                    .iter()
                    .map(|case| {
                        Node::new(
                            "case",
                            vec![
                                self.expr(&case.condition).labeled("condition: "),
                                self.block("then", &case.body),
                            ],
                        )
                    })
                    .collect();
                if let Some(block) = else_block {
                    children.push(self.block("else", block));
                }
                Node::new("If", children)
            }
            Statement::While {
                condition, body, ..
            } => Node::new(
                "While",
                vec![
                    self.expr(condition).labeled("condition: "),
                    self.block("body", body),
                ],
            ),
            Statement::For { header, body, .. } => Node::new(
                format!("For: {}", self.binding(&header.binding)),
                vec![
                    self.expr(&header.init).labeled("init: "),
                    self.expr(&header.condition).labeled("condition: "),
                    self.expr(&header.step).labeled("step: "),
                    self.block("body", body),
                ],
            ),
            Statement::ForOf {
                binding,
                iterable,
                body,
                ..
            } => Node::new(
                format!("ForOf: {}", self.binding(binding)),
                vec![
                    self.expr(iterable).labeled("iterable: "),
                    self.block("body", body),
                ],
            ),
            Statement::Switch {
                selector,
                cases,
                default,
                ..
            } => {
                let mut children = vec![self.expr(selector).labeled("selector: ")];
                for case in cases {
                    children.push(Node::new(
                        "case",
                        vec![
                            self.expr(&case.test).labeled("test: "),
                            self.block("body", &case.body),
                        ],
                    ));
                }
                if let Some(block) = default {
                    children.push(self.block("default", block));
                }
                Node::new("Switch", children)
            }
            Statement::Return { value, .. } => Node::new("Return", vec![self.expr(value)]),
            Statement::ShortReturn { .. } => Node::leaf("Return"),
            Statement::Print { argument, .. } => Node::new("Print", vec![self.expr(argument)]),
            Statement::Break { .. } => Node::leaf("Break"),
            Statement::Continue { .. } => Node::leaf("Continue"),
            Statement::Expr { expr, .. } => Node::new("ExprStmt", vec![self.expr(expr)]),
        }
    }

    fn fn_decl(&self, kind: &str, func: &FnDecl) -> Node {
        Node::new(
            format!("{}: {}", kind, self.binding(&func.binding)),
            vec![
                self.params(&func.params),
                self.block("body", &func.body),
            ],
        )
    }

    fn class_def(&self, class: &ClassDef) -> Node {
        let mut children = Vec::new();
        if let Some(constructor) = &class.constructor {
            children.push(Node::new(
                "Constructor",
                vec![
                    self.params(&constructor.params),
                    self.block("body", &constructor.body),
                ],
            ));
        }
        for stmt in &class.body.statements {
            match stmt {
                Statement::FnDecl(method) => children.push(self.fn_decl("Method", method)),
                other => children.push(self.statement(other)),
            }
        }
        Node::new(format!("Class: {}", self.binding(&class.binding)), children)
    }

    fn params(&self, params: &[Expr]) -> Node {
        Node::new("params", params.iter().map(|p| self.expr(p)).collect())
    }

    fn typed(&self, label: String, expr: &Expr) -> String {
        match (self.entities, expr.ty()) {
            (Some(_), Some(ty)) => format!("{}: {}", label, ty),
            _ => label,
        }
    }

    fn expr(&self, expr: &Expr) -> Node {
        let (label, children) = match expr {
            Expr::Bool { value, .. } => (format!("Bool({})", value), Vec::new()),
            Expr::Number { value, .. } => (format!("Number({})", value), Vec::new()),
            Expr::BigInt { value, .. } => (format!("Int({})", value), Vec::new()),
            Expr::Str { value, .. } => (format!("Str({:?})", value), Vec::new()),
            Expr::Null { .. } => ("Null".to_string(), Vec::new()),
            Expr::Undefined { .. } => ("Undefined".to_string(), Vec::new()),
            Expr::Ident { name, entity, .. } => {
                let label = match entity {
                    Some(id) if self.entities.is_some() => format!("Ident({} {})", name, id),
                    _ => format!("Ident({})", name),
                };
                (label, Vec::new())
            }
            Expr::Call { callee, args, .. } => (
                "Call".to_string(),
                vec![
                    self.expr(callee).labeled("callee: "),
                    Node::new("args", args.iter().map(|a| self.expr(a)).collect()),
                ],
            ),
            Expr::This { field, .. } => ("This".to_string(), vec![self.expr(field)]),
            Expr::New { class, args, .. } => (
                "New".to_string(),
                vec![
                    self.expr(class).labeled("class: "),
                    Node::new("args", args.iter().map(|a| self.expr(a)).collect()),
                ],
            ),
            Expr::TypeOf { argument, .. } => ("TypeOf".to_string(), vec![self.expr(argument)]),
            Expr::Ternary {
                condition,
                then_expr,
                else_expr,
                ..
            } => (
                "Ternary".to_string(),
                vec![
                    self.expr(condition).labeled("condition: "),
                    self.expr(then_expr).labeled("then: "),
                    self.expr(else_expr).labeled("else: "),
                ],
            ),
            Expr::Binary {
                op, left, right, ..
            } => (
                format!("Binary({})", op.symbol()),
                vec![self.expr(left), self.expr(right)],
            ),
            Expr::Unary {
                op,
                operand,
                prefix,
                ..
            } => {
                let fixity = if *prefix { "prefix" } else { "postfix" };
                (
                    format!("Unary({} {})", fixity, op.symbol()),
                    vec![self.expr(operand)],
                )
            }
            Expr::Array { elements, .. } => (
                "Array".to_string(),
                elements.iter().map(|e| self.expr(e)).collect(),
            ),
            Expr::Object { pairs, .. } => (
                "Object".to_string(),
                pairs
                    .iter()
                    .map(|pair| {
                        Node::new(
                            "pair",
                            vec![
                                self.expr(&pair.key).labeled("key: "),
                                self.expr(&pair.value).labeled("value: "),
                            ],
                        )
                    })
                    .collect(),
            ),
            Expr::Member { object, index, .. } => (
                "Member".to_string(),
                vec![
                    self.expr(object).labeled("object: "),
                    self.expr(index).labeled("index: "),
                ],
            ),
            Expr::Property { object, field, .. } => (
                "Property".to_string(),
                vec![
                    self.expr(object).labeled("object: "),
                    self.expr(field).labeled("field: "),
                ],
            ),
        };
        Node::new(self.typed(label, expr), children)
    }
}

fn declaration_kind(constant: bool) -> &'static str {
    if constant { "Const" } else { "Let" }
}

fn write_children(output: &mut String, nodes: &[Node], indent: &str) {
    for (i, node) in nodes.iter().enumerate() {
        let is_last = i == nodes.len() - 1;
        let prefix = if is_last { "└── " } else { "├── " };
        let child_indent = if is_last { "    " } else { "│   " };

        output.push_str(indent);
        output.push_str(prefix);
        output.push_str(&node.label);
        output.push('\n');

        write_children(output, &node.children, &format!("{}{}", indent, child_indent));
    }
}
