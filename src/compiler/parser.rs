use crate::compiler::ast::*;
use crate::compiler::error::SyntaxError;
use crate::compiler::lexer::{Span, Token, TokenKind};

/// A recursive descent parser for arabscript.
pub struct Parser {
    tokens: Vec<Token>,
    current: usize,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, current: 0 }
    }

    pub fn parse(&mut self) -> Result<Program, SyntaxError> {
        let mut statements = Vec::new();

        while !self.is_at_end() {
            statements.push(self.statement()?);
        }

        Ok(Program { statements })
    }

    fn block(&mut self) -> Result<Block, SyntaxError> {
        let span = self.current_span();
        self.expect(&TokenKind::LBrace)?;

        let mut statements = Vec::new();
        while !self.check(&TokenKind::RBrace) && !self.is_at_end() {
            statements.push(self.statement()?);
        }

        self.expect(&TokenKind::RBrace)?;

        Ok(Block { statements, span })
    }

    fn statement(&mut self) -> Result<Statement, SyntaxError> {
        match self.peek_kind() {
            Some(TokenKind::Let) | Some(TokenKind::Const) => self.declaration(),
            Some(TokenKind::If) => self.if_stmt(),
            Some(TokenKind::While) => self.while_stmt(),
            Some(TokenKind::For) => self.for_stmt(),
            Some(TokenKind::Switch) => self.switch_stmt(),
            Some(TokenKind::Function) => Ok(Statement::FnDecl(self.fn_decl()?)),
            Some(TokenKind::Class) => self.class_def(),
            Some(TokenKind::Try) => self.try_stmt(),
            Some(TokenKind::Return) => self.return_stmt(),
            Some(TokenKind::Print) => self.print_stmt(),
            Some(TokenKind::Break) => {
                let span = self.current_span();
                self.advance();
                self.expect(&TokenKind::Semi)?;
                Ok(Statement::Break { span })
            }
            Some(TokenKind::Continue) => {
                let span = self.current_span();
                self.advance();
                self.expect(&TokenKind::Semi)?;
                Ok(Statement::Continue { span })
            }
            _ => self.expr_or_assign_stmt(),
        }
    }

    /// `دع x = e؛`, `دع x؛` or `دع a، b = e، …؛`
    fn declaration(&mut self) -> Result<Statement, SyntaxError> {
        let span = self.current_span();
        let constant = self.check(&TokenKind::Const);
        self.advance();

        let mut declarators = vec![self.declarator()?];
        while self.match_token(&TokenKind::Comma) {
            declarators.push(self.declarator()?);
        }
        self.expect(&TokenKind::Semi)?;

        if declarators.len() > 1 {
            return Ok(Statement::MultiDec {
                constant,
                declarators,
                span,
            });
        }

        let Some(Declarator { binding, init }) = declarators.pop() else {
            return Err(SyntaxError::new("expected a declaration", span));
        };
        Ok(match init {
            Some(init) => Statement::VarDecInit {
                binding,
                constant,
                init,
                span,
            },
            None => Statement::VarDec {
                binding,
                constant,
                span,
            },
        })
    }

    fn declarator(&mut self) -> Result<Declarator, SyntaxError> {
        let binding = self.binding()?;
        let init = if self.match_token(&TokenKind::Eq) {
            Some(self.expression()?)
        } else {
            None
        };
        Ok(Declarator { binding, init })
    }

    fn if_stmt(&mut self) -> Result<Statement, SyntaxError> {
        let span = self.current_span();
        self.expect(&TokenKind::If)?;

        let mut cases = vec![self.if_case(span)?];
        while self.check(&TokenKind::ElseIf) {
            let case_span = self.current_span();
            self.advance();
            cases.push(self.if_case(case_span)?);
        }

        let else_block = if self.match_token(&TokenKind::Else) {
            Some(self.block()?)
        } else {
            None
        };

        Ok(Statement::If {
            cases,
            else_block,
            span,
        })
    }

    fn if_case(&mut self, span: Span) -> Result<IfCase, SyntaxError> {
        let condition = self.parenthesized()?;
        let body = self.block()?;
        Ok(IfCase {
            condition,
            body,
            span,
        })
    }

    fn while_stmt(&mut self) -> Result<Statement, SyntaxError> {
        let span = self.current_span();
        self.expect(&TokenKind::While)?;

        let condition = self.parenthesized()?;
        let body = self.block()?;

        Ok(Statement::While {
            condition,
            body,
            span,
        })
    }

    /// `ل(دع i = e؛ c؛ step){…}` or `ل(item iterable){…}`
    fn for_stmt(&mut self) -> Result<Statement, SyntaxError> {
        let span = self.current_span();
        self.expect(&TokenKind::For)?;
        self.expect(&TokenKind::LParen)?;

        if self.match_token(&TokenKind::Let) {
            let binding = self.binding()?;
            self.expect(&TokenKind::Eq)?;
            let init = self.expression()?;
            self.expect(&TokenKind::Semi)?;
            let condition = self.expression()?;
            self.expect(&TokenKind::Semi)?;
            let step = self.expression()?;
            self.expect(&TokenKind::RParen)?;
            let body = self.block()?;

            return Ok(Statement::For {
                header: ForHeader {
                    binding,
                    init,
                    condition,
                    step,
                },
                body,
                span,
            });
        }

        let binding = self.binding()?;
        let iterable = self.expression()?;
        self.expect(&TokenKind::RParen)?;
        let body = self.block()?;

        Ok(Statement::ForOf {
            binding,
            iterable,
            body,
            span,
        })
    }

    fn switch_stmt(&mut self) -> Result<Statement, SyntaxError> {
        let span = self.current_span();
        self.expect(&TokenKind::Switch)?;

        let selector = self.parenthesized()?;
        self.expect(&TokenKind::LBrace)?;

        let mut cases = Vec::new();
        let mut default = None;
        while !self.check(&TokenKind::RBrace) && !self.is_at_end() {
            let case_span = self.current_span();
            if self.match_token(&TokenKind::Case) {
                let test = self.expression()?;
                self.expect(&TokenKind::Colon)?;
                let body = self.case_body(case_span)?;
                cases.push(SwitchCase {
                    test,
                    body,
                    span: case_span,
                });
            } else if self.match_token(&TokenKind::Default) {
                if default.is_some() {
                    return Err(SyntaxError::new(
                        "switch has more than one default",
                        case_span,
                    ));
                }
                self.expect(&TokenKind::Colon)?;
                default = Some(self.case_body(case_span)?);
            } else {
                return Err(self.error("expected 'حالة' or 'خلاف ذلك'"));
            }
        }
        self.expect(&TokenKind::RBrace)?;

        Ok(Statement::Switch {
            selector,
            cases,
            default,
            span,
        })
    }

    /// Statements up to the next case label or the end of the switch.
    fn case_body(&mut self, span: Span) -> Result<Block, SyntaxError> {
        let mut statements = Vec::new();
        while !matches!(
            self.peek_kind(),
            Some(TokenKind::Case | TokenKind::Default | TokenKind::RBrace | TokenKind::Eof) | None
        ) {
            statements.push(self.statement()?);
        }
        Ok(Block { statements, span })
    }

    fn fn_decl(&mut self) -> Result<FnDecl, SyntaxError> {
        let span = self.current_span();
        self.expect(&TokenKind::Function)?;

        let binding = self.binding()?;
        let params = self.params()?;
        let body = self.block()?;

        Ok(FnDecl {
            binding,
            params,
            body,
            span,
        })
    }

    fn params(&mut self) -> Result<Vec<Expr>, SyntaxError> {
        self.expect(&TokenKind::LParen)?;

        let mut params = Vec::new();
        if !self.check(&TokenKind::RParen) {
            params.push(self.param()?);
            while self.match_token(&TokenKind::Comma) {
                params.push(self.param()?);
            }
        }
        self.expect(&TokenKind::RParen)?;

        Ok(params)
    }

    fn param(&mut self) -> Result<Expr, SyntaxError> {
        let span = self.current_span();
        let name = self.expect_ident()?;
        Ok(Expr::ident(name, span))
    }

    /// `صنف C { منشئ(…){…} دالة m(…){…} … }`
    fn class_def(&mut self) -> Result<Statement, SyntaxError> {
        let span = self.current_span();
        self.expect(&TokenKind::Class)?;

        let binding = self.binding()?;
        let body_span = self.current_span();
        self.expect(&TokenKind::LBrace)?;

        let mut constructor = None;
        let mut methods = Vec::new();
        while !self.check(&TokenKind::RBrace) && !self.is_at_end() {
            let member_span = self.current_span();
            if self.match_token(&TokenKind::Constructor) {
                if constructor.is_some() {
                    return Err(SyntaxError::new(
                        "class has more than one constructor",
                        member_span,
                    ));
                }
                let params = self.params()?;
                let body = self.block()?;
                constructor = Some(Constructor {
                    params,
                    body,
                    span: member_span,
                });
            } else if self.check(&TokenKind::Function) {
                methods.push(Statement::FnDecl(self.fn_decl()?));
            } else {
                return Err(self.error("expected 'منشئ' or 'دالة' in class body"));
            }
        }
        self.expect(&TokenKind::RBrace)?;

        Ok(Statement::Class(ClassDef {
            binding,
            constructor,
            body: Block {
                statements: methods,
                span: body_span,
            },
            span,
        }))
    }

    fn try_stmt(&mut self) -> Result<Statement, SyntaxError> {
        let span = self.current_span();
        self.expect(&TokenKind::Try)?;

        let try_block = self.block()?;
        self.expect(&TokenKind::Catch)?;
        self.expect(&TokenKind::LParen)?;
        let catch_binding = self.binding()?;
        self.expect(&TokenKind::RParen)?;
        let catch_block = self.block()?;

        Ok(Statement::TryCatch {
            try_block,
            catch_binding,
            catch_block,
            span,
        })
    }

    fn return_stmt(&mut self) -> Result<Statement, SyntaxError> {
        let span = self.current_span();
        self.expect(&TokenKind::Return)?;

        if self.match_token(&TokenKind::Semi) {
            return Ok(Statement::ShortReturn { span });
        }

        let value = self.expression()?;
        self.expect(&TokenKind::Semi)?;

        Ok(Statement::Return { value, span })
    }

    fn print_stmt(&mut self) -> Result<Statement, SyntaxError> {
        let span = self.current_span();
        self.expect(&TokenKind::Print)?;

        let argument = self.parenthesized()?;
        self.expect(&TokenKind::Semi)?;

        Ok(Statement::Print { argument, span })
    }

    fn expr_or_assign_stmt(&mut self) -> Result<Statement, SyntaxError> {
        let span = self.current_span();
        let expr = self.expression()?;

        if self.match_token(&TokenKind::Eq) {
            self.check_assignable(&expr, "invalid assignment target")?;
            let value = self.expression()?;
            self.expect(&TokenKind::Semi)?;
            return Ok(Statement::Assign {
                target: expr,
                value,
                span,
            });
        }

        self.expect(&TokenKind::Semi)?;
        Ok(Statement::Expr { expr, span })
    }

    // Expression parsing with precedence climbing

    fn expression(&mut self) -> Result<Expr, SyntaxError> {
        let left = self.ternary()?;

        let op = if self.match_token(&TokenKind::PlusEq) {
            BinaryOp::AddAssign
        } else if self.match_token(&TokenKind::MinusEq) {
            BinaryOp::SubAssign
        } else {
            return Ok(left);
        };

        self.check_assignable(&left, "invalid compound assignment target")?;
        let span = left.span();
        let right = self.expression()?;
        Ok(binary(op, left, right, span))
    }

    fn ternary(&mut self) -> Result<Expr, SyntaxError> {
        let condition = self.logic_expr()?;

        if !self.match_token(&TokenKind::Question) {
            return Ok(condition);
        }

        let span = condition.span();
        let then_expr = self.ternary()?;
        self.expect(&TokenKind::Colon)?;
        let else_expr = self.ternary()?;

        Ok(Expr::Ternary {
            condition: Box::new(condition),
            then_expr: Box::new(then_expr),
            else_expr: Box::new(else_expr),
            span,
            ty: None,
        })
    }

    fn logic_expr(&mut self) -> Result<Expr, SyntaxError> {
        let mut left = self.relational_expr()?;

        loop {
            let op = if self.match_token(&TokenKind::AndAnd) {
                BinaryOp::And
            } else if self.match_token(&TokenKind::OrOr) {
                BinaryOp::Or
            } else {
                break;
            };

            let span = left.span();
            let right = self.relational_expr()?;
            left = binary(op, left, right, span);
        }

        Ok(left)
    }

    fn relational_expr(&mut self) -> Result<Expr, SyntaxError> {
        let mut left = self.add_expr()?;

        loop {
            let op = match self.peek_kind() {
                Some(TokenKind::EqEq) => BinaryOp::Eq,
                Some(TokenKind::NotEq) => BinaryOp::Ne,
                Some(TokenKind::Lt) => BinaryOp::Lt,
                Some(TokenKind::Le) => BinaryOp::Le,
                Some(TokenKind::Gt) => BinaryOp::Gt,
                Some(TokenKind::Ge) => BinaryOp::Ge,
                _ => break,
            };
            self.advance();

            let span = left.span();
            let right = self.add_expr()?;
            left = binary(op, left, right, span);
        }

        Ok(left)
    }

    fn add_expr(&mut self) -> Result<Expr, SyntaxError> {
        let mut left = self.mul_expr()?;

        loop {
            let op = if self.match_token(&TokenKind::Plus) {
                BinaryOp::Add
            } else if self.match_token(&TokenKind::Minus) {
                BinaryOp::Sub
            } else {
                break;
            };

            let span = left.span();
            let right = self.mul_expr()?;
            left = binary(op, left, right, span);
        }

        Ok(left)
    }

    fn mul_expr(&mut self) -> Result<Expr, SyntaxError> {
        let mut left = self.unary_expr()?;

        loop {
            let op = if self.match_token(&TokenKind::Star) {
                BinaryOp::Mul
            } else if self.match_token(&TokenKind::Slash) {
                BinaryOp::Div
            } else if self.match_token(&TokenKind::Percent) {
                BinaryOp::Mod
            } else {
                break;
            };

            let span = left.span();
            let right = self.unary_expr()?;
            left = binary(op, left, right, span);
        }

        Ok(left)
    }

    fn unary_expr(&mut self) -> Result<Expr, SyntaxError> {
        let span = self.current_span();

        if self.match_token(&TokenKind::TypeOf) {
            let argument = self.unary_expr()?;
            return Ok(Expr::TypeOf {
                argument: Box::new(argument),
                span,
                ty: None,
            });
        }

        let op = match self.peek_kind() {
            Some(TokenKind::Minus) => UnaryOp::Neg,
            Some(TokenKind::Bang) => UnaryOp::Not,
            Some(TokenKind::PlusPlus) => UnaryOp::Increment,
            Some(TokenKind::MinusMinus) => UnaryOp::Decrement,
            _ => return self.pow_expr(),
        };
        self.advance();

        let operand = self.unary_expr()?;
        if matches!(op, UnaryOp::Increment | UnaryOp::Decrement) {
            self.check_assignable(&operand, "invalid increment target")?;
        }

        Ok(Expr::Unary {
            op,
            operand: Box::new(operand),
            prefix: true,
            span,
            ty: None,
        })
    }

    fn pow_expr(&mut self) -> Result<Expr, SyntaxError> {
        let base = self.postfix_expr()?;

        if !self.match_token(&TokenKind::StarStar) {
            return Ok(base);
        }

        let span = base.span();
        // Right-associative: the exponent may itself be a power.
        let exponent = self.unary_expr()?;
        Ok(binary(BinaryOp::Pow, base, exponent, span))
    }

    fn postfix_expr(&mut self) -> Result<Expr, SyntaxError> {
        let mut expr = self.primary()?;

        loop {
            let span = expr.span();

            if self.match_token(&TokenKind::LParen) {
                let args = self.arguments(&TokenKind::RParen)?;
                expr = Expr::Call {
                    callee: Box::new(expr),
                    args,
                    span,
                    ty: None,
                };
            } else if self.match_token(&TokenKind::Dot) {
                if self.match_token(&TokenKind::This) {
                    expr = self.this_access(expr)?;
                } else {
                    let field = self.param()?;
                    expr = Expr::Property {
                        object: Box::new(expr),
                        field: Box::new(field),
                        span,
                        ty: None,
                    };
                }
            } else if self.match_token(&TokenKind::LBracket) {
                let index = self.expression()?;
                self.expect(&TokenKind::RBracket)?;
                expr = Expr::Member {
                    object: Box::new(expr),
                    index: Box::new(index),
                    span,
                    ty: None,
                };
            } else if self.match_token(&TokenKind::This) {
                expr = self.this_access(expr)?;
            } else if self.check(&TokenKind::New) {
                let Expr::Call { callee, args, .. } = expr else {
                    return Err(self.error("'جديد' must follow a constructor call"));
                };
                self.advance();
                expr = Expr::New {
                    class: callee,
                    args,
                    span,
                    ty: None,
                };
            } else if self.check(&TokenKind::PlusPlus) || self.check(&TokenKind::MinusMinus) {
                let op = if self.check(&TokenKind::PlusPlus) {
                    UnaryOp::Increment
                } else {
                    UnaryOp::Decrement
                };
                self.check_assignable(&expr, "invalid increment target")?;
                self.advance();
                expr = Expr::Unary {
                    op,
                    operand: Box::new(expr),
                    prefix: false,
                    span,
                    ty: None,
                };
            } else {
                break;
            }
        }

        Ok(expr)
    }

    /// `field هذا` / `field.هذا`: the expression before `هذا` names the field.
    fn this_access(&self, field: Expr) -> Result<Expr, SyntaxError> {
        if !matches!(field, Expr::Ident { .. }) {
            return Err(SyntaxError::new(
                "expected a field name before 'هذا'",
                field.span(),
            ));
        }
        let span = field.span();
        Ok(Expr::This {
            field: Box::new(field),
            span,
            ty: None,
        })
    }

    fn primary(&mut self) -> Result<Expr, SyntaxError> {
        let span = self.current_span();

        let expr = match self.peek_kind() {
            Some(TokenKind::Int(value)) => Expr::BigInt {
                value: value.clone(),
                span,
                ty: None,
            },
            Some(TokenKind::Float(value)) => Expr::Number {
                value: *value,
                span,
                ty: None,
            },
            Some(TokenKind::Str(value)) => Expr::Str {
                value: value.clone(),
                span,
                ty: None,
            },
            Some(TokenKind::True) => Expr::Bool {
                value: true,
                span,
                ty: None,
            },
            Some(TokenKind::False) => Expr::Bool {
                value: false,
                span,
                ty: None,
            },
            Some(TokenKind::Null) => Expr::Null { span, ty: None },
            Some(TokenKind::Undefined) => Expr::Undefined { span, ty: None },
            Some(TokenKind::Ident(name)) => Expr::ident(name.clone(), span),
            Some(TokenKind::LParen) => {
                self.advance();
                let expr = self.expression()?;
                self.expect(&TokenKind::RParen)?;
                return Ok(expr);
            }
            Some(TokenKind::LBracket) => {
                self.advance();
                let elements = self.arguments(&TokenKind::RBracket)?;
                return Ok(Expr::Array {
                    elements,
                    span,
                    ty: None,
                });
            }
            Some(TokenKind::LBrace) => {
                self.advance();
                return self.object_literal(span);
            }
            _ => return Err(self.error("expected expression")),
        };

        self.advance();
        Ok(expr)
    }

    /// Comma separated expressions up to `close`, which is consumed.
    fn arguments(&mut self, close: &TokenKind) -> Result<Vec<Expr>, SyntaxError> {
        let mut args = Vec::new();

        if !self.check(close) {
            args.push(self.expression()?);
            while self.match_token(&TokenKind::Comma) {
                args.push(self.expression()?);
            }
        }
        self.expect(close)?;

        Ok(args)
    }

    fn object_literal(&mut self, span: Span) -> Result<Expr, SyntaxError> {
        let mut pairs = Vec::new();

        if !self.check(&TokenKind::RBrace) {
            pairs.push(self.object_pair()?);
            while self.match_token(&TokenKind::Comma) {
                pairs.push(self.object_pair()?);
            }
        }
        self.expect(&TokenKind::RBrace)?;

        Ok(Expr::Object {
            pairs,
            keys: Vec::new(),
            span,
            ty: None,
        })
    }

    fn object_pair(&mut self) -> Result<ObjPair, SyntaxError> {
        let span = self.current_span();
        // A key stops short of the ternary so its `:` is not taken as an else branch.
        let key = self.logic_expr()?;
        self.expect(&TokenKind::Colon)?;
        let value = self.expression()?;
        Ok(ObjPair { key, value, span })
    }

    fn parenthesized(&mut self) -> Result<Expr, SyntaxError> {
        self.expect(&TokenKind::LParen)?;
        let expr = self.expression()?;
        self.expect(&TokenKind::RParen)?;
        Ok(expr)
    }

    fn binding(&mut self) -> Result<Binding, SyntaxError> {
        let span = self.current_span();
        let name = self.expect_ident()?;
        Ok(Binding::new(name, span))
    }

    fn check_assignable(&self, target: &Expr, message: &str) -> Result<(), SyntaxError> {
        match target {
            Expr::Ident { .. } | Expr::This { .. } | Expr::Property { .. } | Expr::Member { .. } => {
                Ok(())
            }
            other => Err(SyntaxError::new(message, other.span())),
        }
    }

    // Helper methods

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.current)
    }

    fn peek_kind(&self) -> Option<&TokenKind> {
        self.peek().map(|t| &t.kind)
    }

    fn is_at_end(&self) -> bool {
        matches!(self.peek_kind(), Some(TokenKind::Eof) | None)
    }

    fn check(&self, kind: &TokenKind) -> bool {
        self.peek_kind() == Some(kind)
    }

    fn advance(&mut self) {
        if !self.is_at_end() {
            self.current += 1;
        }
    }

    fn match_token(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: &TokenKind) -> Result<(), SyntaxError> {
        if self.check(kind) {
            self.advance();
            Ok(())
        } else {
            Err(self.error(&format!("expected {}", kind)))
        }
    }

    fn expect_ident(&mut self) -> Result<String, SyntaxError> {
        if let Some(TokenKind::Ident(name)) = self.peek_kind() {
            let name = name.clone();
            self.advance();
            Ok(name)
        } else {
            Err(self.error("expected identifier"))
        }
    }

    fn current_span(&self) -> Span {
        self.peek().map(|t| t.span).unwrap_or(Span::new(1, 1))
    }

    fn error(&self, message: &str) -> SyntaxError {
        let found = self
            .peek_kind()
            .map(|kind| kind.to_string())
            .unwrap_or_else(|| "end of file".to_string());
        SyntaxError::new(format!("{}, found {}", message, found), self.current_span())
    }
}

fn binary(op: BinaryOp, left: Expr, right: Expr, span: Span) -> Expr {
    Expr::Binary {
        op,
        left: Box::new(left),
        right: Box::new(right),
        span,
        ty: None,
    }
}
