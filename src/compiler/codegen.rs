//! JavaScript generation from the bound tree.

use crate::compiler::ast::*;
use crate::compiler::naming::{NameTable, NamingOracle};

/// Renders a bound program as JavaScript.
pub fn generate(bound: &BoundProgram, oracle: Box<dyn NamingOracle>, indent: usize) -> String {
    Generator::new(oracle, indent).generate(&bound.program)
}

/// Code generator that renders the bound AST as JavaScript source text.
///
/// Statements append complete lines to the output buffer. Compound
/// expressions are dual-mode: while `standalone` is set they append
/// themselves as a terminated statement, otherwise they return their text.
/// Identifiers and literals always return text.
pub struct Generator {
    names: NameTable,
    lines: Vec<String>,
    indent: usize,
    level: usize,
    /// The expression being rendered is a statement of its own
    standalone: bool,
    /// Lists are argument or parameter lists rather than array elements
    formatting_parameters: bool,
    /// Function declarations are methods
    in_class_body: bool,
}

impl Generator {
    pub fn new(oracle: Box<dyn NamingOracle>, indent: usize) -> Self {
        Self {
            names: NameTable::new(oracle),
            lines: Vec::new(),
            indent,
            level: 0,
            standalone: true,
            formatting_parameters: false,
            in_class_body: false,
        }
    }

    pub fn generate(mut self, program: &Program) -> String {
        self.statements(&program.statements);
        tracing::debug!(lines = self.lines.len(), "generation finished");
        self.lines.join("\n")
    }

    fn emit(&mut self, line: impl AsRef<str>) {
        let line = format!("{}{}", " ".repeat(self.indent * self.level), line.as_ref());
        self.lines.push(line);
    }

    fn statements(&mut self, statements: &[Statement]) {
        for statement in statements {
            self.statement(statement);
        }
    }

    fn indented(&mut self, block: &Block) {
        self.level += 1;
        self.statements(&block.statements);
        self.level -= 1;
    }

    fn statement(&mut self, statement: &Statement) {
        match statement {
            Statement::VarDecInit {
                binding,
                constant,
                init,
                ..
            } => {
                let name = self.binding(binding);
                let init = self.fragment(init);
                self.emit(format!("{} {} = {};", keyword(*constant), name, init));
            }
            Statement::VarDec {
                binding, constant, ..
            } => {
                let name = self.binding(binding);
                if *constant {
                    self.emit(format!("const {} = undefined;", name));
                } else {
                    self.emit(format!("let {};", name));
                }
            }
            Statement::MultiDec {
                constant,
                declarators,
                ..
            } => {
                let mut parts = Vec::new();
                for Declarator { binding, init } in declarators {
                    let name = self.binding(binding);
                    let init = match init {
                        Some(init) => self.fragment(init),
                        None => "undefined".to_string(),
                    };
                    parts.push(format!("{} = {}", name, init));
                }
                self.emit(format!("{} {};", keyword(*constant), parts.join(", ")));
            }
            Statement::Assign { target, value, .. } => {
                let target = self.fragment(target);
                let value = self.fragment(value);
                self.emit(format!("{} = {};", target, value));
            }
            Statement::TryCatch {
                try_block,
                catch_binding,
                catch_block,
                ..
            } => {
                self.emit("try {");
                self.indented(try_block);
                let name = self.binding(catch_binding);
                self.emit(format!("}} catch ({}) {{", name));
                self.indented(catch_block);
                self.emit("}");
            }
            Statement::Class(class) => self.class_def(class),
            Statement::FnDecl(func) => self.fn_decl(func),
            Statement::If {
                cases, else_block, ..
            } => {
                for (i, case) in cases.iter().enumerate() {
                    let condition = self.fragment(&case.condition);
                    if i == 0 {
                        self.emit(format!("if ({}) {{", condition));
                    } else {
                        self.emit(format!("}} else if ({}) {{", condition));
                    }
                    self.indented(&case.body);
                }
                if let Some(else_block) = else_block {
                    self.emit("} else {");
                    self.indented(else_block);
                }
                self.emit("}");
            }
            Statement::While {
                condition, body, ..
            } => {
                let condition = self.fragment(condition);
                self.emit(format!("while ({}) {{", condition));
                self.indented(body);
                self.emit("}");
            }
            Statement::For { header, body, .. } => {
                let name = self.binding(&header.binding);
                let init = self.fragment(&header.init);
                let condition = self.fragment(&header.condition);
                let step = self.fragment(&header.step);
                self.emit(format!(
                    "for (let {} = {}; {}; {}) {{",
                    name, init, condition, step
                ));
                self.indented(body);
                self.emit("}");
            }
            Statement::ForOf {
                binding,
                iterable,
                body,
                ..
            } => {
                let name = self.binding(binding);
                let iterable = self.fragment(iterable);
                self.emit(format!("for (let {} of {}) {{", name, iterable));
                self.indented(body);
                self.emit("}");
            }
            Statement::Switch {
                selector,
                cases,
                default,
                ..
            } => {
                let selector = self.fragment(selector);
                self.emit(format!("switch ({}) {{", selector));
                self.level += 1;
                for case in cases {
                    let test = self.fragment(&case.test);
                    self.emit(format!("case {}:", test));
                    self.indented(&case.body);
                }
                // Default only runs when no case matched, so it always goes last.
                if let Some(default) = default {
                    self.emit("default:");
                    self.indented(default);
                }
                self.level -= 1;
                self.emit("}");
            }
            Statement::Return { value, .. } => {
                let value = self.fragment(value);
                self.emit(format!("return {};", value));
            }
            Statement::ShortReturn { .. } => self.emit("return;"),
            Statement::Print { argument, .. } => {
                let argument = self.fragment(argument);
                self.emit(format!("console.log({});", argument));
            }
            Statement::Break { .. } => self.emit("break;"),
            Statement::Continue { .. } => self.emit("continue;"),
            Statement::Expr { expr, .. } => {
                // Compound expressions emit themselves; leaves come back as text.
                if let Some(text) = self.expression(expr) {
                    self.emit(format!("{};", text));
                }
            }
        }
    }

    fn fn_decl(&mut self, func: &FnDecl) {
        let method = self.in_class_body;
        // Methods are reached through `this.m()` / `o.m()`, so they share the field names.
        let name = if method {
            self.names.field(&func.binding.name)
        } else {
            self.binding(&func.binding)
        };
        let params = self.list(&func.params, true);

        if method {
            self.emit(format!("{}({}) {{", name, params));
        } else {
            self.emit(format!("function {}({}) {{", name, params));
        }

        self.in_class_body = false;
        self.indented(&func.body);
        self.in_class_body = method;

        self.emit("}");
    }

    fn class_def(&mut self, class: &ClassDef) {
        let name = self.binding(&class.binding);
        self.emit(format!("class {} {{", name));
        self.level += 1;

        if let Some(constructor) = &class.constructor {
            let params = self.list(&constructor.params, true);
            self.emit(format!("constructor({}) {{", params));
            self.indented(&constructor.body);
            self.emit("}");
        }

        let enclosing = self.in_class_body;
        self.in_class_body = true;
        self.statements(&class.body.statements);
        self.in_class_body = enclosing;

        self.level -= 1;
        self.emit("}");
    }

    fn binding(&mut self, binding: &Binding) -> String {
        match binding.entity {
            Some(id) => self.names.entity(id, &binding.name),
            None => self.names.field(&binding.name),
        }
    }

    /// Renders `expr` inline, whatever the current mode.
    fn fragment(&mut self, expr: &Expr) -> String {
        let standalone = self.standalone;
        self.standalone = false;
        let text = self.expression(expr).unwrap_or_default();
        self.standalone = standalone;
        text
    }

    /// Renders `expr` as an operand of an enclosing expression. Ternaries and
    /// compound assignments bind looser than any operator they can sit under.
    fn operand(&mut self, expr: &Expr) -> String {
        let text = self.fragment(expr);
        match expr {
            Expr::Ternary { .. } => format!("({})", text),
            Expr::Binary { op, .. } if op.is_compound_assignment() => format!("({})", text),
            _ => text,
        }
    }

    /// Renders an expression. Compound expressions in standalone mode are
    /// appended as a statement and yield `None`.
    fn expression(&mut self, expr: &Expr) -> Option<String> {
        let text = match expr {
            Expr::Bool { value, .. } => return Some(value.to_string()),
            Expr::Number { value, .. } => return Some(value.to_string()),
            Expr::BigInt { value, .. } => return Some(value.clone()),
            Expr::Str { value, .. } => return Some(string_literal(value)),
            Expr::Null { .. } => return Some("null".to_string()),
            Expr::Undefined { .. } => return Some("undefined".to_string()),
            Expr::Ident { name, entity, .. } => {
                return Some(match entity {
                    Some(id) => self.names.entity(*id, name),
                    None => self.names.field(name),
                });
            }
            _ => {
                let standalone = self.standalone;
                self.standalone = false;
                let text = self.compound(expr);
                self.standalone = standalone;
                text
            }
        };

        if self.standalone {
            self.emit(format!("{};", text));
            None
        } else {
            Some(text)
        }
    }

    fn compound(&mut self, expr: &Expr) -> String {
        match expr {
            Expr::Call { callee, args, .. } => {
                let callee = self.operand(callee);
                format!("{}({})", callee, self.list(args, true))
            }
            Expr::This { field, .. } => format!("this.{}", self.field_name(field)),
            Expr::New { class, args, .. } => {
                let class = self.operand(class);
                format!("new {}({})", class, self.list(args, true))
            }
            Expr::TypeOf { argument, .. } => format!("typeof {}", self.operand(argument)),
            Expr::Ternary {
                condition,
                then_expr,
                else_expr,
                ..
            } => {
                let condition = self.operand(condition);
                let then_expr = self.operand(then_expr);
                let else_expr = self.operand(else_expr);
                format!("{} ? {} : {}", condition, then_expr, else_expr)
            }
            Expr::Binary {
                op, left, right, ..
            } => {
                let left = self.operand(left);
                let right = self.operand(right);
                let symbol = match op {
                    BinaryOp::Eq => "===",
                    BinaryOp::Ne => "!==",
                    other => other.symbol(),
                };
                if op.is_compound_assignment() {
                    format!("{} {} {}", left, symbol, right)
                } else {
                    format!("({} {} {})", left, symbol, right)
                }
            }
            Expr::Unary {
                op,
                operand,
                prefix,
                ..
            } => {
                let operand = self.operand(operand);
                if *prefix {
                    format!("{}({})", op.symbol(), operand)
                } else {
                    format!("{}{}", operand, op.symbol())
                }
            }
            Expr::Array { elements, .. } => format!("[{}]", self.list(elements, false)),
            Expr::Object { pairs, .. } => {
                let mut parts = Vec::new();
                for pair in pairs {
                    let key = match &pair.key {
                        Expr::Ident { name, .. } => self.names.field(name),
                        key => self.fragment(key),
                    };
                    let value = self.fragment(&pair.value);
                    parts.push(format!("{}: {}", key, value));
                }
                format!("{{{}}}", parts.join(", "))
            }
            Expr::Member { object, index, .. } => {
                let object = self.operand(object);
                let index = self.fragment(index);
                format!("{}[{}]", object, index)
            }
            Expr::Property { object, field, .. } => {
                let object = self.operand(object);
                format!("{}.{}", object, self.field_name(field))
            }
            leaf => self.fragment(leaf),
        }
    }

    fn field_name(&mut self, field: &Expr) -> String {
        match field {
            Expr::Ident { name, .. } => self.names.field(name),
            other => self.fragment(other),
        }
    }

    /// Comma separated fragments: `a, b` for argument and parameter lists, `a,b` otherwise.
    fn list(&mut self, exprs: &[Expr], parameters: bool) -> String {
        let enclosing = self.formatting_parameters;
        self.formatting_parameters = parameters;

        let mut parts = Vec::with_capacity(exprs.len());
        for expr in exprs {
            parts.push(self.fragment(expr));
        }
        let separator = if self.formatting_parameters { ", " } else { "," };

        self.formatting_parameters = enclosing;
        parts.join(separator)
    }
}

fn keyword(constant: bool) -> &'static str {
    if constant { "const" } else { "let" }
}

fn string_literal(value: &str) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| format!("{:?}", value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::analyzer::analyze;
    use crate::compiler::lexer::Lexer;
    use crate::compiler::naming::{DictionaryOracle, NoOracle};
    use crate::compiler::parser::Parser;

    fn bind(source: &str) -> BoundProgram {
        let tokens = Lexer::new(source).scan_tokens().unwrap();
        let program = Parser::new(tokens).parse().unwrap();
        analyze(program).unwrap()
    }

    fn js(source: &str) -> String {
        generate(&bind(source), Box::new(NoOracle), 2)
    }

    fn js_with(source: &str, names: &[(&str, &str)]) -> String {
        let oracle = DictionaryOracle::new(
            names
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        );
        generate(&bind(source), Box::new(oracle), 2)
    }

    #[test]
    fn test_hello_world() {
        assert_eq!(js("طبع(\"Hello World!\")؛"), "console.log(\"Hello World!\");");
    }

    #[test]
    fn test_declarations_and_assignment() {
        let source = "دع ا؛ ا = ٢؛ نوع(ا)؛ ثابت ب = -ا؛ طبع(ب)؛ -(-(ب+ا))==٠؛ -ا؛";
        let expected = [
            "let var_1;",
            "var_1 = 2;",
            "typeof var_1;",
            "const var_2 = -(var_1);",
            "console.log(var_2);",
            "(-(-((var_2 + var_1))) === 0);",
            "-(var_1);",
        ]
        .join("\n");
        assert_eq!(js(source), expected);
    }

    #[test]
    fn test_long_integer_literal_is_emitted_exactly() {
        assert_eq!(
            js("طبع(١٢٣٤٥٦٧٨٩٠١٢٣٤٥٦٧٨٩٠١٢٣٤٥٦٧٨٩٠ + ٠٠١)؛"),
            "console.log((123456789012345678901234567890 + 1));"
        );
    }

    #[test]
    fn test_const_without_initializer() {
        assert_eq!(js("ثابت ا؛"), "const var_1 = undefined;");
    }

    #[test]
    fn test_multi_declarations() {
        let source = "دع م، خ=١، ج=٣؛ ثابت اسم=١، ح=١، ض=٣؛";
        let expected = [
            "let var_1 = undefined, var_2 = 1, var_3 = 3;",
            "const noun = 1, var_4 = 1, var_5 = 3;",
        ]
        .join("\n");
        assert_eq!(js_with(source, &[("اسم", "noun")]), expected);
    }

    #[test]
    fn test_ternary() {
        let source = "متغير اسم = ١>٢ ؟ \"خالد\" : مجهول؛ ١>٢ ؟ \"خالد\" : نل؛";
        let expected = [
            "let noun = (1 > 2) ? \"خالد\" : undefined;",
            "(1 > 2) ? \"خالد\" : null;",
        ]
        .join("\n");
        assert_eq!(js_with(source, &[("اسم", "noun")]), expected);
    }

    #[test]
    fn test_ternary_as_operand_is_parenthesized() {
        let source = "دع ص = صح؛ دع ا = (ص ؟ ١ : ٢) + ١٠؛ طبع(نوع(ص ؟ ١ : \"س\"))؛";
        let expected = [
            "let var_1 = true;",
            "let var_2 = ((var_1 ? 1 : 2) + 10);",
            "console.log(typeof (var_1 ? 1 : \"س\"));",
        ]
        .join("\n");
        assert_eq!(js(source), expected);
    }

    #[test]
    fn test_compound_assignment_as_operand_is_parenthesized() {
        let source = "دع ا = ١؛ (ا += ١) * ٢؛ دع ب = (ا -= ١) - ١؛";
        let expected = [
            "let var_1 = 1;",
            "((var_1 += 1) * 2);",
            "let var_2 = ((var_1 -= 1) - 1);",
        ]
        .join("\n");
        assert_eq!(js(source), expected);
    }

    #[test]
    fn test_for_of_element_is_reassignable() {
        let source = "ل(عنصر [١، ٢]){ عنصر = عنصر + ١؛ طبع(عنصر)؛ }";
        let expected = [
            "for (let var_1 of [1,2]) {",
            "  var_1 = (var_1 + 1);",
            "  console.log(var_1);",
            "}",
        ]
        .join("\n");
        assert_eq!(js(source), expected);
    }

    #[test]
    fn test_function_and_while() {
        let source = "دالة العد&التنازلي(عدد){
                طبع(\"Begin countdown!\")؛
                بينما(عدد > ٠){
                    طبع(عدد)؛
                    عدد--؛
                }
                طبع(\"Blast off!\")؛
            }
            العد&التنازلي(١٠)؛";
        let expected = [
            "function countdown(number) {",
            "  console.log(\"Begin countdown!\");",
            "  while ((number > 0)) {",
            "    console.log(number);",
            "    number--;",
            "  }",
            "  console.log(\"Blast off!\");",
            "}",
            "countdown(10);",
        ]
        .join("\n");
        let names = [("العد&التنازلي", "countdown"), ("عدد", "number")];
        assert_eq!(js_with(source, &names), expected);
    }

    #[test]
    fn test_class() {
        let source = "صنف كلب {
                منشئ(اسم،عمر){
                    اسم هذا = اسم؛
                    عمر هذا = عمر؛
                }
                دالة بارك(){
                    طبع(\"ووف\")؛
                }
            }
            كلب(\"خالد\"،٧) جديد؛
            دع خالد = كلب(\"خالد\"،٧) جديد؛
            خالد. اسم = \"احمد\"؛
            خالد. بارك()؛";
        let expected = [
            "class dog {",
            "  constructor(noun, age) {",
            "    this.noun = noun;",
            "    this.age = age;",
            "  }",
            "  bless() {",
            "    console.log(\"ووف\");",
            "  }",
            "}",
            "new dog(\"خالد\", 7);",
            "let khaled = new dog(\"خالد\", 7);",
            "khaled.noun = \"احمد\";",
            "khaled.bless();",
        ]
        .join("\n");
        let names = [
            ("كلب", "dog"),
            ("اسم", "noun"),
            ("عمر", "age"),
            ("بارك", "bless"),
            ("خالد", "khaled"),
        ];
        assert_eq!(js_with(source, &names), expected);
    }

    #[test]
    fn test_if_chain() {
        let source = "دع ا = ١؛ لو(ا==٠){ طبع(\"١\")؛ }ولو(ا==٢){ طبع(٣)؛ }آخر{ طبع(خطا)؛ }";
        let expected = [
            "let var_1 = 1;",
            "if ((var_1 === 0)) {",
            "  console.log(\"١\");",
            "} else if ((var_1 === 2)) {",
            "  console.log(3);",
            "} else {",
            "  console.log(false);",
            "}",
        ]
        .join("\n");
        assert_eq!(js(source), expected);
    }

    #[test]
    fn test_if_without_else() {
        assert_eq!(
            js("لو(صح != خطا){ طبع(١)؛ }"),
            "if ((true !== false)) {\n  console.log(1);\n}"
        );
    }

    #[test]
    fn test_nested_loops() {
        let source = "دع ا = ٠؛
            بينما(ا<٥){
                لو(ا٪٢==٠){
                    استمر؛
                }
                دع ب = ٠؛
                بينما(ب<٥){
                    طبع(ا*ب)؛
                    ب = ب + ١؛
                    لو(ب>ا){
                        قف؛
                    }
                }
                ا = ا + ١؛
            }";
        let expected = [
            "let var_1 = 0;",
            "while ((var_1 < 5)) {",
            "  if (((var_1 % 2) === 0)) {",
            "    continue;",
            "  }",
            "  let var_2 = 0;",
            "  while ((var_2 < 5)) {",
            "    console.log((var_1 * var_2));",
            "    var_2 = (var_2 + 1);",
            "    if ((var_2 > var_1)) {",
            "      break;",
            "    }",
            "  }",
            "  var_1 = (var_1 + 1);",
            "}",
        ]
        .join("\n");
        assert_eq!(js(source), expected);
    }

    #[test]
    fn test_functions_and_shadowed_parameter() {
        let source = "دع ا = ٠.٥؛
            دالة ولا&شيء(){ عد؛ }
            دالة شيء(ا){ عد ا؛ }
            دع ب =١ + شيء(ا)؛
            ولا&شيء()؛";
        let expected = [
            "let var_1 = 0.5;",
            "function nothing() {",
            "  return;",
            "}",
            "function thing(var_1_1) {",
            "  return var_1_1;",
            "}",
            "let var_2 = (1 + thing(var_1));",
            "nothing();",
        ]
        .join("\n");
        let names = [("ولا&شيء", "nothing"), ("شيء", "thing")];
        assert_eq!(js_with(source, &names), expected);
    }

    #[test]
    fn test_arrays_and_objects() {
        let source = "دع ا = [١،٢،٣،٤]؛ دع ب = {٠:صح، ١:خطا}؛ طبع(ب[٠]==ا[٢])؛";
        let expected = [
            "let var_1 = [1,2,3,4];",
            "let var_2 = {0: true, 1: false};",
            "console.log((var_2[0] === var_1[2]));",
        ]
        .join("\n");
        assert_eq!(js(source), expected);
    }

    #[test]
    fn test_for_loops() {
        let source = "ل(دع ه = ١؛ ه>١٠؛ه++){
                طبع(ه)؛
                ه--؛
            }
            ل(دع ه = ١؛ ه>١٠؛ه+=٥){
                طبع(ه)؛
                ه+=١؛
            }
            دع ارقام = [١،٢،٣،٤]؛
            ل(رقم ارقام){
                طبع(نوع(رقم))؛
            }";
        let expected = [
            "for (let var_1 = 1; (var_1 > 10); var_1++) {",
            "  console.log(var_1);",
            "  var_1--;",
            "}",
            "for (let var_1_1 = 1; (var_1_1 > 10); var_1_1 += 5) {",
            "  console.log(var_1_1);",
            "  var_1_1 += 1;",
            "}",
            "let numbers = [1,2,3,4];",
            "for (let number of numbers) {",
            "  console.log(typeof number);",
            "}",
        ]
        .join("\n");
        let names = [("ارقام", "numbers"), ("رقم", "number")];
        assert_eq!(js_with(source, &names), expected);
    }

    #[test]
    fn test_count_example() {
        let source = "دع count = ٠؛ ل(item [١، ٢، ٣]){ count = count + item؛ }";
        let expected = [
            "let var_1 = 0;",
            "for (let var_2 of [1,2,3]) {",
            "  var_1 = (var_1 + var_2);",
            "}",
        ]
        .join("\n");
        assert_eq!(js(source), expected);
    }

    #[test]
    fn test_switch_default_rendered_last() {
        let source = "دع ا؛ دع ت = ٥؛
            تبديل(ت){
                خلاف ذلك: ٢+٢؛
                حالة ١:
                    ا= ١؛
                    قف؛
                حالة ٢:
                    ا= ٥؛
                حالة ٣:
                    طبع(ت)؛
            }";
        let expected = [
            "let var_1;",
            "let var_2 = 5;",
            "switch (var_2) {",
            "  case 1:",
            "    var_1 = 1;",
            "    break;",
            "  case 2:",
            "    var_1 = 5;",
            "  case 3:",
            "    console.log(var_2);",
            "  default:",
            "    (2 + 2);",
            "}",
        ]
        .join("\n");
        assert_eq!(js(source), expected);
    }

    #[test]
    fn test_try_catch() {
        let source = "حاول { طبع(١)؛ } امسك(خطأ) { طبع(خطأ)؛ }";
        let expected = [
            "try {",
            "  console.log(1);",
            "} catch (var_1) {",
            "  console.log(var_1);",
            "}",
        ]
        .join("\n");
        assert_eq!(js(source), expected);
    }

    #[test]
    fn test_nested_call_arguments_are_fragments() {
        let source = "دالة ف(ا، ب){ عد ا؛ } ف([١، ٢]، ف(٣، ٤))؛";
        let expected = [
            "function var_1(var_2, var_3) {",
            "  return var_2;",
            "}",
            "var_1([1,2], var_1(3, 4));",
        ]
        .join("\n");
        assert_eq!(js(source), expected);
    }

    #[test]
    fn test_leaf_expression_statement() {
        assert_eq!(js("دع ا = ١؛ ا؛ \"نص\"؛"), "let var_1 = 1;\nvar_1;\n\"نص\";");
    }

    #[test]
    fn test_power_and_compound_assignment() {
        assert_eq!(
            js("دع ا = ٢؛ ا -= -٢ ** ٢؛"),
            "let var_1 = 2;\nvar_1 -= -((2 ** 2));"
        );
    }

    #[test]
    fn test_generation_is_deterministic() {
        let bound = bind("دع ا = ١؛ لو(صح){ دع ا = ٢؛ طبع(ا)؛ } طبع(ا)؛");
        let first = generate(&bound, Box::new(NoOracle), 2);
        let second = generate(&bound, Box::new(NoOracle), 2);
        assert_eq!(first, second);
        assert_eq!(
            first,
            "let var_1 = 1;\nif (true) {\n  let var_1_1 = 2;\n  console.log(var_1_1);\n}\nconsole.log(var_1);"
        );
    }

    #[test]
    fn test_custom_indent() {
        let bound = bind("بينما(صح){ قف؛ }");
        assert_eq!(
            generate(&bound, Box::new(NoOracle), 4),
            "while (true) {\n    break;\n}"
        );
    }
}
