use crate::compiler::error::SyntaxError;

/// Token kinds for the arabscript language.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // Keywords
    Let,   // دع / متغير
    Const, // ثابت
    True,
    False,
    Break,
    Continue,
    Case,
    Default, // خلاف ذلك
    Else,
    ElseIf,
    For,
    Function,
    If,
    Return,
    Switch,
    While,
    Class,
    Constructor,
    This,
    New,
    Print,
    TypeOf,
    Undefined,
    Null,
    Try,
    Catch,

    // Literals
    /// Integer digits in ASCII, without leading zeros. Integers are exact
    /// at any length.
    Int(String),
    Float(f64),
    Str(String),
    Ident(String),

    // Operators
    Plus,
    Minus,
    Star,
    StarStar,
    Slash,
    Percent,
    EqEq,
    NotEq,
    Lt,
    Le,
    Gt,
    Ge,
    AndAnd,
    OrOr,
    Bang,
    Eq,
    PlusEq,
    MinusEq,
    PlusPlus,
    MinusMinus,
    Dot,
    Question, // ؟

    // Delimiters
    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Comma, // ، or ,
    Semi,  // ؛
    Colon,

    // Special
    Eof,
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            TokenKind::Let => "'دع'",
            TokenKind::Const => "'ثابت'",
            TokenKind::True => "'صح'",
            TokenKind::False => "'خطا'",
            TokenKind::Break => "'قف'",
            TokenKind::Continue => "'استمر'",
            TokenKind::Case => "'حالة'",
            TokenKind::Default => "'خلاف ذلك'",
            TokenKind::Else => "'آخر'",
            TokenKind::ElseIf => "'ولو'",
            TokenKind::For => "'ل'",
            TokenKind::Function => "'دالة'",
            TokenKind::If => "'لو'",
            TokenKind::Return => "'عد'",
            TokenKind::Switch => "'تبديل'",
            TokenKind::While => "'بينما'",
            TokenKind::Class => "'صنف'",
            TokenKind::Constructor => "'منشئ'",
            TokenKind::This => "'هذا'",
            TokenKind::New => "'جديد'",
            TokenKind::Print => "'طبع'",
            TokenKind::TypeOf => "'نوع'",
            TokenKind::Undefined => "'مجهول'",
            TokenKind::Null => "'نل'",
            TokenKind::Try => "'حاول'",
            TokenKind::Catch => "'امسك'",
            TokenKind::Int(n) => return write!(f, "number {}", n),
            TokenKind::Float(n) => return write!(f, "number {}", n),
            TokenKind::Str(s) => return write!(f, "string {:?}", s),
            TokenKind::Ident(name) => return write!(f, "identifier '{}'", name),
            TokenKind::Plus => "'+'",
            TokenKind::Minus => "'-'",
            TokenKind::Star => "'*'",
            TokenKind::StarStar => "'**'",
            TokenKind::Slash => "'/'",
            TokenKind::Percent => "'%'",
            TokenKind::EqEq => "'=='",
            TokenKind::NotEq => "'!='",
            TokenKind::Lt => "'<'",
            TokenKind::Le => "'<='",
            TokenKind::Gt => "'>'",
            TokenKind::Ge => "'>='",
            TokenKind::AndAnd => "'&&'",
            TokenKind::OrOr => "'||'",
            TokenKind::Bang => "'!'",
            TokenKind::Eq => "'='",
            TokenKind::PlusEq => "'+='",
            TokenKind::MinusEq => "'-='",
            TokenKind::PlusPlus => "'++'",
            TokenKind::MinusMinus => "'--'",
            TokenKind::Dot => "'.'",
            TokenKind::Question => "'؟'",
            TokenKind::LParen => "'('",
            TokenKind::RParen => "')'",
            TokenKind::LBrace => "'{'",
            TokenKind::RBrace => "'}'",
            TokenKind::LBracket => "'['",
            TokenKind::RBracket => "']'",
            TokenKind::Comma => "'،'",
            TokenKind::Semi => "'؛'",
            TokenKind::Colon => "':'",
            TokenKind::Eof => "end of file",
        };
        write!(f, "{}", text)
    }
}

/// Source location information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    pub line: usize,
    pub column: usize,
}

impl Span {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// A token with its kind and location.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }
}

/// The lexer for arabscript source code.
pub struct Lexer<'a> {
    source: &'a str,
    chars: std::iter::Peekable<std::str::CharIndices<'a>>,
    line: usize,
    column: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            chars: source.char_indices().peekable(),
            line: 1,
            column: 1,
        }
    }

    pub fn scan_tokens(&mut self) -> Result<Vec<Token>, SyntaxError> {
        let mut tokens = Vec::new();

        loop {
            self.skip_whitespace_and_comments();

            let span = Span::new(self.line, self.column);

            let Some((_, ch)) = self.peek() else {
                tokens.push(Token::new(TokenKind::Eof, span));
                break;
            };

            let kind = match ch {
                '(' => self.single(TokenKind::LParen),
                ')' => self.single(TokenKind::RParen),
                '{' => self.single(TokenKind::LBrace),
                '}' => self.single(TokenKind::RBrace),
                '[' => self.single(TokenKind::LBracket),
                ']' => self.single(TokenKind::RBracket),
                '،' | ',' => self.single(TokenKind::Comma),
                '؛' => self.single(TokenKind::Semi),
                ':' => self.single(TokenKind::Colon),
                '.' => self.single(TokenKind::Dot),
                '؟' | '?' => self.single(TokenKind::Question),
                '/' => self.single(TokenKind::Slash),
                '%' | '٪' => self.single(TokenKind::Percent),
                '+' => {
                    self.advance();
                    if self.match_char('+') {
                        TokenKind::PlusPlus
                    } else if self.match_char('=') {
                        TokenKind::PlusEq
                    } else {
                        TokenKind::Plus
                    }
                }
                '-' => {
                    self.advance();
                    if self.match_char('-') {
                        TokenKind::MinusMinus
                    } else if self.match_char('=') {
                        TokenKind::MinusEq
                    } else {
                        TokenKind::Minus
                    }
                }
                '*' => {
                    self.advance();
                    if self.match_char('*') {
                        TokenKind::StarStar
                    } else {
                        TokenKind::Star
                    }
                }
                '!' => {
                    self.advance();
                    if self.match_char('=') {
                        TokenKind::NotEq
                    } else {
                        TokenKind::Bang
                    }
                }
                '=' => {
                    self.advance();
                    if self.match_char('=') {
                        TokenKind::EqEq
                    } else {
                        TokenKind::Eq
                    }
                }
                '<' => {
                    self.advance();
                    if self.match_char('=') {
                        TokenKind::Le
                    } else {
                        TokenKind::Lt
                    }
                }
                '>' => {
                    self.advance();
                    if self.match_char('=') {
                        TokenKind::Ge
                    } else {
                        TokenKind::Gt
                    }
                }
                '&' => {
                    self.advance();
                    if self.match_char('&') {
                        TokenKind::AndAnd
                    } else {
                        return Err(self.error("expected '&&'", span));
                    }
                }
                '|' => {
                    self.advance();
                    if self.match_char('|') {
                        TokenKind::OrOr
                    } else {
                        return Err(self.error("expected '||'", span));
                    }
                }
                '"' => self.scan_string(span)?,
                c if digit_value(c).is_some() => self.scan_number(span)?,
                c if c.is_alphabetic() || c == '_' => self.scan_identifier(),
                _ => return Err(self.error(&format!("unexpected character '{}'", ch), span)),
            };

            tokens.push(Token::new(kind, span));
        }

        Ok(tokens)
    }

    fn peek(&mut self) -> Option<(usize, char)> {
        self.chars.peek().copied()
    }

    fn advance(&mut self) -> Option<(usize, char)> {
        let result = self.chars.next();
        if let Some((_, ch)) = result {
            if ch == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
        result
    }

    fn single(&mut self, kind: TokenKind) -> TokenKind {
        self.advance();
        kind
    }

    fn match_char(&mut self, expected: char) -> bool {
        if self.peek().map(|(_, c)| c) == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn skip_whitespace_and_comments(&mut self) {
        loop {
            match self.peek() {
                Some((_, c)) if c.is_whitespace() => {
                    self.advance();
                }
                Some((_, '/')) => {
                    let mut chars = self.chars.clone();
                    chars.next();
                    if chars.peek().map(|(_, c)| *c) == Some('/') {
                        while let Some((_, ch)) = self.peek() {
                            if ch == '\n' {
                                break;
                            }
                            self.advance();
                        }
                    } else {
                        break;
                    }
                }
                _ => break,
            }
        }
    }

    fn scan_number(&mut self, span: Span) -> Result<TokenKind, SyntaxError> {
        // Arabic-Indic digits are normalised to ASCII before parsing.
        let mut text = String::new();
        let mut is_float = false;

        while let Some((_, ch)) = self.peek() {
            match digit_value(ch) {
                Some(d) => {
                    text.push(d);
                    self.advance();
                }
                None => break,
            }
        }

        if let Some((_, '.')) = self.peek() {
            let mut chars = self.chars.clone();
            chars.next();
            if let Some((_, ch)) = chars.peek()
                && digit_value(*ch).is_some()
            {
                is_float = true;
                self.advance();
                text.push('.');
                while let Some((_, ch)) = self.peek() {
                    match digit_value(ch) {
                        Some(d) => {
                            text.push(d);
                            self.advance();
                        }
                        None => break,
                    }
                }
            }
        }

        if is_float {
            let value: f64 = text
                .parse()
                .map_err(|_| self.error(&format!("invalid float '{}'", text), span))?;
            Ok(TokenKind::Float(value))
        } else {
            let digits = text.trim_start_matches('0');
            let digits = if digits.is_empty() { "0" } else { digits };
            Ok(TokenKind::Int(digits.to_string()))
        }
    }

    fn scan_string(&mut self, span: Span) -> Result<TokenKind, SyntaxError> {
        self.advance(); // consume opening quote

        let mut value = String::new();

        loop {
            match self.peek() {
                None => return Err(self.error("unterminated string", span)),
                Some((_, '"')) => {
                    self.advance();
                    break;
                }
                Some((_, '\\')) => {
                    self.advance();
                    let escaped = match self.advance() {
                        Some((_, 'n')) => '\n',
                        Some((_, 't')) => '\t',
                        Some((_, 'r')) => '\r',
                        Some((_, '\\')) => '\\',
                        Some((_, '"')) => '"',
                        Some((_, '\'')) => '\'',
                        Some((_, 'u')) => self.scan_unicode_escape(span)?,
                        Some((_, ch)) => {
                            return Err(self.error(
                                &format!("invalid escape sequence '\\{}'", ch),
                                span,
                            ));
                        }
                        None => return Err(self.error("unterminated string", span)),
                    };
                    value.push(escaped);
                }
                Some((_, '\n')) => {
                    return Err(self.error("unterminated string (newline in string)", span));
                }
                Some((_, ch)) => {
                    self.advance();
                    value.push(ch);
                }
            }
        }

        Ok(TokenKind::Str(value))
    }

    /// Scans the `{XXXX}` part of a `\u{XXXX}` escape (1 to 6 hex digits).
    fn scan_unicode_escape(&mut self, span: Span) -> Result<char, SyntaxError> {
        if !self.match_char('{') {
            return Err(self.error("expected '{' after '\\u'", span));
        }

        let mut hex = String::new();
        while let Some((_, ch)) = self.peek() {
            if ch == '}' {
                break;
            }
            if !ch.is_ascii_hexdigit() || hex.len() == 6 {
                return Err(self.error("invalid unicode escape", span));
            }
            hex.push(ch);
            self.advance();
        }

        if !self.match_char('}') || hex.is_empty() {
            return Err(self.error("invalid unicode escape", span));
        }

        u32::from_str_radix(&hex, 16)
            .ok()
            .and_then(char::from_u32)
            .ok_or_else(|| self.error(&format!("invalid code point '{}'", hex), span))
    }

    fn scan_identifier(&mut self) -> TokenKind {
        let start = self.peek().map(|(i, _)| i).unwrap_or(0);

        while let Some((_, ch)) = self.peek() {
            if !is_identifier_char(ch) {
                break;
            }
            // `a&&b` is a conjunction, not one identifier.
            if ch == '&' {
                let mut chars = self.chars.clone();
                chars.next();
                if chars.peek().map(|(_, c)| *c) == Some('&') {
                    break;
                }
            }
            self.advance();
        }

        let end = self.peek().map(|(i, _)| i).unwrap_or(self.source.len());
        let ident = &self.source[start..end];

        match ident {
            "دع" | "متغير" => TokenKind::Let,
            "ثابت" => TokenKind::Const,
            "صح" => TokenKind::True,
            "خطا" => TokenKind::False,
            "قف" => TokenKind::Break,
            "استمر" => TokenKind::Continue,
            "حالة" => TokenKind::Case,
            "خلاف" if self.match_trailing_word("ذلك") => TokenKind::Default,
            "آخر" => TokenKind::Else,
            "ولو" => TokenKind::ElseIf,
            "ل" => TokenKind::For,
            "دالة" => TokenKind::Function,
            "لو" => TokenKind::If,
            "عد" => TokenKind::Return,
            "تبديل" => TokenKind::Switch,
            "بينما" => TokenKind::While,
            "صنف" => TokenKind::Class,
            "منشئ" => TokenKind::Constructor,
            "هذا" => TokenKind::This,
            "جديد" => TokenKind::New,
            "طبع" => TokenKind::Print,
            "نوع" => TokenKind::TypeOf,
            "مجهول" => TokenKind::Undefined,
            "نل" => TokenKind::Null,
            "حاول" => TokenKind::Try,
            "امسك" => TokenKind::Catch,
            _ => TokenKind::Ident(ident.to_string()),
        }
    }

    /// Consumes whitespace followed by `word` if `word` is the next whole
    /// identifier; leaves the input untouched otherwise.
    fn match_trailing_word(&mut self, word: &str) -> bool {
        let mut probe = self.chars.clone();
        let mut consumed = 0;

        let mut saw_space = false;
        while let Some((_, c)) = probe.peek() {
            if *c == ' ' || *c == '\t' {
                saw_space = true;
                probe.next();
                consumed += 1;
            } else {
                break;
            }
        }
        if !saw_space {
            return false;
        }

        for expected in word.chars() {
            match probe.next() {
                Some((_, c)) if c == expected => consumed += 1,
                _ => return false,
            }
        }
        if probe.peek().is_some_and(|(_, c)| is_identifier_char(*c)) {
            return false;
        }

        for _ in 0..consumed {
            self.advance();
        }
        true
    }

    fn error(&self, message: &str, span: Span) -> SyntaxError {
        SyntaxError::new(message, span)
    }
}

/// Maps ASCII, Arabic-Indic and Extended Arabic-Indic digits to ASCII.
fn digit_value(ch: char) -> Option<char> {
    match ch {
        '0'..='9' => Some(ch),
        '\u{0660}'..='\u{0669}' => char::from_digit(ch as u32 - 0x0660, 10),
        '\u{06F0}'..='\u{06F9}' => char::from_digit(ch as u32 - 0x06F0, 10),
        _ => None,
    }
}

fn is_identifier_char(ch: char) -> bool {
    ch.is_alphabetic()
        || digit_value(ch).is_some()
        || ch == '_'
        || ch == '&'
        // Arabic diacritics
        || matches!(ch, '\u{064B}'..='\u{065F}' | '\u{0670}')
}
