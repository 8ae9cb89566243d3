use std::fmt;

/// Every kind of token in the language.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum TokenKind {
    // Literals
    Number,
    String,
    Ident,

    // Keywords
    Var,
    Local,
    Global,
    True,
    False,
    None,
    Print,
    Function,
    Return,
    If,
    Else,
    Do,
    Static,
    Public,
    Private,
    Readonly,
    Constructor,
    New,
    Class,
    While,
    For,

    // Delimiters
    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Semicolon,
    Comma,
    Dot,
    Colon,
    Ellipsis,

    // Operators
    Plus,
    Minus,
    Star,
    StarStar,
    Slash,
    Percent,
    Eq,
    EqEq,
    Bang,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    AmpAmp,
    PipePipe,

    Eof,
}

impl TokenKind {
    /// Keyword kind for an identifier spelling, if it is reserved.
    pub fn keyword(text: &str) -> Option<TokenKind> {
        let kind = match text {
            "var" => TokenKind::Var,
            "local" => TokenKind::Local,
            "global" => TokenKind::Global,
            "true" => TokenKind::True,
            "false" => TokenKind::False,
            "none" => TokenKind::None,
            "print" => TokenKind::Print,
            "function" => TokenKind::Function,
            "return" => TokenKind::Return,
            "if" => TokenKind::If,
            "else" => TokenKind::Else,
            "do" => TokenKind::Do,
            "static" => TokenKind::Static,
            "public" => TokenKind::Public,
            "private" => TokenKind::Private,
            "readonly" => TokenKind::Readonly,
            "constructor" => TokenKind::Constructor,
            "new" => TokenKind::New,
            "class" => TokenKind::Class,
            "while" => TokenKind::While,
            "for" => TokenKind::For,
            _ => return None,
        };
        Some(kind)
    }

    /// Name used in diagnostics ("expected `)`, found identifier").
    pub fn display_name(self) -> &'static str {
        match self {
            TokenKind::Number => "number",
            TokenKind::String => "string",
            TokenKind::Ident => "identifier",
            TokenKind::Var => "`var`",
            TokenKind::Local => "`local`",
            TokenKind::Global => "`global`",
            TokenKind::True => "`true`",
            TokenKind::False => "`false`",
            TokenKind::None => "`none`",
            TokenKind::Print => "`print`",
            TokenKind::Function => "`function`",
            TokenKind::Return => "`return`",
            TokenKind::If => "`if`",
            TokenKind::Else => "`else`",
            TokenKind::Do => "`do`",
            TokenKind::Static => "`static`",
            TokenKind::Public => "`public`",
            TokenKind::Private => "`private`",
            TokenKind::Readonly => "`readonly`",
            TokenKind::Constructor => "`constructor`",
            TokenKind::New => "`new`",
            TokenKind::Class => "`class`",
            TokenKind::While => "`while`",
            TokenKind::For => "`for`",
            TokenKind::LParen => "`(`",
            TokenKind::RParen => "`)`",
            TokenKind::LBrace => "`{`",
            TokenKind::RBrace => "`}`",
            TokenKind::LBracket => "`[`",
            TokenKind::RBracket => "`]`",
            TokenKind::Semicolon => "`;`",
            TokenKind::Comma => "`,`",
            TokenKind::Dot => "`.`",
            TokenKind::Colon => "`:`",
            TokenKind::Ellipsis => "`...`",
            TokenKind::Plus => "`+`",
            TokenKind::Minus => "`-`",
            TokenKind::Star => "`*`",
            TokenKind::StarStar => "`**`",
            TokenKind::Slash => "`/`",
            TokenKind::Percent => "`%`",
            TokenKind::Eq => "`=`",
            TokenKind::EqEq => "`==`",
            TokenKind::Bang => "`!`",
            TokenKind::NotEq => "`!=`",
            TokenKind::Lt => "`<`",
            TokenKind::LtEq => "`<=`",
            TokenKind::Gt => "`>`",
            TokenKind::GtEq => "`>=`",
            TokenKind::AmpAmp => "`&&`",
            TokenKind::PipePipe => "`||`",
            TokenKind::Eof => "end of file",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}
