use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Int,
    For,
    While,
    Do,
    If,
    Else,
    Switch,
    Case,
    Default,
    Break,

    Identifier,
    Number,

    IAdd,
    ISub,
    IMul,
    IDiv,
    IMod,

    Equal,

    LT,
    GT,
    LE,
    GE,
    EQ,
    NE,

    ParenOpen,
    ParenClose,
    BraceOpen,
    BraceClose,
    Semicolon,
    Colon,
    Comma,
}

impl Kind {
    pub fn keyword(word: &str) -> Option<Kind> {
        let kind = match word {
            "int" => Kind::Int,
            "for" => Kind::For,
            "while" => Kind::While,
            "do" => Kind::Do,
            "if" => Kind::If,
            "else" => Kind::Else,
            "switch" => Kind::Switch,
            "case" => Kind::Case,
            "default" => Kind::Default,
            "break" => Kind::Break,
            _ => return None,
        };
        Some(kind)
    }

    pub fn is_keyword(&self) -> bool {
        matches!(
            self,
            Kind::Int
                | Kind::For
                | Kind::While
                | Kind::Do
                | Kind::If
                | Kind::Else
                | Kind::Switch
                | Kind::Case
                | Kind::Default
                | Kind::Break
        )
    }

    pub fn is_relational(&self) -> bool {
        matches!(self, Kind::LT | Kind::GT | Kind::LE | Kind::GE | Kind::EQ | Kind::NE)
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Kind::Int => "'int'",
            Kind::For => "'for'",
            Kind::While => "'while'",
            Kind::Do => "'do'",
            Kind::If => "'if'",
            Kind::Else => "'else'",
            Kind::Switch => "'switch'",
            Kind::Case => "'case'",
            Kind::Default => "'default'",
            Kind::Break => "'break'",
            Kind::Identifier => "identifier",
            Kind::Number => "number",
            Kind::IAdd => "'+'",
            Kind::ISub => "'-'",
            Kind::IMul => "'*'",
            Kind::IDiv => "'/'",
            Kind::IMod => "'%'",
            Kind::Equal => "'='",
            Kind::LT => "'<'",
            Kind::GT => "'>'",
            Kind::LE => "'<='",
            Kind::GE => "'>='",
            Kind::EQ => "'=='",
            Kind::NE => "'!='",
            Kind::ParenOpen => "'('",
            Kind::ParenClose => "')'",
            Kind::BraceOpen => "'{'",
            Kind::BraceClose => "'}'",
            Kind::Semicolon => "';'",
            Kind::Colon => "':'",
            Kind::Comma => "','",
        };
        f.write_str(s)
    }
}

/// A lexical unit: its kind plus the literal text it was read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: Kind,
    pub text: String,
}

impl Token {
    pub fn new(kind: Kind, text: impl Into<String>) -> Self {
        Token {
            kind,
            text: text.into(),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:?}, {})", self.kind, self.text)
    }
}
