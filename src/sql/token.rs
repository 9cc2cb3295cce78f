/// Token types for the normalized query text
use phf::phf_map;

// Canonical keyword spellings produced by the normalizer
static KEYWORDS: phf::Map<&'static str, Keyword> = phf_map! {
    "SELECT" => Keyword::Select,
    "ORDERBY" => Keyword::OrderBy,
    "DESC" => Keyword::Desc,
    "ASC" => Keyword::Asc,
    "INSERT_INTO" => Keyword::InsertInto,
    "UPDATE" => Keyword::Update,
    "SET" => Keyword::Set,
    "WHERE" => Keyword::Where,
    "AND" => Keyword::And,
    "OR" => Keyword::Or,
    "DELETE_FROM" => Keyword::DeleteFrom,
    "LIMIT" => Keyword::Limit,
    "VALUES" => Keyword::Values,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    Select,
    OrderBy,
    Desc,
    Asc,
    InsertInto,
    Update,
    Set,
    Where,
    And,
    Or,
    DeleteFrom,
    Limit,
    Values,
}

impl Keyword {
    /// Look up a canonical keyword (case-insensitive)
    pub fn from_word(s: &str) -> Option<Self> {
        KEYWORDS.get(s.to_ascii_uppercase().as_str()).copied()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Keyword::Select => "SELECT",
            Keyword::OrderBy => "ORDERBY",
            Keyword::Desc => "DESC",
            Keyword::Asc => "ASC",
            Keyword::InsertInto => "INSERT_INTO",
            Keyword::Update => "UPDATE",
            Keyword::Set => "SET",
            Keyword::Where => "WHERE",
            Keyword::And => "AND",
            Keyword::Or => "OR",
            Keyword::DeleteFrom => "DELETE_FROM",
            Keyword::Limit => "LIMIT",
            Keyword::Values => "VALUES",
        }
    }
}

/// Comparison operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Eq,  // = or ==
    Ne,  // != or <>
    Lt,  // <
    Le,  // <=
    Gt,  // >
    Ge,  // >=
}

impl CompareOp {
    pub fn from_symbol(s: &str) -> Option<Self> {
        match s {
            "=" | "==" => Some(CompareOp::Eq),
            "!=" | "<>" => Some(CompareOp::Ne),
            "<" => Some(CompareOp::Lt),
            "<=" => Some(CompareOp::Le),
            ">" => Some(CompareOp::Gt),
            ">=" => Some(CompareOp::Ge),
            _ => None,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            CompareOp::Eq => "=",
            CompareOp::Ne => "!=",
            CompareOp::Lt => "<",
            CompareOp::Le => "<=",
            CompareOp::Gt => ">",
            CompareOp::Ge => ">=",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TokenType {
    Keyword(Keyword),

    /// Identifier, table path, bare number or other unquoted word
    Word(String),

    /// Label standing in for a quoted literal
    Placeholder(String),

    Star,
    Compare(CompareOp),
    LParen,
    RParen,
    Comma,

    Eof,
}

#[derive(Debug, Clone)]
pub struct Token {
    pub token_type: TokenType,
    /// Character offset in the normalized text
    pub position: usize,
}

impl Token {
    pub fn new(token_type: TokenType, position: usize) -> Self {
        Self { token_type, position }
    }
}

impl TokenType {
    /// Text of the token as it appeared in the normalized query
    pub fn describe(&self) -> String {
        match self {
            TokenType::Keyword(k) => k.as_str().to_string(),
            TokenType::Word(w) | TokenType::Placeholder(w) => w.clone(),
            TokenType::Star => "*".to_string(),
            TokenType::Compare(op) => op.symbol().to_string(),
            TokenType::LParen => "(".to_string(),
            TokenType::RParen => ")".to_string(),
            TokenType::Comma => ",".to_string(),
            TokenType::Eof => "end of query".to_string(),
        }
    }
}
