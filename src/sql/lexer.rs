/// Query lexer - splits normalized query text into typed tokens
///
/// Expects the output of `normalizer::normalize`: comparison operators are
/// wrapped in `#` delimiters and keywords are in canonical form.
use super::literal::{is_placeholder_label, DEFAULT_PREFIX};
use super::normalizer::OPERATOR_DELIMITER;
use super::token::{CompareOp, Keyword, Token, TokenType};
use crate::error::{Result, StoreError};

pub struct Lexer {
    input: Vec<char>,
    position: usize,
    literal_prefix: String,
    /// Previous token was a comparison operator
    after_compare: bool,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        Self::with_literal_prefix(input, DEFAULT_PREFIX)
    }

    pub fn with_literal_prefix(input: &str, prefix: &str) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
            literal_prefix: prefix.to_string(),
            after_compare: false,
        }
    }

    pub fn tokenize(&mut self) -> Result<Vec<Token>> {
        let mut tokens = Vec::new();

        loop {
            let token = self.next_token()?;
            let is_eof = matches!(token.token_type, TokenType::Eof);
            tokens.push(token);
            if is_eof {
                break;
            }
        }

        Ok(tokens)
    }

    pub fn next_token(&mut self) -> Result<Token> {
        self.skip_whitespace();

        let position = self.position;

        if self.is_eof() {
            return Ok(Token::new(TokenType::Eof, position));
        }

        let token_type = match self.current_char() {
            '(' => {
                self.advance();
                TokenType::LParen
            }
            ')' => {
                self.advance();
                TokenType::RParen
            }
            ',' => {
                self.advance();
                TokenType::Comma
            }
            OPERATOR_DELIMITER => self.read_operator()?,
            _ => self.read_word(),
        };
        self.after_compare = matches!(token_type, TokenType::Compare(_));

        Ok(Token::new(token_type, position))
    }

    fn current_char(&self) -> char {
        if self.is_eof() {
            '\0'
        } else {
            self.input[self.position]
        }
    }

    fn advance(&mut self) {
        if !self.is_eof() {
            self.position += 1;
        }
    }

    fn is_eof(&self) -> bool {
        self.position >= self.input.len()
    }

    fn skip_whitespace(&mut self) {
        while !self.is_eof() && self.current_char().is_whitespace() {
            self.advance();
        }
    }

    fn is_word_char(ch: char) -> bool {
        !(ch.is_whitespace() || matches!(ch, '(' | ')' | ',') || ch == OPERATOR_DELIMITER)
    }

    /// `#op#`
    fn read_operator(&mut self) -> Result<TokenType> {
        let start = self.position;
        self.advance(); // skip opening delimiter

        let mut symbol = String::new();
        while !self.is_eof() && self.current_char() != OPERATOR_DELIMITER {
            symbol.push(self.current_char());
            self.advance();
        }

        if self.is_eof() {
            return Err(StoreError::MalformedQuery(format!(
                "Unterminated operator '{}' at {}",
                symbol, start
            )));
        }
        self.advance(); // skip closing delimiter

        CompareOp::from_symbol(&symbol)
            .map(TokenType::Compare)
            .ok_or_else(|| {
                StoreError::MalformedQuery(format!("Unknown operator '{}' at {}", symbol, start))
            })
    }

    fn read_word(&mut self) -> TokenType {
        let mut value = String::new();

        while !self.is_eof() && Self::is_word_char(self.current_char()) {
            value.push(self.current_char());
            self.advance();
        }

        if value == "*" {
            return TokenType::Star;
        }
        // The right-hand side of a comparison is always a value
        if !self.after_compare {
            if let Some(keyword) = Keyword::from_word(&value) {
                return TokenType::Keyword(keyword);
            }
        }
        if is_placeholder_label(&value, &self.literal_prefix) {
            return TokenType::Placeholder(value);
        }
        TokenType::Word(value)
    }
}
