//! Lexical analysis: turns the raw input string into a vector of tokens.
//!
//! The lexer is driven by an ordered list of matchers. At every cursor
//! position the matchers are tried in order and the first one that accepts
//! the current character decides what happens, so the priority of the list
//! is the only tie-breaker.

use std::fmt;

use tracing::{debug, trace};

use crate::error::{
  CompileResult, UnrecognizedCharacterSnafu, UnterminatedStringSnafu,
};

/// Kinds of tokens recognised by the front-end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
  OpenParen,
  CloseParen,
  Number,
  String,
  Name,
}

impl TokenKind {
  pub fn as_str(self) -> &'static str {
    match self {
      TokenKind::OpenParen => "open-paren",
      TokenKind::CloseParen => "close-paren",
      TokenKind::Number => "number",
      TokenKind::String => "string",
      TokenKind::Name => "name",
    }
  }
}

impl fmt::Display for TokenKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.pad(self.as_str())
  }
}

/// A lexeme together with its kind. String tokens hold the content between
/// the quotes, every other kind holds the matched characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
  pub kind: TokenKind,
  pub text: String,
}

impl Token {
  pub fn new(kind: TokenKind, text: impl Into<String>) -> Self {
    Self {
      kind,
      text: text.into(),
    }
  }
}

/// What a matcher did with the input at the cursor.
#[derive(Debug)]
struct Scan {
  /// Bytes consumed from the cursor.
  len: usize,
  token: Option<Token>,
}

impl Scan {
  fn skip(len: usize) -> Self {
    Self { len, token: None }
  }

  fn emit(len: usize, kind: TokenKind, text: &str) -> Self {
    Self {
      len,
      token: Some(Token::new(kind, text)),
    }
  }
}

/// A stateless recogniser for one lexical class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Matcher {
  Whitespace,
  OpenParen,
  CloseParen,
  String,
  Number,
  Name,
}

impl Matcher {
  /// Priority order used by [`Lexer::default`].
  pub const STANDARD: [Matcher; 6] = [
    Matcher::Whitespace,
    Matcher::OpenParen,
    Matcher::CloseParen,
    Matcher::String,
    Matcher::Number,
    Matcher::Name,
  ];

  /// Try to match at the start of `rest`. `Ok(None)` means this matcher does
  /// not apply and the next one should be tried.
  fn scan(self, rest: &str) -> CompileResult<Option<Scan>> {
    let Some(c) = rest.chars().next() else {
      return Ok(None);
    };

    let scan = match self {
      Matcher::Whitespace if is_js_whitespace(c) => Scan::skip(c.len_utf8()),
      Matcher::OpenParen if c == '(' => Scan::emit(1, TokenKind::OpenParen, "("),
      Matcher::CloseParen if c == ')' => Scan::emit(1, TokenKind::CloseParen, ")"),
      Matcher::String if c == '"' => {
        let body = &rest[1..];
        let Some(end) = body.find('"') else {
          return UnterminatedStringSnafu {
            content: excerpt(body),
          }
          .fail();
        };
        Scan::emit(end + 2, TokenKind::String, &body[..end])
      }
      Matcher::Number if c.is_ascii_digit() => {
        let len = run_length(rest, |b| b.is_ascii_digit());
        Scan::emit(len, TokenKind::Number, &rest[..len])
      }
      Matcher::Name if c.is_ascii_alphabetic() => {
        let len = run_length(rest, |b| b.is_ascii_alphabetic());
        Scan::emit(len, TokenKind::Name, &rest[..len])
      }
      _ => return Ok(None),
    };
    Ok(Some(scan))
  }
}

/// The `\s` class of JavaScript regexes: Unicode `White_Space` without
/// U+0085, plus the byte order mark.
fn is_js_whitespace(c: char) -> bool {
  c == '\u{feff}' || (c.is_whitespace() && c != '\u{85}')
}

/// Longest string literal prefix kept in an `UnterminatedString` error.
const EXCERPT_CHARS: usize = 32;

fn excerpt(s: &str) -> String {
  match s.char_indices().nth(EXCERPT_CHARS) {
    Some((end, _)) => format!("{}…", &s[..end]),
    None => s.to_string(),
  }
}

/// Length in bytes of the longest ASCII prefix satisfying `pred`.
fn run_length(s: &str, pred: impl Fn(u8) -> bool) -> usize {
  s.bytes().take_while(|&b| pred(b)).count()
}

/// Tokenizer configured with an ordered, immutable list of matchers.
#[derive(Debug, Clone)]
pub struct Lexer {
  matchers: Vec<Matcher>,
}

impl Default for Lexer {
  fn default() -> Self {
    Self::new(Matcher::STANDARD.to_vec())
  }
}

impl Lexer {
  pub fn new(matchers: Vec<Matcher>) -> Self {
    Self { matchers }
  }

  pub fn matchers(&self) -> &[Matcher] {
    &self.matchers
  }

  /// Lex the whole input, left to right, starting at position 0.
  pub fn tokenize(&self, input: &str) -> CompileResult<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut pos = 0;

    'scan: while pos < input.len() {
      let rest = &input[pos..];
      for matcher in &self.matchers {
        if let Some(scan) = matcher.scan(rest)? {
          if let Some(token) = scan.token {
            trace!(kind = %token.kind, text = %token.text, "token");
            tokens.push(token);
          }
          pos += scan.len;
          continue 'scan;
        }
      }

      let character = rest.chars().next().unwrap_or('\0');
      return UnrecognizedCharacterSnafu { character }.fail();
    }

    debug!(count = tokens.len(), "tokenized input");
    Ok(tokens)
  }
}

/// Lex `input` with the standard matcher order.
pub fn tokenize(input: &str) -> CompileResult<Vec<Token>> {
  Lexer::default().tokenize(input)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::error::CompileError;

  fn kinds(tokens: &[Token]) -> Vec<TokenKind> {
    tokens.iter().map(|t| t.kind).collect()
  }

  #[test]
  fn lexes_nested_call() {
    let tokens = tokenize("(add 2 (subtract 4 2))").unwrap();
    assert_eq!(
      kinds(&tokens),
      vec![
        TokenKind::OpenParen,
        TokenKind::Name,
        TokenKind::Number,
        TokenKind::OpenParen,
        TokenKind::Name,
        TokenKind::Number,
        TokenKind::Number,
        TokenKind::CloseParen,
        TokenKind::CloseParen,
      ]
    );
    assert_eq!(tokens[1].text, "add");
    assert_eq!(tokens[4].text, "subtract");
  }

  #[test]
  fn digit_and_letter_runs_are_maximal() {
    let tokens = tokenize("12 007 abcDEF").unwrap();
    assert_eq!(
      tokens,
      vec![
        Token::new(TokenKind::Number, "12"),
        Token::new(TokenKind::Number, "007"),
        Token::new(TokenKind::Name, "abcDEF"),
      ]
    );
  }

  #[test]
  fn adjacent_digits_and_letters_split() {
    let tokens = tokenize("ab12cd").unwrap();
    assert_eq!(
      kinds(&tokens),
      vec![TokenKind::Name, TokenKind::Number, TokenKind::Name]
    );
  }

  #[test]
  fn string_content_is_verbatim() {
    let tokens = tokenize(r#""hi (there) 42 \n""#).unwrap();
    assert_eq!(tokens, vec![Token::new(TokenKind::String, r"hi (there) 42 \n")]);
  }

  #[test]
  fn string_ends_at_first_quote() {
    let tokens = tokenize(r#""ab"cd""#);
    assert!(matches!(
      tokens,
      Err(CompileError::UnterminatedString { ref content }) if content.is_empty()
    ));

    let tokens = tokenize(r#""ab" "cd""#).unwrap();
    assert_eq!(tokens[0].text, "ab");
    assert_eq!(tokens[1].text, "cd");
  }

  #[test]
  fn empty_string_literal() {
    let tokens = tokenize(r#""""#).unwrap();
    assert_eq!(tokens, vec![Token::new(TokenKind::String, "")]);
  }

  #[test]
  fn unicode_inside_strings_is_kept() {
    let tokens = tokenize("\"héllo ✓\"").unwrap();
    assert_eq!(tokens[0].text, "héllo ✓");
  }

  #[test]
  fn whitespace_runs_are_insignificant() {
    let spaced = tokenize("( add\t\t2 \n\n  3 )").unwrap();
    let compact = tokenize("(add 2 3)").unwrap();
    assert_eq!(spaced, compact);
  }

  #[test]
  fn unicode_spaces_and_byte_order_mark_are_skipped() {
    let compact = tokenize("(add 2 3)").unwrap();
    for space in ['\u{a0}', '\u{3000}', '\u{feff}', '\u{2028}', '\u{b}'] {
      let spaced = tokenize(&format!("{space}(add{space}2{space}{space}3)")).unwrap();
      assert_eq!(spaced, compact, "U+{:04X}", space as u32);
    }
  }

  #[test]
  fn next_line_character_is_not_whitespace() {
    let err = tokenize("(add\u{85}1 2)").unwrap_err();
    assert!(matches!(
      err,
      CompileError::UnrecognizedCharacter {
        character: '\u{85}'
      }
    ));
  }

  #[test]
  fn unterminated_string_content_is_truncated() {
    let input = format!("\"{}", "x".repeat(1000));
    let err = tokenize(&input).unwrap_err();
    let CompileError::UnterminatedString { content } = err else {
      panic!("expected an unterminated string");
    };
    assert_eq!(content, format!("{}…", "x".repeat(EXCERPT_CHARS)));
  }

  #[test]
  fn unterminated_string_fails() {
    let err = tokenize(r#"(concat "abc"#).unwrap_err();
    assert!(matches!(
      err,
      CompileError::UnterminatedString { ref content } if content == "abc"
    ));
  }

  #[test]
  fn unrecognized_character_reports_the_character() {
    let err = tokenize("(add 2 +)").unwrap_err();
    assert!(matches!(
      err,
      CompileError::UnrecognizedCharacter { character: '+' }
    ));
    assert_eq!(err.to_string(), "unrecognized character '+'");
  }

  #[test]
  fn unrecognized_multibyte_character() {
    let err = tokenize("(λ 1)").unwrap_err();
    assert!(matches!(
      err,
      CompileError::UnrecognizedCharacter { character: 'λ' }
    ));
  }

  #[test]
  fn empty_input_has_no_tokens() {
    assert!(tokenize("").unwrap().is_empty());
    assert!(tokenize(" \t\n").unwrap().is_empty());
  }

  #[test]
  fn custom_matcher_list_limits_the_language() {
    let lexer = Lexer::new(vec![
      Matcher::Whitespace,
      Matcher::OpenParen,
      Matcher::CloseParen,
      Matcher::Number,
    ]);
    assert_eq!(lexer.tokenize("(1 2)").unwrap().len(), 4);
    assert!(matches!(
      lexer.tokenize("(add 1)"),
      Err(CompileError::UnrecognizedCharacter { character: 'a' })
    ));
  }

  #[test]
  fn default_lexer_uses_standard_order() {
    assert_eq!(Lexer::default().matchers(), &Matcher::STANDARD);
  }
}
