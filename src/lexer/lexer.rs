use tracing::{debug, instrument, trace, warn};

use super::{
    token::{DATA_TYPES, KEYWORDS, ONE_SYMBOL_TOKENS, TWO_SYMBOLS_TOKENS},
    Literal, Span, Token, TokenKind,
};

#[derive(Debug)]
pub struct Lexer {
    tokens: Vec<Token>,
    index: usize,
    /// Start of the first string found to have no closing quote.
    unterminated_from: Option<usize>,
}

impl Lexer {
    fn new() -> Self {
        Self {
            tokens: vec![],
            index: 0,
            unterminated_from: None,
        }
    }

    /// Pushes a token covering the next `len` characters and moves past them.
    fn new_token(&mut self, kind: TokenKind, len: usize) {
        let span = Span {
            start: self.index,
            end: self.index + len,
        };
        trace!(start = span.start, end = span.end, token = %kind, "token");
        self.tokens.push(Token { kind, span });
        self.index += len;
    }

    /// digits ("." digits)?
    fn parse_number(&mut self, chars: &[char]) {
        let int_len = chars.iter().take_while(|c| c.is_ascii_digit()).count();
        let frac_len = match chars.get(int_len) {
            Some('.') => chars[int_len + 1..]
                .iter()
                .take_while(|c| c.is_ascii_digit())
                .count(),
            _ => 0,
        };

        if frac_len > 0 {
            let len = int_len + 1 + frac_len;
            let s: String = chars[..len].iter().collect();
            let value = s.parse().unwrap_or(f64::INFINITY);
            self.new_token(TokenKind::Literal(Literal::Float(value)), len);
            return;
        }

        let s: String = chars[..int_len].iter().collect();
        let literal = match s.parse::<i64>() {
            Ok(value) => Literal::Integer(value),
            Err(_) => {
                warn!(literal = %s, "integer literal out of range, lexing it as a float");
                Literal::Float(s.parse().unwrap_or(f64::INFINITY))
            }
        };
        self.new_token(TokenKind::Literal(literal), int_len);
    }

    /// Scans a double-quoted string starting at `chars[0]`, resolving escapes.
    /// An unterminated string leaves the quote as an unknown character.
    ///
    /// Once a scan from `start` runs off the end, every later quote was part
    /// of an escape pair in that scan, so scanning from it resumes in the same
    /// state and cannot terminate either.
    fn parse_string(&mut self, chars: &[char]) {
        if self.unterminated_from.is_some_and(|start| self.index > start) {
            self.new_token(TokenKind::Unknown('"'), 1);
            return;
        }

        let mut value = String::new();
        let mut i = 1;

        while i < chars.len() {
            match chars[i] {
                '"' => {
                    self.new_token(TokenKind::Literal(Literal::Text(value)), i + 1);
                    return;
                }
                '\\' if i + 1 < chars.len() => {
                    value.push(match chars[i + 1] {
                        'n' => '\n',
                        't' => '\t',
                        'r' => '\r',
                        '0' => '\0',
                        c => c,
                    });
                    i += 2;
                }
                c => {
                    value.push(c);
                    i += 1;
                }
            }
        }

        warn!(at = self.index, "unterminated string literal");
        self.unterminated_from = Some(self.index);
        self.new_token(TokenKind::Unknown('"'), 1);
    }

    fn parse_identifier(&mut self, chars: &[char]) {
        let s: String = chars
            .iter()
            .take_while(|&&c| c.is_ascii_alphanumeric() || c == '_')
            .collect();
        let len = s.chars().count();

        if let Some(kind) = KEYWORDS.get(s.as_str()) {
            self.new_token(kind.clone(), len);
        } else if let Some(kind) = DATA_TYPES.get(s.as_str()) {
            self.new_token(kind.clone(), len);
        } else {
            self.new_token(TokenKind::Identifier(s), len);
        }
    }

    fn _tokenize(&mut self, s: &str) {
        let chars: Vec<_> = s.chars().collect();

        while self.index < chars.len() {
            let c = chars[self.index];
            let c2 = chars[self.index..].iter().take(2).collect::<String>();

            if c.is_whitespace() {
                self.index += 1;
            } else if let Some(kind) = TWO_SYMBOLS_TOKENS.get(c2.as_str()) {
                self.new_token(kind.clone(), 2);
            } else if let Some(kind) = ONE_SYMBOL_TOKENS.get(&c) {
                self.new_token(kind.clone(), 1);
            } else if c.is_ascii_digit() {
                self.parse_number(&chars[self.index..]);
            } else if c == '"' {
                self.parse_string(&chars[self.index..]);
            } else if c.is_ascii_alphabetic() || c == '_' {
                self.parse_identifier(&chars[self.index..]);
            } else {
                self.new_token(TokenKind::Unknown(c), 1);
            }
        }
    }

    /// Splits `s` into tokens. Never fails: characters that start no token
    /// become `TokenKind::Unknown`.
    #[instrument(level = "debug", skip_all, fields(len = s.len()))]
    pub fn tokenize(s: &str) -> Vec<Token> {
        let mut lexer = Lexer::new();
        lexer._tokenize(s);
        debug!(count = lexer.tokens.len(), "tokenized");

        lexer.tokens
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use super::*;
    use crate::lexer::Operator;

    fn kinds(s: &str) -> Vec<TokenKind> {
        Lexer::tokenize(s).into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn number_without_fraction_digits_stops_at_the_dot() {
        assert_eq!(
            kinds("1."),
            vec![
                TokenKind::Literal(Literal::Integer(1)),
                TokenKind::Unknown('.'),
            ]
        );
    }

    #[test]
    fn huge_integer_degrades_to_float() {
        let k = kinds("99999999999999999999");
        assert!(matches!(k[..], [TokenKind::Literal(Literal::Float(_))]));
    }

    #[test]
    fn spans_track_character_offsets() {
        let tokens = Lexer::tokenize("é == 1");
        assert_eq!(tokens[0].kind, TokenKind::Unknown('é'));
        assert_eq!(tokens[1].kind, TokenKind::Operator(Operator::DoubleEqual));
        assert_eq!(tokens[1].span, Span { start: 2, end: 4 });
        assert_eq!(tokens[2].span, Span { start: 5, end: 6 });
    }

    #[test]
    fn run_of_escaped_quotes_lexes_in_linear_time() {
        let pairs = 50_000;
        let input = format!("\"{}", "\\\"".repeat(pairs));

        let started = Instant::now();
        let tokens = Lexer::tokenize(&input);
        let elapsed = started.elapsed();

        assert_eq!(tokens.len(), 2 * pairs + 1);
        assert_eq!(tokens[0].kind, TokenKind::Unknown('"'));
        for pair in tokens[1..].chunks(2) {
            assert_eq!(pair[0].kind, TokenKind::Unknown('\\'));
            assert_eq!(pair[1].kind, TokenKind::Unknown('"'));
        }
        assert!(elapsed < Duration::from_secs(5), "took {elapsed:?}");
    }

    #[test]
    fn quote_inside_unterminated_string_stays_unknown() {
        assert_eq!(
            kinds("\"a\\\"b"),
            vec![
                TokenKind::Unknown('"'),
                TokenKind::Identifier("a".to_string()),
                TokenKind::Unknown('\\'),
                TokenKind::Unknown('"'),
                TokenKind::Identifier("b".to_string()),
            ]
        );
    }

    #[test]
    fn unterminated_string_leaves_quote_unknown() {
        assert_eq!(
            kinds("\"ab"),
            vec![
                TokenKind::Unknown('"'),
                TokenKind::Identifier("ab".to_string()),
            ]
        );
    }
}
