use crate::errors::LexError;
use crate::regex::tokens::{Token, TokenKind};

/// Lexical analysis of a regex surface string into a token stream.
///
/// Whitespace separates symbols but carries no meaning of its own —
/// concatenation is still expressed by juxtaposition of atoms, exactly as
/// the teacher's char-based lexer does, except an "atom" here is a run of
/// non-operator, non-whitespace characters rather than a single character.
///
/// # Errors
///
/// Returns a [`LexError`] on a dangling escape at end of input.
pub fn lex(input: &str) -> Result<Vec<Token>, LexError> {
    let mut tokens = Vec::new();
    let chars: Vec<char> = input.chars().collect();
    let mut i = 0usize;

    while i < chars.len() {
        let ch = chars[i];
        let column = i + 1;
        if ch.is_whitespace() {
            i += 1;
            continue;
        }
        match ch {
            '|' => {
                tokens.push(Token::new(TokenKind::Or, column));
                i += 1;
            }
            '*' => {
                tokens.push(Token::new(TokenKind::Star, column));
                i += 1;
            }
            '+' => {
                tokens.push(Token::new(TokenKind::Plus, column));
                i += 1;
            }
            '?' => {
                tokens.push(Token::new(TokenKind::QMark, column));
                i += 1;
            }
            '(' => {
                tokens.push(Token::new(TokenKind::LParen, column));
                i += 1;
            }
            ')' => {
                tokens.push(Token::new(TokenKind::RParen, column));
                i += 1;
            }
            '$' => {
                tokens.push(Token::new(TokenKind::Epsilon, column));
                i += 1;
            }
            _ => {
                let (symbol, consumed) = read_symbol(&chars[i..], column)?;
                tokens.push(Token::new(TokenKind::Sym(symbol), column));
                i += consumed;
            }
        }
    }

    tokens.push(Token::new(TokenKind::Eos, chars.len() + 1));
    Ok(tokens)
}

/// Reads a maximal run of non-whitespace, non-operator characters as a
/// single symbol label, honoring `\` as an escape for the next character.
fn read_symbol(rest: &[char], start_column: usize) -> Result<(String, usize), LexError> {
    let mut out = String::new();
    let mut idx = 0usize;
    while idx < rest.len() {
        let ch = rest[idx];
        if ch.is_whitespace() || matches!(ch, '|' | '*' | '+' | '?' | '(' | ')' | '$') {
            break;
        }
        if ch == '\\' {
            idx += 1;
            let escaped = rest.get(idx).copied().ok_or_else(|| {
                LexError::new(start_column + idx, "dangling escape")
            })?;
            out.push(escaped);
            idx += 1;
            continue;
        }
        out.push(ch);
        idx += 1;
    }
    if out.is_empty() {
        return Err(LexError::new(start_column, "empty symbol"));
    }
    Ok((out, idx))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lexes_single_symbol() {
        let tokens = lex("a").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::new(TokenKind::Sym("a".into()), 1),
                Token::new(TokenKind::Eos, 2),
            ]
        );
    }

    #[test]
    fn lexes_whitespace_separated_union_and_star() {
        let tokens = lex("a* b*").unwrap();
        let kinds: Vec<TokenKind> = tokens.into_iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Sym("a".into()),
                TokenKind::Star,
                TokenKind::Sym("b".into()),
                TokenKind::Star,
                TokenKind::Eos,
            ]
        );
    }

    #[test]
    fn lexes_multi_char_symbol_labels() {
        let tokens = lex("edge_a | edge_b").unwrap();
        let kinds: Vec<TokenKind> = tokens.into_iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Sym("edge_a".into()),
                TokenKind::Or,
                TokenKind::Sym("edge_b".into()),
                TokenKind::Eos,
            ]
        );
    }

    #[test]
    fn lexes_epsilon() {
        let tokens = lex("$").unwrap();
        assert_eq!(tokens[0].kind, TokenKind::Epsilon);
    }

    #[test]
    fn dangling_escape_is_an_error() {
        assert!(lex("a\\").is_err());
    }
}
