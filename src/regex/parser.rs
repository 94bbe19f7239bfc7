use crate::errors::{ParseError, ParseErrorKind};
use crate::regex::ast::Ast;
use crate::regex::tokens::{Token, TokenKind};

/// Converts a token stream into an [`Ast`] using the same recursive-descent
/// shape as the teacher's `core::parser`: alternation of concatenations of
/// postfix-decorated atoms.
pub fn parse(tokens: &[Token]) -> Result<Ast, ParseError> {
    let mut parser = Parser::new(tokens);
    let ast = parser.parse_regex()?;
    parser.expect(TokenKind::Eos)?;
    Ok(ast)
}

struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [Token]) -> Self {
        Self { tokens, pos: 0 }
    }

    fn parse_regex(&mut self) -> Result<Ast, ParseError> {
        self.parse_alt()
    }

    fn parse_alt(&mut self) -> Result<Ast, ParseError> {
        let mut node = self.parse_concat()?;
        while self.matches(TokenKind::Or) {
            let rhs = self.parse_concat()?;
            node = Ast::alt(node, rhs);
        }
        Ok(node)
    }

    fn parse_concat(&mut self) -> Result<Ast, ParseError> {
        let mut nodes = Vec::new();
        while self.can_start_atom() {
            nodes.push(self.parse_repeat()?);
        }
        match nodes.len() {
            0 => {
                if matches!(
                    self.peek_kind(),
                    Some(TokenKind::Star | TokenKind::Plus | TokenKind::QMark)
                ) {
                    Err(self.error_here(ParseErrorKind::MisplacedPostfix))
                } else {
                    Err(self.error_here(ParseErrorKind::EmptyAlternative))
                }
            }
            1 => Ok(nodes.remove(0)),
            _ => Ok(chain_concat(nodes)),
        }
    }

    fn parse_repeat(&mut self) -> Result<Ast, ParseError> {
        let mut node = self.parse_atom()?;
        while let Some(apply) = self.next_repetition() {
            node = apply(node);
        }
        Ok(node)
    }

    fn can_start_atom(&self) -> bool {
        matches!(
            self.peek_kind(),
            Some(TokenKind::Sym(_)) | Some(TokenKind::Epsilon) | Some(TokenKind::LParen)
        )
    }

    fn parse_atom(&mut self) -> Result<Ast, ParseError> {
        match self.peek_kind_cloned() {
            Some(TokenKind::Sym(s)) => {
                self.advance();
                Ok(Ast::Atom(s))
            }
            Some(TokenKind::Epsilon) => {
                self.advance();
                Ok(Ast::Epsilon)
            }
            Some(TokenKind::LParen) => {
                self.advance();
                let node = self.parse_regex()?;
                self.expect(TokenKind::RParen)?;
                Ok(node)
            }
            Some(TokenKind::RParen) => {
                Err(self.error_here(ParseErrorKind::UnexpectedToken { found: ")".into() }))
            }
            Some(TokenKind::Eos) | None => Err(self.error_here(ParseErrorKind::UnexpectedEos)),
            Some(other) => Err(self.error_here(ParseErrorKind::UnexpectedToken {
                found: other.to_string(),
            })),
        }
    }

    fn next_repetition(&mut self) -> Option<fn(Ast) -> Ast> {
        let kind = match self.peek_kind() {
            Some(kind @ (TokenKind::Star | TokenKind::Plus | TokenKind::QMark)) => kind.clone(),
            _ => return None,
        };

        self.advance();
        Some(match kind {
            TokenKind::Star => Ast::star,
            TokenKind::Plus => Ast::plus,
            TokenKind::QMark => Ast::opt,
            _ => unreachable!("filtered above"),
        })
    }

    fn matches(&mut self, kind: TokenKind) -> bool {
        if self.peek_kind() == Some(&kind) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: TokenKind) -> Result<(), ParseError> {
        if self.peek_kind() == Some(&kind) {
            self.pos += 1;
            Ok(())
        } else {
            Err(self.unexpected_token_error())
        }
    }

    fn unexpected_token_error(&self) -> ParseError {
        match self.peek() {
            Some(tok) => ParseError::new(
                tok.pos,
                ParseErrorKind::UnexpectedToken {
                    found: tok.kind.to_string(),
                },
            ),
            None => ParseError::new(self.last_column(), ParseErrorKind::UnexpectedEos),
        }
    }

    fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos)
    }

    fn peek_kind(&self) -> Option<&TokenKind> {
        self.peek().map(|tok| &tok.kind)
    }

    fn peek_kind_cloned(&self) -> Option<TokenKind> {
        self.peek().map(|tok| tok.kind.clone())
    }

    fn advance(&mut self) -> Option<&'a Token> {
        let token = self.peek();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn error_here(&self, kind: ParseErrorKind) -> ParseError {
        let column = self
            .peek()
            .map(|t| t.pos)
            .unwrap_or_else(|| self.last_column());
        ParseError::new(column, kind)
    }

    fn last_column(&self) -> usize {
        self.tokens.last().map(|tok| tok.pos).unwrap_or_default()
    }
}

fn chain_concat(nodes: Vec<Ast>) -> Ast {
    let mut it = nodes.into_iter();
    let mut acc = it.next().expect("chain_concat requires a non-empty vector");
    for node in it {
        acc = Ast::concat(acc, node);
    }
    acc
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::regex::lexer;

    fn parse_str(input: &str) -> Ast {
        let tokens = lexer::lex(input).unwrap();
        parse(&tokens).unwrap()
    }

    #[test]
    fn parses_alternation() {
        assert_eq!(
            parse_str("a | b"),
            Ast::Alt(Box::new(Ast::Atom("a".into())), Box::new(Ast::Atom("b".into()))),
        );
    }

    #[test]
    fn parses_concatenation() {
        assert_eq!(
            parse_str("a b"),
            Ast::Concat(Box::new(Ast::Atom("a".into())), Box::new(Ast::Atom("b".into()))),
        );
    }

    #[test]
    fn parses_star() {
        assert_eq!(parse_str("a*"), Ast::Star(Box::new(Ast::Atom("a".into()))));
    }

    #[test]
    fn parses_grouping_and_precedence() {
        assert_eq!(
            parse_str("(a | b)* a b b"),
            Ast::Concat(
                Box::new(Ast::Concat(
                    Box::new(Ast::Concat(
                        Box::new(Ast::Star(Box::new(Ast::Alt(
                            Box::new(Ast::Atom("a".into())),
                            Box::new(Ast::Atom("b".into())),
                        )))),
                        Box::new(Ast::Atom("a".into())),
                    )),
                    Box::new(Ast::Atom("b".into())),
                )),
                Box::new(Ast::Atom("b".into())),
            ),
        );
    }

    #[test]
    fn parses_epsilon() {
        assert_eq!(parse_str("$"), Ast::Epsilon);
    }

    #[test]
    fn rejects_misplaced_postfix() {
        let tokens = lexer::lex("* a").unwrap();
        assert!(parse(&tokens).is_err());
    }

    #[test]
    fn rejects_unclosed_group() {
        let tokens = lexer::lex("(a").unwrap();
        assert!(parse(&tokens).is_err());
    }
}
