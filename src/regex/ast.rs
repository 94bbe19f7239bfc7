/// An abstract syntax tree for a regular expression over symbol labels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Ast {
    /// The empty string.
    Epsilon,
    /// A literal symbol label.
    Atom(String),
    /// Concatenation of two expressions.
    Concat(Box<Ast>, Box<Ast>),
    /// Alternation between two expressions.
    Alt(Box<Ast>, Box<Ast>),
    /// Zero-or-more repetition.
    Star(Box<Ast>),
    /// One-or-more repetition.
    Plus(Box<Ast>),
    /// Optional expression.
    Opt(Box<Ast>),
}

impl Ast {
    #[must_use]
    pub fn concat(lhs: Ast, rhs: Ast) -> Ast {
        Ast::Concat(Box::new(lhs), Box::new(rhs))
    }

    #[must_use]
    pub fn alt(lhs: Ast, rhs: Ast) -> Ast {
        Ast::Alt(Box::new(lhs), Box::new(rhs))
    }

    #[must_use]
    pub fn star(inner: Ast) -> Ast {
        Ast::Star(Box::new(inner))
    }

    #[must_use]
    pub fn plus(inner: Ast) -> Ast {
        Ast::Plus(Box::new(inner))
    }

    #[must_use]
    pub fn opt(inner: Ast) -> Ast {
        Ast::Opt(Box::new(inner))
    }

    /// Parses `pattern` into an [`Ast`], the composition the teacher's
    /// `Ast::build` performs but split into its constituent lex/parse
    /// stages (see [`super::lexer::lex`] and [`super::parser::parse`]).
    pub fn build(pattern: &str) -> Result<Ast, crate::errors::Error> {
        let tokens = super::lexer::lex(pattern)?;
        let ast = super::parser::parse(&tokens)?;
        Ok(ast)
    }
}
