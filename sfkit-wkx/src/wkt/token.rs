//! WKT tokenizer.

/// One lexical token of the WKT grammar. Numbers and keywords both come out
/// as words; the parser decides which one it is looking at.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(super) enum Token<'a> {
    /// `(`
    Open,
    /// `)`
    Close,
    /// `,`
    Comma,
    /// A run of non-delimiter characters.
    Word(&'a str),
}

/// Zero-copy token stream over a WKT string.
pub(super) struct Tokens<'a> {
    rest: &'a str,
}

impl<'a> Tokens<'a> {
    pub fn new(input: &'a str) -> Self {
        Self { rest: input }
    }

    /// The unconsumed remainder of the input.
    pub fn rest(&self) -> &'a str {
        self.rest
    }

    /// The next token, without consuming it.
    pub fn peek(&self) -> Option<Token<'a>> {
        self.scan().map(|(token, _)| token)
    }

    /// Consumes and returns the next token.
    pub fn next(&mut self) -> Option<Token<'a>> {
        let (token, rest) = self.scan()?;
        self.rest = rest;
        Some(token)
    }

    fn scan(&self) -> Option<(Token<'a>, &'a str)> {
        let s = self.rest.trim_start();
        let first = s.chars().next()?;
        Some(match first {
            '(' => (Token::Open, &s[1..]),
            ')' => (Token::Close, &s[1..]),
            ',' => (Token::Comma, &s[1..]),
            _ => {
                let end = s
                    .find(|c: char| c.is_whitespace() || c == '(' || c == ')' || c == ',')
                    .unwrap_or(s.len());
                (Token::Word(&s[..end]), &s[end..])
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenizes_with_arbitrary_whitespace() {
        let mut tokens = Tokens::new("  POINT ( 1.5,-2 ) tail");
        assert_eq!(tokens.next(), Some(Token::Word("POINT")));
        assert_eq!(tokens.next(), Some(Token::Open));
        assert_eq!(tokens.next(), Some(Token::Word("1.5")));
        assert_eq!(tokens.next(), Some(Token::Comma));
        assert_eq!(tokens.next(), Some(Token::Word("-2")));
        assert_eq!(tokens.peek(), Some(Token::Close));
        assert_eq!(tokens.next(), Some(Token::Close));
        assert_eq!(tokens.rest().trim_start(), "tail");
    }
}
