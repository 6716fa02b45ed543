//! Tokenizer for raw model text.
//!
//! Comments and brace blocks are recognized here so that later stages never
//! look inside them.

use winnow::{
    Parser as _,
    combinator::{alt, cut_err, preceded, repeat},
    error::{ContextError, ErrMode},
    stream::{LocatingSlice, Location as _},
    token::take_while,
};

use crate::{
    Span,
    error::{Diagnostic, ErrorCode},
};

pub(crate) type Input<'a> = LocatingSlice<&'a str>;
pub(crate) type IResult<O> = std::result::Result<O, ErrMode<ContextError>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Token<'a> {
    Whitespace,
    Comment,
    Newline,
    Semicolon,
    /// A `{...}` block with its braces, copied verbatim.
    Block(&'a str),
    /// A `}` with no `{` to close.
    CloseBrace,
    /// A run of statement characters.
    Text(&'a str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct PositionedToken<'a> {
    pub token: Token<'a>,
    pub span: Span,
}

fn whitespace<'a>(input: &mut Input<'a>) -> IResult<Token<'a>> {
    take_while(1.., [' ', '\t', '\r'])
        .value(Token::Whitespace)
        .parse_next(input)
}

fn line_comment<'a>(input: &mut Input<'a>) -> IResult<Token<'a>> {
    preceded('#', take_while(0.., |c: char| c != '\n'))
        .value(Token::Comment)
        .parse_next(input)
}

fn newline<'a>(input: &mut Input<'a>) -> IResult<Token<'a>> {
    '\n'.value(Token::Newline).parse_next(input)
}

fn semicolon<'a>(input: &mut Input<'a>) -> IResult<Token<'a>> {
    ';'.value(Token::Semicolon).parse_next(input)
}

/// A balanced `{...}` block, nested blocks included.
///
/// Once the `{` is seen a missing `}` is a hard failure.
pub(crate) fn brace_block<'a>(input: &mut Input<'a>) -> IResult<&'a str> {
    (
        '{',
        repeat::<_, _, (), _, _>(
            0..,
            alt((
                brace_block.void(),
                take_while(1.., |c: char| c != '{' && c != '}').void(),
            )),
        ),
        cut_err('}'),
    )
        .take()
        .parse_next(input)
}

fn stray_close_brace<'a>(input: &mut Input<'a>) -> IResult<Token<'a>> {
    '}'.value(Token::CloseBrace).parse_next(input)
}

fn text<'a>(input: &mut Input<'a>) -> IResult<Token<'a>> {
    take_while(1.., |c: char| {
        !matches!(c, ' ' | '\t' | '\r' | '\n' | '#' | ';' | '{' | '}')
    })
    .map(Token::Text)
    .parse_next(input)
}

fn positioned_token<'a>(input: &mut Input<'a>) -> IResult<PositionedToken<'a>> {
    let start = input.current_token_start();
    let token = alt((
        whitespace,
        line_comment,
        newline,
        semicolon,
        brace_block.map(Token::Block),
        stray_close_brace,
        text,
    ))
    .parse_next(input)?;
    let end = input.previous_token_end();
    Ok(PositionedToken {
        token,
        span: Span::new(start..end),
    })
}

/// Split `source` into tokens whose spans start at byte offset `base`.
pub(crate) fn tokenize(source: &str, base: usize) -> Result<Vec<PositionedToken<'_>>, Diagnostic> {
    let mut input = LocatingSlice::new(source);
    let mut tokens = Vec::new();

    while !input.is_empty() {
        let start = input.current_token_start();
        match positioned_token(&mut input) {
            Ok(PositionedToken { token, span }) => tokens.push(PositionedToken {
                token,
                span: Span::new(base + span.start()..base + span.end()),
            }),
            // Every other character starts a token, so only an unclosed `{` fails.
            Err(_) => {
                let offset = base + start;
                return Err(Diagnostic::error("unclosed `{`")
                    .with_code(ErrorCode::E001)
                    .with_label(Span::new(offset..offset + 1), "this `{` is never closed")
                    .with_help("add the missing `}`"));
            }
        }
    }

    Ok(tokens)
}
