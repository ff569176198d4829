//! CSS reader for custom-property declarations.
//!
//! Built on `cssparser`, so comments, strings, escapes and nested blocks are
//! tokenized the way a browser would. Themes are usually exported as a
//! `:root { ... }` block, but the reader does not depend on that:
//!
//! - declarations may sit at the top level or inside any rule or at-rule,
//!   at any depth
//! - a line may hold several declarations, and one declaration may span
//!   several lines
//! - a trailing `!important` is dropped from the value
//!
//! A declaration runs to the next `;` or the end of its block. Anything that
//! is not a custom-property declaration with a non-empty value is skipped,
//! and every line on which a parse error is reported counts once.

use std::collections::BTreeSet;

use cssparser::{
    AtRuleParser, CowRcStr, DeclarationParser, ParseError, Parser, ParserInput, ParserState,
    QualifiedRuleParser, RuleBodyItemParser, RuleBodyParser, Token,
};
use tracing::debug;

use super::{ParsedSource, RawVariables};

/// Parses CSS text into raw variables. Never fails.
pub fn parse_css(text: &str) -> ParsedSource {
    let mut input = ParserInput::new(text);
    let mut parser = Parser::new(&mut input);

    let mut reader = VariableReader::default();
    reader.read_body(&mut parser);

    ParsedSource {
        variables: reader.variables,
        skipped_lines: reader.skipped_lines.len(),
    }
}

#[derive(Default)]
struct VariableReader {
    variables: RawVariables,
    /// Zero-based lines with at least one parse error.
    skipped_lines: BTreeSet<u32>,
}

impl VariableReader {
    /// Reads declarations and nested rules until the end of the current block.
    fn read_body<'i>(&mut self, input: &mut Parser<'i, '_>) {
        let body: RuleBodyParser<'i, '_, '_, Self, (), ()> = RuleBodyParser::new(input, self);
        let failures: Vec<(u32, &'i str)> = body
            .filter_map(Result::err)
            .map(|(err, text)| (err.location.line, text))
            .collect();

        for (line, text) in failures {
            debug!(line = line + 1, content = %text.trim(), "skipping unusable CSS");
            self.skipped_lines.insert(line);
        }
    }
}

impl<'i> DeclarationParser<'i> for VariableReader {
    type Declaration = ();
    type Error = ();

    fn parse_value<'t>(
        &mut self,
        name: CowRcStr<'i>,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::Declaration, ParseError<'i, Self::Error>> {
        if !name.starts_with("--") {
            return Err(input.new_custom_error::<(), ()>(()));
        }
        let value = read_value(input)?;
        self.variables.insert(name.to_string(), value);
        Ok(())
    }
}

/// Selectors and at-rule preludes are ignored; only their blocks matter.
impl<'i> QualifiedRuleParser<'i> for VariableReader {
    type Prelude = ();
    type QualifiedRule = ();
    type Error = ();

    fn parse_prelude<'t>(
        &mut self,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::Prelude, ParseError<'i, Self::Error>> {
        while input.next().is_ok() {}
        Ok(())
    }

    fn parse_block<'t>(
        &mut self,
        _prelude: Self::Prelude,
        _start: &ParserState,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::QualifiedRule, ParseError<'i, Self::Error>> {
        self.read_body(input);
        Ok(())
    }
}

impl<'i> AtRuleParser<'i> for VariableReader {
    type Prelude = ();
    type AtRule = ();
    type Error = ();

    fn parse_prelude<'t>(
        &mut self,
        _name: CowRcStr<'i>,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::Prelude, ParseError<'i, Self::Error>> {
        while input.next().is_ok() {}
        Ok(())
    }

    fn parse_block<'t>(
        &mut self,
        _prelude: Self::Prelude,
        _start: &ParserState,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::AtRule, ParseError<'i, Self::Error>> {
        self.read_body(input);
        Ok(())
    }
}

impl<'i> RuleBodyItemParser<'i, (), ()> for VariableReader {
    fn parse_declarations(&self) -> bool {
        true
    }
    fn parse_qualified(&self) -> bool {
        true
    }
}

/// Reads a declaration value as written, minus `!important`.
///
/// The value spans from the first token after the colon to the end of the
/// last token, so surrounding whitespace and trailing comments are left out.
fn read_value<'i>(input: &mut Parser<'i, '_>) -> Result<String, ParseError<'i, ()>> {
    input.skip_whitespace();
    let start = input.position();
    let mut end = start;

    loop {
        let token = match input.next_including_whitespace() {
            Ok(token) => token.clone(),
            Err(_) => break,
        };
        match token {
            Token::WhiteSpace(_) => continue,
            Token::Delim('!')
                if input
                    .try_parse(|input| input.expect_ident_matching("important"))
                    .is_ok() =>
            {
                input.expect_exhausted()?;
                break;
            }
            Token::Function(_)
            | Token::ParenthesisBlock
            | Token::SquareBracketBlock
            | Token::CurlyBracketBlock => {
                input.parse_nested_block(|input| {
                    while input.next_including_whitespace_and_comments().is_ok() {}
                    Ok::<_, ParseError<'i, ()>>(())
                })?;
            }
            _ => {}
        }
        end = input.position();
    }

    let value = input.slice(start..end).trim();
    if value.is_empty() {
        return Err(input.new_custom_error::<(), ()>(()));
    }
    Ok(value.to_string())
}
