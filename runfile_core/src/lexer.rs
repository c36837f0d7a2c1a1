use logos::Logos;

/// Raw tokens produced by logos for the comment-relevant parts of a single
/// physical line. Anything not listed here is an error token, which the
/// scanner treats as ordinary code.
#[derive(Logos, Debug, PartialEq)]
enum RawToken {
	#[token("/*")]
	BlockCommentOpen,
	#[token("*/")]
	BlockCommentClose,
	#[token("//")]
	LineComment,
	#[regex(r"[ \t\r\f\x0B\u{FEFF}]+")]
	Whitespace,
	#[regex(r#""([^"\\\n]|\\.)*""#)]
	StringLiteral,
	/// `@"..."` where backslashes are literal and `""` is an escaped quote.
	#[regex(r#"@\$?"([^"]|"")*""#)]
	VerbatimStringLiteral,
	#[regex(r"'([^'\\\n]|\\.)*'")]
	CharLiteral,
}

/// What a single line contains once comments are accounted for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct LineScan {
	/// The line holds something other than whitespace and comments.
	pub has_code: bool,
	/// A block comment is still open at the end of the line.
	pub ends_in_block_comment: bool,
}

/// Walk one line of text and report whether it contains code, threading the
/// block-comment state in from the previous line.
///
/// Block comments do not nest: a `/*` inside an open comment is inert and the
/// first `*/` closes it.
pub(crate) fn scan_line(text: &str, starts_in_block_comment: bool) -> LineScan {
	let mut in_block = starts_in_block_comment;
	let mut has_code = false;
	let mut rest = text;

	'outer: while !rest.is_empty() {
		if in_block {
			match rest.find("*/") {
				Some(close) => {
					in_block = false;
					rest = &rest[close + 2..];
					continue;
				}
				None => break,
			}
		}

		let mut lexer = RawToken::lexer(rest);

		while let Some(token) = lexer.next() {
			match token {
				Ok(RawToken::Whitespace) => {}
				Ok(RawToken::LineComment) => break 'outer,
				Ok(RawToken::BlockCommentOpen) => {
					in_block = true;
					rest = &rest[lexer.span().end..];
					continue 'outer;
				}
				// A stray close outside a comment is code (e.g. `a */ b`).
				Ok(
					RawToken::BlockCommentClose
					| RawToken::StringLiteral
					| RawToken::VerbatimStringLiteral
					| RawToken::CharLiteral,
				)
				| Err(()) => has_code = true,
			}
		}

		break;
	}

	LineScan {
		has_code,
		ends_in_block_comment: in_block,
	}
}
