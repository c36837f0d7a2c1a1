use crate::LineTag;
use crate::SourceLine;

/// Rebuild the source without the lines that were turned into project
/// configuration.
///
/// Before `boundary` every line except markers and directives is kept.
/// From `boundary` on every line is kept untouched, directives included.
pub fn rewrite_source(lines: &[SourceLine<'_>], tags: &[LineTag], boundary: usize) -> String {
	let mut out = String::new();

	for (line, tag) in lines.iter().zip(tags) {
		let consumed =
			line.index < boundary && matches!(tag, LineTag::Marker | LineTag::Directive);

		if !consumed {
			out.push_str(line.raw);
		}
	}

	out
}
