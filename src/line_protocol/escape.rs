//! Escaping policy for string content placed inside a line.
//!
//! The steps run in the order listed in [`ESCAPE_POLICY`]. Later steps rely on
//! the earlier ones: whitespace is collapsed and trimmed before spaces are
//! escaped, so the final step never sees a run of spaces or an edge space.
//!
//! Structural characters are removed rather than escaped. Strict line-protocol
//! parsers expect escaped commas and quotes instead, so the output is lossy for
//! those characters.

/// Characters removed from string content before it is placed on the wire.
pub const STRUCTURAL_CHARS: &[char] = &['\n', '\r', '"', '\'', '{', '}', '[', ']', '\\', ','];

/// Replacement for every remaining space.
pub const ESCAPED_SPACE: &str = "\\ ";

/// One step of the escaping policy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EscapeStep {
    /// Remove every character in [`STRUCTURAL_CHARS`].
    StripStructural,
    /// Replace runs of two or more whitespace characters with one space.
    CollapseWhitespace,
    /// Remove leading and trailing whitespace.
    Trim,
    /// Replace each space with [`ESCAPED_SPACE`].
    EscapeSpaces,
}

/// The escaping steps, in application order.
pub const ESCAPE_POLICY: [EscapeStep; 4] = [
    EscapeStep::StripStructural,
    EscapeStep::CollapseWhitespace,
    EscapeStep::Trim,
    EscapeStep::EscapeSpaces,
];

impl EscapeStep {
    fn apply(self, input: &str) -> String {
        match self {
            EscapeStep::StripStructural => input
                .chars()
                .filter(|c| !STRUCTURAL_CHARS.contains(c))
                .collect(),
            EscapeStep::CollapseWhitespace => collapse_whitespace(input),
            EscapeStep::Trim => input.trim().to_owned(),
            EscapeStep::EscapeSpaces => input.replace(' ', ESCAPED_SPACE),
        }
    }
}

fn collapse_whitespace(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut run = String::new();
    for c in input.chars() {
        if c.is_whitespace() {
            run.push(c);
            continue;
        }
        flush_run(&mut out, &mut run);
        out.push(c);
    }
    flush_run(&mut out, &mut run);
    out
}

fn flush_run(out: &mut String, run: &mut String) {
    match run.chars().count() {
        0 => {}
        1 => out.push_str(run),
        _ => out.push(' '),
    }
    run.clear();
}

/// Apply [`ESCAPE_POLICY`] to `input`.
pub fn escape(input: &str) -> String {
    ESCAPE_POLICY
        .iter()
        .fold(input.to_owned(), |acc, step| step.apply(&acc))
}
