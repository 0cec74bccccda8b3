//! RcDoc-based pretty-printer with termcolor annotations for any [`TermType`].
//!
//! Role
//! - Convert a term whose leaves implement [`Display`] into an annotated document suitable for
//!   width-aware rendering.
//! - Provide colored output for terminals (TTY-aware) and plain strings for logs/tests.
//!
//! Layout
//! - `Indexed` renders as `[a, b]`, `Fixed` as `(a, b)`, `Keyed` as `{k: v}` in ascending key
//!   order. Groups break onto indented lines when they do not fit the width.
//! - Brackets are colored by the height of the subtree they enclose, so matching pairs share a
//!   color.
//!
//! Performance
//! - The document is built with the iterative [`walker::fold`], O(n) in term size.
use std::fmt::Display;
use std::io::{self, Write};

use pretty::{RcDoc, RenderAnnotated};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::syntax::Syntax;
use crate::term::TermType;
use crate::walker;

/// Styles used to annotate parts of the pretty-printed document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    /// Commas and colons.
    Punct,
    /// Brackets, colored by subtree height.
    Bracket(u8),
    /// Names of keyed children.
    Key,
    /// Leaf payloads.
    Leaf,
}

impl Style {
    fn to_color_spec(self) -> ColorSpec {
        let mut s = ColorSpec::new();
        match self {
            Style::Punct => {
                s.set_dimmed(true);
            }
            Style::Bracket(height) => {
                let fg = match height % 6 {
                    0 => Color::Blue,
                    1 => Color::Green,
                    2 => Color::White,
                    3 => Color::Yellow,
                    4 => Color::Red,
                    5 => Color::Magenta,
                    _ => unreachable!(),
                };
                s.set_fg(Some(fg)).set_dimmed(true);
            }
            Style::Key => {
                s.set_fg(Some(Color::Cyan)).set_bold(true);
            }
            Style::Leaf => {
                s.set_fg(Some(Color::Green));
            }
        }
        s
    }
}

type Doc = RcDoc<'static, Style>;

fn punct(s: &'static str) -> Doc {
    RcDoc::as_string(s).annotate(Style::Punct)
}

fn bracket(s: &'static str, height: u8) -> Doc {
    RcDoc::as_string(s).annotate(Style::Bracket(height))
}

/// `open item, item, ... close`, breaking after `open` and after each comma when too wide.
fn delimited(open: &'static str, close: &'static str, items: Vec<Doc>, height: u8) -> Doc {
    if items.is_empty() {
        return bracket(open, height).append(bracket(close, height));
    }

    let mut body = RcDoc::nil();
    for (i, item) in items.into_iter().enumerate() {
        if i > 0 {
            body = body.append(punct(",")).append(RcDoc::line());
        }
        body = body.append(item);
    }

    bracket(open, height)
        .append(RcDoc::line_().append(body).nest(2))
        .append(RcDoc::line_())
        .append(bracket(close, height))
        .group()
}

fn to_doc<T>(term: &T) -> Doc
where
    T: TermType,
    T::Leaf: Display,
{
    let (doc, _) = walker::fold(term, |shape: Syntax<(Doc, u8), &T::Leaf>| {
        let height = shape
            .children()
            .map(|(_, h)| h.saturating_add(1))
            .max()
            .unwrap_or(0);
        let doc = match shape {
            Syntax::Leaf(leaf) => RcDoc::as_string(leaf).annotate(Style::Leaf),
            Syntax::Indexed(children) => delimited(
                "[",
                "]",
                children.into_iter().map(|(d, _)| d).collect(),
                height,
            ),
            Syntax::Fixed(children) => delimited(
                "(",
                ")",
                children.into_iter().map(|(d, _)| d).collect(),
                height,
            ),
            Syntax::Keyed(children) => delimited(
                "{",
                "}",
                children
                    .into_iter()
                    .map(|(k, (d, _))| {
                        RcDoc::as_string(k)
                            .annotate(Style::Key)
                            .append(punct(":"))
                            .append(RcDoc::space())
                            .append(d)
                    })
                    .collect(),
                height,
            ),
        };
        (doc, height)
    });
    doc
}

// A writer that maps Style annotations to termcolor ColorSpec on a WriteColor sink.
struct ColorWriter<'w, W: WriteColor + Write> {
    out: &'w mut W,
}

impl<'a, 'w, W: WriteColor + Write> RenderAnnotated<'a, Style> for ColorWriter<'w, W> {
    fn push_annotation(&mut self, ann: &'a Style) -> io::Result<()> {
        self.out.set_color(&ann.to_color_spec())
    }
    fn pop_annotation(&mut self) -> io::Result<()> {
        self.out.reset()
    }
}

impl<'w, W: WriteColor + Write> pretty::Render for ColorWriter<'w, W> {
    type Error = io::Error;
    fn write_str(&mut self, s: &str) -> io::Result<usize> {
        self.out.write_all(s.as_bytes())?;
        Ok(s.len())
    }
    fn write_str_all(&mut self, s: &str) -> io::Result<()> {
        self.out.write_all(s.as_bytes())
    }
    fn fail_doc(&self) -> Self::Error {
        io::Error::other("render failed")
    }
}

fn render_to<W: WriteColor + Write>(doc: &Doc, width: usize, out: &mut W) -> io::Result<()> {
    let mut cw = ColorWriter { out };
    doc.render_raw(width, &mut cw)
}

/// Width of the terminal, or 80 if it cannot be determined.
fn terminal_width() -> usize {
    term_size::dimensions().map(|(w, _)| w).unwrap_or(80)
}

/// Pretty-printing conveniences for any term with displayable leaves.
pub trait PrettyTerm {
    /// Build an RcDoc representation of this term with style annotations.
    fn pretty_doc(&self) -> RcDoc<'static, Style>;

    /// Render this term with colors to any termcolor writer at the given width.
    fn pretty_render_to<W: WriteColor + Write>(&self, width: usize, out: &mut W) -> io::Result<()>;

    /// Print this term to stdout with colors (TTY-aware), at the terminal width.
    fn pretty_print(&self) -> io::Result<()>;

    /// Format this term into a plain string (no colors) at the given width.
    ///
    /// Panics if a leaf's `Display` implementation returns an error, as `ToString` does.
    fn pretty_string(&self, width: usize) -> String;
}

impl<T> PrettyTerm for T
where
    T: TermType,
    T::Leaf: Display,
{
    #[inline]
    fn pretty_doc(&self) -> RcDoc<'static, Style> {
        to_doc(self)
    }

    #[inline]
    fn pretty_render_to<W: WriteColor + Write>(&self, width: usize, out: &mut W) -> io::Result<()> {
        render_to(&self.pretty_doc(), width, out)
    }

    fn pretty_print(&self) -> io::Result<()> {
        let stdout = StandardStream::stdout(ColorChoice::Auto);
        let mut stdout = stdout.lock();
        self.pretty_render_to(terminal_width(), &mut stdout)?;
        writeln!(stdout)
    }

    fn pretty_string(&self, width: usize) -> String {
        let mut buf = String::new();
        self.pretty_doc()
            .render_fmt(width, &mut buf)
            .expect("a Display implementation returned an error unexpectedly");
        buf
    }
}

/// Render into a formatter at 80 columns. Used by the `Display` impls of the term types.
pub(crate) fn fmt_term<T>(term: &T, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result
where
    T: TermType,
    T::Leaf: Display,
{
    let mut w = pretty::FmtWrite::new(f);
    to_doc(term).render_raw(80, &mut w)
}

impl<L: Display> Display for crate::term::defs::Term<L> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        fmt_term(self, f)
    }
}

impl<A, L: Display> Display for crate::term::defs::Annotated<A, L> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        fmt_term(self, f)
    }
}
