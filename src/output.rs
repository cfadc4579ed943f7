//! Output formatting for search results and index reports

use crate::index::{DocIndex, ObjectLocation, TermHit, Violation};
use crate::query::{MatchKind, SearchResult};
use serde::Serialize;
use std::io::{self, Write};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// Colour choice for stdout
pub fn color_choice(color: bool) -> ColorChoice {
    if color {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    }
}

pub fn stdout(color: bool) -> StandardStream {
    StandardStream::stdout(color_choice(color))
}

/// Write any serializable value as a pretty JSON document
pub fn print_json<W: Write, T: Serialize + ?Sized>(out: &mut W, value: &T) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)
}

/// One result per line:
/// `score  title  docname#anchor` followed by an indented description
pub fn print_results<W: WriteColor>(out: &mut W, results: &[SearchResult]) -> io::Result<()> {
    for r in results {
        out.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
        write!(out, "{:>4}", r.score)?;
        out.reset()?;

        write!(out, "  ")?;
        out.set_color(ColorSpec::new().set_fg(Some(kind_color(r.kind))).set_bold(true))?;
        write!(out, "{}", r.title)?;
        out.reset()?;

        write!(out, "  ")?;
        out.set_color(ColorSpec::new().set_fg(Some(Color::Magenta)))?;
        write!(out, "{}", r.docname)?;
        if let Some(anchor) = &r.anchor {
            write!(out, "#{}", anchor)?;
        }
        out.reset()?;
        writeln!(out)?;

        if let Some(desc) = &r.description {
            writeln!(out, "      {}", desc)?;
        }
    }
    Ok(())
}

fn kind_color(kind: MatchKind) -> Color {
    match kind {
        MatchKind::Title => Color::Yellow,
        MatchKind::Object => Color::Cyan,
        MatchKind::Text => Color::Blue,
    }
}

/// Pages containing a raw term, title hits marked with `*`
pub fn print_lookup<W: WriteColor>(
    out: &mut W,
    index: &DocIndex,
    term: &str,
    hits: &[TermHit],
) -> io::Result<()> {
    if hits.is_empty() {
        writeln!(out, "No pages contain {:?}", term)?;
        return Ok(());
    }

    for hit in hits {
        let Some(page) = index.page(hit.page) else {
            continue;
        };
        if hit.in_title {
            out.set_color(ColorSpec::new().set_fg(Some(Color::Yellow)).set_bold(true))?;
            write!(out, "* ")?;
            out.reset()?;
        } else {
            write!(out, "  ")?;
        }
        out.set_color(ColorSpec::new().set_fg(Some(Color::Magenta)))?;
        write!(out, "{}", page.docname)?;
        out.reset()?;
        writeln!(out, "  {}", page.title)?;
    }
    Ok(())
}

/// Object listing: `role  fullname  docname#anchor`
pub fn print_objects<W: WriteColor>(out: &mut W, objects: &[&ObjectLocation]) -> io::Result<()> {
    let width = objects.iter().map(|o| o.role.len()).max().unwrap_or(0);

    for obj in objects {
        out.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
        write!(out, "{:<width$}", obj.role, width = width)?;
        out.reset()?;

        write!(out, "  ")?;
        out.set_color(ColorSpec::new().set_fg(Some(Color::Cyan)).set_bold(true))?;
        write!(out, "{}", obj.fullname)?;
        out.reset()?;

        write!(out, "  ")?;
        out.set_color(ColorSpec::new().set_fg(Some(Color::Magenta)))?;
        writeln!(out, "{}#{}", obj.docname, obj.anchor)?;
        out.reset()?;
    }
    Ok(())
}

/// A resolved cross-reference target
pub fn print_resolved<W: WriteColor>(
    out: &mut W,
    location: &ObjectLocation,
    suffix: &str,
) -> io::Result<()> {
    out.set_color(ColorSpec::new().set_fg(Some(Color::Cyan)).set_bold(true))?;
    write!(out, "{}", location.fullname)?;
    out.reset()?;
    writeln!(out, " ({})", location.label)?;
    writeln!(out, "{}", location.url(suffix))?;
    Ok(())
}

/// Validation report, or a confirmation line when the index is sound
pub fn print_violations<W: WriteColor>(out: &mut W, violations: &[Violation]) -> io::Result<()> {
    if violations.is_empty() {
        out.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
        writeln!(out, "Index OK")?;
        out.reset()?;
        return Ok(());
    }

    for v in violations {
        out.set_color(ColorSpec::new().set_fg(Some(Color::Red)).set_bold(true))?;
        write!(out, "error")?;
        out.reset()?;
        writeln!(out, ": {}", v)?;
    }
    writeln!(out, "{} violation(s)", violations.len())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::{IndexBuilder, Inventory, priority};
    use termcolor::NoColor;

    fn render<F>(f: F) -> String
    where
        F: FnOnce(&mut NoColor<Vec<u8>>) -> io::Result<()>,
    {
        let mut out = NoColor::new(Vec::new());
        f(&mut out).unwrap();
        String::from_utf8(out.into_inner()).unwrap()
    }

    fn result() -> SearchResult {
        SearchResult {
            page: 1,
            docname: "api/camera".into(),
            filename: "api/camera.rst".into(),
            title: "scanning.camera.Instrument".into(),
            anchor: Some("scanning.camera.Instrument".into()),
            description: Some("Python class, in Camera".into()),
            score: 16,
            kind: MatchKind::Object,
        }
    }

    #[test]
    fn test_print_results() {
        let text = render(|out| print_results(out, &[result()]));
        assert_eq!(
            text,
            "  16  scanning.camera.Instrument  api/camera#scanning.camera.Instrument\n      Python class, in Camera\n"
        );
    }

    #[test]
    fn test_print_json() {
        let mut buf = Vec::new();
        print_json(&mut buf, &[result()]).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value[0]["kind"], "object");
        assert_eq!(value[0]["score"], 16);
        assert_eq!(value[0]["anchor"], "scanning.camera.Instrument");
    }

    #[test]
    fn test_print_lookup() {
        let mut b = IndexBuilder::new();
        let index_page = b.add_page("index", "index.rst", "Overview");
        b.add_term(index_page, "camera");
        let api = b.add_page("api/camera", "api/camera.rst", "Camera");
        b.add_term(api, "camera");
        let index = b.build();

        let hits = index.lookup("camera");
        let text = render(|out| print_lookup(out, &index, "camera", &hits));
        assert_eq!(text, "* api/camera  Camera\n  index  Overview\n");

        let none = render(|out| print_lookup(out, &index, "lens", &[]));
        assert_eq!(none, "No pages contain \"lens\"\n");
    }

    #[test]
    fn test_print_objects_and_resolved() {
        let mut b = IndexBuilder::new();
        let class = b.add_object_type("py", "class", "Python class");
        let method = b.add_object_type("py", "method", "Python method");
        let page = b.add_page("api/camera", "api/camera.rst", "Camera");
        b.add_object("scanning.camera", "Instrument", page, class, priority::DEFAULT, "")
            .add_object("scanning.camera.Instrument", "add_module", page, method, priority::DEFAULT, "");
        let inventory = Inventory::new(&b.build());

        let pattern = regex::Regex::new("").unwrap();
        let all: Vec<&ObjectLocation> = inventory.matching(&pattern, None).collect();
        let text = render(|out| print_objects(out, &all));
        assert_eq!(
            text,
            "class   scanning.camera.Instrument  api/camera#scanning.camera.Instrument\n\
             method  scanning.camera.Instrument.add_module  api/camera#scanning.camera.Instrument.add_module\n"
        );

        let loc = inventory.resolve("scanning.camera.Instrument").unwrap();
        let text = render(|out| print_resolved(out, loc, ".html"));
        assert_eq!(
            text,
            "scanning.camera.Instrument (Python class)\napi/camera.html#scanning.camera.Instrument\n"
        );
    }

    #[test]
    fn test_print_violations() {
        assert_eq!(render(|out| print_violations(out, &[])), "Index OK\n");

        let text = render(|out| {
            print_violations(out, &[Violation::ObjTypeWithoutName { objtype: 3 }])
        });
        assert_eq!(text, "error: object type 3 has no name entry\n1 violation(s)\n");
    }
}
