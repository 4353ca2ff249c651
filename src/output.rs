//! Output formatting for non-interactive query results

use crate::query::{ResultView, SearchHit};
use crate::utils::html_to_text;
use serde::Serialize;
use std::io::{self, Write};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// Print ranked hits, one per line, with summaries indented below
pub fn print_hits(hits: &[SearchHit<'_>], color: bool) -> io::Result<()> {
    let choice = if color {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    };
    let mut stdout = StandardStream::stdout(choice);

    if hits.is_empty() {
        stdout.set_color(ColorSpec::new().set_fg(Some(Color::Red)))?;
        writeln!(stdout, "No results.")?;
        stdout.reset()?;
        return Ok(());
    }

    for hit in hits {
        write_hit(&mut stdout, &hit.view())?;
    }

    Ok(())
}

fn write_hit<W: WriteColor>(out: &mut W, view: &ResultView<'_>) -> io::Result<()> {
    out.set_color(ColorSpec::new().set_fg(Some(Color::Blue)).set_bold(true))?;
    write!(out, "{}", view.owner_name)?;
    out.reset()?;

    if let Some(member) = view.member_name {
        out.set_color(ColorSpec::new().set_fg(Some(Color::Yellow)))?;
        write!(out, "{}", member)?;
        out.reset()?;
    }

    out.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
    write!(out, "  {:.2}", view.score)?;
    out.reset()?;

    out.set_color(ColorSpec::new().set_fg(Some(Color::Magenta)))?;
    writeln!(out, "  {}", view.url)?;
    out.reset()?;

    if let Some(summary) = view.summary {
        writeln!(out, "    {}", html_to_text(summary))?;
    }

    Ok(())
}

#[derive(Debug, Serialize)]
struct HitRecord<'a> {
    score: f64,
    url: &'a str,
    owner: &'a str,
    member: Option<&'a str>,
    summary: Option<&'a str>,
}

impl<'a> From<ResultView<'a>> for HitRecord<'a> {
    fn from(view: ResultView<'a>) -> Self {
        Self {
            score: view.score,
            url: view.url,
            owner: view.owner_name,
            member: view.member_name,
            summary: view.summary,
        }
    }
}

/// Write hits as a JSON array
pub fn write_hits_json<W: Write>(hits: &[SearchHit<'_>], out: W) -> serde_json::Result<()> {
    let records: Vec<HitRecord> = hits.iter().map(|hit| hit.view().into()).collect();
    serde_json::to_writer_pretty(out, &records)
}
