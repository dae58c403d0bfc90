//! Output formatting for search hits, drill-downs and stats

use crate::dataset::{Entity, EntityKind};
use crate::lookup::LookupStats;
use crate::query::relations::Related;
use crate::query::{SearchHit, match_positions};
use crate::utils::escape;
use std::io;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// Colored stdout, or plain when `color` is off
pub fn stdout(color: bool) -> StandardStream {
    let choice = if color {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    };
    StandardStream::stdout(choice)
}

/// Print hits as `index:name`, with the fuzzy-matched characters highlighted
pub fn write_hits<W: WriteColor, T>(
    out: &mut W,
    hits: &[SearchHit<'_, T>],
    keyword: &str,
) -> io::Result<()> {
    for hit in hits {
        out.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
        write!(out, "{}", hit.index)?;
        out.reset()?;
        write!(out, ":")?;
        write_highlighted(out, hit.name, keyword)?;
        writeln!(out)?;
    }

    Ok(())
}

/// Write `name` with the characters matched by `keyword` in bold red
fn write_highlighted<W: WriteColor>(out: &mut W, name: &str, keyword: &str) -> io::Result<()> {
    let positions = match match_positions(name, keyword) {
        Some(p) if !p.is_empty() => p,
        _ => return write!(out, "{}", name),
    };

    let mut next = positions.iter().peekable();
    for (pos, c) in name.chars().enumerate() {
        if next.peek() == Some(&&pos) {
            next.next();
            out.set_color(ColorSpec::new().set_fg(Some(Color::Red)).set_bold(true))?;
            write!(out, "{}", c)?;
            out.reset()?;
        } else {
            write!(out, "{}", c)?;
        }
    }

    Ok(())
}

/// Render hits as an HTML list fragment, escaping every name
pub fn render_html_list<T>(kind: EntityKind, hits: &[SearchHit<'_, T>]) -> String {
    let mut html = format!("<ul class=\"{}-list\">\n", kind.tag());
    for hit in hits {
        html.push_str(&format!(
            "  <li data-index=\"{}\">{}</li>\n",
            hit.index,
            escape(hit.name)
        ));
    }
    html.push_str("</ul>\n");
    html
}

/// Message shown when the searched collection has no rows at all
pub fn write_no_data<W: WriteColor>(out: &mut W, kind: EntityKind) -> io::Result<()> {
    out.set_color(ColorSpec::new().set_fg(Some(Color::Yellow)))?;
    writeln!(out, "No {} data loaded for this version", kind)?;
    out.reset()
}

/// Heading for a drill-down view
pub fn write_heading<W: WriteColor>(out: &mut W, kind: EntityKind, index: usize, name: &str) -> io::Result<()> {
    out.set_color(ColorSpec::new().set_fg(Some(Color::Magenta)).set_bold(true))?;
    writeln!(out, "{} #{}: {}", kind, index, name)?;
    out.reset()
}

/// One related-rows section; `-` when empty
pub fn write_related<W: WriteColor, T: Entity>(
    out: &mut W,
    title: &str,
    related: &Related<'_, T>,
) -> io::Result<()> {
    out.set_color(ColorSpec::new().set_fg(Some(Color::Cyan)))?;
    write!(out, "  {}:", title)?;
    out.reset()?;

    if related.is_empty() {
        writeln!(out, " -")?;
        return Ok(());
    }

    writeln!(out)?;
    for (index, row) in related {
        write!(out, "    ")?;
        out.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
        write!(out, "{}", index)?;
        out.reset()?;
        writeln!(out, ":{}", row.name())?;
    }

    Ok(())
}

/// One free-text list section (spawn schedule, path steps)
pub fn write_entries<W: WriteColor>(out: &mut W, title: &str, entries: &[&str]) -> io::Result<()> {
    out.set_color(ColorSpec::new().set_fg(Some(Color::Cyan)))?;
    write!(out, "  {}:", title)?;
    out.reset()?;

    if entries.is_empty() {
        return writeln!(out, " -");
    }

    writeln!(out)?;
    for entry in entries {
        writeln!(out, "    {}", entry)?;
    }
    Ok(())
}

pub fn write_stats<W: WriteColor>(out: &mut W, stats: &LookupStats) -> io::Result<()> {
    writeln!(out, "Dataset: {} (generation {})", stats.version, stats.generation)?;
    for (kind, rows, names) in &stats.collections {
        writeln!(out, "  {:<8} {:>6} rows {:>6} names", kind.to_string(), rows, names)?;
    }

    let v = &stats.validation;
    writeln!(out, "Validation:")?;
    writeln!(out, "  empty names:     {}", v.empty_names)?;
    writeln!(out, "  repaired fields: {}", v.repaired_fields)?;
    if v.dangling_refs > 0 || v.malformed_refs > 0 {
        out.set_color(ColorSpec::new().set_fg(Some(Color::Yellow)))?;
    }
    writeln!(out, "  dangling refs:   {}", v.dangling_refs)?;
    writeln!(out, "  malformed refs:  {}", v.malformed_refs)?;
    out.reset()?;

    writeln!(
        out,
        "Cache: {} queries, {:.1}% hit rate",
        stats.cached_queries,
        stats.cache.hit_rate() * 100.0
    )?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{Item, Npc};
    use termcolor::NoColor;

    fn text(buf: NoColor<Vec<u8>>) -> String {
        String::from_utf8(buf.into_inner()).unwrap()
    }

    #[test]
    fn test_write_hits_plain() {
        let item = Item::new("Fire Sword", "-1", "0");
        let hits = vec![SearchHit { index: 4, name: "Fire Sword", row: &item }];

        let mut out = NoColor::new(Vec::new());
        write_hits(&mut out, &hits, "fsw").unwrap();
        assert_eq!(text(out), "4:Fire Sword\n");
    }

    #[test]
    fn test_render_html_escapes_names() {
        let item = Item::new("<Cursed> Blade & \"Co\"", "-1", "-1");
        let hits = vec![SearchHit { index: 0, name: item.name.as_str(), row: &item }];

        let html = render_html_list(EntityKind::Item, &hits);
        assert!(html.starts_with("<ul class=\"item-list\">"));
        assert!(html.contains("&lt;Cursed&gt; Blade &amp; &quot;Co&quot;"));
        assert!(!html.contains("<Cursed>"));
    }

    #[test]
    fn test_write_related_sections() {
        let npc = Npc::new("Blacksmith", "Prontera", "1,1");
        let related: Related<'_, Npc> = vec![(2, &npc)];

        let mut out = NoColor::new(Vec::new());
        write_related(&mut out, "npcs", &related).unwrap();
        write_related::<_, Npc>(&mut out, "given by", &Vec::new()).unwrap();
        write_entries(&mut out, "path", &["north", "east"]).unwrap();

        assert_eq!(
            text(out),
            "  npcs:\n    2:Blacksmith\n  given by: -\n  path:\n    north\n    east\n"
        );
    }
}
