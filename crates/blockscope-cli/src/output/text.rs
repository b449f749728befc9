//! Human-readable report rendering.

use std::io::{self, Write};

use blockscope_core::{Inventory, PageMatchReport, PageRef, SectionsReport};
use colored::Colorize;

const TEXT_PREVIEW_CHARS: usize = 60;
const NO_URL: &str = "No URL";

/// Render a page's sections, showing at most `limit` rows when given.
pub fn write_sections(
    out: &mut impl Write,
    report: &SectionsReport,
    limit: Option<usize>,
) -> io::Result<()> {
    write_page_header(out, &report.page)?;

    let summary = &report.summary;
    writeln!(
        out,
        "Sections: {} total, {} types, max depth {}, avg children {:.2}",
        summary.total_sections, summary.unique_types, summary.max_depth, summary.average_children
    )?;
    if report.truncated > 0 {
        writeln!(
            out,
            "{}",
            format!("{} subtree(s) below the depth limit were not expanded", report.truncated)
                .yellow()
        )?;
    }

    if summary.total_sections == 0 {
        writeln!(out, "\nNo sections on this page.")?;
        return Ok(());
    }

    writeln!(out, "\n{}", "Section types:".bold())?;
    let mut counts: Vec<_> = summary.type_counts.iter().collect();
    counts.sort_by(|a, b| b.1.cmp(a.1));
    for (kind, count) in counts {
        writeln!(out, "  {kind:<32} {count:>5}")?;
    }

    let shown = limit.unwrap_or(report.sections.len()).min(report.sections.len());
    if shown < report.sections.len() {
        writeln!(
            out,
            "\n{} (showing {} of {})",
            "Sections:".bold(),
            shown,
            report.sections.len()
        )?;
    } else {
        writeln!(out, "\n{}", "Sections:".bold())?;
    }

    for section in &report.sections[..shown] {
        let indent = "  ".repeat(section.depth + 1);
        write!(out, "{indent}{} {}", section.path.to_string().dimmed(), section.kind.cyan())?;
        if let Some(name) = section.component_name.as_deref().filter(|n| *n != section.kind) {
            write!(out, " [{name}]")?;
        }
        if let Some(id) = &section.id {
            write!(out, " #{id}")?;
        }
        if let Some(text) = &section.text {
            write!(out, " \"{}\"", preview(text))?;
        }
        writeln!(out)?;
    }
    Ok(())
}

/// Render the pages containing a section.
pub fn write_page_matches(out: &mut impl Write, report: &PageMatchReport) -> io::Result<()> {
    writeln!(
        out,
        "Section '{}' ({}) found on {} of {} pages",
        report.search_criteria.bold(),
        report.mode,
        report.total_pages_found.to_string().green(),
        report.total_pages_analyzed
    )?;

    for (index, page_match) in report.pages.iter().enumerate() {
        let page = &page_match.page;
        writeln!(
            out,
            "\n{}. {} ({})",
            index + 1,
            page.name.bold(),
            page.url.as_deref().unwrap_or(NO_URL)
        )?;
        if let Some(id) = &page.id {
            writeln!(out, "   ID: {id}")?;
        }
        writeln!(out, "   Matches: {}", page_match.match_count)?;
        for section in &page_match.matching_sections {
            write!(
                out,
                "     - {} at {} (depth {})",
                section.kind.cyan(),
                section.path,
                section.depth
            )?;
            if let Some(id) = &section.id {
                write!(out, " #{id}")?;
            }
            writeln!(out)?;
        }
    }
    Ok(())
}

/// Render the cross-page inventory, showing at most `limit` types.
pub fn write_inventory(out: &mut impl Write, inventory: &Inventory, limit: usize) -> io::Result<()> {
    writeln!(
        out,
        "{} section types across {} pages",
        inventory.entries.len(),
        inventory.pages_analyzed
    )?;

    for entry in inventory.entries.iter().take(limit) {
        writeln!(
            out,
            "\n{} {} uses on {} pages",
            entry.kind.cyan().bold(),
            entry.count,
            entry.pages.len()
        )?;
        for example in &entry.examples {
            write!(
                out,
                "  - {} ({})",
                example.page_name,
                example.page_url.as_deref().unwrap_or(NO_URL)
            )?;
            if let Some(id) = &example.section_id {
                write!(out, " #{id}")?;
            }
            writeln!(out)?;
        }
    }

    if inventory.entries.len() > limit {
        writeln!(
            out,
            "\n{}",
            format!("... {} more types (use --limit or --json)", inventory.entries.len() - limit)
                .dimmed()
        )?;
    }
    Ok(())
}

/// Render the list of pages.
pub fn write_pages(out: &mut impl Write, pages: &[PageRef]) -> io::Result<()> {
    writeln!(out, "{} pages", pages.len())?;
    for page in pages {
        write!(out, "  {} ({})", page.name.bold(), page.url.as_deref().unwrap_or(NO_URL))?;
        if let Some(published) = &page.published {
            write!(out, " [{published}]")?;
        }
        writeln!(out)?;
    }
    Ok(())
}

fn write_page_header(out: &mut impl Write, page: &PageRef) -> io::Result<()> {
    writeln!(
        out,
        "Page: {} ({})",
        page.name.bold(),
        page.url.as_deref().unwrap_or(NO_URL)
    )?;
    if let Some(id) = &page.id {
        writeln!(out, "ID: {id}")?;
    }
    if let Some(published) = &page.published {
        writeln!(out, "Status: {published}")?;
    }
    Ok(())
}

fn preview(text: &str) -> String {
    let flat = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() <= TEXT_PREVIEW_CHARS {
        return flat;
    }
    let cut: String = flat.chars().take(TEXT_PREVIEW_CHARS).collect();
    format!("{cut}...")
}
