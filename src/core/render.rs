//! Plain-text views for the terminal.

use crate::core::csv_import::{CsvPreview, ImportReport};
use crate::domain::model::{Faculty, ScrapedData};
use chrono::{DateTime, Duration, NaiveDateTime};

/// The server refreshes scraped details for records older than this.
pub const STALE_AFTER_HOURS: i64 = 24;

pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(value)
                .ok()
                .map(|dt| dt.naive_local())
        })
}

pub fn is_stale(last_updated: &str, now: NaiveDateTime) -> bool {
    parse_timestamp(last_updated)
        .map(|updated| now - updated > Duration::hours(STALE_AFTER_HOURS))
        .unwrap_or(false)
}

pub fn render_directory(faculty: &[Faculty]) -> String {
    if faculty.is_empty() {
        return "No faculty members found.".to_string();
    }

    let mut lines = Vec::new();
    for member in faculty {
        lines.push(format!("[{}] {}", member.id, member.name));
        for value in [&member.title, &member.department, &member.headline]
            .into_iter()
            .flatten()
        {
            lines.push(format!("    {}", value));
        }
        lines.push(String::new());
    }
    lines.push(format!("{} faculty member(s)", faculty.len()));
    lines.join("\n")
}

pub fn render_profile(faculty: &Faculty, now: NaiveDateTime) -> String {
    let mut lines = vec![faculty.name.clone()];
    lines.extend(faculty.title.iter().cloned());
    lines.extend(faculty.department.iter().cloned());
    if let Some(office) = &faculty.office_location {
        lines.push(format!("📍 {}", office));
    }
    if let Some(email) = &faculty.email {
        lines.push(format!("📧 {}", email));
    }
    if let Some(picture) = &faculty.profile_picture_url {
        lines.push(format!("🖼  {}", picture));
    }
    if let Some(headline) = &faculty.headline {
        lines.push(String::new());
        lines.push(format!("  \"{}\"", headline));
    }

    if !faculty.experience.is_empty() {
        section(&mut lines, "Experience");
        for exp in &faculty.experience {
            lines.push(format!("  - {}", exp.position));
            lines.push(format!("    {}", exp.company));
            if let Some(duration) = &exp.duration {
                lines.push(format!("    {}", duration));
            }
        }
    }

    if !faculty.publications.is_empty() {
        section(&mut lines, "Recent Publications");
        for publication in &faculty.publications {
            lines.push(format!("  - {}", publication.title));
            if let Some(authors) = &publication.authors {
                lines.push(format!("    {}", authors));
            }
            if let Some(year) = &publication.year {
                lines.push(format!("    {}", year));
            }
        }
    }

    if !faculty.projects.is_empty() {
        section(&mut lines, "Projects");
        for project in &faculty.projects {
            lines.push(format!("  - {}", project.title));
            if let Some(description) = &project.description {
                lines.push(format!("    {}", description));
            }
        }
    }

    if !faculty.certifications.is_empty() {
        section(&mut lines, "Certifications");
        for cert in &faculty.certifications {
            lines.push(format!("  - {}", cert.name));
            if let Some(issuer) = &cert.issuer {
                lines.push(format!("    {}", issuer));
            }
        }
    }

    let links: Vec<String> = [
        ("LinkedIn Profile", &faculty.linkedin_url),
        ("Google Scholar", &faculty.google_scholar_url),
    ]
    .into_iter()
    .filter_map(|(label, url)| url.as_ref().map(|url| format!("{}: {}", label, url)))
    .collect();
    if !links.is_empty() {
        lines.push(String::new());
        lines.extend(links);
    }

    if let Some(updated) = &faculty.last_updated {
        lines.push(String::new());
        let shown = parse_timestamp(updated)
            .map(|ts| ts.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| updated.clone());
        if is_stale(updated, now) {
            lines.push(format!(
                "Last updated: {} (older than {}h, a background refresh is due)",
                shown, STALE_AFTER_HOURS
            ));
        } else {
            lines.push(format!("Last updated: {}", shown));
        }
    }

    lines.join("\n")
}

fn section(lines: &mut Vec<String>, title: &str) {
    lines.push(String::new());
    lines.push(title.to_string());
    lines.push("-".repeat(title.chars().count()));
}

pub fn render_admin_list(faculty: &[Faculty]) -> String {
    if faculty.is_empty() {
        return "No faculty members yet. Run `faculty-hub admin add` to get started.".to_string();
    }

    faculty
        .iter()
        .map(|member| {
            format!(
                "{:>5}  {}\n       {} - {}",
                member.id,
                member.name,
                member.title.as_deref().unwrap_or(""),
                member.department.as_deref().unwrap_or("")
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_scrape_preview(scraped: &ScrapedData) -> String {
    let mut lines = vec![
        "Scraped Data Preview".to_string(),
        "Note: LinkedIn requires authentication, so most data may not be available.".to_string(),
        format!(
            "Headline: {}",
            scraped.headline.as_deref().unwrap_or("Not available")
        ),
        format!("Experience: {} items", scraped.experience.len()),
        format!("Publications: {} items", scraped.publications.len()),
        format!("Projects: {} items", scraped.projects.len()),
        format!("Certifications: {} items", scraped.certifications.len()),
    ];

    for publication in &scraped.publications {
        match &publication.year {
            Some(year) => lines.push(format!("  - {} ({})", publication.title, year)),
            None => lines.push(format!("  - {}", publication.title)),
        }
    }

    lines.join("\n")
}

pub fn render_csv_preview(preview: &CsvPreview) -> String {
    let mut widths: Vec<usize> = preview.headers.iter().map(|h| h.chars().count()).collect();
    for row in &preview.rows {
        for (i, cell) in row.iter().enumerate() {
            let len = cell.chars().count();
            match widths.get_mut(i) {
                Some(width) => *width = (*width).max(len),
                None => widths.push(len),
            }
        }
    }

    let format_row = |cells: &[String]| {
        cells
            .iter()
            .enumerate()
            .map(|(i, cell)| format!("{:<width$}", cell, width = widths[i]))
            .collect::<Vec<_>>()
            .join(" | ")
            .trim_end()
            .to_string()
    };

    let mut lines = vec![
        format!("Preview ({} rows)", preview.total_rows),
        format_row(preview.headers.as_slice()),
    ];
    lines.push("-".repeat(lines[1].chars().count()));
    for row in &preview.rows {
        lines.push(format_row(row.as_slice()));
    }
    if preview.remaining_rows() > 0 {
        lines.push(format!("... and {} more rows", preview.remaining_rows()));
    }

    lines.join("\n")
}

pub fn render_import_report(report: &ImportReport) -> String {
    let mut lines = vec![
        "Import complete!".to_string(),
        format!("Successful: {}", report.successful),
        format!("Failed: {}", report.failed()),
    ];
    for failure in &report.failures {
        lines.push(format!("  - {}: {}", failure.name, failure.error));
    }
    lines.join("\n")
}
