use std::io::IsTerminal;
use owo_colors::OwoColorize;
use terminal_size::{Width, terminal_size};

use crate::checklist::{score_class, Checklist, ChecklistSummary, ValidationResult};
use crate::scoring::{grade, ChecklistScores, Grade, Recommendations, SectionScore};
use crate::store::ResultsGrouping;

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate title to fit available width, accounting for Unicode
fn truncate_title(title: &str, max_width: usize) -> String {
    let chars: Vec<char> = title.chars().collect();
    if chars.len() <= max_width {
        title.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

/// Format a score value without a trailing ".0" ("14", "12.5", "66.67")
pub fn format_points(value: f64) -> String {
    let s = format!("{:.2}", value);
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}

/// Format a percentage with one decimal ("70.0%")
pub fn format_percentage(percentage: f64) -> String {
    format!("{:.1}%", percentage)
}

/// Format a grade as "A (Very Good)", colored with the grade's own color
pub fn format_grade(g: &Grade, use_colors: bool) -> String {
    let text = format!("{} ({})", g.grade, g.description);
    if use_colors {
        let (r, gr, b) = g.rgb();
        text.truecolor(r, gr, b).bold().to_string()
    } else {
        text
    }
}

/// One row per section: grade, score/max, percentage, title.
/// Titles are truncated to the terminal width when writing to a TTY.
fn format_section_row(section: &SectionScore, term_width: Option<usize>, use_colors: bool) -> String {
    let g = grade(section.percentage);
    let grade_str = format!("{:<2}", g.grade.as_str());
    let points = format!(
        "{:>13}",
        format!("{}/{}", format_points(section.total_score), format_points(section.max_score))
    );
    let pct = format!("{:>7}", format_percentage(section.percentage));

    // grade(2) + points(13) + pct(7) + separators(2 * 3)
    let fixed_width = 2 + 13 + 7 + 6;
    let title = match term_width {
        Some(width) if width > fixed_width + 10 => {
            truncate_title(&section.section_title, width - fixed_width)
        }
        Some(_) => truncate_title(&section.section_title, 20),
        None => section.section_title.clone(),
    };

    if use_colors {
        let (r, gr, b) = g.rgb();
        format!(
            "{}  {}  {}  {}",
            grade_str.truecolor(r, gr, b).bold(),
            points,
            pct.dimmed(),
            title
        )
    } else {
        format!("{}  {}  {}  {}", grade_str, points, pct, title)
    }
}

/// Format a full score report: section rows followed by the overall result
pub fn format_score_report(checklist: &Checklist, scores: &ChecklistScores, use_colors: bool) -> String {
    let term_width = get_terminal_width();
    let mut lines = Vec::new();

    let header = format!(
        "{} | {} | {}",
        checklist.health_program, checklist.organizational_level, checklist.department
    );
    if use_colors {
        lines.push(header.bold().to_string());
    } else {
        lines.push(header);
    }

    if scores.sections.is_empty() {
        lines.push("No sections found.".to_string());
    }
    for section in &scores.sections {
        lines.push(format_section_row(section, term_width, use_colors));
    }

    let overall = &scores.overall;
    lines.push(String::new());
    lines.push(format!(
        "Overall: {}/{} ({}) {}",
        format_points(overall.total_score),
        format_points(overall.max_score),
        format_percentage(overall.percentage),
        format_grade(&grade(overall.percentage), use_colors)
    ));

    lines.join("\n")
}

/// Format recommendations as bulleted groups; empty groups are skipped
pub fn format_recommendations(recs: &Recommendations, use_colors: bool) -> String {
    if recs.is_empty() {
        return "No recommendations.".to_string();
    }

    let groups = [
        ("Strengths", &recs.strengths),
        ("Improvements", &recs.improvements),
        ("Priorities", &recs.priorities),
    ];

    groups
        .iter()
        .filter(|(_, items)| !items.is_empty())
        .map(|(label, items)| {
            let heading = if use_colors {
                label.bold().to_string()
            } else {
                label.to_string()
            };
            let body = items
                .iter()
                .map(|item| format!("  - {}", item))
                .collect::<Vec<_>>()
                .join("\n");
            format!("{}:\n{}", heading, body)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format validation errors and warnings, one per line
pub fn format_validation(result: &ValidationResult, use_colors: bool) -> String {
    let mut lines = Vec::new();

    for error in &result.errors {
        if use_colors {
            lines.push(format!("{} {}", "error:".red().bold(), error));
        } else {
            lines.push(format!("error: {}", error));
        }
    }
    for warning in &result.warnings {
        if use_colors {
            lines.push(format!("{} {}", "warning:".yellow().bold(), warning));
        } else {
            lines.push(format!("warning: {}", warning));
        }
    }

    if result.is_valid {
        let ok = "Checklist is valid.";
        if use_colors {
            lines.push(ok.green().to_string());
        } else {
            lines.push(ok.to_string());
        }
    }

    lines.join("\n")
}

/// Format stored checklists as one line each:
/// "{completion}  {id}  {program} | {level} | {department}  ({sections}s/{questions}q)"
pub fn format_checklist_list(checklists: &[&Checklist], use_colors: bool) -> String {
    if checklists.is_empty() {
        return "No checklists found.".to_string();
    }

    checklists
        .iter()
        .map(|checklist| {
            let summary = ChecklistSummary::from_checklist(checklist);
            let pct = format!("{:>7}", format_percentage(summary.completion_percentage));
            let counts = format!("({}s/{}q)", summary.section_count, summary.question_count);
            if use_colors {
                format!(
                    "{}  {}  {} | {} | {}  {}",
                    pct.bold(),
                    checklist.id.dimmed(),
                    checklist.health_program,
                    checklist.organizational_level.cyan(),
                    checklist.department.yellow(),
                    counts.dimmed()
                )
            } else {
                format!(
                    "{}  {}  {} | {} | {}  {}",
                    pct,
                    checklist.id,
                    checklist.health_program,
                    checklist.organizational_level,
                    checklist.department,
                    counts
                )
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format results grouped by department and organizational level
pub fn format_results(groupings: &[ResultsGrouping], average: f64, use_colors: bool) -> String {
    if groupings.is_empty() {
        return "No results found.".to_string();
    }

    let mut lines = Vec::new();
    for grouping in groupings {
        let heading = format!("{} / {}", grouping.department, grouping.organizational_level);
        if use_colors {
            lines.push(heading.bold().to_string());
        } else {
            lines.push(heading);
        }
        for section in &grouping.sections {
            lines.push(format!(
                "  {:>7}  {:<9}  {}",
                format_percentage(section.percentage),
                score_class(section.percentage),
                section.section_title
            ));
        }
    }
    lines.push(String::new());
    lines.push(format!(
        "{} groupings, average completion {}%",
        groupings.len(),
        average
    ));

    lines.join("\n")
}
