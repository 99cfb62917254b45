use serde::Serialize;
use std::fmt;

use super::engine::SectionScore;

/// Letter grade, ordered worst to best.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LetterGrade {
    F,
    D,
    C,
    CPlus,
    BMinus,
    B,
    BPlus,
    AMinus,
    A,
    APlus,
}

impl LetterGrade {
    pub fn as_str(&self) -> &'static str {
        match self {
            LetterGrade::APlus => "A+",
            LetterGrade::A => "A",
            LetterGrade::AMinus => "A-",
            LetterGrade::BPlus => "B+",
            LetterGrade::B => "B",
            LetterGrade::BMinus => "B-",
            LetterGrade::CPlus => "C+",
            LetterGrade::C => "C",
            LetterGrade::D => "D",
            LetterGrade::F => "F",
        }
    }
}

impl fmt::Display for LetterGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for LetterGrade {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Grade {
    pub grade: LetterGrade,
    pub description: &'static str,
    /// Hex display color, e.g. `#22c55e`.
    pub color: &'static str,
}

impl Grade {
    /// Display color as an RGB triple.
    pub fn rgb(&self) -> (u8, u8, u8) {
        let hex = self.color.trim_start_matches('#');
        let channel = |i: usize| {
            hex.get(i..i + 2)
                .and_then(|c| u8::from_str_radix(c, 16).ok())
                .unwrap_or(0)
        };
        (channel(0), channel(2), channel(4))
    }
}

// Descending thresholds; the first one met wins.
const LADDER: [(f64, LetterGrade, &str, &str); 9] = [
    (95.0, LetterGrade::APlus, "Excellent", "#22c55e"),
    (90.0, LetterGrade::A, "Very Good", "#16a34a"),
    (85.0, LetterGrade::AMinus, "Good", "#15803d"),
    (80.0, LetterGrade::BPlus, "Above Average", "#65a30d"),
    (75.0, LetterGrade::B, "Average", "#84cc16"),
    (70.0, LetterGrade::BMinus, "Below Average", "#a3a3a3"),
    (65.0, LetterGrade::CPlus, "Fair", "#f59e0b"),
    (60.0, LetterGrade::C, "Needs Improvement", "#f97316"),
    (50.0, LetterGrade::D, "Poor", "#ef4444"),
];

/// Map a percentage onto the letter grade ladder. Anything below 50, NaN
/// included, is an F.
pub fn grade(percentage: f64) -> Grade {
    LADDER
        .iter()
        .find(|(threshold, ..)| percentage >= *threshold)
        .map(|&(_, grade, description, color)| Grade {
            grade,
            description,
            color,
        })
        .unwrap_or(Grade {
            grade: LetterGrade::F,
            description: "Failing",
            color: "#dc2626",
        })
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Recommendations {
    pub strengths: Vec<String>,
    pub improvements: Vec<String>,
    pub priorities: Vec<String>,
}

impl Recommendations {
    pub fn is_empty(&self) -> bool {
        self.strengths.is_empty() && self.improvements.is_empty() && self.priorities.is_empty()
    }
}

/// Sort sections into strengths (>= 85%), priorities (< 60%) and
/// improvements (60-75%). Sections between 75% and 85% are left out.
pub fn recommendations(section_scores: &[SectionScore]) -> Recommendations {
    let mut recs = Recommendations::default();

    for section in section_scores {
        let p = section.percentage;
        if p >= 85.0 {
            recs.strengths.push(format!(
                "Strong performance in {} ({:.1}%)",
                section.section_title, p
            ));
        } else if p < 60.0 {
            recs.priorities.push(format!(
                "Critical improvement needed in {} ({:.1}%)",
                section.section_title, p
            ));
        } else if p < 75.0 {
            recs.improvements.push(format!(
                "Room for improvement in {} ({:.1}%)",
                section.section_title, p
            ));
        }
    }

    recs
}
