pub mod formatter;

pub use formatter::{
    format_checklist_list, format_grade, format_percentage, format_points, format_recommendations,
    format_results, format_score_report, format_validation, should_use_colors,
};
