use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

use checkscore::checklist::{validate_checklist, Checklist, Question};
use checkscore::config::Config;
use checkscore::scoring::{self, ChecklistScores, Grade, Recommendations, ScoringConfig};
use checkscore::store::{self, ChecklistFilter};

const EXIT_SUCCESS: i32 = 0;
const EXIT_INVALID: i32 = 1;
const EXIT_IO: i32 = 2;
const EXIT_CONFIG: i32 = 4;

#[derive(Subcommand, Debug)]
enum Commands {
    /// Score a checklist and show grades and recommendations
    Score {
        /// Checklist JSON file
        checklist: PathBuf,

        /// Yes/No/NA responses JSON file; scores from responses instead of question scores
        #[arg(short, long)]
        responses: Option<PathBuf>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Check checklist structure (exit code 1 when invalid)
    Validate {
        /// Checklist JSON file
        checklist: PathBuf,
    },
    /// List stored checklists
    List(FilterArgs),
    /// Show stored results grouped by department and organizational level
    Results(FilterArgs),
    /// Recalculate, validate and save a checklist into the store
    Import {
        /// Checklist JSON file
        checklist: PathBuf,
    },
    /// Delete a checklist from the store
    Delete {
        /// Checklist id
        id: String,
    },
}

#[derive(Args, Debug)]
struct FilterArgs {
    /// Only checklists for this health program
    #[arg(long)]
    program: Option<String>,

    /// Only checklists at this organizational level
    #[arg(long)]
    level: Option<String>,

    /// Only checklists for this department
    #[arg(long)]
    department: Option<String>,
}

impl From<FilterArgs> for ChecklistFilter {
    fn from(args: FilterArgs) -> Self {
        ChecklistFilter {
            health_program: args.program,
            organizational_level: args.level,
            department: args.department,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "checkscore")]
#[command(about = "Health-program assessment checklist scoring", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/checkscore/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Serialize)]
struct ScoreReport<'a> {
    checklist_id: &'a str,
    scores: &'a ChecklistScores,
    grade: Grade,
    recommendations: Recommendations,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = match checkscore::config::load_config(cli.config.clone()) {
        Ok(c) => c,
        Err(e) => {
            error!(error = %e, "config error");
            std::process::exit(EXIT_CONFIG);
        }
    };

    // Validate scoring config at startup
    let scoring_config = config.scoring_config();
    if let Err(errors) = scoring::validate_scoring(&scoring_config) {
        for e in errors {
            error!("{}", e);
        }
        std::process::exit(EXIT_CONFIG);
    }
    debug!(?scoring_config, "effective scoring config");

    let code = match run(cli.command, &config, &scoring_config) {
        Ok(code) => code,
        Err(err) => {
            error!(error = %err, "command failed");
            for cause in err.chain().skip(1) {
                error!(cause = %cause, "caused by");
            }
            EXIT_IO
        }
    };
    std::process::exit(code);
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(command: Commands, config: &Config, scoring_config: &ScoringConfig) -> Result<i32> {
    let use_colors = checkscore::output::should_use_colors();

    match command {
        Commands::Score {
            checklist,
            responses,
            json,
        } => {
            let checklist = store::read_checklist(&checklist)?;
            let scores = match responses {
                Some(path) => {
                    let responses = store::read_responses(&path)?;
                    debug!(count = responses.len(), "scoring from responses");
                    scoring::responses::checklist_scores(&checklist, &responses, scoring_config)
                }
                None => {
                    warn_out_of_range_scores(&checklist, scoring_config);
                    scoring::checklist_scores(&checklist, scoring_config)
                }
            };
            let recs = scoring::recommendations(&scores.sections);

            if json {
                let report = ScoreReport {
                    checklist_id: &checklist.id,
                    scores: &scores,
                    grade: scoring::grade(scores.overall.percentage),
                    recommendations: recs,
                };
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!(
                    "{}",
                    checkscore::output::format_score_report(&checklist, &scores, use_colors)
                );
                println!();
                println!(
                    "{}",
                    checkscore::output::format_recommendations(&recs, use_colors)
                );
            }
            Ok(EXIT_SUCCESS)
        }
        Commands::Validate { checklist } => {
            let checklist = store::read_checklist(&checklist)?;
            let result = validate_checklist(&checklist);
            println!(
                "{}",
                checkscore::output::format_validation(&result, use_colors)
            );
            Ok(if result.is_valid { EXIT_SUCCESS } else { EXIT_INVALID })
        }
        Commands::List(filter) => {
            let filter = ChecklistFilter::from(filter);
            let store_state = store::load_store(&store_path(config)?)?;
            let checklists: Vec<&Checklist> = store_state.filtered(&filter).collect();
            if !filter.is_empty() {
                debug!(
                    matched = checklists.len(),
                    total = store_state.checklists.len(),
                    "applied checklist filter"
                );
            }
            println!(
                "{}",
                checkscore::output::format_checklist_list(&checklists, use_colors)
            );
            Ok(EXIT_SUCCESS)
        }
        Commands::Results(filter) => {
            let filter = ChecklistFilter::from(filter);
            let store_state = store::load_store(&store_path(config)?)?;
            let groupings = store::group_results(&store_state, &filter);
            let average = store::average_completion(&groupings);
            println!(
                "{}",
                checkscore::output::format_results(&groupings, average, use_colors)
            );
            Ok(EXIT_SUCCESS)
        }
        Commands::Import { checklist } => {
            let checklist = store::read_checklist(&checklist)?;
            // Cached section totals must reflect the questions before validating
            let checklist = scoring::recalculate_checklist(&checklist, scoring_config);
            let result = validate_checklist(&checklist);
            if !result.is_valid {
                println!(
                    "{}",
                    checkscore::output::format_validation(&result, use_colors)
                );
                return Ok(EXIT_INVALID);
            }
            for warning in &result.warnings {
                warn!("{}", warning);
            }

            let path = store_path(config)?;
            let mut store_state = store::load_store(&path)?;
            let id = store_state.save(checklist);
            store::save_store(&path, &store_state)?;
            info!(id = %id, "checklist saved");
            println!("Saved checklist {}", id);
            Ok(EXIT_SUCCESS)
        }
        Commands::Delete { id } => {
            let path = store_path(config)?;
            let mut store_state = store::load_store(&path)?;
            if !store_state.delete(&id) {
                println!("No checklist with id {}", id);
                return Ok(EXIT_INVALID);
            }
            store::save_store(&path, &store_state)?;
            info!(id = %id, "checklist deleted");
            println!("Deleted checklist {}", id);
            Ok(EXIT_SUCCESS)
        }
    }
}

fn store_path(config: &Config) -> Result<PathBuf> {
    match config.store_path {
        Some(ref path) => Ok(path.clone()),
        None => store::get_store_path(),
    }
}

/// Log a warning for every question whose captured score lies outside
/// `[0, max_score]`. Scoring still uses the raw value.
fn warn_out_of_range_scores(checklist: &Checklist, config: &ScoringConfig) {
    for section in &checklist.sections {
        for question in &section.questions {
            if let Question::DataControl(q) = question {
                if q.has_data_difference {
                    debug!(question = %q.id, indicator = %q.indicator, "reported data differs from source");
                }
            }

            let checks = std::iter::once((question.id(), question.score(), question.max_score()))
                .chain(
                    question
                        .sub_questions()
                        .iter()
                        .map(|sub| (sub.id.as_str(), sub.score, sub.max_score)),
                );
            for (id, score, max_score) in checks {
                let validation = scoring::validate_score(score, max_score, config);
                if let Some(warning) = validation.warning {
                    warn!(section = %section.id, question = %id, "{}", warning);
                }
            }
        }
    }
}
