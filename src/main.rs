use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;

use chrono::Utc;
use clap::{Parser, Subcommand};
use dotenv::dotenv;
use quizdesk::builder::{suggestions, QuizDraft};
use quizdesk::summary::{self, CatalogStats};
use quizdesk::{
    load_quizzes_from_path, Answer, Catalog, CatalogStore, FileStorage, QuestionKind, QuizDesk,
    QuizError, Settings, DEFAULT_DATA_DIR,
};
use tracing::level_filters::LevelFilter;
use tracing::{error, info};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Directory holding the quiz catalog and the log file
    #[arg(short, long, env = "QUIZDESK_DATA_DIR", default_value = DEFAULT_DATA_DIR)]
    data_dir: PathBuf,

    /// Log level written to the log file
    #[arg(long, env = "QUIZDESK_LOG", default_value = "info")]
    log_level: LevelFilter,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Open the quiz taker, optionally starting a quiz right away
    Take {
        /// Id of the quiz to start
        quiz_id: Option<String>,
    },
    /// Print the saved quizzes
    List,
    /// Print every recorded attempt
    Results,
    /// Save quizzes from a JSON file (one quiz or an array)
    Import {
        /// JSON file to load the quizzes from
        file: PathBuf,
    },
    /// Save a demo quiz built from the suggestion list
    Seed,
}

#[tokio::main]
async fn main() {
    dotenv().ok();
    let args = Args::parse();
    let settings = Settings::new(args.data_dir, args.log_level);

    if let Err(e) = init_tracing(&settings) {
        eprintln!("Failed to set up logging: {}", e);
        std::process::exit(1);
    }

    if let Err(e) = run(args.command, &settings).await {
        error!(error = %e, "command failed");
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_tracing(settings: &Settings) -> Result<(), Box<dyn std::error::Error>> {
    fs::create_dir_all(settings.data_dir())?;
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(settings.log_path())?;

    let subscriber = FmtSubscriber::builder()
        .with_max_level(settings.log_level)
        .with_ansi(false)
        .with_writer(Mutex::new(log_file))
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

async fn run(command: Option<Command>, settings: &Settings) -> Result<(), QuizError> {
    let mut store = Catalog::new(FileStorage::new(settings.data_dir()));

    match command.unwrap_or(Command::Take { quiz_id: None }) {
        Command::Take { quiz_id } => QuizDesk::open(settings).run(quiz_id.as_deref()).await,
        Command::List => {
            print_quizzes(&store);
            Ok(())
        }
        Command::Results => {
            print_results(&store);
            Ok(())
        }
        Command::Import { file } => {
            let quizzes = load_quizzes_from_path(&file)?;
            let count = quizzes.len();
            for quiz in quizzes {
                println!("Saved {} ({})", quiz.title, quiz.id);
                store.save_quiz(quiz)?;
            }
            info!(count, file = %file.display(), "imported quizzes");
            Ok(())
        }
        Command::Seed => {
            let quiz = demo_quiz().build(Utc::now())?;
            println!("Saved {} ({})", quiz.title, quiz.id);
            store.save_quiz(quiz)?;
            Ok(())
        }
    }
}

fn demo_quiz() -> QuizDraft {
    let mut draft = QuizDraft::new();
    draft.title = "Quick Start".to_string();
    draft.description = "A short demo built from the suggestion list".to_string();
    draft.time_limit = 5;

    for suggestion in suggestions() {
        let question = draft.add_suggestion(suggestion);
        match suggestion.kind {
            QuestionKind::MultipleChoice => {
                question.options = Some(
                    ["Paris", "Lyon", "Marseille", "Nice"]
                        .iter()
                        .map(|o| o.to_string())
                        .collect(),
                );
                question.correct_answer = Some(Answer::Choice(0));
                question.explanation = Some("Paris has been the capital since 987.".to_string());
            }
            QuestionKind::ShortAnswer => {
                question.correct_answer = Some(Answer::Text("sunlight".to_string()));
                question.points = 2;
            }
            _ => question.points = 3,
        }
    }

    let truth = draft.add_question(QuestionKind::TrueFalse);
    truth.prompt = "Rust strings are UTF-8 encoded".to_string();

    draft
}

fn print_quizzes<S: CatalogStore>(store: &S) {
    let quizzes = store.load_quizzes();
    let results = store.load_results();

    if quizzes.is_empty() {
        println!("No quizzes saved yet.");
        return;
    }

    for quiz in &quizzes {
        let difficulty = quiz
            .average_difficulty()
            .map_or("-", |d| d.as_str());
        let score = summary::first_result_for(&results, &quiz.id)
            .map(|r| format!("  {}%", r.score))
            .unwrap_or_default();
        println!(
            "{}  {}  ({} min, {} questions, {} points, {}){}",
            quiz.id,
            quiz.title,
            quiz.time_limit,
            quiz.questions.len(),
            quiz.total_points(),
            difficulty,
            score
        );
    }
}

fn print_results<S: CatalogStore>(store: &S) {
    let results = store.load_results();
    let stats = CatalogStats::collect(&store.load_quizzes(), &results);

    for result in &results {
        println!(
            "{}  {:>3}%  {}/{}  {}",
            result.completed_at.format("%Y-%m-%d %H:%M"),
            result.score,
            result.correct_count,
            result.total_questions,
            result.quiz_title
        );
    }
    println!(
        "{} attempts, {} quizzes completed, {}% average, {} remaining",
        results.len(),
        stats.completed,
        stats.average_score,
        stats.remaining
    );
}
