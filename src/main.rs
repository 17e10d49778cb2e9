use std::fs::File;
use std::path::PathBuf;
use std::process;
use std::sync::Mutex;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use quiz_bowl::{
    Admin, AdminGate, Category, Choice, Config, DEFAULT_DB_PATH, DEFAULT_FEEDBACK_DELAY,
    QuestionDraft, QuizBowl, QuizError, load_questions_from_json,
};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::writer::BoxMakeWriter;

const DEFAULT_FEEDBACK_MS: u64 = DEFAULT_FEEDBACK_DELAY.as_millis() as u64;

#[derive(Parser, Debug)]
#[command(name = "quiz-bowl", version, about = "Multiple-choice quiz over a course question bank")]
struct Cli {
    /// SQLite file holding the question bank
    #[arg(long, global = true, env = "QUIZ_BOWL_DB", default_value = DEFAULT_DB_PATH)]
    db: PathBuf,

    /// Write logs to this file instead of stderr
    #[arg(long, global = true, env = "QUIZ_BOWL_LOG")]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Play a quiz in the terminal (default)
    Play {
        /// How long answer feedback stays on screen, in milliseconds
        #[arg(long, default_value_t = DEFAULT_FEEDBACK_MS)]
        feedback_ms: u64,
    },

    /// Create the question tables
    Init,

    /// List categories with their question counts
    Categories,

    /// List the questions of one category
    List {
        /// Category display name or storage key
        #[arg(long)]
        category: String,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Add a question (admin)
    Add {
        #[command(flatten)]
        auth: AdminAuth,

        #[command(flatten)]
        fields: QuestionFields,
    },

    /// Replace an existing question (admin)
    Edit {
        #[command(flatten)]
        auth: AdminAuth,

        /// Question id within the category
        #[arg(long)]
        id: i64,

        #[command(flatten)]
        fields: QuestionFields,
    },

    /// Delete a question (admin)
    Delete {
        #[command(flatten)]
        auth: AdminAuth,

        /// Category display name or storage key
        #[arg(long)]
        category: String,

        /// Question id within the category
        #[arg(long)]
        id: i64,
    },

    /// Import questions from a JSON file (admin)
    Import {
        #[command(flatten)]
        auth: AdminAuth,

        /// JSON array of {category, question, options, correct_answer}
        file: PathBuf,
    },
}

#[derive(Args, Debug)]
struct AdminAuth {
    /// Admin password
    #[arg(long, env = "QUIZ_BOWL_PASSWORD", hide_env_values = true)]
    password: String,
}

#[derive(Args, Debug)]
struct QuestionFields {
    /// Category display name or storage key
    #[arg(long)]
    category: String,

    /// Question text
    #[arg(long)]
    question: String,

    #[arg(short = 'a', long = "option-a")]
    option_a: String,

    #[arg(short = 'b', long = "option-b")]
    option_b: String,

    #[arg(short = 'c', long = "option-c")]
    option_c: String,

    #[arg(short = 'd', long = "option-d")]
    option_d: String,

    /// Correct option: A, B, C or D
    #[arg(long)]
    correct: String,
}

impl QuestionFields {
    fn parse(&self) -> Result<(Category, QuestionDraft), QuizError> {
        let category = self.category.parse()?;
        let draft = QuestionDraft::from_fields(
            &self.question,
            [
                self.option_a.as_str(),
                self.option_b.as_str(),
                self.option_c.as_str(),
                self.option_d.as_str(),
            ],
            &self.correct,
        )?;
        Ok((category, draft))
    }
}

fn main() {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or_else(default_command);
    let config = Config {
        db_path: cli.db,
        log_file: cli.log_file,
        feedback_delay: match &command {
            Command::Play { feedback_ms } => Duration::from_millis(*feedback_ms),
            _ => DEFAULT_FEEDBACK_DELAY,
        },
    };

    if let Err(e) = init_tracing(&config, matches!(command, Command::Play { .. })) {
        eprintln!("error: failed to open log file: {}", e);
        process::exit(1);
    }

    if let Err(e) = execute(command, &config) {
        if !e.is_user_error() {
            tracing::error!(error = %e, "command failed");
        }
        eprintln!("error: {}", e);
        process::exit(1);
    }
}

fn default_command() -> Command {
    Command::Play {
        feedback_ms: DEFAULT_FEEDBACK_MS,
    }
}

/// Logs go to the configured file, else stderr. While the terminal UI owns
/// the screen and no file is set, they are discarded.
fn init_tracing(config: &Config, interactive: bool) -> std::io::Result<()> {
    let writer = match &config.log_file {
        Some(path) => BoxMakeWriter::new(Mutex::new(File::options().create(true).append(true).open(path)?)),
        None if interactive => BoxMakeWriter::new(std::io::sink),
        None => BoxMakeWriter::new(std::io::stderr),
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("quiz_bowl=info".parse().unwrap()),
        )
        .with_ansi(config.log_file.is_none())
        .with_writer(writer)
        .init();
    Ok(())
}

fn execute(command: Command, config: &Config) -> Result<(), QuizError> {
    match command {
        Command::Play { .. } => QuizBowl::from_config(config)?.run(),
        Command::Init => {
            let store = config.open_store()?;
            println!("Tables ready in {}", store.path().display());
            Ok(())
        }
        Command::Categories => {
            let store = config.open_store()?;
            for &category in store.categories() {
                println!(
                    "{:<24}{:<24}{} questions",
                    category.display_name(),
                    category.table(),
                    store.count(category)?
                );
            }
            Ok(())
        }
        Command::List { category, json } => {
            let category: Category = category.parse()?;
            let store = config.open_store()?;
            let questions = store.questions(category)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&questions)?);
            } else if questions.is_empty() {
                println!("No questions in {}.", category);
            } else {
                for q in &questions {
                    println!("[{}] {}", q.id, q.prompt);
                    for choice in Choice::ALL {
                        println!("    {}. {}", choice, q.option(choice));
                    }
                    println!("    correct: {}", q.correct);
                }
            }
            Ok(())
        }
        Command::Add { auth, fields } => with_admin(config, &auth, |admin| {
            let (category, draft) = fields.parse()?;
            let id = admin.add_question(category, &draft)?;
            println!("Question {} added to {}.", id, category);
            Ok(())
        }),
        Command::Edit { auth, id, fields } => with_admin(config, &auth, |admin| {
            let (category, draft) = fields.parse()?;
            admin.update_question(category, id, &draft)?;
            println!("Question {} in {} updated.", id, category);
            Ok(())
        }),
        Command::Delete { auth, category, id } => with_admin(config, &auth, |admin| {
            let category: Category = category.parse()?;
            if admin.delete_question(category, id)? {
                println!("Question {} deleted from {}.", id, category);
            } else {
                println!("Question {} was not in {}; nothing to delete.", id, category);
            }
            Ok(())
        }),
        Command::Import { auth, file } => with_admin(config, &auth, |admin| {
            let questions = load_questions_from_json(&file)?;
            let count = admin.import(&questions)?;
            println!("Imported {} questions from {}.", count, file.display());
            Ok(())
        }),
    }
}

/// Run `action` with admin access. The password is checked before the
/// database is opened, so a rejected login leaves no file behind.
fn with_admin<T>(
    config: &Config,
    auth: &AdminAuth,
    action: impl FnOnce(&Admin<'_>) -> Result<T, QuizError>,
) -> Result<T, QuizError> {
    let gate = AdminGate::default();
    gate.verify(&auth.password)?;
    let store = config.open_store()?;
    action(&gate.login(&store, &auth.password)?)
}
