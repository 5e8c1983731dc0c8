use std::io::{self, Write};

use anyhow::Result;
use clap::{Parser, Subcommand};
use shiksha::lesson::{Category, LessonStore};
use shiksha::progress::ProgressTracker;
use shiksha::storage::FileStorage;
use shiksha::{App, Config};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "shiksha")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List the lessons in a category
    Lessons {
        /// Category name (beginner, intermediate, or advanced)
        category: String,
    },
    /// Reset all saved progress
    Reset {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "shiksha=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Lessons { category }) => {
            list_lessons(&category).await?;
        }
        Some(Commands::Reset { yes }) => {
            reset_progress(yes)?;
        }
        None => {
            // Launch TUI
            let config = Config::load()?;
            let mut app = App::new(config)?;
            app.run().await?;
        }
    }

    Ok(())
}

/// Print a category's lessons with completion markers
async fn list_lessons(category: &str) -> Result<()> {
    let category: Category = category.parse()?;
    let config = Config::load()?;
    let mut store = LessonStore::new(config.lesson_source.clone());
    let progress = ProgressTracker::load(FileStorage::new(Config::storage_dir()?)?)?;

    let lessons = store.load_category_lessons(category).await;
    if lessons.is_empty() {
        println!("No lessons available for {category} yet.");
        return Ok(());
    }

    for lesson in lessons {
        let done = if progress.is_completed(&lesson.id) { "✓" } else { " " };
        println!("{done} {:32} {} ({})", lesson.id, lesson.title, lesson.estimated_time_label());
    }
    Ok(())
}

/// Wipe saved progress, after an explicit confirmation
fn reset_progress(yes: bool) -> Result<()> {
    if !yes {
        print!("Are you sure you want to reset all progress? This cannot be undone. [y/N] ");
        io::stdout().flush()?;

        let mut answer = String::new();
        io::stdin().read_line(&mut answer)?;
        let answer = answer.trim().to_lowercase();
        if answer != "y" && answer != "yes" {
            println!("Reset cancelled.");
            return Ok(());
        }
    }

    let mut progress = ProgressTracker::load(FileStorage::new(Config::storage_dir()?)?)?;
    progress.reset()?;
    println!("All progress has been reset.");
    Ok(())
}
