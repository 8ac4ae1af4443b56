//! # Quill Console Library
//!
//! The interactive menu for the Quill bookstore. The `quill` binary is a
//! thin wrapper around [`run`].
//!
//! ## Module Organization
//! ```text
//! quill_console/
//! ├── lib.rs          ◄─── You are here (session + menu loop)
//! ├── config.rs       ◄─── CLI arguments and database path
//! ├── menu.rs         ◄─── Menu codes and text
//! ├── prompt.rs       ◄─── Line input/output abstraction
//! ├── commands.rs     ◄─── One function per menu entry
//! └── error.rs        ◄─── Operator-facing error type
//! ```
//!
//! ## Session
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Console Session                                   │
//! │                                                                         │
//! │  1. Open Database ────────────────────────────────────────────────────► │
//! │     • SQLite with WAL mode                                              │
//! │     • Run pending migrations                                            │
//! │                                                                         │
//! │  2. Seed (only with --seed, only into an empty store) ───────────────► │
//! │                                                                         │
//! │  3. Menu Loop ────────────────────────────────────────────────────────► │
//! │     • print menu, read choice, dispatch                                 │
//! │     • command errors are printed and the loop continues                 │
//! │     • 0 or end of input leaves the loop                                 │
//! │                                                                         │
//! │  4. Close Database (on every exit path) ─────────────────────────────► │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod commands;
pub mod config;
pub mod error;
pub mod menu;
pub mod prompt;

use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use config::{ConsoleConfig, DEFAULT_LOG_FILTER};
use error::{ConsoleResult, ErrorCode};
use menu::{menu_lines, MenuCode};
use prompt::Prompt;
use quill_db::{seed_demo_data, Database, DbConfig};

/// Runs one console session against the configured database.
///
/// The database is closed before returning, whether the session ended
/// normally or with an error.
pub async fn run<P: Prompt>(config: &ConsoleConfig, prompt: &mut P) -> ConsoleResult<()> {
    info!(path = %config.database_path.display(), "Opening database");
    let db = Database::new(DbConfig::new(config.database_path.clone())).await?;

    let result = session(&db, config, prompt).await;

    db.close().await;
    result
}

async fn session<P: Prompt>(
    db: &Database,
    config: &ConsoleConfig,
    prompt: &mut P,
) -> ConsoleResult<()> {
    if config.seed {
        let summary = seed_demo_data(db).await?;
        if summary.is_empty() {
            prompt.say("Database already has books; demo data not loaded.")?;
        } else {
            prompt.say(&format!(
                "Loaded demo data: {} books, {} customers.",
                summary.books, summary.customers
            ))?;
        }
        prompt.say("")?;
    }

    run_menu(db, prompt).await
}

/// Shows the menu until the operator exits or input ends.
pub async fn run_menu<P: Prompt>(db: &Database, prompt: &mut P) -> ConsoleResult<()> {
    loop {
        for line in menu_lines() {
            prompt.say(&line)?;
        }

        let input = match prompt.read_line() {
            Ok(Some(input)) => Ok(input),
            Ok(None) => {
                info!("End of input, leaving menu");
                return Ok(());
            }
            Err(e) => Err(e),
        };

        let outcome = match input.and_then(|input| input.parse::<MenuCode>()) {
            Ok(MenuCode::Exit) => {
                prompt.say("Exiting.")?;
                return Ok(());
            }
            Ok(choice) => {
                debug!(choice = choice.code(), "Menu choice");
                dispatch(db, prompt, choice).await
            }
            Err(e) => Err(e),
        };

        match outcome {
            Ok(()) => {}
            Err(e) if e.code == ErrorCode::EndOfInput => {
                info!("End of input during command, leaving menu");
                return Ok(());
            }
            Err(e) if e.is_fatal() => return Err(e),
            Err(e) => {
                debug!(code = ?e.code, "Command failed");
                prompt.say(&e.message)?;
            }
        }

        prompt.say("")?;
    }
}

async fn dispatch<P: Prompt>(db: &Database, prompt: &mut P, choice: MenuCode) -> ConsoleResult<()> {
    match choice {
        MenuCode::UpdateBook => commands::update_book(db, prompt).await,
        MenuCode::ListBooksByGenre => commands::list_books_by_genre(db, prompt).await,
        MenuCode::ListBooksByAuthor => commands::list_books_by_author(db, prompt).await,
        MenuCode::UpdateCustomer => commands::update_customer(db, prompt).await,
        MenuCode::PurchaseHistory => commands::purchase_history(db, prompt).await,
        MenuCode::ProcessSale => commands::process_sale(db, prompt).await,
        MenuCode::RevenueByGenre => commands::revenue_by_genre(db, prompt).await,
        MenuCode::SalesReport => commands::sales_report(db, prompt).await,
        MenuCode::RevenueReport => commands::revenue_report(db, prompt).await,
        MenuCode::Exit => Ok(()),
    }
}

/// Initializes the tracing subscriber for structured logging.
///
/// Logs go to stderr so they never interleave with the menu on stdout.
///
/// ## Log Levels
/// - `--log debug` - Show debug messages
/// - `--log quill_db=trace` - Trace the database crate only
/// - Default: WARN level
pub fn init_tracing(filter: &str) {
    let filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{INVALID_CHOICE_MESSAGE, INVALID_TEXT_MESSAGE};
    use crate::prompt::LinePrompt;
    use quill_core::{Money, NewBook};
    use std::io::Cursor;

    async fn run_script(db: &Database, input: &str) -> (ConsoleResult<()>, String) {
        run_bytes(db, input.as_bytes()).await
    }

    async fn run_bytes(db: &Database, input: &[u8]) -> (ConsoleResult<()>, String) {
        let mut prompt = LinePrompt::new(Cursor::new(input.to_vec()), Vec::new());
        let result = run_menu(db, &mut prompt).await;
        (result, String::from_utf8(prompt.into_output()).unwrap())
    }

    async fn test_db() -> Database {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.books()
            .insert(&NewBook::new("Dune", "Herbert", "SciFi", Money::from_cents(999), 5))
            .await
            .unwrap();
        db
    }

    #[tokio::test]
    async fn test_exit_code_leaves_loop() {
        let db = test_db().await;
        let (result, out) = run_script(&db, "0\n2\nSciFi\n").await;

        assert!(result.is_ok());
        assert!(out.starts_with("Choose an option:\n1. Update Book Details\n"));
        assert!(out.ends_with("Exiting.\n"));
        assert!(!out.contains("Title: Dune"));
    }

    #[tokio::test]
    async fn test_end_of_input_exits_cleanly() {
        let db = test_db().await;
        let (result, out) = run_script(&db, "").await;

        assert!(result.is_ok());
        assert_eq!(out.matches("Choose an option:").count(), 1);
    }

    #[tokio::test]
    async fn test_end_of_input_inside_command() {
        let db = test_db().await;
        let (result, _) = run_script(&db, "1\n1\nNew title\n").await;

        assert!(result.is_ok());
        assert_eq!(db.books().get_by_id(1).await.unwrap().unwrap().title, "Dune");
    }

    #[tokio::test]
    async fn test_invalid_choice_redisplays_menu() {
        let db = test_db().await;
        let (result, out) = run_script(&db, "banana\n 2 \nSciFi\n0\n").await;

        assert!(result.is_ok());
        assert!(out.contains(INVALID_CHOICE_MESSAGE));
        assert!(out.contains("Title: Dune, Author: Herbert"));
        assert_eq!(out.matches("Choose an option:").count(), 3);
    }

    #[tokio::test]
    async fn test_command_error_does_not_end_session() {
        let db = test_db().await;
        let (result, out) = run_script(&db, "6\nabc\n6\n1\n1\n1\n0\n").await;

        assert!(result.is_ok());
        assert!(out.contains("Invalid input format. Please enter valid numeric values."));
        assert!(out.contains("Customer with ID 1 not found."));
        assert_eq!(db.sales().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_invalid_utf8_inside_command_keeps_session() {
        let db = test_db().await;
        let (result, out) = run_bytes(&db, b"2\n\xff\xfe\n0\n").await;

        assert!(result.is_ok());
        assert!(out.contains(INVALID_TEXT_MESSAGE));
        assert_eq!(out.matches("Choose an option:").count(), 2);
        assert!(out.ends_with("Exiting.\n"));
    }

    #[tokio::test]
    async fn test_invalid_utf8_menu_choice_redisplays_menu() {
        let db = test_db().await;
        let (result, out) = run_bytes(&db, b"\xc3\x28\n2\nSciFi\n0\n").await;

        assert!(result.is_ok());
        assert!(out.contains(INVALID_TEXT_MESSAGE));
        assert!(out.contains("Title: Dune, Author: Herbert"));
        assert_eq!(out.matches("Choose an option:").count(), 3);
    }
}
