//! # Interactive Shell
//!
//! A line-driven stand-in for the admin page: every command acts on one
//! [`PageState`] and the page is redrawn after each success.
//!
//! ## Commands
//! ```text
//! edit <id> [name|price]          edit button (again on the same row cancels)
//! set <value>                     replace the draft
//! save | Enter                    save the draft
//! cancel | Escape                 drop the draft
//! delete <id>                     delete after confirmation
//! add-author <full name>
//! add-book <author_id> <pages> <name>
//! stock <book_id> <price>         store pages only
//! search [term]                   empty term clears the filter
//! sign-in [name] | sign-out
//! show | help | quit
//! ```
//!
//! Errors print as `[CODE] message` and leave the page as it was, an open
//! edit included.

use std::io::{BufRead, Write};
use std::str::FromStr;

use folio_core::collection::Confirm;
use folio_core::editing::{BeginOutcome, EditField, EditKey};
use folio_data::{AuthContext, SessionStore};
use tracing::debug;

use crate::commands::{session, view};
use crate::error::{AppError, AppResult};
use crate::pages::PageState;
use crate::prompt::LineConfirm;
use crate::state::DisplayState;

const PROMPT: &str = "folio> ";

const HELP: &str = "\
edit <id> [name|price]   set <value>   save   cancel
delete <id>   add-author <name>   add-book <author_id> <pages> <name>
stock <book_id> <price>   search [term]   sign-in [name]   sign-out
show   help   quit";

// =============================================================================
// Command Parsing
// =============================================================================

/// One parsed shell line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Edit { id: i64, field: Option<EditField> },
    Set(String),
    Key(EditKey),
    Delete(i64),
    AddAuthor(String),
    AddBook { author_id: String, pages: String, name: String },
    Stock { book_id: String, price: String },
    Search(String),
    SignIn(String),
    SignOut,
    Show,
    Help,
    Quit,
}

fn id_arg(args: &str) -> AppResult<i64> {
    Ok(folio_core::validation::parse_id("id", args.split_whitespace().next().unwrap_or(""))?)
}

fn usage(text: &str) -> AppError {
    AppError::validation(format!("Usage: {}", text))
}

impl FromStr for ShellCommand {
    type Err = AppError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim_start().trim_end_matches(['\r', '\n']);
        let (word, args) = line.split_once(' ').unwrap_or((line, ""));

        if let Some(key) = EditKey::from_key_name(word) {
            return Ok(ShellCommand::Key(key));
        }

        match word {
            "edit" => {
                let mut parts = args.split_whitespace();
                let id = id_arg(parts.next().unwrap_or(""))?;
                let field = match parts.next() {
                    None => None,
                    Some("name") => Some(EditField::Name),
                    Some("price") => Some(EditField::Price),
                    Some(_) => return Err(usage("edit <id> [name|price]")),
                };
                Ok(ShellCommand::Edit { id, field })
            }
            "set" => Ok(ShellCommand::Set(args.to_string())),
            "save" => Ok(ShellCommand::Key(EditKey::Enter)),
            "cancel" => Ok(ShellCommand::Key(EditKey::Escape)),
            "delete" => Ok(ShellCommand::Delete(id_arg(args)?)),
            "add-author" => Ok(ShellCommand::AddAuthor(args.to_string())),
            "add-book" => {
                let mut parts = args.trim().splitn(3, char::is_whitespace);
                match (parts.next(), parts.next(), parts.next()) {
                    (Some(author_id), Some(pages), Some(name)) if !author_id.is_empty() => {
                        Ok(ShellCommand::AddBook {
                            author_id: author_id.to_string(),
                            pages: pages.to_string(),
                            name: name.trim().to_string(),
                        })
                    }
                    _ => Err(usage("add-book <author_id> <pages> <name>")),
                }
            }
            "stock" => match args.split_whitespace().collect::<Vec<_>>().as_slice() {
                [book_id, price] => Ok(ShellCommand::Stock {
                    book_id: book_id.to_string(),
                    price: price.to_string(),
                }),
                _ => Err(usage("stock <book_id> <price>")),
            },
            "search" => Ok(ShellCommand::Search(args.trim().to_string())),
            "sign-in" => Ok(ShellCommand::SignIn(args.to_string())),
            "sign-out" => Ok(ShellCommand::SignOut),
            "show" | "" => Ok(ShellCommand::Show),
            "help" | "?" => Ok(ShellCommand::Help),
            "quit" | "exit" => Ok(ShellCommand::Quit),
            other => Err(AppError::validation(format!(
                "Unknown command '{}'. Type help for commands.",
                other
            ))),
        }
    }
}

// =============================================================================
// Execution
// =============================================================================

/// What the loop does after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Step {
    /// Print the message, if any, then redraw the page.
    Redraw(Option<String>),
    Help,
    Quit,
}

fn execute<S: SessionStore>(
    command: ShellCommand,
    state: &mut PageState,
    auth: &mut AuthContext<S>,
    confirm: &mut dyn Confirm,
) -> AppResult<Step> {
    let snapshot = auth.snapshot();
    let message = match command {
        ShellCommand::Edit { id, field } => match state.edit_row(&snapshot, id, field, confirm)? {
            BeginOutcome::Started | BeginOutcome::Cancelled => None,
            BeginOutcome::Kept => Some("Kept the unsaved edit".to_string()),
            BeginOutcome::Switched { discarded } => {
                Some(format!("Discarded draft \"{}\" of row {}", discarded.draft, discarded.row))
            }
        },
        ShellCommand::Set(value) => {
            state.set_draft(&value)?;
            None
        }
        ShellCommand::Key(key) => state.key(key)?.map(|saved| saved.to_string()),
        ShellCommand::Delete(id) => {
            if state.delete(&snapshot, id, confirm)? {
                Some(format!("Deleted {}", id))
            } else {
                Some("Nothing deleted".to_string())
            }
        }
        ShellCommand::AddAuthor(name) => {
            let author = state.add_author(&snapshot, &name)?;
            Some(format!("Added author {}: {}", author.id, author.display_name()))
        }
        ShellCommand::AddBook { author_id, pages, name } => {
            let book = state.add_book(&snapshot, &author_id, &pages, &name)?;
            Some(format!("Added book {}: {}", book.id, book.name))
        }
        ShellCommand::Stock { book_id, price } => {
            let item = state.stock(&snapshot, &book_id, &price)?;
            Some(format!("Stocked book {} at {}", item.book_id, item.price))
        }
        ShellCommand::Search(term) => {
            state.set_search(term);
            None
        }
        ShellCommand::SignIn(name) => Some(session::sign_in(auth, &name)?),
        ShellCommand::SignOut => {
            // Editing controls disappear with the user.
            state.cancel();
            Some(session::sign_out(auth)?)
        }
        ShellCommand::Show => None,
        ShellCommand::Help => return Ok(Step::Help),
        ShellCommand::Quit => return Ok(Step::Quit),
    };

    Ok(Step::Redraw(message))
}

/// Runs the shell until `quit` or end of input.
pub fn run<S, R, W>(
    state: &mut PageState,
    auth: &mut AuthContext<S>,
    display: &DisplayState,
    input: &mut R,
    output: &mut W,
) -> AppResult<()>
where
    S: SessionStore,
    R: BufRead,
    W: Write,
{
    let io_err = |e: std::io::Error| AppError::internal(e.to_string());

    writeln!(output, "{}", view::render_page(state, &auth.snapshot(), display)).map_err(io_err)?;

    loop {
        write!(output, "\n{}", PROMPT).map_err(io_err)?;
        output.flush().map_err(io_err)?;

        let mut line = String::new();
        if input.read_line(&mut line).map_err(io_err)? == 0 {
            writeln!(output).map_err(io_err)?;
            break;
        }

        let step = line.parse::<ShellCommand>().and_then(|command| {
            debug!(?command, "Shell command");
            let mut confirm = LineConfirm::new(&mut *input, &mut *output);
            execute(command, state, auth, &mut confirm)
        });

        match step {
            Ok(Step::Quit) => break,
            Ok(Step::Help) => writeln!(output, "{}", HELP).map_err(io_err)?,
            Ok(Step::Redraw(message)) => {
                if let Some(message) = message {
                    writeln!(output, "{}", message).map_err(io_err)?;
                }
                writeln!(output, "{}", view::render_page(state, &auth.snapshot(), display))
                    .map_err(io_err)?;
            }
            Err(err) => writeln!(output, "{}", err).map_err(io_err)?,
        }
    }

    Ok(())
}
