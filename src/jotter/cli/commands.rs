//! # CLI Layer
//!
//! This module is **one possible host** for jotter. It is the only place that
//! knows about the terminal: argument parsing, stdout/stderr, prompting and
//! exit codes all live under `cli/`.
//!
//! Every subcommand is replayed as the gestures a windowed host would send to
//! the [`Binding`], so the terminal exercises the same edit state machine and
//! confirmation step as any other UI. A process handles one command, so the
//! binding's UI state never outlives it. The host keeps its own
//! [`NoteListView`] and brings it up to date from each result's refresh hint
//! before printing.
//!
//! ## Structure
//!
//! - `run()`: parse, build the context, dispatch
//! - `init_context()`: data dir, config, logging, store
//! - `handle_*()`: one per subcommand; each prints messages and re-renders
//!   what changed

use super::print::{disable_color, print_messages};
use super::prompt::TerminalPrompt;
use super::render::{render_card, render_list, use_color};
use super::setup::{Cli, Commands, TodoCommands};
use clap::Parser;
use directories::ProjectDirs;
use jotter::api::{CmdMessage, CmdResult, JotterApi};
use jotter::binding::{Binding, Confirm, Decision, FixedAnswer, FormField, Gesture, Key};
use jotter::config::JotterConfig;
use jotter::error::{JotError, Result};
use jotter::logging::init_logging;
use jotter::model::{NoteField, NoteId, TodoId};
use jotter::store::fs_backend::FsBackend;
use jotter::view::{self, NoteListView};
use log::{debug, info};
use std::path::PathBuf;

/// Overrides the data directory.
pub const HOME_ENV: &str = "JOTTER_HOME";

struct AppContext {
    binding: Binding<FsBackend, Box<dyn Confirm>>,
    view: NoteListView,
    config: JotterConfig,
    data_dir: PathBuf,
    color: bool,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    if cli.no_color {
        disable_color();
    }

    let mut ctx = init_context(&cli)?;

    match cli.command {
        Some(Commands::List) | None => handle_list(&ctx),
        Some(Commands::Add { title, content }) => {
            handle_add(&mut ctx, title, content.unwrap_or_default())
        }
        Some(Commands::View { note }) => handle_view(&ctx, note),
        Some(Commands::Edit { note, field, text }) => {
            handle_edit(&mut ctx, note, field, text.join(" "))
        }
        Some(Commands::Delete { note, .. }) => handle_delete(&mut ctx, note),
        Some(Commands::Todo { action }) => match action {
            TodoCommands::Add { note, text } => handle_todo_add(&mut ctx, note, text.join(" ")),
            TodoCommands::Done { note, todo } => handle_todo_toggle(&mut ctx, note, todo, true),
            TodoCommands::Undo { note, todo } => handle_todo_toggle(&mut ctx, note, todo, false),
            TodoCommands::Rm { note, todo } => handle_todo_rm(&mut ctx, note, todo),
        },
        Some(Commands::Path) => handle_path(&ctx),
        Some(Commands::Config { key, value }) => handle_config(&mut ctx, key, value),
    }
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let data_dir = resolve_data_dir()?;

    let config = match JotterConfig::load(&data_dir) {
        Ok(config) => config,
        Err(e) => {
            eprintln!(
                "Warning: ignoring unreadable config ({}); using defaults",
                e
            );
            JotterConfig::default()
        }
    };

    let level = if cli.verbose {
        "debug"
    } else {
        config.log_level.as_str()
    };
    if let Err(e) = init_logging(level, &data_dir.join("logs")) {
        eprintln!("Warning: logging disabled: {}", e);
    }

    let skip_confirm = matches!(cli.command, Some(Commands::Delete { yes: true, .. }));
    let confirm: Box<dyn Confirm> = if skip_confirm || !config.confirm_delete {
        Box::new(FixedAnswer(Decision::Proceed))
    } else {
        Box::new(TerminalPrompt)
    };

    let backend = FsBackend::new(data_dir.clone());
    let api = JotterApi::open(backend, &config.storage_key)?;
    info!(
        "event=context_ready data_dir={} slot={}",
        data_dir.display(),
        config.storage_key
    );

    let binding = Binding::new(api, confirm);
    let view = binding.view();

    Ok(AppContext {
        binding,
        view,
        config,
        data_dir,
        color: use_color(cli.no_color),
    })
}

fn resolve_data_dir() -> Result<PathBuf> {
    if let Some(home) = std::env::var_os(HOME_ENV) {
        return Ok(PathBuf::from(home));
    }
    ProjectDirs::from("com", "jotter", "jotter")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| {
            JotError::Config(format!(
                "could not determine a data directory; set {}",
                HOME_ENV
            ))
        })
}

/// Commands that name a note fail loudly when it is not there.
fn require_note(ctx: &AppContext, note: NoteId) -> Result<()> {
    match ctx.binding.api().store().note(note) {
        Some(_) => Ok(()),
        None => Err(JotError::NoteNotFound(note)),
    }
}

/// Apply the result's refresh to the host's tree, print messages, then the
/// card for `note` if it still exists.
fn report(ctx: &mut AppContext, result: &CmdResult, note: Option<NoteId>) {
    let notes = ctx.binding.api().notes();
    ctx.view.apply(result.refresh, notes, ctx.binding.ui());

    print_messages(&result.messages);
    if result.is_noop() {
        return;
    }
    if let Some(card) = note.and_then(|id| ctx.view.card(id)) {
        print!("{}", render_card(card, ctx.color));
    }
}

fn handle_list(ctx: &AppContext) -> Result<()> {
    let result = ctx.binding.api().list_notes()?;
    debug!("event=list count={}", result.listed_notes.len());
    let listed = view::render(&result.listed_notes, ctx.binding.ui());
    print!("{}", render_list(&listed, ctx.color));
    Ok(())
}

fn handle_add(ctx: &mut AppContext, title: String, content: String) -> Result<()> {
    let result = ctx.binding.handle_all([
        Gesture::FormInput {
            field: FormField::Title,
            text: title,
        },
        Gesture::FormInput {
            field: FormField::Content,
            text: content,
        },
        Gesture::Submit,
    ])?;
    let created = result.affected_notes.last().map(|n| n.id);
    report(ctx, &result, created);
    Ok(())
}

fn handle_view(ctx: &AppContext, note: NoteId) -> Result<()> {
    let result = ctx.binding.api().view_note(note)?;
    for found in &result.listed_notes {
        let card = view::render_note(found, ctx.binding.ui());
        print!("{}", render_card(&card, ctx.color));
    }
    Ok(())
}

fn handle_edit(ctx: &mut AppContext, note: NoteId, field: NoteField, text: String) -> Result<()> {
    require_note(ctx, note)?;
    let result = ctx.binding.handle_all([
        Gesture::DoubleClick { note, field },
        Gesture::EditInput { note, field, text },
        Gesture::EditKey {
            note,
            field,
            key: Key::Enter,
        },
    ])?;
    report(ctx, &result, Some(note));
    Ok(())
}

fn handle_delete(ctx: &mut AppContext, note: NoteId) -> Result<()> {
    require_note(ctx, note)?;
    let result = ctx.binding.handle(Gesture::DeleteNoteClick { note })?;
    report(ctx, &result, None);
    Ok(())
}

fn handle_todo_add(ctx: &mut AppContext, note: NoteId, text: String) -> Result<()> {
    require_note(ctx, note)?;
    let result = ctx.binding.handle_all([
        Gesture::TodoInput { note, text },
        Gesture::AddTodoClick { note },
    ])?;
    report(ctx, &result, Some(note));
    Ok(())
}

fn handle_todo_toggle(ctx: &mut AppContext, note: NoteId, todo: TodoId, done: bool) -> Result<()> {
    let mut result = ctx.binding.handle(Gesture::CheckboxChange {
        note,
        todo,
        checked: done,
    })?;
    warn_if_missing(&mut result, note, todo);
    report(ctx, &result, Some(note));
    Ok(())
}

fn handle_todo_rm(ctx: &mut AppContext, note: NoteId, todo: TodoId) -> Result<()> {
    let mut result = ctx
        .binding
        .handle(Gesture::DeleteTodoClick { note, todo })?;
    warn_if_missing(&mut result, note, todo);
    report(ctx, &result, Some(note));
    Ok(())
}

/// Stale to-do references are no-ops; tell the user rather than fail.
fn warn_if_missing(result: &mut CmdResult, note: NoteId, todo: TodoId) {
    if result.is_noop() {
        result.add_message(CmdMessage::warning(format!(
            "No such to-do ({}/{})",
            note, todo
        )));
    }
}

fn handle_path(ctx: &AppContext) -> Result<()> {
    println!("{}", ctx.binding.api().slot_location());
    Ok(())
}

fn handle_config(ctx: &mut AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    match (key, value) {
        (None, _) => {
            for (key, value) in ctx.config.entries() {
                println!("{} = {}", key, value);
            }
        }
        (Some(key), None) => println!("{}", ctx.config.get(&key)?),
        (Some(key), Some(value)) => {
            ctx.config.set(&key, &value)?;
            ctx.config.save(&ctx.data_dir)?;
            info!("event=config_set key={}", key);
            print_messages(&[CmdMessage::success(format!(
                "{} set to {}",
                key,
                ctx.config.get(&key)?
            ))]);
        }
    }
    Ok(())
}
