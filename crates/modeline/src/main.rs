use std::env;
use std::io::{self, Stdout, Write};

use anyhow::Result;
use crossterm::event::{self, Event};
use tracing::{info, warn};

use modeline::config::{self, Config};
use modeline::history::History;
use modeline::notice::Notice;
use modeline::render;
use modeline::terminal::TerminalHandle;
use modeline::{InputCoordinator, InputOutcome, KeyPress};

fn print_version() {
    println!("modeline {}", env!("CARGO_PKG_VERSION"));
}

fn print_usage() {
    eprintln!("modeline - a prompt line with vim-style editing");
    eprintln!();
    eprintln!("Usage: modeline [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -h, --help        Print this help message");
    eprintln!("  -V, --version     Print version information");
    eprintln!("      --vim         Start with vim editing enabled");
    eprintln!("      --debug-keys  Print detected keypresses (for troubleshooting)");
    eprintln!();
    eprintln!("Line commands:");
    eprintln!("  /vim              Toggle vim editing");
    eprintln!("  /history          List submitted lines");
    eprintln!("  /quit             Exit");
    eprintln!("  \"\"\"               Start multi-line input (blank line sends)");
    eprintln!();
    eprintln!("Environment Variables:");
    eprintln!("  MODELINE_CONFIG_DIR  Override the config directory");
    eprintln!("  MODELINE_LOG         Log filter (e.g. modeline=debug)");
    eprintln!();
    eprintln!("Configuration:");
    if let Some(path) = config::config_path() {
        eprintln!("  Config file: {}", path.display());
    }
}

fn main() -> Result<()> {
    // Parse command-line arguments
    let args: Vec<String> = env::args().collect();

    // Check for help flag
    if args.iter().any(|a| a == "-h" || a == "--help") {
        print_usage();
        return Ok(());
    }

    // Check for version flag
    if args.iter().any(|a| a == "-V" || a == "--version") {
        print_version();
        return Ok(());
    }

    // Key debug mode (helps identify what the terminal actually sends)
    if args.iter().any(|a| a == "--debug-keys") {
        return run_debug_keys();
    }

    // Load configuration from ~/.config/modeline/config.toml
    let cfg = config::load_config().unwrap_or_else(|e| {
        eprintln!("Warning: Failed to load config: {}", e);
        Config::default()
    });

    let _log_guard = modeline::logging::init(&cfg.log).unwrap_or_else(|e| {
        eprintln!("Warning: Failed to set up logging: {}", e);
        None
    });

    let start_in_vim = cfg.editor.start_in_vim || args.iter().any(|a| a == "--vim");
    run(cfg, start_in_vim)
}

fn load_history(cfg: &Config) -> History {
    let capacity = cfg.editor.history_capacity;
    if !cfg.editor.persist_history {
        return History::new_empty(capacity);
    }
    History::load(capacity).unwrap_or_else(|e| {
        warn!(target: "history", error = %e, "history unavailable; starting empty");
        History::new_empty(capacity)
    })
}

fn run(cfg: Config, start_in_vim: bool) -> Result<()> {
    let history = load_history(&cfg);
    let mut input = InputCoordinator::new(history, cfg.editor.clone(), cfg.multiline.clone());
    if start_in_vim {
        let _ = input.set_modal(true);
    }

    let _terminal = TerminalHandle::acquire()?;
    let mut out = io::stdout();
    info!(target: "runtime", "input loop started");

    loop {
        if input.take_redraw() {
            render::draw(&mut out, &input.view())?;
        }

        let key = match event::read()? {
            Event::Key(key) => KeyPress::from(key),
            Event::Resize(..) => {
                render::draw(&mut out, &input.view())?;
                continue;
            }
            _ => continue,
        };

        let was_modal = input.is_modal();
        match input.handle(&key) {
            InputOutcome::None => {}
            InputOutcome::Cancelled => {}
            InputOutcome::Notice(notice) => render::notice(&mut out, &notice)?,
            InputOutcome::Submitted(text) => {
                render::newline(&mut out)?;
                match text.trim() {
                    "/quit" => break,
                    "/vim" => show(&mut out, input.set_modal(!was_modal))?,
                    "/history" => list_history(&input, &mut out)?,
                    _ => respond(&mut out, &text)?,
                }
            }
            InputOutcome::Exit => break,
        }
    }

    render::newline(&mut out)?;
    if let Err(e) = input.history_mut().save() {
        warn!(target: "history", error = %e, "failed to save history");
    }
    info!(target: "runtime", "input loop finished");
    Ok(())
}

fn show(out: &mut Stdout, outcome: InputOutcome) -> Result<()> {
    if let InputOutcome::Notice(notice) = outcome {
        render::notice(out, &notice)?;
    }
    Ok(())
}

fn list_history(input: &InputCoordinator, out: &mut Stdout) -> Result<()> {
    let history = input.history();
    write!(out, "{} of {} entries\r\n", history.len(), history.capacity())?;
    for (i, entry) in history.entries().iter().enumerate() {
        let stamp = entry.timestamp.format("%Y-%m-%d %H:%M");
        let text = entry.text.replace('\n', "\r\n                        ");
        write!(out, "{:>4}  {stamp}  {text}\r\n", i + 1)?;
    }
    out.flush()?;
    Ok(())
}

/// Stand-in for handing the line to the assistant: echo it back.
fn respond(out: &mut Stdout, text: &str) -> Result<()> {
    let lines = text.lines().count().max(1);
    render::notice(
        out,
        &Notice::info(format!(
            "sent {} line(s), {} chars",
            lines,
            text.chars().count()
        )),
    )?;
    Ok(())
}

fn run_debug_keys() -> Result<()> {
    let _terminal = TerminalHandle::acquire()?;
    let mut stdout = io::stdout();
    write!(
        stdout,
        "\r\nmodeline --debug-keys (press Esc or Ctrl+C to exit)"
    )?;
    stdout.flush()?;

    loop {
        let ev = event::read()?;
        match ev {
            Event::Key(raw) => {
                let key = KeyPress::from(raw);
                write!(stdout, "\r\nKey: {}    raw={raw:?}", key.describe())?;
                stdout.flush()?;

                if key.is(modeline::NamedKey::Escape) || key.is_ctrl_char('c') {
                    break;
                }
            }
            Event::Resize(w, h) => {
                write!(stdout, "\r\nResize: {w}x{h}")?;
                stdout.flush()?;
            }
            Event::Paste(text) => {
                write!(stdout, "\r\nPaste: {:?} ({} bytes)", text, text.len())?;
                stdout.flush()?;
            }
            other => {
                write!(stdout, "\r\nEvent: {other:?}")?;
                stdout.flush()?;
            }
        }
    }

    write!(stdout, "\r\n")?;
    stdout.flush()?;
    Ok(())
}
