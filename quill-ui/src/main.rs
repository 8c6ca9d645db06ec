// Line-oriented front end: reads editor commands from stdin and applies them
// to a headless canvas. Useful for scripting and for poking at history.

use anyhow::{Context, Result};
use clap::Parser;
use futures_lite::future::block_on;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use quill_ui::config::{load_config, CONFIG_FILE_NAME};
use quill_ui::editor::{Command, Editor, ListenerRegistry, Outcome};
use quill_ui::logging;

#[derive(Parser)]
#[command(name = "quill")]
#[command(about = "Text canvas editor with undo/redo, driven from stdin")]
struct Cli {
    #[arg(short, long, help = "Path to the editor config (JSON)")]
    config: Option<PathBuf>,

    #[arg(long, help = "Log filter used when RUST_LOG is unset")]
    log: Option<String>,
}

const HELP: &str = "\
commands:
  add                     add a text box
  undo | redo
  bold | italic | underline
  size <points>           font size of the active box
  font <family>           font family of the active box
  move <x> <y>            move the active box
  resize <w> <h>          resize the active box
  text <content>          replace the active box's text (\\n for newline)
  select <x> <y>          focus the box under the point
  canvas <w> <h>          resize the canvas
  show                    print the scene as JSON
  help | quit";

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.log.as_deref().unwrap_or(logging::DEFAULT_FILTER));

    let config_path = cli.config.unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME));
    let config = load_config(&config_path)?;

    let registry = ListenerRegistry::new();
    let mut editor = Editor::headless(config, &registry).context("create editor")?;

    let stdin = io::stdin();
    let mut out = io::stdout().lock();
    for line in stdin.lock().lines() {
        let line = line.context("read command")?;
        let trimmed = line.trim();
        match trimmed {
            "" => continue,
            "quit" | "exit" => break,
            "help" => {
                writeln!(out, "{HELP}")?;
                continue;
            }
            "show" => {
                let json = serde_json::to_string_pretty(&editor.scene().serialize())
                    .context("serialize scene")?;
                writeln!(out, "{json}")?;
                continue;
            }
            _ => {}
        }

        let command: Command = match trimmed.parse() {
            Ok(command) => command,
            Err(e) => {
                writeln!(out, "error: {e}")?;
                continue;
            }
        };

        // Same queue the window listeners feed.
        editor.queue(command);
        for result in block_on(editor.run_pending()) {
            match result {
                Ok(Outcome::Added(id)) => writeln!(out, "added {id}")?,
                Ok(Outcome::Applied) => writeln!(out, "ok")?,
                Ok(Outcome::Ignored) => writeln!(out, "ignored")?,
                Err(e) => writeln!(out, "error: {e}")?,
            }
        }

        let controls = editor.controls();
        writeln!(
            out,
            "  objects={} undo={} redo={}",
            editor.scene().len(),
            controls.can_undo,
            controls.can_redo
        )?;
    }

    editor.dispose();
    Ok(())
}
