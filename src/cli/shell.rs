//! Interactive prompt driving a [`Session`].
use super::{export, render, ui};
use crate::core::Session;
use crate::export::ExportFormat;
use anyhow::{Result, anyhow};
use std::io::Write;
use std::path::PathBuf;
use std::str::FromStr;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::debug;

const HELP: &str = "\
Commands:
  search <title>          Look up a movie (a bare title works too)
  show <n>                Show entry n from the history
  recent                  List the most recent searches
  table                   Summary table of every search
  clear                   Forget all searches
  export csv|pdf [path]   Save the history (defaults: movies.csv, movies.pdf)
  help                    Show this message
  quit                    Exit";

#[derive(Debug, Clone, PartialEq)]
pub enum ShellCommand {
    Search(String),
    Show(usize),
    Recent,
    Table,
    Clear,
    Export {
        format: ExportFormat,
        path: Option<PathBuf>,
    },
    Help,
    Quit,
    Empty,
}

impl FromStr for ShellCommand {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let line = s.trim();
        let (keyword, rest) = match line.split_once(char::is_whitespace) {
            Some((keyword, rest)) => (keyword, rest.trim()),
            None => (line, ""),
        };

        match (keyword.to_lowercase().as_str(), rest) {
            ("", _) => Ok(ShellCommand::Empty),
            ("search", title) => Ok(ShellCommand::Search(title.to_string())),
            ("show", n) => {
                let n: usize = n
                    .parse()
                    .map_err(|_| anyhow!("Usage: show <n> (n is a history number)"))?;
                if n == 0 {
                    return Err(anyhow!("History numbers start at 1"));
                }
                Ok(ShellCommand::Show(n))
            }
            ("recent", "") => Ok(ShellCommand::Recent),
            ("table", "") => Ok(ShellCommand::Table),
            ("clear", "") => Ok(ShellCommand::Clear),
            ("export", args) => {
                let (format, path) = match args.split_once(char::is_whitespace) {
                    Some((format, path)) => (format, Some(PathBuf::from(path.trim()))),
                    None if args.is_empty() => {
                        return Err(anyhow!("Usage: export csv|pdf [path]"));
                    }
                    None => (args, None),
                };
                Ok(ShellCommand::Export {
                    format: format.parse()?,
                    path,
                })
            }
            ("help" | "?", "") => Ok(ShellCommand::Help),
            ("quit" | "exit", "") => Ok(ShellCommand::Quit),
            _ => Ok(ShellCommand::Search(line.to_string())),
        }
    }
}

/// Whether the loop keeps reading after a command.
#[derive(Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Reads commands from `input` until `quit` or end of input.
pub async fn run<R>(session: &mut Session, input: R) -> Result<()>
where
    R: AsyncBufRead + Unpin,
{
    println!(
        "{}\n{}",
        ui::style_text("Bollywood Movie Info", ui::StyleType::Title),
        ui::style_text(
            "Get detailed info on Bollywood movies with posters, ratings, and box office earnings.",
            ui::StyleType::Subtle
        )
    );
    if session.current_rate().await.is_none() {
        println!(
            "{}",
            ui::style_text("Live USD to INR rate unavailable.", ui::StyleType::Warning)
        );
    }
    println!("{}", ui::style_text("Type 'help' for commands.", ui::StyleType::Subtle));

    let mut lines = input.lines();
    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            debug!("End of input");
            break;
        };

        let command = match line.parse::<ShellCommand>() {
            Ok(command) => command,
            Err(e) => {
                println!("{}", ui::style_text(&e.to_string(), ui::StyleType::Error));
                continue;
            }
        };

        if execute(session, command).await == Flow::Quit {
            break;
        }
    }
    Ok(())
}

/// Runs a single command. Failures are reported and never end the session.
pub async fn execute(session: &mut Session, command: ShellCommand) -> Flow {
    debug!(?command, "Executing shell command");
    match command {
        ShellCommand::Empty => {}
        ShellCommand::Search(title) => {
            let spinner = ui::new_spinner("Fetching...");
            let result = session.search(&title).await;
            spinner.finish_and_clear();
            match result {
                Ok(record) => {
                    println!(
                        "{}\n",
                        ui::style_text(&format!("Added '{}'", record.title), ui::StyleType::Success)
                    );
                    println!("{}", render::record_details(record));
                }
                Err(e) => println!("{}", ui::style_text(&e.to_string(), ui::StyleType::Error)),
            }
        }
        ShellCommand::Show(n) => match n.checked_sub(1).and_then(|i| session.select(i)) {
            Some(record) => println!("{}", render::record_details(record)),
            None => println!(
                "{}",
                ui::style_text(&format!("No history entry {n}."), ui::StyleType::Error)
            ),
        },
        ShellCommand::Recent => {
            let recent = session.recent();
            let offset = session.history().len() - recent.len();
            println!("{}", render::recent_list(recent, offset));
        }
        ShellCommand::Table => {
            if session.history().is_empty() {
                println!("{}", ui::style_text("No searches yet.", ui::StyleType::Subtle));
            } else {
                println!("{}", render::summary_table(session.history().all()));
            }
        }
        ShellCommand::Clear => {
            session.clear();
            println!("{}", ui::style_text("Cleared all.", ui::StyleType::Success));
        }
        ShellCommand::Export { format, path } => {
            if session.history().is_empty() {
                println!("{}", ui::style_text("Nothing to export.", ui::StyleType::Subtle));
                return Flow::Continue;
            }
            match export::save(session, format, path.as_deref()).await {
                Ok(written) => println!(
                    "{}",
                    ui::style_text(
                        &format!("Saved {} to {}", format, written.display()),
                        ui::StyleType::Success
                    )
                ),
                Err(e) => println!("{}", ui::style_text(&format!("{e:#}"), ui::StyleType::Error)),
            }
        }
        ShellCommand::Help => println!("{HELP}"),
        ShellCommand::Quit => return Flow::Quit,
    }
    Flow::Continue
}
