// Interactive board shell (`rboard shell`)
// One command per line; the board, history and buttons live for the session.

use std::io::{self, BufRead, Write};

use rewardboard_core::{Affordances, BlobStore, Board, BoardController, DropEvent, DropOutcome};

pub const HELP: &str = "\
commands:
  drop <reward> <category>          drop a reward from the palette
  move <reward> <from> <to>         drag a reward between categories
  remove <reward> <category>        remove a reward from a category
  undo | redo                       step through history
  save                              save the layout
  clear                             delete the saved layout and start over
                                    (asks first on a terminal; piped input
                                    clears without asking)
  show                              print the board
  help                              this text
  quit                              leave the shell";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Drop { reward: String, category: String },
    Move { reward: String, from: String, to: String },
    Remove { reward: String, category: String },
    Undo,
    Redo,
    Save,
    Clear,
    Show,
    Help,
    Quit,
}

/// Parse one input line. Blank lines and `#` comments yield `None`.
pub fn parse_line(line: &str) -> Result<Option<ShellCommand>, String> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let words: Vec<&str> = line.split_whitespace().collect();
    let args = &words[1..];
    let expect = |n: usize, usage: &str| -> Result<(), String> {
        if args.len() == n {
            Ok(())
        } else {
            Err(format!("usage: {usage}"))
        }
    };

    let command = match words[0] {
        "drop" => {
            expect(2, "drop <reward> <category>")?;
            ShellCommand::Drop { reward: args[0].to_string(), category: args[1].to_string() }
        }
        "move" => {
            expect(3, "move <reward> <from> <to>")?;
            ShellCommand::Move {
                reward: args[0].to_string(),
                from: args[1].to_string(),
                to: args[2].to_string(),
            }
        }
        "remove" => {
            expect(2, "remove <reward> <category>")?;
            ShellCommand::Remove { reward: args[0].to_string(), category: args[1].to_string() }
        }
        "undo" => ShellCommand::Undo,
        "redo" => ShellCommand::Redo,
        "save" => ShellCommand::Save,
        "clear" => ShellCommand::Clear,
        "show" => ShellCommand::Show,
        "help" | "?" => ShellCommand::Help,
        "quit" | "exit" => ShellCommand::Quit,
        other => return Err(format!("unknown command '{other}' (try 'help')")),
    };

    Ok(Some(command))
}

/// Render the board one category per line: `Gold (c3): Free coffee (r1), ...`
pub fn render_board(board: &Board) -> String {
    let catalog = board.catalog();
    let mut out = String::new();

    for category in catalog.categories() {
        let rewards: Vec<String> = board
            .rewards_in(&category.id)
            .iter()
            .map(|id| match catalog.reward_name(id) {
                Some(name) => format!("{name} ({id})"),
                None => id.clone(),
            })
            .collect();
        let list = if rewards.is_empty() { "-".to_string() } else { rewards.join(", ") };
        out.push_str(&format!("{} ({}): {}\n", category.name, category.id, list));
    }

    out
}

pub fn render_buttons(buttons: Affordances) -> String {
    let state = |on: bool| if on { "on" } else { "off" };
    format!("[undo: {}  redo: {}]", state(buttons.undo), state(buttons.redo))
}

pub struct Shell<S> {
    controller: BoardController<S>,
    confirm_clear: bool,
    prompt: bool,
}

impl<S: BlobStore> Shell<S> {
    pub fn new(controller: BoardController<S>) -> Self {
        Self { controller, confirm_clear: true, prompt: false }
    }

    pub fn confirm_clear(mut self, confirm: bool) -> Self {
        self.confirm_clear = confirm;
        self
    }

    /// Print a `> ` prompt before each line (interactive terminals)
    pub fn prompt(mut self, prompt: bool) -> Self {
        self.prompt = prompt;
        self
    }

    #[cfg(test)]
    pub fn controller(&self) -> &BoardController<S> {
        &self.controller
    }

    /// Restore the saved layout and process commands until EOF or `quit`.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> io::Result<()> {
        match self.controller.restore() {
            Ok(Some(report)) => {
                write!(out, "restored {} reward(s) from saved layout", report.placed)?;
                if report.skipped > 0 {
                    write!(out, ", skipped {}", report.skipped)?;
                }
                writeln!(out)?;
            }
            Ok(None) => {}
            Err(e) => writeln!(out, "error: {e}")?,
        }

        let mut lines = input.lines();
        loop {
            if self.prompt {
                write!(out, "> ")?;
                out.flush()?;
            }
            let Some(line) = lines.next() else { break };
            let line = line?;

            let command = match parse_line(&line) {
                Ok(Some(command)) => command,
                Ok(None) => continue,
                Err(msg) => {
                    writeln!(out, "error: {msg}")?;
                    continue;
                }
            };

            if command == ShellCommand::Quit {
                break;
            }
            if command == ShellCommand::Clear && self.confirm_clear {
                write!(out, "clear the saved layout and history? [y/N] ")?;
                out.flush()?;
                let answer = match lines.next() {
                    Some(answer) => answer?,
                    None => String::new(),
                };
                if !matches!(answer.trim(), "y" | "yes") {
                    writeln!(out, "clear cancelled")?;
                    continue;
                }
            }

            self.execute(command, out)?;
        }

        Ok(())
    }

    fn execute<W: Write>(&mut self, command: ShellCommand, out: &mut W) -> io::Result<()> {
        let ctl = &mut self.controller;
        match command {
            ShellCommand::Drop { reward, category } => {
                let outcome = ctl.on_add(DropEvent::from_palette(reward.clone(), category.clone()));
                self.report_drop(&outcome, &reward, &category, out)?;
            }
            ShellCommand::Move { reward, from, to } => {
                let outcome = ctl.on_add(DropEvent::between(reward.clone(), from, to.clone()));
                self.report_drop(&outcome, &reward, &to, out)?;
            }
            ShellCommand::Remove { reward, category } => match ctl.remove_reward(&category, &reward) {
                Ok(()) => writeln!(out, "removed {reward} from {category} {}", render_buttons(ctl.affordances()))?,
                Err(e) => writeln!(out, "error: {e}")?,
            },
            ShellCommand::Undo => {
                let msg = if ctl.undo() { "undone" } else { "nothing to undo" };
                writeln!(out, "{msg} {}", render_buttons(ctl.affordances()))?;
            }
            ShellCommand::Redo => {
                let msg = if ctl.redo() { "redone" } else { "nothing to redo" };
                writeln!(out, "{msg} {}", render_buttons(ctl.affordances()))?;
            }
            ShellCommand::Save => match ctl.save() {
                Ok(()) => writeln!(out, "saved layout under '{}'", ctl.key())?,
                Err(e) => writeln!(out, "error: {e}")?,
            },
            ShellCommand::Clear => match ctl.clear_saved() {
                Ok(()) => writeln!(out, "cleared saved layout {}", render_buttons(ctl.affordances()))?,
                Err(e) => writeln!(out, "error: {e}")?,
            },
            ShellCommand::Show => {
                write!(out, "{}", render_board(ctl.board()))?;
                writeln!(out, "{}", render_buttons(ctl.affordances()))?;
            }
            ShellCommand::Help => writeln!(out, "{HELP}")?,
            ShellCommand::Quit => {}
        }
        Ok(())
    }

    fn report_drop<W: Write>(
        &self,
        outcome: &DropOutcome,
        reward: &str,
        category: &str,
        out: &mut W,
    ) -> io::Result<()> {
        let buttons = render_buttons(self.controller.affordances());
        match outcome {
            DropOutcome::Placed => writeln!(out, "placed {reward} in {category} {buttons}"),
            DropOutcome::Moved => writeln!(out, "moved {reward} to {category} {buttons}"),
            DropOutcome::Duplicate => writeln!(out, "{category} already has {reward}, drop discarded"),
            DropOutcome::Rejected(reason) => writeln!(out, "error: {reason}"),
        }
    }
}
