use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use colored::Colorize;
use tf_core::{PlayerState, Reducer};
use tf_save::{JsonFileStore, SaveStore};
use tf_story::{Engine, RenderableScene};

use crate::config::CliConfig;

/// A line of player input.
#[derive(Debug, PartialEq, Eq)]
enum Input {
    /// 1-based choice number.
    Choice(usize),
    Save(String),
    Load(String),
    Slots,
    Status,
    Look,
    Restart,
    Help,
    Quit,
    Unknown(String),
}

impl Input {
    fn parse(line: &str) -> Self {
        let mut words = line.split_whitespace();
        let Some(head) = words.next() else {
            return Self::Unknown(String::new());
        };
        let arg = words.next().map(str::to_string);

        if let Ok(number) = head.parse::<usize>() {
            return Self::Choice(number);
        }

        match (head.to_ascii_lowercase().as_str(), arg) {
            ("save", Some(slot)) => Self::Save(slot),
            ("load", Some(slot)) => Self::Load(slot),
            ("slots", None) => Self::Slots,
            ("status" | "stats", None) => Self::Status,
            ("look" | "l", None) => Self::Look,
            ("restart", None) => Self::Restart,
            ("help" | "?", None) => Self::Help,
            ("quit" | "q" | "exit", None) => Self::Quit,
            _ => Self::Unknown(line.to_string()),
        }
    }
}

pub fn run(
    config: &CliConfig,
    catalogs: &[PathBuf],
    include_builtin: bool,
    save_dir: Option<&Path>,
) -> Result<(), String> {
    let catalog = super::load_catalog(config, catalogs, include_builtin)?;
    let reducer = Reducer::new(config.rules.clone()).map_err(|e| e.to_string())?;
    let mut engine = Engine::new(catalog).with_reducer(reducer);
    let mut store = JsonFileStore::new(config.save_dir(save_dir));

    let scenes = engine.catalog().len();
    println!(
        "  {} a new story ({scenes} scene{})",
        "Starting".bold(),
        super::plural(scenes)
    );
    println!("  Type a choice number, 'help' for commands, 'quit' to exit.\n");
    print_scene(&engine.render(), engine.state());

    let stdin = io::stdin();
    let mut reader = stdin.lock();
    let mut line = String::new();

    loop {
        print!("> ");
        io::stdout().flush().map_err(|e| e.to_string())?;

        line.clear();
        match reader.read_line(&mut line) {
            Ok(0) => break, // EOF
            Err(e) => return Err(e.to_string()),
            _ => {}
        }

        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        match Input::parse(input) {
            Input::Quit => break,
            Input::Choice(number) => {
                if engine.state().game_over {
                    println!(
                        "{}\n",
                        "Your journey has ended. Type 'restart' or 'load <slot>'.".yellow()
                    );
                    continue;
                }
                let Some(index) = number.checked_sub(1) else {
                    println!("{}\n", "Choices are numbered from 1.".yellow());
                    continue;
                };
                match engine.choose(index) {
                    Ok(()) => {
                        for notification in engine.take_notifications() {
                            println!("  {}", notification.to_string().green().bold());
                        }
                        println!();
                        print_scene(&engine.render(), engine.state());
                    }
                    Err(e) => println!("{}\n", e.to_string().yellow()),
                }
            }
            Input::Save(slot) => match store.save(&slot, engine.state()) {
                Ok(summary) => println!("  Saved to '{}'.\n", summary.name),
                Err(e) => println!("{}\n", format!("save failed: {e}").yellow()),
            },
            Input::Load(slot) => match store.load(&slot) {
                Ok(Some(state)) => {
                    engine.replace_state(state);
                    println!("  Loaded '{slot}'.\n");
                    print_scene(&engine.render(), engine.state());
                }
                Ok(None) => println!("{}\n", format!("no save in slot '{slot}'").yellow()),
                Err(e) => println!("{}\n", format!("load failed: {e}").yellow()),
            },
            Input::Slots => match store.list_slots() {
                Ok(slots) if slots.is_empty() => println!("  No saved games.\n"),
                Ok(slots) => println!("{}\n", super::slots::slot_table(&slots)),
                Err(e) => println!("{}\n", e.to_string().yellow()),
            },
            Input::Status => print_status(engine.state()),
            Input::Look => print_scene(&engine.render(), engine.state()),
            Input::Restart => {
                engine.restart();
                println!("  {}\n", "A new journey begins.".bold());
                print_scene(&engine.render(), engine.state());
            }
            Input::Help => print_help(),
            Input::Unknown(text) => {
                println!("{}\n", format!("unknown command: {text}").yellow());
            }
        }
    }

    Ok(())
}

fn print_scene(scene: &RenderableScene, state: &PlayerState) {
    println!("  {}", scene.title.bold());
    println!();
    for line in scene.description.lines() {
        println!("  {}", line.trim());
    }
    println!();

    for (i, choice) in scene.choices.iter().enumerate() {
        let check = choice
            .skill_check
            .as_ref()
            .map(|c| format!(" [{c}]"))
            .unwrap_or_default();
        if choice.eligible {
            println!("  {}. {}{}", i + 1, choice.text, check.dimmed());
        } else {
            let reason = choice
                .unmet
                .as_ref()
                .map(|r| r.to_string())
                .unwrap_or_default();
            println!(
                "  {}",
                format!("{}. {}{} ({reason})", i + 1, choice.text, check).dimmed()
            );
        }
    }
    println!();

    if state.game_over {
        println!("  {}", "You have fallen.".red().bold());
        println!();
    } else if state.victory {
        println!("  {}", "Victory is yours.".green().bold());
        println!();
    }
}

fn print_status(state: &PlayerState) {
    println!(
        "  health {}/{} | level {} ({} xp) | score {}",
        state.health, state.max_health, state.level, state.experience, state.score
    );
    if state.new_game_plus_level > 0 {
        println!("  new game+: {}", state.new_game_plus_level);
    }
    let lists = [
        ("inventory", &state.inventory),
        ("achievements", &state.achievements),
        ("companions", &state.companions),
        ("abilities", &state.magical_abilities),
        ("lore", &state.lore),
    ];
    for (label, items) in lists {
        if !items.is_empty() {
            println!("  {label}: {}", items.join(", "));
        }
    }
    let skills: Vec<String> = state
        .skills
        .iter()
        .map(|(name, value)| format!("{name} {value}"))
        .collect();
    println!("  skills: {}", skills.join(", "));
    if !state.relationships.is_empty() {
        let relationships: Vec<String> = state
            .relationships
            .iter()
            .map(|(name, value)| format!("{name} {value:+}"))
            .collect();
        println!("  relationships: {}", relationships.join(", "));
    }
    println!();
}

fn print_help() {
    println!("  <number>      take a choice");
    println!("  look          show the current scene again");
    println!("  status        show health, level, score and inventory");
    println!("  save <slot>   save to a slot");
    println!("  load <slot>   load a slot");
    println!("  slots         list saved games");
    println!("  restart       start a new journey");
    println!("  quit          leave the game");
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_choice_numbers() {
        assert_eq!(Input::parse("2"), Input::Choice(2));
        assert_eq!(Input::parse("0"), Input::Choice(0));
    }

    #[test]
    fn parses_commands() {
        assert_eq!(Input::parse("save slot1"), Input::Save("slot1".into()));
        assert_eq!(Input::parse("LOAD slot1"), Input::Load("slot1".into()));
        assert_eq!(Input::parse("slots"), Input::Slots);
        assert_eq!(Input::parse("status"), Input::Status);
        assert_eq!(Input::parse("q"), Input::Quit);
        assert_eq!(Input::parse("restart"), Input::Restart);
    }

    #[test]
    fn save_without_slot_is_unknown() {
        assert_eq!(Input::parse("save"), Input::Unknown("save".into()));
        assert_eq!(Input::parse("dance"), Input::Unknown("dance".into()));
    }
}
