use std::sync::Arc;

use anyhow::{bail, Context, Result};
use rand::{rngs::StdRng, SeedableRng};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use wordfire_engine::{
    config::Config,
    game::{
        events::{GameEvents, HazardEvent, SelectResult, SelectionRejection, SubmitOutcome},
        EngineSnapshot, TileManager,
    },
    Dictionary, Position, TileCategory,
};

const HELP: &str = "\
commands:
  select <row> <col>    extend the selection
  deselect <row> <col>  drop a tile and everything after it
  clear                 drop the whole selection
  submit                play the selected word
  show                  print the board
  revive                put out every fire and keep playing
  new                   start a new board
  save <path>           write the session to a JSON file
  load <path>           resume a session from a JSON file
  quit";

/// Prints engine signals to the terminal
struct TerminalEvents;

impl GameEvents for TerminalEvents {
    fn game_over(&mut self) {
        println!("*** GAME OVER: fire reached the bottom row (try `revive` or `new`) ***");
    }

    fn selection_rejected(&mut self, position: Position, reason: SelectionRejection) {
        tracing::debug!("Selection at {} rejected: {:?}", position, reason);
    }
}

fn session_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

fn category_mark(category: TileCategory) -> char {
    match category {
        TileCategory::Regular => ' ',
        TileCategory::BonusLow => '+',
        TileCategory::BonusMid => '*',
        TileCategory::BonusHigh => '#',
        TileCategory::Hazard => '!',
    }
}

fn render(manager: &TileManager<StdRng>) -> String {
    let mut out = String::new();
    let grid = manager.grid();

    out.push_str("    ");
    for column in 0..grid.columns() {
        out.push_str(&format!("{:^6}", column));
    }
    out.push('\n');

    for (row, tiles) in grid.cells().iter().enumerate() {
        out.push_str(&format!("{:>3} ", row));
        for tile in tiles {
            let (open, close) = if tile.is_selected { ('[', ']') } else { (' ', ' ') };
            out.push_str(&format!(
                "{}{:<2}{}{} ",
                open,
                tile.letter,
                category_mark(tile.category),
                close
            ));
        }
        out.push('\n');
    }

    out.push_str(&format!(
        "level {} | word '{}' ({} pts) | {:?}",
        manager.level(),
        manager.current_word(),
        manager.current_score(),
        manager.state()
    ));
    out
}

fn describe(outcome: &SubmitOutcome) -> String {
    let mut lines = vec![format!("'{}' scored {} points", outcome.word, outcome.points)];

    let bonus = outcome
        .spawned
        .iter()
        .filter(|tile| tile.category.is_bonus())
        .count();
    let fire = outcome
        .spawned
        .iter()
        .filter(|tile| tile.category.is_hazard())
        .count();
    lines.push(format!(
        "{} tiles fell, {} spawned ({} bonus, {} fire)",
        outcome.gravity.len(),
        outcome.spawned.len(),
        bonus,
        fire
    ));

    if let Some(upgrade) = &outcome.upgrade {
        lines.push(format!(
            "tile at {} upgraded from {} to {}",
            upgrade.position, upgrade.from, upgrade.to
        ));
    }

    for event in &outcome.hazards.events {
        match event {
            HazardEvent::Burning {
                position,
                burn_counter,
                ..
            } => lines.push(format!("fire at {} is burning ({})", position, burn_counter)),
            HazardEvent::Advanced { moves, .. } => {
                if let Some(step) = moves.first() {
                    lines.push(format!("fire advanced to {}", step.to));
                }
            }
            HazardEvent::ReachedBottom { position, .. } => {
                lines.push(format!("fire reached the bottom at {}", position))
            }
        }
    }

    lines.join("\n")
}

fn parse_position(args: &[&str]) -> Result<Position> {
    let [row, column] = args else {
        bail!("expected <row> <col>");
    };
    let row = row.parse().context("row must be a number")?;
    let column = column.parse().context("column must be a number")?;
    Ok(Position::new(row, column))
}

async fn save(manager: &TileManager<StdRng>, path: &str) -> Result<()> {
    let json = serde_json::to_string_pretty(&manager.snapshot())?;
    tokio::fs::write(path, json)
        .await
        .with_context(|| format!("Failed to write {}", path))?;
    Ok(())
}

async fn load(config: &Config, dictionary: &Arc<Dictionary>, path: &str) -> Result<TileManager<StdRng>> {
    let json = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {}", path))?;
    let snapshot: EngineSnapshot =
        serde_json::from_str(&json).context("Session file is not a valid snapshot")?;

    let manager = TileManager::restore(
        config.engine_config(),
        dictionary.clone(),
        snapshot,
        session_rng(config.game.seed),
    )?;
    Ok(manager.with_events(Box::new(TerminalEvents)))
}

/// Run one driver command. Returns false when the session should end.
async fn execute(
    line: &str,
    manager: &mut TileManager<StdRng>,
    config: &Config,
    dictionary: &Arc<Dictionary>,
) -> Result<bool> {
    let words: Vec<&str> = line.split_whitespace().collect();
    let Some((command, args)) = words.split_first() else {
        return Ok(true);
    };

    match *command {
        "select" | "s" => match manager.select(parse_position(args)?) {
            SelectResult::Selected => println!("{}", render(manager)),
            SelectResult::Rejected(reason) => println!("rejected: {:?}", reason),
        },
        "deselect" | "d" => {
            if !manager.deselect(parse_position(args)?) {
                println!("not selected");
            }
            println!("{}", render(manager));
        }
        "clear" => {
            manager.clear_selection();
            println!("{}", render(manager));
        }
        "submit" | "go" => match manager.submit() {
            Some(outcome) => {
                println!("{}", describe(&outcome));
                if let Some(definition) = manager.word_checker().dictionary().definition(&outcome.word) {
                    println!("{}: {}", outcome.word, definition);
                }
                println!("{}", render(manager));
            }
            None => println!("'{}' is not a word", manager.current_word()),
        },
        "show" => println!("{}", render(manager)),
        "revive" => {
            let extinguished = manager.revive();
            println!("{} fires put out", extinguished);
            println!("{}", render(manager));
        }
        "new" => {
            manager.new_game();
            println!("{}", render(manager));
        }
        "save" => {
            let [path] = args else {
                bail!("expected <path>");
            };
            save(manager, path).await?;
            println!("saved to {}", path);
        }
        "load" => {
            let [path] = args else {
                bail!("expected <path>");
            };
            *manager = load(config, dictionary, path).await?;
            println!("{}", render(manager));
        }
        "help" | "?" => println!("{}", HELP),
        "quit" | "exit" | "q" => return Ok(false),
        other => println!("unknown command '{}', try `help`", other),
    }

    Ok(true)
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wordfire_engine=debug,wordfire=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Load configuration
    let config = Config::from_env()?;
    tracing::info!("Configuration loaded");

    // Load dictionary
    let dictionary = Dictionary::load(&config.game.dictionary_path)
        .await
        .with_context(|| {
            format!(
                "A word list is required at {} (set DICTIONARY_PATH)",
                config.game.dictionary_path
            )
        })?;
    let dictionary = Arc::new(dictionary);

    let mut manager = TileManager::new(
        config.engine_config(),
        dictionary.clone(),
        session_rng(config.game.seed),
    )?
    .with_events(Box::new(TerminalEvents));
    manager.set_level(config.game.start_level);

    println!("{}", render(&manager));
    println!("type `help` for commands");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match execute(line.trim(), &mut manager, &config, &dictionary).await {
            Ok(true) => {}
            Ok(false) => break,
            Err(e) => println!("error: {:#}", e),
        }
    }

    tracing::info!("Session ended at level {}", manager.level());
    Ok(())
}
