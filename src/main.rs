use std::path::PathBuf;

use anyhow::{ensure, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use skram::{
    import::import_solution,
    savegame::{SLOT_MAX, SLOT_MIN},
    Difficulty, Generator, Grid, Pos, Savegame, SlotStore,
};

#[derive(Parser, Debug)]
#[command(name = "skram", version, about = "9x9 Sudoku with savegame slots")]
struct Cli {
    /// Directory holding the savegame slots
    #[arg(long, default_value = ".")]
    dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start a new game in a slot
    New {
        #[arg(value_parser = clap::value_parser!(u8).range(1..=10))]
        slot: u8,
        #[arg(short, long, value_enum, default_value_t = Level::Medium)]
        difficulty: Level,
        /// Fixed RNG seed for a reproducible board
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Show the board stored in a slot
    Show {
        #[arg(value_parser = clap::value_parser!(u8).range(1..=10))]
        slot: u8,
    },
    /// Write a value into a field (0 clears it); row and column are 1-based
    Set {
        #[arg(value_parser = clap::value_parser!(u8).range(1..=10))]
        slot: u8,
        row: usize,
        col: usize,
        value: i32,
    },
    /// Reveal one random empty field from the solution
    Hint {
        #[arg(value_parser = clap::value_parser!(u8).range(1..=10))]
        slot: u8,
    },
    /// Check whether the board is solved
    Check {
        #[arg(value_parser = clap::value_parser!(u8).range(1..=10))]
        slot: u8,
    },
    /// Start a new game from an imported solution file
    Import {
        #[arg(value_parser = clap::value_parser!(u8).range(1..=10))]
        slot: u8,
        path: PathBuf,
        #[arg(short, long, value_enum, default_value_t = Level::Medium)]
        difficulty: Level,
        /// Fixed RNG seed for reproducible carving
        #[arg(long)]
        seed: Option<u64>,
    },
    /// List which slots hold a savegame
    Slots,
    /// Delete the savegame in a slot
    Delete {
        #[arg(value_parser = clap::value_parser!(u8).range(1..=10))]
        slot: u8,
    },
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum Level {
    Easy,
    Medium,
    Hard,
}

impl From<Level> for Difficulty {
    fn from(level: Level) -> Self {
        match level {
            Level::Easy => Difficulty::Easy,
            Level::Medium => Difficulty::Medium,
            Level::Hard => Difficulty::Hard,
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let store = SlotStore::new(&cli.dir).context("opening slot directory")?;

    match cli.command {
        Command::New { slot, difficulty, seed } => {
            let mut generator = Generator::new(seed);
            let game = Savegame::new_game(&mut generator, difficulty.into());
            store.save(slot, &game)?;
            print_game(&game);
            println!("New {:?} game saved to slot {}.", difficulty, slot);
        }
        Command::Show { slot } => print_game(&store.load(slot)?),
        Command::Set { slot, row, col, value } => {
            let mut game = store.load(slot)?;
            game.working.set(to_pos(row, col)?, value)?;
            store.save(slot, &game)?;
            print_game(&game);
            report_solved(&game.working);
        }
        Command::Hint { slot } => {
            let mut game = store.load(slot)?;
            match game.reveal_hint(&mut rand::thread_rng()) {
                Some(p) => println!("Revealed row {}, column {}.", p.row + 1, p.col + 1),
                None => println!("The board is already full."),
            }
            store.save(slot, &game)?;
            print_game(&game);
            report_solved(&game.working);
        }
        Command::Check { slot } => {
            let game = store.load(slot)?;
            print_game(&game);
            if game.working.is_solved() {
                println!("{}", "Solved! Congratulations.".green().bold());
            } else if game.working.count_empty() > 0 {
                println!("{} fields still to fill.", game.working.count_empty());
            } else {
                println!("{}", "The board is full but has mistakes.".red());
            }
        }
        Command::Import { slot, path, difficulty, seed } => {
            let solved = import_solution(&path)
                .with_context(|| format!("importing {}", path.display()))?;
            let mut generator = Generator::new(seed);
            let game = Savegame::from_solution(&mut generator, solved, difficulty.into());
            store.save(slot, &game)?;
            print_game(&game);
            println!("Imported {:?} game saved to slot {}.", difficulty, slot);
        }
        Command::Slots => {
            for slot in SLOT_MIN..=SLOT_MAX {
                let state = if store.exists(slot) { "saved game" } else { "free" };
                println!("slot {:2}: {}", slot, state);
            }
        }
        Command::Delete { slot } => {
            store.delete(slot)?;
            println!("Slot {} deleted.", slot);
        }
    }
    Ok(())
}

fn to_pos(row: usize, col: usize) -> Result<Pos> {
    ensure!(
        (1..=9).contains(&row) && (1..=9).contains(&col),
        "row and column must be between 1 and 9"
    );
    Ok(Pos::new(row - 1, col - 1))
}

fn report_solved(working: &Grid) {
    if working.is_solved() {
        println!("{}", "Solved! Congratulations.".green().bold());
    }
}

fn print_game(game: &Savegame) {
    print!("{}", render(&game.working));
    println!("Elapsed time: {}", format_elapsed(game.elapsed));
}

/// Renders the working board with the puzzle givens set off in color.
fn render(grid: &Grid) -> String {
    let mut out = String::new();
    for row in 0..9 {
        if row % 3 == 0 {
            out.push_str("+-------+-------+-------+\n");
        }
        for col in 0..9 {
            if col % 3 == 0 {
                out.push_str("| ");
            }
            let cell = grid.get(Pos::new(row, col));
            let shown = match cell.value {
                0 => "·".dimmed(),
                v => {
                    let digit = char::from(b'0' + v).to_string();
                    if cell.locked {
                        digit.cyan()
                    } else {
                        digit.normal()
                    }
                }
            };
            out.push_str(&format!("{} ", shown));
        }
        out.push_str("|\n");
    }
    out.push_str("+-------+-------+-------+\n");
    out
}

fn format_elapsed(seconds: f64) -> String {
    let total = seconds as u64;
    format!("{:02}:{:02}:{:02}", total / 3600, total % 3600 / 60, total % 60)
}
