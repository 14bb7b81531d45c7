//! Checkers-Rust: a 10x10 checkers engine with an MCTS opponent.
//!
//! ## Usage
//!
//! - `checkers-rust` - Watch a CPU-vs-CPU demo game
//! - `checkers-rust demo` - Same, explicitly
//! - `checkers-rust play` - Play red against the CPU on the terminal

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};

use checkers_rust::constants::{BLACK, N_ITERATIONS, RED};
use checkers_rust::game::GameState;
use checkers_rust::mcts::{SearchTree, dump_children};

/// Checkers-Rust: a 10x10 checkers MCTS engine
#[derive(Parser)]
#[command(name = "checkers-rust")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Watch the engine play both sides of a game
    Demo {
        /// Search iterations per move
        #[arg(long, default_value_t = 200)]
        iterations: usize,
        /// Seed for reproducible games
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Play red against the CPU on the terminal
    Play {
        /// Search iterations per CPU move
        #[arg(long, default_value_t = N_ITERATIONS)]
        iterations: usize,
        /// Seed for a reproducible opponent
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Play { iterations, seed }) => run_play(iterations, seed),
        Some(Commands::Demo { iterations, seed }) => run_demo(iterations, seed),
        None => run_demo(200, None),
    }
}

fn side_name(side: i8) -> &'static str {
    if side == RED { "Red" } else { "Black" }
}

fn make_search(iterations: usize, seed: Option<u64>) -> SearchTree {
    match seed {
        Some(seed) => SearchTree::with_seed(iterations, seed),
        None => SearchTree::new(iterations),
    }
}

fn announce_result(game: &GameState) {
    match game.winner {
        Some(0) => println!("Draw."),
        Some(side) => println!("{} wins!", side_name(side)),
        None => println!("Game stopped without a result."),
    }
}

fn run_demo(iterations: usize, seed: Option<u64>) -> Result<()> {
    println!("Checkers-Rust: CPU vs CPU, {iterations} iterations per move\n");

    let mut game = GameState::new();
    let mut search = make_search(iterations, seed);

    let mut ply = 0;
    while !game.done {
        let tree = search.grow(&game).context("search failed on a live game")?;
        if ply == 0 {
            dump_children(&tree);
        }
        let mv = tree
            .best_move()
            .context("a live game must offer a move")?;
        println!("{} plays {}", side_name(game.turn), mv);
        game.apply_move(&mv)
            .context("searched move failed to apply")?;
        ply += 1;
        if ply % 10 == 0 {
            println!("\n{game}");
        }
    }

    println!("\n{game}");
    announce_result(&game);
    Ok(())
}

fn run_play(iterations: usize, seed: Option<u64>) -> Result<()> {
    println!("Checkers-Rust: you are Red, the CPU is Black.");
    println!("Pick a move by entering its number; 'q' quits.\n");

    let mut game = GameState::new();
    let mut search = make_search(iterations, seed);
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    while !game.done {
        println!("{game}");

        if game.turn == BLACK {
            println!("CPU thinking... ({iterations} iterations)");
            let mv = search
                .search(&game)
                .context("search failed on a live game")?;
            println!("CPU plays {mv}\n");
            game.apply_move(&mv)
                .context("searched move failed to apply")?;
            continue;
        }

        let legal = game.legal_moves();
        for (i, mv) in legal.iter().enumerate() {
            println!("  {i}: {mv}");
        }
        print!("your move> ");
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            bail!("input closed before the game finished");
        };
        let line = line?;
        let input = line.trim();
        if input.eq_ignore_ascii_case("q") {
            println!("Bye.");
            return Ok(());
        }
        let Ok(choice) = input.parse::<usize>() else {
            println!("Not a move number: {input}\n");
            continue;
        };
        let Some(mv) = legal.get(choice) else {
            println!("Out of range: {choice}\n");
            continue;
        };
        game.apply_move(mv).context("chosen move failed to apply")?;
        println!();
    }

    println!("{game}");
    announce_result(&game);
    Ok(())
}
