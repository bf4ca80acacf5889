use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use clap::{Parser, Subcommand};
use puz_reader::{ClueDirection, DecodeOptions, Puzzle, PuzzleDecoder, PuzzleRecord};

/// Inspect and convert .puz crossword files
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable debug logging (also enabled by PUZ_DEBUG)
    #[arg(long, global = true)]
    debug: bool,

    /// Treat checksum mismatches as errors
    #[arg(long, global = true)]
    strict: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the header summary and both clue lists
    Info { file: PathBuf },
    /// Print the grid with board numbers
    Grid { file: PathBuf },
    /// Convert a .puz file to its JSON record
    Export {
        file: PathBuf,
        /// Write to this path instead of stdout
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Rebuild a JSON record and report how far along the solve is
    Check { json: PathBuf },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let debug_enabled = cli.debug || std::env::var("PUZ_DEBUG").is_ok();
    puz_reader::logging::init_logger(debug_enabled);

    if let Err(e) = try_main(cli) {
        eprintln!("ERROR: {e}");
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn try_main(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let decoder = PuzzleDecoder::new(DecodeOptions {
        verify_checksums: cli.strict,
    });

    match cli.command {
        Command::Info { file } => {
            let puzzle = decoder.decode_file(&file)?;
            print_info(&puzzle);
        }
        Command::Grid { file } => {
            let puzzle = decoder.decode_file(&file)?;
            print_grid(&puzzle);
        }
        Command::Export { file, out } => {
            let puzzle = decoder.decode_file(&file)?;
            let json = PuzzleRecord::from(&puzzle).to_json()?;
            match out {
                Some(path) => {
                    fs::write(&path, json)?;
                    eprintln!("Wrote {}", path.display());
                }
                None => println!("{json}"),
            }
        }
        Command::Check { json } => {
            let record = PuzzleRecord::from_json(&fs::read_to_string(&json)?)?;
            let puzzle = record.to_puzzle()?;
            print_progress(&puzzle);
        }
    }
    Ok(())
}

fn print_info(puzzle: &Puzzle) {
    println!("Title:     {}", puzzle.title);
    println!("Author:    {}", puzzle.author);
    println!("Copyright: {}", puzzle.copyright);
    println!("Version:   {}", puzzle.header.version);
    println!("Size:      {}x{}", puzzle.width(), puzzle.height());
    println!("Scrambled: {}", puzzle.header.is_scrambled());
    if !puzzle.notes.is_empty() {
        println!("Notes:     {}", puzzle.notes);
    }
    for direction in [ClueDirection::Across, ClueDirection::Down] {
        println!("\n{direction}");
        for clue in puzzle.clues(direction) {
            println!("  {clue}");
        }
    }
}

fn print_grid(puzzle: &Puzzle) {
    println!("{}", puzzle.title);
    for row in puzzle.grid().rows() {
        let line: Vec<String> = row
            .iter()
            .map(|cell| match (cell.is_separator(), cell.board_number()) {
                (true, _) => " ###".to_string(),
                (false, Some(n)) => format!("{:>3}{}", n, cell.user_value().unwrap_or('_')),
                (false, None) => format!("   {}", cell.user_value().unwrap_or('_')),
            })
            .collect();
        println!("{}", line.concat());
    }
}

fn print_progress(puzzle: &Puzzle) {
    let (mut filled, mut correct, mut open) = (0, 0, 0);
    for (_, cell) in puzzle.grid().iter().filter(|(_, c)| !c.is_separator()) {
        open += 1;
        if !cell.is_empty() {
            filled += 1;
        }
        if cell.is_valid() {
            correct += 1;
        }
    }
    println!("{}: {}/{} filled, {}/{} correct", puzzle.title, filled, open, correct, open);
    if puzzle.is_solved() {
        println!("Solved!");
    }
}
