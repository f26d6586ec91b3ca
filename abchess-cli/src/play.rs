//! Play command - one game between a human and the engine
//!
//! ## Architecture
//!
//! - Level 1: run() - orchestration
//! - Level 2: build_config(), play_game()
//! - Level 3: user_turn(), agent_turn()
//! - Level 4: console prompts

use std::io::{self, BufRead, Write};
use std::time::Instant;

use anyhow::{Context, Result};

use abchess_core::{AiConfig, ChessBoard, Choice, Color, NoBook, Session};

use crate::render;
use crate::Cli;

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run the interactive game on stdin/stdout
pub fn run(cli: Cli) -> Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut console = Console::new(stdin.lock(), stdout.lock());

    let Some(config) = build_config(&cli, &mut console)? else {
        return Ok(());
    };

    tracing::info!(
        "Engine plays {:?} at depth {}",
        config.color,
        config.depth
    );

    let mut session = match &cli.fen {
        Some(fen) => {
            let board = ChessBoard::from_fen(fen).context("Invalid --fen position")?;
            // a custom position is never in the book
            Session::with_book(config, board, Box::new(NoBook))?
        }
        None => Session::new(config)?,
    };

    play_game(&mut session, &mut console, !cli.ascii)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Merge the config file, flags and prompts. `None` if the user quit.
fn build_config<R: BufRead, W: Write>(
    cli: &Cli,
    console: &mut Console<R, W>,
) -> Result<Option<AiConfig>> {
    let mut config = match &cli.config {
        Some(path) => AiConfig::load(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?,
        None => AiConfig::default(),
    };

    match cli.color {
        Some(side) => config.color = Color::from(side).opponent(),
        None if cli.config.is_none() => match console.ask_color()? {
            Some(human) => config.color = human.opponent(),
            None => return Ok(None),
        },
        None => {}
    }

    match cli.depth {
        Some(depth) => config.depth = depth,
        None if cli.config.is_none() => match console.ask_depth()? {
            Some(depth) => config.depth = depth,
            None => return Ok(None),
        },
        None => {}
    }

    if cli.no_book {
        config.book = None;
    } else if let Some(book) = &cli.book {
        config.book = Some(book.clone());
    }

    if let Some(seed) = cli.seed {
        config.seed = Some(seed);
    }

    config.validate()?;
    Ok(Some(config))
}

/// Alternate turns until the game ends or the user quits
fn play_game<R: BufRead, W: Write>(
    session: &mut Session,
    console: &mut Console<R, W>,
    unicode: bool,
) -> Result<()> {
    while !session.is_over() {
        if session.agent_to_move() {
            agent_turn(session, console)?;
        } else if !user_turn(session, console, unicode)? {
            console.say("Bye.")?;
            return Ok(());
        }
    }

    console.say(&render::board(session.board(), unicode))?;
    console.say(render::result(session.result()))?;
    Ok(())
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

/// Read moves until one is legal. `false` if the user quit.
fn user_turn<R: BufRead, W: Write>(
    session: &mut Session,
    console: &mut Console<R, W>,
    unicode: bool,
) -> Result<bool> {
    console.say(&render::board(session.board(), unicode))?;
    console.say(&format!("Turn: {}", session.turn()))?;

    loop {
        let Some(input) = console.prompt("Your turn: ")? else {
            return Ok(false);
        };
        let input = input.trim();
        if input.eq_ignore_ascii_case("quit") {
            return Ok(false);
        }
        if !looks_like_uci(input) {
            console.say("Try again.")?;
            continue;
        }
        match session.user_move(input) {
            Ok(_) => return Ok(true),
            Err(e) => {
                tracing::debug!("{}", e);
                console.say("This move is illegal. Try again.")?;
            }
        }
    }
}

fn agent_turn<R: BufRead, W: Write>(session: &mut Session, console: &mut Console<R, W>) -> Result<()> {
    let start = Instant::now();
    let choice = session.agent_move()?;
    let elapsed = start.elapsed();

    let line = match &choice {
        Choice::Book(mv) => format!("Opening Book Computer move: {}", ChessBoard::uci(mv)),
        Choice::Search { mv, score } => format!(
            "Computer move: {} || Value of move: {}",
            ChessBoard::uci(mv),
            score
        ),
    };
    console.say("")?;
    console.say(&line)?;
    console.say(&format!(
        "Time spent on this turn by AI: {} seconds.",
        elapsed.as_secs()
    ))?;
    tracing::debug!("Searched {} nodes in {:?}", session.last_nodes(), elapsed);
    Ok(())
}

// ============================================================================
// LEVEL 4 - CONSOLE
// ============================================================================

/// `e2e4` or `e7e8q` shaped, legal or not
fn looks_like_uci(input: &str) -> bool {
    let b = input.as_bytes();
    let square = |file: u8, rank: u8| {
        (b'a'..=b'h').contains(&file.to_ascii_lowercase()) && (b'1'..=b'8').contains(&rank)
    };
    match b.len() {
        4 => square(b[0], b[1]) && square(b[2], b[3]),
        5 => square(b[0], b[1]) && square(b[2], b[3]) && b"nbrqNBRQ".contains(&b[4]),
        _ => false,
    }
}

/// Line-oriented terminal I/O
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn say(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.output, "{}", text)
    }

    /// Print `text` and read one line; `None` on end of input
    pub fn prompt(&mut self, text: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}", text)?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// The human's color
    fn ask_color(&mut self) -> io::Result<Option<Color>> {
        loop {
            let Some(answer) = self.prompt("Choose a color of your pieces (white: 1, black: 0): ")?
            else {
                return Ok(None);
            };
            match answer.to_ascii_lowercase().as_str() {
                "1" | "w" | "white" => return Ok(Some(Color::White)),
                "0" | "b" | "black" => return Ok(Some(Color::Black)),
                _ => self.say("Try again.")?,
            }
        }
    }

    fn ask_depth(&mut self) -> io::Result<Option<u32>> {
        loop {
            let Some(answer) =
                self.prompt("Choose AI depth (fast AI moves: depth 3, better but slower: 4): ")?
            else {
                return Ok(None);
            };
            match answer.parse::<u32>() {
                Ok(depth) if depth > 0 => return Ok(Some(depth)),
                _ => self.say("Try again.")?,
            }
        }
    }
}
