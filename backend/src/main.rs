use std::{io, process::ExitCode};

use backend::Game;
use board::Position;
use clap::Parser;
use terminal_ui::{Command, MoveRequest, TerminalUi};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod arguments {
    use clap::Parser;
    use terminal_ui::MoveRequest;

    /// Set up a chess board and move pieces around on it
    #[derive(Debug, Parser)]
    #[command(name = "chess-state", version)]
    pub struct Config {
        /// Moves to make before printing the board, like `e2e4,e7e5`
        ///
        /// Without any, commands are read from the terminal instead.
        #[arg(long, value_delimiter = ',')]
        pub moves: Vec<MoveRequest>,

        /// Keep the same side to move after each move
        #[arg(long)]
        pub no_switch_turns: bool,

        /// Log more; repeat for even more
        #[arg(short, long, action = clap::ArgAction::Count)]
        pub verbose: u8,
    }
}

#[derive(Debug, thiserror::Error)]
enum PlayError {
    #[error("no piece on {0}")]
    EmptySquare(Position),
    #[error(transparent)]
    Board(#[from] board::Error),
    #[error("terminal error: {0}")]
    Io(#[from] io::Error),
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Move whatever is on the source square, then pass the turn if the piece moved
///
/// A move onto an occupied square still counts as made, so the turn passes before the conflict is
/// returned.
fn play(game: &mut Game, request: MoveRequest, switch_turns: bool) -> Result<(), PlayError> {
    let id = game
        .get_square(request.from)?
        .piece()
        .ok_or(PlayError::EmptySquare(request.from))?;
    let result = game.execute_move(id, request.to);
    if matches!(result, Ok(()) | Err(board::Error::SquareConflict(_))) {
        info!(from = %request.from, to = %request.to, "move made");
        if switch_turns {
            game.switch_turn();
        }
    }
    result.map_err(PlayError::from)
}

/// Whether the game changed despite the error
fn moved_anyway(err: &PlayError) -> bool {
    matches!(err, PlayError::Board(board::Error::SquareConflict(_)))
}

fn run_interactive(game: &mut Game, switch_turns: bool) -> Result<(), PlayError> {
    let mut ui = TerminalUi::stdio();
    ui.show_board(game.board())?;
    while let Some(command) = ui.next_command(game.side_to_move())? {
        match command {
            Command::Candidates(position) => match game.piece_at(position) {
                Ok(Some((_, piece))) => {
                    ui.show_candidates(position, &piece.available_positions())?
                }
                Ok(None) => ui.report(PlayError::EmptySquare(position))?,
                Err(err) => ui.report(err)?,
            },
            Command::Move(request) => match play(game, request, switch_turns) {
                Ok(()) => ui.show_board(game.board())?,
                Err(err) => {
                    ui.report(&err)?;
                    if moved_anyway(&err) {
                        ui.show_board(game.board())?;
                    }
                }
            },
            Command::Turn => game.switch_turn(),
            Command::Board => ui.show_board(game.board())?,
            Command::Quit => break,
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let config = arguments::Config::parse();
    init_logging(config.verbose);
    let switch_turns = !config.no_switch_turns;

    let mut game = Game::new();
    let result = if config.moves.is_empty() {
        run_interactive(&mut game, switch_turns)
    } else {
        let played = config
            .moves
            .iter()
            .try_for_each(|&request| play(&mut game, request, switch_turns));
        print!("{}", terminal_ui::render(game.board()));
        played
    };
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
