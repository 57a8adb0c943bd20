use hangman::cli::{Cli, CliInterface, parse_cli};
use hangman::game_state::game_loop;
use hangman::leaderboard::{JsonFileStore, Leaderboard, MemoryStore, ScoreStore, default_scores_path};
use hangman::logging::{default_log_path, init_logging};
use hangman::tui::TuiInterface;
use std::error::Error;
use std::io;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = parse_cli();

    // The TUI owns the screen, so its logs go to a file unless told otherwise.
    let log_file = cli
        .log_file
        .clone()
        .or_else(|| if cli.tui { default_log_path() } else { None });
    if let Err(e) = init_logging(log_file.as_deref()) {
        eprintln!("Failed to set up logging: {e}");
    }

    let result = if cli.no_save {
        log::info!("Hall of Fame kept in memory only");
        run(&cli, Leaderboard::new(MemoryStore::new()))
    } else {
        let path = cli.scores_path.clone().unwrap_or_else(default_scores_path);
        log::info!("Hall of Fame stored at {}", path.display());
        run(&cli, Leaderboard::new(JsonFileStore::new(path)))
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run<S: ScoreStore>(cli: &Cli, mut leaderboard: Leaderboard<S>) -> Result<(), Box<dyn Error>> {
    let mut rng = rand::thread_rng();
    let player_name = cli.player_name.as_deref();

    if cli.tui {
        let mut interface = TuiInterface::new()?;
        game_loop(&mut interface, &mut leaderboard, &mut rng, player_name)?;
    } else {
        let stdin = io::stdin();
        let mut interface = CliInterface::new(stdin.lock());
        game_loop(&mut interface, &mut leaderboard, &mut rng, player_name)?;
    }
    Ok(())
}
