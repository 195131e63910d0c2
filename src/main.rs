use hangman::cli::{CliInterface, parse_cli};
use hangman::game_state::{GameInterface, game_loop};
use hangman::logging::init_logging;
use hangman::tui::TuiInterface;
use hangman::wordbank::WordRepository;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::io;

fn main() {
    let cli = parse_cli();
    let log_path = init_logging(cli.log_file.as_deref());
    log::info!("Starting hangman (log file: {:?})", log_path);

    let mut repository = match &cli.words_dir {
        Some(dir) => WordRepository::from_dir(dir),
        None => WordRepository::embedded(),
    };
    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let mut interface: Box<dyn GameInterface> = if cli.tui {
        match TuiInterface::new() {
            Ok(tui) => Box::new(tui),
            Err(e) => {
                eprintln!("Failed to start the terminal interface: {e}");
                std::process::exit(1);
            }
        }
    } else {
        Box::new(CliInterface::new(io::stdin().lock()).with_screen_clearing(!cli.no_clear))
    };

    let result = game_loop(&mut repository, &mut rng, interface.as_mut());
    // Restore the terminal before printing anything.
    drop(interface);

    match result {
        Ok(summary) => {
            if cli.tui {
                hangman::cli::display_exit_message();
            }
            log::info!(
                "Exiting after {} games ({} won, {} lost, {:?})",
                summary.games_played,
                summary.wins,
                summary.losses,
                summary.reason
            );
        }
        Err(e) => {
            log::error!("{e}");
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}
