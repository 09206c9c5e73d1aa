use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;

use scorekeeper::session::{Always, Prompt};
use scorekeeper::{
    config, logging, Color, ColorScheme, FileStore, GameId, PlayerId, Session,
    SnapshotStore, TextChart,
};

#[derive(Debug, Parser)]
#[command(name = "scorekeeper", version, about = "Keep track of game scores for any game")]
struct Cli {
    /// Config file (defaults to ~/.scorekeeper/config.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding the snapshot, overrides the config file
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Answer yes to confirmation prompts
    #[arg(short, long, global = true)]
    yes: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Register a player
    AddPlayer {
        name: String,
        /// #rrggbb color; a suggestion is used when omitted
        #[arg(long)]
        color: Option<String>,
    },
    /// Remove a player and their scores
    RemovePlayer { id: u32 },
    /// List players
    Players,
    /// Add a game row with zero scores
    AddGame,
    /// Replace all games with a single empty game
    Reset,
    /// Set a score; non-numeric input counts as 0
    Score {
        game: u32,
        player: u32,
        #[arg(allow_hyphen_values = true)]
        value: String,
    },
    /// Print the score table and chart
    Show,
    /// Switch between light and dark display
    Theme {
        #[arg(value_enum, default_value_t = ThemeArg::Toggle)]
        mode: ThemeArg,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ThemeArg {
    Light,
    Dark,
    Toggle,
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let mut cfg = config::load_config(cli.config.as_deref()).context("load config")?;
    if let Some(dir) = &cli.data_dir {
        cfg = cfg.with_data_dir(dir);
    }

    logging::init(&cfg.log).map_err(|e| anyhow::anyhow!(e)).context("init logging")?;
    info!(data_dir = %cfg.data_dir.display(), format = ?cfg.format, "starting scorekeeper");

    let store = FileStore::new(&cfg.data_dir, cfg.format);
    let chart = TextChart::new(cfg.chart.width).with_ansi(std::io::stdout().is_terminal());
    let mut session = Session::open(store, chart, cfg.session_options());

    match run(&mut session, cli.command, cli.yes) {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(e) => {
            eprintln!("error: {e:#}");
            Ok(ExitCode::FAILURE)
        }
    }
}

fn run<S: SnapshotStore>(
    session: &mut Session<S, TextChart>,
    command: Command,
    yes: bool,
) -> anyhow::Result<()> {
    match command {
        Command::AddPlayer { name, color } => {
            let color = color
                .as_deref()
                .map(Color::parse)
                .transpose()
                .context("parse --color")?;
            let player = session.add_player(&name, color)?;
            println!("added {} (id {}, {})", player.name, player.id.raw(), player.color);
        }
        Command::RemovePlayer { id } => {
            if session.remove_player(PlayerId::new(id)) {
                println!("removed player {id}");
            } else {
                println!("no player with id {id}");
            }
        }
        Command::Players => {
            for player in session.ledger().players() {
                println!("{:>3}  {}  {}", player.id.raw(), player.color, player.name);
            }
        }
        Command::AddGame => {
            let game = session.add_game()?;
            println!("added game {}", game.id.raw());
        }
        Command::Reset => {
            let reset = if yes {
                session.reset_game(&mut Always(true))
            } else {
                session.reset_game(&mut Prompt::stdio())
            };
            if reset {
                println!("games reset");
            }
        }
        Command::Score { game, player, value } => {
            if !session.update_score(GameId::new(game), PlayerId::new(player), &value) {
                println!("no game {game} with player {player}");
            }
        }
        Command::Show => show(session),
        Command::Theme { mode } => {
            let scheme = match mode {
                ThemeArg::Light => {
                    session.set_color_scheme(ColorScheme::Light);
                    ColorScheme::Light
                }
                ThemeArg::Dark => {
                    session.set_color_scheme(ColorScheme::Dark);
                    ColorScheme::Dark
                }
                ThemeArg::Toggle => session.toggle_color_scheme(),
            };
            println!("display mode: {scheme}");
        }
    }

    Ok(())
}

fn show<S: SnapshotStore>(session: &Session<S, TextChart>) {
    if session.ledger().players().is_empty() {
        println!("No players added yet. Add some players to start tracking scores!");
        return;
    }

    print!("{}", session.score_table());

    if let Some(frame) = session.renderer().frame() {
        println!();
        print!("{frame}");
    }
}
