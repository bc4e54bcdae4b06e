use crawler::game_state::State;
use crawler::{GameConfig, GameManager};

const DEFAULT_CONFIG: &str = "maze_game.json";

fn main() -> rltk::BError {
    use rltk::RltkBuilder;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_CONFIG.to_string());
    let config = GameConfig::load_or_default(&path)?;

    let mut manager = GameManager::new(config)?;
    manager.init()?;

    let context = RltkBuilder::simple80x50()
        .with_title("Maze Crawler")
        .build()?;
    let gs = State { manager };

    rltk::main_loop(context, gs)
}
