use std::path::PathBuf;

use clap::Parser;
use engine_math::Vec3;
use engine_runtime::{Engine, EngineConfig};
use engine_scene::{EnemyType, GameEvent};
use tracing::info;

#[derive(Parser)]
#[command(name = "sample-game", about = "Sample game running on the engine")]
struct Args {
    /// Path to a JSON engine config; defaults are used when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of frames to run before exiting (0 = run forever)
    #[arg(short, long, default_value_t = 300)]
    frames: u64,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => EngineConfig::from_file(path)?,
        None => EngineConfig::default(),
    }
    .with_max_frames(args.frames);

    info!(title = %config.window_title, "starting engine");

    let mut engine = Engine::new(config);
    engine.initialize()?;

    engine.events_mut().subscribe(|event| match event {
        GameEvent::Collision { a, b } => info!(%a, %b, "collision"),
        GameEvent::Death { object } => info!(%object, "character died"),
        GameEvent::LevelUp { object, level } => info!(%object, level, "level up"),
    });

    let player = engine.scene_mut().spawn_player("Player1");
    if let Some(object) = engine.scene_mut().get_mut(player) {
        let name = object.name().to_string();
        if let Some(state) = object.player_mut() {
            state.set_weapon("Iron Sword");
        }
        if let Some(character) = object.character_mut() {
            info!(
                name = %name,
                level = character.level(),
                health = character.health(),
                max_health = character.max_health(),
                "created player"
            );
            // Enough experience to level up twice.
            character.add_experience(250);
        }
    }

    let skeleton = engine
        .scene_mut()
        .spawn_enemy("Skeleton", EnemyType::Skeleton);
    if let Some(object) = engine.scene_mut().get_mut(skeleton) {
        object.transform_mut().position = Vec3::new(20.0, 0.0, 0.0);
        if let Some(enemy) = object.enemy_mut() {
            enemy.set_target(player);
        }
    }

    engine.run()?;
    engine.shutdown();

    info!(
        frames = engine.frames(),
        fps = engine.fps(),
        "engine shutdown complete"
    );
    Ok(())
}
