use std::process;

use serde_json::{json, Value};
use worldbench::{ComposeError, LogBuffer, World, WorldSnapshot};
use worldbench_worlds::{example_world, game_world, DemoConfig};

fn main() {
    let args: Vec<String> = std::env::args().collect();
    if matches!(args.get(1).map(|s| s.as_str()), Some("--help") | Some("-h")) {
        println!("Usage: world_demo [config.toml]");
        println!("Runs a few representative requests against the example worlds.");
        return;
    }

    let config_path = args.get(1).map(|s| s.as_str()).unwrap_or("world_demo.toml");
    let config = match DemoConfig::load(config_path) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            process::exit(1);
        }
    };

    let mut worlds = match build_worlds() {
        Ok(worlds) => worlds,
        Err(err) => {
            eprintln!("world composition failed: {err}");
            process::exit(1);
        }
    };

    println!("fixture results:");
    for world in &worlds {
        for system in world.systems() {
            for node in system.nodes() {
                for action in node.actions() {
                    let summary = action.fixture_summary();
                    println!(
                        "  {}/{}/{}/{}: {} passed, {} failed",
                        world.name(),
                        system.name(),
                        node.name(),
                        action.name(),
                        summary.passed,
                        summary.failed,
                    );
                }
            }
        }
    }

    let mut log = LogBuffer::with_capacity(config.log_capacity);

    println!();
    println!("requests:");
    run(
        &mut worlds,
        "example",
        "counter",
        "counter",
        "increment",
        json!({"amount": 3}),
        &mut log,
    );
    run(
        &mut worlds,
        "game",
        "character",
        "character",
        "levelUp",
        json!({"statPoints": 1, "attribute": "strength"}),
        &mut log,
    );
    run(
        &mut worlds,
        "game",
        "character",
        "character",
        "gainExperience",
        json!({"amount": 50, "source": "quest", "multiplier": 2}),
        &mut log,
    );
    run(
        &mut worlds,
        "game",
        "character",
        "character",
        "levelUp",
        json!({"statPoints": 1, "attribute": "strength"}),
        &mut log,
    );

    println!();
    println!("captured log:");
    for entry in log.entries() {
        println!("  [{}] {}", entry.level, entry.message);
    }
    if log.evicted() > 0 {
        println!("  ({} older entries evicted)", log.evicted());
    }

    if let Some(world) = worlds.iter().find(|world| world.name() == config.world) {
        println!();
        println!("{} state: {}", world.name(), world.state());
    }

    if let Some(dir) = &config.snapshot_dir {
        let refs: Vec<&World> = worlds.iter().collect();
        let path = dir.join("worldbench_snapshot.json");
        let saved = WorldSnapshot::capture(&refs).and_then(|snapshot| snapshot.save_json(&path));
        match saved {
            Ok(record) => println!(
                "snapshot saved to {} ({} worlds, {} nodes, sha256 {})",
                path.display(),
                record.worlds,
                record.nodes,
                record.snapshot_hash,
            ),
            Err(err) => {
                eprintln!("{err}");
                process::exit(1);
            }
        }
    }
}

fn build_worlds() -> Result<Vec<World>, ComposeError> {
    Ok(vec![example_world()?, game_world()?])
}

fn run(
    worlds: &mut [World],
    world: &str,
    system: &str,
    node: &str,
    action: &str,
    payload: Value,
    log: &mut LogBuffer,
) {
    let Some(target) = worlds.iter_mut().find(|w| w.name() == world) else {
        eprintln!("unknown world: {world}");
        return;
    };
    match target.run_action(system, node, action, &payload, log) {
        Ok(reply) => println!("  {world}/{system}/{node}/{action} -> {}", reply.response),
        Err(err) => println!("  {world}/{system}/{node}/{action} -> error: {err}"),
    }
}
