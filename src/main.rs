use anyhow::Result;
use chrono::{Duration, Utc};
use paretune::config::ConfigManager;
use paretune::engines::evaluation::SyntheticEvaluator;
use paretune::engines::generation::{ConsoleProgress, Nsga2Engine};
use paretune::schema::SchemaRegistry;
use paretune::types::RunContext;
use std::path::Path;

fn main() -> Result<()> {
    env_logger::init();

    let manager = ConfigManager::new();
    if Path::new("paretune.toml").exists() {
        manager.load_from_file("paretune.toml")?;
    }
    let config = manager.get();

    let registry = SchemaRegistry::builtin();
    let strategy = std::env::args().nth(1).unwrap_or_else(|| "sma".to_string());
    let schema = registry.schema(&strategy)?;

    let to_time = Utc::now();
    let ctx = RunContext {
        exchange: "synthetic".to_string(),
        symbol: "BTCUSDT".to_string(),
        strategy: strategy.clone(),
        tf: "1h".to_string(),
        from_time: to_time - Duration::days(365),
        to_time,
    };

    let mut engine = Nsga2Engine::new(
        config.optimiser,
        schema,
        Box::new(SyntheticEvaluator),
        ctx,
    )?;

    let population = engine.run(&mut ConsoleProgress)?;
    for individual in &population {
        println!("{individual}");
    }

    Ok(())
}
