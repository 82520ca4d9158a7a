use anyhow::{bail, Context};
use tracing::info;

use yahtzee::env_config::{init_rayon_threads, init_tracing};
use yahtzee::simulation::simulate_batch;

struct Args {
    num_games: usize,
    seed: u64,
    json: bool,
}

fn parse_args() -> anyhow::Result<Args> {
    let args: Vec<String> = std::env::args().collect();
    let mut num_games = 10_000usize;
    let mut seed = 42u64;
    let mut json = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--games" => {
                i += 1;
                let v = args.get(i).context("--games needs a value")?;
                num_games = v
                    .parse()
                    .with_context(|| format!("Invalid --games value: {}", v))?;
            }
            "--seed" => {
                i += 1;
                let v = args.get(i).context("--seed needs a value")?;
                seed = v
                    .parse()
                    .with_context(|| format!("Invalid --seed value: {}", v))?;
            }
            "--json" => json = true,
            "--help" | "-h" => {
                println!("Usage: yahtzee-simulate [--games N] [--seed S] [--json]");
                std::process::exit(0);
            }
            other => bail!("Unknown argument: {}", other),
        }
        i += 1;
    }

    Ok(Args {
        num_games,
        seed,
        json,
    })
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let args = parse_args()?;
    init_rayon_threads();

    info!(games = args.num_games, seed = args.seed, "simulating greedy games");
    let result = simulate_batch(args.num_games, args.seed)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    println!("Games:      {}", result.num_games);
    println!("Mean:       {:.2}", result.mean);
    println!("Std dev:    {:.2}", result.std_dev);
    println!("Min:        {}", result.min);
    println!("Median:     {}", result.median);
    println!("Max:        {}", result.max);
    println!("Bonus rate: {:.1}%", result.bonus_rate * 100.0);
    println!(
        "Elapsed:    {:.2} ms ({:.0} games/s)",
        result.elapsed.as_secs_f64() * 1000.0,
        result.num_games as f64 / result.elapsed.as_secs_f64().max(1e-9)
    );
    Ok(())
}
