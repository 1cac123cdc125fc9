use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use cpugen::config::{AppConfig, ConfigManager, SeedingMode};
use cpugen::engines::evaluation::ThroughputFitness;
use cpugen::engines::generation::{ConsoleProgressCallback, EvolutionEngine};
use cpugen::engines::sampling::{
    DesignGenerator, RandomDesignGenerator, RandomSampler, RuleBasedDesignGenerator,
};
use std::path::{Path, PathBuf};

/// cpugen - procedural generation of CPU hardware variants
#[derive(Parser, Debug)]
#[command(name = "cpugen")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// TOML config file layered over the defaults
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Evolve a population against the throughput fitness (default)
    Evolve(EvolveArgs),

    /// Generate one unconstrained random design
    Random {
        #[arg(short, long)]
        seed: Option<u64>,
    },

    /// Generate one design that follows the design rules
    Rules {
        #[arg(short, long)]
        seed: Option<u64>,
    },

    /// Print the effective configuration
    Config {
        /// Print the field manifest as JSON instead of TOML
        #[arg(long)]
        manifest: bool,
    },
}

#[derive(clap::Args, Debug, Default)]
struct EvolveArgs {
    /// Random seed (default: OS entropy)
    #[arg(short, long)]
    seed: Option<u64>,

    #[arg(short, long)]
    population_size: Option<usize>,

    #[arg(short, long)]
    generations: Option<usize>,

    /// Elites kept per generation
    #[arg(short, long)]
    num_best: Option<usize>,

    /// Seed generation 0 from the design rules
    #[arg(long)]
    rule_based: bool,

    /// Score variants on the rayon thread pool
    #[arg(long)]
    parallel: bool,

    /// Print the full outcome as JSON
    #[arg(long)]
    json: bool,
}

/// Layered file and environment settings; validated once the command's own
/// overrides are in place.
fn load_config(path: Option<&Path>) -> Result<AppConfig> {
    match path {
        Some(path) => ConfigManager::resolve(Some(path))
            .with_context(|| format!("loading {}", path.display())),
        None => ConfigManager::resolve(None).context("reading environment overrides"),
    }
}

fn validated(config: AppConfig) -> Result<AppConfig> {
    config.validate().context("invalid configuration")?;
    Ok(config)
}

fn run_evolve(mut config: AppConfig, args: EvolveArgs) -> Result<()> {
    let evolution = &mut config.evolution;
    if args.seed.is_some() {
        evolution.seed = args.seed;
    }
    if let Some(size) = args.population_size {
        evolution.population_size = size;
    }
    if let Some(generations) = args.generations {
        evolution.generations = generations;
    }
    if let Some(num_best) = args.num_best {
        evolution.num_best = num_best;
    }
    if args.rule_based {
        evolution.seeding = SeedingMode::RuleBased;
    }
    evolution.parallel_evaluation |= args.parallel;

    let mut engine =
        EvolutionEngine::new(config, ThroughputFitness).context("invalid evolution settings")?;
    let outcome = engine.run(ConsoleProgressCallback)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        println!(
            "Best Variant - Clock Speed: {} MHz, Memory Size: {} bytes",
            outcome.best.clock_speed, outcome.best.memory_size
        );
    }
    Ok(())
}

fn run_generator(generator: &dyn DesignGenerator, seed: Option<u64>) -> Result<()> {
    let mut sampler = RandomSampler::new(seed);
    let design = generator
        .generate(&mut sampler)
        .with_context(|| format!("{} generation failed", generator.name()))?;
    println!("{}", design);
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    match cli.command.unwrap_or_else(|| Commands::Evolve(EvolveArgs::default())) {
        Commands::Evolve(evolve) => run_evolve(config, evolve),
        Commands::Random { seed } => {
            let config = validated(config)?;
            let generator = RandomDesignGenerator::new(config.rules.random)?;
            println!("Generated Random CPU Variant");
            run_generator(&generator, seed)
        }
        Commands::Rules { seed } => {
            let config = validated(config)?;
            let generator = RuleBasedDesignGenerator::new(config.rules.rule_based)?;
            println!("Generated CPU Variant");
            run_generator(&generator, seed)
        }
        Commands::Config { manifest } => {
            let manager = ConfigManager::new();
            manager
                .update(|current| *current = config)
                .context("invalid configuration")?;
            if manifest {
                let config = manager.get();
                println!("{}", serde_json::to_string_pretty(&config.manifests())?);
            } else {
                print!("{}", manager.to_toml()?);
            }
            Ok(())
        }
    }
}
