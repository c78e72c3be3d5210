//! UPS Engine CLI
//!
//! Demo driver around ups_core: score a single innings, inspect a delivery
//! with both ball strategies, or run the deterministic demo feed.

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};

use ups_core::data::{demo_history, demo_observations};
use ups_core::feed::assemble_feed;
use ups_core::{
    BallEvent, InMemoryHistory, InMemoryResultStore, InningsObservation, MatchFormat,
    NarrationAdapter, ResultStore, ScoringFacade, Tone, UpsConfig,
};

#[derive(Parser)]
#[command(name = "ups_cli")]
#[command(about = "Score cricket performances for unexpected spikes", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score a single innings against an inline history
    Score {
        #[arg(long)]
        player_id: String,

        /// Match format: T20, ODI or TEST
        #[arg(long, default_value = "T20")]
        format: String,

        /// Runs scored in the innings being scored
        #[arg(long)]
        runs: f64,

        /// Comma-separated runs history, most recent first
        #[arg(long, value_delimiter = ',')]
        history: Vec<f64>,

        /// Attach a rule-based narrative
        #[arg(long, default_value = "false")]
        narrate: bool,

        /// Narration tone: analyst, commentator or casual
        #[arg(long, default_value = "analyst")]
        tone: String,
    },

    /// Score one delivery with both ball-level strategies
    Ball {
        #[arg(long)]
        runs: f64,

        #[arg(long, default_value = "0")]
        wickets: f64,

        #[arg(long, default_value = "1.2")]
        expected_runs: f64,

        #[arg(long, default_value = "0.05")]
        expected_wickets: f64,
    },

    /// Run the deterministic demo feed and print ranked anomalies
    Feed {
        #[arg(long, default_value = "42")]
        seed: u64,

        #[arg(long, default_value = "10")]
        limit: usize,

        /// Minimum UPS score for feed inclusion
        #[arg(long, default_value = "0.0")]
        min_ups: f64,

        /// Tone for the closing sequence summary
        #[arg(long, default_value = "commentator")]
        tone: String,
    },
}

fn parse_format(raw: &str) -> Result<MatchFormat> {
    MatchFormat::parse(raw).ok_or_else(|| anyhow!("unknown match format: {}", raw))
}

fn parse_tone(raw: &str) -> Result<Tone> {
    Tone::parse(raw).ok_or_else(|| anyhow!("unknown tone: {}", raw))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Score { player_id, format, runs, history, narrate, tone } => {
            let format = parse_format(&format)?;
            let tone = parse_tone(&tone)?;

            let mut provider = InMemoryHistory::new();
            provider.insert_runs(player_id.clone(), format, &history);

            let mut facade = ScoringFacade::new(&provider, UpsConfig::from_env_or_default());
            if narrate {
                facade = facade.with_narrator(NarrationAdapter::rule_based());
            }

            let observation = InningsObservation::new(player_id, format, runs);
            let result = facade.score_one_narrated(&observation, tone)?;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }

        Commands::Ball { runs, wickets, expected_runs, expected_wickets } => {
            let history = InMemoryHistory::new();
            let facade =
                ScoringFacade::new(&history, UpsConfig::from_env_or_default());
            let event = BallEvent {
                match_id: "cli".to_string(),
                over: 1,
                ball: 1,
                runs,
                wickets,
                expected_runs,
                expected_wickets,
            };

            let threshold = facade.score_ball_threshold(&event);
            let zscore = facade.score_ball_zscore(&event);
            println!("threshold rule: {}", serde_json::to_string(&threshold)?);
            println!("z-score rule:   {}", serde_json::to_string(&zscore)?);
        }

        Commands::Feed { seed, limit, min_ups, tone } => {
            let tone = parse_tone(&tone)?;
            let history = demo_history(seed);
            let observations = demo_observations(seed);

            let facade = ScoringFacade::new(&history, UpsConfig::from_env_or_default())
                .with_narrator(NarrationAdapter::rule_based());
            let results = facade.score_batch(&observations)?;

            let mut store = InMemoryResultStore::new();
            store.save(&results);

            let feed = assemble_feed(&results, min_ups, limit);
            println!("Demo feed (seed {}, {} items):\n", seed, feed.len());
            for item in &feed {
                println!("[{:.2}] {}", item.combined_score, item.headline);
                for driver in &item.key_drivers {
                    println!("    - {}", driver);
                }
            }

            // fetch_recent is newest-first; the trend wants oldest-first
            let mut recent = store.fetch_recent(limit);
            recent.reverse();
            if let Some(summary) = facade.narrate_sequence(&recent, tone) {
                println!("\n{}", summary.title);
                println!("{}", summary.summary);
            }
        }
    }

    Ok(())
}
