use std::io::Read;

use anyhow::{bail, Context};
use clap::{Arg, ArgMatches, Command};
use tracing::{error, info};

use crate::{
    core::{directions_url, extract_json, route_distance_km, sequence_route, DestinationTrie},
    ChatCompletionsClient, ItineraryGenerator, LocatedActivity, PlannerConfig, TripPreferences,
};

fn command() -> Command {
    Command::new("trip-planner")
        .version("0.1.0")
        .about("Itinerary drafting helpers: JSON recovery, route ordering, destination search")
        .subcommand_required(true)
        .subcommand(
            Command::new("extract")
                .about("Recover the JSON object from raw model output")
                .arg(
                    Arg::new("file")
                        .help("File with the model output (reads stdin when omitted)")
                        .index(1),
                ),
        )
        .subcommand(
            Command::new("route")
                .about("Order located activities by nearest neighbour")
                .arg(
                    Arg::new("file")
                        .help("JSON array of activities with coords (reads stdin when omitted)")
                        .index(1),
                )
                .arg(
                    Arg::new("destination")
                        .short('d')
                        .long("destination")
                        .value_name("PLACE")
                        .help("Destination appended to each stop in the maps link")
                        .default_value(""),
                ),
        )
        .subcommand(
            Command::new("suggest")
                .about("Suggest popular destinations for a prefix")
                .arg(Arg::new("prefix").required(true).index(1)),
        )
        .subcommand(
            Command::new("generate")
                .about("Draft an itinerary with the configured model")
                .arg(Arg::new("destination").required(true).index(1))
                .arg(
                    Arg::new("days")
                        .long("days")
                        .value_name("COUNT")
                        .default_value("1"),
                )
                .arg(Arg::new("interests").long("interests").value_name("TEXT"))
                .arg(
                    Arg::new("budget")
                        .long("budget")
                        .value_name("LEVEL")
                        .default_value("medium"),
                )
                .arg(
                    Arg::new("model")
                        .short('m')
                        .long("model")
                        .value_name("MODEL")
                        .help("Model name (or set TRIP_PLANNER_MODEL)"),
                )
                .arg(
                    Arg::new("timeout")
                        .short('t')
                        .long("timeout")
                        .value_name("SECONDS")
                        .default_value("120"),
                ),
        )
}

fn read_input(matches: &ArgMatches) -> anyhow::Result<String> {
    match matches.get_one::<String>("file") {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("failed to read {path}"))
        }
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("failed to read stdin")?;
            Ok(buffer)
        }
    }
}

/// CLI entry point for the trip-planner tool
pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    match command().get_matches().subcommand() {
        Some(("extract", matches)) => {
            let text = read_input(matches)?;
            let extraction = extract_json(&text)?;
            info!(source = ?extraction.source, "recovered JSON");
            println!("{}", serde_json::to_string_pretty(&extraction.value)?);
        }
        Some(("route", matches)) => {
            let text = read_input(matches)?;
            let activities: Vec<LocatedActivity> =
                serde_json::from_str(&text).context("expected a JSON array of activities")?;
            let route = sequence_route(activities)?;
            let destination = matches
                .get_one::<String>("destination")
                .map(String::as_str)
                .unwrap_or_default();

            for (idx, stop) in route.iter().enumerate() {
                println!("{}. {} ({})", idx + 1, stop.title, stop.location);
            }
            println!("Total distance: {:.1} km", route_distance_km(&route));
            println!("{}", directions_url(&route, destination));
        }
        Some(("suggest", matches)) => {
            let prefix = matches
                .get_one::<String>("prefix")
                .context("prefix is required")?;
            for suggestion in DestinationTrie::with_popular_destinations().search_prefix(prefix) {
                println!("{suggestion}");
            }
        }
        Some(("generate", matches)) => generate(matches).await?,
        _ => bail!("unknown subcommand"),
    }

    Ok(())
}

async fn generate(matches: &ArgMatches) -> anyhow::Result<()> {
    let destination = matches
        .get_one::<String>("destination")
        .context("destination is required")?;
    let days: u32 = matches
        .get_one::<String>("days")
        .context("days has a default")?
        .parse()
        .context("--days must be a positive integer")?;
    let timeout_seconds: u64 = matches
        .get_one::<String>("timeout")
        .context("timeout has a default")?
        .parse()
        .context("--timeout must be a number of seconds")?;

    let mut prefs = TripPreferences::default().with_days(days);
    if let Some(interests) = matches.get_one::<String>("interests") {
        prefs = prefs.with_interests(interests.as_str());
    }
    if let Some(budget) = matches.get_one::<String>("budget") {
        prefs = prefs.with_budget(budget.as_str());
    }

    let mut config =
        PlannerConfig::from_env()?.with_timeout(std::time::Duration::from_secs(timeout_seconds));
    if let Some(model) = matches.get_one::<String>("model") {
        config = config.with_model(model.as_str());
    }
    info!("Using model: {}", config.model);

    let generator = ItineraryGenerator::new(ChatCompletionsClient::new(config)?);
    match generator.generate(destination, &prefs).await {
        Ok(generated) => {
            println!("{}", serde_json::to_string_pretty(&generated.draft)?);
            Ok(())
        }
        Err(err) => {
            error!("Itinerary generation failed: {}", err);
            eprintln!("{}", err.to_error_payload());
            Err(err.into())
        }
    }
}
