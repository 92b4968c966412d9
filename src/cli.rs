use crate::{config::Config, gateways};
use anyhow::Result;
use bcv_application::prelude::*;
use bcv_core::{
    entities::{TravelMode, TripDate, TripRecord},
    usecases::{DistanceMethod, DistanceResolution},
    util::pacing::FixedDelay,
};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None, propagate_version = true)]
pub struct Cli {
    /// Configuration file (default: bilan-voyage.toml)
    #[clap(long, short, global = true, env = "BILAN_VOYAGE_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Append new survey trips with their distances to the spreadsheet.
    Sync {
        /// Resolve distances and print the rows instead of appending them.
        #[clap(long)]
        dry_run: bool,
    },

    /// Print the date of the latest trip in the spreadsheet.
    Watermark,

    /// Resolve the distance of a single trip.
    Resolve {
        #[clap(long)]
        from_country: String,

        /// Origin address.
        #[clap(long)]
        from: String,

        #[clap(long)]
        to_country: String,

        /// Destination address.
        #[clap(long)]
        to: String,

        /// Travel mode as chosen in the survey form.
        #[clap(long, default_value = "Bus")]
        mode: String,
    },
}

pub fn run(cli: Cli) -> Result<()> {
    let Cli { config, command } = cli;
    let cfg = Config::try_load_from_file_or_default(config)?;
    match command.unwrap_or(Command::Sync { dry_run: false }) {
        Command::Sync { dry_run } => sync(&cfg, dry_run),
        Command::Watermark => {
            let sheet = gateways::spreadsheet_gateway(&cfg.spreadsheet)?;
            match last_processed_date(&sheet, cfg.spreadsheet.date_column)? {
                Some(date) => println!("{date}"),
                None => println!("No trip has been recorded yet"),
            }
            Ok(())
        }
        Command::Resolve {
            from_country,
            from,
            to_country,
            to,
            mode,
        } => {
            let trip = TripRecord {
                origin_country: from_country,
                origin_address: from,
                dest_country: to_country,
                dest_address: to,
                mode: TravelMode::from_choice(&mode),
                date: TripDate::from_date(time::OffsetDateTime::now_utc().date()),
            };
            let geocoder = gateways::geocoding_gateway(&cfg.geocoding)?;
            let router = gateways::routing_gateway(&cfg.routing)?;
            let pacer = FixedDelay::new(cfg.geocoding.delay);
            let resolution = resolve_trip(
                &geocoder,
                &router,
                &pacer,
                &cfg.routing.geodesic_modes,
                &trip,
            );
            println!("{}", describe_resolution(&resolution));
            Ok(())
        }
    }
}

fn sync(cfg: &Config, dry_run: bool) -> Result<()> {
    let sheet = gateways::spreadsheet_gateway(&cfg.spreadsheet)?;
    let forms = gateways::submissions_gateway(&cfg.forms)?;
    let geocoder = gateways::geocoding_gateway(&cfg.geocoding)?;
    let router = gateways::routing_gateway(&cfg.routing)?;
    let pacer = FixedDelay::new(cfg.geocoding.delay);
    let settings = SyncSettings {
        date_column: cfg.spreadsheet.date_column,
        append_range: cfg.spreadsheet.append_range,
        value_input_option: cfg.spreadsheet.value_input_option,
        geodesic_modes: cfg.routing.geodesic_modes.clone(),
        dry_run,
    };
    let report = sync_new_trips(&sheet, &forms, &geocoder, &router, &pacer, &settings)?;
    if dry_run {
        for row in &report.rows {
            let cells: Vec<_> = row.iter().map(ToString::to_string).collect();
            println!("{}", cells.join("\t"));
        }
    }
    Ok(())
}

fn describe_resolution(resolution: &DistanceResolution) -> String {
    match resolution {
        DistanceResolution::Computed { distance, method } => match method {
            DistanceMethod::Routed(profile) => format!("{distance} (routed, {profile})"),
            DistanceMethod::Geodesic => format!("{distance} (as the crow flies)"),
        },
        DistanceResolution::Unresolved(reason) => {
            format!("complex: {reason:?}")
        }
    }
}
