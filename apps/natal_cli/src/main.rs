mod geocode;

use anyhow::{bail, Context};
use chrono::{NaiveDate, NaiveTime};
use clap::{Parser, ValueEnum};
use geocode::NominatimGeocoder;
use natal::birth::{to_utc, BirthData};
use natal::chart::ChartBuilder;
use natal::ephemeris::{EphemerisProvider, SnapshotEphemeris};
use natal::location::{
    resolve_location, FixedOffsetResolver, IanaResolver, LocationError, LocationQuery,
    NauticalResolver, TimezoneInfo, TimezoneResolver,
};
use natal::report::{ChartReport, ReportContext};
use natal::GeoLocation;
use natal_config::{NatalSettings, ReportFormat};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatArg {
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Cast a natal chart")]
struct Args {
    #[arg(long, help = "Full name of the person")]
    name: String,

    #[arg(long, help = "Birth date, YYYY-MM-DD")]
    date: String,

    #[arg(long, default_value = "12:00", help = "Local birth time, HH:MM[:SS]")]
    time: String,

    #[arg(long, help = "Birth place, geocoded when no coordinates are given")]
    place: Option<String>,

    #[arg(long, allow_hyphen_values = true)]
    lat: Option<String>,

    #[arg(long, allow_hyphen_values = true)]
    lon: Option<String>,

    #[arg(long, allow_hyphen_values = true, help = "UTC offset of the birth place, e.g. +05:30")]
    utc_offset: Option<String>,

    #[arg(long, help = "Label for the timezone in the report")]
    tz_name: Option<String>,

    #[arg(long, help = "Read positions and cusps from a JSON snapshot")]
    snapshot: Option<PathBuf>,

    #[arg(long, value_enum)]
    format: Option<FormatArg>,

    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(short, long)]
    verbose: bool,
}

fn parse_time(text: &str) -> anyhow::Result<NaiveTime> {
    NaiveTime::parse_from_str(text, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(text, "%H:%M"))
        .with_context(|| format!("invalid time '{text}', expected HH:MM or HH:MM:SS"))
}

fn resolve_timezone(
    args: &Args,
    settings: &NatalSettings,
    location: &GeoLocation,
) -> anyhow::Result<TimezoneInfo> {
    let explicit = args.utc_offset.as_deref().or(settings.default_utc_offset.as_deref());
    let resolved = match explicit {
        Some(text) => FixedOffsetResolver::parse(text)?.timezone_for(location),
        None => IanaResolver::new().timezone_for(location).or_else(|| {
            log::warn!("no IANA timezone for this location; using the nautical zone for the longitude");
            NauticalResolver.timezone_for(location)
        }),
    };
    let mut info = resolved.ok_or(LocationError::TimezoneNotFound {
        lat: location.lat,
        lon: location.lon,
    })?;
    if let Some(name) = &args.tz_name {
        info.name = name.clone();
    }
    Ok(info)
}

fn open_provider(
    args: &Args,
    settings: &NatalSettings,
) -> anyhow::Result<Box<dyn EphemerisProvider>> {
    if let Some(path) = &args.snapshot {
        let provider = SnapshotEphemeris::load(path)?;
        return Ok(Box::new(provider));
    }

    #[cfg(feature = "swisseph")]
    {
        let adapter = natal::ephemeris::SwissEphemerisAdapter::new(
            settings.ephemeris_path.clone(),
            settings.ephemeris.clone(),
        )?;
        Ok(Box::new(adapter))
    }

    #[cfg(not(feature = "swisseph"))]
    {
        let _ = settings;
        bail!("no ephemeris available: pass --snapshot or build with the `swisseph` feature")
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let level = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let settings = natal_config::load_settings(args.config.as_deref())?;

    let name = args.name.trim();
    if name.is_empty() {
        bail!("name must not be empty");
    }
    let date = NaiveDate::parse_from_str(args.date.trim(), "%Y-%m-%d")
        .with_context(|| format!("invalid date '{}', expected YYYY-MM-DD", args.date))?;
    let time = parse_time(args.time.trim())?;
    let birth = BirthData {
        name: name.to_string(),
        date,
        time,
    };

    let geocoder = NominatimGeocoder::new(
        &settings.geocoder_url,
        &settings.user_agent,
        Duration::from_secs(settings.timeout_secs),
    )?;
    let query = LocationQuery {
        place: args.place.as_deref(),
        lat: args.lat.as_deref(),
        lon: args.lon.as_deref(),
    };
    let place = resolve_location(query, &geocoder)
        .await
        .context("could not determine the birth location")?;
    log::info!("birth place: {} ({:.4}, {:.4})", place.display_name, place.location.lat, place.location.lon);

    let timezone = resolve_timezone(&args, &settings, &place.location)?;
    let utc = to_utc(&birth, &timezone)?;
    log::info!("local {} in {} is {utc}", birth.local_datetime(), timezone.name);

    let mut provider = open_provider(&args, &settings)?;
    let snapshot = provider
        .positions_and_cusps(utc, &place.location)
        .context("ephemeris lookup failed")?;

    let outcome = ChartBuilder::new().build_from_readings(&snapshot.readings_with_angles(), &snapshot.cusps);
    let context = ReportContext {
        birth: &birth,
        place: &place,
        timezone: &timezone,
        utc,
    };
    let report = ChartReport::new(&context, &outcome);

    let format = match args.format {
        Some(FormatArg::Text) => ReportFormat::Text,
        Some(FormatArg::Json) => ReportFormat::Json,
        None => settings.format,
    };
    match format {
        ReportFormat::Text => println!("{report}"),
        ReportFormat::Json => println!("{}", report.to_json()?),
    }
    Ok(())
}
