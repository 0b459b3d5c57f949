use natal::ephemeris::{house_system_byte, Body, EphemerisSettings};
use natal::location::parse_utc_offset;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Resolved settings for a chart run.
#[derive(Debug, Clone)]
pub struct NatalSettings {
    pub ephemeris_path: Option<PathBuf>,
    pub ephemeris: EphemerisSettings,
    pub default_utc_offset: Option<String>,
    pub geocoder_url: String,
    pub user_agent: String,
    pub timeout_secs: u64,
    pub format: ReportFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Deserialize)]
struct EphemerisToml {
    #[serde(default)]
    path: Option<PathBuf>,
    #[serde(default = "default_house_system")]
    house_system: String,
    #[serde(default)]
    include_objects: Option<Vec<String>>,
}

#[derive(Debug, Clone, Deserialize)]
struct LocationToml {
    #[serde(default)]
    default_utc_offset: Option<String>,
    #[serde(default = "default_geocoder_url")]
    geocoder_url: String,
    #[serde(default = "default_user_agent")]
    user_agent: String,
    #[serde(default = "default_timeout_secs")]
    timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
struct ReportToml {
    #[serde(default = "default_format")]
    format: ReportFormat,
}

fn default_house_system() -> String {
    "placidus".to_string()
}

fn default_geocoder_url() -> String {
    "https://nominatim.openstreetmap.org/search".to_string()
}

fn default_user_agent() -> String {
    "natal-chart-cli".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_format() -> ReportFormat {
    ReportFormat::Text
}

impl Default for EphemerisToml {
    fn default() -> Self {
        Self {
            path: None,
            house_system: default_house_system(),
            include_objects: None,
        }
    }
}

impl Default for LocationToml {
    fn default() -> Self {
        Self {
            default_utc_offset: None,
            geocoder_url: default_geocoder_url(),
            user_agent: default_user_agent(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for ReportToml {
    fn default() -> Self {
        Self { format: default_format() }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
struct RootConfigToml {
    #[serde(default)]
    ephemeris: EphemerisToml,
    #[serde(default)]
    location: LocationToml,
    #[serde(default)]
    report: ReportToml,
}

impl Default for NatalSettings {
    fn default() -> Self {
        let location = LocationToml::default();
        Self {
            ephemeris_path: None,
            ephemeris: EphemerisSettings::default(),
            default_utc_offset: location.default_utc_offset,
            geocoder_url: location.geocoder_url,
            user_agent: location.user_agent,
            timeout_secs: location.timeout_secs,
            format: default_format(),
        }
    }
}

/// Try common relative paths for `configs/natal.toml`; `None` when absent.
pub fn read_config_text(explicit: Option<&Path>) -> anyhow::Result<Option<String>> {
    if let Some(path) = explicit {
        let text = fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Could not read config {}: {e}", path.display()))?;
        return Ok(Some(text));
    }
    let paths = ["configs/natal.toml", "../../configs/natal.toml"];
    for p in &paths {
        if let Ok(c) = fs::read_to_string(p) {
            log::debug!("using config {p}");
            return Ok(Some(c));
        }
    }
    Ok(None)
}

pub fn parse_settings(text: &str) -> anyhow::Result<NatalSettings> {
    let root: RootConfigToml =
        toml::from_str(text).map_err(|e| anyhow::anyhow!("Failed to parse natal.toml: {e}"))?;
    from_root(root)
}

/// Load settings from `explicit`, the default locations, or built-in defaults.
pub fn load_settings(explicit: Option<&Path>) -> anyhow::Result<NatalSettings> {
    match read_config_text(explicit)? {
        Some(text) => parse_settings(&text),
        None => Ok(NatalSettings::default()),
    }
}

fn from_root(root: RootConfigToml) -> anyhow::Result<NatalSettings> {
    let RootConfigToml {
        ephemeris,
        location,
        report,
    } = root;

    house_system_byte(&ephemeris.house_system).map_err(|e| anyhow::anyhow!("ephemeris.house_system: {e}"))?;

    let include_objects = match ephemeris.include_objects {
        Some(ids) => ids
            .iter()
            .map(|id| id.parse::<Body>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| anyhow::anyhow!("ephemeris.include_objects: {e}"))?,
        None => Body::PLANETS.to_vec(),
    };
    if include_objects.is_empty() {
        anyhow::bail!("ephemeris.include_objects must name at least one body");
    }

    if let Some(offset) = &location.default_utc_offset {
        parse_utc_offset(offset).map_err(|e| anyhow::anyhow!("location.default_utc_offset: {e}"))?;
    }
    if location.timeout_secs == 0 {
        anyhow::bail!("location.timeout_secs must be greater than zero");
    }

    Ok(NatalSettings {
        ephemeris_path: ephemeris.path,
        ephemeris: EphemerisSettings {
            house_system: ephemeris.house_system.to_lowercase(),
            include_objects,
        },
        default_utc_offset: location.default_utc_offset,
        geocoder_url: location.geocoder_url,
        user_agent: location.user_agent,
        timeout_secs: location.timeout_secs,
        format: report.format,
    })
}
