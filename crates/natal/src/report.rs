//! Human-readable and JSON renderings of a built chart.

use crate::birth::{first_name, BirthData};
use crate::chart::{ChartOutcome, ChartPosition, SkippedBody};
use crate::ephemeris::Body;
use crate::location::{format_offset, GeoPlace, TimezoneInfo};
use crate::western::{activities_for, description_of, Element, Modality, Sign};
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Where and when the chart was cast.
#[derive(Debug, Clone, Copy)]
pub struct ReportContext<'a> {
    pub birth: &'a BirthData,
    pub place: &'a GeoPlace,
    pub timezone: &'a TimezoneInfo,
    pub utc: DateTime<Utc>,
}

/// Owned, serializable chart report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartReport {
    pub name: String,
    pub place: GeoPlace,
    pub timezone: TimezoneInfo,
    pub local: NaiveDateTime,
    pub utc: DateTime<Utc>,
    pub positions: Vec<ChartPosition>,
    pub skipped: Vec<SkippedBody>,
    pub element_balance: BTreeMap<Element, usize>,
    pub modality_balance: BTreeMap<Modality, usize>,
    pub stelliums: Vec<(Sign, usize)>,
}

impl ChartReport {
    pub fn new(context: &ReportContext<'_>, outcome: &ChartOutcome) -> Self {
        Self {
            name: context.birth.name.clone(),
            place: context.place.clone(),
            timezone: context.timezone.clone(),
            local: context.birth.local_datetime(),
            utc: context.utc,
            positions: outcome.positions.clone(),
            skipped: outcome.skipped.clone(),
            element_balance: outcome.element_balance(),
            modality_balance: outcome.modality_balance(),
            stelliums: outcome.stelliums(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    fn position(&self, body: Body) -> Option<&ChartPosition> {
        self.positions.iter().find(|p| p.body() == body)
    }

    fn timezone_label(&self) -> String {
        let offset = format_offset(self.timezone.zone.offset_at(self.utc));
        if self.timezone.name == offset {
            offset
        } else {
            format!("{} ({})", self.timezone.name, offset)
        }
    }
}

fn sign_label(position: Option<&ChartPosition>) -> String {
    position
        .map(|p| p.sign().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

impl fmt::Display for ChartReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sun = self.position(Body::Sun);
        let moon = self.position(Body::Moon);
        let asc = self.position(Body::Ascendant);

        writeln!(f, "Hello {}", first_name(&self.name))?;
        writeln!(f, "Based on the details given, you are:")?;
        writeln!(
            f,
            "  Sun sign: {} | Ascendant: {} | Moon: {}",
            sign_label(sun),
            sign_label(asc),
            sign_label(moon)
        )?;

        writeln!(f)?;
        writeln!(f, "Technical details")?;
        writeln!(f, "  Resolved place: {}", self.place.display_name)?;
        writeln!(
            f,
            "  Coordinates: {:.5}, {:.5}",
            self.place.location.lat, self.place.location.lon
        )?;
        writeln!(f, "  Timezone: {}", self.timezone_label())?;
        writeln!(f, "  Local date/time: {}", self.local.format("%Y-%m-%d %H:%M:%S"))?;
        writeln!(f, "  UTC date/time: {}", self.utc.format("%Y-%m-%d %H:%M:%S"))?;
        for position in [sun, moon, asc].into_iter().flatten() {
            writeln!(
                f,
                "  {}: {:.4}° ({} {:.2}°)",
                position.body(),
                position.longitude(),
                position.sign(),
                position.degree_in_sign()
            )?;
        }

        writeln!(f)?;
        writeln!(f, "Positions")?;
        writeln!(
            f,
            "  {:<11} {:<12} {:>9} {:>5}  {:<6} {:<9} {}",
            "Body", "Sign", "Degree", "House", "Elem.", "Modality", "Ruler"
        )?;
        for position in &self.positions {
            let (d, m, _) = position.sign_position().dms();
            writeln!(
                f,
                "  {:<11} {:<12} {:>5}°{:02}' {:>5}  {:<6} {:<9} {}",
                position.body().name(),
                position.sign().name(),
                d,
                m,
                position.house().to_string(),
                position.element().name(),
                position.modality().name(),
                position.ruler()
            )?;
        }

        if let Some(sun) = sun {
            writeln!(f)?;
            writeln!(f, "Solar traits")?;
            writeln!(f, "  Element: {}", sun.element())?;
            writeln!(f, "  Modality: {}", sun.modality())?;
            writeln!(f, "  Ruling planet: {}", sun.ruler())?;
        }

        writeln!(f)?;
        writeln!(f, "Character")?;
        let roles = [
            (sun, "Sun", ""),
            (asc, "Ascendant", " (social mask, first impression)"),
            (moon, "Moon", " (emotional reactions and inner needs)"),
        ];
        for (position, label, role) in roles {
            if let Some(position) = position {
                writeln!(
                    f,
                    "  {} in {}: {}{}",
                    label,
                    position.sign(),
                    description_of(position.sign()),
                    role
                )?;
            }
        }

        writeln!(f)?;
        writeln!(f, "Synthesis")?;
        if let Some(sun) = sun {
            writeln!(
                f,
                "  With the Sun in {} you carry the energy and direction typical of that sign.",
                sun.sign()
            )?;
        }
        if let Some(asc) = asc {
            writeln!(
                f,
                "  The Ascendant in {} describes how you present yourself to the world and can soften or reshape the solar impression.",
                asc.sign()
            )?;
        }
        if let Some(moon) = moon {
            writeln!(
                f,
                "  The Moon in {} guides your emotional needs and automatic reactions.",
                moon.sign()
            )?;
        }

        writeln!(f)?;
        writeln!(f, "Possible scenarios")?;
        writeln!(f, "  Work: take what the Sun values as your professional compass; the Ascendant shows how you sell yourself, the Moon the setting where you feel at ease.")?;
        writeln!(f, "  Relationships: the Moon describes emotional intimacy; the Ascendant and the planets in the relationship houses colour your style of love.")?;
        writeln!(f, "  Typical challenges: friction between desire (Sun) and emotional security (Moon), or between social image (Ascendant) and inner needs (Moon).")?;

        writeln!(f)?;
        writeln!(f, "Practical advice")?;
        if let Some(sun) = sun {
            writeln!(
                f,
                "  Use your solar element ({}) to pick activities that recharge you: {}.",
                sun.element(),
                activities_for(sun.element())
            )?;
        }
        writeln!(f, "  When you feel tension, notice whether you are acting for your image (Ascendant) or for an emotional need (Moon).")?;
        writeln!(f, "  Look after sleep and daily routines: the Moon is very sensitive to everyday rhythms.")?;

        writeln!(f)?;
        writeln!(f, "Balance")?;
        let elements: Vec<String> = self
            .element_balance
            .iter()
            .map(|(element, count)| format!("{} {}", element, count))
            .collect();
        writeln!(f, "  Elements: {}", elements.join(", "))?;
        let modalities: Vec<String> = self
            .modality_balance
            .iter()
            .map(|(modality, count)| format!("{} {}", modality, count))
            .collect();
        writeln!(f, "  Modalities: {}", modalities.join(", "))?;
        for (sign, count) in &self.stelliums {
            writeln!(f, "  Stellium in {} ({} bodies)", sign, count)?;
        }

        if !self.skipped.is_empty() {
            writeln!(f)?;
            writeln!(f, "Skipped")?;
            for skipped in &self.skipped {
                writeln!(f, "  {}: {}", skipped.body, skipped.reason)?;
            }
        }

        writeln!(f)?;
        writeln!(
            f,
            "Analysis complete. This is a general summary: a full natal chart takes every house and planet into account."
        )
    }
}
