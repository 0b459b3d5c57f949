use async_trait::async_trait;
use natal::ephemeris::GeoLocation;
use natal::location::{GeoPlace, Geocoder, LocationError};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

/// One hit from the Nominatim search endpoint. Coordinates come back as strings.
#[derive(Debug, Deserialize)]
struct NominatimHit {
    lat: String,
    lon: String,
    display_name: String,
}

/// OpenStreetMap Nominatim lookup, first hit only.
pub struct NominatimGeocoder {
    client: Client,
    url: String,
}

impl NominatimGeocoder {
    pub fn new(url: &str, user_agent: &str, timeout: Duration) -> Result<Self, LocationError> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()
            .map_err(|e| LocationError::Geocoder { message: e.to_string() })?;
        Ok(Self {
            client,
            url: url.to_string(),
        })
    }
}

fn first_place(hits: Vec<NominatimHit>) -> Result<Option<GeoPlace>, LocationError> {
    let Some(hit) = hits.into_iter().next() else {
        return Ok(None);
    };
    let parse = |field: &str, value: &str| {
        value.trim().parse::<f64>().map_err(|_| LocationError::Geocoder {
            message: format!("bad {field} '{value}' in response"),
        })
    };
    Ok(Some(GeoPlace {
        location: GeoLocation {
            lat: parse("lat", &hit.lat)?,
            lon: parse("lon", &hit.lon)?,
        },
        display_name: hit.display_name,
    }))
}

#[async_trait]
impl Geocoder for NominatimGeocoder {
    async fn resolve(&self, place: &str) -> Result<Option<GeoPlace>, LocationError> {
        let transport = |e: reqwest::Error| LocationError::Geocoder { message: e.to_string() };

        let hits: Vec<NominatimHit> = self
            .client
            .get(&self.url)
            .query(&[("q", place), ("format", "json"), ("limit", "1")])
            .send()
            .await
            .map_err(transport)?
            .error_for_status()
            .map_err(transport)?
            .json()
            .await
            .map_err(transport)?;

        log::debug!("nominatim returned {} hit(s) for '{place}'", hits.len());
        first_place(hits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESPONSE: &str = r#"[
        {
            "place_id": 84127,
            "lat": "41.8933203",
            "lon": "12.4829321",
            "display_name": "Roma, Roma Capitale, Lazio, Italia",
            "importance": 0.86
        }
    ]"#;

    #[test]
    fn test_first_hit_is_used() {
        let hits: Vec<NominatimHit> = serde_json::from_str(RESPONSE).unwrap();
        let place = first_place(hits).unwrap().unwrap();
        assert!((place.location.lat - 41.8933203).abs() < 1e-9);
        assert!((place.location.lon - 12.4829321).abs() < 1e-9);
        assert_eq!(place.display_name, "Roma, Roma Capitale, Lazio, Italia");
    }

    #[test]
    fn test_empty_response_is_unknown_place() {
        assert!(first_place(Vec::new()).unwrap().is_none());
    }

    #[test]
    fn test_unparseable_coordinates() {
        let hits = vec![NominatimHit {
            lat: "north".to_string(),
            lon: "12.0".to_string(),
            display_name: "Nowhere".to_string(),
        }];
        assert!(matches!(first_place(hits), Err(LocationError::Geocoder { .. })));
    }
}
