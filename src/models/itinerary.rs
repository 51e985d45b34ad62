//! Itinerary, tour and destination records as served by the backend.
//!
//! Field names follow the backend's JSON through `serde(rename)`; the Rust
//! side uses English names.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::{deserialize_flag, deserialize_nullable_string};

/// Scheduling status of an itinerary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItineraryStatus {
    #[serde(rename = "agendado")]
    Scheduled,
    #[serde(rename = "confirmado")]
    Confirmed,
    #[serde(rename = "concluido")]
    Completed,
    #[serde(rename = "cancelado")]
    Cancelled,
}

impl ItineraryStatus {
    pub const ALL: [ItineraryStatus; 4] = [
        ItineraryStatus::Scheduled,
        ItineraryStatus::Confirmed,
        ItineraryStatus::Completed,
        ItineraryStatus::Cancelled,
    ];

    /// Value used on the wire and in query strings.
    pub fn as_str(&self) -> &'static str {
        match self {
            ItineraryStatus::Scheduled => "agendado",
            ItineraryStatus::Confirmed => "confirmado",
            ItineraryStatus::Completed => "concluido",
            ItineraryStatus::Cancelled => "cancelado",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ItineraryStatus::Scheduled => "scheduled",
            ItineraryStatus::Confirmed => "confirmed",
            ItineraryStatus::Completed => "completed",
            ItineraryStatus::Cancelled => "cancelled",
        }
    }

    /// Step through "any status" followed by each status in order.
    pub fn cycle(current: Option<ItineraryStatus>) -> Option<ItineraryStatus> {
        match current {
            None => Some(ItineraryStatus::Scheduled),
            Some(ItineraryStatus::Scheduled) => Some(ItineraryStatus::Confirmed),
            Some(ItineraryStatus::Confirmed) => Some(ItineraryStatus::Completed),
            Some(ItineraryStatus::Completed) => Some(ItineraryStatus::Cancelled),
            Some(ItineraryStatus::Cancelled) => None,
        }
    }
}

impl fmt::Display for ItineraryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ItineraryStatus {
    type Err = String;

    /// Accepts both the wire value and the English label.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_lowercase();
        ItineraryStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s || status.label() == s)
            .ok_or_else(|| format!("unknown itinerary status '{}'", s))
    }
}

/// Tour difficulty level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    #[serde(rename = "facil")]
    Easy,
    #[serde(rename = "moderado")]
    Moderate,
    #[serde(rename = "dificil")]
    Hard,
}

/// A scheduled run of a tour.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Itinerary {
    pub id: u64,
    #[serde(rename = "passeio_id")]
    pub tour_id: u64,
    #[serde(rename = "data", default, deserialize_with = "deserialize_nullable_string")]
    pub date: String,
    #[serde(rename = "hora_inicio", default, deserialize_with = "deserialize_nullable_string")]
    pub start_time: String,
    #[serde(rename = "hora_fim", default, deserialize_with = "deserialize_nullable_string")]
    pub end_time: String,
    pub status: ItineraryStatus,
    #[serde(rename = "vagas_disponiveis", default)]
    pub available_slots: u32,
    #[serde(rename = "passeio_nome", default, skip_serializing_if = "Option::is_none")]
    pub tour_name: Option<String>,
    #[serde(rename = "passeio_descricao", default, skip_serializing_if = "Option::is_none")]
    pub tour_description: Option<String>,
}

impl Itinerary {
    /// Calendar part of the date, ignoring any time suffix the backend adds.
    pub fn day(&self) -> &str {
        self.date.split('T').next().unwrap_or(&self.date)
    }
}

/// A guided tour offered at a destination.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Tour {
    pub id: u64,
    #[serde(rename = "nome", default, deserialize_with = "deserialize_nullable_string")]
    pub name: String,
    #[serde(rename = "descricao", default, deserialize_with = "deserialize_nullable_string")]
    pub description: String,
    #[serde(rename = "preco", default, deserialize_with = "deserialize_nullable_string")]
    pub price: String,
    #[serde(rename = "duracao_horas", default)]
    pub duration_hours: f64,
    #[serde(rename = "nivel_dificuldade", default)]
    pub difficulty: Option<Difficulty>,
    #[serde(rename = "inclui_refeicao", default, deserialize_with = "deserialize_flag")]
    pub includes_meal: bool,
    #[serde(rename = "inclui_transporte", default, deserialize_with = "deserialize_flag")]
    pub includes_transport: bool,
    #[serde(rename = "destino_id", default)]
    pub destination_id: u64,
    #[serde(rename = "capacidade_maxima", default)]
    pub max_capacity: u32,
    #[serde(rename = "destino_nome", default, deserialize_with = "deserialize_nullable_string")]
    pub destination_name: String,
    #[serde(rename = "cidade", default, deserialize_with = "deserialize_nullable_string")]
    pub city: String,
    #[serde(rename = "estado", default, deserialize_with = "deserialize_nullable_string")]
    pub state: String,
    #[serde(rename = "criador_nome", default, deserialize_with = "deserialize_nullable_string")]
    pub creator_name: String,
    #[serde(rename = "criador_eh_guia", default, deserialize_with = "deserialize_flag")]
    pub creator_is_guide: bool,
}

/// A travel destination.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Destination {
    pub id: u64,
    #[serde(rename = "nome", default, deserialize_with = "deserialize_nullable_string")]
    pub name: String,
    #[serde(rename = "estado", default, deserialize_with = "deserialize_nullable_string")]
    pub state: String,
    #[serde(rename = "cidade", default, deserialize_with = "deserialize_nullable_string")]
    pub city: String,
    #[serde(rename = "descricao", default)]
    pub description: Option<String>,
    #[serde(default)]
    pub latitude: Option<String>,
    #[serde(default)]
    pub longitude: Option<String>,
}

/// An itinerary joined with the tour it runs, when the lookup succeeded.
#[derive(Debug, Clone, PartialEq)]
pub struct ItineraryWithTour {
    pub itinerary: Itinerary,
    pub tour: Option<Tour>,
}

impl ItineraryWithTour {
    pub fn new(itinerary: Itinerary, tour: Option<Tour>) -> Self {
        Self { itinerary, tour }
    }

    /// Best available display name.
    pub fn title(&self) -> String {
        if let Some(name) = self.itinerary.tour_name.as_deref().filter(|n| !n.is_empty()) {
            return name.to_string();
        }
        match &self.tour {
            Some(tour) if !tour.name.is_empty() => tour.name.clone(),
            _ => format!("Itinerary #{}", self.itinerary.id),
        }
    }

    /// "City, State" of the tour, if known.
    pub fn location(&self) -> Option<String> {
        let tour = self.tour.as_ref()?;
        match (tour.city.is_empty(), tour.state.is_empty()) {
            (false, false) => Some(format!("{}, {}", tour.city, tour.state)),
            (false, true) => Some(tour.city.clone()),
            (true, false) => Some(tour.state.clone()),
            (true, true) => None,
        }
    }
}

/// A review left on an itinerary.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Review {
    #[serde(rename = "nota", default, deserialize_with = "deserialize_nullable_string")]
    pub rating: String,
    #[serde(rename = "comentario", default, deserialize_with = "deserialize_nullable_string")]
    pub comment: String,
    #[serde(default, deserialize_with = "deserialize_nullable_string")]
    pub created_at: String,
    #[serde(rename = "avaliador_nome", default, deserialize_with = "deserialize_nullable_string")]
    pub reviewer_name: String,
}

/// Full itinerary record returned by `GET /roteiros/{id}`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ItineraryDetail {
    #[serde(flatten)]
    pub itinerary: Itinerary,
    #[serde(rename = "destino_descricao", default, deserialize_with = "deserialize_nullable_string")]
    pub destination_description: String,
    #[serde(rename = "avaliacao_media", default)]
    pub average_rating: Option<String>,
    #[serde(rename = "total_avaliacoes", default)]
    pub review_count: u32,
    #[serde(rename = "avaliacoes", default)]
    pub reviews: Vec<Review>,
    #[serde(rename = "preco", default, deserialize_with = "deserialize_nullable_string")]
    pub price: String,
    #[serde(rename = "inclui_refeicao", default, deserialize_with = "deserialize_flag")]
    pub includes_meal: bool,
    #[serde(rename = "inclui_transporte", default, deserialize_with = "deserialize_flag")]
    pub includes_transport: bool,
}

impl ItineraryDetail {
    /// Average rating as a number; the backend sends it as a decimal string.
    pub fn average_rating_value(&self) -> Option<f32> {
        self.average_rating.as_deref()?.trim().parse().ok()
    }
}

/// Envelope of `GET /roteiros/{id}`.
#[derive(Debug, Clone, Deserialize)]
pub struct ItineraryDetailResponse {
    #[serde(rename = "roteiro")]
    pub itinerary: ItineraryDetail,
}
