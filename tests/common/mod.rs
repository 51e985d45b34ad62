//! Common test utilities for integration tests.
//!
//! Fixtures for backend JSON payloads and small helpers for driving the list
//! controller deterministically.

#![allow(dead_code)]

use std::sync::Arc;

use voyage::adapters::mock::ScriptedPageSource;
use voyage::list::{IncrementalListController, PageOutcome, SharedPageSource};
use voyage::models::FetchResult;

/// Test token sent as `Authorization: Bearer`.
pub fn test_token() -> String {
    "test-auth-token".to_string()
}

/// One itinerary as the backend serializes it.
pub fn itinerary_json(id: u64, tour_id: u64) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "passeio_id": tour_id,
        "data": "2025-03-10T00:00:00.000Z",
        "hora_inicio": "08:00",
        "hora_fim": "12:00",
        "status": "agendado",
        "vagas_disponiveis": 8
    })
}

/// A `GET /roteiros` body.
pub fn itinerary_page_json(ids: &[u64], has_next: bool) -> serde_json::Value {
    let items: Vec<_> = ids.iter().map(|id| itinerary_json(*id, id * 10)).collect();
    serde_json::json!({
        "success": true,
        "roteiros": items,
        "pagination": {
            "total": 100,
            "totalPages": 10,
            "currentPage": 1,
            "limit": 10,
            "hasNext": has_next,
            "hasPrevious": false
        }
    })
}

/// A `GET /passeios` body with a single tour.
pub fn tour_page_json(id: u64, name: &str) -> serde_json::Value {
    serde_json::json!({
        "success": true,
        "passeios": [{
            "id": id,
            "nome": name,
            "preco": "150.00",
            "duracao_horas": 4,
            "nivel_dificuldade": "moderado",
            "inclui_refeicao": 1,
            "inclui_transporte": 0,
            "cidade": "Ubatuba",
            "estado": "SP"
        }],
        "pagination": {"hasNext": false}
    })
}

/// Wrap a scripted source for the controller.
pub fn shared<T>(source: &ScriptedPageSource<T>) -> SharedPageSource<T>
where
    T: Clone + Send + Sync + 'static,
{
    Arc::new(source.clone())
}

/// Source answering `pages[i]` for page `i + 1`, the last page ending the list.
pub fn paged<T>(pages: Vec<Vec<T>>) -> ScriptedPageSource<T>
where
    T: Clone + Send + Sync + 'static,
{
    let count = pages.len();
    pages
        .into_iter()
        .enumerate()
        .fold(ScriptedPageSource::new(), |source, (i, items)| {
            source.with_page(i as u32 + 1, FetchResult::new(items, i + 1 < count))
        })
}

/// Controller whose outcome receiver has been handed to the test.
pub fn controller_with_rx<T>() -> (
    IncrementalListController<T>,
    tokio::sync::mpsc::UnboundedReceiver<PageOutcome<T>>,
)
where
    T: Send + 'static,
{
    let mut list = IncrementalListController::new();
    let rx = list
        .take_outcome_rx()
        .expect("fresh controller owns its receiver");
    (list, rx)
}
