//! One dashboard session: proxy client, view state and search history.
//!
//! A search fetches the (current, forecast) pair, applies it under a fresh
//! ticket and only then records the term in history. A failed or superseded
//! search changes neither the view nor the history.

use crate::client::{ClientError, ProxyClient};
use crate::dashboard::history::{HistoryStore, SearchHistory};
use crate::dashboard::view::ViewState;
use crate::models::Location;

#[derive(Debug)]
pub struct DashboardSession<S> {
    client: ProxyClient,
    view: ViewState,
    history: SearchHistory<S>,
}

impl<S: HistoryStore> DashboardSession<S> {
    pub fn new(client: ProxyClient, view: ViewState, history: SearchHistory<S>) -> Self {
        Self {
            client,
            view,
            history,
        }
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    /// For the unit and theme toggles.
    pub fn view_mut(&mut self) -> &mut ViewState {
        &mut self.view
    }

    pub fn history(&self) -> &SearchHistory<S> {
        &self.history
    }

    /// Fetch `location` and apply it. `Ok(false)` means a newer search took
    /// over before this one finished.
    pub async fn search(&mut self, location: &Location) -> Result<bool, ClientError> {
        let ticket = self.view.begin_search();
        let (current, forecast) = self.client.search(location).await?;

        if !self.view.apply(ticket, current, forecast) {
            return Ok(false);
        }

        // Coordinate searches are remembered by the city name upstream resolved.
        let term = match location {
            Location::City(city) => Some(city.clone()),
            Location::Coordinates { .. } => self
                .view
                .snapshot()
                .map(|s| s.current.name.trim().to_string())
                .filter(|name| !name.is_empty()),
        };
        if let Some(term) = term {
            if let Err(e) = self.history.push(&term) {
                tracing::warn!("Could not save search history: {}", e);
            }
        }
        Ok(true)
    }
}
