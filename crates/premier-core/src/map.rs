//! # Interactive Map
//!
//! Location pins that drop in one after another once the map scrolls into
//! view, and a single detail card for the selected pin.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use ts_rs::TS;

use crate::locale::LocaleTheme;
use crate::reveal::{RevealScheduler, RevealTiming, RevealView};
use crate::timeline::Scheduled;
use crate::types::{Category, Location, LocationKind};

/// Catalog category that "Book Experience" on a pin of this kind opens.
pub const fn bookable_category(kind: LocationKind) -> Category {
    match kind {
        LocationKind::Hotel => Category::Accommodation,
        LocationKind::Airport => Category::Travel,
        LocationKind::CarRental => Category::Transport,
        LocationKind::Nightlife => Category::Entertainment,
    }
}

#[derive(Debug)]
pub struct LocationMap {
    locations: Vec<Location>,
    pins: RevealScheduler,
    selected: Option<u32>,
}

impl LocationMap {
    pub fn new(locations: Vec<Location>, timing: RevealTiming) -> Self {
        LocationMap {
            pins: RevealScheduler::new(locations.len(), timing),
            locations,
            selected: None,
        }
    }

    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    pub fn on_visibility(&mut self, visible: bool) -> bool {
        self.pins.on_visibility(visible)
    }

    pub fn pins(&self) -> &RevealScheduler {
        &self.pins
    }

    /// Opens the detail card. Unknown ids are ignored.
    pub fn select(&mut self, location_id: u32) -> bool {
        if !self.locations.iter().any(|l| l.id == location_id) {
            debug!(location_id, "Ignoring unknown map location");
            return false;
        }
        self.selected = Some(location_id);
        true
    }

    /// Closes the detail card. Returns whether one was open.
    pub fn clear_selection(&mut self) -> bool {
        self.selected.take().is_some()
    }

    pub fn selected(&self) -> Option<&Location> {
        let id = self.selected?;
        self.locations.iter().find(|l| l.id == id)
    }

    /// "Book Experience": closes the card and hands back its location.
    pub fn book_selected(&mut self) -> Option<Location> {
        let location = self.selected()?.clone();
        self.selected = None;
        info!(location = %location.name, "Booking requested from map");
        Some(location)
    }

    pub fn view(&self, locale: &LocaleTheme) -> MapView {
        MapView {
            pins: self
                .locations
                .iter()
                .enumerate()
                .map(|(index, l)| PinView {
                    id: l.id,
                    name: l.name.clone(),
                    kind: l.kind,
                    x: l.x,
                    y: l.y,
                    revealed: self.pins.is_revealed(index),
                    selected: self.selected == Some(l.id),
                })
                .collect(),
            reveal: self.pins.view(),
            detail: self.selected().map(|l| LocationDetail {
                id: l.id,
                name: l.name.clone(),
                description: locale.text(&l.description).to_string(),
                kind: l.kind,
                services: l.services.clone(),
                image: l.image.clone(),
            }),
        }
    }
}

impl Scheduled for LocationMap {
    fn advance(&mut self, by: Duration) {
        self.pins.advance(by);
    }

    fn time_until_next(&self) -> Option<Duration> {
        self.pins.time_until_next()
    }

    fn dispose(&mut self) {
        self.pins.dispose();
    }

    fn is_disposed(&self) -> bool {
        self.pins.is_disposed()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct MapView {
    pub pins: Vec<PinView>,
    pub reveal: RevealView,
    pub detail: Option<LocationDetail>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PinView {
    pub id: u32,
    pub name: String,
    pub kind: LocationKind,
    pub x: u8,
    pub y: u8,
    pub revealed: bool,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct LocationDetail {
    pub id: u32,
    pub name: String,
    pub description: String,
    pub kind: LocationKind,
    pub services: Vec<String>,
    pub image: String,
}
