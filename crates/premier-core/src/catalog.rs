//! # Filterable Catalog
//!
//! Service cards filtered by category, each with a booking counter that
//! counts up to its target once the section has been seen.
//!
//! ## Counter Animation
//! ```text
//!   step = ceil(target / 50)
//!
//!   tick:   0 ──► step ──► 2·step ──► ... ──► min(k·step, target) = target
//!           └───────────── at most 50 ticks ──────────────┘
//! ```
//!
//! A counter starts the first time its card is displayed while the section
//! is visible. It never restarts, and keeps running to its target when a
//! later filter change hides the card.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::locale::LocaleTheme;
use crate::money::group_thousands;
use crate::timeline::{Scheduled, Timeline};
use crate::types::{Category, CategoryFilter, Offer, PriceUnit, Service};
use crate::COUNTER_STEPS;

// =============================================================================
// Animated Counter
// =============================================================================

/// Monotonic counter converging on a fixed target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimatedCounter {
    target: u64,
    value: u64,
    step: u64,
    started: bool,
}

impl AnimatedCounter {
    pub fn new(target: u64) -> Self {
        AnimatedCounter {
            target,
            value: 0,
            step: target.div_ceil(COUNTER_STEPS).max(1),
            started: false,
        }
    }

    pub fn target(&self) -> u64 {
        self.target
    }

    pub fn value(&self) -> u64 {
        self.value
    }

    pub fn step(&self) -> u64 {
        self.step
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn is_settled(&self) -> bool {
        self.value == self.target
    }

    /// Marks the counter as running. Returns whether it needs ticks.
    fn start(&mut self) -> bool {
        self.started = true;
        !self.is_settled()
    }

    /// One animation step. Returns whether more ticks are needed.
    pub fn tick(&mut self) -> bool {
        self.value = self.value.saturating_add(self.step).min(self.target);
        !self.is_settled()
    }
}

// =============================================================================
// Catalog
// =============================================================================

#[derive(Debug)]
struct Entry {
    service: Service,
    counter: AnimatedCounter,
}

/// Filterable service catalog. See the module docs.
#[derive(Debug)]
pub struct Catalog {
    entries: Vec<Entry>,
    filter: CategoryFilter,
    visible: bool,
    tick_interval: Duration,
    /// Events carry the entry index.
    timeline: Timeline<usize>,
}

impl Catalog {
    /// ## Errors
    /// [`CoreError::ZeroInterval`] for a zero counter tick.
    pub fn new(services: Vec<Service>, tick_interval: Duration) -> CoreResult<Self> {
        if tick_interval.is_zero() {
            return Err(CoreError::ZeroInterval { what: "counter tick" });
        }

        let entries = services
            .into_iter()
            .map(|service| Entry {
                counter: AnimatedCounter::new(service.stats.bookings),
                service,
            })
            .collect();

        Ok(Catalog {
            entries,
            filter: CategoryFilter::All,
            visible: false,
            tick_interval,
            timeline: Timeline::new(),
        })
    }

    pub fn filter(&self) -> CategoryFilter {
        self.filter
    }

    /// Replaces the active filter. Items never change, only the projection.
    pub fn set_filter(&mut self, filter: CategoryFilter) {
        if self.filter != filter {
            debug!(?filter, "Catalog filter changed");
        }
        self.filter = filter;
        self.start_displayed_counters();
    }

    /// Every service, in catalog order.
    pub fn services(&self) -> impl Iterator<Item = &Service> {
        self.entries.iter().map(|e| &e.service)
    }

    /// Services passing the active filter, in catalog order.
    pub fn displayed(&self) -> Vec<&Service> {
        self.entries
            .iter()
            .filter(|e| self.filter.matches(e.service.category))
            .map(|e| &e.service)
            .collect()
    }

    /// Feeds the viewport signal. Only the first `true` does anything.
    pub fn on_visibility(&mut self, visible: bool) -> bool {
        if !visible || self.visible || self.timeline.is_disposed() {
            return false;
        }
        self.visible = true;
        self.start_displayed_counters();
        true
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Current counter value of a service.
    pub fn counter(&self, service_id: u32) -> Option<AnimatedCounter> {
        self.entries
            .iter()
            .find(|e| e.service.id == service_id)
            .map(|e| e.counter)
    }

    /// Looks up a service as a bookable offer.
    pub fn select(&self, service_id: u32) -> Option<Offer> {
        self.entries
            .iter()
            .find(|e| e.service.id == service_id)
            .map(|e| Offer::Service(e.service.clone()))
    }

    /// First service of a category, in catalog order.
    pub fn first_in(&self, category: Category) -> Option<&Service> {
        self.services().find(|s| s.category == category)
    }

    fn start_displayed_counters(&mut self) {
        if !self.visible || self.timeline.is_disposed() {
            return;
        }
        for (index, entry) in self.entries.iter_mut().enumerate() {
            if entry.counter.is_started() || !self.filter.matches(entry.service.category) {
                continue;
            }
            if entry.counter.start() {
                self.timeline.schedule_in(self.tick_interval, index);
            }
            debug!(service = entry.service.id, target = entry.counter.target(), "Counter started");
        }
    }

    pub fn view(&self, locale: &LocaleTheme) -> CatalogView {
        CatalogView {
            filter: self.filter,
            items: self
                .entries
                .iter()
                .filter(|e| self.filter.matches(e.service.category))
                .map(|e| ServiceCard::build(&e.service, &e.counter, locale))
                .collect(),
        }
    }
}

impl Scheduled for Catalog {
    fn advance(&mut self, by: Duration) {
        if self.timeline.is_disposed() {
            return;
        }
        let until = self.timeline.horizon(by);
        while let Some((_, index)) = self.timeline.pop_due(until) {
            let Some(entry) = self.entries.get_mut(index) else {
                continue;
            };
            if entry.counter.tick() {
                self.timeline.schedule_in(self.tick_interval, index);
            }
        }
        self.timeline.settle(until);
    }

    fn time_until_next(&self) -> Option<Duration> {
        self.timeline.time_until_next()
    }

    fn dispose(&mut self) {
        self.timeline.dispose();
    }

    fn is_disposed(&self) -> bool {
        self.timeline.is_disposed()
    }
}

// =============================================================================
// Views
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CatalogView {
    pub filter: CategoryFilter,
    pub items: Vec<ServiceCard>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ServiceCard {
    pub id: u32,
    pub category: Category,
    pub title: String,
    pub description: String,
    /// "From $150/day"
    pub price: String,
    pub price_unit: PriceUnit,
    #[ts(type = "number")]
    pub bookings: u64,
    /// Counter value with thousands separators.
    pub bookings_label: String,
    /// "4.9"
    pub rating: String,
    pub image: String,
}

impl ServiceCard {
    fn build(service: &Service, counter: &AnimatedCounter, locale: &LocaleTheme) -> Self {
        let from = match locale.language {
            crate::types::Language::En => "From",
            crate::types::Language::Ar => "من",
        };
        ServiceCard {
            id: service.id,
            category: service.category,
            title: locale.text(&service.title).to_string(),
            description: locale.text(&service.description).to_string(),
            price: format!(
                "{from} {}{}",
                service.price_from.format_whole(),
                service.price_unit.suffix()
            ),
            price_unit: service.price_unit,
            bookings: counter.value(),
            bookings_label: group_thousands(counter.value()),
            rating: format_rating(service.stats.rating_tenths),
            image: service.image.clone(),
        }
    }
}

/// 49 → "4.9"
pub fn format_rating(tenths: u8) -> String {
    format!("{}.{}", tenths / 10, tenths % 10)
}
