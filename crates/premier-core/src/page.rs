//! # Landing Page
//!
//! Root composition of every interactive component on the page.
//!
//! ## Ownership
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                            LandingPage                                  │
//! │                                                                         │
//! │   LocaleTheme ─────── (&) ──────► every view(...)                       │
//! │                                                                         │
//! │   LoadingGate   Carousel<Localized>   SearchForm   Catalog              │
//! │   Carousel<Testimonial>   LocationMap   Newsletter   BookingModal       │
//! │        │              │            │          │                         │
//! │        └──────────────┴─ advance(by) / dispose() fan out ─┘             │
//! │                                                                         │
//! │   select_service / select_package / book_location ──► BookingModal      │
//! │                                                                         │
//! │   outbox: OfferSelected · SearchSubmitted · BookingSubmitted ·          │
//! │           Subscribed                       ──► take_events() (shell)    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each component keeps its own clock. `advance` moves all of them by the
//! same amount, with no ordering guarantee between components.

use std::collections::{HashSet, VecDeque};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use ts_rs::TS;

use crate::booking::{BookingModal, BookingSubmission, BookingView};
use crate::carousel::Carousel;
use crate::catalog::{format_rating, Catalog, CatalogView};
use crate::content;
use crate::error::CoreResult;
use crate::form::{SearchForm, SearchFormView, SearchPayload};
use crate::locale::LocaleTheme;
use crate::map::{bookable_category, LocationMap, MapView};
use crate::newsletter::{Newsletter, NewsletterView};
use crate::reveal::RevealTiming;
use crate::timeline::{earliest, Scheduled, Timeline};
use crate::types::{
    Category, CategoryFilter, Language, Localized, Offer, OfferRef, Package, Section,
    TextDirection, Testimonial,
};
use crate::validation::ValidationResult;

// =============================================================================
// Timings
// =============================================================================

/// Every delay and interval on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageTimings {
    pub hero_interval: Duration,
    pub testimonial_interval: Duration,
    pub map_reveal: RevealTiming,
    pub counter_tick: Duration,
    pub search_latency: Duration,
    pub loading: Duration,
    pub newsletter_reset: Duration,
}

impl Default for PageTimings {
    fn default() -> Self {
        PageTimings {
            hero_interval: Duration::from_millis(3000),
            testimonial_interval: Duration::from_millis(5000),
            map_reveal: RevealTiming::from_millis(500, 300),
            counter_tick: Duration::from_millis(50),
            search_latency: Duration::from_millis(2000),
            loading: Duration::from_millis(2000),
            newsletter_reset: Duration::from_millis(3000),
        }
    }
}

// =============================================================================
// Loading Gate
// =============================================================================

/// Skeleton phase shown right after mount. Flips to ready once.
#[derive(Debug)]
pub struct LoadingGate {
    loading: bool,
    timeline: Timeline<()>,
}

impl LoadingGate {
    pub fn new(delay: Duration) -> Self {
        let mut timeline = Timeline::new();
        timeline.schedule_in(delay, ());
        LoadingGate {
            loading: true,
            timeline,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }
}

impl Scheduled for LoadingGate {
    fn advance(&mut self, by: Duration) {
        if self.timeline.is_disposed() {
            return;
        }
        let until = self.timeline.horizon(by);
        while self.timeline.pop_due(until).is_some() {
            self.loading = false;
            debug!("Page ready");
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
// Outgoing Events
// =============================================================================

/// What the page reports to its host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum PageEvent {
    /// An offer was opened in the booking modal.
    OfferSelected { offer: OfferRef },
    /// A simulated search completed.
    SearchSubmitted(SearchPayload),
    BookingSubmitted(BookingSubmission),
    Subscribed { email: String },
}

impl PageEvent {
    pub const fn name(&self) -> &'static str {
        match self {
            PageEvent::OfferSelected { .. } => "offer_selected",
            PageEvent::SearchSubmitted(_) => "search_submitted",
            PageEvent::BookingSubmitted(_) => "booking_submitted",
            PageEvent::Subscribed { .. } => "subscribed",
        }
    }
}

// =============================================================================
// Landing Page
// =============================================================================

#[derive(Debug)]
pub struct LandingPage {
    locale: LocaleTheme,
    loader: LoadingGate,
    hero: Carousel<Localized>,
    search: SearchForm,
    catalog: Catalog,
    packages: Vec<Package>,
    testimonials: Carousel<Testimonial>,
    testimonial_audio: bool,
    map: LocationMap,
    booking: BookingModal,
    newsletter: Newsletter,
    seen: HashSet<Section>,
    outbox: VecDeque<PageEvent>,
    disposed: bool,
}

impl LandingPage {
    /// Mounts the page with the built-in content.
    ///
    /// ## Errors
    /// A [`crate::CoreError`] when a timing is zero or the content is unusable.
    pub fn new(locale: LocaleTheme, timings: &PageTimings) -> CoreResult<Self> {
        Ok(LandingPage {
            locale,
            loader: LoadingGate::new(timings.loading),
            hero: Carousel::new("hero", content::taglines(), timings.hero_interval, true)?,
            search: SearchForm::new(content::search_schema(), timings.search_latency)?,
            catalog: Catalog::new(content::services(), timings.counter_tick)?,
            packages: content::packages(),
            testimonials: Carousel::new(
                "testimonials",
                content::testimonials(),
                timings.testimonial_interval,
                true,
            )?,
            testimonial_audio: false,
            map: LocationMap::new(content::locations(), timings.map_reveal),
            booking: BookingModal::new(),
            newsletter: Newsletter::new(timings.newsletter_reset)?,
            seen: HashSet::new(),
            outbox: VecDeque::new(),
            disposed: false,
        })
    }

    // -------------------------------------------------------------------------
    // Locale
    // -------------------------------------------------------------------------

    pub fn locale(&self) -> LocaleTheme {
        self.locale
    }

    pub fn set_language(&mut self, language: Language) {
        self.locale.set_language(language);
    }

    pub fn set_dark_mode(&mut self, dark_mode: bool) {
        self.locale.set_dark_mode(dark_mode);
    }

    pub fn toggle_dark_mode(&mut self) {
        self.locale.toggle_dark_mode();
    }

    // -------------------------------------------------------------------------
    // Components
    // -------------------------------------------------------------------------

    pub fn is_loading(&self) -> bool {
        self.loader.is_loading()
    }

    pub fn hero(&self) -> &Carousel<Localized> {
        &self.hero
    }

    pub fn testimonials(&self) -> &Carousel<Testimonial> {
        &self.testimonials
    }

    pub fn testimonials_mut(&mut self) -> &mut Carousel<Testimonial> {
        &mut self.testimonials
    }

    /// Whether the testimonial voice clip is playing. One flag is shared
    /// by every card and has no effect on autoplay.
    pub fn is_testimonial_audio_playing(&self) -> bool {
        self.testimonial_audio
    }

    /// Play/pause button of the voice clip. Returns the new state.
    pub fn toggle_testimonial_audio(&mut self) -> bool {
        if !self.disposed {
            self.testimonial_audio = !self.testimonial_audio;
            debug!(playing = self.testimonial_audio, "Testimonial audio toggled");
        }
        self.testimonial_audio
    }

    pub fn search(&self) -> &SearchForm {
        &self.search
    }

    pub fn search_mut(&mut self) -> &mut SearchForm {
        &mut self.search
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn set_filter(&mut self, filter: CategoryFilter) {
        self.catalog.set_filter(filter);
    }

    pub fn packages(&self) -> &[Package] {
        &self.packages
    }

    pub fn map(&self) -> &LocationMap {
        &self.map
    }

    pub fn map_mut(&mut self) -> &mut LocationMap {
        &mut self.map
    }

    pub fn booking(&self) -> &BookingModal {
        &self.booking
    }

    pub fn booking_mut(&mut self) -> &mut BookingModal {
        &mut self.booking
    }

    pub fn newsletter(&self) -> &Newsletter {
        &self.newsletter
    }

    pub fn newsletter_mut(&mut self) -> &mut Newsletter {
        &mut self.newsletter
    }

    /// Routes a viewport signal. Returns whether this was the section's
    /// first sighting.
    pub fn set_section_visible(&mut self, section: Section, visible: bool) -> bool {
        if !visible || self.disposed || !self.seen.insert(section) {
            return false;
        }
        match section {
            Section::Services => {
                self.catalog.on_visibility(true);
            }
            Section::Map => {
                self.map.on_visibility(true);
            }
            Section::Testimonials => {}
        }
        debug!(?section, "Section came into view");
        true
    }

    // -------------------------------------------------------------------------
    // Selection → Booking
    // -------------------------------------------------------------------------

    /// Opens a catalog service in the booking modal. Unknown ids are ignored.
    pub fn select_service(&mut self, service_id: u32) -> bool {
        match self.catalog.select(service_id) {
            Some(offer) => self.open_offer(offer),
            None => false,
        }
    }

    /// Opens a featured package in the booking modal. Unknown ids are
    /// ignored.
    pub fn select_package(&mut self, package_id: u32) -> bool {
        match self.packages.iter().find(|p| p.id == package_id) {
            Some(package) => {
                let offer = Offer::Package(package.clone());
                self.open_offer(offer)
            }
            None => false,
        }
    }

    /// "Book Experience" on the open map card: closes the card and opens the
    /// first catalog service matching the pin's kind.
    pub fn book_location(&mut self) -> bool {
        let Some(location) = self.map.book_selected() else {
            return false;
        };
        let category = bookable_category(location.kind);
        let Some(id) = self.catalog.first_in(category).map(|s| s.id) else {
            debug!(location = %location.name, ?category, "No service to book for location");
            return false;
        };
        self.select_service(id)
    }

    fn open_offer(&mut self, offer: Offer) -> bool {
        if self.disposed {
            return false;
        }
        let reference = offer.reference();
        self.booking.open(offer);
        self.outbox.push_back(PageEvent::OfferSelected { offer: reference });
        true
    }

    /// Confirms the open booking.
    pub fn submit_booking(&mut self) -> Option<BookingSubmission> {
        let submission = self.booking.submit()?;
        self.outbox
            .push_back(PageEvent::BookingSubmitted(submission.clone()));
        Some(submission)
    }

    pub fn submit_search(&mut self) -> bool {
        self.search.submit_search()
    }

    /// Submits the newsletter box. `Ok(false)` when the box was empty.
    pub fn submit_newsletter(&mut self) -> ValidationResult<bool> {
        match self.newsletter.submit()? {
            Some(email) => {
                self.outbox.push_back(PageEvent::Subscribed { email });
                Ok(true)
            }
            None => Ok(false),
        }
    }

    // -------------------------------------------------------------------------
    // Outbox
    // -------------------------------------------------------------------------

    /// Drains pending events, oldest first.
    pub fn take_events(&mut self) -> Vec<PageEvent> {
        self.outbox.drain(..).collect()
    }

    pub fn has_events(&self) -> bool {
        !self.outbox.is_empty()
    }

    fn components(&mut self) -> [&mut dyn Scheduled; 7] {
        [
            &mut self.loader,
            &mut self.hero,
            &mut self.search,
            &mut self.catalog,
            &mut self.testimonials,
            &mut self.map,
            &mut self.newsletter,
        ]
    }

    // -------------------------------------------------------------------------
    // View
    // -------------------------------------------------------------------------

    pub fn view(&self) -> PageView {
        let locale = &self.locale;
        let filter = self.catalog.filter();

        PageView {
            locale: self.locale,
            direction: locale.direction(),
            loading: self.is_loading(),
            hero: HeroView {
                tagline: locale.text(self.hero.current()).to_string(),
                index: index_u32(self.hero.cursor()),
                count: index_u32(self.hero.len()),
            },
            search: self.search.view(locale),
            filters: std::iter::once(None)
                .chain(Category::ALL.into_iter().map(Some))
                .map(|category| {
                    let option = category.map_or(CategoryFilter::All, CategoryFilter::Only);
                    FilterOption {
                        filter: option,
                        label: locale.text(&content::category_label(category)).to_string(),
                        active: option == filter,
                    }
                })
                .collect(),
            catalog: self.catalog.view(locale),
            packages: self
                .packages
                .iter()
                .map(|p| PackageCard {
                    id: p.id,
                    title: locale.text(&p.title).to_string(),
                    description: locale.text(&p.description).to_string(),
                    price: p.price.format_whole(),
                    duration: locale.text(&p.duration).to_string(),
                    rating: format_rating(p.rating_tenths),
                    reviews: p.reviews,
                    image: p.image.clone(),
                })
                .collect(),
            testimonials: TestimonialsView::build(
                &self.testimonials,
                self.testimonial_audio,
                locale,
            ),
            map: self.map.view(locale),
            booking: self.booking.view(locale),
            newsletter: self.newsletter.view(),
        }
    }
}

impl Scheduled for LandingPage {
    fn advance(&mut self, by: Duration) {
        if self.disposed {
            return;
        }
        for component in self.components() {
            component.advance(by);
        }
        for payload in self.search.take_completed() {
            info!(tab = %payload.tab, "Forwarding search result");
            self.outbox.push_back(PageEvent::SearchSubmitted(payload));
        }
    }

    fn time_until_next(&self) -> Option<Duration> {
        earliest([
            self.loader.time_until_next(),
            self.hero.time_until_next(),
            self.search.time_until_next(),
            self.catalog.time_until_next(),
            self.testimonials.time_until_next(),
            self.map.time_until_next(),
            self.newsletter.time_until_next(),
        ])
    }

    fn dispose(&mut self) {
        for component in self.components() {
            component.dispose();
        }
        self.booking.close();
        self.testimonial_audio = false;
        self.disposed = true;
        info!("Landing page disposed");
    }

    fn is_disposed(&self) -> bool {
        self.disposed
    }
}

fn index_u32(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}

// =============================================================================
// Views
// =============================================================================

/// Everything the frontend renders, resolved against the current locale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PageView {
    pub locale: LocaleTheme,
    pub direction: TextDirection,
    pub loading: bool,
    pub hero: HeroView,
    pub search: SearchFormView,
    pub filters: Vec<FilterOption>,
    pub catalog: CatalogView,
    pub packages: Vec<PackageCard>,
    pub testimonials: TestimonialsView,
    pub map: MapView,
    pub booking: Option<BookingView>,
    pub newsletter: NewsletterView,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct HeroView {
    pub tagline: String,
    pub index: u32,
    pub count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct FilterOption {
    pub filter: CategoryFilter,
    pub label: String,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PackageCard {
    pub id: u32,
    pub title: String,
    pub description: String,
    pub price: String,
    pub duration: String,
    pub rating: String,
    pub reviews: u32,
    pub image: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct TestimonialCard {
    pub id: u32,
    pub name: String,
    pub role: String,
    pub rating: u8,
    pub text: String,
    pub image: String,
    pub location: String,
    pub package: String,
    pub audio_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct TestimonialsView {
    pub current: TestimonialCard,
    pub index: u32,
    pub count: u32,
    pub autoplay: bool,
    /// Voice clip play/pause state
    pub playing: bool,
}

impl TestimonialsView {
    fn build(carousel: &Carousel<Testimonial>, playing: bool, locale: &LocaleTheme) -> Self {
        let t = carousel.current();
        TestimonialsView {
            current: TestimonialCard {
                id: t.id,
                name: t.name.clone(),
                role: locale.text(&t.role).to_string(),
                rating: t.rating,
                text: locale.text(&t.text).to_string(),
                image: t.image.clone(),
                location: t.location.clone(),
                package: t.package.clone(),
                audio_url: t.audio_url.clone(),
            },
            index: index_u32(carousel.cursor()),
            count: index_u32(carousel.len()),
            autoplay: carousel.is_autoplay(),
            playing,
        }
    }
}
