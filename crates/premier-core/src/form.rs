//! # Tabbed Search Form
//!
//! A static schema table maps each tab to an ordered list of field
//! descriptors. Every tab keeps its own value bag, so returning to a tab
//! shows what was typed there before. Fields whose descriptor sets
//! `preserve_on_tab_switch = false` are reset to their default when the user
//! leaves the tab.
//!
//! ## Search Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │   idle ──submit_search()──► searching ──(latency)──► idle               │
//! │                                │                       │                │
//! │              submit_search()   │                       └─► SearchPayload│
//! │              ignored here ─────┘                           in outbox    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The payload is captured at submit time; edits made while the search is
//! in flight belong to the next search.

use std::collections::{BTreeMap, HashMap, HashSet, VecDeque};
use std::time::Duration;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::locale::LocaleTheme;
use crate::timeline::{Scheduled, TimerId, Timeline};
use crate::types::{Localized, TabId};
use crate::validation::{
    validate_choice, validate_date_range, validate_range, validate_text, ValidationResult,
};

// =============================================================================
// Schema
// =============================================================================

/// One entry of a `<select>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    pub value: String,
    pub label: Localized,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: Localized) -> Self {
        SelectOption {
            value: value.into(),
            label,
        }
    }
}

/// Input widget and the values it accepts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum FieldKind {
    Text,
    Date,
    DateRange,
    Select { options: Vec<SelectOption> },
    NumericSelect { min: i64, max: i64 },
}

impl FieldKind {
    const fn expected(&self) -> &'static str {
        match self {
            FieldKind::Text | FieldKind::Select { .. } => "text",
            FieldKind::Date => "date",
            FieldKind::DateRange => "date range",
            FieldKind::NumericSelect { .. } => "number",
        }
    }
}

/// A value held in a field bag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "camelCase")]
pub enum FieldValue {
    Text(String),
    Date(Option<NaiveDate>),
    DateRange {
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    },
    Number(i64),
}

/// Field bag of one tab, keyed by field name.
pub type FieldBag = BTreeMap<String, FieldValue>;

/// Static description of a single field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub name: String,
    pub label: Localized,
    pub kind: FieldKind,
    pub default: FieldValue,
    /// Keep the value when the user switches to another tab and back.
    pub preserve_on_tab_switch: bool,
}

impl FieldDescriptor {
    pub fn text(name: &str, label: Localized) -> Self {
        Self::new(name, label, FieldKind::Text, FieldValue::Text(String::new()))
    }

    pub fn date(name: &str, label: Localized) -> Self {
        Self::new(name, label, FieldKind::Date, FieldValue::Date(None))
    }

    pub fn date_range(name: &str, label: Localized) -> Self {
        Self::new(
            name,
            label,
            FieldKind::DateRange,
            FieldValue::DateRange {
                start: None,
                end: None,
            },
        )
    }

    pub fn select(name: &str, label: Localized, options: Vec<SelectOption>) -> Self {
        Self::new(
            name,
            label,
            FieldKind::Select { options },
            FieldValue::Text(String::new()),
        )
    }

    pub fn numeric_select(name: &str, label: Localized, min: i64, max: i64, default: i64) -> Self {
        Self::new(
            name,
            label,
            FieldKind::NumericSelect { min, max },
            FieldValue::Number(default),
        )
    }

    fn new(name: &str, label: Localized, kind: FieldKind, default: FieldValue) -> Self {
        FieldDescriptor {
            name: name.to_string(),
            label,
            kind,
            default,
            preserve_on_tab_switch: true,
        }
    }

    /// Builder: reset this field whenever its tab is left.
    pub fn reset_on_tab_switch(mut self) -> Self {
        self.preserve_on_tab_switch = false;
        self
    }

    /// Checks that `value` has the right shape and satisfies the kind's
    /// constraints.
    pub fn check(&self, value: &FieldValue) -> ValidationResult<()> {
        let field = self.name.as_str();
        match (&self.kind, value) {
            (FieldKind::Text, FieldValue::Text(text)) => validate_text(field, text),
            (FieldKind::Select { options }, FieldValue::Text(choice)) => {
                let allowed: Vec<String> = options.iter().map(|o| o.value.clone()).collect();
                validate_choice(field, choice, &allowed)
            }
            (FieldKind::Date, FieldValue::Date(_)) => Ok(()),
            (FieldKind::DateRange, FieldValue::DateRange { start, end }) => {
                validate_date_range(field, *start, *end)
            }
            (FieldKind::NumericSelect { min, max }, FieldValue::Number(n)) => {
                validate_range(field, *n, *min, *max)
            }
            (kind, _) => Err(ValidationError::TypeMismatch {
                field: field.to_string(),
                expected: kind.expected(),
            }),
        }
    }
}

/// Fields of one tab.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabSchema {
    pub tab: TabId,
    pub label: Localized,
    pub fields: Vec<FieldDescriptor>,
}

impl TabSchema {
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    fn defaults(&self) -> FieldBag {
        self.fields
            .iter()
            .map(|f| (f.name.clone(), f.default.clone()))
            .collect()
    }
}

/// The whole schema table, in tab order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormSchema {
    pub tabs: Vec<TabSchema>,
}

impl FormSchema {
    pub fn new(tabs: Vec<TabSchema>) -> Self {
        FormSchema { tabs }
    }

    pub fn tab(&self, tab: TabId) -> Option<&TabSchema> {
        self.tabs.iter().find(|t| t.tab == tab)
    }

    /// Rejects schemas that could only fail later at runtime.
    pub fn validate(&self) -> CoreResult<()> {
        if self.tabs.is_empty() {
            return Err(CoreError::NoTabs);
        }

        for tab in &self.tabs {
            if tab.fields.is_empty() {
                return Err(CoreError::EmptyTabSchema { tab: tab.tab });
            }

            let mut seen = HashSet::new();
            for field in &tab.fields {
                if !seen.insert(field.name.as_str()) {
                    return Err(CoreError::DuplicateField {
                        tab: tab.tab,
                        field: field.name.clone(),
                    });
                }
                field
                    .check(&field.default)
                    .map_err(|source| CoreError::InvalidDefault {
                        tab: tab.tab,
                        field: field.name.clone(),
                        source,
                    })?;
            }
        }

        Ok(())
    }
}

// =============================================================================
// Search Form State
// =============================================================================

/// What a completed search hands to the page shell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchPayload {
    pub tab: TabId,
    pub fields: FieldBag,
}

/// Search widget state. See the module docs.
#[derive(Debug)]
pub struct SearchForm {
    schema: FormSchema,
    active: TabId,
    bags: HashMap<TabId, FieldBag>,
    latency: Duration,
    in_flight: Option<TimerId>,
    timeline: Timeline<SearchPayload>,
    completed: VecDeque<SearchPayload>,
}

impl SearchForm {
    /// Builds the form; the first tab of the schema starts active.
    ///
    /// ## Errors
    /// Any schema problem reported by [`FormSchema::validate`].
    pub fn new(schema: FormSchema, latency: Duration) -> CoreResult<Self> {
        schema.validate()?;

        let active = schema.tabs[0].tab;
        let bags = schema
            .tabs
            .iter()
            .map(|t| (t.tab, t.defaults()))
            .collect();

        Ok(SearchForm {
            schema,
            active,
            bags,
            latency,
            in_flight: None,
            timeline: Timeline::new(),
            completed: VecDeque::new(),
        })
    }

    pub fn active_tab(&self) -> TabId {
        self.active
    }

    pub fn schema(&self) -> &FormSchema {
        &self.schema
    }

    fn active_schema(&self) -> &TabSchema {
        // `active` is only ever set to a tab present in the schema
        self.schema
            .tab(self.active)
            .unwrap_or(&self.schema.tabs[0])
    }

    /// Switches tabs. Tabs missing from the schema are ignored.
    pub fn set_active_tab(&mut self, tab: TabId) -> bool {
        if self.schema.tab(tab).is_none() {
            warn!(%tab, "Ignoring switch to unknown tab");
            return false;
        }
        if tab == self.active {
            return true;
        }

        let leaving = self.active;
        if let (Some(schema), Some(bag)) = (self.schema.tab(leaving), self.bags.get_mut(&leaving)) {
            for field in schema.fields.iter().filter(|f| !f.preserve_on_tab_switch) {
                bag.insert(field.name.clone(), field.default.clone());
            }
        }

        self.active = tab;
        debug!(from = %leaving, to = %tab, "Search tab switched");
        true
    }

    /// Sets a field on the active tab.
    ///
    /// ## Returns
    /// - `Ok(true)` when stored
    /// - `Ok(false)` when the active tab has no such field (inert)
    /// - `Err(_)` when the value is rejected; the bag is left unchanged
    pub fn set_field(&mut self, name: &str, value: FieldValue) -> ValidationResult<bool> {
        let Some(descriptor) = self.active_schema().field(name) else {
            debug!(tab = %self.active, field = name, "Ignoring unknown field");
            return Ok(false);
        };
        descriptor.check(&value)?;

        self.bags
            .entry(self.active)
            .or_default()
            .insert(name.to_string(), value);
        Ok(true)
    }

    /// Reads a field of the active tab. Fields of other tabs are invisible.
    pub fn field(&self, name: &str) -> Option<&FieldValue> {
        self.active_schema().field(name)?;
        self.bags.get(&self.active)?.get(name)
    }

    /// Value bag of the active tab.
    pub fn fields(&self) -> FieldBag {
        self.bags.get(&self.active).cloned().unwrap_or_default()
    }

    pub fn is_searching(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Starts the simulated search. Ignored while another is in flight.
    ///
    /// Returns whether a search was started.
    pub fn submit_search(&mut self) -> bool {
        if self.in_flight.is_some() {
            debug!(tab = %self.active, "Search already in flight, submit ignored");
            return false;
        }
        if self.timeline.is_disposed() {
            return false;
        }

        let payload = SearchPayload {
            tab: self.active,
            fields: self.fields(),
        };
        info!(tab = %payload.tab, fields = payload.fields.len(), "Search submitted");
        self.in_flight = Some(self.timeline.schedule_in(self.latency, payload));
        true
    }

    /// Drains completed searches, oldest first.
    pub fn take_completed(&mut self) -> Vec<SearchPayload> {
        self.completed.drain(..).collect()
    }

    pub fn view(&self, locale: &LocaleTheme) -> SearchFormView {
        let bag = self.bags.get(&self.active);
        SearchFormView {
            tabs: self
                .schema
                .tabs
                .iter()
                .map(|t| TabView {
                    id: t.tab,
                    label: locale.text(&t.label).to_string(),
                    active: t.tab == self.active,
                })
                .collect(),
            fields: self
                .active_schema()
                .fields
                .iter()
                .map(|f| FieldView::build(f, bag.and_then(|b| b.get(&f.name)), locale))
                .collect(),
            searching: self.is_searching(),
        }
    }
}

impl Scheduled for SearchForm {
    fn advance(&mut self, by: Duration) {
        if self.timeline.is_disposed() {
            return;
        }
        let until = self.timeline.horizon(by);
        while let Some((id, payload)) = self.timeline.pop_due(until) {
            if self.in_flight == Some(id) {
                self.in_flight = None;
            }
            info!(tab = %payload.tab, "Search completed");
            self.completed.push_back(payload);
        }
        self.timeline.settle(until);
    }

    fn time_until_next(&self) -> Option<Duration> {
        self.timeline.time_until_next()
    }

    fn dispose(&mut self) {
        self.timeline.dispose();
        self.in_flight = None;
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
pub struct SearchFormView {
    pub tabs: Vec<TabView>,
    pub fields: Vec<FieldView>,
    /// Backs the disabled state of the search button.
    pub searching: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct TabView {
    pub id: TabId,
    pub label: String,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OptionView {
    pub value: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum FieldInputView {
    Text { value: String },
    Date { value: Option<String> },
    DateRange { start: Option<String>, end: Option<String> },
    Select { value: String, options: Vec<OptionView> },
    NumericSelect { value: i64, min: i64, max: i64 },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct FieldView {
    pub name: String,
    pub label: String,
    pub input: FieldInputView,
}

impl FieldView {
    fn build(field: &FieldDescriptor, value: Option<&FieldValue>, locale: &LocaleTheme) -> Self {
        let value = value.unwrap_or(&field.default);
        let iso = |d: &Option<NaiveDate>| d.map(|d| d.format("%Y-%m-%d").to_string());

        let input = match (&field.kind, value) {
            (FieldKind::Select { options }, FieldValue::Text(v)) => FieldInputView::Select {
                value: v.clone(),
                options: options
                    .iter()
                    .map(|o| OptionView {
                        value: o.value.clone(),
                        label: locale.text(&o.label).to_string(),
                    })
                    .collect(),
            },
            (FieldKind::NumericSelect { min, max }, FieldValue::Number(n)) => {
                FieldInputView::NumericSelect {
                    value: *n,
                    min: *min,
                    max: *max,
                }
            }
            (_, FieldValue::Text(v)) => FieldInputView::Text { value: v.clone() },
            (_, FieldValue::Date(d)) => FieldInputView::Date { value: iso(d) },
            (_, FieldValue::DateRange { start, end }) => FieldInputView::DateRange {
                start: iso(start),
                end: iso(end),
            },
            (_, FieldValue::Number(n)) => FieldInputView::NumericSelect {
                value: *n,
                min: *n,
                max: *n,
            },
        };

        FieldView {
            name: field.name.clone(),
            label: locale.text(&field.label).to_string(),
            input,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Language;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn day(d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(2026, 5, d)
    }

    fn schema() -> FormSchema {
        FormSchema::new(vec![
            TabSchema {
                tab: TabId::Flights,
                label: Localized::new("Flights", "طيران"),
                fields: vec![
                    FieldDescriptor::select(
                        "from",
                        Localized::same("From"),
                        vec![
                            SelectOption::new("DXB", Localized::same("Dubai")),
                            SelectOption::new("LHR", Localized::same("London")),
                        ],
                    ),
                    FieldDescriptor::date("departure", Localized::same("Departure")),
                    FieldDescriptor::numeric_select("guests", Localized::same("Guests"), 1, 8, 1),
                ],
            },
            TabSchema {
                tab: TabId::Cars,
                label: Localized::new("Cars", "سيارات"),
                fields: vec![
                    FieldDescriptor::text("pickup", Localized::same("Pick-up")),
                    FieldDescriptor::date_range("rental", Localized::same("Rental"))
                        .reset_on_tab_switch(),
                ],
            },
        ])
    }

    fn form() -> SearchForm {
        SearchForm::new(schema(), ms(2000)).unwrap()
    }

    #[test]
    fn test_schema_validation() {
        assert!(matches!(
            SearchForm::new(FormSchema::new(vec![]), ms(1)).unwrap_err(),
            CoreError::NoTabs
        ));

        let mut empty_tab = schema();
        empty_tab.tabs[1].fields.clear();
        assert!(matches!(
            empty_tab.validate().unwrap_err(),
            CoreError::EmptyTabSchema { tab: TabId::Cars }
        ));

        let mut duplicate = schema();
        let again = duplicate.tabs[0].fields[0].clone();
        duplicate.tabs[0].fields.push(again);
        assert!(matches!(
            duplicate.validate().unwrap_err(),
            CoreError::DuplicateField { .. }
        ));

        let mut bad_default = schema();
        bad_default.tabs[0].fields[2].default = FieldValue::Number(0);
        assert!(matches!(
            bad_default.validate().unwrap_err(),
            CoreError::InvalidDefault { .. }
        ));
    }

    #[test]
    fn test_starts_on_first_tab_with_defaults() {
        let form = form();
        assert_eq!(form.active_tab(), TabId::Flights);
        assert_eq!(form.field("guests"), Some(&FieldValue::Number(1)));
        assert_eq!(form.field("from"), Some(&FieldValue::Text(String::new())));
    }

    #[test]
    fn test_unknown_fields_are_inert() {
        let mut form = form();
        assert_eq!(
            form.set_field("pickup", FieldValue::Text("Marina".into())),
            Ok(false)
        );
        assert_eq!(form.field("pickup"), None);
        assert!(!form.fields().contains_key("pickup"));
    }

    #[test]
    fn test_rejected_values_leave_state_unchanged() {
        let mut form = form();
        assert!(matches!(
            form.set_field("guests", FieldValue::Number(9)),
            Err(ValidationError::OutOfRange { .. })
        ));
        assert!(matches!(
            form.set_field("from", FieldValue::Text("XXX".into())),
            Err(ValidationError::NotAllowed { .. })
        ));
        assert!(matches!(
            form.set_field("departure", FieldValue::Number(3)),
            Err(ValidationError::TypeMismatch { expected: "date", .. })
        ));
        assert_eq!(form.field("guests"), Some(&FieldValue::Number(1)));
    }

    #[test]
    fn test_tab_values_are_preserved_across_switches() {
        let mut form = form();
        form.set_field("from", FieldValue::Text("DXB".into())).unwrap();
        form.set_field("guests", FieldValue::Number(4)).unwrap();

        assert!(form.set_active_tab(TabId::Cars));
        assert_eq!(form.field("guests"), None);
        form.set_field("pickup", FieldValue::Text("Marina".into())).unwrap();

        form.set_active_tab(TabId::Flights);
        assert_eq!(form.field("from"), Some(&FieldValue::Text("DXB".into())));
        assert_eq!(form.field("guests"), Some(&FieldValue::Number(4)));

        form.set_active_tab(TabId::Cars);
        assert_eq!(form.field("pickup"), Some(&FieldValue::Text("Marina".into())));
    }

    #[test]
    fn test_non_preserved_fields_reset_when_tab_is_left() {
        let mut form = form();
        form.set_active_tab(TabId::Cars);
        let range = FieldValue::DateRange {
            start: day(1),
            end: day(4),
        };
        form.set_field("rental", range.clone()).unwrap();
        assert_eq!(form.field("rental"), Some(&range));

        form.set_active_tab(TabId::Flights);
        form.set_active_tab(TabId::Cars);
        assert_eq!(
            form.field("rental"),
            Some(&FieldValue::DateRange { start: None, end: None })
        );
    }

    #[test]
    fn test_inverted_date_range_rejected() {
        let mut form = form();
        form.set_active_tab(TabId::Cars);
        let inverted = FieldValue::DateRange {
            start: day(9),
            end: day(2),
        };
        assert!(form.set_field("rental", inverted).is_err());
    }

    #[test]
    fn test_unknown_tab_ignored() {
        let mut form = form();
        assert!(!form.set_active_tab(TabId::Esim));
        assert_eq!(form.active_tab(), TabId::Flights);
    }

    #[test]
    fn test_submit_runs_once_per_flight() {
        let mut form = form();
        form.set_field("from", FieldValue::Text("LHR".into())).unwrap();

        assert!(form.submit_search());
        assert!(form.is_searching());
        assert!(!form.submit_search());

        form.advance(ms(1999));
        assert!(form.is_searching());
        assert!(!form.submit_search());
        assert!(form.take_completed().is_empty());

        form.advance(ms(1));
        assert!(!form.is_searching());
        let done = form.take_completed();
        assert_eq!(done.len(), 1);
        assert_eq!(done[0].tab, TabId::Flights);
        assert_eq!(done[0].fields["from"], FieldValue::Text("LHR".into()));

        form.advance(ms(10_000));
        assert!(form.take_completed().is_empty());

        assert!(form.submit_search());
    }

    #[test]
    fn test_payload_is_captured_at_submit() {
        let mut form = form();
        form.set_field("guests", FieldValue::Number(2)).unwrap();
        form.submit_search();
        form.set_field("guests", FieldValue::Number(6)).unwrap();
        form.set_active_tab(TabId::Cars);

        form.advance(ms(2000));
        let done = form.take_completed();
        assert_eq!(done[0].tab, TabId::Flights);
        assert_eq!(done[0].fields["guests"], FieldValue::Number(2));
    }

    #[test]
    fn test_dispose_drops_in_flight_search() {
        let mut form = form();
        form.submit_search();
        form.dispose();
        form.advance(ms(5000));
        assert!(form.take_completed().is_empty());
        assert!(!form.is_searching());
        assert!(!form.submit_search());
    }

    #[test]
    fn test_view_lists_active_fields_in_order() {
        let mut form = form();
        form.set_field("departure", FieldValue::Date(day(7))).unwrap();
        let locale = LocaleTheme::new(Language::Ar, false);
        let view = form.view(&locale);

        assert_eq!(view.tabs.len(), 2);
        assert_eq!(view.tabs[0].label, "طيران");
        assert!(view.tabs[0].active);
        let names: Vec<_> = view.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["from", "departure", "guests"]);
        assert_eq!(
            view.fields[1].input,
            FieldInputView::Date {
                value: Some("2026-05-07".to_string())
            }
        );
        assert!(matches!(
            view.fields[0].input,
            FieldInputView::Select { ref options, .. } if options.len() == 2
        ));
    }
}
