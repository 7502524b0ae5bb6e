//! Static accessible viewer for the timetable document.
//!
//! Renders one HTML page with two pickers (main line and branch), one panel
//! per section and day, and a toggle button per trip that reveals the route
//! as a sentence a screen reader can speak.

use askama::Template;

use super::{TimetableDocument, TripDto};
use crate::domain::RouteSection;

/// The whole viewer page.
#[derive(Template)]
#[template(path = "viewer.html")]
pub struct ViewerTemplate {
    pub title: String,
    pub panels: Vec<PanelView>,
}

/// One section and day.
#[derive(Debug, Clone)]
pub struct PanelView {
    /// Element id, safe for HTML and CSS
    pub id: String,
    pub heading: String,
    pub button_label: String,
    /// Listed in the main-line picker rather than the branch picker
    pub main: bool,
    /// Shown when the page loads
    pub selected: bool,
    pub groups: Vec<GroupView>,
}

impl PanelView {
    pub fn pressed(&self) -> &'static str {
        if self.selected { "true" } else { "false" }
    }
}

/// Trips of one variant within a panel.
#[derive(Debug, Clone)]
pub struct GroupView {
    pub heading: String,
    pub trips: Vec<TripView>,
}

/// One trip toggle.
#[derive(Debug, Clone)]
pub struct TripView {
    /// Id of the route element the toggle controls
    pub route_id: String,
    pub label: String,
    pub route: String,
}

impl ViewerTemplate {
    /// Lay out a document. Variant groups follow each section's
    /// `busTypeOrder`; empty groups are left out.
    pub fn from_document(document: &TimetableDocument, title: &str) -> Self {
        let main_ids = [RouteSection::OutboundMain.id(), RouteSection::InboundMain.id()];
        let mut uid = 0;
        let mut panels = Vec::new();

        for section in &document.sections {
            for day in &section.days {
                let key = format!("{}__{}", section.id, day.name);
                let groups = section
                    .bus_type_order
                    .iter()
                    .filter_map(|variant| {
                        let trips = day
                            .buses
                            .0
                            .iter()
                            .find(|(k, _)| k == variant)
                            .map(|(_, trips)| trips.as_slice())
                            .unwrap_or(&[]);
                        if trips.is_empty() {
                            return None;
                        }
                        let spoken = spoken_variant(variant);
                        let trips = trips
                            .iter()
                            .map(|trip| {
                                uid += 1;
                                TripView {
                                    route_id: format!("trip_{uid}"),
                                    label: trip_label(trip, &spoken),
                                    route: route_sentence(trip),
                                }
                            })
                            .collect();
                        Some(GroupView {
                            heading: spoken,
                            trips,
                        })
                    })
                    .collect();

                panels.push(PanelView {
                    id: format!("panel_{}", css_safe(&key)),
                    heading: format!("{}, {}", section.title, day.name),
                    button_label: format!("{} · {}", section.title, day.name),
                    main: main_ids.contains(&section.id.as_str()),
                    selected: panels.is_empty(),
                    groups,
                });
            }
        }

        Self {
            title: title.to_string(),
            panels,
        }
    }
}

/// Replace every run of characters outside `[A-Za-z0-9_-]` with `_`.
fn css_safe(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_run = false;
    for c in text.chars() {
        if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
            out.push(c);
            in_run = false;
        } else if !in_run {
            out.push('_');
            in_run = true;
        }
    }
    out
}

/// How a variant key is read aloud: "e22" -> "E 22", "semidirecte" ->
/// "Semidirecte".
fn spoken_variant(key: &str) -> String {
    let split = key.find(|c: char| c.is_ascii_digit()).unwrap_or(key.len());
    let (letters, digits) = key.split_at(split);
    if !letters.is_empty() && !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()) {
        return format!("{} {}", letters.to_uppercase(), digits);
    }

    let mut chars = key.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn trip_label(trip: &TripDto, spoken: &str) -> String {
    format!(
        "Servei {spoken}. Sortida {}. Arribada {}.",
        trip.start_time, trip.end_time
    )
}

fn route_sentence(trip: &TripDto) -> String {
    let parts: Vec<String> = trip
        .stops
        .iter()
        .map(|s| format!("{} {}", s.time, s.stop))
        .collect();
    format!("Recorregut: {}.", parts.join("; "))
}
