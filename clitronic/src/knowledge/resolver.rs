//! Component Resolver
//!
//! Maps a free-text query to at most one component. Matching runs through
//! a fixed cascade of tiers; the first tier with a hit wins and, within a
//! tier, the first component in catalog order wins. No scoring.

use crate::knowledge::schema::Component;

/// A tier receives the component and the trimmed, lower-cased query
type Matcher = fn(&Component, &str) -> bool;

const TIERS: &[(&str, Matcher)] = &[
    ("exact-id", matches_id),
    ("exact-name", matches_name),
    ("partial", matches_partial),
    ("description", matches_all_words),
];

pub fn resolve<'a>(components: &'a [Component], query: &str) -> Option<&'a Component> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return None;
    }

    for (tier, matcher) in TIERS {
        if let Some(component) = components.iter().find(|c| matcher(c, &query)) {
            tracing::debug!(tier = *tier, id = %component.id, "Resolved {:?}", query);
            return Some(component);
        }
    }

    tracing::debug!("No component matches {:?}", query);
    None
}

fn matches_id(component: &Component, query: &str) -> bool {
    component.id == query
}

fn matches_name(component: &Component, query: &str) -> bool {
    component.name.to_lowercase() == query
}

// "red led" contains the id "led"; "temp" is contained in "temp-sensor"
fn matches_partial(component: &Component, query: &str) -> bool {
    component.name.to_lowercase().contains(query)
        || component.id.contains(query)
        || query.contains(component.id.as_str())
}

fn matches_all_words(component: &Component, query: &str) -> bool {
    let text = format!("{} {}", component.name, component.description).to_lowercase();
    query.split_whitespace().all(|word| text.contains(word))
}
