//! In-memory model of the host page the bar renders into: named
//! containers, the pills appended to them, and the style sheets a mount
//! injects. The widget mutates this model; `render` reads it.

use crate::formatting::Tone;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Colors and weight for the positive/negative classes, injected once per
/// successful mount. Re-mounting appends another copy; duplicates are
/// visually idempotent and intentionally not deduplicated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleSheet {
    pub positive_color: &'static str,
    pub negative_color: &'static str,
    pub bold: bool,
}

impl Default for StyleSheet {
    fn default() -> Self {
        Self {
            positive_color: "#26d07c",
            negative_color: "#ff6961",
            bold: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Layout {
    #[default]
    Block,
    Row {
        wrap: bool,
        gap_px: u16,
    },
}

#[derive(Debug)]
struct PillState {
    id: &'static str,
    label: &'static str,
    value: String,
    tone: Option<Tone>,
}

/// Direct handle to one pill's value slot. The mounting widget keeps these
/// instead of re-querying the page by id on every refresh cycle.
#[derive(Clone)]
pub struct Pill {
    state: Arc<Mutex<PillState>>,
}

impl Pill {
    fn new(id: &'static str, label: &'static str, value: &str, tone: Option<Tone>) -> Self {
        Self {
            state: Arc::new(Mutex::new(PillState {
                id,
                label,
                value: value.to_string(),
                tone,
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, PillState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    #[must_use]
    pub fn id(&self) -> &'static str {
        self.lock().id
    }

    #[must_use]
    pub fn label(&self) -> &'static str {
        self.lock().label
    }

    #[must_use]
    pub fn value(&self) -> String {
        self.lock().value.clone()
    }

    #[must_use]
    pub fn tone(&self) -> Option<Tone> {
        self.lock().tone
    }

    pub fn set(&self, value: String, tone: Option<Tone>) {
        let mut state = self.lock();
        state.value = value;
        state.tone = tone;
    }

    fn is_same(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.state, &other.state)
    }
}

#[derive(Default)]
struct Container {
    layout: Layout,
    pills: Vec<Pill>,
}

#[derive(Default)]
struct PageInner {
    containers: HashMap<String, Container>,
    style_sheets: Vec<StyleSheet>,
}

/// Shareable page model. Clones are handles to the same page.
#[derive(Clone, Default)]
pub struct Page {
    inner: Arc<Mutex<PageInner>>,
}

impl Page {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, PageInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Creates an empty mount target. The host page does this before
    /// asking the widget to mount into it.
    pub fn add_container(&self, id: &str) {
        self.lock().containers.entry(id.to_string()).or_default();
    }

    #[must_use]
    pub fn has_container(&self, id: &str) -> bool {
        self.lock().containers.contains_key(id)
    }

    pub fn set_layout(&self, container_id: &str, layout: Layout) {
        if let Some(container) = self.lock().containers.get_mut(container_id) {
            container.layout = layout;
        }
    }

    #[must_use]
    pub fn layout(&self, container_id: &str) -> Option<Layout> {
        self.lock()
            .containers
            .get(container_id)
            .map(|container| container.layout)
    }

    pub fn inject_style_sheet(&self, sheet: StyleSheet) {
        self.lock().style_sheets.push(sheet);
    }

    #[must_use]
    pub fn style_sheet_count(&self) -> usize {
        self.lock().style_sheets.len()
    }

    /// The most recently injected sheet, which wins when duplicates have
    /// accumulated through re-mounts.
    #[must_use]
    pub fn latest_style_sheet(&self) -> Option<StyleSheet> {
        self.lock().style_sheets.last().cloned()
    }

    /// Appends a pill to a container and returns a direct handle to it,
    /// or `None` when the container does not exist.
    pub fn append_pill(
        &self,
        container_id: &str,
        id: &'static str,
        label: &'static str,
        value: &str,
        tone: Option<Tone>,
    ) -> Option<Pill> {
        let mut inner = self.lock();
        let container = inner.containers.get_mut(container_id)?;
        let pill = Pill::new(id, label, value, tone);
        container.pills.push(pill.clone());
        Some(pill)
    }

    /// Removes the given pills from a container. Pills not present are
    /// ignored.
    pub fn detach_pills(&self, container_id: &str, pills: &[&Pill]) {
        if let Some(container) = self.lock().containers.get_mut(container_id) {
            container
                .pills
                .retain(|kept| !pills.iter().any(|gone| kept.is_same(gone)));
        }
    }

    /// Looks a pill up by its fixed id across all containers, the way the
    /// original widget resolved its display slots. Within one container
    /// the first match in insertion order wins; when the same id exists
    /// in several containers, which container is searched first is
    /// unspecified.
    #[must_use]
    pub fn find_pill(&self, pill_id: &str) -> Option<Pill> {
        let inner = self.lock();
        inner
            .containers
            .values()
            .flat_map(|container| container.pills.iter())
            .find(|pill| pill.id() == pill_id)
            .cloned()
    }

    #[must_use]
    pub fn pill_count(&self, container_id: &str) -> usize {
        self.lock()
            .containers
            .get(container_id)
            .map_or(0, |container| container.pills.len())
    }

    #[must_use]
    pub fn pills(&self, container_id: &str) -> Option<Vec<Pill>> {
        self.lock()
            .containers
            .get(container_id)
            .map(|container| container.pills.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_requires_existing_container() {
        let page = Page::new();
        assert!(
            page.append_pill("nowhere", "x_val", "X:", "...", None)
                .is_none()
        );

        page.add_container("bar");
        assert!(page.append_pill("bar", "x_val", "X:", "...", None).is_some());
        assert_eq!(page.pill_count("bar"), 1);
    }

    #[test]
    fn find_pill_resolves_fixed_ids() {
        let page = Page::new();
        page.add_container("bar");
        let pill = page
            .append_pill("bar", "usd_val", "USD:", "--.--", None)
            .unwrap();
        pill.set("31.50".to_string(), None);

        let found = page.find_pill("usd_val").unwrap();
        assert_eq!(found.value(), "31.50");
        assert!(page.find_pill("missing_val").is_none());
    }

    #[test]
    fn direct_handle_and_page_see_the_same_state() {
        let page = Page::new();
        page.add_container("bar");
        let pill = page
            .append_pill("bar", "egx30_val", "EGX30:", "...", Some(Tone::Positive))
            .unwrap();

        pill.set("+1.24%".to_string(), Some(Tone::Positive));
        assert_eq!(page.find_pill("egx30_val").unwrap().value(), "+1.24%");
        assert_eq!(pill.tone(), Some(Tone::Positive));
    }

    #[test]
    fn find_pill_prefers_the_earliest_match_in_a_container() {
        let page = Page::new();
        page.add_container("bar");
        let first = page
            .append_pill("bar", "egx30_val", "EGX30:", "...", None)
            .unwrap();
        // A second mount into the same container appends a duplicate id.
        page.append_pill("bar", "egx30_val", "EGX30:", "...", None)
            .unwrap();
        first.set("+1.24%".to_string(), Some(Tone::Positive));

        assert_eq!(page.find_pill("egx30_val").unwrap().value(), "+1.24%");
    }

    #[test]
    fn detach_removes_only_the_given_pills() {
        let page = Page::new();
        page.add_container("bar");
        let first = page.append_pill("bar", "a_val", "A:", "...", None).unwrap();
        let second = page.append_pill("bar", "b_val", "B:", "...", None).unwrap();

        page.detach_pills("bar", &[&first]);
        assert_eq!(page.pill_count("bar"), 1);
        assert!(page.find_pill("a_val").is_none());
        assert_eq!(page.find_pill("b_val").unwrap().id(), second.id());
    }

    #[test]
    fn style_sheets_accumulate_per_injection() {
        let page = Page::new();
        assert_eq!(page.style_sheet_count(), 0);
        page.inject_style_sheet(StyleSheet::default());
        page.inject_style_sheet(StyleSheet::default());
        assert_eq!(page.style_sheet_count(), 2);
    }

    #[test]
    fn latest_style_sheet_is_the_last_injected() {
        let page = Page::new();
        assert!(page.latest_style_sheet().is_none());

        page.inject_style_sheet(StyleSheet::default());
        page.inject_style_sheet(StyleSheet {
            positive_color: "#00ff00",
            negative_color: "#ff0000",
            bold: false,
        });

        let latest = page.latest_style_sheet().unwrap();
        assert_eq!(latest.positive_color, "#00ff00");
        assert!(!latest.bold);
    }
}
