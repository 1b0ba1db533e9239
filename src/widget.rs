//! The market bar controller: mounts the three pills into a host page
//! container and keeps them refreshed from the feed.

use crate::feed::{FeedClient, MarketSnapshot, describe_error};
use crate::formatting::{Tone, format_money, format_percent, tone_for};
use crate::page::{Layout, Page, Pill, StyleSheet};
use log::{info, warn};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};

pub const REFRESH_INTERVAL: Duration = Duration::from_secs(5 * 60);

/// Shortest accepted refresh cadence. `tokio::time::interval` panics on a
/// zero period, so anything below this is clamped up.
pub const MIN_REFRESH_INTERVAL: Duration = Duration::from_secs(1);

pub const EGX30_VALUE_ID: &str = "egx30_val";
pub const EGX70_VALUE_ID: &str = "egx70_val";
pub const USD_VALUE_ID: &str = "usd_val";

pub const CURRENCY_SUFFIX: &str = "ج";

const EGX30_LABEL: &str = "EGX30:";
const EGX70_LABEL: &str = "EGX70:";
const USD_LABEL: &str = "الدولار:";

const INDEX_PLACEHOLDER: &str = "...";
const CURRENCY_PLACEHOLDER: &str = "--.-- ج";

const PILL_GAP_PX: u16 = 10;

#[derive(Clone)]
struct Slots {
    egx30: Pill,
    egx70: Pill,
    usd: Pill,
}

/// Live mounted bar. Keeps direct handles to the three value slots and
/// owns the refresh task; `dispose` tears both down. Dropping the handle
/// without disposing leaves the refresh task running for the life of the
/// process.
pub struct MarketBarHandle {
    task: JoinHandle<()>,
    page: Page,
    container_id: String,
    slots: Slots,
    updates: watch::Receiver<u64>,
}

impl MarketBarHandle {
    /// Receiver bumped after every successful refresh cycle. Failed
    /// cycles do not notify; stale values simply remain on the page.
    #[must_use]
    pub fn updates(&self) -> watch::Receiver<u64> {
        self.updates.clone()
    }

    #[must_use]
    pub fn container_id(&self) -> &str {
        &self.container_id
    }

    /// Stops the refresh task and detaches the bar's pills from the
    /// container. Injected style sheets stay behind.
    pub fn dispose(self) {
        self.task.abort();
        self.page.detach_pills(
            &self.container_id,
            &[&self.slots.egx30, &self.slots.egx70, &self.slots.usd],
        );
        info!("market bar disposed from '{}'", self.container_id);
    }
}

/// Mounts the bar into an existing container and starts the five-minute
/// refresh loop, beginning with one immediate fetch.
///
/// Returns `None` without touching the page when the container does not
/// exist. Mounting twice into the same container appends a second set of
/// pills and a second style sheet; callers that re-mount get duplicates.
///
/// Must be called from within a tokio runtime.
pub fn mount(page: &Page, container_id: &str, feed: FeedClient) -> Option<MarketBarHandle> {
    mount_every(page, container_id, feed, REFRESH_INTERVAL)
}

/// [`mount`] with a caller-chosen refresh cadence. Cadences below
/// [`MIN_REFRESH_INTERVAL`] are clamped up to it.
pub fn mount_every(
    page: &Page,
    container_id: &str,
    feed: FeedClient,
    every: Duration,
) -> Option<MarketBarHandle> {
    if !page.has_container(container_id) {
        return None;
    }

    page.inject_style_sheet(StyleSheet::default());
    page.set_layout(
        container_id,
        Layout::Row {
            wrap: true,
            gap_px: PILL_GAP_PX,
        },
    );

    let egx30 = page.append_pill(
        container_id,
        EGX30_VALUE_ID,
        EGX30_LABEL,
        INDEX_PLACEHOLDER,
        Some(Tone::Positive),
    )?;
    let egx70 = page.append_pill(
        container_id,
        EGX70_VALUE_ID,
        EGX70_LABEL,
        INDEX_PLACEHOLDER,
        Some(Tone::Positive),
    )?;
    let usd = page.append_pill(
        container_id,
        USD_VALUE_ID,
        USD_LABEL,
        CURRENCY_PLACEHOLDER,
        None,
    )?;
    let slots = Slots { egx30, egx70, usd };

    let (tx, rx) = watch::channel(0_u64);
    let task = tokio::spawn(run_refresh_loop(feed, slots.clone(), tx, every));
    info!("market bar mounted into '{container_id}'");

    Some(MarketBarHandle {
        task,
        page: page.clone(),
        container_id: container_id.to_string(),
        slots,
        updates: rx,
    })
}

async fn run_refresh_loop(
    feed: FeedClient,
    slots: Slots,
    updates: watch::Sender<u64>,
    every: Duration,
) {
    // The first tick completes immediately, giving the initial pull.
    let mut ticker = time::interval(every.max(MIN_REFRESH_INTERVAL));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    loop {
        ticker.tick().await;
        refresh(&feed, &slots, &updates).await;
    }
}

/// One fetch-parse-update cycle. Every failure is contained here: it is
/// logged and the page is left exactly as it was.
async fn refresh(feed: &FeedClient, slots: &Slots, updates: &watch::Sender<u64>) {
    match feed.fetch().await {
        Ok(snapshot) => {
            apply_snapshot(slots, &snapshot);
            updates.send_modify(|generation| *generation += 1);
        }
        Err(err) => warn!("market.json error: {}", describe_error(&err)),
    }
}

fn apply_snapshot(slots: &Slots, snapshot: &MarketSnapshot) {
    set_percent(&slots.egx30, snapshot.egx30.chg_pct);
    set_percent(&slots.egx70, snapshot.egx70.chg_pct);
    slots.usd.set(
        format!("{} {CURRENCY_SUFFIX}", format_money(snapshot.usd_egp)),
        None,
    );
}

fn set_percent(slot: &Pill, chg_pct: f64) {
    slot.set(format_percent(chg_pct), Some(tone_for(chg_pct)));
}
