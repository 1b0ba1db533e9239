//! A small market-ticker bar for the terminal: EGX30 and EGX70 daily
//! change plus the USD/EGP rate, pulled from a JSON feed every five
//! minutes and drawn as three colored pills.

pub mod cli;
pub mod feed;
pub mod formatting;
pub mod page;
pub mod render;
pub mod widget;

pub use feed::{FeedClient, FeedError, MarketSnapshot};
pub use page::Page;
pub use widget::{MarketBarHandle, REFRESH_INTERVAL, mount, mount_every};
