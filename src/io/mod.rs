//! Background fetching for the widgets.

pub mod fetcher;
pub mod loading_state;

pub use fetcher::{FetchResult, SharedStore, WidgetFetcher};
pub use loading_state::{LoadingState, WidgetKind};
