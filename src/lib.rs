pub mod carousel;
pub mod config;
pub mod contact;
pub mod http;
pub mod storage;
pub mod theme;
pub mod wheel;
pub mod widgets;

// Export UI-independent controllers
pub use carousel::{Carousel, CarouselView, Direction, Pager};
pub use wheel::{
    plan_spin, PendingSpin, SectorLayout, SpinPlan, SpinToken, WheelSpinResolver, WheelState,
};

// Export configuration and persistence
pub use config::{CardGrid, ConfigError, FolioConfig, Gallery};
pub use storage::{DailyCache, JsonFileStore, KeyValueStore, MemoryStore, StorageError};

// Export HTTP seam
pub use http::{FetchError, HttpClient, HttpResponse, ReqwestClient};

// Export widget support
pub use contact::ContactForm;
pub use widgets::WidgetError;

// Export theme support
pub use theme::{adjust_brightness, hex_to_color32, with_alpha, Theme, ThemeColors, ThemeManager};
