pub mod city_input;
pub mod conditions_card;
pub mod dashboard;
pub mod error_banner;
pub mod forecast_chart;
pub mod location_header;

// Re-export core Component trait
pub use tui_dispatch::Component;

pub use city_input::{CityInput, CityInputProps};
pub use conditions_card::{ConditionsCard, ConditionsCardProps};
pub use dashboard::{Dashboard, DashboardProps};
pub use error_banner::{ERROR_ICON, ErrorBanner, ErrorBannerProps};
pub use forecast_chart::{ForecastChart, ForecastChartProps};
pub use location_header::{LocationHeader, LocationHeaderProps};
