//! Effects - side effects declared by the reducer

/// Side effects that can be triggered by actions
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Fetch current conditions and the 7-day forecast for a city
    FetchForecast { request_id: u64, city: String },
}
