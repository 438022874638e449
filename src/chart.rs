//! Chart projection - forecast days to plot-ready series

use ratatui::style::Color;

use crate::state::ForecastDay;

/// One plotted line
#[derive(Clone, Debug, PartialEq)]
pub struct Series {
    pub name: &'static str,
    pub color: Color,
    /// One entry per day; `None` where the API left the field out
    pub points: Vec<Option<f64>>,
}

impl Series {
    /// (x, y) runs between absent values; a gap ends the current run
    pub fn segments(&self) -> Vec<Vec<(f64, f64)>> {
        let mut segments = Vec::new();
        let mut run = Vec::new();
        for (i, y) in self.points.iter().enumerate() {
            match y {
                Some(y) => run.push((i as f64, *y)),
                None if !run.is_empty() => segments.push(std::mem::take(&mut run)),
                None => {}
            }
        }
        if !run.is_empty() {
            segments.push(run);
        }
        segments
    }
}

/// Chart-ready view of a forecast
#[derive(Clone, Debug, PartialEq)]
pub struct ChartData {
    pub title: String,
    /// X-axis labels, one date string per day
    pub labels: Vec<String>,
    /// Average, max and min, in that order
    pub series: [Series; 3],
}

impl ChartData {
    pub const AVG_COLOR: Color = Color::Rgb(75, 192, 192);
    pub const MAX_COLOR: Color = Color::Rgb(255, 99, 132);
    pub const MIN_COLOR: Color = Color::Rgb(54, 162, 235);

    /// Project forecast days in the order given
    pub fn project(city: &str, days: &[ForecastDay]) -> Self {
        let column = |f: fn(&ForecastDay) -> Option<f64>| -> Vec<Option<f64>> {
            days.iter().map(f).collect()
        };
        Self {
            title: format!("7-Day Temperature Forecast for {city}"),
            labels: days.iter().map(|d| d.date.clone()).collect(),
            series: [
                Series {
                    name: "Average Temp (°F)",
                    color: Self::AVG_COLOR,
                    points: column(|d| d.avg_temp_f),
                },
                Series {
                    name: "Max Temp (°F)",
                    color: Self::MAX_COLOR,
                    points: column(|d| d.max_temp_f),
                },
                Series {
                    name: "Min Temp (°F)",
                    color: Self::MIN_COLOR,
                    points: column(|d| d.min_temp_f),
                },
            ],
        }
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// X range; never zero-width so a single day still plots
    pub fn x_bounds(&self) -> [f64; 2] {
        [0.0, (self.len().saturating_sub(1)).max(1) as f64]
    }

    /// Y range padded to whole 5°F steps around every present value
    pub fn y_bounds(&self) -> [f64; 2] {
        let values = self.series.iter().flat_map(|s| s.points.iter().flatten());
        let (lo, hi) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });
        if lo > hi {
            return [0.0, 100.0];
        }
        let lo = (lo / 5.0).floor() * 5.0 - 5.0;
        let hi = (hi / 5.0).ceil() * 5.0 + 5.0;
        [lo, hi]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn day(date: &str, avg: Option<f64>, max: Option<f64>, min: Option<f64>) -> ForecastDay {
        ForecastDay {
            date: date.into(),
            avg_temp_f: avg,
            max_temp_f: max,
            min_temp_f: min,
        }
    }

    #[test]
    fn test_project_keeps_order_and_length() {
        let days = vec![
            day("2024-05-26", Some(61.0), Some(70.0), Some(52.0)),
            day("2024-05-24", Some(58.0), Some(64.0), Some(51.0)),
            day("2024-05-25", Some(60.0), Some(66.0), Some(50.0)),
        ];

        let chart = ChartData::project("London", &days);

        assert_eq!(chart.title, "7-Day Temperature Forecast for London");
        assert_eq!(chart.labels, vec!["2024-05-26", "2024-05-24", "2024-05-25"]);
        for series in &chart.series {
            assert_eq!(series.points.len(), 3);
        }
        assert_eq!(
            chart.series[1].points,
            vec![Some(70.0), Some(64.0), Some(66.0)]
        );
    }

    #[test]
    fn test_missing_field_stays_blank() {
        let days = vec![
            day("2024-05-24", Some(58.0), None, Some(51.0)),
            day("2024-05-25", Some(60.0), Some(66.0), Some(50.0)),
        ];

        let chart = ChartData::project("Oslo", &days);

        assert_eq!(chart.series[1].points, vec![None, Some(66.0)]);
        assert_eq!(chart.series[1].segments(), vec![vec![(1.0, 66.0)]]);
    }

    #[test]
    fn test_gap_splits_series() {
        let series = Series {
            name: "Max Temp (°F)",
            color: ChartData::MAX_COLOR,
            points: vec![Some(64.0), Some(66.0), None, Some(70.0), None, None],
        };

        assert_eq!(
            series.segments(),
            vec![vec![(0.0, 64.0), (1.0, 66.0)], vec![(3.0, 70.0)]]
        );
    }

    #[test]
    fn test_empty_forecast() {
        let chart = ChartData::project("Nowhere", &[]);
        assert!(chart.is_empty());
        assert!(chart.series.iter().all(|s| s.points.is_empty()));
        assert_eq!(chart.y_bounds(), [0.0, 100.0]);
        assert_eq!(chart.x_bounds(), [0.0, 1.0]);
    }

    #[test]
    fn test_y_bounds_pad_to_five() {
        let days = vec![day("2024-05-24", Some(58.0), Some(64.2), Some(51.0))];
        let chart = ChartData::project("London", &days);
        assert_eq!(chart.y_bounds(), [45.0, 70.0]);
    }
}
