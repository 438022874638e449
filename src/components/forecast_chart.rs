use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style, Stylize},
    symbols::Marker,
    text::Line,
    widgets::{Axis, Block, Chart, Dataset, GraphType, LegendPosition},
};

use super::Component;
use crate::action::Action;
use crate::chart::{ChartData, Series};

/// Three-series temperature line chart
pub struct ForecastChart;

pub struct ForecastChartProps<'a> {
    pub chart: &'a ChartData,
}

fn y_labels([lo, hi]: [f64; 2]) -> Vec<String> {
    [lo, (lo + hi) / 2.0, hi]
        .iter()
        .map(|v| format!("{v:.0}"))
        .collect()
}

/// One dataset per unbroken run so gaps stay blank; only the first is named
fn series_datasets<'a>(series: &Series, runs: &'a [Vec<(f64, f64)>]) -> Vec<Dataset<'a>> {
    runs.iter()
        .enumerate()
        .map(|(i, run)| {
            // A lone point has no line to draw
            let graph_type = if run.len() > 1 {
                GraphType::Line
            } else {
                GraphType::Scatter
            };
            let dataset = Dataset::default()
                .marker(Marker::Braille)
                .graph_type(graph_type)
                .style(Style::default().fg(series.color))
                .data(run);
            if i == 0 {
                dataset.name(series.name)
            } else {
                dataset
            }
        })
        .collect()
}

impl Component<Action> for ForecastChart {
    type Props<'a> = ForecastChartProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let chart = props.chart;

        // Datasets borrow their points, so these must outlive the widget
        let segments: Vec<Vec<Vec<(f64, f64)>>> =
            chart.series.iter().map(Series::segments).collect();
        let datasets = chart
            .series
            .iter()
            .zip(&segments)
            .flat_map(|(series, runs)| series_datasets(series, runs))
            .collect::<Vec<_>>();

        let axis_style = Style::default().fg(Color::Gray);
        let y_bounds = chart.y_bounds();
        let widget = Chart::new(datasets)
            .block(Block::bordered().title(Line::from(chart.title.clone()).bold()))
            .x_axis(
                Axis::default()
                    .title("Date")
                    .style(axis_style)
                    .bounds(chart.x_bounds())
                    .labels(chart.labels.iter().map(String::as_str)),
            )
            .y_axis(
                Axis::default()
                    .title("°F")
                    .style(axis_style)
                    .bounds(y_bounds)
                    .labels(y_labels(y_bounds)),
            )
            .legend_position(Some(LegendPosition::TopLeft));

        frame.render_widget(widget, area);
    }
}
