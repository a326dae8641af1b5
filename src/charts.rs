//! Chart generation and rendering shared by the dashboard and reports pages.
//!
//! Each chart is generated as JSON configuration for the ECharts library and
//! rendered with a corresponding HTML container and JavaScript initialization code.

use std::collections::BTreeMap;

use charming::{
    Chart,
    component::{Axis, Grid, Legend, Title},
    element::{
        AreaStyle, AxisLabel, AxisPointer, AxisPointerType, AxisType, Emphasis, EmphasisFocus,
        JsFunction, Tooltip, Trigger,
    },
    series::{Line, bar},
};
use maud::{Markup, PreEscaped, html};
use time::Date;

use crate::{aggregation::CrossTab, html::HeadElement};

const ECHARTS_URL: &str = "https://cdn.jsdelivr.net/npm/echarts@6.0.0/dist/echarts.min.js";

/// A chart with its HTML container ID and ECharts configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartPanel {
    /// The HTML element ID to use for the chart (kebab-case)
    pub id: &'static str,
    /// The ECharts configuration as a JSON string
    pub options: String,
}

impl ChartPanel {
    pub fn new(id: &'static str, chart: Chart) -> Self {
        Self {
            id,
            options: chart.to_string(),
        }
    }
}

/// How chart values are labelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueFormat {
    /// Dollar amounts, e.g. "$1,200.00".
    Currency,
    /// Plain numbers, e.g. hours or attendees.
    Number,
}

/// Renders the HTML container for a single chart.
pub fn chart_container(chart: &ChartPanel) -> Markup {
    html!(
        div
            id=(chart.id)
            class="min-h-[380px] w-full rounded dark:bg-gray-100"
        {}
    )
}

/// The scripts that load ECharts and initialize `charts`.
pub fn charts_head_elements(charts: &[ChartPanel]) -> Vec<HeadElement> {
    vec![
        HeadElement::ScriptLink(ECHARTS_URL.to_owned()),
        charts_script(charts),
    ]
}

/// Generates JavaScript initialization code for charts.
///
/// Creates scripts that initialize ECharts instances with dark mode support
/// and responsive resizing.
fn charts_script(charts: &[ChartPanel]) -> HeadElement {
    let script_content = charts
        .iter()
        .map(|chart| {
            format!(
                r#"(function() {{
                    const chartDom = document.getElementById("{}");
                    const chart = echarts.init(chartDom);
                    const option = {};
                    chart.setOption(option);

                    window.addEventListener('resize', chart.resize);

                    const darkModeMediaQuery = window.matchMedia('(prefers-color-scheme: dark)');
                    const updateTheme = () => {{
                        const isDarkMode = darkModeMediaQuery.matches;
                        chart.setTheme(isDarkMode ? 'dark' : 'default');
                    }}
                    darkModeMediaQuery.addEventListener('change', updateTheme);
                    updateTheme();
                }})();"#,
                chart.id, chart.options
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let wrapped_script = format!(
        "document.addEventListener('DOMContentLoaded', function() {{\n{}\n}});",
        script_content
    );

    HeadElement::ScriptSource(PreEscaped(wrapped_script))
}

/// A line chart of values per date, e.g. donations over time.
pub fn date_line_chart(
    title: &str,
    series_name: &str,
    values_by_date: &BTreeMap<Date, f64>,
    format: ValueFormat,
) -> Chart {
    let labels: Vec<String> = values_by_date.keys().map(Date::to_string).collect();
    let values: Vec<f64> = values_by_date.values().copied().collect();

    base_chart(title, format)
        .x_axis(Axis::new().type_(AxisType::Category).data(labels))
        .series(Line::new().name(series_name).data(values))
}

/// A bar chart of values per category, e.g. volunteer hours by role.
pub fn category_bar_chart(
    title: &str,
    series_name: &str,
    values_by_category: &[(String, f64)],
    format: ValueFormat,
) -> Chart {
    let labels: Vec<String> = values_by_category
        .iter()
        .map(|(category, _)| category.clone())
        .collect();
    let values: Vec<f64> = values_by_category.iter().map(|(_, value)| *value).collect();

    base_chart(title, format)
        .x_axis(Axis::new().type_(AxisType::Category).data(labels))
        .series(bar::Bar::new().name(series_name).data(values))
}

/// A stacked area chart with one series per row of `table` and the dates
/// along the x-axis, e.g. donations by donor type over time.
pub fn stacked_area_chart<Row: ToString>(
    title: &str,
    table: &CrossTab<Row, Date>,
    format: ValueFormat,
) -> Chart {
    let labels: Vec<String> = table.columns.iter().map(Date::to_string).collect();

    let mut chart = base_chart(title, format)
        .legend(Legend::new().right("4%").top("1%"))
        .x_axis(Axis::new().type_(AxisType::Category).data(labels));

    for (row, values) in table.series() {
        chart = chart.series(
            Line::new()
                .name(row.to_string())
                .stack("Total")
                .area_style(AreaStyle::new())
                .emphasis(Emphasis::new().focus(EmphasisFocus::Series))
                .data(values.to_vec()),
        );
    }

    chart
}

fn base_chart(title: &str, format: ValueFormat) -> Chart {
    let y_axis = match format {
        ValueFormat::Currency => Axis::new()
            .type_(AxisType::Value)
            .axis_label(AxisLabel::new().formatter(currency_formatter())),
        ValueFormat::Number => Axis::new().type_(AxisType::Value),
    };

    Chart::new()
        .title(Title::new().text(title))
        .tooltip(axis_tooltip(format))
        .grid(
            Grid::new()
                .left("3%")
                .right("4%")
                .bottom("3%")
                .top(60)
                .contain_label(true),
        )
        .y_axis(y_axis)
}

#[inline]
fn currency_formatter() -> JsFunction {
    JsFunction::new_with_args(
        "number",
        "const currencyFormatter = new Intl.NumberFormat('en-US', {
              style: 'currency',
              currency: 'USD'
            });
            return (number) ? currencyFormatter.format(number) : \"-\";",
    )
}

/// Creates a tooltip configuration for values along a category axis.
fn axis_tooltip(format: ValueFormat) -> Tooltip {
    let tooltip = Tooltip::new()
        .trigger(Trigger::Axis)
        .axis_pointer(AxisPointer::new().type_(AxisPointerType::Shadow));

    match format {
        ValueFormat::Currency => tooltip.value_formatter(currency_formatter()),
        ValueFormat::Number => tooltip,
    }
}
