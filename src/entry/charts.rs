//! Chart generation for the ledger page.
//!
//! This module creates the two ECharts visualizations for the filtered view:
//! - **Income vs Expenses**: a donut comparing the two KPI totals
//! - **By Category**: income/expense bars per registry category
//!
//! Each chart is generated as JSON configuration for the ECharts library and
//! rendered with corresponding HTML containers and JavaScript initialization
//! code.

use charming::{
    Chart,
    component::{Axis, Grid, Legend, Title},
    element::{
        AxisLabel, AxisPointer, AxisPointerType, AxisType, Color, JsFunction, Tooltip, Trigger,
    },
    series::{Bar, Pie},
};
use maud::{Markup, PreEscaped, html};

use crate::{
    html::HeadElement,
    summary::{CategorySeries, KpiTotals},
};

/// The color used for income values, matching the KPI cards.
const INCOME_COLOR: &str = "#16a34a";
/// The color used for expense values, matching the KPI cards.
const EXPENSE_COLOR: &str = "#ef4444";

/// A ledger chart with its HTML container ID and ECharts configuration.
pub(super) struct LedgerChart {
    /// The HTML element ID to use for the chart (kebab-case)
    pub id: &'static str,
    /// The ECharts configuration as a JSON string
    pub options: String,
}

/// Creates the array of ledger charts from the filtered view.
pub(super) fn build_ledger_charts(
    totals: &KpiTotals,
    series: &CategorySeries,
) -> [LedgerChart; 2] {
    [
        LedgerChart {
            id: "kind-breakdown-chart",
            options: kind_breakdown_chart(totals).to_string(),
        },
        LedgerChart {
            id: "category-comparison-chart",
            options: category_comparison_chart(series).to_string(),
        },
    ]
}

/// Renders the HTML containers for the ledger charts.
pub(super) fn charts_view(charts: &[LedgerChart]) -> Markup {
    html!(
        section
            id="charts"
            class="w-full mx-auto mb-4"
        {
            div class="grid grid-cols-1 xl:grid-cols-2 gap-4"
            {
                @for chart in charts {
                    div
                        id=(chart.id)
                        class="min-h-[360px] rounded bg-white dark:bg-gray-100"
                    {}
                }
            }
        }
    )
}

/// Generates JavaScript initialization code for the ledger charts.
///
/// Each chart instance subscribes to window resize events for the lifetime
/// of the page; both the instance and the listener are reclaimed when the
/// page is unloaded.
pub(super) fn charts_script(charts: &[LedgerChart]) -> HeadElement {
    let script_content = charts
        .iter()
        .map(|chart| {
            format!(
                r#"(function() {{
                    const chartDom = document.getElementById("{}");
                    const chart = echarts.init(chartDom, null, {{ renderer: 'svg' }});
                    const option = {};
                    chart.setOption(option);

                    window.addEventListener('resize', chart.resize);
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

fn kind_breakdown_chart(totals: &KpiTotals) -> Chart {
    Chart::new()
        .title(Title::new().text("Income vs Expenses").left("center").top(10))
        .color(vec![Color::from(INCOME_COLOR), Color::from(EXPENSE_COLOR)])
        .tooltip(
            Tooltip::new()
                .trigger(Trigger::Item)
                .value_formatter(currency_formatter()),
        )
        .legend(Legend::new().left("center").bottom(15))
        .series(
            Pie::new()
                .name("Totals")
                .radius(vec!["42%", "68%"])
                .center(vec!["50%", "48%"])
                .data(vec![
                    (totals.income, "Income"),
                    (totals.expense, "Expenses"),
                ]),
        )
}

fn category_comparison_chart(series: &CategorySeries) -> Chart {
    // Long category axes get slanted labels so none are dropped.
    let label_rotation = if series.categories.len() > 6 { 25.0 } else { 0.0 };

    Chart::new()
        .title(Title::new().text("By Category").left("center").top(10))
        .color(vec![Color::from(INCOME_COLOR), Color::from(EXPENSE_COLOR)])
        .tooltip(currency_tooltip())
        .legend(Legend::new().top(40))
        .grid(
            Grid::new()
                .left("3%")
                .right("4%")
                .bottom("3%")
                .top(80)
                .contain_label(true),
        )
        .x_axis(
            Axis::new()
                .type_(AxisType::Category)
                .data(series.categories.clone())
                .axis_label(AxisLabel::new().rotate(label_rotation)),
        )
        .y_axis(
            Axis::new()
                .type_(AxisType::Value)
                .axis_label(AxisLabel::new().formatter(currency_formatter())),
        )
        .series(Bar::new().name("Income").data(series.income.clone()))
        .series(Bar::new().name("Expenses").data(series.expense.clone()))
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

/// Creates a tooltip configuration for currency values
fn currency_tooltip() -> Tooltip {
    Tooltip::new()
        .trigger(Trigger::Axis)
        .value_formatter(currency_formatter())
        .axis_pointer(AxisPointer::new().type_(AxisPointerType::Shadow))
}

#[cfg(test)]
mod charts_tests {
    use crate::summary::{CategorySeries, KpiTotals};

    use super::{build_ledger_charts, charts_script, charts_view};

    fn sample_series() -> CategorySeries {
        CategorySeries {
            categories: vec!["Food".to_owned(), "Salary".to_owned()],
            income: vec![0.0, 1000.0],
            expense: vec![75.0, 0.0],
        }
    }

    #[test]
    fn chart_options_contain_series_data() {
        let totals = KpiTotals {
            income: 1000.0,
            expense: 75.0,
            balance: 925.0,
        };

        let charts = build_ledger_charts(&totals, &sample_series());

        assert!(charts[0].options.contains("Income vs Expenses"));
        assert!(charts[1].options.contains("Food"));
        assert!(charts[1].options.contains("Salary"));
    }

    #[test]
    fn containers_and_script_reference_the_same_ids() {
        let totals = KpiTotals::default();
        let charts = build_ledger_charts(&totals, &sample_series());

        let containers = charts_view(&charts).into_string();
        let script = match charts_script(&charts) {
            crate::html::HeadElement::ScriptSource(source) => source.0,
            _ => panic!("expected an inline script"),
        };

        for chart in &charts {
            assert!(containers.contains(chart.id));
            assert!(script.contains(chart.id));
        }
    }
}
