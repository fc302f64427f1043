//! KPI cards showing the totals for the current filtered view.

use maud::{Markup, html};

use crate::{html::format_currency, summary::KpiTotals};

const CARD_STYLE: &str = "bg-white dark:bg-gray-800 border border-gray-200 \
    dark:border-gray-700 rounded-lg p-4 shadow-md flex flex-col";

const CARD_LABEL_STYLE: &str = "text-sm text-gray-600 dark:text-gray-400 mb-1";

/// Renders the income, expense, and balance cards for `totals`.
pub(super) fn kpi_cards_view(totals: &KpiTotals) -> Markup {
    let balance_color = if totals.balance >= 0.0 {
        "text-blue-600 dark:text-blue-400"
    } else {
        "text-red-600 dark:text-red-400"
    };

    html! {
        section class="w-full mx-auto mb-4" {
            div class="grid grid-cols-1 sm:grid-cols-3 gap-4" {
                div class=(CARD_STYLE) {
                    div class=(CARD_LABEL_STYLE) { "Income" }
                    div class="text-3xl font-bold text-green-600 dark:text-green-400" {
                        (format_currency(totals.income))
                    }
                }

                div class=(CARD_STYLE) {
                    div class=(CARD_LABEL_STYLE) { "Expenses" }
                    div class="text-3xl font-bold text-red-600 dark:text-red-400" {
                        (format_currency(totals.expense))
                    }
                }

                div class=(CARD_STYLE) {
                    div class=(CARD_LABEL_STYLE) { "Balance" }
                    div class=(format!("text-3xl font-bold {balance_color}")) {
                        (format_currency(totals.balance))
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod kpi_cards_tests {
    use scraper::{Html, Selector};

    use crate::summary::KpiTotals;

    use super::kpi_cards_view;

    #[test]
    fn renders_all_three_totals() {
        let totals = KpiTotals {
            income: 1000.0,
            expense: 500.0,
            balance: 500.0,
        };

        let markup = kpi_cards_view(&totals).into_string();

        assert!(markup.contains("$1,000.00"));
        assert!(markup.contains("$500.00"));
    }

    #[test]
    fn negative_balance_is_styled_red() {
        let totals = KpiTotals {
            income: 0.0,
            expense: 500.0,
            balance: -500.0,
        };

        let html = Html::parse_fragment(&kpi_cards_view(&totals).into_string());
        let selector = Selector::parse("div.text-3xl").unwrap();

        let balance_card = html
            .select(&selector)
            .last()
            .expect("expected a balance card");
        let class = balance_card.value().attr("class").unwrap();

        assert!(
            class.contains("text-red-600"),
            "want red balance text, got classes {class:?}"
        );
    }
}
