//! The shared form fields for creating and editing entries.

use maud::{Markup, html};
use time::Date;

use crate::{
    category::categories_for,
    entry::EntryKind,
    html::{
        FORM_LABEL_STYLE, FORM_RADIO_GROUP_STYLE, FORM_RADIO_INPUT_STYLE, FORM_RADIO_LABEL_STYLE,
        FORM_TEXT_INPUT_STYLE,
    },
};

/// The values to pre-fill the entry form with.
pub(super) struct EntryFormDefaults<'a> {
    pub kind: EntryKind,
    pub category: Option<&'a str>,
    pub amount: Option<f64>,
    pub date: Date,
    pub note: Option<&'a str>,
}

/// Renders the form fields for an entry.
///
/// The category select offers the whole registry, split into an optgroup per
/// kind, so no client-side code is needed to swap the options when the kind
/// changes.
pub(super) fn entry_form_fields(defaults: &EntryFormDefaults<'_>) -> Markup {
    let is_expense = matches!(defaults.kind, EntryKind::Expense);
    let amount_str = defaults.amount.map(|amount| format!("{:.2}", amount.abs()));
    let amount_placeholder = amount_str.as_deref().unwrap_or("0.01");

    html! {
        fieldset class="space-y-2"
        {
            legend class=(FORM_LABEL_STYLE) { "Entry kind" }

            div class=(FORM_RADIO_GROUP_STYLE)
            {
                div class="flex items-center gap-3"
                {
                    input
                        name="type"
                        id="entry-kind-expense"
                        type="radio"
                        value="expense"
                        checked[is_expense]
                        required
                        tabindex="0"
                        class=(FORM_RADIO_INPUT_STYLE);

                    label
                        for="entry-kind-expense"
                        class=(FORM_RADIO_LABEL_STYLE)
                    {
                        "Expense"
                    }
                }

                div class="flex items-center gap-3"
                {
                    input
                        name="type"
                        id="entry-kind-income"
                        type="radio"
                        value="income"
                        checked[!is_expense]
                        required
                        tabindex="0"
                        class=(FORM_RADIO_INPUT_STYLE);

                    label
                        for="entry-kind-income"
                        class=(FORM_RADIO_LABEL_STYLE)
                    {
                        "Income"
                    }
                }
            }
        }

        div
        {
            label
                for="category"
                class=(FORM_LABEL_STYLE)
            {
                "Category"
            }

            select
                name="category"
                id="category"
                required
                class=(FORM_TEXT_INPUT_STYLE)
            {
                option value="" { "Select a category" }

                optgroup label="Expense" {
                    @for category in categories_for(Some(EntryKind::Expense)) {
                        (category_option(category, defaults.category))
                    }
                }

                optgroup label="Income" {
                    @for category in categories_for(Some(EntryKind::Income)) {
                        (category_option(category, defaults.category))
                    }
                }
            }
        }

        div
        {
            label
                for="amount"
                class=(FORM_LABEL_STYLE)
            {
                "Amount"
            }

            div class="input-wrapper w-full"
            {
                input
                    name="amount"
                    id="amount"
                    type="number"
                    step="0.01"
                    placeholder=(amount_placeholder)
                    min="0.01"
                    required
                    value=[amount_str.as_deref()]
                    class=(FORM_TEXT_INPUT_STYLE);
            }
        }

        div
        {
            label
                for="date"
                class=(FORM_LABEL_STYLE)
            {
                "Date"
            }

            input
                name="date"
                id="date"
                type="date"
                value=(defaults.date)
                required
                class=(FORM_TEXT_INPUT_STYLE);
        }

        div
        {
            label
                for="note"
                class=(FORM_LABEL_STYLE)
            {
                "Note"
            }

            textarea
                name="note"
                id="note"
                placeholder="Optional"
                class=(FORM_TEXT_INPUT_STYLE)
            {
                @if let Some(note) = defaults.note { (note) }
            }
        }
    }
}

fn category_option(category: &str, selected: Option<&str>) -> Markup {
    html!(
        @if selected == Some(category) {
            option value=(category) selected { (category) }
        } @else {
            option value=(category) { (category) }
        }
    )
}

#[cfg(test)]
mod entry_form_tests {
    use scraper::{Html, Selector};
    use time::macros::date;

    use crate::{category::categories_for, entry::EntryKind};

    use super::{EntryFormDefaults, entry_form_fields};

    fn render_fields(defaults: &EntryFormDefaults) -> Html {
        let fields = entry_form_fields(defaults);
        let markup = maud::html! { form { (fields) } };
        Html::parse_document(&markup.into_string())
    }

    fn defaults(kind: EntryKind) -> EntryFormDefaults<'static> {
        EntryFormDefaults {
            kind,
            category: None,
            amount: None,
            date: date!(2024 - 01 - 15),
            note: None,
        }
    }

    #[test]
    fn checks_selected_kind() {
        let cases = [
            (EntryKind::Expense, "expense"),
            (EntryKind::Income, "income"),
        ];

        for (kind, expected) in cases {
            let html = render_fields(&defaults(kind));
            assert_checked_value(&html, expected);
        }
    }

    #[test]
    fn offers_every_registry_category() {
        let html = render_fields(&defaults(EntryKind::Expense));
        let selector = Selector::parse("select[name=category] option").unwrap();

        let options: Vec<String> = html
            .select(&selector)
            .map(|option| option.text().collect())
            .collect();

        for category in categories_for(None) {
            assert!(
                options.iter().any(|option| option == category),
                "missing category option {category}"
            );
        }
    }

    #[test]
    fn preselects_the_entry_category() {
        let mut form_defaults = defaults(EntryKind::Expense);
        form_defaults.category = Some("Food");

        let html = render_fields(&form_defaults);
        let selector = Selector::parse("option[selected]").unwrap();

        let selected: Vec<&str> = html
            .select(&selector)
            .filter_map(|option| option.value().attr("value"))
            .collect();

        assert_eq!(selected, vec!["Food"]);
    }

    #[track_caller]
    fn assert_checked_value(document: &Html, expected: &str) {
        let selector = Selector::parse("input[type=radio][name=type]").unwrap();
        let inputs = document.select(&selector).collect::<Vec<_>>();
        assert_eq!(
            inputs.len(),
            2,
            "want 2 entry kind inputs, got {}",
            inputs.len()
        );

        let checked = inputs
            .iter()
            .find(|input| input.value().attr("checked").is_some())
            .and_then(|input| input.value().attr("value"));
        assert_eq!(
            checked,
            Some(expected),
            "want checked entry kind to be {expected}, got {checked:?}"
        );
    }
}
