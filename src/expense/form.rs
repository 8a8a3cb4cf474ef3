use maud::{Markup, html};

use crate::{
    endpoints,
    expense::core::{ExpenseFields, PaymentMethod},
    html::{
        FORM_LABEL_STYLE, FORM_RADIO_GROUP_STYLE, FORM_RADIO_INPUT_STYLE, FORM_RADIO_LABEL_STYLE,
        FORM_TEXT_INPUT_STYLE,
    },
};

/// The inputs for the fields of an expense, pre-filled with `values`.
///
/// Typing into the category input fetches matching known categories into a
/// `<datalist>`.
pub fn expense_form_fields(values: &ExpenseFields) -> Markup {
    html! {
        div
        {
            label
                for="amount"
                class=(FORM_LABEL_STYLE)
            {
                "Amount"
            }

            input
                name="amount"
                id="amount"
                type="number"
                step="0.01"
                min="0.01"
                placeholder="0.00"
                required
                value=(values.amount)
                class=(FORM_TEXT_INPUT_STYLE);
        }

        div
        {
            label
                for="description"
                class=(FORM_LABEL_STYLE)
            {
                "Description"
            }

            input
                name="description"
                id="description"
                type="text"
                placeholder="Description"
                required
                value=(values.description)
                class=(FORM_TEXT_INPUT_STYLE);
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
                required
                value=(values.date)
                class=(FORM_TEXT_INPUT_STYLE);
        }

        div
        {
            label
                for="category"
                class=(FORM_LABEL_STYLE)
            {
                "Category"
            }

            input
                name="category"
                id="category"
                type="text"
                placeholder="Category"
                required
                autocomplete="off"
                list="category-suggestions"
                value=(values.category)
                hx-get=(endpoints::CATEGORY_SUGGESTIONS)
                hx-trigger="input changed delay:200ms"
                hx-target="#category-suggestions"
                hx-swap="innerHTML"
                class=(FORM_TEXT_INPUT_STYLE);

            datalist id="category-suggestions" {}
        }

        fieldset
        {
            legend class=(FORM_LABEL_STYLE) { "Payment method" }

            div class=(FORM_RADIO_GROUP_STYLE)
            {
                @for payment_method in PaymentMethod::ALL {
                    @let id = format!("payment-method-{}", payment_method.as_str());

                    div class="flex-1"
                    {
                        input
                            name="payment_method"
                            id=(id)
                            type="radio"
                            value=(payment_method.as_str())
                            checked[values.payment_method == payment_method]
                            required
                            class=(FORM_RADIO_INPUT_STYLE);

                        label for=(id) class=(FORM_RADIO_LABEL_STYLE) { (payment_method) }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use scraper::{Html, Selector};

    use crate::{
        endpoints,
        expense::{
            core::{ExpenseFields, PaymentMethod},
            form::expense_form_fields,
        },
    };

    fn render(values: &ExpenseFields) -> Html {
        Html::parse_fragment(&expense_form_fields(values).into_string())
    }

    #[test]
    fn prefills_values() {
        let html = render(&ExpenseFields {
            amount: "12.50".to_owned(),
            description: "Lunch".to_owned(),
            date: "2024-01-15".to_owned(),
            category: "Food".to_owned(),
            payment_method: PaymentMethod::Credit,
        });

        for (name, want) in [
            ("amount", "12.50"),
            ("description", "Lunch"),
            ("date", "2024-01-15"),
            ("category", "Food"),
        ] {
            let input = html
                .select(&Selector::parse(&format!("input[name={name}]")).unwrap())
                .next()
                .unwrap_or_else(|| panic!("could not find input {name}"));
            assert_eq!(input.value().attr("value"), Some(want), "wrong value for {name}");
            assert!(input.value().attr("required").is_some(), "{name} should be required");
        }

        let checked = html
            .select(&Selector::parse("input[name=payment_method][checked]").unwrap())
            .next()
            .expect("no payment method checked");
        assert_eq!(checked.value().attr("value"), Some("credit"));
    }

    #[test]
    fn category_input_fetches_suggestions() {
        let html = render(&ExpenseFields::default());

        let input = html
            .select(&Selector::parse("input[name=category]").unwrap())
            .next()
            .expect("could not find category input");
        assert_eq!(
            input.value().attr("hx-get"),
            Some(endpoints::CATEGORY_SUGGESTIONS)
        );
        assert_eq!(input.value().attr("list"), Some("category-suggestions"));
        assert!(
            html.select(&Selector::parse("datalist#category-suggestions").unwrap())
                .next()
                .is_some()
        );
    }
}
