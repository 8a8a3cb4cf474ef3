use scraper::{ElementRef, Html, Selector};

#[track_caller]
pub(crate) fn must_get_form(html: &Html) -> ElementRef<'_> {
    html.select(&Selector::parse("form").unwrap())
        .next()
        .expect("could not find a form")
}

#[track_caller]
pub(crate) fn assert_hx_endpoint(form: &ElementRef<'_>, endpoint: &str, attribute: &str) {
    let got = form.value().attr(attribute);

    assert_eq!(
        got,
        Some(endpoint),
        "want form with {attribute}=\"{endpoint}\", got {got:?}"
    );
}

#[track_caller]
fn must_get_input<'a>(form: &ElementRef<'a>, name: &str) -> ElementRef<'a> {
    form.select(&Selector::parse(&format!("input[name=\"{name}\"]")).unwrap())
        .next()
        .unwrap_or_else(|| panic!("could not find input with name \"{name}\""))
}

/// Check that the form has a required input called `name` of type `type_`.
#[track_caller]
pub(crate) fn assert_form_input(form: &ElementRef<'_>, name: &str, type_: &str) {
    let input = must_get_input(form, name);

    assert_eq!(
        input.value().attr("type"),
        Some(type_),
        "want input {name} to have type \"{type_}\""
    );
    assert!(
        input.value().attr("required").is_some(),
        "want input {name} to have the required attribute"
    );
}

/// Like [assert_form_input], but also checks the value the input is filled with.
#[track_caller]
pub(crate) fn assert_form_input_with_value(
    form: &ElementRef<'_>,
    name: &str,
    type_: &str,
    value: &str,
) {
    assert_form_input(form, name, type_);

    let got = must_get_input(form, name).value().attr("value");
    assert_eq!(got, Some(value), "want input {name} to have value \"{value}\"");
}

#[track_caller]
pub(crate) fn assert_form_submit_button_with_text(form: &ElementRef<'_>, text: &str) {
    let button = form
        .select(&Selector::parse("button[type=submit]").unwrap())
        .next()
        .expect("could not find a submit button");

    let got = button.text().collect::<String>();
    assert_eq!(got.trim(), text);
}
