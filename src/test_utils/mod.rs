#![allow(missing_docs)]

mod form;
mod html;
mod http;

pub(crate) use form::{
    assert_form_input, assert_form_input_with_value, assert_form_submit_button_with_text,
    assert_hx_endpoint, must_get_form,
};
pub(crate) use html::{assert_valid_html, parse_html_document, parse_html_fragment};
pub(crate) use http::assert_hx_redirect;
