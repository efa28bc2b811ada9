// src/specs/orcr.rs
//
// Admissions cutoff (ORCR) form. The page is an ASP.NET WebForm: a GET
// hands out three hidden state tokens and a session cookie; the POST that
// replays them with the selection returns the result table.

use std::fmt;

use crate::config::consts::*;
use crate::config::options::{FormOptions, Selection};
use crate::core::html;
use crate::core::net::{HttpRequest, Session, Transport};
use crate::error::{Result, SourceError};
use crate::log::redact;
use crate::schema::RawTable;

/// The three hidden fields, held as blind strings in [`TOKEN_FIELDS`] order.
#[derive(Clone, PartialEq, Eq)]
pub struct TokenBag {
    values: [String; 3],
}

impl TokenBag {
    /// Pull every required token out of the form page.
    /// A page missing any of them carries no usable session.
    pub fn from_page(doc: &str) -> Result<Self> {
        let mut inputs = html::input_values(doc);
        let mut take = |name: &str| {
            inputs.remove(name).ok_or_else(|| {
                SourceError::SourceUnavailable(format!("form page is missing {name}"))
            })
        };
        let values = [take(TOKEN_FIELDS[0])?, take(TOKEN_FIELDS[1])?, take(TOKEN_FIELDS[2])?];
        Ok(Self { values })
    }

    fn pairs(&self) -> impl Iterator<Item = (String, String)> + '_ {
        TOKEN_FIELDS.iter().zip(&self.values).map(|(k, v)| (s!(*k), v.clone()))
    }
}

impl fmt::Debug for TokenBag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for (name, value) in TOKEN_FIELDS.iter().zip(&self.values) {
            map.entry(name, &redact(value));
        }
        map.finish()
    }
}

/// Response body of the submission. Owned, never retained past the call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawFormResult {
    pub body: String,
}

impl RawFormResult {
    pub fn tables(&self) -> Vec<RawTable> {
        html::extract_tables(&self.body)
    }
}

/// POST body in wire order: empty event fields, tokens, selection, submit.
pub fn build_form(tokens: &TokenBag, sel: &Selection) -> Vec<(String, String)> {
    let mut form: Vec<(String, String)> =
        EMPTY_EVENT_FIELDS.iter().map(|k| (s!(*k), s!())).collect();
    form.extend(tokens.pairs());
    form.extend([
        (s!(FIELD_ROUND), sel.round.to_string()),
        (s!(FIELD_INSTITUTE_TYPE), sel.institute_type.clone()),
        (s!(FIELD_INSTITUTE), sel.institute_name.clone()),
        (s!(FIELD_PROGRAM), sel.program_name.clone()),
        (s!(FIELD_SEAT_TYPE), sel.seat_category.clone()),
        (s!(FIELD_SUBMIT), s!(SUBMIT_MARKER)),
    ]);
    form
}

pub struct FormSessionClient<'a, T: Transport> {
    transport: &'a T,
    options: FormOptions,
}

impl<'a, T: Transport> FormSessionClient<'a, T> {
    pub fn new(transport: &'a T, options: FormOptions) -> Self {
        Self { transport, options }
    }

    /// GET the form, replay its tokens with `sel`, return the result page.
    /// Both requests run in one fresh session.
    pub fn fetch(&self, sel: &Selection) -> Result<RawFormResult> {
        let url = self.options.url.as_str();
        let mut session = self.transport.open()?;

        let page_req = HttpRequest::new(url, self.options.page_timeout())
            .header("Accept", ACCEPT_HTML)
            .header("Referer", url);
        let page = session.get(&page_req)?.error_for_status(url)?;

        let tokens = TokenBag::from_page(&page.body)?;
        logd!("form tokens captured: {tokens:?}");

        logf!(
            "submitting round {} (type {}, seat {})",
            sel.round, sel.institute_type, sel.seat_category
        );
        let submit_req = HttpRequest::new(url, self.options.submit_timeout())
            .header("Accept", ACCEPT_HTML)
            .header("Referer", url);
        let resp = session
            .post_form(&submit_req, &build_form(&tokens, sel))?
            .error_for_status(url)?;

        logd!("form result: {} bytes", resp.body.len());
        Ok(RawFormResult { body: resp.body })
    }
}
