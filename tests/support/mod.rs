// tests/support/mod.rs
#![allow(dead_code)]

use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};

use rankchain::core::net::{HttpRequest, HttpResponse, Session, Transport, TransportError};

#[derive(Clone, Debug)]
pub enum Reply {
    Body(u16, String),
    Fail(TransportError),
}

pub fn ok(body: impl Into<String>) -> Reply {
    Reply::Body(200, body.into())
}

pub fn status(code: u16) -> Reply {
    Reply::Body(code, String::new())
}

/// What the transport saw, one entry per request.
#[derive(Clone, Debug)]
pub struct Recorded {
    pub session: usize,
    pub method: &'static str,
    pub url: String,
    pub headers: Vec<(&'static str, String)>,
    pub form: Option<Vec<(String, String)>>,
    /// Cookie the session held when the request went out.
    pub cookie: Option<String>,
}

impl Recorded {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.form.as_ref()?.iter().find(|(k, _)| k == name).map(|(_, v)| v.as_str())
    }
}

struct Route {
    method: &'static str,
    url_contains: String,
    reply: Reply,
}

#[derive(Default)]
struct Inner {
    routes: Vec<Route>,
    log: Mutex<Vec<Recorded>>,
    sessions: AtomicUsize,
}

/// In-memory transport. Routes are matched in insertion order by method
/// and URL substring; unmatched requests get a 404. Every session gets a
/// cookie `sid=<n>` from its first response.
#[derive(Clone, Default)]
pub struct ScriptedTransport {
    inner: Arc<Inner>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on(mut self, method: &'static str, url_contains: &str, reply: Reply) -> Self {
        let inner = Arc::get_mut(&mut self.inner).expect("configure before use");
        inner.routes.push(Route { method, url_contains: url_contains.to_string(), reply });
        self
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.inner.log.lock().unwrap().clone()
    }

    pub fn sessions_opened(&self) -> usize {
        self.inner.sessions.load(Ordering::SeqCst)
    }
}

pub struct ScriptedSession {
    id: usize,
    cookie: Option<String>,
    inner: Arc<Inner>,
}

impl ScriptedSession {
    fn exchange(
        &mut self,
        method: &'static str,
        req: &HttpRequest,
        form: Option<&[(String, String)]>,
    ) -> Result<HttpResponse, TransportError> {
        self.inner.log.lock().unwrap().push(Recorded {
            session: self.id,
            method,
            url: req.url.clone(),
            headers: req.headers.clone(),
            form: form.map(<[_]>::to_vec),
            cookie: self.cookie.clone(),
        });

        let reply = self
            .inner
            .routes
            .iter()
            .find(|r| r.method == method && req.url.contains(&r.url_contains))
            .map(|r| r.reply.clone())
            .unwrap_or_else(|| status(404));

        match reply {
            Reply::Fail(e) => Err(e),
            Reply::Body(status, body) => {
                self.cookie.get_or_insert_with(|| format!("sid={}", self.id));
                Ok(HttpResponse { status, body })
            }
        }
    }
}

impl Session for ScriptedSession {
    fn get(&mut self, req: &HttpRequest) -> Result<HttpResponse, TransportError> {
        self.exchange("GET", req, None)
    }

    fn post_form(
        &mut self,
        req: &HttpRequest,
        form: &[(String, String)],
    ) -> Result<HttpResponse, TransportError> {
        self.exchange("POST", req, Some(form))
    }
}

impl Transport for ScriptedTransport {
    type Session = ScriptedSession;

    fn open(&self) -> Result<ScriptedSession, TransportError> {
        let id = self.inner.sessions.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(ScriptedSession { id, cookie: None, inner: Arc::clone(&self.inner) })
    }
}

pub const FORM_PAGE: &str = r#"<html><body>
<form method="post" action="./CurrentORCR.aspx" id="form1">
  <input type="hidden" name="__EVENTTARGET" id="__EVENTTARGET" value="" />
  <input type="hidden" name="__VIEWSTATE" id="__VIEWSTATE" value="/wEPDwUKMTY1NDU2MTA1Mg9kFgJmD2QWAgIDD2QWAgIBD2QWBAIB" />
  <input type="hidden" name="__VIEWSTATEGENERATOR" id="__VIEWSTATEGENERATOR" value="B5C3F9A1" />
  <input type="hidden" name="__EVENTVALIDATION" id="__EVENTVALIDATION" value="/wEdAAxkQ2+9f==" />
  <select name="ctl00$ContentPlaceHolder1$ddlroundno"><option value="4">4</option></select>
</form>
</body></html>"#;

/// Result page: a narrow layout table, then the seven-column GridView
/// without header cells.
pub const RESULT_PAGE: &str = r#"<html><body>
<table id="layout"><tr><td>JoSAA</td><td>Round 4</td></tr></table>
<table id="ctl00_ContentPlaceHolder1_GridView1">
  <tr><td>Indian Institute of Technology Bombay</td><td>Computer Science and Engineering</td><td>AI</td><td>OPEN</td><td>Gender-Neutral</td><td>1</td><td>68</td></tr>
  <tr><td>Indian Institute of Technology Bombay</td><td>Computer Science and Engineering</td><td>AI</td><td>OPEN (PwD)</td><td>Gender-Neutral</td><td>2P</td><td>11P</td></tr>
  <tr><td>Indian Institute of Technology Delhi</td><td>Electrical Engineering</td><td>AI</td><td>SC</td><td>Female-only (including Supernumerary)</td><td>455 (PwD)</td><td></td></tr>
</table>
</body></html>"#;
