// src/config/consts.rs

// Admissions cutoff form (ASP.NET WebForms page)
pub const ORCR_URL: &str =
    "https://josaa.admissions.nic.in/applicant/SeatAllotmentResult/CurrentORCR.aspx";

// Hidden state tokens replayed verbatim from the GET into the POST
pub const FIELD_VIEWSTATE: &str = "__VIEWSTATE";
pub const FIELD_VIEWSTATE_GENERATOR: &str = "__VIEWSTATEGENERATOR";
pub const FIELD_EVENT_VALIDATION: &str = "__EVENTVALIDATION";
pub const TOKEN_FIELDS: [&str; 3] = [
    FIELD_VIEWSTATE,
    FIELD_VIEWSTATE_GENERATOR,
    FIELD_EVENT_VALIDATION,
];

// Always posted empty
pub const EMPTY_EVENT_FIELDS: [&str; 3] = ["__EVENTTARGET", "__EVENTARGUMENT", "__LASTFOCUS"];

// Selection dropdowns
pub const FIELD_ROUND: &str = "ctl00$ContentPlaceHolder1$ddlroundno";
pub const FIELD_INSTITUTE_TYPE: &str = "ctl00$ContentPlaceHolder1$ddlInstype";
pub const FIELD_INSTITUTE: &str = "ctl00$ContentPlaceHolder1$ddlInstitute";
pub const FIELD_PROGRAM: &str = "ctl00$ContentPlaceHolder1$ddlBranch";
pub const FIELD_SEAT_TYPE: &str = "ctl00$ContentPlaceHolder1$ddlSeatType";

pub const FIELD_SUBMIT: &str = "ctl00$ContentPlaceHolder1$btnSubmit";
pub const SUBMIT_MARKER: &str = "Submit";

pub const SELECT_ALL: &str = "ALL";
pub const DEFAULT_ROUND: u32 = 4;

// Option chain source
pub const NSE_BASE_URL: &str = "https://www.nseindia.com";
pub const CHAIN_API_PATH: &str = "/api/option-chain-indices";
pub const QUOTE_PAGE_PATH: &str = "/get-quotes/derivatives";
pub const MARKET_PAGE_PATH: &str = "/market-data/live-equity-market";
pub const MARKET_PAGE_SYMBOLS: [&str; 1] = ["NIFTY"];

// Day-month abbreviation-year, e.g. "28-Nov-2024"
pub const EXPIRY_FORMAT: &str = "%d-%b-%Y";

// Browser-like headers; both sources reject obvious bots
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
    (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";
pub const ACCEPT_HTML: &str =
    "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";
pub const ACCEPT_JSON: &str = "application/json, text/javascript, */*; q=0.01";
pub const ACCEPT_LANGUAGE: &str = "en-US,en;q=0.9";

// Timeouts (seconds): short for bootstrap GETs, longer for the data-bearing call
pub const FORM_PAGE_TIMEOUT_SECS: u64 = 20;
pub const FORM_SUBMIT_TIMEOUT_SECS: u64 = 60;
pub const CHAIN_BOOTSTRAP_TIMEOUT_SECS: u64 = 10;
pub const CHAIN_API_TIMEOUT_SECS: u64 = 15;

// Table recovery
pub const MIN_TABLE_COLUMNS_EXCLUSIVE: usize = 5;
pub const CANONICAL_WIDTH: usize = 7;
pub const CANONICAL_COLUMNS: [&str; CANONICAL_WIDTH] = [
    "Institute",
    "Program",
    "Quota",
    "Category",
    "Gender",
    "OpeningRank",
    "ClosingRank",
];
// A first row needs this many distinct canonical hits to count as a header
pub const HEADER_MIN_MATCHES: usize = 4;

// Concurrency
pub const WORKERS: usize = 4;
pub const REQUEST_PAUSE_MS: u64 = 250; // be polite
pub const JITTER_MS: u64 = 50; // extra 0..50 ms
