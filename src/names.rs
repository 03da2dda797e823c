pub const DASHBOARD_URL: &str = "/";
pub const CHART_CONTROLS_URL: &str = "/chart/controls";
pub const TREND_CHART_URL: &str = "/chart/trend";
pub const GENDER_CHART_URL: &str = "/chart/gender";
pub const LOCATIONS_CHART_URL: &str = "/chart/locations";
pub const QUIZ_URL: &str = "/quiz";
pub const SUBMIT_ANSWER_URL: &str = "/submit-answer";
pub const ADMIN_URL: &str = "/admin";
pub const CREATE_QUESTION_URL: &str = "/admin/question";

pub const QUIZ_SESSION_COOKIE_NAME: &str = "quiz_session";

// Upstream REST API
pub const DEFAULT_API_BASE: &str = "http://127.0.0.1:8000";
pub const REQUEST_TIMEOUT_SECS: u64 = 5;

pub const GAMES_PATH: &str = "/all";
pub const QUESTION_PATH: &str = "/question";
pub const RESPONSE_PATH: &str = "/response";
pub const RESPONSE_SEARCH_PATH: &str = "/response/search";
