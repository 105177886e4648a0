// =============================================================================
// APP PATHS
// =============================================================================

/// Sign-in page, target of unauthenticated redirects
pub const PATH_LOGIN: &str = "/auth/signin";

/// OAuth callback page on the web app
pub const PATH_AUTH_CALLBACK: &str = "/auth/callback";

/// Default landing page after a successful sign-in
pub const PATH_DASHBOARD: &str = "/dashboard";

pub const PATH_HOME: &str = "/";

// =============================================================================
// DASHBOARD DEFAULTS
// =============================================================================

/// Default simulation budget in IDR
pub const DEFAULT_SIMULATION_BUDGET: f64 = 10_000_000_000.0;

/// Coverage radius reported for recommended facilities when the backend omits one
pub const DEFAULT_COVERAGE_RADIUS_KM: f64 = 5.0;

/// Number of sub-districts shown in the "least coverage" panel
pub const LEAST_COVERED_LIMIT: usize = 4;

/// Chat messages kept per session and sent as assistant context
pub const CHAT_HISTORY_LIMIT: usize = 20;
