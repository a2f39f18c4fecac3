//! Shared constants for end-to-end tests
//!
//! When the test catalog or collaborator stubs change, update only this file.

// ============================================================================
// Test Catalog
// ============================================================================

/// Songs in the POS bucket of the test catalog
pub const POSITIVE_SONGS: [&str; 4] = [
    "Happy - Pharrell Williams",
    "Good as Hell - Lizzo",
    "Walking on Sunshine - Katrina and the Waves",
    "Uptown Funk - Bruno Mars",
];

/// Songs in the NEU bucket of the test catalog
pub const NEUTRAL_SONGS: [&str; 3] = [
    "Weightless - Marconi Union",
    "Clair de Lune - Debussy",
    "Holocene - Bon Iver",
];

/// Songs in the NEG bucket of the test catalog, fewer than a full recommendation
pub const NEGATIVE_SONGS: [&str; 2] = ["Fix You - Coldplay", "Lean on Me - Bill Withers"];

// ============================================================================
// Stub Collaborators
// ============================================================================

/// Text the stub chat model appends to every prompt it continues
pub const CHAT_CONTINUATION: &str = "That sounds like a lot, tell me more.";

/// Error message the failing classifier reports
pub const CLASSIFIER_FAILURE: &str = "inference backend unreachable";

/// Error message the failing news source reports
pub const NEWS_FAILURE: &str = "upstream rate limit";

/// API key the fake news upstream accepts
pub const NEWS_API_KEY: &str = "test-news-key";

// ============================================================================
// HTTP
// ============================================================================

/// Origin allowed by the test server's CORS layer
pub const TEST_ORIGIN: &str = "http://localhost:5173";

// ============================================================================
// Timeouts
// ============================================================================

/// Maximum time to wait for server to become ready (milliseconds)
pub const SERVER_READY_TIMEOUT_MS: u64 = 5000;

/// Interval between server readiness checks (milliseconds)
pub const SERVER_READY_POLL_INTERVAL_MS: u64 = 10;

/// Default timeout for HTTP requests in tests (seconds)
pub const REQUEST_TIMEOUT_SECS: u64 = 5;
