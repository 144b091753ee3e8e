pub const TEST_USER_AGENT: &str = "pitwall-test-suite";

/// Retries beyond the first attempt; keep in step with retry-path tests that
/// count requests.
pub const TEST_MAX_RETRIES: u32 = 2;
