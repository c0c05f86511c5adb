//! Test fixtures and constants.

/// First recipient of every initialized test project.
pub const ALICE: &str = "alice";

/// Second person, holding key 1.
pub const BOB: &str = "bob";

/// Environment created by `Test::init`.
pub const LOCAL: &str = "local";

/// Standard shared secrets used across tests.
pub const STANDARD_SECRETS: &[(&str, &str)] = &[
    ("DATABASE_URL", "postgres://localhost/mydb"),
    ("API_KEY", "sk-test-12345"),
    ("JWT_SECRET", "super-secret-jwt-token"),
    ("REDIS_URL", "redis://localhost:6379"),
];
