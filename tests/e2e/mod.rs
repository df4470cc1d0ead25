// End-to-end integration tests for ExamVoice Backend API
//
// These tests use a shared testcontainers PostgreSQL instance with a database
// pool for test isolation. Each test receives its own isolated database from
// the pool, allowing tests to run in parallel without conflicts.
//
// Architecture:
// - One shared PostgreSQL container for the entire test suite
// - Database pool creates/manages isolated databases (test_db_<uuid>)
// - Each test gets a unique database via test-context lifecycle hooks
// - Speech synthesis is replaced by an in-memory stub that records every
//   text it is asked to narrate, so tests can assert on synthesis calls
// - Media files land in a per-test temp directory

mod test_health;
mod test_player;
mod test_questions;
mod test_segments;
