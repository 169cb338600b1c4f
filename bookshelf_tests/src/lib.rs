//! End-to-end tests for the bookshelf services.
//! Run with `--features system_tests` against deployed services.
