//! Line-oriented client for the code rule checker.
//!
//! Configuration comes from the environment (see
//! [`rulecheck_client::config`]): `RULECHECK_BASE_URL`, `RULECHECK_STATE_PATH`,
//! `RULECHECK_DEBUG`, `RULECHECK_LANGUAGE` and `RULECHECK_LOG`.
//!
//! The session id is restored from the state file at startup and written back
//! whenever it is generated or edited with `/session <id>`.

pub mod app;
pub mod commands;
