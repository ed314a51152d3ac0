//! Unit tests for the list and task domain, services and in-memory store.

mod support;
