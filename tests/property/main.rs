// tests/property/main.rs

mod classify;
mod limiter;
