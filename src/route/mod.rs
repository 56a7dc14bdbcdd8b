pub mod books;
pub mod metrics;
