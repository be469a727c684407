mod client;

pub use client::PostgresDocumentStore;
