//! HTTP clients for the BiasLens read API and upstream news feeds.

pub mod client;
pub mod error;
pub mod feed;
pub mod rss;

pub use client::ArticlesClient;
pub use error::ClientError;
pub use feed::load_articles;
pub use rss::{parse_feed, FeedCollector};
