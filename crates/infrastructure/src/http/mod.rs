mod list_fetcher;

pub use list_fetcher::HttpListFetcher;
