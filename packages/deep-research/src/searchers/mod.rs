//! Web searcher implementations.
//!
//! - [`FirecrawlSearcher`] - Firecrawl search with scraped markdown
//! - [`TavilySearcher`] - Tavily search with raw page content

mod firecrawl;
mod tavily;

pub use firecrawl::FirecrawlSearcher;
pub use tavily::TavilySearcher;
