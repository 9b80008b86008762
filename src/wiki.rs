use crate::browser::BrowserSession;
use crate::errors::{CheckError, Result};
use crate::percent::Percent;
use crate::table;
use crate::types::{BrowserConfig, CheckConfig};
use scraper::{Html, Selector};
use tracing::info;
use url::Url;

pub const BASE_URL: &str = "https://ru.wikipedia.org";

const SEARCH_INPUT: &str = "input[name=\"search\"]";
const SEARCH_RESULT_PRIMARY: &str = ".mw-search-result-heading a";
const SEARCH_RESULT_FALLBACK: &str = ".mw-search-results a[href*=\"/wiki/\"]";

/// Drives one browser session through the encyclopedia: search, article
/// navigation, in-article links, and composition-table reads.
///
/// Article names, captions and row labels all come from the caller; nothing
/// page-specific lives here.
pub struct WikiExplorer {
    session: BrowserSession,
    config: CheckConfig,
    base_url: String,
}

impl WikiExplorer {
    pub async fn start(browser: &BrowserConfig, config: CheckConfig) -> Result<Self> {
        let session = BrowserSession::launch(browser).await?;
        Ok(Self {
            session,
            config,
            base_url: BASE_URL.to_string(),
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn session(&self) -> &BrowserSession {
        &self.session
    }

    /// Open the main page and verify we actually landed on a wikipedia.org
    /// host before driving anything else.
    pub async fn open_home(&self) -> Result<()> {
        info!(url = %self.base_url, "opening main page");
        self.session.navigate(&self.base_url).await?;
        self.session
            .wait_until_settled(self.config.navigation_timeout_ms)
            .await?;

        let landed = self.session.current_url();
        let host_ok = Url::parse(&landed)
            .ok()
            .and_then(|u| u.host_str().map(|h| h.ends_with("wikipedia.org")))
            .unwrap_or(false);

        if !host_ok {
            return Err(CheckError::NavigationFailed(format!(
                "landed on unexpected URL: {}",
                landed
            )));
        }

        Ok(())
    }

    /// Run a site search and land on the article. The search may go straight
    /// to the article or to a results page; the results page is detected and
    /// its first hit is opened.
    pub async fn search(&self, term: &str) -> Result<()> {
        info!(term, "searching");
        self.session
            .wait_for_element(SEARCH_INPUT, self.config.navigation_timeout_ms)
            .await?;
        self.session.type_into(SEARCH_INPUT, term).await?;
        self.session.submit_enclosing_form(SEARCH_INPUT).await?;
        self.session.wait_for_navigation().await?;
        self.session
            .wait_until_settled(self.config.navigation_timeout_ms)
            .await?;

        if self.on_search_results_page().await? {
            info!("search returned a results page, opening first hit");
            self.open_first_result().await?;
        }

        Ok(())
    }

    async fn on_search_results_page(&self) -> Result<bool> {
        if self.session.current_url().contains("fulltext") {
            return Ok(true);
        }

        let title = self.session.title().await?;
        if title.contains("Поиск") || title.contains("Результаты поиска") {
            return Ok(true);
        }

        let heading = self.session.inner_text("h1").await?.unwrap_or_default();
        Ok(heading.contains("Результаты поиска"))
    }

    // One fallback attempt only: the result-heading anchor, then any article
    // link inside the results list.
    async fn open_first_result(&self) -> Result<()> {
        let selector = if self.session.element_exists(SEARCH_RESULT_PRIMARY).await? {
            SEARCH_RESULT_PRIMARY
        } else {
            self.session
                .wait_for_element(SEARCH_RESULT_FALLBACK, self.config.element_timeout_ms)
                .await?;
            SEARCH_RESULT_FALLBACK
        };

        self.session.click(selector).await?;
        self.session.wait_for_navigation().await?;
        self.session
            .wait_until_settled(self.config.navigation_timeout_ms)
            .await?;

        Ok(())
    }

    /// Wait for the article heading and require it to contain `text`.
    pub async fn expect_heading_contains(&self, text: &str) -> Result<()> {
        self.session
            .wait_for_element("h1", self.config.element_timeout_ms)
            .await?;

        let heading = self.session.inner_text("h1").await?.unwrap_or_default();
        if heading.contains(text) {
            Ok(())
        } else {
            Err(CheckError::HeadingMismatch {
                expected: text.to_string(),
                actual: heading,
            })
        }
    }

    /// Click the first in-article link whose href contains one of the given
    /// fragments (callers pass both the raw and the percent-encoded form).
    /// If no fragment matches, the page HTML is scanned for an anchor with
    /// the given visible text and that link is clicked by its exact href.
    pub async fn follow_link(&self, href_fragments: &[&str], link_text: &str) -> Result<()> {
        for fragment in href_fragments {
            let selector = format!("a[href*=\"{}\"]", fragment);
            if self.session.element_exists(&selector).await? {
                info!(fragment = %fragment, "following link by href");
                self.session.click(&selector).await?;
                self.session.wait_for_navigation().await?;
                self.session
                    .wait_until_settled(self.config.navigation_timeout_ms)
                    .await?;
                return Ok(());
            }
        }

        let html = self.session.page_html().await?;
        let href = link_href_by_text(&html, link_text).ok_or_else(|| {
            CheckError::ElementNotFound(format!(
                "no link with href fragments {:?} or text '{}'",
                href_fragments, link_text
            ))
        })?;

        info!(href = %href, "following link by visible text");
        let selector = format!("a[href=\"{}\"]", href);
        self.session.click(&selector).await?;
        self.session.wait_for_navigation().await?;
        self.session
            .wait_until_settled(self.config.navigation_timeout_ms)
            .await?;

        Ok(())
    }

    pub async fn percent_from_captioned_table(
        &self,
        caption: &str,
        row_label: &str,
    ) -> Result<Percent> {
        let html = self.session.page_html().await?;
        table::percent_from_captioned_table(&html, caption, row_label)
    }

    pub async fn percent_from_any_table(&self, row_label: &str) -> Result<Percent> {
        let html = self.session.page_html().await?;
        table::percent_from_any_table(&html, row_label)
    }
}

fn link_href_by_text(html: &str, link_text: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let anchor_sel = Selector::parse("a[href]").unwrap();

    document
        .select(&anchor_sel)
        .find(|a| a.text().collect::<String>().contains(link_text))
        .and_then(|a| a.value().attr("href").map(|h| h.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn link_lookup_by_visible_text() {
        let html = r#"
            <p>Подробнее: <a href="/wiki/%D0%90%D1%82%D0%BC%D0%BE%D1%81%D1%84%D0%B5%D1%80%D0%B0">
            Атмосфера Земли</a> и другие статьи.</p>
        "#;
        let href = link_href_by_text(html, "Атмосфера Земли").unwrap();
        assert_eq!(href, "/wiki/%D0%90%D1%82%D0%BC%D0%BE%D1%81%D1%84%D0%B5%D1%80%D0%B0");
    }

    #[test]
    fn link_lookup_misses_cleanly() {
        assert!(link_href_by_text("<p>ничего</p>", "Атмосфера Земли").is_none());
    }
}
