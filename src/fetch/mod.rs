use std::fmt::{self, Display, Formatter};

use chrono::NaiveDate;
use reqwest::{header, Client, StatusCode};
use tracing::{instrument, Level};
use url::Url;

use crate::canteen::Canteen;
use crate::config::{Config, Credentials};
use crate::monitor::{OrderSubmitter, PageSource};
use crate::parse::OrderId;

static USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/133.0.0.0 Safari/537.36";

#[derive(Debug)]
pub enum Error {
    Transport(reqwest::Error),
    Status(StatusCode),
    Url(url::ParseError),
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Self::Transport(e)
    }
}

impl From<url::ParseError> for Error {
    fn from(e: url::ParseError) -> Self {
        Self::Url(e)
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport(e) => write!(f, "Request error: {e}"),
            Self::Status(status) => write!(f, "Unexpected HTTP status {status}"),
            Self::Url(e) => write!(f, "Invalid url: {e}"),
        }
    }
}

impl std::error::Error for Error {}

pub fn make_client(config: &Config) -> Result<Client, Error> {
    Client::builder()
        .gzip(true)
        .timeout(config.request_timeout)
        .user_agent(USER_AGENT)
        .build()
        .map_err(From::from)
}

/// Talks to the canteen ordering site with the operator's session cookies.
#[derive(Debug, Clone)]
pub struct MenzaClient {
    client: Client,
    base_url: Url,
    credentials: Credentials,
}

impl MenzaClient {
    pub fn new(config: &Config) -> Result<Self, Error> {
        Ok(Self {
            client: make_client(config)?,
            base_url: config.base_url.clone(),
            credentials: config.credentials.clone(),
        })
    }

    /// `{base}/{canteen}/{yyyy-mm-dd}/`, used for both the menu and the order form.
    pub fn day_url(&self, date: NaiveDate, canteen: Canteen) -> Result<Url, Error> {
        let path = format!("{}/{}/", canteen.slug(), date.format("%Y-%m-%d"));
        Ok(self.base_url.join(&path)?)
    }

    fn cookies(&self) -> String {
        format!(
            "mobileDetect=0; MENZA-K8={}; _shibsession_={}; MsgCh=1",
            self.credentials.menza_k8, self.credentials.shibsession
        )
    }

    #[instrument(skip_all, fields(
        canteen = %canteen,
        date = %date.format("%Y-%m-%d"),
    ), level = Level::TRACE)]
    pub async fn fetch_day_page(&self, date: NaiveDate, canteen: Canteen) -> Result<String, Error> {
        let url = self.day_url(date, canteen)?;
        let start = std::time::Instant::now();
        let res = self
            .client
            .get(url)
            .header(header::COOKIE, self.cookies())
            .header(header::ACCEPT, "text/html, */*; q=0.01")
            .header(header::ACCEPT_LANGUAGE, "cs,en;q=0.9")
            .send()
            .await?;
        if !res.status().is_success() {
            return Err(Error::Status(res.status()));
        }
        let text = res.text().await?;
        log::trace!("Got text of menu page in \t {:?}", start.elapsed());
        Ok(text)
    }

    /// Only HTTP 200 counts as a placed order.
    pub async fn place_order(
        &self,
        order_id: &OrderId,
        canteen: Canteen,
        date: NaiveDate,
    ) -> Result<(), Error> {
        let url = self.day_url(date, canteen)?;
        let canteen_id = canteen.id().to_string();
        let form = [
            ("ORDER", ""),
            ("JID", order_id.as_str()),
            ("CANTEEN", canteen_id.as_str()),
        ];
        let origin = self.base_url.origin().ascii_serialization();
        let res = self
            .client
            .post(url)
            .header(header::COOKIE, self.cookies())
            .header(header::ACCEPT, "text/html, */*; q=0.01")
            .header(header::ACCEPT_LANGUAGE, "cs,en;q=0.9")
            .header(header::REFERER, self.base_url.as_str())
            .header(header::ORIGIN, origin)
            .header("X-Requested-With", "XMLHttpRequest")
            .form(&form)
            .send()
            .await?;
        log::debug!("Order {order_id} answered with {}", res.status());
        if res.status() == StatusCode::OK {
            Ok(())
        } else {
            Err(Error::Status(res.status()))
        }
    }
}

impl PageSource for MenzaClient {
    async fn fetch(&self, date: NaiveDate, canteen: Canteen) -> Result<String, Error> {
        self.fetch_day_page(date, canteen).await
    }
}

impl OrderSubmitter for MenzaClient {
    async fn submit(&self, order_id: &OrderId, canteen: Canteen, date: NaiveDate) -> Result<(), Error> {
        self.place_order(order_id, canteen, date).await
    }
}
