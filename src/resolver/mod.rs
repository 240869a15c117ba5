//! HTML view over `piazza://` addresses
//!
//! This module maps the three address levels onto API calls:
//! - `piazza://` lists the enrolled classes
//! - `piazza://<class>` shows the class resource page and lists its threads
//! - `piazza://<class>/<post>` renders a thread and all of its replies
//!
//! Every level answers with one HTML string of raw text and anchor lines.

mod address;
mod flatten;
mod links;
mod render;

pub use address::{class_address, post_address, Address, PIAZZA_SCHEME};
pub use flatten::flatten;
pub use links::{extract_links, normalize_link};
pub use render::urls_to_html;

use crate::resources::fetch_resource_page;
use crate::rpc::{Network, RpcClient};
use crate::{PiazzaError, Result};
use std::collections::{BTreeSet, HashMap};

/// Resolves `piazza://` addresses to HTML
///
/// Remembers every class seen by a root listing; class and thread
/// addresses are only served for classes it remembers.
#[derive(Debug)]
pub struct HtmlResolver {
    client: RpcClient,
    networks: HashMap<String, Network>,
}

impl HtmlResolver {
    /// Wraps a logged-in client
    pub fn new(client: RpcClient) -> Self {
        Self {
            client,
            networks: HashMap::new(),
        }
    }

    /// The underlying RPC client
    pub fn client(&self) -> &RpcClient {
        &self.client
    }

    /// Mutable access to the underlying RPC client
    pub fn client_mut(&mut self) -> &mut RpcClient {
        &mut self.client
    }

    /// Unwraps the RPC client, forgetting the known classes
    pub fn into_client(self) -> RpcClient {
        self.client
    }

    /// The class recorded under `class_id`, if a root listing has seen it
    pub fn network(&self, class_id: &str) -> Option<&Network> {
        self.networks.get(class_id)
    }

    /// Resolves one address to HTML
    ///
    /// # Errors
    ///
    /// * `PiazzaError::Scheme` - the address is not a `piazza://` address
    /// * `PiazzaError::NotResolved` - class or thread of a class no root listing has returned
    /// * any transport, decode or service error of the calls involved
    ///
    /// # Example
    ///
    /// ```no_run
    /// use piazza_api::{Config, HtmlResolver, RpcClient};
    ///
    /// # async fn example() -> piazza_api::Result<()> {
    /// let client = RpcClient::connect(Config::default(), "me@example.com", "secret").await?;
    /// let mut resolver = HtmlResolver::new(client);
    /// let classes = resolver.get("piazza://").await?;
    /// println!("{}", classes);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn get(&mut self, address: &str) -> Result<String> {
        match Address::parse(address)? {
            Address::Root => self.list_classes().await,
            Address::Class { class_id } => self.list_class(&class_id).await,
            Address::Post { class_id, post_id } => self.render_thread(&class_id, &post_id).await,
        }
    }

    /// Lists the enrolled classes and records them
    async fn list_classes(&mut self) -> Result<String> {
        let status = self.client.user_status().await?;

        let mut classes = BTreeSet::new();
        for network in status.networks {
            if network.id.is_empty() {
                continue;
            }
            classes.insert(class_address(&network.id));
            self.networks.insert(network.id.clone(), network);
        }

        tracing::info!("Listed {} classes", classes.len());
        Ok(urls_to_html(&classes))
    }

    /// Renders the resource page of a class followed by its threads
    async fn list_class(&self, class_id: &str) -> Result<String> {
        let network = self.require_network(class_id)?;
        let resources = self.resource_page_or_empty(network).await;
        let feed = self.client.feed(class_id).await?;

        let mut links = extract_links(&resources);
        links.extend(
            feed.feed
                .iter()
                .filter(|entry| !entry.id.is_empty())
                .map(|entry| post_address(class_id, &entry.id)),
        );

        tracing::info!("Listed {} threads in class {}", feed.feed.len(), class_id);
        Ok(resources + &urls_to_html(&links))
    }

    /// Fetches the resource page body, falling back to an empty body
    ///
    /// This is the one place where a failed fetch does not abort the
    /// resolve. A non-200 page still contributes its body.
    async fn resource_page_or_empty(&self, network: &Network) -> String {
        let url = network.resource_url(&self.client.session().config().service.site_url);

        match fetch_resource_page(self.client.session(), &url).await {
            Ok(page) => {
                if page.status != 200 {
                    tracing::warn!("Resource page {} answered {}", url, page.status);
                }
                match page.resources() {
                    Ok(resources) => {
                        tracing::debug!("Class {} has {} resources", network.id, resources.len());
                    }
                    Err(e) => {
                        tracing::debug!("No resource data on {}: {}", url, e);
                    }
                }
                page.body
            }
            Err(e) => {
                tracing::warn!("Skipping resource page {}: {}", url, e);
                String::new()
            }
        }
    }

    /// Renders every revision of a thread and its replies
    async fn render_thread(&self, class_id: &str, post_id: &str) -> Result<String> {
        self.require_network(class_id)?;
        let post = self.client.content(class_id, post_id).await?;

        let mut html = String::new();
        for p in flatten(&post) {
            for revision in &p.history {
                html.push_str(&revision.content);
                html.push_str(&urls_to_html(extract_links(&revision.content)));
            }
        }
        Ok(html)
    }

    fn require_network(&self, class_id: &str) -> Result<&Network> {
        self.networks
            .get(class_id)
            .ok_or_else(|| PiazzaError::NotResolved {
                class_id: class_id.to_string(),
            })
    }
}
