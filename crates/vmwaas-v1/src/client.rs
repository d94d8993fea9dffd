//! Asynchronous VMware as a Service client implementation.

use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::debug;
use vmwaas_core::client::{ClientConfig, RetryPolicy, ServiceClient, ServiceClientBuilder};
use vmwaas_core::config::{ServiceConfig, DEFAULT_SERVICE_URL};
use vmwaas_core::headers::{sdk_headers, ACCEPT_LANGUAGE_HEADER, TRANSACTION_ID_HEADER};
use vmwaas_core::request::{RequestBuilder, JSON_CONTENT_TYPE};
use vmwaas_core::{Authenticator, Error, ServiceResponse};

use crate::models::{
    Cluster, DirectorSite, DirectorSitePriceQuoteResponse, DirectorSitePricingInfo,
    DirectorSiteRegions, ListClusters, ListDirectorSites, ListHostProfiles, ListPvdcs, ListVdcs,
    NewPassword, PvdcResponse, PvdcSummary, UpdateClusterResponse, Vdc,
};
use crate::options::{
    CreateDirectorSitesOptions, CreateDirectorSitesPvdcsOptions, CreateVdcOptions,
    DeleteDirectorSiteOptions, DeleteDirectorSitesPvdcsClusterOptions, DeleteVdcOptions,
    GetDirectorSiteOptions, GetDirectorSitePricingOptions, GetDirectorSitesPriceQuoteOptions,
    GetDirectorSitesPvdcsClusterOptions, GetDirectorSitesPvdcsOptions, GetVdcOptions,
    ListDirectorSiteHostProfilesOptions, ListDirectorSiteRegionsOptions,
    ListDirectorSitesOptions, ListDirectorSitesPvdcsClustersOptions,
    ListDirectorSitesPvdcsOptions, ListVdcsOptions, OperationOptions,
    ReplaceOrgAdminPasswordOptions, UpdateDirectorSitesPvdcsClusterOptions,
};
use crate::Result;

/// Service name reported in the analytics header.
pub const SERVICE_NAME: &str = "vmware";

/// API version reported in the analytics header.
pub const SERVICE_VERSION: &str = "V1";

const DIRECTOR_SITES: &str = "/director_sites";
const DIRECTOR_SITE: &str = "/director_sites/{site_id}";
const PVDCS: &str = "/director_sites/{site_id}/pvdcs";
const PVDC: &str = "/director_sites/{site_id}/pvdcs/{pvdc_id}";
const CLUSTERS: &str = "/director_sites/{site_id}/pvdcs/{pvdc_id}/clusters";
const CLUSTER: &str = "/director_sites/{site_id}/pvdcs/{pvdc_id}/clusters/{cluster_id}";
const REGIONS: &str = "/director_site_regions";
const HOST_PROFILES: &str = "/director_site_host_profiles";
const PASSWORD: &str = "/director_site_password";
const PRICING: &str = "/director_site_pricing";
const PRICE_QUOTE: &str = "/director_site_price_quote";
const VDCS: &str = "/vdcs";
const VDC: &str = "/vdcs/{vdc_id}";

/// Request body of an operation.
enum Body<'a> {
    Empty,
    /// The options struct itself, as JSON.
    Options,
    Patch(&'a [vmwaas_core::JsonPatchOperation]),
}

/// Builder for [`VmwareClient`].
#[derive(Debug)]
pub struct VmwareClientBuilder {
    inner: ServiceClientBuilder,
}

impl VmwareClientBuilder {
    /// Create a builder for the public service endpoint.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: ServiceClientBuilder::new(DEFAULT_SERVICE_URL),
        }
    }

    /// Create a builder from a loaded configuration.
    #[must_use]
    pub fn from_config(config: &ServiceConfig) -> Self {
        Self {
            inner: ServiceClientBuilder::from_config(config),
        }
    }

    /// Set the authenticator.
    #[must_use]
    pub fn with_authenticator(self, authenticator: impl Authenticator + 'static) -> Self {
        self.with_shared_authenticator(Arc::new(authenticator))
    }

    /// Set an authenticator shared with other clients.
    #[must_use]
    pub fn with_shared_authenticator(mut self, authenticator: Arc<dyn Authenticator>) -> Self {
        self.inner = self.inner.with_authenticator(authenticator);
        self
    }

    /// Override the service URL.
    #[must_use]
    pub fn with_service_url(mut self, service_url: impl Into<String>) -> Self {
        self.inner = self.inner.with_service_url(service_url);
        self
    }

    /// Override the retry policy.
    #[must_use]
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.inner = self.inner.with_retry_policy(retry);
        self
    }

    /// Override the HTTP client configuration.
    #[must_use]
    pub fn with_http_config(mut self, config: ClientConfig) -> Self {
        self.inner = self.inner.with_client_config(config);
        self
    }

    /// Set the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.inner = self.inner.with_timeout(timeout);
        self
    }

    /// Enable or disable gzip compression of request bodies.
    #[must_use]
    pub fn with_gzip(mut self, enabled: bool) -> Self {
        self.inner = self.inner.with_gzip(enabled);
        self
    }

    /// Enable or disable TLS certificate verification.
    #[must_use]
    pub fn with_tls_verify(mut self, verify: bool) -> Self {
        self.inner = self.inner.with_tls_verify(verify);
        self
    }

    /// Trust an additional CA certificate (PEM).
    #[must_use]
    pub fn with_ca_cert(mut self, path: PathBuf) -> Self {
        self.inner = self.inner.with_ca_cert(path);
        self
    }

    /// Add a header sent with every request.
    #[must_use]
    pub fn with_default_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.inner = self.inner.with_default_header(name, value);
        self
    }

    /// Use a pre-built `reqwest` client.
    #[must_use]
    pub fn with_http_client(mut self, client: reqwest::Client) -> Self {
        self.inner = self.inner.with_http_client(client);
        self
    }

    /// Build the client.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] if the authenticator is missing or
    /// invalid, or the service URL cannot be parsed.
    pub fn build(self) -> Result<VmwareClient> {
        let inner = self.inner.build()?;
        Ok(VmwareClient { inner })
    }
}

impl Default for VmwareClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Asynchronous VMware as a Service client.
///
/// Clones share the authenticator and the connection pool; configuration
/// changes made through one clone do not affect the others.
#[derive(Debug, Clone)]
pub struct VmwareClient {
    inner: ServiceClient,
}

impl VmwareClient {
    /// Construct a client for the public endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] if the authenticator is invalid.
    pub fn new(authenticator: impl Authenticator + 'static) -> Result<Self> {
        VmwareClientBuilder::new()
            .with_authenticator(authenticator)
            .build()
    }

    /// Start a builder.
    #[must_use]
    pub fn builder() -> VmwareClientBuilder {
        VmwareClientBuilder::new()
    }

    /// Service URL for a region.
    ///
    /// # Errors
    ///
    /// Always returns [`Error::ConfigError`]; the service has a single
    /// global endpoint.
    pub fn service_url_for_region(region: &str) -> Result<String> {
        Err(Error::ConfigError(format!(
            "service does not support regional URLs (region `{region}`)"
        )))
    }

    /// The underlying dispatcher.
    #[must_use]
    pub fn service(&self) -> &ServiceClient {
        &self.inner
    }

    /// Return the service URL.
    #[must_use]
    pub fn service_url(&self) -> &str {
        self.inner.service_url()
    }

    /// Point this client at another service URL.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] if the URL is empty or invalid.
    pub fn set_service_url(&mut self, service_url: &str) -> Result<()> {
        self.inner.set_service_url(service_url)
    }

    /// Replace the headers sent with every request.
    pub fn set_default_headers(&mut self, headers: BTreeMap<String, String>) {
        self.inner.set_default_headers(headers);
    }

    /// Enable retries; zero arguments select 4 retries and a 30 second cap.
    pub fn enable_retries(&mut self, max_retries: u32, max_retry_interval: Duration) {
        self.inner.enable_retries(max_retries, max_retry_interval);
    }

    /// Disable retries.
    pub fn disable_retries(&mut self) {
        self.inner.disable_retries();
    }

    /// Enable or disable gzip compression of request bodies.
    pub fn set_enable_gzip_compression(&mut self, enabled: bool) {
        self.inner.set_enable_gzip_compression(enabled);
    }

    /// Whether request bodies are compressed.
    #[must_use]
    pub fn gzip_compression_enabled(&self) -> bool {
        self.inner.is_gzip_enabled()
    }

    /// Order a director site with its PVDCs and clusters.
    pub async fn create_director_sites(
        &self,
        options: &CreateDirectorSitesOptions,
    ) -> Result<ServiceResponse<DirectorSite>> {
        self.create_director_sites_with_token(options, &CancellationToken::new())
            .await
    }

    /// [`Self::create_director_sites`] with cancellation.
    pub async fn create_director_sites_with_token(
        &self,
        options: &CreateDirectorSitesOptions,
        token: &CancellationToken,
    ) -> Result<ServiceResponse<DirectorSite>> {
        self.invoke(
            "create_director_sites",
            Method::POST,
            DIRECTOR_SITES,
            &[],
            options,
            Body::Options,
            token,
        )
        .await
    }

    /// List director sites.
    pub async fn list_director_sites(
        &self,
        options: &ListDirectorSitesOptions,
    ) -> Result<ServiceResponse<ListDirectorSites>> {
        self.list_director_sites_with_token(options, &CancellationToken::new())
            .await
    }

    /// [`Self::list_director_sites`] with cancellation.
    pub async fn list_director_sites_with_token(
        &self,
        options: &ListDirectorSitesOptions,
        token: &CancellationToken,
    ) -> Result<ServiceResponse<ListDirectorSites>> {
        self.invoke(
            "list_director_sites",
            Method::GET,
            DIRECTOR_SITES,
            &[],
            options,
            Body::Empty,
            token,
        )
        .await
    }

    /// Fetch a director site.
    pub async fn get_director_site(
        &self,
        options: &GetDirectorSiteOptions,
    ) -> Result<ServiceResponse<DirectorSite>> {
        self.get_director_site_with_token(options, &CancellationToken::new())
            .await
    }

    /// [`Self::get_director_site`] with cancellation.
    pub async fn get_director_site_with_token(
        &self,
        options: &GetDirectorSiteOptions,
        token: &CancellationToken,
    ) -> Result<ServiceResponse<DirectorSite>> {
        self.invoke(
            "get_director_site",
            Method::GET,
            DIRECTOR_SITE,
            &[("site_id", &options.site_id)],
            options,
            Body::Empty,
            token,
        )
        .await
    }

    /// Delete a director site.
    pub async fn delete_director_site(
        &self,
        options: &DeleteDirectorSiteOptions,
    ) -> Result<ServiceResponse<DirectorSite>> {
        self.delete_director_site_with_token(options, &CancellationToken::new())
            .await
    }

    /// [`Self::delete_director_site`] with cancellation.
    pub async fn delete_director_site_with_token(
        &self,
        options: &DeleteDirectorSiteOptions,
        token: &CancellationToken,
    ) -> Result<ServiceResponse<DirectorSite>> {
        self.invoke(
            "delete_director_site",
            Method::DELETE,
            DIRECTOR_SITE,
            &[("site_id", &options.site_id)],
            options,
            Body::Empty,
            token,
        )
        .await
    }

    /// List the PVDCs of a director site.
    pub async fn list_director_sites_pvdcs(
        &self,
        options: &ListDirectorSitesPvdcsOptions,
    ) -> Result<ServiceResponse<ListPvdcs>> {
        self.list_director_sites_pvdcs_with_token(options, &CancellationToken::new())
            .await
    }

    /// [`Self::list_director_sites_pvdcs`] with cancellation.
    pub async fn list_director_sites_pvdcs_with_token(
        &self,
        options: &ListDirectorSitesPvdcsOptions,
        token: &CancellationToken,
    ) -> Result<ServiceResponse<ListPvdcs>> {
        self.invoke(
            "list_director_sites_pvdcs",
            Method::GET,
            PVDCS,
            &[("site_id", &options.site_id)],
            options,
            Body::Empty,
            token,
        )
        .await
    }

    /// Add a PVDC to a director site.
    pub async fn create_director_sites_pvdcs(
        &self,
        options: &CreateDirectorSitesPvdcsOptions,
    ) -> Result<ServiceResponse<PvdcResponse>> {
        self.create_director_sites_pvdcs_with_token(options, &CancellationToken::new())
            .await
    }

    /// [`Self::create_director_sites_pvdcs`] with cancellation.
    pub async fn create_director_sites_pvdcs_with_token(
        &self,
        options: &CreateDirectorSitesPvdcsOptions,
        token: &CancellationToken,
    ) -> Result<ServiceResponse<PvdcResponse>> {
        self.invoke(
            "create_director_sites_pvdcs",
            Method::POST,
            PVDCS,
            &[("site_id", &options.site_id)],
            options,
            Body::Options,
            token,
        )
        .await
    }

    /// Fetch a PVDC.
    pub async fn get_director_sites_pvdcs(
        &self,
        options: &GetDirectorSitesPvdcsOptions,
    ) -> Result<ServiceResponse<PvdcSummary>> {
        self.get_director_sites_pvdcs_with_token(options, &CancellationToken::new())
            .await
    }

    /// [`Self::get_director_sites_pvdcs`] with cancellation.
    pub async fn get_director_sites_pvdcs_with_token(
        &self,
        options: &GetDirectorSitesPvdcsOptions,
        token: &CancellationToken,
    ) -> Result<ServiceResponse<PvdcSummary>> {
        self.invoke(
            "get_director_sites_pvdcs",
            Method::GET,
            PVDC,
            &[("site_id", &options.site_id), ("pvdc_id", &options.pvdc_id)],
            options,
            Body::Empty,
            token,
        )
        .await
    }

    /// List the clusters of a PVDC.
    pub async fn list_director_sites_pvdcs_clusters(
        &self,
        options: &ListDirectorSitesPvdcsClustersOptions,
    ) -> Result<ServiceResponse<ListClusters>> {
        self.list_director_sites_pvdcs_clusters_with_token(options, &CancellationToken::new())
            .await
    }

    /// [`Self::list_director_sites_pvdcs_clusters`] with cancellation.
    pub async fn list_director_sites_pvdcs_clusters_with_token(
        &self,
        options: &ListDirectorSitesPvdcsClustersOptions,
        token: &CancellationToken,
    ) -> Result<ServiceResponse<ListClusters>> {
        self.invoke(
            "list_director_sites_pvdcs_clusters",
            Method::GET,
            CLUSTERS,
            &[("site_id", &options.site_id), ("pvdc_id", &options.pvdc_id)],
            options,
            Body::Empty,
            token,
        )
        .await
    }

    /// Fetch a cluster.
    pub async fn get_director_sites_pvdcs_cluster(
        &self,
        options: &GetDirectorSitesPvdcsClusterOptions,
    ) -> Result<ServiceResponse<Cluster>> {
        self.get_director_sites_pvdcs_cluster_with_token(options, &CancellationToken::new())
            .await
    }

    /// [`Self::get_director_sites_pvdcs_cluster`] with cancellation.
    pub async fn get_director_sites_pvdcs_cluster_with_token(
        &self,
        options: &GetDirectorSitesPvdcsClusterOptions,
        token: &CancellationToken,
    ) -> Result<ServiceResponse<Cluster>> {
        self.invoke(
            "get_director_sites_pvdcs_cluster",
            Method::GET,
            CLUSTER,
            &[
                ("site_id", &options.site_id),
                ("pvdc_id", &options.pvdc_id),
                ("cluster_id", &options.cluster_id),
            ],
            options,
            Body::Empty,
            token,
        )
        .await
    }

    /// Delete a cluster.
    pub async fn delete_director_sites_pvdcs_cluster(
        &self,
        options: &DeleteDirectorSitesPvdcsClusterOptions,
    ) -> Result<ServiceResponse<PvdcResponse>> {
        self.delete_director_sites_pvdcs_cluster_with_token(options, &CancellationToken::new())
            .await
    }

    /// [`Self::delete_director_sites_pvdcs_cluster`] with cancellation.
    pub async fn delete_director_sites_pvdcs_cluster_with_token(
        &self,
        options: &DeleteDirectorSitesPvdcsClusterOptions,
        token: &CancellationToken,
    ) -> Result<ServiceResponse<PvdcResponse>> {
        self.invoke(
            "delete_director_sites_pvdcs_cluster",
            Method::DELETE,
            CLUSTER,
            &[
                ("site_id", &options.site_id),
                ("pvdc_id", &options.pvdc_id),
                ("cluster_id", &options.cluster_id),
            ],
            options,
            Body::Empty,
            token,
        )
        .await
    }

    /// Apply a JSON Patch to a cluster, e.g. to change its host count.
    ///
    /// The change is applied asynchronously; poll the cluster to observe it.
    pub async fn update_director_sites_pvdcs_cluster(
        &self,
        options: &UpdateDirectorSitesPvdcsClusterOptions,
    ) -> Result<ServiceResponse<UpdateClusterResponse>> {
        self.update_director_sites_pvdcs_cluster_with_token(options, &CancellationToken::new())
            .await
    }

    /// [`Self::update_director_sites_pvdcs_cluster`] with cancellation.
    pub async fn update_director_sites_pvdcs_cluster_with_token(
        &self,
        options: &UpdateDirectorSitesPvdcsClusterOptions,
        token: &CancellationToken,
    ) -> Result<ServiceResponse<UpdateClusterResponse>> {
        let patch = options.body.as_deref().unwrap_or_default();
        self.invoke(
            "update_director_sites_pvdcs_cluster",
            Method::PATCH,
            CLUSTER,
            &[
                ("site_id", &options.site_id),
                ("pvdc_id", &options.pvdc_id),
                ("cluster_id", &options.cluster_id),
            ],
            options,
            Body::Patch(patch),
            token,
        )
        .await
    }

    /// List regions and their data centers.
    pub async fn list_director_site_regions(
        &self,
        options: &ListDirectorSiteRegionsOptions,
    ) -> Result<ServiceResponse<DirectorSiteRegions>> {
        self.list_director_site_regions_with_token(options, &CancellationToken::new())
            .await
    }

    /// [`Self::list_director_site_regions`] with cancellation.
    pub async fn list_director_site_regions_with_token(
        &self,
        options: &ListDirectorSiteRegionsOptions,
        token: &CancellationToken,
    ) -> Result<ServiceResponse<DirectorSiteRegions>> {
        self.invoke(
            "list_director_site_regions",
            Method::GET,
            REGIONS,
            &[],
            options,
            Body::Empty,
            token,
        )
        .await
    }

    /// List host profiles.
    pub async fn list_director_site_host_profiles(
        &self,
        options: &ListDirectorSiteHostProfilesOptions,
    ) -> Result<ServiceResponse<ListHostProfiles>> {
        self.list_director_site_host_profiles_with_token(options, &CancellationToken::new())
            .await
    }

    /// [`Self::list_director_site_host_profiles`] with cancellation.
    pub async fn list_director_site_host_profiles_with_token(
        &self,
        options: &ListDirectorSiteHostProfilesOptions,
        token: &CancellationToken,
    ) -> Result<ServiceResponse<ListHostProfiles>> {
        self.invoke(
            "list_director_site_host_profiles",
            Method::GET,
            HOST_PROFILES,
            &[],
            options,
            Body::Empty,
            token,
        )
        .await
    }

    /// Reset the director organization administrator password.
    pub async fn replace_org_admin_password(
        &self,
        options: &ReplaceOrgAdminPasswordOptions,
    ) -> Result<ServiceResponse<NewPassword>> {
        self.replace_org_admin_password_with_token(options, &CancellationToken::new())
            .await
    }

    /// [`Self::replace_org_admin_password`] with cancellation.
    pub async fn replace_org_admin_password_with_token(
        &self,
        options: &ReplaceOrgAdminPasswordOptions,
        token: &CancellationToken,
    ) -> Result<ServiceResponse<NewPassword>> {
        let builder = self
            .prepare("replace_org_admin_password", Method::PUT, PASSWORD, &[], options, token)?
            .add_query("site_id", options.site_id.as_str());
        self.dispatch(builder, options, Body::Empty).await
    }

    /// Fetch the pricing catalog.
    pub async fn get_director_site_pricing(
        &self,
        options: &GetDirectorSitePricingOptions,
    ) -> Result<ServiceResponse<DirectorSitePricingInfo>> {
        self.get_director_site_pricing_with_token(options, &CancellationToken::new())
            .await
    }

    /// [`Self::get_director_site_pricing`] with cancellation.
    pub async fn get_director_site_pricing_with_token(
        &self,
        options: &GetDirectorSitePricingOptions,
        token: &CancellationToken,
    ) -> Result<ServiceResponse<DirectorSitePricingInfo>> {
        self.invoke(
            "get_director_site_pricing",
            Method::GET,
            PRICING,
            &[],
            options,
            Body::Empty,
            token,
        )
        .await
    }

    /// Price a prospective director site.
    pub async fn get_director_sites_price_quote(
        &self,
        options: &GetDirectorSitesPriceQuoteOptions,
    ) -> Result<ServiceResponse<DirectorSitePriceQuoteResponse>> {
        self.get_director_sites_price_quote_with_token(options, &CancellationToken::new())
            .await
    }

    /// [`Self::get_director_sites_price_quote`] with cancellation.
    pub async fn get_director_sites_price_quote_with_token(
        &self,
        options: &GetDirectorSitesPriceQuoteOptions,
        token: &CancellationToken,
    ) -> Result<ServiceResponse<DirectorSitePriceQuoteResponse>> {
        self.invoke(
            "get_director_sites_price_quote",
            Method::POST,
            PRICE_QUOTE,
            &[],
            options,
            Body::Options,
            token,
        )
        .await
    }

    /// List virtual data centers.
    pub async fn list_vdcs(&self, options: &ListVdcsOptions) -> Result<ServiceResponse<ListVdcs>> {
        self.list_vdcs_with_token(options, &CancellationToken::new())
            .await
    }

    /// [`Self::list_vdcs`] with cancellation.
    pub async fn list_vdcs_with_token(
        &self,
        options: &ListVdcsOptions,
        token: &CancellationToken,
    ) -> Result<ServiceResponse<ListVdcs>> {
        self.invoke("list_vdcs", Method::GET, VDCS, &[], options, Body::Empty, token)
            .await
    }

    /// Create a virtual data center.
    pub async fn create_vdc(&self, options: &CreateVdcOptions) -> Result<ServiceResponse<Vdc>> {
        self.create_vdc_with_token(options, &CancellationToken::new())
            .await
    }

    /// [`Self::create_vdc`] with cancellation.
    pub async fn create_vdc_with_token(
        &self,
        options: &CreateVdcOptions,
        token: &CancellationToken,
    ) -> Result<ServiceResponse<Vdc>> {
        self.invoke(
            "create_vdc",
            Method::POST,
            VDCS,
            &[],
            options,
            Body::Options,
            token,
        )
        .await
    }

    /// Fetch a virtual data center.
    pub async fn get_vdc(&self, options: &GetVdcOptions) -> Result<ServiceResponse<Vdc>> {
        self.get_vdc_with_token(options, &CancellationToken::new())
            .await
    }

    /// [`Self::get_vdc`] with cancellation.
    pub async fn get_vdc_with_token(
        &self,
        options: &GetVdcOptions,
        token: &CancellationToken,
    ) -> Result<ServiceResponse<Vdc>> {
        self.invoke(
            "get_vdc",
            Method::GET,
            VDC,
            &[("vdc_id", &options.vdc_id)],
            options,
            Body::Empty,
            token,
        )
        .await
    }

    /// Delete a virtual data center.
    pub async fn delete_vdc(&self, options: &DeleteVdcOptions) -> Result<ServiceResponse<Vdc>> {
        self.delete_vdc_with_token(options, &CancellationToken::new())
            .await
    }

    /// [`Self::delete_vdc`] with cancellation.
    pub async fn delete_vdc_with_token(
        &self,
        options: &DeleteVdcOptions,
        token: &CancellationToken,
    ) -> Result<ServiceResponse<Vdc>> {
        self.invoke(
            "delete_vdc",
            Method::DELETE,
            VDC,
            &[("vdc_id", &options.vdc_id)],
            options,
            Body::Empty,
            token,
        )
        .await
    }

    #[allow(clippy::too_many_arguments)]
    async fn invoke<O, T>(
        &self,
        operation_id: &'static str,
        method: Method,
        template: &'static str,
        params: &[(&str, &str)],
        options: &O,
        body: Body<'_>,
        token: &CancellationToken,
    ) -> Result<ServiceResponse<T>>
    where
        O: OperationOptions + Serialize,
        T: DeserializeOwned,
    {
        let builder = self.prepare(operation_id, method, template, params, options, token)?;
        self.dispatch(builder, options, body).await
    }

    /// Validate options and compose everything but the body and caller headers.
    fn prepare<O>(
        &self,
        operation_id: &'static str,
        method: Method,
        template: &'static str,
        params: &[(&str, &str)],
        options: &O,
        token: &CancellationToken,
    ) -> Result<RequestBuilder>
    where
        O: OperationOptions,
    {
        options.validate()?;

        debug!(operation = operation_id, %method, template, "preparing request");

        let mut builder = self
            .inner
            .new_request(method, template, params)?
            .with_token(token.clone());

        for (name, value) in sdk_headers(SERVICE_NAME, SERVICE_VERSION, operation_id) {
            builder = builder.set_header(name, value);
        }
        builder = builder.set_header("Accept", JSON_CONTENT_TYPE);

        if let Some(language) = options.accept_language() {
            builder = builder.set_header(ACCEPT_LANGUAGE_HEADER, language);
        }
        if let Some(transaction_id) = options.transaction_id() {
            builder = builder.set_header(TRANSACTION_ID_HEADER, transaction_id);
        }

        Ok(builder)
    }

    /// Attach the body, apply caller headers last, and send.
    async fn dispatch<O, T>(
        &self,
        builder: RequestBuilder,
        options: &O,
        body: Body<'_>,
    ) -> Result<ServiceResponse<T>>
    where
        O: OperationOptions + Serialize,
        T: DeserializeOwned,
    {
        let mut builder = match body {
            Body::Empty => builder,
            Body::Options => builder.set_body_json(options)?,
            Body::Patch(operations) => builder.set_body_json_patch(operations)?,
        };

        for (name, value) in options.headers() {
            builder = builder.set_header(name.as_str(), value.as_str());
        }

        self.inner.execute(builder).await
    }
}
