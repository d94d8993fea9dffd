//! VMware as a Service models shared by the client and its option structs.
//!
//! Response models ignore unknown fields, and enumerations decode values they
//! do not know into an `Unknown` variant, so a newer service does not break an
//! older client. Optional fields are omitted from request bodies when unset.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use vmwaas_core::codec;

/// Lifecycle status of a director site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DirectorSiteStatus {
    /// Provisioning is in progress.
    Creating,
    /// The site can be used.
    ReadyToUse,
    /// A change is being applied.
    Updating,
    /// Deletion is in progress.
    Deleting,
    /// The site is gone.
    Deleted,
    /// A status this client does not know.
    #[serde(other)]
    Unknown,
}

/// Lifecycle status of a provider virtual data center or one of its clusters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PvdcStatus {
    /// Provisioning is in progress.
    Creating,
    /// Ready for workloads.
    ReadyToUse,
    /// A change is being applied.
    Modifying,
    /// Provisioning or a change failed.
    Failed,
    /// Deletion is in progress.
    Deleting,
    /// Deleted.
    Deleted,
    /// A status this client does not know.
    #[serde(other)]
    Unknown,
}

/// Lifecycle status of a virtual data center.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VdcStatus {
    /// Provisioning is in progress.
    Creating,
    /// Ready for workloads.
    ReadyToUse,
    /// A change is being applied.
    Modifying,
    /// Provisioning failed; see [`Vdc::errors`].
    Failed,
    /// Deletion is in progress.
    Deleting,
    /// Deleted.
    Deleted,
    /// A status this client does not know.
    #[serde(other)]
    Unknown,
}

/// Backing storage of a cluster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageType {
    /// NFS file shares.
    Nfs,
    /// A storage type this client does not know.
    #[serde(other)]
    Unknown,
}

/// Billing plan of a cluster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BillingPlan {
    /// Billed monthly.
    Monthly,
    /// A plan this client does not know.
    #[serde(other)]
    Unknown,
}

/// Resource allocation model of a virtual data center.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AllocationModel {
    /// Pay as you go.
    Paygo,
    /// A model this client does not know.
    #[serde(other)]
    Unknown,
}

/// Tenancy of a virtual data center.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VdcType {
    /// Runs on dedicated hosts.
    Dedicated,
    /// A type this client does not know.
    #[serde(other)]
    Unknown,
}

/// Tenancy of a network edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeType {
    /// Multi-tenant edge.
    Shared,
    /// Edge dedicated to one virtual data center.
    Dedicated,
    /// A type this client does not know.
    #[serde(other)]
    Unknown,
}

/// Size of a dedicated edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeSize {
    /// Medium.
    Medium,
    /// Large.
    Large,
    /// Extra large.
    ExtraLarge,
    /// A size this client does not know.
    #[serde(other)]
    Unknown,
}

/// File share quantities per storage tier, in GB (1024³ bytes).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileShares {
    /// 0.25 IOPS per GB.
    #[serde(
        rename = "STORAGE_POINT_TWO_FIVE_IOPS_GB",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub storage_point_two_five_iops_gb: Option<i64>,
    /// 2 IOPS per GB.
    #[serde(
        rename = "STORAGE_TWO_IOPS_GB",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub storage_two_iops_gb: Option<i64>,
    /// 4 IOPS per GB.
    #[serde(
        rename = "STORAGE_FOUR_IOPS_GB",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub storage_four_iops_gb: Option<i64>,
    /// 10 IOPS per GB.
    #[serde(
        rename = "STORAGE_TEN_IOPS_GB",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub storage_ten_iops_gb: Option<i64>,
}

impl FileShares {
    /// Set the 0.25 IOPS/GB tier.
    #[must_use]
    pub const fn with_point_two_five_iops(mut self, gb: i64) -> Self {
        self.storage_point_two_five_iops_gb = Some(gb);
        self
    }

    /// Set the 2 IOPS/GB tier.
    #[must_use]
    pub const fn with_two_iops(mut self, gb: i64) -> Self {
        self.storage_two_iops_gb = Some(gb);
        self
    }

    /// Set the 4 IOPS/GB tier.
    #[must_use]
    pub const fn with_four_iops(mut self, gb: i64) -> Self {
        self.storage_four_iops_gb = Some(gb);
        self
    }

    /// Set the 10 IOPS/GB tier.
    #[must_use]
    pub const fn with_ten_iops(mut self, gb: i64) -> Self {
        self.storage_ten_iops_gb = Some(gb);
        self
    }
}

/// Decode a raw `file_shares` value, if present.
fn project_file_shares(raw: Option<&Value>) -> Option<FileShares> {
    raw.and_then(|value| codec::project(value).ok())
}

/// A VMware Cloud Director managed infrastructure stack.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectorSite {
    /// Site identifier.
    pub id: String,
    /// Cloud resource name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crn: Option<String>,
    /// Display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Link to this resource.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    /// Lifecycle status.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<DirectorSiteStatus>,
    /// Resource group name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_group: Option<String>,
    /// Resource group identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_group_id: Option<String>,
    /// Resource group CRN.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_group_crn: Option<String>,
    /// Who ordered the site.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creator: Option<String>,
    /// When the site was ordered.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "codec::rfc3339::option"
    )]
    pub instance_ordered: Option<DateTime<Utc>>,
    /// When the site finished provisioning.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "codec::rfc3339::option"
    )]
    pub instance_created: Option<DateTime<Utc>>,
    /// Provider virtual data centers of the site.
    #[serde(default)]
    pub pvdcs: Vec<PvdcSummary>,
}

/// A provider virtual data center.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PvdcSummary {
    /// PVDC identifier.
    pub id: String,
    /// Display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Data center the PVDC is deployed in.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_center: Option<String>,
    /// Link to this resource.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    /// Lifecycle status.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<PvdcStatus>,
    /// Clusters of the PVDC.
    #[serde(default)]
    pub clusters: Vec<ClusterSummary>,
}

/// Response to PVDC and cluster mutations; same shape as [`PvdcSummary`].
pub type PvdcResponse = PvdcSummary;

/// A cluster as listed under its PVDC.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterSummary {
    /// Cluster identifier.
    pub id: String,
    /// Display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Link to this resource.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    /// Number of hosts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host_count: Option<i64>,
    /// Host profile identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host_profile: Option<String>,
    /// Lifecycle status.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<PvdcStatus>,
    /// Data center the cluster is deployed in.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_center: Option<String>,
    /// Backing storage.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_type: Option<StorageType>,
    /// File share quantities, kept as returned by the service.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_shares: Option<Value>,
}

impl ClusterSummary {
    /// Typed view of [`Self::file_shares`]; `None` if absent or not in tier form.
    #[must_use]
    pub fn file_shares_typed(&self) -> Option<FileShares> {
        project_file_shares(self.file_shares.as_ref())
    }
}

/// A set of hosts within a PVDC.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cluster {
    /// Cluster identifier.
    pub id: String,
    /// Display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Link to this resource.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    /// Number of hosts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host_count: Option<i64>,
    /// Lifecycle status.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<PvdcStatus>,
    /// Owning PVDC.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pvdc_id: Option<String>,
    /// Owning director site.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub director_site: Option<String>,
    /// Data center the cluster is deployed in.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_center: Option<String>,
    /// Host profile identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host_profile: Option<String>,
    /// Backing storage.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_type: Option<StorageType>,
    /// Billing plan.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub billing_plan: Option<BillingPlan>,
    /// File share quantities, kept as returned by the service.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_shares: Option<Value>,
    /// When the cluster was ordered.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "codec::rfc3339::option"
    )]
    pub instance_ordered: Option<DateTime<Utc>>,
    /// When the cluster finished provisioning.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "codec::rfc3339::option"
    )]
    pub instance_created: Option<DateTime<Utc>>,
}

impl Cluster {
    /// Typed view of [`Self::file_shares`]; `None` if absent or not in tier form.
    #[must_use]
    pub fn file_shares_typed(&self) -> Option<FileShares> {
        project_file_shares(self.file_shares.as_ref())
    }
}

/// Result of a cluster update; the change itself is applied asynchronously.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateClusterResponse {
    /// Free-form acknowledgement.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// A bare-metal host configuration that clusters can be built from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostProfile {
    /// Profile identifier.
    pub id: String,
    /// Number of cores.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpu: Option<i64>,
    /// Processor family.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub family: Option<String>,
    /// Processor model.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub processor: Option<String>,
    /// Memory in GB.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ram: Option<i64>,
    /// Number of sockets.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub socket: Option<i64>,
    /// Processor speed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed: Option<String>,
    /// Processor manufacturer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manufacturer: Option<String>,
    /// Additional features.
    #[serde(default)]
    pub features: Vec<String>,
}

/// A data center within a region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataCenterInfo {
    /// Data center name, e.g. `dal10`.
    pub name: String,
    /// Human-readable name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// Uplink speed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uplink_speed: Option<String>,
}

/// Data centers and endpoint of a region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionDetail {
    /// Data centers in the region.
    #[serde(default)]
    pub data_centers: Vec<DataCenterInfo>,
    /// Regional endpoint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
}

/// Regions keyed by region name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectorSiteRegions {
    /// Region name to region detail.
    #[serde(default)]
    pub director_site_regions: BTreeMap<String, RegionDetail>,
}

/// Page of director sites.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListDirectorSites {
    /// Director sites.
    #[serde(default)]
    pub director_sites: Vec<DirectorSite>,
}

/// PVDCs of a director site.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListPvdcs {
    /// PVDCs.
    #[serde(default)]
    pub pvdcs: Vec<PvdcSummary>,
}

/// Clusters of a PVDC.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListClusters {
    /// Clusters.
    #[serde(default)]
    pub clusters: Vec<ClusterSummary>,
}

/// Host profile catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListHostProfiles {
    /// Host profiles.
    #[serde(default)]
    pub director_site_host_profiles: Vec<HostProfile>,
}

/// Virtual data centers of the account.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListVdcs {
    /// Virtual data centers.
    #[serde(default)]
    pub vdcs: Vec<Vdc>,
}

/// Cluster reference inside [`VdcDirectorSite`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VdcClusterReference {
    /// Cluster identifier.
    pub id: String,
    /// Link to the cluster.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
}

/// Director site and cluster a VDC runs on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VdcDirectorSite {
    /// Director site identifier.
    pub id: String,
    /// Cluster the VDC is placed on.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cluster: Option<VdcClusterReference>,
    /// Director console URL for the VDC.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// An NSX-T network edge attached to a VDC.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    /// Edge identifier.
    pub id: String,
    /// Tenancy.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub edge_type: Option<EdgeType>,
    /// Size; only set for dedicated edges.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<EdgeSize>,
    /// Public IP addresses.
    #[serde(default)]
    pub public_ips: Vec<String>,
}

/// A provisioning error reported on a VDC.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VdcError {
    /// Error code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Link to documentation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub more_info: Option<String>,
}

/// A tenant-scoped virtual data center.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vdc {
    /// VDC identifier.
    pub id: String,
    /// Link to this resource.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    /// Display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Cloud resource name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crn: Option<String>,
    /// Allocation model.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allocation_model: Option<AllocationModel>,
    /// Lifecycle status.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<VdcStatus>,
    /// Tenancy.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub vdc_type: Option<VdcType>,
    /// Director organization name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub org_name: Option<String>,
    /// Placement.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub director_site: Option<VdcDirectorSite>,
    /// Network edges.
    #[serde(default)]
    pub edges: Vec<Edge>,
    /// Provisioning errors.
    #[serde(default)]
    pub errors: Vec<VdcError>,
    /// When the VDC was ordered.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "codec::rfc3339::option"
    )]
    pub ordered_time: Option<DateTime<Utc>>,
    /// When the VDC finished provisioning.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "codec::rfc3339::option"
    )]
    pub created_time: Option<DateTime<Utc>>,
    /// When the VDC was deleted.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "codec::rfc3339::option"
    )]
    pub deleted_time: Option<DateTime<Utc>>,
}

/// Temporary administrator password of a director organization.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPassword {
    /// The password.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl fmt::Debug for NewPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewPassword")
            .field("password", &self.password.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

/// Cost of one cluster in a price quote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterPriceQuote {
    /// Cluster name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Number of hosts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host_count: Option<i64>,
    /// Host cost.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host_cost: Option<f64>,
    /// Storage cost.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_cost: Option<f64>,
    /// Total for the cluster.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<f64>,
}

/// Price quote for a prospective director site.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DirectorSitePriceQuoteResponse {
    /// Fixed charge for the site.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_charge: Option<f64>,
    /// Per-cluster costs.
    #[serde(default)]
    pub clusters: Vec<ClusterPriceQuote>,
    /// Currency code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    /// Total cost.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<f64>,
}

/// Price for one quantity tier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierPrice {
    /// Lower bound of the tier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity_tier: Option<i64>,
    /// Unit price within the tier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
}

/// Tiered prices of a metric in one country.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryPrice {
    /// Country code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    /// Currency code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    /// Tier prices, lowest tier first.
    #[serde(default)]
    pub prices: Vec<TierPrice>,
}

/// A billable metric of a pricing entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingMetric {
    /// Part number reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub part_ref: Option<String>,
    /// Metric identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metric_id: Option<String>,
    /// Prices per country.
    #[serde(default)]
    pub country_prices: Vec<CountryPrice>,
}

/// A pricing catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingModel {
    /// Entry identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Pricing type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pricing_type: Option<String>,
    /// Currency code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    /// Billable metrics.
    #[serde(default)]
    pub metrics: Vec<PricingMetric>,
}

impl PricingModel {
    /// Prices of `metric_id` in `country`, if listed.
    #[must_use]
    pub fn prices_for(&self, metric_id: &str, country: &str) -> Option<&[TierPrice]> {
        self.metrics
            .iter()
            .filter(|metric| metric.metric_id.as_deref() == Some(metric_id))
            .flat_map(|metric| metric.country_prices.iter())
            .find(|entry| entry.country.as_deref() == Some(country))
            .map(|entry| entry.prices.as_slice())
    }
}

/// Director site pricing catalog.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DirectorSitePricingInfo {
    /// Catalog entries.
    #[serde(default)]
    pub director_site_pricing: Vec<PricingModel>,
}

/// Cluster to create inside a new PVDC.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterPrototype {
    /// Cluster name.
    pub name: String,
    /// Number of hosts.
    pub host_count: i64,
    /// Host profile identifier.
    pub host_profile: String,
    /// File share quantities.
    pub file_shares: FileShares,
    /// Backing storage.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_type: Option<StorageType>,
}

impl ClusterPrototype {
    /// Describe a cluster with its required fields.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        host_count: i64,
        host_profile: impl Into<String>,
        file_shares: FileShares,
    ) -> Self {
        Self {
            name: name.into(),
            host_count,
            host_profile: host_profile.into(),
            file_shares,
            storage_type: None,
        }
    }

    /// Set the backing storage.
    #[must_use]
    pub const fn with_storage_type(mut self, storage_type: StorageType) -> Self {
        self.storage_type = Some(storage_type);
        self
    }
}

/// PVDC to create, either with a new site or inside an existing one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PvdcPrototype {
    /// PVDC name.
    pub name: String,
    /// Data center to deploy in.
    pub data_center: String,
    /// Clusters to create.
    pub clusters: Vec<ClusterPrototype>,
}

impl PvdcPrototype {
    /// Describe a PVDC with its required fields.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        data_center: impl Into<String>,
        clusters: Vec<ClusterPrototype>,
    ) -> Self {
        Self {
            name: name.into(),
            data_center: data_center.into(),
            clusters,
        }
    }
}

/// Cluster reference used when placing a new VDC.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VdcClusterPrototype {
    /// Cluster identifier.
    pub id: String,
}

/// Placement of a new VDC.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VdcDirectorSitePrototype {
    /// Director site identifier.
    pub id: String,
    /// Cluster to place the VDC on.
    pub cluster: VdcClusterPrototype,
}

impl VdcDirectorSitePrototype {
    /// Place on `cluster_id` of `site_id`.
    #[must_use]
    pub fn new(site_id: impl Into<String>, cluster_id: impl Into<String>) -> Self {
        Self {
            id: site_id.into(),
            cluster: VdcClusterPrototype {
                id: cluster_id.into(),
            },
        }
    }
}

/// Edge to create with a new VDC.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VdcEdgePrototype {
    /// Tenancy.
    #[serde(rename = "type")]
    pub edge_type: EdgeType,
    /// Size; only meaningful for dedicated edges.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<EdgeSize>,
}

/// Resource group reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceGroupIdentity {
    /// Resource group identifier.
    pub id: String,
}
