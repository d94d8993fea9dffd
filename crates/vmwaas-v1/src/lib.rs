//! Client and data models for the VMware as a Service v1 API.
//!
//! Provides typed option structs, resource models and an asynchronous client
//! for director sites, provider virtual data centers (PVDCs), clusters,
//! virtual data centers (VDCs) and the pricing endpoints. Transport, retries,
//! authentication and error handling live in [`vmwaas_core`].

#![deny(missing_docs)]

pub mod client;
pub mod models;
pub mod options;

pub use client::{VmwareClient, VmwareClientBuilder, SERVICE_NAME, SERVICE_VERSION};
pub use models::{
    AllocationModel, BillingPlan, Cluster, ClusterPriceQuote, ClusterPrototype, ClusterSummary,
    DataCenterInfo, DirectorSite, DirectorSitePriceQuoteResponse, DirectorSitePricingInfo,
    DirectorSiteRegions, DirectorSiteStatus, Edge, EdgeSize, EdgeType, FileShares, HostProfile,
    ListClusters, ListDirectorSites, ListHostProfiles, ListPvdcs, ListVdcs, NewPassword,
    PricingModel, PvdcPrototype, PvdcResponse, PvdcStatus, PvdcSummary, RegionDetail,
    ResourceGroupIdentity, StorageType, UpdateClusterResponse, Vdc, VdcDirectorSitePrototype,
    VdcEdgePrototype, VdcStatus, VdcType,
};
pub use options::*;

/// Convenient result alias that reuses the shared error type.
pub type Result<T> = vmwaas_core::Result<T>;
