//! Per-operation option structs.
//!
//! Path identifiers are taken by each constructor. Required body fields are
//! stored as `Option` so that a struct assembled by hand (or through
//! `Default`) can still be checked with [`Validate`] before any network I/O.
//! The JSON body of an operation is the struct's own serialization; path,
//! query and header fields are skipped.

use serde::Serialize;
use std::collections::BTreeMap;
use validator::Validate;
use vmwaas_core::JsonPatchOperation;

use crate::models::{
    ClusterPrototype, PvdcPrototype, ResourceGroupIdentity, VdcDirectorSitePrototype,
    VdcEdgePrototype,
};

/// Header-related fields every option struct carries.
pub trait OperationOptions: Validate {
    /// Locale forwarded as `Accept-Language`.
    fn accept_language(&self) -> Option<&str>;

    /// Caller-chosen id forwarded as `X-Global-Transaction-ID`.
    fn transaction_id(&self) -> Option<&str>;

    /// Extra headers, applied after every other header.
    fn headers(&self) -> &BTreeMap<String, String>;
}

/// Implements [`OperationOptions`] and the shared header setters.
macro_rules! operation_options {
    ($($name:ident),+ $(,)?) => {
        $(
            impl OperationOptions for $name {
                fn accept_language(&self) -> Option<&str> {
                    self.accept_language.as_deref()
                }

                fn transaction_id(&self) -> Option<&str> {
                    self.x_global_transaction_id.as_deref()
                }

                fn headers(&self) -> &BTreeMap<String, String> {
                    &self.headers
                }
            }

            impl $name {
                /// Forward a locale as `Accept-Language`.
                #[must_use]
                pub fn with_accept_language(mut self, value: impl Into<String>) -> Self {
                    self.accept_language = Some(value.into());
                    self
                }

                /// Forward a transaction id as `X-Global-Transaction-ID`.
                #[must_use]
                pub fn with_x_global_transaction_id(mut self, value: impl Into<String>) -> Self {
                    self.x_global_transaction_id = Some(value.into());
                    self
                }

                /// Add a header that overrides anything the client would send.
                #[must_use]
                pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
                    self.headers.insert(name.into(), value.into());
                    self
                }

                /// Replace the extra headers.
                #[must_use]
                pub fn with_headers(mut self, headers: BTreeMap<String, String>) -> Self {
                    self.headers = headers;
                    self
                }
            }
        )+
    };
}

/// Options for `create_director_sites`.
#[derive(Debug, Clone, Default, Serialize, Validate)]
pub struct CreateDirectorSitesOptions {
    /// Site name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Resource group to place the site in.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_group: Option<String>,
    /// PVDCs to create with the site.
    #[validate(required)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pvdcs: Option<Vec<PvdcPrototype>>,
    /// `Accept-Language` value.
    #[serde(skip)]
    pub accept_language: Option<String>,
    /// `X-Global-Transaction-ID` value.
    #[serde(skip)]
    pub x_global_transaction_id: Option<String>,
    /// Extra headers.
    #[serde(skip)]
    pub headers: BTreeMap<String, String>,
}

impl CreateDirectorSitesOptions {
    /// Options with the required PVDC list.
    #[must_use]
    pub fn new(pvdcs: Vec<PvdcPrototype>) -> Self {
        Self {
            pvdcs: Some(pvdcs),
            ..Self::default()
        }
    }

    /// Set the PVDC list.
    #[must_use]
    pub fn with_pvdcs(mut self, pvdcs: Vec<PvdcPrototype>) -> Self {
        self.pvdcs = Some(pvdcs);
        self
    }

    /// Set the site name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the resource group.
    #[must_use]
    pub fn with_resource_group(mut self, resource_group: impl Into<String>) -> Self {
        self.resource_group = Some(resource_group.into());
        self
    }
}

/// Options for `list_director_sites`.
#[derive(Debug, Clone, Default, Serialize, Validate)]
pub struct ListDirectorSitesOptions {
    /// `Accept-Language` value.
    #[serde(skip)]
    pub accept_language: Option<String>,
    /// `X-Global-Transaction-ID` value.
    #[serde(skip)]
    pub x_global_transaction_id: Option<String>,
    /// Extra headers.
    #[serde(skip)]
    pub headers: BTreeMap<String, String>,
}

impl ListDirectorSitesOptions {
    /// Options with nothing set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

/// Options for `get_director_site`.
#[derive(Debug, Clone, Default, Serialize, Validate)]
pub struct GetDirectorSiteOptions {
    /// Director site id.
    #[serde(skip)]
    pub site_id: String,
    /// `Accept-Language` value.
    #[serde(skip)]
    pub accept_language: Option<String>,
    /// `X-Global-Transaction-ID` value.
    #[serde(skip)]
    pub x_global_transaction_id: Option<String>,
    /// Extra headers.
    #[serde(skip)]
    pub headers: BTreeMap<String, String>,
}

impl GetDirectorSiteOptions {
    /// Options for the given site.
    #[must_use]
    pub fn new(site_id: impl Into<String>) -> Self {
        Self {
            site_id: site_id.into(),
            ..Self::default()
        }
    }
}

/// Options for `delete_director_site`.
#[derive(Debug, Clone, Default, Serialize, Validate)]
pub struct DeleteDirectorSiteOptions {
    /// Director site id.
    #[serde(skip)]
    pub site_id: String,
    /// `Accept-Language` value.
    #[serde(skip)]
    pub accept_language: Option<String>,
    /// `X-Global-Transaction-ID` value.
    #[serde(skip)]
    pub x_global_transaction_id: Option<String>,
    /// Extra headers.
    #[serde(skip)]
    pub headers: BTreeMap<String, String>,
}

impl DeleteDirectorSiteOptions {
    /// Options for the given site.
    #[must_use]
    pub fn new(site_id: impl Into<String>) -> Self {
        Self {
            site_id: site_id.into(),
            ..Self::default()
        }
    }
}

/// Options for `list_director_sites_pvdcs`.
#[derive(Debug, Clone, Default, Serialize, Validate)]
pub struct ListDirectorSitesPvdcsOptions {
    /// Director site id.
    #[serde(skip)]
    pub site_id: String,
    /// `Accept-Language` value.
    #[serde(skip)]
    pub accept_language: Option<String>,
    /// `X-Global-Transaction-ID` value.
    #[serde(skip)]
    pub x_global_transaction_id: Option<String>,
    /// Extra headers.
    #[serde(skip)]
    pub headers: BTreeMap<String, String>,
}

impl ListDirectorSitesPvdcsOptions {
    /// Options for the given site.
    #[must_use]
    pub fn new(site_id: impl Into<String>) -> Self {
        Self {
            site_id: site_id.into(),
            ..Self::default()
        }
    }
}

/// Options for `create_director_sites_pvdcs`.
#[derive(Debug, Clone, Default, Serialize, Validate)]
pub struct CreateDirectorSitesPvdcsOptions {
    /// Director site id.
    #[serde(skip)]
    pub site_id: String,
    /// PVDC name.
    #[validate(required)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Data center to deploy in.
    #[validate(required)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_center: Option<String>,
    /// Clusters to create.
    #[validate(required)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clusters: Option<Vec<ClusterPrototype>>,
    /// `Accept-Language` value.
    #[serde(skip)]
    pub accept_language: Option<String>,
    /// `X-Global-Transaction-ID` value.
    #[serde(skip)]
    pub x_global_transaction_id: Option<String>,
    /// Extra headers.
    #[serde(skip)]
    pub headers: BTreeMap<String, String>,
}

impl CreateDirectorSitesPvdcsOptions {
    /// Options with every required field.
    #[must_use]
    pub fn new(
        site_id: impl Into<String>,
        name: impl Into<String>,
        data_center: impl Into<String>,
        clusters: Vec<ClusterPrototype>,
    ) -> Self {
        Self {
            site_id: site_id.into(),
            name: Some(name.into()),
            data_center: Some(data_center.into()),
            clusters: Some(clusters),
            ..Self::default()
        }
    }

    /// Set the PVDC name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the data center.
    #[must_use]
    pub fn with_data_center(mut self, data_center: impl Into<String>) -> Self {
        self.data_center = Some(data_center.into());
        self
    }

    /// Set the clusters.
    #[must_use]
    pub fn with_clusters(mut self, clusters: Vec<ClusterPrototype>) -> Self {
        self.clusters = Some(clusters);
        self
    }
}

/// Options for `get_director_sites_pvdcs`.
#[derive(Debug, Clone, Default, Serialize, Validate)]
pub struct GetDirectorSitesPvdcsOptions {
    /// Director site id.
    #[serde(skip)]
    pub site_id: String,
    /// PVDC id.
    #[serde(skip)]
    pub pvdc_id: String,
    /// `Accept-Language` value.
    #[serde(skip)]
    pub accept_language: Option<String>,
    /// `X-Global-Transaction-ID` value.
    #[serde(skip)]
    pub x_global_transaction_id: Option<String>,
    /// Extra headers.
    #[serde(skip)]
    pub headers: BTreeMap<String, String>,
}

impl GetDirectorSitesPvdcsOptions {
    /// Options for the given PVDC.
    #[must_use]
    pub fn new(site_id: impl Into<String>, pvdc_id: impl Into<String>) -> Self {
        Self {
            site_id: site_id.into(),
            pvdc_id: pvdc_id.into(),
            ..Self::default()
        }
    }
}

/// Options for `list_director_sites_pvdcs_clusters`.
#[derive(Debug, Clone, Default, Serialize, Validate)]
pub struct ListDirectorSitesPvdcsClustersOptions {
    /// Director site id.
    #[serde(skip)]
    pub site_id: String,
    /// PVDC id.
    #[serde(skip)]
    pub pvdc_id: String,
    /// `Accept-Language` value.
    #[serde(skip)]
    pub accept_language: Option<String>,
    /// `X-Global-Transaction-ID` value.
    #[serde(skip)]
    pub x_global_transaction_id: Option<String>,
    /// Extra headers.
    #[serde(skip)]
    pub headers: BTreeMap<String, String>,
}

impl ListDirectorSitesPvdcsClustersOptions {
    /// Options for the given PVDC.
    #[must_use]
    pub fn new(site_id: impl Into<String>, pvdc_id: impl Into<String>) -> Self {
        Self {
            site_id: site_id.into(),
            pvdc_id: pvdc_id.into(),
            ..Self::default()
        }
    }
}

/// Options for `get_director_sites_pvdcs_cluster`.
#[derive(Debug, Clone, Default, Serialize, Validate)]
pub struct GetDirectorSitesPvdcsClusterOptions {
    /// Director site id.
    #[serde(skip)]
    pub site_id: String,
    /// PVDC id.
    #[serde(skip)]
    pub pvdc_id: String,
    /// Cluster id.
    #[serde(skip)]
    pub cluster_id: String,
    /// `Accept-Language` value.
    #[serde(skip)]
    pub accept_language: Option<String>,
    /// `X-Global-Transaction-ID` value.
    #[serde(skip)]
    pub x_global_transaction_id: Option<String>,
    /// Extra headers.
    #[serde(skip)]
    pub headers: BTreeMap<String, String>,
}

impl GetDirectorSitesPvdcsClusterOptions {
    /// Options for the given cluster.
    #[must_use]
    pub fn new(
        site_id: impl Into<String>,
        pvdc_id: impl Into<String>,
        cluster_id: impl Into<String>,
    ) -> Self {
        Self {
            site_id: site_id.into(),
            pvdc_id: pvdc_id.into(),
            cluster_id: cluster_id.into(),
            ..Self::default()
        }
    }
}

/// Options for `delete_director_sites_pvdcs_cluster`.
#[derive(Debug, Clone, Default, Serialize, Validate)]
pub struct DeleteDirectorSitesPvdcsClusterOptions {
    /// Director site id.
    #[serde(skip)]
    pub site_id: String,
    /// PVDC id.
    #[serde(skip)]
    pub pvdc_id: String,
    /// Cluster id.
    #[serde(skip)]
    pub cluster_id: String,
    /// `Accept-Language` value.
    #[serde(skip)]
    pub accept_language: Option<String>,
    /// `X-Global-Transaction-ID` value.
    #[serde(skip)]
    pub x_global_transaction_id: Option<String>,
    /// Extra headers.
    #[serde(skip)]
    pub headers: BTreeMap<String, String>,
}

impl DeleteDirectorSitesPvdcsClusterOptions {
    /// Options for the given cluster.
    #[must_use]
    pub fn new(
        site_id: impl Into<String>,
        pvdc_id: impl Into<String>,
        cluster_id: impl Into<String>,
    ) -> Self {
        Self {
            site_id: site_id.into(),
            pvdc_id: pvdc_id.into(),
            cluster_id: cluster_id.into(),
            ..Self::default()
        }
    }
}

/// Options for `update_director_sites_pvdcs_cluster`.
///
/// The body is a JSON Patch document sent in the order given.
#[derive(Debug, Clone, Default, Serialize, Validate)]
pub struct UpdateDirectorSitesPvdcsClusterOptions {
    /// Director site id.
    #[serde(skip)]
    pub site_id: String,
    /// PVDC id.
    #[serde(skip)]
    pub pvdc_id: String,
    /// Cluster id.
    #[serde(skip)]
    pub cluster_id: String,
    /// Patch operations.
    #[validate(required)]
    #[serde(skip)]
    pub body: Option<Vec<JsonPatchOperation>>,
    /// `Accept-Language` value.
    #[serde(skip)]
    pub accept_language: Option<String>,
    /// `X-Global-Transaction-ID` value.
    #[serde(skip)]
    pub x_global_transaction_id: Option<String>,
    /// Extra headers.
    #[serde(skip)]
    pub headers: BTreeMap<String, String>,
}

impl UpdateDirectorSitesPvdcsClusterOptions {
    /// Options for the given cluster and patch.
    #[must_use]
    pub fn new(
        site_id: impl Into<String>,
        pvdc_id: impl Into<String>,
        cluster_id: impl Into<String>,
        body: Vec<JsonPatchOperation>,
    ) -> Self {
        Self {
            site_id: site_id.into(),
            pvdc_id: pvdc_id.into(),
            cluster_id: cluster_id.into(),
            body: Some(body),
            ..Self::default()
        }
    }

    /// Set the patch operations.
    #[must_use]
    pub fn with_body(mut self, body: Vec<JsonPatchOperation>) -> Self {
        self.body = Some(body);
        self
    }
}

/// Options for `list_director_site_regions`.
#[derive(Debug, Clone, Default, Serialize, Validate)]
pub struct ListDirectorSiteRegionsOptions {
    /// `Accept-Language` value.
    #[serde(skip)]
    pub accept_language: Option<String>,
    /// `X-Global-Transaction-ID` value.
    #[serde(skip)]
    pub x_global_transaction_id: Option<String>,
    /// Extra headers.
    #[serde(skip)]
    pub headers: BTreeMap<String, String>,
}

impl ListDirectorSiteRegionsOptions {
    /// Options with nothing set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

/// Options for `list_director_site_host_profiles`.
#[derive(Debug, Clone, Default, Serialize, Validate)]
pub struct ListDirectorSiteHostProfilesOptions {
    /// `Accept-Language` value.
    #[serde(skip)]
    pub accept_language: Option<String>,
    /// `X-Global-Transaction-ID` value.
    #[serde(skip)]
    pub x_global_transaction_id: Option<String>,
    /// Extra headers.
    #[serde(skip)]
    pub headers: BTreeMap<String, String>,
}

impl ListDirectorSiteHostProfilesOptions {
    /// Options with nothing set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

/// Options for `replace_org_admin_password`.
#[derive(Debug, Clone, Default, Serialize, Validate)]
pub struct ReplaceOrgAdminPasswordOptions {
    /// Director site id, sent as the `site_id` query parameter.
    #[validate(length(min = 1))]
    #[serde(skip)]
    pub site_id: String,
    /// `Accept-Language` value.
    #[serde(skip)]
    pub accept_language: Option<String>,
    /// `X-Global-Transaction-ID` value.
    #[serde(skip)]
    pub x_global_transaction_id: Option<String>,
    /// Extra headers.
    #[serde(skip)]
    pub headers: BTreeMap<String, String>,
}

impl ReplaceOrgAdminPasswordOptions {
    /// Options for the given site.
    #[must_use]
    pub fn new(site_id: impl Into<String>) -> Self {
        Self {
            site_id: site_id.into(),
            ..Self::default()
        }
    }
}

/// Options for `get_director_site_pricing`.
#[derive(Debug, Clone, Default, Serialize, Validate)]
pub struct GetDirectorSitePricingOptions {
    /// `Accept-Language` value.
    #[serde(skip)]
    pub accept_language: Option<String>,
    /// `X-Global-Transaction-ID` value.
    #[serde(skip)]
    pub x_global_transaction_id: Option<String>,
    /// Extra headers.
    #[serde(skip)]
    pub headers: BTreeMap<String, String>,
}

impl GetDirectorSitePricingOptions {
    /// Options with nothing set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

/// Options for `get_director_sites_price_quote`.
#[derive(Debug, Clone, Default, Serialize, Validate)]
pub struct GetDirectorSitesPriceQuoteOptions {
    /// Name of the prospective site.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// PVDCs to price.
    #[validate(required)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pvdcs: Option<Vec<PvdcPrototype>>,
    /// `Accept-Language` value.
    #[serde(skip)]
    pub accept_language: Option<String>,
    /// `X-Global-Transaction-ID` value.
    #[serde(skip)]
    pub x_global_transaction_id: Option<String>,
    /// Extra headers.
    #[serde(skip)]
    pub headers: BTreeMap<String, String>,
}

impl GetDirectorSitesPriceQuoteOptions {
    /// Options with the required PVDC list.
    #[must_use]
    pub fn new(pvdcs: Vec<PvdcPrototype>) -> Self {
        Self {
            pvdcs: Some(pvdcs),
            ..Self::default()
        }
    }

    /// Set the PVDC list.
    #[must_use]
    pub fn with_pvdcs(mut self, pvdcs: Vec<PvdcPrototype>) -> Self {
        self.pvdcs = Some(pvdcs);
        self
    }

    /// Set the site name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// Options for `list_vdcs`.
#[derive(Debug, Clone, Default, Serialize, Validate)]
pub struct ListVdcsOptions {
    /// `Accept-Language` value.
    #[serde(skip)]
    pub accept_language: Option<String>,
    /// `X-Global-Transaction-ID` value.
    #[serde(skip)]
    pub x_global_transaction_id: Option<String>,
    /// Extra headers.
    #[serde(skip)]
    pub headers: BTreeMap<String, String>,
}

impl ListVdcsOptions {
    /// Options with nothing set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

/// Options for `create_vdc`.
#[derive(Debug, Clone, Default, Serialize, Validate)]
pub struct CreateVdcOptions {
    /// VDC name.
    #[validate(required)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Placement of the VDC.
    #[validate(required)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub director_site: Option<VdcDirectorSitePrototype>,
    /// Edge to create with the VDC.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edge: Option<VdcEdgePrototype>,
    /// Resource group for the VDC.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_group: Option<ResourceGroupIdentity>,
    /// Provision from pre-built capacity when available.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fast_provisioning_enabled: Option<bool>,
    /// `Accept-Language` value.
    #[serde(skip)]
    pub accept_language: Option<String>,
    /// `X-Global-Transaction-ID` value.
    #[serde(skip)]
    pub x_global_transaction_id: Option<String>,
    /// Extra headers.
    #[serde(skip)]
    pub headers: BTreeMap<String, String>,
}

impl CreateVdcOptions {
    /// Options with every required field.
    #[must_use]
    pub fn new(name: impl Into<String>, director_site: VdcDirectorSitePrototype) -> Self {
        Self {
            name: Some(name.into()),
            director_site: Some(director_site),
            ..Self::default()
        }
    }

    /// Set the VDC name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the placement.
    #[must_use]
    pub fn with_director_site(mut self, director_site: VdcDirectorSitePrototype) -> Self {
        self.director_site = Some(director_site);
        self
    }

    /// Set the edge.
    #[must_use]
    pub fn with_edge(mut self, edge: VdcEdgePrototype) -> Self {
        self.edge = Some(edge);
        self
    }

    /// Set the resource group.
    #[must_use]
    pub fn with_resource_group(mut self, id: impl Into<String>) -> Self {
        self.resource_group = Some(ResourceGroupIdentity { id: id.into() });
        self
    }

    /// Enable or disable fast provisioning.
    #[must_use]
    pub const fn with_fast_provisioning(mut self, enabled: bool) -> Self {
        self.fast_provisioning_enabled = Some(enabled);
        self
    }
}

/// Options for `get_vdc`.
#[derive(Debug, Clone, Default, Serialize, Validate)]
pub struct GetVdcOptions {
    /// VDC id.
    #[serde(skip)]
    pub vdc_id: String,
    /// `Accept-Language` value.
    #[serde(skip)]
    pub accept_language: Option<String>,
    /// `X-Global-Transaction-ID` value.
    #[serde(skip)]
    pub x_global_transaction_id: Option<String>,
    /// Extra headers.
    #[serde(skip)]
    pub headers: BTreeMap<String, String>,
}

impl GetVdcOptions {
    /// Options for the given VDC.
    #[must_use]
    pub fn new(vdc_id: impl Into<String>) -> Self {
        Self {
            vdc_id: vdc_id.into(),
            ..Self::default()
        }
    }
}

/// Options for `delete_vdc`.
#[derive(Debug, Clone, Default, Serialize, Validate)]
pub struct DeleteVdcOptions {
    /// VDC id.
    #[serde(skip)]
    pub vdc_id: String,
    /// `Accept-Language` value.
    #[serde(skip)]
    pub accept_language: Option<String>,
    /// `X-Global-Transaction-ID` value.
    #[serde(skip)]
    pub x_global_transaction_id: Option<String>,
    /// Extra headers.
    #[serde(skip)]
    pub headers: BTreeMap<String, String>,
}

impl DeleteVdcOptions {
    /// Options for the given VDC.
    #[must_use]
    pub fn new(vdc_id: impl Into<String>) -> Self {
        Self {
            vdc_id: vdc_id.into(),
            ..Self::default()
        }
    }
}

operation_options!(
    CreateDirectorSitesOptions,
    ListDirectorSitesOptions,
    GetDirectorSiteOptions,
    DeleteDirectorSiteOptions,
    ListDirectorSitesPvdcsOptions,
    CreateDirectorSitesPvdcsOptions,
    GetDirectorSitesPvdcsOptions,
    ListDirectorSitesPvdcsClustersOptions,
    GetDirectorSitesPvdcsClusterOptions,
    DeleteDirectorSitesPvdcsClusterOptions,
    UpdateDirectorSitesPvdcsClusterOptions,
    ListDirectorSiteRegionsOptions,
    ListDirectorSiteHostProfilesOptions,
    ReplaceOrgAdminPasswordOptions,
    GetDirectorSitePricingOptions,
    GetDirectorSitesPriceQuoteOptions,
    ListVdcsOptions,
    CreateVdcOptions,
    GetVdcOptions,
    DeleteVdcOptions,
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FileShares, StorageType};
    use serde_json::json;

    fn pvdc() -> PvdcPrototype {
        PvdcPrototype::new(
            "p1",
            "dal10",
            vec![ClusterPrototype::new("c1", 2, "bm.lite", FileShares::default())
                .with_storage_type(StorageType::Nfs)],
        )
    }

    #[test]
    fn create_site_body_omits_header_fields() {
        let options = CreateDirectorSitesOptions::new(vec![pvdc()])
            .with_name("s1")
            .with_resource_group("rg1")
            .with_accept_language("en-US")
            .with_header("X-Test", "1");

        assert_eq!(
            serde_json::to_value(&options).unwrap(),
            json!({
                "name": "s1",
                "resource_group": "rg1",
                "pvdcs": [{
                    "name": "p1",
                    "data_center": "dal10",
                    "clusters": [{
                        "name": "c1",
                        "storage_type": "nfs",
                        "host_count": 2,
                        "file_shares": {},
                        "host_profile": "bm.lite"
                    }]
                }]
            })
        );
        assert_eq!(options.accept_language(), Some("en-US"));
        assert_eq!(options.headers().get("X-Test").map(String::as_str), Some("1"));
    }

    #[test]
    fn missing_required_fields_fail_validation() {
        let errors = CreateDirectorSitesOptions::default().validate().unwrap_err();
        assert!(errors.field_errors().contains_key("pvdcs"));

        let errors = CreateVdcOptions::default().validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("name"));
        assert!(fields.contains_key("director_site"));

        assert!(UpdateDirectorSitesPvdcsClusterOptions::default().validate().is_err());
        assert!(ReplaceOrgAdminPasswordOptions::new("").validate().is_err());
    }

    #[test]
    fn complete_options_validate() {
        assert!(CreateDirectorSitesOptions::new(vec![pvdc()]).validate().is_ok());
        assert!(CreateDirectorSitesPvdcsOptions::new("s1", "p2", "dal12", Vec::new())
            .validate()
            .is_ok());
        assert!(GetDirectorSiteOptions::new("site-1").validate().is_ok());
        assert!(ReplaceOrgAdminPasswordOptions::new("site-1").validate().is_ok());
    }

    #[test]
    fn create_vdc_body() {
        let options = CreateVdcOptions::new("vdc-1", VdcDirectorSitePrototype::new("s1", "c1"))
            .with_resource_group("rg-1")
            .with_fast_provisioning(true);

        assert_eq!(
            serde_json::to_value(&options).unwrap(),
            json!({
                "name": "vdc-1",
                "director_site": {"id": "s1", "cluster": {"id": "c1"}},
                "resource_group": {"id": "rg-1"},
                "fast_provisioning_enabled": true
            })
        );
    }
}
