//! Integration tests for parsing VMware as a Service response data.
//!
//! These tests validate that the vmwaas-v1 models can correctly deserialize
//! representative service responses.

use chrono::{Datelike, Timelike};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::Debug;
use std::fs;
use std::path::PathBuf;
use vmwaas_v1::models::{
    Cluster, DirectorSitePriceQuoteResponse, DirectorSitePricingInfo, DirectorSiteRegions,
    DirectorSiteStatus, EdgeSize, EdgeType, ListDirectorSites, ListHostProfiles, ListVdcs,
    PvdcStatus, StorageType, VdcStatus, VdcType,
};

/// Get the path to the test fixtures directory.
fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

/// Load a fixture from disk.
fn load_fixture(name: &str) -> String {
    let fixture_path = fixtures_dir().join(name);
    fs::read_to_string(&fixture_path).unwrap_or_else(|e| {
        panic!(
            "Failed to read fixture at {}: {}",
            fixture_path.display(),
            e
        )
    })
}

/// Encode `value` and decode it again.
fn reencode<T>(value: &T) -> T
where
    T: Serialize + DeserializeOwned,
{
    let encoded = serde_json::to_value(value).expect("model should serialize");
    serde_json::from_value(encoded).expect("serialized model should decode")
}

fn assert_reencodes<T>(value: &T)
where
    T: Serialize + DeserializeOwned + PartialEq + Debug,
{
    assert_eq!(&reencode(value), value);
}

#[test]
fn test_deserialize_director_site_list() {
    let json_data = load_fixture("director_sites.json");

    let list: ListDirectorSites = serde_json::from_str(&json_data).unwrap_or_else(|e| {
        panic!(
            "Failed to deserialize director site list: {}\nJSON: {}",
            e, json_data
        )
    });

    assert_eq!(list.director_sites.len(), 3, "Expected 3 sites in test data");
}

#[test]
fn test_director_site_ready() {
    let json_data = load_fixture("director_sites.json");
    let list: ListDirectorSites = serde_json::from_str(&json_data).unwrap();

    let site = &list.director_sites[0];
    assert_eq!(site.id, "site-4f2c9a");
    assert_eq!(site.name.as_deref(), Some("prod-dal"));
    assert_eq!(site.status, Some(DirectorSiteStatus::ReadyToUse));
    assert_eq!(site.resource_group_id.as_deref(), Some("rg-7a1e"));
    assert_eq!(site.creator.as_deref(), Some("ops@example.com"));

    let ordered = site.instance_ordered.expect("instance_ordered should parse");
    assert_eq!(ordered.year(), 2024);
    assert_eq!(ordered.hour(), 10);

    let created = site.instance_created.expect("instance_created should parse");
    assert_eq!(created.timestamp_subsec_millis(), 250);

    assert_eq!(site.pvdcs.len(), 1);
    let pvdc = &site.pvdcs[0];
    assert_eq!(pvdc.data_center.as_deref(), Some("dal10"));
    assert_eq!(pvdc.status, Some(PvdcStatus::ReadyToUse));

    let cluster = &pvdc.clusters[0];
    assert_eq!(cluster.host_count, Some(3));
    assert_eq!(cluster.storage_type, Some(StorageType::Nfs));

    let shares = cluster.file_shares_typed().expect("file shares should project");
    assert_eq!(shares.storage_two_iops_gb, Some(24000));
    assert_eq!(shares.storage_ten_iops_gb, Some(2000));
    assert_eq!(shares.storage_point_two_five_iops_gb, Some(0));
}

#[test]
fn test_director_site_optional_fields_absent() {
    let json_data = load_fixture("director_sites.json");
    let list: ListDirectorSites = serde_json::from_str(&json_data).unwrap();

    let site = &list.director_sites[1];
    assert_eq!(site.status, Some(DirectorSiteStatus::Creating));
    assert!(site.crn.is_none());
    assert!(site.instance_created.is_none());
    assert!(site.pvdcs.is_empty());

    // Sites without a pvdcs key still decode to an empty list.
    assert!(list.director_sites[2].pvdcs.is_empty());
}

#[test]
fn test_unknown_status_is_tolerated() {
    let json_data = load_fixture("director_sites.json");
    let list: ListDirectorSites = serde_json::from_str(&json_data).unwrap();

    assert_eq!(list.director_sites[2].status, Some(DirectorSiteStatus::Unknown));
}

#[test]
fn test_cluster_keeps_raw_file_shares() {
    let json_data = load_fixture("cluster.json");
    let cluster: Cluster = serde_json::from_str(&json_data).unwrap();

    assert_eq!(cluster.status, Some(PvdcStatus::Modifying));
    assert_eq!(cluster.pvdc_id.as_deref(), Some("pvdc-1"));
    assert_eq!(cluster.director_site.as_deref(), Some("site-4f2c9a"));

    // Keys this client does not model survive in the raw value.
    let raw = cluster.file_shares.as_ref().unwrap();
    assert_eq!(raw["STORAGE_TWENTY_IOPS_GB"], 10);

    let typed = cluster.file_shares_typed().unwrap();
    assert_eq!(typed.storage_two_iops_gb, Some(24000));
    assert_eq!(typed.storage_four_iops_gb, None);
}

#[test]
fn test_deserialize_vdc_list() {
    let json_data = load_fixture("vdcs.json");
    let list: ListVdcs = serde_json::from_str(&json_data).unwrap();
    assert_eq!(list.vdcs.len(), 2);

    let vdc = &list.vdcs[0];
    assert_eq!(vdc.status, Some(VdcStatus::ReadyToUse));
    assert_eq!(vdc.vdc_type, Some(VdcType::Dedicated));
    assert!(vdc.errors.is_empty());
    assert!(vdc.deleted_time.is_none());

    let placement = vdc.director_site.as_ref().unwrap();
    assert_eq!(placement.id, "site-4f2c9a");
    assert_eq!(placement.cluster.as_ref().map(|c| c.id.as_str()), Some("cl-100"));

    let edge = &vdc.edges[0];
    assert_eq!(edge.edge_type, Some(EdgeType::Dedicated));
    assert_eq!(edge.size, Some(EdgeSize::ExtraLarge));
    assert_eq!(edge.public_ips.len(), 2);
}

#[test]
fn test_failed_vdc_reports_errors() {
    let json_data = load_fixture("vdcs.json");
    let list: ListVdcs = serde_json::from_str(&json_data).unwrap();

    let vdc = &list.vdcs[1];
    assert_eq!(vdc.status, Some(VdcStatus::Failed));
    assert_eq!(vdc.errors.len(), 1);
    assert_eq!(vdc.errors[0].code.as_deref(), Some("vdc_creation_failed"));
    assert!(vdc.director_site.as_ref().unwrap().cluster.is_none());
}

#[test]
fn test_deserialize_regions() {
    let json_data = load_fixture("director_site_regions.json");
    let regions: DirectorSiteRegions = serde_json::from_str(&json_data).unwrap();

    let names: Vec<&str> = regions.director_site_regions.keys().map(String::as_str).collect();
    assert_eq!(names, vec!["eu-de", "us-south"]);

    let us_south = &regions.director_site_regions["us-south"];
    assert_eq!(us_south.data_centers.len(), 2);
    assert_eq!(us_south.data_centers[0].display_name.as_deref(), Some("Dallas 10"));
    assert!(regions.director_site_regions["eu-de"].data_centers[0]
        .uplink_speed
        .is_none());
}

#[test]
fn test_deserialize_host_profiles() {
    let json_data = load_fixture("host_profiles.json");
    let profiles: ListHostProfiles = serde_json::from_str(&json_data).unwrap();

    assert_eq!(profiles.director_site_host_profiles.len(), 2);
    let first = &profiles.director_site_host_profiles[0];
    assert_eq!(first.cpu, Some(40));
    assert_eq!(first.features.len(), 2);
    assert!(profiles.director_site_host_profiles[1].features.is_empty());
}

#[test]
fn test_pricing_lookup() {
    let json_data = load_fixture("director_site_pricing.json");
    let pricing: DirectorSitePricingInfo = serde_json::from_str(&json_data).unwrap();

    let host = &pricing.director_site_pricing[0];
    let prices = host
        .prices_for("HOST_BM_2S_20_CORES_192_GB", "DEU")
        .expect("DEU prices should be listed");
    assert_eq!(prices[0].price, Some(3990.0));
    assert!(host.prices_for("HOST_BM_2S_20_CORES_192_GB", "JPN").is_none());
}

#[test]
fn test_deserialize_price_quote() {
    let json_data = load_fixture("price_quote.json");
    let quote: DirectorSitePriceQuoteResponse = serde_json::from_str(&json_data).unwrap();

    assert_eq!(quote.currency.as_deref(), Some("USD"));
    assert_eq!(quote.clusters.len(), 1);
    assert_eq!(quote.clusters[0].host_count, Some(3));
    assert_eq!(quote.total, Some(21464.75));
}

#[test]
fn test_director_sites_reencode() {
    let list: ListDirectorSites =
        serde_json::from_str(&load_fixture("director_sites.json")).unwrap();

    for site in &list.director_sites {
        assert_reencodes(site);
    }
    assert_reencodes(&list);
}

#[test]
fn test_cluster_reencodes_with_map_file_shares() {
    let cluster: Cluster = serde_json::from_str(&load_fixture("cluster.json")).unwrap();
    assert!(cluster.file_shares.as_ref().is_some_and(serde_json::Value::is_object));

    let again = reencode(&cluster);
    assert_eq!(again, cluster);
    assert_eq!(again.file_shares_typed(), cluster.file_shares_typed());
}

#[test]
fn test_vdcs_reencode() {
    let list: ListVdcs = serde_json::from_str(&load_fixture("vdcs.json")).unwrap();

    let mut deleted = list.vdcs[0].clone();
    deleted.deleted_time = Some("2024-04-03T11:00:00.125Z".parse().unwrap());
    assert!(!deleted.edges.is_empty());
    assert!(deleted.ordered_time.is_some() && deleted.created_time.is_some());
    assert_reencodes(&deleted);

    let failed = &list.vdcs[1];
    assert!(!failed.errors.is_empty());
    assert_reencodes(failed);
}

#[test]
fn test_pricing_and_regions_reencode() {
    let pricing: DirectorSitePricingInfo =
        serde_json::from_str(&load_fixture("director_site_pricing.json")).unwrap();
    assert_reencodes(&pricing);

    let regions: DirectorSiteRegions =
        serde_json::from_str(&load_fixture("director_site_regions.json")).unwrap();
    assert_reencodes(&regions);
}
