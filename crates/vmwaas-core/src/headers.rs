//! SDK identity headers attached to every request.

/// Header carrying the service name, version and operation id.
pub const ANALYTICS_HEADER: &str = "X-IBMCloud-SDK-Analytics";

/// Header used to forward the caller's locale.
pub const ACCEPT_LANGUAGE_HEADER: &str = "Accept-Language";

/// Header used to forward a caller-chosen transaction id.
pub const TRANSACTION_ID_HEADER: &str = crate::response::TRANSACTION_ID_HEADER;

/// Name and version of this SDK, as reported in the `User-Agent`.
pub const SDK_NAME: &str = "vmwaas-rust-sdk";

/// Build the `User-Agent` value for the SDK.
#[must_use]
pub fn user_agent() -> String {
    format!(
        "{SDK_NAME}/{} (lang=rust; arch={}; os={})",
        env!("CARGO_PKG_VERSION"),
        std::env::consts::ARCH,
        std::env::consts::OS
    )
}

/// Headers identifying the SDK and the operation being called.
#[must_use]
pub fn sdk_headers(
    service_name: &str,
    service_version: &str,
    operation_id: &str,
) -> Vec<(&'static str, String)> {
    vec![
        ("User-Agent", user_agent()),
        (
            ANALYTICS_HEADER,
            format!(
                "service_name={service_name};service_version={service_version};operation_id={operation_id}"
            ),
        ),
    ]
}
