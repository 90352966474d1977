//! SDK の型を core の型に落とすための小物

use aws_sdk_iam::primitives::DateTime as SdkDateTime;
use chrono::{DateTime, Utc};
use stalekey_core::domain::UpstreamError;

/// SDK エラーを、原因の連鎖まで含めた文字列で UpstreamError にする
pub(crate) fn upstream<E>(service: &'static str, err: E) -> UpstreamError
where
    E: std::error::Error,
{
    UpstreamError::new(
        service,
        aws_sdk_iam::error::DisplayErrorContext(err).to_string(),
    )
}

pub(crate) fn to_chrono(at: &SdkDateTime) -> Result<DateTime<Utc>, UpstreamError> {
    DateTime::from_timestamp(at.secs(), at.subsec_nanos())
        .ok_or_else(|| UpstreamError::new("iam", format!("timestamp out of range: {}s", at.secs())))
}
