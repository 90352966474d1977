//! 実行中の認証情報が属するアカウント ID

use aws_sdk_sts::Client;
use stalekey_core::domain::UpstreamError;

use crate::convert::upstream;

pub async fn resolve_account_id(sdk_config: &aws_config::SdkConfig) -> Result<String, UpstreamError> {
    let output = Client::new(sdk_config)
        .get_caller_identity()
        .send()
        .await
        .map_err(|e| upstream("sts", e))?;
    output
        .account()
        .map(str::to_string)
        .ok_or_else(|| UpstreamError::new("sts", "caller identity has no account id"))
}
