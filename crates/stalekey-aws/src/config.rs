//! SDK 設定の読み込み
//!
//! 認証情報・リージョンは AWS SDK の標準チェーン（環境変数、プロファイル、
//! インスタンスメタデータ）から解決する。上書きしたいものだけ `AwsSettings` に渡す。

use aws_config::{BehaviorVersion, Region, SdkConfig};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AwsSettings {
    /// 未設定なら AWS_REGION / AWS_DEFAULT_REGION / メタデータの順
    pub region: Option<String>,
    /// LocalStack など互換エンドポイント向け
    pub endpoint_url: Option<String>,
}

pub async fn load_sdk_config(settings: &AwsSettings) -> SdkConfig {
    let mut loader = aws_config::defaults(BehaviorVersion::latest());
    if let Some(region) = &settings.region {
        loader = loader.region(Region::new(region.clone()));
    }
    if let Some(endpoint) = &settings.endpoint_url {
        loader = loader.endpoint_url(endpoint);
    }
    let sdk_config = loader.load().await;
    tracing::debug!(
        region = ?sdk_config.region(),
        endpoint = ?settings.endpoint_url,
        "loaded AWS SDK config"
    );
    sdk_config
}
