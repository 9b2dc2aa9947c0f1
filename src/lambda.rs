use aws_config::BehaviorVersion;
use aws_sdk_s3::config::Region;
use aws_sdk_s3::Client as S3Client;
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use outfit_stylist::adapters::storage::S3Storage;
use outfit_stylist::config::lambda::LambdaConfig;
use outfit_stylist::core::ConfigProvider;
use outfit_stylist::domain::model::{OutfitRequest, OutfitResponse};
use outfit_stylist::utils::{logger, validation::Validate};
use outfit_stylist::{
    AnthropicGenerator, OpenWeatherMapClient, OutfitAgent, Recommender, RegexLocationExtractor,
    ServiceDefaults, StylistService, WardrobeRepository,
};
use std::sync::Arc;

type LambdaService =
    StylistService<S3Storage, AnthropicGenerator, OpenWeatherMapClient, RegexLocationExtractor>;

async fn build_service() -> Result<LambdaService, Error> {
    let lambda_config = LambdaConfig::from_env()?;
    lambda_config.validate()?;

    let aws = aws_config::load_defaults(BehaviorVersion::latest()).await;
    let s3_config = aws_sdk_s3::config::Builder::from(&aws)
        .region(Region::new(lambda_config.s3_region.clone()))
        .build();
    let storage = S3Storage::new(
        S3Client::from_conf(s3_config),
        lambda_config.s3_bucket.clone(),
        lambda_config.s3_prefix.clone(),
    );

    let stylist = &lambda_config.stylist;
    let agent = OutfitAgent::new(
        WardrobeRepository::new(storage),
        Recommender::new(
            AnthropicGenerator::new(
                stylist.generation.api_key.clone(),
                stylist.generation.base_url.clone(),
            ),
            lambda_config.generation_settings(),
        ),
    );

    Ok(StylistService::new(
        agent,
        OpenWeatherMapClient::new(
            stylist.weather.api_key.clone(),
            stylist.weather.base_url.clone(),
        ),
        RegexLocationExtractor::new(&stylist.weather.default_city, stylist.weather.country.clone())?,
        ServiceDefaults::from_config(&lambda_config),
    ))
}

async fn function_handler(
    service: Arc<LambdaService>,
    event: LambdaEvent<OutfitRequest>,
) -> Result<OutfitResponse, Error> {
    tracing::info!("Handling outfit request {}", event.context.request_id);

    service.handle(event.payload).await.map_err(|e| {
        tracing::error!(
            "❌ Recommendation failed: {} (Category: {:?})",
            e,
            e.category()
        );
        Box::new(e) as Error
    })
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    logger::init_lambda_logger();

    // 冷啟動時建立一次，之後的請求共用
    let service = Arc::new(build_service().await?);

    run(service_fn(move |event: LambdaEvent<OutfitRequest>| {
        let service = Arc::clone(&service);
        async move { function_handler(service, event).await }
    }))
    .await
}
