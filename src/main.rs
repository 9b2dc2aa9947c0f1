use clap::Parser;
use outfit_stylist::core::ConfigProvider;
use outfit_stylist::domain::model::WeatherReading;
use outfit_stylist::domain::ports::LocationExtractor;
use outfit_stylist::utils::error::ErrorSeverity;
use outfit_stylist::utils::{logger, validation::Validate};
use outfit_stylist::{
    AnthropicGenerator, CliArgs, LocalStorage, OpenWeatherMapClient, OutfitAgent, Recommender,
    RegexLocationExtractor, ServiceDefaults, StylistConfig, StylistError, StylistService,
    WardrobeRepository,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();
    dotenvy::dotenv().ok();

    // 初始化日誌
    logger::init_cli_logger(args.verbose);
    tracing::info!("Starting outfit-stylist CLI");

    let config = match StylistConfig::load(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            std::process::exit(1);
        }
    };

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    match run(&args, config).await {
        Ok(json) => {
            println!("{}", json);
            Ok(())
        }
        Err(e) => {
            tracing::error!(
                "❌ Recommendation failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            let exit_code = match e.severity() {
                ErrorSeverity::Low => 0,
                ErrorSeverity::Medium => 2, // 可重試
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };
            if exit_code > 0 {
                std::process::exit(exit_code);
            }
            Ok(())
        }
    }
}

async fn run(args: &CliArgs, mut config: StylistConfig) -> Result<String, StylistError> {
    if args.no_shuffle {
        config.defaults.shuffle = false;
    }

    let locator = RegexLocationExtractor::new(
        &config.weather.default_city,
        config.weather.country.clone(),
    )?;
    let weather = OpenWeatherMapClient::new(
        config.weather.api_key.clone(),
        config.weather.base_url.clone(),
    );
    let generator = AnthropicGenerator::new(
        config.generation.api_key.clone(),
        config.generation.base_url.clone(),
    );

    let wardrobes = WardrobeRepository::new(LocalStorage::new(config.wardrobe.data_dir.clone()));
    let agent = OutfitAgent::new(
        wardrobes,
        Recommender::new(generator, config.generation_settings()),
    );
    let defaults = ServiceDefaults::from_config(&config);

    let request = args.to_request()?;
    let manual_reading = args.celsius.map(|celsius| {
        let query = locator.extract(&request.message);
        let today = chrono::Local::now().format("%A, %B %d").to_string();
        WeatherReading::from_celsius(celsius, &query.city, &today)
    });

    let service = StylistService::new(agent, weather, locator, defaults);
    let response = match manual_reading {
        Some(reading) => service.handle_with_weather(request, reading).await?,
        None => service.handle(request).await?,
    };

    Ok(serde_json::to_string_pretty(&response)?)
}
