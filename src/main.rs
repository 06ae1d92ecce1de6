use clap::Parser;
use digital_twin_sim::app::report::{self, OutputFormat};
use digital_twin_sim::utils::error::{ErrorSeverity, SimError};
use digital_twin_sim::utils::{logger, validation::Validate};
use digital_twin_sim::{CliConfig, HttpRateSource, PricingLookup, Simulator};

#[tokio::main]
async fn main() {
    let config = CliConfig::parse();

    // 初始化日誌
    match config.format {
        OutputFormat::Text => logger::init_cli_logger(config.verbose),
        OutputFormat::Json => logger::init_json_logger(config.verbose),
    }

    tracing::debug!("CLI config: {:?}", config);

    match run(&config).await {
        Ok(output) => println!("{}", output),
        Err(e) => {
            tracing::error!(
                "❌ Simulation failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

            // 根據錯誤嚴重程度決定退出碼
            let exit_code = match e.severity() {
                ErrorSeverity::Low => 0,
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };

            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }
}

async fn run(config: &CliConfig) -> Result<String, SimError> {
    config.validate()?;
    let resolved = config.resolve()?;
    let params = config.parameters()?;

    if params.industry.is_some() && !resolved.preset.uses_rate_lookup() {
        tracing::warn!("--industry only affects the industry-aware preset");
    }

    let source = HttpRateSource::new(&resolved.pricing)?;
    tracing::debug!("Pricing endpoint: {}", source.endpoint());
    let lookup = PricingLookup::with_fallback(source, resolved.pricing.fallback_table());
    let simulator = Simulator::new(resolved.preset, lookup);

    let report = simulator.run(params, config.pricing_pinned()).await?;
    report::render(&report, config.format)
}
