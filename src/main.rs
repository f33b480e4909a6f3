use clap::Parser;
use ticket_office::adapters::build_client;
use ticket_office::core::ConfigProvider;
use ticket_office::utils::error::{ErrorSeverity, TicketOfficeError};
use ticket_office::utils::{logger, validation::Validate};
use ticket_office::{
    CliConfig, HttpBookingReferenceAdapter, HttpTrainDataAdapter, TicketOffice, TomlConfig,
};

/// 請求合法但無法安排座位
const EXIT_NO_RESERVATION: i32 = 4;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.json_logs {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("🚀 Starting ticket-office");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    match reserve(&cli).await {
        Ok(Some(json)) => {
            println!("{}", json);
        }
        Ok(None) => {
            tracing::info!("No reservation made for train {}", cli.train_id);
            eprintln!(
                "❌ No reservation possible for {} seat(s) on train {}",
                cli.seat_count.trim(),
                cli.train_id
            );
            std::process::exit(EXIT_NO_RESERVATION);
        }
        Err(e) => {
            tracing::error!(
                "❌ Reservation failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            // 根據錯誤嚴重程度決定退出碼
            let exit_code = match e.severity() {
                ErrorSeverity::Low => 64,     // 請求格式錯誤
                ErrorSeverity::Medium => 2,   // 外部服務錯誤，可重試
                ErrorSeverity::High => 1,     // 設定或資料錯誤
                ErrorSeverity::Critical => 3, // 系統錯誤
            };
            std::process::exit(exit_code);
        }
    }

    Ok(())
}

/// 有設定檔時以 TOML 為主，命令列參數覆蓋
async fn reserve(cli: &CliConfig) -> Result<Option<String>, TicketOfficeError> {
    let Some(path) = &cli.config else {
        return run(cli, &cli.train_id, &cli.seat_count).await;
    };

    tracing::info!("📁 Loading configuration from: {}", path);
    let mut config = TomlConfig::from_file(path)?;
    config.apply_overrides(cli);
    run(&config, &cli.train_id, &cli.seat_count).await
}

async fn run<C: ConfigProvider + Validate>(
    config: &C,
    train_id: &str,
    seat_count: &str,
) -> Result<Option<String>, TicketOfficeError> {
    config.validate()?;
    tracing::info!("✅ Configuration validated");
    tracing::debug!(
        "Train data: {}, booking reference: {}, max occupation: {}%",
        config.train_data_url(),
        config.booking_reference_url(),
        config.max_occupation_percentage()
    );

    let client = build_client(config.request_timeout())?;
    let office = TicketOffice::new(
        HttpTrainDataAdapter::with_client(config.train_data_url(), client.clone())?,
        HttpBookingReferenceAdapter::with_client(config.booking_reference_url(), client)?,
    )
    .with_max_occupation(config.max_occupation_percentage());

    office.reserve(train_id, seat_count).await
}
