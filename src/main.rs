use clap::Parser;
use sixty_days::adapters::cart_csv::load_cart_csv;
use sixty_days::core::{greeting, pointers, promotions};
use sixty_days::domain::order::{Customer, Order};
use sixty_days::utils::{logger, validation::Validate};
use sixty_days::{AppConfig, AppError, CliConfig, Command, FizzBuzzWorker, PokeApiClient};

#[tokio::main]
async fn main() {
    let config = CliConfig::parse();

    // 伺服器設定可能要求 JSON 日誌，延後到載入設定後再初始化
    if !matches!(config.command, Command::Serve { .. }) {
        logger::init_cli_logger(config.verbose);
    }

    if let Err(e) = config.validate() {
        fail(e);
    }

    if let Err(e) = run(config).await {
        fail(e);
    }
}

async fn run(config: CliConfig) -> Result<(), AppError> {
    match config.command {
        Command::Hello { name } => {
            println!("{}", greeting::greeting(name.as_deref()));
        }

        Command::Fizzbuzz { from, to } => {
            let mut worker = FizzBuzzWorker::spawn();
            for (n, answer) in (from..=to).zip(worker.run_range(from, to).await?) {
                tracing::debug!("{} -> {}", n, answer);
                println!("{}", answer);
            }
            worker.shutdown().await;
        }

        Command::Discount {
            cart,
            promo,
            customer,
            fidelity,
        } => match cart {
            Some(path) => {
                let items = load_cart_csv(&path)?;
                tracing::info!("🛒 Loaded {} items from {}", items.len(), path);
                let order = Order::new(Customer::new(customer, fidelity), items).with_promo(promo);
                for item in &order.cart {
                    println!("{}", item);
                }
                println!(
                    "{} (promotion: {}, discount: {:.2})",
                    order,
                    promo.name(),
                    order.discount()
                );
            }
            None => {
                for scenario in promotions::classic_scenarios() {
                    println!("\n{}", scenario.caption);
                    println!("{}", scenario.order);
                }
            }
        },

        Command::Pokedex {
            name,
            base_url,
            config: config_path,
        } => {
            let app_config = load_app_config(config_path.as_deref(), None, base_url)?;
            let client =
                PokeApiClient::new(&app_config.pokeapi.base_url, app_config.pokeapi_timeout())?;
            let pokemon = client.pokemon(&name).await?;
            print!("{}", pokemon.summary());
        }

        Command::Pointers => {
            for line in pointers::walkthrough() {
                println!("{}", line);
            }
        }

        Command::Serve {
            config: config_path,
            bind,
        } => {
            let app_config = load_app_config(config_path.as_deref(), bind, None)?;

            let level = if config.verbose {
                "debug"
            } else {
                app_config.logging.level.as_str()
            };
            if app_config.logging.json {
                logger::init_json_logger(level);
            } else {
                logger::init_cli_logger_with_level(level);
            }
            tracing::info!("📁 Configuration loaded from: {}", config_path.as_deref().unwrap_or("<defaults>"));

            sixty_days::serve(&app_config).await?;
        }
    }

    Ok(())
}

/// 載入設定檔、套用命令列覆蓋，最後才驗證
fn load_app_config(
    path: Option<&str>,
    bind: Option<String>,
    base_url: Option<String>,
) -> Result<AppConfig, AppError> {
    let config = match path {
        Some(path) => AppConfig::from_file(path)?,
        None => AppConfig::default(),
    }
    .with_overrides(bind, base_url);
    config.validate()?;
    Ok(config)
}

fn fail(e: AppError) -> ! {
    tracing::error!(
        "❌ Command failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

    std::process::exit(e.severity().exit_code());
}
