use clap::Parser;
use shift_scheduler::app::scheduler::{open_local, Scheduler};
use shift_scheduler::config::{Command, OutputFormat};
use shift_scheduler::core::{Clock, Storage};
use shift_scheduler::domain::model::{ShiftChange, ShiftDraft};
use shift_scheduler::utils::{logger, validation::Validate};
use shift_scheduler::{CliConfig, SchedulerConfig, SchedulerError};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let mut config = CliConfig::parse();

    // 載入 TOML 配置（可選）
    let file_config = match &config.config {
        Some(path) => match SchedulerConfig::from_file(path) {
            Ok(file_config) => file_config,
            Err(e) => exit_with(&e),
        },
        None => SchedulerConfig::default(),
    };
    config.apply_file_config(&file_config);

    // 初始化日誌
    if config.json_logs {
        logger::init_json_logger(config.verbose, file_config.log_level());
    } else {
        logger::init_cli_logger(config.verbose, file_config.log_level());
    }

    tracing::debug!("CLI config: {:?}", config);

    // 驗證配置
    if let Err(e) = file_config.validate().and_then(|_| config.validate()) {
        tracing::error!("❌ Configuration validation failed: {}", e);
        exit_with(&e);
    }

    let outcome = match open_local(&config, file_config.seed_roster()).await {
        Ok(scheduler) => run(&scheduler, &config.command).await,
        Err(e) => Err(e),
    };

    if let Err(e) = outcome {
        tracing::error!(
            "❌ {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        exit_with(&e);
    }

    Ok(())
}

fn exit_with(e: &SchedulerError) -> ! {
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
    std::process::exit(e.exit_code())
}

async fn run<S, C>(scheduler: &Scheduler<S, C>, command: &Command) -> Result<(), SchedulerError>
where
    S: Storage,
    C: Clock + Clone,
{
    match command {
        Command::Week { format } => {
            let rota = scheduler.weekly_rota().await?;
            let rendered = match format {
                OutputFormat::Table => rota.render_table(),
                OutputFormat::Csv => rota.render_csv()?,
                OutputFormat::Json => rota.render_json()?,
            };
            print!("{}", rendered);
        }
        Command::Roles => {
            for entry in scheduler.roles().await? {
                println!(
                    "{:>3}  {:<12} {}",
                    entry.role.id,
                    entry.role.name,
                    entry.employees.join(", ")
                );
            }
        }
        &Command::Create {
            employee,
            role,
            date,
            start,
            end,
        } => {
            let shift = scheduler
                .create_shift(ShiftDraft {
                    employee_id: employee,
                    role_id: role,
                    date,
                    start_time: start,
                    end_time: end,
                })
                .await?;
            println!("✅ Created shift #{}", shift.id);
        }
        &Command::Update {
            id,
            role,
            start,
            end,
        } => {
            let shift = scheduler
                .update_shift(ShiftChange {
                    id,
                    role_id: role,
                    start_time: start,
                    end_time: end,
                })
                .await?;
            println!("✅ Updated shift #{}", shift.id);
        }
        Command::Delete { id } => {
            let shift = scheduler.delete_shift(*id).await?;
            println!("🗑️ Deleted shift #{} on {}", shift.id, shift.date);
        }
    }
    Ok(())
}
